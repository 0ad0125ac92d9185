//! Archipelobby Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the archipelobby
//! application. This crate offers a builder pattern for creating test contexts with in-memory
//! SQLite databases and customizable table schemas, plus factories for rooms, entries and users.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn test_room_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_room_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let room = factory::room::create_room(db, "123").await?;
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
