//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let room = factory::create_room(&db, "123").await?;
//!     let entry = factory::create_entry(&db, room.id, &user.discord_id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let user = factory::user::UserFactory::new(&db)
//!     .discord_id("987654321")
//!     .status(UserStatus::Pending)
//!     .build()
//!     .await?;
//! ```

pub mod entry;
pub mod helpers;
pub mod room;
pub mod user;

pub use entry::create_entry;
pub use room::create_room;
pub use user::create_user;
