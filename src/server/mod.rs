//! Server-side API backend and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations and Serenity
//! for Discord integration. Discord answers who belongs to which guild and who administers it,
//! the database keeps rooms, entries and application users, and uploads hold the YAML files.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, authentication and DTO conversion
//! - **Service Layer** (`service/`) - Room rules, authorization and the identity provider
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and authentication guards
//! - **Storage** (`storage/`) - Uploaded file storage on disk or in memory
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, identity provider, uploads)
//! - **Startup** (`startup`) - Initialization of database, sessions and services
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Bot** (`bot/`) - Discord gateway client for the live profile
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** loads the session and resolves the logged in user
//! 3. **Controller** converts form input and calls the service
//! 4. **Service** checks guild access with the identity provider and applies the room rules
//! 5. **Data** queries the database and converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO and returns the response

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod storage;
pub mod util;
