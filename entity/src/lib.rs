//! SeaORM entity models for the archipelobby database schema.

pub mod prelude;

pub mod entry;
pub mod room;
pub mod user;
