//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never touches entities directly.

pub mod entry;
pub mod room;
pub mod user;

#[cfg(test)]
mod test;
