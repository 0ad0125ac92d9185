//! Domain models and operation-specific parameter types.
//!
//! Domain models hold Discord ids as `u64`. Conversion from the string columns of the
//! entity models happens once, at the repository boundary, via `from_entity`.

pub mod entry;
pub mod room;
pub mod user;
