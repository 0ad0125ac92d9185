//! Business logic orchestration between controllers and the data layer.
//!
//! Services take borrowed dependencies out of `AppState` and are constructed per request.

pub mod access;
pub mod auth;
pub mod discord;
pub mod room;
pub mod user;

#[cfg(test)]
pub(crate) mod test;
