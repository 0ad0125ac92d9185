pub mod api;
pub mod room;
pub mod user;
