//! Discord gateway client for the live profile.
//!
//! The gateway connection only keeps the bot online and logs guild availability. Membership
//! and permission questions go through the REST client shared with `LiveDiscordService`.

pub mod handler;
pub mod start;
