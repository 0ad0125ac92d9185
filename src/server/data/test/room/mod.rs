use crate::server::{data::room::RoomRepository, error::AppError, model::room::CreateRoomParam};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_with_entries;
mod get_by_guild;
