use crate::server::{data::entry::EntryRepository, error::AppError, model::entry::CreateEntryParam};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_room_ids_for_user;
mod rename;
