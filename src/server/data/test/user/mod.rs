use crate::server::{data::user::UserRepository, error::AppError, model::user::UpsertUserParam};
use entity::user::{UserRole, UserStatus};
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod get_by_status;
mod set_access;
mod upsert;
