//! User domain models and parameters.
//!
//! Application users are identified by their Discord id and carry a registration status
//! and an application role. Neither is related to Discord guild permissions.

use chrono::{DateTime, Utc};
use entity::user::{UserRole, UserStatus};

use crate::{
    model::user::{RoleDto, StatusDto, UserDto, UserStatusDto},
    server::{error::AppError, util::parse::parse_u64_from_string},
};

/// Application user with registration state.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Discord ID of the user
    pub discord_id: u64,
    /// Discord username at last login.
    pub username: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            discord_id: self.discord_id.to_string(),
            username: self.username,
            status: status_dto(self.status),
            role: role_dto(self.role),
            source: None,
        }
    }

    pub fn status_dto(&self) -> UserStatusDto {
        UserStatusDto {
            status: status_dto(self.status),
            role: role_dto(self.role),
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStringId))` - Failed to convert stored user
    ///   Discord ID from String to u64
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let discord_id = parse_u64_from_string(entity.discord_id)?;

        Ok(Self {
            discord_id,
            username: entity.username,
            status: entity.status,
            role: entity.role,
            created_at: entity.created_at,
        })
    }
}

fn status_dto(status: UserStatus) -> StatusDto {
    match status {
        UserStatus::Pending => StatusDto::Pending,
        UserStatus::Approved => StatusDto::Approved,
        UserStatus::Denied => StatusDto::Denied,
    }
}

fn role_dto(role: UserRole) -> RoleDto {
    match role {
        UserRole::User => RoleDto::User,
        UserRole::Admin => RoleDto::Admin,
    }
}

/// Converts a client supplied role into the stored role.
///
/// # Returns
/// - `Ok(UserRole)` - `USER` or `ADMIN`
/// - `Err(AppError::BadRequest)` - `NONE` is not assignable
pub fn role_from_dto(role: RoleDto) -> Result<UserRole, AppError> {
    match role {
        RoleDto::User => Ok(UserRole::User),
        RoleDto::Admin => Ok(UserRole::Admin),
        RoleDto::None => Err(AppError::BadRequest("Invalid role".to_string())),
    }
}

/// Parameters for upserting a user during login.
///
/// `status` and `role` are applied on insert and, when `Some`, also overwrite the stored
/// values of an existing user. `None` keeps the stored value (or pending/user for new
/// users), so a plain login never changes a user's access.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    /// Discord ID of the user
    pub discord_id: u64,
    pub username: String,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
}
