use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration status as reported to clients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusDto {
    Anonymous,
    Pending,
    Approved,
    Denied,
}

/// Application role as reported to and accepted from clients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleDto {
    None,
    User,
    Admin,
}

/// How the session user logged in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoginSourceDto {
    Discord,
    Dev,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserDto {
    pub discord_id: String,
    pub username: String,
    pub status: StatusDto,
    pub role: RoleDto,
    /// Set only when describing the session user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<LoginSourceDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserStatusDto {
    pub status: StatusDto,
    pub role: RoleDto,
}

impl UserStatusDto {
    pub fn anonymous() -> Self {
        Self {
            status: StatusDto::Anonymous,
            role: RoleDto::None,
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveUserForm {
    pub discord_id: String,
    pub role: RoleDto,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DenyUserForm {
    pub discord_id: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct DevLoginForm {
    pub username: String,
    pub password: String,
}
