//! Authorization decisions for rooms and entries.
//!
//! Every decision is derived from the identity provider at the time of the request, nothing
//! about guild membership or permission is cached or persisted.

use crate::server::{
    error::AppError,
    model::{entry::Entry, room::Room},
    service::discord::DiscordService,
};

pub struct RoomAccess<'a> {
    discord: &'a DiscordService,
}

impl<'a> RoomAccess<'a> {
    pub fn new(discord: &'a DiscordService) -> Self {
        Self { discord }
    }

    pub async fn can_create_room(&self, user_id: u64, guild_id: u64) -> bool {
        self.discord.is_admin_of_guild(user_id, guild_id).await
    }

    pub async fn can_join_room(&self, user_id: u64, room: &Room) -> bool {
        self.discord.is_member_of_guild(user_id, room.guild_id).await
    }

    /// Owners may always change their entry, guild admins may change any entry.
    pub fn can_mutate_entry(&self, user_id: u64, entry: &Entry, is_admin: bool) -> bool {
        entry.user_id == user_id || is_admin
    }

    pub async fn can_delete_room(&self, user_id: u64, room: &Room) -> bool {
        self.discord.is_admin_of_guild(user_id, room.guild_id).await
    }

    pub async fn require_create_room(&self, user_id: u64, guild_id: u64) -> Result<(), AppError> {
        if !self.can_create_room(user_id, guild_id).await {
            return Err(AppError::Forbidden("Not an admin of this guild".to_string()));
        }

        Ok(())
    }

    pub async fn require_join_room(&self, user_id: u64, room: &Room) -> Result<(), AppError> {
        if !self.can_join_room(user_id, room).await {
            return Err(AppError::Forbidden("Cannot join this room".to_string()));
        }

        Ok(())
    }

    pub fn require_mutate_entry(
        &self,
        user_id: u64,
        entry: &Entry,
        is_admin: bool,
    ) -> Result<(), AppError> {
        if !self.can_mutate_entry(user_id, entry, is_admin) {
            return Err(AppError::Forbidden("Cannot modify another user's entry".to_string()));
        }

        Ok(())
    }

    pub async fn require_delete_room(&self, user_id: u64, room: &Room) -> Result<(), AppError> {
        if !self.can_delete_room(user_id, room).await {
            return Err(AppError::Forbidden("Not an admin of this guild".to_string()));
        }

        Ok(())
    }
}
