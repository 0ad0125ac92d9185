use std::sync::Arc;

use serenity::{
    all::{GuildId, Permissions, RoleId, UserId},
    http::{Http, HttpError},
};

use crate::server::service::discord::{GuildInfo, ProviderUnavailable, UserInfo};

/// Identity provider backed by the Discord REST API, authenticated as the bot.
///
/// Only guilds the bot has joined are visible.
#[derive(Clone)]
pub struct LiveDiscordService {
    http: Arc<Http>,
}

impl LiveDiscordService {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Membership means the guild member lookup succeeds. A 404 answers `Ok(false)`.
    pub async fn is_member_of_guild(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<bool, ProviderUnavailable> {
        match self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// The guild owner is always admin. Otherwise any role of the member, including the
    /// implicit `@everyone` role, must carry `ADMINISTRATOR`.
    pub async fn is_admin_of_guild(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<bool, ProviderUnavailable> {
        let guild = self.http.get_guild(GuildId::new(guild_id)).await?;

        if guild.owner_id.get() == user_id {
            return Ok(true);
        }

        let member = match self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await
        {
            Ok(member) => member,
            Err(e) if is_not_found(&e) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let everyone = RoleId::new(guild_id);
        let is_admin = member
            .roles
            .iter()
            .chain(std::iter::once(&everyone))
            .filter_map(|role_id| guild.roles.get(role_id))
            .any(|role| role.permissions.contains(Permissions::ADMINISTRATOR));

        Ok(is_admin)
    }

    pub async fn get_user_info(&self, user_id: u64) -> Result<UserInfo, ProviderUnavailable> {
        let user = self.http.get_user(UserId::new(user_id)).await?;

        Ok(UserInfo {
            id: user_id,
            username: user.name,
        })
    }

    pub async fn get_guild_info(&self, guild_id: u64) -> Result<GuildInfo, ProviderUnavailable> {
        let guild = self.http.get_guild(GuildId::new(guild_id)).await?;

        Ok(GuildInfo {
            id: guild_id,
            name: guild.name,
        })
    }

    /// Guilds the bot has joined.
    pub async fn list_guilds(&self) -> Result<Vec<GuildInfo>, ProviderUnavailable> {
        let guilds = self.http.get_guilds(None, None).await?;

        Ok(guilds
            .into_iter()
            .map(|guild| GuildInfo {
                id: guild.id.get(),
                name: guild.name,
            })
            .collect())
    }
}

fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}
