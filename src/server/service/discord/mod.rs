//! Identity provider adapter answering guild membership and permission questions.
//!
//! `DiscordService` is chosen once at startup: `Live` talks to the Discord REST API with
//! the bot token, `Dev` answers from static configuration. Both backends report failures as
//! `ProviderUnavailable`, and callers never see them. Checks answer `false`, listings skip
//! the failing guild and lookups fall back to a placeholder name. Every swallowed failure is
//! logged at warn level.

pub mod dev;
pub mod live;

use futures_util::future::join_all;
use thiserror::Error;

use crate::model::room::{GuildDto, UserInfoDto};

pub use dev::{DevDiscordConfig, DevDiscordService};
pub use live::LiveDiscordService;

/// Id and display name of a Discord guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: u64,
    pub name: String,
}

impl GuildInfo {
    pub fn into_dto(self) -> GuildDto {
        GuildDto {
            id: self.id.to_string(),
            name: self.name,
        }
    }
}

/// Id and username of a Discord user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: u64,
    pub username: String,
}

impl UserInfo {
    pub fn into_dto(self) -> UserInfoDto {
        UserInfoDto {
            id: self.id.to_string(),
            username: self.username,
        }
    }
}

/// A provider request that could not be answered.
#[derive(Error, Debug)]
pub enum ProviderUnavailable {
    /// Discord REST API error. Boxed due to large size.
    #[error(transparent)]
    Discord(Box<serenity::Error>),

    /// Dev guild listed in `DEV_UNAVAILABLE_GUILDS`.
    #[error("Dev guild {0} is configured as unavailable")]
    DevGuild(u64),
}

impl From<serenity::Error> for ProviderUnavailable {
    fn from(err: serenity::Error) -> Self {
        ProviderUnavailable::Discord(Box::new(err))
    }
}

#[derive(Debug, Clone, Copy)]
enum GuildCheck {
    Member,
    Admin,
}

impl GuildCheck {
    fn label(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

#[derive(Clone)]
pub enum DiscordService {
    Live(LiveDiscordService),
    Dev(DevDiscordService),
}

impl DiscordService {
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev(_))
    }

    pub async fn is_member_of_guild(&self, user_id: u64, guild_id: u64) -> bool {
        self.check_or_deny(GuildCheck::Member, user_id, guild_id).await
    }

    pub async fn is_admin_of_guild(&self, user_id: u64, guild_id: u64) -> bool {
        self.check_or_deny(GuildCheck::Admin, user_id, guild_id).await
    }

    /// Guilds shared by the user and the provider, in provider order.
    pub async fn get_guilds_for_user(&self, user_id: u64) -> Vec<GuildInfo> {
        self.guilds_passing(GuildCheck::Member, user_id).await
    }

    /// Guilds in which the user may create and delete rooms.
    pub async fn get_admin_guilds_for_user(&self, user_id: u64) -> Vec<GuildInfo> {
        self.guilds_passing(GuildCheck::Admin, user_id).await
    }

    pub async fn is_member_of_any_guild(&self, user_id: u64) -> bool {
        !self.get_guilds_for_user(user_id).await.is_empty()
    }

    pub async fn get_user_info(&self, user_id: u64) -> UserInfo {
        let result = match self {
            Self::Live(live) => live.get_user_info(user_id).await,
            Self::Dev(dev) => Ok(dev.get_user_info(user_id)),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch Discord user {}: {}", user_id, e);
            UserInfo {
                id: user_id,
                username: format!("User_{}", user_id),
            }
        })
    }

    pub async fn get_guild_info(&self, guild_id: u64) -> GuildInfo {
        let result = match self {
            Self::Live(live) => live.get_guild_info(guild_id).await,
            Self::Dev(dev) => dev.get_guild_info(guild_id),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch Discord guild {}: {}", guild_id, e);
            GuildInfo {
                id: guild_id,
                name: format!("Guild_{}", guild_id),
            }
        })
    }

    async fn check(
        &self,
        check: GuildCheck,
        user_id: u64,
        guild_id: u64,
    ) -> Result<bool, ProviderUnavailable> {
        match (self, check) {
            (Self::Live(live), GuildCheck::Member) => {
                live.is_member_of_guild(user_id, guild_id).await
            }
            (Self::Live(live), GuildCheck::Admin) => {
                live.is_admin_of_guild(user_id, guild_id).await
            }
            (Self::Dev(dev), GuildCheck::Member) => dev.is_member_of_guild(user_id, guild_id),
            (Self::Dev(dev), GuildCheck::Admin) => dev.is_admin_of_guild(user_id, guild_id),
        }
    }

    async fn check_or_deny(&self, check: GuildCheck, user_id: u64, guild_id: u64) -> bool {
        match self.check(check, user_id, guild_id).await {
            Ok(passed) => passed,
            Err(e) => {
                tracing::warn!(
                    "Failed to check {} permission of user {} in guild {}: {}",
                    check.label(),
                    user_id,
                    guild_id,
                    e
                );
                false
            }
        }
    }

    /// Provider guilds passing `check` for the user. Guilds whose check fails are skipped.
    async fn guilds_passing(&self, check: GuildCheck, user_id: u64) -> Vec<GuildInfo> {
        let listing = match self {
            Self::Live(live) => live.list_guilds().await,
            Self::Dev(dev) => Ok(dev.list_guilds()),
        };

        let guilds = match listing {
            Ok(guilds) => guilds,
            Err(e) => {
                tracing::warn!("Failed to list guilds of the provider: {}", e);
                return Vec::new();
            }
        };

        let checks = guilds
            .iter()
            .map(|guild| self.check(check, user_id, guild.id));
        let results = join_all(checks).await;

        guilds
            .into_iter()
            .zip(results)
            .filter_map(|(guild, result)| match result {
                Ok(true) => Some(guild),
                Ok(false) => None,
                Err(e) => {
                    tracing::warn!(
                        "Skipping guild {} while listing {} guilds of user {}: {}",
                        guild.id,
                        check.label(),
                        user_id,
                        e
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    fn guild(id: u64, name: &str) -> GuildInfo {
        GuildInfo {
            id,
            name: name.to_string(),
        }
    }

    fn roster_with_outage() -> DiscordService {
        DiscordService::Dev(DevDiscordService::new(DevDiscordConfig {
            guilds: vec![guild(123, "Racers"), guild(456, "Casuals")],
            admin_guilds: HashSet::from([123, 456]),
            users: HashMap::from([(1, "alice".to_string())]),
            unavailable_guilds: HashSet::from([456]),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn failing_checks_answer_false() {
        let discord = roster_with_outage();

        assert!(discord.is_member_of_guild(1, 123).await);
        assert!(!discord.is_member_of_guild(1, 456).await);
        assert!(!discord.is_admin_of_guild(1, 456).await);
    }

    #[tokio::test]
    async fn listings_skip_only_the_failing_guild() {
        let discord = roster_with_outage();

        assert_eq!(discord.get_guilds_for_user(1).await, vec![guild(123, "Racers")]);
        assert_eq!(
            discord.get_admin_guilds_for_user(1).await,
            vec![guild(123, "Racers")]
        );
        assert!(discord.is_member_of_any_guild(1).await);
    }

    #[tokio::test]
    async fn failing_guild_lookup_falls_back_to_placeholder() {
        let discord = roster_with_outage();

        assert_eq!(discord.get_guild_info(123).await.name, "Racers");
        assert_eq!(discord.get_guild_info(456).await.name, "Guild_456");
    }
}
