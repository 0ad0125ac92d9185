use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::server::service::discord::{GuildInfo, ProviderUnavailable, UserInfo};

/// Static roster used instead of Discord in development and tests.
///
/// Without per-guild restrictions every user is a member of every configured guild and an
/// admin of every admin guild. A user listed as admin of a guild is always a member of it.
/// Checks and lookups for an unavailable guild fail the way a Discord outage would.
#[derive(Debug, Clone, Default)]
pub struct DevDiscordConfig {
    /// Configured guilds in listing order.
    pub guilds: Vec<GuildInfo>,
    /// Guilds in which users are admins unless `guild_admins` restricts the guild.
    pub admin_guilds: HashSet<u64>,
    /// Known usernames by user id.
    pub users: HashMap<u64, String>,
    /// Guild id to the only users that are members of it.
    pub guild_members: HashMap<u64, HashSet<u64>>,
    /// Guild id to the only users that are admins of it.
    pub guild_admins: HashMap<u64, HashSet<u64>>,
    /// Guilds whose checks and lookups fail.
    pub unavailable_guilds: HashSet<u64>,
}

#[derive(Clone)]
pub struct DevDiscordService {
    config: Arc<DevDiscordConfig>,
}

impl DevDiscordService {
    pub fn new(config: DevDiscordConfig) -> Self {
        tracing::info!(
            "Using dev Discord roster with {} guilds and {} users",
            config.guilds.len(),
            config.users.len()
        );

        Self {
            config: Arc::new(config),
        }
    }

    fn is_known_guild(&self, guild_id: u64) -> bool {
        self.config.guilds.iter().any(|guild| guild.id == guild_id)
    }

    fn ensure_available(&self, guild_id: u64) -> Result<(), ProviderUnavailable> {
        if self.config.unavailable_guilds.contains(&guild_id) {
            return Err(ProviderUnavailable::DevGuild(guild_id));
        }

        Ok(())
    }

    fn listed_as_admin(&self, user_id: u64, guild_id: u64) -> bool {
        if !self.is_known_guild(guild_id) {
            return false;
        }

        match self.config.guild_admins.get(&guild_id) {
            Some(admins) => admins.contains(&user_id),
            None => self.config.admin_guilds.contains(&guild_id),
        }
    }

    pub fn is_admin_of_guild(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<bool, ProviderUnavailable> {
        self.ensure_available(guild_id)?;

        Ok(self.listed_as_admin(user_id, guild_id))
    }

    pub fn is_member_of_guild(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<bool, ProviderUnavailable> {
        self.ensure_available(guild_id)?;

        if !self.is_known_guild(guild_id) {
            return Ok(false);
        }

        if self.listed_as_admin(user_id, guild_id) {
            return Ok(true);
        }

        Ok(match self.config.guild_members.get(&guild_id) {
            Some(members) => members.contains(&user_id),
            None => true,
        })
    }

    /// Configured guilds in listing order, unavailable ones included.
    pub fn list_guilds(&self) -> Vec<GuildInfo> {
        self.config.guilds.clone()
    }

    pub fn get_user_info(&self, user_id: u64) -> UserInfo {
        let username = self
            .config
            .users
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| format!("DevUser_{}", user_id));

        UserInfo {
            id: user_id,
            username,
        }
    }

    pub fn get_guild_info(&self, guild_id: u64) -> Result<GuildInfo, ProviderUnavailable> {
        self.ensure_available(guild_id)?;

        let guild = self
            .config
            .guilds
            .iter()
            .find(|guild| guild.id == guild_id)
            .cloned()
            .unwrap_or_else(|| GuildInfo {
                id: guild_id,
                name: format!("DevGuild_{}", guild_id),
            });

        Ok(guild)
    }
}
