//! Environment configuration.
//!
//! `Config::from_env` reads the process environment after `dotenvy` loaded `.env`. Parsing
//! goes through `Config::from_lookup` so tests can supply variables without touching the
//! process environment.

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    time::Duration,
};

use crate::server::{
    error::{config::ConfigError, AppError},
    service::discord::{DevDiscordConfig, GuildInfo},
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DEV_LOGIN_PASSWORD: &str = "password";

/// Runtime profiles selected through `APP_PROFILES`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Profiles {
    /// Live Discord identity provider and OAuth login.
    pub discord: bool,
    /// File system upload storage.
    pub prod: bool,
}

impl Profiles {
    pub fn parse(value: &str) -> Self {
        let mut profiles = Self::default();
        for profile in value.split(',').map(str::trim) {
            match profile.to_ascii_lowercase().as_str() {
                "discord" => profiles.discord = true,
                "prod" => profiles.prod = true,
                "" => {}
                other => tracing::warn!("Ignoring unknown profile {}", other),
            }
        }
        profiles
    }
}

/// Discord application credentials used for the OAuth2 login.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
}

pub struct Config {
    pub database_url: String,
    pub profiles: Profiles,

    pub discord_bot_token: Option<String>,
    /// Set when all OAuth variables are present. Required by the `discord` profile.
    pub oauth: Option<OAuthConfig>,

    pub admin_ids: Vec<u64>,
    pub data_dir: PathBuf,
    pub bind_address: String,
    pub request_timeout: Duration,

    pub dev_discord: DevDiscordConfig,
    pub dev_login_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed configuration
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is unset, or a Discord variable is
    ///   unset while the `discord` profile is active
    /// - `Err(ConfigError::InvalidEnvVar)` - A variable could not be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let profiles = lookup("APP_PROFILES")
            .map(|value| Profiles::parse(&value))
            .unwrap_or_default();

        let oauth = match (
            lookup("DISCORD_CLIENT_ID"),
            lookup("DISCORD_CLIENT_SECRET"),
            lookup("DISCORD_REDIRECT_URL"),
        ) {
            (Some(client_id), Some(client_secret), Some(redirect_url)) => Some(OAuthConfig {
                client_id,
                client_secret,
                redirect_url,
                auth_url: DISCORD_AUTH_URL.to_string(),
                token_url: DISCORD_TOKEN_URL.to_string(),
            }),
            _ => None,
        };

        let discord_bot_token = lookup("DISCORD_BOT_TOKEN");

        if profiles.discord {
            require("DISCORD_BOT_TOKEN")?;
            require("DISCORD_CLIENT_ID")?;
            require("DISCORD_CLIENT_SECRET")?;
            require("DISCORD_REDIRECT_URL")?;
        }

        let admin_ids = match lookup("ADMIN_IDS") {
            Some(value) => parse_ids("ADMIN_IDS", &value)?,
            None => Vec::new(),
        };

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_u64("REQUEST_TIMEOUT_SECS", &value)?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let dev_discord = DevDiscordConfig {
            guilds: parse_named("DEV_GUILDS", lookup("DEV_GUILDS"))?
                .into_iter()
                .map(|(id, name)| GuildInfo { id, name })
                .collect(),
            admin_guilds: match lookup("DEV_ADMIN_GUILDS") {
                Some(value) => parse_ids("DEV_ADMIN_GUILDS", &value)?.into_iter().collect(),
                None => HashSet::new(),
            },
            users: parse_named("DEV_USERS", lookup("DEV_USERS"))?
                .into_iter()
                .collect(),
            guild_members: parse_guild_sets("DEV_GUILD_MEMBERS", lookup("DEV_GUILD_MEMBERS"))?,
            guild_admins: parse_guild_sets("DEV_GUILD_ADMINS", lookup("DEV_GUILD_ADMINS"))?,
            unavailable_guilds: match lookup("DEV_UNAVAILABLE_GUILDS") {
                Some(value) => parse_ids("DEV_UNAVAILABLE_GUILDS", &value)?.into_iter().collect(),
                None => HashSet::new(),
            },
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            profiles,
            discord_bot_token,
            oauth,
            admin_ids,
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            request_timeout,
            dev_discord,
            dev_login_password: lookup("DEV_LOGIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_DEV_LOGIN_PASSWORD.to_string()),
        })
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn parse_u64(name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(name, format!("'{}' is not a valid id: {}", value.trim(), e)))
}

/// `id,id,...`
fn parse_ids(name: &str, value: &str) -> Result<Vec<u64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_u64(name, item))
        .collect()
}

/// `id:name,id:name,...`
fn parse_named(name: &str, value: Option<String>) -> Result<Vec<(u64, String)>, ConfigError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (id, label) = item
                .split_once(':')
                .ok_or_else(|| invalid(name, format!("'{}' is not in id:name form", item)))?;
            let label = label.trim();
            if label.is_empty() {
                return Err(invalid(name, format!("'{}' has an empty name", item)));
            }
            Ok((parse_u64(name, id)?, label.to_string()))
        })
        .collect()
}

/// `guild=user|user,guild=user,...`
fn parse_guild_sets(
    name: &str,
    value: Option<String>,
) -> Result<HashMap<u64, HashSet<u64>>, ConfigError> {
    let mut sets: HashMap<u64, HashSet<u64>> = HashMap::new();
    let Some(value) = value else {
        return Ok(sets);
    };

    for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (guild, users) = item
            .split_once('=')
            .ok_or_else(|| invalid(name, format!("'{}' is not in guild=user|user form", item)))?;

        let entry = sets.entry(parse_u64(name, guild)?).or_default();
        for user in users.split('|').map(str::trim).filter(|user| !user.is_empty()) {
            entry.insert(parse_u64(name, user)?);
        }
    }

    Ok(sets)
}
