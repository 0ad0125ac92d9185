use std::collections::{HashMap, HashSet};

use crate::server::service::discord::{
    DevDiscordConfig, DevDiscordService, DiscordService, GuildInfo,
};

mod user;

/// Admin of guild 123.
pub(crate) const ADMIN: u64 = 1;
/// Member of no restricted guild.
pub(crate) const OUTSIDER: u64 = 2;
/// Plain members of guild 123.
pub(crate) const MEMBER: u64 = 3;
pub(crate) const OTHER_MEMBER: u64 = 4;

pub(crate) const GUILD: u64 = 123;
/// Unrestricted guild without admins, everyone is a member.
pub(crate) const OPEN_GUILD: u64 = 456;

/// Dev roster shared by service and controller tests.
pub(crate) fn dev_discord() -> DiscordService {
    DiscordService::Dev(DevDiscordService::new(dev_roster()))
}

/// The shared roster with every lookup for `guild_id` failing.
pub(crate) fn dev_discord_with_outage(guild_id: u64) -> DiscordService {
    DiscordService::Dev(DevDiscordService::new(DevDiscordConfig {
        unavailable_guilds: HashSet::from([guild_id]),
        ..dev_roster()
    }))
}

fn dev_roster() -> DevDiscordConfig {
    DevDiscordConfig {
        guilds: vec![
            GuildInfo {
                id: GUILD,
                name: "Racers".to_string(),
            },
            GuildInfo {
                id: OPEN_GUILD,
                name: "Casuals".to_string(),
            },
        ],
        admin_guilds: HashSet::from([GUILD]),
        users: HashMap::from([
            (ADMIN, "alice".to_string()),
            (MEMBER, "carol".to_string()),
        ]),
        guild_members: HashMap::from([(GUILD, HashSet::from([MEMBER, OTHER_MEMBER]))]),
        guild_admins: HashMap::from([(GUILD, HashSet::from([ADMIN]))]),
        unavailable_guilds: HashSet::new(),
    }
}
