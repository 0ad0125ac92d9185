use serenity::all::{ActivityData, Context, EventHandler, Guild, Ready, UnavailableGuild};
use serenity::async_trait;

/// Discord bot event handler
pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(
            "{} is connected to Discord and sees {} guilds",
            ready.user.name,
            ready.guilds.len()
        );

        ctx.set_activity(Some(ActivityData::custom("Hosting multiworld lobbies")));
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new.unwrap_or(false) {
            tracing::info!("Joined guild {} ({})", guild.name, guild.id);
        } else {
            tracing::debug!("Guild {} ({}) is available", guild.name, guild.id);
        }
    }

    /// Called when the bot leaves a guild or the guild becomes unavailable
    async fn guild_delete(
        &self,
        _ctx: Context,
        incomplete: UnavailableGuild,
        _full: Option<Guild>,
    ) {
        if incomplete.unavailable {
            tracing::warn!("Guild {} became unavailable", incomplete.id);
        } else {
            tracing::info!("Left guild {}", incomplete.id);
        }
    }
}
