use std::sync::Arc;

use serenity::all::{Client, GatewayIntents, Http};

use crate::server::{bot::handler::Handler, error::AppError};

/// Builds the Discord client and hands out its REST client.
///
/// The REST client is shared with the identity provider so both use the same rate limiter.
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client ready to start and its REST client
/// - `Err(AppError::DiscordErr)` - Client could not be built, e.g. a malformed token
pub async fn init_bot(token: &str) -> Result<(Client, Arc<Http>), AppError> {
    let intents = GatewayIntents::GUILDS;

    let client = Client::builder(token, intents)
        .event_handler(Handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Runs the gateway connection until it shuts down.
///
/// Call from within a `tokio::spawn` task since it only returns when the bot stops.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
