mod model;
mod server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    bot, config::Config, error::AppError, router, startup, state::AppState,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, config.profiles.prod).await?;
    let http_client = startup::setup_reqwest_client();
    let oauth_client = startup::setup_oauth_client(&config)?;

    // Initialize the Discord bot and share its REST client with the identity provider
    let discord_http = match config.discord_bot_token.as_deref() {
        Some(token) if config.profiles.discord => {
            let (bot_client, discord_http) = bot::start::init_bot(token).await?;

            tokio::spawn(async move {
                if let Err(e) = bot::start::start_bot(bot_client).await {
                    tracing::error!("Discord bot error: {}", e);
                }
            });

            Some(discord_http)
        }
        _ => None,
    };

    let discord = startup::build_discord_service(&config, discord_http);
    if discord.is_dev() {
        tracing::warn!("Using the dev identity provider, dev login is enabled");
    }

    let uploads = startup::setup_upload_store(&config).await?;

    let state = AppState::new(
        db,
        http_client,
        oauth_client,
        discord,
        uploads,
        config.admin_ids.clone(),
        config.dev_login_password.clone(),
    );

    let app = router::build_app(state, session, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
