use std::sync::Arc;

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::{Config, OAuthConfig},
    error::{config::ConfigError, AppError},
    service::discord::{DevDiscordService, DiscordService, LiveDiscordService},
    state::OAuth2Client,
    storage::UploadStore,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions expire after 7 days of inactivity. Cookies are only marked secure in the `prod`
/// profile so local development works over plain HTTP.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    secure: bool,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool().clone();
    let session_store = SqliteStore::new(pool);

    session_store.migrate().await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    Ok(session_layer)
}

/// HTTP client for Discord API requests. Redirects are disabled to prevent SSRF.
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

/// Builds the Discord OAuth2 client, or `None` when no credentials are configured.
///
/// # Returns
/// - `Ok(Some(OAuth2Client))` - Client ready for the login flow
/// - `Ok(None)` - OAuth login is disabled
/// - `Err(ConfigError::InvalidEnvVar)` - A configured URL is malformed
pub fn setup_oauth_client(config: &Config) -> Result<Option<OAuth2Client>, AppError> {
    let Some(oauth) = config.oauth.as_ref() else {
        tracing::info!("Discord OAuth is not configured, login is limited to the dev form");
        return Ok(None);
    };

    Ok(Some(build_oauth_client(oauth)?))
}

fn build_oauth_client(oauth: &OAuthConfig) -> Result<OAuth2Client, ConfigError> {
    let invalid_url = |name: &str, e: url::ParseError| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: e.to_string(),
    };

    let client = oauth2::basic::BasicClient::new(ClientId::new(oauth.client_id.clone()))
        .set_client_secret(ClientSecret::new(oauth.client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(oauth.auth_url.clone()).map_err(|e| invalid_url("DISCORD_AUTH_URL", e))?,
        )
        .set_token_uri(
            TokenUrl::new(oauth.token_url.clone())
                .map_err(|e| invalid_url("DISCORD_TOKEN_URL", e))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(oauth.redirect_url.clone())
                .map_err(|e| invalid_url("DISCORD_REDIRECT_URL", e))?,
        );

    Ok(client)
}

/// Selects the identity provider for the configured profiles.
///
/// The `discord` profile uses the bot's REST client, every other profile the dev roster.
pub fn build_discord_service(
    config: &Config,
    discord_http: Option<Arc<serenity::http::Http>>,
) -> DiscordService {
    match discord_http {
        Some(http) if config.profiles.discord => {
            DiscordService::Live(LiveDiscordService::new(http))
        }
        _ => DiscordService::Dev(DevDiscordService::new(config.dev_discord.clone())),
    }
}

/// Selects file system uploads in the `prod` profile and in-memory uploads otherwise.
pub async fn setup_upload_store(config: &Config) -> Result<UploadStore, AppError> {
    if config.profiles.prod {
        tracing::info!("Storing uploads under {}", config.data_dir.display());
        UploadStore::file_system(&config.data_dir).await
    } else {
        tracing::info!("Storing uploads in memory, they are lost on restart");
        Ok(UploadStore::in_memory())
    }
}
