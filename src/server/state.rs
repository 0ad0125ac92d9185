//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request handler
//! through Axum's state extraction. Every field is cheap to clone: the database connection is
//! a pool, the HTTP client and the identity provider are reference counted and the upload store
//! shares its backing map.

use std::sync::Arc;

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::{service::discord::DiscordService, storage::UploadStore};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for Discord API requests, configured without redirects.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Discord login flow, `None` when OAuth is not configured.
    pub oauth_client: Option<OAuth2Client>,

    /// Identity provider answering guild membership and admin questions.
    pub discord: DiscordService,

    /// Storage for uploaded YAML files.
    pub uploads: UploadStore,

    /// Discord ids promoted to application admin on login.
    pub admin_ids: Arc<[u64]>,

    /// Shared password of the dev login form.
    pub dev_login_password: Arc<str>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: Option<OAuth2Client>,
        discord: DiscordService,
        uploads: UploadStore,
        admin_ids: Vec<u64>,
        dev_login_password: String,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            discord,
            uploads,
            admin_ids: admin_ids.into(),
            dev_login_password: dev_login_password.into(),
        }
    }
}
