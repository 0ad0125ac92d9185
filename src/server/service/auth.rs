//! OAuth2 login with Discord

use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, Scope,
    StandardTokenResponse, TokenResponse,
};
use serenity::all::User as DiscordUser;
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    service::discord::UserInfo,
    state::OAuth2Client,
};

const DISCORD_USER_URL: &str = "https://discord.com/api/users/@me";

pub struct DiscordAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    /// Builds the Discord authorize URL requesting the `identify` scope.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url()
    }

    /// Exchanges the authorization code and fetches the Discord identity behind it.
    ///
    /// # Returns
    /// - `Ok(UserInfo)` - Id and username of the logged in Discord user
    /// - `Err(AuthError::RequestTokenErr)` - Code exchange failed
    /// - `Err(AppError::ReqwestErr)` - Fetching the user failed
    pub async fn callback(&self, authorization_code: String) -> Result<UserInfo, AppError> {
        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(AuthError::from)?;

        let user = self.fetch_discord_user(&token).await?;

        Ok(UserInfo {
            id: user.id.get(),
            username: user.name,
        })
    }

    /// Retrieves a Discord user's information using provided access token
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, AppError> {
        let access_token = token.access_token().secret();

        let user_info = self
            .http_client
            .get(DISCORD_USER_URL)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<DiscordUser>()
            .await?;

        Ok(user_info)
    }
}
