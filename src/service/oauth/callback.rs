use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};
use serenity::all::User as DiscordUser;

use crate::{error::oauth::OAuthError, service::oauth::DiscordAuthService};

const DISCORD_USERS_ME_URL: &str = "https://discord.com/api/v10/users/@me";

impl<'a> DiscordAuthService<'a> {
    /// Completes the consent flow: exchanges the authorization code for an
    /// access token and resolves the authorizing user's identity.
    ///
    /// # Arguments
    /// - `authorization_code` - The `code` query parameter from the callback
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - The authorizing user's identity
    /// - `Err(OAuthError::ExchangeFailed)` - Invalid or expired code
    /// - `Err(OAuthError::IdentityFetch)` / `IdentityRejected` - The identity
    ///   request failed or the token was rejected
    pub async fn callback(&self, authorization_code: String) -> Result<DiscordUser, OAuthError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|err| OAuthError::ExchangeFailed(err.to_string()))?;

        self.fetch_discord_user(&token).await
    }

    /// Retrieves the authorized user's information using the access token
    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordUser, OAuthError> {
        let access_token = token.access_token().secret();

        let response = self
            .http_client
            .get(DISCORD_USERS_ME_URL)
            .header("Authorization", format!("Bearer {access_token}"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OAuthError::IdentityRejected(response.status().as_u16()));
        }

        Ok(response.json::<DiscordUser>().await?)
    }
}
