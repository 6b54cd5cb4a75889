use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::service::oauth::DiscordAuthService;

impl<'a> DiscordAuthService<'a> {
    /// Builds the Discord consent URL for one onboarding attempt.
    ///
    /// Requests the `identify` scope only. The application needs the user's
    /// ID and names, nothing else. The returned CSRF token must be stored in
    /// the session and validated on callback.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .url();

        (authorize_url, csrf_state)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{config::Config, startup};

    fn oauth_test_config() -> Config {
        Config::from_lookup(|name| {
            let vars: HashMap<&str, &str> = [
                ("DISCORD_BOT_TOKEN", "token"),
                ("DISCORD_CLIENT_ID", "123456789012345678"),
                ("DISCORD_CLIENT_SECRET", "secret"),
                ("DISCORD_REDIRECT_URI", "http://localhost:8501/api/auth/callback"),
            ]
            .into_iter()
            .collect();
            vars.get(name).map(|v| v.to_string())
        })
        .unwrap()
    }

    /// Tests the shape of the authorization URL.
    ///
    /// Verifies that the consent URL targets Discord's authorize endpoint and
    /// carries the client ID, redirect URI, identify scope, and a CSRF state
    /// matching the returned token.
    ///
    /// Expected: all OAuth2 parameters present in the URL
    #[test]
    fn builds_authorization_url() {
        let config = oauth_test_config();
        let oauth_client = startup::setup_oauth_client(&config)
            .unwrap()
            .expect("oauth should be configured");
        let http_client = reqwest::Client::new();

        let service = DiscordAuthService::new(&http_client, &oauth_client);
        let (url, csrf_token) = service.login_url();

        assert_eq!(url.host_str(), Some("discord.com"));
        assert_eq!(url.path(), "/oauth2/authorize");

        let params: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(params.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(
            params.get("client_id").map(String::as_str),
            Some("123456789012345678")
        );
        assert_eq!(
            params.get("redirect_uri").map(String::as_str),
            Some("http://localhost:8501/api/auth/callback")
        );
        assert_eq!(params.get("scope").map(String::as_str), Some("identify"));
        assert_eq!(params.get("state"), Some(csrf_token.secret()));
    }

    /// Tests that consecutive logins get distinct CSRF tokens.
    ///
    /// Expected: two calls produce different state values
    #[test]
    fn csrf_tokens_are_unique() {
        let config = oauth_test_config();
        let oauth_client = startup::setup_oauth_client(&config)
            .unwrap()
            .expect("oauth should be configured");
        let http_client = reqwest::Client::new();

        let service = DiscordAuthService::new(&http_client, &oauth_client);
        let (_, first) = service.login_url();
        let (_, second) = service.login_url();

        assert_ne!(first.secret(), second.secret());
    }
}
