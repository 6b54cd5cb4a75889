use std::path::PathBuf;

use crate::error::config::ConfigError;

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_STORE_PATH: &str = "signalboard.json";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8501;

/// Application configuration loaded once at startup.
///
/// All values come from environment variables (a `.env` file is honored if
/// present). The struct is immutable for the lifetime of the process; shared
/// access goes through `AppState` rather than any ambient global.
pub struct Config {
    /// Bot token used for all bot-authenticated Discord API calls.
    pub bot_token: String,

    /// OAuth2 application (client) ID.
    pub discord_client_id: String,
    /// OAuth2 client secret. Onboarding is disabled when absent.
    pub discord_client_secret: Option<String>,
    /// OAuth2 redirect URL. Required whenever the client secret is set.
    pub discord_redirect_url: Option<String>,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    /// Path of the JSON file holding recipients and the selected channel.
    pub store_path: PathBuf,

    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Separated from `from_env` so configuration validation can be tested
    /// without mutating process-wide environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is absent,
    ///   including `DISCORD_REDIRECT_URI` when `DISCORD_CLIENT_SECRET` is set
    /// - `Err(ConfigError::InvalidEnvVar)` - `SIGNALBOARD_PORT` is not a port number
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let bot_token = require("DISCORD_BOT_TOKEN")?;
        let discord_client_id = require("DISCORD_CLIENT_ID")?;

        let discord_client_secret = lookup("DISCORD_CLIENT_SECRET").filter(|v| !v.is_empty());
        let discord_redirect_url = lookup("DISCORD_REDIRECT_URI").filter(|v| !v.is_empty());

        // The consent redirect cannot work without a registered redirect URL,
        // so a secret without one is a configuration mistake rather than a
        // partially-enabled feature.
        if discord_client_secret.is_some() && discord_redirect_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DISCORD_REDIRECT_URI".to_string()));
        }

        let store_path = lookup("SIGNALBOARD_STORE_PATH")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());

        let host = lookup("SIGNALBOARD_HOST")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("SIGNALBOARD_PORT").filter(|v| !v.is_empty()) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("SIGNALBOARD_PORT".to_string()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token,
            discord_client_id,
            discord_client_secret,
            discord_redirect_url,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            store_path: PathBuf::from(store_path),
            host,
            port,
        })
    }

    /// Whether the self-service onboarding flow can run.
    pub fn oauth_enabled(&self) -> bool {
        self.discord_client_secret.is_some() && self.discord_redirect_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    /// Tests loading a minimal configuration.
    ///
    /// Verifies that only the bot token and client ID are required and that
    /// defaults are applied to everything else, with onboarding disabled.
    ///
    /// Expected: Ok with defaults and oauth_enabled() == false
    #[test]
    fn loads_minimal_configuration() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "123456789012345678"),
        ]))
        .unwrap();

        assert_eq!(config.bot_token, "token");
        assert_eq!(config.discord_client_id, "123456789012345678");
        assert!(config.discord_client_secret.is_none());
        assert!(!config.oauth_enabled());
        assert_eq!(config.store_path, PathBuf::from("signalboard.json"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8501);
    }

    /// Tests that a missing bot token fails closed.
    ///
    /// Verifies that the application cannot be configured without
    /// `DISCORD_BOT_TOKEN`, preventing it from reaching any interactive state.
    ///
    /// Expected: Err(MissingEnvVar("DISCORD_BOT_TOKEN"))
    #[test]
    fn rejects_missing_bot_token() {
        let result = Config::from_lookup(lookup_from(&[(
            "DISCORD_CLIENT_ID",
            "123456789012345678",
        )]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(name)) if name == "DISCORD_BOT_TOKEN"
        ));
    }

    /// Tests that an empty client ID is treated as missing.
    ///
    /// Expected: Err(MissingEnvVar("DISCORD_CLIENT_ID"))
    #[test]
    fn rejects_empty_client_id() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", ""),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(name)) if name == "DISCORD_CLIENT_ID"
        ));
    }

    /// Tests that a client secret without a redirect URL is rejected.
    ///
    /// The OAuth2 flow cannot complete without a redirect target, so this
    /// combination is an error rather than a half-enabled onboarding.
    ///
    /// Expected: Err(MissingEnvVar("DISCORD_REDIRECT_URI"))
    #[test]
    fn rejects_secret_without_redirect() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "123456789012345678"),
            ("DISCORD_CLIENT_SECRET", "secret"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(name)) if name == "DISCORD_REDIRECT_URI"
        ));
    }

    /// Tests enabling onboarding with a full OAuth2 configuration.
    ///
    /// Expected: Ok with oauth_enabled() == true
    #[test]
    fn enables_oauth_with_secret_and_redirect() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "123456789012345678"),
            ("DISCORD_CLIENT_SECRET", "secret"),
            ("DISCORD_REDIRECT_URI", "http://localhost:8501/api/auth/callback"),
        ]))
        .unwrap();

        assert!(config.oauth_enabled());
        assert_eq!(
            config.discord_redirect_url.as_deref(),
            Some("http://localhost:8501/api/auth/callback")
        );
    }

    /// Tests that a non-numeric port is rejected.
    ///
    /// Expected: Err(InvalidEnvVar("SIGNALBOARD_PORT"))
    #[test]
    fn rejects_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("DISCORD_CLIENT_ID", "123456789012345678"),
            ("SIGNALBOARD_PORT", "eight"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar(name)) if name == "SIGNALBOARD_PORT"
        ));
    }
}
