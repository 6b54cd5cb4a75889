use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// documentation for required configuration variables. `DISCORD_REDIRECT_URI`
    /// becomes required as soon as `DISCORD_CLIENT_SECRET` is set.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidEnvVar(String),

    /// Discord rejected the configured bot token at startup.
    ///
    /// The token verification call returned 401 Unauthorized. The application
    /// exits rather than serving a dashboard that cannot send anything.
    #[error("Discord rejected the bot token; check DISCORD_BOT_TOKEN")]
    InvalidBotToken,

    /// A configured endpoint or redirect URL failed to parse.
    #[error("Invalid URL in {name}: {source}")]
    InvalidUrl {
        /// Which configuration value held the URL
        name: String,
        /// The underlying parse error
        #[source]
        source: url::ParseError,
    },
}
