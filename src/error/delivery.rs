use serenity::http::HttpError;
use thiserror::Error;

/// A failed message send.
///
/// Never propagates past the delivery workflow: the failure is captured in a
/// `MessageRecord` so the dashboard can render it inline. There are no retries.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Discord answered the send with a non-2xx status.
    ///
    /// Covers recipients with DMs disabled (403), deleted targets (404),
    /// rate limiting (429) and everything else the API rejects.
    #[error("Discord rejected the message ({status}): {message}")]
    Rejected {
        /// HTTP status code Discord answered with
        status: u16,
        /// Discord's error message for the request
        message: String,
    },

    /// The request never produced a Discord response (transport failure,
    /// malformed payload, etc.). Boxed due to the size of serenity's error.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}

impl DeliveryError {
    /// Extracts the HTTP status from a serenity error where one exists,
    /// preserving Discord's own message for the feed.
    pub fn from_discord(err: serenity::Error) -> Self {
        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(ref response)) = err {
            return Self::Rejected {
                status: response.status_code.as_u16(),
                message: response.error.message.clone(),
            };
        }

        Self::Discord(Box::new(err))
    }

    /// Short failure message rendered next to the feed entry, worded so the
    /// operator knows what to do about that status.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { status: 403, .. } => {
                "Bot lacks permission to send messages here. The recipient may have DMs disabled."
                    .to_string()
            }
            Self::Rejected { status: 404, .. } => {
                "Target not found. It may have been deleted; try reloading.".to_string()
            }
            Self::Rejected { status: 429, .. } => {
                "Rate limited by Discord. Try again in a few seconds.".to_string()
            }
            Self::Rejected { status, message } => {
                format!("Discord API error ({status}): {message}")
            }
            Self::Discord(_) => "Network error while contacting Discord.".to_string(),
        }
    }
}
