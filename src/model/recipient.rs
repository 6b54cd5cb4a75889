//! Onboarded recipients and their delivery preference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serenity::all::User as DiscordUser;

use crate::model::snowflake;

/// How a recipient's signals are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Private direct message to the recipient.
    Dm,
    /// Broadcast to a shared channel chosen by the admin.
    Channel,
}

/// A Discord user who completed onboarding.
///
/// Keyed by `discord_user_id`; re-onboarding upserts the record with the
/// latest delivery mode and names. A recipient with `delivery_mode: Channel`
/// still carries the authorizing user's ID, but delivery targets the channel
/// the admin selects separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Discord user ID (snowflake), serialized as a string.
    #[serde(with = "snowflake")]
    pub discord_user_id: u64,
    /// Discord login name.
    pub username: String,
    /// Global display name, falling back to the username when Discord
    /// provides none.
    pub display_name: String,
    pub delivery_mode: DeliveryMode,
    pub onboarded_at: DateTime<Utc>,
}

impl Recipient {
    /// Builds a recipient from the identity returned by the OAuth2 flow,
    /// stamped with the current time.
    pub fn from_discord_user(user: &DiscordUser, delivery_mode: DeliveryMode) -> Self {
        let display_name = user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone());

        Self {
            discord_user_id: user.id.get(),
            username: user.name.clone(),
            display_name,
            delivery_mode,
            onboarded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discord_user(id: u64, username: &str, global_name: Option<&str>) -> DiscordUser {
        serde_json::from_value(serde_json::json!({
            "id": id.to_string(),
            "username": username,
            "discriminator": "0",
            "global_name": global_name,
            "avatar": null,
        }))
        .unwrap()
    }

    /// Tests building a recipient from a Discord user with a display name.
    ///
    /// Expected: global name used as display_name, login name preserved
    #[test]
    fn uses_global_name_when_present() {
        let user = discord_user(123456789012345678, "trader", Some("Trader Joe"));
        let recipient = Recipient::from_discord_user(&user, DeliveryMode::Dm);

        assert_eq!(recipient.discord_user_id, 123456789012345678);
        assert_eq!(recipient.username, "trader");
        assert_eq!(recipient.display_name, "Trader Joe");
        assert_eq!(recipient.delivery_mode, DeliveryMode::Dm);
    }

    /// Tests the fallback when Discord returns no global name.
    ///
    /// Expected: display_name falls back to the username
    #[test]
    fn falls_back_to_username() {
        let user = discord_user(42000000000000000, "trader", None);
        let recipient = Recipient::from_discord_user(&user, DeliveryMode::Channel);

        assert_eq!(recipient.display_name, "trader");
        assert_eq!(recipient.delivery_mode, DeliveryMode::Channel);
    }

    /// Tests that recipient JSON round-trips exactly, including the
    /// string-encoded user ID.
    ///
    /// Expected: identical recipient after serialize/deserialize
    #[test]
    fn round_trips_through_json() {
        let user = discord_user(987654321098765432, "gopf", Some("Gopf"));
        let recipient = Recipient::from_discord_user(&user, DeliveryMode::Dm);

        let json = serde_json::to_string(&recipient).unwrap();
        assert!(json.contains("\"987654321098765432\""));

        let back: Recipient = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipient);
    }
}
