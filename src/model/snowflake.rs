//! Serde helpers for Discord snowflake IDs.
//!
//! Discord IDs exceed the 2^53 range JavaScript numbers can represent, so the
//! API (and Discord's own wire format) carries them as strings. These helpers
//! serialize `u64` IDs as strings and accept either form on input.

use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("invalid snowflake: {text}"))),
    }
}

/// String serialization for optional IDs on output-only types.
pub mod option {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        value: &Option<u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.collect_str(id),
            None => serializer.serialize_none(),
        }
    }
}
