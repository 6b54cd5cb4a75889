use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use super::SignalStore;
use crate::model::{
    channel::ChannelRef,
    recipient::{DeliveryMode, Recipient},
};


fn recipient(id: u64, name: &str, mode: DeliveryMode) -> Recipient {
    Recipient {
        discord_user_id: id,
        username: name.to_lowercase(),
        display_name: name.to_string(),
        delivery_mode: mode,
        onboarded_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    }
}

/// Creates a temp directory and a store path inside it.
///
/// The directory handle must be kept alive for the duration of the test.
fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("signalboard.json")
}
