//! File-backed store for onboarded recipients and the selected channel.
//!
//! The store is a single flat JSON document read at startup and rewritten on
//! every mutation. In-process access is guarded by an async `RwLock`.
//!
//! Known limitation: there is no cross-process locking. The tool assumes a
//! single active process; concurrent writers from multiple processes would
//! race on the file.

#[cfg(test)]
mod test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
    error::store::StoreError,
    model::{channel::ChannelRef, recipient::Recipient},
};

/// On-disk shape of the store document.
///
/// Missing fields default so files written by older versions (or an empty
/// `{}`) still load.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    recipients: Vec<Recipient>,
    /// Guild the bot operates in, as a string snowflake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guild_id: Option<String>,
    /// Channel the admin last selected as the broadcast target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_channel: Option<ChannelRef>,
}

/// The persisted runtime record of the dashboard.
pub struct SignalStore {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl SignalStore {
    /// Opens the store, reading the file when it exists.
    ///
    /// A missing file is a fresh install and yields an empty store; an
    /// unreadable or malformed file is an error so a corrupted record is
    /// never silently discarded.
    ///
    /// # Returns
    /// - `Ok(SignalStore)` - Store loaded or initialized empty
    /// - `Err(StoreError::Io)` - The file exists but could not be read
    /// - `Err(StoreError::Corrupt)` - The file is not a valid store document
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let data = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            data: RwLock::new(data),
        })
    }

    /// Registered recipients in onboarding order.
    pub async fn recipients(&self) -> Vec<Recipient> {
        self.data.read().await.recipients.clone()
    }

    /// Looks up a recipient by Discord user ID.
    pub async fn recipient(&self, discord_user_id: u64) -> Option<Recipient> {
        self.data
            .read()
            .await
            .recipients
            .iter()
            .find(|r| r.discord_user_id == discord_user_id)
            .cloned()
    }

    /// Adds or updates a recipient, keyed by `discord_user_id`.
    ///
    /// Idempotent: re-onboarding replaces the stored record in place, so the
    /// latest delivery mode and names win while the recipient's position in
    /// the list is kept. Persists immediately.
    pub async fn upsert_recipient(&self, recipient: Recipient) -> Result<(), StoreError> {
        let mut data = self.data.write().await;

        match data
            .recipients
            .iter_mut()
            .find(|r| r.discord_user_id == recipient.discord_user_id)
        {
            Some(existing) => *existing = recipient,
            None => data.recipients.push(recipient),
        }

        self.persist(&data).await
    }

    /// The channel currently selected as the broadcast target, if any.
    pub async fn selected_channel(&self) -> Option<ChannelRef> {
        self.data.read().await.selected_channel.clone()
    }

    /// Persists the admin's channel selection.
    pub async fn save_selected_channel(&self, channel: ChannelRef) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.selected_channel = Some(channel);
        self.persist(&data).await
    }

    /// The configured guild ID, if one has been captured.
    ///
    /// A stored value that does not parse as a snowflake (hand-edited file)
    /// is treated as absent. Zero is excluded too: serenity's ID constructors
    /// reject it.
    pub async fn guild_id(&self) -> Option<u64> {
        self.data
            .read()
            .await
            .guild_id
            .as_deref()
            .and_then(|id| id.parse().ok())
            .filter(|id| *id != 0)
    }

    /// Persists the guild the bot operates in.
    pub async fn save_guild_id(&self, guild_id: u64) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.guild_id = Some(guild_id.to_string());
        self.persist(&data).await
    }

    async fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(data)?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
