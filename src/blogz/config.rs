//! # Preferences
//!
//! Two preference blobs live beside the post collection: `config` holds
//! durable settings, `dark_mode` holds the display toggle as a bare JSON
//! bool. Both read soft (absent means defaults) and write through the
//! store like every other blob.

use crate::error::Result;
use crate::store::{keys, StateStore};
use serde::{Deserialize, Serialize};

/// Settings stored in the `config` blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogConfig {
    /// Author name filled into new posts and comments when none is given.
    #[serde(default)]
    pub default_author: Option<String>,
}

impl BlogConfig {
    /// Load from the store, or defaults when the blob is absent. A corrupt
    /// blob is an error here; callers that prefer to shrug fall back with
    /// `unwrap_or_default`.
    pub fn load<S: StateStore>(store: &S) -> Result<Self> {
        match store.read(keys::CONFIG)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Self::default()),
        }
    }

    pub fn save<S: StateStore>(&self, store: &mut S) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        store.write(keys::CONFIG, &raw)
    }
}

/// Whether dark mode is on. Absent or unreadable means off.
pub fn dark_mode<S: StateStore>(store: &S) -> bool {
    match store.read(keys::DARK_MODE) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or(false),
        _ => false,
    }
}

pub fn set_dark_mode<S: StateStore>(store: &mut S, on: bool) -> Result<()> {
    store.write(keys::DARK_MODE, if on { "true" } else { "false" })
}
