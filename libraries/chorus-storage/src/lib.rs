//! Chorus Player Storage
//!
//! File-backed persistence for Chorus Player preferences.
//!
//! The playback stack talks to storage only through the
//! `chorus_playback::PreferenceStore` port; this crate supplies the
//! production implementation, a single JSON document holding flat
//! string key-value pairs (volume, playback position, quality and the
//! rest of the `chorus_playback::prefs` keys).
//!
//! # Example
//!
//! ```rust,no_run
//! use chorus_playback::PreferenceStore;
//! use chorus_storage::JsonPreferenceStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = JsonPreferenceStore::open("preferences.json")?;
//! store.set("player.volume", "65")?;
//! assert_eq!(store.get("player.volume")?.as_deref(), Some("65"));
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub use error::{Result, StorageError};
pub use store::JsonPreferenceStore;
