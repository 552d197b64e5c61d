//! Chorus Player Server Client
//!
//! HTTP client library for the Chorus Player server API.
//!
//! # Features
//!
//! - **Stream resolution**: Resolve stream URLs per track and quality level
//! - **Play reporting**: Report plays so the server keeps listening history
//! - **Recent plays**: Page through, prune and clear the server-side history
//!
//! The client also implements `chorus_playback::PlaybackRemote`, so it can
//! be handed directly to the playback manager.
//!
//! # Example
//!
//! ```ignore
//! use chorus_core::AudioQuality;
//! use chorus_server_client::ChorusClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChorusClient::new("https://music.example.com")?;
//!
//!     // Resolve a stream
//!     if let Some(url) = client
//!         .resolve_song_url("2051234", AudioQuality::Lossless)
//!         .await?
//!     {
//!         println!("Streaming from {url}");
//!     }
//!
//!     // Report the play and read back the history
//!     client.report_recent_play("2051234").await?;
//!     let page = client.recent_plays(1, 20).await?;
//!     println!("{} recent plays", page.total);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod remote;
mod types;

// Re-export main types
pub use client::ChorusClient;
pub use error::{ClientError, Result};
pub use types::{
    ApiResponse, RecentPlayItem, RecentPlaysPage, RecentPlaysRequest, ReportPlayRequest,
    SongUrlEntry, SongUrlResponse, CODE_OK,
};
