//! Chorus Player Core
//!
//! Shared domain types for the Chorus Player playback stack.
//!
//! This crate holds the types every other crate agrees on: track
//! identity, the track record itself, and the stream quality levels the
//! streaming service understands. It deliberately contains no behavior
//! beyond constructors and conversions so that the playback, storage,
//! and client crates can depend on it without dragging each other in.
//!
//! # Example
//!
//! ```rust
//! use chorus_core::types::{AudioQuality, Track, TrackId};
//!
//! let mut track = Track::new(TrackId::new("2051234"), "Night Drive");
//! track.artist = Some("The Passengers".to_string());
//!
//! assert_eq!(AudioQuality::default().as_str(), "exhigh");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

// Re-export commonly used types
pub use types::{AudioQuality, ParseQualityError, Track, TrackId};
