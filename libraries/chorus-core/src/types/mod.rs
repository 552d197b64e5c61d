mod ids;
mod quality;
mod track;

pub use ids::TrackId;
pub use quality::{AudioQuality, ParseQualityError};
pub use track::Track;
