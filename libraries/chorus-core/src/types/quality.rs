/// Audio quality levels offered by the streaming service
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stream quality requested when resolving a track URL.
///
/// The variants map onto the service's `level` tokens, lowest to highest
/// fidelity. What the service actually serves depends on the source file
/// and the user's account tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioQuality {
    /// Standard bitrate stream
    Standard,
    /// Higher bitrate stream
    Higher,
    /// Extremely high bitrate stream
    #[default]
    ExHigh,
    /// Lossless stream
    Lossless,
    /// Hi-Res lossless stream
    HiRes,
}

impl AudioQuality {
    /// The service-side `level` token for this quality
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Higher => "higher",
            Self::ExHigh => "exhigh",
            Self::Lossless => "lossless",
            Self::HiRes => "hires",
        }
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized quality token
#[derive(Debug, Error)]
#[error("unknown audio quality: {0}")]
pub struct ParseQualityError(String);

impl FromStr for AudioQuality {
    type Err = ParseQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "higher" => Ok(Self::Higher),
            "exhigh" => Ok(Self::ExHigh),
            "lossless" => Ok(Self::Lossless),
            "hires" => Ok(Self::HiRes),
            other => Err(ParseQualityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quality_is_exhigh() {
        assert_eq!(AudioQuality::default(), AudioQuality::ExHigh);
    }

    #[test]
    fn quality_tokens_round_trip() {
        for quality in [
            AudioQuality::Standard,
            AudioQuality::Higher,
            AudioQuality::ExHigh,
            AudioQuality::Lossless,
            AudioQuality::HiRes,
        ] {
            assert_eq!(quality.as_str().parse::<AudioQuality>().unwrap(), quality);
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        assert!("ultra".parse::<AudioQuality>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_token() {
        let json = serde_json::to_string(&AudioQuality::ExHigh).unwrap();
        assert_eq!(json, "\"exhigh\"");
    }
}
