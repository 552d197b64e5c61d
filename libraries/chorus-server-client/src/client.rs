//! Main Chorus Player server client.

use crate::error::{ClientError, Result};
use crate::types::{
    ApiResponse, RecentPlaysPage, RecentPlaysRequest, ReportPlayRequest, SongUrlResponse, CODE_OK,
};
use chorus_core::AudioQuality;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the Chorus Player server.
///
/// Covers the playback-facing endpoints: stream URL resolution, play
/// reporting and the server-side recent plays list. The client is
/// stateless and cheap to clone.
///
/// # Example
///
/// ```ignore
/// use chorus_server_client::ChorusClient;
/// use chorus_core::AudioQuality;
///
/// let client = ChorusClient::new("https://music.example.com")?;
///
/// // Resolve a stream
/// let url = client.resolve_song_url("2051234", AudioQuality::ExHigh).await?;
///
/// // Report the play
/// client.report_recent_play("2051234").await?;
/// ```
#[derive(Clone)]
pub struct ChorusClient {
    http: Client,
    base_url: String,
}

impl ChorusClient {
    /// Create a new client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();

        // Validate URL
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!(
                "ChorusPlayer/{} (Desktop)",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve the stream URL for a track at the requested quality.
    ///
    /// Returns `Ok(None)` when the server has no stream for the track;
    /// callers treat that as "nothing to play" rather than an error.
    pub async fn resolve_song_url(
        &self,
        song_id: &str,
        quality: AudioQuality,
    ) -> Result<Option<String>> {
        let url = format!(
            "{}/song/url/v1?id={}&level={}",
            self.base_url,
            song_id,
            quality.as_str()
        );
        debug!(url = %url, "Resolving stream URL");

        let response = self.http.get(&url).send().await.map_err(map_send_error)?;
        let status = response.status();

        if status.is_success() {
            let resolved: SongUrlResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse stream URL response: {}", e))
            })?;

            Ok(resolved.data.into_iter().next().and_then(|entry| entry.url))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Report a play so the server updates its recent plays list.
    pub async fn report_recent_play(&self, song_id: &str) -> Result<()> {
        let url = format!("{}/recent/play", self.base_url);
        debug!(url = %url, song_id = %song_id, "Reporting play");

        let response = self
            .http
            .post(&url)
            .json(&ReportPlayRequest {
                song_id: song_id.to_string(),
            })
            .send()
            .await
            .map_err(map_send_error)?;

        unwrap_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Fetch one page of the server-side recent plays, newest first.
    pub async fn recent_plays(&self, page_num: u32, page_size: u32) -> Result<RecentPlaysPage> {
        let url = format!("{}/recent/list", self.base_url);
        debug!(url = %url, page_num, page_size, "Fetching recent plays");

        let response = self
            .http
            .post(&url)
            .json(&RecentPlaysRequest {
                page_num,
                page_size,
            })
            .send()
            .await
            .map_err(map_send_error)?;

        let page = unwrap_envelope::<RecentPlaysPage>(response).await?;
        Ok(page.unwrap_or_default())
    }

    /// Remove a single entry from the server-side recent plays.
    pub async fn remove_recent_play(&self, song_id: &str) -> Result<()> {
        let url = format!("{}/recent/one?songId={}", self.base_url, song_id);
        debug!(url = %url, "Removing recent play");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(map_send_error)?;

        unwrap_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }

    /// Clear the server-side recent plays.
    pub async fn clear_recent_plays(&self) -> Result<()> {
        let url = format!("{}/recent/clear", self.base_url);
        debug!(url = %url, "Clearing recent plays");

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(map_send_error)?;

        unwrap_envelope::<serde_json::Value>(response).await?;
        Ok(())
    }
}

fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Check the HTTP status, decode the envelope and enforce its code.
async fn unwrap_envelope<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        });
    }

    let envelope: ApiResponse<T> = response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse response envelope: {}", e)))?;

    if envelope.code != CODE_OK {
        return Err(ClientError::Rejected {
            code: envelope.code,
            message: envelope.message,
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(ChorusClient::new("https://example.com").is_ok());
        assert!(ChorusClient::new("http://localhost:8080").is_ok());

        // Invalid URLs
        assert!(ChorusClient::new("").is_err());
        assert!(ChorusClient::new("not-a-url").is_err());
        assert!(ChorusClient::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = ChorusClient::new("https://example.com/").expect("valid url");

        // URL should have trailing slashes removed
        assert_eq!(client.base_url(), "https://example.com");
    }
}
