//! Lyrics API client (lyrics.ovh-shaped).
//!
//! One lookup per artist/title pair; the library store caches the result so
//! this is normally hit at most once per saved song.

use crate::error::FetchError;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    lyrics: String,
}

#[derive(Debug, Clone)]
pub struct LyricsClient {
    http: reqwest::Client,
    base_url: String,
}

impl LyricsClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.lyrics.ovh/v1";
    const USER_AGENT: &'static str = "fret/0.1.0 (https://github.com/fret)";

    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(Self::USER_AGENT)
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("failed to create reqwest client"),
            base_url: base_url.unwrap_or(Self::DEFAULT_BASE_URL).to_string(),
        }
    }

    /// Fetch lyric text for an artist/title pair.
    ///
    /// A 404 or an empty body is the "no lyrics exist" case, not a transport
    /// failure, and comes back as [`FetchError::NoLyrics`].
    pub async fn get(&self, artist: &str, title: &str) -> Result<String, FetchError> {
        let raw = format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );
        let url = Url::parse(&raw).map_err(|_| FetchError::InvalidQuery)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NoLyrics);
        }

        let body: LyricsResponse = response
            .error_for_status()
            .map_err(FetchError::Network)?
            .json()
            .await
            .map_err(FetchError::from_reqwest)?;

        if body.lyrics.trim().is_empty() {
            return Err(FetchError::NoLyrics);
        }
        Ok(body.lyrics)
    }
}

impl Default for LyricsClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;

    #[tokio::test]
    async fn test_get_returns_lyric_text() {
        let base = serve_once("200 OK", r#"{"lyrics":"Hello\nWorld"}"#).await;
        let client = LyricsClient::new(Some(base.as_str()));
        let text = client.get("Adele", "Hello").await.unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_get_not_found_is_no_lyrics() {
        let base = serve_once("404 Not Found", r#"{"error":"No lyrics found"}"#).await;
        let client = LyricsClient::new(Some(base.as_str()));
        let err = client.get("Nobody", "Nothing").await.unwrap_err();
        assert!(matches!(err, FetchError::NoLyrics));
    }

    #[tokio::test]
    async fn test_get_empty_body_is_no_lyrics() {
        let base = serve_once("200 OK", r#"{"lyrics":"  "}"#).await;
        let client = LyricsClient::new(Some(base.as_str()));
        let err = client.get("A", "B").await.unwrap_err();
        assert!(matches!(err, FetchError::NoLyrics));
    }

    #[tokio::test]
    async fn test_get_bad_base_url_is_invalid_query() {
        let client = LyricsClient::new(Some("not a url"));
        let err = client.get("A", "B").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidQuery));
    }
}
