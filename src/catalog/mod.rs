//! Music catalog search client (Deezer-shaped API).

pub mod models;

use crate::error::FetchError;
use models::SearchPage;
use reqwest::Url;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.deezer.com";
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

    /// Search the catalog for songs matching `query`.
    ///
    /// Results are candidates only; saving them is the caller's business.
    pub async fn search(&self, query: &str) -> Result<SearchPage, FetchError> {
        let raw = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let url = Url::parse(&raw).map_err(|_| FetchError::InvalidQuery)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?
            .error_for_status()
            .map_err(FetchError::Network)?;

        response.json().await.map_err(FetchError::from_reqwest)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;

    #[tokio::test]
    async fn test_search_decodes_page() {
        let body = r#"{
            "data": [
                {
                    "id": 3135556,
                    "title": "Harder, Better, Faster, Stronger",
                    "duration": 224,
                    "preview": "https://cdn.example.com/preview/3135556.mp3",
                    "artist": { "name": "Daft Punk" },
                    "album": { "cover_medium": "https://cdn.example.com/cover/302127.jpg" }
                }
            ],
            "total": 312,
            "next": "https://api.example.com/search?q=daft&index=25"
        }"#;
        let base = serve_once("200 OK", body).await;

        let client = CatalogClient::new(Some(base.as_str()));
        let page = client.search("daft punk").await.unwrap();
        assert_eq!(page.total, 312);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].title, "Harder, Better, Faster, Stronger");
        assert!(page.next.is_some());
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_decoding_error() {
        let base = serve_once("200 OK", r#"{"unexpected": true}"#).await;
        let client = CatalogClient::new(Some(base.as_str()));
        let err = client.search("daft punk").await.unwrap_err();
        assert!(matches!(err, FetchError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_search_bad_base_url_is_invalid_query() {
        let client = CatalogClient::new(Some("not a url"));
        let err = client.search("daft punk").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidQuery));
    }
}
