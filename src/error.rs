//! Error taxonomy for the remote fetch paths.
//!
//! Persistence problems never use these: the library store downgrades them to
//! a recoverable last-error state so the app keeps running.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The query/artist/title could not be encoded into a valid request URL.
    #[error("invalid query")]
    InvalidQuery,

    /// Transport-level failure (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response arrived but did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decoding(#[source] reqwest::Error),

    /// Well-formed response saying there are no lyrics for this song.
    #[error("no lyrics found for this song")]
    NoLyrics,
}

impl FetchError {
    /// Split a reqwest error into the transport vs. body-shape buckets.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decoding(err)
        } else {
            FetchError::Network(err)
        }
    }
}
