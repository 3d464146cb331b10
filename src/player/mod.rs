//! Preview playback plumbing.
//!
//! The audio engine is an external collaborator behind [`AudioEngine`]; the
//! shipped implementation drives one mpv process per preview. A started
//! preview is represented by a [`PreviewHandle`] whose destruction tears the
//! engine activity down, so the library store's playback slot can never
//! outlive its handle or vice versa.

pub mod mpv;

use crate::app::events::Event;
use reqwest::Url;
use tokio::sync::{mpsc, oneshot};

/// Seam to the streaming audio engine.
///
/// `start` must begin playing `url` and arrange for a
/// [`PlayerEvent`](crate::app::events::PlayerEvent) tagged with `generation`
/// to be sent on `events` when playback ends on its own.
pub trait AudioEngine {
    fn start(
        &self,
        url: &Url,
        generation: u64,
        events: mpsc::Sender<Event>,
    ) -> anyhow::Result<PreviewHandle>;
}

/// Owned handle to one in-flight preview. Stopping (or just dropping) it
/// signals the engine to release the stream.
#[derive(Debug)]
pub struct PreviewHandle {
    stop_tx: Option<oneshot::Sender<()>>,
}

impl PreviewHandle {
    pub fn new(stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            stop_tx: Some(stop_tx),
        }
    }

    pub fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}
