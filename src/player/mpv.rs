use crate::app::events::{Event, PlayerEvent};
use crate::player::{AudioEngine, PreviewHandle};
use anyhow::Context;
use reqwest::Url;
use tokio::{
    process::Command,
    sync::{mpsc, oneshot},
};

/// Plays previews by spawning one mpv process per clip.
///
/// Without `--idle`, mpv exits when the stream ends; the watcher task turns
/// that exit into the natural end-of-track notification for the handle's
/// generation. Stopping the handle kills the process instead.
#[derive(Debug, Clone)]
pub struct MpvEngine {
    mpv_path: String,
    volume: u8,
}

impl MpvEngine {
    pub fn new(mpv_path: &str, volume: u8) -> Self {
        Self {
            mpv_path: mpv_path.to_string(),
            volume,
        }
    }
}

impl AudioEngine for MpvEngine {
    fn start(
        &self,
        url: &Url,
        generation: u64,
        events: mpsc::Sender<Event>,
    ) -> anyhow::Result<PreviewHandle> {
        let mut cmd = Command::new(&self.mpv_path);
        cmd.args([
            "--no-video",
            "--really-quiet",
            "--input-terminal=no",
            "--no-terminal",
        ])
        .arg(format!("--volume={}", self.volume))
        .arg(url.as_str())
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null());

        let mut child = cmd.spawn().context("spawn mpv")?;
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            // The stop arm resolves on an explicit stop and when the handle
            // is dropped.
            let exit = tokio::select! {
                status = child.wait() => Some(status),
                _ = stop_rx => None,
            };
            match exit {
                Some(status) => {
                    let ev = match status {
                        Ok(s) if s.success() => PlayerEvent::Finished { generation },
                        Ok(s) => PlayerEvent::Failed {
                            generation,
                            message: format!("mpv exited with {s}"),
                        },
                        Err(e) => PlayerEvent::Failed {
                            generation,
                            message: format!("wait for mpv: {e}"),
                        },
                    };
                    let _ = events.send(Event::Player(ev)).await;
                }
                None => {
                    let _ = child.start_kill();
                    let _ = child.wait().await;
                }
            }
        });

        Ok(PreviewHandle::new(stop_tx))
    }
}
