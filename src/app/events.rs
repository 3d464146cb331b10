use crate::catalog::models::SearchPage;

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

/// Events from a preview playback handle. `generation` identifies the handle
/// that produced the event; stale generations are ignored by the store.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Finished { generation: u64 },
    Failed { generation: u64, message: String },
}

#[derive(Debug)]
pub enum NetworkEvent {
    Error(String),
    SearchResults { query: String, page: SearchPage },
    LyricsFetched { song_id: u64, text: String },
    LyricsFailed { song_id: u64, message: String },
}
