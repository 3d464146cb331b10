use crate::catalog::models::Song;
use rand::seq::IndexedRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Library,
    Search,
    Help,
}

impl Screen {
    pub fn next(self) -> Self {
        match self {
            Screen::Library => Screen::Search,
            Screen::Search => Screen::Help,
            Screen::Help => Screen::Library,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Library => Screen::Help,
            Screen::Search => Screen::Library,
            Screen::Help => Screen::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

/// Per-screen list state so Library and Search keep independent selections.
#[derive(Debug, Clone, Default)]
pub struct SongListState {
    pub items: Vec<String>,
    pub songs: Vec<Song>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub loaded: bool,
}

impl SongListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if !self.songs.is_empty() {
            self.selected = (self.selected + 1).min(self.songs.len().saturating_sub(1));
        }
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.songs.get(self.selected)
    }

    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.items = songs
            .iter()
            .map(|s| format!("{} - {}  ({})", s.title, s.artist, s.formatted_duration()))
            .collect();
        self.songs = songs;
        self.selected = self.selected.min(self.songs.len().saturating_sub(1));
        self.loaded = true;
        self.loading = false;
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }

}

/// Detail view opened over the Library screen for one saved song.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    pub song: Option<Song>,
    pub loading: bool,
    pub error: Option<String>,
    pub scroll: u16,
}

impl DetailView {
    pub fn is_open(&self) -> bool {
        self.song.is_some()
    }

    pub fn song_id(&self) -> Option<u64> {
        self.song.as_ref().map(|s| s.id)
    }

    pub fn open(&mut self, song: Song) {
        self.song = Some(song);
        self.loading = false;
        self.error = None;
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.song = None;
        self.loading = false;
        self.error = None;
        self.scroll = 0;
    }
}

const EMPTY_QUOTES: [&str; 3] = [
    "Music is the strongest form of magic - Marilyn Manson",
    "If you want to be a rock star or just be famous, then run down the street naked, you'll make the news.",
    "I believe every guitar player inherently has something unique about their playing - Jimmy Page",
];

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub screen: Screen,
    pub sidebar_selected: usize,

    // Library
    pub library_list: SongListState,
    pub favorites_only: bool,
    pub detail: DetailView,
    pub empty_quote: &'static str,

    // Search
    pub search_query: String,
    pub last_search: Option<String>,
    pub search_focus: SearchFocus,
    pub search_list: SongListState,
    pub search_total: Option<u64>,
    pub search_has_more: bool,

    // Playback
    pub playing_song_id: Option<u64>,
    pub now_playing: Option<String>,

    // Toast notification
    pub toast: Option<Toast>,

    // Status message (for debugging/info)
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tick: 0,
            screen: Screen::Library,
            sidebar_selected: 0,
            library_list: SongListState::new(),
            favorites_only: false,
            detail: DetailView::default(),
            empty_quote: EMPTY_QUOTES
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(EMPTY_QUOTES[0]),
            search_query: String::new(),
            last_search: None,
            search_focus: SearchFocus::Input,
            search_list: SongListState::new(),
            search_total: None,
            search_has_more: false,
            playing_song_id: None,
            now_playing: None,
            toast: None,
            status: String::new(),
        }
    }

    pub fn active_list(&self) -> &SongListState {
        match self.screen {
            Screen::Search => &self.search_list,
            Screen::Library | Screen::Help => &self.library_list,
        }
    }

    pub fn active_list_mut(&mut self) -> &mut SongListState {
        match self.screen {
            Screen::Search => &mut self.search_list,
            Screen::Library | Screen::Help => &mut self.library_list,
        }
    }
}
