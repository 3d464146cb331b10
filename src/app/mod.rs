pub mod actions;
pub mod events;
pub mod state;

use crate::catalog::CatalogClient;
use crate::catalog::models::Song;
use crate::config::Config;
use crate::input;
use crate::library::SongStore;
use crate::lyrics::LyricsClient;
use crate::player::mpv::MpvEngine;
use crate::storage::Storage;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent, PlayerEvent};
use state::{AppState, Screen, SearchFocus, Toast};
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    state: AppState,
    store: SongStore,
    catalog: CatalogClient,
    lyrics: LyricsClient,
    tx: mpsc::Sender<Event>,
    rx: Option<mpsc::Receiver<Event>>,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel::<Event>(256);

        let storage = Storage::open(&cfg.paths.data_dir.join("library.sqlite3"))?;
        let catalog = CatalogClient::new(Some(cfg.api.catalog_base_url.as_str()));
        let lyrics = LyricsClient::new(Some(cfg.api.lyrics_base_url.as_str()));
        let engine = MpvEngine::new(&cfg.player.mpv_path, cfg.player.volume);
        let store = SongStore::new(
            storage,
            catalog.clone(),
            lyrics.clone(),
            Box::new(engine),
            tx.clone(),
        );

        let mut state = AppState::new();

        // Restore last screen if available
        if let Some(screen_name) = &cfg.ui.last_screen {
            state.screen = match screen_name.as_str() {
                "search" => Screen::Search,
                "help" => Screen::Help,
                _ => Screen::Library,
            };
            state.sidebar_selected = screen_to_sidebar(state.screen);
        }

        Ok(Self {
            cfg,
            config_path,
            state,
            store,
            catalog,
            lyrics,
            tx,
            rx: Some(rx),
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let Some(mut rx) = self.rx.take() else {
            anyhow::bail!("app already running");
        };

        input::spawn_input_task(self.tx.clone());
        // No constant ticker; we re-render on input, network, and player
        // events.

        self.store.load();
        self.surface_store_error();
        self.refresh_library();

        // First draw
        tui::draw(terminal, &self.cfg, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action);
                    }
                }
                Event::Player(pe) => self.handle_player(pe),
                Event::Network(ne) => self.handle_network(ne),
            }

            if self.state.should_quit {
                break;
            }

            self.state.tick += 1;
            tui::draw(terminal, &self.cfg, &mut self.state)?;
        }

        self.save_state_on_quit();

        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        self.store.stop_preview();

        let screen_name = match self.state.screen {
            Screen::Library => "library",
            Screen::Search => "search",
            Screen::Help => "help",
        };
        self.cfg.ui.last_screen = Some(screen_name.to_string());

        let _ = crate::config::save(&self.cfg, Some(&self.config_path));
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::StartSearch => self.spawn_search(),
            Action::Activate => match self.state.screen {
                Screen::Library => self.open_detail(),
                Screen::Search => self.add_selected_result(),
                Screen::Help => {}
            },
            Action::TogglePreview => self.toggle_preview(),
            Action::ToggleFavorite => self.toggle_favorite(),
            Action::ToggleFavoritesFilter => {
                self.state.favorites_only = !self.state.favorites_only;
                self.state.library_list.selected = 0;
                self.state.library_list.scroll_offset = 0;
                self.refresh_library();
                self.state.status = if self.state.favorites_only {
                    "Showing favorites".into()
                } else {
                    "Showing all songs".into()
                };
            }
            Action::RemoveSelected => self.remove_selected(),
            Action::CloseDetail => self.state.detail.close(),
            Action::RetryLyrics => {
                if let Some(song) = self.state.detail.song.clone() {
                    self.spawn_lyrics_fetch(song);
                }
            }
            Action::DetailScrollUp => {
                self.state.detail.scroll = self.state.detail.scroll.saturating_sub(1);
            }
            Action::DetailScrollDown => {
                self.state.detail.scroll = self.state.detail.scroll.saturating_add(1);
            }
            Action::Refresh => match self.state.screen {
                Screen::Library => self.refresh_library(),
                Screen::Search => self.spawn_search(),
                Screen::Help => {}
            },
            _ => self.reduce(action),
        }
    }

    fn reduce(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => {
                self.state.screen = self.state.screen.next();
                self.state.sidebar_selected = screen_to_sidebar(self.state.screen);
                if self.state.screen == Screen::Search {
                    self.state.search_focus = SearchFocus::Input;
                }
            }
            Action::PrevScreen => {
                self.state.screen = self.state.screen.prev();
                self.state.sidebar_selected = screen_to_sidebar(self.state.screen);
                if self.state.screen == Screen::Search {
                    self.state.search_focus = SearchFocus::Input;
                }
            }
            Action::SetScreen(screen) => {
                self.state.screen = screen;
                self.state.sidebar_selected = screen_to_sidebar(screen);
                if screen == Screen::Search {
                    self.state.search_focus = SearchFocus::Input;
                }
            }
            Action::SidebarUp => {
                self.state.sidebar_selected = self.state.sidebar_selected.saturating_sub(1);
                self.state.screen = sidebar_to_screen(self.state.sidebar_selected);
                if self.state.screen == Screen::Search {
                    self.state.search_focus = SearchFocus::Input;
                }
            }
            Action::SidebarDown => {
                self.state.sidebar_selected = (self.state.sidebar_selected + 1).min(2);
                self.state.screen = sidebar_to_screen(self.state.sidebar_selected);
                if self.state.screen == Screen::Search {
                    self.state.search_focus = SearchFocus::Input;
                }
            }
            Action::ListUp => {
                let list = self.state.active_list_mut();
                list.select_prev();
                list.update_scroll(20);
            }
            Action::ListDown => {
                let list = self.state.active_list_mut();
                list.select_next();
                list.update_scroll(20);
            }
            Action::GoTop => {
                let list = self.state.active_list_mut();
                list.selected = 0;
                list.scroll_offset = 0;
            }
            Action::GoBottom => {
                let list = self.state.active_list_mut();
                list.selected = list.songs.len().saturating_sub(1);
                list.update_scroll(20);
            }
            Action::PageUp => {
                let list = self.state.active_list_mut();
                list.selected = list.selected.saturating_sub(10);
                list.update_scroll(20);
            }
            Action::PageDown => {
                let list = self.state.active_list_mut();
                list.selected = (list.selected + 10).min(list.songs.len().saturating_sub(1));
                list.update_scroll(20);
            }
            Action::SetSearchFocus(f) => self.state.search_focus = f,
            Action::InputChar(c) => self.state.search_query.push(c),
            Action::Backspace => {
                self.state.search_query.pop();
            }
            Action::ClearInput => self.state.search_query.clear(),
            Action::Resize => {}
            // Handled in handle_action
            Action::StartSearch
            | Action::Activate
            | Action::TogglePreview
            | Action::ToggleFavorite
            | Action::ToggleFavoritesFilter
            | Action::RemoveSelected
            | Action::CloseDetail
            | Action::RetryLyrics
            | Action::DetailScrollUp
            | Action::DetailScrollDown
            | Action::Refresh => {}
        }
    }

    fn handle_player(&mut self, pe: PlayerEvent) {
        match pe {
            PlayerEvent::Finished { generation } => {
                self.store.on_preview_finished(generation);
                self.sync_playback_state();
            }
            PlayerEvent::Failed {
                generation,
                message,
            } => {
                self.store.on_preview_finished(generation);
                self.sync_playback_state();
                self.state.toast = Some(Toast::error(format!("Preview failed: {message}")));
            }
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::Error(e) => {
                self.state.search_list.loading = false;
                self.state.detail.loading = false;
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e}");
            }
            NetworkEvent::SearchResults { query, page } => {
                self.state.last_search = Some(query);
                self.state.search_total = Some(page.total);
                self.state.search_has_more = page.next.is_some();
                self.state.search_list.selected = 0;
                self.state.search_list.scroll_offset = 0;
                self.state.search_list.set_songs(page.data);
                self.state.status = format!(
                    "Results: {} of {}",
                    self.state.search_list.songs.len(),
                    page.total
                );
                if !self.state.search_list.songs.is_empty() {
                    self.state.search_focus = SearchFocus::Results;
                }
            }
            NetworkEvent::LyricsFetched { song_id, text } => {
                self.store.update_lyrics(song_id, &text);
                self.surface_store_error();
                self.refresh_library();
                if self.state.detail.song_id() == Some(song_id)
                    && let Some(song) = &mut self.state.detail.song
                {
                    song.lyrics = Some(text);
                    self.state.detail.loading = false;
                    self.state.detail.error = None;
                }
            }
            NetworkEvent::LyricsFailed { song_id, message } => {
                if self.state.detail.song_id() == Some(song_id) {
                    self.state.detail.loading = false;
                    self.state.detail.error = Some(message.clone());
                }
                self.state.toast = Some(Toast::error(message));
            }
        }
    }

    fn spawn_search(&mut self) {
        if self.state.search_list.loading {
            return;
        }
        if self.state.search_query.trim().is_empty() {
            self.state.status = "Type a query first".into();
            return;
        }
        let query = self.state.search_query.trim().to_string();
        self.state.search_list.loading = true;
        self.state.status = format!("Searching: {query}");

        let catalog = self.catalog.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            match catalog.search(&query).await {
                Ok(page) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::SearchResults { query, page }))
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::Error(format!(
                            "Search failed: {e}"
                        ))))
                        .await;
                }
            }
        });
    }

    /// Open the detail view for the selected saved song, fetching lyrics if
    /// they are not cached yet.
    fn open_detail(&mut self) {
        let Some(song) = self.state.library_list.selected_song().cloned() else {
            return;
        };
        let needs_fetch = song.lyrics.is_none();
        self.state.detail.open(song.clone());
        if needs_fetch {
            self.spawn_lyrics_fetch(song);
        }
    }

    /// Cache-hit fast path stays on the UI thread; only a miss goes to the
    /// network. Two overlapping fetches for the same song are both allowed to
    /// run and both write their result (last one wins).
    fn spawn_lyrics_fetch(&mut self, song: Song) {
        if let Some(text) = song.lyrics {
            if self.state.detail.song_id() == Some(song.id)
                && let Some(detail_song) = &mut self.state.detail.song
            {
                detail_song.lyrics = Some(text);
                self.state.detail.loading = false;
            }
            return;
        }

        self.state.detail.loading = true;
        self.state.detail.error = None;

        let lyrics = self.lyrics.clone();
        let tx = self.tx.clone();
        let song_id = song.id;
        let artist = song.artist;
        let title = song.title;

        tokio::spawn(async move {
            match lyrics.get(&artist, &title).await {
                Ok(text) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::LyricsFetched { song_id, text }))
                        .await;
                }
                Err(e) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::LyricsFailed {
                            song_id,
                            message: format!("{e}"),
                        }))
                        .await;
                }
            }
        });
    }

    fn add_selected_result(&mut self) {
        if self.state.search_focus != SearchFocus::Results {
            return;
        }
        let Some(song) = self.state.search_list.selected_song().cloned() else {
            return;
        };
        if self.store.contains(song.id) {
            self.state.toast = Some(Toast::error(format!("Already saved: {}", song.title)));
            return;
        }
        self.store.add_song(&song);
        self.surface_store_error();
        self.refresh_library();
        self.state.toast = Some(Toast::success(format!("Added: {}", song.title)));
    }

    fn toggle_preview(&mut self) {
        let song = if let Some(song) = &self.state.detail.song {
            Some(song.clone())
        } else {
            self.state.active_list().selected_song().cloned()
        };
        let Some(song) = song else { return };

        self.store.play_preview(&song);
        self.sync_playback_state();
    }

    fn toggle_favorite(&mut self) {
        let song_id = if let Some(song) = &self.state.detail.song {
            Some(song.id)
        } else {
            self.state.library_list.selected_song().map(|s| s.id)
        };
        let Some(song_id) = song_id else { return };

        self.store.toggle_favorite(song_id);
        self.surface_store_error();
        self.refresh_library();
        if let Some(detail_song) = &mut self.state.detail.song
            && detail_song.id == song_id
        {
            detail_song.is_favorite = !detail_song.is_favorite;
        }
    }

    fn remove_selected(&mut self) {
        let Some(song) = self.state.library_list.selected_song().cloned() else {
            return;
        };
        self.store.remove_song(&song);
        self.surface_store_error();
        self.sync_playback_state();
        self.refresh_library();
        self.state.toast = Some(Toast::success(format!("Removed: {}", song.title)));
    }

    /// Rebuild the library list copy from the store, honoring the favorites
    /// filter; insertion order is preserved.
    fn refresh_library(&mut self) {
        let songs = self.store.visible(self.state.favorites_only);
        self.state.library_list.set_songs(songs);
    }

    fn sync_playback_state(&mut self) {
        self.state.playing_song_id = self.store.playing_song_id();
        self.state.now_playing = self.state.playing_song_id.and_then(|id| {
            // Previews can also come from unsaved search results.
            self.store
                .get(id)
                .or_else(|| {
                    self.state
                        .search_list
                        .songs
                        .iter()
                        .find(|s| s.id == id)
                })
                .map(|s| format!("{} - {}", s.title, s.artist))
        });
    }

    fn surface_store_error(&mut self) {
        if let Some(e) = self.store.take_last_error() {
            self.state.toast = Some(Toast::error(e));
        }
    }
}

fn sidebar_to_screen(idx: usize) -> Screen {
    match idx {
        0 => Screen::Library,
        1 => Screen::Search,
        _ => Screen::Help,
    }
}

fn screen_to_sidebar(screen: Screen) -> usize {
    match screen {
        Screen::Library => 0,
        Screen::Search => 1,
        Screen::Help => 2,
    }
}
