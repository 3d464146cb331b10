//! The saved-song library: canonical in-memory collection, persistence,
//! lyrics caching, and single-slot preview playback.

use crate::app::events::Event;
use crate::catalog::CatalogClient;
use crate::catalog::models::{SearchPage, Song};
use crate::error::FetchError;
use crate::lyrics::LyricsClient;
use crate::player::{AudioEngine, PreviewHandle};
use crate::storage::Storage;
use reqwest::Url;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const LIBRARY_KEY: &str = "library.saved_songs";

/// The one in-flight preview. Exists iff a song is playing.
struct PlaybackSlot {
    song_id: u64,
    generation: u64,
    handle: PreviewHandle,
}

/// Owns the saved-song collection and mediates every mutation.
///
/// All operations run on the app's event loop; mutations rewrite the whole
/// collection through [`Storage`] synchronously. Persistence failures never
/// propagate: they are downgraded to a recoverable last-error message and the
/// in-memory state stays authoritative.
pub struct SongStore {
    songs: Vec<Song>,
    storage: Storage,
    catalog: CatalogClient,
    lyrics: LyricsClient,
    engine: Box<dyn AudioEngine>,
    events: mpsc::Sender<Event>,
    playback: Option<PlaybackSlot>,
    next_generation: u64,
    last_error: Option<String>,
}

impl SongStore {
    pub fn new(
        storage: Storage,
        catalog: CatalogClient,
        lyrics: LyricsClient,
        engine: Box<dyn AudioEngine>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            songs: Vec::new(),
            storage,
            catalog,
            lyrics,
            engine,
            events,
            playback: None,
            next_generation: 0,
            last_error: None,
        }
    }

    /// Load the saved collection. An absent key is a fresh install, not an
    /// error; malformed or unreadable data falls back to an empty library
    /// with a recoverable last-error so the app stays usable.
    pub fn load(&mut self) {
        match self.storage.get(LIBRARY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Song>>(&raw) {
                Ok(songs) => {
                    debug!("loaded {} saved songs", songs.len());
                    self.songs = songs;
                }
                Err(e) => {
                    warn!("corrupt saved library: {e}");
                    self.songs.clear();
                    self.last_error = Some("Failed to load saved songs".into());
                }
            },
            Ok(None) => self.songs.clear(),
            Err(e) => {
                warn!("read saved library: {e:#}");
                self.songs.clear();
                self.last_error = Some("Failed to load saved songs".into());
            }
        }
    }

    /// Persist the full collection. The in-memory state is authoritative
    /// whether or not the write lands.
    pub fn save(&mut self) {
        let raw = match serde_json::to_string(&self.songs) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("serialize library: {e}");
                self.last_error = Some("Failed to save songs".into());
                return;
            }
        };
        if let Err(e) = self.storage.set(LIBRARY_KEY, &raw) {
            warn!("write saved library: {e:#}");
            self.last_error = Some("Failed to save songs".into());
        }
    }

    /// Append `song` unless its id is already saved. The stored copy always
    /// starts unfavorited.
    pub fn add_song(&mut self, song: &Song) {
        if self.contains(song.id) {
            return;
        }
        let mut song = song.clone();
        song.is_favorite = false;
        self.songs.push(song);
        self.save();
    }

    /// Remove every entry with this id, stopping its preview first if it is
    /// the one playing.
    pub fn remove_song(&mut self, song: &Song) {
        if self.playing_song_id() == Some(song.id) {
            self.stop_preview();
        }
        self.songs.retain(|s| s.id != song.id);
        self.save();
    }

    pub fn toggle_favorite(&mut self, song_id: u64) {
        if let Some(s) = self.songs.iter_mut().find(|s| s.id == song_id) {
            s.is_favorite = !s.is_favorite;
            self.save();
        }
    }

    pub fn update_lyrics(&mut self, song_id: u64, lyrics: &str) {
        if let Some(s) = self.songs.iter_mut().find(|s| s.id == song_id) {
            s.lyrics = Some(lyrics.to_string());
            self.save();
        }
    }

    /// Search the catalog. Results are candidates; nothing is saved here.
    pub async fn fetch_songs(&self, query: &str) -> Result<SearchPage, FetchError> {
        self.catalog.search(query).await
    }

    /// Return cached lyrics immediately, otherwise fetch, cache, and return.
    ///
    /// Two concurrent fetches for the same uncached song are not
    /// deduplicated; both hit the network and the later write wins.
    pub async fn fetch_lyrics(&mut self, song: &Song) -> Result<String, FetchError> {
        if let Some(text) = &song.lyrics {
            return Ok(text.clone());
        }
        let text = self.lyrics.get(&song.artist, &song.title).await?;
        self.update_lyrics(song.id, &text);
        Ok(text)
    }

    /// Toggle-or-switch preview playback.
    ///
    /// Playing the current song stops it; anything else stops the active
    /// preview (if any) and starts the new one. An unparseable preview URL is
    /// a silent no-op.
    pub fn play_preview(&mut self, song: &Song) {
        if self.playing_song_id() == Some(song.id) {
            self.stop_preview();
            return;
        }
        self.stop_preview();

        let Ok(url) = Url::parse(&song.preview_url) else {
            return;
        };

        let generation = self.next_generation;
        self.next_generation += 1;
        match self.engine.start(&url, generation, self.events.clone()) {
            Ok(handle) => {
                self.playback = Some(PlaybackSlot {
                    song_id: song.id,
                    generation,
                    handle,
                });
            }
            Err(e) => warn!("start preview: {e:#}"),
        }
    }

    /// Idempotent; always ends Idle.
    pub fn stop_preview(&mut self) {
        if let Some(slot) = self.playback.take() {
            slot.handle.stop();
        }
    }

    /// Natural end-of-track for the handle identified by `generation`.
    /// Stale notifications (a handle that was already replaced) are ignored.
    pub fn on_preview_finished(&mut self, generation: u64) {
        if self
            .playback
            .as_ref()
            .is_some_and(|slot| slot.generation == generation)
        {
            self.playback = None;
        }
    }

    pub fn playing_song_id(&self) -> Option<u64> {
        self.playback.as_ref().map(|slot| slot.song_id)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, song_id: u64) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == song_id)
    }

    pub fn contains(&self, song_id: u64) -> bool {
        self.songs.iter().any(|s| s.id == song_id)
    }

    /// Display view of the library: insertion order, optionally favorites
    /// only.
    pub fn visible(&self, favorites_only: bool) -> Vec<Song> {
        self.songs
            .iter()
            .filter(|s| !favorites_only || s.is_favorite)
            .cloned()
            .collect()
    }

    /// Recoverable load/save failure message, if one happened since the last
    /// call.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::serve_once;
    use std::sync::{Arc, Mutex};
    use tokio::sync::oneshot;

    /// Records starts and hands the receiving end of each handle's stop
    /// signal back to the test.
    #[derive(Clone, Default)]
    struct FakeEngine {
        starts: Arc<Mutex<Vec<(String, u64)>>>,
        stops: Arc<Mutex<Vec<oneshot::Receiver<()>>>>,
    }

    impl AudioEngine for FakeEngine {
        fn start(
            &self,
            url: &Url,
            generation: u64,
            _events: mpsc::Sender<Event>,
        ) -> anyhow::Result<PreviewHandle> {
            let (stop_tx, stop_rx) = oneshot::channel();
            self.starts
                .lock()
                .unwrap()
                .push((url.to_string(), generation));
            self.stops.lock().unwrap().push(stop_rx);
            Ok(PreviewHandle::new(stop_tx))
        }
    }

    impl FakeEngine {
        fn start_count(&self) -> usize {
            self.starts.lock().unwrap().len()
        }

        fn was_stopped(&self, index: usize) -> bool {
            self.stops.lock().unwrap()[index].try_recv().is_ok()
        }
    }

    fn make_song(id: u64) -> Song {
        Song {
            id,
            title: format!("Song {id}"),
            artist: "Artist".into(),
            artwork_url: format!("https://cdn.example.com/cover/{id}.jpg"),
            preview_url: format!("https://cdn.example.com/preview/{id}.mp3"),
            duration_secs: 30,
            is_favorite: false,
            lyrics: None,
        }
    }

    fn make_store_with(
        engine: FakeEngine,
        catalog_base: Option<&str>,
        lyrics_base: Option<&str>,
    ) -> SongStore {
        let (tx, _rx) = mpsc::channel(16);
        // Unroutable defaults: a test that unexpectedly hits the network
        // fails instead of reaching a live API.
        SongStore::new(
            Storage::open_in_memory().unwrap(),
            CatalogClient::new(catalog_base.or(Some("http://127.0.0.1:9"))),
            LyricsClient::new(lyrics_base.or(Some("http://127.0.0.1:9"))),
            Box::new(engine),
            tx,
        )
    }

    fn make_store(engine: FakeEngine, lyrics_base: Option<&str>) -> SongStore {
        make_store_with(engine, None, lyrics_base)
    }

    #[test]
    fn test_add_song_is_idempotent() {
        let mut store = make_store(FakeEngine::default(), None);
        let song = make_song(1);
        store.add_song(&song);
        store.add_song(&song);
        assert_eq!(store.songs().len(), 1);
        assert_eq!(store.songs()[0].id, 1);
    }

    #[test]
    fn test_add_song_clears_favorite_flag() {
        let mut store = make_store(FakeEngine::default(), None);
        let mut song = make_song(1);
        song.is_favorite = true;
        store.add_song(&song);
        assert!(!store.songs()[0].is_favorite);
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let mut store = make_store(FakeEngine::default(), None);
        store.add_song(&make_song(1));
        store.toggle_favorite(1);
        assert!(store.get(1).unwrap().is_favorite);
        store.toggle_favorite(1);
        assert!(!store.get(1).unwrap().is_favorite);
    }

    #[test]
    fn test_toggle_favorite_missing_is_noop() {
        let mut store = make_store(FakeEngine::default(), None);
        store.add_song(&make_song(1));
        store.toggle_favorite(99);
        assert!(!store.get(1).unwrap().is_favorite);
        assert!(store.take_last_error().is_none());
    }

    #[test]
    fn test_update_lyrics_missing_is_noop() {
        let mut store = make_store(FakeEngine::default(), None);
        store.update_lyrics(99, "nothing");
        assert!(store.songs().is_empty());
    }

    #[test]
    fn test_remove_song_removes_duplicate_ids() {
        let mut store = make_store(FakeEngine::default(), None);
        // Duplicates can only come in through a corrupt-but-parseable store.
        let dup = serde_json::to_string(&vec![make_song(1), make_song(1), make_song(2)]).unwrap();
        store.storage.set(LIBRARY_KEY, &dup).unwrap();
        store.load();
        assert_eq!(store.songs().len(), 3);

        store.remove_song(&make_song(1));
        assert_eq!(store.songs().len(), 1);
        assert_eq!(store.songs()[0].id, 2);
    }

    #[test]
    fn test_remove_playing_song_stops_playback() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        let song = make_song(1);
        store.add_song(&song);
        store.play_preview(&song);
        assert_eq!(store.playing_song_id(), Some(1));

        store.remove_song(&song);
        assert_eq!(store.playing_song_id(), None);
        assert!(engine.was_stopped(0));
        assert!(store.songs().is_empty());
    }

    #[test]
    fn test_load_empty_store_yields_empty_library() {
        let mut store = make_store(FakeEngine::default(), None);
        store.load();
        assert!(store.songs().is_empty());
        assert!(store.take_last_error().is_none());
    }

    #[test]
    fn test_load_malformed_store_is_recoverable() {
        let mut store = make_store(FakeEngine::default(), None);
        store.storage.set(LIBRARY_KEY, "not json at all").unwrap();
        store.load();
        assert!(store.songs().is_empty());
        assert!(store.take_last_error().is_some());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = make_store(FakeEngine::default(), None);
        store.add_song(&make_song(1));
        store.add_song(&make_song(2));
        store.toggle_favorite(2);
        store.update_lyrics(1, "la la la");

        let before = store.songs().to_vec();
        store.songs.clear();
        store.load();
        assert_eq!(store.songs(), before.as_slice());
    }

    #[test]
    fn test_play_same_song_toggles_to_idle() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        let song = make_song(1);
        store.play_preview(&song);
        assert_eq!(store.playing_song_id(), Some(1));

        store.play_preview(&song);
        assert_eq!(store.playing_song_id(), None);
        assert_eq!(engine.start_count(), 1);
        assert!(engine.was_stopped(0));
    }

    #[test]
    fn test_play_other_song_replaces_slot() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        store.play_preview(&make_song(1));
        store.play_preview(&make_song(2));

        assert_eq!(store.playing_song_id(), Some(2));
        assert_eq!(engine.start_count(), 2);
        assert!(engine.was_stopped(0));
        assert!(!engine.was_stopped(1));
    }

    #[test]
    fn test_play_unparseable_url_is_silent_noop() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        let mut song = make_song(1);
        song.preview_url = "not a url".into();
        store.play_preview(&song);
        assert_eq!(store.playing_song_id(), None);
        assert_eq!(engine.start_count(), 0);
    }

    #[test]
    fn test_stop_preview_is_idempotent() {
        let mut store = make_store(FakeEngine::default(), None);
        store.stop_preview();
        store.play_preview(&make_song(1));
        store.stop_preview();
        store.stop_preview();
        assert_eq!(store.playing_song_id(), None);
    }

    #[test]
    fn test_finished_event_clears_matching_slot() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        store.play_preview(&make_song(1));
        let generation = engine.starts.lock().unwrap()[0].1;

        store.on_preview_finished(generation);
        assert_eq!(store.playing_song_id(), None);
    }

    #[test]
    fn test_finished_event_with_stale_generation_is_ignored() {
        let engine = FakeEngine::default();
        let mut store = make_store(engine.clone(), None);
        store.play_preview(&make_song(1));
        store.play_preview(&make_song(2));
        let first_generation = engine.starts.lock().unwrap()[0].1;

        store.on_preview_finished(first_generation);
        assert_eq!(store.playing_song_id(), Some(2));
    }

    #[test]
    fn test_visible_filters_favorites_in_order() {
        let mut store = make_store(FakeEngine::default(), None);
        store.add_song(&make_song(1));
        store.add_song(&make_song(2));
        store.add_song(&make_song(3));
        store.toggle_favorite(3);
        store.toggle_favorite(1);

        let all: Vec<u64> = store.visible(false).iter().map(|s| s.id).collect();
        assert_eq!(all, vec![1, 2, 3]);
        let favorites: Vec<u64> = store.visible(true).iter().map(|s| s.id).collect();
        assert_eq!(favorites, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_fetch_songs_returns_candidates_without_mutation() {
        let body = r#"{
            "data": [{
                "id": 11,
                "title": "One",
                "duration": 60,
                "preview": "https://cdn.example.com/preview/11.mp3",
                "artist": { "name": "A" },
                "album": { "cover_medium": "https://cdn.example.com/cover/11.jpg" }
            }],
            "total": 1
        }"#;
        let base = serve_once("200 OK", body).await;
        let store = make_store_with(FakeEngine::default(), Some(base.as_str()), None);

        let page = store.fetch_songs("one").await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 11);
        assert!(store.songs().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_lyrics_cache_hit_skips_network() {
        // The lyrics client points at an unroutable address; any network
        // attempt would fail the test.
        let mut store = make_store(FakeEngine::default(), None);
        let mut song = make_song(1);
        song.lyrics = Some("cached text".into());
        store.add_song(&song);

        let text = store.fetch_lyrics(&song).await.unwrap();
        assert_eq!(text, "cached text");
    }

    #[tokio::test]
    async fn test_fetch_lyrics_fetches_and_caches() {
        let base = serve_once("200 OK", r#"{"lyrics":"Hello\nWorld"}"#).await;
        let mut store = make_store(FakeEngine::default(), Some(base.as_str()));
        let song = make_song(1);
        store.add_song(&song);

        let text = store.fetch_lyrics(&song).await.unwrap();
        assert_eq!(text, "Hello\nWorld");
        assert_eq!(store.get(1).unwrap().lyrics.as_deref(), Some("Hello\nWorld"));

        // The cached text survives a reload.
        store.songs.clear();
        store.load();
        assert_eq!(store.get(1).unwrap().lyrics.as_deref(), Some("Hello\nWorld"));
    }

    #[tokio::test]
    async fn test_fetch_lyrics_failure_leaves_library_untouched() {
        let base = serve_once("404 Not Found", r#"{"error":"No lyrics found"}"#).await;
        let mut store = make_store(FakeEngine::default(), Some(base.as_str()));
        let song = make_song(1);
        store.add_song(&song);

        let err = store.fetch_lyrics(&song).await.unwrap_err();
        assert!(matches!(err, FetchError::NoLyrics));
        assert!(store.get(1).unwrap().lyrics.is_none());
    }
}
