use serde::{Deserialize, Serialize};

/// A song, either a search candidate or a saved library entry.
///
/// The catalog API and the persisted library use different JSON shapes for
/// the same entity; both are accepted on the way in (see [`SongRepr`]), and
/// the flat stored shape is always emitted on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SongRepr", into = "StoredSong")]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub artwork_url: String,
    pub preview_url: String,
    pub duration_secs: u32,
    pub is_favorite: bool,
    pub lyrics: Option<String>,
}

impl Song {
    /// "3:05"-style duration for list rows and the detail header.
    pub fn formatted_duration(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }
}

/// Ordered parse attempts: the nested API shape first, then the flat stored
/// shape. If neither matches, deserialization fails.
#[derive(Deserialize)]
#[serde(untagged)]
enum SongRepr {
    Api(ApiSong),
    Stored(StoredSong),
}

/// Shape returned by the catalog search endpoint.
#[derive(Deserialize)]
struct ApiSong {
    id: u64,
    title: String,
    duration: u32,
    preview: String,
    artist: ApiArtist,
    album: ApiAlbum,
}

#[derive(Deserialize)]
struct ApiArtist {
    name: String,
}

#[derive(Deserialize)]
struct ApiAlbum {
    cover_medium: String,
}

/// Flat shape used for the persisted library. The `album` field holds the
/// artwork URL as a plain string.
#[derive(Serialize, Deserialize)]
struct StoredSong {
    id: u64,
    title: String,
    artist: String,
    preview: String,
    duration: u32,
    #[serde(rename = "isFavorite", default)]
    is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lyrics: Option<String>,
    album: String,
}

impl From<SongRepr> for Song {
    fn from(repr: SongRepr) -> Self {
        match repr {
            SongRepr::Api(s) => Song {
                id: s.id,
                title: s.title,
                artist: s.artist.name,
                artwork_url: s.album.cover_medium,
                preview_url: s.preview,
                duration_secs: s.duration,
                is_favorite: false,
                lyrics: None,
            },
            SongRepr::Stored(s) => Song {
                id: s.id,
                title: s.title,
                artist: s.artist,
                artwork_url: s.album,
                preview_url: s.preview,
                duration_secs: s.duration,
                is_favorite: s.is_favorite,
                lyrics: s.lyrics,
            },
        }
    }
}

impl From<Song> for StoredSong {
    fn from(s: Song) -> Self {
        StoredSong {
            id: s.id,
            title: s.title,
            artist: s.artist,
            preview: s.preview_url,
            duration: s.duration_secs,
            is_favorite: s.is_favorite,
            lyrics: s.lyrics,
            album: s.artwork_url,
        }
    }
}

/// One page of catalog search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    pub data: Vec<Song>,
    pub total: u64,
    /// Opaque cursor to the next page, absent on the last one.
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_api_shape() {
        let raw = r#"{
            "id": 3135556,
            "title": "Harder, Better, Faster, Stronger",
            "duration": 224,
            "preview": "https://cdn.example.com/preview/3135556.mp3",
            "artist": { "id": 27, "name": "Daft Punk" },
            "album": { "id": 302127, "title": "Discovery", "cover_medium": "https://cdn.example.com/cover/302127.jpg" }
        }"#;
        let song: Song = serde_json::from_str(raw).unwrap();
        assert_eq!(song.id, 3135556);
        assert_eq!(song.artist, "Daft Punk");
        assert_eq!(song.artwork_url, "https://cdn.example.com/cover/302127.jpg");
        assert_eq!(song.duration_secs, 224);
        assert!(!song.is_favorite);
        assert!(song.lyrics.is_none());
    }

    #[test]
    fn test_decode_stored_shape() {
        let raw = r#"{
            "id": 42,
            "title": "Song Two",
            "artist": "Blur",
            "preview": "https://cdn.example.com/preview/42.mp3",
            "duration": 122,
            "isFavorite": true,
            "lyrics": "Woo-hoo",
            "album": "https://cdn.example.com/cover/42.jpg"
        }"#;
        let song: Song = serde_json::from_str(raw).unwrap();
        assert_eq!(song.artist, "Blur");
        assert_eq!(song.artwork_url, "https://cdn.example.com/cover/42.jpg");
        assert!(song.is_favorite);
        assert_eq!(song.lyrics.as_deref(), Some("Woo-hoo"));
    }

    #[test]
    fn test_decode_stored_shape_defaults() {
        // Older records may miss isFavorite/lyrics entirely.
        let raw = r#"{
            "id": 7,
            "title": "Untitled",
            "artist": "Unknown",
            "preview": "",
            "duration": 0,
            "album": ""
        }"#;
        let song: Song = serde_json::from_str(raw).unwrap();
        assert!(!song.is_favorite);
        assert!(song.lyrics.is_none());
    }

    #[test]
    fn test_decode_rejects_unknown_shape() {
        let raw = r#"{ "id": 1, "title": "x", "artist": 12, "duration": 3 }"#;
        assert!(serde_json::from_str::<Song>(raw).is_err());
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let song = Song {
            id: 9,
            title: "Wish You Were Here".into(),
            artist: "Pink Floyd".into(),
            artwork_url: "https://cdn.example.com/cover/9.jpg".into(),
            preview_url: "https://cdn.example.com/preview/9.mp3".into(),
            duration_secs: 334,
            is_favorite: true,
            lyrics: Some("So, so you think you can tell".into()),
        };
        let raw = serde_json::to_string(&song).unwrap();
        let back: Song = serde_json::from_str(&raw).unwrap();
        assert_eq!(song, back);
    }

    #[test]
    fn test_formatted_duration() {
        let mut song = Song {
            id: 1,
            title: String::new(),
            artist: String::new(),
            artwork_url: String::new(),
            preview_url: String::new(),
            duration_secs: 185,
            is_favorite: false,
            lyrics: None,
        };
        assert_eq!(song.formatted_duration(), "3:05");
        song.duration_secs = 59;
        assert_eq!(song.formatted_duration(), "0:59");
    }
}
