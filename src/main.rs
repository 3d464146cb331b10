mod app;
mod catalog;
mod config;
mod error;
mod input;
mod library;
mod lyrics;
mod player;
mod storage;
#[cfg(test)]
mod testutil;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fret", version, about = "Search, save, and read song lyrics from the terminal")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Search the catalog and print matches (headless).
    Search {
        query: String,
    },
    /// Fetch and print lyrics for an artist/title pair (headless).
    Lyrics {
        artist: String,
        title: String,
    },
    /// Print the saved library (headless).
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Search { query } => {
            let store = make_store(&cfg)?;
            let page = store.fetch_songs(&query).await?;
            print_songs(&page.data);
            if (page.data.len() as u64) < page.total {
                println!("({} of {} matches shown)", page.data.len(), page.total);
            }
        }
        Command::Lyrics { artist, title } => {
            let mut store = make_store(&cfg)?;
            store.load();
            // A saved song for this pair goes through the cache; anything
            // else is a one-off lookup.
            let saved = store
                .songs()
                .iter()
                .find(|s| s.artist.eq_ignore_ascii_case(&artist) && s.title.eq_ignore_ascii_case(&title))
                .cloned();
            let text = match saved {
                Some(song) => store.fetch_lyrics(&song).await?,
                None => {
                    let lyrics = lyrics::LyricsClient::new(Some(cfg.api.lyrics_base_url.as_str()));
                    lyrics.get(&artist, &title).await?
                }
            };
            println!("{text}");
        }
        Command::List => {
            let mut store = make_store(&cfg)?;
            store.load();
            if let Some(e) = store.take_last_error() {
                eprintln!("warning: {e}");
            }
            print_songs(store.songs());
        }
    }

    Ok(())
}

fn make_store(cfg: &config::Config) -> anyhow::Result<library::SongStore> {
    let storage = storage::Storage::open(&cfg.paths.data_dir.join("library.sqlite3"))?;
    let catalog = catalog::CatalogClient::new(Some(cfg.api.catalog_base_url.as_str()));
    let lyrics = lyrics::LyricsClient::new(Some(cfg.api.lyrics_base_url.as_str()));
    let engine = player::mpv::MpvEngine::new(&cfg.player.mpv_path, cfg.player.volume);
    // Headless commands never play anything; the event channel goes nowhere.
    let (tx, _rx) = tokio::sync::mpsc::channel(8);
    Ok(library::SongStore::new(
        storage,
        catalog,
        lyrics,
        Box::new(engine),
        tx,
    ))
}

fn print_songs(songs: &[catalog::models::Song]) {
    for (i, s) in songs.iter().enumerate() {
        let marker = if s.is_favorite { "♥" } else { " " };
        println!(
            "{:02}. {} {} - {}  ({}) [id={}]",
            i + 1,
            marker,
            s.title,
            s.artist,
            s.formatted_duration(),
            s.id
        );
    }
}
