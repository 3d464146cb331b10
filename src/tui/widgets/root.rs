//! Root layout widget - orchestrates main layout structure

use crate::app::state::{AppState, Screen};
use crate::config::Config;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{detail, help, now_playing, sidebar, song_list};

/// Main layout structure:
/// ┌──────────┬─────────────────────────────────────────┐
/// │  Menu    │           Main Content                  │
/// │          │      (Library / Search / Help,          │
/// │  Library │       or the song detail view)          │
/// │  Search  │                                         │
/// │  Help    │                                         │
/// ├──────────┴─────────────────────────────────────────┤
/// │                  Now Playing                       │
/// └────────────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, cfg: &Config, state: &mut AppState) {
    let root = frame.area();

    // Main vertical layout: top area | bottom bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Top area (sidebar + content)
            Constraint::Length(5), // Bottom bar (now playing)
        ])
        .split(root);

    // Top area: sidebar | main content
    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Sidebar menu
            Constraint::Min(40),    // Main content area
        ])
        .split(rows[0]);

    sidebar::render(frame, state, top_cols[0]);
    render_main_content(frame, cfg, state, top_cols[1]);
    now_playing::render(frame, state, rows[1]);
}

/// Render the main content area based on current screen
fn render_main_content(frame: &mut Frame, cfg: &Config, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let title = if state.detail.is_open() {
        format!(" {} Lyrics ", icons.lyrics)
    } else {
        match state.screen {
            Screen::Library if state.favorites_only => {
                format!(" {} Library (favorites) ", icons.library)
            }
            Screen::Library => format!(" {} Library ", icons.library),
            Screen::Search => format!(" {} Search ", icons.search),
            Screen::Help => format!(" {} Keybinds ", icons.help),
        }
    };

    let main = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = main.inner(area);
    frame.render_widget(main, area);

    match state.screen {
        Screen::Library if state.detail.is_open() => {
            detail::render(frame, state, inner);
        }
        Screen::Library => {
            if state.library_list.songs.is_empty() {
                render_empty_library(frame, state, inner);
            } else {
                song_list::render(frame, cfg, state, inner);
            }
        }
        Screen::Search => {
            let sub = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(inner);
            song_list::render_search_box(frame, state, sub[0]);
            song_list::render(frame, cfg, state, sub[1]);
        }
        Screen::Help => {
            help::render(frame, state, inner);
        }
    }
}

/// Empty-library placeholder: a random quote, centered.
fn render_empty_library(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let message = if state.favorites_only {
        "No favorites yet. Press f on a song to mark one."
    } else {
        state.empty_quote
    };

    let top_padding = (area.height / 2).saturating_sub(1);
    let mut lines: Vec<Line> = vec![Line::default(); top_padding as usize];
    lines.push(Line::from(Span::styled(
        message,
        Style::default().fg(theme.palette.fg_secondary),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press 2 to search for songs",
        Style::default().fg(theme.palette.accent_alt),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
