//! Song detail view - header plus cached or freshly fetched lyrics

use crate::app::state::AppState;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let Some(song) = &state.detail.song else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Lyrics
        ])
        .split(area);

    // Header: back hint, then title / artist / duration
    let mut title_spans = vec![
        Span::styled("← ", Style::default().fg(theme.palette.fg_secondary)),
        Span::styled("Esc", Style::default().fg(theme.palette.accent)),
        Span::raw("  "),
        Span::styled(
            song.title.as_str(),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if song.is_favorite {
        title_spans.push(Span::raw(" "));
        title_spans.push(Span::styled(
            icons.favorite,
            Style::default().fg(theme.palette.favorite),
        ));
    }
    if state.playing_song_id == Some(song.id) {
        title_spans.push(Span::raw(" "));
        title_spans.push(Span::styled(
            icons.note,
            Style::default().fg(theme.palette.playing),
        ));
    }

    let header = vec![
        Line::from(title_spans),
        Line::from(vec![
            Span::styled(
                format!("{} {}", icons.artist, song.artist),
                Style::default().fg(theme.palette.fg_secondary),
            ),
            Span::styled(
                format!("  {} {}", icons.bullet, song.formatted_duration()),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ]),
        Line::default(),
    ];
    frame.render_widget(Paragraph::new(header), rows[0]);

    // Lyrics body
    if state.detail.loading {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{} Fetching lyrics...", spinner)))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, rows[1]);
        return;
    }

    if let Some(error) = &state.detail.error {
        let lines = vec![
            Line::from(Span::styled(
                format!("{} {}", icons.error, error),
                Style::default().fg(theme.palette.error),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(theme.palette.fg_secondary),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), rows[1]);
        return;
    }

    let Some(raw) = &song.lyrics else {
        let empty = Paragraph::new(Line::from("No lyrics available"))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, rows[1]);
        return;
    };

    let lines: Vec<Line> = normalize_lyrics(raw)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.palette.fg_primary))))
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.detail.scroll, 0));
    frame.render_widget(paragraph, rows[1]);
}

/// Fold Windows/old-Mac line endings to `\n` and drop blank lines, so lyric
/// text from the API renders as a compact block.
fn normalize_lyrics(raw: &str) -> Vec<String> {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lyrics_folds_line_endings() {
        let raw = "First\r\nSecond\rThird\nFourth";
        assert_eq!(normalize_lyrics(raw), vec!["First", "Second", "Third", "Fourth"]);
    }

    #[test]
    fn test_normalize_lyrics_drops_blank_lines() {
        let raw = "One\n\n   \nTwo\n\n";
        assert_eq!(normalize_lyrics(raw), vec!["One", "Two"]);
    }
}
