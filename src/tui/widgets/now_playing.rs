//! Now Playing widget - compact text-only bar at the bottom

use crate::app::state::{AppState, ToastKind};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Preview ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Add horizontal padding
    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1), // Left padding
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Right padding
        ])
        .split(inner)[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Playback line
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Toast (if any)
        ])
        .split(padded);

    let content_width = padded.width.saturating_sub(1) as usize;

    // Playback line
    let playback_line = match &state.now_playing {
        Some(label) => Line::from(vec![
            Span::styled(icons.note, Style::default().fg(theme.palette.playing)),
            Span::raw(" "),
            Span::styled(
                truncate_str(label, content_width.saturating_sub(2)),
                Style::default()
                    .fg(theme.palette.fg_primary)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            "Not playing",
            Style::default().fg(theme.palette.fg_secondary),
        )),
    };
    frame.render_widget(Paragraph::new(playback_line), rows[0]);

    // Status line
    let status_line = Line::from(Span::styled(
        truncate_str(&state.status, content_width),
        Style::default().fg(theme.palette.fg_secondary),
    ));
    frame.render_widget(Paragraph::new(status_line), rows[1]);

    // Toast messages if any
    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (icons.success, theme.palette.playing),
            ToastKind::Error => (icons.error, theme.palette.error),
        };
        let toast_line = Line::from(vec![
            Span::styled(format!("{} ", prefix), Style::default().fg(color)),
            Span::styled(
                truncate_str(&toast.message, content_width.saturating_sub(3)),
                Style::default().fg(color),
            ),
        ]);
        frame.render_widget(Paragraph::new(toast_line), rows[2]);
    }
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let char_count: usize = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
