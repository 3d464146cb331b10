//! Help screen showing keybindings

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Render the help screen
pub fn render(frame: &mut Frame, _state: &AppState, area: Rect) {
    let theme = get_theme();

    // Split into columns
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left column - Navigation & Library
    let left_content = vec![
        section_header("Navigation", &theme),
        keybind("j / Down", "Move down", &theme),
        keybind("k / Up", "Move up", &theme),
        keybind("g", "Go to top", &theme),
        keybind("G", "Go to bottom", &theme),
        keybind("Ctrl+d", "Page down", &theme),
        keybind("Ctrl+u", "Page up", &theme),
        keybind("h / Left", "Previous screen", &theme),
        keybind("l / Right", "Next screen", &theme),
        keybind("Tab", "Next screen", &theme),
        keybind("1-3", "Go to screen", &theme),
        Line::default(),
        section_header("Library", &theme),
        keybind("Enter", "Open song lyrics", &theme),
        keybind("Space / p", "Play or stop preview", &theme),
        keybind("f", "Toggle favorite", &theme),
        keybind("v", "Show favorites only", &theme),
        keybind("x / Del", "Remove song", &theme),
    ];

    let left_para = Paragraph::new(left_content).wrap(Wrap { trim: false });
    frame.render_widget(left_para, cols[0]);

    // Right column - Search, Lyrics & General
    let right_content = vec![
        section_header("Search", &theme),
        keybind("Enter", "Run search / save result", &theme),
        keybind("Space / p", "Preview result", &theme),
        keybind("/ or i", "Return to query box", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
        keybind("Down", "Focus results", &theme),
        Line::default(),
        section_header("Lyrics view", &theme),
        keybind("j / k", "Scroll", &theme),
        keybind("r", "Retry fetch", &theme),
        keybind("Esc", "Back to library", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("q", "Quit application", &theme),
        keybind("Ctrl+r / F5", "Refresh current screen", &theme),
    ];

    let right_para = Paragraph::new(right_content).wrap(Wrap { trim: false });
    frame.render_widget(right_para, cols[1]);
}

fn section_header(title: &str, theme: &crate::tui::theme::Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &crate::tui::theme::Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            desc.to_string(),
            Style::default().fg(theme.palette.fg_primary),
        ),
    ])
}
