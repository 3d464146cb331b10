//! Song list widget - renders Library and Search lists with virtual scrolling

use crate::app::state::{AppState, Screen, SearchFocus};
use crate::config::Config;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the search input box
pub fn render_search_box(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();

    let is_focused = state.search_focus == SearchFocus::Input;
    let border_color = if is_focused {
        theme.palette.accent
    } else {
        theme.palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(" Query ")
        .title_style(Style::default().fg(theme.palette.accent));

    let prompt = if state.search_list.loading {
        let spinner = LoadingSpinner::frame(state.tick);
        format!("{} {}", state.search_query, spinner)
    } else {
        let cursor = if is_focused { "▏" } else { "" };
        format!("{}{}", state.search_query, cursor)
    };

    let p = Paragraph::new(Line::from(prompt))
        .style(Style::default().fg(theme.palette.fg_primary))
        .block(block);
    frame.render_widget(p, area);
}

/// Render the active song list (called within an existing block area)
pub fn render(frame: &mut Frame, _cfg: &Config, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;
    let list_state = state.active_list();

    if list_state.loading {
        let spinner = LoadingSpinner::frame(state.tick);
        let loading = Paragraph::new(Line::from(format!("{} Loading...", spinner)))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, area);
        return;
    }

    if list_state.songs.is_empty() {
        let empty_msg = match state.screen {
            Screen::Search if list_state.loaded => "No matches. Try another query.",
            Screen::Search => "Search for music above",
            _ => "No songs",
        };
        let empty = Paragraph::new(Line::from(empty_msg))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, area);
        return;
    }

    // Virtual scroll: only render visible rows
    let visible_height = area.height as usize;
    let scroll_offset = list_state.scroll_offset;

    let end_idx = (scroll_offset + visible_height).min(list_state.songs.len());

    let mut items: Vec<ListItem> = list_state
        .songs
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, song)| {
            let is_selected = i == list_state.selected;
            let is_playing = state.playing_song_id == Some(song.id);

            let base_style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };

            let marker = if is_playing {
                Span::styled(icons.note, Style::default().fg(theme.palette.playing))
            } else if song.is_favorite {
                Span::styled(icons.favorite, Style::default().fg(theme.palette.favorite))
            } else {
                Span::raw(" ")
            };

            let label = list_state
                .items
                .get(i)
                .map(|s| s.as_str())
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                marker,
                Span::raw(" "),
                Span::styled(label, base_style),
            ]))
        })
        .collect();

    // Hint when the API capped the page.
    if state.screen == Screen::Search
        && state.search_has_more
        && end_idx >= list_state.songs.len()
    {
        let total = state
            .search_total
            .map(|t| format!(" of {t}"))
            .unwrap_or_default();
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {} matches shown{}; refine your query", list_state.songs.len(), total),
            Style::default().fg(theme.palette.fg_secondary),
        ))));
    }

    let adjusted_selected = list_state.selected.saturating_sub(scroll_offset);
    let mut ratatui_list_state = ListState::default();
    ratatui_list_state.select(Some(adjusted_selected));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{f054} "); // nf-fa-chevron_right

    frame.render_stateful_widget(list, area, &mut ratatui_list_state);

    // Scroll position indicator in the top-right corner
    if list_state.songs.len() > visible_height {
        let pos_text = format!("{}/{}", list_state.selected + 1, list_state.songs.len());
        let pos_len = pos_text.len() as u16;
        let pos_x = area.x + area.width.saturating_sub(pos_len);
        if pos_x > area.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, area.y, pos_len, 1),
            );
        }
    }
}
