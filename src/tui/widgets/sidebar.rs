use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(" fret ")
        .title_style(Style::default().fg(theme.palette.accent));

    let menu_items = [
        (icons.library, "Library"),
        (icons.search, "Search"),
        (icons.help, "Help"),
    ];

    let items: Vec<ListItem> = menu_items
        .iter()
        .enumerate()
        .map(|(i, (icon, label))| {
            let is_selected = i == state.sidebar_selected;

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };

            let icon_style = if is_selected {
                Style::default().fg(theme.palette.accent)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };

            let prefix = if is_selected {
                icons.selected
            } else {
                icons.unselected
            };

            ListItem::new(Line::from(vec![
                Span::styled(prefix, icon_style),
                Span::raw(" "),
                Span::styled(*icon, icon_style),
                Span::raw(" "),
                Span::styled(*label, style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.sidebar_selected.min(2)));

    let list = List::new(items).block(block).highlight_symbol("");

    frame.render_stateful_widget(list, area, &mut list_state);
}
