use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Screen, SearchFocus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                match event::read() {
                    Ok(CtEvent::Key(k)) => {
                        if k.kind == KeyEventKind::Press
                            && tx.blocking_send(Event::Input(InputEvent::Key(k))).is_err()
                        {
                            break;
                        }
                    }
                    Ok(CtEvent::Mouse(m)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Mouse(m))).is_err() {
                            break;
                        }
                    }
                    Ok(CtEvent::Resize(_, _)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Resize)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {}
                }
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp if state.detail.is_open() => Some(Action::DetailScrollUp),
            MouseEventKind::ScrollDown if state.detail.is_open() => Some(Action::DetailScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => match state.screen {
            Screen::Library if state.detail.is_open() => handle_detail_view(k),
            Screen::Library => handle_library_screen(k),
            Screen::Search => handle_search_screen(state, k),
            Screen::Help => handle_help_screen(k),
        },
    }
}

fn handle_library_screen(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        // Navigation - vim style
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),

        // Sidebar navigation
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),

        // Screen switching
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Library)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Search)),
        KeyCode::Char('3') => Some(Action::SetScreen(Screen::Help)),

        // Library actions
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePreview),
        KeyCode::Char('f') => Some(Action::ToggleFavorite),
        KeyCode::Char('v') => Some(Action::ToggleFavoritesFilter),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::RemoveSelected),

        KeyCode::Char('r') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Refresh),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::SetScreen(Screen::Help)),

        _ => None,
    }
}

fn handle_detail_view(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc | KeyCode::Backspace => Some(Action::CloseDetail),
        KeyCode::Char('q') => Some(Action::Quit),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::DetailScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::DetailScrollDown),

        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePreview),
        KeyCode::Char('f') => Some(Action::ToggleFavorite),
        KeyCode::Char('r') => Some(Action::RetryLyrics),

        _ => None,
    }
}

fn handle_search_screen(state: &AppState, k: crossterm::event::KeyEvent) -> Option<Action> {
    match state.search_focus {
        SearchFocus::Input => match k.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Tab => Some(Action::NextScreen),
            KeyCode::BackTab => Some(Action::PrevScreen),
            KeyCode::Enter => Some(Action::StartSearch),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Down if !state.search_list.songs.is_empty() => {
                Some(Action::SetSearchFocus(SearchFocus::Results))
            }
            KeyCode::Left => Some(Action::SidebarUp),
            KeyCode::Right => Some(Action::SidebarDown),
            KeyCode::F(5) => Some(Action::Refresh),
            KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearInput)
            }
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
        SearchFocus::Results => match k.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('i') => {
                Some(Action::SetSearchFocus(SearchFocus::Input))
            }
            KeyCode::Tab => Some(Action::NextScreen),
            KeyCode::BackTab => Some(Action::PrevScreen),

            KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
            KeyCode::Char('g') => Some(Action::GoTop),
            KeyCode::Char('G') => Some(Action::GoBottom),
            KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),

            // Save the selected result; preview before saving with Space.
            KeyCode::Enter => Some(Action::Activate),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePreview),

            KeyCode::Char('r') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Refresh)
            }
            _ => None,
        },
    }
}

fn handle_help_screen(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextScreen),
        KeyCode::BackTab => Some(Action::PrevScreen),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SidebarUp),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SidebarDown),
        KeyCode::Char('1') => Some(Action::SetScreen(Screen::Library)),
        KeyCode::Char('2') => Some(Action::SetScreen(Screen::Search)),
        _ => None,
    }
}
