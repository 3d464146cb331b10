use super::state::{Screen, SearchFocus};

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NextScreen,
    PrevScreen,
    SetScreen(Screen),
    SetSearchFocus(SearchFocus),

    SidebarUp,
    SidebarDown,
    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,

    InputChar(char),
    Backspace,
    ClearInput,
    StartSearch,

    /// Library: open the detail view. Search: save the selected result.
    Activate,
    /// Play the selected song's preview, or stop it if it is playing.
    TogglePreview,
    ToggleFavorite,
    ToggleFavoritesFilter,
    RemoveSelected,

    CloseDetail,
    RetryLyrics,
    DetailScrollUp,
    DetailScrollDown,

    Refresh,
    Resize,
}
