//! Nerd Font icons for TUI display
//! Requires a Nerd Font to be installed (https://www.nerdfonts.com)

/// Icon set using Nerd Font glyphs
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Icons {
    // Playback
    pub play: &'static str,
    pub pause: &'static str,
    pub stop: &'static str,

    // Navigation
    pub search: &'static str,
    pub library: &'static str,
    pub help: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,
    pub loading: &'static str,

    // Music
    pub music: &'static str,
    pub artist: &'static str,
    pub lyrics: &'static str,
    pub favorite: &'static str,
    pub favorite_outline: &'static str,
    pub note: &'static str,

    // Selection
    pub selected: &'static str,
    pub unselected: &'static str,

    // Separators
    pub bullet: &'static str,
}

impl Icons {
    /// Nerd Font icon set
    pub const fn nerd() -> Self {
        Self {
            play: "\u{f04b}",             // nf-fa-play
            pause: "\u{f04c}",            // nf-fa-pause
            stop: "\u{f04d}",             // nf-fa-stop

            search: "\u{f002}",           // nf-fa-search
            library: "\u{f02d}",          // nf-fa-book
            help: "\u{f059}",             // nf-fa-question_circle

            success: "\u{f00c}",          // nf-fa-check
            error: "\u{f00d}",            // nf-fa-times
            loading: "\u{f110}",          // nf-fa-spinner

            music: "\u{f001}",            // nf-fa-music
            artist: "\u{f007}",           // nf-fa-user
            lyrics: "\u{f15c}",           // nf-fa-file_text_o
            favorite: "\u{f004}",         // nf-fa-heart
            favorite_outline: "\u{f08a}", // nf-fa-heart_o
            note: "♪",

            selected: "\u{f054}",         // nf-fa-chevron_right
            unselected: " ",

            bullet: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::nerd()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 4) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
