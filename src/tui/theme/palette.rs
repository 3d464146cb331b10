//! Color palette - warm amber on near-black

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub playing: Color,
    pub favorite: Color,
    pub error: Color,
}

impl Palette {
    /// Amber palette - warm stage-light tones
    pub const AMBER: Self = Self {
        bg_primary: Color::Rgb(16, 12, 8),        // #100c08 warm black
        bg_secondary: Color::Rgb(28, 22, 14),     // #1c160e
        bg_highlight: Color::Rgb(56, 44, 28),     // #382c1c
        fg_primary: Color::Rgb(240, 232, 216),    // #f0e8d8 warm white
        fg_secondary: Color::Rgb(150, 134, 110),  // #96866e faded tan
        accent: Color::Rgb(255, 176, 46),         // #ffb02e amber
        accent_alt: Color::Rgb(214, 148, 62),     // #d6943e burnt amber
        border: Color::Rgb(82, 66, 44),           // #52422c
        playing: Color::Rgb(178, 220, 120),       // #b2dc78 soft green
        favorite: Color::Rgb(232, 106, 100),      // #e86a64 muted red
        error: Color::Rgb(232, 106, 100),         // #e86a64
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::AMBER
    }
}
