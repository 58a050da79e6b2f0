// Centralized theme for the connection-types dashboard
// All colors and styles live here so views never hardcode them

use ratatui::style::{Color, Modifier, Style};

// -----------------------------------------------------------------------------
// Backgrounds
// -----------------------------------------------------------------------------

pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected row background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Table header and toolbar background
pub const BG_SECONDARY: Color = Color::Rgb(23, 23, 23);

/// Modal background, slightly lifted from the app
pub const BG_MODAL: Color = Color::Rgb(24, 24, 28);

// -----------------------------------------------------------------------------
// Text
// -----------------------------------------------------------------------------

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);
pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// -----------------------------------------------------------------------------
// Accents
// -----------------------------------------------------------------------------

pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);
pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);
pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);
pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

// -----------------------------------------------------------------------------
// Composite styles
// -----------------------------------------------------------------------------

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn header_cell() -> Style {
    Style::default().fg(TEXT_MUTED).add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn row_selected() -> Style {
    Style::default().bg(BG_SELECTED)
}

/// "Pre-installed" creator label
pub fn label() -> Style {
    Style::default().fg(ACCENT_SPECIAL).add_modifier(Modifier::BOLD)
}

pub fn switch_on() -> Style {
    Style::default()
        .fg(ACCENT_SUCCESS)
        .add_modifier(Modifier::BOLD)
}

pub fn switch_off() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn status_pending() -> Style {
    Style::default().fg(ACCENT_WARNING)
}

pub fn status_error() -> Style {
    Style::default().fg(ACCENT_ERROR)
}

pub fn status_success() -> Style {
    Style::default().fg(ACCENT_SUCCESS)
}

pub fn status_info() -> Style {
    Style::default().fg(ACCENT_PRIMARY)
}

pub fn input_active() -> Style {
    Style::default().fg(TEXT_PRIMARY).bg(BG_SECONDARY)
}

pub fn modal_title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn modal_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}
