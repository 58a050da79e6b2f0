// Layout constants shared by the dashboard views

use ratatui::layout::Rect;

/// Horizontal padding for the main content area (left + right)
pub const CONTENT_PADDING_H: u16 = 2;

/// Horizontal padding inside modals
pub const MODAL_PADDING_H: u16 = 2;

/// Page title plus description line
pub const HEADER_HEIGHT: u16 = 3;

/// Filter toolbar
pub const TOOLBAR_HEIGHT: u16 = 2;

/// Error detail for the selected row
pub const DETAIL_HEIGHT: u16 = 1;

/// Key hints
pub const FOOTER_HEIGHT: u16 = 1;

pub const STATUSBAR_HEIGHT: u16 = 1;

pub const MODAL_DEFAULT_WIDTH: u16 = 64;

/// Table column widths; the name column takes the rest
pub const CREATOR_COLUMN_WIDTH: u16 = 20;
pub const CREATED_COLUMN_WIDTH: u16 = 16;
pub const ENABLED_COLUMN_WIDTH: u16 = 22;

#[inline]
pub fn with_horizontal_padding(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y,
        width: area.width.saturating_sub(padding * 2),
        height: area.height,
    }
}

#[inline]
pub fn with_content_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, CONTENT_PADDING_H)
}

#[inline]
pub fn with_modal_padding(area: Rect) -> Rect {
    with_horizontal_padding(area, MODAL_PADDING_H)
}
