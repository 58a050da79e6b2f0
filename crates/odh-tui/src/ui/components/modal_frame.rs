use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::layout;
use crate::ui::theme;

/// Centered modal of at most `max_width` columns and exactly `height` rows
pub fn modal_area(terminal_area: Rect, max_width: u16, height: u16) -> Rect {
    let width = max_width.min(terminal_area.width.saturating_sub(4));
    let height = height.min(terminal_area.height);
    let x = terminal_area.x + terminal_area.width.saturating_sub(width) / 2;
    let y = terminal_area.y + terminal_area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Clear the area and fill it with the modal background
pub fn render_modal_background(f: &mut Frame, area: Rect) {
    f.render_widget(Clear, area);
    let bg_block = Block::default().style(Style::default().bg(theme::BG_MODAL));
    f.render_widget(bg_block, area);
}

/// Title on the left, hint on the right. Returns the area below the header.
pub fn render_modal_header(f: &mut Frame, area: Rect, title: &str, hint: &str) -> Rect {
    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(area);
    let header_area = layout::with_modal_padding(chunks[0]);

    let spacing = (header_area.width as usize).saturating_sub(title.width() + hint.width());
    let header_line = Line::from(vec![
        Span::styled(title, theme::modal_title()),
        Span::raw(" ".repeat(spacing)),
        Span::styled(hint, theme::modal_hint()),
    ]);
    f.render_widget(Paragraph::new(header_line), header_area);

    chunks[1]
}
