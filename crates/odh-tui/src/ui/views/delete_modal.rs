use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::components::{modal_area, render_modal_background, render_modal_header};
use crate::ui::layout;
use crate::ui::theme;
use crate::ui::App;

pub const DELETE_TITLE: &str = "Delete connection type?";

pub fn render_delete_modal(f: &mut Frame, app: &App, terminal_area: Rect) {
    let Some(prompt) = app.delete.prompt() else {
        return;
    };

    let area = modal_area(terminal_area, layout::MODAL_DEFAULT_WIDTH, 10);
    render_modal_background(f, area);

    let hint = if app.delete.is_deleting() { "" } else { "esc" };
    let body_area = render_modal_header(f, area, DELETE_TITLE, hint);
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(layout::with_modal_padding(body_area));

    f.render_widget(
        Paragraph::new(Text::from(prompt))
            .style(theme::text_primary())
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    if let Some(error) = app.delete.error() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("✗ {}", error),
                theme::status_error(),
            ))),
            chunks[1],
        );
    }

    let footer = if app.delete.is_deleting() {
        Line::from(Span::styled("Deleting...", theme::status_pending()))
    } else {
        Line::from(vec![
            Span::styled("y", theme::status_error()),
            Span::styled(" delete   ", theme::text_muted()),
            Span::styled("n", theme::text_primary()),
            Span::styled(" cancel", theme::text_muted()),
        ])
    };
    f.render_widget(Paragraph::new(footer), chunks[2]);
}
