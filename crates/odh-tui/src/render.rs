use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::components::render_statusbar;
use crate::ui::layout;
use crate::ui::theme;
use crate::ui::views::{render_connection_types, render_delete_modal};
use crate::ui::{App, InputMode};

pub(crate) fn render(f: &mut Frame, app: &App, now: DateTime<Utc>) {
    let bg_block = Block::default().style(Style::default().bg(theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(f.area());

    render_connection_types(f, app, chunks[0], now);
    render_footer(f, app, chunks[1]);

    let refresh_failing = app.poll.loaded && app.poll.load_error.is_some();
    render_statusbar(f, chunks[2], app.notifications.current(), refresh_failing);

    if app.delete.is_open() {
        render_delete_modal(f, app, f.area());
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Filter => &[("enter", "apply"), ("esc", "clear"), ("tab", "filter type")],
        InputMode::Normal => &[
            ("↑↓", "select"),
            ("space", "toggle"),
            ("d", "delete"),
            ("/", "filter"),
            ("tab", "filter type"),
            ("c", "clear filters"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), theme::text_primary()));
        spans.push(Span::styled(format!(" {}  ", label), theme::text_dim()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        layout::with_content_padding(area),
    );
}
