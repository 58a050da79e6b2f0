use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use odh_core::constants::PRE_INSTALLED_USERNAME;
use odh_core::models::{created_label, FilterType};
use odh_core::{ConnectionType, ToggleStatus};

use crate::ui::components::statusbar::truncate_with_ellipsis;
use crate::ui::layout;
use crate::ui::theme;
use crate::ui::{App, InputMode};

pub const PAGE_TITLE: &str = "Connection types";
pub const PAGE_DESCRIPTION: &str =
    "Manage the connection types users can pick from when they create connections.";

/// Header, filter toolbar, table (or empty state) and the selected row's error detail
pub fn render_connection_types(f: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Length(layout::TOOLBAR_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::DETAIL_HEIGHT),
    ])
    .split(layout::with_content_padding(area));

    render_header(f, chunks[0]);
    render_toolbar(f, app, chunks[1]);

    if !app.poll.loaded {
        render_unloaded(f, app, chunks[2]);
        return;
    }
    if app.poll.data.is_empty() {
        render_message(
            f,
            chunks[2],
            "No connection types found",
            "Connection types appear here once an administrator creates them.",
        );
        return;
    }

    let rows = app.visible_rows();
    if rows.is_empty() {
        render_message(
            f,
            chunks[2],
            "No results found",
            "Adjust your filters and try again. Press c to clear all filters.",
        );
        return;
    }

    render_table(f, app, &rows, chunks[2], now);
    render_error_detail(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(Span::styled(PAGE_TITLE, theme::title())),
        Line::from(Span::styled(PAGE_DESCRIPTION, theme::text_muted())),
    ]);
    f.render_widget(Paragraph::new(text), area);
}

fn render_toolbar(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Filter;
    let value = app.filter_value();

    let mut spans = vec![
        Span::styled(format!("[{}] ", app.filter_type.label()), theme::status_info()),
    ];
    if value.is_empty() && !editing {
        spans.push(Span::styled(
            format!("Filter by {}", app.filter_type.label().to_lowercase()),
            theme::text_dim(),
        ));
    } else {
        let style = if editing {
            theme::input_active()
        } else {
            theme::text_primary()
        };
        spans.push(Span::styled(value.to_string(), style));
        if editing {
            spans.push(Span::styled("▏", theme::input_active()));
        }
    }

    // Filters that aren't being shown in the input still narrow the table
    for (filter_type, active) in [
        (FilterType::Keyword, app.filter.keyword.as_deref()),
        (FilterType::CreatedBy, app.filter.created_by.as_deref()),
    ] {
        if filter_type == app.filter_type {
            continue;
        }
        if let Some(active) = active {
            spans.push(Span::styled(
                format!("  {}: {}", filter_type.label(), active),
                theme::text_muted(),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_unloaded(f: &mut Frame, app: &App, area: Rect) {
    match &app.poll.load_error {
        Some(err) => render_message(f, area, "Unable to load connection types", &err.detail()),
        None => render_message(f, area, "Loading connection types...", ""),
    }
}

fn render_message(f: &mut Frame, area: Rect, title: &str, body: &str) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), theme::title())),
        Line::from(Span::styled(body.to_string(), theme::text_muted())),
    ]);
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), area);
}

fn render_table(
    f: &mut Frame,
    app: &App,
    rows: &[&ConnectionType],
    area: Rect,
    now: DateTime<Utc>,
) {
    let name_width = area.width.saturating_sub(
        layout::CREATOR_COLUMN_WIDTH + layout::CREATED_COLUMN_WIDTH + layout::ENABLED_COLUMN_WIDTH + 6,
    ) as usize;

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, ct)| {
            let is_selected = i == app.selected;
            let name_style = if is_selected {
                theme::text_primary().add_modifier(Modifier::BOLD)
            } else {
                theme::text_primary()
            };

            let mut name_lines = vec![Line::from(Span::styled(
                truncate_with_ellipsis(ct.display_name(), name_width),
                name_style,
            ))];
            if let Some(description) = ct.description().filter(|d| !d.is_empty()) {
                name_lines.push(Line::from(Span::styled(
                    truncate_with_ellipsis(description, name_width),
                    theme::text_muted(),
                )));
            }

            let creator = if ct.is_pre_installed() {
                Span::styled(format!(" {} ", PRE_INSTALLED_USERNAME), theme::label())
            } else {
                Span::styled(ct.creator().to_string(), theme::text_primary())
            };

            let created = created_label(now, ct.created_at());

            let row_style = if is_selected {
                theme::row_selected()
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(Text::from(name_lines)),
                Cell::from(Line::from(creator)),
                Cell::from(created).style(theme::text_muted()),
                Cell::from(enabled_line(app, ct)),
            ])
            .height(2)
            .style(row_style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Name").style(theme::header_cell()),
        Cell::from("Creator").style(theme::header_cell()),
        Cell::from("Created").style(theme::header_cell()),
        Cell::from("Enabled").style(theme::header_cell()),
    ])
    .style(Style::default().bg(theme::BG_SECONDARY))
    .height(1);

    let widths = [
        Constraint::Min(20),
        Constraint::Length(layout::CREATOR_COLUMN_WIDTH),
        Constraint::Length(layout::CREATED_COLUMN_WIDTH),
        Constraint::Length(layout::ENABLED_COLUMN_WIDTH),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .column_spacing(2);
    let mut state = TableState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

/// Switch, optional status message, and a marker when an error detail exists
fn enabled_line(app: &App, ct: &ConnectionType) -> Line<'static> {
    let row = app.board.row(ct.name());
    let on = row.map(|r| r.displayed_value()).unwrap_or_else(|| ct.enabled());

    let mut spans = if on {
        vec![Span::styled("● On ", theme::switch_on())]
    } else {
        vec![Span::styled("○ Off", theme::switch_off())]
    };

    if let Some(row) = row {
        if let Some(status) = row.status() {
            let style = match status {
                ToggleStatus::Failed => theme::status_error(),
                ToggleStatus::Enabling | ToggleStatus::Disabling => theme::status_pending(),
            };
            spans.push(Span::styled(format!(" {}", status.message()), style));
        }
        if row.error_message().is_some() {
            spans.push(Span::styled(" (!)", theme::status_error()));
        }
    }
    Line::from(spans)
}

fn render_error_detail(f: &mut Frame, app: &App, area: Rect) {
    let Some(ct) = app.selected_row() else {
        return;
    };
    let Some(error) = app.error_detail(ct.name()) else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("(!) ", theme::status_error()),
        Span::styled(
            truncate_with_ellipsis(error, (area.width as usize).saturating_sub(20)),
            theme::status_error(),
        ),
        Span::styled("  e to dismiss", theme::text_dim()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
