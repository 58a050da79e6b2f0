// Bottom status bar: current notification on the left, refresh health on the right

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::ui::notifications::{Notification, NotificationLevel};
use crate::ui::theme;

const STALE_LABEL: &str = "⚠ refresh failed ";
const LIVE_LABEL: &str = "● live ";

pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    current_notification: Option<&Notification>,
    refresh_failing: bool,
) {
    let health = if refresh_failing { STALE_LABEL } else { LIVE_LABEL };
    let health_width = (health.width() + 1) as u16;
    let chunks =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(health_width)]).split(area);

    let notification_paragraph = match current_notification {
        Some(notification) => {
            let color = match notification.level {
                NotificationLevel::Info => theme::ACCENT_PRIMARY,
                NotificationLevel::Success => theme::ACCENT_SUCCESS,
                NotificationLevel::Warning => theme::ACCENT_WARNING,
                NotificationLevel::Error => theme::ACCENT_ERROR,
            };
            let icon = notification.level.icon();
            let available = (chunks[0].width as usize).saturating_sub(icon.width() + 2);
            let message = truncate_with_ellipsis(&notification.message, available);
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {} ", icon), Style::default().fg(color)),
                Span::styled(message, Style::default().fg(color)),
            ]))
        }
        None => Paragraph::new(""),
    };
    f.render_widget(
        notification_paragraph.style(Style::default().bg(theme::BG_SECONDARY)),
        chunks[0],
    );

    let health_style = if refresh_failing {
        theme::status_error()
    } else {
        theme::status_success()
    };
    let padding = (chunks[1].width as usize).saturating_sub(health.width());
    f.render_widget(
        Paragraph::new(format!("{}{}", " ".repeat(padding), health))
            .style(health_style.bg(theme::BG_SECONDARY)),
        chunks[1],
    );
}

/// Grapheme-aware truncation with a trailing "..."
pub(crate) fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return take_width(s, max_width);
    }
    format!("{}...", take_width(s, max_width - 3))
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let w = grapheme.width();
        if width + w > max_width {
            break;
        }
        result.push_str(grapheme);
        width += w;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_with_ellipsis("S3 enabled", 20), "S3 enabled");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Refresh failed: timeout", 10), "Refresh...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "ab");
        assert_eq!(truncate_with_ellipsis("abcdef", 0), "");
    }
}
