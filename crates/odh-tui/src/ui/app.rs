use std::collections::HashMap;
use std::sync::Arc;

use odh_core::models::FilterType;
use odh_core::{
    ConnectionType, CoreResult, DeleteConfirmation, DeleteFinish, DeleteTarget, FilterData,
    PollState, ResponseStatus, ToggleBoard, ToggleOutcome, ToggleTicket,
};

use crate::ui::notifications::{Notification, NotificationQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the toolbar filter
    Filter,
}

/// Side effects the runtime performs on behalf of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Toggle { name: String, ticket: ToggleTicket },
    Delete { name: String },
    Refresh,
}

/// Completed backend requests, routed back into the UI loop
#[derive(Debug)]
pub enum RequestResult {
    Toggled {
        name: String,
        ticket: ToggleTicket,
        result: CoreResult<ResponseStatus>,
    },
    Deleted {
        result: CoreResult<ResponseStatus>,
    },
}

pub struct App {
    pub running: bool,
    pub input_mode: InputMode,
    /// Last state seen from the poller
    pub poll: PollState,
    pub board: ToggleBoard,
    pub filter: FilterData,
    pub filter_type: FilterType,
    pub selected: usize,
    pub delete: DeleteConfirmation,
    pub notifications: NotificationQueue,
    /// Rows whose error detail was dismissed, by the toggle generation that
    /// failed. A later failure on the same row shows again.
    dismissed_errors: HashMap<String, u64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            poll: PollState::default(),
            board: ToggleBoard::new(),
            filter: FilterData::default(),
            filter_type: FilterType::Keyword,
            selected: 0,
            delete: DeleteConfirmation::new(),
            notifications: NotificationQueue::new(),
            dismissed_errors: HashMap::new(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // ===== Poll reconciliation =====

    /// Take a new poller state. Rows are reconciled against every successful
    /// fetch, even one that returned the same data; a new load error raises
    /// a non-blocking warning.
    pub fn apply_poll_state(&mut self, state: PollState) {
        let data_changed = !state.data.ptr_eq(&self.poll.data);
        let fresh_fetch = state.fetch_count != self.poll.fetch_count;
        let new_error = match (&state.load_error, &self.poll.load_error) {
            (Some(new), Some(old)) => !Arc::ptr_eq(new, old),
            (Some(_), None) => true,
            _ => false,
        };

        if new_error && state.loaded {
            if let Some(err) = &state.load_error {
                self.notifications
                    .push(Notification::warning(format!("Refresh failed: {}", err.detail())));
            }
        }
        self.poll = state;

        if data_changed || fresh_fetch {
            let reconciled = self.board.apply_snapshot(&self.poll.data);
            for name in reconciled {
                if let Some(ct) = self.poll.data.find(&name) {
                    let verb = if ct.enabled() { "enabled" } else { "disabled" };
                    self.notifications
                        .push(Notification::success(format!("{} {}", ct.display_name(), verb)));
                }
            }
            let board = &self.board;
            self.dismissed_errors.retain(|name, generation| {
                board
                    .row(name)
                    .is_some_and(|row| row.generation() == *generation)
            });
        }
        if data_changed {
            self.clamp_selection();
        }
    }

    // ===== Rows & selection =====

    /// Rows after filtering, sorted by display name
    pub fn visible_rows(&self) -> Vec<&ConnectionType> {
        self.filter.apply(&self.poll.data)
    }

    pub fn selected_row(&self) -> Option<&ConnectionType> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Error text to show under the table for row `name`, unless dismissed
    pub fn error_detail(&self, name: &str) -> Option<&str> {
        let row = self.board.row(name)?;
        if self.dismissed_errors.get(name) == Some(&row.generation()) {
            return None;
        }
        row.error_message()
    }

    /// Hide or re-show the selected row's error detail
    pub fn toggle_error_detail(&mut self) {
        let Some(name) = self.selected_row().map(|ct| ct.name().to_string()) else {
            return;
        };
        let Some(row) = self.board.row(&name) else {
            return;
        };
        if row.error_message().is_none() {
            return;
        }
        let generation = row.generation();
        if self.dismissed_errors.get(&name) == Some(&generation) {
            self.dismissed_errors.remove(&name);
        } else {
            self.dismissed_errors.insert(name, generation);
        }
    }

    // ===== Toggle =====

    /// Flip the selected row's switch
    pub fn toggle_selected(&mut self) -> Option<Action> {
        let name = self.selected_row()?.name().to_string();
        let ticket = self.board.toggle_displayed(&name)?;
        Some(Action::Toggle { name, ticket })
    }

    pub fn request_refresh(&mut self) -> Option<Action> {
        self.notifications
            .push(Notification::info("Refreshing connection types"));
        Some(Action::Refresh)
    }

    // ===== Delete =====

    pub fn request_delete(&mut self) {
        if let Some(target) = self.selected_row().map(DeleteTarget::from) {
            self.delete.request(target);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Action> {
        self.delete.confirm().map(|name| Action::Delete { name })
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    // ===== Request results =====

    pub fn on_request_result(&mut self, result: RequestResult) -> Option<Action> {
        match result {
            RequestResult::Toggled {
                name,
                ticket,
                result,
            } => match self.board.complete(&name, ticket, result) {
                ToggleOutcome::Accepted => Some(Action::Refresh),
                ToggleOutcome::Failed => {
                    let detail = self
                        .board
                        .row(&name)
                        .and_then(|row| row.error_message())
                        .unwrap_or("request failed")
                        .to_string();
                    self.notifications
                        .push(Notification::error(format!("{}: {}", name, detail)));
                    None
                }
                ToggleOutcome::Stale => None,
            },
            RequestResult::Deleted { result } => match self.delete.finish(result) {
                DeleteFinish::Deleted(name) => {
                    self.notifications
                        .push(Notification::success(format!("Deleted {}", name)));
                    Some(Action::Refresh)
                }
                // The confirmation stays open and shows the error itself
                DeleteFinish::Failed(_) | DeleteFinish::Ignored => None,
            },
        }
    }

    // ===== Filter toolbar =====

    pub fn start_filter_input(&mut self) {
        self.input_mode = InputMode::Filter;
    }

    pub fn finish_filter_input(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave the input and drop the filter being typed
    pub fn cancel_filter_input(&mut self) {
        self.filter.set(self.filter_type, None);
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn filter_value(&self) -> &str {
        self.filter.get(self.filter_type).unwrap_or("")
    }

    pub fn push_filter_char(&mut self, c: char) {
        let mut value = self.filter_value().to_string();
        value.push(c);
        self.filter.set(self.filter_type, Some(value));
        self.selected = 0;
    }

    pub fn pop_filter_char(&mut self) {
        let mut value = self.filter_value().to_string();
        value.pop();
        self.filter.set(self.filter_type, Some(value));
        self.selected = 0;
    }

    pub fn cycle_filter_type(&mut self) {
        self.filter_type = self.filter_type.cycle_next();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odh_core::{CoreError, ResourceSnapshot};

    fn state(items: Vec<ConnectionType>) -> PollState {
        PollState {
            data: ResourceSnapshot::new(items),
            loaded: true,
            load_error: None,
            fetch_count: 1,
        }
    }

    /// Next poll result carrying the same data as the last one
    fn unchanged_refresh(app: &App) -> PollState {
        let mut next = app.poll.clone();
        next.fetch_count += 1;
        next
    }

    fn loaded_app(items: Vec<ConnectionType>) -> App {
        let mut app = App::new();
        app.apply_poll_state(state(items));
        app
    }

    #[test]
    fn test_toggle_then_reconcile() {
        let mut app = loaded_app(vec![ConnectionType::new("a").with_enabled(false)]);

        let action = app.toggle_selected().unwrap();
        let Action::Toggle { name, ticket } = action else {
            panic!("expected toggle action");
        };
        assert_eq!(name, "a");
        assert!(ticket.requested_value);
        assert_eq!(app.board.row("a").unwrap().status_message(), Some("Enabling..."));

        let follow_up = app.on_request_result(RequestResult::Toggled {
            name: name.clone(),
            ticket,
            result: Ok(ResponseStatus::ok()),
        });
        assert_eq!(follow_up, Some(Action::Refresh));

        app.apply_poll_state(state(vec![ConnectionType::new("a").with_enabled(true)]));
        let row = app.board.row("a").unwrap();
        assert_eq!(row.status_message(), None);
        assert!(row.displayed_value());
        assert_eq!(app.notifications.current().unwrap().message, "a enabled");
    }

    #[test]
    fn test_double_toggle_reconciles_on_unchanged_refresh() {
        let mut app = loaded_app(vec![ConnectionType::new("a").with_enabled(true)]);

        let Some(Action::Toggle { ticket: first, .. }) = app.toggle_selected() else {
            panic!("expected toggle action");
        };
        assert!(!first.requested_value);
        let Some(Action::Toggle { name, ticket: second }) = app.toggle_selected() else {
            panic!("expected toggle action");
        };
        assert!(second.requested_value);

        app.on_request_result(RequestResult::Toggled {
            name: name.clone(),
            ticket: second,
            result: Ok(ResponseStatus::ok()),
        });
        assert_eq!(app.board.row("a").unwrap().status_message(), Some("Enabling..."));

        let previous = app.poll.data.clone();
        app.apply_poll_state(unchanged_refresh(&app));
        assert!(app.poll.data.ptr_eq(&previous));
        let row = app.board.row("a").unwrap();
        assert_eq!(row.status_message(), None);
        assert!(row.displayed_value());

        // The superseded disable landing afterwards changes nothing
        app.on_request_result(RequestResult::Toggled {
            name,
            ticket: first,
            result: Ok(ResponseStatus::rejected("late")),
        });
        assert_eq!(app.board.row("a").unwrap().status_message(), None);
    }

    #[test]
    fn test_dismissed_error_stays_hidden_across_selection_moves() {
        let mut app = loaded_app(vec![
            ConnectionType::new("a").with_display_name("Alpha").with_enabled(true),
            ConnectionType::new("b").with_display_name("Beta"),
        ]);
        let Some(Action::Toggle { name, ticket }) = app.toggle_selected() else {
            panic!("expected toggle action");
        };
        app.on_request_result(RequestResult::Toggled {
            name,
            ticket,
            result: Ok(ResponseStatus::rejected("X")),
        });
        assert_eq!(app.error_detail("a"), Some("X"));

        app.toggle_error_detail();
        assert_eq!(app.error_detail("a"), None);
        app.select_next();
        app.select_prev();
        app.apply_poll_state(unchanged_refresh(&app));
        assert_eq!(app.error_detail("a"), None);

        // A new failure on the same row is shown again
        let Some(Action::Toggle { name, ticket }) = app.toggle_selected() else {
            panic!("expected toggle action");
        };
        app.on_request_result(RequestResult::Toggled {
            name,
            ticket,
            result: Ok(ResponseStatus::rejected("Y")),
        });
        assert_eq!(app.error_detail("a"), Some("Y"));

        app.toggle_error_detail();
        app.toggle_error_detail();
        assert_eq!(app.error_detail("a"), Some("Y"));
    }

    #[test]
    fn test_failed_toggle_notifies() {
        let mut app = loaded_app(vec![ConnectionType::new("a").with_enabled(true)]);
        let Some(Action::Toggle { name, ticket }) = app.toggle_selected() else {
            panic!("expected toggle action");
        };

        let follow_up = app.on_request_result(RequestResult::Toggled {
            name,
            ticket,
            result: Ok(ResponseStatus::rejected("X")),
        });

        assert_eq!(follow_up, None);
        assert_eq!(app.board.row("a").unwrap().status_message(), Some("Failed"));
        assert_eq!(app.notifications.current().unwrap().message, "a: X");
    }

    #[test]
    fn test_refresh_error_keeps_rows_and_warns() {
        let mut app = loaded_app(vec![ConnectionType::new("a").with_enabled(true)]);
        let mut failed = app.poll.clone();
        failed.load_error = Some(Arc::new(CoreError::Rejected("backend down".to_string())));

        app.apply_poll_state(failed.clone());
        assert_eq!(app.visible_rows().len(), 1);
        assert_eq!(
            app.notifications.current().unwrap().message,
            "Refresh failed: backend down"
        );

        // Same error again is not re-announced
        app.notifications.dismiss();
        app.apply_poll_state(failed);
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_delete_flow_requests_refresh() {
        let mut app = loaded_app(vec![
            ConnectionType::new("a").with_display_name("Alpha"),
            ConnectionType::new("b").with_display_name("Beta"),
        ]);
        app.select_next();
        app.request_delete();
        assert_eq!(app.delete.target().unwrap().name, "b");

        assert_eq!(
            app.confirm_delete(),
            Some(Action::Delete {
                name: "b".to_string()
            })
        );
        let follow_up = app.on_request_result(RequestResult::Deleted {
            result: Ok(ResponseStatus::ok()),
        });
        assert_eq!(follow_up, Some(Action::Refresh));
        assert!(!app.delete.is_open());

        app.apply_poll_state(state(vec![ConnectionType::new("a").with_display_name("Alpha")]));
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_row().unwrap().name(), "a");
    }

    #[test]
    fn test_filter_typing_narrows_rows() {
        let mut app = loaded_app(vec![
            ConnectionType::new("s3").with_display_name("S3 storage"),
            ConnectionType::new("uri").with_display_name("URI"),
        ]);
        app.start_filter_input();
        for c in "ur".chars() {
            app.push_filter_char(c);
        }
        assert_eq!(app.visible_rows().len(), 1);
        assert_eq!(app.selected_row().unwrap().name(), "uri");

        app.cancel_filter_input();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_toggle_with_no_rows_is_noop() {
        let mut app = loaded_app(vec![]);
        assert!(app.toggle_selected().is_none());
        app.request_delete();
        assert!(!app.delete.is_open());
    }
}
