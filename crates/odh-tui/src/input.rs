use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{Action, App, InputMode};

/// Route a key press. Returns the side effect the runtime should perform.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return None;
    }

    if app.delete.is_open() {
        return handle_delete_modal_key(app, key);
    }

    match app.input_mode {
        InputMode::Filter => {
            handle_filter_key(app, key);
            None
        }
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_delete_modal_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => {
            app.cancel_delete();
            None
        }
        _ => None,
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.finish_filter_input(),
        KeyCode::Esc => app.cancel_filter_input(),
        KeyCode::Tab => app.cycle_filter_type(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Char(c) => app.push_filter_char(c),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char(' ') | KeyCode::Enter => return app.toggle_selected(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('/') => app.start_filter_input(),
        KeyCode::Tab => app.cycle_filter_type(),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('r') => return app.request_refresh(),
        KeyCode::Char('e') => app.toggle_error_detail(),
        KeyCode::Char('x') => app.notifications.dismiss(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use odh_core::{ConnectionType, PollState, ResourceSnapshot};

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_with(items: Vec<ConnectionType>) -> App {
        let mut app = App::new();
        app.apply_poll_state(PollState {
            data: ResourceSnapshot::new(items),
            loaded: true,
            load_error: None,
            fetch_count: 1,
        });
        app
    }

    #[test]
    fn test_space_toggles_selected_row() {
        let mut app = app_with(vec![
            ConnectionType::new("a").with_enabled(true),
            ConnectionType::new("b").with_enabled(false),
        ]);
        press(&mut app, KeyCode::Down);

        match press(&mut app, KeyCode::Char(' ')) {
            Some(Action::Toggle { name, ticket }) => {
                assert_eq!(name, "b");
                assert!(ticket.requested_value);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_delete_modal_captures_keys() {
        let mut app = app_with(vec![ConnectionType::new("a")]);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.delete.is_open());

        // 'q' doesn't quit while the confirmation is up
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);

        press(&mut app, KeyCode::Esc);
        assert!(!app.delete.is_open());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            press(&mut app, KeyCode::Char('y')),
            Some(Action::Delete {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn test_filter_mode_types_into_filter() {
        let mut app = app_with(vec![ConnectionType::new("a")]);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Filter);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.filter.keyword.as_deref(), Some("q"));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter.keyword, None);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('/'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!app.running);
    }

    #[test]
    fn test_refresh_key() {
        let mut app = app_with(vec![]);
        assert_eq!(press(&mut app, KeyCode::Char('r')), Some(Action::Refresh));
    }
}
