use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use odh_core::{ConnectionTypeApi, PollerHandle};

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{Action, App, RequestResult, Tui};

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    api: Arc<dyn ConnectionTypeApi>,
    poller: &PollerHandle,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Notification expiry only; data arrives through the poller
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    let mut poll_rx = poller.subscribe();
    let mut poll_open = true;
    app.apply_poll_state(poll_rx.borrow_and_update().clone());

    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<RequestResult>();

    while app.running {
        terminal.draw(|f| render(f, app, Utc::now()))?;

        let action = tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => handle_key(app, key),
                Some(Ok(_)) => None,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    app.quit();
                    None
                }
            },

            changed = poll_rx.changed(), if poll_open => {
                match changed {
                    Ok(()) => app.apply_poll_state(poll_rx.borrow_and_update().clone()),
                    Err(_) => {
                        tracing::warn!("poller stopped; table will no longer refresh");
                        poll_open = false;
                    }
                }
                None
            }

            Some(result) = result_rx.recv() => app.on_request_result(result),

            _ = tick_interval.tick() => {
                app.notifications.tick();
                None
            }
        };

        if let Some(action) = action {
            dispatch(action, &api, poller, &result_tx);
        }
    }

    Ok(())
}

/// Run an action off the UI loop. Mutation results come back over `result_tx`.
fn dispatch(
    action: Action,
    api: &Arc<dyn ConnectionTypeApi>,
    poller: &PollerHandle,
    result_tx: &mpsc::UnboundedSender<RequestResult>,
) {
    match action {
        Action::Refresh => poller.force_refresh(),
        Action::Toggle { name, ticket } => {
            tracing::info!(name = %name, enabled = ticket.requested_value, "toggling connection type");
            let api = Arc::clone(api);
            let tx = result_tx.clone();
            tokio::spawn(async move {
                let result = api.set_enabled(&name, ticket.requested_value).await;
                let _ = tx.send(RequestResult::Toggled {
                    name,
                    ticket,
                    result,
                });
            });
        }
        Action::Delete { name } => {
            tracing::info!(name = %name, "deleting connection type");
            let api = Arc::clone(api);
            let tx = result_tx.clone();
            tokio::spawn(async move {
                let result = api.delete(&name).await;
                let _ = tx.send(RequestResult::Deleted { result });
            });
        }
    }
}
