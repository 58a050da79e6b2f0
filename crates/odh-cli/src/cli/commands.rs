use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::time::Instant;

use odh_core::{
    ConnectionType, ConnectionTypeApi, DeleteConfirmation, DeleteFinish, DeleteTarget,
    FilterData, PollState, Poller, ToggleBoard, ToggleOutcome,
};

use super::protocol::{CliCommand, ConnectionTypeRow, ToggleReport};

/// How often a pending toggle re-fetches while waiting for the backend
const RECHECK_INTERVAL: Duration = Duration::from_secs(1);

/// Interval for pollers that are only ever driven by forced refreshes
const IDLE_POLL_INTERVAL: Duration = Duration::from_secs(3600);

/// Run a one-shot command and return its JSON result.
///
/// `settle` bounds how long `enable`/`disable` wait for a refresh to show
/// the new value once the backend has accepted it.
pub async fn execute(
    command: CliCommand,
    api: Arc<dyn ConnectionTypeApi>,
    settle: Duration,
) -> Result<Value> {
    match command {
        CliCommand::List { filter } => {
            let items = api.list().await.context("Failed to load connection types")?;
            Ok(serde_json::to_value(rows(&items, &filter))?)
        }
        CliCommand::SetEnabled { name, enabled } => {
            let report = set_enabled(api, &name, enabled, settle).await?;
            Ok(serde_json::to_value(report)?)
        }
        CliCommand::Delete { name, confirmed } => delete(api.as_ref(), &name, confirmed).await,
        CliCommand::Create {
            name,
            display_name,
            description,
            creator,
            enabled,
        } => {
            let mut ct = ConnectionType::new(&name).with_enabled(enabled);
            if let Some(display_name) = display_name {
                ct = ct.with_display_name(display_name);
            }
            if let Some(description) = description {
                ct = ct.with_description(description);
            }
            if let Some(creator) = creator {
                ct = ct.with_creator(creator);
            }
            api.create(&ct)
                .await
                .and_then(|status| status.into_result("Failed to create"))
                .map_err(|e| anyhow!("{}", e.detail()))?;
            tracing::info!(name = %name, "created connection type");
            Ok(json!({ "created": name }))
        }
    }
}

fn rows(items: &[ConnectionType], filter: &FilterData) -> Vec<ConnectionTypeRow> {
    let now = Utc::now();
    filter
        .apply(items)
        .into_iter()
        .map(|ct| ConnectionTypeRow::from_resource(ct, now))
        .collect()
}

async fn first_load(rx: &mut tokio::sync::watch::Receiver<PollState>) -> Result<PollState> {
    loop {
        {
            let state = rx.borrow_and_update();
            if state.loaded {
                return Ok(state.clone());
            }
            if let Some(err) = &state.load_error {
                bail!("Failed to load connection types: {}", err.detail());
            }
        }
        rx.changed().await.context("Poller stopped before the first load")?;
    }
}

async fn set_enabled(
    api: Arc<dyn ConnectionTypeApi>,
    name: &str,
    enabled: bool,
    settle: Duration,
) -> Result<ToggleReport> {
    let poller = Poller::connection_types(Arc::clone(&api), IDLE_POLL_INTERVAL);
    let mut rx = poller.subscribe();

    let mut board = ToggleBoard::new();
    board.apply_snapshot(&first_load(&mut rx).await?.data);

    let ticket = board
        .toggle(name, enabled)
        .ok_or_else(|| anyhow!("connection type {} not found", name))?;
    let response = api.set_enabled(name, enabled).await;

    if board.complete(name, ticket, response) == ToggleOutcome::Failed {
        let message = board
            .row(name)
            .and_then(|row| row.error_message())
            .unwrap_or("request failed")
            .to_string();
        bail!("{}", message);
    }

    let deadline = Instant::now() + settle;
    loop {
        let Some(row) = board.row(name) else {
            bail!("connection type {} disappeared while waiting", name);
        };
        if row.pending().is_none() {
            return Ok(ToggleReport {
                name: name.to_string(),
                enabled: row.displayed_value(),
                reconciled: true,
                status: None,
            });
        }
        if Instant::now() >= deadline {
            tracing::warn!(name, "backend accepted the change but no refresh reflected it yet");
            return Ok(ToggleReport {
                name: name.to_string(),
                enabled,
                reconciled: false,
                status: row.status_message().map(str::to_string),
            });
        }

        poller.force_refresh();
        let wake = (Instant::now() + RECHECK_INTERVAL).min(deadline);
        if let Ok(changed) = tokio::time::timeout_at(wake, rx.changed()).await {
            changed.context("Poller stopped while waiting")?;
            let state = rx.borrow_and_update().clone();
            board.apply_snapshot(&state.data);
        }
    }
}

async fn delete(api: &dyn ConnectionTypeApi, name: &str, confirmed: bool) -> Result<Value> {
    let items = api.list().await.context("Failed to load connection types")?;
    let target = items
        .iter()
        .find(|ct| ct.name() == name)
        .map(DeleteTarget::from)
        .ok_or_else(|| anyhow!("connection type {} not found", name))?;

    let mut dialog = DeleteConfirmation::new();
    dialog.request(target);
    if !confirmed {
        bail!(
            "{} Pass --yes to confirm.",
            dialog.prompt().unwrap_or_default()
        );
    }

    let name = dialog.confirm().context("Delete already in progress")?;
    match dialog.finish(api.delete(&name).await) {
        DeleteFinish::Deleted(name) => {
            tracing::info!(name = %name, "deleted connection type");
            Ok(json!({ "deleted": name }))
        }
        DeleteFinish::Failed(message) => bail!("{}", message),
        DeleteFinish::Ignored => bail!("Delete was not in progress"),
    }
}

/// Print the filtered rows as one JSON line per change until `shutdown` resolves
pub async fn watch<W, S>(
    api: Arc<dyn ConnectionTypeApi>,
    interval: Duration,
    filter: FilterData,
    out: &mut W,
    shutdown: S,
) -> Result<()>
where
    W: Write,
    S: Future,
{
    let poller = Poller::connection_types(api, interval);
    let mut rx = poller.subscribe();
    let mut last = PollState::default();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = rx.changed() => {
                changed.context("Poller stopped")?;
                let state = rx.borrow_and_update().clone();
                if state.loaded && !state.data.ptr_eq(&last.data) {
                    let line = serde_json::to_string(&rows(&state.data, &filter))?;
                    writeln!(out, "{}", line)?;
                    out.flush()?;
                }
                last = state;
            }
        }
    }

    poller.stop();
    Ok(())
}
