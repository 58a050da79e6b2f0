//! Optimistic enable/disable for connection-type rows.
//!
//! A [`ToggleController`] belongs to one row. The mutation response only
//! says the backend accepted the request; the pending state is cleared when
//! a polled snapshot shows the requested value. Every request carries a
//! generation so a slow response to a superseded toggle is ignored.

use std::collections::HashMap;
use std::fmt;

use crate::api::ResponseStatus;
use crate::constants::status;
use crate::error::CoreResult;
use crate::models::ConnectionType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleStatus {
    Enabling,
    Disabling,
    Failed,
}

impl ToggleStatus {
    fn requesting(value: bool) -> Self {
        if value {
            Self::Enabling
        } else {
            Self::Disabling
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Enabling => status::ENABLING,
            Self::Disabling => status::DISABLING,
            Self::Failed => status::FAILED,
        }
    }
}

impl fmt::Display for ToggleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Client-local state of an unconfirmed toggle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingToggle {
    pub requested_value: bool,
    pub status: ToggleStatus,
    pub error_message: Option<String>,
}

/// Identifies one in-flight mutation. Hand it back with the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleTicket {
    pub generation: u64,
    pub requested_value: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Backend accepted; refresh the list to reconcile
    Accepted,
    /// Rejected or errored; the row shows "Failed"
    Failed,
    /// Response to a superseded or already settled request, ignored
    Stale,
}

/// Per-row state machine: Idle (no pending), Requesting, Failed.
#[derive(Clone, Debug, Default)]
pub struct ToggleController {
    observed: bool,
    pending: Option<PendingToggle>,
    generation: u64,
}

impl ToggleController {
    pub fn new(observed: bool) -> Self {
        Self {
            observed,
            pending: None,
            generation: 0,
        }
    }

    /// Start issuing generations above `floor`, so tickets never repeat
    /// across controllers recreated for the same row
    fn starting_after(mut self, floor: u64) -> Self {
        self.generation = floor;
        self
    }

    /// Begin a toggle to `value`. Supersedes any pending toggle outright.
    pub fn toggle(&mut self, value: bool) -> ToggleTicket {
        self.generation += 1;
        self.pending = Some(PendingToggle {
            requested_value: value,
            status: ToggleStatus::requesting(value),
            error_message: None,
        });
        ToggleTicket {
            generation: self.generation,
            requested_value: value,
        }
    }

    /// Apply the mutation response for `ticket`.
    pub fn complete(
        &mut self,
        ticket: ToggleTicket,
        result: CoreResult<ResponseStatus>,
    ) -> ToggleOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring response to superseded toggle"
            );
            return ToggleOutcome::Stale;
        }
        let Some(pending) = self.pending.as_mut() else {
            return ToggleOutcome::Stale;
        };

        let fallback = if ticket.requested_value {
            "Failed to enable"
        } else {
            "Failed to disable"
        };
        let error = match result {
            Ok(response) => match response.into_result(fallback) {
                Ok(()) => return ToggleOutcome::Accepted,
                Err(err) => err,
            },
            Err(err) => err,
        };

        pending.status = ToggleStatus::Failed;
        pending.error_message = Some(error.detail());
        ToggleOutcome::Failed
    }

    /// Watcher for the observed attribute. Clears the pending toggle once the
    /// backend reports the requested value; returns whether it did.
    pub fn observe(&mut self, enabled: bool) -> bool {
        self.observed = enabled;
        match &self.pending {
            Some(pending) if pending.requested_value == enabled => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Value the switch shows: the requested one while a request is
    /// outstanding, otherwise what the backend last reported
    pub fn displayed_value(&self) -> bool {
        match &self.pending {
            Some(pending) if pending.status != ToggleStatus::Failed => pending.requested_value,
            _ => self.observed,
        }
    }

    pub fn observed_value(&self) -> bool {
        self.observed
    }

    pub fn pending(&self) -> Option<&PendingToggle> {
        self.pending.as_ref()
    }

    pub fn status(&self) -> Option<ToggleStatus> {
        self.pending.as_ref().map(|p| p.status)
    }

    pub fn status_message(&self) -> Option<&'static str> {
        self.status().map(|s| s.message())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.pending.as_ref().and_then(|p| p.error_message.as_deref())
    }

    pub fn is_requesting(&self) -> bool {
        matches!(
            self.status(),
            Some(ToggleStatus::Enabling | ToggleStatus::Disabling)
        )
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Controllers for every row of the table, keyed by resource name.
#[derive(Debug, Default)]
pub struct ToggleBoard {
    rows: HashMap<String, ToggleController>,
    last_generation: u64,
}

impl ToggleBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot watcher: feed every row its observed value, create rows for
    /// new resources and drop rows whose resource is gone. Returns the names
    /// whose pending toggle was reconciled.
    pub fn apply_snapshot(&mut self, snapshot: &[ConnectionType]) -> Vec<String> {
        let mut reconciled = Vec::new();
        let floor = self.last_generation;

        self.rows
            .retain(|name, _| snapshot.iter().any(|ct| ct.name() == name));

        for ct in snapshot {
            let row = self
                .rows
                .entry(ct.name().to_string())
                .or_insert_with(|| ToggleController::new(ct.enabled()).starting_after(floor));
            if row.observe(ct.enabled()) {
                tracing::debug!(name = ct.name(), enabled = ct.enabled(), "toggle reconciled");
                reconciled.push(ct.name().to_string());
            }
        }
        reconciled
    }

    pub fn row(&self, name: &str) -> Option<&ToggleController> {
        self.rows.get(name)
    }

    /// Flip `name` relative to what its switch currently shows
    pub fn toggle_displayed(&mut self, name: &str) -> Option<ToggleTicket> {
        let value = !self.rows.get(name)?.displayed_value();
        self.toggle(name, value)
    }

    pub fn toggle(&mut self, name: &str, value: bool) -> Option<ToggleTicket> {
        let ticket = self.rows.get_mut(name)?.toggle(value);
        self.last_generation = self.last_generation.max(ticket.generation);
        Some(ticket)
    }

    pub fn complete(
        &mut self,
        name: &str,
        ticket: ToggleTicket,
        result: CoreResult<ResponseStatus>,
    ) -> ToggleOutcome {
        match self.rows.get_mut(name) {
            Some(row) => row.complete(ticket, result),
            None => ToggleOutcome::Stale,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
