//! Periodic list fetching with forced refresh.
//!
//! A single driver task owns the fetch function, so scheduled and forced
//! fetches are serialized: there is never more than one request in flight
//! and a result can never be overwritten by an older one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::api::ConnectionTypeApi;
use crate::constants::REQUEST_TIMEOUT_MS;
use crate::error::{CoreError, CoreResult};
use crate::models::{ConnectionType, ResourceSnapshot};

/// Observable output of a poller
#[derive(Debug)]
pub struct PollState<T = ConnectionType> {
    pub data: ResourceSnapshot<T>,
    /// Set by the first successful fetch and never cleared
    pub loaded: bool,
    /// Error of the latest fetch, cleared by the next success
    pub load_error: Option<Arc<CoreError>>,
    /// Number of successful fetches so far. Bumped even when the data is
    /// unchanged, so observers can reconcile against every fresh read.
    pub fetch_count: u64,
}

impl<T> Clone for PollState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loaded: self.loaded,
            load_error: self.load_error.clone(),
            fetch_count: self.fetch_count,
        }
    }
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: ResourceSnapshot::default(),
            loaded: false,
            load_error: None,
            fetch_count: 0,
        }
    }
}

impl<T: PartialEq> PollState<T> {
    /// Apply a fetch result. Every result is published; unchanged data
    /// keeps the previous `Arc`.
    fn apply(&mut self, result: CoreResult<Vec<T>>) {
        match result {
            Ok(items) => {
                if self.data.replace_if_changed(items) {
                    tracing::trace!(count = self.data.len(), "snapshot changed");
                }
                self.load_error = None;
                self.loaded = true;
                self.fetch_count += 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "poll fetch failed, keeping last snapshot");
                self.load_error = Some(Arc::new(err));
            }
        }
    }
}

struct Shared {
    active: AtomicBool,
    refresh: Notify,
    stop: Notify,
}

pub struct Poller;

impl Poller {
    /// Spawn the poll loop on the current tokio runtime. The first fetch
    /// happens immediately.
    pub fn start<T, F, Fut>(fetch: F, interval: Duration) -> PollerHandle<T>
    where
        T: PartialEq + Send + Sync + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = CoreResult<Vec<T>>> + Send,
    {
        Self::start_with_timeout(
            fetch,
            interval,
            Duration::from_millis(REQUEST_TIMEOUT_MS),
        )
    }

    /// Like [`Poller::start`], failing any single fetch that takes longer
    /// than `fetch_timeout` with [`CoreError::Timeout`].
    pub fn start_with_timeout<T, F, Fut>(
        mut fetch: F,
        interval: Duration,
        fetch_timeout: Duration,
    ) -> PollerHandle<T>
    where
        T: PartialEq + Send + Sync + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = CoreResult<Vec<T>>> + Send,
    {
        let (state_tx, state_rx) = watch::channel(PollState::default());
        let shared = Arc::new(Shared {
            active: AtomicBool::new(true),
            refresh: Notify::new(),
            stop: Notify::new(),
        });

        let driver = Arc::clone(&shared);
        let task = tokio::spawn(async move {
            let mut next_tick = Instant::now();

            loop {
                tokio::select! {
                    biased;
                    _ = driver.stop.notified() => break,
                    _ = driver.refresh.notified() => {
                        tracing::debug!("forced refresh");
                    }
                    _ = sleep_until(next_tick) => {
                        // Measured from when the tick fires, so a slow fetch
                        // pushes the next one back instead of overlapping it
                        next_tick = Instant::now() + interval;
                    }
                }

                if !driver.active.load(Ordering::Acquire) {
                    break;
                }

                // A stop that lands after the check above still leaves a
                // permit, which wins before the fetch is first polled
                let result = tokio::select! {
                    biased;
                    _ = driver.stop.notified() => {
                        tracing::debug!("poller stopped during fetch, discarding result");
                        break;
                    }
                    result = tokio::time::timeout(fetch_timeout, fetch()) => {
                        result.unwrap_or_else(|_| Err(CoreError::Timeout(fetch_timeout)))
                    }
                };

                if !driver.active.load(Ordering::Acquire) {
                    tracing::debug!("poller stopped during fetch, discarding result");
                    break;
                }
                state_tx.send_modify(|state| state.apply(result));
            }

            tracing::debug!("poll loop exited");
        });

        PollerHandle {
            state_rx,
            shared,
            task,
        }
    }

    /// Poll the connection-type list through `api`
    pub fn connection_types(
        api: Arc<dyn ConnectionTypeApi>,
        interval: Duration,
    ) -> PollerHandle<ConnectionType> {
        Self::start(
            move || {
                let api = Arc::clone(&api);
                async move { api.list().await }
            },
            interval,
        )
    }
}

/// Owner of a running poll loop. Dropping it stops polling.
pub struct PollerHandle<T = ConnectionType> {
    state_rx: watch::Receiver<PollState<T>>,
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl<T> PollerHandle<T> {
    /// Current value without waiting
    pub fn state(&self) -> PollState<T> {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified after every fetch, successful or not
    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state_rx.clone()
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Fetch now, outside the schedule. If a fetch is already running the
    /// forced one follows it. The next scheduled tick is unaffected.
    pub fn force_refresh(&self) {
        if self.is_active() {
            self.shared.refresh.notify_one();
        }
    }

    /// Cancel the timer. No fetch starts after this returns; one already in
    /// flight is dropped and its result is never published.
    pub fn stop(&self) {
        if self.shared.active.swap(false, Ordering::AcqRel) {
            self.shared.stop.notify_one();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for PollerHandle<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
