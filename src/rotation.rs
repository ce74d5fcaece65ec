//! Quote rotation.
//!
//! Two policies pick the "current" quote out of an ordered list:
//!
//! - **Window**: `floor(epoch_millis / window) mod len`. A pure function of wall
//!   clock time, so every viewer sees the same quote within a window. Re-checks
//!   recompute the formula and never assume the index moved by exactly one.
//! - **Interval**: starts at index 0 on activation and advances by one, wrapping,
//!   every period.
//!
//! An empty list disables rotation: no index is produced.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::models::Quote;

/// Default window of the time-window policy.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(6 * 60 * 60);

/// Default period of the interval policy.
pub const DEFAULT_INTERVAL_PERIOD: Duration = Duration::from_secs(6);

/// How often the window policy re-evaluates its formula.
pub const WINDOW_RECHECK_CADENCE: Duration = Duration::from_secs(60);

/// Index of the current quote under the time-window policy.
pub fn window_index(len: usize, epoch_millis: i64, window: Duration) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
    let slot = epoch_millis.div_euclid(window_ms);
    Some(slot.rem_euclid(len as i64) as usize)
}

/// Interval policy state: a counter bumped once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalRotation {
    index: usize,
}

impl IntervalRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current index for a list of `len` quotes.
    pub fn index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.index % len)
    }

    /// Advance by one, wrapping at `len`.
    pub fn tick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = (self.index % len + 1) % len;
        Some(self.index)
    }

    /// Index reached after `elapsed` time of ticking every `period` from activation.
    pub fn index_after(len: usize, elapsed: Duration, period: Duration) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let ticks = elapsed.as_millis() / period.as_millis().max(1);
        Some((ticks % len as u128) as usize)
    }
}

/// Rotation policy selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPolicy {
    Window { window: Duration },
    Interval { period: Duration },
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy::Window {
            window: DEFAULT_WINDOW,
        }
    }
}

impl RotationPolicy {
    /// Timer cadence a ticker uses for this policy.
    pub fn cadence(&self) -> Duration {
        match self {
            RotationPolicy::Window { window } => WINDOW_RECHECK_CADENCE.min(*window),
            RotationPolicy::Interval { period } => *period,
        }
    }
}

/// A policy anchored at the moment rotation was activated.
#[derive(Debug, Clone, Copy)]
pub struct QuoteRotation {
    policy: RotationPolicy,
    activated_at: DateTime<Utc>,
}

impl QuoteRotation {
    pub fn new(policy: RotationPolicy) -> Self {
        Self::activated_at(policy, Utc::now())
    }

    pub fn activated_at(policy: RotationPolicy, activated_at: DateTime<Utc>) -> Self {
        Self {
            policy,
            activated_at,
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Index of the current quote at `now`.
    pub fn index_at(&self, len: usize, now: DateTime<Utc>) -> Option<usize> {
        match self.policy {
            RotationPolicy::Window { window } => window_index(len, now.timestamp_millis(), window),
            RotationPolicy::Interval { period } => {
                let elapsed = (now - self.activated_at).to_std().unwrap_or_default();
                IntervalRotation::index_after(len, elapsed, period)
            }
        }
    }

    /// The current quote at `now`, with its index.
    pub fn select<'a>(&self, quotes: &'a [Quote], now: DateTime<Utc>) -> Option<(usize, &'a Quote)> {
        let index = self.index_at(quotes.len(), now)?;
        quotes.get(index).map(|quote| (index, quote))
    }
}

/// Background timer that keeps the current quote index up to date.
///
/// The index is published on a watch channel. Dropping the ticker stops the timer.
pub struct RotationTicker {
    index_rx: watch::Receiver<Option<usize>>,
    handle: JoinHandle<()>,
}

impl RotationTicker {
    /// Start rotating `len` quotes under `policy` using the system clock.
    pub fn spawn(policy: RotationPolicy, len: usize) -> Self {
        Self::spawn_with_clock(policy, len, Utc::now)
    }

    /// Start rotating with an explicit clock for the window policy.
    pub fn spawn_with_clock<C>(policy: RotationPolicy, len: usize, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let evaluate = move |interval: &mut IntervalRotation, advance: bool| match policy {
            RotationPolicy::Window { window } => {
                window_index(len, clock().timestamp_millis(), window)
            }
            RotationPolicy::Interval { .. } if advance => interval.tick(len),
            RotationPolicy::Interval { .. } => interval.index(len),
        };

        let mut interval = IntervalRotation::new();
        let (index_tx, index_rx) = watch::channel(evaluate(&mut interval, false));

        let handle = tokio::spawn(async move {
            if len == 0 {
                return;
            }

            let cadence = policy.cadence();
            let mut timer = tokio::time::interval_at(Instant::now() + cadence, cadence);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                timer.tick().await;
                let next = evaluate(&mut interval, true);
                index_tx.send_if_modified(|current| {
                    if *current == next {
                        return false;
                    }
                    tracing::debug!("Active quote index {:?} -> {:?}", current, next);
                    *current = next;
                    true
                });
            }
        });

        Self { index_rx, handle }
    }

    /// Index published most recently.
    pub fn current(&self) -> Option<usize> {
        *self.index_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<usize>> {
        self.index_rx.clone()
    }
}

impl Drop for RotationTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
