//! Top-of-window loading bar.
//!
//! Downloads and API calls rarely report real percentages, so callers nudge the
//! bar forward with [`ProgressBar::trickle`] and finish it with an explicit
//! `set(100.0)`. Completing starts a short hide sequence that returns the bar to
//! idle on its own.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

/// Delay between reaching 100% and hiding the bar
pub const HIDE_DELAY: Duration = Duration::from_millis(250);
/// Delay between hiding the bar and resetting it to 0
pub const RESET_DELAY: Duration = Duration::from_millis(300);
/// Trickle never pushes the bar past this
pub const TRICKLE_CAP: f32 = 99.4;
const TRICKLE_MIN: f32 = 2.0;
const TRICKLE_MAX: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressState {
    Idle,
    Active(f32),
    /// At 100%; `hidden` flips once the hide delay has passed
    Complete { hidden: bool },
}

/// Point-in-time view used for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub percent: f32,
    pub hidden: bool,
}

#[derive(Default)]
struct Inner {
    current: f32,
    hidden: bool,
    hide_task: Option<JoinHandle<()>>,
}

impl Inner {
    fn cancel_hide(&mut self) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }
    }
}

// The state is a plain number and a flag; a poisoned lock is still usable.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Shared handle to one progress bar. Clones drive the same bar.
///
/// Completion timers are spawned on the ambient tokio runtime, so `set(100.0)`
/// must be called from within one.
#[derive(Clone, Default)]
pub struct ProgressBar {
    inner: Arc<Mutex<Inner>>,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }

    /// Clamp to [0, 100] and show the bar. Reaching 100 schedules hide + reset.
    pub fn set(&self, percent: f32) {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };

        let mut inner = self.lock();
        inner.cancel_hide();
        inner.current = percent;
        inner.hidden = false;

        if percent >= 100.0 {
            let shared = Arc::clone(&self.inner);
            inner.hide_task = Some(tokio::spawn(async move {
                tokio::time::sleep(HIDE_DELAY).await;
                lock(&shared).hidden = true;
                tokio::time::sleep(RESET_DELAY).await;
                let mut inner = lock(&shared);
                inner.current = 0.0;
                inner.hide_task = None;
            }));
        }
    }

    /// Cancel any pending hide, drop to 0 and keep the bar visible.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.cancel_hide();
        inner.hidden = false;
        inner.current = 0.0;
    }

    /// Nudge forward by `amount`, or by a random 2-8% when `None`. Never completes.
    pub fn trickle(&self, amount: Option<f32>) {
        let increment =
            amount.unwrap_or_else(|| rand::thread_rng().gen_range(TRICKLE_MIN..TRICKLE_MAX));
        let current = self.progress();
        let next = (current + increment).min(TRICKLE_CAP);
        tracing::trace!(from = current, to = next, "progress trickle");
        self.set(next);
    }

    pub fn progress(&self) -> f32 {
        self.lock().current
    }

    pub fn state(&self) -> ProgressState {
        let inner = self.lock();
        if inner.current >= 100.0 {
            ProgressState::Complete {
                hidden: inner.hidden,
            }
        } else if inner.current > 0.0 {
            ProgressState::Active(inner.current)
        } else {
            ProgressState::Idle
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.lock();
        ProgressSnapshot {
            percent: inner.current,
            hidden: inner.hidden,
        }
    }
}
