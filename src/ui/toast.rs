use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::application::Notifier;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Transient messages shown at the bottom of the window.
#[derive(Clone, Default)]
pub struct ToastBoard {
    toasts: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages still within their display window, oldest first
    pub fn visible(&self, now: Instant) -> Vec<String> {
        let mut toasts = self.toasts.lock().unwrap_or_else(|p| p.into_inner());
        toasts.retain(|(_, shown_at)| now.duration_since(*shown_at) < TOAST_DURATION);
        toasts.iter().map(|(message, _)| message.clone()).collect()
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, message: &str) {
        self.toasts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((message.to_string(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let board = ToastBoard::new();
        board.notify("first");
        board.notify("second");

        let now = Instant::now();
        assert_eq!(board.visible(now), vec!["first", "second"]);
        assert!(board.visible(now + TOAST_DURATION).is_empty());
    }
}
