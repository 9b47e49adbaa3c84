//! Deferred work and change-event throttling

use fos_dom::NodeId;

/// Minimum spacing between processed change notifications (ms)
pub const THROTTLE_WINDOW_MS: u64 = 100;

/// How long a notice stays fully visible (ms)
pub const NOTIFICATION_HOLD_MS: u64 = 3000;

/// Length of the notice fade-out (ms)
pub const NOTIFICATION_FADE_MS: u64 = 1000;

/// Work the control hands to the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTask {
    /// Run the callback and notice for a detected change (animation frame)
    DispatchChange,
    /// Re-handle a change notification dropped inside the throttle window (timer)
    SyncChange,
    /// Start fading the notice element out (timer)
    FadeNotification(NodeId),
    /// Remove the faded notice element (timer)
    RemoveNotification(NodeId),
}

/// Leading-edge throttle. Calls inside the window after an accepted call are
/// dropped, not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: u64,
    last_fired: Option<u64>,
}

impl Throttle {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_fired: None,
        }
    }

    /// Accept or drop a call made at `now`
    pub fn try_fire(&mut self, now: u64) -> bool {
        match self.last_fired {
            Some(last) if now.saturating_sub(last) < self.window_ms => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }

    /// Time left at `now` before the next call would be accepted
    pub fn remaining(&self, now: u64) -> u64 {
        self.last_fired
            .map_or(0, |last| (last + self.window_ms).saturating_sub(now))
    }

    pub fn reset(&mut self) {
        self.last_fired = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(THROTTLE_WINDOW_MS)
    }
}
