//! Event Loop Implementation
//!
//! Cooperative single-threaded loop with a virtual millisecond clock,
//! one-shot timers and an animation-frame queue. Tasks are plain values of
//! the embedder's choosing; the loop only decides when they are due.

use std::collections::VecDeque;

/// Timer handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// Handle returned by `request_animation_frame`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u32);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due_at: u64,
    task: T,
}

/// Event loop
#[derive(Debug)]
pub struct EventLoop<T> {
    /// Pending timers
    timers: Vec<Timer<T>>,
    /// Callbacks for the next animation frame
    frame_callbacks: VecDeque<(FrameId, T)>,
    /// Next handle ID (shared by timers and frames)
    next_id: u32,
    /// Current timestamp (ms)
    current_time: u64,
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            frame_callbacks: VecDeque::new(),
            next_id: 0,
            current_time: 0,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Set a timeout
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.push(Timer {
            id,
            due_at: self.current_time + delay_ms,
            task,
        });
        id
    }

    /// Clear a timeout. Returns the task if it was still pending.
    pub fn clear_timeout(&mut self, id: TimerId) -> Option<T> {
        let pos = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(pos).task)
    }

    /// Queue a task for the next animation frame
    pub fn request_animation_frame(&mut self, task: T) -> FrameId {
        let id = FrameId(self.next_id());
        self.frame_callbacks.push_back((id, task));
        id
    }

    /// Cancel a queued frame callback
    pub fn cancel_animation_frame(&mut self, id: FrameId) -> Option<T> {
        let pos = self.frame_callbacks.iter().position(|(f, _)| *f == id)?;
        self.frame_callbacks.remove(pos).map(|(_, task)| task)
    }

    /// Take the callbacks of the current frame. Callbacks requested while
    /// these run belong to the following frame.
    pub fn take_frame_callbacks(&mut self) -> Vec<T> {
        self.frame_callbacks.drain(..).map(|(_, task)| task).collect()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= until)
            .min_by_key(|(_, t)| t.due_at)
            .map(|(pos, _)| pos)?;
        let timer = self.timers.remove(pos);
        self.current_time = self.current_time.max(timer.due_at);
        Some(timer.task)
    }

    /// Move the clock forward without firing anything
    pub fn set_time(&mut self, now: u64) {
        self.current_time = self.current_time.max(now);
    }

    /// Get current time
    pub fn now(&self) -> u64 {
        self.current_time
    }

    /// Number of pending timers
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of queued frame callbacks
    pub fn pending_frames(&self) -> usize {
        self.frame_callbacks.len()
    }

    /// Check if there's pending work
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty() || !self.frame_callbacks.is_empty()
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}
