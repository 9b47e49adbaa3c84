//! Notification Emitter
//!
//! Transient text notices mounted in the map container. At most one is alive:
//! showing a new notice retires the current one first. A notice holds for
//! `NOTIFICATION_HOLD_MS`, fades over `NOTIFICATION_FADE_MS`, then is removed.

use fos_dom::{Document, EventLoop, NodeId, TimerId};

use crate::NOTIFICATION_CLASS;
use crate::schedule::{ControlTask, NOTIFICATION_FADE_MS, NOTIFICATION_HOLD_MS};

/// Lifecycle stage of the live notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Showing,
    Fading,
}

#[derive(Debug)]
struct ActiveNotification {
    element: NodeId,
    timer: TimerId,
    phase: NoticePhase,
}

/// Owns the single live notice and its pending timer
#[derive(Debug, Default)]
pub struct Notifier {
    active: Option<ActiveNotification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element of the live notice
    pub fn active_element(&self) -> Option<NodeId> {
        self.active.as_ref().map(|n| n.element)
    }

    pub fn phase(&self) -> Option<NoticePhase> {
        self.active.as_ref().map(|n| n.phase)
    }

    /// Show `message` inside `host`, replacing any live notice
    pub fn show(
        &mut self,
        doc: &mut Document,
        event_loop: &mut EventLoop<ControlTask>,
        host: NodeId,
        message: &str,
    ) {
        self.dismiss(doc, event_loop);

        let element = doc.tree.create_element("div");
        if let Some(el) = doc.tree.element_mut(element) {
            el.class_list.add(NOTIFICATION_CLASS);
            el.set_style_property("opacity", "1");
        }
        let text = doc.tree.create_text(message);
        doc.tree.append_child(element, text);
        doc.tree.append_child(host, element);

        let timer = event_loop.set_timeout(ControlTask::FadeNotification(element), NOTIFICATION_HOLD_MS);
        tracing::debug!("Showing notice {:?}: {}", element, message);
        self.active = Some(ActiveNotification {
            element,
            timer,
            phase: NoticePhase::Showing,
        });
    }

    /// Run a fade/remove step. Steps for a notice that is no longer live are ignored.
    pub fn run(&mut self, doc: &mut Document, event_loop: &mut EventLoop<ControlTask>, task: ControlTask) {
        match task {
            ControlTask::FadeNotification(element) => self.fade(doc, event_loop, element),
            ControlTask::RemoveNotification(element) => self.remove(doc, element),
            ControlTask::DispatchChange | ControlTask::SyncChange => {}
        }
    }

    fn fade(&mut self, doc: &mut Document, event_loop: &mut EventLoop<ControlTask>, element: NodeId) {
        let Some(active) = self.active.as_mut().filter(|n| n.element == element) else {
            return;
        };
        if let Some(el) = doc.tree.element_mut(element) {
            el.set_style_property("transition", "opacity 1s");
            el.set_style_property("opacity", "0");
        }
        active.timer = event_loop.set_timeout(ControlTask::RemoveNotification(element), NOTIFICATION_FADE_MS);
        active.phase = NoticePhase::Fading;
    }

    fn remove(&mut self, doc: &mut Document, element: NodeId) {
        if self.active_element() != Some(element) {
            return;
        }
        self.active = None;
        if doc.tree.parent(element).is_some() {
            doc.tree.remove_child(element);
        }
    }

    /// Cancel the pending step of the live notice and remove it now
    pub fn dismiss(&mut self, doc: &mut Document, event_loop: &mut EventLoop<ControlTask>) {
        if let Some(active) = self.active.take() {
            event_loop.clear_timeout(active.timer);
            if doc.tree.parent(active.element).is_some() {
                doc.tree.remove_child(active.element);
            }
        }
    }
}
