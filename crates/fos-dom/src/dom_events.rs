//! DOM Events
//!
//! Input and fullscreen events plus the listener registry. Listeners are
//! plain records keyed by `ListenerId`; whoever registered one owns the handle
//! and is told which of its handles matched when an event is dispatched.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    // Pointer / keyboard
    Click,
    KeyDown,

    // Fullscreen change, one per vendor API
    FullscreenChange,
    MozFullscreenChange,
    WebkitFullscreenChange,
    MsFullscreenChange,

    // Fullscreen request rejected
    FullscreenError,
}

impl DomEventType {
    /// Event name as registered with `addEventListener`
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::FullscreenChange => "fullscreenchange",
            Self::MozFullscreenChange => "mozfullscreenchange",
            Self::WebkitFullscreenChange => "webkitfullscreenchange",
            Self::MsFullscreenChange => "MSFullscreenChange",
            Self::FullscreenError => "fullscreenerror",
        }
    }

    /// Parse an event name (case-sensitive, like the DOM)
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "click" => Self::Click,
            "keydown" => Self::KeyDown,
            "fullscreenchange" => Self::FullscreenChange,
            "mozfullscreenchange" => Self::MozFullscreenChange,
            "webkitfullscreenchange" => Self::WebkitFullscreenChange,
            "MSFullscreenChange" => Self::MsFullscreenChange,
            "fullscreenerror" => Self::FullscreenError,
            _ => return None,
        })
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    /// `KeyboardEvent.key` for key events
    pub key: Option<String>,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Event loop time (ms) at which the event was created
    pub timestamp: u64,
    default_prevented: bool,
}

impl DomEvent {
    fn new(event_type: DomEventType, target: NodeId, cancelable: bool) -> Self {
        Self {
            event_type,
            target,
            key: None,
            bubbles: true,
            cancelable,
            timestamp: 0,
            default_prevented: false,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventType::Click, target, true)
    }

    /// Create keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::new(DomEventType::KeyDown, target, true)
        }
    }

    /// Create a fullscreen change event of the given vendor flavour
    pub fn fullscreen_change(event_type: DomEventType, target: NodeId) -> Self {
        Self::new(event_type, target, false)
    }

    /// Create a fullscreenerror event
    pub fn fullscreen_error(target: NodeId) -> Self {
        Self::new(DomEventType::FullscreenError, target, false)
    }

    /// Stamp the event with the loop time it was queued at
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

#[derive(Debug, Clone)]
struct Listener {
    id: ListenerId,
    event_type: DomEventType,
    target: NodeId,
}

/// Listener registry, in registration order
#[derive(Debug, Default)]
pub struct EventListeners {
    listeners: Vec<Listener>,
    next_id: u32,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `event_type` on `target`
    pub fn add(&mut self, target: NodeId, event_type: DomEventType) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, event_type, target });
        id
    }

    /// Drop a registration. Returns false for unknown or already removed handles.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Check if a handle is still registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Listeners for `event_type` on any node of `path`, target first.
    /// `path` is the propagation path (target then ancestors).
    pub fn matching(&self, event_type: DomEventType, path: &[NodeId]) -> Vec<ListenerId> {
        path.iter()
            .flat_map(|&node| {
                self.listeners
                    .iter()
                    .filter(move |l| l.target == node && l.event_type == event_type)
                    .map(|l| l.id)
            })
            .collect()
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
