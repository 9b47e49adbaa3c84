//! Document - High-level document API

use std::collections::VecDeque;

use crate::{
    DomEvent, DomEventType, DomTree, EventListeners, ListenerId, NativeFullscreen, NodeId,
    UserAgentProfile,
};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Registered event listeners
    listeners: EventListeners,
    /// Events raised by the user agent, waiting for dispatch
    queued_events: VecDeque<DomEvent>,
    /// Native fullscreen state
    pub(crate) fullscreen: NativeFullscreen,
}

impl Document {
    /// Create a new empty document for a standards-mode user agent
    pub fn new(url: &str) -> Self {
        Self::with_profile(url, UserAgentProfile::standard())
    }

    /// Create a document whose Fullscreen API follows `profile`
    pub fn with_profile(url: &str, profile: UserAgentProfile) -> Self {
        let mut tree = DomTree::new();

        // Create basic document structure
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        tracing::debug!("Created document {} (fullscreen profile: {})", url, profile.name);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: EventListeners::new(),
            queued_events: VecDeque::new(),
            fullscreen: NativeFullscreen::new(profile),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_by_id(self.tree.root(), id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// `target.addEventListener(type, ...)`
    pub fn add_event_listener(&mut self, target: NodeId, event_type: DomEventType) -> ListenerId {
        self.listeners.add(target, event_type)
    }

    /// `removeEventListener` by handle
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Check if a listener handle is still registered
    pub fn has_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners an event reaches, in propagation order
    pub fn listeners_for(&self, event: &DomEvent) -> Vec<ListenerId> {
        let path = if event.bubbles {
            self.tree.ancestors(event.target)
        } else {
            vec![event.target]
        };
        self.listeners.matching(event.event_type, &path)
    }

    /// Queue an event for the next dispatch turn
    pub fn queue_event(&mut self, event: DomEvent) {
        self.queued_events.push_back(event);
    }

    /// Pop the oldest queued event
    pub fn next_queued_event(&mut self) -> Option<DomEvent> {
        self.queued_events.pop_front()
    }

    /// Check if events are waiting for dispatch
    pub fn has_queued_events(&self) -> bool {
        !self.queued_events.is_empty()
    }

    /// Native fullscreen state
    pub fn fullscreen(&self) -> &NativeFullscreen {
        &self.fullscreen
    }

    /// Native fullscreen state, mutably (policy changes)
    pub fn fullscreen_mut(&mut self) -> &mut NativeFullscreen {
        &mut self.fullscreen
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
