//! Fullscreen API
//!
//! The native Fullscreen surface of a document. Which method names, state
//! properties and change events exist depends on the user agent, so a
//! `UserAgentProfile` decides what a page can see: the standard API, one of
//! the three legacy vendor-prefixed ones, a transitional mix, or nothing.

use crate::{Document, DomEvent, DomEventType, NodeId};

/// Pending result of a native request/exit call (`Promise<void>`)
pub type NativeOp = smol::future::Boxed<Result<(), FullscreenError>>;

fn settled(result: Result<(), FullscreenError>) -> NativeOp {
    Box::pin(smol::future::ready(result))
}

/// Rejection reasons, modelled on the DOMExceptions browsers use
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FullscreenError {
    #[error("Permissions check failed")]
    NotAllowed,

    #[error("Element is not connected")]
    NotConnected,

    #[error("{0} is not a function")]
    Unsupported(String),
}

impl FullscreenError {
    /// `DOMException.name` of the rejection
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotAllowed => "NotAllowedError",
            Self::NotConnected | Self::Unsupported(_) => "TypeError",
        }
    }
}

/// Whether the user agent grants fullscreen requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenPolicy {
    #[default]
    Allow,
    /// Reject requests, as for calls outside a user gesture or in a frame
    /// without `allowfullscreen`
    Deny,
}

/// The Fullscreen API names a user agent exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentProfile {
    pub name: &'static str,
    /// Methods on `Element`
    pub request_methods: Vec<&'static str>,
    /// Methods on `Document`
    pub exit_methods: Vec<&'static str>,
    /// `Document.*FullscreenElement` properties
    pub element_properties: Vec<&'static str>,
    /// Change events fired at each transition, in firing order
    pub change_events: Vec<DomEventType>,
}

impl UserAgentProfile {
    /// Current engines: unprefixed API only
    pub fn standard() -> Self {
        Self {
            name: "standard",
            request_methods: vec!["requestFullscreen"],
            exit_methods: vec!["exitFullscreen"],
            element_properties: vec!["fullscreenElement"],
            change_events: vec![DomEventType::FullscreenChange],
        }
    }

    /// Old Gecko
    pub fn gecko_legacy() -> Self {
        Self {
            name: "gecko",
            request_methods: vec!["mozRequestFullScreen"],
            exit_methods: vec!["mozCancelFullScreen"],
            element_properties: vec!["mozFullScreenElement"],
            change_events: vec![DomEventType::MozFullscreenChange],
        }
    }

    /// Old WebKit / Safari
    pub fn webkit_legacy() -> Self {
        Self {
            name: "webkit",
            request_methods: vec!["webkitRequestFullscreen"],
            exit_methods: vec!["webkitExitFullscreen"],
            element_properties: vec!["webkitFullscreenElement"],
            change_events: vec![DomEventType::WebkitFullscreenChange],
        }
    }

    /// Internet Explorer 11 / legacy Edge
    pub fn trident_legacy() -> Self {
        Self {
            name: "trident",
            request_methods: vec!["msRequestFullscreen"],
            exit_methods: vec!["msExitFullscreen"],
            element_properties: vec!["msFullscreenElement"],
            change_events: vec![DomEventType::MsFullscreenChange],
        }
    }

    /// WebKit builds exposing both the standard and the prefixed API, firing
    /// both change events for every transition
    pub fn webkit_transitional() -> Self {
        Self {
            name: "webkit-transitional",
            request_methods: vec!["requestFullscreen", "webkitRequestFullscreen"],
            exit_methods: vec!["exitFullscreen", "webkitExitFullscreen"],
            element_properties: vec!["fullscreenElement", "webkitFullscreenElement"],
            change_events: vec![
                DomEventType::FullscreenChange,
                DomEventType::WebkitFullscreenChange,
            ],
        }
    }

    /// No Fullscreen API at all (embedded webviews, some mobile browsers)
    pub fn unsupported() -> Self {
        Self {
            name: "unsupported",
            request_methods: Vec::new(),
            exit_methods: Vec::new(),
            element_properties: Vec::new(),
            change_events: Vec::new(),
        }
    }

    /// Look up a preset by its `name`
    pub fn by_name(name: &str) -> Option<Self> {
        [
            Self::standard(),
            Self::gecko_legacy(),
            Self::webkit_legacy(),
            Self::trident_legacy(),
            Self::webkit_transitional(),
            Self::unsupported(),
        ]
        .into_iter()
        .find(|p| p.name == name)
    }
}

impl Default for UserAgentProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Native fullscreen state of one document
#[derive(Debug, Default)]
pub struct NativeFullscreen {
    profile: UserAgentProfile,
    policy: FullscreenPolicy,
    element: Option<NodeId>,
}

impl NativeFullscreen {
    pub fn new(profile: UserAgentProfile) -> Self {
        Self {
            profile,
            policy: FullscreenPolicy::default(),
            element: None,
        }
    }

    pub fn profile(&self) -> &UserAgentProfile {
        &self.profile
    }

    pub fn policy(&self) -> FullscreenPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FullscreenPolicy) {
        self.policy = policy;
    }

    /// The fullscreen element regardless of which API names are exposed
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }
}

impl Document {
    /// Check if `element` exposes the request method `method`
    pub fn element_has_method(&self, element: NodeId, method: &str) -> bool {
        self.tree.element(element).is_some()
            && self.fullscreen.profile.request_methods.contains(&method)
    }

    /// Check if the document exposes the method `method`
    pub fn document_has_method(&self, method: &str) -> bool {
        self.fullscreen.profile.exit_methods.contains(&method)
    }

    /// Read a `Document.*FullscreenElement` property. Unknown properties read
    /// as `undefined`, i.e. `None`.
    pub fn fullscreen_element_by(&self, property: &str) -> Option<NodeId> {
        if self.fullscreen.profile.element_properties.contains(&property) {
            self.fullscreen.element
        } else {
            None
        }
    }

    /// Call `element.<method>()`
    pub fn request_fullscreen_via(&mut self, element: NodeId, method: &str) -> NativeOp {
        if !self.element_has_method(element, method) {
            return settled(Err(FullscreenError::Unsupported(method.to_string())));
        }
        if !self.tree.is_connected(element) {
            self.queue_event(DomEvent::fullscreen_error(element));
            return settled(Err(FullscreenError::NotConnected));
        }
        if self.fullscreen.policy == FullscreenPolicy::Deny {
            tracing::debug!("{} denied for {:?}", method, element);
            self.queue_event(DomEvent::fullscreen_error(element));
            return settled(Err(FullscreenError::NotAllowed));
        }
        if self.fullscreen.element == Some(element) {
            return settled(Ok(()));
        }

        tracing::debug!("{} granted for {:?}", method, element);
        self.fullscreen.element = Some(element);
        self.queue_change_events(element);
        settled(Ok(()))
    }

    /// Call `document.<method>()`. Exiting while nothing is fullscreen
    /// resolves without firing events.
    pub fn exit_fullscreen_via(&mut self, method: &str) -> NativeOp {
        if !self.document_has_method(method) {
            return settled(Err(FullscreenError::Unsupported(method.to_string())));
        }
        if let Some(element) = self.fullscreen.element.take() {
            tracing::debug!("{} left fullscreen for {:?}", method, element);
            self.queue_change_events(element);
        }
        settled(Ok(()))
    }

    /// The user agent leaves fullscreen on its own (Esc, tab switch, ...).
    /// Returns false if nothing was fullscreen.
    pub fn revoke_fullscreen(&mut self) -> bool {
        match self.fullscreen.element.take() {
            Some(element) => {
                tracing::debug!("User agent revoked fullscreen for {:?}", element);
                self.queue_change_events(element);
                true
            }
            None => false,
        }
    }

    fn queue_change_events(&mut self, target: NodeId) {
        let events = self.fullscreen.profile.change_events.clone();
        for event_type in events {
            self.queue_event(DomEvent::fullscreen_change(event_type, target));
        }
    }
}
