//! Capability Adapter
//!
//! One interface over the four Fullscreen APIs browsers have shipped. They
//! differ only in names, so each is a descriptor and resolution is a linear
//! probe in fixed priority order: standard, then Gecko, WebKit and Trident.

use fos_dom::{Document, DomEventType, ListenerId, NativeOp, NodeId};

use crate::PSEUDO_FULLSCREEN_CLASS;

/// How fullscreen is currently achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenMode {
    /// A native Fullscreen API reports a fullscreen element
    Native,
    /// The map container carries the pseudo-fullscreen marker
    Pseudo,
    #[default]
    None,
}

impl FullscreenMode {
    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// A vendor flavour of the Fullscreen API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Moz,
    Webkit,
    Ms,
}

impl FullscreenApi {
    /// Probe order
    pub const PRIORITY: [FullscreenApi; 4] = [Self::Standard, Self::Moz, Self::Webkit, Self::Ms];

    /// Request method on `Element`
    pub fn request_method(self) -> &'static str {
        match self {
            Self::Standard => "requestFullscreen",
            Self::Moz => "mozRequestFullScreen",
            Self::Webkit => "webkitRequestFullscreen",
            Self::Ms => "msRequestFullscreen",
        }
    }

    /// Exit method on `Document`
    pub fn exit_method(self) -> &'static str {
        match self {
            Self::Standard => "exitFullscreen",
            Self::Moz => "mozCancelFullScreen",
            Self::Webkit => "webkitExitFullscreen",
            Self::Ms => "msExitFullscreen",
        }
    }

    /// Fullscreen element property on `Document`
    pub fn element_property(self) -> &'static str {
        match self {
            Self::Standard => "fullscreenElement",
            Self::Moz => "mozFullScreenElement",
            Self::Webkit => "webkitFullscreenElement",
            Self::Ms => "msFullscreenElement",
        }
    }

    /// Change event fired at document level
    pub fn change_event(self) -> DomEventType {
        match self {
            Self::Standard => DomEventType::FullscreenChange,
            Self::Moz => DomEventType::MozFullscreenChange,
            Self::Webkit => DomEventType::WebkitFullscreenChange,
            Self::Ms => DomEventType::MsFullscreenChange,
        }
    }
}

/// Which path a request/exit took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPath {
    Native(FullscreenApi),
    Pseudo,
}

/// A started request/exit. Native operations may still be pending; the
/// pseudo fallback is already applied and its `op` resolves immediately.
pub struct Transition {
    pub path: TransitionPath,
    pub op: NativeOp,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Capability adapter. Remembers only the API it last resolved.
#[derive(Debug, Default)]
pub struct CapabilityAdapter {
    resolved: Option<FullscreenApi>,
}

impl CapabilityAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// API used by the last native request/exit
    pub fn resolved(&self) -> Option<FullscreenApi> {
        self.resolved
    }

    /// Element any vendor API reports as fullscreen
    pub fn native_element(doc: &Document) -> Option<NodeId> {
        FullscreenApi::PRIORITY
            .iter()
            .find_map(|api| doc.fullscreen_element_by(api.element_property()))
    }

    /// Current mode of `element`. This is the only place the pseudo marker is
    /// read back.
    pub fn mode(&self, doc: &Document, element: NodeId) -> FullscreenMode {
        if Self::native_element(doc).is_some() {
            FullscreenMode::Native
        } else if doc
            .tree
            .element(element)
            .is_some_and(|el| el.class_list.contains(PSEUDO_FULLSCREEN_CLASS))
        {
            FullscreenMode::Pseudo
        } else {
            FullscreenMode::None
        }
    }

    pub fn is_fullscreen(&self, doc: &Document, element: NodeId) -> bool {
        self.mode(doc, element).is_active()
    }

    /// Request fullscreen on `element` through the first API it exposes,
    /// falling back to the pseudo marker.
    pub fn request_fullscreen(&mut self, doc: &mut Document, element: NodeId) -> Transition {
        let api = FullscreenApi::PRIORITY
            .into_iter()
            .find(|api| doc.element_has_method(element, api.request_method()));

        match api {
            Some(api) => {
                tracing::debug!("Requesting fullscreen via {}", api.request_method());
                self.resolved = Some(api);
                Transition {
                    path: TransitionPath::Native(api),
                    op: doc.request_fullscreen_via(element, api.request_method()),
                }
            }
            None => {
                tracing::debug!("No native fullscreen API, applying {}", PSEUDO_FULLSCREEN_CLASS);
                set_pseudo_marker(doc, element, true);
                Transition {
                    path: TransitionPath::Pseudo,
                    op: Box::pin(smol::future::ready(Ok(()))),
                }
            }
        }
    }

    /// Exit fullscreen through the first API the document exposes, falling
    /// back to removing the pseudo marker from `element`.
    pub fn exit_fullscreen(&mut self, doc: &mut Document, element: NodeId) -> Transition {
        let api = FullscreenApi::PRIORITY
            .into_iter()
            .find(|api| doc.document_has_method(api.exit_method()));

        match api {
            Some(api) => {
                tracing::debug!("Exiting fullscreen via {}", api.exit_method());
                self.resolved = Some(api);
                Transition {
                    path: TransitionPath::Native(api),
                    op: doc.exit_fullscreen_via(api.exit_method()),
                }
            }
            None => {
                set_pseudo_marker(doc, element, false);
                Transition {
                    path: TransitionPath::Pseudo,
                    op: Box::pin(smol::future::ready(Ok(()))),
                }
            }
        }
    }

    /// Listen for every vendor's change event at document level
    pub fn subscribe(doc: &mut Document) -> Vec<(FullscreenApi, ListenerId)> {
        let root = doc.tree.root();
        FullscreenApi::PRIORITY
            .into_iter()
            .map(|api| (api, doc.add_event_listener(root, api.change_event())))
            .collect()
    }

    /// Remove the pseudo marker from `element`. Returns true if it was set.
    pub fn clear_pseudo_marker(doc: &mut Document, element: NodeId) -> bool {
        doc.tree
            .element_mut(element)
            .is_some_and(|el| el.class_list.remove(PSEUDO_FULLSCREEN_CLASS))
    }

    /// Release listener handles. Returns how many were still registered.
    pub fn unsubscribe(doc: &mut Document, handles: impl IntoIterator<Item = ListenerId>) -> usize {
        handles
            .into_iter()
            .filter(|&id| doc.remove_event_listener(id))
            .count()
    }
}

fn set_pseudo_marker(doc: &mut Document, element: NodeId, on: bool) {
    match doc.tree.element_mut(element) {
        Some(el) => {
            el.class_list.toggle(PSEUDO_FULLSCREEN_CLASS, Some(on));
        }
        None => tracing::warn!("Pseudo-fullscreen target {:?} is not an element", element),
    }
}
