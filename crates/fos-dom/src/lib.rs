//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with the pieces an embedded control needs from its
//! host page: class lists, inline style, document-level event listeners, a
//! cooperative event loop and the native Fullscreen API surface.

mod classlist;
mod document;
mod dom_events;
mod event_loop;
mod fullscreen;
mod node;
mod tree;

pub use classlist::DOMTokenList;
pub use document::Document;
pub use dom_events::{DomEvent, DomEventType, EventListeners, ListenerId};
pub use event_loop::{EventLoop, FrameId, TimerId};
pub use fullscreen::{FullscreenError, FullscreenPolicy, NativeFullscreen, NativeOp, UserAgentProfile};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
