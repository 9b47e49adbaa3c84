//! Map host seam
//!
//! What the control needs from the map widget it is attached to.

use fos_dom::{Document, EventLoop, NodeId};

use crate::schedule::ControlTask;

/// The map widget a control is attached to
pub trait MapWidget {
    /// Viewport element that enters/exits fullscreen and hosts notices
    fn container(&self) -> NodeId;

    /// Recompute the rendered extent after the container was resized
    fn invalidate_size(&mut self);
}

/// Everything a control touches while handling one call
pub struct ControlContext<'a> {
    pub document: &'a mut Document,
    pub event_loop: &'a mut EventLoop<ControlTask>,
    pub map: &'a mut dyn MapWidget,
}

/// Minimal map viewport: a `div.leaflet-container` in the body that counts
/// layout invalidations
#[derive(Debug)]
pub struct MapViewport {
    container: NodeId,
    invalidations: u32,
}

impl MapViewport {
    /// Create the viewport element and mount it in `<body>`
    pub fn create(doc: &mut Document) -> Self {
        let container = doc.tree.create_element("div");
        if let Some(el) = doc.tree.element_mut(container) {
            el.set_attr("id", "map");
            el.set_attr("class", "leaflet-container");
        }
        let body = doc.body();
        doc.tree.append_child(body, container);
        Self {
            container,
            invalidations: 0,
        }
    }

    /// How many times layout was invalidated
    pub fn invalidations(&self) -> u32 {
        self.invalidations
    }
}

impl MapWidget for MapViewport {
    fn container(&self) -> NodeId {
        self.container
    }

    fn invalidate_size(&mut self) {
        self.invalidations += 1;
        tracing::trace!("Map size invalidated ({})", self.invalidations);
    }
}
