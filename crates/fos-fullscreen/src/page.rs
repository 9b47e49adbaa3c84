//! Map page driver
//!
//! Owns a document, its event loop, a map viewport and one fullscreen
//! control, and runs the dispatch turns between them: queued DOM events go
//! to the control's listeners, animation-frame callbacks run after each
//! event turn, and timers fire as the clock advances.

use fos_dom::{Document, DomEvent, EventLoop, NodeId, UserAgentProfile};

use crate::adapter::FullscreenMode;
use crate::config::ControlConfiguration;
use crate::control::FullscreenControl;
use crate::error::ControlError;
use crate::host::{ControlContext, MapViewport, MapWidget};
use crate::schedule::ControlTask;
use crate::NOTIFICATION_CLASS;

pub struct MapPage {
    pub document: Document,
    pub event_loop: EventLoop<ControlTask>,
    pub map: MapViewport,
    pub control: FullscreenControl,
}

impl MapPage {
    /// Build a page whose user agent exposes `profile`
    pub fn new(profile: UserAgentProfile, config: ControlConfiguration) -> Self {
        let mut document = Document::with_profile("about:map", profile);
        let map = MapViewport::create(&mut document);
        Self {
            document,
            event_loop: EventLoop::new(),
            map,
            control: FullscreenControl::new(config),
        }
    }

    fn split(&mut self) -> (&mut FullscreenControl, ControlContext<'_>) {
        (
            &mut self.control,
            ControlContext {
                document: &mut self.document,
                event_loop: &mut self.event_loop,
                map: &mut self.map,
            },
        )
    }

    /// Attach the control and mount its surface in the map container
    pub fn attach(&mut self) -> Result<NodeId, ControlError> {
        let (control, mut ctx) = self.split();
        let element = control.on_attach(&mut ctx)?;
        let host = self.map.container();
        self.document.tree.append_child(host, element);
        Ok(element)
    }

    pub fn detach(&mut self) {
        let (control, mut ctx) = self.split();
        control.on_detach(&mut ctx);
    }

    /// Deliver `event` to every listener on its path and return it, so
    /// callers can inspect `is_default_prevented`
    pub fn dispatch(&mut self, event: DomEvent) -> DomEvent {
        let mut event = event.at(self.event_loop.now());
        for listener in self.document.listeners_for(&event) {
            let (control, mut ctx) = self.split();
            smol::block_on(control.handle_event(&mut ctx, listener, &mut event));
        }
        event
    }

    /// Click the control surface. Returns false if it is not mounted.
    pub fn click_control(&mut self) -> bool {
        let Some(container) = self.control.container() else {
            return false;
        };
        self.dispatch(DomEvent::click(container));
        self.pump();
        true
    }

    /// Press a key with focus on `<body>`. Returns whether the default
    /// action was prevented.
    pub fn press_key(&mut self, key: &str) -> bool {
        let body = self.document.body();
        let event = self.dispatch(DomEvent::key_down(body, key));
        self.pump();
        event.is_default_prevented()
    }

    /// Toggle from application code
    pub fn toggle(&mut self) -> FullscreenMode {
        let (control, mut ctx) = self.split();
        let mode = smol::block_on(control.toggle_fullscreen(&mut ctx));
        self.pump();
        mode
    }

    /// Run queued events and animation frames until both are empty
    pub fn pump(&mut self) {
        loop {
            while let Some(event) = self.document.next_queued_event() {
                self.dispatch(event);
            }
            let frame = self.event_loop.take_frame_callbacks();
            if frame.is_empty() {
                break;
            }
            for task in frame {
                self.run_task(task);
            }
        }
    }

    /// Advance the clock by `ms`, firing due timers in order
    pub fn advance(&mut self, ms: u64) {
        let until = self.event_loop.now() + ms;
        self.pump();
        while let Some(task) = self.event_loop.pop_due(until) {
            self.run_task(task);
            self.pump();
        }
        self.event_loop.set_time(until);
    }

    fn run_task(&mut self, task: ControlTask) {
        let (control, mut ctx) = self.split();
        control.run_task(&mut ctx, task);
    }

    /// Notice elements currently mounted in the map container
    pub fn notifications(&self) -> Vec<NodeId> {
        self.document
            .tree
            .elements_with_class(self.map.container(), NOTIFICATION_CLASS)
    }

    /// Text of the live notice
    pub fn notification_text(&self) -> Option<String> {
        self.notifications()
            .first()
            .map(|&id| self.document.tree.text_content(id))
    }

    /// Tooltip of the control surface
    pub fn control_title(&self) -> Option<String> {
        let container = self.control.container()?;
        self.document.tree.element(container)?.title().map(str::to_string)
    }

    /// `background-image` of the control surface
    pub fn control_icon(&self) -> Option<String> {
        let container = self.control.container()?;
        self.document
            .tree
            .element(container)?
            .style_property("background-image")
            .map(str::to_string)
    }

    /// Queried mode of the map container
    pub fn mode(&self) -> FullscreenMode {
        self.control.mode(&self.document)
    }
}
