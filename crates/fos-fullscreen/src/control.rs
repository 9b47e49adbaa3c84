//! Fullscreen Controller
//!
//! Owns the toggle state machine. Transitions come from two sources: the user
//! (click on the control, the fullscreen key) and the platform (native change
//! events, e.g. the user leaving fullscreen with Esc). Both end in one change
//! handler that re-reads the real state, syncs the icon and defers the
//! observer callback and notice to the next animation frame. Platform events
//! are throttled; one dropped inside the window is re-handled when it closes.

use fos_dom::{Document, DomEvent, DomEventType, FrameId, ListenerId, NodeId, TimerId};

use crate::adapter::{CapabilityAdapter, FullscreenApi, FullscreenMode, TransitionPath};
use crate::config::ControlConfiguration;
use crate::error::ControlError;
use crate::host::ControlContext;
use crate::notify::Notifier;
use crate::schedule::{ControlTask, Throttle};
use crate::{CONTROL_CLASS, TOGGLE_KEY, styles};

/// Icon and tooltip shown for a state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    /// `background-image` value
    pub background: String,
    pub title: String,
}

impl Affordance {
    pub fn for_mode(mode: FullscreenMode, config: &ControlConfiguration) -> Self {
        if mode.is_active() {
            Self {
                background: config.exit_icon().css_background(),
                title: config.exit_title.clone(),
            }
        } else {
            Self {
                background: config.enter_icon().css_background(),
                title: config.enter_title.clone(),
            }
        }
    }

    /// Before the first transition: enter icon, generic title
    pub fn initial(config: &ControlConfiguration) -> Self {
        Self {
            background: config.enter_icon().css_background(),
            title: config.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubscriptionKind {
    Click,
    ToggleKey,
    Change(FullscreenApi),
}

#[derive(Debug, Clone, Copy)]
struct Subscription {
    id: ListenerId,
    kind: SubscriptionKind,
}

/// The fullscreen toggle control
#[derive(Debug)]
pub struct FullscreenControl {
    config: ControlConfiguration,
    adapter: CapabilityAdapter,
    /// Clickable surface, owned
    container: Option<NodeId>,
    /// Map viewport that goes fullscreen, borrowed from the host
    target: Option<NodeId>,
    subscriptions: Vec<Subscription>,
    /// Set from a detected change until its deferred dispatch has run
    is_handling_change: bool,
    pending_dispatch: Option<FrameId>,
    /// Trailing re-sync for platform events dropped by the throttle
    pending_sync: Option<TimerId>,
    throttle: Throttle,
    notifier: Notifier,
    /// State last reported to observers
    reported_active: bool,
}

impl FullscreenControl {
    pub fn new(config: ControlConfiguration) -> Self {
        Self {
            config,
            adapter: CapabilityAdapter::new(),
            container: None,
            target: None,
            subscriptions: Vec::new(),
            is_handling_change: false,
            pending_dispatch: None,
            pending_sync: None,
            throttle: Throttle::default(),
            notifier: Notifier::new(),
            reported_active: false,
        }
    }

    pub fn config(&self) -> &ControlConfiguration {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.container.is_some()
    }

    /// The control's DOM surface
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn is_handling_change(&self) -> bool {
        self.is_handling_change
    }

    /// Element of the live notice, if any
    pub fn notification(&self) -> Option<NodeId> {
        self.notifier.active_element()
    }

    /// Number of live event subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Queried mode of the map container
    pub fn mode(&self, doc: &Document) -> FullscreenMode {
        self.target
            .map(|target| self.adapter.mode(doc, target))
            .unwrap_or_default()
    }

    /// Create the control surface and wire events. Returns the element the
    /// host should mount.
    pub fn on_attach(&mut self, ctx: &mut ControlContext<'_>) -> Result<NodeId, ControlError> {
        if self.is_attached() {
            return Err(ControlError::AlreadyAttached);
        }
        let doc = &mut *ctx.document;
        styles::install(doc);

        let container = doc.tree.create_element("div");
        if let Some(el) = doc.tree.element_mut(container) {
            el.set_attr("class", "leaflet-control-fullscreen leaflet-bar leaflet-control");
            el.set_attr("role", "button");
        }
        let target = ctx.map.container();
        self.container = Some(container);
        self.target = Some(target);
        self.apply_affordance(doc, &Affordance::initial(&self.config));

        let root = doc.tree.root();
        self.subscriptions.push(Subscription {
            id: doc.add_event_listener(container, DomEventType::Click),
            kind: SubscriptionKind::Click,
        });
        self.subscriptions.push(Subscription {
            id: doc.add_event_listener(root, DomEventType::KeyDown),
            kind: SubscriptionKind::ToggleKey,
        });
        self.subscriptions.extend(
            CapabilityAdapter::subscribe(doc)
                .into_iter()
                .map(|(api, id)| Subscription {
                    id,
                    kind: SubscriptionKind::Change(api),
                }),
        );

        self.throttle.reset();
        self.reported_active = false;
        tracing::info!(
            "Fullscreen control attached to {:?} ({}, {} listeners)",
            target,
            self.config.position.as_str(),
            self.subscriptions.len()
        );
        Ok(container)
    }

    /// Release listeners, cancel pending work and unmount the surface
    pub fn on_detach(&mut self, ctx: &mut ControlContext<'_>) {
        let Some(container) = self.container.take() else {
            tracing::debug!("Fullscreen control detached while not attached");
            return;
        };

        let released =
            CapabilityAdapter::unsubscribe(ctx.document, self.subscriptions.drain(..).map(|s| s.id));
        if let Some(frame) = self.pending_dispatch.take() {
            ctx.event_loop.cancel_animation_frame(frame);
        }
        if let Some(timer) = self.pending_sync.take() {
            ctx.event_loop.clear_timeout(timer);
        }
        self.is_handling_change = false;
        self.notifier.dismiss(ctx.document, ctx.event_loop);
        ctx.document.tree.remove_child(container);

        // Nothing is left to leave pseudo-fullscreen with
        if let Some(target) = self.target.take() {
            if CapabilityAdapter::clear_pseudo_marker(ctx.document, target) {
                ctx.map.invalidate_size();
                tracing::info!("Left pseudo-fullscreen on detach");
            }
        }

        tracing::info!("Fullscreen control detached ({} listeners released)", released);
    }

    /// Route an event delivered to one of our listener handles
    pub async fn handle_event(
        &mut self,
        ctx: &mut ControlContext<'_>,
        listener: ListenerId,
        event: &mut DomEvent,
    ) {
        let Some(subscription) = self.subscriptions.iter().find(|s| s.id == listener).copied() else {
            return;
        };

        match subscription.kind {
            SubscriptionKind::Click => {
                self.toggle_fullscreen(ctx).await;
            }
            SubscriptionKind::ToggleKey => {
                if event.key.as_deref() != Some(TOGGLE_KEY) {
                    return;
                }
                event.prevent_default();
                if self.config.keyboard_toggle {
                    self.toggle_fullscreen(ctx).await;
                }
            }
            SubscriptionKind::Change(api) => {
                tracing::debug!("{} received", api.change_event().name());
                self.on_change_notification(ctx);
            }
        }
    }

    /// Enter or leave fullscreen. Failures are logged and, if enabled, shown
    /// as a notice; the returned mode is the queried state afterwards.
    pub async fn toggle_fullscreen(&mut self, ctx: &mut ControlContext<'_>) -> FullscreenMode {
        match self.try_toggle(ctx).await {
            Ok(mode) => mode,
            Err(err) => {
                if err.is_native_failure() {
                    tracing::error!("{}", err);
                    if self.config.show_notification {
                        self.show_notice(ctx, NoticeKind::Error);
                    }
                } else {
                    tracing::warn!("{}", err);
                }
                self.mode(ctx.document)
            }
        }
    }

    async fn try_toggle(&mut self, ctx: &mut ControlContext<'_>) -> Result<FullscreenMode, ControlError> {
        let target = self.target.ok_or(ControlError::NotAttached)?;
        let entering = !self.adapter.mode(ctx.document, target).is_active();

        let transition = if entering {
            self.adapter.request_fullscreen(ctx.document, target)
        } else {
            self.adapter.exit_fullscreen(ctx.document, target)
        };
        let path = transition.path;

        match transition.op.await {
            Ok(()) => {}
            Err(err) if entering => return Err(ControlError::Enable(err)),
            Err(err) => return Err(ControlError::Disable(err)),
        }

        let assumed = match (entering, path) {
            (false, _) => FullscreenMode::None,
            (true, TransitionPath::Pseudo) => FullscreenMode::Pseudo,
            (true, TransitionPath::Native(_)) => FullscreenMode::Native,
        };
        self.update_icon(ctx.document, assumed);
        // Pseudo transitions fire no native event, so signal the change ourselves
        self.handle_fullscreen_change(ctx);

        Ok(self.adapter.mode(ctx.document, target))
    }

    /// Throttled entry point for platform change notifications. The icon is
    /// synced on every notification; a dropped one is re-handled once the
    /// window closes.
    fn on_change_notification(&mut self, ctx: &mut ControlContext<'_>) {
        let Some(target) = self.target else {
            return;
        };
        let mode = self.adapter.mode(ctx.document, target);
        self.update_icon(ctx.document, mode);

        let now = ctx.event_loop.now();
        if self.throttle.try_fire(now) {
            self.handle_fullscreen_change(ctx);
        } else if self.pending_sync.is_none() {
            let delay = self.throttle.remaining(now);
            tracing::debug!("Fullscreen change throttled, re-syncing in {} ms", delay);
            self.pending_sync = Some(ctx.event_loop.set_timeout(ControlTask::SyncChange, delay));
        } else {
            tracing::debug!("Fullscreen change throttled, re-sync already scheduled");
        }
    }

    /// Sync the surface with the real state and schedule the dispatch
    pub fn handle_fullscreen_change(&mut self, ctx: &mut ControlContext<'_>) {
        let Some(target) = self.target else {
            return;
        };
        let mode = self.adapter.mode(ctx.document, target);
        self.update_icon(ctx.document, mode);
        ctx.map.invalidate_size();

        if self.is_handling_change {
            tracing::debug!("Fullscreen change already being dispatched");
            return;
        }
        self.is_handling_change = true;
        self.pending_dispatch = Some(ctx.event_loop.request_animation_frame(ControlTask::DispatchChange));
    }

    /// Run a task previously handed to the event loop
    pub fn run_task(&mut self, ctx: &mut ControlContext<'_>, task: ControlTask) {
        match task {
            ControlTask::DispatchChange => self.dispatch_change(ctx),
            ControlTask::SyncChange => {
                self.pending_sync = None;
                self.throttle.try_fire(ctx.event_loop.now());
                self.handle_fullscreen_change(ctx);
            }
            ControlTask::FadeNotification(_) | ControlTask::RemoveNotification(_) => {
                self.notifier.run(ctx.document, ctx.event_loop, task)
            }
        }
    }

    fn dispatch_change(&mut self, ctx: &mut ControlContext<'_>) {
        self.pending_dispatch = None;
        let Some(target) = self.target else {
            self.is_handling_change = false;
            return;
        };

        let mode = self.adapter.mode(ctx.document, target);
        self.update_icon(ctx.document, mode);
        let active = mode.is_active();

        if active != self.reported_active {
            self.reported_active = active;
            tracing::info!(
                "Fullscreen {} ({:?})",
                if active { "entered" } else { "exited" },
                mode
            );
            if let Some(callback) = self.config.on_fullscreen_change.as_mut() {
                callback(active);
            }
            if self.config.show_notification {
                let kind = if active { NoticeKind::On } else { NoticeKind::Off };
                self.show_notice(ctx, kind);
            }
        } else {
            tracing::debug!("Fullscreen state unchanged ({:?}), nothing to report", mode);
        }

        self.is_handling_change = false;
    }

    fn show_notice(&mut self, ctx: &mut ControlContext<'_>, kind: NoticeKind) {
        let Some(host) = self.target else {
            return;
        };
        let messages = &self.config.messages;
        let message = match kind {
            NoticeKind::On => &messages.on,
            NoticeKind::Off => &messages.off,
            NoticeKind::Error => &messages.error,
        };
        self.notifier.show(ctx.document, ctx.event_loop, host, message);
    }

    fn update_icon(&self, doc: &mut Document, mode: FullscreenMode) {
        self.apply_affordance(doc, &Affordance::for_mode(mode, &self.config));
    }

    fn apply_affordance(&self, doc: &mut Document, affordance: &Affordance) {
        let Some(container) = self.container else {
            return;
        };
        let Some(el) = doc
            .tree
            .element_mut(container)
            .filter(|el| el.class_list.contains(CONTROL_CLASS))
        else {
            tracing::warn!("Control surface {:?} is not a fullscreen control, icon left as is", container);
            return;
        };
        el.set_style_property("background-image", &affordance.background);
        el.set_attr("title", &affordance.title);
    }
}

#[derive(Debug, Clone, Copy)]
enum NoticeKind {
    On,
    Off,
    Error,
}
