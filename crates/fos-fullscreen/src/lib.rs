//! fOS Fullscreen - map fullscreen toggle control
//!
//! A button attached to a map page that puts the map viewport into
//! fullscreen. It uses whichever native Fullscreen API the user agent exposes
//! (standard or one of the legacy vendor-prefixed variants) and falls back to
//! a CSS pseudo-fullscreen when none is available.
//!
//! # Example
//! ```rust,ignore
//! use fos_dom::UserAgentProfile;
//! use fos_fullscreen::{ControlConfiguration, MapPage};
//!
//! let config = ControlConfiguration::default()
//!     .on_fullscreen_change(|on| println!("fullscreen: {on}"));
//! let mut page = MapPage::new(UserAgentProfile::standard(), config);
//! page.attach()?;
//! page.click_control();
//! ```

mod adapter;
mod config;
mod control;
mod error;
mod host;
mod icon;
mod notify;
mod page;
mod schedule;
mod styles;

pub use adapter::{CapabilityAdapter, FullscreenApi, FullscreenMode, Transition, TransitionPath};
pub use config::{ControlConfiguration, ControlPosition, FullscreenCallback, Messages};
pub use control::{Affordance, FullscreenControl};
pub use error::{ConfigError, ControlError};
pub use host::{ControlContext, MapViewport, MapWidget};
pub use icon::{BuiltinIcon, IconSource};
pub use notify::{NoticePhase, Notifier};
pub use page::MapPage;
pub use schedule::{ControlTask, Throttle};

/// Class marking the control's clickable surface
pub const CONTROL_CLASS: &str = "leaflet-control-fullscreen";

/// Class the pseudo-fullscreen fallback puts on the map container
pub const PSEUDO_FULLSCREEN_CLASS: &str = "pseudo-fullscreen";

/// Class of the transient notice element
pub const NOTIFICATION_CLASS: &str = "leaflet-control-fullscreen-notification";

/// Key that toggles fullscreen at document level
pub const TOGGLE_KEY: &str = "F11";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
