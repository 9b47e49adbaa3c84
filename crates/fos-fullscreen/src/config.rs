//! Control Configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::icon::{BuiltinIcon, IconSource};

/// Observer invoked with the new state after each settled transition
pub type FullscreenCallback = Box<dyn FnMut(bool)>;

/// Map corner the host should place the control in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        }
    }
}

/// Texts of the transient notices
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub on: String,
    pub off: String,
    pub error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            on: "Full-screen mode is ON".to_string(),
            off: "Full-screen mode is OFF".to_string(),
            error: "Error switching to full-screen mode".to_string(),
        }
    }
}

/// Control configuration options. JSON keys follow the map plugin's option
/// names (`enterTitle`, `showNotification`, ...).
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlConfiguration {
    /// Corner hint for the host
    pub position: ControlPosition,

    /// Tooltip before the first transition
    pub title: String,

    /// Icon while not fullscreen (built-in when unset)
    #[serde(alias = "enterFullScreenIcon")]
    pub enter_icon: Option<IconSource>,

    /// Icon while fullscreen (built-in when unset)
    #[serde(alias = "exitFullScreenIcon")]
    pub exit_icon: Option<IconSource>,

    #[serde(alias = "enterFullScreenTitle")]
    pub enter_title: String,

    #[serde(alias = "exitFullScreenTitle")]
    pub exit_title: String,

    /// Show transient notices on transitions and failures
    pub show_notification: bool,

    /// Toggle on the fullscreen key instead of only suppressing it
    pub keyboard_toggle: bool,

    pub messages: Messages,

    #[serde(skip)]
    pub on_fullscreen_change: Option<FullscreenCallback>,
}

impl Default for ControlConfiguration {
    fn default() -> Self {
        Self {
            position: ControlPosition::default(),
            title: "Toggle fullscreen".to_string(),
            enter_icon: None,
            exit_icon: None,
            enter_title: "Enter fullscreen mode".to_string(),
            exit_title: "Exit fullscreen mode".to_string(),
            show_notification: true,
            keyboard_toggle: true,
            messages: Messages::default(),
            on_fullscreen_change: None,
        }
    }
}

impl std::fmt::Debug for ControlConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlConfiguration")
            .field("position", &self.position)
            .field("title", &self.title)
            .field("enter_icon", &self.enter_icon)
            .field("exit_icon", &self.exit_icon)
            .field("enter_title", &self.enter_title)
            .field("exit_title", &self.exit_title)
            .field("show_notification", &self.show_notification)
            .field("keyboard_toggle", &self.keyboard_toggle)
            .field("messages", &self.messages)
            .field("on_fullscreen_change", &self.on_fullscreen_change.is_some())
            .finish()
    }
}

impl ControlConfiguration {
    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_icons(mut self, enter: IconSource, exit: IconSource) -> Self {
        self.enter_icon = Some(enter);
        self.exit_icon = Some(exit);
        self
    }

    pub fn with_titles(mut self, enter: impl Into<String>, exit: impl Into<String>) -> Self {
        self.enter_title = enter.into();
        self.exit_title = exit.into();
        self
    }

    pub fn with_notifications(mut self, show: bool) -> Self {
        self.show_notification = show;
        self
    }

    pub fn with_keyboard_toggle(mut self, toggle: bool) -> Self {
        self.keyboard_toggle = toggle;
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Set the change observer
    pub fn on_fullscreen_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_fullscreen_change = Some(Box::new(callback));
        self
    }

    /// Effective enter icon
    pub fn enter_icon(&self) -> IconSource {
        self.enter_icon
            .clone()
            .unwrap_or(IconSource::Builtin(BuiltinIcon::Enter))
    }

    /// Effective exit icon
    pub fn exit_icon(&self) -> IconSource {
        self.exit_icon
            .clone()
            .unwrap_or(IconSource::Builtin(BuiltinIcon::Exit))
    }
}
