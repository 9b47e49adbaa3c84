//! Control errors

use fos_dom::FullscreenError;

/// Errors from driving the control
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Error attempting to enable full-screen mode: {0} ({name})", name = .0.name())]
    Enable(#[source] FullscreenError),

    #[error("Error attempting to disable full-screen mode: {0} ({name})", name = .0.name())]
    Disable(#[source] FullscreenError),

    #[error("Fullscreen control is not attached to a map")]
    NotAttached,

    #[error("Fullscreen control is already attached to a map")]
    AlreadyAttached,
}

impl ControlError {
    /// True for rejections of a native request/exit
    pub fn is_native_failure(&self) -> bool {
        matches!(self, Self::Enable(_) | Self::Disable(_))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid control configuration: {0}")]
    Json(#[from] serde_json::Error),
}
