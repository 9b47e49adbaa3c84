//! Control icons

use serde::Deserialize;

/// Enter icon: four outward corners
const ENTER_ICON_URI: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 24'%3E%3Cpath d='M3 9V3h6M21 9V3h-6M3 15v6h6M21 15v6h-6' fill='none' stroke='%23333' stroke-width='2'/%3E%3C/svg%3E";

/// Exit icon: four inward corners
const EXIT_ICON_URI: &str = "data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 24 24'%3E%3Cpath d='M9 3v6H3M15 3v6h6M9 21v-6H3M15 21v-6h6' fill='none' stroke='%23333' stroke-width='2'/%3E%3C/svg%3E";

/// Built-in vector icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinIcon {
    Enter,
    Exit,
}

/// Where an icon comes from. In JSON: `{"url": "./markers/full_screen.png"}`
/// or `{"builtin": "exit"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    Url(String),
    Builtin(BuiltinIcon),
}

impl IconSource {
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Builtin(BuiltinIcon::Enter) => ENTER_ICON_URI,
            Self::Builtin(BuiltinIcon::Exit) => EXIT_ICON_URI,
        }
    }

    /// Value for the `background-image` property
    pub fn css_background(&self) -> String {
        format!("url(\"{}\")", self.url())
    }
}

impl From<&str> for IconSource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}
