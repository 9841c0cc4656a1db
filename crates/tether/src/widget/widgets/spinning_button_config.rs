//! Declarative configuration for [`SpinningButton`](super::SpinningButton).
//!
//! ```
//! use tether::widget::widgets::SpinningButtonConfig;
//!
//! let config = SpinningButtonConfig::from_toml_str(r##"
//! text = "Sync wallet"
//! timeout_secs = 30
//! spinner_color = "#1e88e5"
//!
//! [icon_size]
//! width = 24
//! height = 24
//! "##).unwrap();
//!
//! assert_eq!(config.timeout_secs, 30);
//! assert!(config.disable_while_spinning);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use tether_render::Size;

use crate::error::Result;

/// Icon display size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IconDimensions {
    pub width: f32,
    pub height: f32,
}

impl Default for IconDimensions {
    fn default() -> Self {
        Self {
            width: 18.0,
            height: 18.0,
        }
    }
}

impl From<IconDimensions> for Size {
    fn from(d: IconDimensions) -> Self {
        Size::new(d.width, d.height)
    }
}

/// Settings for a spinning button. Every field has a default, so an empty
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinningButtonConfig {
    /// Button label.
    pub text: String,

    /// Seconds before spinning stops on its own. Zero disables the timeout.
    pub timeout_secs: u64,

    /// Disable the button while it spins.
    pub disable_while_spinning: bool,

    /// Space reserved on each side of the icon.
    pub padding: f32,

    /// Custom spinner SVG. The built-in ring is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinner_svg: Option<String>,

    /// `#rrggbb` color substituted for `currentColor` in the spinner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spinner_color: Option<String>,

    /// Theme icon name shown while idle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_icon: Option<String>,

    /// Kept last so it serializes as a trailing table.
    pub icon_size: IconDimensions,
}

impl Default for SpinningButtonConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            timeout_secs: 60,
            disable_while_spinning: true,
            padding: 3.0,
            spinner_svg: None,
            spinner_color: None,
            enabled_icon: None,
            icon_size: IconDimensions::default(),
        }
    }
}

impl SpinningButtonConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// Serialize to a TOML document.
    ///
    /// Fails for values TOML cannot represent, such as a `timeout_secs`
    /// above `i64::MAX`.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_document_is_default() {
        let config = SpinningButtonConfig::from_toml_str("").unwrap();
        assert_eq!(config, SpinningButtonConfig::default());
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.icon_size, IconDimensions { width: 18.0, height: 18.0 });
        assert_eq!(config.padding, 3.0);
    }

    #[test]
    fn test_partial_document() {
        let config = SpinningButtonConfig::from_toml_str(
            r#"
            text = "Broadcast"
            timeout_secs = 0
            disable_while_spinning = false
            enabled_icon = "mail-send"
            "#,
        )
        .unwrap();

        assert_eq!(config.text, "Broadcast");
        assert_eq!(config.timeout_secs, 0);
        assert!(!config.disable_while_spinning);
        assert_eq!(config.enabled_icon.as_deref(), Some("mail-send"));
        assert!(config.spinner_svg.is_none());
    }

    #[test]
    fn test_rejects_wrong_types() {
        let err = SpinningButtonConfig::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_string_reparses() {
        let config = SpinningButtonConfig {
            text: "Sync".into(),
            spinner_color: Some("#ff0000".into()),
            ..Default::default()
        };
        let reparsed = SpinningButtonConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_unrepresentable_timeout_fails_to_serialize() {
        let config = SpinningButtonConfig {
            timeout_secs: u64::MAX,
            ..Default::default()
        };
        let err = config.to_toml_string().unwrap_err();
        assert!(matches!(err, Error::Serialize(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SpinningButtonConfig::load("/nonexistent/tether/button.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
