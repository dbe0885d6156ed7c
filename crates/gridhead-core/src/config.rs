//! Grid-wide column manager configuration.
//!
//! [`ManagerConfig`] is read-only to the layout engines. It can be built in
//! code, or loaded from TOML or JSON at startup:
//!
//! ```toml
//! # gridhead.toml
//! default_resizable = true
//! moveable = true
//! min_column_width = 10
//! default_column_width = "10%"
//! ```
//!
//! ```rust,ignore
//! let config = ManagerConfig::from_toml_file("gridhead.toml")?;
//! let config = ManagerConfig::from_json_str(json)?;
//! ```
//!
//! `min_column_width` and `default_column_width` are required in files; the
//! remaining fields fall back to [`ManagerConfig::default`]. Every loader
//! validates, so a config that loads is safe to hand to the header assembler.
//! A missing required field is reported alongside range problems as
//! [`GridError::InvalidConfiguration`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::percent::Percent;

/// Prefix applied to every generated class name.
pub const DEFAULT_CLASS_PREFIX: &str = "gridhead";

/// Grid-wide resizability, moveability and width defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ManagerConfigFile")]
pub struct ManagerConfig {
    /// Grid-level resizability override. Wins over `default_resizable`,
    /// loses to a column's own flag.
    #[serde(default)]
    pub resizable: Option<bool>,
    #[serde(default = "default_true")]
    pub default_resizable: bool,
    /// Grid-level moveability override.
    #[serde(default)]
    pub moveable: Option<bool>,
    #[serde(default)]
    pub default_moveable: bool,
    /// Neither column of a resized pair may render narrower than this.
    pub min_column_width: Percent,
    /// Width used for columns that declare none.
    pub default_column_width: Percent,
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,
}

/// On-disk form of [`ManagerConfig`]. Required fields are optional here so
/// their absence becomes a validation problem instead of a parse error.
#[derive(Debug, Deserialize)]
struct ManagerConfigFile {
    #[serde(default)]
    resizable: Option<bool>,
    #[serde(default = "default_true")]
    default_resizable: bool,
    #[serde(default)]
    moveable: Option<bool>,
    #[serde(default)]
    default_moveable: bool,
    #[serde(default)]
    min_column_width: Option<Percent>,
    #[serde(default)]
    default_column_width: Option<Percent>,
    #[serde(default = "default_class_prefix")]
    class_prefix: String,
}

impl TryFrom<ManagerConfigFile> for ManagerConfig {
    type Error = GridError;

    fn try_from(file: ManagerConfigFile) -> Result<Self, GridError> {
        let mut missing = Vec::new();
        let fallback = Self::default();
        let min_column_width = file.min_column_width.unwrap_or_else(|| {
            missing.push("min_column_width is required".to_owned());
            fallback.min_column_width
        });
        let default_column_width = file.default_column_width.unwrap_or_else(|| {
            missing.push("default_column_width is required".to_owned());
            fallback.default_column_width
        });

        let config = Self {
            resizable: file.resizable,
            default_resizable: file.default_resizable,
            moveable: file.moveable,
            default_moveable: file.default_moveable,
            min_column_width,
            default_column_width,
            class_prefix: file.class_prefix,
        };
        if missing.is_empty() {
            return config.validated();
        }
        missing.extend(config.validate());
        Err(GridError::InvalidConfiguration { problems: missing })
    }
}

fn default_true() -> bool {
    true
}

fn default_class_prefix() -> String {
    DEFAULT_CLASS_PREFIX.to_owned()
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            resizable: None,
            default_resizable: true,
            moveable: None,
            default_moveable: false,
            min_column_width: Percent::new(10.0),
            default_column_width: Percent::new(10.0),
            class_prefix: default_class_prefix(),
        }
    }
}

impl ManagerConfig {
    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, GridError> {
        let file: ManagerConfigFile = toml::from_str(s)?;
        Self::try_from(file)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, GridError> {
        let file: ManagerConfigFile = serde_json::from_str(s)?;
        Self::try_from(file)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GridError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let min = self.min_column_width.get();
        if !min.is_finite() || min <= 0.0 || min >= 100.0 {
            problems.push(format!("min_column_width must be in (0, 100), got {min}"));
        }

        if !self.default_column_width.is_declarable() {
            problems.push(format!(
                "default_column_width must be in (0, 100], got {}",
                self.default_column_width.get()
            ));
        }

        if self.class_prefix.chars().any(char::is_whitespace) {
            problems.push(format!(
                "class_prefix must not contain whitespace, got {:?}",
                self.class_prefix
            ));
        }

        problems
    }

    /// Consume the config, returning it only if [`validate`](Self::validate)
    /// finds no problems.
    pub fn validated(self) -> Result<Self, GridError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(self)
        } else {
            Err(GridError::InvalidConfiguration { problems })
        }
    }

    /// Apply the class prefix: `"resizable"` becomes `"gridhead-resizable"`.
    #[must_use]
    pub fn prefixed(&self, class: &str) -> String {
        if self.class_prefix.is_empty() {
            class.to_owned()
        } else {
            format!("{}-{class}", self.class_prefix)
        }
    }
}
