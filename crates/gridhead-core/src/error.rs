//! Error type for configuration loading and validation.

/// Errors raised while building a grid's manager configuration.
///
/// Per-gesture problems (bad cursor positions, unreadable drag payloads) are
/// never errors; they are reported as no-ops by the layout engines.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The configuration is missing required values or holds out-of-range ones.
    #[error("invalid configuration: {}", .problems.join("; "))]
    InvalidConfiguration { problems: Vec<String> },

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[cfg(feature = "toml-config")]
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}
