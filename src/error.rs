//! Configuration validation errors.

/// Error returned when a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An attribute target is neither `class` nor a `data-*` name
    InvalidAttributeTarget { kind: String },
    /// The default theme is not in the configured theme list
    UnknownDefaultTheme { name: String },
    /// A value-map key does not match any configured theme
    UnmappedTheme { name: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidAttributeTarget { kind } => {
                write!(
                    f,
                    "attribute target '{}' is neither 'class' nor a 'data-*' attribute",
                    kind
                )
            }
            ConfigError::UnknownDefaultTheme { name } => {
                write!(f, "default theme '{}' is not a configured theme", name)
            }
            ConfigError::UnmappedTheme { name } => {
                write!(f, "value map entry '{}' does not match any theme", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
