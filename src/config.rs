//! Controller configuration.

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::scheme::SYSTEM;

/// Where the active theme is written on the document's root element.
///
/// A theme is signaled to styling rules either through the class list or
/// through a `data-*` attribute. Several targets may be active at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeTarget {
    /// Toggle the mapped value in the root element's class list.
    ClassList,
    /// Write the mapped value to the named `data-*` attribute.
    Data(String),
}

impl AttributeTarget {
    /// Creates a data-attribute target, rejecting names without the
    /// `data-` prefix.
    pub fn data(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.starts_with("data-") && name.len() > "data-".len() {
            Ok(AttributeTarget::Data(name))
        } else {
            Err(ConfigError::InvalidAttributeTarget { kind: name })
        }
    }

    /// Parses a target from its attribute spelling: `"class"` or a
    /// `data-*` name. Anything else is rejected.
    pub fn parse(kind: &str) -> Result<Self, ConfigError> {
        if kind == "class" {
            Ok(AttributeTarget::ClassList)
        } else {
            Self::data(kind)
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            AttributeTarget::ClassList => true,
            AttributeTarget::Data(name) => {
                name.starts_with("data-") && name.len() > "data-".len()
            }
        }
    }
}

impl std::fmt::Display for AttributeTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeTarget::ClassList => f.write_str("class"),
            AttributeTarget::Data(name) => f.write_str(name),
        }
    }
}

/// Configuration for a [`ThemeController`](crate::ThemeController).
///
/// Built once with a fluent API and immutable afterwards; the controller
/// validates it at construction.
///
/// # Defaults
///
/// - themes: `light`, `dark`
/// - default theme: `system`
/// - storage key: `theme`
/// - target: `data-theme`
/// - system detection: on
/// - `color-scheme` hint: on
/// - transition suppression: off
///
/// # Example
///
/// ```rust
/// use umbra::{AttributeTarget, ThemeConfig};
///
/// let config = ThemeConfig::new()
///     .themes(["light", "dark", "sepia"])
///     .default_theme("sepia")
///     .storage_key("app-theme")
///     .target(AttributeTarget::ClassList)
///     .value("sepia", "theme-sepia");
/// ```
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    themes: Vec<String>,
    default_theme: String,
    forced_theme: Option<String>,
    enable_system: bool,
    enable_color_scheme: bool,
    disable_transitions: bool,
    storage_key: String,
    targets: Vec<AttributeTarget>,
    targets_overridden: bool,
    values: BTreeMap<String, String>,
    nonce: Option<String>,
    script_attrs: Vec<(String, String)>,
}

impl ThemeConfig {
    /// Creates a configuration with the defaults listed above.
    pub fn new() -> Self {
        Self {
            themes: vec!["light".to_string(), "dark".to_string()],
            default_theme: SYSTEM.to_string(),
            forced_theme: None,
            enable_system: true,
            enable_color_scheme: true,
            disable_transitions: false,
            storage_key: "theme".to_string(),
            targets: vec![AttributeTarget::Data("data-theme".to_string())],
            targets_overridden: false,
            values: BTreeMap::new(),
            nonce: None,
            script_attrs: Vec::new(),
        }
    }

    /// Replaces the list of known theme names.
    pub fn themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the theme used when storage yields no value.
    pub fn default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = name.into();
        self
    }

    /// Forces a theme at application time, regardless of the stored choice.
    ///
    /// The stored value is left untouched so the user's choice survives
    /// removal of the override.
    pub fn force_theme(mut self, name: impl Into<String>) -> Self {
        self.forced_theme = Some(name.into());
        self
    }

    /// Enables or disables substitution of the `system` sentinel with the
    /// detected color scheme.
    pub fn detect_system(mut self, enabled: bool) -> Self {
        self.enable_system = enabled;
        self
    }

    /// Enables or disables the `color-scheme` style hint on the root
    /// element.
    pub fn color_scheme_hint(mut self, enabled: bool) -> Self {
        self.enable_color_scheme = enabled;
        self
    }

    /// Enables or disables the transition guard injected around theme
    /// swaps.
    pub fn suppress_transitions(mut self, enabled: bool) -> Self {
        self.disable_transitions = enabled;
        self
    }

    /// Sets the storage key under which the chosen theme is persisted.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Adds an attribute target.
    ///
    /// The first call replaces the `data-theme` default; later calls
    /// accumulate, so a theme can drive the class list and a data
    /// attribute at the same time.
    pub fn target(mut self, target: AttributeTarget) -> Self {
        if !self.targets_overridden {
            self.targets.clear();
            self.targets_overridden = true;
        }
        self.targets.push(target);
        self
    }

    /// Maps a theme name to the literal value written to the DOM.
    ///
    /// Themes without an entry in a non-empty map produce no value: class
    /// targets skip the add, data targets remove the attribute. An empty
    /// map is the identity mapping.
    pub fn value(mut self, theme: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(theme.into(), value.into());
        self
    }

    /// Sets the CSP nonce carried by injected style and script elements.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Adds a passthrough attribute for the bootstrap script element.
    pub fn script_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.script_attrs.push((name.into(), value.into()));
        self
    }

    /// Checks the configuration for contradictions.
    ///
    /// This is called automatically by
    /// [`ThemeController::new`](crate::ThemeController::new), but can be
    /// called explicitly for early error detection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for target in &self.targets {
            if !target.is_valid() {
                return Err(ConfigError::InvalidAttributeTarget {
                    kind: target.to_string(),
                });
            }
        }
        if !self.is_known_theme(&self.default_theme) {
            return Err(ConfigError::UnknownDefaultTheme {
                name: self.default_theme.clone(),
            });
        }
        for name in self.values.keys() {
            if !self.themes.iter().any(|t| t == name) {
                return Err(ConfigError::UnmappedTheme { name: name.clone() });
            }
        }
        Ok(())
    }

    /// The configured theme names.
    pub fn theme_names(&self) -> &[String] {
        &self.themes
    }

    /// The theme used when storage yields no value.
    pub fn default_theme_name(&self) -> &str {
        &self.default_theme
    }

    /// The forced override, if any.
    pub fn forced_theme(&self) -> Option<&str> {
        self.forced_theme.as_deref()
    }

    /// Whether the `system` sentinel resolves through scheme detection.
    pub fn system_enabled(&self) -> bool {
        self.enable_system
    }

    /// Whether the `color-scheme` hint is written.
    pub fn color_scheme_enabled(&self) -> bool {
        self.enable_color_scheme
    }

    /// Whether swaps are wrapped in a transition guard.
    pub fn transitions_suppressed(&self) -> bool {
        self.disable_transitions
    }

    /// The persistence key.
    pub fn storage_key_name(&self) -> &str {
        &self.storage_key
    }

    /// The active attribute targets.
    pub fn targets(&self) -> &[AttributeTarget] {
        &self.targets
    }

    /// The theme-to-value map; empty means identity.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// The CSP nonce, if any.
    pub fn nonce_value(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// Passthrough attributes for the bootstrap script element.
    pub fn script_attrs(&self) -> &[(String, String)] {
        &self.script_attrs
    }

    /// Resolves a theme name to the value written to the DOM.
    pub fn mapped_value<'a>(&'a self, theme: &'a str) -> Option<&'a str> {
        if self.values.is_empty() {
            Some(theme)
        } else {
            self.values.get(theme).map(String::as_str)
        }
    }

    /// The class values a swap must clear before writing the new one.
    pub fn candidate_values(&self) -> Vec<&str> {
        if self.values.is_empty() {
            self.themes.iter().map(String::as_str).collect()
        } else {
            self.values.values().map(String::as_str).collect()
        }
    }

    fn is_known_theme(&self, name: &str) -> bool {
        (name == SYSTEM && self.enable_system) || self.themes.iter().any(|t| t == name)
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse_class() {
        assert_eq!(
            AttributeTarget::parse("class").unwrap(),
            AttributeTarget::ClassList
        );
    }

    #[test]
    fn test_target_parse_data() {
        assert_eq!(
            AttributeTarget::parse("data-mode").unwrap(),
            AttributeTarget::Data("data-mode".to_string())
        );
    }

    #[test]
    fn test_target_parse_rejects_unknown_kind() {
        let err = AttributeTarget::parse("aria-theme").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAttributeTarget {
                kind: "aria-theme".to_string()
            }
        );
    }

    #[test]
    fn test_target_rejects_bare_data_prefix() {
        assert!(AttributeTarget::data("data-").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::new();
        assert_eq!(config.theme_names(), ["light", "dark"]);
        assert_eq!(config.default_theme_name(), "system");
        assert_eq!(config.storage_key_name(), "theme");
        assert!(config.system_enabled());
        assert!(config.color_scheme_enabled());
        assert!(!config.transitions_suppressed());
        assert_eq!(
            config.targets(),
            [AttributeTarget::Data("data-theme".to_string())]
        );
    }

    #[test]
    fn test_first_target_replaces_default() {
        let config = ThemeConfig::new()
            .target(AttributeTarget::ClassList)
            .target(AttributeTarget::data("data-mode").unwrap());
        assert_eq!(config.targets().len(), 2);
        assert_eq!(config.targets()[0], AttributeTarget::ClassList);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(ThemeConfig::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_default() {
        let config = ThemeConfig::new().default_theme("sepia");
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnknownDefaultTheme {
                name: "sepia".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_system_default_without_detection() {
        let config = ThemeConfig::new().detect_system(false);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_stray_value_map_key() {
        let config = ThemeConfig::new().value("sepia", "theme-sepia");
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::UnmappedTheme {
                name: "sepia".to_string()
            }
        );
    }

    #[test]
    fn test_mapped_value_identity_when_map_empty() {
        let config = ThemeConfig::new();
        assert_eq!(config.mapped_value("dark"), Some("dark"));
        assert_eq!(config.mapped_value("anything"), Some("anything"));
    }

    #[test]
    fn test_mapped_value_consults_map() {
        let config = ThemeConfig::new().value("dark", "night");
        assert_eq!(config.mapped_value("dark"), Some("night"));
        assert_eq!(config.mapped_value("light"), None);
    }

    #[test]
    fn test_candidate_values_without_map() {
        let config = ThemeConfig::new();
        assert_eq!(config.candidate_values(), ["light", "dark"]);
    }

    #[test]
    fn test_candidate_values_with_map() {
        let config = ThemeConfig::new()
            .value("light", "day")
            .value("dark", "night");
        // Map values come back in key order: dark first, then light.
        assert_eq!(config.candidate_values(), ["night", "day"]);
    }
}
