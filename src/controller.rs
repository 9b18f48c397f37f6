//! Theme resolution and application.

use crate::config::{AttributeTarget, ThemeConfig};
use crate::dom::Document;
use crate::error::ConfigError;
use crate::event::{EventKind, ThemeEvent};
use crate::scheme::{detect_scheme, Scheme, SYSTEM};
use crate::storage::ThemeStorage;

/// CSS injected around a swap to keep transitions from flashing.
pub(crate) const TRANSITION_GUARD_CSS: &str = "*,*::before,*::after{-webkit-transition:none!important;-moz-transition:none!important;-o-transition:none!important;-ms-transition:none!important;transition:none!important}";

/// Resolves the active theme and applies it to a document.
///
/// The controller owns the configuration and a [`ThemeStorage`] handle;
/// the document is passed into every operation. It keeps no theme state of
/// its own: the current theme is recomputed from storage and configuration
/// on every call.
///
/// # Example
///
/// ```rust
/// use umbra::{Document, MemoryStorage, ThemeConfig, ThemeController};
///
/// let config = ThemeConfig::new().default_theme("light");
/// let mut controller = ThemeController::new(config, MemoryStorage::new()).unwrap();
///
/// let mut doc = Document::new();
/// controller.set_theme(&mut doc, Some("dark"));
/// assert_eq!(doc.root().attribute("data-theme"), Some("dark"));
/// ```
pub struct ThemeController<S: ThemeStorage> {
    config: ThemeConfig,
    storage: S,
}

impl<S: ThemeStorage> ThemeController<S> {
    /// Creates a controller, validating the configuration first.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is contradictory (invalid
    /// attribute target, unknown default theme, stray value-map key).
    pub fn new(config: ThemeConfig, storage: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, storage })
    }

    /// The controller's configuration.
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// The storage handle.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Determines the active theme name.
    ///
    /// Reads the persisted value, falling back to the configured default;
    /// a failed read is treated as "no value". When the result is the
    /// `system` sentinel and system detection is enabled, the detected
    /// scheme's theme name is returned instead.
    pub fn resolve(&self) -> String {
        self.resolve_with(None)
    }

    /// The event kinds a host should wire up for this configuration.
    pub fn subscriptions(&self) -> Vec<EventKind> {
        let mut kinds = vec![
            EventKind::StorageChanged,
            EventKind::ThemeRequested,
            EventKind::DocumentSwapped,
        ];
        if self.config.system_enabled() {
            kinds.push(EventKind::SystemSchemeChanged);
        }
        kinds
    }

    /// Writes a theme to the document's root element.
    ///
    /// The `system` sentinel is substituted first. For each configured
    /// target, class-list targets clear the candidate classes and add the
    /// mapped value (skipped when the map yields none); data targets set
    /// the attribute or remove it when the map yields none. The
    /// `color-scheme` hint and the transition guard follow the
    /// configuration.
    pub fn apply(&self, doc: &mut Document, theme: &str) {
        let resolved = self.substitute_system(theme.to_string(), None);
        self.apply_resolved(doc, &resolved);
    }

    /// Handles an explicit change request.
    ///
    /// With a theme, persists then applies it; with `None`, re-resolves,
    /// persists the resolved value and applies it. A failed write is
    /// swallowed and application proceeds. The forced override, when
    /// configured, wins at application time but never overwrites the
    /// persisted choice.
    pub fn set_theme(&mut self, doc: &mut Document, theme: Option<&str>) {
        let chosen = match theme {
            Some(t) => t.to_string(),
            None => self.resolve(),
        };
        self.persist(&chosen);
        match self.config.forced_theme() {
            Some(forced) => self.apply(doc, forced),
            None => self.apply(doc, &chosen),
        }
    }

    /// Applies the currently-resolved theme; the page-load entry point.
    pub fn refresh(&self, doc: &mut Document) {
        self.refresh_with(doc, None);
    }

    /// Reacts to a host signal.
    pub fn handle(&mut self, doc: &mut Document, event: ThemeEvent) {
        match event {
            ThemeEvent::StorageChanged { key, new_value } => {
                if key != self.config.storage_key_name() {
                    return;
                }
                let theme = new_value
                    .unwrap_or_else(|| self.config.default_theme_name().to_string());
                self.set_theme(doc, Some(&theme));
            }
            ThemeEvent::ThemeRequested { theme } => {
                self.set_theme(doc, theme.as_deref());
            }
            ThemeEvent::SystemSchemeChanged(scheme) => {
                self.refresh_with(doc, Some(scheme));
            }
            ThemeEvent::DocumentSwapped => {
                self.refresh(doc);
            }
        }
    }

    fn refresh_with(&self, doc: &mut Document, scheme: Option<Scheme>) {
        let base = match self.config.forced_theme() {
            Some(forced) => forced.to_string(),
            None => self.resolve_with(scheme),
        };
        let resolved = self.substitute_system(base, scheme);
        self.apply_resolved(doc, &resolved);
    }

    fn resolve_with(&self, scheme: Option<Scheme>) -> String {
        let stored = match self.storage.get(self.config.storage_key_name()) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(%error, "theme read failed, falling back to default");
                None
            }
        };
        let name = stored.unwrap_or_else(|| self.config.default_theme_name().to_string());
        self.substitute_system(name, scheme)
    }

    fn substitute_system(&self, name: String, scheme: Option<Scheme>) -> String {
        if name == SYSTEM && self.config.system_enabled() {
            scheme
                .unwrap_or_else(detect_scheme)
                .theme_name()
                .to_string()
        } else {
            name
        }
    }

    fn apply_resolved(&self, doc: &mut Document, resolved: &str) {
        tracing::trace!(theme = resolved, "applying theme");

        let guard = if self.config.transitions_suppressed() {
            Some(doc.inject_style(TRANSITION_GUARD_CSS, self.config.nonce_value()))
        } else {
            None
        };

        let value = self.config.mapped_value(resolved).map(str::to_string);
        for target in self.config.targets() {
            match target {
                AttributeTarget::ClassList => {
                    for candidate in self.config.candidate_values() {
                        doc.root_mut().remove_class(candidate);
                    }
                    if let Some(value) = &value {
                        doc.root_mut().add_class(value);
                    }
                }
                AttributeTarget::Data(name) => match &value {
                    Some(value) => doc.root_mut().set_attribute(name, value),
                    None => doc.root_mut().remove_attribute(name),
                },
            }
        }

        if self.config.color_scheme_enabled() {
            let hint = Scheme::from_theme_name(resolved)
                .or_else(|| Scheme::from_theme_name(self.config.default_theme_name()));
            match hint {
                Some(scheme) => doc
                    .root_mut()
                    .set_style_property("color-scheme", scheme.theme_name()),
                None => doc.root_mut().remove_style_property("color-scheme"),
            }
        }

        if let Some(id) = guard {
            doc.force_reflow();
            doc.defer(move |d| {
                d.remove_style(id);
            });
        }
    }

    fn persist(&mut self, theme: &str) {
        if let Err(error) = self.storage.set(self.config.storage_key_name(), theme) {
            tracing::debug!(%error, "theme write failed, continuing without persistence");
        }
    }
}
