//! Typed inbound events.

use crate::scheme::Scheme;

/// A signal the host delivers to [`ThemeController::handle`].
///
/// Each variant carries the payload its browser counterpart carries, so a
/// host adapter is a plain mapping from its event bus to this enum.
///
/// [`ThemeController::handle`]: crate::ThemeController::handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Another context changed the backing store. Ignored unless `key`
    /// matches the configured storage key; a `None` value means the entry
    /// was removed.
    StorageChanged {
        key: String,
        new_value: Option<String>,
    },
    /// An explicit change request. `None` asks for automatic
    /// re-resolution.
    ThemeRequested { theme: Option<String> },
    /// The system color-scheme preference changed.
    SystemSchemeChanged(Scheme),
    /// The document passed alongside this event replaced the previous one
    /// and needs the theme re-applied.
    DocumentSwapped,
}

impl ThemeEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            ThemeEvent::StorageChanged { .. } => EventKind::StorageChanged,
            ThemeEvent::ThemeRequested { .. } => EventKind::ThemeRequested,
            ThemeEvent::SystemSchemeChanged(_) => EventKind::SystemSchemeChanged,
            ThemeEvent::DocumentSwapped => EventKind::DocumentSwapped,
        }
    }
}

/// Payload-free discriminant of [`ThemeEvent`], used to enumerate which
/// host signals a controller wants wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    StorageChanged,
    ThemeRequested,
    SystemSchemeChanged,
    DocumentSwapped,
}
