//! Canonical color schemes and system preference detection.

use dark_light::{detect as detect_os_scheme, Mode as OsSchemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// Theme name reserved for "follow the system preference".
pub const SYSTEM: &str = "system";

/// One of the two canonical color schemes.
///
/// Every environment reports its preference as either light or dark;
/// custom themes map onto one of these for the `color-scheme` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Light,
    Dark,
}

impl Scheme {
    /// The theme name this scheme resolves to.
    pub fn theme_name(self) -> &'static str {
        match self {
            Scheme::Light => "light",
            Scheme::Dark => "dark",
        }
    }

    /// Parses a theme name that is itself a canonical scheme.
    ///
    /// Returns `None` for anything other than `"light"` or `"dark"`,
    /// including the `"system"` sentinel.
    pub fn from_theme_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Scheme::Light),
            "dark" => Some(Scheme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.theme_name())
    }
}

type SchemeDetector = fn() -> Scheme;

static SCHEME_DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(os_scheme_detector));

/// Overrides the detector used to read the system color-scheme preference.
///
/// The default detector asks the operating system. Hosts that receive the
/// preference some other way (a media query, a request header) install
/// their own source here; tests use it to pin the scheme.
pub fn set_scheme_detector(detector: SchemeDetector) {
    let mut guard = SCHEME_DETECTOR.lock().unwrap();
    *guard = detector;
}

/// Reads the current system color-scheme preference.
pub fn detect_scheme() -> Scheme {
    let detector = SCHEME_DETECTOR.lock().unwrap();
    (*detector)()
}

fn os_scheme_detector() -> Scheme {
    match detect_os_scheme() {
        OsSchemeMode::Dark => Scheme::Dark,
        OsSchemeMode::Light => Scheme::Light,
    }
}
