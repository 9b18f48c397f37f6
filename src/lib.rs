//! Persisted theme switching with system color-scheme detection.
//!
//! This crate provides:
//!
//! - [`ThemeController`]: Resolves the active theme (stored choice,
//!   default, or system preference) and applies it to a document
//! - [`ThemeConfig`] / [`AttributeTarget`]: What the controller writes,
//!   and where
//! - [`ThemeStorage`]: Persistence seam, with [`MemoryStorage`] and
//!   [`FileStorage`] providers
//! - [`Document`]: Explicit document model, so behavior is observable
//!   without a live browser
//! - [`ThemeEvent`] / [`EventKind`]: Typed host signals
//! - [`boot`]: Bootstrap markup for server-rendered pages
//!
//! The controller is stateless beyond its configuration and storage
//! handle: the current theme is recomputed on every call, never cached.
//!
//! # Example
//!
//! ```rust
//! use umbra::{Document, MemoryStorage, Scheme, ThemeConfig, ThemeController, ThemeEvent};
//!
//! // Defaults: themes light/dark, default "system", target data-theme.
//! let config = ThemeConfig::new();
//! let mut controller = ThemeController::new(config, MemoryStorage::new()).unwrap();
//!
//! let mut doc = Document::new();
//! controller.handle(&mut doc, ThemeEvent::SystemSchemeChanged(Scheme::Dark));
//! assert_eq!(doc.root().attribute("data-theme"), Some("dark"));
//!
//! controller.set_theme(&mut doc, Some("light"));
//! assert_eq!(doc.root().attribute("data-theme"), Some("light"));
//! ```

pub mod boot;
mod config;
mod controller;
mod dom;
mod error;
mod event;
mod scheme;
mod storage;

pub use config::{AttributeTarget, ThemeConfig};
pub use controller::ThemeController;
pub use dom::{Document, Element, StyleElement, StyleId};
pub use error::ConfigError;
pub use event::{EventKind, ThemeEvent};
pub use scheme::{detect_scheme, set_scheme_detector, Scheme, SYSTEM};
pub use storage::{FileStorage, MemoryStorage, StorageError, ThemeStorage};
