//! Server-rendered bootstrap markup.
//!
//! A server-rendered page needs the controller's configuration on the
//! client before any script runs, and transition-guard markup when the
//! host choreographs swaps itself. Both are rendered here as plain
//! strings; injection is the host's business.

use minijinja::{context, Environment, Error, ErrorKind};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ThemeConfig;
use crate::controller::TRANSITION_GUARD_CSS;

const CONFIG_SCRIPT_TEMPLATE: &str = r#"<script type="application/json"{% if nonce %} nonce="{{ nonce|e }}"{% endif %}{% for attr in attrs %} {{ attr.name|e }}="{{ attr.value|e }}"{% endfor %}>{{ payload }}</script>"#;

const TRANSITION_STYLE_TEMPLATE: &str =
    r#"<style{% if nonce %} nonce="{{ nonce|e }}"{% endif %}>{{ css }}</style>"#;

/// The configuration as the client sees it, camelCase like the storage
/// and event payloads it sits next to.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigPayload<'a> {
    themes: &'a [String],
    default_theme: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    forced_theme: Option<&'a str>,
    enable_system: bool,
    enable_color_scheme: bool,
    disable_transition_on_change: bool,
    storage_key: &'a str,
    attributes: Vec<String>,
    values: &'a BTreeMap<String, String>,
}

impl<'a> ConfigPayload<'a> {
    fn new(config: &'a ThemeConfig) -> Self {
        Self {
            themes: config.theme_names(),
            default_theme: config.default_theme_name(),
            forced_theme: config.forced_theme(),
            enable_system: config.system_enabled(),
            enable_color_scheme: config.color_scheme_enabled(),
            disable_transition_on_change: config.transitions_suppressed(),
            storage_key: config.storage_key_name(),
            attributes: config.targets().iter().map(|t| t.to_string()).collect(),
            values: config.values(),
        }
    }
}

#[derive(Serialize)]
struct Attr<'a> {
    name: &'a str,
    value: &'a str,
}

/// Renders the configuration payload as a JSON script element.
///
/// The element carries the CSP nonce and every passthrough attribute from
/// the configuration. The payload is data, not executable script: a client
/// runtime reads it to reconstruct the controller's configuration.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized or the template
/// fails to render.
pub fn config_script(config: &ThemeConfig) -> Result<String, Error> {
    let payload = serde_json::to_string(&ConfigPayload::new(config))
        .map_err(|e| Error::new(ErrorKind::BadSerialization, e.to_string()))?;
    let attrs: Vec<Attr<'_>> = config
        .script_attrs()
        .iter()
        .map(|(name, value)| Attr { name, value })
        .collect();

    let mut env = Environment::new();
    env.add_template("config_script", CONFIG_SCRIPT_TEMPLATE)?;
    env.get_template("config_script")?.render(context! {
        nonce => config.nonce_value(),
        attrs => attrs,
        payload => payload,
    })
}

/// Renders the transition-guard style element.
///
/// Only hosts that swap themes outside [`ThemeController::apply`] need
/// this; the guard disables every transition while present, so it must be
/// removed again after the swap.
///
/// [`ThemeController::apply`]: crate::ThemeController::apply
pub fn transition_style(config: &ThemeConfig) -> Result<String, Error> {
    let mut env = Environment::new();
    env.add_template("transition_style", TRANSITION_STYLE_TEMPLATE)?;
    env.get_template("transition_style")?.render(context! {
        nonce => config.nonce_value(),
        css => TRANSITION_GUARD_CSS,
    })
}
