use proptest::prelude::*;
use serial_test::serial;
use umbra::{
    set_scheme_detector, AttributeTarget, Document, FileStorage, MemoryStorage, Scheme,
    ThemeConfig, ThemeController, ThemeEvent, ThemeStorage,
};

fn controller(config: ThemeConfig) -> ThemeController<MemoryStorage> {
    ThemeController::new(config, MemoryStorage::new()).unwrap()
}

#[test]
fn resolve_prefers_persisted_value_over_default() {
    let mut storage = MemoryStorage::new();
    storage.set("theme", "light").unwrap();

    let config = ThemeConfig::new().default_theme("dark");
    let controller = ThemeController::new(config, storage).unwrap();

    assert_eq!(controller.resolve(), "light");
}

#[test]
#[serial]
fn resolve_substitutes_system_with_media_state() {
    let mut storage = MemoryStorage::new();
    storage.set("theme", "system").unwrap();
    let controller = ThemeController::new(ThemeConfig::new(), storage).unwrap();

    set_scheme_detector(|| Scheme::Dark);
    assert_eq!(controller.resolve(), "dark");

    set_scheme_detector(|| Scheme::Light);
    assert_eq!(controller.resolve(), "light");
}

#[test]
fn system_passes_through_when_detection_disabled() {
    let mut storage = MemoryStorage::new();
    storage.set("theme", "system").unwrap();

    let config = ThemeConfig::new()
        .detect_system(false)
        .default_theme("light");
    let controller = ThemeController::new(config, storage).unwrap();

    assert_eq!(controller.resolve(), "system");
}

#[test]
#[serial]
fn default_system_with_dark_preference_yields_dark_attribute() {
    // config {default="system", themes=["light","dark"], attribute="data-theme"},
    // no persisted value, system preference = dark
    set_scheme_detector(|| Scheme::Dark);

    let controller = controller(ThemeConfig::new());
    let mut doc = Document::new();
    controller.refresh(&mut doc);

    assert_eq!(doc.root().attribute("data-theme"), Some("dark"));
}

#[test]
fn set_theme_persists_and_applies() {
    let mut controller = controller(ThemeConfig::new().storage_key("theme"));
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));

    assert_eq!(controller.storage().stored("theme"), Some("dark"));
    assert_eq!(doc.root().attribute("data-theme"), Some("dark"));
}

#[test]
#[serial]
fn set_theme_without_value_persists_the_resolved_name() {
    set_scheme_detector(|| Scheme::Dark);

    let mut controller = controller(ThemeConfig::new());
    let mut doc = Document::new();
    controller.set_theme(&mut doc, None);

    assert_eq!(controller.storage().stored("theme"), Some("dark"));
    assert_eq!(doc.root().attribute("data-theme"), Some("dark"));
}

#[test]
fn storage_removal_event_falls_back_to_default() {
    let mut controller = controller(ThemeConfig::new().default_theme("light"));
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));
    assert_eq!(doc.root().attribute("data-theme"), Some("dark"));

    controller.handle(
        &mut doc,
        ThemeEvent::StorageChanged {
            key: "theme".to_string(),
            new_value: None,
        },
    );

    assert_eq!(doc.root().attribute("data-theme"), Some("light"));
    assert_eq!(controller.storage().stored("theme"), Some("light"));
}

#[test]
fn storage_event_follows_other_contexts() {
    let mut controller = controller(ThemeConfig::new());
    let mut doc = Document::new();

    controller.handle(
        &mut doc,
        ThemeEvent::StorageChanged {
            key: "theme".to_string(),
            new_value: Some("light".to_string()),
        },
    );

    assert_eq!(doc.root().attribute("data-theme"), Some("light"));
}

#[test]
fn class_target_swaps_candidate_classes() {
    let config = ThemeConfig::new()
        .target(AttributeTarget::ClassList)
        .default_theme("light");
    let mut controller = controller(config);
    let mut doc = Document::new();
    doc.root_mut().add_class("unrelated");

    controller.set_theme(&mut doc, Some("light"));
    assert!(doc.root().has_class("light"));

    controller.set_theme(&mut doc, Some("dark"));
    assert!(doc.root().has_class("dark"));
    assert!(!doc.root().has_class("light"));
    assert!(doc.root().has_class("unrelated"));
}

#[test]
fn value_map_controls_written_values() {
    let config = ThemeConfig::new()
        .target(AttributeTarget::ClassList)
        .target(AttributeTarget::data("data-mode").unwrap())
        .value("dark", "theme-night")
        .default_theme("light");
    let mut controller = controller(config);
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));
    assert!(doc.root().has_class("theme-night"));
    assert_eq!(doc.root().attribute("data-mode"), Some("theme-night"));

    // "light" has no mapped value: the class add is skipped and the data
    // attribute is removed.
    controller.set_theme(&mut doc, Some("light"));
    assert!(!doc.root().has_class("theme-night"));
    assert_eq!(doc.root().classes().len(), 0);
    assert_eq!(doc.root().attribute("data-mode"), None);
}

#[test]
fn color_scheme_hint_follows_canonical_themes() {
    let config = ThemeConfig::new()
        .themes(["light", "dark", "sepia"])
        .default_theme("light");
    let mut controller = controller(config);
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));
    assert_eq!(doc.root().style_property("color-scheme"), Some("dark"));

    // Non-canonical theme falls back to the canonical default.
    controller.set_theme(&mut doc, Some("sepia"));
    assert_eq!(doc.root().style_property("color-scheme"), Some("light"));
}

#[test]
fn color_scheme_hint_clears_without_canonical_fallback() {
    let config = ThemeConfig::new()
        .themes(["paper", "ink"])
        .default_theme("paper");
    let mut controller = controller(config);
    let mut doc = Document::new();
    doc.root_mut().set_style_property("color-scheme", "dark");

    controller.set_theme(&mut doc, Some("ink"));
    assert_eq!(doc.root().style_property("color-scheme"), None);
}

#[test]
fn color_scheme_hint_can_be_disabled() {
    let config = ThemeConfig::new().color_scheme_hint(false);
    let mut controller = controller(config);
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));
    assert_eq!(doc.root().style_property("color-scheme"), None);
}

#[test]
fn transition_guard_lives_for_one_tick() {
    let config = ThemeConfig::new().suppress_transitions(true).nonce("abc");
    let mut controller = controller(config);
    let mut doc = Document::new();

    let reflows_before = doc.reflow_count();
    controller.set_theme(&mut doc, Some("dark"));

    // Present immediately after the swap, with the nonce, and a reflow was
    // forced before the removal was queued.
    assert_eq!(doc.head_styles().len(), 1);
    assert_eq!(doc.head_styles()[0].nonce(), Some("abc"));
    assert!(doc.head_styles()[0].css().contains("transition:none"));
    assert_eq!(doc.reflow_count(), reflows_before + 1);
    assert_eq!(doc.pending_deferred(), 1);

    // Gone after the tick.
    doc.run_deferred();
    assert!(doc.head_styles().is_empty());
}

#[test]
fn no_guard_when_suppression_disabled() {
    let mut controller = controller(ThemeConfig::new());
    let mut doc = Document::new();

    controller.set_theme(&mut doc, Some("dark"));
    assert!(doc.head_styles().is_empty());
    assert_eq!(doc.pending_deferred(), 0);
}

#[test]
fn document_swap_reapplies_to_the_new_document() {
    let mut controller = controller(ThemeConfig::new().default_theme("light"));
    let mut doc = Document::new();
    controller.set_theme(&mut doc, Some("dark"));

    let mut incoming = Document::new();
    controller.handle(&mut incoming, ThemeEvent::DocumentSwapped);
    assert_eq!(incoming.root().attribute("data-theme"), Some("dark"));
}

#[test]
fn file_storage_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut controller = ThemeController::new(
        ThemeConfig::new().default_theme("light"),
        FileStorage::new(&path),
    )
    .unwrap();
    let mut doc = Document::new();
    controller.set_theme(&mut doc, Some("dark"));

    // A second controller over the same file sees the choice.
    let reopened =
        ThemeController::new(ThemeConfig::new().default_theme("light"), FileStorage::new(&path))
            .unwrap();
    assert_eq!(reopened.resolve(), "dark");
}

proptest! {
    // setTheme(x) twice leaves the same persisted value and DOM state as once.
    #[test]
    fn set_theme_is_idempotent(name in "[a-z]{1,12}") {
        // The sentinel resolves through the process-global detector, which
        // detector tests override; keep this property independent of it.
        prop_assume!(name != "system");

        let mut once = controller(ThemeConfig::new().default_theme("light"));
        let mut doc_once = Document::new();
        once.set_theme(&mut doc_once, Some(&name));

        let mut twice = controller(ThemeConfig::new().default_theme("light"));
        let mut doc_twice = Document::new();
        twice.set_theme(&mut doc_twice, Some(&name));
        twice.set_theme(&mut doc_twice, Some(&name));

        prop_assert_eq!(doc_once.root(), doc_twice.root());
        prop_assert_eq!(
            once.storage().stored("theme"),
            twice.storage().stored("theme")
        );
    }
}
