//! Minimal document model the controller mutates.
//!
//! The real document is ambient in a browser; here it is an explicit value
//! passed into every operation so behavior is observable without a live
//! host. The model carries exactly the surface the controller touches: the
//! root element's attributes, class list and inline style, the injected
//! head styles, a deferred-callback queue standing in for the host's next
//! tick, and a reflow counter for the forced style recomputation.

use std::collections::BTreeMap;
use std::collections::VecDeque;

/// Handle to a style element injected into the document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleId(u64);

/// A style element living in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    id: StyleId,
    css: String,
    nonce: Option<String>,
}

impl StyleElement {
    /// The element's handle.
    pub fn id(&self) -> StyleId {
        self.id
    }

    /// The element's CSS text.
    pub fn css(&self) -> &str {
        &self.css
    }

    /// The CSP nonce carried by the element, if any.
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }
}

/// The document's root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
}

impl Element {
    /// Reads an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    /// Removes an attribute if present.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// The class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// True if the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class; already-present classes are not duplicated.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Reads an inline style property.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// Sets an inline style property.
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    /// Removes an inline style property if present.
    pub fn remove_style_property(&mut self, name: &str) {
        self.style.remove(name);
    }
}

type Deferred = Box<dyn FnOnce(&mut Document)>;

/// A document: root element, head styles, and a tick queue.
///
/// Hosts drive the queue: [`Document::defer`] enqueues work, and the host
/// calls [`Document::run_deferred`] on its next tick.
#[derive(Default)]
pub struct Document {
    root: Element,
    head_styles: Vec<StyleElement>,
    deferred: VecDeque<Deferred>,
    reflows: u64,
    next_style_id: u64,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// The root element, mutable.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Injects a style element into the head, returning its handle.
    pub fn inject_style(&mut self, css: &str, nonce: Option<&str>) -> StyleId {
        let id = StyleId(self.next_style_id);
        self.next_style_id += 1;
        self.head_styles.push(StyleElement {
            id,
            css: css.to_string(),
            nonce: nonce.map(str::to_string),
        });
        id
    }

    /// Removes an injected style element; returns whether it was present.
    pub fn remove_style(&mut self, id: StyleId) -> bool {
        let before = self.head_styles.len();
        self.head_styles.retain(|s| s.id != id);
        self.head_styles.len() != before
    }

    /// The style elements currently in the head.
    pub fn head_styles(&self) -> &[StyleElement] {
        &self.head_styles
    }

    /// Forces a style recomputation.
    ///
    /// The model only counts these; the count lets tests assert the
    /// recomputation happened between mutation and guard removal.
    pub fn force_reflow(&mut self) {
        self.reflows += 1;
    }

    /// How many reflows have been forced on this document.
    pub fn reflow_count(&self) -> u64 {
        self.reflows
    }

    /// Queues work for the host's next tick.
    pub fn defer(&mut self, task: impl FnOnce(&mut Document) + 'static) {
        self.deferred.push_back(Box::new(task));
    }

    /// Number of tasks waiting for the next tick.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Runs everything queued at the time of the call; tasks queued while
    /// running wait for the following tick. Returns how many tasks ran.
    pub fn run_deferred(&mut self) -> usize {
        let tasks: Vec<Deferred> = self.deferred.drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task(self);
        }
        count
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("head_styles", &self.head_styles)
            .field("pending_deferred", &self.deferred.len())
            .field("reflows", &self.reflows)
            .finish()
    }
}
