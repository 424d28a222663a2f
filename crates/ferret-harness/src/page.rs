//! The loaded-page model.
//!
//! A [`LoadedPage`] stands in for a live, rendered page. The framework's
//! in-memory traces (binding data, scopes, the global itself) do not
//! survive HTML serialization, so loading recovers what it can from the
//! markup: binding annotations are harvested from `bind`-family directive
//! attributes and from interpolation markers left in text, and framework
//! presence is inferred from an `app` directive attribute. Everything else
//! (element scopes, outstanding requests, location) is supplied by the
//! embedder.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use ferret_common::warning::clear_warnings;
use ferret_dom::{DomTree, ElementData, NodeId};
use ferret_ng::{AnnotatedPage, BindingAnnotation, RenderedPage, DIRECTIVE_PREFIXES};
use serde_json::Value;

use crate::error::ScriptError;
use crate::ready::FrameworkPresence;

/// Directive attribute suffixes that carry a binding expression, in the
/// order they are consulted.
const BIND_SUFFIXES: [&str; 3] = ["bind", "bind-html", "bind-template"];

/// Framework state attached to a loaded page.
///
/// Models the parts of the framework global the locator scripts touch:
/// the bootstrap resume hook, the animations flag, the outstanding-request
/// counter behind idle notification, and the location service.
#[derive(Debug)]
pub struct FrameworkState {
    resume_hook: bool,
    animations_enabled: bool,
    outstanding_requests: AtomicU32,
    digest_count: u32,
    base_url: String,
    url: String,
}

impl FrameworkState {
    /// Fresh state for a page that bootstrapped normally.
    fn fresh() -> Self {
        Self {
            resume_hook: true,
            animations_enabled: true,
            outstanding_requests: AtomicU32::new(0),
            digest_count: 0,
            base_url: "http://localhost/index.html".to_string(),
            url: "/".to_string(),
        }
    }

    /// Detect the framework from an `app` directive attribute anywhere in
    /// the tree, under any prefix spelling.
    fn detect(tree: &DomTree) -> Option<Self> {
        let bootstrapped = tree.descendants(NodeId::ROOT).any(|id| {
            tree.as_element(id).is_some_and(|element| {
                DIRECTIVE_PREFIXES
                    .iter()
                    .any(|prefix| element.attr(&format!("{prefix}app")).is_some())
            })
        });
        bootstrapped.then(Self::fresh)
    }

    /// The in-app portion of the location (path and query).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The full URL of the page, hash-routed off the base.
    #[must_use]
    pub fn abs_url(&self) -> String {
        format!("{}#{}", self.base_url, self.url)
    }

    /// How many digest cycles navigation has triggered.
    #[must_use]
    pub fn digest_count(&self) -> u32 {
        self.digest_count
    }

    /// Tracked HTTP requests still in flight.
    #[must_use]
    pub fn outstanding_requests(&self) -> u32 {
        self.outstanding_requests.load(Ordering::SeqCst)
    }

    /// Move to `url` and run a digest cycle.
    pub(crate) fn navigate(&mut self, url: &str) {
        self.url = url.to_string();
        self.digest_count += 1;
    }
}

/// A parsed page plus everything the locator scripts expect a live page to
/// carry.
#[derive(Debug)]
pub struct LoadedPage {
    page: AnnotatedPage,
    scopes: HashMap<NodeId, Value>,
    framework: Option<FrameworkState>,
}

impl LoadedPage {
    /// Parse `html` and recover page state from the markup.
    ///
    /// Binding annotations are harvested from `bind`-family attributes and
    /// `{{...}}` interpolation markers; the framework global is considered
    /// present when an `app` directive attribute exists. Prior warnings are
    /// cleared, so parse diagnostics belong to this load.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        clear_warnings();
        let tree = ferret_html::parse_document(html);
        let framework = FrameworkState::detect(&tree);
        let mut page = AnnotatedPage::new(tree);
        harvest_annotations(&mut page);
        Self {
            page,
            scopes: HashMap::new(),
            framework,
        }
    }

    /// Drop the framework global, as on a page that never loaded it.
    #[must_use]
    pub fn without_framework(mut self) -> Self {
        self.framework = None;
        self
    }

    /// Force a framework global that is present but never finished manual
    /// bootstrap, so the resume hook is missing.
    #[must_use]
    pub fn with_pending_bootstrap(mut self) -> Self {
        let mut framework = self.framework.take().unwrap_or_else(FrameworkState::fresh);
        framework.resume_hook = false;
        self.framework = Some(framework);
        self
    }

    /// Replace the base URL the location service reports.
    ///
    /// Has no effect on a page without a framework.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        if let Some(framework) = &mut self.framework {
            framework.base_url = base_url.to_string();
        }
        self
    }

    /// The page's element tree.
    #[must_use]
    pub fn tree(&self) -> &DomTree {
        self.page.tree()
    }

    /// Framework state, when the global is present.
    #[must_use]
    pub fn framework(&self) -> Option<&FrameworkState> {
        self.framework.as_ref()
    }

    pub(crate) fn framework_mut(&mut self) -> Option<&mut FrameworkState> {
        self.framework.as_mut()
    }

    /// What a probe of the framework global observes right now.
    #[must_use]
    pub fn framework_presence(&self) -> FrameworkPresence {
        match &self.framework {
            None => FrameworkPresence::Missing,
            Some(framework) if framework.resume_hook => FrameworkPresence::Ready,
            Some(_) => FrameworkPresence::BootstrapPending,
        }
    }

    /// Attach a scope object to `element`, replacing any previous one.
    ///
    /// Descendants without a scope of their own inherit it, matching
    /// framework scope inheritance.
    pub fn attach_scope(&mut self, element: NodeId, scope: Value) {
        let _ = self.scopes.insert(element, scope);
    }

    /// The scope governing `element`: its own, or the nearest ancestor's.
    #[must_use]
    pub fn scope_for(&self, element: NodeId) -> Option<&Value> {
        if let Some(scope) = self.scopes.get(&element) {
            return Some(scope);
        }
        self.tree()
            .ancestors(element)
            .find_map(|ancestor| self.scopes.get(&ancestor))
    }

    /// Record one more tracked request in flight.
    ///
    /// Has no effect on a page without a framework.
    pub fn begin_request(&self) {
        if let Some(framework) = &self.framework {
            let _ = framework.outstanding_requests.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Record a tracked request finishing. Saturates at zero.
    pub fn complete_request(&self) {
        if let Some(framework) = &self.framework {
            let _ = framework.outstanding_requests.fetch_update(
                Ordering::SeqCst,
                Ordering::SeqCst,
                |count| Some(count.saturating_sub(1)),
            );
        }
    }

    /// Tracked HTTP requests still in flight; zero without a framework.
    #[must_use]
    pub fn outstanding_requests(&self) -> u32 {
        self.framework
            .as_ref()
            .map_or(0, FrameworkState::outstanding_requests)
    }

    /// Read or set the framework's animations flag.
    ///
    /// With `None` the current value is reported; with `Some` the flag is
    /// set first. Either way the resulting value comes back.
    ///
    /// # Errors
    /// [`ScriptError`] when the page has no framework.
    pub fn allow_animations(&mut self, value: Option<bool>) -> Result<bool, ScriptError> {
        let framework = self
            .framework
            .as_mut()
            .ok_or_else(ScriptError::framework_missing)?;
        if let Some(enabled) = value {
            framework.animations_enabled = enabled;
        }
        Ok(framework.animations_enabled)
    }
}

impl RenderedPage for LoadedPage {
    fn tree(&self) -> &DomTree {
        self.page.tree()
    }

    fn binding_annotation(&self, element: NodeId) -> Option<&BindingAnnotation> {
        self.page.binding_annotation(element)
    }
}

/// Walk the tree and attach every annotation the markup still carries.
///
/// A `bind`-family attribute wins over interpolation markers on the same
/// element; within the attribute family, suffix order then prefix priority
/// decide.
fn harvest_annotations(page: &mut AnnotatedPage) {
    let tree = page.tree();
    let mut found = Vec::new();
    for id in tree.descendants(NodeId::ROOT) {
        let Some(element) = tree.as_element(id) else {
            continue;
        };
        if let Some(expression) = bind_attribute_expression(element) {
            found.push((id, BindingAnnotation::Expression(expression)));
            continue;
        }
        let interpolations = child_interpolations(tree, id);
        if !interpolations.is_empty() {
            found.push((id, BindingAnnotation::Expressions(interpolations)));
        }
    }
    for (id, annotation) in found {
        page.annotate(id, annotation);
    }
}

/// The expression of the first `bind`-family attribute on `element`.
fn bind_attribute_expression(element: &ElementData) -> Option<String> {
    for suffix in BIND_SUFFIXES {
        for prefix in DIRECTIVE_PREFIXES {
            if let Some(expression) = element.attr(&format!("{prefix}{suffix}")) {
                return Some(expression.to_string());
            }
        }
    }
    None
}

/// Interpolation markers in the direct text children of `element`, each
/// kept with its braces.
fn child_interpolations(tree: &DomTree, element: NodeId) -> Vec<String> {
    let mut found = Vec::new();
    for &child in tree.children(element) {
        if let Some(text) = tree.as_text(child) {
            collect_interpolations(text, &mut found);
        }
    }
    found
}

/// Append every `{{...}}` occurrence in `text` to `found`.
fn collect_interpolations(text: &str, found: &mut Vec<String>) {
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            break;
        };
        found.push(rest[open..open + close + 4].to_string());
        rest = &after[close + 2..];
    }
}
