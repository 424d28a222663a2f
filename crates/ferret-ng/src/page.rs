//! Page capability interface handed to every matcher.
//!
//! Matchers never reach for globals. Each one takes a [`RenderedPage`],
//! which bundles the element tree with the binding annotations the
//! framework left behind on it. [`AnnotatedPage`] is the canonical
//! implementation; an execution host can implement the trait on its own
//! page state instead.

use std::collections::HashMap;

use ferret_dom::{DomTree, NodeId};

/// Class the framework stamps on every element that carries at least one
/// data binding.
pub const BOUND_CLASS: &str = "ng-binding";

/// Binding annotation attached to a bound element.
///
/// Annotations come in two shapes: a single expression string, or a
/// collection of expressions of which the first is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAnnotation {
    /// A single expression, e.g. `cat.name`.
    Expression(String),
    /// Several expressions attached to the same element. The first one is
    /// the element's primary binding.
    Expressions(Vec<String>),
}

impl BindingAnnotation {
    /// The expression text matchers compare against.
    ///
    /// An empty collection has no primary expression; such an element is
    /// treated as carrying no binding at all.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        match self {
            Self::Expression(expression) => Some(expression),
            Self::Expressions(expressions) => expressions.first().map(String::as_str),
        }
    }
}

/// Read access to a rendered page: the element tree plus the binding
/// annotations the framework attached to it.
pub trait RenderedPage {
    /// The page's element tree.
    fn tree(&self) -> &DomTree;

    /// The annotation for `element`, if the framework bound anything to it.
    fn binding_annotation(&self, element: NodeId) -> Option<&BindingAnnotation>;
}

/// A parsed tree together with explicit binding annotations.
#[derive(Debug)]
pub struct AnnotatedPage {
    tree: DomTree,
    annotations: HashMap<NodeId, BindingAnnotation>,
}

impl AnnotatedPage {
    /// Wrap a parsed tree carrying no annotations yet.
    #[must_use]
    pub fn new(tree: DomTree) -> Self {
        Self {
            tree,
            annotations: HashMap::new(),
        }
    }

    /// Attach `annotation` to `element`, replacing any previous one.
    pub fn annotate(&mut self, element: NodeId, annotation: BindingAnnotation) {
        let _ = self.annotations.insert(element, annotation);
    }
}

impl RenderedPage for AnnotatedPage {
    fn tree(&self) -> &DomTree {
        &self.tree
    }

    fn binding_annotation(&self, element: NodeId) -> Option<&BindingAnnotation> {
        self.annotations.get(&element)
    }
}
