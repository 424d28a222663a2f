//! Repeater column matchers.
//!
//! Resolve a binding inside repeater rows: either one cell of one row, or
//! a whole column across every row.

use ferret_dom::{DomTree, NodeId};

use crate::page::{BindingAnnotation, RenderedPage, BOUND_CLASS};
use crate::repeater::{segment_rows, simple_rows};

/// Bound candidates contributed by one row element: the element itself when
/// it carries the bound marker class, then its bound descendants in
/// document order.
fn bound_candidates(tree: &DomTree, row: NodeId, out: &mut Vec<NodeId>) {
    if tree
        .as_element(row)
        .is_some_and(|element| element.has_class(BOUND_CLASS))
    {
        out.push(row);
    }
    for id in tree.descendants(row) {
        if tree
            .as_element(id)
            .is_some_and(|element| element.has_class(BOUND_CLASS))
        {
            out.push(id);
        }
    }
}

/// Keep the candidates whose primary annotation mentions `binding`.
///
/// Candidates without any annotation are dropped; column matching is always
/// by containment, never delimiter-aware.
fn filter_by_binding<P: RenderedPage>(
    page: &P,
    candidates: Vec<NodeId>,
    binding: &str,
) -> Vec<NodeId> {
    candidates
        .into_iter()
        .filter(|&id| {
            page.binding_annotation(id)
                .and_then(BindingAnnotation::primary)
                .is_some_and(|expression| expression.contains(binding))
        })
        .collect()
}

/// The elements in row `index` of the repeater matching `repeater` whose
/// binding annotation mentions `binding`.
///
/// Both row categories contribute candidates: the index-th single-element
/// row first, then every member of the index-th multi-element row. Each row
/// element contributes itself (when bound) followed by its bound
/// descendants.
#[must_use]
pub fn find_repeater_element<P: RenderedPage>(
    page: &P,
    repeater: &str,
    index: usize,
    binding: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let mut candidates = Vec::new();
    if let Some(&row) = simple_rows(tree, scope, repeater).get(index) {
        bound_candidates(tree, row, &mut candidates);
    }
    if let Some(segment) = segment_rows(tree, scope, repeater).get(index) {
        for &row in segment {
            bound_candidates(tree, row, &mut candidates);
        }
    }
    filter_by_binding(page, candidates, binding)
}

/// The `binding` column across every row of the repeater matching
/// `repeater`: all single-element rows contribute candidates first, then
/// every multi-element row in order.
#[must_use]
pub fn find_repeater_column<P: RenderedPage>(
    page: &P,
    repeater: &str,
    binding: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let mut candidates = Vec::new();
    for row in simple_rows(tree, scope, repeater) {
        bound_candidates(tree, row, &mut candidates);
    }
    for segment in segment_rows(tree, scope, repeater) {
        for row in segment {
            bound_candidates(tree, row, &mut candidates);
        }
    }
    filter_by_binding(page, candidates, binding)
}
