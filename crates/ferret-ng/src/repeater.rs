//! Repeater row matchers.
//!
//! A repeater instance either stamps one element per iteration (the plain
//! `repeat` attribute form) or a run of sibling elements opened by a
//! `repeat-start` attribute (the multi-element form); see
//! [`ngRepeat`](https://docs.angularjs.org/api/ng/directive/ngRepeat).
//! Multi-element rows have no common ancestor of their own, so they are
//! recovered by walking forward siblings until the comment anchor the
//! framework leaves for the next row (or for the end of the repeater)
//! closes the run.

use ferret_common::warning::warn_once;
use ferret_dom::{DomTree, NodeId};
use strum_macros::Display;

use crate::page::RenderedPage;
use crate::prefix::aggregate_prefix_contains;

/// Why a segment walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SegmentEnd {
    /// A sibling comment mentioning the descriptor closed the row.
    Marker,
    /// The sibling list ran out before any closing comment appeared.
    SiblingsExhausted,
}

/// Collect one multi-element row: start at the element carrying the
/// `repeat-start` attribute and take every element sibling until a comment
/// mentioning `repeater` ends the run.
///
/// The returned [`SegmentEnd`] records whether the run was closed by its
/// marker comment or cut short by the end of the sibling list.
#[must_use]
pub fn collect_segment(tree: &DomTree, start: NodeId, repeater: &str) -> (Vec<NodeId>, SegmentEnd) {
    let mut row = Vec::new();
    let mut current = Some(start);
    while let Some(id) = current {
        if tree
            .as_comment(id)
            .is_some_and(|data| data.contains(repeater))
        {
            return (row, SegmentEnd::Marker);
        }
        if tree.as_element(id).is_some() {
            row.push(id);
        }
        current = tree.next_sibling(id);
    }
    (row, SegmentEnd::SiblingsExhausted)
}

/// Single-element rows: every element whose `repeat` attribute mentions
/// `repeater`, aggregated across all prefix spellings.
pub(crate) fn simple_rows(tree: &DomTree, scope: NodeId, repeater: &str) -> Vec<NodeId> {
    aggregate_prefix_contains(tree, scope, "repeat", repeater)
}

/// Multi-element rows: one element run per `repeat-start` anchor whose
/// attribute mentions `repeater`.
///
/// A run missing its closing comment is kept as collected up to the last
/// sibling; the truncation is reported once per descriptor.
pub(crate) fn segment_rows(tree: &DomTree, scope: NodeId, repeater: &str) -> Vec<Vec<NodeId>> {
    aggregate_prefix_contains(tree, scope, "repeat-start", repeater)
        .into_iter()
        .map(|start| {
            let (row, end) = collect_segment(tree, start, repeater);
            if end == SegmentEnd::SiblingsExhausted {
                warn_once(
                    "Repeater",
                    &format!("no closing comment for '{repeater}'; row truncated at last sibling"),
                );
            }
            row
        })
        .collect()
}

/// The elements making up row `index` of the repeater matching `repeater`
/// under `scope`.
///
/// Single-element and multi-element rows are collected as two separate
/// ordered sequences, and the result concatenates the index-th entry of
/// each. An index past the end of either sequence contributes nothing, so
/// a repeater with fewer rows than `index` yields an empty collection
/// rather than an error.
#[must_use]
pub fn find_repeater_rows<P: RenderedPage>(
    page: &P,
    repeater: &str,
    index: usize,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let mut matched = Vec::new();
    if let Some(&row) = simple_rows(tree, scope, repeater).get(index) {
        matched.push(row);
    }
    if let Some(segment) = segment_rows(tree, scope, repeater).get(index) {
        matched.extend_from_slice(segment);
    }
    matched
}

/// Every row element of the repeater matching `repeater` under `scope`:
/// all single-element rows first, then the members of each multi-element
/// row in order.
#[must_use]
pub fn find_all_repeater_rows<P: RenderedPage>(
    page: &P,
    repeater: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let mut matched = simple_rows(tree, scope, repeater);
    for segment in segment_rows(tree, scope, repeater) {
        matched.extend(segment);
    }
    matched
}
