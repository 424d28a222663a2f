//! Directive attribute prefixes and prefix-probing scans.
//!
//! The framework accepts several spellings for the same directive attribute
//! (`ng-model`, `ng_model`, `data-ng-model`, `x-ng-model`, `ng:model`); see
//! [directive normalization](https://docs.angularjs.org/guide/directive#matching-directives).
//! Matchers either probe the spellings in priority order and stop at the
//! first that yields anything, or aggregate matches across all of them.

use std::collections::HashSet;

use ferret_dom::{DomTree, NodeId};

/// Recognized directive attribute prefixes, highest priority first.
pub const DIRECTIVE_PREFIXES: [&str; 5] = ["ng-", "ng_", "data-ng-", "x-ng-", "ng:"];

/// Strict descendants of `scope` carrying attribute `name` with a value
/// accepted by `keep`, in document order.
pub(crate) fn attribute_elements(
    tree: &DomTree,
    scope: NodeId,
    name: &str,
    keep: impl Fn(&str) -> bool,
) -> Vec<NodeId> {
    tree.descendants(scope)
        .filter(|&id| {
            tree.as_element(id)
                .and_then(|element| element.attr(name))
                .is_some_and(|value| keep(value))
        })
        .collect()
}

/// Probe each prefix spelling of `suffix` in priority order and return the
/// first non-empty result `produce` yields.
///
/// Later spellings are never consulted once an earlier one has produced
/// elements, even when they would match more.
pub(crate) fn first_nonempty_prefix(
    suffix: &str,
    produce: impl Fn(&str) -> Vec<NodeId>,
) -> Vec<NodeId> {
    for prefix in DIRECTIVE_PREFIXES {
        let name = format!("{prefix}{suffix}");
        let matched = produce(&name);
        if !matched.is_empty() {
            return matched;
        }
    }
    Vec::new()
}

/// Elements under `scope` whose `{prefix}{suffix}` attribute value contains
/// `needle`, aggregated across every prefix spelling.
///
/// The result keeps prefix priority order first and document order within
/// each prefix; an element matched under several spellings appears once, at
/// its highest-priority position.
pub(crate) fn aggregate_prefix_contains(
    tree: &DomTree,
    scope: NodeId,
    suffix: &str,
    needle: &str,
) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for prefix in DIRECTIVE_PREFIXES {
        let name = format!("{prefix}{suffix}");
        for id in attribute_elements(tree, scope, &name, |value| value.contains(needle)) {
            if seen.insert(id) {
                matched.push(id);
            }
        }
    }
    matched
}
