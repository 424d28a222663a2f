//! Binding matcher.
//!
//! Locates elements whose binding annotation mentions a search term, either
//! as a loose substring or under exact-mode delimiter rules.

use ferret_dom::NodeId;
use regex::Regex;

use crate::error::MatchError;
use crate::page::{BindingAnnotation, RenderedPage, BOUND_CLASS};

/// Elements under `scope` bound to `binding`.
///
/// Candidates are the bound-marker-class descendants of `scope`, in
/// document order. Each candidate's primary annotation expression is
/// compared against the term:
///
/// - partial mode: plain substring containment;
/// - exact mode: the term must appear delimited on both sides by `{`, `}`,
///   whitespace, `|`, or the string boundary, so `cat.name` matches an
///   annotation for `{{cat.name}}` but not one for `{{cat.name2}}`.
///
/// The term is interpolated into the exact-mode pattern verbatim, so regex
/// metacharacters keep their meaning (`.` in `cat.name` matches any
/// character there).
///
/// # Errors
/// [`MatchError::BindingPattern`] when exact mode is requested and the term
/// does not form a valid pattern.
pub fn find_bindings<P: RenderedPage>(
    page: &P,
    binding: &str,
    exact: bool,
    scope: Option<NodeId>,
) -> Result<Vec<NodeId>, MatchError> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let exact_pattern = if exact {
        Some(compile_exact_pattern(binding)?)
    } else {
        None
    };

    let mut matched = Vec::new();
    for id in tree.descendants(scope) {
        if !tree
            .as_element(id)
            .is_some_and(|element| element.has_class(BOUND_CLASS))
        {
            continue;
        }
        let Some(expression) = page.binding_annotation(id).and_then(BindingAnnotation::primary)
        else {
            continue;
        };
        let hit = match &exact_pattern {
            Some(pattern) => pattern.is_match(expression),
            None => expression.contains(binding),
        };
        if hit {
            matched.push(id);
        }
    }
    Ok(matched)
}

/// Compile the exact-mode pattern: the term delimited by `{`, `}`,
/// whitespace, `|`, or the string boundary on both sides.
fn compile_exact_pattern(binding: &str) -> Result<Regex, MatchError> {
    let pattern = format!("(\\{{|\\s|^|\\|){binding}(\\}}|\\s|$|\\|)");
    Regex::new(&pattern).map_err(|source| MatchError::BindingPattern { pattern, source })
}
