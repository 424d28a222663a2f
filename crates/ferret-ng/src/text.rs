//! Text-driven matchers: button labels and CSS narrowed by text content.

use ferret_dom::{parse_selector_list, query_all, DomTree, NodeId};

use crate::error::MatchError;
use crate::page::RenderedPage;

/// The label a button-like element presents to the user.
///
/// `<button>` labels are their text content; `<input>` buttons carry their
/// label in the `value` attribute, empty when absent. Anything else is not
/// a button.
fn button_label(tree: &DomTree, id: NodeId) -> Option<String> {
    let element = tree.as_element(id)?;
    match element.tag_name.as_str() {
        "button" => Some(tree.text_content(id)),
        "input" => {
            let kind = element.attr("type")?;
            if kind == "button" || kind == "submit" {
                Some(element.attr("value").unwrap_or("").to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Button-like descendants of `scope` whose label satisfies `keep`, in
/// document order.
fn button_matches(tree: &DomTree, scope: Option<NodeId>, keep: impl Fn(&str) -> bool) -> Vec<NodeId> {
    let scope = scope.unwrap_or(NodeId::ROOT);
    tree.descendants(scope)
        .filter(|&id| button_label(tree, id).is_some_and(|label| keep(&label)))
        .collect()
}

/// Button-like elements under `scope` whose trimmed label equals `text`.
///
/// Candidates are `button` elements plus `input` elements of type `button`
/// or `submit`. The element label is trimmed before comparison; the search
/// text is compared as given, so a search text with stray whitespace
/// matches nothing.
#[must_use]
pub fn find_by_button_text<P: RenderedPage>(
    page: &P,
    text: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    button_matches(page.tree(), scope, |label| label.trim() == text)
}

/// Button-like elements under `scope` whose label contains `text`.
///
/// Containment is checked against the untrimmed label, so surrounding
/// whitespace in the label cannot break a partial match.
#[must_use]
pub fn find_by_partial_button_text<P: RenderedPage>(
    page: &P,
    text: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    button_matches(page.tree(), scope, |label| label.contains(text))
}

/// Elements under `scope` matching `selector` whose text content contains
/// `text`.
///
/// # Errors
/// [`MatchError::Selector`] when `selector` cannot be parsed.
pub fn find_by_css_containing_text<P: RenderedPage>(
    page: &P,
    selector: &str,
    text: &str,
    scope: Option<NodeId>,
) -> Result<Vec<NodeId>, MatchError> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    let list = parse_selector_list(selector)?;
    Ok(query_all(tree, scope, &list)
        .into_iter()
        .filter(|&id| tree.text_content(id).contains(text))
        .collect())
}
