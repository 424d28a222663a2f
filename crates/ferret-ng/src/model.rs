//! Model and options matchers.
//!
//! `ngModel` binds a form control to a scope property; `ngOptions`
//! populates a `<select>` from a collection. Both are located by the
//! literal attribute expression, probing directive prefixes in priority
//! order.

use ferret_dom::NodeId;

use crate::page::RenderedPage;
use crate::prefix::{attribute_elements, first_nonempty_prefix};

/// Elements under `scope` whose model attribute expression equals `model`,
/// under the first directive prefix spelling that yields anything.
///
/// The comparison is exact; `find_by_model("user")` does not match
/// `ng-model="user.name"`.
#[must_use]
pub fn find_by_model<P: RenderedPage>(page: &P, model: &str, scope: Option<NodeId>) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    first_nonempty_prefix("model", |name| {
        attribute_elements(tree, scope, name, |value| value == model)
    })
}

/// The `<option>` elements generated by controls whose options attribute
/// expression equals `options`.
///
/// Prefix probing judges each spelling by the option elements it yields,
/// not by the owning controls: a control with the right attribute but no
/// options lets lower-priority spellings still win.
#[must_use]
pub fn find_by_options<P: RenderedPage>(
    page: &P,
    options: &str,
    scope: Option<NodeId>,
) -> Vec<NodeId> {
    let tree = page.tree();
    let scope = scope.unwrap_or(NodeId::ROOT);
    first_nonempty_prefix("options", |name| {
        let mut matched = Vec::new();
        for owner in attribute_elements(tree, scope, name, |value| value == options) {
            for id in tree.descendants(owner) {
                if tree
                    .as_element(id)
                    .is_some_and(|element| element.tag_name == "option")
                {
                    matched.push(id);
                }
            }
        }
        matched
    })
}
