//! Integration tests for model and options matching.

use ferret_dom::NodeId;
use ferret_ng::{find_by_model, find_by_options, AnnotatedPage, RenderedPage};

fn page_from(html: &str) -> AnnotatedPage {
    AnnotatedPage::new(ferret_html::parse_document(html))
}

fn by_id(page: &AnnotatedPage, id: &str) -> NodeId {
    let tree = page.tree();
    tree.descendants(NodeId::ROOT)
        .find(|&node| tree.as_element(node).is_some_and(|el| el.id() == Some(id)))
        .unwrap_or_else(|| panic!("no element with id '{id}'"))
}

fn ids_of(page: &AnnotatedPage, nodes: &[NodeId]) -> Vec<String> {
    let tree = page.tree();
    nodes
        .iter()
        .map(|&node| {
            tree.as_element(node)
                .and_then(|el| el.id())
                .unwrap_or("<no id>")
                .to_string()
        })
        .collect()
}

// ========== models ==========

#[test]
fn test_model_matches_exact_expression() {
    let page = page_from(
        r#"
        <form>
          <input id="name" ng-model="user.name">
          <input id="email" ng-model="user.email">
        </form>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_model(&page, "user.name", None)),
        ["name"]
    );
}

#[test]
fn test_model_rejects_partial_expression() {
    let page = page_from(r#"<input id="name" ng-model="user.name">"#);
    assert!(find_by_model(&page, "user", None).is_empty());
    assert!(find_by_model(&page, "user.name.first", None).is_empty());
}

#[test]
fn test_model_first_matching_prefix_wins() {
    // Both spellings are present with the same expression; the plain ng-
    // spelling is probed first and shadows the data- one entirely.
    let page = page_from(
        r#"
        <form>
          <input id="alt" data-ng-model="user.name">
          <input id="main" ng-model="user.name">
        </form>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_model(&page, "user.name", None)),
        ["main"]
    );
}

#[test]
fn test_model_probes_spellings_in_priority_order() {
    // Document position does not matter across spellings: ng_ outranks
    // x-ng- even when the x-ng- control comes first.
    let page = page_from(
        r#"
        <form>
          <input id="x" x-ng-model="user.name">
          <input id="underscore" ng_model="user.name">
        </form>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_model(&page, "user.name", None)),
        ["underscore"]
    );
}

#[test]
fn test_model_falls_back_through_spellings() {
    let page = page_from(r#"<input id="only" x-ng-model="user.name">"#);
    assert_eq!(
        ids_of(&page, &find_by_model(&page, "user.name", None)),
        ["only"]
    );
}

#[test]
fn test_model_scope_restricts_search() {
    let page = page_from(
        r#"
        <div id="left"><input id="a" ng-model="flag"></div>
        <div id="right"><input id="b" ng-model="flag"></div>
        "#,
    );
    let scope = by_id(&page, "right");
    assert_eq!(ids_of(&page, &find_by_model(&page, "flag", Some(scope))), ["b"]);
}

#[test]
fn test_model_absent_is_empty() {
    let page = page_from(r#"<input id="name" ng-model="user.name">"#);
    assert!(find_by_model(&page, "missing", None).is_empty());
}

// ========== options ==========

#[test]
fn test_options_returns_generated_option_elements() {
    let page = page_from(
        r#"
        <select id="colors" ng-options="c.name for c in colors">
          <option id="o0">red</option>
          <option id="o1">green</option>
        </select>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_options(&page, "c.name for c in colors", None)),
        ["o0", "o1"]
    );
}

#[test]
fn test_options_expression_is_exact() {
    let page = page_from(
        r#"
        <select ng-options="c.name for c in colors">
          <option id="o0">red</option>
        </select>
        "#,
    );
    assert!(find_by_options(&page, "c.name", None).is_empty());
}

#[test]
fn test_options_prefix_is_judged_by_yielded_options() {
    // The ng- spelling matches a select with no options, so the probe moves
    // on and the data- spelling provides the result.
    let page = page_from(
        r#"
        <div>
          <select ng-options="c for c in cs"></select>
          <select data-ng-options="c for c in cs">
            <option id="fallback">x</option>
          </select>
        </div>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_options(&page, "c for c in cs", None)),
        ["fallback"]
    );
}

#[test]
fn test_options_absent_is_empty() {
    let page = page_from(r"<select><option>x</option></select>");
    assert!(find_by_options(&page, "c for c in cs", None).is_empty());
}
