//! Integration tests for button text and CSS-with-text matching.

use ferret_dom::NodeId;
use ferret_ng::{
    find_by_button_text, find_by_css_containing_text, find_by_partial_button_text, AnnotatedPage,
    MatchError, RenderedPage,
};

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

const TOOLBAR: &str = r#"
<div id="toolbar">
  <button id="save"> Save now</button>
  <input id="go" type="submit" value="Go">
  <input id="search" type="button" value="Search things">
  <input id="field" type="text" value="Go">
  <a id="link">Go</a>
</div>
"#;

// ========== exact button text ==========

#[test]
fn test_button_label_is_trimmed_before_comparison() {
    let page = page_from(TOOLBAR);
    assert_eq!(
        ids_of(&page, &find_by_button_text(&page, "Save now", None)),
        ["save"]
    );
}

#[test]
fn test_search_text_is_not_trimmed() {
    let page = page_from(TOOLBAR);
    assert!(find_by_button_text(&page, " Save now", None).is_empty());
}

#[test]
fn test_input_buttons_match_on_value_attribute() {
    let page = page_from(TOOLBAR);
    assert_eq!(ids_of(&page, &find_by_button_text(&page, "Go", None)), ["go"]);
    assert_eq!(
        ids_of(&page, &find_by_button_text(&page, "Search things", None)),
        ["search"]
    );
}

#[test]
fn test_non_button_elements_never_match() {
    // The text input and the anchor both carry "Go" but are not candidates.
    let page = page_from(
        r#"
        <div>
          <input id="field" type="text" value="Download">
          <a id="link">Download</a>
        </div>
        "#,
    );
    assert!(find_by_button_text(&page, "Download", None).is_empty());
    assert!(find_by_partial_button_text(&page, "Download", None).is_empty());
}

#[test]
fn test_button_text_spans_nested_markup() {
    let page = page_from(r#"<button id="rich"><b>Bold</b> move</button>"#);
    assert_eq!(
        ids_of(&page, &find_by_button_text(&page, "Bold move", None)),
        ["rich"]
    );
}

#[test]
fn test_input_without_value_has_empty_label() {
    let page = page_from(r#"<input id="bare" type="submit">"#);
    assert_eq!(ids_of(&page, &find_by_button_text(&page, "", None)), ["bare"]);
}

// ========== partial button text ==========

#[test]
fn test_partial_matches_by_containment() {
    let page = page_from(TOOLBAR);
    assert_eq!(
        ids_of(&page, &find_by_partial_button_text(&page, "Save", None)),
        ["save"]
    );
    assert_eq!(
        ids_of(&page, &find_by_partial_button_text(&page, "thing", None)),
        ["search"]
    );
}

#[test]
fn test_partial_sees_untrimmed_label() {
    // The label of #save starts with a space; partial matching may use it.
    let page = page_from(TOOLBAR);
    assert_eq!(
        ids_of(&page, &find_by_partial_button_text(&page, " Save", None)),
        ["save"]
    );
}

#[test]
fn test_buttons_come_back_in_document_order() {
    let page = page_from(
        r#"
        <div>
          <button id="b0">Next</button>
          <input id="b1" type="button" value="Next">
          <button id="b2">Next</button>
        </div>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_by_button_text(&page, "Next", None)),
        ["b0", "b1", "b2"]
    );
}

// ========== css containing text ==========

#[test]
fn test_css_narrowed_by_text() {
    let page = page_from(
        r#"
        <ul>
          <li id="dog" class="pet">Dog</li>
          <li id="cat" class="pet">Cat</li>
          <li id="loud" class="pet">Big Dog</li>
        </ul>
        "#,
    );
    let matched = find_by_css_containing_text(&page, ".pet", "Dog", None).unwrap();
    assert_eq!(ids_of(&page, &matched), ["dog", "loud"]);
}

#[test]
fn test_css_text_includes_descendant_text() {
    let page = page_from(
        r#"
        <div id="card" class="card"><span>Inner label</span></div>
        "#,
    );
    let matched = find_by_css_containing_text(&page, ".card", "Inner", None).unwrap();
    assert_eq!(ids_of(&page, &matched), ["card"]);
}

#[test]
fn test_css_scope_restricts_candidates() {
    let page = page_from(
        r#"
        <div id="left"><p id="a" class="note">hello</p></div>
        <div id="right"><p id="b" class="note">hello</p></div>
        "#,
    );
    let scope = by_id(&page, "right");
    let matched = find_by_css_containing_text(&page, ".note", "hello", Some(scope)).unwrap();
    assert_eq!(ids_of(&page, &matched), ["b"]);
}

#[test]
fn test_css_rejects_unsupported_selector() {
    let page = page_from(r"<ul><li>one</li></ul>");
    let err = find_by_css_containing_text(&page, "li:nth-child(2)", "one", None).unwrap_err();
    assert!(matches!(err, MatchError::Selector(_)));
}
