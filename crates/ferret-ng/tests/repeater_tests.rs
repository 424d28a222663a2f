//! Integration tests for repeater row matching.

use ferret_dom::NodeId;
use ferret_ng::{
    collect_segment, find_all_repeater_rows, find_repeater_rows, AnnotatedPage, RenderedPage,
    SegmentEnd,
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

const CAT_LIST: &str = r#"
<ul id="cats">
  <li id="r0" ng-repeat="cat in cats">Tom</li>
  <li id="r1" ng-repeat="cat in cats">Tommy</li>
  <li id="r2" ng-repeat="cat in cats">Whiskers</li>
</ul>
"#;

const BOOK_TABLE: &str = r#"
<table>
  <tr id="t0" ng-repeat-start="book in library"><td>Title</td></tr>
  <tr id="a0"><td>Author</td></tr>
  <!-- ngRepeat: book in library -->
  <tr id="t1" ng-repeat-start="book in library"><td>Title</td></tr>
  <tr id="a1"><td>Author</td></tr>
  <!-- end ngRepeat: book in library -->
</table>
"#;

// ========== single-element rows ==========

#[test]
fn test_row_by_index() {
    let page = page_from(CAT_LIST);
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "cat in cats", 0, None)),
        ["r0"]
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "cat in cats", 2, None)),
        ["r2"]
    );
}

#[test]
fn test_descriptor_matches_by_containment() {
    let page = page_from(CAT_LIST);
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "cat in", 0, None)),
        ["r0"]
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "in cats", 1, None)),
        ["r1"]
    );
}

#[test]
fn test_index_past_last_row_is_empty() {
    let page = page_from(CAT_LIST);
    assert!(find_repeater_rows(&page, "cat in cats", 9, None).is_empty());
}

#[test]
fn test_unknown_descriptor_is_empty() {
    let page = page_from(CAT_LIST);
    assert!(find_repeater_rows(&page, "dog in dogs", 0, None).is_empty());
    assert!(find_all_repeater_rows(&page, "dog in dogs", None).is_empty());
}

#[test]
fn test_all_rows_in_document_order() {
    let page = page_from(CAT_LIST);
    assert_eq!(
        ids_of(&page, &find_all_repeater_rows(&page, "cat in cats", None)),
        ["r0", "r1", "r2"]
    );
}

// ========== directive prefix spellings ==========

#[test]
fn test_every_prefix_spelling_is_recognized() {
    let page = page_from(
        r#"
        <div>
          <p id="a" ng-repeat="x in xs"></p>
          <p id="b" ng_repeat="x in xs"></p>
          <p id="c" data-ng-repeat="x in xs"></p>
          <p id="d" x-ng-repeat="x in xs"></p>
          <p id="e" ng:repeat="x in xs"></p>
        </div>
        "#,
    );
    let all = find_all_repeater_rows(&page, "x in xs", None);
    assert_eq!(ids_of(&page, &all), ["a", "b", "c", "d", "e"]);
}

#[test]
fn test_aggregation_orders_by_prefix_before_document_position() {
    // The data- spelling comes first in the document but the plain ng-
    // spelling has higher priority, so its rows lead the aggregate.
    let page = page_from(
        r#"
        <ul>
          <li id="low" data-ng-repeat="cat in cats"></li>
          <li id="high" ng-repeat="cat in cats"></li>
        </ul>
        "#,
    );
    let all = find_all_repeater_rows(&page, "cat in cats", None);
    assert_eq!(ids_of(&page, &all), ["high", "low"]);

    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "cat in cats", 0, None)),
        ["high"]
    );
}

// ========== multi-element rows ==========

#[test]
fn test_segment_row_spans_to_marker_comment() {
    let page = page_from(BOOK_TABLE);
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "book in library", 0, None)),
        ["t0", "a0"]
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "book in library", 1, None)),
        ["t1", "a1"]
    );
}

#[test]
fn test_all_rows_flattens_segments() {
    let page = page_from(BOOK_TABLE);
    assert_eq!(
        ids_of(&page, &find_all_repeater_rows(&page, "book in library", None)),
        ["t0", "a0", "t1", "a1"]
    );
}

#[test]
fn test_unrelated_comment_does_not_close_a_segment() {
    let page = page_from(
        r#"
        <div>
          <p id="s0" ng-repeat-start="item in items"></p>
          <!-- decorative -->
          <p id="s1"></p>
          <!-- ngRepeat: item in items -->
          <p id="outside"></p>
        </div>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "item in items", 0, None)),
        ["s0", "s1"]
    );
}

#[test]
fn test_segment_without_closing_comment_truncates_at_last_sibling() {
    let page = page_from(
        r#"
        <div>
          <p id="s0" ng-repeat-start="item in items"></p>
          <p id="s1"></p>
          <p id="s2"></p>
        </div>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "item in items", 0, None)),
        ["s0", "s1", "s2"]
    );
}

#[test]
fn test_segment_walk_reports_its_termination() {
    let page = page_from(
        r#"
        <div>
          <p id="closed" ng-repeat-start="item in items"></p>
          <!-- ngRepeat: item in items -->
        </div>
        <div>
          <p id="open" ng-repeat-start="item in items"></p>
          <p id="tail"></p>
        </div>
        "#,
    );
    let tree = page.tree();

    let (row, end) = collect_segment(tree, by_id(&page, "closed"), "item in items");
    assert_eq!(end, SegmentEnd::Marker);
    assert_eq!(ids_of(&page, &row), ["closed"]);

    let (row, end) = collect_segment(tree, by_id(&page, "open"), "item in items");
    assert_eq!(end, SegmentEnd::SiblingsExhausted);
    assert_eq!(ids_of(&page, &row), ["open", "tail"]);
}

#[test]
fn test_simple_and_segment_rows_concatenate_per_index() {
    // The same descriptor drives both categories; row 0 is the first simple
    // row followed by the first segment.
    let page = page_from(
        r#"
        <div>
          <p id="simple0" ng-repeat="item in items"></p>
          <p id="seg0a" ng-repeat-start="item in items"></p>
          <p id="seg0b"></p>
          <!-- ngRepeat: item in items -->
        </div>
        "#,
    );
    assert_eq!(
        ids_of(&page, &find_repeater_rows(&page, "item in items", 0, None)),
        ["simple0", "seg0a", "seg0b"]
    );
    assert_eq!(
        ids_of(&page, &find_all_repeater_rows(&page, "item in items", None)),
        ["simple0", "seg0a", "seg0b"]
    );
}

// ========== scope ==========

#[test]
fn test_scope_limits_the_search() {
    let page = page_from(
        r#"
        <div id="left"><p id="in" ng-repeat="cat in cats"></p></div>
        <div id="right"><p id="out" ng-repeat="cat in cats"></p></div>
        "#,
    );
    let scope = by_id(&page, "left");
    assert_eq!(
        ids_of(&page, &find_all_repeater_rows(&page, "cat in cats", Some(scope))),
        ["in"]
    );
}
