//! Tests for the CSS selector subset: parsing, matching, and scoped queries.

use ferret_dom::select::{query_all, AttrOp, Combinator, SimpleSelector};
use ferret_dom::{parse_selector_list, DomTree, ElementData, NodeId, NodeKind, SelectorError};

/// Helper to allocate an element with attributes under a parent.
fn append_element(
    tree: &mut DomTree,
    parent: NodeId,
    tag: &str,
    attrs: &[(&str, &str)],
) -> NodeId {
    let mut data = ElementData::new(tag);
    for (name, value) in attrs {
        let _ = data.attrs.insert((*name).to_string(), (*value).to_string());
    }
    let id = tree.alloc(NodeKind::Element(data));
    tree.append_child(parent, id);
    id
}

/// Builds a small document:
///
/// ```text
/// html > body > div#main.outer
///   ├── button.ng-binding
///   ├── input[type=submit][ng-model=user]
///   └── ul > li.item, li.item.last
/// ```
fn sample_tree() -> (DomTree, [NodeId; 7]) {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, NodeId::ROOT, "html", &[]);
    let body = append_element(&mut tree, html, "body", &[]);
    let main = append_element(&mut tree, body, "div", &[("id", "main"), ("class", "outer")]);
    let button = append_element(&mut tree, main, "button", &[("class", "ng-binding")]);
    let input = append_element(
        &mut tree,
        main,
        "input",
        &[("type", "submit"), ("ng-model", "user")],
    );
    let ul = append_element(&mut tree, main, "ul", &[]);
    let li1 = append_element(&mut tree, ul, "li", &[("class", "item")]);
    let _ = append_element(&mut tree, ul, "li", &[("class", "item last")]);
    (tree, [body, main, button, input, ul, li1, html])
}

// ========== parsing ==========

#[test]
fn test_parse_type_selector() {
    let list = parse_selector_list("button").unwrap();
    assert_eq!(list.selectors.len(), 1);
    assert_eq!(
        list.selectors[0].subject.parts,
        vec![SimpleSelector::Type("button".to_string())]
    );
}

#[test]
fn test_parse_compound_selector() {
    let list = parse_selector_list("div#main.outer").unwrap();
    let parts = &list.selectors[0].subject.parts;
    assert_eq!(parts.len(), 3);
    assert!(parts.contains(&SimpleSelector::Id("main".to_string())));
    assert!(parts.contains(&SimpleSelector::Class("outer".to_string())));
}

#[test]
fn test_parse_selector_group() {
    let list = parse_selector_list("button, input[type=\"button\"], input[type=\"submit\"]")
        .unwrap();
    assert_eq!(list.selectors.len(), 3);
}

#[test]
fn test_parse_combinators() {
    let list = parse_selector_list("ul > li .item").unwrap();
    let selector = &list.selectors[0];
    // Ancestors are stored right-to-left from the subject.
    assert_eq!(selector.ancestors.len(), 2);
    assert_eq!(selector.ancestors[0].0, Combinator::Descendant);
    assert_eq!(selector.ancestors[1].0, Combinator::Child);
}

#[test]
fn test_parse_escaped_attribute_name() {
    let list = parse_selector_list("[ng\\:model=\"user\"]").unwrap();
    match &list.selectors[0].subject.parts[0] {
        SimpleSelector::Attribute(attr) => {
            assert_eq!(attr.name, "ng:model");
            assert_eq!(attr.op, AttrOp::Equals("user".to_string()));
        }
        other => panic!("expected attribute selector, got {other:?}"),
    }
}

#[test]
fn test_parse_attribute_value_with_comma() {
    // A comma inside a quoted value must not split the group.
    let list = parse_selector_list("[data-label=\"a,b\"]").unwrap();
    assert_eq!(list.selectors.len(), 1);
}

#[test]
fn test_parse_empty_is_error() {
    assert_eq!(parse_selector_list("   "), Err(SelectorError::Empty));
}

#[test]
fn test_parse_pseudo_class_is_unsupported() {
    assert!(matches!(
        parse_selector_list("li:first-child"),
        Err(SelectorError::Unsupported(_))
    ));
}

#[test]
fn test_parse_sibling_combinator_is_unsupported() {
    assert!(matches!(
        parse_selector_list("h1 + p"),
        Err(SelectorError::Unsupported(_))
    ));
}

#[test]
fn test_parse_unterminated_attribute_is_error() {
    assert_eq!(
        parse_selector_list("[ng-model=\"user\""),
        Err(SelectorError::UnterminatedAttribute)
    );
    assert_eq!(
        parse_selector_list("[ng-model"),
        Err(SelectorError::UnterminatedAttribute)
    );
}

#[test]
fn test_parse_dangling_combinator_is_error() {
    assert_eq!(
        parse_selector_list("div >"),
        Err(SelectorError::DanglingCombinator)
    );
}

// ========== matching ==========

#[test]
fn test_match_type_is_case_insensitive() {
    let (tree, [_, _, button, ..]) = sample_tree();
    let list = parse_selector_list("BUTTON").unwrap();
    assert!(list.matches(&tree, button));
}

#[test]
fn test_match_class_and_id() {
    let (tree, [_, main, button, ..]) = sample_tree();

    let by_id = parse_selector_list("#main").unwrap();
    assert!(by_id.matches(&tree, main));
    assert!(!by_id.matches(&tree, button));

    let by_class = parse_selector_list(".ng-binding").unwrap();
    assert!(by_class.matches(&tree, button));
    assert!(!by_class.matches(&tree, main));
}

#[test]
fn test_match_attribute_operators() {
    let (tree, [.., li1, _]) = sample_tree();

    assert!(parse_selector_list("[class]").unwrap().matches(&tree, li1));
    assert!(parse_selector_list("[class=item]")
        .unwrap()
        .matches(&tree, li1));
    assert!(parse_selector_list("[class~=item]")
        .unwrap()
        .matches(&tree, li1));
    assert!(parse_selector_list("[class*=te]")
        .unwrap()
        .matches(&tree, li1));
    assert!(!parse_selector_list("[class=ite]")
        .unwrap()
        .matches(&tree, li1));
}

#[test]
fn test_match_includes_requires_whole_word() {
    let mut tree = DomTree::new();
    let div = append_element(&mut tree, NodeId::ROOT, "div", &[("class", "item last")]);

    assert!(parse_selector_list("[class~=last]")
        .unwrap()
        .matches(&tree, div));
    assert!(!parse_selector_list("[class~=las]")
        .unwrap()
        .matches(&tree, div));
}

#[test]
fn test_match_child_combinator() {
    let (tree, [.., ul, li1, _]) = sample_tree();
    let list = parse_selector_list("ul > li").unwrap();
    assert!(list.matches(&tree, li1));

    // li is not a direct child of div#main
    let strict = parse_selector_list("div > li").unwrap();
    assert!(!strict.matches(&tree, li1));
    assert!(parse_selector_list("div > ul").unwrap().matches(&tree, ul));
}

#[test]
fn test_match_descendant_combinator() {
    let (tree, [body, _, _, _, _, li1, _]) = sample_tree();
    assert!(parse_selector_list("body li").unwrap().matches(&tree, li1));
    assert!(parse_selector_list("#main .item")
        .unwrap()
        .matches(&tree, li1));
    assert!(!parse_selector_list("button li")
        .unwrap()
        .matches(&tree, li1));
    assert!(!parse_selector_list("html body").unwrap().matches(&tree, li1));
    assert!(parse_selector_list("html body").unwrap().matches(&tree, body));
}

#[test]
fn test_match_non_element_is_false() {
    let mut tree = DomTree::new();
    let div = append_element(&mut tree, NodeId::ROOT, "div", &[]);
    let text = tree.alloc(NodeKind::Text("button".to_string()));
    tree.append_child(div, text);

    let list = parse_selector_list("*").unwrap();
    assert!(!list.matches(&tree, text));
}

// ========== query_all ==========

#[test]
fn test_query_all_document_order() {
    let (tree, [_, _, button, input, _, li1, html]) = sample_tree();

    let list = parse_selector_list("button, input[type=\"submit\"], li.item").unwrap();
    let matches = query_all(&tree, html, &list);

    // Document order regardless of group order.
    assert_eq!(matches[0], button);
    assert_eq!(matches[1], input);
    assert_eq!(matches[2], li1);
    assert_eq!(matches.len(), 4);
}

#[test]
fn test_query_all_scoped_to_subtree() {
    let (tree, [_, _, _, _, ul, li1, html]) = sample_tree();

    let list = parse_selector_list(".item").unwrap();
    assert_eq!(query_all(&tree, html, &list).len(), 2);

    let scoped = query_all(&tree, ul, &list);
    assert_eq!(scoped.len(), 2);
    assert_eq!(scoped[0], li1);

    // Scope node itself is never a match candidate.
    let ul_list = parse_selector_list("ul").unwrap();
    assert!(query_all(&tree, ul, &ul_list).is_empty());
}

#[test]
fn test_query_all_no_matches() {
    let (tree, [.., html]) = sample_tree();
    let list = parse_selector_list("article").unwrap();
    assert!(query_all(&tree, html, &list).is_empty());
}
