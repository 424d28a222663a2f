//! Integration tests for loaded-page state: annotation harvesting,
//! framework detection, and request tracking.

use ferret_dom::NodeId;
use ferret_harness::{FrameworkPresence, LoadedPage};
use ferret_ng::{find_bindings, BindingAnnotation, RenderedPage};

/// Helper to find an element by its `id` attribute.
fn by_id(page: &LoadedPage, id: &str) -> NodeId {
    page.tree()
        .descendants(NodeId::ROOT)
        .find(|&node| {
            page.tree()
                .as_element(node)
                .is_some_and(|element| element.id() == Some(id))
        })
        .unwrap_or_else(|| panic!("no element with id {id}"))
}

/// Helper to fetch the primary expression harvested for an element.
fn primary_of(page: &LoadedPage, id: &str) -> Option<String> {
    page.binding_annotation(by_id(page, id))
        .and_then(BindingAnnotation::primary)
        .map(str::to_string)
}

// ========== annotation harvesting ==========

#[test]
fn test_harvests_bind_attribute() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="name" class="ng-binding" ng-bind="user.name"></span>
        </body></html>"#,
    );

    assert_eq!(primary_of(&page, "name"), Some("user.name".to_string()));
}

#[test]
fn test_harvests_every_bind_family_attribute() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="plain" class="ng-binding" data-ng-bind="a"></span>
            <span id="html" class="ng-binding" ng-bind-html="b"></span>
            <span id="template" class="ng-binding" ng-bind-template="{{c}} {{d}}"></span>
        </body></html>"#,
    );

    assert_eq!(primary_of(&page, "plain"), Some("a".to_string()));
    assert_eq!(primary_of(&page, "html"), Some("b".to_string()));
    assert_eq!(primary_of(&page, "template"), Some("{{c}} {{d}}".to_string()));
}

#[test]
fn test_harvests_interpolation_markers_with_braces() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="greeting" class="ng-binding">Hi {{user.first}} {{user.last}}!</span>
        </body></html>"#,
    );

    let annotation = page.binding_annotation(by_id(&page, "greeting")).unwrap();
    assert_eq!(
        *annotation,
        BindingAnnotation::Expressions(vec![
            "{{user.first}}".to_string(),
            "{{user.last}}".to_string(),
        ])
    );
    assert_eq!(annotation.primary(), Some("{{user.first}}"));
}

#[test]
fn test_bind_attribute_wins_over_interpolation() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="both" class="ng-binding" ng-bind="direct">{{fallback}}</span>
        </body></html>"#,
    );

    assert_eq!(primary_of(&page, "both"), Some("direct".to_string()));
}

#[test]
fn test_interpolation_belongs_to_the_direct_parent() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <div id="outer" class="ng-binding"><span id="inner" class="ng-binding">{{cat.name}}</span></div>
        </body></html>"#,
    );

    assert_eq!(primary_of(&page, "outer"), None);
    assert_eq!(primary_of(&page, "inner"), Some("{{cat.name}}".to_string()));
}

#[test]
fn test_unclosed_interpolation_is_ignored() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="broken" class="ng-binding">{{never closed</span>
        </body></html>"#,
    );

    assert!(page.binding_annotation(by_id(&page, "broken")).is_none());
}

#[test]
fn test_harvested_annotations_feed_binding_lookup() {
    let page = LoadedPage::from_html(
        r#"<html ng-app="app"><body>
            <span id="name" class="ng-binding">{{user.name}}</span>
            <span id="plain">{{user.name}}</span>
        </body></html>"#,
    );

    let matched = find_bindings(&page, "user.name", false, None).unwrap();
    assert_eq!(matched, vec![by_id(&page, "name")]);
}

// ========== framework detection ==========

#[test]
fn test_app_directive_means_framework_present() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);
    assert_eq!(page.framework_presence(), FrameworkPresence::Ready);
}

#[test]
fn test_app_directive_detected_under_any_prefix() {
    let page = LoadedPage::from_html(r#"<html><body data-ng-app="store"></body></html>"#);
    assert_eq!(page.framework_presence(), FrameworkPresence::Ready);
}

#[test]
fn test_no_app_directive_means_framework_missing() {
    let page = LoadedPage::from_html("<html><body><p>static</p></body></html>");
    assert_eq!(page.framework_presence(), FrameworkPresence::Missing);
    assert!(page.framework().is_none());
}

#[test]
fn test_without_framework_overrides_detection() {
    let page =
        LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#).without_framework();
    assert_eq!(page.framework_presence(), FrameworkPresence::Missing);
}

#[test]
fn test_pending_bootstrap_withholds_the_resume_hook() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#)
        .with_pending_bootstrap();
    assert_eq!(page.framework_presence(), FrameworkPresence::BootstrapPending);
}

#[test]
fn test_base_url_feeds_the_absolute_url() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#)
        .with_base_url("http://shop.test/app.html");
    let framework = page.framework().unwrap();
    assert_eq!(framework.abs_url(), "http://shop.test/app.html#/");
}

// ========== request tracking ==========

#[test]
fn test_requests_count_up_and_down() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);

    assert_eq!(page.outstanding_requests(), 0);
    page.begin_request();
    page.begin_request();
    assert_eq!(page.outstanding_requests(), 2);
    page.complete_request();
    assert_eq!(page.outstanding_requests(), 1);
    page.complete_request();
    assert_eq!(page.outstanding_requests(), 0);
}

#[test]
fn test_completing_with_nothing_in_flight_stays_at_zero() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);

    page.complete_request();
    assert_eq!(page.outstanding_requests(), 0);
}

#[test]
fn test_request_tracking_is_inert_without_a_framework() {
    let page = LoadedPage::from_html("<html><body></body></html>");

    page.begin_request();
    assert_eq!(page.outstanding_requests(), 0);
}

// ========== animations flag ==========

#[test]
fn test_animations_default_on_and_report_when_read() {
    let mut page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);
    assert_eq!(page.allow_animations(None), Ok(true));
}

#[test]
fn test_animations_setting_persists() {
    let mut page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);

    assert_eq!(page.allow_animations(Some(false)), Ok(false));
    assert_eq!(page.allow_animations(None), Ok(false));
    assert_eq!(page.allow_animations(Some(true)), Ok(true));
}

#[test]
fn test_animations_require_a_framework() {
    let mut page = LoadedPage::from_html("<html><body></body></html>");

    let error = page.allow_animations(None).unwrap_err();
    assert_eq!(error.message(), "angular could not be found on the window");
}
