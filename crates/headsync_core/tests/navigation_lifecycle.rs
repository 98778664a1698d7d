use headsync_core::{
    resolve, DirectiveError, HeadController, HeadSlot, HeadStore, Location, MemoryHeadStore,
    MetadataDirective, PageView, StructuredData, StructuredDataError, SyncError, SyncPolicy,
};
use serde_json::{json, Value};

const ORIGIN: &str = "https://example.com";

fn controller_at(path: &str) -> HeadController<MemoryHeadStore> {
    HeadController::with_policy(
        MemoryHeadStore::new(),
        Location::new(ORIGIN, path),
        SyncPolicy::strict(),
    )
}

fn go(controller: &mut HeadController<MemoryHeadStore>, path: &str) {
    controller
        .navigate(Location::new(ORIGIN, path), resolve(path).directive())
        .expect("navigation applies");
}

fn structured_payload(store: &MemoryHeadStore) -> Option<Value> {
    store
        .value(&HeadSlot::STRUCTURED_DATA)
        .map(|text| serde_json::from_str(text).expect("payload is JSON"))
}

#[test]
fn navigation_retracts_previous_structured_data() {
    let mut controller = controller_at("/about");
    controller
        .mount(PageView::About.directive().expect("about directive"))
        .expect("mount about");
    assert_eq!(controller.store().count(&HeadSlot::STRUCTURED_DATA), 1);

    go(&mut controller, "/resume");

    let store = controller.store();
    assert_eq!(store.count(&HeadSlot::STRUCTURED_DATA), 0);
    assert_eq!(
        store.value(&HeadSlot::CANONICAL),
        Some("https://example.com/resume")
    );
}

#[test]
fn navigation_replaces_structured_data_between_views() {
    let mut controller = controller_at("/about");
    controller
        .mount(PageView::About.directive().expect("about directive"))
        .expect("mount about");

    go(&mut controller, "/work");

    let store = controller.store();
    assert_eq!(store.count(&HeadSlot::STRUCTURED_DATA), 1);
    let payload = structured_payload(store).expect("work payload");
    assert_eq!(payload["@type"], "ItemList");
}

#[test]
fn unchanged_dependencies_do_not_reapply() {
    let mut controller = controller_at("/about");
    let directive = PageView::About.directive().expect("about directive");
    controller.mount(directive.clone()).expect("mount");

    let rerun = controller.rerender(directive.clone()).expect("rerender");
    assert!(rerun.is_none());

    let same_path = controller
        .navigate(
            Location::new(ORIGIN, "/about").with_hash("#skills"),
            Some(directive),
        )
        .expect("hash navigation");
    assert!(same_path.is_none());
    assert_eq!(controller.observer().commits(), 1);
}

#[test]
fn changed_directive_reapplies_in_place() {
    let mut controller = controller_at("/");
    controller
        .mount(MetadataDirective::new("Draft", "d").with_canonical_path("/"))
        .expect("mount");
    let report = controller
        .rerender(MetadataDirective::new("Final", "d").with_canonical_path("/"))
        .expect("rerender")
        .expect("changed directive reapplies");

    assert_eq!(report.canonical_href.as_deref(), Some("https://example.com/"));
    assert_eq!(controller.store().title(), "Final");
    assert_eq!(controller.store().count(&HeadSlot::OG_TITLE), 1);
}

#[test]
fn unmount_retracts_exactly_once() {
    let mut controller = controller_at("/about");
    controller
        .mount(PageView::About.directive().expect("about directive"))
        .expect("mount about");

    assert!(controller.unmount());
    assert_eq!(controller.store().count(&HeadSlot::STRUCTURED_DATA), 0);
    assert!(controller.mounted_directive().is_none());

    assert!(!controller.unmount());
}

#[test]
fn navigating_to_view_without_directive_tears_down() {
    let mut controller = controller_at("/work");
    controller
        .mount(PageView::Work.directive().expect("work directive"))
        .expect("mount work");

    let report = controller
        .navigate(Location::new(ORIGIN, "/missing"), resolve("/missing").directive())
        .expect("not-found navigation");

    assert!(report.is_none());
    let store = controller.store();
    assert_eq!(store.count(&HeadSlot::STRUCTURED_DATA), 0);
    assert!(store.title().starts_with("Sample of Work"));
}

#[test]
fn rerender_without_navigation_keeps_stale_structured_data() {
    // Path is unchanged and matches the canonical path, so neither retract
    // nor apply removes the node when structured data is dropped.
    let mut controller = controller_at("/about");
    let with_data = MetadataDirective::new("About", "Bio")
        .with_canonical_path("/about")
        .with_structured_data(StructuredData::from_value(json!({"@type": "Person"})));
    controller.mount(with_data).expect("mount with data");

    let report = controller
        .rerender(MetadataDirective::new("About", "Bio").with_canonical_path("/about"))
        .expect("rerender")
        .expect("directive changed");

    assert!(!report.structured_data_removed);
    let store = controller.store();
    assert_eq!(store.count(&HeadSlot::STRUCTURED_DATA), 1);
    assert_eq!(
        structured_payload(store),
        Some(json!({"@type": "Person"}))
    );
}

#[test]
fn retract_compares_current_path_with_previous_canonical_path() {
    let mut controller = controller_at("/a");
    let previous = MetadataDirective::new("A", "d")
        .with_canonical_path("/a")
        .with_structured_data(StructuredData::from_value(json!({"v": 1})));
    controller.mount(previous.clone()).expect("mount");

    let sync = controller.synchronizer_mut();
    assert!(!sync.retract(&previous, "/a"));
    assert_eq!(sync.store().count(&HeadSlot::STRUCTURED_DATA), 1);
    assert!(sync.retract(&previous, "/b"));
    assert_eq!(sync.store().count(&HeadSlot::STRUCTURED_DATA), 0);
    assert!(!sync.retract(&previous, "/b"));
}

#[test]
fn rapid_navigation_keeps_one_node_per_slot() {
    let mut controller = controller_at("/");
    controller
        .mount(PageView::Landing.directive().expect("landing directive"))
        .expect("mount landing");

    for path in ["/about", "/resume", "/work", "/about", "/work", "/", "/about"] {
        go(&mut controller, path);
        for slot in HeadSlot::managed() {
            assert!(controller.store().count(slot) <= 1, "{slot} duplicated at {path}");
        }
    }

    let store = controller.store();
    assert_eq!(
        store.value(&HeadSlot::CANONICAL),
        Some("https://example.com/about")
    );
    let payload = structured_payload(store).expect("about payload");
    assert_eq!(payload["@type"], "Person");
    assert_eq!(controller.observer().commits(), 7);
}

#[test]
fn unrenderable_payload_still_clears_previous_view_payload() {
    let mut controller = controller_at("/x");
    controller
        .mount(
            MetadataDirective::new("X", "view x")
                .with_structured_data(StructuredData::from_value(json!({"view": "x"}))),
        )
        .expect("mount x");
    assert_eq!(
        structured_payload(controller.store()),
        Some(json!({"view": "x"}))
    );

    let report = controller
        .navigate(
            Location::new(ORIGIN, "/y"),
            Some(
                MetadataDirective::new("Y", "view y")
                    .with_structured_data(StructuredData::from_value(json!("bad"))),
            ),
        )
        .expect("navigate to y")
        .expect("directive changed");

    assert_eq!(
        report.structured_data_error,
        Some(StructuredDataError::NotAnObject("string"))
    );
    assert!(report.structured_data_removed);
    assert_eq!(controller.store().count(&HeadSlot::STRUCTURED_DATA), 0);
}

#[test]
fn invalid_rerender_fails_every_time() {
    let mut controller = controller_at("/about");
    controller
        .mount(PageView::About.directive().expect("about directive"))
        .expect("mount about");

    for _ in 0..2 {
        let err = controller
            .rerender(MetadataDirective::new("", "still no title"))
            .expect_err("empty title is rejected");
        assert_eq!(err, SyncError::InvalidDirective(DirectiveError::EmptyTitle));
    }

    assert!(controller.unmount());
    assert_eq!(controller.store().count(&HeadSlot::STRUCTURED_DATA), 0);
}
