//! End-to-end page lifecycles against the in-memory document

use std::borrow::Cow;

use inview_animation::apply::{DELAY, DURATION, WILL_CHANGE};
use inview_animation::{AnimationController, AnimationEvent, InitOutcome, WatchState};
use inview_dom::{Document, DomError, ElementId, Host, ObserverId};

const CLASS: &str = "is-animating";

struct Page {
    doc: Document,
    controller: AnimationController,
}

impl Page {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            controller: AnimationController::default(),
        }
    }

    fn animated(&mut self, parent: ElementId, attrs: &[(&str, &str)]) -> ElementId {
        let el = self.doc.create_element("div");
        self.doc.append_child(parent, el).unwrap();
        for (name, value) in attrs {
            self.doc.set_attribute(el, name, value).unwrap();
        }
        el
    }

    fn init(&mut self) -> InitOutcome {
        self.controller.init(&mut self.doc).unwrap()
    }

    fn scroll(&mut self, el: ElementId, ratio: f64) {
        self.doc.set_visible_ratio(el, ratio).unwrap();
        self.flush();
    }

    fn flush(&mut self) {
        for batch in self.doc.take_intersections() {
            self.controller
                .handle_event(&mut self.doc, AnimationEvent::Intersection(batch))
                .unwrap();
        }
    }

    fn animating(&self, el: ElementId) -> bool {
        self.doc.has_class(el, CLASS)
    }

    fn style(&self, el: ElementId, name: &str) -> Option<String> {
        self.doc.style_property(el, name).map(|value| value.into_owned())
    }
}

#[test]
fn test_first_entry_sets_class_once() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "fade")]);

    page.init();
    page.flush();
    assert!(!page.animating(el));
    assert_eq!(page.controller.state(&page.doc, el), WatchState::Observing);

    page.scroll(el, 0.5);
    assert!(page.animating(el));
    assert_eq!(page.controller.state(&page.doc, el), WatchState::Triggered);
    assert_eq!(page.controller.pool().animated_count(), 1);
}

#[test]
fn test_once_element_does_not_retrigger() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "slide")]);
    page.init();

    page.scroll(el, 1.0);
    page.controller
        .handle_event(&mut page.doc, AnimationEvent::AnimationEnd(el))
        .unwrap();
    assert_eq!(page.style(el, WILL_CHANGE), None);

    page.scroll(el, 0.0);
    page.scroll(el, 1.0);
    assert!(page.animating(el));
    // Not promoted again
    assert_eq!(page.style(el, WILL_CHANGE), None);
    assert_eq!(page.controller.pool().pending_animation_ends(), 0);
}

#[test]
fn test_repeat_element_toggles_unboundedly() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(
        root,
        &[("data-animate", "zoom"), ("data-animate-repeat", "every")],
    );
    page.init();

    for _ in 0..5 {
        page.scroll(el, 1.0);
        assert!(page.animating(el));
        page.scroll(el, 0.0);
        assert!(!page.animating(el));
        assert_eq!(page.controller.state(&page.doc, el), WatchState::Observing);
    }
}

#[test]
fn test_threshold_controls_trigger_point() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(
        root,
        &[("data-animate", "fade"), ("data-animate-threshold", "0.5")],
    );
    page.init();

    page.scroll(el, 0.3);
    assert!(!page.animating(el));
    page.scroll(el, 0.5);
    assert!(page.animating(el));
}

#[test]
fn test_shared_observers_per_threshold() {
    let mut page = Page::new();
    let root = page.doc.root();
    for _ in 0..3 {
        page.animated(root, &[("data-animate", "fade")]);
    }
    page.animated(
        root,
        &[("data-animate", "fade"), ("data-animate-threshold", "0.2")],
    );
    page.animated(
        root,
        &[("data-animate", "fade"), ("data-animate-threshold", "0.6")],
    );

    let outcome = page.init();
    assert_eq!(outcome, InitOutcome::Initialized { groups: 0, elements: 5 });
    assert_eq!(page.controller.pool().shared_observer_count(), 2);
    assert_eq!(page.doc.observer_count(), 2);
}

#[test]
fn test_stagger_group_delays_and_single_fire() {
    let mut page = Page::new();
    let root = page.doc.root();
    let list = page.animated(
        root,
        &[("data-animate-stagger", "50"), ("data-animate-stagger-from", "center")],
    );
    let children: Vec<_> = (0..4)
        .map(|_| page.animated(list, &[("data-animate", "fade"), ("data-animate-delay", "100")]))
        .collect();

    let outcome = page.init();
    assert_eq!(outcome, InitOutcome::Initialized { groups: 1, elements: 0 });

    let delays: Vec<_> = children
        .iter()
        .map(|&child| page.style(child, DELAY).unwrap())
        .collect();
    assert_eq!(delays, ["175ms", "125ms", "125ms", "175ms"]);

    page.scroll(list, 0.05);
    assert!(children.iter().all(|&child| !page.animating(child)));

    page.scroll(list, 0.2);
    assert!(children.iter().all(|&child| page.animating(child)));
    assert!(!page.doc.is_observed(list));

    for &child in &children {
        page.controller
            .handle_event(&mut page.doc, AnimationEvent::AnimationEnd(child))
            .unwrap();
    }
    page.scroll(list, 0.0);
    page.scroll(list, 1.0);
    assert_eq!(page.controller.pool().pending_animation_ends(), 0);
}

#[test]
fn test_stagger_children_are_not_solo_watched() {
    let mut page = Page::new();
    let root = page.doc.root();
    let grid = page.animated(root, &[("data-animate-stagger", "")]);
    let child = page.animated(grid, &[("data-animate", "flip")]);
    let nested_wrapper = page.animated(grid, &[]);
    let grandchild = page.animated(nested_wrapper, &[("data-animate", "roll")]);

    let outcome = page.init();
    assert_eq!(outcome, InitOutcome::Initialized { groups: 1, elements: 1 });
    assert_eq!(page.style(child, DELAY).as_deref(), Some("0ms"));
    assert!(!page.doc.is_observed(child));
    // Only direct children join the group
    assert!(page.doc.is_observed(grandchild));
}

#[test]
fn test_empty_stagger_group_is_skipped() {
    let mut page = Page::new();
    let root = page.doc.root();
    page.animated(root, &[("data-animate-stagger", "100")]);

    let outcome = page.init();
    assert_eq!(outcome, InitOutcome::Initialized { groups: 0, elements: 0 });
    assert_eq!(page.doc.observer_count(), 0);
}

#[test]
fn test_reduced_motion_skips_watchers() {
    let mut page = Page::new();
    page.doc.set_reduced_motion(true);
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "bounce")]);

    let outcome = page.init();
    assert_eq!(outcome, InitOutcome::ReducedMotion { forced: 1 });
    assert_eq!(page.style(el, "opacity").as_deref(), Some("1"));
    assert_eq!(page.style(el, "transform").as_deref(), Some("none"));
    assert_eq!(page.style(el, DURATION), None);
    assert!(!page.controller.is_initialized(&page.doc));
    assert_eq!(page.doc.observer_count(), 0);
}

#[test]
fn test_page_load_after_bootstrap_is_a_no_op() {
    let mut page = Page::new();
    let root = page.doc.root();
    page.animated(root, &[("data-animate", "fade")]);

    page.controller.bootstrap(&mut page.doc).unwrap();
    page.controller
        .handle_event(&mut page.doc, AnimationEvent::PageLoad)
        .unwrap();
    assert_eq!(page.doc.observer_count(), 1);
    assert_eq!(page.controller.pool().observer_count(), 1);
}

#[test]
fn test_destroy_then_init_restores_initial_state() {
    let mut page = Page::new();
    let root = page.doc.root();
    let solo = page.animated(
        root,
        &[("data-animate", "fade"), ("data-animate-repeat", "every")],
    );
    let list = page.animated(root, &[("data-animate-stagger", "100")]);
    let child = page.animated(list, &[("data-animate", "slide")]);

    let first = page.init();
    let first_duration = page.style(solo, DURATION);
    page.scroll(solo, 1.0);
    page.scroll(list, 1.0);
    assert!(page.animating(solo) && page.animating(child));

    page.controller
        .handle_event(&mut page.doc, AnimationEvent::BeforeSwap)
        .unwrap();
    assert!(!page.controller.is_initialized(&page.doc));
    assert!(page.controller.pool().is_empty());
    assert_eq!(page.doc.observer_count(), 0);
    for el in [solo, child] {
        assert!(!page.animating(el));
        assert!(page.doc.style_properties(el).is_empty());
        assert_eq!(page.controller.state(&page.doc, el), WatchState::Unobserved);
    }

    page.doc.hide_all();
    let second = page.init();
    assert_eq!(first, second);
    assert_eq!(page.style(solo, DURATION), first_duration);
    assert_eq!(page.controller.state(&page.doc, solo), WatchState::Observing);
    assert_eq!(page.controller.pool().observer_count(), 2);

    page.scroll(solo, 1.0);
    assert!(page.animating(solo));
}

#[test]
fn test_stale_deliveries_after_destroy_are_ignored() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "fade")]);
    page.init();

    page.doc.set_visible_ratio(el, 1.0).unwrap();
    let pending = page.doc.take_intersections();
    assert!(!pending.is_empty());

    page.controller.destroy(&mut page.doc).unwrap();
    for batch in pending {
        page.controller
            .handle_event(&mut page.doc, AnimationEvent::Intersection(batch))
            .unwrap();
    }
    assert!(!page.animating(el));
    assert_eq!(page.controller.state(&page.doc, el), WatchState::Unobserved);
}

#[test]
fn test_animation_end_releases_will_change() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "fade")]);
    page.init();

    page.scroll(el, 1.0);
    assert_eq!(page.style(el, WILL_CHANGE).as_deref(), Some("opacity, transform"));

    page.controller
        .handle_event(&mut page.doc, AnimationEvent::AnimationEnd(el))
        .unwrap();
    assert_eq!(page.style(el, WILL_CHANGE), None);
    // The class stays; only the compositor hint is released
    assert!(page.animating(el));
}

#[test]
fn test_removed_element_does_not_fail_delivery() {
    let mut page = Page::new();
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "fade")]);
    page.init();

    page.doc.set_visible_ratio(el, 1.0).unwrap();
    let pending = page.doc.take_intersections();
    page.doc.remove(el).unwrap();
    for batch in pending {
        page.controller
            .handle_event(&mut page.doc, AnimationEvent::Intersection(batch))
            .unwrap();
    }
    assert!(!page.controller.pool().is_animated(el));
    page.controller.destroy(&mut page.doc).unwrap();
}

#[test]
fn test_reduced_motion_allows_later_init() {
    let mut page = Page::new();
    page.doc.set_reduced_motion(true);
    let root = page.doc.root();
    let el = page.animated(root, &[("data-animate", "fade")]);

    assert_eq!(page.init(), InitOutcome::ReducedMotion { forced: 1 });
    assert_eq!(page.doc.observer_count(), 0);

    page.doc.set_reduced_motion(false);
    assert_eq!(page.init(), InitOutcome::Initialized { groups: 0, elements: 1 });
    assert!(page.controller.is_initialized(&page.doc));
    assert_eq!(page.doc.observer_count(), 1);

    page.scroll(el, 1.0);
    assert!(page.animating(el));
}

/// A document whose ready-marker writes fail a set number of times
struct FailingMarkerHost {
    doc: Document,
    marker_failures: usize,
}

impl Host for FailingMarkerHost {
    fn root(&self) -> ElementId {
        self.doc.root()
    }

    fn query_all(&self, attribute: &str) -> Vec<ElementId> {
        self.doc.query_all(attribute)
    }

    fn children_with_attribute(&self, parent: ElementId, attribute: &str) -> Vec<ElementId> {
        self.doc.children_with_attribute(parent, attribute)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.doc.attribute(element, name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) -> inview_dom::Result<()> {
        if element == self.doc.root() && self.marker_failures > 0 {
            self.marker_failures -= 1;
            return Err(DomError::UnknownElement(element));
        }
        self.doc.set_attribute(element, name, value)
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) -> inview_dom::Result<()> {
        self.doc.remove_attribute(element, name)
    }

    fn style_property(&self, element: ElementId, name: &str) -> Option<Cow<'_, str>> {
        self.doc.style_property(element, name)
    }

    fn set_style_property(&mut self, element: ElementId, name: &str, value: &str) -> inview_dom::Result<()> {
        self.doc.set_style_property(element, name, value)
    }

    fn remove_style_property(&mut self, element: ElementId, name: &str) -> inview_dom::Result<()> {
        self.doc.remove_style_property(element, name)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.doc.has_class(element, class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> inview_dom::Result<()> {
        self.doc.add_class(element, class)
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> inview_dom::Result<()> {
        self.doc.remove_class(element, class)
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.doc.prefers_reduced_motion()
    }

    fn create_observer(&mut self, threshold: f64) -> ObserverId {
        self.doc.create_observer(threshold)
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) -> inview_dom::Result<()> {
        self.doc.observe(observer, element)
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        self.doc.unobserve(observer, element)
    }

    fn disconnect(&mut self, observer: ObserverId) {
        self.doc.disconnect(observer)
    }
}

#[test]
fn test_failed_init_releases_observers_before_retry() {
    let mut doc = Document::new();
    let root = doc.root();
    let list = doc.create_element("ul");
    doc.append_child(root, list).unwrap();
    doc.set_attribute(list, "data-animate-stagger", "100").unwrap();
    let child = doc.create_element("li");
    doc.append_child(list, child).unwrap();
    doc.set_attribute(child, "data-animate", "fade").unwrap();
    let solo = doc.create_element("div");
    doc.append_child(root, solo).unwrap();
    doc.set_attribute(solo, "data-animate", "zoom").unwrap();

    let mut host = FailingMarkerHost {
        doc,
        marker_failures: 1,
    };
    let mut controller = AnimationController::default();

    assert!(controller.init(&mut host).is_err());
    assert!(controller.pool().is_empty());
    assert_eq!(host.doc.observer_count(), 0);
    assert!(!host.doc.is_observed(list));
    for el in [child, solo] {
        assert!(host.doc.style_properties(el).is_empty());
    }

    let outcome = controller.init(&mut host).unwrap();
    assert_eq!(outcome, InitOutcome::Initialized { groups: 1, elements: 1 });
    assert_eq!(controller.pool().group_count(), 1);
    assert_eq!(host.doc.observer_count(), 2);
    assert_eq!(host.doc.style_property(child, DELAY).as_deref(), Some("0ms"));
}
