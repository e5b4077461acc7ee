use std::rc::Rc;
use vitae_domain::config::SiteConfig;
use vitae_lazy_images::{LazyImages, init};
use vitae_platform::memory::MemoryPlatform;
use vitae_platform::{NodeRef, Platform};

fn gallery(native: bool) -> (Rc<MemoryPlatform>, NodeRef, NodeRef, NodeRef) {
    let dom = MemoryPlatform::new();
    dom.set_native_lazy_loading(native);
    let body = dom.body_node();
    let deferred = dom.append(
        body,
        "img",
        &[("loading", "lazy"), ("src", "placeholder.svg"), ("data-src", "portrait.jpg")],
    );
    let plain = dom.append(body, "img", &[("loading", "lazy"), ("src", "logo.png")]);
    let eager = dom.append(body, "img", &[("src", "banner.jpg"), ("data-src", "banner@2x.jpg")]);
    (dom, deferred, plain, eager)
}

#[test]
fn native_support_makes_the_loader_inert() {
    let (dom, deferred, _, _) = gallery(true);
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("lazy images init");

    assert!(!record.has_teardown());
    assert_eq!(dom.active_observers(), 0);
    dom.set_intersecting(deferred, true);
    assert_eq!(dom.attribute(deferred, "src").as_deref(), Some("placeholder.svg"));
}

#[test]
fn visible_images_get_their_deferred_source_once() {
    let (dom, deferred, plain, eager) = gallery(false);
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("lazy images init");
    let state = record.state::<LazyImages>().expect("lazy images state");

    assert_eq!(state.images(), &[deferred, plain]);
    assert!(dom.observed_by(eager).is_empty());

    dom.set_intersecting(deferred, false);
    assert_eq!(dom.attribute(deferred, "src").as_deref(), Some("placeholder.svg"));

    dom.set_intersecting(deferred, true);
    assert_eq!(dom.attribute(deferred, "src").as_deref(), Some("portrait.jpg"));
    assert!(dom.observed_by(deferred).is_empty(), "loaded images are no longer watched");

    dom.set_intersecting(plain, true);
    assert_eq!(dom.attribute(plain, "src").as_deref(), Some("logo.png"));
    assert_eq!(state.loaded(), vec![deferred, plain]);
}

#[test]
fn teardown_disconnects_the_watcher() {
    let (dom, deferred, _, _) = gallery(false);
    let platform: Rc<dyn Platform> = dom.clone();
    let mut record = init(&platform, &SiteConfig::default()).expect("lazy images init");

    assert_eq!(dom.active_observers(), 1);
    assert!(record.teardown());
    assert_eq!(dom.active_observers(), 0);

    dom.set_intersecting(deferred, true);
    assert_eq!(dom.attribute(deferred, "src").as_deref(), Some("placeholder.svg"));
}

#[test]
fn empty_deferred_source_keeps_the_current_one() {
    let dom = MemoryPlatform::new();
    dom.set_native_lazy_loading(false);
    let image = dom.append(
        dom.body_node(),
        "img",
        &[("loading", "lazy"), ("src", "real.jpg"), ("data-src", "")],
    );
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("lazy images init");
    let state = record.state::<LazyImages>().expect("lazy images state");

    dom.set_intersecting(image, true);
    assert_eq!(dom.attribute(image, "src").as_deref(), Some("real.jpg"));
    assert_eq!(state.loaded(), vec![image]);
}
