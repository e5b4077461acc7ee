use std::rc::Rc;
use vitae_domain::config::SiteConfig;
use vitae_platform::memory::MemoryPlatform;
use vitae_platform::Platform;
use vitae_reveal::{Reveal, init};

#[test]
fn marked_elements_are_watched_with_configured_options() {
    let dom = MemoryPlatform::new();
    let body = dom.body_node();
    let marked: Vec<_> = ["reveal-fade", "reveal-left", "reveal-right", "reveal-scale"]
        .into_iter()
        .map(|class| dom.append(body, "div", &[("class", class)]))
        .collect();
    let plain = dom.append(body, "div", &[("class", "card")]);

    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("reveal init");
    let reveal = record.state::<Reveal>().expect("reveal state");

    assert_eq!(reveal.elements(), marked.as_slice());
    for node in &marked {
        let options = dom.observed_by(*node);
        assert_eq!(options.len(), 1);
        assert!((options[0].threshold - 0.15).abs() < f64::EPSILON);
        assert_eq!(options[0].root_margin, "0px");
    }
    assert!(dom.observed_by(plain).is_empty());
}

#[test]
fn intersecting_elements_become_active_and_stay_active() {
    let dom = MemoryPlatform::new();
    let card = dom.append(dom.body_node(), "div", &[("class", "reveal-fade")]);
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("reveal init");

    dom.set_intersecting(card, false);
    assert!(!dom.has_class(card, "active"));

    dom.set_intersecting(card, true);
    assert!(dom.has_class(card, "active"));

    dom.set_intersecting(card, false);
    assert!(dom.has_class(card, "active"), "reveal is monotonic");
    assert_eq!(dom.observed_by(card).len(), 1, "revealed elements stay observed");
    assert_eq!(record.state::<Reveal>().map(|r| r.revealed()), Some(vec![card]));
}

#[test]
fn destroy_stops_further_activations() {
    let dom = MemoryPlatform::new();
    let body = dom.body_node();
    let first = dom.append(body, "div", &[("class", "reveal-left")]);
    let second = dom.append(body, "div", &[("class", "reveal-right")]);
    let platform: Rc<dyn Platform> = dom.clone();
    let mut record = init(&platform, &SiteConfig::default()).expect("reveal init");

    dom.set_intersecting(first, true);
    assert!(record.teardown());
    assert_eq!(dom.active_observers(), 0);

    dom.set_intersecting(second, true);
    assert!(!dom.has_class(second, "active"));
    assert!(dom.has_class(first, "active"));

    let reveal = record.state::<Reveal>().expect("reveal state");
    reveal.destroy(&*dom);
}

#[test]
fn page_without_marked_elements_is_inert() {
    let dom = MemoryPlatform::new();
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("reveal init");

    assert!(!record.has_teardown());
    assert_eq!(dom.active_observers(), 0);
}
