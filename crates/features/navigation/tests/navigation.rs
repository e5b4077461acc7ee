use std::rc::Rc;
use std::time::Duration;
use vitae_domain::config::SiteConfig;
use vitae_navigation::{Navigation, init};
use vitae_platform::memory::MemoryPlatform;
use vitae_platform::{NodeRef, Platform, ScrollBehavior};

struct Page {
    dom: Rc<MemoryPlatform>,
    navbar: NodeRef,
    toggle: NodeRef,
    menu: NodeRef,
    about_link: NodeRef,
    missing_link: NodeRef,
    outside: NodeRef,
}

fn page() -> Page {
    let dom = MemoryPlatform::new();
    let body = dom.body_node();
    let navbar = dom.append(body, "nav", &[("id", "navbar")]);
    let toggle = dom.append(navbar, "button", &[("id", "navToggle")]);
    let menu = dom.append(navbar, "ul", &[("id", "navMenu")]);
    let about_link = dom.append(menu, "a", &[("class", "nav-link"), ("href", "#about")]);
    let missing_link = dom.append(menu, "a", &[("class", "nav-link"), ("href", "#gone")]);
    let about = dom.append(body, "section", &[("id", "about")]);
    let outside = dom.append(body, "p", &[]);
    dom.set_geometry(navbar, 0.0, 70.0);
    dom.set_geometry(about, 900.0, 400.0);
    Page { dom, navbar, toggle, menu, about_link, missing_link, outside }
}

fn start(page: &Page) -> vitae_domain::registry::ModuleRecord {
    let platform: Rc<dyn Platform> = page.dom.clone();
    init(&platform, &SiteConfig::default()).expect("navigation init")
}

#[test]
fn scrolled_class_requires_exceeding_offset() {
    let page = page();
    let record = start(&page);
    let nav = record.state::<Navigation>().expect("navigation state");

    page.dom.user_scroll(50.0);
    assert!(!page.dom.has_class(page.navbar, "scrolled"), "exactly 50px is not scrolled");

    page.dom.advance(Duration::from_millis(100));
    page.dom.user_scroll(51.0);
    assert!(page.dom.has_class(page.navbar, "scrolled"));
    assert!(nav.is_scrolled());

    page.dom.advance(Duration::from_millis(100));
    page.dom.user_scroll(0.0);
    assert!(!page.dom.has_class(page.navbar, "scrolled"));
}

#[test]
fn scroll_updates_are_throttled() {
    let page = page();
    let _record = start(&page);

    page.dom.user_scroll(10.0);
    page.dom.user_scroll(300.0);
    assert!(
        !page.dom.has_class(page.navbar, "scrolled"),
        "second event inside the window is dropped"
    );

    page.dom.advance(Duration::from_millis(100));
    page.dom.user_scroll(300.0);
    assert!(page.dom.has_class(page.navbar, "scrolled"));
}

#[test]
fn toggle_suspends_body_scrolling_and_outside_click_restores_it() {
    let page = page();
    let record = start(&page);
    let nav = record.state::<Navigation>().expect("navigation state");
    let body = page.dom.body_node();

    page.dom.click(page.toggle);
    assert!(nav.is_menu_open());
    assert!(page.dom.has_class(page.menu, "active"));
    assert!(page.dom.has_class(page.toggle, "active"));
    assert_eq!(page.dom.style(body, "overflow").as_deref(), Some("hidden"));

    page.dom.click(page.menu);
    assert!(nav.is_menu_open(), "clicks inside the menu keep it open");

    page.dom.click(page.outside);
    assert!(!nav.is_menu_open());
    assert!(!page.dom.has_class(page.menu, "active"));
    assert!(!page.dom.has_class(page.toggle, "active"));
    assert_eq!(page.dom.style(body, "overflow"), None);
}

#[test]
fn toggling_twice_closes_the_menu() {
    let page = page();
    let _record = start(&page);

    page.dom.click(page.toggle);
    page.dom.click(page.toggle);
    assert!(!page.dom.has_class(page.menu, "active"));
    assert_eq!(page.dom.style(page.dom.body_node(), "overflow"), None);
}

#[test]
fn link_click_closes_menu_and_scrolls_below_the_bar() {
    let page = page();
    let _record = start(&page);

    page.dom.click(page.toggle);
    let event = page.dom.click(page.about_link);

    assert!(event.default_prevented());
    assert!(!page.dom.has_class(page.menu, "active"));
    assert_eq!(page.dom.style(page.dom.body_node(), "overflow"), None);
    assert_eq!(page.dom.scroll_requests(), vec![(830.0, ScrollBehavior::Smooth)]);
}

#[test]
fn link_without_target_is_a_no_op() {
    let page = page();
    let _record = start(&page);

    let event = page.dom.click(page.missing_link);
    assert!(event.default_prevented());
    assert!(page.dom.scroll_requests().is_empty());
}

#[test]
fn teardown_releases_every_listener() {
    let page = page();
    let baseline = page.dom.listener_count();
    let mut record = start(&page);

    // scroll, toggle, document click and one per link
    assert_eq!(page.dom.listener_count(), baseline + 5);
    assert!(record.teardown());
    assert_eq!(page.dom.listener_count(), baseline);

    page.dom.click(page.toggle);
    assert!(!page.dom.has_class(page.menu, "active"));
}

#[test]
fn page_without_navigation_is_inert() {
    let dom = MemoryPlatform::new();
    let platform: Rc<dyn Platform> = dom.clone();
    let record = init(&platform, &SiteConfig::default()).expect("navigation init");

    assert!(!record.has_teardown());
    assert_eq!(dom.listener_count(), 0);
    dom.user_scroll(400.0);
}
