use std::rc::Rc;
use std::time::Duration;
use vitae::domain::config::SiteConfig;
use vitae::domain::modules::ModuleSet;
use vitae::features::{Contact, Navigation};
use vitae::platform::memory::MemoryPlatform;
use vitae::platform::{Platform, ReadyState};
use vitae::{App, AppState, start};

fn full_page(dom: &MemoryPlatform) {
    let body = dom.body_node();
    let navbar = dom.append(body, "nav", &[("id", "navbar")]);
    dom.append(navbar, "button", &[("id", "navToggle")]);
    let menu = dom.append(navbar, "ul", &[("id", "navMenu")]);
    dom.append(menu, "a", &[("class", "nav-link"), ("href", "#contact")]);
    dom.append(body, "section", &[("class", "reveal-fade")]);
    dom.append(body, "button", &[("id", "scrollTop")]);
    let section = dom.append(body, "section", &[("id", "contact")]);
    let form = dom.append(section, "form", &[("id", "contactForm")]);
    dom.append(form, "input", &[("name", "name")]);
    dom.append(body, "img", &[("loading", "lazy"), ("data-src", "me.jpg")]);
}

fn platform(dom: &Rc<MemoryPlatform>) -> Rc<dyn Platform> {
    dom.clone()
}

#[test]
fn modules_are_built_in_fixed_order_on_development_hosts() {
    let dom = MemoryPlatform::new();
    full_page(&dom);
    dom.set_hostname("localhost");

    let app = start(platform(&dom));

    assert_eq!(app.state(), AppState::Ready);
    assert_eq!(
        app.modules(),
        vec!["navigation", "reveal", "scroll-top", "contact", "lazy-images", "performance"]
    );
    assert!(app.module::<Navigation>().is_some());
    assert!(app.module::<Contact>().is_some());
}

#[test]
fn performance_reporter_is_skipped_on_public_hosts() {
    let dom = MemoryPlatform::new();
    full_page(&dom);
    dom.set_hostname("jane.example.com");

    let app = start(platform(&dom));

    assert_eq!(app.modules().last(), Some(&"lazy-images"));
    assert_eq!(app.modules().len(), 5);
}

#[test]
fn construction_waits_for_the_document_while_loading() {
    let dom = MemoryPlatform::with_ready_state(ReadyState::Loading);
    full_page(&dom);

    let app = start(platform(&dom));
    assert_eq!(app.state(), AppState::Pending);
    assert!(!app.is_initialized());
    assert!(app.modules().is_empty());

    dom.finish_parsing();
    assert!(app.is_initialized());
    assert_eq!(app.modules().first(), Some(&"navigation"));

    dom.finish_parsing();
    assert_eq!(app.modules().len(), 5, "a second ready signal builds nothing new");
}

#[test]
fn dropped_handle_still_builds_the_site_once_parsed() {
    let dom = MemoryPlatform::with_ready_state(ReadyState::Loading);
    full_page(&dom);

    drop(start(platform(&dom)));
    assert_eq!(dom.listener_count(), 1);

    dom.finish_parsing();
    let navbar = dom.element_by_id("navbar").unwrap();
    dom.user_scroll(400.0);
    assert!(dom.has_class(navbar, "scrolled"));

    let before = dom.listener_count();
    dom.advance(Duration::ZERO);
    assert_eq!(dom.listener_count(), before - 1, "the readiness listener is released");
    dom.user_scroll(0.0);
    dom.advance(Duration::from_millis(100));
    dom.user_scroll(10.0);
    assert!(!dom.has_class(navbar, "scrolled"));
}

#[test]
fn construction_failure_keeps_modules_built_before_it() {
    let dom = MemoryPlatform::new();
    full_page(&dom);
    dom.set_intersection_support(false);

    let app = start(platform(&dom));

    assert_eq!(app.state(), AppState::Failed);
    assert!(app.is_initialized());
    assert_eq!(app.modules(), vec!["navigation"]);

    let navbar = dom.element_by_id("navbar").unwrap();
    dom.user_scroll(120.0);
    assert!(dom.has_class(navbar, "scrolled"), "modules built before the failure keep working");
}

#[test]
fn destroy_releases_every_module_once() {
    let dom = MemoryPlatform::new();
    full_page(&dom);
    dom.set_native_lazy_loading(false);
    dom.set_hostname("127.0.0.1");

    let app = start(platform(&dom));
    assert!(dom.listener_count() > 0);
    assert_eq!(dom.active_observers(), 2);

    app.destroy();
    assert_eq!(app.state(), AppState::Destroyed);
    assert_eq!(dom.active_observers(), 0);
    assert_eq!(dom.listener_count(), 1, "only the one-shot load listener remains");

    app.destroy();
    assert_eq!(app.modules().len(), 6);
}

#[test]
fn destroy_before_ready_cancels_construction() {
    let dom = MemoryPlatform::with_ready_state(ReadyState::Loading);
    full_page(&dom);

    let app = start(platform(&dom));
    app.destroy();
    assert_eq!(dom.listener_count(), 0);

    dom.finish_parsing();
    assert!(app.modules().is_empty());
    assert_eq!(app.state(), AppState::Destroyed);
}

#[test]
fn module_set_disables_modules() {
    let dom = MemoryPlatform::new();
    full_page(&dom);
    dom.set_hostname("localhost");

    let mut config = SiteConfig::default();
    config.modules = ModuleSet::CONTACT | ModuleSet::PERFORMANCE;
    let app = App::new(platform(&dom)).with_config(config);
    app.launch().unwrap();

    assert_eq!(app.modules(), vec!["contact", "performance"]);
}

#[test]
fn page_configuration_is_read_at_construction() {
    let dom = MemoryPlatform::with_ready_state(ReadyState::Loading);
    full_page(&dom);
    let script = dom.append(dom.body_node(), "script", &[("id", "site-config")]);
    dom.set_text_content(script, r#"{ "modules": ["reveal"] }"#).unwrap();

    let app = start(platform(&dom));
    assert!(app.config().is_none());

    dom.finish_parsing();
    assert_eq!(app.modules(), vec!["reveal"]);
    assert_eq!(app.config().map(|c| c.modules), Some(ModuleSet::REVEAL));
}

#[test]
fn separate_apps_are_isolated() {
    let first = MemoryPlatform::new();
    let second = MemoryPlatform::new();
    full_page(&first);

    let a = start(platform(&first));
    let b = start(platform(&second));
    a.destroy();

    assert_eq!(a.state(), AppState::Destroyed);
    assert_eq!(b.state(), AppState::Ready);
}
