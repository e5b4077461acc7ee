use serial_test::serial;
use std::rc::Rc;
use vitae::AppState;
use vitae::platform::memory::MemoryPlatform;
use vitae::platform::{Platform, ReadyState};
use vitae_web::boot;

// The global subscriber can be installed once per process, so everything that boots
// lives in this single test.
#[test]
#[serial]
fn boot_installs_logging_once_and_launches_the_site() {
    let dom = MemoryPlatform::new();
    dom.append(dom.body_node(), "button", &[("id", "scrollTop")]);
    let script = dom.append(dom.body_node(), "script", &[("id", "site-config")]);
    dom.set_text_content(script, r#"{ "logging": { "level": "debug" } }"#).unwrap();

    let platform: Rc<dyn Platform> = dom.clone();
    let (logger, app) = boot(platform).expect("first boot");
    assert_eq!(logger.name(), "vitae-web");
    assert_eq!(logger.level(), vitae_logger::LevelFilter::DEBUG);
    assert_eq!(app.state(), AppState::Ready);
    assert!(app.modules().contains(&"scroll-top"));

    let loading = MemoryPlatform::with_ready_state(ReadyState::Loading);
    let platform: Rc<dyn Platform> = loading.clone();
    assert!(boot(platform).is_err(), "a second global logger is refused");

    app.destroy();
}
