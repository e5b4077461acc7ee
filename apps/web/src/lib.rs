//! Browser entry point for the site.
//!
//! Built as a `cdylib` for `wasm32-unknown-unknown`; the `start` export runs as soon as
//! the module is instantiated. [`boot`] holds the target-independent part so it can be
//! driven headlessly.

use std::rc::Rc;
use tracing::info;
use vitae::kernel::config::load_config_or_default;
use vitae::platform::{Platform, ReadyState};
use vitae::App;
use vitae_logger::Logger;

/// Installs logging and launches the site on `platform`.
///
/// The page configuration is read up front when the document is already parsed so the
/// logging section applies; otherwise logging starts with defaults and the site reads
/// the configuration once the document is ready.
///
/// # Errors
/// Fails if the global logger cannot be installed or the site cannot wait for the document.
pub fn boot(platform: Rc<dyn Platform>) -> anyhow::Result<(Logger, App)> {
    let config = (platform.ready_state() != ReadyState::Loading)
        .then(|| load_config_or_default(&*platform));
    let logging = config.as_ref().map(|c| c.logging.clone()).unwrap_or_default();

    let mut logger = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level_name(&logging.level)
        .console(true);
    if let Some(filter) = logging.filter {
        logger = logger.env_filter(filter);
    }
    let logger = logger.init()?;

    let mut app = App::new(platform);
    if let Some(config) = config {
        app = app.with_config(config);
    }
    app.launch()?;

    info!(state = ?app.state(), "Site booted");
    Ok((logger, app))
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static SITE: std::cell::RefCell<Option<(Logger, App)>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsValue;

    console_error_panic_hook::set_once();

    let platform: Rc<dyn Platform> = vitae::platform::web::WebPlatform::new()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let site = boot(platform).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

/// Tears the site down. Calling it again does nothing.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn destroy() {
    SITE.with(|slot| {
        if let Some((_, app)) = slot.borrow().as_ref() {
            app.destroy();
        }
    });
}
