//! Facade crate for the site.
//! Re-exports the shared crates and the feature slices, and owns the application bootstrap.
//! Keep this crate thin: it composes the slices, it does not implement page behaviour.
//!
//! ## Usage
//! ```rust
//! use std::rc::Rc;
//! use vitae::platform::memory::MemoryPlatform;
//! use vitae::platform::Platform;
//!
//! let dom = MemoryPlatform::new();
//! dom.append(dom.body_node(), "nav", &[("id", "navbar")]);
//!
//! let platform: Rc<dyn Platform> = dom.clone();
//! let app = vitae::start(platform);
//! assert!(app.is_initialized());
//! assert_eq!(app.modules()[0], "navigation");
//! app.destroy();
//! ```

mod app;

pub use crate::app::{App, AppState, start};
pub use vitae_domain as domain;
pub use vitae_kernel as kernel;
pub use vitae_platform as platform;

use std::error::Error;
use std::rc::Rc;
use vitae_domain::config::SiteConfig;
use vitae_domain::modules::ModuleSet;
use vitae_domain::registry::ModuleRecord;
use vitae_platform::Platform;

/// The site controllers, reusable outside the bootstrap.
pub mod features {
    pub use vitae_contact as contact;
    pub use vitae_lazy_images as lazy_images;
    pub use vitae_navigation as navigation;
    pub use vitae_performance as performance;
    pub use vitae_reveal as reveal;
    pub use vitae_scroll_top as scroll_top;

    pub use vitae_contact::Contact;
    pub use vitae_navigation::Navigation;
    pub use vitae_reveal::Reveal;
    pub use vitae_scroll_top::ScrollTop;
}

/// Construct every enabled module, in order, appending each record to `modules` as soon as
/// it exists.
///
/// The performance reporter additionally requires a development host name.
///
/// # Errors
/// Returns the first construction error. Records built before it stay in `modules`.
pub fn init(
    platform: &Rc<dyn Platform>,
    config: &SiteConfig,
    modules: &mut Vec<ModuleRecord>,
) -> Result<(), Box<dyn Error>> {
    let enabled = config.modules;

    // Navigation
    if enabled.contains(ModuleSet::NAVIGATION) {
        modules.push(features::navigation::init(platform, config)?);
    }

    // Scroll reveal
    if enabled.contains(ModuleSet::REVEAL) {
        modules.push(features::reveal::init(platform, config)?);
    }

    // Scroll to top
    if enabled.contains(ModuleSet::SCROLL_TOP) {
        modules.push(features::scroll_top::init(platform, config)?);
    }

    // Contact form
    if enabled.contains(ModuleSet::CONTACT) {
        modules.push(features::contact::init(platform, config)?);
    }

    // Lazy images
    if enabled.contains(ModuleSet::LAZY_IMAGES) {
        modules.push(features::lazy_images::init(platform, config)?);
    }

    // Performance (development hosts only)
    if enabled.contains(ModuleSet::PERFORMANCE)
        && config.performance.is_development_host(&platform.hostname())
    {
        modules.push(features::performance::init(platform, config)?);
    }

    Ok(())
}
