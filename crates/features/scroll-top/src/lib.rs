//! Scroll-to-top feature slice: shows the `#scrollTop` button once the page is scrolled
//! far enough and smoothly returns to the top when it is clicked.

mod error;

pub use crate::error::ScrollTopError;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use vitae_domain::config::{ScrollTopConfig, SiteConfig};
use vitae_domain::constants::{SCROLL_TOP, SCROLL_TOP_ID, VISIBLE_CLASS};
use vitae_domain::registry::ModuleRecord;
use vitae_kernel::limiter::throttle;
use vitae_platform::{
    Event, EventKind, EventTarget, ListenerId, NodeRef, Platform, PlatformError, ScrollBehavior,
};

#[derive(Debug)]
pub struct ScrollTop {
    button: Option<NodeRef>,
    config: ScrollTopConfig,
    visible: Cell<bool>,
    listeners: RefCell<Vec<ListenerId>>,
}

/// Initialize the scroll-to-top slice. A page without the button gets an inert record.
///
/// # Errors
/// Returns [`ScrollTopError::Platform`] if a listener cannot be registered.
pub fn init(
    platform: &Rc<dyn Platform>,
    config: &SiteConfig,
) -> Result<ModuleRecord, ScrollTopError> {
    let scroll_top = Rc::new(ScrollTop::new(&**platform, &config.scroll_top));
    let record = ModuleRecord::new(SCROLL_TOP, Rc::clone(&scroll_top));

    let Some(button) = scroll_top.button else {
        debug!("No scroll-to-top button on the page");
        return Ok(record);
    };

    if let Err(e) = scroll_top.attach(&**platform, button) {
        scroll_top.destroy(&**platform);
        return Err(e);
    }

    let platform = Rc::clone(platform);
    Ok(record.with_teardown(move || scroll_top.destroy(&*platform)))
}

impl ScrollTop {
    #[must_use]
    pub fn new(platform: &dyn Platform, config: &ScrollTopConfig) -> Self {
        Self {
            button: platform.element_by_id(SCROLL_TOP_ID),
            config: config.clone(),
            visible: Cell::new(false),
            listeners: RefCell::default(),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Shows the button past the configured offset and hides it otherwise.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the button's class cannot be updated.
    pub fn toggle_visibility(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        let Some(button) = self.button else { return Ok(()) };

        let visible = platform.scroll_y() > self.config.visible_offset;
        if visible {
            platform.add_class(button, VISIBLE_CLASS)?;
        } else {
            platform.remove_class(button, VISIBLE_CLASS)?;
        }
        self.visible.set(visible);
        Ok(())
    }

    pub fn scroll_to_top(platform: &dyn Platform) {
        platform.scroll_to(0.0, ScrollBehavior::Smooth);
    }

    /// Unregisters both listeners. Safe to call more than once.
    pub fn destroy(&self, platform: &dyn Platform) {
        for id in self.listeners.take() {
            platform.unlisten(id);
        }
    }

    fn attach(
        self: &Rc<Self>,
        platform: &dyn Platform,
        button: NodeRef,
    ) -> Result<(), ScrollTopError> {
        let this = Rc::clone(self);
        let on_scroll = throttle(self.config.throttle(), move |p: &dyn Platform, ()| {
            if let Err(e) = this.toggle_visibility(p) {
                warn!(error = %e, "Failed to update scroll-to-top button");
            }
        });
        let id = platform.listen(
            EventTarget::Window,
            EventKind::Scroll,
            Box::new(move |p: &dyn Platform, _: &Event| {
                if let Err(e) = on_scroll.call(p, ()) {
                    warn!(error = %e, "Failed to throttle scroll-to-top update");
                }
            }),
        )?;
        self.listeners.borrow_mut().push(id);

        let id = platform.listen(
            EventTarget::Node(button),
            EventKind::Click,
            Box::new(|p: &dyn Platform, _: &Event| Self::scroll_to_top(p)),
        )?;
        self.listeners.borrow_mut().push(id);

        debug!(offset = self.config.visible_offset, "Scroll-to-top slice initialized");
        Ok(())
    }
}
