//! Navigation feature slice.
//!
//! Owns the navigation bar: the `scrolled` look once the page leaves the top, the
//! mobile menu (`active` on menu and toggle, body scrolling suspended while open)
//! and smooth in-page scrolling for `.nav-link` anchors.
//!
//! Every element is optional. A missing bar disables the scrolled state, a missing
//! menu or toggle disables the mobile menu; links still scroll smoothly.

mod error;

pub use crate::error::{NavigationError, NavigationErrorExt};

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use vitae_domain::config::{NavigationConfig, SiteConfig};
use vitae_domain::constants::{
    ACTIVE_CLASS, HREF_ATTRIBUTE, NAV_LINK_SELECTOR, NAV_MENU_ID, NAV_TOGGLE_ID, NAVBAR_ID,
    NAVIGATION, SCROLLED_CLASS,
};
use vitae_domain::registry::ModuleRecord;
use vitae_kernel::limiter::throttle;
use vitae_platform::{
    Event, EventKind, EventTarget, ListenerId, NodeRef, Platform, PlatformError, ScrollBehavior,
};

const OVERFLOW: &str = "overflow";

/// Navigation bar state.
#[derive(Debug)]
pub struct Navigation {
    navbar: Option<NodeRef>,
    toggle: Option<NodeRef>,
    menu: Option<NodeRef>,
    links: Vec<NodeRef>,
    config: NavigationConfig,
    scrolled: Cell<bool>,
    menu_open: Cell<bool>,
    listeners: RefCell<Vec<ListenerId>>,
}

/// Initialize the navigation slice and register its listeners.
///
/// # Errors
/// Returns [`NavigationError::Platform`] if a listener cannot be registered. Listeners
/// registered before the failure are released.
pub fn init(
    platform: &Rc<dyn Platform>,
    config: &SiteConfig,
) -> Result<ModuleRecord, NavigationError> {
    let navigation = Rc::new(Navigation::new(&**platform, &config.navigation));

    if let Err(e) = navigation.attach(&**platform) {
        navigation.destroy(&**platform);
        return Err(e);
    }

    debug!(
        navbar = navigation.navbar.is_some(),
        menu = navigation.menu.is_some(),
        links = navigation.links.len(),
        "Navigation slice initialized"
    );

    let record = ModuleRecord::new(NAVIGATION, Rc::clone(&navigation));
    if navigation.listeners.borrow().is_empty() {
        return Ok(record);
    }

    let platform = Rc::clone(platform);
    Ok(record.with_teardown(move || navigation.destroy(&*platform)))
}

impl Navigation {
    /// Looks the navigation elements up. Nothing is registered yet.
    #[must_use]
    pub fn new(platform: &dyn Platform, config: &NavigationConfig) -> Self {
        Self {
            navbar: platform.element_by_id(NAVBAR_ID),
            toggle: platform.element_by_id(NAV_TOGGLE_ID),
            menu: platform.element_by_id(NAV_MENU_ID),
            links: platform.query_all(NAV_LINK_SELECTOR),
            config: config.clone(),
            scrolled: Cell::new(false),
            menu_open: Cell::new(false),
            listeners: RefCell::default(),
        }
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    #[must_use]
    pub fn links(&self) -> &[NodeRef] {
        &self.links
    }

    /// Re-derives the scrolled state from the current scroll offset.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the bar's class cannot be updated.
    pub fn handle_scroll(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        let Some(navbar) = self.navbar else { return Ok(()) };

        let scrolled = platform.scroll_y() > self.config.scrolled_offset;
        if scrolled {
            platform.add_class(navbar, SCROLLED_CLASS)?;
        } else {
            platform.remove_class(navbar, SCROLLED_CLASS)?;
        }

        if self.scrolled.replace(scrolled) != scrolled {
            debug!(scrolled, "Navigation bar state changed");
        }
        Ok(())
    }

    /// Opens a closed menu and closes an open one.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the menu, toggle or body cannot be updated.
    pub fn toggle_menu(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        let (Some(menu), Some(toggle)) = (self.menu, self.toggle) else { return Ok(()) };

        let open = platform.toggle_class(menu, ACTIVE_CLASS)?;
        if open {
            platform.add_class(toggle, ACTIVE_CLASS)?;
        } else {
            platform.remove_class(toggle, ACTIVE_CLASS)?;
        }
        lock_body_scroll(platform, open)?;

        self.menu_open.set(open);
        debug!(open, "Navigation menu toggled");
        Ok(())
    }

    /// Closes the menu and resumes body scrolling.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the menu, toggle or body cannot be updated.
    pub fn close_menu(&self, platform: &dyn Platform) -> Result<(), PlatformError> {
        for node in [self.menu, self.toggle].into_iter().flatten() {
            platform.remove_class(node, ACTIVE_CLASS)?;
        }
        lock_body_scroll(platform, false)?;

        if self.menu_open.replace(false) {
            debug!("Navigation menu closed");
        }
        Ok(())
    }

    /// Smoothly scrolls to the section `link` points at, leaving room for the bar.
    ///
    /// Returns `false` without scrolling if the link has no target on the page.
    pub fn scroll_to_target(&self, platform: &dyn Platform, link: NodeRef) -> bool {
        let Some(target) =
            platform.attribute(link, HREF_ATTRIBUTE).and_then(|href| platform.query(&href))
        else {
            return false;
        };

        let bar_height = self.navbar.map_or(0.0, |navbar| platform.offset_height(navbar));
        platform.scroll_to(platform.offset_top(target) - bar_height, ScrollBehavior::Smooth);
        true
    }

    /// Unregisters every listener. Safe to call more than once.
    pub fn destroy(&self, platform: &dyn Platform) {
        let listeners = self.listeners.take();
        if !listeners.is_empty() {
            debug!(count = listeners.len(), "Releasing navigation listeners");
        }
        for id in listeners {
            platform.unlisten(id);
        }
    }

    fn is_outside_menu(&self, platform: &dyn Platform, target: Option<NodeRef>) -> bool {
        target.is_none_or(|node| {
            [self.menu, self.toggle]
                .into_iter()
                .flatten()
                .all(|inside| !platform.contains(inside, node))
        })
    }

    fn attach(self: &Rc<Self>, platform: &dyn Platform) -> Result<(), NavigationError> {
        if self.navbar.is_some() {
            let this = Rc::clone(self);
            let on_scroll = throttle(self.config.throttle(), move |p: &dyn Platform, ()| {
                if let Err(e) = this.handle_scroll(p) {
                    warn!(error = %e, "Failed to update navigation bar");
                }
            });
            self.register(
                platform,
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |p: &dyn Platform, _: &Event| {
                    if let Err(e) = on_scroll.call(p, ()) {
                        warn!(error = %e, "Failed to throttle navigation scroll");
                    }
                }),
            )
            .context("scroll listener")?;
        }

        if let (Some(toggle), Some(_)) = (self.toggle, self.menu) {
            let this = Rc::clone(self);
            self.register(
                platform,
                EventTarget::Node(toggle),
                EventKind::Click,
                Box::new(move |p: &dyn Platform, _: &Event| {
                    if let Err(e) = this.toggle_menu(p) {
                        warn!(error = %e, "Failed to toggle navigation menu");
                    }
                }),
            )
            .context("toggle listener")?;

            let this = Rc::clone(self);
            self.register(
                platform,
                EventTarget::Document,
                EventKind::Click,
                Box::new(move |p: &dyn Platform, event: &Event| {
                    if this.is_outside_menu(p, event.target())
                        && let Err(e) = this.close_menu(p)
                    {
                        warn!(error = %e, "Failed to close navigation menu");
                    }
                }),
            )
            .context("outside click listener")?;
        }

        for &link in &self.links {
            let this = Rc::clone(self);
            self.register(
                platform,
                EventTarget::Node(link),
                EventKind::Click,
                Box::new(move |p: &dyn Platform, event: &Event| {
                    event.prevent_default();
                    if let Err(e) = this.close_menu(p) {
                        warn!(error = %e, "Failed to close navigation menu");
                    }
                    if !this.scroll_to_target(p, link) {
                        debug!(link = link.raw(), "Navigation link has no target");
                    }
                }),
            )
            .context("link listener")?;
        }

        Ok(())
    }

    fn register(
        &self,
        platform: &dyn Platform,
        target: EventTarget,
        kind: EventKind,
        handler: vitae_platform::EventHandler,
    ) -> Result<(), PlatformError> {
        let id = platform.listen(target, kind, handler)?;
        self.listeners.borrow_mut().push(id);
        Ok(())
    }
}

fn lock_body_scroll(platform: &dyn Platform, locked: bool) -> Result<(), PlatformError> {
    let Some(body) = platform.body() else { return Ok(()) };
    if locked {
        platform.set_style(body, OVERFLOW, "hidden")
    } else {
        platform.remove_style(body, OVERFLOW)
    }
}
