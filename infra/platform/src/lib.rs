//! # Platform
//!
//! The host adapter every site controller talks to. Controllers never touch the
//! DOM directly: they look elements up, flip classes, listen for events and
//! schedule timers through the [`Platform`] trait.
//!
//! Two implementations ship with the crate:
//!
//! * [`memory::MemoryPlatform`] - a headless document with a virtual clock, used by tests.
//! * `web::WebPlatform` - the browser implementation over `web-sys` (only on `wasm32`).
//!
//! Execution is single-threaded and cooperative. Callbacks receive the platform
//! by reference so they never need to own it, which keeps handler closures free
//! of reference cycles.
//!
//! ## Example
//!
//! ```rust
//! use vitae_platform::memory::MemoryPlatform;
//! use vitae_platform::Platform;
//!
//! let dom = MemoryPlatform::new();
//! let navbar = dom.append(dom.root(), "nav", &[("id", "navbar")]);
//!
//! assert_eq!(dom.element_by_id("navbar"), Some(navbar));
//! dom.add_class(navbar, "scrolled").unwrap();
//! assert!(dom.has_class(navbar, "scrolled"));
//! ```

mod error;
pub mod memory;
mod types;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use crate::error::{PlatformError, PlatformErrorExt};
pub use crate::types::{
    Event, EventHandler, EventKind, EventTarget, IntersectionCallback, IntersectionEntry,
    IntersectionOptions, ListenerId, NavigationTiming, NodeRef, ObserverId, ReadyState,
    ScrollBehavior, TimerCallback, TimerId, whole_millis,
};

use std::fmt::Debug;
use std::time::Duration;

/// Host capabilities consumed by the site controllers.
pub trait Platform: Debug {
    // --- Lookup ---

    fn element_by_id(&self, id: &str) -> Option<NodeRef>;

    /// First element matching a CSS selector. Invalid selectors match nothing.
    fn query(&self, selector: &str) -> Option<NodeRef>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeRef>;

    fn body(&self) -> Option<NodeRef>;

    // --- Classes, attributes, text and inline style ---

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or the host rejects the class.
    fn add_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or the host rejects the class.
    fn remove_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError>;

    /// Flips a class and returns whether it is now present.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or the host rejects the class.
    fn toggle_class(&self, node: NodeRef, class: &str) -> Result<bool, PlatformError>;

    fn has_class(&self, node: NodeRef, class: &str) -> bool;

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or the attribute name is invalid.
    fn set_attribute(&self, node: NodeRef, name: &str, value: &str) -> Result<(), PlatformError>;

    fn text_content(&self, node: NodeRef) -> Option<String>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown.
    fn set_text_content(&self, node: NodeRef, text: &str) -> Result<(), PlatformError>;

    /// Inline style value, `None` when unset.
    fn style(&self, node: NodeRef, property: &str) -> Option<String>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or not styleable.
    fn set_style(&self, node: NodeRef, property: &str, value: &str) -> Result<(), PlatformError>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown or not styleable.
    fn remove_style(&self, node: NodeRef, property: &str) -> Result<(), PlatformError>;

    // --- Tree ---

    /// Inclusive descendant check: a node contains itself.
    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool;

    /// Creates a detached element.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the tag name is invalid.
    fn create_element(&self, tag: &str) -> Result<NodeRef, PlatformError>;

    /// Inserts `child` before the first child of `parent`, detaching it from any previous parent.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if either node is unknown or the insertion is rejected.
    fn prepend_child(&self, parent: NodeRef, child: NodeRef) -> Result<(), PlatformError>;

    /// Detaches a node from the document. Removing a detached node is a no-op.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the node is unknown.
    fn remove(&self, node: NodeRef) -> Result<(), PlatformError>;

    // --- Geometry and scrolling ---

    fn offset_top(&self, node: NodeRef) -> f64;

    fn offset_height(&self, node: NodeRef) -> f64;

    fn scroll_y(&self) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    // --- Forms ---

    /// Named control values in document order. Names may repeat.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the node is not a form.
    fn form_entries(&self, form: NodeRef) -> Result<Vec<(String, String)>, PlatformError>;

    /// # Errors
    /// Returns [`PlatformError`] if the node is not a form.
    fn reset_form(&self, form: NodeRef) -> Result<(), PlatformError>;

    // --- Events ---

    /// Registers a handler. Handlers for the same target and kind run in registration order.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the target is unknown or the host rejects the listener.
    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<ListenerId, PlatformError>;

    /// Unregisters a handler. Must not be called from inside the handler being removed.
    fn unlisten(&self, id: ListenerId);

    // --- Timers ---

    /// Runs `callback` once after `delay`.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the host refuses to schedule the timer.
    fn set_timeout(&self, delay: Duration, callback: TimerCallback)
    -> Result<TimerId, PlatformError>;

    /// Cancels a pending timer. Unknown or fired timers are ignored.
    fn clear_timeout(&self, id: TimerId);

    // --- Viewport intersection ---

    /// Watches `targets` and reports visibility changes to `callback`.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if a target is unknown or the host lacks intersection support.
    fn observe_intersections(
        &self,
        targets: &[NodeRef],
        options: &IntersectionOptions,
        callback: IntersectionCallback,
    ) -> Result<ObserverId, PlatformError>;

    /// Stops watching a single target.
    fn unobserve(&self, observer: ObserverId, target: NodeRef);

    /// Stops watching every target and releases the watcher.
    fn disconnect(&self, observer: ObserverId);

    // --- Host ---

    fn ready_state(&self) -> ReadyState;

    fn hostname(&self) -> String;

    /// Whether images honour `loading="lazy"` natively.
    fn supports_native_lazy_loading(&self) -> bool;

    fn navigation_timing(&self) -> Option<NavigationTiming>;
}
