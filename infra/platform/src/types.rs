use crate::Platform;
use std::cell::Cell;
use std::time::Duration;
use strum_macros::{AsRefStr, Display};

/// Opaque handle to an element owned by a [`Platform`].
///
/// Handles are cheap to copy and only meaningful for the platform that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);

impl NodeRef {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

macro_rules! handle_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

handle_id!(
    /// Registration handle returned by [`Platform::listen`].
    ListenerId
);
handle_id!(
    /// Pending timer handle returned by [`Platform::set_timeout`].
    TimerId
);
handle_id!(
    /// Viewport-intersection watcher handle returned by [`Platform::observe_intersections`].
    ObserverId
);

/// Host events the controllers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum EventKind {
    #[strum(serialize = "scroll")]
    Scroll,
    #[strum(serialize = "click")]
    Click,
    #[strum(serialize = "submit")]
    Submit,
    #[strum(serialize = "load")]
    Load,
    #[strum(serialize = "DOMContentLoaded")]
    DomContentLoaded,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeRef),
}

/// A dispatched event as seen by a handler.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    target: Option<NodeRef>,
    default_prevented: Cell<bool>,
}

impl Event {
    #[must_use]
    pub const fn new(kind: EventKind, target: Option<NodeRef>) -> Self {
        Self { kind, target, default_prevented: Cell::new(false) }
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The element the event originated from, if it was an element.
    #[must_use]
    pub const fn target(&self) -> Option<NodeRef> {
        self.target
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Scroll animation requested from [`Platform::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Document parsing progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

/// Viewport-intersection watcher settings. The root is always the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionOptions {
    /// Visible fraction of the target that counts as intersecting.
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for IntersectionOptions {
    fn default() -> Self {
        Self { threshold: 0.0, root_margin: "0px".to_owned() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: NodeRef,
    pub is_intersecting: bool,
}

/// Navigation timing marks, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationTiming {
    pub navigation_start: f64,
    pub request_start: f64,
    pub response_end: f64,
    pub dom_loading: f64,
    pub dom_complete: f64,
    pub load_event_end: f64,
}

pub type EventHandler = Box<dyn FnMut(&dyn Platform, &Event)>;
pub type TimerCallback = Box<dyn FnOnce(&dyn Platform)>;
pub type IntersectionCallback = Box<dyn FnMut(&dyn Platform, ObserverId, &[IntersectionEntry])>;

/// Converts a delay into whole milliseconds, saturating.
#[must_use]
pub fn whole_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
