//! Headless [`Platform`] with an in-memory document and a virtual clock.
//!
//! Nothing happens on its own: tests drive the page by clicking, scrolling,
//! submitting, toggling viewport intersection and advancing time.

mod selector;

use crate::error::PlatformError;
use crate::{
    Event, EventHandler, EventKind, EventTarget, IntersectionCallback, IntersectionEntry,
    IntersectionOptions, ListenerId, NavigationTiming, NodeRef, ObserverId, Platform, ReadyState,
    ScrollBehavior, TimerCallback, TimerId,
};
use fxhash::FxHashMap;
use selector::Subject;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;

const ROOT: NodeRef = NodeRef::new(0);
const BODY: NodeRef = NodeRef::new(1);
const FORM_CONTROLS: [&str; 3] = ["input", "select", "textarea"];

#[derive(Debug, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
    text: String,
    parent: Option<NodeRef>,
    children: Vec<NodeRef>,
    offset_top: f64,
    offset_height: f64,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self { tag: tag.to_ascii_lowercase(), ..Self::default() }
    }
}

impl Subject for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

struct Listener {
    target: EventTarget,
    kind: EventKind,
    handler: Option<EventHandler>,
}

struct Observer {
    targets: Vec<NodeRef>,
    options: IntersectionOptions,
    callback: Option<IntersectionCallback>,
}

/// In-memory document. Node `0` is the `html` element and node `1` its `body`.
pub struct MemoryPlatform {
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<BTreeMap<u64, Listener>>,
    timers: RefCell<BTreeMap<(Duration, u64), TimerCallback>>,
    observers: RefCell<BTreeMap<u64, Observer>>,
    next_id: Cell<u64>,
    now: Cell<Duration>,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<(f64, ScrollBehavior)>>,
    ready_state: Cell<ReadyState>,
    hostname: RefCell<String>,
    native_lazy_loading: Cell<bool>,
    intersection_support: Cell<bool>,
    timing: Cell<Option<NavigationTiming>>,
}

impl fmt::Debug for MemoryPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPlatform")
            .field("nodes", &self.nodes.borrow().len())
            .field("listeners", &self.listeners.borrow().len())
            .field("timers", &self.timers.borrow().len())
            .field("observers", &self.observers.borrow().len())
            .field("now", &self.now.get())
            .field("scroll_y", &self.scroll_y.get())
            .field("ready_state", &self.ready_state.get())
            .finish_non_exhaustive()
    }
}

impl MemoryPlatform {
    /// A parsed (`interactive`) document containing only `html` and `body`.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Self::with_ready_state(ReadyState::Interactive)
    }

    #[must_use]
    pub fn with_ready_state(ready_state: ReadyState) -> Rc<Self> {
        let mut html = Node::new("html");
        html.children.push(BODY);
        let mut body = Node::new("body");
        body.parent = Some(ROOT);

        Rc::new(Self {
            nodes: RefCell::new(vec![html, body]),
            listeners: RefCell::default(),
            timers: RefCell::default(),
            observers: RefCell::default(),
            next_id: Cell::new(1),
            now: Cell::new(Duration::ZERO),
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::default(),
            ready_state: Cell::new(ready_state),
            hostname: RefCell::new("example.com".to_owned()),
            native_lazy_loading: Cell::new(true),
            intersection_support: Cell::new(true),
            timing: Cell::new(None),
        })
    }

    // --- Document construction ---

    #[must_use]
    pub const fn root(&self) -> NodeRef {
        ROOT
    }

    #[must_use]
    pub const fn body_node(&self) -> NodeRef {
        BODY
    }

    /// Appends a new element under `parent`. `class` is split on whitespace.
    ///
    /// # Panics
    /// Panics if `parent` was not issued by this platform.
    pub fn append(&self, parent: NodeRef, tag: &str, attributes: &[(&str, &str)]) -> NodeRef {
        let mut node = Node::new(tag);
        node.parent = Some(parent);
        for (name, value) in attributes {
            apply_attribute(&mut node, name, value);
        }

        let mut nodes = self.nodes.borrow_mut();
        let handle = NodeRef::new(u32::try_from(nodes.len()).expect("node arena overflow"));
        nodes.push(node);
        nodes[parent.index()].children.push(handle);
        handle
    }

    pub fn set_geometry(&self, node: NodeRef, offset_top: f64, offset_height: f64) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.index()) {
            n.offset_top = offset_top;
            n.offset_height = offset_height;
        }
    }

    /// Sets the current value of a form control.
    pub fn set_value(&self, control: NodeRef, value: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(control.index()) {
            n.attributes.insert("value".to_owned(), value.to_owned());
        }
    }

    #[must_use]
    pub fn value(&self, control: NodeRef) -> Option<String> {
        self.attribute(control, "value")
    }

    pub fn set_hostname(&self, hostname: &str) {
        hostname.clone_into(&mut self.hostname.borrow_mut());
    }

    pub fn set_native_lazy_loading(&self, supported: bool) {
        self.native_lazy_loading.set(supported);
    }

    /// Simulates a host without viewport intersection watchers.
    pub fn set_intersection_support(&self, supported: bool) {
        self.intersection_support.set(supported);
    }

    pub fn set_navigation_timing(&self, timing: NavigationTiming) {
        self.timing.set(Some(timing));
    }

    // --- Simulation ---

    /// Clicks an element; the event bubbles through its ancestors, the document and the window.
    pub fn click(&self, node: NodeRef) -> Event {
        self.dispatch(EventKind::Click, EventTarget::Node(node))
    }

    pub fn submit(&self, form: NodeRef) -> Event {
        self.dispatch(EventKind::Submit, EventTarget::Node(form))
    }

    /// Moves the viewport as a user would and fires `scroll` on the window.
    pub fn user_scroll(&self, y: f64) {
        self.scroll_y.set(y.max(0.0));
        self.dispatch(EventKind::Scroll, EventTarget::Window);
    }

    /// Marks the document interactive and fires `DOMContentLoaded`.
    pub fn finish_parsing(&self) {
        self.ready_state.set(ReadyState::Interactive);
        self.dispatch(EventKind::DomContentLoaded, EventTarget::Document);
    }

    /// Marks the document complete and fires `load` on the window.
    pub fn finish_loading(&self) {
        self.ready_state.set(ReadyState::Complete);
        self.dispatch(EventKind::Load, EventTarget::Window);
    }

    /// Reports a visibility change of `node` to every watcher observing it.
    pub fn set_intersecting(&self, node: NodeRef, is_intersecting: bool) {
        let ids: Vec<u64> = self
            .observers
            .borrow()
            .iter()
            .filter(|(_, observer)| observer.targets.contains(&node))
            .map(|(id, _)| *id)
            .collect();

        let entries = [IntersectionEntry { target: node, is_intersecting }];
        for id in ids {
            let callback =
                self.observers.borrow_mut().get_mut(&id).and_then(|o| o.callback.take());
            let Some(mut callback) = callback else { continue };
            callback(self, ObserverId::new(id), &entries);
            if let Some(observer) = self.observers.borrow_mut().get_mut(&id) {
                observer.callback = Some(callback);
            }
        }
    }

    /// Advances the virtual clock, firing due timers in deadline order.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers.first_key_value().is_some_and(|(&(at, _), _)| at <= deadline);
                if due { timers.pop_first() } else { None }
            };
            let Some(((at, id), callback)) = next else { break };
            self.now.set(at);
            trace!(timer = id, at = ?at, "Firing timer");
            callback(self);
        }
        self.now.set(deadline);
    }

    // --- Inspection ---

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn active_observers(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Options of every watcher currently observing `node`.
    #[must_use]
    pub fn observed_by(&self, node: NodeRef) -> Vec<IntersectionOptions> {
        self.observers
            .borrow()
            .values()
            .filter(|observer| observer.targets.contains(&node))
            .map(|observer| observer.options.clone())
            .collect()
    }

    /// Every programmatic scroll requested so far.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<(f64, ScrollBehavior)> {
        self.scroll_requests.borrow().clone()
    }

    #[must_use]
    pub fn children(&self, node: NodeRef) -> Vec<NodeRef> {
        self.nodes.borrow().get(node.index()).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Whether the node is attached to the document.
    #[must_use]
    pub fn is_connected(&self, node: NodeRef) -> bool {
        self.contains(ROOT, node)
    }

    // --- Internals ---

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn with_node<T>(
        &self,
        node: NodeRef,
        f: impl FnOnce(&mut Node) -> T,
    ) -> Result<T, PlatformError> {
        self.nodes
            .borrow_mut()
            .get_mut(node.index())
            .map(f)
            .ok_or_else(|| PlatformError::node_not_found(node))
    }

    fn form_node(&self, form: NodeRef) -> Result<(), PlatformError> {
        let is_form = self.with_node(form, |n| n.tag == "form")?;
        if is_form {
            Ok(())
        } else {
            Err(PlatformError::Unsupported {
                message: format!("node #{} is not a form", form.raw()).into(),
                context: None,
            })
        }
    }

    /// Attached nodes in document order.
    fn document_order(&self) -> Vec<NodeRef> {
        self.descendants(ROOT)
    }

    fn descendants(&self, from: NodeRef) -> Vec<NodeRef> {
        let nodes = self.nodes.borrow();
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(node) = nodes.get(current.index()) {
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    fn form_controls(&self, form: NodeRef) -> Vec<NodeRef> {
        let candidates = self.descendants(form);
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .filter(|handle| {
                nodes.get(handle.index()).is_some_and(|n| {
                    FORM_CONTROLS.contains(&n.tag.as_str())
                        && n.attributes.contains_key("name")
                        && !n.attributes.contains_key("disabled")
                })
            })
            .collect()
    }

    fn propagation_path(&self, origin: EventTarget) -> Vec<EventTarget> {
        let mut path = Vec::new();
        if let EventTarget::Node(node) = origin {
            let nodes = self.nodes.borrow();
            let mut current = Some(node);
            while let Some(handle) = current {
                path.push(EventTarget::Node(handle));
                current = nodes.get(handle.index()).and_then(|n| n.parent);
            }
        }
        if origin != EventTarget::Window {
            path.push(EventTarget::Document);
        }
        path.push(EventTarget::Window);
        path
    }

    fn dispatch(&self, kind: EventKind, origin: EventTarget) -> Event {
        let target = match origin {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window | EventTarget::Document => None,
        };
        let event = Event::new(kind, target);

        for current in self.propagation_path(origin) {
            let ids: Vec<u64> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(_, l)| l.target == current && l.kind == kind)
                .map(|(id, _)| *id)
                .collect();

            for id in ids {
                let handler =
                    self.listeners.borrow_mut().get_mut(&id).and_then(|l| l.handler.take());
                let Some(mut handler) = handler else { continue };
                handler(self, &event);
                if let Some(listener) = self.listeners.borrow_mut().get_mut(&id) {
                    listener.handler = Some(handler);
                }
            }
        }

        event
    }
}

fn apply_attribute(node: &mut Node, name: &str, value: &str) {
    if name == "class" {
        node.classes = value.split_whitespace().map(str::to_owned).collect();
    } else {
        node.attributes.insert(name.to_owned(), value.to_owned());
    }
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl Platform for MemoryPlatform {
    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        let order = self.document_order();
        let nodes = self.nodes.borrow();
        order.into_iter().find(|h| nodes[h.index()].attribute("id") == Some(id))
    }

    fn query(&self, selector: &str) -> Option<NodeRef> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        let Some(list) = selector::parse(selector) else {
            trace!(selector, "Unsupported selector");
            return Vec::new();
        };
        let order = self.document_order();
        let nodes = self.nodes.borrow();
        order
            .into_iter()
            .filter(|h| list.iter().any(|compound| compound.matches(&nodes[h.index()])))
            .collect()
    }

    fn body(&self) -> Option<NodeRef> {
        Some(BODY)
    }

    fn add_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| {
            if !n.has_class(class) {
                n.classes.push(class.to_owned());
            }
        })
    }

    fn remove_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| n.classes.retain(|c| c != class))
    }

    fn toggle_class(&self, node: NodeRef, class: &str) -> Result<bool, PlatformError> {
        self.with_node(node, |n| {
            if n.has_class(class) {
                n.classes.retain(|c| c != class);
                false
            } else {
                n.classes.push(class.to_owned());
                true
            }
        })
    }

    fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.nodes.borrow().get(node.index()).is_some_and(|n| Subject::has_class(n, class))
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let n = nodes.get(node.index())?;
        if name == "class" {
            return (!n.classes.is_empty()).then(|| n.classes.join(" "));
        }
        n.attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: NodeRef, name: &str, value: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| apply_attribute(n, name, value))
    }

    fn text_content(&self, node: NodeRef) -> Option<String> {
        self.nodes.borrow().get(node.index()).map(|n| n.text.clone())
    }

    fn set_text_content(&self, node: NodeRef, text: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| text.clone_into(&mut n.text))
    }

    fn style(&self, node: NodeRef, property: &str) -> Option<String> {
        self.nodes.borrow().get(node.index()).and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&self, node: NodeRef, property: &str, value: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| {
            if value.is_empty() {
                n.styles.remove(property);
            } else {
                n.styles.insert(property.to_owned(), value.to_owned());
            }
        })
    }

    fn remove_style(&self, node: NodeRef, property: &str) -> Result<(), PlatformError> {
        self.with_node(node, |n| {
            n.styles.remove(property);
        })
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = nodes.get(handle.index()).and_then(|n| n.parent);
        }
        false
    }

    fn create_element(&self, tag: &str) -> Result<NodeRef, PlatformError> {
        if !is_valid_tag(tag) {
            return Err(PlatformError::Host {
                message: format!("invalid tag name '{tag}'").into(),
                context: Some("create element".into()),
            });
        }
        let mut nodes = self.nodes.borrow_mut();
        let handle = u32::try_from(nodes.len()).map(NodeRef::new).map_err(|_| {
            PlatformError::Host { message: "node arena overflow".into(), context: None }
        })?;
        nodes.push(Node::new(tag));
        Ok(handle)
    }

    fn prepend_child(&self, parent: NodeRef, child: NodeRef) -> Result<(), PlatformError> {
        if self.contains(child, parent) {
            return Err(PlatformError::Host {
                message: "a node cannot be inserted into its own subtree".into(),
                context: Some("prepend child".into()),
            });
        }
        self.remove(child)?;
        self.with_node(parent, |p| p.children.insert(0, child))?;
        self.with_node(child, |c| c.parent = Some(parent))
    }

    fn remove(&self, node: NodeRef) -> Result<(), PlatformError> {
        let parent = self.with_node(node, |n| n.parent.take())?;
        if let Some(parent) = parent {
            self.with_node(parent, |p| p.children.retain(|c| *c != node))?;
        }
        Ok(())
    }

    fn offset_top(&self, node: NodeRef) -> f64 {
        self.nodes.borrow().get(node.index()).map_or(0.0, |n| n.offset_top)
    }

    fn offset_height(&self, node: NodeRef) -> f64 {
        self.nodes.borrow().get(node.index()).map_or(0.0, |n| n.offset_height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.borrow_mut().push((top, behavior));
        self.user_scroll(top);
    }

    fn form_entries(&self, form: NodeRef) -> Result<Vec<(String, String)>, PlatformError> {
        self.form_node(form)?;
        let controls = self.form_controls(form);
        let nodes = self.nodes.borrow();
        Ok(controls
            .into_iter()
            .map(|handle| {
                let node = &nodes[handle.index()];
                let name = node.attributes.get("name").cloned().unwrap_or_default();
                let value = node.attributes.get("value").cloned().unwrap_or_default();
                (name, value)
            })
            .collect())
    }

    fn reset_form(&self, form: NodeRef) -> Result<(), PlatformError> {
        self.form_node(form)?;
        for control in self.form_controls(form) {
            self.set_value(control, "");
        }
        Ok(())
    }

    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<ListenerId, PlatformError> {
        if let EventTarget::Node(node) = target {
            self.with_node(node, |_| ())?;
        }
        let id = self.allocate_id();
        self.listeners.borrow_mut().insert(id, Listener { target, kind, handler: Some(handler) });
        Ok(ListenerId::new(id))
    }

    fn unlisten(&self, id: ListenerId) {
        let released = self.listeners.borrow_mut().remove(&id.raw());
        drop(released);
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: TimerCallback,
    ) -> Result<TimerId, PlatformError> {
        let id = self.allocate_id();
        self.timers.borrow_mut().insert((self.now.get() + delay, id), callback);
        Ok(TimerId::new(id))
    }

    fn clear_timeout(&self, id: TimerId) {
        self.timers.borrow_mut().retain(|(_, timer), _| *timer != id.raw());
    }

    fn observe_intersections(
        &self,
        targets: &[NodeRef],
        options: &IntersectionOptions,
        callback: IntersectionCallback,
    ) -> Result<ObserverId, PlatformError> {
        if !self.intersection_support.get() {
            return Err(PlatformError::Unsupported {
                message: "viewport intersection is not available".into(),
                context: None,
            });
        }
        for target in targets {
            self.with_node(*target, |_| ())?;
        }
        let id = self.allocate_id();
        self.observers.borrow_mut().insert(
            id,
            Observer {
                targets: targets.to_vec(),
                options: options.clone(),
                callback: Some(callback),
            },
        );
        Ok(ObserverId::new(id))
    }

    fn unobserve(&self, observer: ObserverId, target: NodeRef) {
        if let Some(observer) = self.observers.borrow_mut().get_mut(&observer.raw()) {
            observer.targets.retain(|t| *t != target);
        }
    }

    fn disconnect(&self, observer: ObserverId) {
        let released = self.observers.borrow_mut().remove(&observer.raw());
        drop(released);
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    fn hostname(&self) -> String {
        self.hostname.borrow().clone()
    }

    fn supports_native_lazy_loading(&self) -> bool {
        self.native_lazy_loading.get()
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        self.timing.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_deadline_order() {
        let dom = MemoryPlatform::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (label, ms) in [("late", 30), ("early", 10), ("tie", 10)] {
            let log = Rc::clone(&log);
            dom.set_timeout(
                Duration::from_millis(ms),
                Box::new(move |_: &dyn Platform| log.borrow_mut().push(label)),
            )
            .unwrap();
        }

        dom.advance(Duration::from_millis(9));
        assert!(log.borrow().is_empty());
        dom.advance(Duration::from_millis(25));
        assert_eq!(*log.borrow(), vec!["early", "tie", "late"]);
        assert_eq!(dom.now(), Duration::from_millis(34));
    }

    #[test]
    fn cleared_timer_never_fires() {
        let dom = MemoryPlatform::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let id = dom
            .set_timeout(Duration::from_millis(5), Box::new(move |_: &dyn Platform| flag.set(true)))
            .unwrap();
        dom.clear_timeout(id);
        dom.advance(Duration::from_secs(1));
        assert!(!fired.get());
    }

    #[test]
    fn timers_scheduled_by_timers_run_within_the_same_advance() {
        let dom = MemoryPlatform::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        dom.set_timeout(
            Duration::from_millis(10),
            Box::new(move |platform: &dyn Platform| {
                platform
                    .set_timeout(
                        Duration::from_millis(10),
                        Box::new(move |_: &dyn Platform| flag.set(true)),
                    )
                    .unwrap();
            }),
        )
        .unwrap();

        dom.advance(Duration::from_millis(20));
        assert!(fired.get());
    }

    #[test]
    fn click_bubbles_to_document_after_element() {
        let dom = MemoryPlatform::new();
        let menu = dom.append(dom.body_node(), "ul", &[("id", "menu")]);
        let item = dom.append(menu, "li", &[]);
        let order = Rc::new(RefCell::new(Vec::new()));

        let targets = [(EventTarget::Document, "document"), (EventTarget::Node(menu), "menu")];
        for (target, label) in targets {
            let order = Rc::clone(&order);
            dom.listen(
                target,
                EventKind::Click,
                Box::new(move |_: &dyn Platform, event: &Event| {
                    assert_eq!(event.target(), Some(item));
                    order.borrow_mut().push(label);
                }),
            )
            .unwrap();
        }

        dom.click(item);
        assert_eq!(*order.borrow(), vec!["menu", "document"]);
    }

    #[test]
    fn removed_nodes_are_no_longer_queryable() {
        let dom = MemoryPlatform::new();
        let message = dom.append(dom.body_node(), "div", &[("class", "form-message success")]);
        assert_eq!(dom.query(".form-message"), Some(message));

        dom.remove(message).unwrap();
        assert!(dom.query(".form-message").is_none());
        assert!(!dom.is_connected(message));
        dom.remove(message).unwrap();
    }

    #[test]
    fn prepend_places_child_first() {
        let dom = MemoryPlatform::new();
        let form = dom.append(dom.body_node(), "form", &[]);
        let input = dom.append(form, "input", &[("name", "name")]);
        let banner = dom.create_element("div").unwrap();

        dom.prepend_child(form, banner).unwrap();
        assert_eq!(dom.children(form), vec![banner, input]);
        assert!(dom.prepend_child(banner, form).is_err());
    }

    #[test]
    fn form_entries_skip_unnamed_and_disabled_controls() {
        let dom = MemoryPlatform::new();
        let form = dom.append(dom.body_node(), "form", &[]);
        dom.append(form, "input", &[("name", "name"), ("value", "Jane")]);
        dom.append(form, "input", &[("value", "anonymous")]);
        dom.append(form, "input", &[("name", "token"), ("disabled", "")]);
        dom.append(form, "textarea", &[("name", "message"), ("value", "hi")]);

        let entries = dom.form_entries(form).unwrap();
        assert_eq!(
            entries,
            vec![("name".to_owned(), "Jane".to_owned()), ("message".to_owned(), "hi".to_owned())]
        );

        dom.reset_form(form).unwrap();
        assert!(dom.form_entries(form).unwrap().iter().all(|(_, v)| v.is_empty()));
        assert!(dom.form_entries(dom.body_node()).is_err());
    }
}
