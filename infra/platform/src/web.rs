//! Browser [`Platform`] over `web-sys`.
//!
//! Elements are interned into a handle table the first time they are seen.
//! Listener and observer closures are owned by the platform and released on
//! [`Platform::unlisten`] / [`Platform::disconnect`].

use crate::error::{PlatformError, PlatformErrorExt};
use crate::{
    Event, EventHandler, EventKind, EventTarget, IntersectionCallback, IntersectionEntry,
    IntersectionOptions, ListenerId, NavigationTiming, NodeRef, ObserverId, Platform, ReadyState,
    ScrollBehavior, TimerCallback, TimerId, whole_millis,
};
use fxhash::FxHashMap;
use js_sys::{Array, Reflect};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollToOptions, Window,
};

type DomListener = Closure<dyn FnMut(web_sys::Event)>;
type DomObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct RegisteredListener {
    target: web_sys::EventTarget,
    kind: EventKind,
    closure: DomListener,
}

struct RegisteredObserver {
    observer: IntersectionObserver,
    _closure: DomObserverCallback,
}

/// The live browser document.
pub struct WebPlatform {
    this: Weak<Self>,
    window: Window,
    document: Document,
    nodes: RefCell<Vec<Element>>,
    listeners: RefCell<FxHashMap<u64, RegisteredListener>>,
    observers: RefCell<FxHashMap<u64, RegisteredObserver>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for WebPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebPlatform")
            .field("nodes", &self.nodes.borrow().len())
            .field("listeners", &self.listeners.borrow().len())
            .field("observers", &self.observers.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebPlatform {
    /// Binds to the global `window` and its document.
    ///
    /// # Errors
    /// Returns [`PlatformError::Unsupported`] outside a browser main thread.
    pub fn new() -> Result<Rc<Self>, PlatformError> {
        let window = web_sys::window().ok_or_else(|| PlatformError::Unsupported {
            message: "no global window".into(),
            context: None,
        })?;
        let document = window.document().ok_or_else(|| PlatformError::Unsupported {
            message: "window has no document".into(),
            context: None,
        })?;

        Ok(Rc::new_cyclic(|this| Self {
            this: this.clone(),
            window,
            document,
            nodes: RefCell::default(),
            listeners: RefCell::default(),
            observers: RefCell::default(),
            next_id: Cell::new(1),
        }))
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn intern(&self, element: Element) -> NodeRef {
        let mut nodes = self.nodes.borrow_mut();
        let index = nodes.iter().position(|known| *known == element).unwrap_or_else(|| {
            nodes.push(element);
            nodes.len() - 1
        });
        NodeRef::new(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn element(&self, node: NodeRef) -> Result<Element, PlatformError> {
        self.nodes
            .borrow()
            .get(node.index())
            .cloned()
            .ok_or_else(|| PlatformError::node_not_found(node))
    }

    fn html_element(&self, node: NodeRef) -> Result<HtmlElement, PlatformError> {
        self.element(node)?.dyn_into::<HtmlElement>().map_err(|_| PlatformError::Unsupported {
            message: format!("node #{} is not an HTML element", node.raw()).into(),
            context: None,
        })
    }

    fn form(&self, node: NodeRef) -> Result<HtmlFormElement, PlatformError> {
        self.element(node)?.dyn_into::<HtmlFormElement>().map_err(|_| {
            PlatformError::Unsupported {
                message: format!("node #{} is not a form", node.raw()).into(),
                context: None,
            }
        })
    }

    fn event_target(&self, target: EventTarget) -> Result<web_sys::EventTarget, PlatformError> {
        Ok(match target {
            EventTarget::Window => self.window.clone().into(),
            EventTarget::Document => self.document.clone().into(),
            EventTarget::Node(node) => self.element(node)?.into(),
        })
    }
}

fn host_error(value: &JsValue) -> PlatformError {
    PlatformError::Host {
        message: value.as_string().unwrap_or_else(|| format!("{value:?}")).into(),
        context: None,
    }
}

trait JsResultExt<T> {
    fn host(self, context: &'static str) -> Result<T, PlatformError>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn host(self, context: &'static str) -> Result<T, PlatformError> {
        self.map_err(|value| host_error(&value)).context(context)
    }
}

impl Platform for WebPlatform {
    fn element_by_id(&self, id: &str) -> Option<NodeRef> {
        self.document.get_element_by_id(id).map(|element| self.intern(element))
    }

    fn query(&self, selector: &str) -> Option<NodeRef> {
        self.document.query_selector(selector).ok().flatten().map(|element| self.intern(element))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn body(&self) -> Option<NodeRef> {
        self.document.body().map(|body| self.intern(body.into()))
    }

    fn add_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError> {
        self.element(node)?.class_list().add_1(class).host("classList.add")
    }

    fn remove_class(&self, node: NodeRef, class: &str) -> Result<(), PlatformError> {
        self.element(node)?.class_list().remove_1(class).host("classList.remove")
    }

    fn toggle_class(&self, node: NodeRef, class: &str) -> Result<bool, PlatformError> {
        self.element(node)?.class_list().toggle(class).host("classList.toggle")
    }

    fn has_class(&self, node: NodeRef, class: &str) -> bool {
        self.element(node).is_ok_and(|element| element.class_list().contains(class))
    }

    fn attribute(&self, node: NodeRef, name: &str) -> Option<String> {
        self.element(node).ok()?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeRef, name: &str, value: &str) -> Result<(), PlatformError> {
        self.element(node)?.set_attribute(name, value).host("setAttribute")
    }

    fn text_content(&self, node: NodeRef) -> Option<String> {
        self.element(node).ok()?.text_content()
    }

    fn set_text_content(&self, node: NodeRef, text: &str) -> Result<(), PlatformError> {
        self.element(node)?.set_text_content(Some(text));
        Ok(())
    }

    fn style(&self, node: NodeRef, property: &str) -> Option<String> {
        self.html_element(node)
            .ok()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, node: NodeRef, property: &str, value: &str) -> Result<(), PlatformError> {
        self.html_element(node)?.style().set_property(property, value).host("style.setProperty")
    }

    fn remove_style(&self, node: NodeRef, property: &str) -> Result<(), PlatformError> {
        self.html_element(node)?
            .style()
            .remove_property(property)
            .map(drop)
            .host("style.removeProperty")
    }

    fn contains(&self, ancestor: NodeRef, node: NodeRef) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Ok(ancestor), Ok(node)) => {
                let node: &web_sys::Node = &node;
                ancestor.contains(Some(node))
            },
            _ => false,
        }
    }

    fn create_element(&self, tag: &str) -> Result<NodeRef, PlatformError> {
        let element = self.document.create_element(tag).host("createElement")?;
        Ok(self.intern(element))
    }

    fn prepend_child(&self, parent: NodeRef, child: NodeRef) -> Result<(), PlatformError> {
        let parent = self.element(parent)?;
        let child = self.element(child)?;
        let first = parent.first_child();
        parent.insert_before(&child, first.as_ref()).map(drop).host("insertBefore")
    }

    fn remove(&self, node: NodeRef) -> Result<(), PlatformError> {
        self.element(node)?.remove();
        Ok(())
    }

    fn offset_top(&self, node: NodeRef) -> f64 {
        self.html_element(node).map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, node: NodeRef) -> f64 {
        self.html_element(node).map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn form_entries(&self, form: NodeRef) -> Result<Vec<(String, String)>, PlatformError> {
        let form = self.form(form)?;
        let data = FormData::new_with_form(&form).host("new FormData")?;
        let iterator = js_sys::try_iter(&JsValue::from(data))
            .host("FormData iterator")?
            .ok_or_else(|| PlatformError::Unsupported {
                message: "FormData is not iterable".into(),
                context: None,
            })?;

        let mut entries = Vec::new();
        for item in iterator {
            let pair = Array::from(&item.host("FormData entry")?);
            // File inputs yield non-string values; they carry no text to validate.
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                entries.push((name, value));
            }
        }
        Ok(entries)
    }

    fn reset_form(&self, form: NodeRef) -> Result<(), PlatformError> {
        self.form(form)?.reset();
        Ok(())
    }

    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        mut handler: EventHandler,
    ) -> Result<ListenerId, PlatformError> {
        let dom_target = self.event_target(target)?;
        let this = self.this.clone();
        let closure = DomListener::new(move |raw: web_sys::Event| {
            let Some(platform) = this.upgrade() else { return };
            let origin = raw
                .target()
                .and_then(|origin| origin.dyn_into::<Element>().ok())
                .map(|element| platform.intern(element));
            let event = Event::new(kind, origin);
            handler(&*platform, &event);
            if event.default_prevented() {
                raw.prevent_default();
            }
        });

        dom_target
            .add_event_listener_with_callback(kind.as_ref(), closure.as_ref().unchecked_ref())
            .host("addEventListener")?;

        let id = self.allocate_id();
        self.listeners
            .borrow_mut()
            .insert(id, RegisteredListener { target: dom_target, kind, closure });
        Ok(ListenerId::new(id))
    }

    fn unlisten(&self, id: ListenerId) {
        let Some(listener) = self.listeners.borrow_mut().remove(&id.raw()) else { return };
        if let Err(err) = listener
            .target
            .remove_event_listener_with_callback(
                listener.kind.as_ref(),
                listener.closure.as_ref().unchecked_ref(),
            )
            .host("removeEventListener")
        {
            warn!(error = %err, "Failed to remove event listener");
        }
    }

    fn set_timeout(
        &self,
        delay: Duration,
        callback: TimerCallback,
    ) -> Result<TimerId, PlatformError> {
        let this = self.this.clone();
        // Self-releasing: a cleared timer keeps its closure until page unload.
        let closure = Closure::once_into_js(move || {
            if let Some(platform) = this.upgrade() {
                callback(&*platform);
            }
        });
        let millis = i32::try_from(whole_millis(delay)).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), millis)
            .host("setTimeout")?;
        Ok(TimerId::new(u64::try_from(handle).unwrap_or_default()))
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Ok(handle) = i32::try_from(id.raw()) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn observe_intersections(
        &self,
        targets: &[NodeRef],
        options: &IntersectionOptions,
        mut callback: IntersectionCallback,
    ) -> Result<ObserverId, PlatformError> {
        let elements = targets.iter().map(|t| self.element(*t)).collect::<Result<Vec<_>, _>>()?;

        let id = self.allocate_id();
        let observer_id = ObserverId::new(id);
        let this = self.this.clone();
        let closure =
            DomObserverCallback::new(move |entries: Array, _observer: IntersectionObserver| {
                let Some(platform) = this.upgrade() else { return };
                let entries: Vec<IntersectionEntry> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        target: platform.intern(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                callback(&*platform, observer_id, &entries);
            });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .host("new IntersectionObserver")?;

        for element in &elements {
            observer.observe(element);
        }

        self.observers
            .borrow_mut()
            .insert(id, RegisteredObserver { observer, _closure: closure });
        Ok(observer_id)
    }

    fn unobserve(&self, observer: ObserverId, target: NodeRef) {
        let observers = self.observers.borrow();
        if let (Some(registered), Ok(element)) =
            (observers.get(&observer.raw()), self.element(target))
        {
            registered.observer.unobserve(&element);
        }
    }

    fn disconnect(&self, observer: ObserverId) {
        if let Some(registered) = self.observers.borrow_mut().remove(&observer.raw()) {
            registered.observer.disconnect();
        }
    }

    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state().as_str() {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn supports_native_lazy_loading(&self) -> bool {
        Reflect::get(&self.window, &JsValue::from_str("HTMLImageElement"))
            .and_then(|constructor| Reflect::get(&constructor, &JsValue::from_str("prototype")))
            .and_then(|prototype| Reflect::has(&prototype, &JsValue::from_str("loading")))
            .unwrap_or(false)
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        let timing = self.window.performance()?.timing();
        Some(NavigationTiming {
            navigation_start: timing.navigation_start(),
            request_start: timing.request_start(),
            response_end: timing.response_end(),
            dom_loading: timing.dom_loading(),
            dom_complete: timing.dom_complete(),
            load_event_end: timing.load_event_end(),
        })
    }
}
