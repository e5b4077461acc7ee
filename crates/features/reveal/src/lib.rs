//! Scroll reveal feature slice.
//!
//! Every element carrying a reveal marker is watched by one viewport observer; when it
//! becomes visible it gains the `active` class, which starts its CSS transition.
//! Elements stay observed after they are revealed so the watcher keeps working across
//! layout changes; [`Reveal::destroy`] is the only way to stop it.

mod error;

pub use crate::error::RevealError;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use vitae_domain::config::{RevealConfig, SiteConfig};
use vitae_domain::constants::{ACTIVE_CLASS, REVEAL};
use vitae_domain::registry::ModuleRecord;
use vitae_platform::{IntersectionEntry, IntersectionOptions, NodeRef, ObserverId, Platform};

/// Reveal controller state.
#[derive(Debug)]
pub struct Reveal {
    elements: Vec<NodeRef>,
    options: IntersectionOptions,
    observer: Cell<Option<ObserverId>>,
    revealed: RefCell<Vec<NodeRef>>,
}

/// Initialize the reveal slice and start watching the marked elements.
///
/// # Errors
/// Returns [`RevealError::Observer`] if the host cannot create the watcher.
pub fn init(
    platform: &Rc<dyn Platform>,
    config: &SiteConfig,
) -> Result<ModuleRecord, RevealError> {
    let reveal = Rc::new(Reveal::new(&**platform, &config.reveal));
    reveal.observe(&**platform)?;

    let record = ModuleRecord::new(REVEAL, Rc::clone(&reveal));
    if !reveal.is_observing() {
        return Ok(record);
    }

    let platform = Rc::clone(platform);
    Ok(record.with_teardown(move || reveal.destroy(&*platform)))
}

impl Reveal {
    #[must_use]
    pub fn new(platform: &dyn Platform, config: &RevealConfig) -> Self {
        let selector = config.selectors.join(", ");
        Self {
            elements: platform.query_all(&selector),
            options: IntersectionOptions {
                threshold: config.threshold,
                root_margin: config.root_margin.clone(),
            },
            observer: Cell::new(None),
            revealed: RefCell::default(),
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[NodeRef] {
        &self.elements
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.get().is_some()
    }

    /// Elements revealed so far, in the order they first became visible.
    #[must_use]
    pub fn revealed(&self) -> Vec<NodeRef> {
        self.revealed.borrow().clone()
    }

    /// Disconnects the watcher. Does nothing if it is already gone.
    pub fn destroy(&self, platform: &dyn Platform) {
        if let Some(observer) = self.observer.take() {
            debug!(observer = observer.raw(), "Disconnecting reveal observer");
            platform.disconnect(observer);
        }
    }

    fn observe(self: &Rc<Self>, platform: &dyn Platform) -> Result<(), RevealError> {
        if self.elements.is_empty() {
            debug!("No reveal elements on the page");
            return Ok(());
        }

        let this = Rc::clone(self);
        let observer = platform.observe_intersections(
            &self.elements,
            &self.options,
            Box::new(move |p: &dyn Platform, _: ObserverId, entries: &[IntersectionEntry]| {
                this.on_intersection(p, entries);
            }),
        )?;
        self.observer.set(Some(observer));

        debug!(
            elements = self.elements.len(),
            threshold = self.options.threshold,
            "Reveal observer started"
        );
        Ok(())
    }

    fn on_intersection(&self, platform: &dyn Platform, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            if let Err(e) = platform.add_class(entry.target, ACTIVE_CLASS) {
                warn!(error = %e, "Failed to reveal element");
                continue;
            }
            let mut revealed = self.revealed.borrow_mut();
            if !revealed.contains(&entry.target) {
                revealed.push(entry.target);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_platform::memory::MemoryPlatform;

    #[test]
    fn options_follow_config() {
        let dom = MemoryPlatform::new();
        let reveal = Reveal::new(&*dom, &RevealConfig::default());
        assert!((reveal.options.threshold - 0.15).abs() < f64::EPSILON);
        assert_eq!(reveal.options.root_margin, "0px");
        assert!(reveal.elements().is_empty());
    }

    #[test]
    fn destroy_without_observer_is_a_no_op() {
        let dom = MemoryPlatform::new();
        let reveal = Reveal::new(&*dom, &RevealConfig::default());
        reveal.destroy(&*dom);
        reveal.destroy(&*dom);
        assert!(!reveal.is_observing());
    }
}
