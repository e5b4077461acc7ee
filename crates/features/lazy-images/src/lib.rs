//! Lazy image fallback.
//!
//! Browsers that honour `loading="lazy"` need nothing from us. Elsewhere every lazy
//! image is watched and gets its real source (`data-src`, else its current `src`) the
//! first time it enters the viewport, after which it is no longer watched.

mod error;

pub use crate::error::LazyImagesError;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use vitae_domain::config::SiteConfig;
use vitae_domain::constants::{
    DEFERRED_SOURCE_ATTRIBUTE, LAZY_IMAGE_SELECTOR, LAZY_IMAGES, SOURCE_ATTRIBUTE,
};
use vitae_domain::registry::ModuleRecord;
use vitae_platform::{
    IntersectionEntry, IntersectionOptions, NodeRef, ObserverId, Platform, PlatformError,
};

#[derive(Debug)]
pub struct LazyImages {
    images: Vec<NodeRef>,
    observer: Cell<Option<ObserverId>>,
    loaded: RefCell<Vec<NodeRef>>,
}

/// Initialize the lazy image slice.
///
/// # Errors
/// Returns [`LazyImagesError::Observer`] if the host cannot create the watcher.
pub fn init(
    platform: &Rc<dyn Platform>,
    _config: &SiteConfig,
) -> Result<ModuleRecord, LazyImagesError> {
    let images = Rc::new(LazyImages::new(&**platform));
    let record = ModuleRecord::new(LAZY_IMAGES, Rc::clone(&images));

    if platform.supports_native_lazy_loading() {
        debug!("Native lazy loading available, fallback disabled");
        return Ok(record);
    }

    images.observe(&**platform)?;
    if !images.is_observing() {
        return Ok(record);
    }

    let platform = Rc::clone(platform);
    Ok(record.with_teardown(move || images.destroy(&*platform)))
}

impl LazyImages {
    #[must_use]
    pub fn new(platform: &dyn Platform) -> Self {
        Self {
            images: platform.query_all(LAZY_IMAGE_SELECTOR),
            observer: Cell::new(None),
            loaded: RefCell::default(),
        }
    }

    #[must_use]
    pub fn images(&self) -> &[NodeRef] {
        &self.images
    }

    #[must_use]
    pub fn loaded(&self) -> Vec<NodeRef> {
        self.loaded.borrow().clone()
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observer.get().is_some()
    }

    /// Disconnects the watcher. Does nothing if it is already gone.
    pub fn destroy(&self, platform: &dyn Platform) {
        if let Some(observer) = self.observer.take() {
            platform.disconnect(observer);
        }
    }

    fn observe(self: &Rc<Self>, platform: &dyn Platform) -> Result<(), LazyImagesError> {
        if self.images.is_empty() {
            return Ok(());
        }

        let this = Rc::clone(self);
        let observer = platform.observe_intersections(
            &self.images,
            &IntersectionOptions::default(),
            Box::new(move |p: &dyn Platform, observer: ObserverId, entries: &[IntersectionEntry]| {
                for entry in entries.iter().filter(|entry| entry.is_intersecting) {
                    if let Err(e) = this.load(p, entry.target) {
                        warn!(error = %e, "Failed to load lazy image");
                    }
                    p.unobserve(observer, entry.target);
                }
            }),
        )?;
        self.observer.set(Some(observer));

        debug!(images = self.images.len(), "Lazy image fallback active");
        Ok(())
    }

    fn load(&self, platform: &dyn Platform, image: NodeRef) -> Result<(), PlatformError> {
        let source = platform
            .attribute(image, DEFERRED_SOURCE_ATTRIBUTE)
            .filter(|source| !source.is_empty())
            .or_else(|| platform.attribute(image, SOURCE_ATTRIBUTE));
        if let Some(source) = source {
            platform.set_attribute(image, SOURCE_ATTRIBUTE, &source)?;
        }
        self.loaded.borrow_mut().push(image);
        Ok(())
    }
}
