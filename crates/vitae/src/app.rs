use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use vitae_domain::config::SiteConfig;
use vitae_domain::registry::ModuleRecord;
use vitae_kernel::config::load_config_or_default;
use vitae_platform::{
    Event, EventKind, EventTarget, ListenerId, Platform, PlatformError, ReadyState,
};

/// Lifecycle of an [`App`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the document to finish parsing.
    Pending,
    /// Every enabled module was constructed.
    Ready,
    /// Construction stopped at an error; the modules built before it are kept.
    Failed,
    /// Torn down.
    Destroyed,
}

/// Handle to a running site. Clones share the same modules.
#[derive(Debug, Clone)]
pub struct App {
    inner: Rc<AppInner>,
}

#[derive(Debug)]
struct AppInner {
    platform: Rc<dyn Platform>,
    config: RefCell<Option<SiteConfig>>,
    modules: RefCell<Vec<ModuleRecord>>,
    state: Cell<AppState>,
    ready_listener: Cell<Option<ListenerId>>,
}

/// Load the page configuration and launch the site on `platform`.
///
/// Launch failures are logged; the returned handle is usable either way. Dropping the
/// handle does not stop the site, before or after the document is ready; use
/// [`App::destroy`] for that.
pub fn start(platform: Rc<dyn Platform>) -> App {
    let app = App::new(platform);
    if let Err(e) = app.launch() {
        error!(error = %e, "Failed to wait for the document");
    }
    app
}

impl App {
    /// Creates an idle app. Nothing is constructed until [`App::launch`].
    #[must_use]
    pub fn new(platform: Rc<dyn Platform>) -> Self {
        Self {
            inner: Rc::new(AppInner {
                platform,
                config: RefCell::new(None),
                modules: RefCell::default(),
                state: Cell::new(AppState::Pending),
                ready_listener: Cell::new(None),
            }),
        }
    }

    /// Uses `config` instead of the configuration embedded in the page.
    #[must_use]
    pub fn with_config(self, config: SiteConfig) -> Self {
        *self.inner.config.borrow_mut() = Some(config);
        self
    }

    /// Constructs the modules now, or once the document is parsed if it is still loading.
    ///
    /// A deferred construction owns the app until it has run, so it happens even if every
    /// handle is dropped in the meantime.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the readiness listener cannot be registered.
    pub fn launch(&self) -> Result<(), PlatformError> {
        let inner = &self.inner;
        if inner.state.get() != AppState::Pending || inner.ready_listener.get().is_some() {
            return Ok(());
        }

        if inner.platform.ready_state() != ReadyState::Loading {
            inner.initialize();
            return Ok(());
        }

        debug!("Document still loading, deferring site initialization");
        let owner = Rc::clone(inner);
        let id = inner.platform.listen(
            EventTarget::Document,
            EventKind::DomContentLoaded,
            Box::new(move |p: &dyn Platform, _: &Event| {
                owner.initialize();
                owner.release_ready_listener(p);
            }),
        )?;
        inner.ready_listener.set(Some(id));
        Ok(())
    }

    /// Tears every module down in construction order. Modules without teardown are skipped.
    ///
    /// Calling it again does nothing.
    pub fn destroy(&self) {
        if let Some(id) = self.inner.ready_listener.take() {
            self.inner.platform.unlisten(id);
        }
        if self.inner.state.replace(AppState::Destroyed) == AppState::Destroyed {
            return;
        }

        let mut released = 0_usize;
        for record in self.inner.modules.borrow_mut().iter_mut() {
            if record.teardown() {
                debug!(module = record.name, "Module torn down");
                released += 1;
            }
        }
        info!(released, "Site destroyed");
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.inner.state.get()
    }

    /// Whether module construction has run, successfully or not.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(self.state(), AppState::Ready | AppState::Failed)
    }

    /// Names of the constructed modules, in construction order.
    #[must_use]
    pub fn modules(&self) -> Vec<&'static str> {
        self.inner.modules.borrow().iter().map(|record| record.name).collect()
    }

    /// State of the first constructed module of type `T`.
    #[must_use]
    pub fn module<T: Any>(&self) -> Option<Rc<T>> {
        self.inner.modules.borrow().iter().find_map(ModuleRecord::state::<T>)
    }

    /// The configuration in effect, once it has been resolved.
    #[must_use]
    pub fn config(&self) -> Option<SiteConfig> {
        self.inner.config.borrow().clone()
    }

    #[must_use]
    pub fn platform(&self) -> &Rc<dyn Platform> {
        &self.inner.platform
    }
}

impl AppInner {
    /// Drops the readiness listener once it has fired, from a zero-delay timer: handlers
    /// never unregister themselves.
    fn release_ready_listener(&self, platform: &dyn Platform) {
        let Some(id) = self.ready_listener.take() else { return };
        let scheduled = platform.set_timeout(
            Duration::ZERO,
            Box::new(move |p: &dyn Platform| p.unlisten(id)),
        );
        if let Err(e) = scheduled {
            warn!(error = %e, "Failed to release the readiness listener");
            self.ready_listener.set(Some(id));
        }
    }

    fn initialize(&self) {
        if self.state.get() != AppState::Pending {
            return;
        }

        let config = self
            .config
            .borrow_mut()
            .get_or_insert_with(|| load_config_or_default(&*self.platform))
            .clone();

        let mut modules = Vec::new();
        let result = crate::init(&self.platform, &config, &mut modules);
        let names: Vec<&'static str> = modules.iter().map(|record| record.name).collect();
        *self.modules.borrow_mut() = modules;

        match result {
            Ok(()) => {
                self.state.set(AppState::Ready);
                info!(modules = ?names, "Site initialized");
            },
            Err(e) => {
                self.state.set(AppState::Failed);
                error!(error = %e, modules = ?names, "Error initializing site");
            },
        }
    }
}
