//! Page load timing reporter.
//!
//! Waits for the window `load` event, lets the browser finish its own bookkeeping for
//! one tick and logs three figures from the navigation timing marks:
//!
//! | Figure    | Marks                                   |
//! |-----------|-----------------------------------------|
//! | page load | `navigationStart` .. `loadEventEnd`     |
//! | connect   | `requestStart` .. `responseEnd`         |
//! | render    | `domLoading` .. `domComplete`           |
//!
//! The bootstrap only starts it on development hosts.

mod error;

pub use crate::error::PerformanceError;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};
use vitae_domain::config::SiteConfig;
use vitae_domain::constants::PERFORMANCE;
use vitae_domain::registry::ModuleRecord;
use vitae_platform::{Event, EventKind, EventTarget, ListenerId, NavigationTiming, Platform};

/// Load timing breakdown in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerformanceReport {
    pub page_load_ms: i64,
    pub connect_ms: i64,
    pub render_ms: i64,
}

impl PerformanceReport {
    #[must_use]
    pub fn from_timing(timing: &NavigationTiming) -> Self {
        Self {
            page_load_ms: span(timing.navigation_start, timing.load_event_end),
            connect_ms: span(timing.request_start, timing.response_end),
            render_ms: span(timing.dom_loading, timing.dom_complete),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn span(start: f64, end: f64) -> i64 {
    (end - start).round() as i64
}

#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    listener: Cell<Option<ListenerId>>,
    report: Cell<Option<PerformanceReport>>,
}

/// Initialize the reporter. It has no teardown: the listener releases itself once it fires.
///
/// # Errors
/// Returns [`PerformanceError::Platform`] if the load listener cannot be registered.
pub fn init(
    platform: &Rc<dyn Platform>,
    _config: &SiteConfig,
) -> Result<ModuleRecord, PerformanceError> {
    let monitor = Rc::new(PerformanceMonitor::default());

    let this = Rc::clone(&monitor);
    let id = platform.listen(
        EventTarget::Window,
        EventKind::Load,
        Box::new(move |p: &dyn Platform, _: &Event| this.on_load(p)),
    )?;
    monitor.listener.set(Some(id));
    debug!("Performance reporter waiting for load");

    Ok(ModuleRecord::new(PERFORMANCE, monitor))
}

impl PerformanceMonitor {
    /// The report logged after `load`, once it has been produced.
    #[must_use]
    pub fn report(&self) -> Option<PerformanceReport> {
        self.report.get()
    }

    fn on_load(self: &Rc<Self>, platform: &dyn Platform) {
        let this = Rc::clone(self);
        let scheduled = platform.set_timeout(
            Duration::ZERO,
            Box::new(move |p: &dyn Platform| {
                if let Some(id) = this.listener.take() {
                    p.unlisten(id);
                }
                this.record(p);
            }),
        );
        if let Err(e) = scheduled {
            warn!(error = %e, "Failed to schedule performance report");
        }
    }

    fn record(&self, platform: &dyn Platform) {
        let Some(timing) = platform.navigation_timing() else {
            warn!("Navigation timing unavailable");
            return;
        };

        let report = PerformanceReport::from_timing(&timing);
        info!("Performance metrics");
        info!(ms = report.page_load_ms, "Page load time");
        info!(ms = report.connect_ms, "Connect time");
        info!(ms = report.render_ms, "Render time");
        self.report.set(Some(report));
    }
}
