//! Call-rate limiters driven by platform timers.
//!
//! * [`Debounce`] collapses a burst into a single trailing call carrying the last arguments.
//! * [`Throttle`] runs the first call of an idle period and drops the rest until the window closes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;
use vitae_platform::{Platform, PlatformError, TimerId};

pub const DEFAULT_DEBOUNCE_WAIT: Duration = Duration::from_millis(10);
pub const DEFAULT_THROTTLE_LIMIT: Duration = Duration::from_millis(100);

type Action<T> = Rc<RefCell<dyn FnMut(&dyn Platform, T)>>;

/// Wraps `action` so that only the last call of a burst runs, `wait` after it was made.
pub fn debounce<T: 'static>(
    wait: Duration,
    action: impl FnMut(&dyn Platform, T) + 'static,
) -> Debounce<T> {
    Debounce { wait, action: Rc::new(RefCell::new(action)), pending: Rc::default() }
}

/// Wraps `action` so that it runs at most once per `limit`.
pub fn throttle<T: 'static>(
    limit: Duration,
    action: impl FnMut(&dyn Platform, T) + 'static,
) -> Throttle<T> {
    Throttle { limit, action: Rc::new(RefCell::new(action)), cooling: Rc::default() }
}

pub struct Debounce<T> {
    wait: Duration,
    action: Action<T>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<T: 'static> Debounce<T> {
    /// Cancels any pending call and schedules a new one with `args`.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the timer cannot be scheduled. No call is pending afterwards.
    pub fn call(&self, platform: &dyn Platform, args: T) -> Result<(), PlatformError> {
        self.cancel(platform);

        let action = Rc::clone(&self.action);
        let pending = Rc::clone(&self.pending);
        let id = platform.set_timeout(
            self.wait,
            Box::new(move |platform: &dyn Platform| {
                pending.set(None);
                (*action.borrow_mut())(platform, args);
            }),
        )?;
        self.pending.set(Some(id));
        Ok(())
    }

    /// Drops the pending call, if any.
    pub fn cancel(&self, platform: &dyn Platform) {
        if let Some(id) = self.pending.take() {
            trace!(timer = id.raw(), "Superseding debounced call");
            platform.clear_timeout(id);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }
}

pub struct Throttle<T> {
    limit: Duration,
    action: Action<T>,
    cooling: Rc<Cell<bool>>,
}

impl<T: 'static> Throttle<T> {
    /// Runs the action now unless a window is open. Returns whether it ran.
    ///
    /// # Errors
    /// Returns [`PlatformError`] if the window timer cannot be scheduled; the action does not run.
    pub fn call(&self, platform: &dyn Platform, args: T) -> Result<bool, PlatformError> {
        if self.cooling.get() {
            return Ok(false);
        }

        self.cooling.set(true);
        let cooling = Rc::clone(&self.cooling);
        if let Err(err) =
            platform.set_timeout(self.limit, Box::new(move |_: &dyn Platform| cooling.set(false)))
        {
            self.cooling.set(false);
            return Err(err);
        }

        (*self.action.borrow_mut())(platform, args);
        Ok(true)
    }

    /// Whether calls are currently being dropped.
    #[must_use]
    pub fn is_cooling(&self) -> bool {
        self.cooling.get()
    }

    #[must_use]
    pub const fn limit(&self) -> Duration {
        self.limit
    }
}

impl<T> fmt::Debug for Debounce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("wait", &self.wait)
            .field("pending", &self.pending.get())
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for Throttle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("limit", &self.limit)
            .field("cooling", &self.cooling.get())
            .finish_non_exhaustive()
    }
}

impl<T> Clone for Debounce<T> {
    fn clone(&self) -> Self {
        Self {
            wait: self.wait,
            action: Rc::clone(&self.action),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<T> Clone for Throttle<T> {
    fn clone(&self) -> Self {
        Self {
            limit: self.limit,
            action: Rc::clone(&self.action),
            cooling: Rc::clone(&self.cooling),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_platform::memory::MemoryPlatform;

    #[test]
    fn debounce_runs_once_with_last_arguments() {
        let dom = MemoryPlatform::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let limiter = debounce(DEFAULT_DEBOUNCE_WAIT, move |_: &dyn Platform, v: u32| {
            sink.borrow_mut().push(v);
        });

        for v in 1..=3 {
            limiter.call(&*dom, v).unwrap();
            dom.advance(Duration::from_millis(4));
        }
        assert!(limiter.is_pending());
        assert!(seen.borrow().is_empty());

        dom.advance(DEFAULT_DEBOUNCE_WAIT);
        assert_eq!(*seen.borrow(), vec![3]);
        assert!(!limiter.is_pending());
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn cancel_drops_the_pending_call() {
        let dom = MemoryPlatform::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let limiter = debounce(DEFAULT_DEBOUNCE_WAIT, move |_: &dyn Platform, ()| {
            counter.set(counter.get() + 1);
        });

        limiter.call(&*dom, ()).unwrap();
        limiter.cancel(&*dom);
        dom.advance(Duration::from_secs(1));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn throttle_drops_until_window_closes() {
        let dom = MemoryPlatform::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let limiter = throttle(DEFAULT_THROTTLE_LIMIT, move |_: &dyn Platform, v: u32| {
            sink.borrow_mut().push(v);
        });

        assert!(limiter.call(&*dom, 1).unwrap());
        dom.advance(Duration::from_millis(50));
        assert!(!limiter.call(&*dom, 2).unwrap());
        assert!(limiter.is_cooling());

        dom.advance(Duration::from_millis(50));
        assert!(!limiter.is_cooling());
        assert!(limiter.call(&*dom, 3).unwrap());
        assert_eq!(*seen.borrow(), vec![1, 3]);
    }

    #[test]
    fn clones_share_the_window() {
        let dom = MemoryPlatform::new();
        let limiter = throttle(DEFAULT_THROTTLE_LIMIT, |_: &dyn Platform, ()| {});
        let other = limiter.clone();

        assert!(limiter.call(&*dom, ()).unwrap());
        assert!(!other.call(&*dom, ()).unwrap());
    }
}
