//! Module registry for the site bootstrap.
//! Each constructed controller is recorded together with its optional teardown.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

/// Releases whatever a module registered with the host.
pub type Teardown = Box<dyn FnOnce()>;

/// A constructed module: its state handle plus an optional teardown.
pub struct ModuleRecord {
    pub id: TypeId,
    pub name: &'static str,
    state: Rc<dyn Any>,
    teardown: Option<Teardown>,
}

impl fmt::Debug for ModuleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRecord")
            .field("name", &self.name)
            .field("has_teardown", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}

impl ModuleRecord {
    /// Records a module without teardown.
    pub fn new<T: Any>(name: &'static str, state: Rc<T>) -> Self {
        Self { id: TypeId::of::<T>(), name, state, teardown: None }
    }

    #[must_use]
    pub fn with_teardown(mut self, teardown: impl FnOnce() + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    #[must_use]
    pub const fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    /// Shared handle to the module state, if it is a `T`.
    #[must_use]
    pub fn state<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.state).downcast::<T>().ok()
    }

    /// Runs the teardown once. Returns whether anything ran.
    pub fn teardown(&mut self) -> bool {
        self.teardown.take().map(|teardown| teardown()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug)]
    struct Counter(Cell<u32>);

    #[test]
    fn teardown_runs_once() {
        let state = Rc::new(Counter(Cell::new(0)));
        let observed = Rc::clone(&state);
        let mut record =
            ModuleRecord::new("counter", Rc::clone(&state)).with_teardown(move || {
                observed.0.set(observed.0.get() + 1);
            });

        assert!(record.has_teardown());
        assert!(record.teardown());
        assert!(!record.teardown());
        assert_eq!(state.0.get(), 1);
    }

    #[test]
    fn state_downcasts_to_the_recorded_type() {
        let record = ModuleRecord::new("counter", Rc::new(Counter(Cell::new(3))));
        assert_eq!(record.id, TypeId::of::<Counter>());
        assert_eq!(record.state::<Counter>().map(|c| c.0.get()), Some(3));
        assert!(record.state::<String>().is_none());
        assert!(!record.has_teardown());
    }
}
