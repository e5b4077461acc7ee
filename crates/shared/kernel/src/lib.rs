//! Kernel utilities shared across the site controllers.
//! Keep this crate lightweight: it holds the call-rate limiters and the page config loader.
//!
//! ## Rate limiting
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use vitae_kernel::limiter::throttle;
//! use vitae_platform::memory::MemoryPlatform;
//! use vitae_platform::Platform;
//!
//! let dom = MemoryPlatform::new();
//! let hits = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&hits);
//! let on_scroll = throttle(Duration::from_millis(100), move |_: &dyn Platform, ()| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! on_scroll.call(&*dom, ()).unwrap();
//! on_scroll.call(&*dom, ()).unwrap();
//! assert_eq!(hits.get(), 1);
//! ```
//!
//! ## Config loading
//! ```rust
//! use vitae_kernel::config::load_config_or_default;
//! use vitae_platform::memory::MemoryPlatform;
//!
//! let dom = MemoryPlatform::new();
//! let cfg = load_config_or_default(&*dom);
//! assert!((cfg.navigation.scrolled_offset - 50.0).abs() < f64::EPSILON);
//! ```
pub mod config;
pub mod limiter;

pub use vitae_domain as domain;
pub use vitae_platform as platform;
