//! # Domain Models
//!
//! This crate contains pure site types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no DOM access, timers or logging, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod modules;
pub mod registry;
