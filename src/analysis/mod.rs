//! Request-time analysis for the flood dashboard.
//!
//! Submodules:
//! - `correlation` — joins stations to flood warnings by area name.
//! - `window`      — parses reading timestamps and keeps the last 24 hours.
//!
//! Both are pure functions of their inputs.

pub mod correlation;
pub mod window;
