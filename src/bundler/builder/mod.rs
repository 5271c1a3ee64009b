//! Build orchestration.
//!
//! - [`orchestrator`] - Main [`Bundler`] struct, host checks and error boundary
//! - [`validation`] - Input path checks performed before any filesystem write

mod orchestrator;
mod validation;

pub use orchestrator::Bundler;

