//! Platform-specific bundlers.

pub mod linux;
