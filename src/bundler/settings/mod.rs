//! Configuration structures for AppImage builds.
//!
//! This module provides the immutable [`BuildRequest`], its builder, the
//! presentation metadata, and the closed enumerations (categories, target
//! architectures) the desktop entry and packaging tool accept.

mod arch;
mod builder;
mod category;
mod metadata;
mod request;

pub use arch::TargetArch;
pub use builder::BuildRequestBuilder;
pub use category::Category;
pub use metadata::{AppMetadata, sanitize_program_name};
pub use request::BuildRequest;
