//! Linux package formats.

pub mod appimage;
