//! AppImage bundling.
//!
//! Stages an AppDir from a prebuilt executable, a resource payload and
//! presentation metadata, then hands it to the packaging tool.
//!
//! # Example
//!
//! ```no_run
//! use neu_appimage::bundler::{AppMetadata, BuildRequestBuilder, Bundler, Category};
//!
//! # async fn example() -> neu_appimage::bundler::Result<()> {
//! let request = BuildRequestBuilder::new()
//!     .executable("dist/demo/demo-linux_x64")
//!     .resource("dist/demo/resources.neu")
//!     .out_dir("dist")
//!     .metadata(AppMetadata {
//!         program_name: "Demo".into(),
//!         icon: "assets/icon.png".into(),
//!         categories: vec![Category::Utility, Category::Development],
//!         ..Default::default()
//!     })
//!     .arch("x86_64")
//!     .build()?;
//!
//! if let Ok(path) = Bundler::new(request).bundle().await {
//!     println!("Created {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
mod host;
pub mod platform;
mod settings;
pub mod utils;

pub use builder::Bundler;
pub use error::{Error, Result};
pub use host::{Host, HostArch};
pub use platform::linux::appimage::tool::TOOLS_DIR_ENV;
pub use settings::{
    AppMetadata, BuildRequest, BuildRequestBuilder, Category, TargetArch, sanitize_program_name,
};
