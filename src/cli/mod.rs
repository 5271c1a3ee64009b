//! Command line interface for neu-appimage.
//!
//! A thin shell over [`crate::bundler`]: parses arguments, turns them into a
//! [`BuildRequest`], runs the build and reports the outcome.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{AppMetadata, BuildRequest, BuildRequestBuilder, Bundler, Category};
use crate::error::Result;
use clap::CommandFactory;
use std::time::Duration;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(false);

    if args.list_categories {
        output.println(&categories_listing())?;
        return Ok(0);
    }

    if let Err(e) = args.validate() {
        Args::command().print_help()?;
        return Err(e.into());
    }

    let request = build_request(&args)?;
    output.progress(&format!(
        "Building AppImage for {} ({})",
        request.program_name(),
        request.arch()
    ))?;

    match Bundler::new(request).bundle().await {
        Ok(path) => {
            output.success(&format!("Success! AppImage created at {}", path.display()))?;
            Ok(0)
        }
        Err(e) => {
            output.error(&format!("{e}\n\nERROR IDENTIFIER: {}", e.kind()));
            Ok(1)
        }
    }
}

/// Numbered list printed by `--list-categories`.
pub fn categories_listing() -> String {
    let mut listing = String::from("Available Program Categories:");
    for (i, category) in Category::ALL.iter().enumerate() {
        listing.push_str(&format!("\n  {:<4}{}", format!("{}.", i + 1), category));
    }
    listing
}

/// Converts validated arguments into a build request.
pub fn build_request(args: &Args) -> crate::bundler::Result<BuildRequest> {
    let metadata = AppMetadata {
        program_name: args.program_name.clone().unwrap_or_default(),
        generic_name: args.generic_name.clone(),
        description: args.description.clone(),
        version: args.app_version.clone(),
        icon: args.icon.clone().unwrap_or_default(),
        categories: args.categories.clone(),
        working_dir: args.working_dir.clone(),
    };

    let mut builder = BuildRequestBuilder::new()
        .extra_files(&args.files)
        .metadata(metadata)
        .verbose_tool_output(args.log);

    if let Some(exe) = &args.exe {
        builder = builder.executable(exe);
    }
    if let Some(res) = &args.res {
        builder = builder.resource(res);
    }
    if let Some(out_dir) = &args.out_dir {
        builder = builder.out_dir(out_dir);
    }
    if let Some(arch) = &args.arch {
        builder = builder.arch(arch);
    }
    if let Some(tools_dir) = &args.tools_dir {
        builder = builder.tools_dir(tools_dir);
    }
    if let Some(secs) = args.timeout {
        builder = builder.tool_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn listing_is_numbered_and_aligned() {
        let listing = categories_listing();
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[1], "  1.  Audio");
        assert_eq!(lines[10], "  10. Science");
        assert_eq!(lines[13], "  13. Utility");
    }

    #[test]
    fn request_carries_every_argument() {
        let args = Args::try_parse_from([
            "neu-appimage",
            "--exe",
            "app",
            "--res",
            "r.neu",
            "--program-name",
            "My App",
            "--description",
            "desc",
            "--icon",
            "icon.png",
            "--categories",
            "Game",
            "--arch",
            "i386",
            "--out-dir",
            "dist",
            "--files",
            "a,b",
            "--log",
            "--timeout",
            "60",
            "--working-dir",
            "/opt/app",
        ])
        .unwrap();

        let request = build_request(&args).unwrap();
        assert_eq!(request.program_name(), "My App");
        assert_eq!(request.arch(), "i386");
        assert_eq!(request.extra_files().len(), 2);
        assert!(request.verbose_tool_output());
        assert_eq!(request.tool_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(request.metadata().working_dir.as_deref(), Some("/opt/app"));
        assert_eq!(request.metadata().description.as_deref(), Some("desc"));
    }
}
