//! Command line argument parsing and validation.

use crate::bundler::{Category, TOOLS_DIR_ENV};
use crate::error::CliError;
use clap::Parser;
use std::path::PathBuf;

/// Package a prebuilt executable and its resources as an AppImage
#[derive(Parser, Debug)]
#[command(
    name = "neu-appimage",
    version,
    disable_version_flag = true,
    about = "Package a prebuilt executable and its resources as an AppImage",
    long_about = "Stages an AppDir (AppRun launcher, desktop entry, icon, usr/bin payload), \
runs appimagetool on it and moves the resulting <name>-<arch>.AppImage into --out-dir.

Usage:
  neu-appimage --exe dist/demo/demo-linux_x64 --res dist/demo/resources.neu \\
    --program-name Demo --description \"Demo app\" --icon icon.png \\
    --categories Utility,Development --arch x86_64 --out-dir dist

Exit code 0 = the AppImage exists at the printed path."
)]
pub struct Args {
    /// Path to the main executable
    #[arg(long, value_name = "PATH")]
    pub exe: Option<PathBuf>,

    /// Path to the resource file (e.g. resources.neu)
    #[arg(long, value_name = "PATH")]
    pub res: Option<PathBuf>,

    /// Other files to include, separated by commas (file1,file2,file3)
    #[arg(long, value_name = "PATHS", value_delimiter = ',')]
    pub files: Vec<PathBuf>,

    /// Name of the program
    #[arg(long, value_name = "NAME")]
    pub program_name: Option<String>,

    /// Generic name of the program
    #[arg(long, value_name = "NAME")]
    pub generic_name: Option<String>,

    /// Description of the program
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Path to the program icon
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Program version (e.g. 0.4.6-beta)
    #[arg(long = "version", value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Categories of the program, separated by commas (cat1,cat2)
    #[arg(long, value_name = "CATEGORIES", value_delimiter = ',', value_parser = parse_category)]
    pub categories: Vec<Category>,

    /// Working directory to run the program in
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<String>,

    /// AppImage architecture (x86_64 or i386)
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Directory to save the AppImage in
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Show the output of appimagetool
    #[arg(long)]
    pub log: bool,

    /// List available categories
    #[arg(long)]
    pub list_categories: bool,

    /// Directory containing appimagetool-x86_64.AppImage / appimagetool-i686.AppImage
    #[arg(long, value_name = "DIR", env = TOOLS_DIR_ENV)]
    pub tools_dir: Option<PathBuf>,

    /// Kill appimagetool after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Print version
    #[arg(short = 'V', action = clap::ArgAction::Version)]
    print_version: Option<bool>,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse()
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Checks that every argument a build needs was given.
    ///
    /// Not needed for `--list-categories`.
    pub fn validate(&self) -> Result<(), CliError> {
        let required: [(&str, bool); 8] = [
            ("--exe", self.exe.is_some()),
            ("--res", self.res.is_some()),
            ("--program-name", self.program_name.is_some()),
            ("--description", self.description.is_some()),
            ("--icon", self.icon.is_some()),
            ("--categories", !self.categories.is_empty()),
            ("--arch", self.arch.is_some()),
            ("--out-dir", self.out_dir.is_some()),
        ];

        if let Some((argument, _)) = required.iter().find(|(_, given)| !given) {
            return Err(CliError::MissingArgument {
                argument: argument.to_string(),
            });
        }

        if let Some(arch) = &self.arch
            && arch.parse::<crate::bundler::TargetArch>().is_err()
        {
            return Err(CliError::InvalidArguments {
                reason: format!("invalid AppImage architecture \"{arch}\""),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("neu-appimage").chain(args.iter().copied()))
    }

    const COMPLETE: &[&str] = &[
        "--exe",
        "app",
        "--res",
        "resources.neu",
        "--program-name",
        "Demo",
        "--description",
        "Demo app",
        "--icon",
        "icon.png",
        "--categories",
        "Utility,Game",
        "--arch",
        "x86_64",
        "--out-dir",
        "dist",
    ];

    #[test]
    fn parses_comma_separated_lists() {
        let mut argv = COMPLETE.to_vec();
        argv.extend(["--files", "a.txt,b.txt"]);
        let args = parse(&argv).unwrap();

        assert_eq!(args.categories, vec![Category::Utility, Category::Game]);
        assert_eq!(args.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_category() {
        let err = parse(&["--categories", "Utility,Toys"]).unwrap_err();
        assert!(err.to_string().contains("Toys"));
    }

    #[test]
    fn list_categories_needs_nothing_else() {
        let args = parse(&["--list-categories"]).unwrap();
        assert!(args.list_categories);
    }

    #[test]
    fn reports_first_missing_argument() {
        let args = parse(&["--exe", "app"]).unwrap();
        let err = args.validate().unwrap_err();
        assert_eq!(err.to_string(), "Argument \"--res\" not specified");
    }

    #[test]
    fn version_flag_is_the_program_version() {
        let mut argv = COMPLETE.to_vec();
        argv.extend(["--version", "0.4.6-beta"]);
        let args = parse(&argv).unwrap();
        assert_eq!(args.app_version.as_deref(), Some("0.4.6-beta"));
    }

    #[test]
    fn invalid_arch_is_rejected() {
        let mut args = parse(COMPLETE).unwrap();
        args.arch = Some("armhf".into());
        assert!(matches!(
            args.validate(),
            Err(CliError::InvalidArguments { .. })
        ));
    }
}
