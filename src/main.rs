//! neu-appimage - package a prebuilt executable as a Linux AppImage.

use neu_appimage::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            OutputManager::new(false).error(&format!("Error: {e}"));
            1
        }
    };

    process::exit(exit_code);
}
