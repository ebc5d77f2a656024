//! `qdl config` – show where configuration lives and what it says.

use anyhow::Result;
use qdl_core::{config, logging};
use std::fs;
use std::path::Path;

pub fn run_show_config() -> Result<()> {
    // Creates both files with defaults when missing.
    config::load_or_init()?;
    config::load_or_init_format()?;

    print_file(&config::config_path()?)?;
    println!();
    print_file(&config::format_config_path()?)?;
    println!();
    if let Ok(log) = logging::log_file_path() {
        println!("# log file: {}", log.display());
    }
    Ok(())
}

fn print_file(path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", fs::read_to_string(path)?);
    Ok(())
}
