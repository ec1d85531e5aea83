//! `config generate` command

use std::path::PathBuf;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::errors::{ArchiveError, Result};

pub fn config_generate(output_path: Option<PathBuf>, force: bool) -> Result<()> {
    let Some(path) = output_path else {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    };

    if path.exists() && !force {
        return Err(ArchiveError::file_operation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    StaticConfig::default().save_to_file(&path)?;
    println!(
        "{} {}",
        "Configuration file generated:".green(),
        path.display().to_string().blue()
    );
    println!(
        "  {}",
        "Credentials are read from TC_USERNAME and TC_PASSWORD, not from this file".dimmed()
    );
    Ok(())
}
