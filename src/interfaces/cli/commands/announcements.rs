//! `announcements` command

use colored::Colorize;
use serde_json::Value;

use crate::errors::Result;
use crate::interfaces::cli::CliContext;
use crate::services::announcements;
use crate::storage::read_json;

pub async fn archive_announcements(ctx: &CliContext) -> Result<()> {
    let session = ctx.login().await?;
    let count = announcements::archive_announcements(&session, &ctx.layout).await?;
    println!(
        "{} {} announcements -> {}",
        "✓".green(),
        count,
        ctx.layout.announcements_file().display()
    );
    Ok(())
}

pub fn validate_announcements(ctx: &CliContext) -> Result<()> {
    let saved: Vec<Value> = read_json(&ctx.layout.announcements_file())?;
    let count = announcements::validate(&saved)?;
    println!("{} {} announcements valid", "✓".green(), count);
    Ok(())
}
