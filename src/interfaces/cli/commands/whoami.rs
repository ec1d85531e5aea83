//! `whoami` command

use colored::Colorize;

use crate::errors::Result;
use crate::interfaces::cli::CliContext;

pub async fn whoami(ctx: &CliContext) -> Result<()> {
    let session = ctx.login().await?;
    let user = session.user_info();

    println!(
        "Logged in as \"{}\" ({})",
        user.full_name().bold(),
        user.email
    );
    println!("  User ID:   {}", user.id);
    println!("  School ID: {}", user.school_id);
    println!();
    println!("Found {} children", session.subjects().len());
    for subject in session.subjects() {
        println!("- {}", subject.name.cyan());
        println!("    Child ID:     {}", subject.id);
        println!("    Classroom ID: {}", subject.classroom_id);
    }
    Ok(())
}
