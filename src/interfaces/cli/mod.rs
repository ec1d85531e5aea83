//! CLI interface module
//!
//! Turns parsed `Commands` into calls on the service layer.

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::client::{HttpClassroomApi, HttpFetcher, Session};
use crate::config::{Credentials, StaticConfig};
use crate::errors::Result;
use crate::storage::ArchiveLayout;

/// Everything a command needs: configuration and where the archive lives
pub struct CliContext {
    pub config: Arc<StaticConfig>,
    pub layout: ArchiveLayout,
}

impl CliContext {
    pub fn new(config: Arc<StaticConfig>, root_override: Option<PathBuf>) -> Self {
        let root = root_override.unwrap_or_else(|| config.archive.root.clone());
        Self {
            config,
            layout: ArchiveLayout::new(root),
        }
    }

    /// Log in with `TC_USERNAME`/`TC_PASSWORD`
    pub async fn login(&self) -> Result<Session> {
        let credentials = Credentials::from_env()?;
        let api = Arc::new(HttpClassroomApi::new(&self.config.api));
        Session::login(api, &credentials).await
    }

    pub fn fetcher(&self) -> Arc<HttpFetcher> {
        Arc::new(HttpFetcher::new(&self.config.api))
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(ctx: &CliContext, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Archive { no_update_posts } => commands::archive(ctx, !no_update_posts).await,
        Commands::Posts => commands::update_posts(ctx).await.map(|_| ()),
        Commands::Photos => commands::download_photos(ctx).await,
        Commands::Announcements { validate_only } => {
            if validate_only {
                commands::validate_announcements(ctx)
            } else {
                commands::archive_announcements(ctx).await
            }
        }
        Commands::Audit { files, json } => commands::audit(ctx, files, json),
        Commands::Whoami => commands::whoami(ctx).await,
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                commands::config_generate(output_path, force)
            }
        },
    }
}
