//! `audit` command: which orderings are archived listings consistent with

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::errors::{ArchiveError, Result};
use crate::interfaces::cli::CliContext;
use crate::models::Post;
use crate::ordering::{self, OrderHypothesis, OrderReport};
use crate::storage::read_json;

#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub file: PathBuf,
    #[serde(flatten)]
    pub report: OrderReport,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    data: &'a [AuditEntry],
}

/// Audit explicit files, or every archived listing when `files` is empty
pub fn audit_files(ctx: &CliContext, files: Vec<PathBuf>) -> Result<Vec<AuditEntry>> {
    let files = if files.is_empty() {
        ctx.layout
            .archived_posts_files()?
            .into_iter()
            .map(|(_, path)| path)
            .collect()
    } else {
        files
    };

    files
        .into_iter()
        .map(|file| {
            let posts: Vec<Post> = read_json(&file)?;
            Ok(AuditEntry {
                report: ordering::audit(&posts),
                file,
            })
        })
        .collect()
}

/// Whether at least one listing is ordered by `date ++ created_at`
fn any_consistent(entries: &[AuditEntry]) -> bool {
    entries
        .iter()
        .any(|e| e.report.is_consistent_with(OrderHypothesis::ConcatenatedKey))
}

/// Fails when no listing is ordered by `date ++ created_at`
pub fn audit(ctx: &CliContext, files: Vec<PathBuf>, json: bool) -> Result<()> {
    let entries = audit_files(ctx, files)?;
    let ok = any_consistent(&entries);

    if json {
        let out = JsonOut {
            ok,
            data: &entries,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_table(&entries);
    }

    if entries.is_empty() {
        return Err(ArchiveError::validation("no post listings to audit"));
    }
    if !ok {
        return Err(ArchiveError::consistency(format!(
            "no listing is ordered by {}",
            OrderHypothesis::ConcatenatedKey
        )));
    }
    Ok(())
}

fn print_table(entries: &[AuditEntry]) {
    for entry in entries {
        println!(
            "{} ({} posts)",
            entry.file.display().to_string().bold(),
            entry.report.posts
        );
        for result in &entry.report.results {
            let status = if result.is_consistent() {
                "consistent".green()
            } else {
                "rejected".red()
            };
            let evidence = result
                .first_inversion
                .as_ref()
                .map(|inv| {
                    format!(
                        " (first: #{} id {} before id {})",
                        inv.index, inv.earlier_id, inv.later_id
                    )
                })
                .unwrap_or_default();
            println!(
                "  {:<20} {:<10} {:>5} inversions{}",
                result.hypothesis.name(),
                status,
                result.inversions,
                evidence.dimmed()
            );
        }
    }
}
