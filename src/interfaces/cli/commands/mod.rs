//! CLI command implementations

mod announcements;
mod archive;
mod audit;
mod config_gen;
mod whoami;

pub use announcements::{archive_announcements, validate_announcements};
pub use archive::{archive, download_photos, update_posts};
pub use audit::{AuditEntry, audit, audit_files};
pub use config_gen::config_generate;
pub use whoami::whoami;
