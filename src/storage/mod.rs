//! On-disk archive layout

mod archive;

pub use archive::{ArchiveLayout, UNFINISHED_SUFFIX, read_json, write_json};
