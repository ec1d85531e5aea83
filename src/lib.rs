//! tcarchive - keep a local copy of a Transparent Classroom account
//!
//! Lists every post visible to a parent account, writes them to disk in the
//! order the server returns them, and downloads the attached photos.
//!
//! # Architecture
//! - `client`: API seam (`ClassroomApi`, `Fetcher`) and the logged-in `Session`
//! - `services`: posts, photos and announcements workflows
//! - `ordering`: the listing sort key and the ordering audit
//! - `storage`: archive directory layout and atomic JSON writes
//! - `interfaces`: CLI command implementations
//! - `config`, `system`: configuration, logging and the panic hook

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod ordering;
pub mod services;
pub mod storage;
pub mod system;
