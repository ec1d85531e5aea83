//! Logged-in account: user info, token and the children it can see.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use super::ClassroomApi;
use crate::config::Credentials;
use crate::errors::{ArchiveError, Result};
use crate::models::{Subject, UserInfo};

pub struct Session {
    api: Arc<dyn ClassroomApi>,
    user_info: UserInfo,
    subjects: Vec<Subject>,
}

impl Session {
    /// Authenticate and load the account's subjects.
    ///
    /// Only `Child` subjects are expected; anything else is an error.
    pub async fn login(api: Arc<dyn ClassroomApi>, credentials: &Credentials) -> Result<Self> {
        let user_info = api.authenticate(credentials).await?;
        info!(
            user_id = user_info.id,
            school_id = user_info.school_id,
            "Logged in as \"{}\" ({})",
            user_info.full_name(),
            user_info.email
        );

        let subjects = api
            .my_subjects(&user_info.api_token, user_info.school_id)
            .await?;
        if let Some(other) = subjects.iter().find(|s| !s.is_child()) {
            return Err(ArchiveError::unexpected_response(format!(
                "unexpected subject type \"{}\" for subject {}",
                other.kind, other.id
            )));
        }

        info!("Found {} children", subjects.len());
        for subject in &subjects {
            info!(
                child_id = subject.id,
                classroom_id = subject.classroom_id,
                "- {}",
                subject.name
            );
        }

        Ok(Self {
            api,
            user_info,
            subjects,
        })
    }

    pub fn api(&self) -> &dyn ClassroomApi {
        self.api.as_ref()
    }

    pub fn token(&self) -> &str {
        &self.user_info.api_token
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn school_id(&self) -> u64 {
        self.user_info.school_id
    }

    pub fn child_ids(&self) -> Vec<u64> {
        self.subjects
            .iter()
            .map(|s| s.id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn classroom_ids(&self) -> Vec<u64> {
        self.subjects
            .iter()
            .map(|s| s.classroom_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
