//! Per-user submission quotas.
//!
//! Limits live in the `configurations` table as plain strings and are
//! parsed here. A missing or malformed limit is an operator mistake,
//! not a user error, and surfaces as `Internal`.

use crate::error::CoreError;

/// Configuration key for the total number of projects a user may hold.
pub const MAX_PROJECTS_TOTAL_KEY: &str = "max_projects_total";
/// Configuration key for the number of projects a user may have in
/// review at the same time.
pub const MAX_PROJECTS_UNDER_REVIEW_KEY: &str = "max_projects_under_review";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectQuota {
    pub max_total: i64,
    pub max_under_review: i64,
}

impl ProjectQuota {
    /// Build a quota from raw configuration values as read from the
    /// database.
    pub fn from_config(
        max_total: Option<String>,
        max_under_review: Option<String>,
    ) -> Result<ProjectQuota, CoreError> {
        let max_total = parse_limit(MAX_PROJECTS_TOTAL_KEY, max_total)?;
        let max_under_review = parse_limit(MAX_PROJECTS_UNDER_REVIEW_KEY, max_under_review)?;
        Ok(ProjectQuota {
            max_total,
            max_under_review,
        })
    }

    /// Check whether a user with the given project counts may submit
    /// another project.
    pub fn check_submission(&self, counts: ProjectCounts) -> Result<(), CoreError> {
        if counts.total >= self.max_total {
            return Err(CoreError::QuotaExceeded(format!(
                "you already hold the maximum of {} projects",
                self.max_total
            )));
        }
        if counts.under_review >= self.max_under_review {
            return Err(CoreError::QuotaExceeded(format!(
                "you already have {} projects awaiting review, please wait for feedback",
                self.max_under_review
            )));
        }
        Ok(())
    }
}

/// Current project counts for one user.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectCounts {
    pub total: i64,
    pub under_review: i64,
}

fn parse_limit(key: &str, value: Option<String>) -> Result<i64, CoreError> {
    let value = value.ok_or_else(|| {
        CoreError::Internal(format!("project limit '{key}' is not configured"))
    })?;
    value.trim().parse::<i64>().map_err(|_| {
        CoreError::Internal(format!(
            "project limit '{key}' is not a number: '{value}'"
        ))
    })
}
