//! Job applications: a student applies once per posting; the owning company
//! later accepts or rejects. The applied set feeds recommendation exclusion
//! and accepted applications feed placement statistics.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Companies may only move an application to `Accepted` or `Rejected`.
    pub fn parse_decision(raw: &str) -> Result<Self, AppError> {
        match raw.trim() {
            "Accepted" => Ok(ApplicationStatus::Accepted),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(AppError::Validation(format!(
                "status must be 'Accepted' or 'Rejected', got '{other}'"
            ))),
        }
    }
}
