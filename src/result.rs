use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ERROR_MSG: &str = "ERROR_MSG";
pub const IMAGE_URI: &str = "IMAGE_URI";

/// Exit status for a retryable attempt (`EX_TEMPFAIL` from sysexits.h).
pub const EXIT_RETRY: i32 = 75;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobResult {
    Success { resource_location: String },
    Retry,
    Failure { reason: String },
}

impl JobResult {
    pub fn success(resource_location: impl Into<String>) -> Self {
        JobResult::Success {
            resource_location: resource_location.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        JobResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, JobResult::Retry)
    }

    /// The key/value payload handed back to the scheduler.
    pub fn output_data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        match self {
            JobResult::Success { resource_location } => {
                data.insert(IMAGE_URI.to_string(), resource_location.clone());
            }
            JobResult::Failure { reason } => {
                data.insert(ERROR_MSG.to_string(), reason.clone());
            }
            JobResult::Retry => {}
        }
        data
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            JobResult::Success { .. } => 0,
            JobResult::Retry => EXIT_RETRY,
            JobResult::Failure { .. } => 1,
        }
    }
}
