//! Launch/poll bindings shared by long-running routes.

use serde::{Deserialize, Serialize};

/// Argument of every `.../check` poll route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollArg {
    pub async_job_id: String,
}

impl PollArg {
    #[must_use]
    pub fn new(async_job_id: impl Into<String>) -> Self {
        Self {
            async_job_id: async_job_id.into(),
        }
    }
}

/// Result of a launch route: either finished synchronously with `T`, or a
/// job identifier to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum LaunchResult<T> {
    AsyncJobId { async_job_id: String },
    Complete(T),
    #[serde(other)]
    Other,
}

impl<T> LaunchResult<T> {
    /// The job to poll, when the launch did not complete synchronously.
    #[must_use]
    pub fn job_id(&self) -> Option<&str> {
        match self {
            Self::AsyncJobId { async_job_id } => Some(async_job_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum PollError {
    InvalidAsyncJobId,
    InternalError,
    #[serde(other)]
    Other,
}
