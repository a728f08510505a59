// src/engine/state.rs

//! Submission lifecycle as an explicit state machine.
//!
//! ```text
//! Unsubmitted ──► JobCreated ──► CreatingTasks ──► Submitted
//!                     │               │
//!                     └──── failure ──┴──► RolledBack | RollbackFailed
//! ```
//!
//! A failure before the job exists leaves the state at `Unsubmitted`: there
//! is nothing remote to compensate. After that, the only compensating action
//! is one PATCH putting the job in its `ERROR` status. Tasks that were already
//! created stay on the service.

use std::fmt;

use crate::errors::{ApiaryError, Result};
use crate::types::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing exists remotely yet.
    Unsubmitted,
    /// The job exists remotely; no task creation attempted yet.
    JobCreated { job_id: JobId },
    /// Tasks are being created; `created` of them succeeded so far.
    CreatingTasks { job_id: JobId, created: usize },
    /// Every task was created.
    Submitted { job_id: JobId },
    /// A failure happened and the job was marked `ERROR`.
    RolledBack { job_id: JobId },
    /// A failure happened and marking the job `ERROR` failed too.
    RollbackFailed { job_id: JobId },
}

impl SubmissionState {
    fn label(&self) -> &'static str {
        match self {
            SubmissionState::Unsubmitted => "Unsubmitted",
            SubmissionState::JobCreated { .. } => "JobCreated",
            SubmissionState::CreatingTasks { .. } => "CreatingTasks",
            SubmissionState::Submitted { .. } => "Submitted",
            SubmissionState::RolledBack { .. } => "RolledBack",
            SubmissionState::RollbackFailed { .. } => "RollbackFailed",
        }
    }

    fn invalid(&self, to: &str) -> ApiaryError {
        ApiaryError::InvalidTransition {
            from: self.label().to_string(),
            to: to.to_string(),
        }
    }

    /// Remote job id, once the job exists.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            SubmissionState::Unsubmitted => None,
            SubmissionState::JobCreated { job_id }
            | SubmissionState::CreatingTasks { job_id, .. }
            | SubmissionState::Submitted { job_id }
            | SubmissionState::RolledBack { job_id }
            | SubmissionState::RollbackFailed { job_id } => Some(job_id),
        }
    }

    /// Job that must be invalidated if the submission fails now, if any.
    pub fn compensation_target(&self) -> Option<&str> {
        match self {
            SubmissionState::JobCreated { job_id }
            | SubmissionState::CreatingTasks { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Submitted { .. }
                | SubmissionState::RolledBack { .. }
                | SubmissionState::RollbackFailed { .. }
        )
    }

    pub fn job_created(&mut self, job_id: JobId) -> Result<()> {
        match self {
            SubmissionState::Unsubmitted => {
                *self = SubmissionState::JobCreated { job_id };
                Ok(())
            }
            _ => Err(self.invalid("JobCreated")),
        }
    }

    /// Record one more successfully created task.
    pub fn task_created(&mut self) -> Result<()> {
        match self {
            SubmissionState::JobCreated { job_id } => {
                *self = SubmissionState::CreatingTasks {
                    job_id: std::mem::take(job_id),
                    created: 1,
                };
                Ok(())
            }
            SubmissionState::CreatingTasks { created, .. } => {
                *created += 1;
                Ok(())
            }
            _ => Err(self.invalid("CreatingTasks")),
        }
    }

    /// Number of tasks created so far.
    pub fn tasks_created(&self) -> usize {
        match self {
            SubmissionState::CreatingTasks { created, .. } => *created,
            _ => 0,
        }
    }

    pub fn finish(&mut self) -> Result<()> {
        match self {
            SubmissionState::JobCreated { job_id }
            | SubmissionState::CreatingTasks { job_id, .. } => {
                *self = SubmissionState::Submitted {
                    job_id: std::mem::take(job_id),
                };
                Ok(())
            }
            _ => Err(self.invalid("Submitted")),
        }
    }

    /// Record the outcome of the compensating PATCH.
    pub fn rolled_back(&mut self, succeeded: bool) -> Result<()> {
        let Some(job_id) = self.compensation_target().map(str::to_string) else {
            let to = if succeeded { "RolledBack" } else { "RollbackFailed" };
            return Err(self.invalid(to));
        };

        *self = if succeeded {
            SubmissionState::RolledBack { job_id }
        } else {
            SubmissionState::RollbackFailed { job_id }
        };
        Ok(())
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Unsubmitted
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.job_id() {
            Some(job_id) => write!(f, "{}({job_id})", self.label()),
            None => f.write_str(self.label()),
        }
    }
}
