//! Shared constants and small aliases used across the crate.

use serde_json::{Map, Value};

/// Lowest priority a job may be submitted with.
pub const MIN_PRIORITY: i64 = 0;
/// Highest priority a job may be submitted with.
pub const MAX_PRIORITY: i64 = 1000;
/// Priority used when the caller does not set one.
pub const DEFAULT_PRIORITY: i64 = 500;

/// Job status a freshly created job is put in.
pub const JOB_STATUS_WAITING: &str = "WAITING";
/// Job status used to invalidate a partially submitted job.
pub const JOB_STATUS_ERROR: &str = "ERROR";
/// Status given to every created task.
pub const TASK_STATUS_READY: &str = "READY";

/// Free-form metadata attached to jobs and tasks.
pub type Metadata = Map<String, Value>;

/// Identifier the remote service assigned to a job.
pub type JobId = String;

/// Identifier the remote service assigned to a task.
pub type RemoteTaskId = String;

/// Integer code of a lifecycle status, as understood by the remote service.
pub type StatusCode = i64;
