// src/remote/models.rs

//! Wire models exchanged with the jobs service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dag::{Job, Task};
use crate::types::{JobId, Metadata, RemoteTaskId, StatusCode};

/// Mapping of status name (`"WAITING"`, `"READY"`, ...) to its integer code.
pub type StatusCatalog = BTreeMap<String, StatusCode>;

/// Body of `POST /jobs/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCreate {
    pub name: String,
    /// Placeholder until the service knows about users.
    pub user_id: i64,
    pub status: StatusCode,
    pub pools: Vec<String>,
    pub priority: i64,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

impl JobCreate {
    pub fn from_job(job: &Job, status: StatusCode) -> Self {
        Self {
            name: job.name().to_string(),
            user_id: 0,
            status,
            pools: job.pools().to_vec(),
            priority: job.priority(),
            tags: job.tags().to_vec(),
            metadata: job.metadata().clone(),
        }
    }
}

/// Body of `PATCH /jobs/{id}`. Only the status is ever edited here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEdit {
    pub status: StatusCode,
}

/// One element of the `POST /jobs/{id}/tasks` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCreate {
    pub name: String,
    pub command: String,
    pub status: StatusCode,
    pub parents: Vec<RemoteTaskId>,
    pub tags: Vec<String>,
    pub metadata: Metadata,
}

impl TaskCreate {
    pub fn from_task(task: &Task, status: StatusCode, parents: Vec<RemoteTaskId>) -> Self {
        Self {
            name: task.name().to_string(),
            command: task.command().to_string(),
            status,
            parents,
            tags: task.tags().iter().cloned().collect(),
            metadata: task.metadata().clone(),
        }
    }
}

/// Job as returned by the service. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<StatusCode>,
}

/// Task as returned by the service. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: RemoteTaskId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parents: Vec<RemoteTaskId>,
}
