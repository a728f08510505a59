// src/remote/backend.rs

//! Pluggable remote backend abstraction.
//!
//! The submitter and the status resolver talk to an `ApiBackend` instead of
//! an HTTP client directly. Production code uses [`HttpBackend`]; tests swap
//! in a fake that records calls and injects failures.
//!
//! [`HttpBackend`]: crate::remote::HttpBackend

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::remote::models::{JobCreate, JobEdit, JobRecord, StatusCatalog, TaskCreate, TaskRecord};

/// Boxed future returned by backend calls.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The five remote calls a submission needs.
pub trait ApiBackend: Send + Sync {
    /// `GET /status/jobs`.
    fn job_statuses(&self) -> BackendFuture<'_, StatusCatalog>;

    /// `GET /status/tasks`.
    fn task_statuses(&self) -> BackendFuture<'_, StatusCatalog>;

    /// `POST /jobs/`.
    fn create_job<'a>(&'a self, job: &'a JobCreate) -> BackendFuture<'a, JobRecord>;

    /// `PATCH /jobs/{id}`.
    fn patch_job<'a>(&'a self, job_id: &'a str, edit: &'a JobEdit) -> BackendFuture<'a, JobRecord>;

    /// `POST /jobs/{id}/tasks`. Records come back in input order.
    fn create_tasks<'a>(
        &'a self,
        job_id: &'a str,
        tasks: &'a [TaskCreate],
    ) -> BackendFuture<'a, Vec<TaskRecord>>;
}
