// src/engine/statuses.rs

//! Lazily fetched status catalogs.

use std::future::Future;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::errors::{ApiaryError, Result};
use crate::remote::{ApiBackend, StatusCatalog};
use crate::types::StatusCode;

/// Caches the job and task status catalogs of one remote service.
///
/// Each catalog is fetched the first time it is needed and reused for the
/// lifetime of the resolver. A failed or empty fetch leaves the cache empty,
/// so the next access tries again. There is no retry or backoff inside.
#[derive(Debug, Default)]
pub struct StatusResolver {
    job: OnceCell<StatusCatalog>,
    task: OnceCell<StatusCatalog>,
}

impl StatusResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Job status catalog, fetched on first use.
    pub async fn job_catalog<B: ApiBackend + ?Sized>(&self, backend: &B) -> Result<&StatusCatalog> {
        self.job
            .get_or_try_init(|| fetch("jobs", backend.job_statuses()))
            .await
    }

    /// Task status catalog, fetched on first use.
    pub async fn task_catalog<B: ApiBackend + ?Sized>(&self, backend: &B) -> Result<&StatusCatalog> {
        self.task
            .get_or_try_init(|| fetch("tasks", backend.task_statuses()))
            .await
    }

    /// Code of the job status called `name`.
    pub async fn job_status<B: ApiBackend + ?Sized>(&self, backend: &B, name: &str) -> Result<StatusCode> {
        let catalog = self.job_catalog(backend).await?;
        lookup("jobs", catalog, name)
    }

    /// Code of the task status called `name`.
    pub async fn task_status<B: ApiBackend + ?Sized>(&self, backend: &B, name: &str) -> Result<StatusCode> {
        let catalog = self.task_catalog(backend).await?;
        lookup("tasks", catalog, name)
    }

    pub fn is_job_catalog_cached(&self) -> bool {
        self.job.initialized()
    }

    pub fn is_task_catalog_cached(&self) -> bool {
        self.task.initialized()
    }
}

async fn fetch<F>(kind: &'static str, request: F) -> Result<StatusCatalog>
where
    F: Future<Output = Result<StatusCatalog>>,
{
    let catalog = request.await.map_err(|err| {
        warn!(kind, error = %err, "status catalog fetch failed");
        ApiaryError::Request(format!("Could not fetch statuses for {kind} ({err})"))
    })?;

    if catalog.is_empty() {
        return Err(ApiaryError::Request(format!(
            "Could not fetch statuses for {kind} (empty response)"
        )));
    }

    debug!(kind, count = catalog.len(), "status catalog cached");
    Ok(catalog)
}

fn lookup(kind: &str, catalog: &StatusCatalog, name: &str) -> Result<StatusCode> {
    catalog.get(name).copied().ok_or_else(|| {
        ApiaryError::Request(format!("Status '{name}' is missing from the {kind} catalog"))
    })
}
