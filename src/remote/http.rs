// src/remote/http.rs

//! `reqwest`-based backend talking to the jobs service over REST.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::ServerConfig;
use crate::errors::{ApiaryError, Result};
use crate::remote::backend::{ApiBackend, BackendFuture};
use crate::remote::models::{JobCreate, JobEdit, JobRecord, StatusCatalog, TaskCreate, TaskRecord};

/// Production backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    host: String,
}

impl HttpBackend {
    /// Build a client for the given server section.
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .connect_timeout(Duration::from_secs(server.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            host: server.host.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    async fn get_catalog(&self, path: &str) -> Result<StatusCatalog> {
        let url = self.url(path);
        debug!(%url, "fetching status catalog");
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

/// Turn non-2xx responses into [`ApiaryError::Remote`], decode the rest.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiaryError::Remote {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await?;
    trace!(len = bytes.len(), "decoding response body");
    Ok(serde_json::from_slice(&bytes)?)
}

impl ApiBackend for HttpBackend {
    fn job_statuses(&self) -> BackendFuture<'_, StatusCatalog> {
        Box::pin(self.get_catalog("/status/jobs"))
    }

    fn task_statuses(&self) -> BackendFuture<'_, StatusCatalog> {
        Box::pin(self.get_catalog("/status/tasks"))
    }

    fn create_job<'a>(&'a self, job: &'a JobCreate) -> BackendFuture<'a, JobRecord> {
        Box::pin(async move {
            let url = self.url("/jobs/");
            debug!(%url, job = %job.name, "creating job");
            let response = self.client.post(&url).json(job).send().await?;
            decode(response).await
        })
    }

    fn patch_job<'a>(&'a self, job_id: &'a str, edit: &'a JobEdit) -> BackendFuture<'a, JobRecord> {
        Box::pin(async move {
            let url = self.url(&format!("/jobs/{job_id}"));
            debug!(%url, status = edit.status, "patching job");
            let response = self.client.patch(&url).json(edit).send().await?;
            decode(response).await
        })
    }

    fn create_tasks<'a>(
        &'a self,
        job_id: &'a str,
        tasks: &'a [TaskCreate],
    ) -> BackendFuture<'a, Vec<TaskRecord>> {
        Box::pin(async move {
            let url = self.url(&format!("/jobs/{job_id}/tasks"));
            debug!(%url, count = tasks.len(), "creating tasks");
            let response = self.client.post(&url).json(tasks).send().await?;
            decode(response).await
        })
    }
}
