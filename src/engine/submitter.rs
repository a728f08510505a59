// src/engine/submitter.rs

//! Submission orchestrator: one job creation followed by one task creation
//! per task in flatten order, with a compensating PATCH on failure.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::config::SubmitterConfig;
use crate::dag::{Job, TaskId};
use crate::engine::state::SubmissionState;
use crate::engine::statuses::StatusResolver;
use crate::errors::{ApiaryError, Result};
use crate::remote::{ApiBackend, HttpBackend, JobCreate, JobEdit, TaskCreate};
use crate::types::{JOB_STATUS_ERROR, JOB_STATUS_WAITING, JobId, RemoteTaskId, TASK_STATUS_READY};

/// Sends jobs to the remote service.
///
/// Owns its [`StatusResolver`], so status catalogs are fetched once per
/// submitter and reused by every later `submit`.
pub struct Submitter<B> {
    backend: B,
    statuses: StatusResolver,
}

impl<B> fmt::Debug for Submitter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submitter")
            .field("statuses", &self.statuses)
            .finish_non_exhaustive()
    }
}

impl Submitter<HttpBackend> {
    /// Submitter talking HTTP to the configured host.
    pub fn from_config(cfg: &SubmitterConfig) -> Result<Self> {
        Ok(Self::new(HttpBackend::new(&cfg.server)?))
    }
}

impl<B: ApiBackend> Submitter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            statuses: StatusResolver::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn statuses(&self) -> &StatusResolver {
        &self.statuses
    }

    /// Submit `job` and return the remote job id.
    ///
    /// Every remote call is awaited before the next one is issued. On failure
    /// the error is always [`ApiaryError::SubmitFailed`], and the job either
    /// was never created or has been marked `ERROR` remotely (unless that
    /// PATCH failed too, which is what the error then reports). Tasks created
    /// before the failure are left on the service.
    pub async fn submit(&self, job: &Job) -> Result<JobId> {
        let mut state = SubmissionState::default();
        self.submit_with_state(job, &mut state).await
    }

    /// Same as [`Submitter::submit`], recording progress in `state`.
    ///
    /// `state` must be [`SubmissionState::Unsubmitted`]; anything else fails
    /// before any remote call.
    pub async fn submit_with_state(&self, job: &Job, state: &mut SubmissionState) -> Result<JobId> {
        if *state != SubmissionState::Unsubmitted {
            let err = ApiaryError::InvalidTransition {
                from: state.to_string(),
                to: "JobCreated".to_string(),
            };
            return Err(ApiaryError::submit(format!("Submission already started: {err}"), err));
        }

        let job_status = self
            .statuses
            .job_status(&self.backend, JOB_STATUS_WAITING)
            .await
            .map_err(|err| ApiaryError::submit(format!("Fetching jobs statuses failed ({err})"), err))?;

        let body = JobCreate::from_job(job, job_status);
        let record = self
            .backend
            .create_job(&body)
            .await
            .map_err(|err| ApiaryError::submit(format!("Job creation failed: {err}"), err))?;
        let job_id = record.id;
        state.job_created(job_id.clone()).map_err(state_error)?;
        info!(job = %job.name(), %job_id, "job created");

        let task_status = match self.statuses.task_status(&self.backend, TASK_STATUS_READY).await {
            Ok(code) => code,
            Err(err) => {
                let err = ApiaryError::submit(format!("Fetching tasks statuses failed ({err})"), err);
                return Err(self.abort(state, err).await);
            }
        };

        let order = job.all_tasks();
        debug!(%job_id, count = order.len(), "creating tasks in flatten order");

        let mut created: HashMap<TaskId, RemoteTaskId> = HashMap::with_capacity(order.len());
        for id in order {
            let Some(task) = job.task(id) else {
                continue;
            };

            let parents = resolve_parents(job, id, &created);
            let body = [TaskCreate::from_task(task, task_status, parents)];

            let remote_id = match self.create_task(&job_id, &body).await {
                Ok(remote_id) => remote_id,
                Err(err) => {
                    let err = ApiaryError::submit(format!("Task creation failed: {err}"), err);
                    return Err(self.abort(state, err).await);
                }
            };

            debug!(%job_id, task = %task.name(), %remote_id, "task created");
            state.task_created().map_err(state_error)?;
            created.insert(id, remote_id);
        }

        state.finish().map_err(state_error)?;
        info!(%job_id, tasks = state.tasks_created(), "job submitted");
        Ok(job_id)
    }

    async fn create_task(&self, job_id: &str, body: &[TaskCreate]) -> Result<RemoteTaskId> {
        let records = self.backend.create_tasks(job_id, body).await?;
        records
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or_else(|| ApiaryError::Request("task creation returned no record".to_string()))
    }

    /// Run the compensating PATCH if a job exists, and return the error the
    /// caller should surface.
    async fn abort(&self, state: &mut SubmissionState, cause: ApiaryError) -> ApiaryError {
        let Some(job_id) = state.compensation_target().map(str::to_string) else {
            return cause;
        };

        match self.invalidate_job(&job_id).await {
            Ok(()) => {
                let recorded = state.rolled_back(true);
                debug_assert!(recorded.is_ok(), "compensation target implies a rollback transition");
                info!(%job_id, "job invalidated after failed submission");
                cause
            }
            Err(rollback) => {
                let recorded = state.rolled_back(false);
                debug_assert!(recorded.is_ok(), "compensation target implies a rollback transition");
                error!(%job_id, error = %rollback, cause = %cause, "job invalidation failed");
                ApiaryError::submit(format!("Job invalidation failed: {rollback}"), cause)
            }
        }
    }

    /// Put the job in its `ERROR` status. Single attempt.
    async fn invalidate_job(&self, job_id: &str) -> Result<()> {
        let status = self
            .statuses
            .job_status(&self.backend, JOB_STATUS_ERROR)
            .await?;
        let edit = JobEdit { status };
        self.backend.patch_job(job_id, &edit).await?;
        Ok(())
    }
}

fn state_error(err: ApiaryError) -> ApiaryError {
    ApiaryError::submit(format!("Submission state error: {err}"), err)
}

/// Remote ids of the parents of `task`.
///
/// Only the job's root tasks are scanned for parents. A parent that has no
/// remote id yet is skipped with a warning; the edge is simply not sent.
fn resolve_parents(
    job: &Job,
    task: TaskId,
    created: &HashMap<TaskId, RemoteTaskId>,
) -> Vec<RemoteTaskId> {
    let mut parents = Vec::new();
    let mut missing = 0usize;

    for root in job.tasks() {
        if !job.graph().children_of(*root).contains(&task) {
            continue;
        }
        match created.get(root) {
            Some(remote_id) => parents.push(remote_id.clone()),
            None => missing += 1,
        }
    }

    if missing > 0 {
        warn!(
            task = %task,
            missing,
            "some parent tasks are not available online; skipping linking to them"
        );
    }

    parents
}
