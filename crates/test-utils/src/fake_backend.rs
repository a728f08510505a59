use std::sync::{Arc, Mutex, MutexGuard};

use apiary_submitter::errors::{ApiaryError, Result};
use apiary_submitter::remote::{
    ApiBackend, BackendFuture, JobCreate, JobEdit, JobRecord, StatusCatalog, TaskCreate,
    TaskRecord,
};

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    JobStatuses,
    TaskStatuses,
    CreateJob(JobCreate),
    PatchJob { job_id: String, status: i64 },
    CreateTasks { job_id: String, tasks: Vec<TaskCreate> },
}

/// Which calls should fail.
#[derive(Debug, Clone, Default)]
struct Failures {
    job_statuses: bool,
    task_statuses: bool,
    create_job: bool,
    patch_job: bool,
    /// Zero-based index of the `create_tasks` call that fails.
    create_tasks_at: Option<usize>,
}

#[derive(Debug)]
struct FakeState {
    calls: Vec<Call>,
    job_catalog: StatusCatalog,
    task_catalog: StatusCatalog,
    failures: Failures,
    next_job: u64,
    next_task: u64,
    create_tasks_calls: usize,
    created: Vec<(String, TaskCreate)>,
}

/// A fake jobs service that:
/// - records every call it receives
/// - hands out sequential ids (`job-1`, `task-1`, `task-2`, ...)
/// - fails the calls it was told to fail with a 503.
///
/// Clones share the same state, so a test can keep a handle while the
/// submitter owns another.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

/// Catalog matching the service's job statuses.
pub fn job_catalog() -> StatusCatalog {
    [("WAITING", 1), ("IN_PROGRESS", 2), ("DONE", 3), ("ERROR", 4), ("PAUSED", 5)]
        .into_iter()
        .map(|(name, code)| (name.to_string(), code))
        .collect()
}

/// Catalog matching the service's task statuses.
pub fn task_catalog() -> StatusCatalog {
    [("READY", 1), ("IN_PROGRESS", 2), ("DONE", 3), ("ERROR", 4), ("PAUSED", 5)]
        .into_iter()
        .map(|(name, code)| (name.to_string(), code))
        .collect()
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                job_catalog: job_catalog(),
                task_catalog: task_catalog(),
                failures: Failures::default(),
                next_job: 0,
                next_task: 0,
                create_tasks_calls: 0,
                created: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn with_job_catalog(self, catalog: StatusCatalog) -> Self {
        self.lock().job_catalog = catalog;
        self
    }

    pub fn with_task_catalog(self, catalog: StatusCatalog) -> Self {
        self.lock().task_catalog = catalog;
        self
    }

    pub fn fail_job_statuses(self, fail: bool) -> Self {
        self.lock().failures.job_statuses = fail;
        self
    }

    pub fn fail_task_statuses(self, fail: bool) -> Self {
        self.lock().failures.task_statuses = fail;
        self
    }

    pub fn fail_create_job(self, fail: bool) -> Self {
        self.lock().failures.create_job = fail;
        self
    }

    pub fn fail_patch_job(self, fail: bool) -> Self {
        self.lock().failures.patch_job = fail;
        self
    }

    /// Fail the `index`-th (zero-based) task creation call.
    pub fn fail_task_creation_at(self, index: usize) -> Self {
        self.lock().failures.create_tasks_at = Some(index);
        self
    }

    /// Clear every injected failure.
    pub fn heal(&self) {
        self.lock().failures = Failures::default();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn patch_count(&self) -> usize {
        self.count(|c| matches!(c, Call::PatchJob { .. }))
    }

    /// Bodies of successfully created tasks, with the id each one received.
    pub fn created_tasks(&self) -> Vec<(String, TaskCreate)> {
        self.lock().created.clone()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unavailable(what: &str) -> ApiaryError {
    ApiaryError::Remote {
        status: 503,
        body: format!("fake backend: {what} unavailable"),
    }
}

fn ready<'a, T: Send + 'a>(result: Result<T>) -> BackendFuture<'a, T> {
    Box::pin(async move { result })
}

impl ApiBackend for FakeBackend {
    fn job_statuses(&self) -> BackendFuture<'_, StatusCatalog> {
        let mut state = self.lock();
        state.calls.push(Call::JobStatuses);
        let result = if state.failures.job_statuses {
            Err(unavailable("job statuses"))
        } else {
            Ok(state.job_catalog.clone())
        };
        ready(result)
    }

    fn task_statuses(&self) -> BackendFuture<'_, StatusCatalog> {
        let mut state = self.lock();
        state.calls.push(Call::TaskStatuses);
        let result = if state.failures.task_statuses {
            Err(unavailable("task statuses"))
        } else {
            Ok(state.task_catalog.clone())
        };
        ready(result)
    }

    fn create_job<'a>(&'a self, job: &'a JobCreate) -> BackendFuture<'a, JobRecord> {
        let mut state = self.lock();
        state.calls.push(Call::CreateJob(job.clone()));
        let result = if state.failures.create_job {
            Err(unavailable("job creation"))
        } else {
            state.next_job += 1;
            Ok(JobRecord {
                id: format!("job-{}", state.next_job),
                name: Some(job.name.clone()),
                status: Some(job.status),
            })
        };
        ready(result)
    }

    fn patch_job<'a>(&'a self, job_id: &'a str, edit: &'a JobEdit) -> BackendFuture<'a, JobRecord> {
        let mut state = self.lock();
        state.calls.push(Call::PatchJob {
            job_id: job_id.to_string(),
            status: edit.status,
        });
        let result = if state.failures.patch_job {
            Err(unavailable("job edition"))
        } else {
            Ok(JobRecord {
                id: job_id.to_string(),
                name: None,
                status: Some(edit.status),
            })
        };
        ready(result)
    }

    fn create_tasks<'a>(
        &'a self,
        job_id: &'a str,
        tasks: &'a [TaskCreate],
    ) -> BackendFuture<'a, Vec<TaskRecord>> {
        let mut state = self.lock();
        state.calls.push(Call::CreateTasks {
            job_id: job_id.to_string(),
            tasks: tasks.to_vec(),
        });

        let index = state.create_tasks_calls;
        state.create_tasks_calls += 1;

        let result = if state.failures.create_tasks_at == Some(index) {
            Err(unavailable("task creation"))
        } else {
            let mut records = Vec::with_capacity(tasks.len());
            for task in tasks {
                state.next_task += 1;
                let id = format!("task-{}", state.next_task);
                state.created.push((id.clone(), task.clone()));
                records.push(TaskRecord {
                    id,
                    name: Some(task.name.clone()),
                    parents: task.parents.clone(),
                });
            }
            Ok(records)
        };
        ready(result)
    }
}
