// src/dag/job.rs

//! Top-level submission unit.

use serde_json::Value;
use tracing::warn;

use crate::dag::flatten::flatten;
use crate::dag::graph::{TaskGraph, TaskId};
use crate::dag::task::Task;
use crate::errors::{ApiaryError, Result};
use crate::types::{DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY, Metadata};

/// A named batch of tasks submitted as one unit.
///
/// The job owns its [`TaskGraph`]; `roots` are the entry points of the DAG,
/// not the full set of reachable tasks.
#[derive(Debug, Clone)]
pub struct Job {
    name: String,
    pools: Vec<String>,
    priority: i64,
    tags: Vec<String>,
    metadata: Metadata,
    graph: TaskGraph,
    roots: Vec<TaskId>,
}

impl Job {
    pub fn builder(name: impl Into<String>) -> JobBuilder {
        JobBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pools(&self) -> &[String] {
        &self.pools
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Root tasks, in the order they were given.
    pub fn tasks(&self) -> &[TaskId] {
        &self.roots
    }

    /// Resolve a handle from this job's graph.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.graph.get(id)
    }

    /// Every task reachable from the roots, each exactly once, in creation
    /// order (see [`crate::dag::flatten`]).
    pub fn all_tasks(&self) -> Vec<TaskId> {
        flatten(&self.graph, &self.roots)
    }
}

/// Builder for [`Job`]; priority is validated in [`JobBuilder::build`].
#[derive(Debug, Clone)]
pub struct JobBuilder {
    name: String,
    pools: Vec<String>,
    priority: i64,
    tags: Vec<String>,
    metadata: Metadata,
    roots: Vec<TaskId>,
}

impl JobBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pools: Vec::new(),
            priority: DEFAULT_PRIORITY,
            tags: Vec::new(),
            metadata: Metadata::new(),
            roots: Vec::new(),
        }
    }

    pub fn pool(mut self, pool: impl Into<String>) -> Self {
        self.pools.push(pool.into());
        self
    }

    pub fn pools<I, S>(self, pools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        pools.into_iter().fold(self, |b, pool| b.pool(pool))
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |b, tag| b.tag(tag))
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Use `value` as metadata if it is a JSON object, otherwise keep the
    /// metadata empty.
    pub fn metadata_value(mut self, value: Value) -> Self {
        self.metadata = match value {
            Value::Object(map) => map,
            _ => Metadata::new(),
        };
        self
    }

    pub fn root(mut self, task: TaskId) -> Self {
        self.roots.push(task);
        self
    }

    pub fn roots<I>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = TaskId>,
    {
        self.roots.extend(tasks);
        self
    }

    /// Validate and assemble the job around `graph`.
    ///
    /// Root handles that were not issued by `graph` are dropped.
    pub fn build(self, graph: TaskGraph) -> Result<Job> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(ApiaryError::Validation(format!(
                "Priority must be in the range {MIN_PRIORITY} - {MAX_PRIORITY} (got {}).",
                self.priority
            )));
        }

        let roots: Vec<TaskId> = self
            .roots
            .into_iter()
            .filter(|id| {
                let known = graph.contains(*id);
                if !known {
                    warn!(job = %self.name, task = %id, "dropping root task from another graph");
                }
                known
            })
            .collect();

        Ok(Job {
            name: self.name,
            pools: self.pools,
            priority: self.priority,
            tags: self.tags,
            metadata: self.metadata,
            graph,
            roots,
        })
    }
}
