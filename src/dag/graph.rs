// src/dag/graph.rs

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::dag::task::Task;
use crate::errors::{ApiaryError, Result};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a task stored in a [`TaskGraph`].
///
/// The handle remembers which graph issued it, so a handle from another
/// graph is rejected instead of silently pointing at an unrelated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    graph: u64,
    index: usize,
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}@graph{}", self.index, self.graph)
    }
}

/// Arena of tasks plus their parent → child edges.
///
/// A task may be the child of several parents (DAG, not a tree). Cycles are
/// neither detected nor rejected; callers are expected to only wire acyclic
/// graphs.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    id: u64,
    tasks: Vec<Task>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            tasks: Vec::new(),
        }
    }

    /// Move a task into the graph and return its handle.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let id = TaskId {
            graph: self.id,
            index: self.tasks.len(),
        };
        self.tasks.push(task);
        id
    }

    /// Whether `id` was issued by this graph.
    pub fn contains(&self, id: TaskId) -> bool {
        id.graph == self.id && id.index < self.tasks.len()
    }

    /// Append `child` to the children of `parent`.
    ///
    /// Fails with [`ApiaryError::NotATask`] if either handle does not belong
    /// to this graph; nothing is modified in that case.
    pub fn add_child(&mut self, parent: TaskId, child: TaskId) -> Result<()> {
        if !self.contains(child) {
            return Err(ApiaryError::NotATask(child));
        }
        if !self.contains(parent) {
            return Err(ApiaryError::NotATask(parent));
        }

        debug!(%parent, %child, "linking child task");
        self.tasks[parent.index].children.push(child);
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        if self.contains(id) {
            self.tasks.get(id.index)
        } else {
            None
        }
    }

    /// Direct children of `id` (empty for unknown handles).
    pub fn children_of(&self, id: TaskId) -> &[TaskId] {
        self.get(id).map(Task::children).unwrap_or(&[])
    }

    pub fn has_children(&self, id: TaskId) -> bool {
        !self.children_of(id).is_empty()
    }

    /// Sort key used to pre-order root tasks: ascending number of direct
    /// children.
    pub fn child_count_key(&self, id: TaskId) -> usize {
        self.children_of(id).len()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::new()
    }
}
