#![allow(dead_code)]

use apiary_submitter::dag::{Job, Task, TaskGraph, TaskId};

/// Builder for a [`TaskGraph`] where tasks are referred to by name.
///
/// ```ignore
/// let (graph, ids) = GraphBuilder::new()
///     .task("A")
///     .task("B")
///     .edge("A", "B")
///     .build();
/// ```
pub struct GraphBuilder {
    graph: TaskGraph,
    ids: Vec<(String, TaskId)>,
}

/// Name → handle lookup returned by [`GraphBuilder::build`].
#[derive(Debug, Clone)]
pub struct Ids(Vec<(String, TaskId)>);

impl Ids {
    pub fn get(&self, name: &str) -> TaskId {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
            .unwrap_or_else(|| panic!("unknown task '{name}'"))
    }

    /// Handles for several names, in the given order.
    pub fn many(&self, names: &[&str]) -> Vec<TaskId> {
        names.iter().map(|n| self.get(n)).collect()
    }

    /// Reverse lookup, for readable assertions.
    pub fn name_of(&self, id: TaskId) -> &str {
        self.0
            .iter()
            .find(|(_, i)| *i == id)
            .map(|(n, _)| n.as_str())
            .unwrap_or("<unknown>")
    }

    pub fn names(&self, ids: &[TaskId]) -> Vec<String> {
        ids.iter().map(|id| self.name_of(*id).to_string()).collect()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: TaskGraph::new(),
            ids: Vec::new(),
        }
    }

    /// Add a task named `name` running `echo <name>`.
    pub fn task(self, name: &str) -> Self {
        let task = Task::new(format!("echo {name}")).with_name(name);
        self.with_task(name, task)
    }

    pub fn with_task(mut self, name: &str, task: Task) -> Self {
        let id = self.graph.add_task(task);
        self.ids.push((name.to_string(), id));
        self
    }

    /// Make `child` a child of `parent`.
    pub fn edge(mut self, parent: &str, child: &str) -> Self {
        let ids = Ids(self.ids.clone());
        self.graph
            .add_child(ids.get(parent), ids.get(child))
            .expect("builder edges only use known tasks");
        self
    }

    pub fn build(self) -> (TaskGraph, Ids) {
        (self.graph, Ids(self.ids))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `A -> [B, C]`, `B -> D`, `C -> D`.
pub fn diamond() -> (TaskGraph, Ids) {
    GraphBuilder::new()
        .task("A")
        .task("B")
        .task("C")
        .task("D")
        .edge("A", "B")
        .edge("A", "C")
        .edge("B", "D")
        .edge("C", "D")
        .build()
}

/// `A -> B -> C -> ...` over the given names.
pub fn chain(names: &[&str]) -> (TaskGraph, Ids) {
    let mut builder = GraphBuilder::new();
    for name in names {
        builder = builder.task(name);
    }
    for pair in names.windows(2) {
        builder = builder.edge(pair[0], pair[1]);
    }
    builder.build()
}

/// One root with `count` leaf children named `leaf0`, `leaf1`, ...
pub fn fan_out(root: &str, count: usize) -> (TaskGraph, Ids) {
    let mut builder = GraphBuilder::new().task(root);
    for i in 0..count {
        let leaf = format!("leaf{i}");
        builder = builder.task(&leaf).edge(root, &leaf);
    }
    builder.build()
}

/// Job named `name` over `graph` with the given roots and default settings.
pub fn job_with_roots(name: &str, graph: TaskGraph, roots: Vec<TaskId>) -> Job {
    Job::builder(name)
        .roots(roots)
        .build(graph)
        .expect("default priority is valid")
}
