#![allow(dead_code)]

use std::error::Error;

use apiary_submitter::dag::{Job, Task, TaskGraph, TaskId};
use serde_json::json;

pub type TestResult = Result<(), Box<dyn Error>>;

/// Handles of [`demo_job`]'s tasks.
pub struct DemoTasks {
    pub parent: TaskId,
    pub inter: TaskId,
    pub child: TaskId,
}

/// `parent -> [inter, child]`, `inter -> child`, with a full set of job
/// attributes.
pub fn demo_job() -> (Job, DemoTasks) {
    let mut graph = TaskGraph::new();
    let parent = graph.add_task(Task::new("echo 1"));
    let inter = graph.add_task(Task::new("echo 2"));
    let child = graph.add_task(Task::new("echo 3").with_tag("leaf"));
    graph.add_child(parent, inter).unwrap();
    graph.add_child(parent, child).unwrap();
    graph.add_child(inter, child).unwrap();

    let job = Job::builder("Submitter Tester")
        .priority(750)
        .root(parent)
        .pool("demo")
        .tag("tests")
        .metadata_value(json!({"hello": "world"}))
        .build(graph)
        .unwrap();

    (
        job,
        DemoTasks {
            parent,
            inter,
            child,
        },
    )
}
