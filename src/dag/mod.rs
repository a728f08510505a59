// src/dag/mod.rs

//! Task graph model.
//!
//! - [`task`] holds the [`Task`] value type.
//! - [`graph`] is the arena that owns tasks and their parent → child edges.
//! - [`job`] wraps a graph and its root tasks into a submittable [`Job`].
//! - [`flatten`] linearizes a job's graph into a creation order.

pub mod flatten;
pub mod graph;
pub mod job;
pub mod task;

pub use flatten::flatten;
pub use graph::{TaskGraph, TaskId};
pub use job::{Job, JobBuilder};
pub use task::Task;
