// src/dag/task.rs

//! A single unit of work and its outgoing dependency edges.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::dag::graph::TaskId;
use crate::types::{Metadata, StatusCode};

/// A unit of work (a shell command) plus the tasks that depend on it.
///
/// Tasks are created standalone and then moved into a [`TaskGraph`]
/// (see [`crate::dag::TaskGraph::add_task`]), which hands out the [`TaskId`]
/// used to wire children.
///
/// [`TaskGraph`]: crate::dag::TaskGraph
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    name: String,
    command: String,
    status: StatusCode,
    tags: BTreeSet<String>,
    metadata: Metadata,
    pub(crate) children: Vec<TaskId>,
}

impl Task {
    /// New task running `command`. The name defaults to the command.
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            name: command.clone(),
            command,
            status: 0,
            tags: BTreeSet::new(),
            metadata: Metadata::new(),
            children: Vec::new(),
        }
    }

    /// Set a display name. An empty name keeps the command as the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a tag. Duplicates collapse.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tags.into_iter().fold(self, |task, tag| task.with_tag(tag))
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Insert a single metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Direct children, in the order they were added.
    pub fn children(&self) -> &[TaskId] {
        &self.children
    }

    /// `true` if at least one child was added.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
