// src/dag/flatten.rs

//! Linear creation order over the tasks reachable from a job's roots.
//!
//! The order is built in three passes:
//!
//! 1. the roots are stably sorted by ascending direct-child count;
//! 2. each root, taken in the caller's original order, is expanded in place:
//!    its descendants (pre-order, repeats included) are inserted right after
//!    the first occurrence of the root in the working list;
//! 3. duplicates are removed keeping the *last* occurrence of each task.
//!
//! A task reachable through several paths therefore lands after the last
//! path that reaches it. It follows at least one occurrence of a parent, not
//! necessarily every parent.

use std::collections::HashSet;

use crate::dag::graph::{TaskGraph, TaskId};

/// Duplicate-free creation order for every task reachable from `roots`.
pub fn flatten(graph: &TaskGraph, roots: &[TaskId]) -> Vec<TaskId> {
    let mut order = roots.to_vec();
    order.sort_by_key(|id| graph.child_count_key(*id));

    for root in roots {
        let Some(mut cursor) = order.iter().position(|id| id == root) else {
            continue;
        };

        for descendant in descendants(graph, *root) {
            cursor += 1;
            order.insert(cursor, descendant);
        }
    }

    keep_last_occurrences(order)
}

/// Pre-order walk over the children of `root`, excluding `root` itself.
///
/// Tasks reachable through several paths are yielded once per path.
fn descendants(graph: &TaskGraph, root: TaskId) -> Vec<TaskId> {
    let mut out = Vec::new();
    let mut stack: Vec<TaskId> = graph.children_of(root).iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(graph.children_of(id).iter().rev().copied());
    }

    out
}

fn keep_last_occurrences(order: Vec<TaskId>) -> Vec<TaskId> {
    let mut seen = HashSet::with_capacity(order.len());
    let mut kept: Vec<TaskId> = order
        .into_iter()
        .rev()
        .filter(|id| seen.insert(*id))
        .collect();
    kept.reverse();
    kept
}
