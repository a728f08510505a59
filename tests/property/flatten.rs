// tests/property/flatten.rs

use std::collections::{HashMap, HashSet};

use apiary_submitter::dag::{Task, TaskGraph, TaskId, flatten};
use proptest::prelude::*;

/// A random acyclic graph plus its parentless tasks as roots.
///
/// Acyclicity comes from only allowing edges from a lower to a higher index.
#[derive(Debug)]
struct RandomDag {
    graph: TaskGraph,
    ids: Vec<TaskId>,
    parents: HashMap<TaskId, Vec<TaskId>>,
    roots: Vec<TaskId>,
}

fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = RandomDag> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let edges = proptest::collection::vec(any::<bool>(), num_tasks * num_tasks);
        (edges, any::<prop::sample::Index>()).prop_map(move |(edges, rotation)| {
            let mut graph = TaskGraph::new();
            let ids: Vec<TaskId> = (0..num_tasks)
                .map(|i| graph.add_task(Task::new(format!("echo {i}"))))
                .collect();

            let mut parents: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
            for parent in 0..num_tasks {
                for child in (parent + 1)..num_tasks {
                    if edges[parent * num_tasks + child] {
                        graph.add_child(ids[parent], ids[child]).unwrap();
                        parents.entry(ids[child]).or_default().push(ids[parent]);
                    }
                }
            }

            let mut roots: Vec<TaskId> = ids
                .iter()
                .copied()
                .filter(|id| !parents.contains_key(id))
                .collect();
            // Root order must not matter.
            let by = rotation.index(roots.len());
            roots.rotate_left(by);

            RandomDag {
                graph,
                ids,
                parents,
                roots,
            }
        })
    })
}

proptest! {
    #[test]
    fn every_task_appears_exactly_once(dag in dag_strategy(12)) {
        let order = flatten(&dag.graph, &dag.roots);

        let unique: HashSet<TaskId> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), order.len());
        prop_assert_eq!(unique, dag.ids.iter().copied().collect::<HashSet<_>>());
    }

    #[test]
    fn every_child_follows_one_of_its_parents(dag in dag_strategy(12)) {
        let order = flatten(&dag.graph, &dag.roots);
        let position: HashMap<TaskId, usize> =
            order.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        for (child, parents) in &dag.parents {
            let at = position[child];
            prop_assert!(
                parents.iter().any(|p| position[p] < at),
                "{} placed before all of its parents",
                child
            );
        }
    }

    #[test]
    fn flatten_is_deterministic(dag in dag_strategy(8)) {
        prop_assert_eq!(
            flatten(&dag.graph, &dag.roots),
            flatten(&dag.graph, &dag.roots)
        );
    }
}
