//! Tree derivation: materialize the chart reachable from a root.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::OrgArena;
use crate::domain::entities::{PersonData, RecordSet};
use crate::domain::graph::ReportingGraph;
use crate::domain::stats;

/// Build the chart below `root_id` and attach subtree statistics.
///
/// Nodes are created in pre-order. An id reached a second time (cycle or
/// diamond) is dropped together with its subtree, as is any id without a
/// record. Returns `None` when the root itself cannot be resolved.
///
/// The visited set lives for this call only, so repeated derivations over
/// the same inputs are independent and yield identical trees.
#[instrument(level = "debug", skip(graph, records))]
pub fn derive_tree(graph: &ReportingGraph, root_id: &str, records: &RecordSet) -> Option<OrgArena> {
    if !records.contains_key(root_id) {
        debug!("root {} has no record", root_id);
        return None;
    }

    let mut arena = build_arena(graph, root_id, records);
    stats::aggregate(&mut arena);
    debug!("derived chart with {} nodes", arena.len());
    Some(arena)
}

/// Iterative pre-order construction.
///
/// Successors are pushed in reverse so pops follow graph order, which makes
/// the visit sequence identical to a recursive depth-first walk.
fn build_arena(graph: &ReportingGraph, root_id: &str, records: &RecordSet) -> OrgArena {
    let mut arena = OrgArena::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, Option<Index>)> = vec![(root_id, None)];

    while let Some((id, parent_idx)) = stack.pop() {
        if !visited.insert(id) {
            trace!("already visited, dropping: {}", id);
            continue;
        }
        let Some(record) = records.get(id) else {
            trace!("no record, dropping: {}", id);
            continue;
        };

        let idx = arena.insert_node(id.to_string(), PersonData::from(record), parent_idx);

        for child in graph.successors(id).iter().rev() {
            stack.push((child.as_str(), Some(idx)));
        }
    }

    arena
}
