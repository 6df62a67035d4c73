//! Directed reporting graph: an edge runs from a manager to each direct report.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::entities::RecordSet;

/// Adjacency list over employee ids.
///
/// Every record owns a node, connected or not. Successor lists keep edge
/// insertion order, which is the record set's iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportingGraph {
    successors: BTreeMap<String, Vec<String>>,
    edge_count: usize,
}

impl ReportingGraph {
    /// Build the graph from a record set.
    ///
    /// Manager references that do not resolve to a known record are dropped;
    /// the referencing record keeps its node but has no incoming edge.
    /// Cycles are not rejected here.
    #[instrument(level = "debug", skip(records), fields(records = records.len()))]
    pub fn build(records: &RecordSet) -> Self {
        let mut graph = Self {
            successors: records.keys().map(|id| (id.clone(), Vec::new())).collect(),
            edge_count: 0,
        };

        for (id, record) in records {
            let Some(manager) = record.manager_id() else {
                continue;
            };
            if records.contains_key(manager) {
                graph.add_edge(manager, id);
            } else {
                debug!("dangling manager reference: {} -> {}", id, manager);
            }
        }

        debug!(
            "graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        if let Some(children) = self.successors.get_mut(from) {
            children.push(to.to_string());
            self.edge_count += 1;
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.successors.contains_key(id)
    }

    /// Direct reports of `id`; empty for unknown ids.
    pub fn successors(&self, id: &str) -> &[String] {
        self.successors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.successors.keys().map(String::as_str)
    }
}
