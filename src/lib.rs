//! Organization chart derivation.
//!
//! Turns a flat set of employee records (id, name, title, salary, manager)
//! into a rooted hierarchy annotated with subtree statistics.
//!
//! ```
//! use orgchart::domain::{derive_tree, find_root, ReportingGraph, TreeNode};
//! use orgchart::util::testing::record_set;
//!
//! let records = record_set(&[
//!     ("E1", "Ada Lovelace", "1000", None),
//!     ("E2", "Grace Hopper", "500", Some("E1")),
//! ]);
//! let graph = ReportingGraph::build(&records);
//! let root = find_root(&records).unwrap();
//! let arena = derive_tree(&graph, root, &records).unwrap();
//! let tree = TreeNode::from_arena(&arena).unwrap();
//!
//! assert_eq!(tree.children.len(), 1);
//! assert_eq!(tree.stats().unwrap().total_cost, 1500.0);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
