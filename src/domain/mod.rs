//! Domain layer: entities and hierarchy logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod deriver;
pub mod entities;
pub mod error;
pub mod graph;
pub mod node;
pub mod root;
pub mod stats;

pub use arena::{OrgArena, OrgNode};
pub use deriver::derive_tree;
pub use entities::*;
pub use error::DomainError;
pub use graph::ReportingGraph;
pub use node::{NodeKind, TreeNode};
pub use root::{find_root, root_candidates, select_root, RootPolicy};
