//! Arena-backed working tree for chart derivation.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{PersonData, SubtreeStats};

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct OrgNode {
    /// Employee id
    pub key: String,
    /// Person payload; stats are filled in by the aggregation pass
    pub data: PersonData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

impl OrgNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn stats(&self) -> Option<&SubtreeStats> {
        self.data.stats.as_ref()
    }
}

/// Arena-based tree structure for one organization chart.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Parent links live only here; the exported [`TreeNode`](crate::domain::TreeNode)
/// is a strict owning tree.
#[derive(Debug)]
pub struct OrgArena {
    arena: Arena<OrgNode>,
    root: Option<Index>,
}

impl Default for OrgArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub fn insert_node(&mut self, key: String, data: PersonData, parent: Option<Index>) -> Index {
        let node = OrgNode {
            key,
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&OrgNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut OrgNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_node(&self) -> Option<&OrgNode> {
        self.root.and_then(|idx| self.get_node(idx))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Linear lookup by employee id.
    pub fn find(&self, key: &str) -> Option<Index> {
        self.iter().find(|(_, node)| node.key == key).map(|(idx, _)| idx)
    }

    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of levels; a lone root has depth 1, an empty arena 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, level)) = stack.pop() {
            depth = depth.max(level);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&c| (c, level + 1)));
            }
        }
        depth
    }

    /// Employee ids of all nodes without reports, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_keys(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.key.clone())
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a OrgArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a OrgArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
