//! Owned chart tree handed to serializers and renderers.

use std::collections::HashMap;
use std::fmt;
use std::mem;

use generational_arena::Index;
use serde::{Deserialize, Serialize};

use crate::domain::arena::OrgArena;
use crate::domain::entities::{PersonData, SubtreeStats};

/// Node kind tag. Charts only contain people.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Person,
}

/// One person in the chart, owning its reports.
///
/// Drop, equality and `Debug` never recurse into children, so charts of any
/// depth can be built, compared and released.
#[derive(Serialize, Deserialize)]
pub struct TreeNode {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub data: PersonData,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Convert a derived arena into an owning tree.
    ///
    /// Built bottom-up from the post-order sequence so deep charts do not
    /// recurse. Returns `None` for an empty arena.
    pub fn from_arena(arena: &OrgArena) -> Option<Self> {
        let mut finished: HashMap<Index, TreeNode> = HashMap::with_capacity(arena.len());

        for (idx, node) in arena.iter_postorder() {
            let children = node
                .children
                .iter()
                .filter_map(|child| finished.remove(child))
                .collect();
            finished.insert(
                idx,
                TreeNode {
                    key: node.key.clone(),
                    kind: NodeKind::Person,
                    data: node.data.clone(),
                    children,
                },
            );
        }

        arena.root().and_then(|root| finished.remove(&root))
    }

    pub fn stats(&self) -> Option<&SubtreeStats> {
        self.data.stats.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk over this node and all descendants.
    pub fn iter(&self) -> TreeNodeIter<'_> {
        TreeNodeIter { stack: vec![self] }
    }

    /// Number of nodes in this subtree, self included.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    pub fn find(&self, key: &str) -> Option<&TreeNode> {
        self.iter().find(|n| n.key == key)
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            depth = depth.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        depth
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl PartialEq for TreeNode {
    /// Same shape and payload, compared in one pre-order walk.
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if a.key != b.key
                        || a.kind != b.kind
                        || a.data != b.data
                        || a.children.len() != b.children.len()
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<&str> = self.children.iter().map(|c| c.key.as_str()).collect();
        f.debug_struct("TreeNode")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("children", &children)
            .finish()
    }
}

pub struct TreeNodeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for TreeNodeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
