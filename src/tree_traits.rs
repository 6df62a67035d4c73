//! Terminal rendering of charts via `termtree`.

use termtree::Tree;

use crate::application::services::MAX_CHART_DEPTH;
use crate::domain::{OrgArena, PersonData, TreeNode};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// `Name (Job Title) [initials]`, title omitted when blank.
pub fn node_label(data: &PersonData) -> String {
    let mut label = data.name.clone();
    if !data.job_title.trim().is_empty() {
        label.push_str(&format!(" ({})", data.job_title));
    }
    if !data.initials.is_empty() {
        label.push_str(&format!(" [{}]", data.initials));
    }
    label
}

/// Render at most `max_depth` levels; reports below the cut collapse into a count.
pub fn render_limited(root: &TreeNode, max_depth: usize) -> Tree<String> {
    let mut order = Vec::new();
    let mut stack = vec![(root, 1)];
    while let Some((node, level)) = stack.pop() {
        order.push((node, level));
        if level < max_depth {
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
    }

    // reversed pre-order: every subtree is finished before its parent
    let mut built: Vec<Tree<String>> = Vec::new();
    for (node, level) in order.into_iter().rev() {
        let label = node_label(&node.data);
        let tree = if node.is_leaf() {
            Tree::new(label)
        } else if level < max_depth {
            let leaves = built.split_off(built.len() - node.children.len());
            Tree::new(label).with_leaves(leaves)
        } else {
            let hidden = node.size() - 1;
            Tree::new(label).with_leaves([Tree::new(format!("+{hidden} more below"))])
        };
        built.push(tree);
    }
    built
        .pop()
        .unwrap_or_else(|| Tree::new(node_label(&root.data)))
}

impl TreeNodeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        render_limited(self, MAX_CHART_DEPTH)
    }
}

impl TreeNodeConvert for OrgArena {
    fn to_tree_string(&self) -> Tree<String> {
        match TreeNode::from_arena(self) {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty chart".to_string()),
        }
    }
}
