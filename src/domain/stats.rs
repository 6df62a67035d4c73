//! Bottom-up subtree statistics.

use tracing::{instrument, trace};

use crate::domain::arena::OrgArena;
use crate::domain::entities::SubtreeStats;

/// Attach [`SubtreeStats`] to every node in one post-order pass.
///
/// Children are finished before their parent, so each fold only reads stats
/// that are already in place. Runs on an explicit stack; chart depth does not
/// grow the call stack.
#[instrument(level = "debug", skip(arena), fields(nodes = arena.len()))]
pub fn aggregate(arena: &mut OrgArena) {
    let order: Vec<_> = arena.iter_postorder().map(|(idx, _)| idx).collect();

    for idx in order {
        let Some(node) = arena.get_node(idx) else {
            continue;
        };
        let children: Vec<(bool, SubtreeStats)> = node
            .children
            .iter()
            .filter_map(|&c| arena.get_node(c))
            .map(|child| (!child.is_leaf(), child.stats().copied().unwrap_or_default()))
            .collect();
        let stats = fold(node.data.salary_amount(), &children);
        trace!("{}: {:?}", node.key, stats);

        if let Some(node) = arena.get_node_mut(idx) {
            node.data.stats = Some(stats);
        }
    }
}

/// Combine finished child stats with the node's own salary.
///
/// `children` holds, per direct report, whether that report manages anyone
/// and its stats.
pub fn fold(own_salary: f64, children: &[(bool, SubtreeStats)]) -> SubtreeStats {
    let mut acc = SubtreeStats::default();

    for (is_manager, child) in children {
        acc.total_descendants += 1 + child.total_descendants;
        acc.non_leaf_descendants += usize::from(*is_manager) + child.non_leaf_descendants;
        acc.management_cost += child.management_cost;
        acc.ic_cost += child.ic_cost;
        acc.total_cost += child.total_cost;
    }

    acc.total_cost += own_salary;
    if children.is_empty() {
        acc.ic_cost += own_salary;
    } else {
        acc.management_cost += own_salary;
    }

    acc.management_ratio = (acc.ic_cost > 0.0).then(|| acc.management_cost / acc.ic_cost);
    acc
}
