//! Leaf-count annotation.
//!
//! The "leaf count" of a node is the number of layout slots its child row
//! needs: every direct child takes one slot plus its own count, so
//! `count(n) = Σ over children c of (1 + count(c))` and leaves are 0.

use std::collections::HashMap;

use crate::{Tree, TreeError};

/// Derived per-node slot counts, kept apart from the immutable [`Tree`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafCounts {
    counts: HashMap<String, usize>,
    start: String,
}

impl LeafCounts {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.counts.get(id).copied()
    }

    /// Count of the node annotation started from.
    pub fn root_count(&self) -> usize {
        self.get(&self.start).unwrap_or(0)
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Annotate every node reachable from `node_id` with its slot count.
///
/// Post-order over an explicit stack: a node is summed only after all of
/// its children have been counted.
pub fn annotate(tree: &Tree, node_id: &str) -> Result<LeafCounts, TreeError> {
    tree.node(node_id)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut stack: Vec<(&str, bool)> = vec![(node_id, false)];

    while let Some((id, children_done)) = stack.pop() {
        let node = tree.node(id)?;
        if node.is_leaf() {
            counts.insert(id.to_string(), 0);
            continue;
        }

        if children_done {
            let from_children: usize = node
                .children_ids
                .iter()
                .map(|c| counts.get(c).copied().unwrap_or(0))
                .sum();
            counts.insert(id.to_string(), node.children_ids.len() + from_children);
        } else {
            stack.push((id, true));
            stack.extend(node.children_ids.iter().map(|c| (c.as_str(), false)));
        }
    }

    tracing::debug!(
        start = node_id,
        nodes = counts.len(),
        count = counts.get(node_id).copied().unwrap_or(0),
        "Annotated leaf counts"
    );

    Ok(LeafCounts {
        counts,
        start: node_id.to_string(),
    })
}
