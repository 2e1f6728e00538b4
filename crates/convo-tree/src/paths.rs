//! Root-to-leaf path enumeration.

use crate::{Tree, TreeError};

/// One conversation: node ids from the root down to a leaf.
pub type Path = Vec<String>;

/// Every root-to-leaf path under `root_id`, left to right.
///
/// Depth-first pre-order. The explicit stack carries each node's depth so
/// the running path can be truncated back to the node's parent before the
/// node is pushed, which is the same as popping on the way out.
pub fn enumerate_paths(tree: &Tree, root_id: &str) -> Result<Vec<Path>, TreeError> {
    tree.node(root_id)?;

    let mut paths: Vec<Path> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut stack: Vec<(&str, usize)> = vec![(root_id, 0)];

    while let Some((id, depth)) = stack.pop() {
        let node = tree.node(id)?;
        current.truncate(depth);
        current.push(id.to_string());

        if node.is_leaf() {
            paths.push(current.clone());
        } else {
            // reversed so the leftmost child is popped first
            stack.extend(
                node.children_ids
                    .iter()
                    .rev()
                    .map(|c| (c.as_str(), depth + 1)),
            );
        }
    }

    tracing::debug!(root = root_id, paths = paths.len(), "Enumerated conversation paths");
    Ok(paths)
}
