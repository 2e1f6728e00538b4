//! Node and tree model.
//!
//! A [`Tree`] is an immutable id-keyed index of [`Node`]s plus a root id.
//! Edges run parent to children only. Construction validates the shape
//! once so that every walk over a built tree is total: every referenced
//! child exists, no child has two parents, and nothing loops back.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::TreeError;

/// Root id used by the tree endpoint when none is configured.
pub const DEFAULT_ROOT_ID: &str = "root";

/// A single tree entity: content plus an ordered list of child ids.
///
/// Any `leafCount` present on the wire is ignored; derived counts live in
/// [`crate::LeafCounts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub children_ids: Vec<String>,
    #[serde(default)]
    pub text: String,
}

impl Node {
    pub fn new(id: impl Into<String>, children_ids: &[&str], text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children_ids: children_ids.iter().map(|c| c.to_string()).collect(),
            text: text.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children_ids.is_empty()
    }
}

/// Validated tree of nodes indexed by id.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<String, Node>,
    root: String,
}

impl Tree {
    /// Index a flat node list and validate it as a tree rooted at `root`.
    ///
    /// Nodes not reachable from the root are kept in the index but never
    /// visited by the algorithms.
    pub fn from_nodes(nodes: Vec<Node>, root: impl Into<String>) -> Result<Self, TreeError> {
        let root = root.into();

        let mut index: HashMap<String, Node> = HashMap::with_capacity(nodes.len());
        let mut order = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index.contains_key(&node.id) {
                return Err(TreeError::DuplicateId(node.id));
            }
            order.push(node.id.clone());
            index.insert(node.id.clone(), node);
        }

        if !index.contains_key(&root) {
            return Err(TreeError::MissingRoot(root));
        }

        // child -> parent, filled in input order so errors are deterministic
        let mut parent_of: HashMap<&str, &str> = HashMap::new();
        for id in &order {
            let node = &index[id];
            for child in &node.children_ids {
                if !index.contains_key(child) {
                    return Err(TreeError::MissingNode {
                        parent: node.id.clone(),
                        child: child.clone(),
                    });
                }
                if child == &root {
                    return Err(TreeError::Cycle(root));
                }
                if let Some(first) = parent_of.insert(child.as_str(), node.id.as_str()) {
                    return Err(TreeError::SharedChild {
                        child: child.clone(),
                        first: first.to_string(),
                        second: node.id.clone(),
                    });
                }
            }
        }

        // With unique parents and a parentless root nothing reachable can
        // loop, but the walk also tells us how much of the input is used.
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![root.as_str()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(TreeError::Cycle(id.to_string()));
            }
            stack.extend(index[id].children_ids.iter().map(String::as_str));
        }

        let unreachable = index.len() - seen.len();
        if unreachable > 0 {
            tracing::debug!(root = %root, unreachable, "Nodes not reachable from root are ignored");
        }

        Ok(Self { nodes: index, root })
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node, failing with [`TreeError::UnknownNode`].
    pub fn node(&self, id: &str) -> Result<&Node, TreeError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TreeError::UnknownNode(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of indexed nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut stack = vec![self.root.as_str()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend(node.children_ids.iter().map(String::as_str));
        }
        leaves
    }

    /// Text of a node, or an empty string for unknown ids.
    pub fn text(&self, id: &str) -> &str {
        self.nodes.get(id).map(|n| n.text.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Node> {
        vec![
            Node::new("a", &["b", "c", "e"], ""),
            Node::new("b", &[], ""),
            Node::new("c", &["d"], ""),
            Node::new("d", &[], ""),
            Node::new("e", &["f", "g"], ""),
            Node::new("f", &[], ""),
            Node::new("g", &["h"], ""),
            Node::new("h", &[], ""),
        ]
    }

    #[test]
    fn builds_fixture_tree() {
        let tree = Tree::from_nodes(fixture(), "a").unwrap();
        assert_eq!(tree.root_id(), "a");
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.root().children_ids, vec!["b", "c", "e"]);
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = Tree::from_nodes(fixture(), "root").unwrap_err();
        assert_eq!(err, TreeError::MissingRoot("root".into()));
    }

    #[test]
    fn dangling_child_is_rejected() {
        let mut nodes = fixture();
        nodes[1].children_ids.push("zz".into());
        let err = Tree::from_nodes(nodes, "a").unwrap_err();
        assert_eq!(
            err,
            TreeError::MissingNode { parent: "b".into(), child: "zz".into() }
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut nodes = fixture();
        nodes.push(Node::new("d", &[], "again"));
        assert_eq!(
            Tree::from_nodes(nodes, "a").unwrap_err(),
            TreeError::DuplicateId("d".into())
        );
    }

    #[test]
    fn shared_child_is_rejected() {
        let mut nodes = fixture();
        nodes[3].children_ids.push("h".into());
        let err = Tree::from_nodes(nodes, "a").unwrap_err();
        assert_eq!(
            err,
            TreeError::SharedChild { child: "h".into(), first: "d".into(), second: "g".into() }
        );
    }

    #[test]
    fn edge_back_to_root_is_a_cycle() {
        let mut nodes = fixture();
        nodes[7].children_ids.push("a".into());
        assert_eq!(
            Tree::from_nodes(nodes, "a").unwrap_err(),
            TreeError::Cycle("a".into())
        );
    }

    #[test]
    fn unreachable_nodes_are_tolerated() {
        let mut nodes = fixture();
        nodes.push(Node::new("x", &["y"], ""));
        nodes.push(Node::new("y", &["x"], ""));
        let tree = Tree::from_nodes(nodes, "a").unwrap();
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn wire_format_ignores_leaf_count_and_defaults_text() {
        let json = r#"[
            {"id": "root", "childrenIds": ["x"], "text": "hello", "leafCount": 99},
            {"id": "x", "childrenIds": []}
        ]"#;
        let nodes: Vec<Node> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].text, "hello");
        assert_eq!(nodes[1].text, "");
        let tree = Tree::from_nodes(nodes, DEFAULT_ROOT_ID).unwrap();
        assert_eq!(tree.text("x"), "");
        assert_eq!(tree.node("nope").unwrap_err(), TreeError::UnknownNode("nope".into()));
    }
}
