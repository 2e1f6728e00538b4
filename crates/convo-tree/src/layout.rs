//! Span-proportional tree layout.
//!
//! Every parent's child row is given `(box_width + sibling_margin) *
//! leaf_count(parent)` of horizontal space, centered under the parent.
//! Each child takes a share proportional to `leaf_count(child) + 1`, so
//! the shares always sum to the whole row and sibling subtrees never
//! overlap. Rows are a fixed distance apart regardless of content.
//!
//! Coordinates are world units with y growing downward. The root sits at
//! the origin; `y` of a placement is the top edge of its box and `x` its
//! horizontal center.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{LeafCounts, Tree, TreeError};

/// Box geometry and spacing. Text is allowed to overflow `box_height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Box width, text area plus padding on both sides.
    pub box_width: f64,
    pub box_height: f64,
    /// Extra horizontal space reserved per slot.
    pub sibling_margin: f64,
    /// Vertical distance between the bottom of a row and the next row.
    pub row_gap: f64,
    /// Inset of text from the left edge of its box.
    pub text_padding: f64,
    /// Offset of the first text line from the top of the box.
    pub first_baseline: f64,
    pub line_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 250.0 + 40.0,
            box_height: 200.0,
            sibling_margin: 20.0,
            row_gap: 120.0,
            text_padding: 10.0,
            first_baseline: 25.0,
            line_height: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal room available to wrapped text inside a box.
    pub fn text_width(&self) -> f64 {
        self.box_width - 2.0 * self.text_padding
    }

    /// Width of one layout slot.
    pub fn slot_width(&self) -> f64 {
        self.box_width + self.sibling_margin
    }

    /// Where line `line` of a box's text starts.
    pub fn text_anchor(&self, placement: &Placement, line: usize) -> (f64, f64) {
        (
            placement.x + self.text_padding - 0.5 * self.box_width,
            placement.y + self.first_baseline + line as f64 * self.line_height,
        )
    }
}

/// A horizontal interval `[left, left + width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubSpan {
    pub left: f64,
    pub width: f64,
}

impl SubSpan {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Computed position of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: String,
    /// Horizontal center of the box.
    pub x: f64,
    /// Top edge of the box.
    pub y: f64,
    pub depth: usize,
    /// Interval allotted by the parent. `None` for the root.
    pub span: Option<SubSpan>,
    /// Interval shared by this node's children. `None` for leaves.
    pub child_row: Option<SubSpan>,
}

impl Placement {
    pub fn is_leaf(&self) -> bool {
        self.child_row.is_none()
    }
}

/// A parent-to-child connector, parent bottom-center to child top-center.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub parent: String,
    pub child: String,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Axis-aligned bounding box over all node boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Full layout of a tree. Placements are ordered parents before children.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    placements: Vec<Placement>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    config: LayoutConfig,
}

impl TreeLayout {
    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.index.get(id).map(|&i| &self.placements[i])
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        let half = self.config.box_width / 2.0;
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in &self.placements {
            bounds.min_x = bounds.min_x.min(p.x - half);
            bounds.max_x = bounds.max_x.max(p.x + half);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y + self.config.box_height);
        }
        bounds
    }
}

/// Lay out every node reachable from the tree's root.
///
/// `counts` must come from [`crate::annotate`] started at the root (or an
/// ancestor of every laid-out node); a node without a count is reported
/// as [`TreeError::UnknownNode`].
pub fn layout(tree: &Tree, counts: &LeafCounts, config: &LayoutConfig) -> Result<TreeLayout, TreeError> {
    let count_of = |id: &str| counts.get(id).ok_or_else(|| TreeError::UnknownNode(id.to_string()));

    let root = tree.root();
    let mut placements = vec![Placement {
        id: root.id.clone(),
        x: 0.0,
        y: 0.0,
        depth: 0,
        span: None,
        child_row: None,
    }];
    let mut edges = Vec::new();
    let mut stack: Vec<usize> = vec![0];

    while let Some(parent_idx) = stack.pop() {
        let (parent_x, parent_y, depth) = {
            let p = &placements[parent_idx];
            (p.x, p.y, p.depth)
        };
        let node = tree.node(&placements[parent_idx].id)?;
        if node.is_leaf() {
            continue;
        }

        let slots = count_of(&node.id)?;
        let row_width = config.slot_width() * slots as f64;
        let row = SubSpan {
            left: parent_x - row_width / 2.0,
            width: row_width,
        };
        let top = parent_y + config.box_height + config.row_gap;
        placements[parent_idx].child_row = Some(row);

        let first_child = placements.len();
        let mut cursor = row.left;
        for child_id in &node.children_ids {
            let child_slots = count_of(child_id)?;
            let span = SubSpan {
                left: cursor,
                width: row_width * (child_slots + 1) as f64 / slots as f64,
            };
            // leaves hug the right edge of their share, branches center so
            // their own children can spread both ways
            let x = if child_slots == 0 { span.right() } else { span.center() };

            edges.push(Edge {
                parent: node.id.clone(),
                child: child_id.clone(),
                from: (parent_x, parent_y + config.box_height),
                to: (x, top),
            });
            placements.push(Placement {
                id: child_id.clone(),
                x,
                y: top,
                depth: depth + 1,
                span: Some(span),
                child_row: None,
            });
            cursor = span.right();
        }

        stack.extend((first_child..placements.len()).rev());
    }

    let index = placements
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    tracing::debug!(nodes = placements.len(), edges = edges.len(), "Computed tree layout");

    Ok(TreeLayout {
        placements,
        index,
        edges,
        config: config.clone(),
    })
}
