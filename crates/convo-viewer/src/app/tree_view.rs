use chrono::{DateTime, Local};
use convo_tree::{
    annotate, enumerate_paths, layout, LayoutConfig, LeafCounts, Node, Pager, Path, Tree,
    TreeError, TreeLayout,
};

use super::chains_view::redraw_if;
use super::{Command, Event};
use crate::fetch::FetchTarget;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 100.0;
const ZOOM_FACTOR: f64 = 1.25;

/// Which pane of the tree viewer is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreePane {
    #[default]
    Text,
    Diagram,
}

/// Pan offset and scale of the diagram, in world units.
///
/// A world point `(x, y)` is drawn at `(x + pan_x, y + pan_y)` relative to
/// the view origin, so increasing `pan_y` moves the content down.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub pan_x: f64,
    pub pan_y: f64,
    /// World units per terminal column.
    pub zoom: f64,
    drag_anchor: Option<(f64, f64)>,
}

impl Viewport {
    pub fn new(zoom: f64) -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            drag_anchor: None,
        }
    }

    /// World units covered by one terminal cell. Cells are about twice as
    /// tall as they are wide.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.zoom, self.zoom * 2.0)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn drag_start(&mut self, column: u16, row: u16) {
        let (cw, ch) = self.cell_size();
        self.drag_anchor = Some((
            f64::from(column) * cw - self.pan_x,
            f64::from(row) * ch - self.pan_y,
        ));
    }

    /// Follow the pointer. Returns whether a drag is in progress.
    pub fn drag_move(&mut self, column: u16, row: u16) -> bool {
        let Some((ax, ay)) = self.drag_anchor else {
            return false;
        };
        let (cw, ch) = self.cell_size();
        self.pan_x = f64::from(column) * cw - ax;
        self.pan_y = f64::from(row) * ch - ay;
        true
    }

    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn zoom_by(&mut self, factor: f64) -> bool {
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = (zoom - self.zoom).abs() > f64::EPSILON;
        self.zoom = zoom;
        changed
    }
}

/// A fetched tree with everything derived from it.
#[derive(Debug, Clone)]
pub struct LoadedTree {
    pub tree: Tree,
    pub counts: LeafCounts,
    pub paths: Vec<Path>,
    pub layout: TreeLayout,
}

impl LoadedTree {
    /// Index `nodes`, annotate, enumerate paths and lay out, in that order.
    pub fn build(nodes: Vec<Node>, root_id: &str, config: &LayoutConfig) -> Result<Self, TreeError> {
        let tree = Tree::from_nodes(nodes, root_id)?;
        let counts = annotate(&tree, root_id)?;
        let paths = enumerate_paths(&tree, root_id)?;
        let layout = layout(&tree, &counts, config)?;
        tracing::info!(
            root = root_id,
            nodes = tree.len(),
            slots = counts.root_count(),
            paths = paths.len(),
            "Tree loaded"
        );
        Ok(Self {
            tree,
            counts,
            paths,
            layout,
        })
    }
}

/// State of the tree viewer.
#[derive(Debug)]
pub struct TreeView {
    pub url: String,
    pub root_id: String,
    pub layout_config: LayoutConfig,
    pub pan_step: f64,
    pub loading: bool,
    pub error: Option<String>,
    /// Replaced wholesale by every successful fetch.
    pub loaded: Option<LoadedTree>,
    pub pager: Pager,
    pub pane: TreePane,
    pub viewport: Viewport,
    pub fetched_at: Option<DateTime<Local>>,
}

impl TreeView {
    pub fn new(
        url: impl Into<String>,
        root_id: impl Into<String>,
        layout_config: LayoutConfig,
        zoom: f64,
        pan_step: f64,
    ) -> Self {
        Self {
            url: url.into(),
            root_id: root_id.into(),
            layout_config,
            pan_step,
            loading: false,
            error: None,
            loaded: None,
            pager: Pager::default(),
            pane: TreePane::default(),
            viewport: Viewport::new(zoom),
            fetched_at: None,
        }
    }

    pub fn target(&self) -> FetchTarget {
        FetchTarget::Tree {
            url: self.url.clone(),
        }
    }

    pub fn update(&mut self, event: Event) -> Command {
        let diagram = self.pane == TreePane::Diagram;
        match event {
            Event::Prev => redraw_if(self.pager.prev()),
            Event::Next => redraw_if(self.pager.next()),
            Event::ToggleView => {
                self.pane = match self.pane {
                    TreePane::Text => TreePane::Diagram,
                    TreePane::Diagram => TreePane::Text,
                };
                self.viewport.drag_end();
                Command::Redraw
            }
            Event::Refetch => {
                self.begin_fetch();
                Command::Fetch
            }
            Event::Pan { dx, dy } if diagram => {
                self.viewport.pan(dx * self.pan_step, dy * self.pan_step);
                Command::Redraw
            }
            Event::DragStart { column, row } if diagram => {
                self.viewport.drag_start(column, row);
                Command::None
            }
            Event::DragMove { column, row } if diagram => redraw_if(self.viewport.drag_move(column, row)),
            Event::DragEnd => {
                self.viewport.drag_end();
                Command::None
            }
            Event::ZoomIn if diagram => redraw_if(self.viewport.zoom_by(1.0 / ZOOM_FACTOR)),
            Event::ZoomOut if diagram => redraw_if(self.viewport.zoom_by(ZOOM_FACTOR)),
            Event::Quit => Command::Quit,
            _ => Command::None,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Node>, String>) -> Command {
        self.loading = false;
        self.fetched_at = Some(Local::now());

        let built = result.and_then(|nodes| {
            LoadedTree::build(nodes, &self.root_id, &self.layout_config)
                .map_err(|e| format!("invalid tree: {e}"))
        });
        match built {
            Ok(loaded) => {
                self.pager = Pager::new(loaded.paths.len());
                self.loaded = Some(loaded);
            }
            Err(message) => {
                tracing::warn!(url = %self.url, error = %message, "Tree fetch failed");
                self.error = Some(message);
            }
        }
        Command::Redraw
    }

    /// Nodes of the conversation on screen, root first.
    pub fn current_path(&self) -> Vec<&Node> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        let Some(path) = self.pager.current().and_then(|i| loaded.paths.get(i)) else {
            tracing::debug!(index = self.pager.index(), "No conversation path to show");
            return Vec::new();
        };
        path.iter().filter_map(|id| loaded.tree.get(id)).collect()
    }

    pub fn position_label(&self) -> Option<String> {
        let index = self.pager.current()?;
        Some(format!("{}/{} conversations", index + 1, self.pager.len()))
    }
}
