//! Viewer state and the event reducer.
//!
//! Each viewer owns all of its state in one struct. Terminal input is
//! mapped to an [`Event`], fed to `update`, and the returned [`Command`]
//! tells the console loop whether to redraw, start a fetch, or exit.

mod chains_view;
mod tree_view;

pub use chains_view::ChainsView;
pub use tree_view::{LoadedTree, TreePane, TreeView, Viewport};

use crate::fetch::{FetchError, FetchTarget, Fetched};

/// User intent, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Prev,
    Next,
    Refetch,
    /// Switch between the text and diagram panes.
    ToggleView,
    /// Move the diagram by a number of pan steps along each axis.
    Pan { dx: f64, dy: f64 },
    /// Mouse button pressed at a terminal cell.
    DragStart { column: u16, row: u16 },
    DragMove { column: u16, row: u16 },
    DragEnd,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// What the loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Redraw,
    Fetch,
    Quit,
}

/// The active viewer.
#[derive(Debug)]
pub enum Viewer {
    Chains(ChainsView),
    Tree(TreeView),
}

impl Viewer {
    pub fn target(&self) -> FetchTarget {
        match self {
            Self::Chains(v) => v.target(),
            Self::Tree(v) => v.target(),
        }
    }

    pub fn update(&mut self, event: Event) -> Command {
        match self {
            Self::Chains(v) => v.update(event),
            Self::Tree(v) => v.update(event),
        }
    }

    /// Mark a fetch as in flight. Clears the previous error.
    pub fn begin_fetch(&mut self) {
        match self {
            Self::Chains(v) => v.begin_fetch(),
            Self::Tree(v) => v.begin_fetch(),
        }
    }

    /// Apply a completed fetch. Always clears the loading flag.
    pub fn finish_fetch(&mut self, result: Result<Fetched, FetchError>) -> Command {
        match (self, result) {
            (Self::Chains(v), Ok(Fetched::Chains(resp))) => v.finish_fetch(Ok(resp)),
            (Self::Tree(v), Ok(Fetched::Tree(nodes))) => v.finish_fetch(Ok(nodes)),
            (Self::Chains(v), Err(e)) => v.finish_fetch(Err(e.to_string())),
            (Self::Tree(v), Err(e)) => v.finish_fetch(Err(e.to_string())),
            (Self::Chains(v), Ok(Fetched::Tree(_))) => {
                tracing::error!("Tree payload delivered to chains viewer");
                v.finish_fetch(Err("unexpected payload".to_string()))
            }
            (Self::Tree(v), Ok(Fetched::Chains(_))) => {
                tracing::error!("Chains payload delivered to tree viewer");
                v.finish_fetch(Err("unexpected payload".to_string()))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Self::Chains(v) => v.loading,
            Self::Tree(v) => v.loading,
        }
    }
}
