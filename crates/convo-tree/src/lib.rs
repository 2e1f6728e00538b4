//! Convo Tree - core model and algorithms for conversation trees
//!
//! Holds the node/tree model shared by both viewers, the derived
//! leaf-count annotation, root-to-leaf path enumeration, and the
//! span-proportional layout used to draw the tree as a diagram.

pub mod chains;
pub mod error;
pub mod layout;
pub mod leaf_count;
pub mod linkify;
pub mod model;
pub mod pager;
pub mod paths;
pub mod wrap;

pub use chains::{ChainsPayload, ChainsResponse, Tweet, TweetIndex};
pub use error::*;
pub use layout::{layout, Bounds, Edge, LayoutConfig, Placement, SubSpan, TreeLayout};
pub use leaf_count::{annotate, LeafCounts};
pub use linkify::{extract_first_url, Linkified};
pub use model::*;
pub use pager::Pager;
pub use paths::{enumerate_paths, Path};
pub use wrap::wrap_words;
