//! Terminal viewers for conversation data.
//!
//! Two sources are supported: a chains endpoint that ships precomputed
//! conversations, and a tree endpoint that ships a flat node list which
//! is indexed, annotated and laid out locally by `convo-tree`.

pub mod app;
pub mod cli;
pub mod config;
pub mod console;
pub mod fetch;
pub mod logging;
pub mod once;
pub mod render;
