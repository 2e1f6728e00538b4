use thiserror::Error;

/// Structural problems found while building or walking a [`crate::Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("root node '{0}' not found")]
    MissingRoot(String),

    #[error("node '{parent}' references unknown child '{child}'")]
    MissingNode { parent: String, child: String },

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("duplicate node id '{0}'")]
    DuplicateId(String),

    #[error("node '{child}' is a child of both '{first}' and '{second}'")]
    SharedChild {
        child: String,
        first: String,
        second: String,
    },

    #[error("cycle detected at node '{0}'")]
    Cycle(String),
}
