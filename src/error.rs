use crate::tree_node::EdgeId;
use ego_tree::NodeId;
use thiserror::Error;

/// Structural errors raised by [`crate::tree::Tree`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0:?} has no parent to propagate to")]
    NoParent(NodeId),

    #[error("node {0:?} is not part of this tree")]
    UnknownNode(NodeId),

    #[error("edge {0} is not part of this tree")]
    UnknownEdge(EdgeId),
}

/// Reasons a search produced no valued tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("cannot search an empty tree")]
    EmptyTree,

    #[error("node {0:?} has no value to search with")]
    MissingValue(NodeId),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
