use crate::tree::Tree;
use ego_tree::NodeId;

/// What a presentation layer draws for one node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub value: Option<i32>,
    pub x: f64,
    pub y: f64,
    pub highlighted: bool,
    pub is_maximizer: bool,
    pub is_leaf: bool,
}

/// What a presentation layer draws for one edge. Endpoints index into
/// [`TreeSnapshot::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeView {
    pub parent: usize,
    pub child: usize,
    pub pruned: bool,
}

/// Plain-data copy of a tree's display state, nodes and edges in pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeSnapshot {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl TreeSnapshot {
    pub fn capture(tree: &Tree) -> Self {
        let nodes = tree
            .nodes()
            .iter()
            .filter_map(|&id| tree.node(id))
            .map(|node| NodeView {
                value: node.value,
                x: node.position.x,
                y: node.position.y,
                highlighted: node.highlighted,
                is_maximizer: node.is_maximizer,
                is_leaf: node.is_leaf,
            })
            .collect();

        let index_of = |id: NodeId| tree.nodes().iter().position(|&node| node == id);
        let edges = tree
            .edges()
            .iter()
            .filter_map(|edge| {
                Some(EdgeView {
                    parent: index_of(edge.parent())?,
                    child: index_of(edge.child())?,
                    pruned: edge.pruned(),
                })
            })
            .collect();

        TreeSnapshot { nodes, edges }
    }
}

impl Tree {
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(self)
    }
}
