use crate::error::TreeError;
use crate::tree_node::{EdgeId, TreeNode};
use ego_tree::{NodeId, NodeMut, NodeRef};
use std::collections::HashMap;
use std::fmt;
use tracing::{error, trace};

/// Arena holding the nodes of a game tree.
pub type Arena = ego_tree::Tree<TreeNode>;

/// A directed parent-to-child link with its display flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    parent: NodeId,
    child: NodeId,
    pruned: bool,
}

impl Edge {
    /// Node the edge starts from.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Node the edge leads to.
    pub fn child(&self) -> NodeId {
        self.child
    }

    /// Whether a search skipped the subtree below this edge.
    pub fn pruned(&self) -> bool {
        self.pruned
    }
}

/// A game tree together with its derived node and edge lists.
///
/// `nodes` and `edges` are recomputed wholesale from the root by
/// [`Tree::set_root`] and [`Tree::refresh`]; nothing else changes structure.
/// Both lists are in pre-order, and the edge at position `i` is the incoming
/// edge of the `i + 1`-th node.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    arena: Option<Arena>,
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Tree {
    /// A tree without a root.
    pub fn empty() -> Self {
        Tree::default()
    }

    /// Wraps a built arena and derives its nodes and edges.
    pub fn from_arena(arena: Arena) -> Self {
        let mut tree = Tree::empty();
        tree.set_root(Some(arena));
        tree
    }

    /// Replaces the whole structure and recomputes nodes and edges.
    pub fn set_root(&mut self, arena: Option<Arena>) {
        self.arena = arena;
        self.refresh();
    }

    /// Recomputes `nodes` and `edges` from the current root.
    ///
    /// Edge flags are reset, leaf markers and incoming-edge references on the
    /// nodes are rewritten.
    pub fn refresh(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        let Some(arena) = self.arena.as_mut() else {
            return;
        };

        let mut leaves = Vec::new();
        for node in arena.root().descendants() {
            self.nodes.push(node.id());
            leaves.push(!node.has_children());
            if let Some(parent) = node.parent() {
                self.edges.push(Edge {
                    parent: parent.id(),
                    child: node.id(),
                    pruned: false,
                });
            }
        }

        for (&id, is_leaf) in self.nodes.iter().zip(leaves) {
            if let Some(mut node) = arena.get_mut(id) {
                let payload = node.value();
                payload.is_leaf = is_leaf;
                payload.edge = None;
            }
        }
        for (index, edge) in self.edges.iter().enumerate() {
            if let Some(mut node) = arena.get_mut(edge.child) {
                node.value().edge = Some(index);
            }
        }
        trace!(nodes = self.nodes.len(), edges = self.edges.len(), "tree refreshed");
    }

    /// `true` when the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.arena.is_none()
    }

    /// The underlying arena, `None` for an empty tree.
    pub fn arena(&self) -> Option<&Arena> {
        self.arena.as_ref()
    }

    /// Id of the root node.
    pub fn root_id(&self) -> Option<NodeId> {
        self.arena.as_ref().map(|arena| arena.root().id())
    }

    /// Node ids in pre-order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in pre-order of their child node.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|&&id| self.node(id).is_some_and(|node| node.is_leaf))
            .count()
    }

    /// Payload of `id`, `None` if the node is not in this tree.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.as_ref()?.get(id).map(|node| node.value())
    }

    /// Current value of `id`.
    pub fn value(&self, id: NodeId) -> Option<i32> {
        self.node(id)?.value
    }

    /// Current value of the root.
    pub fn root_value(&self) -> Option<i32> {
        self.value(self.root_id()?)
    }

    /// Children of `id`, left to right.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node_ref(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Parent of `id`, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_ref(id)?.parent().map(|parent| parent.id())
    }

    /// Edge at position `edge` of [`Tree::edges`].
    pub fn edge(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge)
    }

    /// The edge connecting `child` to its parent.
    pub fn edge_to(&self, child: NodeId) -> Option<EdgeId> {
        self.node(child)?.edge()
    }

    /// Length of the longest root-to-leaf path, counting the root as 1.
    pub fn depth(&self) -> usize {
        fn depth_of(node: NodeRef<TreeNode>) -> usize {
            1 + node.children().map(depth_of).max().unwrap_or(0)
        }

        self.arena
            .as_ref()
            .map(|arena| depth_of(arena.root()))
            .unwrap_or(0)
    }

    /// Sets the animation flag of `id`.
    pub fn set_highlighted(&mut self, id: NodeId, highlighted: bool) -> Result<(), TreeError> {
        self.update(id, |node| node.highlighted = highlighted)
    }

    /// Marks an edge pruned. Pruning an already pruned edge keeps it pruned.
    pub fn prune_edge(&mut self, edge: EdgeId) -> Result<(), TreeError> {
        let edge = self.edges.get_mut(edge).ok_or(TreeError::UnknownEdge(edge))?;
        edge.pruned = true;
        Ok(())
    }

    /// Ids of every pruned edge, in pre-order.
    pub fn pruned_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.pruned)
            .map(|(index, _)| index)
            .collect()
    }

    /// Copies the value of `id` into its parent.
    pub fn propagate(&mut self, id: NodeId) -> Result<(), TreeError> {
        let value = self.node(id).ok_or(TreeError::UnknownNode(id))?.value;
        let Some(parent) = self.parent(id) else {
            error!(?id, "trying to propagate to null parent");
            return Err(TreeError::NoParent(id));
        };
        self.set_value(parent, value)
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: Option<i32>) -> Result<(), TreeError> {
        self.update(id, |node| node.value = value)
    }

    pub(crate) fn update<F>(&mut self, id: NodeId, f: F) -> Result<(), TreeError>
    where
        F: FnOnce(&mut TreeNode),
    {
        let mut node = self
            .arena
            .as_mut()
            .and_then(|arena| arena.get_mut(id))
            .ok_or(TreeError::UnknownNode(id))?;
        f(node.value());
        Ok(())
    }

    /// Independent structural copy with every value reset to the value drawn
    /// at generation time and every display flag cleared.
    pub fn deep_copy(&self) -> Tree {
        self.deep_copy_with_ids().0
    }

    /// Like [`Tree::deep_copy`], also returning the map from each original
    /// node id to the id of its copy.
    pub fn deep_copy_with_ids(&self) -> (Tree, HashMap<NodeId, NodeId>) {
        let mut ids = HashMap::with_capacity(self.nodes.len());
        let Some(source) = self.arena.as_ref() else {
            return (Tree::empty(), ids);
        };

        let source_root = source.root();
        let mut arena = Arena::new(source_root.value().reset_copy());
        ids.insert(source_root.id(), arena.root().id());
        copy_children(source_root, &mut arena.root_mut(), &mut ids);

        (Tree::from_arena(arena), ids)
    }

    fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, TreeNode>> {
        self.arena.as_ref()?.get(id)
    }
}

fn copy_children(
    source: NodeRef<TreeNode>,
    target: &mut NodeMut<TreeNode>,
    ids: &mut HashMap<NodeId, NodeId>,
) {
    for child in source.children() {
        let mut copied = target.append(child.value().reset_copy());
        ids.insert(child.id(), copied.id());
        copy_children(child, &mut copied, ids);
    }
}

impl fmt::Display for Tree {
    /// Renders one node per line, indented two spaces per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: NodeRef<TreeNode>, indent: usize) -> fmt::Result {
            write!(f, "{}TreeNode(value: ", "  ".repeat(indent))?;
            match node.value().value {
                Some(value) => write!(f, "{value})")?,
                None => write!(f, "null)")?,
            }
            for child in node.children() {
                writeln!(f)?;
                write_node(f, child, indent + 1)?;
            }
            Ok(())
        }

        match self.arena.as_ref() {
            Some(arena) => write_node(f, arena.root(), 0),
            None => write!(f, "Tree(empty)"),
        }
    }
}
