/// 2D display coordinates assigned by [`crate::layout::layout`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Index of an edge within [`crate::tree::Tree::edges`].
pub type EdgeId = usize;

/// Payload of a single node in a game tree.
///
/// Parent and child links are kept by the arena that owns the node; the
/// payload only carries what the search and the presentation layer read.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Minimax value. `None` until generation (leaves) or a search assigns it.
    pub value: Option<i32>,
    /// Value drawn at generation time. Never rewritten once set.
    original_value: Option<i32>,
    /// `true` for the root and for every node at an even distance from it.
    pub is_maximizer: bool,
    /// `true` iff the node has no children.
    pub is_leaf: bool,
    pub position: Position,
    /// Transient animation flag.
    pub highlighted: bool,
    /// Incoming edge, rewritten whenever the owning tree is refreshed.
    pub(crate) edge: Option<EdgeId>,
}

impl TreeNode {
    /// Creates an unvalued node for the given side to move.
    pub fn new(is_maximizer: bool) -> Self {
        TreeNode {
            value: None,
            original_value: None,
            is_maximizer,
            is_leaf: false,
            position: Position::default(),
            highlighted: false,
            edge: None,
        }
    }

    /// Creates a leaf holding `value` as both its current and original value.
    pub fn leaf(is_maximizer: bool, value: i32) -> Self {
        let mut node = TreeNode::new(is_maximizer);
        node.is_leaf = true;
        node.assign_original(value);
        node
    }

    /// Node that a child of this one should be built from.
    pub fn child(&self) -> Self {
        TreeNode::new(!self.is_maximizer)
    }

    pub fn original_value(&self) -> Option<i32> {
        self.original_value
    }

    /// Seeds the generation-time value. Has no effect once a value is set.
    pub fn assign_original(&mut self, value: i32) {
        if self.original_value.is_none() {
            self.original_value = Some(value);
            self.value = Some(value);
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Copy used as the starting point of a search: accumulated value and
    /// animation state are dropped, everything structural is kept.
    pub(crate) fn reset_copy(&self) -> Self {
        TreeNode {
            value: self.original_value,
            original_value: self.original_value,
            is_maximizer: self.is_maximizer,
            is_leaf: self.is_leaf,
            position: self.position,
            highlighted: false,
            edge: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_flips_the_side_to_move() {
        let root = TreeNode::new(true);
        let child = root.child();
        assert!(!child.is_maximizer);
        assert!(child.child().is_maximizer);
        assert_eq!(child.value, None);
    }

    #[test]
    fn original_value_is_written_once() {
        // arrange
        let mut node = TreeNode::leaf(false, 4);

        // act
        node.assign_original(9);
        node.value = Some(1);

        // assert
        assert_eq!(node.original_value(), Some(4));
        assert_eq!(node.value, Some(1));
    }

    #[test]
    fn reset_copy_restores_the_original_value() {
        let mut node = TreeNode::leaf(true, -3);
        node.value = Some(12);
        node.highlighted = true;
        node.position = Position { x: 1.0, y: 2.0 };

        let copy = node.reset_copy();

        assert_eq!(copy.value, Some(-3));
        assert!(!copy.highlighted);
        assert!(copy.is_leaf);
        assert_eq!(copy.position, Position { x: 1.0, y: 2.0 });
    }
}
