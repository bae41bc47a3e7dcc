use crate::error::TreeError;
use crate::tree::Tree;
use crate::tree_node::Position;
use ego_tree::NodeId;
use tracing::{instrument, trace};

/// Assigns display coordinates to every node of `tree`.
///
/// Levels are spaced evenly over `height`; each node splits its horizontal
/// band equally between its children and every child is centred in its share.
/// An empty tree is left as is.
#[instrument(level = "trace", skip(tree), fields(nodes = tree.len()))]
pub fn layout(tree: &mut Tree, width: f64, height: f64) -> Result<(), TreeError> {
    let Some(root) = tree.root_id() else {
        return Ok(());
    };

    let y_spacing = height / (tree.depth() as f64 + 1.0);
    place(tree, root, Position { x: width / 2.0, y: y_spacing })?;
    position_children(tree, root, width, 0.0, 1, y_spacing)
}

fn position_children(
    tree: &mut Tree,
    node: NodeId,
    available_width: f64,
    start_x: f64,
    depth: usize,
    y_spacing: f64,
) -> Result<(), TreeError> {
    let children = tree.children(node);
    if children.is_empty() {
        return Ok(());
    }

    let y = y_spacing * (depth as f64 + 1.0);
    let child_width = available_width / children.len() as f64;
    for (index, child) in children.into_iter().enumerate() {
        let band_start = start_x + child_width * index as f64;
        place(tree, child, Position { x: band_start + child_width / 2.0, y })?;
        position_children(tree, child, child_width, band_start, depth + 1, y_spacing)?;
    }
    Ok(())
}

fn place(tree: &mut Tree, node: NodeId, position: Position) -> Result<(), TreeError> {
    trace!(?node, x = position.x, y = position.y, "placed");
    tree.update(node, |payload| payload.position = position)
}
