use crate::error::{SearchError, TreeError};
use crate::observer::{Animator, NoopObserver, SearchEvent, SearchObserver};
use crate::tree::Tree;
use crate::tree_node::EdgeId;
use ego_tree::NodeId;
use tracing::{debug, error, instrument, trace};

/// Window bounds lie outside the range of any leaf value.
const NEG_INFINITY: i64 = i64::MIN;
const INFINITY: i64 = i64::MAX;

/// How a node decides that its remaining children cannot matter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CutoffRule {
    /// Cut once `alpha >= beta`.
    #[default]
    Bounds,
    /// Cut once the node's running best crosses the opposite bound:
    /// `best >= beta` for a maximizer, `best <= alpha` for a minimizer.
    RunningValue,
}

/// Result of an alpha-beta search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The searched copy. Every expanded node carries its value and every
    /// skipped subtree has its incoming edge pruned.
    pub tree: Tree,
    /// Pruned edges in the order they were cut.
    pub pruned: Vec<EdgeId>,
    /// Nodes whose value was requested, in visiting order.
    pub visited: Vec<NodeId>,
}

impl SearchOutcome {
    pub fn root_value(&self) -> Option<i32> {
        self.tree.root_value()
    }
}

/// Values every node of a copy of `tree` by plain minimax.
///
/// The input is left untouched.
#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn minimax(tree: &Tree) -> Result<Tree, SearchError> {
    let root = tree.root_id().ok_or(SearchError::EmptyTree)?;
    let (mut working, ids) = tree.deep_copy_with_ids();
    let root = ids.get(&root).copied().ok_or(TreeError::UnknownNode(root))?;

    let value = minimax_value(&mut working, root)?;
    debug!(value, "minimax finished");
    Ok(working)
}

fn minimax_value(tree: &mut Tree, id: NodeId) -> Result<i32, SearchError> {
    let node = tree.node(id).ok_or(TreeError::UnknownNode(id))?;
    if let Some(value) = node.value {
        return Ok(value);
    }
    let is_maximizer = node.is_maximizer;

    let mut best: Option<i32> = None;
    for child in tree.children(id) {
        let value = minimax_value(tree, child)?;
        best = Some(match best {
            None => value,
            Some(best) if is_maximizer => best.max(value),
            Some(best) => best.min(value),
        });
    }

    let Some(value) = best else {
        error!(?id, "leaf without a value");
        return Err(SearchError::MissingValue(id));
    };
    tree.set_value(id, Some(value))?;
    Ok(value)
}

/// Synchronous alpha-beta over a copy of `tree`.
pub fn alpha_beta(tree: &Tree) -> Result<SearchOutcome, SearchError> {
    alpha_beta_with(tree, CutoffRule::Bounds, &mut NoopObserver)
}

/// Alpha-beta that pulses each expanded node and each evaluated child
/// through `animator`. Values and pruning match [`alpha_beta`].
pub fn alpha_beta_animated(tree: &Tree, animator: &mut Animator) -> Result<SearchOutcome, SearchError> {
    alpha_beta_with(tree, CutoffRule::RunningValue, animator)
}

/// Alpha-beta core shared by the synchronous and animated searches.
///
/// Works on a deep copy of `tree`, starting from the full window. On any
/// failure the partially searched copy is dropped.
#[instrument(level = "debug", skip(tree, observer), fields(nodes = tree.len()))]
pub fn alpha_beta_with<O>(tree: &Tree, rule: CutoffRule, observer: &mut O) -> Result<SearchOutcome, SearchError>
where
    O: SearchObserver + ?Sized,
{
    let root = tree.root_id().ok_or(SearchError::EmptyTree)?;
    let (working, ids) = tree.deep_copy_with_ids();
    let root = ids.get(&root).copied().ok_or(TreeError::UnknownNode(root))?;

    let mut search = AlphaBetaSearch {
        tree: working,
        rule,
        observer,
        pruned: Vec::new(),
        visited: Vec::new(),
    };
    let value = search.visit(root, NEG_INFINITY, INFINITY)?;
    debug!(value, pruned = search.pruned.len(), visited = search.visited.len(), "alpha-beta finished");

    Ok(SearchOutcome {
        tree: search.tree,
        pruned: search.pruned,
        visited: search.visited,
    })
}

struct AlphaBetaSearch<'o, O: SearchObserver + ?Sized> {
    tree: Tree,
    rule: CutoffRule,
    observer: &'o mut O,
    pruned: Vec<EdgeId>,
    visited: Vec<NodeId>,
}

impl<O: SearchObserver + ?Sized> AlphaBetaSearch<'_, O> {
    fn visit(&mut self, id: NodeId, mut alpha: i64, mut beta: i64) -> Result<i32, SearchError> {
        self.visited.push(id);
        let node = self.tree.node(id).ok_or(TreeError::UnknownNode(id))?;
        if node.is_leaf {
            return node.value.ok_or_else(|| {
                error!(?id, "leaf without a value, aborting search");
                SearchError::MissingValue(id)
            });
        }
        let is_maximizer = node.is_maximizer;
        let children = self.tree.children(id);

        self.observer.notify(&mut self.tree, SearchEvent::Enter { node: id })?;

        let mut best = if is_maximizer { NEG_INFINITY } else { INFINITY };
        for (index, &child) in children.iter().enumerate() {
            let value = self.visit(child, alpha, beta)?;
            self.observer
                .notify(&mut self.tree, SearchEvent::Evaluated { node: child, value })?;

            let value = i64::from(value);
            if is_maximizer {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            let cutoff = match self.rule {
                CutoffRule::Bounds => alpha >= beta,
                CutoffRule::RunningValue if is_maximizer => best >= beta,
                CutoffRule::RunningValue => best <= alpha,
            };
            if cutoff {
                trace!(?id, alpha, beta, skipped = children.len() - index - 1, "cutoff");
                for &skipped in &children[index + 1..] {
                    self.prune(skipped)?;
                }
                break;
            }
        }

        // at least one child was evaluated, so the bound holds a leaf value
        let bound = if is_maximizer { alpha } else { beta };
        let value = i32::try_from(bound).map_err(|_| SearchError::MissingValue(id))?;
        self.tree.set_value(id, Some(value))?;
        self.observer
            .notify(&mut self.tree, SearchEvent::Settled { node: id, value })?;
        Ok(value)
    }

    fn prune(&mut self, child: NodeId) -> Result<(), SearchError> {
        let edge = self.tree.edge_to(child).ok_or(TreeError::UnknownNode(child))?;
        self.tree.prune_edge(edge)?;
        self.pruned.push(edge);
        self.observer
            .notify(&mut self.tree, SearchEvent::Pruned { edge, child })?;
        Ok(())
    }
}
