use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::tree::{Arena, Tree};
use crate::tree_node::TreeNode;
use ego_tree::NodeId;
use tracing::{debug, instrument};

/// Smallest accepted height and branching factor.
pub const MIN_DIMENSION: usize = 1;
/// Largest accepted height and branching factor.
pub const MAX_DIMENSION: usize = 4;

/// Height used when the builder is not given one.
pub const DEFAULT_HEIGHT: usize = 3;
/// Branching factor used when the builder is not given one.
pub const DEFAULT_BRANCH: usize = 2;
/// Default leaf value range, `[DEFAULT_VALUE_START, DEFAULT_VALUE_END)`.
pub const DEFAULT_VALUE_START: i32 = -10;
pub const DEFAULT_VALUE_END: i32 = 10;

/// Checks the dimensions callers must pass to [`TreeGenerator`].
///
/// The generator itself trusts its input; call this first.
pub fn validate_dimensions(height: usize, branch: usize) -> bool {
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&height)
        && (MIN_DIMENSION..=MAX_DIMENSION).contains(&branch)
}

/// Builds uniform trees of a fixed height and branching factor with random
/// leaf values.
pub struct TreeGenerator<K: RandomGenerator> {
    height: usize,
    branch: usize,
    start: i32,
    end: i32,
    random: K,
}

impl<K: RandomGenerator> Default for TreeGenerator<K> {
    fn default() -> Self {
        TreeGeneratorBuilder::new().build()
    }
}

/// A builder for creating instances of `TreeGenerator`.
pub struct TreeGeneratorBuilder<K: RandomGenerator> {
    height: usize,
    branch: usize,
    start: i32,
    end: i32,
    random_generator: K,
}

impl<K: RandomGenerator> Default for TreeGeneratorBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RandomGenerator> TreeGeneratorBuilder<K> {
    /// Creates a builder with the default height, branch and value range.
    pub fn new() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            branch: DEFAULT_BRANCH,
            start: DEFAULT_VALUE_START,
            end: DEFAULT_VALUE_END,
            random_generator: K::default(),
        }
    }

    /// Number of levels, the root counting as one.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Number of children of every internal node.
    pub fn with_branch(mut self, branch: usize) -> Self {
        self.branch = branch;
        self
    }

    /// Leaf values are drawn from `[start, end)`.
    pub fn with_value_range(mut self, start: i32, end: i32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the random number generator used for leaf values.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    /// Builds the `TreeGenerator` with the configured parameters.
    pub fn build(self) -> TreeGenerator<K> {
        TreeGenerator {
            height: self.height,
            branch: self.branch,
            start: self.start,
            end: self.end,
            random: self.random_generator,
        }
    }
}

impl<K: RandomGenerator> TreeGenerator<K> {
    /// Returns a new builder for `TreeGenerator`.
    pub fn builder() -> TreeGeneratorBuilder<K> {
        TreeGeneratorBuilder::new()
    }

    /// Number of levels of every generated tree.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of children of every internal node.
    pub fn branch(&self) -> usize {
        self.branch
    }

    /// Generates a fresh tree. Each call draws new leaf values.
    #[instrument(level = "trace", skip(self), fields(height = self.height, branch = self.branch))]
    pub fn create_random_tree(&mut self) -> Tree {
        let (start, end) = (self.start, self.end);
        let random = &mut self.random;
        let tree = build_uniform(self.height, self.branch, |_| random.next_range(start, end));
        debug!(nodes = tree.len(), leaves = tree.leaf_count(), "generated random tree");
        tree
    }
}

impl TreeGenerator<StandardRandomGenerator> {
    /// Shorthand for a thread-RNG generator with the default value range.
    pub fn with_dimensions(height: usize, branch: usize) -> Self {
        TreeGeneratorBuilder::new()
            .with_height(height)
            .with_branch(branch)
            .build()
    }
}

/// Builds the same shape as [`TreeGenerator::create_random_tree`] but takes
/// the leaf values, left to right, from `leaves`. Missing values repeat the
/// last one given, or 0 when `leaves` is empty.
pub fn tree_from_leaves(height: usize, branch: usize, leaves: &[i32]) -> Tree {
    let fallback = leaves.last().copied().unwrap_or(0);
    build_uniform(height, branch, |index| {
        leaves.get(index).copied().unwrap_or(fallback)
    })
}

/// Breadth-first expansion: `height - 1` rounds, each node of the frontier
/// spawning `branch` children; the final frontier becomes the leaves.
fn build_uniform<F>(height: usize, branch: usize, mut leaf_value: F) -> Tree
where
    F: FnMut(usize) -> i32,
{
    let mut arena = Arena::new(TreeNode::new(true));
    let mut frontier: Vec<NodeId> = vec![arena.root().id()];

    for _ in 1..height {
        let mut new_frontier = Vec::with_capacity(frontier.len() * branch);
        for &parent_id in &frontier {
            let Some(mut parent) = arena.get_mut(parent_id) else {
                continue;
            };
            let child = parent.value().child();
            for _ in 0..branch {
                new_frontier.push(parent.append(child.clone()).id());
            }
        }
        frontier = new_frontier;
    }

    for (index, &leaf_id) in frontier.iter().enumerate() {
        let value = leaf_value(index);
        if let Some(mut leaf) = arena.get_mut(leaf_id) {
            let node = leaf.value();
            node.is_leaf = true;
            node.assign_original(value);
        }
    }

    Tree::from_arena(arena)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::CustomNumberGenerator;
    use rstest::rstest;

    fn geometric_sum(height: usize, branch: usize) -> usize {
        (0..height).map(|level| branch.pow(level as u32)).sum()
    }

    #[rstest]
    #[case(1, 1)]
    #[case(1, 4)]
    #[case(2, 2)]
    #[case(3, 2)]
    #[case(3, 3)]
    #[case(4, 4)]
    fn generated_tree_has_uniform_shape(#[case] height: usize, #[case] branch: usize) {
        // arrange
        let mut generator = TreeGenerator::builder()
            .with_height(height)
            .with_branch(branch)
            .with_random_generator(CustomNumberGenerator::default())
            .build();

        // act
        let tree = generator.create_random_tree();

        // assert
        assert_eq!(tree.len(), geometric_sum(height, branch));
        assert_eq!(tree.leaf_count(), branch.pow(height as u32 - 1));
        assert_eq!(tree.depth(), height);
    }

    #[rstest]
    #[case(1, 1, true)]
    #[case(4, 4, true)]
    #[case(2, 3, true)]
    #[case(0, 2, false)]
    #[case(2, 0, false)]
    #[case(5, 1, false)]
    #[case(1, 5, false)]
    fn validates_dimensions(#[case] height: usize, #[case] branch: usize, #[case] valid: bool) {
        assert_eq!(validate_dimensions(height, branch), valid);
    }

    #[test]
    fn sides_alternate_by_depth() {
        let mut generator = TreeGenerator::with_dimensions(4, 3);
        let tree = generator.create_random_tree();

        for &id in tree.nodes() {
            let node = tree.node(id).unwrap();
            match tree.parent(id) {
                None => assert!(node.is_maximizer),
                Some(parent) => {
                    assert_eq!(node.is_maximizer, !tree.node(parent).unwrap().is_maximizer)
                }
            }
        }
    }

    #[test]
    fn only_leaves_carry_values() {
        let mut generator = TreeGenerator::builder()
            .with_height(3)
            .with_branch(3)
            .with_value_range(-2, 2)
            .with_random_generator(CustomNumberGenerator::new(11))
            .build();
        let tree = generator.create_random_tree();

        for &id in tree.nodes() {
            let node = tree.node(id).unwrap();
            assert_eq!(node.is_leaf, tree.children(id).is_empty());
            if node.is_leaf {
                let value = node.value.unwrap();
                assert!((-2..2).contains(&value));
                assert_eq!(node.original_value(), Some(value));
            } else {
                assert_eq!(node.value, None);
                assert_eq!(node.original_value(), None);
            }
        }
    }

    #[test]
    fn height_one_is_a_single_leaf_root() {
        let mut generator = TreeGenerator::with_dimensions(1, 3);
        let tree = generator.create_random_tree();

        let root = tree.node(tree.root_id().unwrap()).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.edges().is_empty());
        assert!(root.is_leaf);
        assert!(root.is_maximizer);
        assert!(root.value.is_some());
    }

    #[test]
    fn full_i32_value_range_generates() {
        // arrange
        let mut generator = TreeGenerator::builder()
            .with_height(3)
            .with_branch(4)
            .with_value_range(i32::MIN, i32::MAX)
            .with_random_generator(CustomNumberGenerator::new(17))
            .build();

        // act
        let tree = generator.create_random_tree();

        // assert
        assert_eq!(tree.leaf_count(), 16);
        assert!(tree
            .nodes()
            .iter()
            .filter_map(|&id| tree.node(id))
            .filter(|node| node.is_leaf)
            .all(|node| node.value.is_some_and(|value| value < i32::MAX)));
    }

    #[test]
    fn seeded_generators_repeat_themselves() {
        let build = || {
            TreeGenerator::builder()
                .with_height(3)
                .with_branch(3)
                .with_random_generator(CustomNumberGenerator::new(99))
                .build()
                .create_random_tree()
                .to_string()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn leaves_are_assigned_left_to_right() {
        let tree = tree_from_leaves(3, 2, &[3, 5, 6, 9]);
        let leaves: Vec<i32> = tree
            .nodes()
            .iter()
            .filter_map(|&id| tree.node(id).filter(|node| node.is_leaf))
            .filter_map(|node| node.value)
            .collect();
        assert_eq!(leaves, vec![3, 5, 6, 9]);
    }
}
