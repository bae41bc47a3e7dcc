//! Random game trees solved by minimax and alpha-beta search.
//!
//! The library generates uniform game trees with random leaf values, lays
//! them out for drawing, and values them with plain minimax or with
//! alpha-beta pruning. Searches never touch the tree they are given: they
//! return a valued copy whose pruned edges and highlight pulses can drive a
//! step-by-step visualization.
//!
//! # Example
//!
//! ```rust
//! use minimax_tree::generator::{validate_dimensions, TreeGenerator};
//! use minimax_tree::layout::layout;
//! use minimax_tree::random::CustomNumberGenerator;
//! use minimax_tree::search::{alpha_beta, minimax};
//!
//! assert!(validate_dimensions(3, 2));
//!
//! // Generate a reproducible tree and give it screen coordinates
//! let mut generator = TreeGenerator::builder()
//!     .with_height(3)
//!     .with_branch(2)
//!     .with_random_generator(CustomNumberGenerator::default())
//!     .build();
//! let mut tree = generator.create_random_tree();
//! layout(&mut tree, 800.0, 600.0).unwrap();
//!
//! // Both searches agree on the value of the root
//! let solved = minimax(&tree).unwrap();
//! let outcome = alpha_beta(&tree).unwrap();
//! assert_eq!(solved.root_value(), outcome.root_value());
//!
//! println!("{}", outcome.tree);
//! println!("pruned edges: {:?}", outcome.pruned);
//! ```

/// Error types for tree mutation and search.
pub mod error;
/// Random tree generation and the dimension check that precedes it.
pub mod generator;
/// Display coordinates for tree nodes.
pub mod layout;
/// Search step hooks, subscriber registry and highlight animation.
pub mod observer;
/// Traits and implementations for random number generation.
pub mod random;
/// Minimax and alpha-beta search.
pub mod search;
/// Plain-data view of a tree for presentation layers.
pub mod snapshot;
/// The `Tree` container and its edges.
pub mod tree;
/// The `TreeNode` payload stored for each node.
pub mod tree_node;

pub use error::{SearchError, TreeError};
pub use search::{alpha_beta, alpha_beta_animated, minimax, CutoffRule, SearchOutcome};
pub use tree::{Edge, Tree};
pub use tree_node::{EdgeId, Position, TreeNode};
