extern crate minimax_tree;

use clap::Parser;
use minimax_tree::generator::{validate_dimensions, TreeGenerator};
use minimax_tree::layout::layout;
use minimax_tree::observer::{Animator, SearchEvent};
use minimax_tree::random::CustomNumberGenerator;
use minimax_tree::{alpha_beta_animated, minimax};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Generate a random game tree and walk through an alpha-beta search of it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of levels, the root included (1-4)
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Children per internal node (1-4)
    #[arg(long, default_value_t = 3)]
    branch: usize,

    /// Hold time of each highlight pulse in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Seed for reproducible leaf values
    #[arg(long, default_value_t = 42)]
    seed: i64,

    /// Canvas size used for the layout
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    canvas_height: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if !validate_dimensions(args.height, args.branch) {
        error!(height = args.height, branch = args.branch, "height and branch must be between 1 and 4");
        return ExitCode::FAILURE;
    }

    // Create a reproducible tree and place it on the canvas
    let mut generator = TreeGenerator::builder()
        .with_height(args.height)
        .with_branch(args.branch)
        .with_random_generator(CustomNumberGenerator::new(args.seed))
        .build();
    let mut tree = generator.create_random_tree();
    if let Err(e) = layout(&mut tree, args.width, args.canvas_height) {
        error!(%e, "layout failed");
        return ExitCode::FAILURE;
    }
    println!("{tree}");

    // Narrate the search as it happens
    let mut animator = Animator::new(Duration::from_millis(args.delay_ms)).with_subscriber(|tree, event| {
        match *event {
            SearchEvent::Highlight { node, on: true } => {
                if let Some(position) = tree.node(node).map(|node| node.position) {
                    println!("  visit ({:.0}, {:.0})", position.x, position.y);
                }
            }
            SearchEvent::Pruned { edge, .. } => println!("  prune edge {edge}"),
            SearchEvent::Settled { value, .. } => println!("  settle {value}"),
            _ => {}
        }
    });

    let outcome = match alpha_beta_animated(&tree, &mut animator) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(%e, "alpha-beta failed");
            return ExitCode::FAILURE;
        }
    };
    let reference = match minimax(&tree) {
        Ok(solved) => solved,
        Err(e) => {
            error!(%e, "minimax failed");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", outcome.tree);
    info!(
        alpha_beta = ?outcome.root_value(),
        minimax = ?reference.root_value(),
        pruned = outcome.pruned.len(),
        visited = outcome.visited.len(),
        nodes = tree.len(),
        "search complete"
    );
    ExitCode::SUCCESS
}
