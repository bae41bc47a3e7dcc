#![allow(dead_code)]

use minimax_tree::generator::TreeGenerator;
use minimax_tree::random::CustomNumberGenerator;
use minimax_tree::Tree;
use std::sync::Once;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a stderr subscriber once per test binary, honouring `RUST_LOG`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_filter(env_filter),
        );
        if tracing::dispatcher::has_been_set() {
            return;
        }
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
        info!("Test Setup complete");
    });
}

pub fn seeded_tree(height: usize, branch: usize, seed: i64) -> Tree {
    TreeGenerator::builder()
        .with_height(height)
        .with_branch(branch)
        .with_random_generator(CustomNumberGenerator::new(seed))
        .build()
        .create_random_tree()
}
