//! Command-line overrides.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "geode", about = "Procedural cube-sphere planet generator")]
pub struct CliArgs {
    /// Heightfield seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Nodes per face side (2^k + 1).
    #[arg(long)]
    pub num_nodes: Option<u32>,

    /// Maximum collision octree depth.
    #[arg(long)]
    pub octree_depth: Option<u32>,

    /// Octree worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(n) = args.num_nodes {
            self.generation.num_nodes = n;
        }
        if let Some(depth) = args.octree_depth {
            self.generation.octree_max_depth = depth;
        }
        if let Some(workers) = args.workers {
            self.generation.octree_workers = workers;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
