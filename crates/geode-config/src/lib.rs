//! Configuration for planet generation.
//!
//! Settings persist to disk as a RON file, can be overridden from the
//! command line, and tolerate missing or unknown fields so old files keep
//! loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GenerationConfig, LodConfig, PlanetConfig};
pub use error::ConfigError;
