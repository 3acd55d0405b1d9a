//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet shape and surface classification.
    pub planet: PlanetConfig,
    /// Level-of-detail tiling and switching distances.
    pub lod: LodConfig,
    /// Heightfield synthesis and octree construction.
    pub generation: GenerationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet shape and surface classification.
///
/// Heights are fractions of the planet radius: a node of height `h` sits at
/// `radius * (1 + h)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Radius of the zero-height sphere.
    pub radius: f64,
    /// Lowest height the cube corners are seeded with.
    pub min_height: f32,
    /// Highest height the cube corners are seeded with.
    pub max_height: f32,
    /// Sea level. Triangles with any vertex below it are sea.
    pub height_sea: f32,
    /// Average triangle height above which land is rock.
    pub height_rock: f32,
    /// Texture repeats across one face.
    pub texture_repeat: f32,
    /// Position scale applied to LOD > 0 tiles for the far scene.
    pub low_lod_scale: f32,
}

/// Tiling and LOD switching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Node intervals per tile side at LOD 0; a power of two.
    pub max_verts_per_tile: u32,
    /// Number of LOD levels.
    pub num_lods: u8,
    /// Switching altitude above the surface for each LOD, ascending.
    pub altitudes: Vec<f64>,
}

/// Heightfield synthesis and collision structures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed.
    pub seed: u64,
    /// Nodes per face side; `2^k + 1`.
    pub num_nodes: u32,
    /// Amplitude decay per subdivision pass; larger is smoother.
    pub roughness: f32,
    /// Maximum octree depth for LOD 0 tiles.
    pub octree_max_depth: u32,
    /// Octree worker threads; 0 uses one per CPU.
    pub octree_workers: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g. "debug", "info,geode_lod=trace").
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 1000.0,
            min_height: -0.05,
            max_height: 0.05,
            height_sea: 0.0,
            height_rock: 0.03,
            texture_repeat: 64.0,
            low_lod_scale: 1.0,
        }
    }
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            max_verts_per_tile: 64,
            num_lods: 4,
            altitudes: vec![100.0, 500.0, 2000.0, 8000.0],
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_nodes: 257,
            roughness: 1.0,
            octree_max_depth: 5,
            octree_workers: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = Self::path_in(config_dir);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read the file: returns `Some(new_config)` if it differs from
    /// `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&Self::path_in(config_dir))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
