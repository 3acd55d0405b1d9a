//! Synthesis parameters and their validation.

/// Largest supported nodes-per-side.
pub const MAX_NUM_NODES: u32 = (1 << 14) + 1;

/// Errors from rejected terrain parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// `num_nodes - 1` must be a power of two, with at least 3 nodes per side.
    #[error("num_nodes must be 2^k + 1 with 3 <= num_nodes <= {max}, got {0}", max = MAX_NUM_NODES)]
    InvalidNumNodes(u32),
    /// The height range is empty or inverted.
    #[error("min_height ({min}) must be less than max_height ({max})")]
    EmptyHeightRange {
        /// Requested lower bound.
        min: f32,
        /// Requested upper bound.
        max: f32,
    },
    /// Roughness must be finite and non-negative.
    #[error("roughness must be finite and non-negative, got {0}")]
    InvalidRoughness(f32),
}

/// Inputs to [`diamond_square`](crate::diamond_square).
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Nodes per face side; must be `2^k + 1`.
    pub num_nodes: u32,
    /// Lower bound for the seeded corner heights.
    pub min_height: f32,
    /// Upper bound for the seeded corner heights.
    pub max_height: f32,
    /// Perturbation decay exponent. Amplitude is multiplied by
    /// `2^-roughness` after every pass, so higher values give smoother terrain.
    pub roughness: f32,
    /// Seed for the random stream.
    pub seed: u64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            num_nodes: 257,
            min_height: -0.05,
            max_height: 0.05,
            roughness: 1.0,
            seed: 42,
        }
    }
}

impl TerrainParams {
    /// Check the parameters describe a well-formed synthesis.
    ///
    /// # Errors
    ///
    /// Returns the first [`TerrainError`] found.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let n = self.num_nodes;
        if !(3..=MAX_NUM_NODES).contains(&n) || !(n - 1).is_power_of_two() {
            return Err(TerrainError::InvalidNumNodes(n));
        }
        if !(self.min_height < self.max_height) {
            return Err(TerrainError::EmptyHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        if !self.roughness.is_finite() || self.roughness < 0.0 {
            return Err(TerrainError::InvalidRoughness(self.roughness));
        }
        Ok(())
    }
}
