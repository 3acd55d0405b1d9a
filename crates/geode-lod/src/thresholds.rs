//! Altitude-based LOD thresholds and baseline selection.

/// Errors from rejected LOD configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LodError {
    /// No altitudes were supplied.
    #[error("at least one LOD altitude is required")]
    Empty,
    /// Altitudes must be positive and finite.
    #[error("LOD altitude {index} must be positive and finite, got {altitude}")]
    InvalidAltitude {
        /// Position in the altitude list.
        index: usize,
        /// Offending value.
        altitude: f64,
    },
    /// Altitudes must increase with LOD index.
    #[error("LOD altitudes must be strictly increasing (index {index})")]
    NotIncreasing {
        /// First index that is not larger than its predecessor.
        index: usize,
    },
    /// The planet radius must be positive and finite.
    #[error("planet radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    /// One altitude is needed per tile LOD.
    #[error("{thresholds} LOD altitudes configured for {lods} tile LOD levels")]
    LodCountMismatch {
        /// Number of altitudes.
        thresholds: usize,
        /// Number of tile LODs.
        lods: usize,
    },
}

/// Squared distances from the planet center, one per LOD level.
///
/// `thresholds[0]` is the nearest: inside it the viewer's neighborhood is
/// forced to LOD 0. The remaining entries select the baseline LOD.
#[derive(Clone, Debug, PartialEq)]
pub struct LodThresholds {
    thresholds: Vec<f64>,
}

impl LodThresholds {
    /// Build from altitudes above the surface, ascending with LOD index.
    ///
    /// # Errors
    ///
    /// Returns [`LodError`] if the list is empty, any altitude is not
    /// positive, altitudes do not strictly increase, or the radius is invalid.
    pub fn from_altitudes(altitudes: &[f64], planet_radius: f64) -> Result<Self, LodError> {
        if !(planet_radius > 0.0 && planet_radius.is_finite()) {
            return Err(LodError::InvalidRadius(planet_radius));
        }
        if altitudes.is_empty() {
            return Err(LodError::Empty);
        }
        for (index, &altitude) in altitudes.iter().enumerate() {
            if !(altitude > 0.0 && altitude.is_finite()) {
                return Err(LodError::InvalidAltitude { index, altitude });
            }
            if index > 0 && altitude <= altitudes[index - 1] {
                return Err(LodError::NotIncreasing { index });
            }
        }
        let thresholds = altitudes
            .iter()
            .map(|alt| {
                let d = alt + planet_radius;
                d * d
            })
            .collect();
        Ok(Self { thresholds })
    }

    /// Number of LOD levels.
    pub fn num_lods(&self) -> u8 {
        self.thresholds.len() as u8
    }

    /// The squared-distance thresholds.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Squared distance below which the proximity override applies.
    pub fn near_sq(&self) -> f64 {
        self.thresholds[0]
    }

    /// Baseline LOD for a viewer at squared distance `distance_sq` from the
    /// planet center.
    ///
    /// Scans from the coarsest LOD down to LOD 1 and returns the first whose
    /// threshold the distance reaches. Closer than every threshold returns
    /// LOD 1, or 0 when there is only one level. LOD 0 is otherwise reached
    /// only through the proximity override.
    pub fn baseline_lod(&self, distance_sq: f64) -> u8 {
        let n = self.thresholds.len();
        for lod in (1..n).rev() {
            if distance_sq >= self.thresholds[lod] {
                return lod as u8;
            }
        }
        n.min(2) as u8 - 1
    }
}
