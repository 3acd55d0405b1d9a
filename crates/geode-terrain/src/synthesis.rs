//! Diamond-square displacement over the stitched cube-sphere heightfield.

use geode_cubesphere::CubeFace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{Heightfield, TerrainError, TerrainParams};

/// Fill `heightfield` with fractal terrain.
///
/// The eight cube corners are seeded first, then diamond and square passes
/// alternate with a halving step. Square-pass neighbors that fall off a face
/// are read from the adjacent face, so the terrain is continuous across
/// every seam. One seeded stream is consumed in a fixed traversal order, so
/// the result depends only on `params`.
///
/// # Errors
///
/// Returns [`TerrainError`] if `params` fail validation. A heightfield whose
/// size differs from `params.num_nodes` is reported as
/// [`TerrainError::InvalidNumNodes`].
pub fn diamond_square(heightfield: &mut Heightfield, params: &TerrainParams) -> Result<(), TerrainError> {
    params.validate()?;
    if heightfield.num_nodes() as u32 != params.num_nodes {
        return Err(TerrainError::InvalidNumNodes(heightfield.num_nodes() as u32));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let last = heightfield.num_nodes() - 1;

    for face in [CubeFace::NegZ, CubeFace::PosZ] {
        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            let h = rng.random_range(params.min_height..=params.max_height);
            heightfield.set_node(h, face, x, y);
        }
    }

    let decay = (-params.roughness).exp2();
    let mut amplitude = (params.max_height - params.min_height) * 0.5;
    let mut size = last;
    let mut passes = 0u32;

    while size >= 2 {
        let half = size / 2;
        diamond_pass(heightfield, &mut rng, size, amplitude);
        square_pass(heightfield, &mut rng, half, amplitude);
        debug!(size, amplitude, "diamond-square pass");
        amplitude *= decay;
        size = half;
        passes += 1;
    }

    info!(
        num_nodes = params.num_nodes,
        seed = params.seed,
        passes,
        "Heightfield synthesized"
    );
    Ok(())
}

fn perturb(rng: &mut ChaCha8Rng, amplitude: f32) -> f32 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}

/// Set the center of every `size`-aligned cell from its four corners.
fn diamond_pass(hf: &mut Heightfield, rng: &mut ChaCha8Rng, size: i32, amplitude: f32) {
    let last = hf.num_nodes() - 1;
    let half = size / 2;
    for face in CubeFace::ALL {
        for x in (0..last).step_by(size as usize) {
            for y in (0..last).step_by(size as usize) {
                let avg = (hf.get_node(face, x, y)
                    + hf.get_node(face, x + size, y)
                    + hf.get_node(face, x, y + size)
                    + hf.get_node(face, x + size, y + size))
                    * 0.25;
                let value = avg + perturb(rng, amplitude);
                hf.set_node(value, face, x + half, y + half);
            }
        }
    }
}

/// Set every edge midpoint of the `half`-step lattice from its four
/// neighbors, crossing onto adjacent faces where needed.
fn square_pass(hf: &mut Heightfield, rng: &mut ChaCha8Rng, half: i32, amplitude: f32) {
    let steps = (hf.num_nodes() - 1) / half;
    for face in CubeFace::ALL {
        for i in 0..=steps {
            for j in 0..=steps {
                if (i + j) % 2 == 0 {
                    continue;
                }
                let (x, y) = (i * half, j * half);
                let avg = (hf.get_node(face, x - half, y)
                    + hf.get_node(face, x + half, y)
                    + hf.get_node(face, x, y - half)
                    + hf.get_node(face, x, y + half))
                    * 0.25;
                let value = avg + perturb(rng, amplitude);
                hf.set_node(value, face, x, y);
            }
        }
    }
}
