//! Planet generation and runtime facade.
//!
//! Ties the pipeline together: synthesize the heightfield, build every tile
//! of every LOD, build collision octrees for the full-detail tiles on a
//! worker pool, then stream LODs around a viewer.

mod error;
mod octree_pool;
mod planet;
mod settings;


pub use error::PlanetError;
pub use octree_pool::build_octrees;
pub use planet::Planet;
pub use settings::PlanetSettings;
