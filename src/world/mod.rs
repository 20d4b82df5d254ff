// world/ - Procedural geometry and rasters
//
// Pure functions over their inputs (plus an injected RNG where sampling
// is needed). Nothing here holds per-frame state.

mod color;
mod mesh;
pub mod terrain;
pub mod texture;

pub use color::Color;
pub use mesh::{MAX_SEGMENTS, PlaneMesh};
pub use texture::TiledTexture;
