// terrain.rs - Seabed dunes
//
// Elevation is a pure function of planar coordinates, so the same
// query serves mesh displacement and anything that needs the floor height.

use super::PlaneMesh;

/// Dune height at plane coordinates (x, y)
#[inline]
pub fn elevation(x: f32, y: f32) -> f32 {
    (x / 10.0).sin() * 2.0 + (y / 15.0).cos() * 2.0
}

/// Displaced plane with recomputed normals
pub fn dune_mesh(width: f32, height: f32, segments: u32) -> PlaneMesh {
    let mut mesh = PlaneMesh::new(width, height, segments, segments);
    mesh.displace(elevation);
    mesh.compute_normals();
    mesh
}
