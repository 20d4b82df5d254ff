// wave.rs - Water surface height field
//
// Two crossed travelling sinusoids written straight into the mesh
// z channel. Planar coordinates never move.

use crate::config::WaterConfig;
use crate::world::PlaneMesh;

#[derive(Clone, Copy, Debug)]
pub struct WaveShape {
    pub freq1: f32,
    pub amp1: f32,
    pub freq2: f32,
    pub rate_mul: f32,
    pub amp2: f32,
}

impl WaveShape {
    #[inline(always)]
    pub fn height(&self, x: f32, y: f32, t: f32) -> f32 {
        (x * self.freq1 + t).sin() * self.amp1 + (y * self.freq2 + t * self.rate_mul).cos() * self.amp2
    }

    /// Largest |z| the shape can produce
    pub fn bound(&self) -> f32 {
        self.amp1.abs() + self.amp2.abs()
    }
}

impl From<&WaterConfig> for WaveShape {
    fn from(c: &WaterConfig) -> Self {
        Self {
            freq1: c.freq1,
            amp1: c.amp1,
            freq2: c.freq2,
            rate_mul: c.rate_mul,
            amp2: c.amp2,
        }
    }
}

/// Rewrite every vertex height for time `elapsed`.
pub fn update(vertices: &mut [f32], shape: &WaveShape, elapsed: f32) {
    for v in vertices.chunks_exact_mut(3) {
        v[2] = shape.height(v[0], v[1], elapsed);
    }
}

#[derive(Clone, Debug)]
pub struct WaveField {
    pub mesh: PlaneMesh,
    pub shape: WaveShape,
}

impl WaveField {
    pub fn new(config: &WaterConfig) -> Self {
        let res = config.grid_resolution;
        Self {
            mesh: PlaneMesh::new(config.size, config.size, res, res),
            shape: WaveShape::from(config),
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        update(&mut self.mesh.positions, &self.shape, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heights_stay_within_amplitude_sum() {
        let mut field = WaveField::new(&WaterConfig { grid_resolution: 32, ..Default::default() });
        let bound = field.shape.bound();
        for i in 0..200 {
            field.update(i as f32 * 0.173 - 7.0);
            for k in 0..field.mesh.vertex_count() {
                let z = field.mesh.height_at(k);
                assert!(z.abs() <= bound + 1e-6, "z={z} exceeds {bound}");
            }
        }
    }

    #[test]
    fn test_planar_coordinates_untouched() {
        let mut field = WaveField::new(&WaterConfig { grid_resolution: 8, ..Default::default() });
        let before: Vec<(f32, f32)> =
            field.mesh.positions.chunks_exact(3).map(|v| (v[0], v[1])).collect();
        field.update(3.5);
        let after: Vec<(f32, f32)> =
            field.mesh.positions.chunks_exact(3).map(|v| (v[0], v[1])).collect();
        assert_eq!(before, after);
        assert_eq!(field.mesh.vertex_count(), 81);
    }

    #[test]
    fn test_height_formula() {
        let shape = WaveShape::from(&WaterConfig::default());
        let (x, y, t): (f32, f32, f32) = (12.0, -40.0, 2.5);
        let expected = (x * 0.5 + t).sin() * 0.5 + (y * 0.3 + t * 0.8).cos() * 0.5;
        assert!((shape.height(x, y, t) - expected).abs() < 1e-6);
    }
}
