// texture.rs - Procedural rasters
//
// Seabed sand (base fill + random accent splats, wrapped so it tiles)
// and the sun's radial glow sprite. No assets are loaded.

use image::{Rgba, RgbaImage};
use rand::Rng;

use super::Color;
use crate::error::TextureError;

pub const SPLAT_SIZE: u32 = 2;

/// Raster plus how often it repeats across its surface.
#[derive(Clone, Debug)]
pub struct TiledTexture {
    pub image: RgbaImage,
    pub repeat: f32,
}

impl TiledTexture {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bytes(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Base fill plus `splat_count` accent blocks of `SPLAT_SIZE` pixels.
pub fn synthesize<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    base: Color,
    accents: &[Color],
    splat_count: u32,
    rng: &mut R,
) -> Result<RgbaImage, TextureError> {
    synthesize_sized(width, height, base, accents, splat_count, SPLAT_SIZE, rng)
}

pub fn synthesize_sized<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    base: Color,
    accents: &[Color],
    splat_count: u32,
    splat_size: u32,
    rng: &mut R,
) -> Result<RgbaImage, TextureError> {
    if splat_count > 0 && accents.is_empty() {
        return Err(TextureError::NoAccentColors);
    }
    if splat_count > 0 && splat_size == 0 {
        return Err(TextureError::ZeroSplatSize);
    }

    let mut img = acquire_raster(width, height, Rgba(base.to_rgba8(255)))?;
    let palette: Vec<Rgba<u8>> = accents.iter().map(|c| Rgba(c.to_rgba8(255))).collect();

    for _ in 0..splat_count {
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let px = palette[rng.random_range(0..palette.len())];
        // Wrap at the edges so the raster tiles without seams
        for dy in 0..splat_size {
            for dx in 0..splat_size {
                img.put_pixel((x + dx) % width, (y + dy) % height, px);
            }
        }
    }

    Ok(img)
}

/// Allocate a raster filled with one pixel value.
pub fn acquire_raster(width: u32, height: u32, fill: Rgba<u8>) -> Result<RgbaImage, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyRaster { width, height });
    }
    let too_large = TextureError::RasterTooLarge { width, height };
    let pixels = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| too_large.clone())?;
    let len = pixels.checked_mul(4).ok_or_else(|| too_large.clone())?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| too_large.clone())?;
    for _ in 0..pixels {
        buf.extend_from_slice(&fill.0);
    }
    RgbaImage::from_raw(width, height, buf).ok_or(too_large)
}

/// One color stop of a radial gradient: rgb in [0, 255], alpha in [0, 1].
#[derive(Clone, Copy, Debug)]
pub struct GlowStop {
    pub offset: f32,
    pub rgba: [f32; 4],
}

pub const SUN_GLOW_STOPS: [GlowStop; 3] = [
    GlowStop { offset: 0.0, rgba: [255.0, 200.0, 100.0, 1.0] },
    GlowStop { offset: 0.5, rgba: [255.0, 100.0, 50.0, 0.4] },
    GlowStop { offset: 1.0, rgba: [0.0, 0.0, 0.0, 0.0] },
];

/// Square sprite with a gradient from the center out to the inscribed circle.
pub fn radial_glow(size: u32, stops: &[GlowStop]) -> Result<RgbaImage, TextureError> {
    let mut img = acquire_raster(size, size, Rgba([0, 0, 0, 0]))?;
    let radius = size as f32 * 0.5;

    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
        let [r, g, b, a] = gradient_at(stops, t);
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        *px = Rgba([channel(r), channel(g), channel(b), channel(a * 255.0)]);
    }

    Ok(img)
}

fn gradient_at(stops: &[GlowStop], t: f32) -> [f32; 4] {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return first.rgba;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            let k = (t - a.offset) / span;
            return std::array::from_fn(|i| a.rgba[i] + (b.rgba[i] - a.rgba[i]) * k);
        }
    }
    last.rgba
}
