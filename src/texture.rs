use crate::math::Color;
use anyhow::Context;
use glam::{vec3, Vec2};
use image::RgbImage;
use std::path::Path;

/// A decoded image sampled for diffuse colors.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decode a texture from disk (PNG or PPM/PNM).
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?
            .to_rgb8();
        Ok(Self::new(image))
    }

    /// Nearest-neighbor sample at texture coordinate `uv`, rounded and
    /// clamped to the image bounds, channels scaled to `[0, 1]`.
    pub fn sample(&self, uv: Vec2) -> Color {
        let x = (uv.x * self.image.width() as f32)
            .round()
            .clamp(0.0, (self.image.width() - 1) as f32) as u32;
        let y = (uv.y * self.image.height() as f32)
            .round()
            .clamp(0.0, (self.image.height() - 1) as f32) as u32;

        let [r, g, b] = self.image.get_pixel(x, y).0;
        vec3(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}
