//! Band-parallel render scheduling and the output pixel buffer.

use crate::{camera::Camera, error::RenderError, math::Color, scene::Scene, shading};
use glam::Vec3;
use rayon::prelude::*;
use std::{io::Write, path::Path, thread, time::Instant};

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Worker count; defaults to the available hardware parallelism.
    /// Output is bit-identical regardless of this setting.
    pub threads: Option<usize>,
}

/// A fully rendered image: row-major colors clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Packed 8-bit RGB rows for image encoding.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| {
                [
                    (255.99 * c.x) as u8,
                    (255.99 * c.y) as u8,
                    (255.99 * c.z) as u8,
                ]
            })
            .collect()
    }

    pub fn save_png(&self, path: &Path) -> anyhow::Result<()> {
        image::save_buffer(
            path,
            &self.to_rgb8(),
            self.width,
            self.height,
            image::ColorType::Rgb8,
        )?;
        Ok(())
    }

    /// Plain-text PPM (P3) encoding.
    pub fn write_ppm(&self, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "P3\n{} {}\n255", self.width, self.height)?;
        for row in self.to_rgb8().chunks(3) {
            writeln!(out, "{} {} {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// Renders the scene into a pixel buffer.
///
/// The buffer is split into contiguous row bands, one per worker. The
/// scene is read-only during rendering and every worker writes only its
/// own band, so the hot path takes no locks; rayon joins all bands
/// before this function returns.
pub fn render(scene: &Scene, options: &RenderOptions) -> Result<PixelBuffer, RenderError> {
    let camera = Camera::new(scene);
    let width = scene.width as usize;
    let height = scene.height as usize;
    let mut pixels = vec![scene.background; width * height];

    let bands = options
        .threads
        .or_else(|| thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1)
        .max(1);
    let rows_per_band = height.div_ceil(bands).max(1);

    let start = Instant::now();
    pixels
        .par_chunks_mut((rows_per_band * width).max(1))
        .enumerate()
        .try_for_each(|(band, chunk)| -> Result<(), RenderError> {
            let first_row = band * rows_per_band;
            for (dj, row) in chunk.chunks_mut(width).enumerate() {
                let j = (first_row + dj) as u32;
                for (i, pixel) in row.iter_mut().enumerate() {
                    let ray = camera.primary_ray(i as u32, j);
                    let color = shading::trace(scene, ray, 0, &[scene.ambient_ior])?;
                    *pixel = color.clamp(Vec3::ZERO, Vec3::ONE);
                }
            }
            Ok(())
        })?;

    let elapsed = start.elapsed();
    log::info!(
        "rendered {}x{} in {:.2?} across {} bands ({:.2}M pixels/s)",
        scene.width,
        scene.height,
        elapsed,
        bands.min(height),
        (width * height) as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1_000_000.0,
    );

    Ok(PixelBuffer {
        width: scene.width,
        height: scene.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Material, primitives::Sphere};
    use glam::vec3;
    use std::sync::Arc;

    fn sphere_scene(width: u32, height: u32) -> Scene {
        Scene {
            width,
            height,
            eye: Vec3::ZERO,
            view_dir: vec3(0.0, 0.0, -1.0),
            up_dir: vec3(0.0, 1.0, 0.0),
            hfov: 90.0,
            background: vec3(0.05, 0.05, 0.05),
            ambient_ior: 1.0,
            lights: vec![],
            objects: vec![Arc::new(
                Sphere::new(
                    vec3(0.0, 0.0, -5.0),
                    1.0,
                    Material::matte(vec3(0.9, 0.1, 0.1)),
                    None,
                )
                .into(),
            )],
            textures: vec![],
        }
    }

    #[test]
    fn buffer_is_clamped_and_row_major() {
        let buffer = render(&sphere_scene(8, 4), &RenderOptions::default()).unwrap();
        assert_eq!(buffer.pixels().len(), 32);
        for c in buffer.pixels() {
            assert!((0.0..=1.0).contains(&c.x));
            assert!((0.0..=1.0).contains(&c.y));
            assert!((0.0..=1.0).contains(&c.z));
        }
        assert_eq!(buffer.pixel(3, 2), buffer.pixels()[2 * 8 + 3]);
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let scene = sphere_scene(16, 9);
        let one = render(&scene, &RenderOptions { threads: Some(1) }).unwrap();
        let many = render(&scene, &RenderOptions { threads: Some(5) }).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn ppm_header_matches_dimensions() {
        let buffer = render(&sphere_scene(2, 2), &RenderOptions::default()).unwrap();
        let mut out = Vec::new();
        buffer.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));
        assert_eq!(text.lines().count(), 3 + 4);
    }
}
