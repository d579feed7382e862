use crate::{ray::Ray, scene::Scene};
use glam::Vec3;

/// Precomputed image-plane basis for primary ray generation.
///
/// The viewing window sits at distance 1 along the view direction, with
/// horizontal extent `2 tan(hfov / 2)` and vertical extent derived from
/// the aspect ratio. Pixel (0, 0) samples the window's upper-left
/// corner; rows advance down, columns across.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    eye: Vec3,
    upper_left: Vec3,
    delta_h: Vec3,
    delta_v: Vec3,
}

impl Camera {
    /// Builds the basis from the scene's camera parameters. The parser
    /// guarantees the view and up directions are non-zero and not
    /// parallel.
    pub fn new(scene: &Scene) -> Self {
        let view = scene.view_dir.normalize();
        let u = scene.up_dir.cross(view).normalize();
        let v = u.cross(view).normalize();

        let aspect = scene.width as f32 / scene.height as f32;
        let window_w = 2.0 * (scene.hfov.to_radians() / 2.0).tan();
        let window_h = window_w / aspect;

        Self {
            eye: scene.eye,
            upper_left: scene.eye + view - u * (window_w / 2.0) + v * (window_h / 2.0),
            delta_h: u * (window_w / scene.width as f32),
            delta_v: v * (window_h / scene.height as f32),
        }
    }

    /// The primary ray through pixel `(i, j)`.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        let p = self.upper_left + self.delta_h * i as f32 - self.delta_v * j as f32;
        Ray::new(self.eye, (p - self.eye).normalize())
    }
}
