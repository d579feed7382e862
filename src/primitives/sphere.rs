use crate::{
    material::Material,
    primitives::next_object_id,
    ray::{Hit, Ray},
};
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Vec3,
    /// Invariant: `radius > 0`, enforced by the scene parser.
    pub radius: f32,
    pub material: Material,
    pub texture: Option<usize>,
    id: u64,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material, texture: Option<usize>) -> Self {
        Self {
            center,
            radius,
            material,
            texture,
            id: next_object_id(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Surface normal at a point on the sphere.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }

    /// Solves the quadratic formed by substituting the ray into the
    /// sphere equation and returns the smaller non-negative root.
    ///
    /// A ray whose origin lies inside the sphere still reports the exit
    /// root, with `inside` set.
    pub fn intersect(&self, ray: Ray) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t_near = (-b - sqrt_d) / (2.0 * a);
        let t_far = (-b + sqrt_d) / (2.0 * a);

        let t = if t_near >= 0.0 {
            t_near
        } else if t_far >= 0.0 {
            t_far
        } else {
            // Both roots behind the origin.
            return None;
        };

        Some(Hit {
            t,
            normal: self.normal_at(ray.at(t)),
            uv: None,
            inside: c < 0.0,
        })
    }
}
