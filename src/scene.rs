use crate::{
    math::Color,
    primitives::Object,
    ray::{Hit, Ray},
    texture::Texture,
};
use glam::Vec3;
use std::sync::Arc;

/// Light source variant, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    /// Position for point lights; the direction of travel for
    /// directional lights.
    pub pos: Vec3,
    pub color: Color,
    pub kind: LightKind,
}

impl Light {
    /// Unit direction from a surface point toward the light and the
    /// distance to it (infinite for directional lights).
    pub fn direction_from(&self, point: Vec3) -> (Vec3, f32) {
        match self.kind {
            LightKind::Directional => ((-self.pos).normalize(), f32::INFINITY),
            LightKind::Point => ((self.pos - point).normalize(), self.pos.distance(point)),
        }
    }
}

/// An immutable scene snapshot, shared read-only by all render workers.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub eye: Vec3,
    pub view_dir: Vec3,
    pub up_dir: Vec3,
    /// Horizontal field of view, degrees.
    pub hfov: f32,
    pub background: Color,
    /// Refractive index of the medium surrounding the scene.
    pub ambient_ior: f32,
    pub lights: Vec<Light>,
    pub objects: Vec<Arc<Object>>,
    pub textures: Vec<Texture>,
}

/// A scene-level hit: the per-object intersection data plus the object
/// that produced it.
#[derive(Clone, Debug)]
pub struct SceneHit<'a> {
    pub object: &'a Object,
    pub hit: Hit,
}

impl Scene {
    /// Nearest forward hit over a linear scan of all objects.
    pub fn intersect(&self, ray: Ray) -> Option<SceneHit<'_>> {
        let mut nearest: Option<SceneHit> = None;
        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                if hit.t > 0.0 && nearest.as_ref().is_none_or(|n| hit.t < n.hit.t) {
                    nearest = Some(SceneHit { object, hit });
                }
            }
        }
        nearest
    }

    /// The texture attached to `object`, if any.
    pub fn texture_for(&self, object: &Object) -> Option<&Texture> {
        object.texture().and_then(|i| self.textures.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{material::Material, primitives::Sphere};
    use glam::vec3;

    fn two_sphere_scene() -> Scene {
        let material = Material::matte(vec3(1.0, 1.0, 1.0));
        Scene {
            width: 1,
            height: 1,
            eye: Vec3::ZERO,
            view_dir: vec3(0.0, 0.0, -1.0),
            up_dir: vec3(0.0, 1.0, 0.0),
            hfov: 90.0,
            background: Color::ZERO,
            ambient_ior: 1.0,
            lights: vec![],
            objects: vec![
                Arc::new(Sphere::new(vec3(0.0, 0.0, -10.0), 1.0, material, None).into()),
                Arc::new(Sphere::new(vec3(0.0, 0.0, -5.0), 1.0, material, None).into()),
            ],
            textures: vec![],
        }
    }

    #[test]
    fn intersect_keeps_the_nearest_hit() {
        let scene = two_sphere_scene();
        let hit = scene
            .intersect(Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0)))
            .unwrap();
        assert_eq!(hit.hit.t, 4.0);
        assert_eq!(hit.object.id(), scene.objects[1].id());
    }

    #[test]
    fn intersect_misses_cleanly() {
        let scene = two_sphere_scene();
        assert!(scene
            .intersect(Ray::new(Vec3::ZERO, vec3(0.0, 1.0, 0.0)))
            .is_none());
    }

    #[test]
    fn directional_light_distance_is_infinite() {
        let light = Light {
            pos: vec3(0.0, -1.0, 0.0),
            color: vec3(1.0, 1.0, 1.0),
            kind: LightKind::Directional,
        };
        let (dir, dist) = light.direction_from(Vec3::ZERO);
        assert!((dir - vec3(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!(dist.is_infinite());
    }
}
