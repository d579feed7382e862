//! Geometric primitives and their ray intersection routines.

mod face;
mod sphere;

pub use face::{Face, Vertex};
pub use sphere::Sphere;

use crate::{material::Material, ray::{Hit, Ray}};
use glam::Vec3;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A process-unique object identity, used to skip self-intersection in
/// shadow tests.
pub(crate) fn next_object_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A scene object, polymorphic over the supported primitive variants.
#[derive(Clone, Debug)]
pub enum Object {
    Sphere(Sphere),
    Face(Face),
}

impl Object {
    pub fn id(&self) -> u64 {
        match self {
            Object::Sphere(s) => s.id(),
            Object::Face(f) => f.id(),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Object::Sphere(s) => &s.material,
            Object::Face(f) => &f.material,
        }
    }

    /// Index into the scene's texture list, if any.
    pub fn texture(&self) -> Option<usize> {
        match self {
            Object::Sphere(s) => s.texture,
            Object::Face(f) => f.texture,
        }
    }

    /// Nearest forward intersection of `ray` with this object.
    pub fn intersect(&self, ray: Ray) -> Option<Hit> {
        match self {
            Object::Sphere(s) => s.intersect(ray),
            Object::Face(f) => f.intersect(ray),
        }
    }

    /// Fallback surface-normal query. The shading path takes the normal
    /// from the intersection result; this serves callers that only have
    /// a surface point.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Object::Sphere(s) => s.normal_at(point),
            Object::Face(f) => f.geometric_normal().normalize(),
        }
    }
}

impl From<Sphere> for Object {
    fn from(s: Sphere) -> Self {
        Object::Sphere(s)
    }
}

impl From<Face> for Object {
    fn from(f: Face) -> Self {
        Object::Face(f)
    }
}
