use glam::{Vec2, Vec3};

/// The ray data type.
///
/// Callers are not required to pre-normalize `direction`; the
/// intersection math tolerates any non-zero length, and
/// direction-sensitive formulas normalize before use.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// The point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Per-object intersection data consumed by the shading engine.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    /// Intersection parameter along the ray, `>= 0`.
    pub t: f32,
    /// Unit surface normal: interpolated for faces with vertex normals,
    /// geometric otherwise.
    pub normal: Vec3,
    /// Barycentric-interpolated texture coordinate, when the surface
    /// carries one.
    pub uv: Option<Vec2>,
    /// Whether the ray origin lies inside the object.
    pub inside: bool,
}
