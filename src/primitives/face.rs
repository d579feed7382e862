use crate::{
    material::Material,
    primitives::next_object_id,
    ray::{Hit, Ray},
};
use glam::{Vec2, Vec3};

/// A triangle corner: position plus optional per-vertex attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Option<Vec3>,
    pub uv: Option<Vec2>,
}

impl Vertex {
    pub fn at(pos: Vec3) -> Self {
        Self {
            pos,
            normal: None,
            uv: None,
        }
    }
}

/// A triangular face. Shading is interpolated (Phong) when all three
/// vertices carry normals, flat otherwise.
#[derive(Clone, Debug)]
pub struct Face {
    pub v0: Vertex,
    pub v1: Vertex,
    pub v2: Vertex,
    pub material: Material,
    pub texture: Option<usize>,
    id: u64,
}

impl Face {
    pub fn new(
        v0: Vertex,
        v1: Vertex,
        v2: Vertex,
        material: Material,
        texture: Option<usize>,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            material,
            texture,
            id: next_object_id(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn has_normals(&self) -> bool {
        self.v0.normal.is_some() && self.v1.normal.is_some() && self.v2.normal.is_some()
    }

    fn has_uvs(&self) -> bool {
        self.v0.uv.is_some() && self.v1.uv.is_some() && self.v2.uv.is_some()
    }

    /// Unnormalized cross-product normal of two edge vectors.
    pub fn geometric_normal(&self) -> Vec3 {
        (self.v1.pos - self.v0.pos).cross(self.v2.pos - self.v0.pos)
    }

    /// Plane/barycentric triangle test.
    ///
    /// Solves the plane equation for `t`, rejects rays orthogonal to the
    /// plane normal and hits behind the origin, validates containment
    /// with three edge-cross sign tests, then interpolates per-vertex
    /// attributes with barycentric weights from signed sub-triangle
    /// areas (the weights sum to 1 for any accepted point).
    pub fn intersect(&self, ray: Ray) -> Option<Hit> {
        let n = self.geometric_normal();
        let denom = n.dot(ray.direction);
        if denom == 0.0 {
            return None;
        }

        let d = n.dot(self.v0.pos);
        let t = (d - n.dot(ray.origin)) / denom;
        if t < 0.0 {
            return None;
        }
        let p = ray.at(t);

        // Inside-outside edge tests against the plane normal.
        let edges = [
            (self.v1.pos - self.v0.pos, p - self.v0.pos),
            (self.v2.pos - self.v1.pos, p - self.v1.pos),
            (self.v0.pos - self.v2.pos, p - self.v2.pos),
        ];
        for (edge, to_p) in edges {
            if n.dot(edge.cross(to_p)) < 0.0 {
                return None;
            }
        }

        // Barycentric weights by sub-triangle areas. `w0` weights `v0`
        // (the sub-triangle opposite it), and so on.
        let area = n.length();
        let w0 = (self.v2.pos - self.v1.pos).cross(p - self.v1.pos).length() / area;
        let w1 = (self.v0.pos - self.v2.pos).cross(p - self.v2.pos).length() / area;
        let w2 = 1.0 - w0 - w1;

        let normal = if self.has_normals() {
            (self.v0.normal.unwrap_or_default() * w0
                + self.v1.normal.unwrap_or_default() * w1
                + self.v2.normal.unwrap_or_default() * w2)
                .normalize()
        } else {
            n.normalize()
        };

        let uv = if self.has_uvs() {
            Some(
                self.v0.uv.unwrap_or_default() * w0
                    + self.v1.uv.unwrap_or_default() * w1
                    + self.v2.uv.unwrap_or_default() * w2,
            )
        } else {
            None
        };

        Some(Hit {
            t,
            normal,
            uv,
            inside: false,
        })
    }
}
