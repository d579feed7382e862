//! Vector and color helpers on top of [`glam`].

use glam::{vec2, Vec2, Vec3};
use std::f32::consts::PI;

/// Colors are plain vectors; channels are unbounded during shading and
/// only clamped to `[0, 1]` at the final pixel write.
pub type Color = Vec3;

/// Reflect vector `v` around normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `incident` through a surface with unit normal `n` (facing the
/// incident side) and refraction ratio `eta_ratio = n1 / n2`.
///
/// Returns `None` on total internal reflection; the caller falls back to
/// [`reflect`].
pub fn refract(incident: Vec3, n: Vec3, eta_ratio: f32) -> Option<Vec3> {
    let incident = incident.normalize();
    let cos_i = -incident.dot(n);
    let sin2_t = eta_ratio * eta_ratio * (1.0 - cos_i * cos_i);

    if sin2_t > 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    Some(eta_ratio * incident + (eta_ratio * cos_i - cos_t) * n)
}

/// Schlick's approximation of the Fresnel reflectance at a boundary
/// between media with indices `n1` and `n2`.
///
/// Uses the cosine on the denser side of the boundary: the incident
/// angle when `n1 > n2`, the transmitted angle otherwise.
pub fn schlick_fresnel(n1: f32, n2: f32, cos_i: f32, cos_t: f32) -> f32 {
    let r0 = (n1 - n2) / (n1 + n2);
    let r0 = r0 * r0;
    let x = 1.0 - if n1 > n2 { cos_i } else { cos_t };
    r0 + (1.0 - r0) * x.powi(5)
}

/// Spherical texture coordinates from a unit surface normal.
pub fn spherical_uv(n: Vec3) -> Vec2 {
    let phi = n.z.clamp(-1.0, 1.0).acos();
    let theta = n.y.atan2(n.x);
    vec2(theta / (2.0 * PI) + 0.5, phi / PI)
}
