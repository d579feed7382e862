use crate::math::Color;

/// Blinn-Phong surface parameters, fixed at parse time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base diffuse color, replaced by a texture sample when the object
    /// carries a texture.
    pub diffuse: Color,
    pub specular: Color,
    pub k_ambient: f32,
    pub k_diffuse: f32,
    pub k_specular: f32,
    /// Blinn specular exponent (shininess).
    pub specular_exponent: f32,
    /// Index of refraction.
    pub eta: f32,
    /// Opacity in `[0, 1]`; 1 is fully opaque.
    pub alpha: f32,
}

impl Material {
    /// A matte, fully opaque material with the given diffuse color.
    pub fn matte(diffuse: Color) -> Self {
        Self {
            diffuse,
            specular: Color::ZERO,
            k_ambient: 0.1,
            k_diffuse: 0.9,
            k_specular: 0.0,
            specular_exponent: 1.0,
            eta: 1.0,
            alpha: 1.0,
        }
    }
}
