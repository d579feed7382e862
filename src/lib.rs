//! A multithreaded Whitted-style ray tracer.
//!
//! Scenes are described in a line-oriented text format (see [`parser`]),
//! rendered by casting one primary ray per pixel and shading hits
//! recursively with Blinn-Phong local illumination, shadow opacity
//! attenuation, and Fresnel-weighted reflection/refraction.

pub mod camera;
pub mod error;
pub mod material;
pub mod math;
pub mod parser;
pub mod primitives;
pub mod ray;
pub mod render;
pub mod scene;
pub mod shading;
pub mod texture;

pub use crate::{
    camera::Camera,
    error::RenderError,
    material::Material,
    math::Color,
    primitives::{Face, Object, Sphere, Vertex},
    ray::{Hit, Ray},
    render::{render, PixelBuffer, RenderOptions},
    scene::{Light, LightKind, Scene},
};
