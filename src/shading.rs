//! Recursive, depth-bounded Whitted shading.

use crate::{
    error::RenderError,
    math::{self, Color},
    primitives::Object,
    ray::Ray,
    scene::{Scene, SceneHit},
};

/// Recursion ceiling for reflection/refraction rays. This is the sole
/// termination guarantee against scenes such as parallel mirrors.
pub const MAX_DEPTH: u32 = 10;

/// Offset applied to secondary ray origins to avoid self-intersection.
pub const EPSILON: f32 = 1e-4;

/// Shadow attenuation below this contributes nothing visible.
const SHADOW_CUTOFF: f32 = 0.01;

/// Computes the color visible along `ray`.
///
/// `ior_stack` tracks the refractive indices of the media the ray is
/// currently traversing, bottom entry being the scene's ambient index.
/// Each recursive branch receives its own copy, so sibling reflection
/// and refraction calls never observe each other's stack mutations.
pub fn trace(
    scene: &Scene,
    ray: Ray,
    depth: u32,
    ior_stack: &[f32],
) -> Result<Color, RenderError> {
    if depth > MAX_DEPTH {
        return Ok(scene.background);
    }

    match scene.intersect(ray) {
        Some(hit) => shade(scene, &hit, ray, depth, ior_stack),
        None => Ok(scene.background),
    }
}

fn shade(
    scene: &Scene,
    scene_hit: &SceneHit,
    ray: Ray,
    depth: u32,
    ior_stack: &[f32],
) -> Result<Color, RenderError> {
    let object = scene_hit.object;
    let material = object.material();
    let point = ray.at(scene_hit.hit.t);
    let view = -ray.direction.normalize();
    let normal = scene_hit.hit.normal;

    // Texture-mapped diffuse replaces the material's base diffuse.
    let mut diffuse = material.diffuse;
    if let Some(texture) = scene.texture_for(object) {
        let sampled = match object {
            Object::Sphere(_) => Some(texture.sample(math::spherical_uv(normal))),
            Object::Face(_) => scene_hit.hit.uv.map(|uv| texture.sample(uv)),
        };
        if let Some(color) = sampled {
            diffuse = color;
        }
    }

    let ambient = diffuse * material.k_ambient;
    let mut diffuse_sum = Color::ZERO;
    let mut specular_sum = Color::ZERO;

    for light in &scene.lights {
        let (light_dir, distance) = light.direction_from(point);
        let shadow_ray = Ray::new(point + light_dir * EPSILON, light_dir);
        let shadow = shadow_attenuation(scene, object.id(), shadow_ray, distance);

        let lambert = normal.dot(light_dir).max(0.0);
        diffuse_sum += diffuse * lambert * light.color * shadow;

        let half = (light_dir + view).normalize();
        let highlight = normal.dot(half).max(0.0).powf(material.specular_exponent);
        specular_sum += material.specular * highlight * light.color * shadow;
    }

    let local = ambient + diffuse_sum * material.k_diffuse + specular_sum * material.k_specular;

    let mut reflection = Color::ZERO;
    if material.k_specular > 0.0 {
        let dir = math::reflect(ray.direction.normalize(), normal);
        let reflected = Ray::new(point + dir * EPSILON, dir);
        reflection = trace(scene, reflected, depth + 1, ior_stack)? * material.k_specular;
    }

    let mut refraction = Color::ZERO;
    if material.alpha < 1.0 {
        let entering = normal.dot(view) > 0.0;

        // Resolve the boundary indices and the stack the transmitted
        // ray continues with.
        let (n1, n2, next_stack) = if entering {
            let n1 = ior_stack.last().copied().ok_or(RenderError::IorStackUnderflow)?;
            let mut next = ior_stack.to_vec();
            next.push(material.eta);
            (n1, material.eta, next)
        } else {
            // Exiting: pop this medium and continue in the enclosing
            // one. The ambient index at the bottom must remain.
            if ior_stack.len() < 2 {
                return Err(RenderError::IorStackUnderflow);
            }
            let next = ior_stack[..ior_stack.len() - 1].to_vec();
            let n2 = next[next.len() - 1];
            (material.eta, n2, next)
        };

        // Surface normal facing the incident side.
        let facing = if entering { normal } else { -normal };
        let ratio = n1 / n2;
        let cos_i = view.dot(facing);
        let sin2_t = ratio * ratio * (1.0 - cos_i * cos_i);

        match math::refract(-view, facing, ratio) {
            None => {
                // Total internal reflection: all energy goes to the
                // mirror branch, when the material has one.
                if material.k_specular != 0.0 {
                    let fresnel = math::schlick_fresnel(n1, n2, cos_i, 0.0);
                    return Ok(reflection * fresnel);
                }
            }
            Some(dir) => {
                let cos_t = (1.0 - sin2_t).max(0.0).sqrt();
                let fresnel = math::schlick_fresnel(n1, n2, cos_i, cos_t);
                let transmitted = Ray::new(point + dir * EPSILON, dir);
                refraction =
                    trace(scene, transmitted, depth + 1, &next_stack)? * (1.0 - fresnel);
                reflection *= fresnel;
            }
        }
    }

    Ok(local + reflection + refraction)
}

/// Multiplicative opacity attenuation along a shadow ray.
///
/// Scans every object except the shaded one, multiplying in the
/// transparency of each occluder closer than the light, and
/// short-circuits once the remaining contribution is negligible.
fn shadow_attenuation(scene: &Scene, shaded_id: u64, shadow_ray: Ray, distance: f32) -> f32 {
    let mut opacity = 1.0;
    for object in &scene.objects {
        if object.id() == shaded_id {
            continue;
        }
        if let Some(hit) = object.intersect(shadow_ray) {
            if hit.t > 0.0 && hit.t < distance {
                opacity *= 1.0 - object.material().alpha;
                if opacity < SHADOW_CUTOFF {
                    break;
                }
            }
        }
    }
    opacity.clamp(0.0, 1.0)
}
