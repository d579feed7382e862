//! End-to-end rendering scenarios.

use glam::{vec3, Vec3};
use std::{path::Path, sync::Arc};
use whitted::{
    parser, render, Color, Face, Light, LightKind, Material, Object, RenderOptions, Scene, Sphere,
    Vertex,
};

fn base_scene(width: u32, height: u32, background: Color) -> Scene {
    Scene {
        width,
        height,
        eye: Vec3::ZERO,
        view_dir: vec3(0.0, 0.0, -1.0),
        up_dir: vec3(0.0, 1.0, 0.0),
        hfov: 90.0,
        background,
        ambient_ior: 1.0,
        lights: vec![],
        objects: vec![],
        textures: vec![],
    }
}

fn brightness(c: Color) -> f32 {
    c.x + c.y + c.z
}

#[test]
fn lit_sphere_outshines_the_background() {
    // A single opaque diffuse sphere straight ahead, lit head-on by a
    // directional light. At 2x2 with a 90 degree window, exactly one
    // pixel looks down the view axis and hits the sphere; the others
    // miss and show the background.
    let mut scene = base_scene(2, 2, vec3(0.02, 0.02, 0.02));
    scene.objects.push(Arc::new(
        Sphere::new(
            vec3(0.0, 0.0, -5.0),
            1.0,
            Material {
                diffuse: vec3(0.9, 0.9, 0.9),
                specular: Color::ZERO,
                k_ambient: 0.1,
                k_diffuse: 0.8,
                k_specular: 0.0,
                specular_exponent: 1.0,
                eta: 1.0,
                alpha: 1.0,
            },
            None,
        )
        .into(),
    ));
    scene.lights.push(Light {
        pos: vec3(0.0, 0.0, -1.0),
        color: Vec3::ONE,
        kind: LightKind::Directional,
    });

    let buffer = render(&scene, &RenderOptions::default()).unwrap();

    let center = buffer.pixel(1, 1);
    for (x, y) in [(0, 0), (1, 0), (0, 1)] {
        let corner = buffer.pixel(x, y);
        assert_eq!(corner, vec3(0.02, 0.02, 0.02), "pixel ({x}, {y})");
        assert!(brightness(center) > brightness(corner));
    }
    // Head-on: ambient 0.09 + diffuse 0.72.
    assert!((center.x - 0.81).abs() < 1e-3);
}

#[test]
fn transparent_sphere_refracts_the_background() {
    // Fully transparent glass sphere, no lights. The visible color must
    // be the Fresnel-attenuated background reached through two balanced
    // entry/exit refraction events, not the raw background.
    let background = vec3(0.5, 0.2, 0.8);
    let mut scene = base_scene(2, 2, background);
    scene.objects.push(Arc::new(
        Sphere::new(
            vec3(0.0, 0.0, -5.0),
            1.0,
            Material {
                diffuse: Vec3::ONE,
                specular: Color::ZERO,
                k_ambient: 0.0,
                k_diffuse: 0.0,
                k_specular: 0.0,
                specular_exponent: 1.0,
                eta: 1.5,
                alpha: 0.0,
            },
            None,
        )
        .into(),
    ));

    let buffer = render(&scene, &RenderOptions::default()).unwrap();
    let through_glass = buffer.pixel(1, 1);

    // Still background-hued, but strictly attenuated.
    assert!(through_glass != background);
    assert!(brightness(through_glass) > 0.0);
    assert!(brightness(through_glass) < brightness(background));
    let expected = background * (1.0 - 0.04) * (1.0 - 0.04);
    assert!((through_glass - expected).length() < 1e-2);
}

#[test]
fn parallel_mirrors_terminate_at_the_depth_cap() {
    // Two specular faces facing each other with the eye between them.
    // The bounded recursion depth is the only thing that stops the
    // reflection ping-pong.
    let mirror = Material {
        diffuse: vec3(0.1, 0.1, 0.1),
        specular: Vec3::ONE,
        k_ambient: 0.1,
        k_diffuse: 0.1,
        k_specular: 0.8,
        specular_exponent: 100.0,
        eta: 1.0,
        alpha: 1.0,
    };
    let quad = |z: f32, flip: bool| -> Vec<Object> {
        let (a, b, c, d) = (
            vec3(-50.0, -50.0, z),
            vec3(50.0, -50.0, z),
            vec3(50.0, 50.0, z),
            vec3(-50.0, 50.0, z),
        );
        let tri = |p0, p1, p2| {
            Face::new(
                Vertex::at(p0),
                Vertex::at(p1),
                Vertex::at(p2),
                mirror,
                None,
            )
            .into()
        };
        if flip {
            vec![tri(a, d, c), tri(a, c, b)]
        } else {
            vec![tri(a, b, c), tri(a, c, d)]
        }
    };

    let mut scene = base_scene(2, 2, vec3(0.3, 0.0, 0.0));
    for face in quad(-10.0, false).into_iter().chain(quad(10.0, true)) {
        scene.objects.push(Arc::new(face));
    }

    let buffer = render(&scene, &RenderOptions::default()).unwrap();
    for c in buffer.pixels() {
        assert!(c.x.is_finite() && c.y.is_finite() && c.z.is_finite());
        assert!((0.0..=1.0).contains(&c.x));
    }
}

#[test]
fn rendering_is_deterministic_across_worker_counts() {
    let mut scene = base_scene(24, 16, vec3(0.1, 0.1, 0.15));
    scene.objects.push(Arc::new(
        Sphere::new(
            vec3(-0.5, 0.0, -4.0),
            1.0,
            Material {
                diffuse: vec3(0.8, 0.2, 0.2),
                specular: Vec3::ONE,
                k_ambient: 0.2,
                k_diffuse: 0.6,
                k_specular: 0.3,
                specular_exponent: 30.0,
                eta: 1.5,
                alpha: 0.6,
            },
            None,
        )
        .into(),
    ));
    scene.objects.push(Arc::new(
        Sphere::new(vec3(1.0, 0.5, -6.0), 1.5, Material::matte(vec3(0.2, 0.7, 0.3)), None).into(),
    ));
    scene.lights.push(Light {
        pos: vec3(5.0, 5.0, 0.0),
        color: Vec3::ONE,
        kind: LightKind::Point,
    });

    let reference = render(&scene, &RenderOptions { threads: Some(1) }).unwrap();
    for threads in [2, 3, 8] {
        let other = render(
            &scene,
            &RenderOptions {
                threads: Some(threads),
            },
        )
        .unwrap();
        assert_eq!(reference, other, "threads = {threads}");
    }
}

#[test]
fn parsed_scene_renders_like_the_built_one() {
    let text = "\
imsize 8 8
eye 0 0 0
viewdir 0 0 -1
updir 0 1 0
hfov 90
bkgcolor 0.02 0.02 0.02 1.0
light 0 0 -1 0 1 1 1
mtlcolor 0.9 0.9 0.9  0 0 0  0.1 0.8 0 1 1 1
sphere 0 0 -5 1
";
    let scene = parser::parse_scene(text, Path::new(".")).unwrap();
    let buffer = render(&scene, &RenderOptions::default()).unwrap();

    let lit = (0..8)
        .flat_map(|y| (0..8).map(move |x| (x, y)))
        .filter(|&(x, y)| buffer.pixel(x, y) != vec3(0.02, 0.02, 0.02))
        .count();
    assert!(lit > 0, "some pixels must hit the sphere");
    assert!(lit < 64, "some pixels must miss the sphere");
}
