//! Line-oriented scene description parser.
//!
//! ```text
//! imsize 640 480
//! eye 0 0 0
//! viewdir 0 0 -1
//! updir 0 1 0
//! hfov 60
//! bkgcolor 0.1 0.1 0.2 1.0
//! light 0 5 0 1 1 1 1
//! mtlcolor 1 0 0  1 1 1  0.2 0.6 0.2 20 1 1
//! sphere 0 0 -5 1
//! ```
//!
//! `mtlcolor` sets the material for the objects that follow (and clears
//! any current texture); `texture` attaches an image to them. Vertices,
//! normals, and texture coordinates accumulate into 1-based arrays
//! referenced by `f` entries in the `v`, `v/vt`, `v//vn`, and `v/vt/vn`
//! forms.
//!
//! The parser enforces every precondition the render core assumes:
//! positive image dimensions and sphere radii, opacity within `[0, 1]`,
//! non-degenerate camera vectors, and in-range indices.

use crate::{
    material::Material,
    math::Color,
    primitives::{Face, Object, Sphere, Vertex},
    scene::{Light, LightKind, Scene},
    texture::Texture,
};
use anyhow::{bail, ensure, Context};
use glam::{vec2, Vec2, Vec3};
use std::{
    fs,
    path::Path,
    sync::Arc,
};

/// Loads and validates a scene file. Texture paths are resolved
/// relative to the scene file's directory.
pub fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scene file {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_scene(&text, base)
        .with_context(|| format!("failed to parse scene file {}", path.display()))
}

/// Parses scene text; `base` anchors relative texture paths.
pub fn parse_scene(text: &str, base: &Path) -> anyhow::Result<Scene> {
    let mut builder = SceneBuilder::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        builder
            .line(line, base)
            .with_context(|| format!("line {}: {:?}", number + 1, line))?;
    }

    builder.finish()
}

#[derive(Default)]
struct SceneBuilder {
    imsize: Option<(u32, u32)>,
    eye: Option<Vec3>,
    view_dir: Option<Vec3>,
    up_dir: Option<Vec3>,
    hfov: Option<f32>,
    background: Option<(Color, f32)>,
    lights: Vec<Light>,
    objects: Vec<Arc<Object>>,
    textures: Vec<Texture>,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    material: Option<Material>,
    texture: Option<usize>,
}

impl SceneBuilder {
    fn line(&mut self, line: &str, base: &Path) -> anyhow::Result<()> {
        let mut parts = line.split_whitespace();
        let keyword = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match keyword {
            "imsize" => {
                let [w, h] = numbers(&args)?;
                ensure!(w >= 1.0 && h >= 1.0, "image dimensions must be positive");
                self.imsize = Some((w as u32, h as u32));
            }
            "eye" => self.eye = Some(vector(&args)?),
            "viewdir" => self.view_dir = Some(vector(&args)?),
            "updir" => self.up_dir = Some(vector(&args)?),
            "hfov" => {
                let [fov] = numbers(&args)?;
                ensure!(fov > 0.0 && fov < 180.0, "hfov must be in (0, 180)");
                self.hfov = Some(fov);
            }
            "bkgcolor" => {
                let [r, g, b, ior] = numbers(&args)?;
                ensure!(ior > 0.0, "ambient refraction index must be positive");
                self.background = Some((Vec3::new(r, g, b), ior));
            }
            "light" => {
                let [x, y, z, w, r, g, b] = numbers(&args)?;
                self.lights.push(Light {
                    pos: Vec3::new(x, y, z),
                    color: Vec3::new(r, g, b),
                    kind: if w == 1.0 {
                        LightKind::Point
                    } else {
                        LightKind::Directional
                    },
                });
            }
            "mtlcolor" => {
                let [odr, odg, odb, osr, osg, osb, ka, kd, ks, n, alpha, eta] = numbers(&args)?;
                ensure!((0.0..=1.0).contains(&alpha), "alpha must be in [0, 1]");
                self.material = Some(Material {
                    diffuse: Vec3::new(odr, odg, odb),
                    specular: Vec3::new(osr, osg, osb),
                    k_ambient: ka,
                    k_diffuse: kd,
                    k_specular: ks,
                    specular_exponent: n,
                    eta,
                    alpha,
                });
                // A new material block starts untextured.
                self.texture = None;
            }
            "texture" => {
                let &[file] = args.as_slice() else {
                    bail!("texture expects a file name");
                };
                self.textures.push(Texture::open(&base.join(file))?);
                self.texture = Some(self.textures.len() - 1);
            }
            "sphere" => {
                let [x, y, z, radius] = numbers(&args)?;
                ensure!(radius > 0.0, "sphere radius must be positive");
                let material = self.current_material()?;
                self.objects.push(Arc::new(
                    Sphere::new(Vec3::new(x, y, z), radius, material, self.texture).into(),
                ));
            }
            "v" => self.vertices.push(vector(&args)?),
            "vn" => {
                let n = vector(&args)?;
                ensure!(n != Vec3::ZERO, "vertex normal must be non-zero");
                self.normals.push(n.normalize());
            }
            "vt" => {
                let [u, v] = numbers(&args)?;
                self.uvs.push(vec2(u, v));
            }
            "f" => {
                ensure!(args.len() == 3, "face expects three vertex references");
                let material = self.current_material()?;
                let v0 = self.face_vertex(args[0])?;
                let v1 = self.face_vertex(args[1])?;
                let v2 = self.face_vertex(args[2])?;
                let textured = v0.uv.is_some() && v1.uv.is_some() && v2.uv.is_some();
                self.objects.push(Arc::new(
                    Face::new(v0, v1, v2, material, self.texture.filter(|_| textured)).into(),
                ));
            }
            other => bail!("unknown keyword {:?}", other),
        }

        Ok(())
    }

    fn current_material(&self) -> anyhow::Result<Material> {
        self.material
            .context("object declared before any mtlcolor")
    }

    /// Resolves one `f` token: `v`, `v/vt`, `v//vn`, or `v/vt/vn`,
    /// with 1-based indices.
    fn face_vertex(&self, token: &str) -> anyhow::Result<Vertex> {
        let fields: Vec<&str> = token.split('/').collect();
        ensure!(
            (1..=3).contains(&fields.len()),
            "malformed face reference {:?}",
            token
        );

        let pos = *indexed(&self.vertices, fields[0], "vertex")?;
        let uv = match fields.get(1) {
            Some(&"") | None => None,
            Some(field) => Some(*indexed(&self.uvs, field, "texture coordinate")?),
        };
        let normal = match fields.get(2) {
            None => None,
            Some(field) => Some(*indexed(&self.normals, field, "normal")?),
        };

        Ok(Vertex { pos, normal, uv })
    }

    fn finish(self) -> anyhow::Result<Scene> {
        let (width, height) = self.imsize.context("missing imsize")?;
        let eye = self.eye.context("missing eye")?;
        let view_dir = self.view_dir.context("missing viewdir")?;
        let up_dir = self.up_dir.context("missing updir")?;
        let hfov = self.hfov.context("missing hfov")?;
        let (background, ambient_ior) = self.background.context("missing bkgcolor")?;

        ensure!(view_dir != Vec3::ZERO, "viewdir must be non-zero");
        ensure!(up_dir != Vec3::ZERO, "updir must be non-zero");
        ensure!(
            up_dir.cross(view_dir).length_squared() > f32::EPSILON,
            "updir must not be parallel to viewdir"
        );

        Ok(Scene {
            width,
            height,
            eye,
            view_dir,
            up_dir,
            hfov,
            background,
            ambient_ior,
            lights: self.lights,
            objects: self.objects,
            textures: self.textures,
        })
    }
}

fn numbers<const N: usize>(args: &[&str]) -> anyhow::Result<[f32; N]> {
    ensure!(
        args.len() == N,
        "expected {} numeric arguments, got {}",
        N,
        args.len()
    );
    let mut out = [0.0; N];
    for (slot, raw) in out.iter_mut().zip(args) {
        *slot = raw
            .parse()
            .with_context(|| format!("invalid number {:?}", raw))?;
    }
    Ok(out)
}

fn vector(args: &[&str]) -> anyhow::Result<Vec3> {
    let [x, y, z] = numbers(args)?;
    Ok(Vec3::new(x, y, z))
}

fn indexed<'a, T>(items: &'a [T], raw: &str, what: &str) -> anyhow::Result<&'a T> {
    let index: usize = raw
        .parse()
        .with_context(|| format!("invalid {} index {:?}", what, raw))?;
    ensure!(index >= 1, "{} indices are 1-based", what);
    items
        .get(index - 1)
        .with_context(|| format!("{} index {} out of range", what, index))
}
