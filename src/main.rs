use anyhow::{bail, Context};
use std::{env, fs::File, io::BufWriter, path::PathBuf};
use whitted::{parser, render, RenderOptions};

const USAGE: &str = "usage: whitted <scene> [-o OUTPUT] [--threads N]";

struct Args {
    scene: PathBuf,
    output: Option<PathBuf>,
    threads: Option<usize>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut scene = None;
    let mut output = None;
    let mut threads = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = args.next().context("missing value for --output")?;
                output = Some(PathBuf::from(value));
            }
            "--threads" => {
                let value = args.next().context("missing value for --threads")?;
                threads = Some(value.parse().context("invalid value for --threads")?);
            }
            "-h" | "--help" => bail!("{USAGE}"),
            _ if scene.is_none() => scene = Some(PathBuf::from(arg)),
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }

    Ok(Args {
        scene: scene.with_context(|| USAGE.to_owned())?,
        output,
        threads,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let scene = parser::load_scene(&args.scene)?;
    log::info!(
        "loaded {}: {} objects, {} lights, {} textures",
        args.scene.display(),
        scene.objects.len(),
        scene.lights.len(),
        scene.textures.len(),
    );

    let options = RenderOptions {
        threads: args.threads,
    };
    let buffer = render(&scene, &options)?;

    let output = args
        .output
        .unwrap_or_else(|| args.scene.with_extension("png"));
    match output.extension().and_then(|e| e.to_str()) {
        Some("ppm") => {
            let file = File::create(&output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            buffer.write_ppm(BufWriter::new(file))?;
        }
        _ => buffer.save_png(&output)?,
    }

    println!("image saved to {}", output.display());
    Ok(())
}
