//! Material state tracer
//!
//! Runs one scene over a handful of representative materials and prints the
//! pipeline state each one produces. Useful when tuning mapper heuristics.
//!
//! Usage: material_trace [config.toml|config.ron] [--classic] [--shader] [--brightness <pct>]

use std::env;
use std::process;

use material_mapper::foundation::logging;
use material_mapper::prelude::*;

struct Options {
    config_path: Option<String>,
    classic: bool,
    shader: bool,
    brightness: f32,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config_path: None,
        classic: false,
        shader: false,
        brightness: 50.0,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--classic" => options.classic = true,
            "--shader" => options.shader = true,
            "--brightness" => {
                let value = iter.next().ok_or("--brightness needs a value")?;
                options.brightness = value
                    .parse()
                    .map_err(|_| format!("invalid brightness {:?}", value))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            path => options.config_path = Some(path.to_string()),
        }
    }
    Ok(options)
}

fn sample_materials() -> Vec<(MaterialRecord, MeshDescriptor)> {
    let lit = MeshDescriptor::new().with_normals();
    vec![
        (MaterialRecord::new("empty"), lit),
        (
            MaterialRecord::new("zero_alpha").with_diffuse(Color4::new(0.8, 0.2, 0.2, 0.0)),
            lit,
        ),
        (MaterialRecord::new("glass").with_opacity(0.35), lit),
        (
            MaterialRecord::new("black_textured")
                .with_diffuse(Color4::BLACK)
                .with_texture(TextureKind::Diffuse, "wood.png"),
            lit,
        ),
        (
            MaterialRecord::new("foliage")
                .with_texture(TextureKind::Diffuse, "leaf.png")
                .with_texture(TextureKind::Opacity, "leaf_mask.png"),
            lit,
        ),
        (
            MaterialRecord::new("painted").with_shininess(90.0).with_shininess_strength(2.0),
            MeshDescriptor::new().with_normals().with_vertex_colors(1),
        ),
        (MaterialRecord::new("point_cloud"), MeshDescriptor::new()),
    ]
}

fn sample_textures() -> TextureSet {
    let mut textures = TextureSet::new();
    textures.add("wood.png");
    textures.mark_uploaded("wood.png", TextureHandle(1));
    textures.add("leaf.png");
    textures.mark_uploaded("leaf.png", TextureHandle(2));
    textures.set_alpha("leaf.png", material_mapper::render::AlphaState::HasAlpha);
    textures
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config_path {
        Some(path) => MapperConfig::load(path)?,
        None if options.classic => MapperConfig::classic(),
        None => MapperConfig::revised(),
    };

    let caps = if options.shader {
        RendererCaps::programmable()
    } else {
        RendererCaps::fixed_function()
    };

    let textures = sample_textures();
    let mut mapper = create_mapper(&caps, &textures, config.clone())?;
    let mut state = RecordingState::new();
    let context = RenderContext::new(Mat4::identity(), options.brightness);

    mapper.begin_scene(&mut state, &context)?;
    println!("== begin_scene ({:?})", mapper.kind());
    for command in state.commands() {
        println!("   {:?}", command);
    }

    for (material, mesh) in sample_materials() {
        state.clear_commands();
        mapper.apply_material(&mut state, Some(&mesh), &material, true, true)?;
        println!(
            "== {} (alpha: {})",
            material.name,
            is_alpha_material(&material, &textures, &config)
        );
        for command in state.commands() {
            println!("   {:?}", command);
        }
    }

    mapper.end_scene(&mut state)?;
    mapper.dispose();
    Ok(())
}

fn main() {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: material_trace [config.toml|config.ron] [--classic] [--shader] [--brightness <pct>]");
            process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        log::error!("material_trace failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["mapper.toml", "--shader", "--brightness", "80"])).unwrap();
        assert_eq!(options.config_path.as_deref(), Some("mapper.toml"));
        assert!(options.shader);
        assert!(!options.classic);
        assert_eq!(options.brightness, 80.0);
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--brightness"])).is_err());
        assert!(parse_args(&args(&["--brightness", "bright"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_trace_runs_both_mappers() {
        logging::init_with_filter("warn");
        let fixed = parse_args(&args(&["--classic"])).unwrap();
        run(&fixed).unwrap();
        let shader = parse_args(&args(&["--shader"])).unwrap();
        run(&shader).unwrap();
    }
}
