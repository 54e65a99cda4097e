//! Headless fireworks driver
//! Run with: cargo run --bin fireworks -- [CONFIG.toml] [--frames N] [--dump-config]
//!
//! Simulates a render loop at 60 FPS: the effect is active for the first
//! three quarters of the run and fades out afterwards.

use anyhow::{bail, Context, Result};

use fireworks::constants::physics::FRAME_TIME;
use fireworks::{FireworksConfig, FireworksSystem};

struct Args {
    config_path: Option<String>,
    frames: u32,
    dump_config: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        frames: 600,
        dump_config: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().context("--frames needs a value")?;
                args.frames = value
                    .parse()
                    .with_context(|| format!("invalid frame count '{}'", value))?;
            }
            "--dump-config" => args.dump_config = true,
            other if other.starts_with("--") => bail!("unknown flag '{}'", other),
            path => args.config_path = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => FireworksConfig::load(path)
            .with_context(|| format!("loading fireworks config from {}", path))?,
        None => FireworksConfig::default(),
    };

    if args.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut system = FireworksSystem::new(config).context("creating fireworks system")?;
    let active_frames = args.frames * 3 / 4;
    let frames_per_second = (1.0 / FRAME_TIME).round() as u32;

    for frame in 0..args.frames {
        let active = frame < active_frames;
        system.advance(FRAME_TIME, active);

        // Stand-in for the renderer's upload
        if system.is_dirty() {
            system.mark_uploaded();
        }

        if frame % frames_per_second == 0 {
            let stats = system.stats();
            log::info!(
                "t={:.1}s active={} live={} delayed={} recycles={} visibility={:.3}",
                frame as f32 * FRAME_TIME,
                active,
                stats.live,
                stats.delayed,
                stats.total_recycles,
                stats.visibility,
            );
        }
    }

    let stats = system.stats();
    log::info!(
        "Finished {} frames: {} particles, {} recycles, final visibility {:.3}",
        args.frames,
        stats.total,
        stats.total_recycles,
        stats.visibility,
    );

    Ok(())
}
