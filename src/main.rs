//! Ricochet entry point
//!
//! Runs a scene headless for a fixed number of frames and reports the
//! outcome. Rendering is left to whatever consumes `--dump`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use ricochet::{FrameInput, Rotation, Sandbox, SceneConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Spin {
    None,
    Cw,
    Ccw,
}

impl From<Spin> for Rotation {
    fn from(spin: Spin) -> Self {
        match spin {
            Spin::None => Rotation::None,
            Spin::Cw => Rotation::Clockwise,
            Spin::Ccw => Rotation::Counterclockwise,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ricochet", version, about = "Bouncing circles in a rotating box")]
struct Cli {
    /// Scene description (JSON); defaults apply when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 1000)]
    frames: u64,

    /// Override the scene's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Balls to drop at random points before the first frame
    #[arg(long, default_value_t = 0)]
    spawn: usize,

    /// Turn the arena every frame
    #[arg(long, value_enum, default_value = "none")]
    spin: Spin,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Ricochet (headless) starting...");

    let mut scene = match &cli.scene {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = cli.seed {
        scene.seed = seed;
    }
    scene.validate().context("validating scene")?;

    log::info!(
        "Grid {}x{}, neighbour snapshot: {}",
        scene.sim.grid_width_cells,
        scene.sim.grid_height_cells,
        scene.sim.neighbor_snapshot.as_str()
    );

    let mut sandbox = Sandbox::new(scene);
    for _ in 0..cli.spawn {
        let at = sandbox.random_point_in_arena();
        sandbox.spawn_ball(at);
    }

    let input = FrameInput {
        rotate: cli.spin.into(),
        ..Default::default()
    };
    let (mut wall_hits, mut ball_hits) = (0usize, 0usize);
    for _ in 0..cli.frames {
        let stats = sandbox.step(&input);
        wall_hits += stats.wall_hits;
        ball_hits += stats.ball_hits;
    }

    let balls = sandbox.simulation().balls();
    let mean_speed = if balls.is_empty() {
        0.0
    } else {
        balls.iter().map(|b| b.velocity.length()).sum::<f32>() / balls.len() as f32
    };
    log::info!(
        "Ran {} frames: {} balls, {} walls, angle {:.1}°, {} wall hits, {} ball hits, mean speed {:.2}",
        sandbox.frame(),
        balls.len(),
        sandbox.simulation().walls().len(),
        sandbox.angle(),
        wall_hits,
        ball_hits,
        mean_speed
    );

    if cli.dump {
        let json = serde_json::to_string_pretty(&sandbox.snapshot())
            .context("serializing snapshot")?;
        println!("{json}");
    }

    Ok(())
}
