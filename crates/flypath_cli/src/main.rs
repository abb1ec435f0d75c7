//! Flypath CLI
//!
//! Fit, sample and fly camera paths headlessly from scene files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flypath_core::CameraPose;
use flypath_flight::{FlightController, RunnerStatus, SeparatingLine, TickOutcome};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::Scene;

/// Height of guide-line waypoints above the ground
const LINE_ELEVATION: f32 = 3.0;

#[derive(Parser)]
#[command(name = "flypath")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Path-guided camera flythrough simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fly the camera through a scene's control points
    Fly {
        /// Scene file
        scene: PathBuf,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Write every frame's pose to a JSON file
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Print the waypoints sampled from a scene
    Sample {
        /// Scene file
        scene: PathBuf,

        /// Print as JSON instead of one waypoint per line
        #[arg(long)]
        json: bool,
    },

    /// Fly along a classifier's separating line `w0·x + w1·y + b = 0`
    Line {
        #[arg(long, allow_hyphen_values = true)]
        w0: f32,

        #[arg(long, allow_hyphen_values = true)]
        w1: f32,

        #[arg(long, allow_hyphen_values = true)]
        b: f32,

        /// Plot-space distance between line waypoints
        #[arg(long, default_value = "2")]
        step: f32,

        /// Scene supplying the ground, flight and camera settings
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Write every frame's pose to a JSON file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Fly { scene, fps, trace } => cmd_fly(&scene, fps, trace.as_deref()),

        Commands::Sample { scene, json } => cmd_sample(&scene, json),

        Commands::Line {
            w0,
            w1,
            b,
            step,
            scene,
            fps,
            trace,
        } => cmd_line(SeparatingLine::new([w0, w1], b), step, scene.as_deref(), fps, trace.as_deref()),
    }
}

fn cmd_fly(scene_path: &Path, fps: u32, trace: Option<&Path>) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    info!(
        "Loaded {} with {} control points",
        scene_path.display(),
        scene.points.len()
    );

    let controller = scene.controller();
    if controller.waypoints().len() < 2 {
        anyhow::bail!(
            "{} does not produce a flyable path (need at least 2 distinct control points)",
            scene_path.display()
        );
    }
    simulate(controller, fps, trace)
}

fn cmd_sample(scene_path: &Path, json: bool) -> Result<()> {
    let scene = Scene::load(scene_path)?;
    let controller = scene.controller();
    let waypoints = controller.waypoints();

    if json {
        let out = serde_json::to_string_pretty(waypoints).context("Failed to serialize waypoints")?;
        println!("{}", out);
    } else {
        for waypoint in waypoints {
            let p = waypoint.position;
            println!("{:>10.4}  {:>10.4} {:>10.4} {:>10.4}", waypoint.t, p.x, p.y, p.z);
        }
    }
    info!("{} waypoints", waypoints.len());
    Ok(())
}

fn cmd_line(
    line: SeparatingLine,
    step: f32,
    scene_path: Option<&Path>,
    fps: u32,
    trace: Option<&Path>,
) -> Result<()> {
    let scene = match scene_path {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };

    let waypoints = line
        .waypoints(&scene.ground, step, LINE_ELEVATION)
        .context("Failed to plot separating line")?;
    info!(
        "Separating line w = [{}, {}], b = {}: {} waypoints",
        line.w[0],
        line.w[1],
        line.b,
        waypoints.len()
    );

    let mut controller = FlightController::new(scene.session(), scene.camera.pose());
    controller.set_waypoints(waypoints);
    simulate(controller, fps, trace)
}

/// One recorded frame of a flight
#[derive(Serialize)]
struct TraceFrame {
    time_ms: f32,
    status: RunnerStatus,
    pose: CameraPose,
}

/// Tick a flight to completion at a fixed frame rate
fn simulate(mut controller: FlightController, fps: u32, trace: Option<&Path>) -> Result<()> {
    if fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    let dt_ms = 1000.0 / fps as f32;
    let start = controller.camera();

    if !controller.request_flight() {
        anyhow::bail!(
            "Flight could not start with {} waypoints",
            controller.waypoints().len()
        );
    }

    let mut frames = Vec::new();
    let mut elapsed_ms = 0.0;
    let mut status = controller.status();
    info!("Flying {} waypoints at {} fps", controller.waypoints().len(), fps);

    loop {
        let outcome = controller.tick(dt_ms);
        elapsed_ms += dt_ms;

        if controller.status() != status {
            status = controller.status();
            info!("{:>9.1} ms  {:?}", elapsed_ms, status);
        }
        if trace.is_some() {
            frames.push(TraceFrame {
                time_ms: elapsed_ms,
                status,
                pose: controller.camera(),
            });
        }

        match outcome {
            TickOutcome::Finished => break,
            TickOutcome::Idle => anyhow::bail!("Flight stopped before finishing"),
            TickOutcome::Animating(_) => {}
        }
    }

    let pose = controller.camera();
    info!(
        "Flight finished after {:.1} ms, camera at ({:.3}, {:.3}, {:.3})",
        elapsed_ms, pose.position.x, pose.position.y, pose.position.z
    );
    if pose != start {
        warn!("Camera did not return to its starting pose");
    }

    if let Some(path) = trace {
        write_trace(path, &frames)?;
        info!("Wrote {} frames to {}", frames.len(), path.display());
    }
    Ok(())
}

fn write_trace(path: &Path, frames: &[TraceFrame]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), frames)
        .with_context(|| format!("Failed to write {}", path.display()))
}
