//! voxelnav - a mock indoor-navigation viewer
//!
//! Main executable: 3D floorplan scene with destination search and
//! turn-by-turn guidance.

mod config;
mod headless;
mod viewer;

use anyhow::Result;
use config::ViewerConfig;
use std::time::Duration;
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;
use viewer::{Viewer, ViewerAction};
use voxelnav_map::Floorplan;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting voxelnav v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut viewer_config = ViewerConfig::load();
    if let Some(interval) = cli.step_interval_ms {
        viewer_config.step_interval_ms = interval.max(100);
    }

    if cli.headless {
        return headless::run(headless::HeadlessConfig {
            destination: cli.destination.clone(),
            max_ticks: cli.max_ticks,
            step_interval: Duration::from_millis(viewer_config.step_interval_ms),
            floorplan: cli.floorplan.clone(),
        });
    }
    if cli.destination.is_some() {
        tracing::warn!("--destination has no effect without --headless");
    }
    if cli.max_ticks.is_some() {
        tracing::warn!("--max-ticks has no effect without --headless");
    }

    let floorplan = match &cli.floorplan {
        Some(path) => voxelnav_map::load_floorplan(path),
        None => {
            let default_path = Path::new(config::DEFAULT_FLOORPLAN_PATH);
            if default_path.exists() {
                voxelnav_map::load_floorplan(default_path)
            } else {
                Floorplan::sample()
            }
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(&event_loop, viewer_config, floorplan, cli.resolution)?;

    event_loop.run(move |event, elwt| match viewer.handle_event(&event, elwt) {
        ViewerAction::Continue => {}
        ViewerAction::Quit => {
            info!("Quitting");
            elwt.exit();
        }
    })?;

    info!("voxelnav shutting down");
    Ok(())
}

#[derive(Clone)]
struct CliOptions {
    headless: bool,
    destination: Option<String>,
    max_ticks: Option<u64>,
    step_interval_ms: Option<u64>,
    resolution: (u32, u32),
    floorplan: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            headless: false,
            destination: None,
            max_ticks: None,
            step_interval_ms: None,
            resolution: (1280, 720),
            floorplan: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => opts.headless = true,
                "--destination" => {
                    if let Some(name) = args.next() {
                        opts.destination = Some(name);
                    } else {
                        tracing::error!("--destination requires a location name");
                    }
                }
                "--max-ticks" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_ticks = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-ticks must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-ticks requires an integer");
                    }
                }
                "--step-interval-ms" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.step_interval_ms = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--step-interval-ms must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--step-interval-ms requires an integer");
                    }
                }
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match raw.split_once('x') {
                            Some((w, h)) => match (w.parse::<u32>(), h.parse::<u32>()) {
                                (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                                    opts.resolution = (width, height);
                                }
                                _ => {
                                    tracing::error!(value = %raw, "--resolution must be like 1280x720");
                                }
                            },
                            None => {
                                tracing::error!(value = %raw, "--resolution must be like 1280x720");
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires a value like 1280x720");
                    }
                }
                "--floorplan" => {
                    if let Some(path) = args.next() {
                        opts.floorplan = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--floorplan requires a file path");
                    }
                }
                _ => {
                    tracing::warn!(argument = %arg, "Ignoring unknown argument");
                }
            }
        }

        opts
    }
}
