//! Headless mode: run a scripted navigation session on a simulated clock
//! and log each step. No window, no GPU.

use anyhow::Result;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use voxelnav_core::{sample_route, LocationCatalog, NavError, NavSession, StepTimer};
use voxelnav_map::load_floorplan;

pub struct HeadlessConfig {
    /// Destination to navigate to. Defaults to the first catalog entry.
    pub destination: Option<String>,
    /// Stop after this many timer fires even if not arrived.
    pub max_ticks: Option<u64>,
    /// Interval between automatic step advances.
    pub step_interval: Duration,
    /// Floorplan override file.
    pub floorplan: Option<PathBuf>,
}

pub fn run(cfg: HeadlessConfig) -> Result<()> {
    let catalog = LocationCatalog::sample();

    let destination = match cfg.destination {
        Some(name) => {
            if !catalog.contains(&name) {
                return Err(NavError::UnknownDestination(name).into());
            }
            name
        }
        None => catalog
            .destinations()
            .first()
            .cloned()
            .ok_or(NavError::EmptySteps)?,
    };

    if let Some(path) = &cfg.floorplan {
        let plan = load_floorplan(path);
        tracing::info!(
            extent = plan.extent,
            walls = plan.walls.len(),
            labels = plan.labels.len(),
            "Floorplan loaded"
        );
    }

    let mut session = NavSession::default();
    let steps = sample_route(&destination);
    session.start(destination, steps)?;

    tracing::info!(
        origin = session.origin(),
        destination = session.destination(),
        steps = session.steps().len(),
        interval_ms = cfg.step_interval.as_millis() as u64,
        "Headless session started"
    );
    if let Some(step) = session.current_step() {
        tracing::info!(step = 0usize, instruction = %step.instruction, "Step");
    }

    // Simulated clock: advance by whole intervals instead of sleeping.
    let start = Instant::now();
    let mut timer = StepTimer::new_at(start, cfg.step_interval);
    let mut fired: u64 = 0;

    loop {
        if let Some(max) = cfg.max_ticks {
            if fired >= max {
                tracing::warn!(fired, "Tick budget exhausted before arrival");
                break;
            }
        }

        fired += 1;
        let now = start + cfg.step_interval * fired as u32;
        for _ in 0..timer.poll(now) {
            if session.tick() {
                if session.is_arrived() {
                    tracing::info!(
                        destination = session.destination(),
                        progress = session.progress_percent(),
                        "Arrived"
                    );
                } else if let Some(step) = session.current_step() {
                    tracing::info!(
                        step = session.current_index().unwrap_or(0),
                        instruction = %step.instruction,
                        progress = session.progress_percent(),
                        "Step"
                    );
                }
            }
        }

        if session.is_arrived() {
            break;
        }
    }

    tracing::info!(fired, arrived = session.is_arrived(), "Headless session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_session_arrives() {
        let cfg = HeadlessConfig {
            destination: Some("Cafeteria".to_string()),
            max_ticks: None,
            step_interval: Duration::from_millis(10),
            floorplan: None,
        };
        run(cfg).expect("session should arrive");
    }

    #[test]
    fn unknown_destination_is_rejected() {
        let cfg = HeadlessConfig {
            destination: Some("Narnia".to_string()),
            max_ticks: None,
            step_interval: Duration::from_millis(10),
            floorplan: None,
        };
        assert!(run(cfg).is_err());
    }

    #[test]
    fn tick_budget_stops_the_run() {
        let cfg = HeadlessConfig {
            destination: None,
            max_ticks: Some(1),
            step_interval: Duration::from_millis(10),
            floorplan: None,
        };
        run(cfg).expect("budgeted run should exit cleanly");
    }
}
