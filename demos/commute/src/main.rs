//! commute — EV charging demand on a small grid.
//!
//! Runs the default 20×20 model (50 agents, 10 two-socket stations) unless a
//! JSON `ModelConfig` path is given as the first argument; missing fields
//! fall back to the defaults.
//!
//! ```text
//! cargo run -p commute
//! RUST_LOG=debug cargo run -p commute -- my_config.json
//! ```
//!
//! Final statistics are printed and written to `output/commute/stats.json`.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use evc_core::{ModelConfig, Tick};
use evc_sim::{AgentSnapshot, ModelStats, SimBuilder, SimObserver, StationSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:      &str = "output/commute";
const PROGRESS_EVERY:  u64  = 250;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tracks peak station load and removals, and logs progress.
#[derive(Default)]
struct DemandObserver {
    peak_sockets_in_use: u32,
    peak_tick:           Tick,
    full_station_ticks:  u64,
    removed:             u64,
}

impl SimObserver for DemandObserver {
    fn on_tick_end(&mut self, tick: Tick, active: usize) {
        if tick.0 % PROGRESS_EVERY == 0 {
            info!(%tick, active, "progress");
        }
    }

    fn on_snapshot(&mut self, tick: Tick, _agents: &[AgentSnapshot], stations: &[StationSnapshot]) {
        let in_use: u32 = stations.iter().map(|s| s.occupied).sum();
        if in_use > self.peak_sockets_in_use {
            self.peak_sockets_in_use = in_use;
            self.peak_tick = tick;
        }
        self.full_station_ticks += stations.iter().filter(|s| s.occupied == s.capacity).count() as u64;
    }

    fn on_agent_removed(&mut self, _tick: Tick, _agent: &AgentSnapshot) {
        self.removed += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<ModelConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(ModelConfig::default()),
    }
}

fn print_stats(stats: &ModelStats) {
    println!("{:<22} {:>10}", "Reporter", "Value");
    println!("{}", "-".repeat(33));
    println!("{:<22} {:>10}", "agents", stats.agent_count);
    println!("{:<22} {:>10.2}", "mean battery", stats.mean_battery);
    println!("{:<22} {:>10.2}", "lower quartile", stats.lower_quartile);
    println!("{:<22} {:>10.3}", "mean usage", stats.mean_usage);
    println!("{:<22} {:>10}", "total attempts", stats.total_attempts);
    println!("{:<22} {:>10.2}", "failed attempts (%)", stats.percentage_failed);
    println!("{:<22} {:>10.1}", "average lifespan", stats.average_lifespan);
    println!("{:<22} {:>10}", "removed agents", stats.removed_agents);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    println!("=== commute — EV charging demand ===");
    println!(
        "Grid: {}×{} {:?}  |  Agents: {}  |  Stations: {}  |  Ticks: {}  |  Seed: {}",
        config.width,
        config.height,
        config.topology,
        config.agent_count,
        config.station_count(),
        config.total_ticks,
        config.seed,
    );
    println!();

    let mut sim = SimBuilder::new(config).build()?;
    let mut obs = DemandObserver::default();

    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  peak sockets in use : {} (tick {})",
        obs.peak_sockets_in_use, obs.peak_tick
    );
    println!("  full station-ticks  : {}", obs.full_station_ticks);
    println!("  agents removed      : {}", obs.removed);
    println!();

    let stats = sim.stats();
    print_stats(&stats);
    println!();

    println!("{:<8} {:<10} {:<9} {:<8}", "Station", "Position", "In use", "Usage");
    println!("{}", "-".repeat(37));
    for s in sim.station_snapshots() {
        println!(
            "{:<8} {:<10} {:<9} {:<8.3}",
            s.id.0,
            s.pos.to_string(),
            format!("{}/{}", s.occupied, s.capacity),
            s.average_usage,
        );
    }

    fs::create_dir_all(OUTPUT_DIR)?;
    let out = Path::new(OUTPUT_DIR).join("stats.json");
    fs::write(&out, serde_json::to_string_pretty(&stats)?)?;
    info!(path = %out.display(), "statistics written");

    Ok(())
}
