//! Model configuration supplied at construction time.
//!
//! Applications typically build a [`ModelConfig`] from `Default` and override
//! a handful of fields, or (with the `serde` feature) load one from JSON.
//! Missing JSON fields fall back to the defaults below.
//!
//! Values outside their modelled range are not errors: [`ModelConfig::sanitized`]
//! logs a warning for each one and returns a config with the value clamped.

use tracing::warn;

use crate::{AgentId, EvError, EvResult, Topology};

/// Largest battery the modelled vehicle class carries (kWh).
pub const BATTERY_SIZE_CEILING: f64 = 100.0;

/// Smallest battery size that keeps the `size ± 5` draw positive.
pub const BATTERY_SIZE_FLOOR: f64 = 10.0;

// ── Small parameter types ─────────────────────────────────────────────────────

/// Mean and standard deviation of a normally distributed draw.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalParams {
    pub mean:    f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// How many stations to place.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationCount {
    /// Exactly this many stations.
    Absolute(usize),
    /// `round(ratio * agent_count)` stations.
    PerAgent(f64),
}

/// Spatial arrangement of the stations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationLayout {
    /// Distinct uniformly random cells.
    #[default]
    Uniform,
    /// Evenly spaced on a circle of radius `0.25 * min(w, h)` around the centre.
    Ring,
    /// Evenly spaced on a circle of radius `0.45 * min(w, h)`.
    OuterRing,
    /// Latin hypercube sample: one station per row stratum and column stratum.
    LatinHypercube,
}

// ── AgentParams ───────────────────────────────────────────────────────────────

/// Per-agent behaviour parameters.  Every agent draws its own thresholds and
/// dwell lengths from these distributions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentParams {
    /// Moore radius within which stations are noticed.
    pub vision: u32,

    /// Mean exploration radius around the home/work centre.
    pub initial_bravery: f64,

    /// Centre of the `[size - 5, size + 5)` max-battery draw (kWh).
    pub battery_size: f64,

    /// Battery gained per tick while charging.
    pub charge_speed: f64,

    /// Lower bound of the per-step energy cost per distance unit.
    pub min_cost_per_unit: f64,

    /// Upper bound of the per-step energy cost per distance unit.  Also the
    /// worst case used when checking whether a station is reachable.
    pub max_cost_per_unit: f64,

    pub work_dwell: NormalParams,
    pub shop_dwell: NormalParams,
    pub home_dwell: NormalParams,

    /// Minimum time plugged in before a full battery ends a charge.
    pub charge_duration: NormalParams,

    /// Battery level below which the agent starts looking for a station
    /// (absolute value of the draw).
    pub look_for_station: NormalParams,

    /// Battery level below which any free station in sight is taken
    /// (absolute value of the draw, capped by the look-for threshold).
    pub critical_battery: NormalParams,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            vision:            10,
            initial_bravery:   10.0,
            battery_size:      75.0,
            charge_speed:      3.0,
            min_cost_per_unit: 0.08,
            max_cost_per_unit: 0.30,
            work_dwell:        NormalParams::new(25.0, 3.0),
            shop_dwell:        NormalParams::new(5.0, 3.0),
            home_dwell:        NormalParams::new(30.0, 5.0),
            charge_duration:   NormalParams::new(25.0, 10.0),
            look_for_station:  NormalParams::new(30.0, 10.0),
            critical_battery:  NormalParams::new(5.0, 1.0),
        }
    }
}

// ── ModelConfig ───────────────────────────────────────────────────────────────

/// Top-level configuration of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    pub width:    u32,
    pub height:   u32,
    pub topology: Topology,

    /// Population size at setup, and the target of the population hook.
    pub agent_count: usize,

    pub stations: StationCount,
    pub layout:   StationLayout,

    /// Sockets per station.
    pub station_capacity: u32,

    /// Number of per-tick usage samples averaged into `average_usage`.
    pub usage_window: usize,

    pub agent: AgentParams,

    /// Replace removed agents so the population stays at `agent_count`.
    pub maintain_population: bool,

    /// Ticks simulated by `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            width:                   20,
            height:                  20,
            topology:                Topology::Bounded,
            agent_count:             50,
            stations:                StationCount::Absolute(10),
            layout:                  StationLayout::Uniform,
            station_capacity:        2,
            usage_window:            200,
            agent:                   AgentParams::default(),
            maintain_population:     true,
            total_ticks:             2_500,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}

impl ModelConfig {
    /// Resolved number of stations for this run.
    pub fn station_count(&self) -> usize {
        match self.stations {
            StationCount::Absolute(n) => n,
            StationCount::PerAgent(ratio) => {
                (ratio.max(0.0) * self.agent_count as f64).round() as usize
            }
        }
    }

    /// Reject configurations no clamping can repair: non-finite parameters
    /// and populations larger than the agent id space.
    pub fn validate(&self) -> EvResult<()> {
        if AgentId::try_from(self.agent_count).is_err() {
            return Err(EvError::Config(format!(
                "agent count {} exceeds the agent id space",
                self.agent_count
            )));
        }
        if let StationCount::PerAgent(ratio) = self.stations {
            finite("stations", ratio)?;
        }
        self.agent.validate()
    }

    /// Clamp out-of-range values, logging a warning for each adjustment.
    ///
    /// Structural problems (a zero-sized grid) are left alone; those are
    /// rejected by the grid constructor instead.
    pub fn sanitized(mut self) -> Self {
        if let StationCount::PerAgent(ratio) = self.stations
            && (ratio.is_nan() || ratio < 0.0)
        {
            warn!(ratio, "negative station ratio; placing no stations");
            self.stations = StationCount::PerAgent(0.0);
        }
        if self.station_capacity == 0 {
            warn!("station capacity 0 is meaningless; using 1");
            self.station_capacity = 1;
        }
        if self.usage_window == 0 {
            warn!("usage window 0; using 1");
            self.usage_window = 1;
        }
        self.agent = self.agent.sanitized();
        self
    }
}

fn finite(field: &'static str, value: f64) -> EvResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EvError::NonFinite { field, value })
    }
}

impl AgentParams {
    /// See [`ModelConfig::validate`].
    pub fn validate(&self) -> EvResult<()> {
        finite("initial_bravery", self.initial_bravery)?;
        finite("battery_size", self.battery_size)?;
        finite("charge_speed", self.charge_speed)?;
        finite("min_cost_per_unit", self.min_cost_per_unit)?;
        finite("max_cost_per_unit", self.max_cost_per_unit)?;
        for (field, p) in [
            ("work_dwell", self.work_dwell),
            ("shop_dwell", self.shop_dwell),
            ("home_dwell", self.home_dwell),
            ("charge_duration", self.charge_duration),
            ("look_for_station", self.look_for_station),
            ("critical_battery", self.critical_battery),
        ] {
            finite(field, p.mean)?;
            finite(field, p.std_dev)?;
        }
        Ok(())
    }

    /// Per-field range checks; see [`ModelConfig::sanitized`].
    pub fn sanitized(mut self) -> Self {
        if self.battery_size > BATTERY_SIZE_CEILING {
            warn!(
                battery_size = self.battery_size,
                ceiling = BATTERY_SIZE_CEILING,
                "battery size above vehicle class ceiling; clamping"
            );
            self.battery_size = BATTERY_SIZE_CEILING;
        }
        if self.battery_size.is_nan() || self.battery_size < BATTERY_SIZE_FLOOR {
            warn!(
                battery_size = self.battery_size,
                floor = BATTERY_SIZE_FLOOR,
                "battery size below floor; clamping"
            );
            self.battery_size = BATTERY_SIZE_FLOOR;
        }
        if self.charge_speed.is_nan() || self.charge_speed <= 0.0 {
            warn!(charge_speed = self.charge_speed, "non-positive charge speed; using default");
            self.charge_speed = AgentParams::default().charge_speed;
        }
        if self.min_cost_per_unit > self.max_cost_per_unit {
            warn!(
                min = self.min_cost_per_unit,
                max = self.max_cost_per_unit,
                "energy cost range inverted; swapping bounds"
            );
            std::mem::swap(&mut self.min_cost_per_unit, &mut self.max_cost_per_unit);
        }
        // A step must never add energy.
        for (name, bound) in [
            ("min_cost_per_unit", &mut self.min_cost_per_unit),
            ("max_cost_per_unit", &mut self.max_cost_per_unit),
        ] {
            if *bound < 0.0 {
                warn!(field = name, value = *bound, "negative energy cost; using 0");
                *bound = 0.0;
            }
        }
        if self.initial_bravery < 0.0 {
            warn!(bravery = self.initial_bravery, "negative bravery; using its magnitude");
            self.initial_bravery = self.initial_bravery.abs();
        }
        for (name, params) in [
            ("work_dwell", &mut self.work_dwell),
            ("shop_dwell", &mut self.shop_dwell),
            ("home_dwell", &mut self.home_dwell),
            ("charge_duration", &mut self.charge_duration),
            ("look_for_station", &mut self.look_for_station),
            ("critical_battery", &mut self.critical_battery),
        ] {
            if params.std_dev < 0.0 {
                warn!(param = name, std_dev = params.std_dev, "negative spread; using its magnitude");
                params.std_dev = params.std_dev.abs();
            }
        }
        self
    }
}
