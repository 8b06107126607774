//! Aggregate model reporters.

use evc_agent::EvAgent;
use evc_station::StationStore;

/// Running totals over agents that have been removed from the run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RetiredTotals {
    pub count:            u64,
    pub lifespan_sum:     u64,
    pub attempts_success: u64,
    pub attempts_failed:  u64,
}

impl RetiredTotals {
    pub fn record(&mut self, agent: &EvAgent) {
        self.count += 1;
        self.lifespan_sum += agent.age();
        self.attempts_success += agent.attempts_success();
        self.attempts_failed += agent.attempts_failed();
    }
}

/// Whole-model statistics at one point in a run.
///
/// Battery figures cover the live population.  Attempt counts cover every
/// agent that has existed, removed ones included.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelStats {
    pub agent_count:        usize,
    pub mean_battery:       f64,
    /// 25th percentile of battery levels (linear interpolation).
    pub lower_quartile:     f64,
    /// Mean over stations of their windowed in-use fraction.
    pub mean_usage:         f64,
    pub total_attempts:     u64,
    /// Failed share of all attempts, in percent.  0 with no attempts.
    pub percentage_failed:  f64,
    /// Mean age at removal.  0 if no agent has been removed.
    pub average_lifespan:   f64,
    pub removed_agents:     u64,
}

impl ModelStats {
    pub fn collect<'a>(
        agents:   impl Iterator<Item = &'a EvAgent>,
        stations: &StationStore,
        retired:  &RetiredTotals,
    ) -> Self {
        let mut batteries = Vec::new();
        let mut success = retired.attempts_success;
        let mut failed = retired.attempts_failed;
        for a in agents {
            batteries.push(a.battery());
            success += a.attempts_success();
            failed += a.attempts_failed();
        }

        let agent_count = batteries.len();
        let mean_battery = if agent_count == 0 {
            0.0
        } else {
            batteries.iter().sum::<f64>() / agent_count as f64
        };
        batteries.sort_by(f64::total_cmp);

        let total_attempts = success + failed;
        let percentage_failed = if total_attempts == 0 {
            0.0
        } else {
            failed as f64 / total_attempts as f64 * 100.0
        };
        let average_lifespan = if retired.count == 0 {
            0.0
        } else {
            retired.lifespan_sum as f64 / retired.count as f64
        };

        Self {
            agent_count,
            mean_battery,
            lower_quartile: percentile(&batteries, 0.25),
            mean_usage: stations.mean_usage(),
            total_attempts,
            percentage_failed,
            average_lifespan,
            removed_agents: retired.count,
        }
    }
}

/// `q`-quantile of ascending `sorted`, interpolating between ranks.
pub(crate) fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}
