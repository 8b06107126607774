//! Unit tests for evc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, StationId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(StationId::default(), StationId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(StationId(3).to_string(), "StationId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GridPos, Topology};

    #[test]
    fn offset_and_display() {
        let p = GridPos::new(2, 5).offset(-1, 1);
        assert_eq!(p, GridPos::new(1, 6));
        assert_eq!(p.to_string(), "(1, 6)");
    }

    #[test]
    fn default_topology_is_bounded() {
        assert!(!Topology::default().is_toroidal());
        assert!(Topology::Toroidal.is_toroidal());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert!(Tick(3) < t);
    }

    #[test]
    fn clock_intervals() {
        let mut clock = SimClock::new();
        assert!(clock.is_interval(5));
        clock.advance();
        assert!(!clock.is_interval(5));
        assert!(!clock.is_interval(0));
        assert_eq!(clock.to_string(), "T1");
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_rng_deterministic() {
        let mut a = AgentRng::new(7, AgentId(3));
        let mut b = AgentRng::new(7, AgentId(3));
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn different_agents_different_streams() {
        let mut a = AgentRng::new(7, AgentId(0));
        let mut b = AgentRng::new(7, AgentId(1));
        assert_ne!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn degenerate_normal_returns_mean() {
        let mut r = AgentRng::new(1, AgentId(0));
        assert_eq!(r.normal(5.0, 0.0), 5.0);
        assert_eq!(r.normal(5.0, f64::NAN), 5.0);
    }

    #[test]
    fn exponential_non_positive_mean_is_zero() {
        let mut r = AgentRng::new(1, AgentId(0));
        assert_eq!(r.exponential(0.0), 0.0);
        assert_eq!(r.exponential(-3.0), 0.0);
        assert!(r.exponential(4.0) >= 0.0);
    }

    #[test]
    fn shuffle_is_seed_reproducible() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let mut va: Vec<u32> = (0..20).collect();
        let mut vb = va.clone();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_eq!(va, vb);
    }
}

#[cfg(test)]
mod config {
    use crate::config::BATTERY_SIZE_CEILING;
    use crate::{AgentParams, EvError, ModelConfig, NormalParams, StationCount};

    #[test]
    fn station_ratio_resolves_against_agent_count() {
        let cfg = ModelConfig {
            agent_count: 100,
            stations:    StationCount::PerAgent(0.125),
            ..ModelConfig::default()
        };
        assert_eq!(cfg.station_count(), 13);
    }

    #[test]
    fn oversized_battery_is_clamped() {
        let params = AgentParams { battery_size: 250.0, ..AgentParams::default() }.sanitized();
        assert_eq!(params.battery_size, BATTERY_SIZE_CEILING);
    }

    #[test]
    fn inverted_cost_range_is_swapped() {
        let params = AgentParams {
            min_cost_per_unit: 0.5,
            max_cost_per_unit: 0.1,
            ..AgentParams::default()
        }
        .sanitized();
        assert_eq!(params.min_cost_per_unit, 0.1);
        assert_eq!(params.max_cost_per_unit, 0.5);
    }

    #[test]
    fn negative_cost_bounds_clamped_to_zero() {
        let params = AgentParams {
            min_cost_per_unit: 0.08,
            max_cost_per_unit: -0.5,
            ..AgentParams::default()
        }
        .sanitized();
        assert_eq!(params.min_cost_per_unit, 0.0);
        assert_eq!(params.max_cost_per_unit, 0.08);

        let params = AgentParams {
            min_cost_per_unit: -0.3,
            max_cost_per_unit: -0.1,
            ..AgentParams::default()
        }
        .sanitized();
        assert_eq!(params.min_cost_per_unit, 0.0);
        assert_eq!(params.max_cost_per_unit, 0.0);
    }

    #[test]
    fn zero_capacity_becomes_one() {
        let cfg = ModelConfig { station_capacity: 0, ..ModelConfig::default() }.sanitized();
        assert_eq!(cfg.station_capacity, 1);
    }

    #[test]
    fn defaults_pass_unchanged() {
        let cfg = ModelConfig::default();
        assert_eq!(cfg.clone().sanitized(), cfg);
    }

    #[test]
    fn defaults_validate() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn non_finite_parameter_rejected() {
        let cfg = ModelConfig {
            agent: AgentParams {
                shop_dwell: NormalParams::new(f64::NAN, 3.0),
                ..AgentParams::default()
            },
            ..ModelConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(EvError::NonFinite { field: "shop_dwell", .. })));

        let cfg = ModelConfig { stations: StationCount::PerAgent(f64::INFINITY), ..ModelConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
