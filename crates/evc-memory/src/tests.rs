//! Unit tests for evc-memory.

use evc_core::{AgentId, AgentRng, StationId};

use crate::{
    Cpf, MEMORY_LEN, MemoryEngine, OffLimits, Outcome, OutcomeRing, RecentSightings, Strategy,
    decay_weight,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn assert_valid_cpf(cpf: &Cpf) {
    let b = cpf.bounds();
    assert!(b.windows(2).all(|w| w[0] <= w[1]), "not monotone: {b:?}");
    assert_eq!(b[Strategy::COUNT - 1], 1.0);
    assert!(b[0] > 0.0);
}

// ── Ring & decay ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ring {
    use super::*;

    #[test]
    fn decay_strictly_decreasing() {
        let mut prev = decay_weight(0);
        assert_eq!(prev, 1.0);
        for gap in 1..200 {
            let w = decay_weight(gap);
            assert!(w < prev);
            prev = w;
        }
    }

    #[test]
    fn fifty_steps_old_free_sighting() {
        let mut r = OutcomeRing::new();
        r.push(Outcome::Free, 0);
        let d = r.decayed(50);
        assert!((d[0] - 0.364).abs() < 1e-3, "{}", d[0]);
        assert!(d[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn ring_keeps_latest_ten_newest_first() {
        let mut r = OutcomeRing::new();
        for stamp in 1..=13u64 {
            let o = if stamp % 2 == 0 { Outcome::Free } else { Outcome::Full };
            r.push(o, stamp);
        }
        assert_eq!(r.len(), MEMORY_LEN);
        let stamps: Vec<u64> = r.iter_recent().map(|(_, s)| s).collect();
        assert_eq!(stamps, (4..=13).rev().collect::<Vec<_>>());
        assert_eq!(r.iter_recent().next(), Some((-1.0, 13)));
    }

    #[test]
    fn empty_ring_is_neutral() {
        let r = OutcomeRing::new();
        assert!(r.is_empty());
        assert_eq!(r.decayed_sum(100), 0.0);
    }
}

// ── Strategies & lottery ──────────────────────────────────────────────────────

#[cfg(test)]
mod strategy {
    use super::*;

    #[test]
    fn masks_count_most_recent_slots() {
        let decayed = [1.0; MEMORY_LEN];
        assert_eq!(Strategy::Thorough.score(&decayed), 10.0);
        assert_eq!(Strategy::Recent.score(&decayed), 5.0);
        assert_eq!(Strategy::Latest.score(&decayed), 3.0);
        assert_eq!(Strategy::Blind.score(&decayed), 0.0);
    }

    #[test]
    fn default_lottery_is_uniform() {
        let cpf = Cpf::default();
        for s in Strategy::ALL {
            assert!((cpf.probability(s) - 0.25).abs() < 1e-12);
        }
        assert_eq!(Cpf::from_sums([0.0; 4]), cpf);
    }

    #[test]
    fn choose_takes_first_bound_above_draw() {
        let cpf = Cpf::default();
        assert_eq!(cpf.choose(0.0), Strategy::Thorough);
        assert_eq!(cpf.choose(0.25), Strategy::Recent);
        assert_eq!(cpf.choose(0.74), Strategy::Latest);
        assert_eq!(cpf.choose(0.999), Strategy::Blind);
    }

    #[test]
    fn hopeless_strategy_gets_epsilon_mass() {
        let cpf = Cpf::from_sums([-10.0, 0.0, -50.0, 5.0]);
        assert_valid_cpf(&cpf);
        assert!(cpf.probability(Strategy::Thorough) < 1e-6);
        assert!(cpf.probability(Strategy::Latest) < 1e-6);
        assert!(cpf.probability(Strategy::Blind) > cpf.probability(Strategy::Recent));
    }

    #[test]
    fn all_weights_floored_still_normalizes() {
        assert_valid_cpf(&Cpf::from_sums([-100.0; 4]));
    }
}

// ── Exclusion lists ───────────────────────────────────────────────────────────

#[cfg(test)]
mod sightings {
    use super::*;

    #[test]
    fn off_limits_is_newest_first_fifo_of_four() {
        let mut o = OffLimits::new();
        for i in 0..6 {
            o.push(StationId(i));
        }
        assert_eq!(o.len(), 4);
        assert_eq!(o.iter().collect::<Vec<_>>(), vec![StationId(5), StationId(4), StationId(3), StationId(2)]);
        assert!(!o.contains(StationId(1)));
        o.clear();
        assert!(o.is_empty());
    }

    #[test]
    fn sightings_expire_after_three_scans() {
        let mut r = RecentSightings::new();
        r.push_scan(vec![StationId(7)]);
        assert!(r.contains(StationId(7)));
        r.push_scan(Vec::new());
        r.push_scan(Vec::new());
        assert!(r.contains(StationId(7)));
        r.push_scan(Vec::new());
        assert!(!r.contains(StationId(7)));
    }
}

// ── MemoryEngine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;

    #[test]
    fn record_advances_clock_and_scores() {
        let mut m = MemoryEngine::new();
        m.record(StationId(3), Outcome::Free, false);
        m.record(StationId(3), Outcome::Full, false);
        assert_eq!(m.pole_count(), 2);
        assert_eq!(m.known_count(), 1);

        let mem = m.station(StationId(3)).unwrap();
        // newest -1 at weight 1, older +1 at weight 0.98
        let expected = -1.0 + 0.98;
        assert!((mem.score(Strategy::Thorough) - expected).abs() < 1e-12);
        assert!((mem.score(Strategy::Latest) - expected).abs() < 1e-12);
        assert_eq!(mem.score(Strategy::Blind), 0.0);
    }

    #[test]
    fn only_current_target_credits_strategy() {
        let mut m = MemoryEngine::new();
        let mut rng = AgentRng::new(5, AgentId(0));
        let s = m.choose_strategy(&mut rng);
        assert_eq!(m.current_strategy(), Some(s));

        m.record(StationId(0), Outcome::Full, false);
        assert!(m.strategy_ring(s).is_empty());

        m.record(StationId(1), Outcome::Full, true);
        assert_eq!(m.strategy_ring(s).len(), 1);
        assert!(m.cpf().probability(s) < 0.25);
        assert_valid_cpf(m.cpf());
    }

    #[test]
    fn no_strategy_credit_without_current_strategy() {
        let mut m = MemoryEngine::new();
        m.record(StationId(0), Outcome::Free, true);
        assert!(Strategy::ALL.iter().all(|&s| m.strategy_ring(s).is_empty()));
        assert_eq!(m.cpf(), &Cpf::default());
    }

    #[test]
    fn cpf_valid_after_every_write() {
        let mut m = MemoryEngine::new();
        let mut rng = AgentRng::new(11, AgentId(4));
        for i in 0..200u32 {
            if i % 7 == 0 {
                m.choose_strategy(&mut rng);
            }
            let outcome = if rng.gen_bool(0.4) { Outcome::Free } else { Outcome::Full };
            m.record(StationId(i % 5), outcome, i % 3 == 0);
            assert_valid_cpf(m.cpf());
        }
        m.clear_strategy();
        assert_eq!(m.current_strategy(), None);
    }
}
