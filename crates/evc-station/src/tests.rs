//! Unit tests for evc-station.

use evc_core::{GridPos, StationId};

use crate::{ChargeStation, StationError, StationStore, UsageWindow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn store(n: usize) -> StationStore {
    let positions: Vec<GridPos> = (0..n as i32).map(|i| GridPos::new(i, 0)).collect();
    StationStore::new(&positions, 2, 200)
}

fn station(capacity: u32, window: usize) -> ChargeStation {
    ChargeStation::new(StationId(0), GridPos::new(0, 0), capacity, window)
}

// ── Sockets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sockets {
    use super::*;

    #[test]
    fn new_station_is_idle() {
        let s = station(2, 10);
        assert_eq!(s.free_sockets(), 2);
        assert_eq!(s.occupied(), 0);
        assert!(s.has_free_socket());
    }

    #[test]
    fn capacity_two_admits_exactly_two() {
        let mut s = station(2, 10);
        let results: Vec<bool> = (0..3).map(|_| s.try_occupy()).collect();
        assert_eq!(results, vec![true, true, false]);
        assert_eq!(s.free_sockets(), 0);
        assert_eq!(s.occupied(), 2);
    }

    #[test]
    fn failed_occupy_changes_nothing() {
        let mut s = station(1, 10);
        assert!(s.try_occupy());
        assert!(!s.try_occupy());
        assert_eq!(s.free_sockets(), 0);
    }

    #[test]
    fn over_release_is_reported_and_clamped() {
        let mut s = station(2, 10);
        let err = s.release().unwrap_err();
        assert!(matches!(err, StationError::OverRelease(StationId(0))));
        assert_eq!(s.free_sockets(), 2);
    }

    #[test]
    fn release_after_occupy_restores_socket() {
        let mut s = station(2, 10);
        assert!(s.try_occupy());
        s.release().unwrap();
        assert_eq!(s.free_sockets(), 2);
    }
}

// ── Usage accounting ──────────────────────────────────────────────────────────

#[cfg(test)]
mod usage {
    use super::*;

    #[test]
    fn empty_window_mean_is_zero() {
        assert_eq!(UsageWindow::new(5).mean(), 0.0);
    }

    #[test]
    fn window_keeps_only_latest_samples() {
        let mut w = UsageWindow::new(3);
        for s in [1.0, 1.0, 0.0, 0.0, 0.5] {
            w.push(s);
        }
        assert_eq!(w.len(), 3);
        assert!((w.mean() - 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_window_behaves_as_one() {
        let mut w = UsageWindow::new(0);
        w.push(0.25);
        w.push(0.75);
        assert_eq!(w.len(), 1);
        assert!((w.mean() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn station_samples_in_use_fraction() {
        let mut s = station(2, 4);
        s.record_usage_sample(); // 0.0
        assert!(s.try_occupy());
        s.record_usage_sample(); // 0.5
        assert!(s.try_occupy());
        s.record_usage_sample(); // 1.0
        assert_eq!(s.usage_samples(), 3);
        assert!((s.average_usage() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn average_usage_bounded_by_window() {
        let mut s = station(2, 200);
        for _ in 0..500 {
            s.record_usage_sample();
        }
        assert_eq!(s.usage_samples(), 200);
        assert_eq!(s.average_usage(), 0.0);
    }
}

// ── StationStore ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn ids_follow_position_order() {
        let st = store(3);
        let ids: Vec<StationId> = st.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StationId(0), StationId(1), StationId(2)]);
        assert_eq!(st.get(StationId(2)).map(|s| s.pos), Some(GridPos::new(2, 0)));
    }

    #[test]
    fn three_contenders_two_sockets() {
        let mut st = store(1);
        let a = st.try_occupy(StationId(0));
        let b = st.try_occupy(StationId(0));
        let c = st.try_occupy(StationId(0));
        assert!(a.is_some());
        assert!(b.is_some());
        assert!(c.is_none());
        assert_eq!(st.free_sockets(StationId(0)), 0);

        st.release(a.unwrap()).unwrap();
        st.release(b.unwrap()).unwrap();
        assert_eq!(st.free_sockets(StationId(0)), 2);
    }

    #[test]
    fn unknown_station_cannot_be_occupied() {
        let mut st = store(1);
        assert!(st.try_occupy(StationId(9)).is_none());
        assert_eq!(st.free_sockets(StationId(9)), 0);
    }

    #[test]
    fn handle_names_its_station() {
        let mut st = store(2);
        let h = st.try_occupy(StationId(1)).unwrap();
        assert_eq!(h.station(), StationId(1));
        st.release(h).unwrap();
    }

    #[test]
    fn occupancy_stays_in_bounds_under_churn() {
        let mut st = store(3);
        let mut held = Vec::new();
        for round in 0..50u32 {
            let id = StationId(round % 3);
            if let Some(h) = st.try_occupy(id) {
                held.push(h);
            }
            if round % 4 == 3 {
                if let Some(h) = held.pop() {
                    st.release(h).unwrap();
                }
            }
            for s in st.iter() {
                assert!(s.free_sockets() <= s.capacity());
                assert_eq!(s.occupied() + s.free_sockets(), s.capacity());
            }
        }
        for h in held {
            st.release(h).unwrap();
        }
        assert!(st.iter().all(|s| s.free_sockets() == s.capacity()));
    }

    #[test]
    fn mean_usage_averages_stations() {
        let mut st = store(2);
        let h = st.try_occupy(StationId(0)).unwrap();
        st.record_usage_samples();
        // station 0 at 0.5, station 1 at 0.0
        assert!((st.mean_usage() - 0.25).abs() < 1e-12);
        st.release(h).unwrap();
        assert_eq!(StationStore::default().mean_usage(), 0.0);
    }
}
