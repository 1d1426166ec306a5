//! Unit tests for ev-core primitives.

#[cfg(test)]
mod pos {
    use crate::{Generation, Pos};

    #[test]
    fn chebyshev_is_max_axis_delta() {
        assert_eq!(Pos::new(0, 0).chebyshev(Pos::new(2, 2)), 2);
        assert_eq!(Pos::new(5, 1).chebyshev(Pos::new(2, 7)), 6);
        assert_eq!(Pos::new(3, 3).chebyshev(Pos::new(3, 3)), 0);
    }

    #[test]
    fn euclidean_is_squared() {
        assert_eq!(Pos::new(0, 0).euclidean_sq(Pos::new(3, 4)), 25);
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Pos::new(0, 9) < Pos::new(1, 0));
        assert!(Pos::new(2, 1) < Pos::new(2, 3));
    }

    #[test]
    fn display() {
        assert_eq!(Pos::new(4, 7).to_string(), "(4, 7)");
        assert_eq!(Generation(12).to_string(), "G12");
    }

    #[test]
    fn generation_arithmetic() {
        assert_eq!(Generation::SEED.next(), Generation(1));
        assert_eq!(Generation(3) + 4, Generation(7));
    }
}

#[cfg(test)]
mod cell {
    use crate::CellState;

    #[test]
    fn index_roundtrip() {
        for state in CellState::ALL {
            assert_eq!(CellState::from_index(state.index()), Some(state));
        }
        assert_eq!(CellState::from_index(3), None);
    }

    #[test]
    fn passable_states() {
        assert!(CellState::Empty.is_passable());
        assert!(CellState::Exit.is_passable());
        assert!(!CellState::Person.is_passable());
    }

    #[test]
    fn numeric_order() {
        assert!(CellState::Empty < CellState::Person);
        assert!(CellState::Person < CellState::Exit);
    }
}

#[cfg(test)]
mod config {
    use crate::{EvError, EvacConfig, HistoryRetention, Metric, Pos};

    fn base() -> EvacConfig {
        EvacConfig::new(10, 12, vec![Pos::new(0, 0), Pos::new(9, 11)])
    }

    #[test]
    fn defaults() {
        let cfg = base();
        assert_eq!(cfg.exit_radius, 3);
        assert_eq!(cfg.distance_modifier, 3.0);
        assert_eq!(cfg.crowd_modifier, 3.0);
        assert_eq!(cfg.people_interval, 3);
        assert!(cfg.evenly_distributed);
        assert_eq!(cfg.neighborhood_radius, 1);
        assert_eq!(cfg.history, HistoryRetention::KeepAll);
        assert_eq!(cfg.cell_count(), 120);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_exits() {
        let mut cfg = base();
        cfg.exits.clear();
        assert!(matches!(cfg.validate(), Err(EvError::Config(_))));
    }

    #[test]
    fn rejects_out_of_bounds_exit() {
        let mut cfg = base();
        cfg.exits.push(Pos::new(10, 0));
        assert!(matches!(cfg.validate(), Err(EvError::Config(_))));
    }

    #[test]
    fn rejects_duplicate_exit() {
        let mut cfg = base();
        cfg.exits.push(Pos::new(0, 0));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_dimensions_and_radii() {
        let mut cfg = base();
        cfg.height = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.neighborhood_radius = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.people_interval = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.history = HistoryRetention::KeepLast(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_modifiers() {
        let mut cfg = base();
        cfg.crowd_modifier = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.distance_modifier = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.crowd_modifier = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn metric_within() {
        let c = Pos::new(5, 5);
        assert!(Metric::Chebyshev.within(c, Pos::new(7, 7), 2));
        assert!(!Metric::Euclidean.within(c, Pos::new(7, 7), 2));
        assert!(Metric::Euclidean.within(c, Pos::new(7, 5), 2));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.unit(), r2.unit());
        }
    }

    #[test]
    fn replicas_differ() {
        let mut r0 = SimRng::replica(1, 0);
        let mut r1 = SimRng::replica(1, 1);
        let a = r0.unit();
        let b = r1.unit();
        assert_ne!(a, b, "seeds for adjacent replicas should diverge");
    }

    #[test]
    fn unit_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}

#[cfg(test)]
mod stochastic {
    use crate::stochastic::{
        SeedPattern, pick_cumulative, random_seed, uniform_choice, weighted_choice,
        weights_to_probabilities,
    };
    use crate::{CellState, EvError, SimRng};

    #[test]
    fn normalises_weights() {
        let p = weights_to_probabilities(&[1.0, 3.0]).unwrap();
        assert_eq!(p, vec![0.25, 0.75]);
    }

    #[test]
    fn zero_weights_are_an_invariant_error() {
        assert!(matches!(
            weights_to_probabilities(&[0.0, 0.0]),
            Err(EvError::Invariant(_))
        ));
        assert!(weights_to_probabilities(&[]).is_err());
    }

    #[test]
    fn cumulative_pick_follows_order() {
        let p = [0.2, 0.5, 0.3];
        assert_eq!(pick_cumulative(&p, 0.0), Some(0));
        assert_eq!(pick_cumulative(&p, 0.2), Some(0));
        assert_eq!(pick_cumulative(&p, 0.21), Some(1));
        assert_eq!(pick_cumulative(&p, 0.7), Some(1));
        assert_eq!(pick_cumulative(&p, 0.71), Some(2));
        assert_eq!(pick_cumulative(&[0.1, 0.1], 0.5), None);
    }

    #[test]
    fn weighted_choice_with_certain_item() {
        let mut rng = SimRng::new(7);
        let items = ["a", "b", "c"];
        for _ in 0..100 {
            let pick = weighted_choice(&items, &[0.0, 1.0, 0.0], &mut rng).unwrap();
            assert_eq!(*pick, "b");
        }
    }

    #[test]
    fn weighted_choice_rejects_length_mismatch() {
        let mut rng = SimRng::new(7);
        assert!(weighted_choice(&[1, 2], &[1.0], &mut rng).is_err());
    }

    #[test]
    fn weighted_choice_exhaustion_is_fatal() {
        let mut rng = SimRng::new(7);
        let mut failures = 0;
        for _ in 0..200 {
            if weighted_choice(&[1, 2], &[0.0, 0.0], &mut rng).is_err() {
                failures += 1;
            }
        }
        assert!(failures > 190, "zero mass should almost never select: {failures}");
    }

    #[test]
    fn weighted_choice_distribution() {
        let mut rng = SimRng::new(99);
        let items = [0usize, 1];
        let mut counts = [0u32; 2];
        for _ in 0..10_000 {
            counts[*weighted_choice(&items, &[0.25, 0.75], &mut rng).unwrap()] += 1;
        }
        let share = counts[1] as f64 / 10_000.0;
        assert!((share - 0.75).abs() < 0.03, "got {share}");
    }

    #[test]
    fn uniform_choice_empty_and_single() {
        let mut rng = SimRng::new(1);
        let empty: [u8; 0] = [];
        assert!(uniform_choice(&empty, &mut rng).is_none());
        assert_eq!(uniform_choice(&[9], &mut rng), Some(&9));
    }

    fn pattern(interval: u32, evenly: bool) -> SeedPattern {
        SeedPattern {
            min_state:          CellState::Empty,
            max_state:          CellState::Person,
            interval,
            fill_state:         CellState::Empty,
            evenly_distributed: evenly,
        }
    }

    #[test]
    fn seed_only_on_lattice() {
        let mut rng = SimRng::new(3);
        let cells = random_seed(9, 9, pattern(3, true), &mut rng).unwrap();
        assert_eq!(cells.len(), 81);
        for (i, &state) in cells.iter().enumerate() {
            let (row, col) = (i / 9, i % 9);
            if row % 3 != 0 || col % 3 != 0 {
                assert_eq!(state, CellState::Empty, "off-lattice cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn seed_uses_full_state_range() {
        let mut rng = SimRng::new(11);
        let p = SeedPattern { max_state: CellState::Person, ..pattern(1, true) };
        let cells = random_seed(20, 20, p, &mut rng).unwrap();
        assert!(cells.contains(&CellState::Empty));
        assert!(cells.contains(&CellState::Person));
        assert!(!cells.contains(&CellState::Exit));
    }

    #[test]
    fn uneven_seed_stays_in_upper_left_quadrant() {
        let mut rng = SimRng::new(5);
        let cells = random_seed(10, 10, pattern(1, false), &mut rng).unwrap();
        for (i, &state) in cells.iter().enumerate() {
            let (row, col) = (i / 10, i % 10);
            if row > 5 || col > 5 {
                assert_eq!(state, CellState::Empty, "({row}, {col}) should be fill");
            }
        }
        assert!(cells.contains(&CellState::Person));
    }

    #[test]
    fn seed_rejects_bad_pattern() {
        let mut rng = SimRng::new(5);
        assert!(random_seed(4, 4, pattern(0, true), &mut rng).is_err());
        let inverted = SeedPattern {
            min_state: CellState::Person,
            max_state: CellState::Empty,
            ..pattern(1, true)
        };
        assert!(random_seed(4, 4, inverted, &mut rng).is_err());
    }
}
