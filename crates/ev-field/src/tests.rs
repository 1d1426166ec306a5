//! Unit tests for ev-field.

#[cfg(test)]
mod helpers {
    use ev_core::{CellState, Metric, Pos};
    use ev_grid::Grid;

    use crate::ExitSet;

    /// 9×9 grid with exits at the left and right edge midpoints.
    pub fn two_exit_set() -> ExitSet {
        ExitSet::new(9, 9, &[Pos::new(4, 0), Pos::new(4, 8)], 2, Metric::Chebyshev).unwrap()
    }

    pub fn grid_with_people(people: &[Pos]) -> Grid {
        let mut g = Grid::filled(9, 9, CellState::Empty).unwrap();
        for &p in people {
            g.set(p, CellState::Person);
        }
        g
    }
}

// ── ExitSet ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod exits {
    use ev_core::{CellState, Metric, Pos};
    use ev_grid::{Grid, GridError};

    use super::helpers::{grid_with_people, two_exit_set};
    use crate::{ExitSet, FieldError};

    #[test]
    fn rejects_empty_exit_list() {
        let r = ExitSet::new(5, 5, &[], 3, Metric::Chebyshev);
        assert!(matches!(r, Err(FieldError::NoExits)));
    }

    #[test]
    fn rejects_out_of_bounds_and_duplicates() {
        let r = ExitSet::new(5, 5, &[Pos::new(5, 0)], 3, Metric::Chebyshev);
        assert!(matches!(r, Err(FieldError::Grid(GridError::OutOfBounds { .. }))));

        let r = ExitSet::new(5, 5, &[Pos::new(1, 1), Pos::new(1, 1)], 3, Metric::Chebyshev);
        assert!(matches!(r, Err(FieldError::DuplicateExit(_))));
    }

    #[test]
    fn lookup_by_position() {
        let set = two_exit_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(Pos::new(4, 8)), Some(1));
        assert!(set.is_exit(Pos::new(4, 0)));
        assert!(!set.is_exit(Pos::new(0, 0)));
    }

    #[test]
    fn capture_area_is_clipped() {
        let set = two_exit_set();
        // Radius 2 around (4, 0): rows 2..=6, cols 0..=2.
        assert_eq!(set.area(0).len(), 15);
    }

    #[test]
    fn crowd_counts_people_in_area_only() {
        let mut set = two_exit_set();
        let g = grid_with_people(&[Pos::new(3, 1), Pos::new(6, 2), Pos::new(4, 4), Pos::new(4, 7)]);
        set.refresh_crowd(&g);
        assert_eq!(set.crowd(0), 2);
        assert_eq!(set.crowd(1), 1);
        assert_eq!(set.crowd_at(Pos::new(4, 8)).unwrap(), 1);
        assert!(matches!(set.crowd_at(Pos::new(0, 0)), Err(FieldError::UnknownExit(_))));
    }

    #[test]
    fn crowd_is_recomputed_not_accumulated() {
        let mut set = two_exit_set();
        set.refresh_crowd(&grid_with_people(&[Pos::new(3, 1)]));
        assert_eq!(set.crowd(0), 1);
        set.refresh_crowd(&grid_with_people(&[]));
        assert_eq!(set.crowd(0), 0);
    }

    #[test]
    fn stamp_writes_exits() {
        let set = two_exit_set();
        let mut g = Grid::filled(9, 9, CellState::Empty).unwrap();
        set.stamp(&mut g);
        assert_eq!(g.count(CellState::Exit), 2);
        assert_eq!(g.get(Pos::new(4, 0)), CellState::Exit);
    }
}

// ── Safety ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod safety {
    use ev_core::Pos;

    use crate::{FieldError, FloorField};

    #[test]
    fn default_modifiers_are_cubic() {
        let f = FloorField::default();
        // distance 2, crowd 0 → 1 / (8 + 0)
        assert_eq!(f.safety(Pos::new(0, 0), Pos::new(2, 1), 0), 1.0 / 8.0);
        // distance 1, crowd 2 → 1 / (1 + 8)
        assert_eq!(f.safety(Pos::new(0, 0), Pos::new(1, 1), 2), 1.0 / 9.0);
    }

    #[test]
    fn closer_and_emptier_is_safer() {
        let f = FloorField::default();
        let exit = Pos::new(0, 0);
        assert!(f.safety(exit, Pos::new(1, 1), 0) > f.safety(exit, Pos::new(3, 3), 0));
        assert!(f.safety(exit, Pos::new(2, 2), 0) > f.safety(exit, Pos::new(2, 2), 4));
    }

    #[test]
    fn zero_crowd_modifier_makes_crowd_constant() {
        let f = FloorField::new(3.0, 0.0).unwrap();
        let exit = Pos::new(0, 0);
        let from = Pos::new(2, 0);
        let baseline = f.safety(exit, from, 0);
        for crowd in [1, 5, 40] {
            assert_eq!(f.safety(exit, from, crowd), baseline);
        }
        assert_eq!(baseline, 1.0 / 9.0);
    }

    #[test]
    fn rejects_negative_or_nan() {
        assert!(matches!(FloorField::new(-1.0, 3.0), Err(FieldError::BadModifier { .. })));
        assert!(FloorField::new(3.0, f64::INFINITY).is_err());
    }
}

// ── Exit choice ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod choice {
    use ev_core::{Metric, Pos, SimRng};

    use super::helpers::{grid_with_people, two_exit_set};
    use crate::{ExitSet, FloorField, choose_exit, exit_probabilities};

    #[test]
    fn probabilities_sum_to_one() {
        let set = two_exit_set();
        let p = exit_probabilities(&set, &FloorField::default(), Pos::new(1, 2)).unwrap();
        assert_eq!(p.len(), 2);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[0] > p[1], "left exit is closer");
    }

    #[test]
    fn equidistant_uncrowded_exits_split_evenly() {
        let set = two_exit_set();
        let field = FloorField::default();
        let from = Pos::new(4, 4);
        let p = exit_probabilities(&set, &field, from).unwrap();
        assert!((p[0] - 0.5).abs() < 1e-12);

        let mut rng = SimRng::new(2024);
        let trials = 20_000;
        let left = (0..trials)
            .filter(|_| choose_exit(&set, &field, from, &mut rng).unwrap() == Pos::new(4, 0))
            .count();
        let share = left as f64 / trials as f64;
        assert!((share - 0.5).abs() < 0.02, "left share {share}");
    }

    #[test]
    fn crowding_pushes_choice_away() {
        let mut set = two_exit_set();
        let field = FloorField::default();
        set.refresh_crowd(&grid_with_people(&[Pos::new(3, 1), Pos::new(5, 1), Pos::new(4, 2)]));
        let p = exit_probabilities(&set, &field, Pos::new(4, 4)).unwrap();
        assert!(p[1] > p[0], "crowded left exit should be less likely: {p:?}");
    }

    #[test]
    fn zero_crowd_modifier_ignores_crowd() {
        let field = FloorField::new(3.0, 0.0).unwrap();
        let from = Pos::new(2, 5);

        let mut empty = two_exit_set();
        empty.refresh_crowd(&grid_with_people(&[]));
        let mut crowded = two_exit_set();
        crowded.refresh_crowd(&grid_with_people(&[Pos::new(3, 1), Pos::new(5, 1), Pos::new(4, 2)]));
        assert_eq!(crowded.crowd(0), 3);

        let a = exit_probabilities(&empty, &field, from).unwrap();
        let b = exit_probabilities(&crowded, &field, from).unwrap();
        assert_eq!(a, b);

        // Same random stream → identical picks regardless of crowd.
        let mut r1 = SimRng::new(77);
        let mut r2 = SimRng::new(77);
        for _ in 0..500 {
            assert_eq!(
                choose_exit(&empty, &field, from, &mut r1).unwrap(),
                choose_exit(&crowded, &field, from, &mut r2).unwrap()
            );
        }
    }

    #[test]
    fn single_exit_always_chosen() {
        let exit = Pos::new(0, 0);
        let exits = ExitSet::new(4, 4, &[exit], 1, Metric::Chebyshev).unwrap();
        let mut rng = SimRng::new(1);
        for _ in 0..50 {
            let pick = choose_exit(&exits, &FloorField::default(), Pos::new(3, 3), &mut rng);
            assert_eq!(pick.unwrap(), exit);
        }
    }
}
