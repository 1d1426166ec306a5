//! Unit tests for ev-grid.

#[cfg(test)]
mod grid {
    use ev_core::{CellState, Pos};

    use crate::{Grid, GridError};

    #[test]
    fn filled_grid_counts() {
        let g = Grid::filled(4, 5, CellState::Empty).unwrap();
        assert_eq!(g.len(), 20);
        assert_eq!(g.count(CellState::Empty), 20);
        assert_eq!(g.state_counts().total(), 20);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(
            Grid::filled(0, 3, CellState::Empty),
            Err(GridError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn from_cells_length_checked() {
        let err = Grid::from_cells(2, 2, vec![CellState::Empty; 3]).unwrap_err();
        assert!(matches!(err, GridError::CellCountMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn index_roundtrip() {
        let g = Grid::filled(3, 7, CellState::Empty).unwrap();
        for p in g.positions() {
            assert_eq!(g.pos_of(g.index_of(p)), p);
        }
        assert_eq!(g.index_of(Pos::new(2, 3)), 17);
    }

    #[test]
    fn positions_are_row_major() {
        let g = Grid::filled(2, 2, CellState::Empty).unwrap();
        let all: Vec<_> = g.positions().collect();
        assert_eq!(all, [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);
    }

    #[test]
    fn set_get_and_positions_of() {
        let mut g = Grid::filled(3, 3, CellState::Empty).unwrap();
        g.set(Pos::new(2, 2), CellState::Exit);
        g.set(Pos::new(0, 1), CellState::Person);
        g.set(Pos::new(1, 0), CellState::Person);
        assert_eq!(g.get(Pos::new(2, 2)), CellState::Exit);
        let people: Vec<_> = g.positions_of(CellState::Person).collect();
        assert_eq!(people, [Pos::new(0, 1), Pos::new(1, 0)]);
        let counts = g.state_counts();
        assert_eq!(counts.people(), 2);
        assert_eq!(counts.get(CellState::Exit), 1);
        assert_eq!(counts.get(CellState::Empty), 6);
    }

    #[test]
    fn bounds_check() {
        let g = Grid::filled(3, 4, CellState::Empty).unwrap();
        assert!(g.check(Pos::new(2, 3)).is_ok());
        assert!(g.check(Pos::new(3, 0)).is_err());
        assert!(g.check(Pos::new(0, 4)).is_err());
    }

    #[test]
    fn display_renders_rows() {
        let mut g = Grid::filled(2, 3, CellState::Empty).unwrap();
        g.set(Pos::new(0, 0), CellState::Person);
        g.set(Pos::new(1, 2), CellState::Exit);
        assert_eq!(g.to_string(), "P..\n..E\n");
    }
}

#[cfg(test)]
mod region {
    use ev_core::{Metric, Pos};

    use crate::cells_in_radius;

    #[test]
    fn interior_square() {
        let cells = cells_in_radius(5, 5, Pos::new(2, 2), 1, Metric::Chebyshev);
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Pos::new(1, 1));
        assert_eq!(cells[8], Pos::new(3, 3));
        assert!(cells.contains(&Pos::new(2, 2)), "center is included");
    }

    #[test]
    fn corner_is_clipped() {
        let cells = cells_in_radius(5, 5, Pos::new(0, 0), 1, Metric::Chebyshev);
        assert_eq!(cells, [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);

        let cells = cells_in_radius(3, 3, Pos::new(2, 2), 5, Metric::Chebyshev);
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn euclidean_disc() {
        // Radius 2 disc: 13 cells (square of 25 minus 12 corner cells).
        let cells = cells_in_radius(9, 9, Pos::new(4, 4), 2, Metric::Euclidean);
        assert_eq!(cells.len(), 13);
        assert!(!cells.contains(&Pos::new(2, 2)));
        assert!(cells.contains(&Pos::new(2, 4)));
    }

    #[test]
    fn results_are_row_major() {
        let cells = cells_in_radius(6, 6, Pos::new(3, 3), 2, Metric::Chebyshev);
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
    }
}

#[cfg(test)]
mod neighborhood {
    use ev_core::{Metric, Pos, SimRng};

    use crate::{GridError, NeighborhoodIndex, cells_in_radius};

    fn index(seed: u64) -> NeighborhoodIndex {
        NeighborhoodIndex::build(6, 8, 1, Metric::Chebyshev, &mut SimRng::new(seed)).unwrap()
    }

    #[test]
    fn lookups_are_stable() {
        let idx = index(1);
        let p = Pos::new(3, 4);
        let first: Vec<_> = idx.neighbors_of(p).unwrap().to_vec();
        let second: Vec<_> = idx.neighbors_of(p).unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn lists_are_permutations_of_the_region() {
        let idx = index(2);
        for row in 0..6 {
            for col in 0..8 {
                let p = Pos::new(row, col);
                let mut got = idx.neighbors_of(p).unwrap().to_vec();
                got.sort();
                assert_eq!(got, cells_in_radius(6, 8, p, 1, Metric::Chebyshev));
            }
        }
        assert_eq!(idx.cell_count(), 48);
    }

    #[test]
    fn some_list_is_shuffled() {
        let idx = index(3);
        let shuffled = (0..6).flat_map(|r| (0..8).map(move |c| Pos::new(r, c))).any(|p| {
            let list = idx.neighbors_of(p).unwrap();
            list.windows(2).any(|w| w[0] > w[1])
        });
        assert!(shuffled, "at least one of 48 lists should leave row-major order");
    }

    #[test]
    fn same_seed_same_table() {
        let a = index(9);
        let b = index(9);
        for r in 0..6 {
            for c in 0..8 {
                let p = Pos::new(r, c);
                assert_eq!(a.neighbors_of(p).unwrap(), b.neighbors_of(p).unwrap());
            }
        }
    }

    #[test]
    fn out_of_bounds_lookup_errors() {
        let idx = index(4);
        assert!(matches!(
            idx.neighbors_of(Pos::new(6, 0)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn radius_larger_than_grid_is_clipped() {
        for metric in [Metric::Chebyshev, Metric::Euclidean] {
            let idx = NeighborhoodIndex::build(3, 4, u32::MAX, metric, &mut SimRng::new(5)).unwrap();
            assert_eq!(idx.entry_count(), 12 * 12);
            assert_eq!(idx.neighbors_of(Pos::new(0, 0)).unwrap().len(), 12);
        }
    }

    #[test]
    fn zero_radius_rejected() {
        let r = NeighborhoodIndex::build(3, 3, 0, Metric::Chebyshev, &mut SimRng::new(0));
        assert!(matches!(r, Err(GridError::ZeroRadius)));
    }
}
