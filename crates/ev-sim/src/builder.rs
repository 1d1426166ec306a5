//! Fluent builder for constructing an [`EscapeAutomaton`].

use ev_core::stochastic::{SeedPattern, random_seed};
use ev_core::{CellState, EvacConfig, Generation, Pos, SimRng};
use ev_field::{ExitSet, FloorField};
use ev_grid::{Grid, NeighborhoodIndex};
use tracing::debug;

use crate::stats::{EscapeLog, StateHistory};
use crate::{EscapeAutomaton, SimError, SimResult};

/// Fluent builder for [`EscapeAutomaton`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.rng(r)`         | `SimRng::new(config.seed)`                      |
/// | `.occupants(v)`   | Random seeding on the `people_interval` lattice |
///
/// # Example
///
/// ```rust,ignore
/// let config = EvacConfig::new(20, 20, vec![Pos::new(0, 0), Pos::new(19, 19)]);
/// let mut automaton = AutomatonBuilder::new(config).build()?;
/// automaton.run(&mut NoopObserver)?;
/// ```
pub struct AutomatonBuilder {
    config:    EvacConfig,
    rng:       Option<SimRng>,
    occupants: Option<Vec<Pos>>,
}

impl AutomatonBuilder {
    pub fn new(config: EvacConfig) -> Self {
        Self { config, rng: None, occupants: None }
    }

    /// Inject the random source.  It is used, in order, for seed placement
    /// (unless occupants are explicit), the neighbor shuffle, and every exit
    /// choice.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Place occupants at exactly these cells instead of seeding randomly.
    ///
    /// Every position must be in bounds, not an exit, and listed once.
    pub fn occupants(mut self, occupants: Vec<Pos>) -> Self {
        self.occupants = Some(occupants);
        self
    }

    /// Validate the configuration, seed the grid, build every cache, and
    /// return a ready-to-run automaton at generation 0.
    pub fn build(self) -> SimResult<EscapeAutomaton> {
        let config = self.config;
        config.validate()?;
        let (height, width) = (config.height, config.width);
        let mut rng = self.rng.unwrap_or_else(|| SimRng::new(config.seed));

        let exits = ExitSet::new(
            height,
            width,
            &config.exits,
            config.exit_radius,
            config.exit_area_metric,
        )?;
        let field = FloorField::new(config.distance_modifier, config.crowd_modifier)?;

        // ── Seed grid ─────────────────────────────────────────────────────
        let mut grid = match self.occupants {
            Some(occupants) => place_occupants(height, width, &exits, &occupants)?,
            None => {
                let pattern = SeedPattern {
                    min_state:          CellState::Empty,
                    max_state:          CellState::Person,
                    interval:           config.people_interval,
                    fill_state:         CellState::Empty,
                    evenly_distributed: config.evenly_distributed,
                };
                let cells = random_seed(height, width, pattern, &mut rng)?;
                Grid::from_cells(height, width, cells)?
            }
        };
        // Exits win over any occupant seeded on the same cell.
        exits.stamp(&mut grid);

        // ── Caches ────────────────────────────────────────────────────────
        let neighbors = NeighborhoodIndex::build(
            height,
            width,
            config.neighborhood_radius,
            config.neighborhood_metric,
            &mut rng,
        )?;

        let seed_counts = grid.state_counts();
        let history = StateHistory::new(config.history, seed_counts);
        let escapes = EscapeLog::new(exits.positions());

        debug!(
            height,
            width,
            exits = exits.len(),
            people = seed_counts.people(),
            neighbor_entries = neighbors.entry_count(),
            "automaton built"
        );

        Ok(EscapeAutomaton {
            config,
            grid,
            neighbors,
            exits,
            field,
            rng,
            generation: Generation::SEED,
            history,
            escapes,
            poisoned: false,
        })
    }
}

fn place_occupants(
    height:    u32,
    width:     u32,
    exits:     &ExitSet,
    occupants: &[Pos],
) -> SimResult<Grid> {
    let mut grid = Grid::filled(height, width, CellState::Empty)?;
    for &pos in occupants {
        if !grid.contains(pos) {
            return Err(SimError::Config(format!(
                "occupant {pos} is outside the {height}x{width} grid"
            )));
        }
        if exits.is_exit(pos) {
            return Err(SimError::Config(format!("occupant {pos} placed on an exit")));
        }
        if grid.get(pos) == CellState::Person {
            return Err(SimError::Config(format!("occupant {pos} listed more than once")));
        }
        grid.set(pos, CellState::Person);
    }
    Ok(grid)
}
