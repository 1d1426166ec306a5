//! Cell state enum shared by the grid, the exit model and the engine.

/// The content of one grid cell.  Exactly one value per cell at all times.
///
/// The discriminants define the numeric order used by the seed generator's
/// `[min_state, max_state]` range.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellState {
    /// Free floor.
    #[default]
    Empty  = 0,
    /// An occupant.
    Person = 1,
    /// An exit.  Never changes type; absorbs arrivals as escapes.
    Exit   = 2,
}

impl CellState {
    /// Number of distinct states.
    pub const COUNT: usize = 3;

    /// All states in numeric order.
    pub const ALL: [CellState; CellState::COUNT] =
        [CellState::Empty, CellState::Person, CellState::Exit];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).  `None` for out-of-range values.
    #[inline]
    pub fn from_index(i: usize) -> Option<CellState> {
        Self::ALL.get(i).copied()
    }

    /// `true` for states a mover may step onto (`Empty` or `Exit`).
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, CellState::Empty | CellState::Exit)
    }

    /// Short lowercase label, used for CSV column names.
    pub fn as_str(self) -> &'static str {
        match self {
            CellState::Empty  => "empty",
            CellState::Person => "person",
            CellState::Exit   => "exit",
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
