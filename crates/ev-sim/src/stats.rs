//! Statistics recorder: the per-generation state histogram and the per-exit
//! escape log.
//!
//! # Retention
//!
//! The reference behaviour keeps one histogram entry per generation forever.
//! [`StateHistory`] makes that a policy ([`HistoryRetention`]) so long runs can
//! cap memory: the seed entry and the latest entry are always kept, plus
//! running aggregates that cover every generation ever recorded.

use std::collections::{BTreeMap, VecDeque};

use ev_core::{CellState, Generation, HistoryRetention, Pos};
pub use ev_grid::StateCounts;

// ── StateHistory ──────────────────────────────────────────────────────────────

/// Aggregates over every recorded generation, independent of retention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryAggregates {
    /// Number of histogram entries ever appended (seed included).
    pub generations_recorded: u64,
    /// Largest occupant count seen in any generation.
    pub peak_people:          u64,
    /// Sum of occupant counts over all recorded generations.
    pub person_generations:   u64,
}

/// Per-generation state counts.
#[derive(Clone, Debug)]
pub struct StateHistory {
    retention:  HistoryRetention,
    seed:       StateCounts,
    latest:     (Generation, StateCounts),
    /// Retained entries in ascending generation order.
    window:     VecDeque<(Generation, StateCounts)>,
    aggregates: HistoryAggregates,
}

impl StateHistory {
    /// Start a history with the seed grid's counts as generation 0.
    pub fn new(retention: HistoryRetention, seed: StateCounts) -> Self {
        let mut history = Self {
            retention,
            seed,
            latest:     (Generation::SEED, seed),
            window:     VecDeque::new(),
            aggregates: HistoryAggregates::default(),
        };
        history.retain(Generation::SEED, seed);
        history.accumulate(seed);
        history
    }

    /// Append the counts for `generation`.  Entries are never overwritten;
    /// generations must be recorded in ascending order.
    pub fn record(&mut self, generation: Generation, counts: StateCounts) {
        debug_assert!(generation > self.latest.0, "history must advance");
        self.latest = (generation, counts);
        self.retain(generation, counts);
        self.accumulate(counts);
    }

    fn retain(&mut self, generation: Generation, counts: StateCounts) {
        match self.retention {
            HistoryRetention::KeepAll => self.window.push_back((generation, counts)),
            HistoryRetention::KeepLast(n) => {
                self.window.push_back((generation, counts));
                while self.window.len() > n {
                    self.window.pop_front();
                }
            }
            HistoryRetention::Streaming => {}
        }
    }

    fn accumulate(&mut self, counts: StateCounts) {
        let people = counts.people();
        self.aggregates.generations_recorded += 1;
        self.aggregates.peak_people = self.aggregates.peak_people.max(people);
        self.aggregates.person_generations += people;
    }

    /// Counts for `generation`, if retained.  Seed and latest always are.
    pub fn get(&self, generation: Generation) -> Option<&StateCounts> {
        if generation == Generation::SEED {
            return Some(&self.seed);
        }
        if generation == self.latest.0 {
            return Some(&self.latest.1);
        }
        self.window
            .binary_search_by_key(&generation, |&(g, _)| g)
            .ok()
            .map(|i| &self.window[i].1)
    }

    #[inline]
    pub fn seed(&self) -> &StateCounts {
        &self.seed
    }

    #[inline]
    pub fn latest(&self) -> (Generation, &StateCounts) {
        (self.latest.0, &self.latest.1)
    }

    /// Retained entries in ascending generation order.
    pub fn iter(&self) -> impl Iterator<Item = (Generation, &StateCounts)> + '_ {
        self.window.iter().map(|(g, c)| (*g, c))
    }

    #[inline]
    pub fn retained_len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn aggregates(&self) -> &HistoryAggregates {
        &self.aggregates
    }

    /// Occupant count of the latest generation.
    #[inline]
    pub fn current_people(&self) -> u64 {
        self.latest.1.get(CellState::Person)
    }
}

// ── EscapeLog ─────────────────────────────────────────────────────────────────

/// Exit → generation → number of occupants who escaped there in that
/// generation.  Sparse: a generation appears only if it had an escape.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EscapeLog {
    exits:    Vec<Pos>,
    per_exit: Vec<BTreeMap<Generation, u64>>,
    total:    u64,
}

impl EscapeLog {
    /// An empty log for `exits` (construction order).
    pub fn new(exits: &[Pos]) -> Self {
        Self {
            exits:    exits.to_vec(),
            per_exit: vec![BTreeMap::new(); exits.len()],
            total:    0,
        }
    }

    /// Count one escape through exit number `exit` during `generation`.
    pub fn record(&mut self, exit: usize, generation: Generation) {
        *self.per_exit[exit].entry(generation).or_insert(0) += 1;
        self.total += 1;
    }

    fn index_of(&self, pos: Pos) -> Option<usize> {
        self.exits.iter().position(|&e| e == pos)
    }

    /// Escapes per generation at the exit at `pos`.
    pub fn for_exit(&self, pos: Pos) -> Option<&BTreeMap<Generation, u64>> {
        self.index_of(pos).map(|i| &self.per_exit[i])
    }

    /// Total escapes through the exit at `pos` (0 for non-exits).
    pub fn total_at(&self, pos: Pos) -> u64 {
        self.for_exit(pos).map_or(0, |m| m.values().sum())
    }

    /// Total escapes through all exits.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Escapes through all exits during generations `0..=generation`.
    pub fn cumulative_through(&self, generation: Generation) -> u64 {
        self.per_exit
            .iter()
            .map(|m| m.range(..=generation).map(|(_, n)| n).sum::<u64>())
            .sum()
    }

    /// Escapes through all exits during exactly `generation`.
    pub fn escaped_during(&self, generation: Generation) -> u64 {
        self.per_exit.iter().filter_map(|m| m.get(&generation)).sum()
    }

    /// Exits in construction order with their sparse per-generation counts.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &BTreeMap<Generation, u64>)> + '_ {
        self.exits.iter().copied().zip(self.per_exit.iter())
    }

    /// Per-exit totals in construction order.
    pub fn totals(&self) -> Vec<u64> {
        self.per_exit.iter().map(|m| m.values().sum()).collect()
    }

    #[inline]
    pub fn exits(&self) -> &[Pos] {
        &self.exits
    }
}
