//! Sweep strategies that turn a space into concrete assignments.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::space::Space;
use crate::symbol::SymbolValue;

/// One sampled value per symbol, keyed by symbol name.
pub type Assignment = BTreeMap<String, SymbolValue>;

/// Common trait for all search strategies.
pub trait SearchStrategy: Send + Sync {
    /// Generate the next batch of assignments to evaluate.
    fn suggest(&mut self, count: usize) -> Vec<Assignment>;

    /// Human-readable strategy name.
    fn name(&self) -> &str;
}

// ---- Grid search ----

/// Exhaustive enumeration of every candidate combination.
#[derive(Debug, Clone)]
pub struct GridSearch {
    cursor: usize,
    combos: Vec<Assignment>,
}

impl GridSearch {
    pub fn new(space: &Space) -> Self {
        Self {
            cursor: 0,
            combos: Self::build_grid(space),
        }
    }

    /// Number of assignments not yet suggested.
    pub fn remaining(&self) -> usize {
        self.combos.len() - self.cursor
    }

    fn build_grid(space: &Space) -> Vec<Assignment> {
        // Cartesian product
        let mut result: Vec<Assignment> = vec![Assignment::new()];
        for symbol in space.symbols() {
            let mut next = Vec::with_capacity(result.len() * symbol.len());
            for existing in &result {
                for value in symbol.candidates() {
                    let mut combo = existing.clone();
                    combo.insert(symbol.name().to_string(), *value);
                    next.push(combo);
                }
            }
            result = next;
        }
        result
    }
}

impl SearchStrategy for GridSearch {
    fn suggest(&mut self, count: usize) -> Vec<Assignment> {
        let end = self.cursor.saturating_add(count).min(self.combos.len());
        let batch = self.combos[self.cursor..end].to_vec();
        self.cursor = end;
        batch
    }

    fn name(&self) -> &str {
        "grid"
    }
}

// ---- Random search ----

/// Independent uniform sampling of each symbol.
///
/// Seeded so a tuning session can be replayed.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    space: Space,
    rng: StdRng,
}

impl RandomSearch {
    pub fn new(space: Space, seed: u64) -> Self {
        Self {
            space,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn sample_one(&mut self) -> Assignment {
        let mut assignment = Assignment::new();
        for symbol in self.space.symbols() {
            let candidates = symbol.candidates();
            if candidates.is_empty() {
                continue;
            }
            let idx = self.rng.random_range(0..candidates.len());
            assignment.insert(symbol.name().to_string(), candidates[idx]);
        }
        assignment
    }
}

impl SearchStrategy for RandomSearch {
    fn suggest(&mut self, count: usize) -> Vec<Assignment> {
        (0..count).map(|_| self.sample_one()).collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_space() -> Space {
        let mut space = Space::new();
        space.create_symbol("batch_size", [128, 96]).unwrap();
        space
            .create_symbol("ckpt_ratio", [1.0, 0.92, 0.5])
            .unwrap();
        space
    }

    #[test]
    fn grid_search_covers_every_combination() {
        let space = sample_space();
        let mut gs = GridSearch::new(&space);
        let batch = gs.suggest(100);
        assert_eq!(batch.len(), 6);
        assert_eq!(Some(batch.len()), space.grid_size());

        let mut seen: Vec<(String, String)> = batch
            .iter()
            .map(|a| (a["batch_size"].to_string(), a["ckpt_ratio"].to_string()))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn grid_search_cursor_advances() {
        let mut gs = GridSearch::new(&sample_space());
        let first = gs.suggest(4);
        assert_eq!(first.len(), 4);
        assert_eq!(gs.remaining(), 2);
        let second = gs.suggest(10);
        assert_eq!(second.len(), 2); // only 2 remain
        assert!(gs.suggest(1).is_empty());
    }

    #[test]
    fn grid_search_on_empty_space_yields_single_empty_assignment() {
        let mut gs = GridSearch::new(&Space::new());
        let batch = gs.suggest(5);
        assert_eq!(batch.len(), 1);
        assert!(batch[0].is_empty());
    }

    #[test]
    fn random_search_samples_from_candidates() {
        let space = sample_space();
        let mut rs = RandomSearch::new(space.clone(), 7);
        let suggestions = rs.suggest(50);
        assert_eq!(suggestions.len(), 50);

        for assignment in &suggestions {
            for symbol in space.symbols() {
                let value = assignment[symbol.name()];
                assert!(symbol.contains(value), "{value} not a candidate");
            }
        }
    }

    #[test]
    fn random_search_is_reproducible_for_a_seed() {
        let space = sample_space();
        let a = RandomSearch::new(space.clone(), 42).suggest(20);
        let b = RandomSearch::new(space, 42).suggest(20);
        assert_eq!(a, b);
    }

    #[test]
    fn strategy_names() {
        let space = sample_space();
        assert_eq!(GridSearch::new(&space).name(), "grid");
        assert_eq!(RandomSearch::new(space, 0).name(), "random");
    }
}
