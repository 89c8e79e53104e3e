//! The search space: an ordered collection of uniquely named symbols.

use serde::{Deserialize, Serialize};
use tk_types::SpaceError;

use crate::symbol::{Symbol, SymbolValue};

/// The full tunable surface of one trial.
///
/// Symbols keep the order in which they were created, which is also the
/// order sweep strategies enumerate them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Space {
    symbols: Vec<Symbol>,
}

impl Space {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a symbol and returns it so further candidates can be added.
    ///
    /// Fails if a symbol with the same name exists or if `candidates` is
    /// empty.
    pub fn create_symbol<I, V>(
        &mut self,
        name: impl Into<String>,
        candidates: I,
    ) -> Result<&mut Symbol, SpaceError>
    where
        I: IntoIterator<Item = V>,
        V: Into<SymbolValue>,
    {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(SpaceError::DuplicateSymbol { name });
        }

        let symbol = Symbol::new(name, candidates);
        if symbol.is_empty() {
            return Err(SpaceError::EmptyCandidates {
                name: symbol.name().to_string(),
            });
        }

        tracing::trace!(symbol = symbol.name(), candidates = symbol.len(), "created symbol");
        self.symbols.push(symbol);
        let last = self.symbols.len() - 1;
        Ok(&mut self.symbols[last])
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name() == name)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(Symbol::name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Total number of distinct assignments, or `None` on overflow.
    pub fn grid_size(&self) -> Option<usize> {
        let mut total: usize = 1;
        for symbol in &self.symbols {
            total = total.checked_mul(symbol.len())?;
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_extend_symbol() {
        let mut space = Space::new();
        let batch_size = space.create_symbol("batch_size", [128]).unwrap();
        batch_size.add(96);

        let symbol = space.get("batch_size").unwrap();
        assert_eq!(
            symbol.candidates(),
            &[SymbolValue::Int(128), SymbolValue::Int(96)]
        );
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let mut space = Space::new();
        space.create_symbol("batch_size", [4, 8]).unwrap();
        let err = space.create_symbol("batch_size", [16]).unwrap_err();
        assert_eq!(
            err,
            SpaceError::DuplicateSymbol {
                name: "batch_size".into()
            }
        );
        // The first symbol is untouched.
        assert_eq!(space.get("batch_size").unwrap().len(), 2);
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let mut space = Space::new();
        let err = space.create_symbol("ckpt_ratio", Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, SpaceError::EmptyCandidates { .. }));
        assert!(space.is_empty());
    }

    #[test]
    fn grid_size_is_product_of_candidate_counts() {
        let mut space = Space::new();
        assert_eq!(space.grid_size(), Some(1));
        space.create_symbol("batch_size", [128, 96]).unwrap();
        space.create_symbol("ckpt_ratio", [1.0, 0.5, 0.34]).unwrap();
        assert_eq!(space.grid_size(), Some(6));
        assert_eq!(space.names().collect::<Vec<_>>(), ["batch_size", "ckpt_ratio"]);
    }

    #[test]
    fn missing_symbol_is_none() {
        let space = Space::new();
        assert!(space.get("batch_size").is_none());
    }
}
