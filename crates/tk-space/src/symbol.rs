//! Named tunable parameters and their candidate values.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A concrete candidate value of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolValue {
    Int(i64),
    Float(f64),
}

impl SymbolValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(_) => None,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.as_f64().total_cmp(&other.as_f64())
    }
}

impl std::fmt::Display for SymbolValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for SymbolValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SymbolValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for SymbolValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for SymbolValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// A named tunable parameter with a discrete candidate set.
///
/// Candidates keep their insertion order; adding a value that is already
/// present is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    candidates: Vec<SymbolValue>,
}

impl Symbol {
    pub fn new<I, V>(name: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SymbolValue>,
    {
        let mut symbol = Self {
            name: name.into(),
            candidates: Vec::new(),
        };
        for value in candidates {
            symbol.add(value);
        }
        symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidates(&self) -> &[SymbolValue] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Adds a candidate, returning `false` if it was already present.
    pub fn add(&mut self, value: impl Into<SymbolValue>) -> bool {
        let value = value.into();
        if self.contains(value) {
            return false;
        }
        self.candidates.push(value);
        true
    }

    pub fn contains(&self, value: impl Into<SymbolValue>) -> bool {
        let value = value.into();
        self.candidates.iter().any(|c| *c == value)
    }

    pub fn max(&self) -> Option<SymbolValue> {
        self.candidates.iter().copied().max_by(SymbolValue::total_cmp)
    }

    /// Whether the largest candidate reaches `threshold`.
    ///
    /// An empty symbol never does.
    pub fn max_at_least(&self, threshold: f64) -> bool {
        self.max().is_some_and(|v| v.as_f64() >= threshold)
    }
}
