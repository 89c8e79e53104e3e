//! # tk-space
//!
//! Search space definitions for TuneKit.
//!
//! Provides named symbols with discrete candidate sets, the space that
//! collects them, sweep strategies (grid, seeded random) that turn a space
//! into concrete assignments, the [`TuneTarget`] contract benchmark
//! integrations implement, and trial tracking for the tuning driver.

mod search;
mod space;
mod symbol;
mod target;
mod trial;

pub use search::{Assignment, GridSearch, RandomSearch, SearchStrategy};
pub use space::Space;
pub use symbol::{Symbol, SymbolValue};
pub use target::TuneTarget;
pub use trial::{BestTrial, Trial, TrialState, TuningStatus};
