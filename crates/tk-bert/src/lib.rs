//! # tk-bert
//!
//! TuneKit integration for the BERT pre-training benchmark.
//!
//! [`SpaceBuilder`] decides which batch sizes and gradient checkpoint ratios
//! a trial may use given the GPU budget, and [`ObjectiveEvaluator`] turns a
//! finished run's log into a throughput score or a failure classification.

mod objective;
mod space;
mod target;

pub use objective::{parse_log, EvaluatorConfig, ObjectiveEvaluator};
pub use space::{update_space, SpaceBuilder, BATCH_SIZE, CKPT_RATIO};
pub use target::BertTarget;
