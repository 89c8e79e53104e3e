//! The contract a benchmark integration supplies to the tuning driver.

use tk_types::{EvaluationResult, LogSource, TkResult, TuneArgs};

use crate::space::Space;

/// One benchmark target the driver can tune.
///
/// The driver calls [`TuneTarget::update_space`] once per empty space,
/// samples assignments from it, runs the benchmark, and hands the resulting
/// log to [`TuneTarget::parse_log`] to rank the trial.
pub trait TuneTarget: Send + Sync {
    /// Populates `space` with the symbols this target exposes for `args`.
    fn update_space<'s>(
        &self,
        args: &TuneArgs,
        space: &'s mut Space,
    ) -> TkResult<&'s mut Space>;

    /// Classifies a finished trial from its log.
    fn parse_log(&self, source: &dyn LogSource) -> TkResult<EvaluationResult>;

    /// Human-readable target name.
    fn name(&self) -> &str;
}
