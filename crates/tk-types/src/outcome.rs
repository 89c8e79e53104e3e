//! Classified outcome of one benchmark trial.

use serde::{Deserialize, Serialize};

/// How a trial ended, as reported back to the tuning driver.
///
/// Failures are ordinary data so the driver can rank or prune them like any
/// other trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrialStatus {
    /// The log carried every metric and the score is valid.
    Success,
    /// The benchmark ran out of device memory.
    OutOfMemory,
    /// Metrics were missing or the log was truncated.
    IncompleteLog,
}

impl TrialStatus {
    /// Numeric status code understood by the driver.
    pub fn code(&self) -> u8 {
        match self {
            TrialStatus::Success => 0,
            TrialStatus::OutOfMemory => 1,
            TrialStatus::IncompleteLog => 2,
        }
    }
}

/// The `(status, score, raw_log)` triple produced for a trial log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub status: TrialStatus,
    /// Throughput in samples per second, scaled by 1000. Zero unless the
    /// status is [`TrialStatus::Success`].
    pub score: f64,
    /// The log text exactly as it was read.
    pub raw_log: String,
}

impl EvaluationResult {
    pub fn success(score: f64, raw_log: impl Into<String>) -> Self {
        Self {
            status: TrialStatus::Success,
            score,
            raw_log: raw_log.into(),
        }
    }

    pub fn out_of_memory(raw_log: impl Into<String>) -> Self {
        Self::failed(TrialStatus::OutOfMemory, raw_log)
    }

    pub fn incomplete(raw_log: impl Into<String>) -> Self {
        Self::failed(TrialStatus::IncompleteLog, raw_log)
    }

    fn failed(status: TrialStatus, raw_log: impl Into<String>) -> Self {
        Self {
            status,
            score: 0.0,
            raw_log: raw_log.into(),
        }
    }

    pub fn status_code(&self) -> u8 {
        self.status.code()
    }

    pub fn is_success(&self) -> bool {
        self.status == TrialStatus::Success
    }

    /// Splits the result into the plain tuple form.
    pub fn into_tuple(self) -> (u8, f64, String) {
        (self.status.code(), self.score, self.raw_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(TrialStatus::Success.code(), 0);
        assert_eq!(TrialStatus::OutOfMemory.code(), 1);
        assert_eq!(TrialStatus::IncompleteLog.code(), 2);
    }

    #[test]
    fn failures_carry_zero_score() {
        let oom = EvaluationResult::out_of_memory("CUDA out of memory");
        assert_eq!(oom.status_code(), 1);
        assert_eq!(oom.score, 0.0);
        assert_eq!(oom.raw_log, "CUDA out of memory");

        let (code, score, log) = EvaluationResult::incomplete("truncated").into_tuple();
        assert_eq!((code, score, log.as_str()), (2, 0.0, "truncated"));
    }
}
