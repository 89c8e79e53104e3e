//! Trial tracking and ranking of evaluated outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tk_types::{EvaluationResult, TrialStatus};
use uuid::Uuid;

use crate::search::Assignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    Pending,
    Running,
    Finished,
}

/// A single trial: one assignment evaluated by one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub id: Uuid,
    pub trial_number: usize,
    pub assignment: Assignment,
    pub state: TrialState,
    pub result: Option<EvaluationResult>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Trial {
    pub fn new(trial_number: usize, assignment: Assignment) -> Self {
        Self {
            id: Uuid::new_v4(),
            trial_number,
            assignment,
            state: TrialState::Pending,
            result: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.state = TrialState::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_finished(&mut self, result: EvaluationResult) {
        self.state = TrialState::Finished;
        self.finished_at = Some(Utc::now());
        self.result = Some(result);
    }

    pub fn status(&self) -> Option<TrialStatus> {
        self.result.as_ref().map(|r| r.status)
    }
}

/// The best successful trial seen so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestTrial {
    pub trial_id: Uuid,
    pub trial_number: usize,
    pub assignment: Assignment,
    pub score: f64,
}

/// Aggregate view of a tuning session, fed with finished trials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningStatus {
    pub trials_succeeded: usize,
    pub trials_out_of_memory: usize,
    pub trials_incomplete: usize,
    pub best_trial: Option<BestTrial>,
}

impl TuningStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trials_finished(&self) -> usize {
        self.trials_succeeded + self.trials_out_of_memory + self.trials_incomplete
    }

    /// Accounts for a finished trial. Returns `true` if it became the new best.
    ///
    /// Trials without a result are ignored; failed trials are counted but
    /// never selected as best.
    pub fn record(&mut self, trial: &Trial) -> bool {
        let Some(result) = &trial.result else {
            return false;
        };

        match result.status {
            TrialStatus::Success => self.trials_succeeded += 1,
            TrialStatus::OutOfMemory => {
                self.trials_out_of_memory += 1;
                return false;
            }
            TrialStatus::IncompleteLog => {
                self.trials_incomplete += 1;
                return false;
            }
        }

        let improved = match &self.best_trial {
            None => true,
            Some(best) => result.score > best.score,
        };
        if improved {
            tracing::info!(
                trial = trial.trial_number,
                score = result.score,
                "new best trial"
            );
            self.best_trial = Some(BestTrial {
                trial_id: trial.id,
                trial_number: trial.trial_number,
                assignment: trial.assignment.clone(),
                score: result.score,
            });
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolValue;

    fn finished_trial(number: usize, result: EvaluationResult) -> Trial {
        let mut assignment = Assignment::new();
        assignment.insert("batch_size".into(), SymbolValue::Int(16 * number as i64));
        let mut trial = Trial::new(number, assignment);
        trial.mark_running();
        trial.mark_finished(result);
        trial
    }

    #[test]
    fn trial_lifecycle() {
        let mut trial = Trial::new(0, Assignment::new());
        assert_eq!(trial.state, TrialState::Pending);
        assert!(trial.status().is_none());

        trial.mark_running();
        assert_eq!(trial.state, TrialState::Running);
        assert!(trial.started_at.is_some());

        trial.mark_finished(EvaluationResult::out_of_memory("CUDA out of memory"));
        assert_eq!(trial.state, TrialState::Finished);
        assert!(trial.finished_at.is_some());
        assert_eq!(trial.status(), Some(TrialStatus::OutOfMemory));
    }

    #[test]
    fn best_trial_tracking() {
        let mut status = TuningStatus::new();

        assert!(status.record(&finished_trial(1, EvaluationResult::success(1500.0, ""))));
        assert!(status.record(&finished_trial(2, EvaluationResult::success(2000.0, ""))));
        // Worse result should not replace
        assert!(!status.record(&finished_trial(3, EvaluationResult::success(1000.0, ""))));

        let best = status.best_trial.as_ref().unwrap();
        assert_eq!(best.trial_number, 2);
        assert_eq!(best.score, 2000.0);
        assert_eq!(best.assignment["batch_size"], SymbolValue::Int(32));
    }

    #[test]
    fn failed_trials_are_counted_but_never_best() {
        let mut status = TuningStatus::new();
        assert!(!status.record(&finished_trial(1, EvaluationResult::out_of_memory(""))));
        assert!(!status.record(&finished_trial(2, EvaluationResult::incomplete(""))));
        assert!(status.best_trial.is_none());

        status.record(&finished_trial(3, EvaluationResult::success(10.0, "")));
        assert_eq!(status.trials_out_of_memory, 1);
        assert_eq!(status.trials_incomplete, 1);
        assert_eq!(status.trials_succeeded, 1);
        assert_eq!(status.trials_finished(), 3);
        assert_eq!(status.best_trial.unwrap().trial_number, 3);
    }

    #[test]
    fn unfinished_trials_are_ignored() {
        let mut status = TuningStatus::new();
        let mut trial = Trial::new(0, Assignment::new());
        trial.mark_running();
        assert!(!status.record(&trial));
        assert_eq!(status.trials_finished(), 0);
    }
}
