//! Turns a finished benchmark log into a throughput objective.

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tk_types::{EvaluationResult, LogSource, TkError, TkResult};
use tracing::{debug, warn};

/// Markers and reporting cadence of the benchmark's log format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Any log containing this text ran out of device memory.
    pub oom_marker: String,
    /// Label of the global batch size line.
    pub batch_size_label: String,
    /// Label of the per-iteration timing line (milliseconds).
    pub iter_time_label: String,
    /// Number of steps each timing sample averages over.
    pub window_steps: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            oom_marker: "CUDA out of memory".to_string(),
            batch_size_label: "global batch size".to_string(),
            iter_time_label: "elapsed time per iteration (ms)".to_string(),
            window_steps: 5,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_oom_marker(mut self, marker: &str) -> Self {
        self.oom_marker = marker.to_string();
        self
    }

    pub fn with_labels(mut self, batch_size: &str, iter_time: &str) -> Self {
        self.batch_size_label = batch_size.to_string();
        self.iter_time_label = iter_time.to_string();
        self
    }

    pub fn with_window_steps(mut self, steps: u32) -> Self {
        self.window_steps = steps;
        self
    }
}

/// Classifies trial logs and computes their throughput score.
#[derive(Debug, Clone)]
pub struct ObjectiveEvaluator {
    config: EvaluatorConfig,
    batch_size_re: Regex,
    iter_time_re: Regex,
}

impl ObjectiveEvaluator {
    pub fn new() -> TkResult<Self> {
        Self::with_config(EvaluatorConfig::default())
    }

    pub fn with_config(config: EvaluatorConfig) -> TkResult<Self> {
        if config.window_steps == 0 {
            return Err(TkError::Internal(
                "timing window must span at least one step".to_string(),
            ));
        }
        let batch_size_re = metric_regex(&config.batch_size_label)?;
        let iter_time_re = metric_regex(&config.iter_time_label)?;
        Ok(Self {
            config,
            batch_size_re,
            iter_time_re,
        })
    }

    /// Reads the whole log from `source` and evaluates it.
    ///
    /// Only a failure to read the source is an error; out-of-memory and
    /// incomplete runs come back as ordinary results.
    pub fn parse_log<S: LogSource + ?Sized>(&self, source: &S) -> TkResult<EvaluationResult> {
        let text = source.read_text()?;
        let result = self.evaluate_text(text);
        match result.status_code() {
            0 => debug!(source = %source.describe(), score = result.score, "trial succeeded"),
            _ => warn!(source = %source.describe(), status = ?result.status, "trial failed"),
        }
        Ok(result)
    }

    /// Evaluates log text that is already in memory.
    pub fn evaluate_text(&self, text: impl Into<String>) -> EvaluationResult {
        let text = text.into();

        if text.contains(&self.config.oom_marker) {
            return EvaluationResult::out_of_memory(text);
        }
        match self.score(&text) {
            Some(score) => EvaluationResult::success(score, text),
            None => EvaluationResult::incomplete(text),
        }
    }

    /// Samples per second (x1000), or `None` if a metric is missing.
    ///
    /// The first timing match covers warmup steps and is dropped before any
    /// value is parsed; every later sample is the mean step time of one
    /// window. Later matches that are not valid numbers (e.g. `1.2.3`) are
    /// skipped.
    fn score(&self, text: &str) -> Option<f64> {
        let batch_size = query(&self.batch_size_re, text)
            .first()?
            .parse::<f64>()
            .ok()?
            .trunc();

        let steady: Vec<f64> = query(&self.iter_time_re, text)
            .into_iter()
            .skip(1)
            .filter_map(|v| v.parse::<f64>().ok())
            .collect();
        if steady.is_empty() {
            return None;
        }

        let window = f64::from(self.config.window_steps);
        let steps = window * steady.len() as f64;
        let total_ms = window * steady.iter().sum::<f64>();
        let avg_ms = total_ms / steps;
        if !avg_ms.is_finite() || avg_ms <= 0.0 {
            return None;
        }
        Some(batch_size / avg_ms * 1e3)
    }

    /// Evaluates independent trial logs in parallel, keeping input order.
    pub fn evaluate_many<S>(&self, sources: &[S]) -> Vec<TkResult<EvaluationResult>>
    where
        S: LogSource + Sync,
    {
        sources.par_iter().map(|source| self.parse_log(source)).collect()
    }
}

fn metric_regex(label: &str) -> TkResult<Regex> {
    Regex::new(&format!(r"{}: +([\d.]+)", regex::escape(label)))
        .map_err(|e| TkError::Internal(format!("bad pattern for {label:?}: {e}")))
}

/// Every raw value reported under a metric label, in log order.
fn query<'t>(re: &Regex, text: &'t str) -> Vec<&'t str> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

static DEFAULT_EVALUATOR: LazyLock<Result<ObjectiveEvaluator, String>> =
    LazyLock::new(|| ObjectiveEvaluator::new().map_err(|e| e.to_string()));

/// Evaluates a log with the default BERT log format.
pub fn parse_log<S: LogSource + ?Sized>(source: &S) -> TkResult<EvaluationResult> {
    DEFAULT_EVALUATOR
        .as_ref()
        .map_err(|e| TkError::Internal(e.clone()))?
        .parse_log(source)
}
