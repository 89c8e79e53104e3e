use tk_space::{Space, TuneTarget};
use tk_types::{EvaluationResult, LogSource, TkResult, TuneArgs};

use crate::objective::{EvaluatorConfig, ObjectiveEvaluator};
use crate::space::SpaceBuilder;

/// The BERT benchmark as seen by the tuning driver.
#[derive(Debug, Clone)]
pub struct BertTarget {
    builder: SpaceBuilder,
    evaluator: ObjectiveEvaluator,
}

impl BertTarget {
    pub fn new() -> TkResult<Self> {
        Self::with_config(EvaluatorConfig::default())
    }

    pub fn with_config(config: EvaluatorConfig) -> TkResult<Self> {
        Ok(Self {
            builder: SpaceBuilder::new(),
            evaluator: ObjectiveEvaluator::with_config(config)?,
        })
    }
}

impl TuneTarget for BertTarget {
    fn update_space<'s>(
        &self,
        args: &TuneArgs,
        space: &'s mut Space,
    ) -> TkResult<&'s mut Space> {
        self.builder.update_space(args, space)
    }

    fn parse_log(&self, source: &dyn LogSource) -> TkResult<EvaluationResult> {
        self.evaluator.parse_log(source)
    }

    fn name(&self) -> &str {
        "bert"
    }
}
