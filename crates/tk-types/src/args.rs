//! Per-trial tuning arguments and integration method selection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::ConfigError;

/// Argument key holding the number of GPUs a trial runs on.
pub const GPUS_KEY: &str = "gpus";

/// The arguments the tuning driver declares for one benchmark target.
///
/// Values are kept as loosely typed JSON so numbers given on a command
/// line as strings (`"8"`) and numbers from a config file (`8`) are both
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TuneArgs {
    values: BTreeMap<String, Value>,
}

impl TuneArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Shorthand for a flag-style argument such as `slapo` with no value.
    pub fn with_flag(self, name: impl Into<String>) -> Self {
        self.with(name, Value::Bool(true))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The GPU count as a positive integer.
    pub fn gpus(&self) -> Result<u32, ConfigError> {
        let value = self.get(GPUS_KEY).ok_or(ConfigError::MissingGpus)?;
        let invalid = || ConfigError::InvalidGpus {
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        };

        let parsed = match value {
            // JSON configs may spell a whole count as `8.0`
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        match parsed {
            Some(n) if n > 0 => u32::try_from(n).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// The training framework integration selected by these arguments.
    pub fn method(&self) -> Method {
        Method::from_args(self)
    }
}

/// Training framework integration being tuned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Plain framework run without any integration.
    None,
    Slapo,
    SlapoMegatron,
    SlapoDeepSpeed,
}

impl Method {
    /// Integrations in resolution order.
    pub const INTEGRATIONS: [Method; 3] =
        [Method::Slapo, Method::SlapoMegatron, Method::SlapoDeepSpeed];

    /// Picks the first integration whose indicator key appears in `args`.
    pub fn from_args(args: &TuneArgs) -> Self {
        Self::INTEGRATIONS
            .into_iter()
            .find(|method| args.contains(method.key()))
            .unwrap_or(Method::None)
    }

    /// Argument key that selects this integration.
    pub fn key(&self) -> &'static str {
        match self {
            Method::None => "none",
            Method::Slapo => "slapo",
            Method::SlapoMegatron => "slapomegatron",
            Method::SlapoDeepSpeed => "slapodeepspeed",
        }
    }

    pub fn is_integration(&self) -> bool {
        !matches!(self, Method::None)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
