use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Current parameter values keyed by name, in declaration order.
pub type ParamMap = IndexMap<String, i64>;

/// Declaration of one integer configuration parameter.
///
/// `min` and `max` are inclusive and optional. They are checked when the
/// store is built (against `default`) and on every commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub default: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl ParameterSpec {
    /// Unbounded parameter.
    pub fn new(name: impl Into<String>, default: i64) -> Self {
        Self {
            name: name.into(),
            default,
            min: None,
            max: None,
        }
    }

    /// Restrict accepted values to `min..=max`.
    pub fn with_bounds(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether `value` satisfies the declared bounds.
    pub fn accepts(&self, value: i64) -> bool {
        self.min.is_none_or(|lo| value >= lo) && self.max.is_none_or(|hi| value <= hi)
    }
}

/// Read-only view of a declared parameter and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParameter {
    pub name: String,
    pub value: i64,
    pub default: i64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// One parameter whose value changed in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChange {
    pub name: String,
    pub old: i64,
    pub new: i64,
}
