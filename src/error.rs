// Library error types

use thiserror::Error;

/// Errors raised by [`ReactiveConfigStore`](crate::store::ReactiveConfigStore).
///
/// Construction errors abort store creation. Commit errors abort the whole
/// batch and leave the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The same parameter name was declared twice.
    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String },

    /// A name that was not declared at construction time.
    #[error("unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// The raw text of an edit is not an integer.
    #[error("invalid value {raw:?} for parameter '{name}': expected an integer")]
    InvalidValue { name: String, raw: String },

    /// The value is an integer but falls outside the declared bounds.
    #[error("value {value} for parameter '{name}' is outside the range {}", describe_bounds(.min, .max))]
    OutOfRange {
        name: String,
        value: i64,
        min: Option<i64>,
        max: Option<i64>,
    },
}

impl ConfigError {
    /// Name of the parameter the error refers to.
    pub fn parameter(&self) -> &str {
        match self {
            ConfigError::DuplicateParameter { name }
            | ConfigError::UnknownParameter { name }
            | ConfigError::InvalidValue { name, .. }
            | ConfigError::OutOfRange { name, .. } => name,
        }
    }
}

fn describe_bounds(min: &Option<i64>, max: &Option<i64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{lo}..={hi}"),
        (Some(lo), None) => format!("{lo}.."),
        (None, Some(hi)) => format!("..={hi}"),
        (None, None) => "..".to_string(),
    }
}

/// Errors raised when building a [`ButtonPane`](crate::ui::ButtonPane).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaneError {
    #[error("button pane needs parameter '{0}'")]
    MissingParameter(String),

    #[error("button pane needs at least one column, got {0}")]
    InvalidColumns(i64),

    #[error("button count must be between 0 and {max}, got {count}")]
    InvalidButtonCount { count: i64, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidValue {
            name: "Buttons".to_string(),
            raw: "ten".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"ten\" for parameter 'Buttons': expected an integer"
        );
        assert_eq!(err.parameter(), "Buttons");

        let err = ConfigError::OutOfRange {
            name: "Columns".to_string(),
            value: 0,
            min: Some(1),
            max: None,
        };
        assert_eq!(err.to_string(), "value 0 for parameter 'Columns' is outside the range 1..");
    }
}
