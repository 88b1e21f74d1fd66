// Validator trait and the types every validator speaks.
//
// A validator is a named check scoped to one data type. It takes a value
// plus free-form metadata and returns Pass or Fail; what happens to a Fail
// is decided by the caller's OnFail policy, not by the validator.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidatorError;

/// Auxiliary key-value context passed alongside the value under validation.
pub type Metadata = HashMap<String, serde_json::Value>;

/// Outcome of a single validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationResult {
    Pass,
    Fail {
        error_message: String,
        /// Suggested replacement for automatic remediation.
        fix_value: Option<String>,
    },
}

impl ValidationResult {
    pub fn fail(error_message: impl Into<String>, fix_value: Option<String>) -> Self {
        ValidationResult::Fail {
            error_message: error_message.into(),
            fix_value,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }
}

/// Data types a validator can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Integer,
    Float,
    Bool,
    List,
    Object,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::List => "list",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "integer" => Ok(DataType::Integer),
            "float" => Ok(DataType::Float),
            "bool" => Ok(DataType::Bool),
            "list" => Ok(DataType::List),
            "object" => Ok(DataType::Object),
            other => anyhow::bail!("Unknown data type: {other}"),
        }
    }
}

/// A named, data-type-scoped check.
///
/// Implementations must be stateless between calls so a single instance can
/// serve concurrent callers.
pub trait Validator: Send + Sync {
    /// Registry identifier, e.g. `is-profanity-free`.
    fn name(&self) -> &'static str;

    fn data_type(&self) -> DataType;

    fn validate(
        &self,
        value: &str,
        metadata: &Metadata,
    ) -> Result<ValidationResult, ValidatorError>;
}

/// What the caller does with a Fail result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OnFail {
    /// Turn the failure into a `ValidationFailed` error.
    #[default]
    Exception,
    /// Replace the value with the suggested fix-value.
    Fix,
    /// Drop the value entirely.
    Filter,
    /// Keep the value, ignoring the failure.
    Noop,
}

/// Value left after an on-fail policy has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Value(String),
    Filtered,
}

impl OnFail {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnFail::Exception => "exception",
            OnFail::Fix => "fix",
            OnFail::Filter => "filter",
            OnFail::Noop => "noop",
        }
    }

    pub fn apply(
        &self,
        value: &str,
        result: ValidationResult,
    ) -> Result<Resolved, ValidatorError> {
        let (error_message, fix_value) = match result {
            ValidationResult::Pass => return Ok(Resolved::Value(value.to_string())),
            ValidationResult::Fail {
                error_message,
                fix_value,
            } => (error_message, fix_value),
        };

        match self {
            OnFail::Exception => Err(ValidatorError::ValidationFailed(error_message)),
            // No fix offered: nothing to substitute, keep what we have
            OnFail::Fix => Ok(Resolved::Value(
                fix_value.unwrap_or_else(|| value.to_string()),
            )),
            OnFail::Filter => Ok(Resolved::Filtered),
            OnFail::Noop => Ok(Resolved::Value(value.to_string())),
        }
    }
}

impl fmt::Display for OnFail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnFail {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exception" => Ok(OnFail::Exception),
            "fix" => Ok(OnFail::Fix),
            "filter" => Ok(OnFail::Filter),
            "noop" => Ok(OnFail::Noop),
            other => anyhow::bail!(
                "Unknown on-fail policy: {other} (expected exception, fix, filter or noop)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(fix: Option<&str>) -> ValidationResult {
        ValidationResult::fail("bad value", fix.map(str::to_string))
    }

    #[test]
    fn test_pass_resolves_to_value_for_every_policy() {
        for policy in [OnFail::Exception, OnFail::Fix, OnFail::Filter, OnFail::Noop] {
            let resolved = policy.apply("keep me", ValidationResult::Pass).unwrap();
            assert_eq!(resolved, Resolved::Value("keep me".to_string()));
        }
    }

    #[test]
    fn test_exception_raises_with_message() {
        let err = OnFail::Exception.apply("x", failed(Some(""))).unwrap_err();
        match err {
            ValidatorError::ValidationFailed(msg) => assert_eq!(msg, "bad value"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fix_uses_fix_value() {
        let resolved = OnFail::Fix.apply("x", failed(Some(""))).unwrap();
        assert_eq!(resolved, Resolved::Value(String::new()));
    }

    #[test]
    fn test_fix_without_fix_value_keeps_original() {
        let resolved = OnFail::Fix.apply("x", failed(None)).unwrap();
        assert_eq!(resolved, Resolved::Value("x".to_string()));
    }

    #[test]
    fn test_filter_and_noop() {
        assert_eq!(
            OnFail::Filter.apply("x", failed(Some(""))).unwrap(),
            Resolved::Filtered
        );
        assert_eq!(
            OnFail::Noop.apply("x", failed(Some(""))).unwrap(),
            Resolved::Value("x".to_string())
        );
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("FIX".parse::<OnFail>().unwrap(), OnFail::Fix);
        assert_eq!(" noop ".parse::<OnFail>().unwrap(), OnFail::Noop);
        assert!("reask".parse::<OnFail>().is_err());
    }

    #[test]
    fn test_cli_values_match_display_names() {
        use clap::ValueEnum;

        for policy in OnFail::value_variants() {
            let name = policy.to_possible_value().unwrap();
            assert_eq!(name.get_name(), policy.as_str());
            assert_eq!(<OnFail as ValueEnum>::from_str(policy.as_str(), true).unwrap(), *policy);
        }
        assert_eq!(<OnFail as ValueEnum>::from_str("FIX", true).unwrap(), OnFail::Fix);
        assert!(<OnFail as ValueEnum>::from_str("retry", true).is_err());
    }

    #[test]
    fn test_data_type_display_round_trips() {
        for dt in [
            DataType::String,
            DataType::Integer,
            DataType::Float,
            DataType::Bool,
            DataType::List,
            DataType::Object,
        ] {
            assert_eq!(dt.to_string().parse::<DataType>().unwrap(), dt);
        }
    }

    #[test]
    fn test_result_serializes_with_outcome_tag() {
        let json = serde_json::to_value(ValidationResult::Pass).unwrap();
        assert_eq!(json["outcome"], "pass");

        let json = serde_json::to_value(failed(Some(""))).unwrap();
        assert_eq!(json["outcome"], "fail");
        assert_eq!(json["error_message"], "bad value");
        assert_eq!(json["fix_value"], "");
    }
}
