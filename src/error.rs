// Validator error taxonomy.
//
// Fail results are not errors: anything a classifier can decide about the
// input is folded into ValidationResult. These variants cover the cases
// where no result can be produced at all.

use thiserror::Error;

use crate::validators::DataType;

#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A classifier backend could not be located or loaded.
    #[error("{0}")]
    DependencyMissing(String),

    /// A classifier was loaded but failed while running.
    #[error("classifier failed: {0}")]
    Classifier(String),

    #[error("no validator registered under `{0}`")]
    UnknownValidator(String),

    #[error("validator `{name}` does not support data type `{data_type}`")]
    UnsupportedDataType { name: String, data_type: DataType },

    /// Raised by the `exception` on-fail policy.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}
