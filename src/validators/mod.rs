// Validators and the registry that hands them out by name.

pub mod base;
pub mod profanity_free;
pub mod registry;

pub use base::{DataType, Metadata, OnFail, Resolved, ValidationResult, Validator};
pub use profanity_free::IsProfanityFree;
pub use registry::{ValidatorFactory, ValidatorRegistry};
