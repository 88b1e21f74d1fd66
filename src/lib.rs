// Guardrail: output validators for language-model responses.
//
// This is the library root. `validators` holds the framework seams (trait,
// result type, registry, on-fail policies); `profanity` holds the classifier
// backends the is-profanity-free validator is built from.

pub mod config;
pub mod error;
pub mod llm_response;
pub mod output;
pub mod profanity;
pub mod status;
pub mod validators;
