// is-profanity-free: fails any string that either classifier flags.
//
// The two classifiers are combined with OR and no weighting. The fix-value
// offered on failure is the empty string, i.e. blank the content.

use tracing::{debug, warn};

use super::base::{DataType, Metadata, ValidationResult, Validator};
use crate::config::Config;
use crate::error::ValidatorError;
use crate::profanity::lexicon::LexiconFilter;
use crate::profanity::onnx::OnnxProfanityPredictor;
use crate::profanity::traits::{ProfanityLexicon, ProfanityPredictor, PROFANE_LABEL};

pub const NAME: &str = "is-profanity-free";

pub struct IsProfanityFree {
    predictor: Box<dyn ProfanityPredictor>,
    lexicon: Box<dyn ProfanityLexicon>,
}

impl IsProfanityFree {
    pub fn new(
        predictor: Box<dyn ProfanityPredictor>,
        lexicon: Box<dyn ProfanityLexicon>,
    ) -> Self {
        Self { predictor, lexicon }
    }

    /// Build the validator with the ONNX predictor and the lexicon filter.
    ///
    /// Both backends are loaded here, so a missing model or word list is
    /// reported before any text is validated.
    pub fn from_config(config: &Config) -> Result<Self, ValidatorError> {
        let mut lexicon = LexiconFilter::builtin();
        if let Some(path) = &config.wordlist_path {
            lexicon = lexicon
                .with_wordlist_file(path)
                .map_err(|e| dependency_missing(config, &e))?;
        }
        let lexicon = lexicon.with_allowlist(&config.allowlist);

        config
            .require_model()
            .map_err(|e| dependency_missing(config, &e))?;
        let predictor = OnnxProfanityPredictor::load(&config.model_dir, config.profanity_threshold)
            .map_err(|e| dependency_missing(config, &e))?;

        debug!(
            lexicon_entries = lexicon.len(),
            threshold = config.profanity_threshold,
            "Built {NAME} validator"
        );

        Ok(Self::new(Box::new(predictor), Box::new(lexicon)))
    }
}

impl Validator for IsProfanityFree {
    fn name(&self) -> &'static str {
        NAME
    }

    fn data_type(&self) -> DataType {
        DataType::String
    }

    fn validate(
        &self,
        value: &str,
        _metadata: &Metadata,
    ) -> Result<ValidationResult, ValidatorError> {
        let labels = self
            .predictor
            .predict(&[value.to_string()])
            .map_err(|e| ValidatorError::Classifier(format!("{e:#}")))?;

        let model_flagged = match labels.as_slice() {
            [label] => *label == PROFANE_LABEL,
            other => {
                return Err(ValidatorError::Classifier(format!(
                    "expected 1 label for 1 input, got {}",
                    other.len()
                )))
            }
        };
        let lexicon_flagged = self.lexicon.contains_profanity(value);

        if model_flagged || lexicon_flagged {
            debug!(model_flagged, lexicon_flagged, "Profanity detected");
            return Ok(ValidationResult::fail(
                format!("{value} contains profanity. Please return a profanity-free output."),
                Some(String::new()),
            ));
        }
        Ok(ValidationResult::Pass)
    }
}

fn dependency_missing(config: &Config, cause: &anyhow::Error) -> ValidatorError {
    warn!(error = %cause, "{NAME} classifier unavailable");
    ValidatorError::DependencyMissing(format!(
        "`{NAME}` validator requires the ONNX profanity model and the profanity word list \
         ({cause:#}). Run `guardrail download-model` to install the model into {}.",
        config.model_dir.display()
    ))
}
