// Composition tests — a model response flowing through validation.
//
// These tests exercise the data flow between modules:
//   LlmResponse JSON -> registry -> IsProfanityFree (real lexicon) -> OnFail
// with a stub model predictor so no ONNX files are needed.

use guardrail::config::Config;
use guardrail::error::ValidatorError;
use guardrail::llm_response::LlmResponse;
use guardrail::profanity::lexicon::LexiconFilter;
use guardrail::profanity::traits::ProfanityPredictor;
use guardrail::validators::{
    DataType, IsProfanityFree, Metadata, OnFail, Resolved, Validator, ValidatorRegistry,
};

/// Model stand-in that never flags anything, leaving the lexicon to decide.
struct QuietModel;

impl ProfanityPredictor for QuietModel {
    fn predict(&self, texts: &[String]) -> anyhow::Result<Vec<u8>> {
        Ok(vec![0; texts.len()])
    }
}

fn registry_with_stub_model() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry.register(
        "is-profanity-free",
        DataType::String,
        Box::new(|config: &Config| -> Result<Box<dyn Validator>, ValidatorError> {
            let lexicon = LexiconFilter::builtin().with_allowlist(&config.allowlist);
            Ok(Box::new(IsProfanityFree::new(
                Box::new(QuietModel),
                Box::new(lexicon),
            )))
        }),
    );
    registry
}

fn response(json: &str) -> LlmResponse {
    serde_json::from_str(json).unwrap()
}

// ============================================================
// Response -> validator -> on-fail
// ============================================================

#[test]
fn clean_response_survives_every_policy() {
    let resp = response(
        r#"{"output": "Thanks for asking, here is the summary.", "prompt_token_count": 40, "response_token_count": 9}"#,
    );
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &Config::default())
        .unwrap();

    let result = v.validate(resp.output(), &Metadata::new()).unwrap();
    for policy in [OnFail::Exception, OnFail::Fix, OnFail::Filter, OnFail::Noop] {
        assert_eq!(
            policy.apply(resp.output(), result.clone()).unwrap(),
            Resolved::Value(resp.output().to_string())
        );
    }
    assert_eq!(resp.total_token_count(), Some(49));
}

#[test]
fn profane_response_is_blanked_by_fix() {
    let resp = response(r#"{"output": "This plan is total bullsh*t."}"#);
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &Config::default())
        .unwrap();

    let result = v.validate(resp.output(), &Metadata::new()).unwrap();
    assert!(!result.is_pass());
    assert_eq!(
        OnFail::Fix.apply(resp.output(), result).unwrap(),
        Resolved::Value(String::new())
    );
}

#[test]
fn profane_response_raises_under_exception() {
    let resp = LlmResponse::new("well, shit").with_response_token_count(3);
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &Config::default())
        .unwrap();

    let result = v.validate(resp.output(), &Metadata::new()).unwrap();
    match OnFail::Exception.apply(resp.output(), result) {
        Err(ValidatorError::ValidationFailed(msg)) => assert!(msg.contains("well, shit")),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn profane_response_is_dropped_by_filter() {
    let resp = LlmResponse::new("what the fuck");
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &Config::default())
        .unwrap();

    let result = v.validate(resp.output(), &Metadata::new()).unwrap();
    assert_eq!(
        OnFail::Filter.apply(resp.output(), result).unwrap(),
        Resolved::Filtered
    );
}

#[test]
fn config_allowlist_reaches_the_lexicon() {
    let config = Config {
        allowlist: vec!["damn".to_string()],
        ..Config::default()
    };
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &config)
        .unwrap();

    assert!(v
        .validate("damn fine coffee", &Metadata::new())
        .unwrap()
        .is_pass());
}

#[test]
fn streamed_response_validates_final_output() {
    let resp = response(
        r#"{"output": "Have a nice day", "stream_output": [{"delta": "Have a "}, {"delta": "nice day"}]}"#,
    );
    let v = registry_with_stub_model()
        .build("is-profanity-free", DataType::String, &Config::default())
        .unwrap();

    assert!(resp.stream_output().is_some());
    assert!(v
        .validate(resp.output(), &Metadata::new())
        .unwrap()
        .is_pass());
}
