// Language-model invocation result.
//
// A read-only record built once per model call by whoever talks to the
// provider. Validators only ever read `output`; the token counts and the
// raw stream payload ride along for callers that want them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The result of one language-model invocation.
///
/// Fields are private so the record can't be mutated after construction.
/// Token counts are unsigned, so a negative count fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    #[serde(default)]
    prompt_token_count: Option<u64>,
    #[serde(default)]
    response_token_count: Option<u64>,
    output: String,
    /// Raw incremental payload from a streaming call. Opaque to this record.
    #[serde(default)]
    stream_output: Option<Value>,
}

impl LlmResponse {
    /// Create a response with only the generated output.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            prompt_token_count: None,
            response_token_count: None,
            output: output.into(),
            stream_output: None,
        }
    }

    pub fn with_prompt_token_count(mut self, count: u64) -> Self {
        self.prompt_token_count = Some(count);
        self
    }

    pub fn with_response_token_count(mut self, count: u64) -> Self {
        self.response_token_count = Some(count);
        self
    }

    pub fn with_stream_output(mut self, payload: Value) -> Self {
        self.stream_output = Some(payload);
        self
    }

    pub fn prompt_token_count(&self) -> Option<u64> {
        self.prompt_token_count
    }

    pub fn response_token_count(&self) -> Option<u64> {
        self.response_token_count
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn stream_output(&self) -> Option<&Value> {
        self.stream_output.as_ref()
    }

    /// Prompt + response tokens, when both counts are known.
    pub fn total_token_count(&self) -> Option<u64> {
        Some(self.prompt_token_count? + self.response_token_count?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_has_no_counts() {
        let r = LlmResponse::new("hello");
        assert_eq!(r.output(), "hello");
        assert_eq!(r.prompt_token_count(), None);
        assert_eq!(r.response_token_count(), None);
        assert!(r.stream_output().is_none());
    }

    #[test]
    fn test_empty_output_is_allowed() {
        let r = LlmResponse::new("");
        assert_eq!(r.output(), "");
    }

    #[test]
    fn test_total_requires_both_counts() {
        let r = LlmResponse::new("x").with_prompt_token_count(12);
        assert_eq!(r.total_token_count(), None);

        let r = r.with_response_token_count(30);
        assert_eq!(r.total_token_count(), Some(42));
    }

    #[test]
    fn test_deserialize_minimal() {
        let r: LlmResponse = serde_json::from_value(json!({ "output": "hi" })).unwrap();
        assert_eq!(r, LlmResponse::new("hi"));
    }

    #[test]
    fn test_deserialize_rejects_missing_output() {
        let err = serde_json::from_value::<LlmResponse>(json!({ "prompt_token_count": 3 }));
        assert!(err.is_err());
    }

    #[test]
    fn test_deserialize_rejects_negative_count() {
        let err = serde_json::from_value::<LlmResponse>(json!({
            "output": "hi",
            "response_token_count": -1
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_stream_output_is_kept_opaque() {
        let payload = json!([{ "delta": "He" }, { "delta": "llo" }]);
        let r: LlmResponse = serde_json::from_value(json!({
            "output": "Hello",
            "stream_output": payload.clone()
        }))
        .unwrap();
        assert_eq!(r.stream_output(), Some(&payload));
    }
}
