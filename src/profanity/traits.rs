// Classifier traits — the two capabilities the profanity validator needs.
//
// The validator holds both as trait objects. Backends are resolved once when
// the validator is built, so a missing model shows up before any text is
// checked. Tests inject stubs through the same seam.

use anyhow::Result;

/// Label emitted by a ProfanityPredictor for profane input.
pub const PROFANE_LABEL: u8 = 1;

/// Binary predictor over a batch of texts (classifier A).
pub trait ProfanityPredictor: Send + Sync {
    /// Return one label per input, in input order. `1` means profane.
    fn predict(&self, texts: &[String]) -> Result<Vec<u8>>;
}

/// Lexicon/heuristic check over a single text (classifier B).
pub trait ProfanityLexicon: Send + Sync {
    fn contains_profanity(&self, text: &str) -> bool;
}
