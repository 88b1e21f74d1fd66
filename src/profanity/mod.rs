// Profanity classifiers — trait-based abstraction over two independent backends.
//
// ProfanityPredictor is the model-backed batch classifier (local ONNX by
// default). ProfanityLexicon is the word-list check. The is-profanity-free
// validator consults both and fails if either one flags the text.

pub mod download;
pub mod lexicon;
pub mod onnx;
pub mod traits;
