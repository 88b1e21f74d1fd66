// Local ONNX profanity predictor using Detoxify's unbiased-toxic-roberta model.
//
// Runs entirely on the local CPU. The model scores seven toxicity categories;
// we only read the `obscene` head and turn its probability into a 0/1 label
// against a configurable threshold.
//
// Model: protectai/unbiased-toxic-roberta-onnx (quantized, ~126MB)

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::download::{MODEL_FILE, TOKENIZER_FILE};
use super::traits::{ProfanityPredictor, PROFANE_LABEL};

/// Number of output heads, in model order: toxicity, severe_toxicity,
/// obscene, identity_attack, insult, threat, sexual_explicit.
const LABEL_COUNT: usize = 7;

/// Index of the `obscene` head.
const OBSCENE_INDEX: usize = 2;

/// RoBERTa special token ids.
const BOS_ID: i64 = 0;
const PAD_ID: i64 = 1;
const EOS_ID: i64 = 2;

/// Longest sequence the model's position embeddings accept.
const MAX_SEQ_LEN: usize = 512;

pub struct OnnxProfanityPredictor {
    // ort::Session::run takes &mut self
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    threshold: f32,
}

impl OnnxProfanityPredictor {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in `model_dir`.
    pub fn load(model_dir: &Path, threshold: f32) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!("Model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!(threshold, "Loaded ONNX profanity model from {}", model_dir.display());

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            threshold,
        })
    }
}

impl ProfanityPredictor for OnnxProfanityPredictor {
    /// Tokenize the whole batch, run one forward pass over every window, and
    /// label each text profane if any of its windows is.
    fn predict(&self, texts: &[String]) -> Result<Vec<u8>> {
        let token_ids = texts
            .iter()
            .map(|t| {
                self.tokenizer
                    .encode(t.as_str(), false)
                    .map(|enc| enc.get_ids().to_vec())
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        let Some(batch) = assemble_batch(&token_ids) else {
            return Ok(Vec::new());
        };

        let shape = [batch.owners.len() as i64, batch.max_len as i64];
        let input_ids_tensor = Tensor::from_array((shape, batch.input_ids))
            .context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, batch.attention_mask))
            .context("Failed to create attention_mask tensor")?;

        let logits = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor
                })
                .context("ONNX inference failed")?;

            // Output shape: [windows, 7], raw logits
            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract output tensor")?;

            data.to_vec()
        };

        if logits.len() != batch.owners.len() * LABEL_COUNT {
            anyhow::bail!(
                "Unexpected model output size: {} values for {} windows",
                logits.len(),
                batch.owners.len()
            );
        }

        let mut labels = vec![0u8; texts.len()];
        for (row, &owner) in logits.chunks(LABEL_COUNT).zip(&batch.owners) {
            let probability = sigmoid(row[OBSCENE_INDEX]);
            if label_for(probability, self.threshold) == PROFANE_LABEL {
                labels[owner] = PROFANE_LABEL;
            }
        }

        for (text, label) in texts.iter().zip(&labels) {
            debug!(
                label,
                text_preview = %crate::output::truncate_chars(text, 50),
                "ONNX labeled text"
            );
        }

        Ok(labels)
    }
}

/// Model inputs for one forward pass, flattened to `[owners.len(), max_len]`.
#[derive(Debug)]
struct Batch {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
    max_len: usize,
    /// Index of the source text for each row
    owners: Vec<usize>,
}

/// Split each text's tokens into windows that fit the model, wrap each window
/// in `<s> .. </s>`, and right-pad every row to the longest one.
///
/// Returns None for an empty batch so no inference is run.
fn assemble_batch(token_ids: &[Vec<u32>]) -> Option<Batch> {
    if token_ids.is_empty() {
        return None;
    }

    let mut rows: Vec<Vec<i64>> = Vec::new();
    let mut owners = Vec::new();
    for (owner, ids) in token_ids.iter().enumerate() {
        if ids.is_empty() {
            rows.push(vec![BOS_ID, EOS_ID]);
            owners.push(owner);
            continue;
        }
        for chunk in ids.chunks(MAX_SEQ_LEN - 2) {
            let mut row = Vec::with_capacity(chunk.len() + 2);
            row.push(BOS_ID);
            row.extend(chunk.iter().map(|&id| id as i64));
            row.push(EOS_ID);
            rows.push(row);
            owners.push(owner);
        }
    }

    let max_len = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut input_ids = Vec::with_capacity(rows.len() * max_len);
    let mut attention_mask = Vec::with_capacity(rows.len() * max_len);
    for row in &rows {
        attention_mask.extend(std::iter::repeat(1i64).take(row.len()));
        attention_mask.extend(std::iter::repeat(0i64).take(max_len - row.len()));
        input_ids.extend_from_slice(row);
        input_ids.extend(std::iter::repeat(PAD_ID).take(max_len - row.len()));
    }

    Some(Batch {
        input_ids,
        attention_mask,
        max_len,
        owners,
    })
}

/// Sigmoid activation: maps any real number to (0, 1).
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn label_for(probability: f32, threshold: f32) -> u8 {
    if probability >= threshold {
        PROFANE_LABEL
    } else {
        0
    }
}
