use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::validators::OnFail;

/// Default probability at or above which the model labels text profane.
pub const DEFAULT_PROFANITY_THRESHOLD: f32 = 0.5;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
    /// Model probability cutoff for the profane label (0.0 to 1.0)
    pub profanity_threshold: f32,
    /// Extra word-list file merged into the built-in lexicon
    pub wordlist_path: Option<PathBuf>,
    /// Words the lexicon must never flag
    pub allowlist: Vec<String>,
    /// Default policy applied to Fail results by the CLI
    pub on_fail: OnFail,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: crate::profanity::download::default_model_dir(),
            profanity_threshold: DEFAULT_PROFANITY_THRESHOLD,
            wordlist_path: None,
            allowlist: Vec::new(),
            on_fail: OnFail::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default, so this only fails on values that are
    /// present but malformed.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let model_dir = lookup("GUARDRAIL_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_dir);

        let profanity_threshold = match lookup("GUARDRAIL_PROFANITY_THRESHOLD") {
            Some(raw) => parse_threshold(&raw)?,
            None => defaults.profanity_threshold,
        };

        let on_fail = match lookup("GUARDRAIL_ON_FAIL") {
            Some(raw) => raw.parse::<OnFail>().context("Invalid GUARDRAIL_ON_FAIL")?,
            None => defaults.on_fail,
        };

        Ok(Self {
            model_dir,
            profanity_threshold,
            wordlist_path: lookup("GUARDRAIL_WORDLIST").map(PathBuf::from),
            allowlist: lookup("GUARDRAIL_ALLOWLIST")
                .map(|raw| parse_allowlist(&raw))
                .unwrap_or_default(),
            on_fail,
        })
    }

    /// Check that the ONNX model files are on disk.
    /// Call this before loading the profanity model.
    pub fn require_model(&self) -> Result<()> {
        if !crate::profanity::download::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "ONNX model files not found in {}\n\
                 Run `guardrail download-model` to download them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}

fn parse_threshold(raw: &str) -> Result<f32> {
    let value: f32 = raw
        .trim()
        .parse()
        .with_context(|| format!("GUARDRAIL_PROFANITY_THRESHOLD is not a number: {raw}"))?;
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("GUARDRAIL_PROFANITY_THRESHOLD must be between 0 and 1, got {value}");
    }
    Ok(value)
}

fn parse_allowlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
