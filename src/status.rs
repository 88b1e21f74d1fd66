// System status display — model files, lexicon size, active settings.

use anyhow::Result;

use crate::config::Config;
use crate::profanity::download::{model_files_present, MODEL_FILE};
use crate::profanity::lexicon::LexiconFilter;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("Model directory: {}", config.model_dir.display());

    if model_files_present(&config.model_dir) {
        let size = std::fs::metadata(config.model_dir.join(MODEL_FILE))
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());
        println!("Profanity model: installed ({size})");
    } else {
        println!("Profanity model: not installed");
        println!("  Run `guardrail download-model` to install it");
    }

    let mut lexicon = LexiconFilter::builtin();
    match &config.wordlist_path {
        Some(path) => {
            lexicon = lexicon.with_wordlist_file(path)?;
            println!("Word list: built-in + {}", path.display());
        }
        None => println!("Word list: built-in"),
    }
    let lexicon = lexicon.with_allowlist(&config.allowlist);
    println!(
        "Lexicon entries: {} ({} allow-listed)",
        lexicon.len(),
        config.allowlist.len()
    );

    println!("Profanity threshold: {:.2}", config.profanity_threshold);
    println!("Default on-fail policy: {}", config.on_fail);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
