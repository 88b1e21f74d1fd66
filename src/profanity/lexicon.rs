// Word-list profanity filter.
//
// Text is split into word tokens and each token is normalized before lookup:
// lowercased, common character substitutions undone (`$h1t` -> `shit`), and
// `*` allowed to stand in for a vowel (`f*ck`). Matching is whole-token, so
// "class" or "cocktail" never trip on a listed substring. Multi-word entries
// match runs of consecutive tokens.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex_lite::Regex;

use super::traits::ProfanityLexicon;

const BUILTIN_WORDLIST: &str = include_str!("wordlist.txt");

const MASK: char = '*';

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Za-z0-9@$!*]+").expect("valid token pattern"))
}

#[derive(Debug, Clone, Default)]
pub struct LexiconFilter {
    words: HashSet<String>,
    /// Multi-word entries, tokens joined by a single space
    phrases: HashSet<String>,
    max_phrase_len: usize,
    allowlist: HashSet<String>,
}

impl LexiconFilter {
    /// Filter seeded with the built-in English word list.
    pub fn builtin() -> Self {
        Self::default().with_words(parse_wordlist(BUILTIN_WORDLIST))
    }

    /// Add entries to the lexicon. Allow-listed entries are skipped.
    ///
    /// Entries go through the same tokenizer and normalization as the text
    /// being checked, so `fr4k` is stored as `frak` and `b-word` as the
    /// phrase `b word`.
    pub fn with_words<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let tokens = tokenize(entry.as_ref());
            if tokens.iter().any(|t| self.allowlist.contains(t)) {
                continue;
            }
            match tokens.len() {
                0 => {}
                1 => {
                    self.words.insert(tokens[0].clone());
                }
                n => {
                    self.max_phrase_len = self.max_phrase_len.max(n);
                    self.phrases.insert(tokens.join(" "));
                }
            }
        }
        self
    }

    /// Never flag these words, even if they are in the lexicon.
    ///
    /// Phrases containing an allow-listed word are dropped as well.
    pub fn with_allowlist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            for token in tokenize(word.as_ref()) {
                self.words.remove(&token);
                self.allowlist.insert(token);
            }
        }

        let allowlist = &self.allowlist;
        self.phrases
            .retain(|phrase| !phrase.split(' ').any(|t| allowlist.contains(t)));
        self.max_phrase_len = self
            .phrases
            .iter()
            .map(|p| p.split(' ').count())
            .max()
            .unwrap_or(0);
        self
    }

    /// Merge entries from a word-list file (one per line, `#` comments).
    pub fn with_wordlist_file(self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        Ok(self.with_words(parse_wordlist(&contents)))
    }

    /// Number of entries (words and phrases).
    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_listed(&self, token: &str) -> bool {
        if self.allowlist.contains(token) {
            return false;
        }
        if !token.contains(MASK) {
            return self.words.contains(token);
        }
        // A token that is nothing but mask characters tells us nothing
        if token.chars().all(|c| c == MASK) {
            return false;
        }
        self.words
            .iter()
            .any(|word| !self.allowlist.contains(word) && masked_match(token, word))
    }
}

impl ProfanityLexicon for LexiconFilter {
    fn contains_profanity(&self, text: &str) -> bool {
        let tokens = tokenize(text);

        if tokens.iter().any(|t| self.is_listed(t)) {
            return true;
        }

        (2..=self.max_phrase_len).any(|n| {
            tokens
                .windows(n)
                .any(|window| self.phrases.contains(&window.join(" ")))
        })
    }
}

/// Parse word-list text: one entry per line, blank lines and `#` comments skipped.
pub fn parse_wordlist(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Split text into normalized word tokens.
fn tokenize(text: &str) -> Vec<String> {
    token_pattern()
        .find_iter(text)
        .filter_map(|m| normalize_token(m.as_str()))
        .collect()
}

/// Lowercase a raw token and undo character substitutions.
///
/// Returns None for tokens that carry no letters worth checking: pure
/// numbers (so "455" doesn't read as a word) and bare punctuation.
fn normalize_token(raw: &str) -> Option<String> {
    // At the edges `!` and `*` are punctuation or markdown emphasis. Inside a
    // word `!` stands for `i` and `*` masks a vowel.
    let trimmed = raw.trim_matches(|c: char| c == '!' || c == MASK);
    if trimmed.is_empty() || trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(
        trimmed
            .chars()
            .map(|c| match c.to_ascii_lowercase() {
                '@' | '4' => 'a',
                '3' => 'e',
                '1' | '!' => 'i',
                '0' => 'o',
                '$' | '5' => 's',
                '7' => 't',
                other => other,
            })
            .collect(),
    )
}

/// Same length, and every position either equal or a mask over a vowel.
fn masked_match(token: &str, word: &str) -> bool {
    token.chars().count() == word.chars().count()
        && token
            .chars()
            .zip(word.chars())
            .all(|(t, w)| t == w || (t == MASK && matches!(w, 'a' | 'e' | 'i' | 'o' | 'u')))
}
