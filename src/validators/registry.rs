// Validator registry — explicit name → factory lookup.
//
// The registry is an ordinary value owned by whoever runs validation. It is
// populated at startup from a list of factories instead of import-time side
// effects, so what is registered can be inspected and tested.

use std::collections::BTreeMap;

use super::base::{DataType, Validator};
use super::profanity_free::{self, IsProfanityFree};
use crate::config::Config;
use crate::error::ValidatorError;

/// Builds a validator instance from configuration.
pub type ValidatorFactory =
    Box<dyn Fn(&Config) -> Result<Box<dyn Validator>, ValidatorError> + Send + Sync>;

struct Entry {
    data_type: DataType,
    factory: ValidatorFactory,
}

#[derive(Default)]
pub struct ValidatorRegistry {
    entries: BTreeMap<String, Entry>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every validator this crate ships.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            profanity_free::NAME,
            DataType::String,
            Box::new(|config: &Config| -> Result<Box<dyn Validator>, ValidatorError> {
                Ok(Box::new(IsProfanityFree::from_config(config)?))
            }),
        );
        registry
    }

    /// Register a factory under `name`. An existing entry with the same name is replaced.
    pub fn register(&mut self, name: &str, data_type: DataType, factory: ValidatorFactory) {
        self.entries
            .insert(name.to_string(), Entry { data_type, factory });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered (name, data type) pairs, sorted by name.
    pub fn entries(&self) -> Vec<(&str, DataType)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.data_type))
            .collect()
    }

    /// Instantiate the validator registered under `name` for `data_type`.
    pub fn build(
        &self,
        name: &str,
        data_type: DataType,
        config: &Config,
    ) -> Result<Box<dyn Validator>, ValidatorError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ValidatorError::UnknownValidator(name.to_string()))?;

        if entry.data_type != data_type {
            return Err(ValidatorError::UnsupportedDataType {
                name: name.to_string(),
                data_type,
            });
        }

        (entry.factory)(config)
    }
}
