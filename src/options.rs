// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translator options and their configuration sources.
//!
//! Options are merged over built-in defaults (`en`, `[en, th]`, `lang`).
//! Partial options are plain JSON objects so a config file can be consumed
//! verbatim; nested objects merge key-by-key, everything else is replaced.

use crate::error::I18nError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ALLOWED_LANGUAGES: &[&str] = &["en", "th"];
pub const DEFAULT_SIDE_CHANNEL_KEY: &str = "lang";

/// Option names used by older configs, mapped to their current names.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("defaultLang", "defaultLanguage"),
    ("locales", "allowedLanguages"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub default_language: String,
    pub allowed_languages: Vec<String>,
    pub side_channel_key: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            allowed_languages: DEFAULT_ALLOWED_LANGUAGES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            side_channel_key: DEFAULT_SIDE_CHANNEL_KEY.to_string(),
        }
    }
}

impl Options {
    pub fn new<I, S>(default_language: &str, allowed_languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self {
            default_language: default_language.to_string(),
            allowed_languages: allowed_languages.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        options.dedup_allowed();
        options
    }

    /// Merge a partial option object over the built-in defaults.
    ///
    /// `Value::Null` yields the defaults unchanged. The result is not
    /// validated; see [`Options::validate`].
    pub fn merged(partial: &Value) -> std::result::Result<Self, I18nError> {
        Self::default().merge(partial)
    }

    /// Merge a partial option object over these options.
    pub fn merge(&self, partial: &Value) -> std::result::Result<Self, I18nError> {
        let overrides = match partial {
            Value::Null => return Ok(self.clone()),
            Value::Object(map) => rename_legacy_keys(map),
            other => {
                return Err(I18nError::InvalidOptions(format!(
                    "expected an object, got {}",
                    value_kind(other)
                )))
            }
        };

        let mut base = serde_json::to_value(self)
            .map_err(|err| I18nError::InvalidOptions(err.to_string()))?;
        deep_merge(&mut base, &overrides);

        let mut options: Options = serde_json::from_value(base)
            .map_err(|err| I18nError::InvalidOptions(err.to_string()))?;
        options.dedup_allowed();
        Ok(options)
    }

    /// Read a JSON options file and merge it over the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let partial: Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing options file {}", path.display()))?;
        let options = Self::merged(&partial)
            .with_context(|| format!("merging options file {}", path.display()))?;
        Ok(options)
    }

    pub fn is_allowed(&self, code: &str) -> bool {
        self.allowed_languages.iter().any(|allowed| allowed == code)
    }

    /// The default language must be reachable through the allowed list,
    /// otherwise a translator could never switch back to it.
    pub fn validate(&self) -> std::result::Result<(), I18nError> {
        if self.allowed_languages.is_empty() {
            return Err(I18nError::EmptyAllowedLanguages);
        }
        if !self.is_allowed(&self.default_language) {
            return Err(I18nError::DefaultNotAllowed {
                default: self.default_language.clone(),
                allowed: self.allowed_languages.clone(),
            });
        }
        Ok(())
    }

    fn dedup_allowed(&mut self) {
        let mut seen = Vec::with_capacity(self.allowed_languages.len());
        self.allowed_languages.retain(|code| {
            if seen.contains(code) {
                false
            } else {
                seen.push(code.clone());
                true
            }
        });
    }
}

/// Recursive merge: objects merge key-by-key, scalars and arrays replace.
pub fn deep_merge(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, value) in src_map {
                if value.is_object() {
                    let slot = dst_map
                        .entry(key.clone())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !slot.is_object() {
                        *slot = Value::Object(Map::new());
                    }
                    deep_merge(slot, value);
                } else {
                    dst_map.insert(key.clone(), value.clone());
                }
            }
        }
        (dst, src) => *dst = src.clone(),
    }
}

/// Rename legacy option keys. When both spellings are present the
/// current name wins.
fn rename_legacy_keys(map: &Map<String, Value>) -> Value {
    let mut renamed = map.clone();
    for (legacy, current) in LEGACY_KEYS {
        if let Some(value) = renamed.remove(*legacy) {
            renamed.entry(current.to_string()).or_insert(value);
        }
    }
    Value::Object(renamed)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
