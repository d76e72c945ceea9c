// SPDX-License-Identifier: PMPL-1.0-or-later

//! The translator: active language, its loaded mapping, and lookups.
//!
//! A `Translator` is an ordinary value. Nothing is process-wide, so a
//! server keeps one per request (see [`crate::binding`]) and concurrent
//! requests in different languages never observe each other's state.
//!
//! Lookups never fail. A missing key resolves to the key itself, which
//! also makes a translator with an empty mapping a safe no-op.

use crate::count::PluralCount;
use crate::error::I18nError;
use crate::format::{interpolate, Arg};
use crate::mapping::{Entry, LocaleMapping};
use crate::options::Options;
use crate::repository::LocaleRepository;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Translator {
    options: Options,
    active_language: String,
    mapping: LocaleMapping,
    repository: Arc<dyn LocaleRepository>,
}

impl Translator {
    /// A translator with the built-in default options, its mapping loaded
    /// for the default language.
    pub fn new(repository: Arc<dyn LocaleRepository>) -> Self {
        let options = Options::default();
        let mut translator = Self {
            active_language: options.default_language.clone(),
            options,
            mapping: LocaleMapping::new(),
            repository,
        };
        translator.reload_mapping();
        translator
    }

    /// A translator configured from a partial option object.
    pub fn with_options(
        repository: Arc<dyn LocaleRepository>,
        partial: &Value,
    ) -> Result<Self, I18nError> {
        let options = Options::merged(partial)?;
        Self::from_options(repository, options)
    }

    /// A translator from fully specified options.
    pub fn from_options(
        repository: Arc<dyn LocaleRepository>,
        options: Options,
    ) -> Result<Self, I18nError> {
        options.validate()?;
        let mut translator = Self {
            active_language: options.default_language.clone(),
            options,
            mapping: LocaleMapping::new(),
            repository,
        };
        translator.reload_mapping();
        Ok(translator)
    }

    /// Merge `partial` over the built-in defaults and reset the active
    /// language to the resulting default, reloading its mapping.
    ///
    /// Invalid options leave the translator exactly as it was.
    pub fn configure(&mut self, partial: &Value) -> Result<(), I18nError> {
        let options = Options::merged(partial)?;
        options.validate()?;

        tracing::debug!(
            default_language = %options.default_language,
            allowed = ?options.allowed_languages,
            "translator configured"
        );
        self.active_language = options.default_language.clone();
        self.options = options;
        self.reload_mapping();
        Ok(())
    }

    /// A copy of the current options; changing it does not affect the
    /// translator.
    pub fn options(&self) -> Options {
        self.options.clone()
    }

    pub fn active_language(&self) -> &str {
        &self.active_language
    }

    /// The mapping currently used for lookups.
    pub fn mapping(&self) -> &LocaleMapping {
        &self.mapping
    }

    /// Switch to `code` and reload its mapping.
    ///
    /// Blocks on the repository load. Unknown codes are rejected with a
    /// warning and change nothing; the return value reports which happened.
    pub fn set_active_language(&mut self, code: &str) -> bool {
        if self.select_language(code) {
            self.reload_mapping();
            true
        } else {
            false
        }
    }

    /// Validate and store `code` without touching the mapping. Callers that
    /// want to control when I/O happens pair this with
    /// [`Translator::reload_mapping`].
    pub fn select_language(&mut self, code: &str) -> bool {
        let code = sanitize_code(code);
        if self.options.is_allowed(&code) {
            self.active_language = code;
            true
        } else {
            tracing::warn!(
                code = %code,
                allowed = ?self.options.allowed_languages,
                "Not found locale \"{}\"",
                code
            );
            false
        }
    }

    /// Replace the mapping with the repository's mapping for the active
    /// language. A failed load leaves an empty mapping, so every lookup
    /// falls back to its key.
    pub fn reload_mapping(&mut self) {
        self.mapping = match self.repository.load_mapping(&self.active_language) {
            Ok(mapping) => {
                tracing::debug!(
                    language = %self.active_language,
                    keys = mapping.len(),
                    "locale mapping loaded"
                );
                mapping
            }
            Err(err) => {
                tracing::warn!(
                    language = %self.active_language,
                    error = %err,
                    "locale mapping unavailable, falling back to keys"
                );
                LocaleMapping::new()
            }
        };
    }

    /// Plain lookup: the mapped text for `key`, or `key` itself.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.mapping
            .get(key)
            .and_then(Entry::singular_text)
            .unwrap_or(key)
    }

    /// Plural-aware lookup.
    ///
    /// Counts above one pick the plural form, everything else (including
    /// zero and negatives) picks the singular form. Only `{one, other}`
    /// entries supply forms; for plain entries and missing keys the keys
    /// themselves are returned. A count that is not a number falls back to
    /// [`Translator::translate`].
    pub fn translate_plural<'a, C>(
        &'a self,
        key: &'a str,
        plural_key: &'a str,
        count: C,
    ) -> &'a str
    where
        C: PluralCount,
    {
        let Some(count) = count.as_count() else {
            return self.translate(key);
        };

        let plural = count > 1;
        match self.mapping.get(key) {
            Some(Entry::Plural { one, other }) => {
                if plural {
                    other.as_deref().unwrap_or(plural_key)
                } else {
                    one.as_deref().unwrap_or(key)
                }
            }
            _ if plural => plural_key,
            _ => key,
        }
    }

    /// Translate `key` and interpolate `args` into the result.
    pub fn t(&self, key: &str, args: &[Arg]) -> String {
        interpolate(self.translate(key), args)
    }

    /// Plural-aware translate, then interpolate `args` into the result.
    pub fn tn<C>(&self, singular_key: &str, plural_key: &str, count: C, args: &[Arg]) -> String
    where
        C: PluralCount,
    {
        interpolate(self.translate_plural(singular_key, plural_key, count), args)
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("options", &self.options)
            .field("active_language", &self.active_language)
            .field("keys", &self.mapping.len())
            .finish()
    }
}

/// Strip embedded quote characters, e.g. from a cookie value serialised
/// as `"th"`.
pub(crate) fn sanitize_code(code: &str) -> String {
    code.chars().filter(|c| *c != '"' && *c != '\'').collect()
}
