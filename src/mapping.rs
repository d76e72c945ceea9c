// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale mapping: the key → entry table for one language.
//!
//! Locale files are JSON objects whose values are either a plain string or
//! an object with optional `one` / `other` forms:
//!
//! ```json
//! {
//!   "Hello": "สวัสดี",
//!   "item": { "one": "1 item", "other": "%d items" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single translation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Plain(String),
    Plural {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        one: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        other: Option<String>,
    },
}

impl Entry {
    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Self {
        Entry::Plural {
            one: Some(one.into()),
            other: Some(other.into()),
        }
    }

    /// Text used when the entry is looked up without a count.
    ///
    /// Plural entries yield their singular form, then their plural form.
    pub fn singular_text(&self) -> Option<&str> {
        match self {
            Entry::Plain(text) => Some(text),
            Entry::Plural { one, other } => one.as_deref().or(other.as_deref()),
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::Plain(text.to_string())
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Entry::Plain(text)
    }
}

/// Key → entry table for one language.
///
/// Ordered so that serialised output (client scripts, fixtures) is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleMapping {
    entries: BTreeMap<String, Entry>,
}

impl LocaleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) {
        self.entries.insert(key.into(), entry.into());
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for LocaleMapping
where
    K: Into<String>,
    V: Into<Entry>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = LocaleMapping::new();
        for (key, entry) in iter {
            mapping.insert(key, entry);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_plural_entries() {
        let mapping: LocaleMapping = serde_json::from_str(
            r#"{"Hello": "Hallo", "item": {"one": "1 Ding", "other": "%d Dinge"}}"#,
        )
        .expect("valid locale json");

        assert_eq!(mapping.get("Hello"), Some(&Entry::Plain("Hallo".into())));
        assert_eq!(
            mapping.get("item"),
            Some(&Entry::plural("1 Ding", "%d Dinge"))
        );
    }

    #[test]
    fn plural_forms_are_optional() {
        let mapping: LocaleMapping =
            serde_json::from_str(r#"{"file": {"other": "files"}}"#).unwrap();
        assert_eq!(
            mapping.get("file"),
            Some(&Entry::Plural {
                one: None,
                other: Some("files".into())
            })
        );
        assert_eq!(mapping.get("file").unwrap().singular_text(), Some("files"));
    }

    #[test]
    fn rejects_non_string_values() {
        assert!(serde_json::from_str::<LocaleMapping>(r#"{"count": 3}"#).is_err());
        assert!(serde_json::from_str::<LocaleMapping>(r#"["a", "b"]"#).is_err());
    }

    #[test]
    fn serialises_as_flat_object() {
        let mapping: LocaleMapping = [("b", "B"), ("a", "A")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&mapping).unwrap(),
            r#"{"a":"A","b":"B"}"#
        );
    }
}
