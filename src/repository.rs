// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale repositories: where locale mappings come from.
//!
//! On a server the mappings live as `<code>.json` files in a locales
//! directory; on a client they are already embedded in the page as a
//! `var __lang = {...};` bundle. Both sit behind [`LocaleRepository`].

use crate::error::I18nError;
use crate::mapping::LocaleMapping;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the global the client-side bundle assigns.
pub const BUNDLE_GLOBAL: &str = "__lang";

pub trait LocaleRepository: Send + Sync {
    /// Load the full mapping for `code`. Loading blocks on whatever storage
    /// backs the repository.
    fn load_mapping(&self, code: &str) -> Result<LocaleMapping>;

    /// Language codes this repository can serve, sorted.
    fn languages(&self) -> Result<Vec<String>>;
}

/// Reads `<code>.json` files from a locales directory on every load.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, code: &str) -> PathBuf {
        self.root.join(format!("{}.json", code))
    }
}

impl LocaleRepository for FsRepository {
    fn load_mapping(&self, code: &str) -> Result<LocaleMapping> {
        if !is_safe_code(code) {
            return Err(I18nError::LocaleNotFound(code.to_string()).into());
        }
        let path = self.path_for(code);
        if !path.is_file() {
            return Err(I18nError::LocaleNotFound(code.to_string()).into());
        }

        let content = fs::read_to_string(&path).map_err(|source| I18nError::Io {
            path: path.clone(),
            source,
        })?;
        let mapping = serde_json::from_str(&content).map_err(|err| I18nError::MalformedLocale {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        Ok(mapping)
    }

    fn languages(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            anyhow::bail!("locales directory not found: {}", self.root.display());
        }

        let mut codes: Vec<String> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let path = entry.path();
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false);
                if !is_json {
                    return None;
                }
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();

        codes.sort();
        Ok(codes)
    }
}

/// Mappings held in memory, e.g. from a bundle already delivered to a page.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    mappings: BTreeMap<String, LocaleMapping>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, code: impl Into<String>, mapping: LocaleMapping) -> Self {
        self.insert(code, mapping);
        self
    }

    pub fn insert(&mut self, code: impl Into<String>, mapping: LocaleMapping) {
        self.mappings.insert(code.into(), mapping);
    }

    /// Parse a multi-language document: `{ "<code>": { key: entry, ... } }`.
    pub fn from_json(document: &str) -> Result<Self> {
        let mappings: BTreeMap<String, LocaleMapping> =
            serde_json::from_str(document).context("parsing locale bundle json")?;
        Ok(Self { mappings })
    }

    /// Parse a bundle script of the form `var __lang = {...};`, optionally
    /// followed by a module export tail.
    pub fn from_bundle_script(script: &str) -> Result<Self> {
        let literal = extract_bundle_literal(script)
            .with_context(|| format!("no `{}` assignment in bundle script", BUNDLE_GLOBAL))?;
        Self::from_json(literal)
    }
}

impl LocaleRepository for MemoryRepository {
    fn load_mapping(&self, code: &str) -> Result<LocaleMapping> {
        self.mappings
            .get(code)
            .cloned()
            .ok_or_else(|| I18nError::LocaleNotFound(code.to_string()).into())
    }

    fn languages(&self) -> Result<Vec<String>> {
        Ok(self.mappings.keys().cloned().collect())
    }
}

/// Language codes become file names, so path separators and parent
/// references never reach the filesystem.
fn is_safe_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Locate the object literal assigned to the bundle global.
fn extract_bundle_literal(script: &str) -> Option<&str> {
    let start = script.find(BUNDLE_GLOBAL)?;
    let after_name = &script[start + BUNDLE_GLOBAL.len()..];
    let after_eq = after_name.trim_start().strip_prefix('=')?;
    let literal = after_eq.trim_start();
    if !literal.starts_with('{') {
        return None;
    }
    let end = matching_brace(literal)?;
    Some(&literal[..=end])
}

/// Index of the brace closing the object that opens at byte 0, skipping
/// braces inside JSON strings.
fn matching_brace(literal: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (idx, byte) in literal.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
