// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for configuration and locale loading.
//!
//! Lookups never fail: a missing key resolves to the key itself and a
//! missing locale resolves to an empty mapping. These errors only surface
//! from configuration and from the repositories themselves.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("default language {default:?} is not one of the allowed languages {allowed:?}")]
    DefaultNotAllowed {
        default: String,
        allowed: Vec<String>,
    },
    #[error("allowed language list is empty")]
    EmptyAllowedLanguages,
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("no locale source for language {0:?}")]
    LocaleNotFound(String),
    #[error("malformed locale source {}: {reason}", .path.display())]
    MalformedLocale { path: PathBuf, reason: String },
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
