// SPDX-License-Identifier: PMPL-1.0-or-later

//! i18n-jed: translation-string lookup for templates and browsers.
//!
//! Given an active language and a message key, returns the translated
//! string, optionally interpolating positional arguments and choosing
//! between singular and plural forms.
//!
//! COMPONENTS:
//! 1. **Repository**: supplies a key → entry mapping per language, from a
//!    locales directory or from a bundle already delivered to a page.
//! 2. **Translator**: holds options, the active language and its mapping;
//!    every lookup falls back to the key itself when no entry exists.
//! 3. **Binding**: builds an independent translator per request from a
//!    language cookie and exposes `t` / `tn` to templates.
//!
//! ```
//! use i18n_jed::{LocaleMapping, MemoryRepository, Translator};
//! use std::sync::Arc;
//!
//! let thai: LocaleMapping = [("Hello", "สวัสดี")].into_iter().collect();
//! let repo = MemoryRepository::new().with_mapping("th", thai);
//! let mut tr = Translator::new(Arc::new(repo));
//!
//! tr.set_active_language("th");
//! assert_eq!(tr.translate("Hello"), "สวัสดี");
//! assert_eq!(tr.t("Goodbye %s", &["Ann".into()]), "Goodbye Ann");
//! ```

pub mod binding;
pub mod count;
pub mod error;
pub mod format;
pub mod mapping;
pub mod options;
pub mod repository;
pub mod translator;

pub use binding::{Binder, RequestLocals};
pub use count::PluralCount;
pub use error::I18nError;
pub use format::{interpolate, Arg};
pub use mapping::{Entry, LocaleMapping};
pub use options::Options;
pub use repository::{FsRepository, LocaleRepository, MemoryRepository};
pub use translator::Translator;
