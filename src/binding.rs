// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request binding: per-request translators driven by a language cookie.
//!
//! A [`Binder`] is built once per process and shared by request handlers.
//! For every request it hands out [`RequestLocals`], an independent
//! translator switched to the language named by the side-channel cookie,
//! plus the `t` / `tn` helpers templates call and a script that ships the
//! active mapping to the browser.

use crate::count::PluralCount;
use crate::error::I18nError;
use crate::format::Arg;
use crate::mapping::LocaleMapping;
use crate::options::Options;
use crate::repository::{LocaleRepository, BUNDLE_GLOBAL};
use crate::translator::{sanitize_code, Translator};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared request-binding state. Cloning is cheap enough per worker.
#[derive(Debug, Clone)]
pub struct Binder {
    prototype: Translator,
}

impl Binder {
    pub fn new(repository: Arc<dyn LocaleRepository>, options: Options) -> Result<Self, I18nError> {
        let prototype = Translator::from_options(repository, options)?;
        Ok(Self { prototype })
    }

    pub fn options(&self) -> Options {
        self.prototype.options()
    }

    /// Bind a translator for one request.
    ///
    /// `cookie_header` is the raw `Cookie` request header. When it carries
    /// the side-channel key and names a different language than the
    /// default, the request's translator switches to it. An unknown
    /// language leaves the default in place.
    pub fn bind(&self, cookie_header: Option<&str>) -> RequestLocals {
        let mut translator = self.prototype.clone();
        let key = translator.options().side_channel_key;

        if let Some(requested) = cookie_header.and_then(|header| parse_cookie(header, &key)) {
            let requested = sanitize_code(requested);
            if requested != translator.active_language() {
                translator.set_active_language(&requested);
            }
        }

        RequestLocals { translator }
    }
}

/// Per-request translation bindings.
#[derive(Debug, Clone)]
pub struct RequestLocals {
    translator: Translator,
}

impl RequestLocals {
    pub fn t(&self, key: &str, args: &[Arg]) -> String {
        self.translator.t(key, args)
    }

    pub fn tn<C>(&self, singular_key: &str, plural_key: &str, count: C, args: &[Arg]) -> String
    where
        C: PluralCount,
    {
        self.translator.tn(singular_key, plural_key, count, args)
    }

    pub fn active_language(&self) -> &str {
        self.translator.active_language()
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut Translator {
        &mut self.translator
    }

    /// Script assigning the active mapping to the bundle global, for
    /// embedding in a rendered page:
    ///
    /// ```text
    /// var __lang = {"th":{"Hello":"สวัสดี"}};
    /// ```
    pub fn client_script(&self) -> Result<String> {
        client_script(self.translator.active_language(), self.translator.mapping())
    }
}

/// Render `mapping` as a bundle script for `code`.
///
/// `</` is escaped so the literal cannot close an enclosing `<script>`.
pub fn client_script(code: &str, mapping: &LocaleMapping) -> Result<String> {
    let mut bundle = BTreeMap::new();
    bundle.insert(code, mapping);
    let literal = serde_json::to_string(&bundle)
        .with_context(|| format!("serialising locale mapping for {}", code))?;
    Ok(format!(
        "var {} = {};",
        BUNDLE_GLOBAL,
        literal.replace("</", "<\\/")
    ))
}

/// Value of cookie `name` in a raw `Cookie` header, if present.
///
/// Pairs are separated by `;`; the first pair with a matching name wins.
/// Values are returned verbatim, quotes included.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (cookie_name, value) = pair.split_once('=')?;
        if cookie_name.trim() == name {
            Some(value.trim())
        } else {
            None
        }
    })
}
