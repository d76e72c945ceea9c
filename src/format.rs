// SPDX-License-Identifier: PMPL-1.0-or-later

//! printf-style positional interpolation.
//!
//! Supported placeholders:
//!
//! | Token        | Renders                                   |
//! |--------------|-------------------------------------------|
//! | `%s`         | next argument as text                     |
//! | `%d`, `%i`   | next argument as an integer               |
//! | `%f`, `%.2f` | next argument as a float (with precision) |
//! | `%2$s`       | second argument, cursor not advanced      |
//! | `%%`         | a literal `%`                             |
//!
//! A placeholder without a matching argument is left in place, and
//! substituted text is never rescanned.

use crate::count::parse_leading_int;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Largest `%.Nf` precision honoured; larger requests are clamped.
pub const MAX_PRECISION: usize = 100;

/// A positional interpolation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Arg {
    fn render_text(&self) -> String {
        match self {
            Arg::Str(text) => text.clone(),
            Arg::Int(value) => value.to_string(),
            Arg::Float(value) => render_number(*value, None),
        }
    }

    fn render_int(&self) -> String {
        match self {
            Arg::Str(text) => parse_leading_int(text)
                .map(|value| value.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
            Arg::Int(value) => value.to_string(),
            Arg::Float(value) if value.is_finite() => (value.trunc() as i64).to_string(),
            Arg::Float(_) => "NaN".to_string(),
        }
    }

    fn render_float(&self, precision: Option<usize>) -> String {
        let value = match self {
            Arg::Str(text) => text.trim().parse::<f64>().ok(),
            Arg::Int(value) => Some(*value as f64),
            Arg::Float(value) => Some(*value),
        };
        match value {
            Some(value) => render_number(value, precision),
            None => "NaN".to_string(),
        }
    }
}

/// Non-finite values use the `NaN` / `Infinity` spellings browsers print.
fn render_number(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match precision {
        Some(precision) => format!("{:.*}", precision.min(MAX_PRECISION), value),
        None => value.to_string(),
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_text())
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

macro_rules! impl_arg_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_arg_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Arg::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%(?:([1-9][0-9]*)\$)?(?:\.([0-9]+))?([sdif%])")
            .expect("placeholder pattern is valid")
    })
}

/// Substitute `args` into the placeholders of `template`.
///
/// Returns the template unchanged when `args` is empty, so untranslated
/// strings containing a bare `%` are never mangled.
pub fn interpolate(template: &str, args: &[Arg]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut cursor = 0usize;
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let conversion = &caps[3];
            if conversion == "%" {
                return if whole == "%%" {
                    "%".to_string()
                } else {
                    whole.to_string()
                };
            }

            let arg = match caps.get(1) {
                Some(index) => index
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| args.get(index - 1)),
                None => {
                    let arg = args.get(cursor);
                    cursor += 1;
                    arg
                }
            };
            let Some(arg) = arg else {
                return whole.to_string();
            };

            let precision = caps.get(2).and_then(|p| p.as_str().parse::<usize>().ok());
            match conversion {
                "d" | "i" => arg.render_int(),
                "f" => arg.render_float(precision),
                _ => arg.render_text(),
            }
        })
        .into_owned()
}
