// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plural counts.
//!
//! Counts arrive either as integers or as text straight from a template or
//! query string. Text is read like `parseInt`: optional leading whitespace,
//! an optional sign, then at least one digit. Anything after the digits is
//! ignored, so `"5 items"` counts as 5.

/// A value that can select between singular and plural forms.
pub trait PluralCount {
    /// The integer count, or `None` when the value is not a number.
    fn as_count(&self) -> Option<i64>;
}

macro_rules! impl_plural_count_lossless {
    ($($ty:ty),*) => {
        $(
            impl PluralCount for $ty {
                fn as_count(&self) -> Option<i64> {
                    Some(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! impl_plural_count_saturating {
    ($($ty:ty),*) => {
        $(
            impl PluralCount for $ty {
                fn as_count(&self) -> Option<i64> {
                    Some(i64::try_from(*self).unwrap_or(i64::MAX))
                }
            }
        )*
    };
}

impl_plural_count_lossless!(i8, i16, i32, i64, u8, u16, u32);
impl_plural_count_saturating!(u64, usize, u128);

impl PluralCount for isize {
    fn as_count(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl PluralCount for i128 {
    fn as_count(&self) -> Option<i64> {
        Some(i64::try_from(*self).unwrap_or(if *self < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl PluralCount for str {
    fn as_count(&self) -> Option<i64> {
        parse_leading_int(self)
    }
}

impl PluralCount for String {
    fn as_count(&self) -> Option<i64> {
        parse_leading_int(self)
    }
}

impl<T: PluralCount + ?Sized> PluralCount for &T {
    fn as_count(&self) -> Option<i64> {
        (**self).as_count()
    }
}

/// Parse the integer prefix of `text`, saturating on overflow.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_pass_through() {
        assert_eq!(5u8.as_count(), Some(5));
        assert_eq!((-3i32).as_count(), Some(-3));
        assert_eq!(u64::MAX.as_count(), Some(i64::MAX));
    }

    #[test]
    fn text_reads_leading_integer() {
        assert_eq!("42".as_count(), Some(42));
        assert_eq!("  7 apples".as_count(), Some(7));
        assert_eq!("-2".as_count(), Some(-2));
        assert_eq!("+9".as_count(), Some(9));
        assert_eq!("3.9".as_count(), Some(3));
        assert_eq!(String::from("10").as_count(), Some(10));
    }

    #[test]
    fn non_numeric_text_has_no_count() {
        assert_eq!("abc".as_count(), None);
        assert_eq!("".as_count(), None);
        assert_eq!("-".as_count(), None);
        assert_eq!("x5".as_count(), None);
    }

    #[test]
    fn overflow_saturates() {
        assert_eq!("99999999999999999999999".as_count(), Some(i64::MAX));
    }
}
