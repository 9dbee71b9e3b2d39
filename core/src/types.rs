//! Dynamic data model for the task API.
//!
//! # Design
//! Lists and tasks are never projected onto fixed structs: responses are
//! decoded into `Mapping` values and handed to the caller untouched. With
//! serde_json's `preserve_order` feature the mapping keeps the key order of
//! the server's payload, and outgoing bodies keep their insertion order.
//!
//! `NumericArg` carries identifiers and revisions as the caller supplied
//! them. Validation is deferred to the request builders so a bad value is
//! reported as `ApiError::InvalidArgument` before any request exists. Once
//! validated, the caller's own spelling is what goes on the wire: the
//! parsed number only decides whether the value is acceptable.

use serde_json::{Number, Value};

/// A decoded JSON object: string keys to dynamically-typed values.
pub type Mapping = serde_json::Map<String, Value>;

/// A caller-supplied identifier or revision, validated lazily.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArg {
    Number(Number),
    Text(String),
}

impl NumericArg {
    /// Returns the numeric value, or `None` when the argument is not numeric.
    ///
    /// Text is accepted when, once trimmed, it reads as an integer or as a
    /// finite decimal (`"42"`, `" 7 "`, `"4.2"`, `"1e3"`).
    pub fn to_number(&self) -> Option<Number> {
        match self {
            NumericArg::Number(number) => Some(number.clone()),
            NumericArg::Text(raw) => parse_numeric(raw),
        }
    }

    /// Validates the argument, keeping the text the caller supplied.
    pub(crate) fn validate(&self) -> Option<ValidNumeric> {
        let number = self.to_number()?;
        let text = match self {
            NumericArg::Number(number) => number.to_string(),
            NumericArg::Text(raw) => raw.trim().to_string(),
        };
        Some(ValidNumeric { text, number })
    }
}

/// A numeric argument that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidNumeric {
    text: String,
    number: Number,
}

impl ValidNumeric {
    /// The caller's spelling, trimmed; used in paths and query strings.
    pub(crate) fn as_text(&self) -> &str {
        &self.text
    }

    /// JSON form for request bodies.
    ///
    /// A number only when it prints back exactly as the caller wrote it;
    /// otherwise the text itself (`"1e3"` stays `"1e3"`).
    pub(crate) fn to_json(&self) -> Value {
        if self.number.to_string() == self.text {
            Value::Number(self.number.clone())
        } else {
            Value::String(self.text.clone())
        }
    }

    /// Truncates toward zero. `None` when the result does not fit in 64 bits.
    pub(crate) fn to_integer(&self) -> Option<Number> {
        if self.number.is_i64() || self.number.is_u64() {
            return Some(self.number.clone());
        }
        let truncated = self.number.as_f64()?.trunc();
        // 2^63 and 2^64 are exact in f64; both bounds are exclusive.
        if truncated >= -9_223_372_036_854_775_808.0 && truncated < 9_223_372_036_854_775_808.0 {
            Some(Number::from(truncated as i64))
        } else if truncated >= 0.0 && truncated < 18_446_744_073_709_551_616.0 {
            Some(Number::from(truncated as u64))
        } else {
            None
        }
    }
}

fn parse_numeric(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(Number::from(value));
    }
    if let Ok(value) = trimmed.parse::<u64>() {
        return Some(Number::from(value));
    }
    // f64 parsing also accepts "inf" and "NaN", which are not numbers here.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .and_then(Number::from_f64)
}

macro_rules! numeric_arg_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for NumericArg {
                fn from(value: $ty) -> Self {
                    NumericArg::Number(Number::from(value))
                }
            }
        )*
    };
}

numeric_arg_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Number> for NumericArg {
    fn from(value: Number) -> Self {
        NumericArg::Number(value)
    }
}

impl From<&str> for NumericArg {
    fn from(value: &str) -> Self {
        NumericArg::Text(value.to_string())
    }
}

impl From<String> for NumericArg {
    fn from(value: String) -> Self {
        NumericArg::Text(value)
    }
}

impl From<&String> for NumericArg {
    fn from(value: &String) -> Self {
        NumericArg::Text(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(raw: &str) -> ValidNumeric {
        NumericArg::from(raw).validate().unwrap()
    }

    #[test]
    fn integers_are_numeric() {
        assert_eq!(NumericArg::from(42_u64).to_number(), Some(Number::from(42)));
        assert_eq!(NumericArg::from(-3_i32).to_number(), Some(Number::from(-3)));
    }

    #[test]
    fn numeric_text_is_accepted() {
        assert_eq!(NumericArg::from("42").to_number(), Some(Number::from(42)));
        assert_eq!(NumericArg::from(" 7 ").to_number(), Some(Number::from(7)));
        assert_eq!(
            NumericArg::from("4.5").to_number(),
            Number::from_f64(4.5)
        );
        assert_eq!(
            NumericArg::from("1e3").to_number(),
            Number::from_f64(1000.0)
        );
    }

    #[test]
    fn exponent_text_keeps_its_spelling() {
        let value = valid("1e3");
        assert_eq!(value.as_text(), "1e3");
        assert_eq!(value.to_json(), Value::String("1e3".to_string()));
        assert_eq!(value.to_integer(), Some(Number::from(1000)));
    }

    #[test]
    fn oversized_integer_text_keeps_its_digits() {
        let value = valid("12345678901234567890123");
        assert_eq!(value.as_text(), "12345678901234567890123");
        assert_eq!(
            value.to_json(),
            Value::String("12345678901234567890123".to_string())
        );
    }

    #[test]
    fn plain_text_becomes_a_json_number() {
        assert_eq!(valid(" 7 ").as_text(), "7");
        assert_eq!(valid(" 7 ").to_json(), Value::Number(Number::from(7)));
        assert_eq!(valid("4.5").to_json(), Value::Number(Number::from_f64(4.5).unwrap()));
        assert_eq!(valid("+7").to_json(), Value::String("+7".to_string()));
    }

    #[test]
    fn integer_arguments_print_as_themselves() {
        let value = NumericArg::from(u64::MAX).validate().unwrap();
        assert_eq!(value.as_text(), "18446744073709551615");
        assert_eq!(value.to_json(), Value::Number(Number::from(u64::MAX)));
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        for raw in ["", "   ", "abc", "12abc", "NaN", "inf", "0x1A"] {
            assert!(NumericArg::from(raw).to_number().is_none(), "{raw:?}");
            assert!(NumericArg::from(raw).validate().is_none(), "{raw:?}");
        }
    }

    #[test]
    fn truncation_drops_the_fraction() {
        assert_eq!(valid("3.9").to_integer(), Some(Number::from(3)));
        assert_eq!(valid("-2.5").to_integer(), Some(Number::from(-2)));
        assert_eq!(valid("8").to_integer(), Some(Number::from(8)));
    }

    #[test]
    fn oversized_revision_does_not_fit() {
        assert_eq!(valid("1e30").to_integer(), None);
        assert_eq!(valid("-1e30").to_integer(), None);
        assert_eq!(valid("12345678901234567890123").to_integer(), None);
        assert_eq!(
            valid("1.8e19").to_integer(),
            Some(Number::from(18_000_000_000_000_000_000_u64))
        );
    }
}
