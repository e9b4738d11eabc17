//! Strict conversion from `toml::Value` into the binder's leaf types.
//!
//! Text-backed sources (environment variables, CLI arguments, TOML files) store
//! what they read as `toml::Value`s. Typing happens here, when a getter asks for
//! a specific type:
//!
//! | Target | Accepts |
//! |--------|---------|
//! | `String` | any scalar, rendered as text |
//! | integers | TOML integers in range, or strings that parse |
//! | `bool` | TOML booleans, `true/false/1/0/yes/no/on/off` strings |
//! | `f64` | floats, integers, or strings that parse |
//! | `TimeDelta` | humantime strings (`150s`, `2m 30s`, `-5s`), integer seconds |
//! | `DateTime<Utc>` | RFC 3339 strings, TOML offset datetimes |
//! | `Vec<T>` | arrays, comma-separated strings, or a single scalar |

use chrono::{DateTime, TimeDelta, Utc};
use toml::Value;

use crate::error::ClixError;

/// A type that can be read out of a `toml::Value`.
pub trait FromValue: Sized {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError>;
}

fn invalid(key: &str, reason: impl Into<String>) -> ClixError {
    ClixError::InvalidValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

impl FromValue for String {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Integer(i) => Ok(i.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Datetime(dt) => Ok(dt.to_string()),
            other => Err(invalid(key, format!("expected text, found {}", type_name(other)))),
        }
    }
}

macro_rules! integer_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
                    match value {
                        Value::Integer(i) => <$ty>::try_from(*i).map_err(|_| {
                            invalid(key, format!("{i} is out of range for {}", stringify!($ty)))
                        }),
                        Value::String(s) => s.trim().parse::<$ty>().map_err(|e| {
                            invalid(key, format!("'{s}' is not a valid {}: {e}", stringify!($ty)))
                        }),
                        other => Err(invalid(
                            key,
                            format!("expected {}, found {}", stringify!($ty), type_name(other)),
                        )),
                    }
                }
            }
        )*
    };
}

integer_from_value!(i32, i64, u32, u64);

impl FromValue for bool {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(invalid(key, format!("'{s}' is not a boolean"))),
            },
            other => Err(invalid(key, format!("expected boolean, found {}", type_name(other)))),
        }
    }
}

impl FromValue for f64 {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid(key, format!("'{s}' is not a valid float: {e}"))),
            other => Err(invalid(key, format!("expected float, found {}", type_name(other)))),
        }
    }
}

impl FromValue for TimeDelta {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        match value {
            Value::Integer(secs) => TimeDelta::try_seconds(*secs)
                .ok_or_else(|| invalid(key, format!("{secs} seconds is out of range"))),
            Value::String(s) => parse_duration(s).map_err(|reason| invalid(key, reason)),
            other => Err(invalid(key, format!("expected duration, found {}", type_name(other)))),
        }
    }
}

/// Parse a humantime duration with an optional leading `-`.
fn parse_duration(s: &str) -> Result<TimeDelta, String> {
    let s = s.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, s),
    };
    let std = humantime::parse_duration(body).map_err(|e| format!("'{s}' is not a duration: {e}"))?;
    let delta = TimeDelta::from_std(std).map_err(|_| format!("'{s}' is out of range"))?;
    Ok(if negative { -delta } else { delta })
}

impl FromValue for DateTime<Utc> {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Datetime(dt) => dt.to_string(),
            other => {
                return Err(invalid(
                    key,
                    format!("expected timestamp, found {}", type_name(other)),
                ));
            }
        };
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| invalid(key, format!("'{text}' is not an RFC 3339 timestamp: {e}")))
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(key: &str, value: &Value) -> Result<Self, ClixError> {
        match value {
            Value::Array(items) => items.iter().map(|item| T::from_value(key, item)).collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(|piece| T::from_value(key, &Value::String(piece.to_string())))
                .collect(),
            Value::Table(_) => Err(invalid(key, "expected a list, found table")),
            scalar => Ok(vec![T::from_value(key, scalar)?]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn text_from_scalars() {
        assert_eq!(String::from_value("k", &s("hi")).unwrap(), "hi");
        assert_eq!(String::from_value("k", &Value::Integer(3306)).unwrap(), "3306");
        assert_eq!(String::from_value("k", &Value::Boolean(true)).unwrap(), "true");
    }

    #[test]
    fn text_rejects_array() {
        let err = String::from_value("tags", &Value::Array(vec![])).unwrap_err();
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn integers_parse_strings() {
        assert_eq!(i32::from_value("k", &s(" 42 ")).unwrap(), 42);
        assert_eq!(i64::from_value("k", &s("-7")).unwrap(), -7);
        assert_eq!(u64::from_value("k", &s("18446744073709551615")).unwrap(), u64::MAX);
    }

    #[test]
    fn integer_out_of_range() {
        let err = i32::from_value("port", &Value::Integer(i64::MAX)).unwrap_err();
        assert!(matches!(err, ClixError::InvalidValue { ref key, .. } if key == "port"));
        assert!(u32::from_value("k", &Value::Integer(-1)).is_err());
    }

    #[test]
    fn integer_rejects_garbage() {
        assert!(i64::from_value("k", &s("twelve")).is_err());
        assert!(i64::from_value("k", &Value::Float(1.5)).is_err());
    }

    #[test]
    fn bools_accept_common_spellings() {
        for yes in ["true", "TRUE", "1", "yes", "on"] {
            assert!(bool::from_value("k", &s(yes)).unwrap(), "{yes}");
        }
        for no in ["false", "0", "No", "off"] {
            assert!(!bool::from_value("k", &s(no)).unwrap(), "{no}");
        }
        assert!(bool::from_value("k", &s("maybe")).is_err());
    }

    #[test]
    fn floats_widen_integers() {
        assert_eq!(f64::from_value("k", &Value::Integer(2)).unwrap(), 2.0);
        assert_eq!(f64::from_value("k", &s("3.5")).unwrap(), 3.5);
    }

    #[test]
    fn durations() {
        assert_eq!(
            TimeDelta::from_value("k", &s("150s")).unwrap(),
            TimeDelta::seconds(150)
        );
        assert_eq!(
            TimeDelta::from_value("k", &s("2m 30s")).unwrap(),
            TimeDelta::seconds(150)
        );
        assert_eq!(
            TimeDelta::from_value("k", &s("-5s")).unwrap(),
            TimeDelta::seconds(-5)
        );
        assert_eq!(
            TimeDelta::from_value("k", &Value::Integer(30)).unwrap(),
            TimeDelta::seconds(30)
        );
        assert!(TimeDelta::from_value("k", &s("soon")).is_err());
    }

    #[test]
    fn timestamps() {
        let ts = DateTime::<Utc>::from_value("k", &s("2023-01-02T15:04:05Z")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-02T15:04:05+00:00");

        let shifted = DateTime::<Utc>::from_value("k", &s("2023-01-02T17:04:05+02:00")).unwrap();
        assert_eq!(shifted, ts);

        let toml_dt: Value = "t = 2023-01-02T15:04:05Z"
            .parse::<toml::Table>()
            .unwrap()
            .remove("t")
            .unwrap();
        assert_eq!(DateTime::<Utc>::from_value("k", &toml_dt).unwrap(), ts);

        assert!(DateTime::<Utc>::from_value("k", &s("yesterday")).is_err());
    }

    #[test]
    fn sequences() {
        let arr = Value::Array(vec![Value::Integer(1), s("2")]);
        assert_eq!(Vec::<i32>::from_value("k", &arr).unwrap(), vec![1, 2]);
        assert_eq!(
            Vec::<String>::from_value("k", &s("a, b,,c")).unwrap(),
            vec!["a", "b", "c"]
        );
        assert_eq!(Vec::<u64>::from_value("k", &Value::Integer(9)).unwrap(), vec![9]);
        assert!(Vec::<String>::from_value("k", &s("")).unwrap().is_empty());
    }

    #[test]
    fn sequence_element_errors_propagate() {
        let arr = Value::Array(vec![Value::Integer(1), s("x")]);
        assert!(Vec::<i64>::from_value("k", &arr).is_err());
    }
}
