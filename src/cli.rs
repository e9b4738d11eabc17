//! Clap adapter for clix.
//!
//! This module is the **optional integration layer** between clix's
//! framework-agnostic binder and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! `clap::ArgMatches` implements [`ValueSource`] directly: a source key is an
//! argument id, and each getter reads that argument's raw strings and types
//! them through [`FromValue`]. This works whatever `value_parser` the argument
//! was registered with, including clap's env-var fallback, because raw values
//! are always available.
//!
//! ```ignore
//! let matches = cmd.get_matches();
//! let config: Config = clix::parse(&matches);
//! ```
//!
//! To layer CLI values over files and env vars, convert the matches with
//! [`matches_to_source`] and hand them to the builder.

use chrono::{DateTime, TimeDelta, Utc};
use clap::ArgMatches;
use clap::parser::ValueSource as ArgOrigin;
use toml::Value;
use tracing::warn;

use crate::coerce::FromValue;
use crate::map::MapSource;
use crate::source::ValueSource;

/// Raw values of argument `id`: one value as a string, several as an array.
fn raw_value(matches: &ArgMatches, id: &str) -> Option<Value> {
    let raw = matches.try_get_raw(id).ok().flatten()?;
    let mut values: Vec<Value> = raw
        .map(|v| Value::String(v.to_string_lossy().into_owned()))
        .collect();
    match values.len() {
        0 => None,
        1 => values.pop(),
        _ => Some(Value::Array(values)),
    }
}

fn lookup<T: FromValue>(matches: &ArgMatches, id: &str) -> Option<T> {
    let value = raw_value(matches, id)?;
    T::from_value(id, &value)
        .map_err(|err| warn!(key = id, error = %err, "ignoring unusable argument"))
        .ok()
}

fn lenient<T: FromValue + Default>(matches: &ArgMatches, id: &str) -> T {
    lookup(matches, id).unwrap_or_default()
}

impl ValueSource for ArgMatches {
    fn text(&self, key: &str) -> String {
        lenient(self, key)
    }

    fn int32(&self, key: &str) -> i32 {
        lenient(self, key)
    }

    fn int64(&self, key: &str) -> i64 {
        lenient(self, key)
    }

    fn uint32(&self, key: &str) -> u32 {
        lenient(self, key)
    }

    fn uint64(&self, key: &str) -> u64 {
        lenient(self, key)
    }

    fn bool(&self, key: &str) -> bool {
        lenient(self, key)
    }

    fn float64(&self, key: &str) -> f64 {
        lenient(self, key)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        lookup(self, key)
    }

    fn duration(&self, key: &str) -> TimeDelta {
        lenient(self, key)
    }

    fn text_seq(&self, key: &str) -> Vec<String> {
        lenient(self, key)
    }

    fn int32_seq(&self, key: &str) -> Vec<i32> {
        lenient(self, key)
    }

    fn int64_seq(&self, key: &str) -> Vec<i64> {
        lenient(self, key)
    }

    fn uint32_seq(&self, key: &str) -> Vec<u32> {
        lenient(self, key)
    }

    fn uint64_seq(&self, key: &str) -> Vec<u64> {
        lenient(self, key)
    }

    fn float64_seq(&self, key: &str) -> Vec<f64> {
        lenient(self, key)
    }
}

/// Copy the arguments the user actually supplied (command line or clap's
/// env fallback) into a [`MapSource`]. Values that came from
/// `default_value` are left out so lower layers can show through.
pub fn matches_to_source(matches: &ArgMatches) -> MapSource {
    collect_matches(matches, false)
}

/// Like [`matches_to_source`], but clap defaults are included too.
pub fn matches_to_source_with_defaults(matches: &ArgMatches) -> MapSource {
    collect_matches(matches, true)
}

fn collect_matches(matches: &ArgMatches, include_defaults: bool) -> MapSource {
    let mut source = MapSource::new();
    for id in matches.ids() {
        let id = id.as_str();
        match matches.value_source(id) {
            Some(ArgOrigin::DefaultValue) if !include_defaults => continue,
            None => continue,
            Some(_) => {}
        }
        if let Some(value) = raw_value(matches, id) {
            source.insert(id, value);
        }
    }
    source
}
