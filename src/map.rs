//! An in-memory, flat key → value source.
//!
//! [`MapSource`] is what every text-backed layer resolves into: environment
//! variables, TOML files, clap matches and explicit overrides all become flat
//! `toml::Value` entries keyed by their full source key (`db-host`, not
//! `db.host`). Values are typed lazily through [`FromValue`] when a getter
//! asks for them.

use chrono::{DateTime, TimeDelta, Utc};
use toml::{Table, Value};
use tracing::warn;

use crate::coerce::FromValue;
use crate::error::ClixError;
use crate::source::ValueSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSource {
    values: Table,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The stored value, untyped.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Layer `overlay` on top of `self`. Keys present in both take the
    /// overlay's value.
    pub fn merge(mut self, overlay: MapSource) -> Self {
        for (key, value) in overlay.values {
            self.values.insert(key, value);
        }
        self
    }

    /// Strictly read `key` as a `T`.
    ///
    /// `Ok(None)` when the key is absent; an error when the value is present
    /// but cannot be converted.
    pub fn get<T: FromValue>(&self, key: &str) -> Result<Option<T>, ClixError> {
        self.values
            .get(key)
            .map(|value| T::from_value(key, value))
            .transpose()
    }

    /// Like [`get`](Self::get), but an unusable value is logged and treated
    /// as absent.
    fn lookup<T: FromValue>(&self, key: &str) -> Option<T> {
        self.get(key).unwrap_or_else(|err| {
            warn!(key, error = %err, "ignoring unusable value");
            None
        })
    }

    fn lenient<T: FromValue + Default>(&self, key: &str) -> T {
        self.lookup(key).unwrap_or_default()
    }
}

impl From<Table> for MapSource {
    fn from(values: Table) -> Self {
        Self { values }
    }
}

impl From<MapSource> for Table {
    fn from(source: MapSource) -> Self {
        source.values
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MapSource::new();
        for (key, value) in iter {
            source.insert(key, value);
        }
        source
    }
}

impl ValueSource for MapSource {
    fn text(&self, key: &str) -> String {
        self.lenient(key)
    }

    fn int32(&self, key: &str) -> i32 {
        self.lenient(key)
    }

    fn int64(&self, key: &str) -> i64 {
        self.lenient(key)
    }

    fn uint32(&self, key: &str) -> u32 {
        self.lenient(key)
    }

    fn uint64(&self, key: &str) -> u64 {
        self.lenient(key)
    }

    fn bool(&self, key: &str) -> bool {
        self.lenient(key)
    }

    fn float64(&self, key: &str) -> f64 {
        self.lenient(key)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.lookup(key)
    }

    fn duration(&self, key: &str) -> TimeDelta {
        self.lenient(key)
    }

    fn text_seq(&self, key: &str) -> Vec<String> {
        self.lenient(key)
    }

    fn int32_seq(&self, key: &str) -> Vec<i32> {
        self.lenient(key)
    }

    fn int64_seq(&self, key: &str) -> Vec<i64> {
        self.lenient(key)
    }

    fn uint32_seq(&self, key: &str) -> Vec<u32> {
        self.lenient(key)
    }

    fn uint64_seq(&self, key: &str) -> Vec<u64> {
        self.lenient(key)
    }

    fn float64_seq(&self, key: &str) -> Vec<f64> {
        self.lenient(key)
    }
}
