//! Adapter from the legacy value-source generation to [`ValueSource`].
//!
//! The legacy contract differs from the canonical one in two ways:
//!
//! - integers are native width (`isize`/`usize`, and sequences of them) with
//!   no separate 32/64-bit accessors;
//! - timestamps are never optional. The zero instant
//!   (`DateTime::<Utc>::default()`, the Unix epoch) stands for "no value".
//!
//! [`Legacy`] bridges both. Native values pass through to the 64-bit
//! accessors and are narrowed with `as` casts for the 32-bit ones. A legacy
//! timestamp equal to the zero instant is reported as absent, so a genuinely
//! supplied epoch timestamp cannot be told apart from a missing one.

use chrono::{DateTime, TimeDelta, Utc};

use crate::bind::{Bind, parse};
use crate::source::ValueSource;

/// Getters exposed by a legacy-generation value source.
pub trait LegacySource {
    fn text(&self, key: &str) -> String;
    fn int(&self, key: &str) -> isize;
    fn uint(&self, key: &str) -> usize;
    fn bool(&self, key: &str) -> bool;
    fn float(&self, key: &str) -> f64;
    /// The zero instant means the key has no value.
    fn timestamp(&self, key: &str) -> DateTime<Utc>;
    fn duration(&self, key: &str) -> TimeDelta;
    fn text_seq(&self, key: &str) -> Vec<String>;
    fn int_seq(&self, key: &str) -> Vec<isize>;
    fn uint_seq(&self, key: &str) -> Vec<usize>;
    fn float_seq(&self, key: &str) -> Vec<f64>;
}

/// Exposes a [`LegacySource`] through the canonical [`ValueSource`] contract.
#[derive(Debug, Clone)]
pub struct Legacy<S> {
    inner: S,
}

impl<S: LegacySource> Legacy<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// Bind a `T` straight from a legacy source.
///
/// Shorthand for `parse::<T>(&Legacy::new(source))`.
pub fn parse_legacy<T: Bind + Default, S: LegacySource>(source: S) -> T {
    parse(&Legacy::new(source))
}

fn cast_all<A: Copy, B>(values: Vec<A>, cast: impl Fn(A) -> B) -> Vec<B> {
    values.into_iter().map(cast).collect()
}

impl<S: LegacySource> ValueSource for Legacy<S> {
    fn text(&self, key: &str) -> String {
        self.inner.text(key)
    }

    fn int32(&self, key: &str) -> i32 {
        self.inner.int(key) as i32
    }

    fn int64(&self, key: &str) -> i64 {
        self.inner.int(key) as i64
    }

    fn uint32(&self, key: &str) -> u32 {
        self.inner.uint(key) as u32
    }

    fn uint64(&self, key: &str) -> u64 {
        self.inner.uint(key) as u64
    }

    fn bool(&self, key: &str) -> bool {
        self.inner.bool(key)
    }

    fn float64(&self, key: &str) -> f64 {
        self.inner.float(key)
    }

    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let ts = self.inner.timestamp(key);
        (ts != DateTime::<Utc>::default()).then_some(ts)
    }

    fn duration(&self, key: &str) -> TimeDelta {
        self.inner.duration(key)
    }

    fn text_seq(&self, key: &str) -> Vec<String> {
        self.inner.text_seq(key)
    }

    fn int32_seq(&self, key: &str) -> Vec<i32> {
        cast_all(self.inner.int_seq(key), |v| v as i32)
    }

    fn int64_seq(&self, key: &str) -> Vec<i64> {
        cast_all(self.inner.int_seq(key), |v| v as i64)
    }

    fn uint32_seq(&self, key: &str) -> Vec<u32> {
        cast_all(self.inner.uint_seq(key), |v| v as u32)
    }

    fn uint64_seq(&self, key: &str) -> Vec<u64> {
        cast_all(self.inner.uint_seq(key), |v| v as u64)
    }

    fn float64_seq(&self, key: &str) -> Vec<f64> {
        self.inner.float_seq(key)
    }
}

impl<S: LegacySource + ?Sized> LegacySource for &S {
    fn text(&self, key: &str) -> String {
        (**self).text(key)
    }
    fn int(&self, key: &str) -> isize {
        (**self).int(key)
    }
    fn uint(&self, key: &str) -> usize {
        (**self).uint(key)
    }
    fn bool(&self, key: &str) -> bool {
        (**self).bool(key)
    }
    fn float(&self, key: &str) -> f64 {
        (**self).float(key)
    }
    fn timestamp(&self, key: &str) -> DateTime<Utc> {
        (**self).timestamp(key)
    }
    fn duration(&self, key: &str) -> TimeDelta {
        (**self).duration(key)
    }
    fn text_seq(&self, key: &str) -> Vec<String> {
        (**self).text_seq(key)
    }
    fn int_seq(&self, key: &str) -> Vec<isize> {
        (**self).int_seq(key)
    }
    fn uint_seq(&self, key: &str) -> Vec<usize> {
        (**self).uint_seq(key)
    }
    fn float_seq(&self, key: &str) -> Vec<f64> {
        (**self).float_seq(key)
    }
}
