use chrono::{DateTime, TimeDelta, Utc};

/// Typed, string-keyed getters the binder reads from.
///
/// Every getter must return a sensible zero value for an unknown key: `""`,
/// `0`, `false`, `0.0`, a zero duration, `None`, or an empty `Vec`. The binder
/// performs no existence check of its own.
///
/// Implemented by [`MapSource`](crate::MapSource), by
/// [`Legacy`](crate::Legacy) for legacy-generation sources, and by
/// `clap::ArgMatches` when the `clap` feature is enabled.
pub trait ValueSource {
    fn text(&self, key: &str) -> String;
    fn int32(&self, key: &str) -> i32;
    fn int64(&self, key: &str) -> i64;
    fn uint32(&self, key: &str) -> u32;
    fn uint64(&self, key: &str) -> u64;
    fn bool(&self, key: &str) -> bool;
    fn float64(&self, key: &str) -> f64;
    /// `None` means the key has no value.
    fn timestamp(&self, key: &str) -> Option<DateTime<Utc>>;
    fn duration(&self, key: &str) -> TimeDelta;
    fn text_seq(&self, key: &str) -> Vec<String>;
    fn int32_seq(&self, key: &str) -> Vec<i32>;
    fn int64_seq(&self, key: &str) -> Vec<i64>;
    fn uint32_seq(&self, key: &str) -> Vec<u32>;
    fn uint64_seq(&self, key: &str) -> Vec<u64>;
    fn float64_seq(&self, key: &str) -> Vec<f64>;
}

macro_rules! forward_value_source {
    ($($method:ident -> $ret:ty),* $(,)?) => {
        $(
            fn $method(&self, key: &str) -> $ret {
                (**self).$method(key)
            }
        )*
    };
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    forward_value_source! {
        text -> String,
        int32 -> i32,
        int64 -> i64,
        uint32 -> u32,
        uint64 -> u64,
        bool -> bool,
        float64 -> f64,
        timestamp -> Option<DateTime<Utc>>,
        duration -> TimeDelta,
        text_seq -> Vec<String>,
        int32_seq -> Vec<i32>,
        int64_seq -> Vec<i64>,
        uint32_seq -> Vec<u32>,
        uint64_seq -> Vec<u64>,
        float64_seq -> Vec<f64>,
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    forward_value_source! {
        text -> String,
        int32 -> i32,
        int64 -> i64,
        uint32 -> u32,
        uint64 -> u64,
        bool -> bool,
        float64 -> f64,
        timestamp -> Option<DateTime<Utc>>,
        duration -> TimeDelta,
        text_seq -> Vec<String>,
        int32_seq -> Vec<i32>,
        int64_seq -> Vec<i64>,
        uint32_seq -> Vec<u32>,
        uint64_seq -> Vec<u64>,
        float64_seq -> Vec<f64>,
    }
}
