#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use chrono::{DateTime, TimeDelta, Utc};

    use crate::Bind;
    use crate::legacy::LegacySource;

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct BasicConfig {
        #[cli("string-val")]
        pub string_val: String,
        #[cli("int-val")]
        pub int_val: i32,
        #[cli("int64-val")]
        pub int64_val: i64,
        #[cli("uint-val")]
        pub uint_val: u32,
        #[cli("uint64-val")]
        pub uint64_val: u64,
        #[cli("bool-val")]
        pub bool_val: bool,
        #[cli("float-val")]
        pub float_val: f64,
        // Not pub, so never bound.
        #[cli("unexported")]
        unexported: String,
    }

    impl BasicConfig {
        pub fn unexported(&self) -> &str {
            &self.unexported
        }
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct TimeConfig {
        #[cli("time-val")]
        pub time_val: DateTime<Utc>,
        #[cli("time-ptr")]
        pub time_ptr: Option<DateTime<Utc>>,
        #[cli("duration-val")]
        pub duration_val: TimeDelta,
        #[cli("unexported-time")]
        unexported: DateTime<Utc>,
    }

    impl TimeConfig {
        pub fn unexported(&self) -> DateTime<Utc> {
            self.unexported
        }
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct SliceConfig {
        #[cli("string-slice")]
        pub string_slice: Vec<String>,
        #[cli("int-slice")]
        pub int_slice: Vec<i32>,
        #[cli("int64-slice")]
        pub int64_slice: Vec<i64>,
        #[cli("uint-slice")]
        pub uint_slice: Vec<u32>,
        #[cli("uint64-slice")]
        pub uint64_slice: Vec<u64>,
        #[cli("float64-slice")]
        pub float64_slice: Vec<f64>,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct NestedConfig {
        #[cli("top-level")]
        pub top_level: String,
        #[cli(prefix = "db-")]
        pub database: NestedDb,
        #[cli(prefix = "adv-")]
        pub advanced: Advanced,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct NestedDb {
        #[cli("host")]
        pub host: String,
        #[cli("port")]
        pub port: i32,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct Advanced {
        #[cli("feature1")]
        pub feature1: bool,
        #[cli("feature2")]
        pub feature2: bool,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct MixedConfig {
        #[cli("name")]
        pub name: String,
        #[cli("timeout")]
        pub timeout: TimeDelta,
        #[cli("enabled")]
        pub enabled: bool,
        #[cli(prefix = "db-")]
        pub database: MixedDb,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct MixedDb {
        #[cli("host")]
        pub host: String,
        #[cli("port")]
        pub port: i32,
        #[cli("replicas")]
        pub replicas: Vec<String>,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct HostOnly {
        #[cli(key = "host")]
        pub host: String,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct TwinConfig {
        #[cli(prefix = "primary-")]
        pub primary: HostOnly,
        #[cli(prefix = "replica-")]
        pub replica: HostOnly,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct DeepConfig {
        #[cli(prefix = "outer-")]
        pub outer: Outer,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct Outer {
        #[cli(prefix = "inner-")]
        pub inner: Inner,
        #[cli(nested)]
        pub bare: Bare,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct Inner {
        #[cli("leaf")]
        pub leaf: String,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct Bare {
        #[cli("plain")]
        pub plain: i64,
    }

    /// Unannotated record fields recurse with no prefix.
    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct EmbedConfig {
        #[cli("name")]
        pub name: String,
        pub db: HostOnly,
        #[cli(prefix = "cache-")]
        pub cache: EmbedCache,
        pub note: String,
        hidden: HostOnly,
    }

    impl EmbedConfig {
        pub fn hidden(&self) -> &HostOnly {
            &self.hidden
        }
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct EmbedCache {
        pub server: HostOnly,
        #[cli("size")]
        pub size: u64,
    }

    /// A composite that does not implement `Bind`.
    #[derive(Debug, Default, PartialEq)]
    pub struct Foreign {
        pub host: String,
    }

    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct ForeignConfig {
        #[cli("name")]
        pub name: String,
        pub foreign: Foreign,
    }

    /// Unsupported types and an unannotated field.
    #[derive(Bind, Debug, Default, PartialEq)]
    pub struct OddConfig {
        #[cli("small")]
        pub small: u8,
        #[cli("ratio")]
        pub ratio: f32,
        #[cli("maybe")]
        pub maybe: Option<String>,
        #[cli("label")]
        pub label: String,
        pub ignored: String,
    }

    // -- Legacy-generation source -------------------------------------------

    #[derive(Default)]
    pub struct LegacyMock {
        pub text: HashMap<String, String>,
        pub int: HashMap<String, isize>,
        pub uint: HashMap<String, usize>,
        pub bool: HashMap<String, bool>,
        pub float: HashMap<String, f64>,
        pub timestamp: HashMap<String, DateTime<Utc>>,
        pub duration: HashMap<String, TimeDelta>,
        pub text_seq: HashMap<String, Vec<String>>,
        pub int_seq: HashMap<String, Vec<isize>>,
        pub uint_seq: HashMap<String, Vec<usize>>,
        pub float_seq: HashMap<String, Vec<f64>>,
    }

    fn lookup<V: Clone + Default>(map: &HashMap<String, V>, key: &str) -> V {
        map.get(key).cloned().unwrap_or_default()
    }

    impl LegacySource for LegacyMock {
        fn text(&self, key: &str) -> String {
            lookup(&self.text, key)
        }
        fn int(&self, key: &str) -> isize {
            lookup(&self.int, key)
        }
        fn uint(&self, key: &str) -> usize {
            lookup(&self.uint, key)
        }
        fn bool(&self, key: &str) -> bool {
            lookup(&self.bool, key)
        }
        fn float(&self, key: &str) -> f64 {
            lookup(&self.float, key)
        }
        fn timestamp(&self, key: &str) -> DateTime<Utc> {
            lookup(&self.timestamp, key)
        }
        fn duration(&self, key: &str) -> TimeDelta {
            lookup(&self.duration, key)
        }
        fn text_seq(&self, key: &str) -> Vec<String> {
            lookup(&self.text_seq, key)
        }
        fn int_seq(&self, key: &str) -> Vec<isize> {
            lookup(&self.int_seq, key)
        }
        fn uint_seq(&self, key: &str) -> Vec<usize> {
            lookup(&self.uint_seq, key)
        }
        fn float_seq(&self, key: &str) -> Vec<f64> {
            lookup(&self.float_seq, key)
        }
    }

    #[test]
    fn fixtures_default_to_zero() {
        let config = MixedConfig::default();
        assert_eq!(config.name, "");
        assert_eq!(config.timeout, TimeDelta::zero());
        assert!(config.database.replicas.is_empty());
    }
}
