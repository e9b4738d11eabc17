//! Bind command-line flags and environment variables into typed, nested
//! config structs.
//!
//! Define a struct, annotate the fields with the keys they read, and let the
//! binder fill it from any [`ValueSource`]:
//!
//! ```ignore
//! use chrono::TimeDelta;
//! use clix::Bind;
//!
//! #[derive(Bind, Default)]
//! pub struct Config {
//!     #[cli("name")]
//!     pub name: String,
//!     #[cli("timeout")]
//!     pub timeout: TimeDelta,
//!     #[cli(prefix = "db-")]
//!     pub database: Database,
//! }
//!
//! #[derive(Bind, Default)]
//! pub struct Database {
//!     #[cli("host")]
//!     pub host: String,
//!     #[cli("port")]
//!     pub port: i32,
//! }
//!
//! let config: Config = clix::parse(&cmd.get_matches());
//! ```
//!
//! `--name`, `--timeout`, `--db-host` and `--db-port` land in the matching
//! fields. Anything the source does not have stays at its `Default`.
//!
//! # Design: the binder never fails
//!
//! [`parse`] starts from `T::default()` and walks the struct's fields in
//! declaration order. For each field:
//!
//! - **`#[cli("key")]`** reads `prefix + key` with the getter for the field's
//!   exact type and overwrites the field. Timestamps are the exception: an
//!   absent timestamp leaves the field alone.
//! - **`#[cli(prefix = "db-")]`** / **`#[cli(nested)]`** recurses into a
//!   nested struct, appending the prefix. Prefixes are plain string
//!   concatenation, so nesting `svc-` and `db-` gives `svc-db-host`.
//! - An unannotated `pub` field whose type implements [`Bind`] is recursed
//!   into with no extra prefix. Other unannotated fields and fields that are
//!   not `pub` are left alone.
//! - A field whose type the binder does not support is left alone.
//!
//! There is no error type on this path. A missing key, a value the source
//! cannot convert, or an unsupported field type all end up as "this field
//! keeps its default". Validate the returned struct if you need strictness.
//!
//! # Supported field types
//!
//! | Type | Getter |
//! |------|--------|
//! | `String` | [`text`](ValueSource::text) |
//! | `i32`, `i64`, `u32`, `u64` | `int32`, `int64`, `uint32`, `uint64` |
//! | `bool`, `f64` | `bool`, `float64` |
//! | `chrono::TimeDelta` | [`duration`](ValueSource::duration) |
//! | `chrono::DateTime<Utc>`, `Option<DateTime<Utc>>` | [`timestamp`](ValueSource::timestamp) |
//! | `Vec<String>`, `Vec<i32>`, `Vec<i64>`, `Vec<u32>`, `Vec<u64>`, `Vec<f64>` | `*_seq` |
//!
//! # Value sources
//!
//! The binder only calls typed getters; where values come from is up to the
//! [`ValueSource`]:
//!
//! - **`clap::ArgMatches`** (feature `clap`, on by default): an argument id
//!   is a key. See the `cli` module.
//! - **[`MapSource`]**: an in-memory flat map, handy for tests and defaults.
//! - **[`env::env_source`]**: `MYAPP_DB_HOST` becomes `db-host`.
//! - **[`file::load_toml`]**: `[db] host = ...` becomes `db-host`.
//! - **[`Legacy`]**: adapts a [`LegacySource`], the older contract with
//!   native-width integers and zero-means-absent timestamps.
//!
//! # Layer precedence
//!
//! [`Clix::builder()`] merges text-backed layers into one [`MapSource`]:
//!
//! ```text
//! TOML files         .file() / .optional_file(), later files win
//!        ↑ overridden by
//! Environment vars   PREFIX_KEY
//!        ↑ overridden by
//! CLI arguments      .matches() / .cli_source()
//!        ↑ overridden by
//! Overrides          .set()
//! ```
//!
//! # Legacy timestamps
//!
//! A [`LegacySource`] has no way to say "no timestamp" other than returning
//! the zero instant (`DateTime::<Utc>::default()`). [`Legacy`] therefore
//! reports the zero instant as absent, and a real timestamp equal to it is
//! lost. This is a known limitation of that contract.

extern crate self as clix;

pub mod bind;
pub mod coerce;
pub mod env;
pub mod error;
pub mod file;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
pub mod cli;
mod legacy;
mod map;
mod resolve;
mod source;

#[cfg(test)]
mod fixtures;

pub use bind::{Bind, describe, keys, parse};
pub use builder::{Clix, ClixBuilder};
pub use clix_derive::Bind;
pub use coerce::FromValue;
pub use error::ClixError;
pub use legacy::{Legacy, LegacySource, parse_legacy};
pub use map::MapSource;
pub use source::ValueSource;
pub use types::{Binding, FieldKind, FieldSpec};
