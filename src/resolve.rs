//! Layer resolution: merge every value layer into one flat [`MapSource`].
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Layers, lowest priority first:
//!
//! 1. TOML files, in the order given (later files override earlier)
//! 2. Environment variables under the prefix
//! 3. CLI arguments the user supplied
//! 4. Explicit overrides
//!
//! Every layer is sparse: a key missing from a layer falls through to the
//! layers below it, and a key missing everywhere reaches the binder as a zero
//! value.

use std::path::PathBuf;

use toml::Value;
use tracing::debug;

use crate::env;
use crate::error::ClixError;
use crate::file;
use crate::map::MapSource;

/// All pre-loaded data needed to resolve the merged source. No I/O happens here.
#[derive(Debug, Default)]
pub struct ResolveInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment variable pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"MYAPP"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Values taken from parsed command-line arguments.
    pub cli: Option<MapSource>,
    /// Explicit `(key, value)` overrides, highest priority.
    pub overrides: Vec<(String, Value)>,
}

pub fn resolve(input: ResolveInput) -> Result<MapSource, ClixError> {
    let mut merged = MapSource::new();

    for (path, content) in &input.files {
        let layer = file::parse_toml(content, path)?;
        debug!(path = %path.display(), keys = layer.len(), "merged file layer");
        merged = merged.merge(layer);
    }

    if let Some(prefix) = &input.env_prefix {
        let layer = env::env_source(prefix, input.env_vars);
        debug!(prefix = %prefix, keys = layer.len(), "merged env layer");
        merged = merged.merge(layer);
    }

    if let Some(layer) = input.cli {
        debug!(keys = layer.len(), "merged cli layer");
        merged = merged.merge(layer);
    }

    if !input.overrides.is_empty() {
        debug!(keys = input.overrides.len(), "merged overrides");
        merged = merged.merge(input.overrides.into_iter().collect());
    }

    Ok(merged)
}
