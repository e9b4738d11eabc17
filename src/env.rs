use crate::map::MapSource;

/// Build a [`MapSource`] from environment variables matching `{PREFIX}_*`.
///
/// The part after the prefix is lowercased and `_` becomes `-`, so
/// `MYAPP_DB_HOST` is stored under `db-host`, the same key a `--db-host` flag
/// binds to. An empty prefix takes every variable.
///
/// Values are stored as strings and typed when a getter reads them.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_source(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> MapSource {
    let needle = if prefix.is_empty() {
        String::new()
    } else {
        format!("{prefix}_")
    };
    let mut source = MapSource::new();

    for (name, value) in vars {
        let Some(rest) = name.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        source.insert(env_key(rest), value);
    }

    source
}

/// Read `{PREFIX}_*` variables from the process environment.
pub fn from_env(prefix: &str) -> MapSource {
    env_source(prefix, std::env::vars())
}

fn env_key(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}
