use std::path::PathBuf;

use toml::Value;

use crate::bind::{Bind, parse};
use crate::error::ClixError;
use crate::file;
use crate::map::MapSource;
use crate::resolve::{self, ResolveInput};

/// Entry point for building a layered value source.
pub struct Clix;

impl Clix {
    pub fn builder() -> ClixBuilder {
        ClixBuilder::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FileLayer {
    path: PathBuf,
    required: bool,
}

/// Builder for a layered [`MapSource`]: files < env vars < CLI arguments <
/// explicit overrides.
///
/// ```ignore
/// let config: Config = Clix::builder()
///     .app_name("myapp")
///     .optional_file("/etc/myapp/defaults.toml")
///     .matches(&cmd.get_matches())
///     .parse()?;
/// ```
#[derive(Debug)]
pub struct ClixBuilder {
    app_name: Option<String>,
    files: Vec<FileLayer>,
    env_prefix: Option<String>,
    env_enabled: bool,
    vars: Option<Vec<(String, String)>>,
    cli: Option<MapSource>,
    overrides: Vec<(String, Value)>,
}

impl Default for ClixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClixBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            files: Vec::new(),
            env_prefix: None,
            env_enabled: true,
            vars: None,
            cli: None,
            overrides: Vec::new(),
        }
    }

    /// Set the application name. Derives the env prefix: `my-app` → `MY_APP`.
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Add a TOML file that must exist. Later files override earlier ones.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileLayer {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Add a TOML file that is skipped when missing.
    pub fn optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileLayer {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Override the env prefix (default: derived from `app_name`).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable loading.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of the process environment.
    pub fn vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(vars.into_iter().collect());
        self
    }

    /// Layer the arguments the user supplied on the command line.
    #[cfg(feature = "clap")]
    pub fn matches(self, matches: &clap::ArgMatches) -> Self {
        self.cli_source(crate::cli::matches_to_source(matches))
    }

    /// Layer an already-built source at CLI priority. Repeated calls merge,
    /// later calls winning.
    pub fn cli_source(mut self, source: MapSource) -> Self {
        self.cli = Some(match self.cli.take() {
            Some(existing) => existing.merge(source),
            None => source,
        });
        self
    }

    /// Set a key at the highest priority.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        if let Some(prefix) = &self.env_prefix {
            return Some(prefix.clone());
        }
        self.app_name
            .as_ref()
            .map(|name| name.to_uppercase().replace('-', "_"))
    }

    fn load_files(&self) -> Result<Vec<(PathBuf, String)>, ClixError> {
        let mut loaded = Vec::new();
        for layer in &self.files {
            let content = if layer.required {
                Some(file::read_file(&layer.path)?)
            } else {
                file::read_optional_file(&layer.path)?
            };
            if let Some(content) = content {
                loaded.push((layer.path.clone(), content));
            }
        }
        Ok(loaded)
    }

    fn build_input(self) -> Result<ResolveInput, ClixError> {
        let files = self.load_files()?;
        let env_prefix = self.effective_env_prefix();
        let env_vars = match (&env_prefix, self.vars) {
            (None, _) => Vec::new(),
            (Some(_), Some(vars)) => vars,
            (Some(_), None) => std::env::vars().collect(),
        };

        Ok(ResolveInput {
            files,
            env_vars,
            env_prefix,
            cli: self.cli,
            overrides: self.overrides,
        })
    }

    /// Read every layer and merge them into one source.
    pub fn build(self) -> Result<MapSource, ClixError> {
        resolve::resolve(self.build_input()?)
    }

    /// Build the merged source and bind a `T` from it.
    pub fn parse<T: Bind + Default>(self) -> Result<T, ClixError> {
        let source = self.build()?;
        Ok(parse(&source))
    }
}
