//! Engine configuration.
//!
//! Every setting has a default and can be overridden from the environment:
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `TAEBAEK_STRICT_KEYWORDS` | `1`/`true` selects [`KeywordPolicy::Strict`] |
//! | `TAEBAEK_MAX_DEPTH` | [`Config::max_depth`] |
//! | `TAEBAEK_MAX_ITERATIONS` | [`Config::max_iterations`] |
//! | `TAEBAEK_EXTENSION_PATH` | [`Config::extension_paths`], platform path-list syntax |

use crate::error::{Error, Result};

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

pub const STRICT_KEYWORDS_VAR: &str = "TAEBAEK_STRICT_KEYWORDS";
pub const MAX_DEPTH_VAR: &str = "TAEBAEK_MAX_DEPTH";
pub const MAX_ITERATIONS_VAR: &str = "TAEBAEK_MAX_ITERATIONS";
pub const EXTENSION_PATH_VAR: &str = "TAEBAEK_EXTENSION_PATH";

const DEFAULT_MAX_DEPTH: usize = 64;
const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000;

/// What the lexer does with a keyword leading character (`i`, `e`, `f`)
/// that does not begin any keyword.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeywordPolicy {
    /// Scan it as ordinary text.
    Lenient,
    /// Reject it as a malformed keyword, ending the run.
    Strict,
}

impl Default for KeywordPolicy {
    fn default() -> KeywordPolicy {
        KeywordPolicy::Lenient
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub keywords: KeywordPolicy,
    /// Deepest allowed nesting of `for` bodies.
    pub max_depth: usize,
    /// Total loop iterations allowed in one run, across all loops.
    pub max_iterations: u64,
    /// Searched in order before the platform's dynamic loader path.
    pub extension_paths: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            keywords: KeywordPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            extension_paths: vec![],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_vars(|name| env::var_os(name))
    }

    /// Builds a config from an arbitrary variable lookup (exposed for testing).
    pub fn from_vars<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Config::default();

        if let Some(value) = lookup(STRICT_KEYWORDS_VAR) {
            if parse_flag(STRICT_KEYWORDS_VAR, &value)? {
                config.keywords = KeywordPolicy::Strict;
            }
        }

        if let Some(value) = lookup(MAX_DEPTH_VAR) {
            config.max_depth = parse_number(MAX_DEPTH_VAR, &value)?;
        }

        if let Some(value) = lookup(MAX_ITERATIONS_VAR) {
            config.max_iterations = parse_number(MAX_ITERATIONS_VAR, &value)?;
        }

        if let Some(value) = lookup(EXTENSION_PATH_VAR) {
            config.extension_paths = env::split_paths(&value)
                .filter(|path| !path.as_os_str().is_empty())
                .collect();
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &OsString) -> Result<bool> {
    match value.to_string_lossy().trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::config(format!(
            "`{}` must be a boolean, got `{}`",
            name, other
        ))),
    }
}

fn parse_number<T>(name: &str, value: &OsString) -> Result<T>
where
    T: FromStr,
{
    let value = value.to_string_lossy();
    value.trim().parse().map_err(|_| {
        Error::config(format!(
            "`{}` must be a non-negative integer, got `{}`",
            name, value
        ))
    })
}
