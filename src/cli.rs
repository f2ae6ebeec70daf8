//! Command-line argument parsing.
//!
//! Usage:
//!   taebaek [-s] [-v|-q] [-L<dir>]... [-n<iterations>] [-d<depth>] [<source> [<destination>]]

use crate::compiler::{DEFAULT_DESTINATION, DEFAULT_SOURCE};
use crate::config::{Config, KeywordPolicy};
use crate::logging::Verbosity;

use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "\
Usage: taebaek [options] [<source> [<destination>]]

Compiles <source> (default `source.tb`) into <destination> (default `output.bin`).

Options:
  -s              Treat stray keyword characters as errors
  -L<dir>         Search <dir> for extension modules (repeatable)
  -n<iterations>  Limit the total number of loop iterations
  -d<depth>       Limit the nesting depth of loops
  -v              Verbose diagnostics
  -q              Only report errors
  -h, --help      Show this message";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// `-s`
    pub strict_keywords: bool,
    /// `-L<dir>`, in the order given.
    pub extension_paths: Vec<PathBuf>,
    /// `-n<iterations>`
    pub max_iterations: Option<u64>,
    /// `-d<depth>`
    pub max_depth: Option<usize>,
    /// `-v` / `-q`
    pub verbosity: Verbosity,
    /// `-h` / `--help`
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> CliArgs {
        CliArgs {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            strict_keywords: false,
            extension_paths: vec![],
            max_iterations: None,
            max_depth: None,
            verbosity: Verbosity::default(),
            help: false,
        }
    }
}

impl CliArgs {
    /// Layers the command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if self.strict_keywords {
            config.keywords = KeywordPolicy::Strict;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }

        // command-line directories are searched first
        let mut paths = self.extension_paths.clone();
        paths.append(&mut config.extension_paths);
        config.extension_paths = paths;
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or(&[]))
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        // `--` ends flag processing.
        if arg == "--" {
            positional.extend(argv[i + 1..].iter().cloned());
            break;
        }

        if arg == "--help" {
            args.help = true;
            i += 1;
            continue;
        }

        // Non-flag argument.
        if !arg.starts_with('-') || arg == "-" {
            positional.push(arg.to_owned());
            i += 1;
            continue;
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                's' => args.strict_keywords = true,
                'v' => args.verbosity = Verbosity::Verbose,
                'q' => args.verbosity = Verbosity::Quiet,
                'h' => args.help = true,

                // -L<dir>, -n<iterations>, -d<depth>: embedded or separate value
                flag @ ('L' | 'n' | 'd') => {
                    let value = if j + 1 < chars.len() {
                        chars[j + 1..].iter().collect::<String>()
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(format!("option -{} requires an argument", flag));
                    };

                    match flag {
                        'L' => args.extension_paths.push(PathBuf::from(value)),
                        'n' => args.max_iterations = Some(parse_count(flag, &value)?),
                        _ => args.max_depth = Some(parse_count(flag, &value)?),
                    }
                    break; // the value consumed the rest of this argument
                }

                other => return Err(format!("invalid option: -{}", other)),
            }
            j += 1;
        }

        i += 1;
    }

    let mut positional = positional.into_iter();
    if let Some(source) = positional.next() {
        args.source = PathBuf::from(source);
    }
    if let Some(destination) = positional.next() {
        args.destination = PathBuf::from(destination);
    }
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {}", extra));
    }

    Ok(args)
}

fn parse_count<T: FromStr>(flag: char, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("option -{} expects a non-negative integer, got `{}`", flag, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let args = parse_argv(&[]).unwrap();

        assert_eq!(args, CliArgs::default());
        assert_eq!(args.source, PathBuf::from("source.tb"));
        assert_eq!(args.destination, PathBuf::from("output.bin"));
    }

    #[test]
    fn positionals() {
        let args = parse_argv(&argv(&["in.tb"])).unwrap();
        assert_eq!(args.source, PathBuf::from("in.tb"));
        assert_eq!(args.destination, PathBuf::from("output.bin"));

        let args = parse_argv(&argv(&["in.tb", "out.bin"])).unwrap();
        assert_eq!(args.destination, PathBuf::from("out.bin"));
    }

    #[test]
    fn combined_flags() {
        let args = parse_argv(&argv(&["-sv", "in.tb"])).unwrap();

        assert!(args.strict_keywords);
        assert_eq!(args.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn embedded_and_separate_values() {
        let args = parse_argv(&argv(&["-L/opt/a", "-L", "/opt/b", "-n500", "-d", "8"])).unwrap();

        assert_eq!(
            args.extension_paths,
            vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
        );
        assert_eq!(args.max_iterations, Some(500));
        assert_eq!(args.max_depth, Some(8));
    }

    #[test]
    fn double_dash_ends_flags() {
        let args = parse_argv(&argv(&["--", "-weird.tb"])).unwrap();

        assert_eq!(args.source, PathBuf::from("-weird.tb"));
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_argv(&argv(&["-x"])).unwrap_err(),
            "invalid option: -x"
        );
        assert_eq!(
            parse_argv(&argv(&["-n"])).unwrap_err(),
            "option -n requires an argument"
        );
        assert_eq!(
            parse_argv(&argv(&["-nlots"])).unwrap_err(),
            "option -n expects a non-negative integer, got `lots`"
        );
        assert_eq!(
            parse_argv(&argv(&["a", "b", "c"])).unwrap_err(),
            "unexpected argument: c"
        );
    }

    #[test]
    fn overrides_are_applied_on_top_of_the_config() {
        let mut config = Config {
            extension_paths: vec![PathBuf::from("/env")],
            ..Config::default()
        };
        let args = parse_argv(&argv(&["-s", "-L/cli", "-n7"])).unwrap();
        args.apply(&mut config);

        assert_eq!(config.keywords, KeywordPolicy::Strict);
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.max_depth, 64);
        assert_eq!(
            config.extension_paths,
            vec![PathBuf::from("/cli"), PathBuf::from("/env")]
        );
    }
}
