// keyswitch-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use keyswitch_core::{Language, UkVariant};
use keyswitch_dict::repository::{binary_file_name, text_file_name};
use keyswitch_dict::{DictionaryRepository, LoaderConfig};
use keyswitch_engine::Settings;
use tracing_subscriber::EnvFilter;

/// Dictionary directory name under the home and system directories.
const DICT_SUBDIR: &str = "dict";

/// Environment variable naming the dictionary directory.
const DICT_PATH_VAR: &str = "KEYSWITCH_DICT_PATH";

/// Environment variable naming a TOML settings file.
const CONFIG_VAR: &str = "KEYSWITCH_CONFIG";

/// Environment variable holding the log filter, checked before `RUST_LOG`.
const LOG_VAR: &str = "KEYSWITCH_LOG";

/// Install a `tracing` subscriber writing to stderr.
///
/// The filter comes from `KEYSWITCH_LOG`, then `RUST_LOG`, and defaults to
/// warnings only so that tool output stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Search for a dictionary directory and create a repository over it.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `KEYSWITCH_DICT_PATH` environment variable
/// 3. `~/.keyswitch/dict`
/// 4. `/etc/keyswitch/dict`, `/usr/share/keyswitch/dict`
/// 5. Current working directory
///
/// A directory qualifies when it holds a binary or text dictionary for at
/// least one language.
pub fn load_repository(
    dict_path: Option<&str>,
    config: LoaderConfig,
) -> Result<Arc<DictionaryRepository>, String> {
    let search_paths = build_search_paths(dict_path);

    match search_paths.iter().find(|dir| has_dictionary(dir)) {
        Some(dir) => Ok(Arc::new(DictionaryRepository::new(dir, config))),
        None => Err(format!(
            "could not find dictionaries in any of the search paths:\n{}",
            search_paths
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n")
        )),
    }
}

fn has_dictionary(dir: &Path) -> bool {
    Language::ALL.iter().any(|&lang| {
        dir.join(binary_file_name(lang)).is_file() || dir.join(text_file_name(lang)).is_file()
    })
}

/// Build the list of directories to search for dictionary files.
fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Explicit path from argument
    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    // 2. KEYSWITCH_DICT_PATH environment variable
    if let Ok(env_path) = std::env::var(DICT_PATH_VAR) {
        paths.push(PathBuf::from(&env_path));
        paths.push(PathBuf::from(&env_path).join(DICT_SUBDIR));
    }

    // 3. Home directory
    if let Some(home) = home_dir() {
        paths.push(home.join(".keyswitch").join(DICT_SUBDIR));
    }

    // 4. System paths
    paths.push(PathBuf::from("/etc/keyswitch").join(DICT_SUBDIR));
    paths.push(PathBuf::from("/usr/share/keyswitch").join(DICT_SUBDIR));

    // 5. Current directory (fallback for local development)
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Load settings from `config_path`, else from `KEYSWITCH_CONFIG`, else
/// defaults.
pub fn load_settings(config_path: Option<&str>) -> Result<Settings, String> {
    let path = config_path
        .map(PathBuf::from)
        .or_else(|| std::env::var(CONFIG_VAR).ok().map(PathBuf::from));
    match path {
        Some(path) => Settings::from_file(&path)
            .map_err(|e| format!("failed to load {}: {e}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Extract a `--long=VALUE`, `--long VALUE` or `-s VALUE` option.
///
/// Returns `(value, remaining_args)`. Exits if the flag has no value.
pub fn parse_option(args: &[String], long: &str, short: &str) -> (Option<String>, Vec<String>) {
    let flag = format!("--{long}");
    let prefix = format!("--{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut skip_next = false;

    for (i, arg) in args.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if *arg == flag || arg == short {
            match args.get(i + 1) {
                Some(next) => {
                    value = Some(next.clone());
                    skip_next = true;
                }
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Parse a `--dict-path=PATH` or `-d PATH` argument from command line args.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "dict-path", "-d")
}

/// Parse a `--config=PATH` or `-c PATH` argument from command line args.
pub fn parse_config_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "config", "-c")
}

/// Parse a language code or name, exiting on failure.
pub fn parse_language(value: &str) -> Language {
    value.parse().unwrap_or_else(|e| fatal(&format!("{e}")))
}

/// The language named by a dictionary file's stem, e.g. `out/uk.ksd`.
pub fn language_from_path(path: &str) -> Option<Language> {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(Language::from_code)
}

/// Parse a Ukrainian layout variant (`standard` or `legacy`).
pub fn parse_variant(value: &str) -> Result<UkVariant, String> {
    match value.to_ascii_lowercase().as_str() {
        "standard" => Ok(UkVariant::Standard),
        "legacy" => Ok(UkVariant::Legacy),
        _ => Err(format!("unknown Ukrainian variant: {value}")),
    }
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
