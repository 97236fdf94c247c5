//! Configuration for journal-scorer output paths.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI)
//! 2. Environment variables (JOURNAL_SCORER_HOME, JOURNAL_SCORER_PER_JOURNAL)
//! 3. Config file (.journal-scorer/config.yaml)
//! 4. Defaults (~/.journal-scorer, output/per_journal_scores.jsonl)
//!
//! Config file discovery:
//! - Searches current directory and parents for .journal-scorer/config.yaml
//! - Falls back to $JOURNAL_SCORER_HOME/config.yaml
//! - Relative paths in the file resolve against the directory that holds
//!   the .journal-scorer/ folder

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Name of the per-project config directory
pub const CONFIG_DIR: &str = ".journal-scorer";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Default per-journal output path (relative to the working directory)
pub const DEFAULT_PER_JOURNAL: &str = "output/per_journal_scores.jsonl";

const ENV_HOME: &str = "JOURNAL_SCORER_HOME";
const ENV_PER_JOURNAL: &str = "JOURNAL_SCORER_PER_JOURNAL";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Per-journal JSONL output
    pub per_journal: Option<String>,
    /// Run manifest output (disabled when absent)
    pub manifest: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// journal-scorer home directory
    pub home: PathBuf,
    /// Where per-journal scores are written
    pub per_journal: PathBuf,
    /// Where the run manifest is written, if anywhere
    pub manifest: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<String>,
    per_journal: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var(ENV_HOME).ok(),
            per_journal: std::env::var(ENV_PER_JOURNAL).ok(),
        }
    }
}

/// Find config file by searching `start` and its parents, then `home`
fn find_config_file(start: &Path, home: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = home.join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Combine config file, environment and defaults
fn resolve_config(
    config_file: Option<PathBuf>,
    env: &EnvOverrides,
    home: PathBuf,
) -> Result<ResolvedConfig> {
    let output = match config_file {
        Some(ref path) => load_config_file(path)?.output,
        None => OutputConfig::default(),
    };

    // Directory holding .journal-scorer/ (grandparent of config.yaml)
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let per_journal = if let Some(ref env_path) = env.per_journal {
        PathBuf::from(env_path)
    } else if let Some(ref file_path) = output.per_journal {
        resolve_path(&base_dir, file_path)
    } else {
        PathBuf::from(DEFAULT_PER_JOURNAL)
    };

    let manifest = output
        .manifest
        .as_deref()
        .map(|p| resolve_path(&base_dir, p));

    Ok(ResolvedConfig {
        home,
        per_journal,
        manifest,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let env = EnvOverrides::from_env();

    let home = match env.home {
        Some(ref env_home) => PathBuf::from(env_home),
        None => dirs::home_dir()
            .context("Failed to determine home directory")?
            .join(CONFIG_DIR),
    };

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_file = find_config_file(&cwd, &home);

    resolve_config(config_file, &env, home)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let home = PathBuf::from("/test/.journal-scorer");
        let config = resolve_config(None, &EnvOverrides::default(), home.clone()).unwrap();

        assert_eq!(config.home, home);
        assert_eq!(config.per_journal, PathBuf::from(DEFAULT_PER_JOURNAL));
        assert!(config.manifest.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
output:
  per_journal: results/per_journal.jsonl
  manifest: /abs/manifest.json
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(
            config.output.per_journal,
            Some("results/per_journal.jsonl".to_string())
        );
        assert_eq!(config.output.manifest, Some("/abs/manifest.json".to_string()));
    }

    #[test]
    fn test_output_section_is_optional() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "version: \"1.0\"");

        let config = load_config_file(&config_path).unwrap();
        assert!(config.output.per_journal.is_none());
        assert!(config.output.manifest.is_none());
    }

    #[test]
    fn test_file_paths_resolve_against_project_root() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\noutput:\n  per_journal: out/scores.jsonl\n  manifest: out/manifest.json",
        );

        let config = resolve_config(
            Some(config_path.clone()),
            &EnvOverrides::default(),
            PathBuf::from("/home"),
        )
        .unwrap();

        assert_eq!(config.per_journal, temp.path().join("out/scores.jsonl"));
        assert_eq!(config.manifest, Some(temp.path().join("out/manifest.json")));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\noutput:\n  per_journal: out/scores.jsonl",
        );
        let env = EnvOverrides {
            home: None,
            per_journal: Some("/tmp/env_scores.jsonl".to_string()),
        };

        let config = resolve_config(Some(config_path), &env, PathBuf::from("/home")).unwrap();
        assert_eq!(config.per_journal, PathBuf::from("/tmp/env_scores.jsonl"));
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "version: \"1.0\"");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested, &temp.path().join("no-home"));
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_falls_back_to_home() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(home.join(CONFIG_FILE), "version: \"1.0\"").unwrap();

        let project = temp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();

        let found = find_config_file(&project, &home);
        assert_eq!(found, Some(home.join(CONFIG_FILE)));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "output: [not, a, map");

        let result = resolve_config(
            Some(config_path),
            &EnvOverrides::default(),
            PathBuf::from("/home"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/./subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
