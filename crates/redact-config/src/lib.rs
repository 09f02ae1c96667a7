use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Prefix marking a pattern fragment as a preset reference (`@ssn`).
pub const PRESET_PREFIX: char = '@';

/// Configuration for docredact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: RedactionDefaults,

    /// Named pattern fragments, in addition to the built-in ones.
    #[serde(default)]
    pub presets: BTreeMap<String, String>,
}

/// Used when the matching command-line flag is absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionDefaults {
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub replacement: Option<String>,
}

fn builtin_presets() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        ("ssn", r"\b\d{3}-\d{2}-\d{4}\b"),
        ("email", r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"),
        ("phone", r"\b(?:\d{3}[-. ])?\d{3}-\d{4}\b"),
        ("credit_card", r"\b(?:\d{4}[ -]?){3}\d{4}\b"),
    ])
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    /// Load config from an explicit path; a missing file is an error
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "docredact", "docredact") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.docredact/config.toml")
        }
    }

    /// Look up a preset, user-defined first
    pub fn preset(&self, name: &str) -> Option<&str> {
        self.presets
            .get(name)
            .map(String::as_str)
            .or_else(|| builtin_presets().get(name).copied())
    }

    /// Names of every available preset, sorted
    pub fn preset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = builtin_presets()
            .keys()
            .map(|k| k.to_string())
            .chain(self.presets.keys().cloned())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Replace `@name` fragments with their preset pattern
    pub fn expand_patterns(&self, fragments: &[String]) -> anyhow::Result<Vec<String>> {
        let mut expanded = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            match fragment.strip_prefix(PRESET_PREFIX) {
                Some(name) => match self.preset(name) {
                    Some(pattern) => expanded.push(pattern.to_string()),
                    None => bail!(
                        "Unknown preset: {} (available: {})",
                        name,
                        self.preset_names().join(", ")
                    ),
                },
                None => expanded.push(fragment.clone()),
            }
        }
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.defaults.color.is_none());
        assert!(config.defaults.replacement.is_none());
        assert!(config.preset("ssn").is_some());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.defaults.color = Some("yellow".to_string());
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.defaults.color.as_deref(), Some("yellow"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[defaults]
color = "white"
replacement = "[REDACTED]"

[presets]
employee_id = "EMP-\\d{6}"
ssn = "\\d{9}"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.defaults.color.as_deref(), Some("white"));
        assert_eq!(config.defaults.replacement.as_deref(), Some("[REDACTED]"));
        assert_eq!(config.preset("employee_id"), Some(r"EMP-\d{6}"));
        assert_eq!(config.preset("ssn"), Some(r"\d{9}"));
        assert!(config.preset("email").is_some());
    }

    #[test]
    fn test_expand_patterns() {
        let config = Config::default();
        let expanded = config
            .expand_patterns(&["@ssn".to_string(), "secret".to_string()])
            .unwrap();
        assert_eq!(expanded, vec![r"\b\d{3}-\d{2}-\d{4}\b", "secret"]);

        let err = config.expand_patterns(&["@nope".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown preset: nope"));
        assert!(err.to_string().contains("credit_card"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nreplacement = \"\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.defaults.replacement.as_deref(), Some(""));

        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
