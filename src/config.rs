//! Codec configuration.
//!
//! Defaults are compiled in; users can override them from
//! `~/.config/slbc/slbc.toml` and a project-local `./slbc.toml`, later files
//! winning field by field. A malformed override file warns on stderr and is
//! skipped rather than aborting the run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Effective configuration for a codec session.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Script emitted by `decode` when `--to` is not given.
    pub default_script: String,
    /// Strict container parsing (unknown chunk types are errors).
    pub strict: bool,
    /// Extension registry files loaded before decoding.
    pub extensions: Vec<PathBuf>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            default_script: "iast".into(),
            strict: false,
            extensions: Vec::new(),
        }
    }
}

/// One configuration file's contents; absent fields inherit.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    default_script: Option<String>,
    strict: Option<bool>,
    extensions: Option<Vec<PathBuf>>,
}

impl CodecConfig {
    /// Parse a single TOML document into a full config (defaults filled in).
    pub fn from_toml(content: &str) -> Result<CodecConfig, toml::de::Error> {
        let mut config = CodecConfig::default();
        config.merge(toml::from_str(content)?);
        Ok(config)
    }

    /// Load defaults plus user and project overrides.
    pub fn load_with_overrides() -> CodecConfig {
        let mut config = CodecConfig::default();

        if let Some(config_dir) = dirs::config_dir() {
            config.merge_file(&config_dir.join("slbc").join("slbc.toml"));
        }
        config.merge_file(Path::new("slbc.toml"));

        config
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                eprintln!("warning: failed to read {}: {}", path.display(), err);
                return;
            }
        };
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => self.merge(file),
            Err(err) => {
                eprintln!("warning: failed to parse {}: {}", path.display(), err);
            }
        }
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(script) = file.default_script {
            self.default_script = script;
        }
        if let Some(strict) = file.strict {
            self.strict = strict;
        }
        if let Some(extensions) = file.extensions {
            self.extensions = extensions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.default_script, "iast");
        assert!(!config.strict);
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let config = CodecConfig::from_toml("strict = true\n").unwrap();
        assert!(config.strict);
        assert_eq!(config.default_script, "iast");
    }

    #[test]
    fn test_full_file() {
        let config = CodecConfig::from_toml(
            "default_script = \"devanagari\"\nstrict = true\nextensions = [\"extra.sldr\"]\n",
        )
        .unwrap();
        assert_eq!(config.default_script, "devanagari");
        assert_eq!(config.extensions, vec![PathBuf::from("extra.sldr")]);
    }
}
