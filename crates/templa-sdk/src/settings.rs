//! Generator settings loaded from `templa.toml`.
//!
//! [`load_settings`] checks two locations in precedence order:
//! 1. `<project>/templa.toml` (project-local)
//! 2. `~/.config/templa.toml` (user-global)
//!
//! and falls back to defaults when neither exists or the file is unusable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::SettingsError;
use crate::formatter::{CommandFormatter, Normalizer, SourceFormatter};
use crate::language::TargetLanguage;

const SETTINGS_FILENAME: &str = "templa.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";

fn default_file_suffix() -> String {
    "_impl_gen".to_string()
}

fn default_source_kind() -> String {
    "source".to_string()
}

/// External formatter invocation, e.g. `command = "gofmt"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatterSettings {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Settings shared by every generation call of a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorSettings {
    /// Language of the generated files. Default: go.
    #[serde(default)]
    pub language: TargetLanguage,

    /// Appended to the lowercased annotation name when no `filename` param is
    /// given. Default: `_impl_gen`.
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// Annotation kind that declares templates. Default: `source`.
    #[serde(default = "default_source_kind")]
    pub source_kind: String,

    /// External formatter; whitespace normalization is used when unset.
    pub formatter: Option<FormatterSettings>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            language: TargetLanguage::default(),
            file_suffix: default_file_suffix(),
            source_kind: default_source_kind(),
            formatter: None,
        }
    }
}

impl GeneratorSettings {
    pub fn for_language(language: TargetLanguage) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Read settings from an explicit file, failing on IO or parse errors.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Output file name for an annotation without a `filename` param:
    /// `MakeFor` becomes `makefor_impl_gen.go` with default settings.
    pub fn default_file_name(&self, annotation_name: &str) -> String {
        format!(
            "{}{}.{}",
            annotation_name.to_lowercase(),
            self.file_suffix,
            self.language.extension()
        )
    }

    pub fn formatter(&self) -> Arc<dyn SourceFormatter> {
        match &self.formatter {
            Some(settings) => Arc::new(CommandFormatter::from_settings(settings)),
            None => Arc::new(Normalizer),
        }
    }
}

/// Load settings from the first discovered location, or return defaults.
pub fn load_settings(project_dir: &Path) -> GeneratorSettings {
    if let Some(path) = find_settings_file(project_dir) {
        match GeneratorSettings::from_file(&path) {
            Ok(settings) => {
                tracing::debug!(?path, "Loaded generator settings");
                return settings;
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to load generator settings, using defaults");
            }
        }
    }
    GeneratorSettings::default()
}

fn find_settings_file(project_dir: &Path) -> Option<PathBuf> {
    let local = project_dir.join(SETTINGS_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    let global = home_dir()?.join(GLOBAL_CONFIG_DIR).join(SETTINGS_FILENAME);
    global.is_file().then_some(global)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.language, TargetLanguage::Go);
        assert_eq!(settings.file_suffix, "_impl_gen");
        assert_eq!(settings.source_kind, "source");
        assert!(settings.formatter.is_none());
    }

    #[test]
    fn test_default_file_name() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.default_file_name("MakeFor"), "makefor_impl_gen.go");

        let rust = GeneratorSettings::for_language(TargetLanguage::Rust);
        assert_eq!(rust.default_file_name("MakeFor"), "makefor_impl_gen.rs");
    }

    #[test]
    fn test_parse_settings_toml() {
        let toml_str = r#"
language = "rust"
file-suffix = "_gen"
source-kind = "template"

[formatter]
command = "rustfmt"
args = ["--emit", "stdout"]
"#;
        let settings: GeneratorSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.language, TargetLanguage::Rust);
        assert_eq!(settings.file_suffix, "_gen");
        assert_eq!(settings.source_kind, "template");
        let formatter = settings.formatter.unwrap();
        assert_eq!(formatter.command, "rustfmt");
        assert_eq!(formatter.args, vec!["--emit", "stdout"]);
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings: GeneratorSettings = toml::from_str("").unwrap();
        assert_eq!(settings, GeneratorSettings::default());
    }

    #[test]
    fn test_load_settings_from_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "language = \"rust\"\n").unwrap();

        let settings = load_settings(dir.path());
        assert_eq!(settings.language, TargetLanguage::Rust);
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, "language = \"cobol\"\n").unwrap();

        let result = GeneratorSettings::from_file(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_from_file_missing() {
        let result = GeneratorSettings::from_file(Path::new("/nonexistent/templa.toml"));
        assert!(matches!(result, Err(SettingsError::Io { .. })));
    }
}
