//! Error types for generation, content formatting and settings loading.

use std::path::PathBuf;

/// Terminal failure of a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no source id provided on annotation '{annotation}'")]
    MissingTemplateId { annotation: String },

    #[error("no '{kind}' annotations found in package '{package}'")]
    NoTemplatesInPackage { kind: String, package: String },

    #[error("no '{kind}' annotation with id '{id}' found in package '{package}'")]
    NoMatchingTemplate {
        id: String,
        kind: String,
        package: String,
    },

    #[error("source '{id}' has no inline template; provide `file => 'path_to_template'`")]
    NoTemplateProvided { id: String },

    #[error("failed to read template file '{}': {source}", path.display())]
    TemplateFileMissing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to build template context: {0}")]
    Context(#[source] tera::Error),

    #[error("render error for source '{id}': {source}")]
    Render { id: String, source: tera::Error },
}

/// Failure while post-processing directive content.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed to start formatter '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("formatter '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("formatter produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported target language: {0} (expected: go, rust)")]
pub struct UnknownLanguage(pub String);
