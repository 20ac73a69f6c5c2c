//! Target language of generated files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownLanguage;
use crate::formatter::trim_blank_edges;

/// Language the rendered templates are written in. Selects the file
/// extension, the package wrapper for partial outputs and the `gen` keys a
/// source annotation may declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Go,
    Rust,
}

impl TargetLanguage {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Rust => "rs",
        }
    }

    /// Wrap a rendered block in a package declaration named `package_name`.
    ///
    /// Go output gets a `package` clause; Rust output becomes an inline module,
    /// gated on `cfg(test)` for test partials.
    /// Blank lines around `body` are dropped so the wrapper controls spacing.
    pub fn wrap_package(self, package_name: &str, body: &str, test: bool) -> String {
        let body = trim_blank_edges(body);
        match self {
            Self::Go => format!("package {package_name}\n\n{body}\n"),
            Self::Rust => {
                let (attr, vis) = if test { ("#[cfg(test)]\n", "") } else { ("", "pub ") };
                format!("{attr}{vis}mod {package_name} {{\n{body}\n}}\n")
            }
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Go => write!(f, "go"),
            Self::Rust => write!(f, "rust"),
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" | "golang" => Ok(Self::Go),
            "rust" | "rs" => Ok(Self::Rust),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}
