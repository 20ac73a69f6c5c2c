//! Post-processing applied to formatted directive content.
//!
//! The default [`Normalizer`] only tidies whitespace. A [`CommandFormatter`]
//! pipes content through an external tool such as `gofmt` or
//! `rustfmt --emit stdout`.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::FormatError;
use crate::settings::FormatterSettings;

/// Turns rendered source text into its final on-disk form.
pub trait SourceFormatter: fmt::Debug + Send + Sync {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Whitespace normalization at the edges of a file: line endings become
/// `\n`, leading blank lines and trailing whitespace are dropped and
/// non-empty output ends with exactly one newline.
///
/// Interior lines are left alone, since they may sit inside a multi-line
/// string literal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Normalizer;

impl SourceFormatter for Normalizer {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(normalize(source))
    }
}

pub fn normalize(source: &str) -> String {
    let text = source.replace("\r\n", "\n");
    let body = trim_blank_edges(&text);
    if body.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(body.len() + 1);
    out.push_str(body);
    out.push('\n');
    out
}

/// `text` without its leading blank lines and trailing whitespace. Indentation
/// of the first non-blank line is kept.
pub(crate) fn trim_blank_edges(text: &str) -> &str {
    let Some(first) = text.find(|c: char| !c.is_whitespace()) else {
        return "";
    };
    let start = text[..first].rfind('\n').map_or(0, |nl| nl + 1);
    text[start..].trim_end()
}

/// Runs an external formatter, feeding content on stdin and reading the
/// result from stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_settings(settings: &FormatterSettings) -> Self {
        Self::new(settings.command.clone(), settings.args.clone())
    }
}

impl SourceFormatter for CommandFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FormatError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("formatter stdin unavailable"))?;

        // Write on a separate thread so a formatter that streams output before
        // consuming all input cannot deadlock on a full pipe.
        let input = source.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("formatter stdin writer panicked")));

        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        tracing::trace!(program = %self.program, bytes = output.stdout.len(), "Formatted content");
        Ok(String::from_utf8(output.stdout)?)
    }
}
