//! Output instructions produced by the dispatcher.

use std::io::Write;
use std::sync::Arc;

use crate::error::FormatError;
use crate::formatter::SourceFormatter;
use crate::language::TargetLanguage;

/// How a source annotation's `gen` param shapes rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// `partial_test.<ext>`: wrapped in a `<package>_test` declaration, formatted.
    PartialTest,
    /// `partial.<ext>`: wrapped in a package declaration, formatted.
    Partial,
    /// `<ext>`: the rendered block alone, formatted.
    Source,
    /// Anything else, including no `gen` at all: written as rendered.
    Raw,
}

impl GeneratorKind {
    /// Classify a `gen` value for the given target language. Matching is
    /// case-insensitive.
    pub fn classify(value: &str, language: TargetLanguage) -> Self {
        let value = value.to_lowercase();
        let ext = language.extension();

        match value.split_once('.') {
            Some(("partial_test", e)) if e == ext => Self::PartialTest,
            Some(("partial", e)) if e == ext => Self::Partial,
            None if value == ext => Self::Source,
            _ => Self::Raw,
        }
    }

    pub fn wraps_package(self) -> bool {
        matches!(self, Self::PartialTest | Self::Partial)
    }

    pub fn is_formatted(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

/// Content of a write directive.
#[derive(Debug, Clone)]
pub enum DirectiveContent {
    /// Written exactly as rendered.
    Raw(String),
    /// Passed through `formatter` when rendered.
    Formatted {
        source: String,
        formatter: Arc<dyn SourceFormatter>,
    },
}

impl DirectiveContent {
    /// The text before any post-processing.
    pub fn source(&self) -> &str {
        match self {
            Self::Raw(source) | Self::Formatted { source, .. } => source,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted { .. })
    }

    /// Final text to write.
    pub fn render(&self) -> Result<String, FormatError> {
        match self {
            Self::Raw(source) => Ok(source.clone()),
            Self::Formatted { source, formatter } => formatter.format(source),
        }
    }
}

/// One file the external writer should produce.
#[derive(Debug, Clone)]
pub struct WriteDirective {
    pub file_name: String,

    /// Whether an existing file may be replaced. The dispatcher always
    /// leaves this `false`.
    pub allow_overwrite: bool,

    pub content: DirectiveContent,
}

impl WriteDirective {
    pub(crate) fn protected(file_name: String, content: DirectiveContent) -> Self {
        Self {
            file_name,
            allow_overwrite: false,
            content,
        }
    }

    /// Render the content and stream it into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize, FormatError> {
        let text = self.content.render()?;
        writer.write_all(text.as_bytes())?;
        Ok(text.len())
    }
}
