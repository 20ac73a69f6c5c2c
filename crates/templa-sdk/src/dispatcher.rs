//! Generation dispatcher: resolves the source template a requesting
//! annotation points at, renders it, and shapes the result into write
//! directives.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tera::{Context, Tera};

use crate::accessors;
use crate::annotation::{Annotation, Package, PackageDeclaration};
use crate::binding::BindingContext;
use crate::collaborators::{
    DirectoryPackageResolver, FsTemplateReader, PackageResolver, TemplateReader,
};
use crate::directive::{DirectiveContent, GeneratorKind, WriteDirective};
use crate::error::GenerationError;
use crate::filters;
use crate::formatter::SourceFormatter;
use crate::settings::GeneratorSettings;

/// Join key between a requesting annotation and its source annotation.
pub const ID_PARAM: &str = "id";
/// Overrides the output file name.
pub const FILENAME_PARAM: &str = "filename";
/// Overrides the package name of wrapped output.
pub const PACKAGE_NAME_PARAM: &str = "packageName";
/// Template file path, relative to the declaring source file.
pub const FILE_PARAM: &str = "file";
/// Generator kind on the source annotation.
pub const GEN_PARAM: &str = "gen";

const SOURCE_TEMPLATE: &str = "__source__";

/// Turns annotations into write directives.
///
/// A dispatcher holds no per-call state; one instance can serve concurrent
/// calls from any number of threads.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    settings: GeneratorSettings,
    resolver: Arc<dyn PackageResolver>,
    reader: Arc<dyn TemplateReader>,
    formatter: Arc<dyn SourceFormatter>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(GeneratorSettings::default())
    }
}

impl Dispatcher {
    pub fn new(settings: GeneratorSettings) -> Self {
        let formatter = settings.formatter();
        Self {
            settings,
            resolver: Arc::new(DirectoryPackageResolver),
            reader: Arc::new(FsTemplateReader),
            formatter,
        }
    }

    pub fn with_resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_reader(mut self, reader: impl TemplateReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    pub fn with_formatter(mut self, formatter: impl SourceFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Render the source template the binding's annotation refers to and
    /// return the directives for the external writer.
    ///
    /// Every directive has `allow_overwrite == false`. Any failure aborts the
    /// call without partial output.
    pub fn generate(
        &self,
        output_dir: &Path,
        binding: &BindingContext<'_>,
    ) -> Result<Vec<WriteDirective>, GenerationError> {
        let annotation = binding.annotation();
        let package = binding.package();

        let id = annotation
            .params
            .get(ID_PARAM)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GenerationError::MissingTemplateId {
                annotation: annotation.name.clone(),
            })?;

        let source = self.find_source(id, package)?;
        let template = self.resolve_template(id, source, binding.package_declaration())?;

        let file_name = annotation
            .params
            .get(FILENAME_PARAM)
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| self.settings.default_file_name(&annotation.name));

        let block = render(id, &template, binding, source)?;

        let kind = GeneratorKind::classify(source.param(GEN_PARAM), self.settings.language);
        tracing::debug!(
            id = %id,
            annotation = %annotation.name,
            file_name = %file_name,
            kind = ?kind,
            "Rendered source template"
        );

        let content = match kind {
            GeneratorKind::PartialTest | GeneratorKind::Partial => {
                let test = kind == GeneratorKind::PartialTest;
                let mut package_name = self.package_name(output_dir, annotation, package);
                if test {
                    package_name.push_str("_test");
                }
                let wrapped = self
                    .settings
                    .language
                    .wrap_package(&package_name, &block, test);
                self.formatted(wrapped)
            }
            GeneratorKind::Source => self.formatted(block),
            GeneratorKind::Raw => DirectiveContent::Raw(block),
        };

        Ok(vec![WriteDirective::protected(file_name, content)])
    }

    /// First source annotation whose own `id` equals `id`.
    fn find_source<'p>(
        &self,
        id: &str,
        package: &'p Package,
    ) -> Result<&'p Annotation, GenerationError> {
        let kind = &self.settings.source_kind;
        let candidates = package.annotations_for(kind);
        if candidates.is_empty() {
            return Err(GenerationError::NoTemplatesInPackage {
                kind: kind.clone(),
                package: package.declared_name(),
            });
        }

        let total = candidates.len();
        candidates
            .into_iter()
            .find(|candidate| candidate.params.get(ID_PARAM).is_some_and(|cid| cid == id))
            .ok_or_else(|| {
                tracing::debug!(id = %id, candidates = total, "No source annotation matched");
                GenerationError::NoMatchingTemplate {
                    id: id.to_string(),
                    kind: kind.clone(),
                    package: package.declared_name(),
                }
            })
    }

    /// Inline template text when present, otherwise the contents of the
    /// `file` param resolved next to the declaring source file.
    fn resolve_template<'a>(
        &self,
        id: &str,
        source: &'a Annotation,
        package_declaration: &PackageDeclaration,
    ) -> Result<Cow<'a, str>, GenerationError> {
        if !source.template.is_empty() {
            return Ok(Cow::Borrowed(&source.template));
        }

        let file = source
            .params
            .get(FILE_PARAM)
            .filter(|file| !file.is_empty())
            .ok_or_else(|| GenerationError::NoTemplateProvided { id: id.to_string() })?;

        let path = package_declaration.directory().join(file);
        tracing::debug!(id = %id, path = %path.display(), "Reading template file");

        self.reader
            .read_template(&path)
            .map(Cow::Owned)
            .map_err(|e| GenerationError::TemplateFileMissing { path, source: e })
    }

    fn package_name(
        &self,
        output_dir: &Path,
        annotation: &Annotation,
        package: &Package,
    ) -> String {
        match annotation.params.get(PACKAGE_NAME_PARAM) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.resolver.package_name(output_dir, package),
        }
    }

    fn formatted(&self, source: String) -> DirectiveContent {
        DirectiveContent::Formatted {
            source,
            formatter: Arc::clone(&self.formatter),
        }
    }
}

/// Render `template` against the binding with both accessor sets and the
/// case filters registered.
fn render(
    id: &str,
    template: &str,
    binding: &BindingContext<'_>,
    source: &Annotation,
) -> Result<String, GenerationError> {
    let render_err = |e: tera::Error| GenerationError::Render {
        id: id.to_string(),
        source: e,
    };

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    filters::register(&mut tera);

    let requesting = Arc::new(binding.annotation().clone());
    accessors::register(&mut tera, &accessors::REQUESTING, &requesting);
    accessors::register(&mut tera, &accessors::TARGET, &Arc::new(source.clone()));

    tera.add_raw_template(SOURCE_TEMPLATE, template)
        .map_err(render_err)?;

    let context = Context::from_serialize(binding).map_err(GenerationError::Context)?;
    tera.render(SOURCE_TEMPLATE, &context).map_err(render_err)
}
