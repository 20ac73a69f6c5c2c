//! Annotation-driven code generation.
//!
//! A requesting annotation (`@makeFor(id => "builder")`) placed on a struct,
//! interface, type or package names a `@source` annotation elsewhere in the
//! same package. The [`Dispatcher`] finds that source, loads its template
//! (inline or from a file next to the declaring source file), renders it with
//! Tera against the annotated construct, and returns [`WriteDirective`]s for
//! an external writer to apply.
//!
//! # Modules
//!
//! - [`annotation`]: Declaration model produced by the source parser
//! - [`binding`]: Per-construct entry points and the template binding context
//! - [`dispatcher`]: Source resolution, rendering and output classification
//! - [`accessors`]: Annotation accessor functions available inside templates
//! - [`directive`]: Write directives and generator kinds
//! - [`formatter`]: Post-processing for formatted output
//! - [`collaborators`]: Package-name and template-file seams
//! - [`settings`]: `templa.toml` generator settings
//!
//! # Migrating templates
//!
//! Accessors are Tera functions and take named arguments. Templates written
//! with the positional call form need rewriting:
//!
//! | Positional | Tera |
//! |---|---|
//! | `{{ sel "name" }}` | `{{ sel(key="name") }}` |
//! | `{{ targetSel "gen" }}` | `{{ targetSel(key="gen") }}` |
//! | `{{ attrs "limit" }}` | `{{ attrs(key="limit") }}` |
//! | `{{ if hasArg "ptr" }}` | `{% set ptr = hasArg(name="ptr") %}{% if ptr %}` |
//! | `{{ range annotationArguments }}` | `{% for a in annotationArguments() %}` |
//!
//! The positional form does not parse and is reported as a render error:
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use templa_sdk::{package_generator, Annotation, GenerationError, Package, PackageDeclaration};
//!
//! let source = Annotation::new("source")
//!     .with_param("id", "legacy")
//!     .with_template("{{ sel \"name\" }}");
//! let decl = PackageDeclaration {
//!     package: "greet".to_string(),
//!     file_path: PathBuf::from("/src/greet/doc.go"),
//!     annotations: vec![source],
//!     ..PackageDeclaration::default()
//! };
//! let package = Package {
//!     name: "greet".to_string(),
//!     path: PathBuf::from("/src/greet"),
//!     declarations: vec![decl.clone()],
//! };
//!
//! let request = Annotation::new("Legacy").with_param("id", "legacy");
//! let result = package_generator(Path::new("/src/greet"), &request, &decl, &package);
//! assert!(matches!(result, Err(GenerationError::Render { .. })));
//! ```
//!
//! # Example
//!
//! ```
//! use std::path::{Path, PathBuf};
//! use templa_sdk::{package_generator, Annotation, Package, PackageDeclaration};
//!
//! let source = Annotation::new("source")
//!     .with_param("id", "greeter")
//!     .with_param("gen", "partial.go")
//!     .with_template("func Hello() string { return \"{{ sel(key=\"greeting\") }}\" }");
//! let decl = PackageDeclaration {
//!     package: "greet".to_string(),
//!     file_path: PathBuf::from("/src/greet/doc.go"),
//!     annotations: vec![source],
//!     ..PackageDeclaration::default()
//! };
//! let package = Package {
//!     name: "greet".to_string(),
//!     path: PathBuf::from("/src/greet"),
//!     declarations: vec![decl.clone()],
//! };
//!
//! let request = Annotation::new("Greeter")
//!     .with_param("id", "greeter")
//!     .with_param("greeting", "hi");
//! let directives = package_generator(Path::new("/src/greet"), &request, &decl, &package)?;
//!
//! assert_eq!(directives[0].file_name, "greeter_impl_gen.go");
//! assert_eq!(
//!     directives[0].content.render()?,
//!     "package greet\n\nfunc Hello() string { return \"hi\" }\n"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod accessors;
pub mod annotation;
pub mod binding;
pub mod collaborators;
pub mod directive;
pub mod dispatcher;
pub mod error;
mod filters;
pub mod formatter;
pub mod language;
pub mod settings;

pub use annotation::{
    Annotation, FieldDeclaration, InterfaceDeclaration, MethodDeclaration, Package,
    PackageDeclaration, StructDeclaration, TypeDeclaration,
};
pub use binding::{
    any_type_generator, interface_generator, package_generator, struct_generator, BindingContext,
    Construct,
};
pub use collaborators::{DirectoryPackageResolver, FsTemplateReader, PackageResolver, TemplateReader};
pub use directive::{DirectiveContent, GeneratorKind, WriteDirective};
pub use dispatcher::Dispatcher;
pub use error::{FormatError, GenerationError, SettingsError, UnknownLanguage};
pub use formatter::{CommandFormatter, Normalizer, SourceFormatter};
pub use language::TargetLanguage;
pub use settings::{load_settings, FormatterSettings, GeneratorSettings};
