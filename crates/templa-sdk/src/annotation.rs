//! Declaration model handed over by the source parser.
//!
//! An AST-extraction pass produces one [`Package`] per directory, made of one
//! [`PackageDeclaration`] per source file. Each declaration carries the
//! annotations found in the file along with the struct, interface and type
//! declarations they are attached to. All types are serde-friendly so a parser
//! running out of process can ship packages as JSON or YAML.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user-authored marker attached to a source construct.
///
/// `params` and `attrs` are open mappings: the set of recognized keys is a
/// convention between annotation authors and templates, not a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation name as written by the user (e.g. `makeFor`, `source`).
    pub name: String,

    /// Key/value parameters (`id => "builder"`).
    #[serde(default)]
    pub params: HashMap<String, String>,

    /// Structured attributes of arbitrary shape.
    #[serde(default)]
    pub attrs: HashMap<String, Value>,

    /// Positional arguments, in declaration order.
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Inline template body, empty when the annotation points at a file.
    #[serde(default)]
    pub template: String,

    /// Whether generation for this annotation was deferred by its author.
    #[serde(default)]
    pub defer: bool,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn deferred(mut self) -> Self {
        self.defer = true;
        self
    }

    /// Parameter value for `key`, or an empty string when absent.
    pub fn param(&self, key: &str) -> &str {
        self.params.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn has_arg(&self, argument: &str) -> bool {
        self.arguments.iter().any(|a| a == argument)
    }

    /// Whether this annotation declares the given kind. Kinds compare
    /// case-insensitively against the annotation name.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.name.eq_ignore_ascii_case(kind)
    }
}

/// A named, typed field of a struct, or a parameter/result of a method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    #[serde(default)]
    pub name: String,

    /// Type expression as written in source.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Struct tags keyed by tag name (`json`, `db`, ...).
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructDeclaration {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub params: Vec<FieldDeclaration>,
    #[serde(default)]
    pub returns: Vec<FieldDeclaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// A named type that is neither a struct nor an interface
/// (`type Handler func(...)`, `type IDs []string`, generic placeholders).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,

    /// Underlying type expression.
    #[serde(rename = "type", default)]
    pub type_expr: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// Everything extracted from a single source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDeclaration {
    /// Package name declared at the top of the file.
    #[serde(default)]
    pub package: String,

    /// Path of the source file the declaration was read from.
    pub file_path: PathBuf,

    /// File-level annotations.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub structs: Vec<StructDeclaration>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDeclaration>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl PackageDeclaration {
    /// Directory containing the source file; relative template paths resolve
    /// against it.
    pub fn directory(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// All annotations in this file: file-level first, then those attached to
    /// structs, interfaces and types.
    pub fn all_annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .chain(self.structs.iter().flat_map(|s| &s.annotations))
            .chain(self.interfaces.iter().flat_map(|i| &i.annotations))
            .chain(self.types.iter().flat_map(|t| &t.annotations))
    }
}

/// A compilation unit: every declaration found in one directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub name: String,

    /// Directory the package was parsed from.
    #[serde(default)]
    pub path: PathBuf,

    #[serde(default)]
    pub declarations: Vec<PackageDeclaration>,
}

impl Package {
    /// All annotations of the given kind across the package, in declaration
    /// order.
    pub fn annotations_for(&self, kind: &str) -> Vec<&Annotation> {
        self.declarations
            .iter()
            .flat_map(|d| d.all_annotations())
            .filter(|a| a.is_kind(kind))
            .collect()
    }

    /// The package's own name, falling back to the first file's declared
    /// package and then to the directory name.
    pub fn declared_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        if let Some(decl) = self.declarations.iter().find(|d| !d.package.is_empty()) {
            return decl.package.clone();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
