//! Entry points per annotated construct.
//!
//! Each generator packages its construct into a [`BindingContext`] and hands
//! it to [`Dispatcher::generate`]. Templates see the context as their root:
//!
//! | Key | Present for |
//! |---|---|
//! | `annotation` | always |
//! | `package_declaration` | always |
//! | `package` | always |
//! | `struct_declaration` | [`Dispatcher::struct_generator`] |
//! | `interface_declaration` | [`Dispatcher::interface_generator`] |
//! | `type_declaration` | [`Dispatcher::any_type_generator`] |

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::annotation::{
    Annotation, InterfaceDeclaration, Package, PackageDeclaration, StructDeclaration,
    TypeDeclaration,
};
use crate::directive::WriteDirective;
use crate::dispatcher::Dispatcher;
use crate::error::GenerationError;

/// The construct an annotation is attached to.
#[derive(Debug, Clone, Copy)]
pub enum Construct<'a> {
    Struct(&'a StructDeclaration),
    Interface(&'a InterfaceDeclaration),
    Type(&'a TypeDeclaration),
    /// Package-level annotation with no construct of its own.
    Package,
}

/// Substitution root for one render.
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    annotation: &'a Annotation,
    package_declaration: &'a PackageDeclaration,
    package: &'a Package,
    construct: Construct<'a>,
}

impl<'a> BindingContext<'a> {
    pub fn new(
        annotation: &'a Annotation,
        package_declaration: &'a PackageDeclaration,
        package: &'a Package,
        construct: Construct<'a>,
    ) -> Self {
        Self {
            annotation,
            package_declaration,
            package,
            construct,
        }
    }

    pub fn annotation(&self) -> &'a Annotation {
        self.annotation
    }

    pub fn package_declaration(&self) -> &'a PackageDeclaration {
        self.package_declaration
    }

    pub fn package(&self) -> &'a Package {
        self.package
    }

    pub fn construct(&self) -> Construct<'a> {
        self.construct
    }
}

impl Serialize for BindingContext<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("annotation", self.annotation)?;
        map.serialize_entry("package_declaration", self.package_declaration)?;
        map.serialize_entry("package", self.package)?;
        match self.construct {
            Construct::Struct(decl) => map.serialize_entry("struct_declaration", decl)?,
            Construct::Interface(decl) => map.serialize_entry("interface_declaration", decl)?,
            Construct::Type(decl) => map.serialize_entry("type_declaration", decl)?,
            Construct::Package => {}
        }
        map.end()
    }
}

impl Dispatcher {
    /// Generate for an annotation attached to a struct.
    pub fn struct_generator(
        &self,
        output_dir: &Path,
        annotation: &Annotation,
        declaration: &StructDeclaration,
        package_declaration: &PackageDeclaration,
        package: &Package,
    ) -> Result<Vec<WriteDirective>, GenerationError> {
        let binding = BindingContext::new(
            annotation,
            package_declaration,
            package,
            Construct::Struct(declaration),
        );
        self.generate(output_dir, &binding)
    }

    /// Generate for an annotation attached to an interface.
    pub fn interface_generator(
        &self,
        output_dir: &Path,
        annotation: &Annotation,
        declaration: &InterfaceDeclaration,
        package_declaration: &PackageDeclaration,
        package: &Package,
    ) -> Result<Vec<WriteDirective>, GenerationError> {
        let binding = BindingContext::new(
            annotation,
            package_declaration,
            package,
            Construct::Interface(declaration),
        );
        self.generate(output_dir, &binding)
    }

    /// Generate for a package-level annotation.
    pub fn package_generator(
        &self,
        output_dir: &Path,
        annotation: &Annotation,
        package_declaration: &PackageDeclaration,
        package: &Package,
    ) -> Result<Vec<WriteDirective>, GenerationError> {
        let binding =
            BindingContext::new(annotation, package_declaration, package, Construct::Package);
        self.generate(output_dir, &binding)
    }

    /// Generate for an annotation attached to any other named type.
    pub fn any_type_generator(
        &self,
        output_dir: &Path,
        annotation: &Annotation,
        declaration: &TypeDeclaration,
        package_declaration: &PackageDeclaration,
        package: &Package,
    ) -> Result<Vec<WriteDirective>, GenerationError> {
        let binding = BindingContext::new(
            annotation,
            package_declaration,
            package,
            Construct::Type(declaration),
        );
        self.generate(output_dir, &binding)
    }
}

/// [`Dispatcher::struct_generator`] with default settings.
pub fn struct_generator(
    output_dir: &Path,
    annotation: &Annotation,
    declaration: &StructDeclaration,
    package_declaration: &PackageDeclaration,
    package: &Package,
) -> Result<Vec<WriteDirective>, GenerationError> {
    Dispatcher::default().struct_generator(
        output_dir,
        annotation,
        declaration,
        package_declaration,
        package,
    )
}

/// [`Dispatcher::interface_generator`] with default settings.
pub fn interface_generator(
    output_dir: &Path,
    annotation: &Annotation,
    declaration: &InterfaceDeclaration,
    package_declaration: &PackageDeclaration,
    package: &Package,
) -> Result<Vec<WriteDirective>, GenerationError> {
    Dispatcher::default().interface_generator(
        output_dir,
        annotation,
        declaration,
        package_declaration,
        package,
    )
}

/// [`Dispatcher::package_generator`] with default settings.
pub fn package_generator(
    output_dir: &Path,
    annotation: &Annotation,
    package_declaration: &PackageDeclaration,
    package: &Package,
) -> Result<Vec<WriteDirective>, GenerationError> {
    Dispatcher::default().package_generator(output_dir, annotation, package_declaration, package)
}

/// [`Dispatcher::any_type_generator`] with default settings.
pub fn any_type_generator(
    output_dir: &Path,
    annotation: &Annotation,
    declaration: &TypeDeclaration,
    package_declaration: &PackageDeclaration,
    package: &Package,
) -> Result<Vec<WriteDirective>, GenerationError> {
    Dispatcher::default().any_type_generator(
        output_dir,
        annotation,
        declaration,
        package_declaration,
        package,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::PathBuf;

    fn fixture() -> (Annotation, PackageDeclaration, Package) {
        let annotation = Annotation::new("makeFor").with_param("id", "describe");
        let source = Annotation::new("source")
            .with_param("id", "describe")
            .with_template(
                "{% if struct_declaration %}struct {{ struct_declaration.name }}\
                 {% elif interface_declaration %}interface {{ interface_declaration.name }}\
                 {% elif type_declaration %}type {{ type_declaration.name }}\
                 {% else %}package {{ package_declaration.package }}{% endif %}",
            );
        let decl = PackageDeclaration {
            package: "shapes".to_string(),
            file_path: PathBuf::from("/src/shapes/shapes.go"),
            annotations: vec![source],
            ..PackageDeclaration::default()
        };
        let package = Package {
            name: "shapes".to_string(),
            path: PathBuf::from("/src/shapes"),
            declarations: vec![decl.clone()],
        };
        (annotation, decl, package)
    }

    fn rendered(directives: Vec<WriteDirective>) -> String {
        assert_eq!(directives.len(), 1);
        directives[0].content.source().to_string()
    }

    #[test]
    fn test_each_adapter_populates_its_construct() {
        let (an, decl, package) = fixture();
        let dir = Path::new("/src/shapes");

        let shape = StructDeclaration {
            name: "Circle".to_string(),
            ..StructDeclaration::default()
        };
        let reader = InterfaceDeclaration {
            name: "Reader".to_string(),
            ..InterfaceDeclaration::default()
        };
        let ids = TypeDeclaration {
            name: "IDs".to_string(),
            type_expr: "[]string".to_string(),
            ..TypeDeclaration::default()
        };

        let out = struct_generator(dir, &an, &shape, &decl, &package).unwrap();
        assert_eq!(rendered(out), "struct Circle");

        let out = interface_generator(dir, &an, &reader, &decl, &package).unwrap();
        assert_eq!(rendered(out), "interface Reader");

        let out = any_type_generator(dir, &an, &ids, &decl, &package).unwrap();
        assert_eq!(rendered(out), "type IDs");

        let out = package_generator(dir, &an, &decl, &package).unwrap();
        assert_eq!(rendered(out), "package shapes");
    }

    #[test]
    fn test_adapters_propagate_dispatcher_errors() {
        let (_, decl, package) = fixture();
        let an = Annotation::new("makeFor");
        let result = package_generator(Path::new("/src/shapes"), &an, &decl, &package);
        assert!(matches!(result, Err(GenerationError::MissingTemplateId { .. })));
    }

    #[test]
    fn test_serialized_shape() {
        let (an, decl, package) = fixture();
        let shape = StructDeclaration {
            name: "Circle".to_string(),
            ..StructDeclaration::default()
        };

        let value =
            serde_json::to_value(BindingContext::new(&an, &decl, &package, Construct::Struct(&shape)))
                .unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert!(keys.contains(&"struct_declaration".to_string()));
        assert!(!keys.contains(&"interface_declaration".to_string()));
        assert_eq!(value["annotation"]["name"], Value::from("makeFor"));

        let value =
            serde_json::to_value(BindingContext::new(&an, &decl, &package, Construct::Package))
                .unwrap();
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}
