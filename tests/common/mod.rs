//! Shared fixtures for workspace integration tests.
//
// Using #[allow(dead_code)] because each test target uses a different subset
// of these helpers.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use templa_sdk::{Package, PackageDeclaration};
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn shapes_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shapes")
}

/// Load the `shapes` fixture package with its paths anchored at the fixture
/// directory, as the parser would report them.
pub fn load_shapes() -> Package {
    let dir = shapes_dir();
    let yaml = std::fs::read_to_string(dir.join("package.yaml")).unwrap();
    let mut package: Package = serde_yaml::from_str(&yaml).unwrap();

    package.path = dir.clone();
    for decl in &mut package.declarations {
        decl.file_path = dir.join(&decl.file_path);
    }
    package
}

pub fn shapes_declaration(package: &Package) -> &PackageDeclaration {
    &package.declarations[0]
}

/// Stand-in for the external writer: creates files, never replaces them
/// unless the directive allows it. Returns the names actually written.
pub fn apply(
    directives: &[templa_sdk::WriteDirective],
    dir: &Path,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut written = Vec::new();
    for directive in directives {
        let path = dir.join(&directive.file_name);
        if path.exists() && !directive.allow_overwrite {
            continue;
        }
        let mut file = std::fs::File::create(&path)?;
        directive.write_to(&mut file)?;
        written.push(directive.file_name.clone());
    }
    Ok(written)
}
