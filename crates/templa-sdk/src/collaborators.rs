//! Seams to the surrounding toolchain.
//!
//! The dispatcher asks these for the only two things it cannot compute from
//! its inputs: the package name an output directory belongs to, and the
//! contents of external template files.

use std::fmt;
use std::path::Path;

use heck::ToSnakeCase;

use crate::annotation::Package;

/// Derives the package name generated files in `output_dir` should declare.
pub trait PackageResolver: fmt::Debug + Send + Sync {
    fn package_name(&self, output_dir: &Path, package: &Package) -> String;
}

/// Uses the package's own name when writing into its directory, and the
/// output directory's name otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryPackageResolver;

impl PackageResolver for DirectoryPackageResolver {
    fn package_name(&self, output_dir: &Path, package: &Package) -> String {
        if output_dir == package.path {
            return package.declared_name();
        }

        output_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_snake_case())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| package.declared_name())
    }
}

/// Reads template files referenced by a source annotation's `file` param.
pub trait TemplateReader: fmt::Debug + Send + Sync {
    fn read_template(&self, path: &Path) -> std::io::Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsTemplateReader;

impl TemplateReader for FsTemplateReader {
    fn read_template(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
