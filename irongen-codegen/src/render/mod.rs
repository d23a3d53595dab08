//! Rendering of a finished tree into source files.

pub mod java;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use irongen_ast::CodeRoot;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

pub use java::JavaLikeRenderer;
pub use writer::CodeWriter;

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFile {
    /// Logical name, usually the main declaration.
    pub name: String,
    /// File name including the extension.
    pub file_name: String,
    /// Directory relative to the output root, `/`-separated.
    pub directory: String,
    /// File contents.
    pub content: String,
}

impl RenderedFile {
    /// Path of the file relative to the output root.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.directory.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }
}

/// Turns a finished tree into files, one per top-level compilation unit.
pub trait Renderer {
    /// Renders every compilation unit of the tree.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reference in the tree cannot be resolved.
    fn render(&self, root: &CodeRoot) -> Result<Vec<RenderedFile>>;
}

/// Writes rendered files below `dir`, creating directories as needed.
///
/// # Arguments
/// * `dir` - Output root
/// * `files` - Files to write
///
/// # Returns
/// The paths written, in input order.
///
/// # Errors
/// Returns `CodegenError::Io` if a directory or file cannot be written.
pub fn write_files(dir: &Path, files: &[RenderedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
        written.push(path);
    }
    info!(count = written.len(), dir = %dir.display(), "wrote generated files");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(directory: &str, name: &str) -> RenderedFile {
        RenderedFile {
            name: name.to_string(),
            file_name: format!("{name}.java"),
            directory: directory.to_string(),
            content: format!("class {name} {{}}\n"),
        }
    }

    #[test]
    fn test_relative_path_splits_directory() {
        let path = file("com/zoo", "Dog").relative_path();
        assert_eq!(path, Path::new("com").join("zoo").join("Dog.java"));
        assert_eq!(file("", "Dog").relative_path(), PathBuf::from("Dog.java"));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let files = vec![file("com/zoo", "Dog"), file("com/shop", "Shop")];

        let written = write_files(dir.path(), &files).expect("write");

        assert_eq!(written.len(), 2);
        let content = fs::read_to_string(dir.path().join("com/zoo/Dog.java")).expect("read");
        assert_eq!(content, "class Dog {}\n");
        assert!(dir.path().join("com/shop/Shop.java").is_file());
    }
}
