//! Compiler-facing module references.

use std::fmt;
use std::path::{Path, PathBuf};

/// Turns a module path into whatever reference type the compiler consumes.
pub trait ReferenceFactory {
    type Reference;

    fn file_reference(&self, path: &Path) -> Self::Reference;
}

/// Reference to a module file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference {
    path: PathBuf,
}

impl FileReference {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file:{}", self.path.display())
    }
}

/// Default factory producing [`FileReference`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReferences;

impl ReferenceFactory for FileReferences {
    type Reference = FileReference;

    fn file_reference(&self, path: &Path) -> FileReference {
        FileReference::new(path)
    }
}
