//! Module hosts.
//!
//! A host knows what a module file is: how to read the name a module declares
//! for itself, and how to bring the file into the running process.
//!
//! Both operations touch real files, so their failures are errors that
//! propagate to the caller (a malformed file, a file that cannot be loaded).

mod declare;
#[cfg(feature = "native")]
mod native;

use std::path::Path;

use crate::error::LoadResult;

#[cfg(feature = "native")]
pub use native::{NativeHost, NativeModule, MODULE_NAME_SYMBOL};

/// Reads and loads module files.
pub trait ModuleHost {
    /// Handle to a module loaded into the process.
    type Module;

    /// Name the module at `path` declares for itself.
    fn module_name(&self, path: &Path) -> LoadResult<String>;

    /// Load the module at `path`.
    fn load(&self, path: &Path) -> LoadResult<Self::Module>;
}

impl<T: ModuleHost + ?Sized> ModuleHost for &T {
    type Module = T::Module;

    fn module_name(&self, path: &Path) -> LoadResult<String> {
        (**self).module_name(path)
    }

    fn load(&self, path: &Path) -> LoadResult<Self::Module> {
        (**self).load(path)
    }
}
