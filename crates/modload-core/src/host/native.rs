//! Native dynamic libraries as modules.
//!
//! A native module declares its name by exporting
//! `extern "C" fn modload_module_name() -> *const c_char`, normally through
//! [`declare_module!`](crate::declare_module):
//!
//! ```ignore
//! modload_core::declare_module!("Foo");
//! ```
//!
//! Reading the name opens the library, so any initialization code it carries
//! runs at that point.

#![allow(unsafe_code)]

use std::ffi::{c_char, CStr};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::debug;

use super::ModuleHost;
use crate::error::{LoadError, LoadResult};

/// Exported symbol returning the module's declared name.
pub const MODULE_NAME_SYMBOL: &[u8] = b"modload_module_name\0";

type ModuleNameFn = unsafe extern "C" fn() -> *const c_char;

/// Host for native dynamic libraries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

/// A native library loaded into the process.
///
/// The library stays loaded for as long as the handle lives.
#[derive(Debug)]
pub struct NativeModule {
    name: String,
    path: PathBuf,
    library: Library,
}

impl NativeModule {
    /// Declared module name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the module was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an exported symbol.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the exported symbol.
    pub unsafe fn symbol<T>(&self, symbol: &[u8]) -> LoadResult<Symbol<'_, T>> {
        self.library
            .get(symbol)
            .map_err(|e| LoadError::ModuleLoad {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

fn open(path: &Path) -> Result<Library, String> {
    if !path.is_file() {
        return Err("file does not exist".to_string());
    }
    // SAFETY: loading a library runs its initializers; module files are
    // trusted by whoever installed the package.
    unsafe { Library::new(path) }.map_err(|e| e.to_string())
}

fn declared_name(library: &Library, path: &Path) -> LoadResult<String> {
    let malformed = |reason: String| LoadError::MalformedModule {
        path: path.to_path_buf(),
        reason,
    };

    // SAFETY: the symbol type is fixed by the module naming convention.
    let name_fn: Symbol<'_, ModuleNameFn> = unsafe { library.get(MODULE_NAME_SYMBOL) }
        .map_err(|e| malformed(format!("missing module name export: {}", e)))?;

    // SAFETY: the export returns a pointer to a static NUL-terminated string.
    let ptr = unsafe { name_fn() };
    if ptr.is_null() {
        return Err(malformed("module name export returned null".to_string()));
    }

    // SAFETY: checked non-null above; the string lives as long as the library.
    let name = unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|e| malformed(format!("module name is not UTF-8: {}", e)))?
        .trim()
        .to_string();

    if name.is_empty() {
        return Err(malformed("module name is empty".to_string()));
    }

    Ok(name)
}

impl ModuleHost for NativeHost {
    type Module = NativeModule;

    fn module_name(&self, path: &Path) -> LoadResult<String> {
        let library = open(path).map_err(|reason| LoadError::MalformedModule {
            path: path.to_path_buf(),
            reason,
        })?;
        declared_name(&library, path)
    }

    fn load(&self, path: &Path) -> LoadResult<NativeModule> {
        let library = open(path).map_err(|reason| LoadError::ModuleLoad {
            path: path.to_path_buf(),
            reason,
        })?;
        let name = declared_name(&library, path)?;

        debug!(name = %name, path = %path.display(), "loaded native module");

        Ok(NativeModule {
            name,
            path: path.to_path_buf(),
            library,
        })
    }
}
