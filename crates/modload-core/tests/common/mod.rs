//! Shared fixtures for loader integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use modload_core::{LoadError, LoadResult, ModuleHost, MANIFEST_NAME};

/// Host over plain text module files: the first line is the declared name.
#[derive(Debug, Default)]
pub struct TextHost;

#[derive(Debug)]
pub struct TextModule {
    pub name: String,
    pub path: PathBuf,
}

impl ModuleHost for TextHost {
    type Module = TextModule;

    fn module_name(&self, path: &Path) -> LoadResult<String> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::ModuleLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        match content.lines().next().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(LoadError::MalformedModule {
                path: path.to_path_buf(),
                reason: "no module name".to_string(),
            }),
        }
    }

    fn load(&self, path: &Path) -> LoadResult<TextModule> {
        Ok(TextModule {
            name: self.module_name(path)?,
            path: path.to_path_buf(),
        })
    }
}

/// Install a package directory with the given manifest.
pub fn install(root: &Path, dir: &str, manifest: &str) -> PathBuf {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).expect("create package dir");
    fs::write(dir.join(MANIFEST_NAME), manifest).expect("write manifest");
    dir
}

/// Write a module file declaring `name`.
pub fn write_module(path: &Path, name: &str) {
    fs::create_dir_all(path.parent().expect("module parent")).expect("create module dir");
    fs::write(path, format!("{name}\n")).expect("write module");
}
