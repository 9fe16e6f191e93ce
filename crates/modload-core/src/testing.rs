//! Test helpers shared by unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, LoadResult};
use crate::host::ModuleHost;

/// Host over plain text files: the first line is the module name.
#[derive(Debug, Default)]
pub(crate) struct TextHost;

#[derive(Debug)]
pub(crate) struct TextModule {
    pub name: String,
    pub path: PathBuf,
}

impl ModuleHost for TextHost {
    type Module = TextModule;

    fn module_name(&self, path: &Path) -> LoadResult<String> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let name = content.lines().next().unwrap_or("").trim();
        if name.is_empty() {
            return Err(LoadError::MalformedModule {
                path: path.to_path_buf(),
                reason: "no module name".to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn load(&self, path: &Path) -> LoadResult<TextModule> {
        let name = self.module_name(path).map_err(|e| LoadError::ModuleLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(TextModule {
            name,
            path: path.to_path_buf(),
        })
    }
}

/// Write a module file declaring `name`, creating parent directories.
pub(crate) fn write_module(path: &Path, name: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("{name}\n")).unwrap();
}
