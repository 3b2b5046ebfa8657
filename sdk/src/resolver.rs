use std::{
    fs,
    path::{Path, PathBuf},
};

use brine_fbs_compiler::{
    compile_schema_with, error::FbsError, parse_schema_with, types::Schema, IncludeResolver,
};
use tracing::{debug, warn};

/// Loads included schemas from disk.
///
/// Include paths are taken relative to the file that contains the include,
/// falling back to the configured search directories. A file that is still
/// being loaded further up the include chain is not entered again.
#[derive(Debug, Default)]
pub struct FileResolver {
    search_dirs: Vec<PathBuf>,
    loading:     Vec<PathBuf>,
}

impl FileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory consulted when an include is not found next to the
    /// including file.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    fn locate(&self, path: &str) -> Option<PathBuf> {
        let current_dir = self.loading.last().and_then(|p| p.parent());
        current_dir
            .into_iter()
            .chain(self.search_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(path))
            .chain(std::iter::once(PathBuf::from(path)))
            .find(|candidate| candidate.is_file())
            .and_then(|found| found.canonicalize().ok())
    }

    /// Strictly parses the root schema at `path`; its includes are loaded
    /// through `self`.
    pub fn compile_root(&mut self, path: &Path) -> Result<Schema, FbsError> {
        if !path.is_file() {
            return Err(FbsError::IncludeError(format!("{} is not a schema file", path.display())));
        }
        let path = path.canonicalize()?;
        let text = fs::read_to_string(&path)?;
        self.loading.push(path);
        let result = compile_schema_with(&text, self);
        self.loading.pop();
        result
    }

    /// Parses an included file. Bytes after the last recognised declaration
    /// are ignored.
    fn load(&mut self, path: &Path) -> Option<Schema> {
        let text = match fs::read(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read schema");
                return None;
            }
        };
        self.loading.push(path.to_path_buf());
        let parsed = parse_schema_with(&text, self);
        self.loading.pop();
        parsed.map(|(schema, _)| schema)
    }
}

impl IncludeResolver for FileResolver {
    fn resolve(&mut self, path: &str) -> Option<Schema> {
        let Some(found) = self.locate(path) else {
            warn!(include = path, "include not found");
            return None;
        };
        if self.loading.contains(&found) {
            warn!(include = %found.display(), "include cycle, skipping");
            return None;
        }
        debug!(include = %found.display(), "loading include");
        self.load(&found)
    }
}
