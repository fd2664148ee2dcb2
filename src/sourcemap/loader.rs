use super::index::SourceMap;
use crate::{logging, MappingError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of map-file contents, addressed by URL or path.
pub trait LineLoader {
    fn load_lines(&self, url: &str) -> Result<Vec<String>, MappingError>;
}

/// Reads plain paths and `file://` URLs from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsLoader {
    base_dir: Option<PathBuf>,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `base_dir` instead of the working directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn path_for(&self, url: &str) -> PathBuf {
        let raw = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(raw);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl LineLoader for FsLoader {
    fn load_lines(&self, url: &str) -> Result<Vec<String>, MappingError> {
        let path = self.path_for(url);
        let content = fs::read_to_string(&path).map_err(|e| {
            MappingError::FileError(format!("Failed to read map file {:?}: {}", path, e))
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

/// Serves map contents held in memory, such as maps embedded in a module.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<String, Vec<String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, content: &str) {
        self.files
            .insert(url.into(), content.lines().map(str::to_string).collect());
    }
}

impl LineLoader for MemoryLoader {
    fn load_lines(&self, url: &str) -> Result<Vec<String>, MappingError> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| MappingError::FileError(format!("No content registered for {}", url)))
    }
}

/// Load the map at `url` and build the index for `script`.
pub fn load_source_map(
    loader: &dyn LineLoader,
    url: &str,
    script: &str,
) -> Result<SourceMap, MappingError> {
    logging::log_loading_map(url);
    let lines = loader.load_lines(url)?;

    match SourceMap::build_from(&lines, script) {
        Ok(map) => {
            logging::log_map_parsed(url, map.line_count(), map.mapping_count());
            Ok(map)
        }
        Err(err) => {
            logging::log_parse_failed(url, &err);
            Err(err)
        }
    }
}
