use crate::config::{ContextKey, Settings};
use crate::sourcemap::{load_source_map, GeneratedLocation, LineLoader, MappingRecord, SourceMap};
use crate::MappingError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where a generated position comes from in the original sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginalLocation {
    pub path: PathBuf,
    pub line: Option<u32>,
}

/// A single compiled script with at most one loaded line map.
#[derive(Debug)]
pub struct CompilerContext {
    url: String,
    source_map: Option<SourceMap>,
}

impl CompilerContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_map: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// Reload the map remembered in settings. `Ok(false)` when no map is
    /// recorded for this context.
    pub fn restore(
        &mut self,
        loader: &dyn LineLoader,
        settings: &mut Settings,
    ) -> Result<bool, MappingError> {
        let Some(path) = settings
            .get_for_context(&self.url, ContextKey::SourceMap)
            .map(str::to_string)
        else {
            return Ok(false);
        };

        match self.load_source_map(loader, settings, &path) {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(context = %self.url, map = %path, "Could not restore line map: {}", e);
                Err(e)
            }
        }
    }

    /// Load and parse the map at `path`, replacing any previous one, and
    /// remember the path for this context. If the file cannot be read the
    /// old map stays; if it reads but does not parse, no map is left loaded.
    pub fn load_source_map(
        &mut self,
        loader: &dyn LineLoader,
        settings: &mut Settings,
        path: &str,
    ) -> Result<&SourceMap, MappingError> {
        match load_source_map(loader, path, &self.url) {
            Ok(map) => {
                settings.set_for_context(&self.url, ContextKey::SourceMap, Some(path.to_string()));
                Ok(self.source_map.insert(map))
            }
            Err(e @ MappingError::FileError(_)) => Err(e),
            Err(e) => {
                self.source_map = None;
                Err(e)
            }
        }
    }

    /// The loaded map, consuming the context.
    pub fn into_source_map(self) -> Option<SourceMap> {
        self.source_map
    }

    /// Drop the loaded map and forget it in settings. Returns whether the
    /// settings changed.
    pub fn clear_source_map(&mut self, settings: &mut Settings) -> bool {
        self.source_map = None;
        settings.set_for_context(&self.url, ContextKey::SourceMap, None)
    }

    pub fn root_path(&self, settings: &Settings) -> Option<PathBuf> {
        settings
            .get_for_context(&self.url, ContextKey::RootPath)
            .map(PathBuf::from)
    }

    pub fn mapping_at(&self, line: u32, offset: usize) -> Option<Arc<MappingRecord>> {
        self.source_map.as_ref()?.mapping_at(line, offset)
    }

    /// Original file and line for a generated position, resolved against the
    /// context's root path. `Ok(None)` when the position is unmapped or the
    /// code was added by the compiler.
    pub fn original_location(
        &self,
        settings: &Settings,
        line: u32,
        offset: usize,
    ) -> Result<Option<OriginalLocation>, MappingError> {
        let Some(record) = self.mapping_at(line, offset) else {
            return Ok(None);
        };
        let Some(file) = record.original_file.as_deref() else {
            return Ok(None);
        };
        let root = self.root_path(settings).ok_or_else(|| {
            MappingError::FileError(
                "Cannot open source file as the root path is unknown".to_string(),
            )
        })?;

        Ok(Some(OriginalLocation {
            path: root.join(file),
            line: record.original_line,
        }))
    }
}

/// A page made of several generated scripts, each with its own map.
#[derive(Debug, Default)]
pub struct ModuleContext {
    maps: Vec<(String, Option<SourceMap>)>,
}

impl ModuleContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script and its map contents. A map that fails to parse is
    /// recorded as absent. Returns whether the map parsed.
    pub fn add_module<S: AsRef<str>>(&mut self, script: impl Into<String>, lines: &[S]) -> bool {
        let script = script.into();
        let map = match SourceMap::build_from(lines, script.clone()) {
            Ok(map) => Some(map),
            Err(e) => {
                warn!(script = %script, "Ignoring line map: {}", e);
                None
            }
        };
        self.insert(script, map)
    }

    /// Register a script whose map lives at `url`.
    pub fn add_module_from(
        &mut self,
        loader: &dyn LineLoader,
        script: impl Into<String>,
        url: &str,
    ) -> bool {
        let script = script.into();
        let map = load_source_map(loader, url, &script).ok();
        self.insert(script, map)
    }

    fn insert(&mut self, script: String, map: Option<SourceMap>) -> bool {
        let loaded = map.is_some();
        match self.maps.iter_mut().find(|(name, _)| *name == script) {
            Some(entry) => entry.1 = map,
            None => self.maps.push((script, map)),
        }
        loaded
    }

    pub fn scripts(&self) -> impl Iterator<Item = &str> {
        self.maps.iter().map(|(script, _)| script.as_str())
    }

    pub fn find_source_map_for_script(&self, script: &str) -> Option<&SourceMap> {
        self.maps
            .iter()
            .find(|(name, _)| name == script)
            .and_then(|(_, map)| map.as_ref())
    }

    /// Reverse lookup across every loaded map, in registration order.
    pub fn generated_lines_for(&self, file: &str, line: u32) -> Vec<GeneratedLocation> {
        let mut out = Vec::new();
        for (_, map) in &self.maps {
            if let Some(map) = map {
                map.reverse_map_into(file, line, &mut out);
            }
        }
        debug!(file, line, hits = out.len(), "Generated lines collected");
        out
    }
}
