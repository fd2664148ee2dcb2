use super::context::{CompilerContext, ModuleContext};
use super::names::{convert_name, ConvertedName};
use crate::config::Settings;
use crate::sourcemap::{GeneratedLocation, MappingRecord, SourceMap};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// A generated position resolved to its mapping record.
#[derive(Debug, Clone, Serialize)]
pub struct MappedSource {
    pub record: Arc<MappingRecord>,
    /// Original file on disk, when the root of the sources is known.
    pub path: Option<PathBuf>,
    /// Why the original file could not be located.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_error: Option<String>,
}

/// A mapping capability for one kind of generated code.
#[derive(Debug)]
pub enum Mapper {
    /// Output of a whole-program compiler: one script, one map.
    Compiler(CompilerContext),
    /// Separately compiled modules, each script with its own map.
    Modules(ModuleContext),
}

impl Mapper {
    fn map_for(&self, script: &str) -> Option<&SourceMap> {
        match self {
            Mapper::Compiler(ctx) if ctx.url() == script => ctx.source_map(),
            Mapper::Compiler(_) => None,
            Mapper::Modules(modules) => modules.find_source_map_for_script(script),
        }
    }

    pub fn can_map(&self, script: &str, line: u32) -> bool {
        self.map_for(script)
            .is_some_and(|map| map.has_mapping(line))
    }

    pub fn mapped_source(
        &self,
        settings: &Settings,
        script: &str,
        line: u32,
        offset: usize,
    ) -> Option<MappedSource> {
        let record = self.map_for(script)?.mapping_at(line, offset)?;
        let (path, path_error) = match self {
            Mapper::Compiler(ctx) => match ctx.original_location(settings, line, offset) {
                Ok(location) => (location.map(|loc| loc.path), None),
                Err(e) => (None, Some(e.to_string())),
            },
            Mapper::Modules(_) => (record.original_file.as_deref().map(PathBuf::from), None),
        };
        Some(MappedSource {
            record,
            path,
            path_error,
        })
    }

    /// Original symbol name at a generated position, if the map carries one.
    pub fn mapped_name(&self, script: &str, line: u32, offset: usize) -> Option<String> {
        if !self.can_map(script, line) {
            return None;
        }
        let record = self.map_for(script)?.mapping_at(line, offset)?;
        record.symbol_name().map(str::to_string)
    }

    /// Only compiler output carries mangled names worth rewriting.
    pub fn convert_name(&self, value: &str, in_property_list: bool) -> Option<ConvertedName> {
        match self {
            Mapper::Compiler(_) => Some(convert_name(value, in_property_list)),
            Mapper::Modules(_) => None,
        }
    }

    pub fn generated_lines_for(&self, file: &str, line: u32) -> Vec<GeneratedLocation> {
        match self {
            Mapper::Compiler(ctx) => ctx
                .source_map()
                .map(|map| map.reverse_map(file, line))
                .unwrap_or_default(),
            Mapper::Modules(modules) => modules.generated_lines_for(file, line),
        }
    }
}

/// Mappers probed in registration order; the first answer wins.
#[derive(Debug, Default)]
pub struct MapperRegistry {
    mappers: Vec<Mapper>,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, mapper: Mapper) {
        self.mappers.push(mapper);
    }

    pub fn mappers(&self) -> &[Mapper] {
        &self.mappers
    }

    /// First non-empty result of `probe` across the registered mappers.
    pub fn first_match<T>(&self, probe: impl FnMut(&Mapper) -> Option<T>) -> Option<T> {
        self.mappers.iter().find_map(probe)
    }

    pub fn can_map(&self, script: &str, line: u32) -> bool {
        self.mappers.iter().any(|m| m.can_map(script, line))
    }

    pub fn mapped_source(
        &self,
        settings: &Settings,
        script: &str,
        line: u32,
        offset: usize,
    ) -> Option<MappedSource> {
        self.first_match(|m| m.mapped_source(settings, script, line, offset))
    }

    pub fn mapped_name(&self, script: &str, line: u32, offset: usize) -> Option<String> {
        self.first_match(|m| m.mapped_name(script, line, offset))
    }

    /// Converted display name; unchanged when no mapper rewrites it.
    pub fn convert_name(&self, value: &str, in_property_list: bool) -> ConvertedName {
        self.first_match(|m| m.convert_name(value, in_property_list))
            .unwrap_or_else(|| ConvertedName {
                value: value.to_string(),
                style: super::names::NameStyle::Default,
            })
    }

    /// Reverse lookups from every mapper, concatenated in registration order.
    pub fn generated_lines_for(&self, file: &str, line: u32) -> Vec<GeneratedLocation> {
        self.mappers
            .iter()
            .flat_map(|m| m.generated_lines_for(file, line))
            .collect()
    }
}
