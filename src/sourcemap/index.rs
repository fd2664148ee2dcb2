use super::char_map::{CharEntry, CharacterMap};
use super::record::{MappingId, MappingRecord, MappingSlot};
use crate::logging;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A generated line reached from an original location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLocation {
    pub script: String,
    /// 1-based generated line.
    pub line: u32,
}

/// In-memory index for one generated script and its map file.
///
/// The structure is fixed once built; only individual mapping slots change,
/// from raw text to decoded records, the first time they are read.
#[derive(Debug)]
pub struct SourceMap {
    script: String,
    char_maps: Vec<CharacterMap>,
    file_lists: Vec<Vec<String>>,
    mappings: Vec<MappingSlot>,
    decode_failures: AtomicUsize,
}

impl SourceMap {
    pub(crate) fn new(
        script: String,
        char_maps: Vec<CharacterMap>,
        file_lists: Vec<Vec<String>>,
        mappings: Vec<MappingSlot>,
    ) -> Self {
        Self {
            script,
            char_maps,
            file_lists,
            mappings,
            decode_failures: AtomicUsize::new(0),
        }
    }

    /// URL of the generated script this map describes.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Number of generated lines declared in the header.
    pub fn line_count(&self) -> usize {
        self.char_maps.len()
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    /// Records that failed to decode so far and were replaced by empty ones.
    pub fn decode_failures(&self) -> usize {
        self.decode_failures.load(Ordering::Relaxed)
    }

    /// Whether the record with `id` has already been decoded.
    pub fn is_decoded(&self, id: MappingId) -> bool {
        self.mappings.get(id).is_some_and(MappingSlot::is_decoded)
    }

    /// Look up a record by id, decoding it on first access.
    pub fn resolve(&self, id: MappingId) -> Option<Arc<MappingRecord>> {
        let slot = self.mappings.get(id)?;
        let resolved = slot.resolve(id);
        if let Some(reason) = resolved.decode_error {
            self.decode_failures.fetch_add(1, Ordering::Relaxed);
            logging::log_record_decode_failed(&self.script, id, &reason);
        }
        Some(resolved.record)
    }

    fn resolve_entry(&self, entry: CharEntry) -> Option<Arc<MappingRecord>> {
        match entry {
            CharEntry::Mapping(id) => self.resolve(id),
            CharEntry::Repeat | CharEntry::Unmapped => None,
        }
    }

    /// Character map of a 1-based generated line.
    pub fn mappings_for_line(&self, line: u32) -> Option<&CharacterMap> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.char_maps.get(index)
    }

    /// Number of generated lines that carry at least one mapping.
    pub fn mapped_line_count(&self) -> usize {
        self.char_maps.iter().filter(|map| !map.is_empty()).count()
    }

    pub fn has_mapping(&self, line: u32) -> bool {
        self.mappings_for_line(line)
            .is_some_and(|map| !map.is_empty())
    }

    /// Record covering `offset` (0-based) on a 1-based generated line.
    pub fn mapping_at(&self, line: u32, offset: usize) -> Option<Arc<MappingRecord>> {
        let map = self.mappings_for_line(line)?;
        self.resolve_entry(map.resolve(offset)?)
    }

    /// Original files that contributed to a 1-based generated line.
    pub fn files_for_line(&self, line: u32) -> Option<&[String]> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.file_lists.get(index).map(Vec::as_slice)
    }

    /// Generated lines derived from `original_line` of `original_file`.
    ///
    /// One entry is produced per matching explicit character entry, so a
    /// line may appear more than once. Cost is proportional to the whole map.
    pub fn reverse_map(&self, original_file: &str, original_line: u32) -> Vec<GeneratedLocation> {
        let mut out = Vec::new();
        self.reverse_map_into(original_file, original_line, &mut out);
        out
    }

    /// Same as [`reverse_map`](Self::reverse_map), appending to `out`.
    pub fn reverse_map_into(
        &self,
        original_file: &str,
        original_line: u32,
        out: &mut Vec<GeneratedLocation>,
    ) {
        let before = out.len();

        for (index, files) in self.file_lists.iter().enumerate() {
            if !files.iter().any(|f| f == original_file) {
                continue;
            }
            let Some(char_map) = self.char_maps.get(index) else {
                continue;
            };
            let Ok(line) = u32::try_from(index + 1) else {
                break;
            };

            for (_, id) in char_map.explicit() {
                let Some(record) = self.resolve(id) else {
                    continue;
                };
                if record.original_line == Some(original_line) {
                    out.push(GeneratedLocation {
                        script: self.script.clone(),
                        line,
                    });
                }
            }
        }

        logging::log_reverse_query(&self.script, original_file, original_line, out.len() - before);
    }
}
