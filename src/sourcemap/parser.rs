//! Parser for the sectioned line-map format.
//!
//! ```text
//! /** Begin line maps. **/{ "file" : "out.js", "count": 2 }
//! [0,,,,1]
//! [2]
//! /** Begin file information. **/
//! ["a.js"]
//! ["a.js","b.js"]
//! /** Begin mapping definitions. **/
//! ["a.js", 1, 0]
//! ["a.js", 2, 4, "render"]
//! ["b.js", 9, 2]
//! ```

use super::char_map::CharacterMap;
use super::index::SourceMap;
use super::record::MappingSlot;
use crate::MappingError;
use serde_json::Value;

pub const LINE_MAPS_HEADER: &str = "/** Begin line maps. **/";
pub const FILE_INFO_HEADER: &str = "/** Begin file information. **/";
pub const MAPPING_DEFS_HEADER: &str = "/** Begin mapping definitions. **/";

/// Minimum number of lines: header plus the two section markers and at
/// least one more line.
const MIN_LINES: usize = 4;

struct Cursor<'a, S> {
    lines: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> Cursor<'a, S> {
    fn next_trimmed(&mut self, section: &str) -> Result<&'a str, MappingError> {
        let line = self.lines.get(self.pos).ok_or_else(|| {
            MappingError::Format(format!(
                "unexpected end of file in {} (line {})",
                section,
                self.pos + 1
            ))
        })?;
        self.pos += 1;
        Ok(line.as_ref().trim())
    }

    fn expect_marker(&mut self, marker: &str) -> Result<(), MappingError> {
        let line = self.next_trimmed(marker)?;
        if line != marker {
            return Err(MappingError::Format(format!(
                "expected '{}' on line {}, found '{}'",
                marker, self.pos, line
            )));
        }
        Ok(())
    }

    fn remaining(&self) -> &'a [S] {
        &self.lines[self.pos.min(self.lines.len())..]
    }
}

/// Read the declared generated-line count from the header line.
fn parse_header(first: &str) -> Result<usize, MappingError> {
    let line = first.trim();

    if !line.starts_with(LINE_MAPS_HEADER) {
        if line.contains("source map") {
            return Err(MappingError::IncompatibleVersion(line.to_string()));
        }
        return Err(MappingError::Format(format!(
            "missing '{}' header",
            LINE_MAPS_HEADER
        )));
    }

    let payload = line[LINE_MAPS_HEADER.len()..].trim();
    if !payload.starts_with('{') {
        return Err(MappingError::Format(
            "header carries no object payload".to_string(),
        ));
    }

    let header: Value = serde_json::from_str(payload)
        .map_err(|e| MappingError::Format(format!("undecodable header payload: {}", e)))?;

    let count = header
        .get("count")
        .ok_or_else(|| MappingError::Format("header payload has no 'count'".to_string()))?;

    count
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            MappingError::Format(format!(
                "'count' must be a non-negative integer, got {}",
                count
            ))
        })
}

/// Parse `count` data lines of one section with `decode`.
fn parse_section<S, T, F>(
    cursor: &mut Cursor<'_, S>,
    count: usize,
    section: &str,
    decode: F,
) -> Result<Vec<T>, MappingError>
where
    S: AsRef<str>,
    T: Default,
    F: Fn(&str) -> Result<T, String>,
{
    let mut out = Vec::with_capacity(count.min(cursor.remaining().len()));
    for _ in 0..count {
        let line = cursor.next_trimmed(section)?;
        let line_no = cursor.pos;

        if line.is_empty() {
            out.push(T::default());
            continue;
        }
        if line.contains("/*") {
            return Err(MappingError::Format(format!(
                "unexpected comment on line {} in {}",
                line_no, section
            )));
        }

        let value = decode(line).map_err(|reason| {
            MappingError::Format(format!("malformed line {} in {}: {}", line_no, section, reason))
        })?;
        out.push(value);
    }
    Ok(out)
}

fn decode_file_list(line: &str) -> Result<Vec<String>, String> {
    serde_json::from_str(line).map_err(|e| e.to_string())
}

impl SourceMap {
    /// Build an index from the lines of a map file. Either the whole file
    /// parses or an error is returned; no partial index is ever produced.
    pub fn build_from<S: AsRef<str>>(
        lines: &[S],
        script: impl Into<String>,
    ) -> Result<SourceMap, MappingError> {
        if lines.len() < MIN_LINES {
            return Err(MappingError::Format(format!(
                "expected at least {} lines, found {}",
                MIN_LINES,
                lines.len()
            )));
        }

        let count = parse_header(lines[0].as_ref())?;
        // Header, both section markers and two sections of `count` lines.
        let available = (lines.len() - 3) / 2;
        if count > available {
            return Err(MappingError::Format(format!(
                "header declares {} generated lines but the file only has room for {}",
                count, available
            )));
        }
        let mut cursor = Cursor { lines, pos: 1 };

        let char_maps = parse_section(&mut cursor, count, "line maps", CharacterMap::parse)?;
        cursor.expect_marker(FILE_INFO_HEADER)?;
        let file_lists = parse_section(&mut cursor, count, "file information", decode_file_list)?;
        cursor.expect_marker(MAPPING_DEFS_HEADER)?;

        let mappings = cursor
            .remaining()
            .iter()
            .map(|line| MappingSlot::raw(line.as_ref().trim()))
            .collect();

        Ok(SourceMap::new(script.into(), char_maps, file_lists, mappings))
    }
}
