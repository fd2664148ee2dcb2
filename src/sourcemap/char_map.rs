//! Sparse per-line character maps.
//!
//! Each generated line carries an array indexed by character offset. An
//! explicit entry names a mapping id (or `-1` for "no mapping"); an elided
//! entry repeats whatever the nearest lower explicit entry says.

use super::record::MappingId;
use serde::Serialize;

/// One slot of a character map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharEntry {
    /// Same mapping as the nearest lower explicit entry.
    Repeat,
    /// Explicitly unmapped.
    Unmapped,
    Mapping(MappingId),
}

impl CharEntry {
    pub fn is_explicit(&self) -> bool {
        !matches!(self, CharEntry::Repeat)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CharacterMap {
    entries: Vec<CharEntry>,
}

impl CharacterMap {
    pub fn new(entries: Vec<CharEntry>) -> Self {
        Self { entries }
    }

    /// Parse an array literal such as `[0,,,1,-1]`. Empty elements and
    /// `null` are "repeat previous".
    pub fn parse(literal: &str) -> Result<Self, String> {
        let inner = literal
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| format!("expected an array literal, got '{}'", literal))?;

        if inner.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut parts: Vec<&str> = inner.split(',').collect();
        // `[1,2,]` has two elements, like an array literal with a trailing comma.
        if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
            parts.pop();
        }

        let entries = parts
            .into_iter()
            .map(|part| parse_entry(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CharEntry] {
        &self.entries
    }

    pub fn get(&self, offset: usize) -> Option<CharEntry> {
        self.entries.get(offset).copied()
    }

    /// Walk backwards from `offset` to the nearest explicit entry. Offsets
    /// past the end resolve against the last explicit entry of the line.
    pub fn resolve(&self, offset: usize) -> Option<CharEntry> {
        let start = offset.min(self.entries.len().checked_sub(1)?);
        self.entries[..=start]
            .iter()
            .rev()
            .find(|entry| entry.is_explicit())
            .copied()
    }

    /// Explicit entries with their offsets, in ascending order.
    pub fn explicit(&self) -> impl Iterator<Item = (usize, MappingId)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(offset, entry)| match entry {
                CharEntry::Mapping(id) => Some((offset, *id)),
                _ => None,
            })
    }
}

fn parse_entry(token: &str) -> Result<CharEntry, String> {
    if token.is_empty() || token == "null" || token == "undefined" {
        return Ok(CharEntry::Repeat);
    }

    let value = match token.parse::<i64>() {
        Ok(value) => value,
        Err(_) => integral_float(token).ok_or_else(|| format!("invalid mapping id '{}'", token))?,
    };

    if value < 0 {
        Ok(CharEntry::Unmapped)
    } else {
        usize::try_from(value)
            .map(CharEntry::Mapping)
            .map_err(|_| format!("mapping id {} out of range", value))
    }
}

/// Numbers such as `1.0` or `1e0` name an integer id.
fn integral_float(token: &str) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    let value: f64 = token.parse().ok()?;
    let exact = value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT;
    exact.then_some(value as i64)
}
