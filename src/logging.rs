//! Structured logging utilities for the mapping debugger.
//!
//! This module provides helper functions for consistent, structured
//! logging across the application using the `tracing` crate.

use crate::MappingError;

/// Log map loading event.
pub fn log_loading_map(url: &str) {
    tracing::info!(map = url, "Loading line map");
}

/// Log successful map parse.
pub fn log_map_parsed(url: &str, lines: usize, mappings: usize) {
    tracing::info!(map = url, lines, mappings, "Line map parsed");
}

/// Log a rejected map. Version mismatches are warnings, the rest errors.
pub fn log_parse_failed(url: &str, err: &MappingError) {
    match err {
        MappingError::IncompatibleVersion(_) => {
            tracing::warn!(map = url, error = %err, "Incompatible line map version")
        }
        _ => tracing::error!(map = url, error = %err, "Could not parse line map"),
    }
}

/// Log a mapping definition that could not be decoded.
pub fn log_record_decode_failed(script: &str, id: usize, reason: &str) {
    let err = MappingError::Decode {
        id,
        reason: reason.to_string(),
    };
    tracing::warn!(script, id, error = %err, "Error parsing mapping");
}

/// Log a reverse lookup.
pub fn log_reverse_query(script: &str, file: &str, line: u32, hits: usize) {
    tracing::debug!(script, file, line, hits, "Reverse mapping");
}

/// Log settings persisted to disk.
pub fn log_settings_saved(path: &str) {
    tracing::debug!(path, "Settings saved");
}

/// Log debugger interactive mode.
pub fn log_interactive_mode_start(map: &str) {
    tracing::info!(map, "Interactive debugger started");
}
