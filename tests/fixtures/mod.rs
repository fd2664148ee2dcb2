//! Test fixture utilities for line maps.
//!
//! Map files live under `tests/fixtures/maps`; `map_text` builds small maps
//! inline for tests that need a specific shape.

#![allow(dead_code)]

use std::path::PathBuf;

/// Get the path to a fixture map file
///
/// # Panics
/// Panics if the fixture file doesn't exist.
pub fn fixture_path(name: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("maps")
        .join(format!("{}.map", name));

    if !path.exists() {
        panic!("Fixture '{}' not found at {}", name, path.display());
    }
    path
}

/// Read a fixture map as lines.
pub fn fixture_lines(name: &str) -> Vec<String> {
    std::fs::read_to_string(fixture_path(name))
        .expect("Failed to read fixture")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assemble a map file from its three sections. `char_maps` and `files`
/// must have the same length.
pub fn map_text(char_maps: &[&str], files: &[&str], mappings: &[&str]) -> Vec<String> {
    assert_eq!(char_maps.len(), files.len(), "sections must have equal length");

    let mut lines = vec![format!(
        "/** Begin line maps. **/{{ \"file\": \"out.js\", \"count\": {} }}",
        char_maps.len()
    )];
    lines.extend(char_maps.iter().map(|s| s.to_string()));
    lines.push("/** Begin file information. **/".to_string());
    lines.extend(files.iter().map(|s| s.to_string()));
    lines.push("/** Begin mapping definitions. **/".to_string());
    lines.extend(mappings.iter().map(|s| s.to_string()));
    lines
}
