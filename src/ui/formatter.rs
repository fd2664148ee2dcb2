use crate::debugger::{ConvertedName, NameStyle};
use crate::sourcemap::{CharEntry, CharacterMap, GeneratedLocation, MappingRecord, SourceMap};
use crossterm::style::Stylize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pretty printing utilities for debugger output
pub struct Formatter;

impl Formatter {
    /// Format a mapping record as `file:line[:column]`, plus the symbol name.
    pub fn format_record(record: &MappingRecord) -> String {
        if record.decode_failed {
            return format!("#{} <undecodable mapping>", record.id);
        }
        if record.is_empty() {
            return format!("#{} <no original position>", record.id);
        }

        let file = record.original_file.as_deref().unwrap_or("<added code>");
        let mut out = format!("#{} {}", record.id, file);
        if let Some(line) = record.original_line {
            out.push_str(&format!(":{}", line));
            if let Some(column) = record.original_column {
                out.push_str(&format!(":{}", column));
            }
        }
        if let Some(name) = record.symbol_name() {
            out.push_str(&format!(" ({})", name));
        }
        out
    }

    /// Format a generated location.
    pub fn format_location(location: &GeneratedLocation) -> String {
        format!("{}:{}", location.script, location.line)
    }

    /// Format a character map with `.` for repeated and `-` for unmapped slots.
    pub fn format_char_map(map: &CharacterMap) -> String {
        if map.is_empty() {
            return "<no mappings>".to_string();
        }
        map.entries()
            .iter()
            .map(|entry| match entry {
                CharEntry::Repeat => ".".to_string(),
                CharEntry::Unmapped => "-".to_string(),
                CharEntry::Mapping(id) => id.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format a summary of a parsed map.
    pub fn format_map_summary(map: &SourceMap) -> String {
        format!(
            "Line map for {}\n  generated lines: {}\n  mapped lines: {}\n  mapping definitions: {}",
            map.script(),
            map.line_count(),
            map.mapped_line_count(),
            map.mapping_count()
        )
    }

    /// Format a converted identifier with its display style.
    pub fn format_converted_name(name: &ConvertedName) -> String {
        let style = match name.style {
            NameStyle::Default => "name",
            NameStyle::Atom => "atom",
            NameStyle::String => "string",
            NameStyle::Keyword => "keyword",
        };
        format!("{} [{}]", name.value, style)
    }

    /// Format an informational message in blue.
    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    /// Format a success message in green.
    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    /// Format a warning message in yellow.
    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    /// Format an error message in red.
    pub fn error(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Error)
    }

    /// Configure whether ANSI colors are enabled.
    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Auto-configure color output based on environment.
    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
            ColorKind::Error => format!("{}", message.red()),
        }
    }
}

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
    Error,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);
