/// REPL command execution
///
/// Runs queries against the loaded line map and renders their results.
use super::ReplConfig;
use crate::debugger::convert_name;
use crate::sourcemap::SourceMap;
use crate::ui::formatter::Formatter;

/// Executor for REPL commands
pub struct ReplExecutor {
    map: SourceMap,
}

impl ReplExecutor {
    /// Create a new REPL executor
    pub fn new(config: ReplConfig) -> Self {
        ReplExecutor { map: config.map }
    }

    pub fn map(&self) -> &SourceMap {
        &self.map
    }

    pub fn lookup(&self, line: u32, offset: usize) -> String {
        match self.map.mapping_at(line, offset) {
            Some(record) => {
                let mut out = Formatter::format_record(&record);
                if let Some(name) = record.symbol_name() {
                    let converted = convert_name(name, false);
                    out.push_str(&format!(
                        "\n  original name: {}",
                        Formatter::format_converted_name(&converted)
                    ));
                }
                out
            }
            None => format!("No mapping for line {} offset {}", line, offset),
        }
    }

    pub fn line(&self, line: u32) -> String {
        match self.map.mappings_for_line(line) {
            Some(map) => format!("{:>5}: {}", line, Formatter::format_char_map(map)),
            None => format!("Line {} is outside the map", line),
        }
    }

    pub fn files(&self, line: u32) -> String {
        match self.map.files_for_line(line) {
            Some(files) if !files.is_empty() => files.join("\n"),
            Some(_) => format!("Line {} has no original files", line),
            None => format!("Line {} is outside the map", line),
        }
    }

    pub fn reverse(&self, file: &str, line: u32) -> String {
        let hits = self.map.reverse_map(file, line);
        if hits.is_empty() {
            return format!("No generated lines for {}:{}", file, line);
        }
        hits.iter()
            .map(Formatter::format_location)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn name(&self, value: &str, property: bool) -> String {
        Formatter::format_converted_name(&convert_name(value, property))
    }

    pub fn info(&self) -> String {
        let mut out = Formatter::format_map_summary(&self.map);
        let failures = self.map.decode_failures();
        if failures > 0 {
            out.push_str(&format!("\n  undecodable mappings: {}", failures));
        }
        out
    }
}
