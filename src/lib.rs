pub mod cli;
pub mod config;
pub mod debugger;
pub mod logging;
pub mod repl;
pub mod sourcemap;
pub mod ui;
use miette::Diagnostic;

pub use debugger::{Mapper, MapperRegistry};
pub use sourcemap::{MappingRecord, SourceMap};

/// Result type alias for the debugger
pub type Result<T> = miette::Result<T>;

/// Error types for the debugger
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum MappingError {
    #[error("Invalid line map: {0}")]
    #[diagnostic(
        code(mapping::format_error),
        help("Line maps start with '/** Begin line maps. **/{{\"count\": N}}' followed by the file information and mapping definition sections. Check that the file was produced by a compatible compiler.")
    )]
    Format(String),

    #[error("The line map is of an incompatible version: {0}")]
    #[diagnostic(
        code(mapping::incompatible_version),
        help("This map was written for a newer format. Please upgrade mapping-debug.")
    )]
    IncompatibleVersion(String),

    #[error("Failed to decode mapping {id}: {reason}")]
    #[diagnostic(
        code(mapping::decode_error),
        help("The mapping definition is not a valid array. Other mappings remain usable.")
    )]
    Decode { id: usize, reason: String },

    #[error("File operation failed: {0}")]
    #[diagnostic(
        code(mapping::file_error),
        help("Check if you have necessary permissions and that the path exists.")
    )]
    FileError(String),

    #[error("Settings error: {0}")]
    #[diagnostic(
        code(mapping::config_error),
        help("Fix or remove the settings file; it must be valid TOML.")
    )]
    ConfigError(String),

    #[error("Invalid query: {0}")]
    #[diagnostic(
        code(mapping::invalid_query),
        help("Lines are 1-based and offsets are 0-based character positions.")
    )]
    InvalidQuery(String),
}
