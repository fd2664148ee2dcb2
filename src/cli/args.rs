use crate::config::Settings;
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapping-debug")]
#[command(about = "Inspect generated scripts through their line maps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file (defaults to .mapping-debug.toml or the user config directory)
    #[arg(long, global = true, env = "MAPPING_DEBUG_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            return Verbosity::Quiet;
        }
        match self.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn to_log_level(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a line map and report what it covers
    Check(CheckArgs),

    /// Show the original position behind a generated line and offset
    Lookup(LookupArgs),

    /// List the original files that produced a generated line
    Files(FilesArgs),

    /// Find the generated lines that came from an original file and line
    Reverse(ReverseArgs),

    /// Convert a compiler-mangled identifier into its readable form
    Name(NameArgs),

    /// Start an interactive session over a line map
    Interactive(InteractiveArgs),

    /// Manage per-script settings
    #[command(subcommand)]
    Context(ContextCommand),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Arguments shared by commands that read a single map.
#[derive(Args, Clone)]
pub struct MapArgs {
    /// Path to the line map file (defaults to the map stored for --script)
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// URL of the generated script the map describes (defaults to the map path)
    #[arg(long, required_unless_present = "map")]
    pub script: Option<String>,
}

impl MapArgs {
    pub fn script(&self) -> Option<String> {
        self.script
            .clone()
            .or_else(|| self.map.as_ref().map(|map| map.to_string_lossy().into_owned()))
    }
}

#[derive(Args, Clone, Default)]
pub struct OutputArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    /// Apply the default output format from settings.
    pub fn merge_settings(&mut self, settings: &Settings) {
        if settings.output.format.as_deref() == Some("json") {
            self.json = true;
        }
    }
}

#[derive(Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub map: MapArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct LookupArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Generated line (1-based)
    #[arg(short, long)]
    pub line: u32,

    /// Character offset within the line (0-based)
    #[arg(short, long, default_value_t = 0)]
    pub offset: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct FilesArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Generated line (1-based)
    #[arg(short, long)]
    pub line: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct ReverseArgs {
    /// Line map files to search (repeatable); each map's path names its script
    #[arg(short, long, required = true)]
    pub map: Vec<PathBuf>,

    /// Original source file, as written in the map
    #[arg(short, long)]
    pub file: String,

    /// Line in the original file (1-based)
    #[arg(short, long)]
    pub line: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct NameArgs {
    /// Identifier as it appears in the generated code
    pub value: String,

    /// The name is a key in an object literal
    #[arg(long)]
    pub property: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub map: MapArgs,
}

#[derive(Subcommand)]
pub enum ContextCommand {
    /// Store the line map and/or source root for a script
    Set(ContextSetArgs),

    /// Show the stored settings for a script
    Show(ContextUrlArgs),

    /// Forget the stored line map for a script
    Clear(ContextUrlArgs),
}

#[derive(Parser)]
pub struct ContextUrlArgs {
    /// URL of the generated script or page
    #[arg(short, long)]
    pub url: String,
}

#[derive(Parser)]
pub struct ContextSetArgs {
    /// URL of the generated script or page
    #[arg(short, long)]
    pub url: String,

    /// Line map to load for this script
    #[arg(long)]
    pub source_map: Option<String>,

    /// Root folder of the original sources
    #[arg(long)]
    pub root_path: Option<String>,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
