pub mod args;
pub mod commands;
pub mod output;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, ContextCommand, FilesArgs, InteractiveArgs,
    LookupArgs, MapArgs, NameArgs, OutputArgs, ReverseArgs, Verbosity,
};
