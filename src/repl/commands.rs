/// REPL command parsing and representation
///
/// Parses user input into structured REPL commands. Arguments are split
/// shell-style so that quoted file names may contain spaces.
use crate::Result;

/// Represents a REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Forward lookup: lookup <line> [offset]
    Lookup { line: u32, offset: usize },
    /// Character map of a line: line <line>
    Line { line: u32 },
    /// Original files of a line: files <line>
    Files { line: u32 },
    /// Reverse lookup: reverse <file> <line>
    Reverse { file: String, line: u32 },
    /// Name conversion: name <value> [--property]
    Name { value: String, property: bool },
    /// Map summary: info
    Info,
    /// Show command history: history
    History,
    /// Clear screen: clear
    Clear,
    /// Show help: help
    Help,
    /// Exit REPL: exit
    Exit,
}

fn parse_line(token: Option<&String>, command: &str) -> Result<u32> {
    let token = token.ok_or_else(|| miette::miette!("{} requires a line number", command))?;
    let line: u32 = token
        .parse()
        .map_err(|_| miette::miette!("Invalid line number: '{}'", token))?;
    if line == 0 {
        return Err(miette::miette!("Line numbers start at 1"));
    }
    Ok(line)
}

impl ReplCommand {
    /// Parse a command string into a ReplCommand
    pub fn parse(input: &str) -> Result<Self> {
        let parts = shlex::split(input.trim())
            .ok_or_else(|| miette::miette!("Unbalanced quotes in command"))?;

        let Some(command) = parts.first() else {
            return Err(miette::miette!("Empty command"));
        };

        match command.as_str() {
            "lookup" | "l" => {
                let line = parse_line(parts.get(1), "lookup")?;
                let offset = match parts.get(2) {
                    Some(token) => token
                        .parse()
                        .map_err(|_| miette::miette!("Invalid offset: '{}'", token))?,
                    None => 0,
                };
                Ok(ReplCommand::Lookup { line, offset })
            }
            "line" => Ok(ReplCommand::Line {
                line: parse_line(parts.get(1), "line")?,
            }),
            "files" | "f" => Ok(ReplCommand::Files {
                line: parse_line(parts.get(1), "files")?,
            }),
            "reverse" | "r" => {
                let file = parts
                    .get(1)
                    .ok_or_else(|| miette::miette!("reverse requires a file name"))?
                    .clone();
                let line = parse_line(parts.get(2), "reverse")?;
                Ok(ReplCommand::Reverse { file, line })
            }
            "name" => {
                let value = parts
                    .get(1)
                    .ok_or_else(|| miette::miette!("name requires an identifier"))?
                    .clone();
                let property = parts[2..].iter().any(|p| p == "--property");
                Ok(ReplCommand::Name { value, property })
            }
            "info" => Ok(ReplCommand::Info),
            "history" => Ok(ReplCommand::History),
            "clear" => Ok(ReplCommand::Clear),
            "help" | "h" => Ok(ReplCommand::Help),
            "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
            other => Err(miette::miette!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                other
            )),
        }
    }
}
