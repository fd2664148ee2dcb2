/// REPL session management with history and state
///
/// Handles user input and command history across queries within a single
/// REPL session.
use super::commands::ReplCommand;
use super::executor::ReplExecutor;
use super::ReplConfig;
use crate::logging;
use crate::ui::formatter::Formatter;
use crate::Result;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{DefaultEditor, Editor};
use std::path::PathBuf;

/// REPL session state and editor
pub struct ReplSession {
    editor: Editor<(), FileHistory>,
    map_path: PathBuf,
    executor: ReplExecutor,
    history_path: PathBuf,
}

impl ReplSession {
    /// Create a new REPL session
    pub fn new(config: ReplConfig) -> Result<Self> {
        let history_path = dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".mapping_debug_history");

        let mut editor = DefaultEditor::new()
            .map_err(|e| miette::miette!("Failed to initialize REPL editor: {}", e))?;

        // Load history if it exists
        let _ = editor.load_history(&history_path);

        let map_path = config.map_path.clone();
        let executor = ReplExecutor::new(config);

        Ok(ReplSession {
            editor,
            map_path,
            executor,
            history_path,
        })
    }

    /// Run the REPL event loop
    pub fn run(&mut self) -> Result<()> {
        logging::log_interactive_mode_start(&self.map_path.to_string_lossy());
        self.print_welcome();

        let prompt = format!(
            "{}> ",
            Formatter::info(format!("mapping-debug [{}]", self.map_path.display()))
        );

        loop {
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line.as_str());

                    match self.execute_command(&line) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => {
                            eprintln!("{}", Formatter::error(format!("Error: {}", e)));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", Formatter::info("Use 'exit' or Ctrl+D to quit"));
                }
                Err(ReadlineError::Eof) => {
                    println!("{}", Formatter::success("Goodbye!"));
                    break;
                }
                Err(e) => {
                    eprintln!("{}", Formatter::error(format!("Error: {}", e)));
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_path);
        Ok(())
    }

    /// Execute a single command. Returns true when the session should end.
    fn execute_command(&mut self, line: &str) -> Result<bool> {
        let output = match ReplCommand::parse(line)? {
            ReplCommand::Exit => return Ok(true),
            ReplCommand::Help => Self::help_text(),
            ReplCommand::History => self
                .editor
                .history()
                .iter()
                .enumerate()
                .map(|(idx, item)| format!("  {}: {}", idx, item))
                .collect::<Vec<_>>()
                .join("\n"),
            ReplCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                return Ok(false);
            }
            ReplCommand::Info => self.executor.info(),
            ReplCommand::Lookup { line, offset } => self.executor.lookup(line, offset),
            ReplCommand::Line { line } => self.executor.line(line),
            ReplCommand::Files { line } => self.executor.files(line),
            ReplCommand::Reverse { file, line } => self.executor.reverse(&file, line),
            ReplCommand::Name { value, property } => self.executor.name(&value, property),
        };

        println!("{}", output);
        Ok(false)
    }

    fn print_welcome(&self) {
        println!("{}", Formatter::success("=== Mapping Debug REPL ==="));
        println!(
            "{}",
            Formatter::info(format!("Line map: {}", self.map_path.display()))
        );
        println!(
            "{}",
            Formatter::info(format!("Script: {}", self.executor.map().script()))
        );
        println!("{}", Formatter::info("Type 'help' for available commands"));
    }

    fn help_text() -> String {
        [
            "Available Commands:",
            "  lookup <line> [offset]    Original position behind a generated position",
            "  line <line>               Character map of a generated line",
            "  files <line>              Original files of a generated line",
            "  reverse <file> <line>     Generated lines built from an original line",
            "  name <value> [--property] Convert a mangled identifier",
            "  info                      Summary of the loaded map",
            "  history                   Show command history",
            "  clear                     Clear the screen",
            "  help                      Show this help message",
            "  exit                      Exit the REPL",
        ]
        .join("\n")
    }
}
