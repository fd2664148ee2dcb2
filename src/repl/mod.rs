/// Interactive REPL mode for line-map exploration
///
/// This module provides a Read-Eval-Print Loop (REPL) interface for
/// querying a loaded line map: forward lookups, file lists, reverse
/// mappings and name conversion, without reloading the map.
pub mod commands;
pub mod executor;
pub mod session;

pub use session::ReplSession;

use crate::sourcemap::SourceMap;
use crate::Result;
use std::path::PathBuf;

/// Configuration for starting the REPL
#[derive(Debug)]
pub struct ReplConfig {
    pub map_path: PathBuf,
    pub map: SourceMap,
}

/// Start the REPL interactive session
pub fn start_repl(config: ReplConfig) -> Result<()> {
    let mut session = ReplSession::new(config)?;
    session.run()
}
