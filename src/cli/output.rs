use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandOutput<T>
where
    T: Serialize,
{
    pub status: String,
    pub result: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T: Serialize> CommandOutput<T> {
    pub fn ok(result: T) -> Self {
        Self {
            status: "ok".to_string(),
            result: Some(result),
            errors: None,
        }
    }

    pub fn error(errors: Vec<String>) -> Self {
        Self {
            status: "error".to_string(),
            result: None,
            errors: Some(errors),
        }
    }
}

/// Summary printed by `check`.
#[derive(Debug, Serialize)]
pub struct MapSummary {
    pub script: String,
    pub lines: usize,
    pub mapped_lines: usize,
    pub mappings: usize,
}

/// Result of `lookup`.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub line: u32,
    pub offset: usize,
    pub mapping: Option<crate::debugger::MappedSource>,
    pub name: Option<String>,
}
