use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// Identifier of a mapping record, assigned in definition order.
pub type MappingId = usize;

/// One generated-position to original-position correspondence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingRecord {
    pub id: MappingId,
    /// `None` means the code was added by the compiler and has no original file.
    pub original_file: Option<String>,
    pub original_line: Option<u32>,
    pub original_column: Option<u32>,
    /// Positional fields from index 3 onwards, kept as decoded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<Value>,
    /// Set on the stand-in for a definition that could not be decoded.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub decode_failed: bool,
}

impl MappingRecord {
    /// Decode a record from its `[file, line, column, name, ...]` array form.
    pub fn decode(id: MappingId, raw: &str) -> Result<Self, String> {
        let fields: Vec<Value> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        let mut fields = fields.into_iter();

        let original_file = match fields.next() {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(v) if is_falsy(&v) => None,
            Some(other) => return Err(format!("original file must be a string, got {}", other)),
            None => None,
        };
        let original_line = fields.next().and_then(|v| as_u32(&v));
        let original_column = fields.next().and_then(|v| as_u32(&v));

        Ok(Self {
            id,
            original_file,
            original_line,
            original_column,
            extras: fields.collect(),
            decode_failed: false,
        })
    }

    /// Stand-in used when a record cannot be decoded.
    pub fn undecodable(id: MappingId) -> Self {
        Self {
            id,
            decode_failed: true,
            ..Self::default()
        }
    }

    /// True when the record carries no positional fields at all, as a
    /// well-formed `[]` does.
    pub fn is_empty(&self) -> bool {
        self.original_file.is_none()
            && self.original_line.is_none()
            && self.original_column.is_none()
            && self.extras.is_empty()
    }

    /// Original symbol name, the fourth positional field.
    pub fn symbol_name(&self) -> Option<&str> {
        self.extras.first().and_then(Value::as_str)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

#[derive(Debug)]
enum SlotState {
    Raw(String),
    Decoded(Arc<MappingRecord>),
}

/// Outcome of resolving a slot.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub record: Arc<MappingRecord>,
    /// Set only on the call that performed the raw -> decoded transition and failed.
    pub decode_error: Option<String>,
}

/// Storage slot for a mapping record. Holds the raw text until the first
/// access decodes it; the transition happens once, under the slot's lock.
#[derive(Debug)]
pub struct MappingSlot {
    state: Mutex<SlotState>,
}

impl MappingSlot {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(SlotState::Raw(text.into())),
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(*self.lock(), SlotState::Decoded(_))
    }

    pub(crate) fn resolve(&self, id: MappingId) -> Resolved {
        let mut state = self.lock();
        let raw = match &*state {
            SlotState::Decoded(record) => {
                return Resolved {
                    record: Arc::clone(record),
                    decode_error: None,
                }
            }
            SlotState::Raw(raw) => raw,
        };

        let (record, decode_error) = match MappingRecord::decode(id, raw) {
            Ok(record) => (record, None),
            Err(reason) => (MappingRecord::undecodable(id), Some(reason)),
        };

        let record = Arc::new(record);
        *state = SlotState::Decoded(Arc::clone(&record));
        Resolved {
            record,
            decode_error,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        // A poisoned slot still holds a consistent state: either raw or decoded.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
