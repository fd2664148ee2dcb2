use proptest::prelude::*;

/// One generated slot: `None` is an elision, `Some(-1)` is unmapped.
pub type Slot = Option<i64>;

pub fn slot(max_id: i64) -> impl Strategy<Value = Slot> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(-1)),
        2 => (0..max_id).prop_map(Some),
    ]
}

pub fn slots(max_id: i64, max_len: usize) -> impl Strategy<Value = Vec<Slot>> {
    prop::collection::vec(slot(max_id), 0..max_len)
}

/// Render slots as an array literal. A trailing elision needs an extra
/// comma, as in `[0,,]`.
pub fn render(slots: &[Slot]) -> String {
    let parts: Vec<String> = slots
        .iter()
        .map(|s| s.map(|v| v.to_string()).unwrap_or_default())
        .collect();
    let mut body = parts.join(",");
    if matches!(slots.last(), Some(None)) {
        body.push(',');
    }
    format!("[{}]", body)
}

/// Naive model: the nearest explicit slot at or below `offset`.
pub fn model_resolve(slots: &[Slot], offset: usize) -> Option<i64> {
    if slots.is_empty() {
        return None;
    }
    let start = offset.min(slots.len() - 1);
    slots[..=start].iter().rev().find_map(|s| *s)
}
