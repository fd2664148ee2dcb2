use mapping_debugger::sourcemap::SourceMap;
use proptest::prelude::*;

use crate::utils::{model_resolve, render, slots, Slot};

const RECORDS: i64 = 6;

/// Record `k` points at `a.js` line `k % 3 + 1`.
fn build(lines: &[Vec<Slot>]) -> SourceMap {
    let mut text = vec![format!(
        "/** Begin line maps. **/{{ \"file\": \"gen.js\", \"count\": {} }}",
        lines.len()
    )];
    text.extend(lines.iter().map(|l| render(l)));
    text.push("/** Begin file information. **/".to_string());
    text.extend(lines.iter().map(|_| r#"["a.js"]"#.to_string()));
    text.push("/** Begin mapping definitions. **/".to_string());
    text.extend((0..RECORDS).map(|k| format!(r#"["a.js", {}, 0]"#, k % 3 + 1)));
    SourceMap::build_from(&text, "gen.js").unwrap()
}

proptest! {
    #[test]
    fn test_reverse_counts_explicit_entries(
        lines in prop::collection::vec(slots(RECORDS, 12), 0..6),
        original_line in 1u32..4,
    ) {
        let map = build(&lines);
        let hits = map.reverse_map("a.js", original_line);

        let expected: Vec<u32> = lines
            .iter()
            .enumerate()
            .flat_map(|(i, line)| {
                line.iter()
                    .filter(move |s| matches!(s, Some(v) if *v >= 0 && (*v % 3 + 1) as u32 == original_line))
                    .map(move |_| i as u32 + 1)
            })
            .collect();
        let got: Vec<u32> = hits.iter().map(|h| h.line).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn test_mapping_at_agrees_with_char_map(
        lines in prop::collection::vec(slots(RECORDS, 12), 1..6),
        offset in 0usize..16,
    ) {
        let map = build(&lines);
        for (i, line) in lines.iter().enumerate() {
            let got = map.mapping_at(i as u32 + 1, offset).map(|r| r.id as i64);
            let expected = model_resolve(line, offset).filter(|v| *v >= 0);
            prop_assert_eq!(got, expected);
            prop_assert_eq!(map.has_mapping(i as u32 + 1), !line.is_empty());
        }
    }
}
