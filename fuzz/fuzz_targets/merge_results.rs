#![no_main]

use std::collections::HashMap;

use braid_core::{SearchResult, merge_deduplicate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz list merging with arbitrary inputs decoded from JSON. The
    // merge must never panic, and each surviving identity must carry the
    // highest score seen for it anywhere in the inputs.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok((first, second, limit)) =
        serde_json::from_str::<(Vec<SearchResult>, Vec<SearchResult>, u8)>(text)
    else {
        return;
    };
    let limit = usize::from(limit);

    let merged = merge_deduplicate(&[&first, &second], limit);

    assert!(merged.len() <= limit, "limit must be respected");
    for pair in merged.windows(2) {
        assert!(pair[0].score >= pair[1].score, "output must be sorted");
    }

    let mut best: HashMap<&str, f32> = HashMap::new();
    for result in first.iter().chain(second.iter()) {
        let entry = best.entry(result.id.as_str()).or_insert(f32::NEG_INFINITY);
        *entry = entry.max(result.score);
    }

    let mut seen: Vec<&str> = Vec::new();
    for result in &merged {
        assert!(!seen.contains(&result.id.as_str()), "ids must be unique");
        seen.push(result.id.as_str());
        // JSON cannot encode NaN, so plain equality is total here.
        let expected = best[result.id.as_str()];
        assert!(
            result.score == expected,
            "kept score must be the maximum for {}: {} vs {}",
            result.id,
            result.score,
            expected
        );
    }
});
