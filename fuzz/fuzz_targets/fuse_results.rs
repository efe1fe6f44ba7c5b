#![no_main]

use std::collections::HashSet;

use braid_core::{RrfConfig, SearchResult, Source, fuse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz rank fusion with arbitrary candidate lists decoded from JSON.
    // With default tunables fuse must always succeed, and the output must
    // hold its ordering and identity invariants for any input lists.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok((lexical, vector)) =
        serde_json::from_str::<(Vec<SearchResult>, Vec<SearchResult>)>(text)
    else {
        return;
    };

    let config = RrfConfig::default();
    let fused = match fuse(&lexical, &vector, &config) {
        Ok(fused) => fused,
        Err(e) => panic!("default tunables must never be rejected: {e}"),
    };

    // Scores come from ranks alone, so they are always finite and the
    // list is sorted from best to worst.
    for pair in fused.windows(2) {
        assert!(pair[0].score >= pair[1].score, "output must be sorted");
    }
    for result in &fused {
        assert!(result.score.is_finite());
        assert!(result.score > 0.0, "every contribution is positive");
        assert_eq!(result.source, Source::Hybrid);
    }

    // One output row per distinct input identity.
    let fused_ids: HashSet<&str> = fused.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(fused_ids.len(), fused.len(), "ids must be unique");

    let input_ids: HashSet<&str> = lexical
        .iter()
        .chain(vector.iter())
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(fused_ids, input_ids, "no identity appears or vanishes");
});
