#![no_main]

use braid_core::{SearchResult, normalize_scores};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz min-max normalization with arbitrary result lists decoded from
    // JSON. For any finite input the output must stay inside [0, 1] and
    // must never contain NaN, including the all-equal and single-result
    // degenerate cases.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(results) = serde_json::from_str::<Vec<SearchResult>>(text) else {
        return;
    };
    // Pipeline scores are finite by construction; JSON overflow notation
    // (1e999) decodes to infinity, which is outside the contract.
    if results.iter().any(|r| !r.score.is_finite()) {
        return;
    }

    let normalized = normalize_scores(&results);

    assert_eq!(normalized.len(), results.len());
    for (original, scaled) in results.iter().zip(normalized.iter()) {
        assert!(!scaled.score.is_nan(), "normalization must never yield NaN");
        assert!(
            (0.0..=1.0).contains(&scaled.score),
            "normalized score out of range: {}",
            scaled.score
        );
        assert_eq!(original.id, scaled.id, "identity must be untouched");
        assert_eq!(original.source, scaled.source, "source must be untouched");
    }
});
