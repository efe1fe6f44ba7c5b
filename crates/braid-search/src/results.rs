//! Result-set shaping: pagination and payload-field ordering.

use std::cmp::Ordering;

use braid_core::SearchResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of results plus enough bookkeeping to render pagination
/// controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<SearchResult>,
    /// Total result count across all pages.
    pub total: usize,
    /// 1-based page number this slice came from.
    pub page: usize,
    pub per_page: usize,
    /// Total page count. Zero when `per_page` is zero.
    pub pages: usize,
}

/// Slice `results` into the requested page.
///
/// Pages are 1-based; `page` 0 is treated as 1. A page past the end
/// yields an empty item list with the bookkeeping intact. `per_page` 0
/// yields no items and zero pages.
#[must_use]
pub fn paginate(results: &[SearchResult], page: usize, per_page: usize) -> Page {
    let page = page.max(1);
    let total = results.len();

    if per_page == 0 {
        return Page {
            items: Vec::new(),
            total,
            page,
            per_page,
            pages: 0,
        };
    }

    let pages = total.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);
    let items = results.iter().skip(start).take(per_page).cloned().collect();

    Page {
        items,
        total,
        page,
        per_page,
        pages,
    }
}

/// Reorder `results` by a payload field instead of by score.
///
/// Numbers compare numerically; everything else compares by its JSON
/// text. Results whose payload lacks `field` sort after all results that
/// have it, in both directions. The sort is stable, so equal keys keep
/// their incoming relative order.
#[must_use]
pub fn sort_by_field(results: &[SearchResult], field: &str, ascending: bool) -> Vec<SearchResult> {
    let mut sorted: Vec<SearchResult> = results.to_vec();
    sorted.sort_by(|a, b| {
        match (a.payload.get(field), b.payload.get(field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => {
                let ordering = compare_values(left, right);
                if ascending { ordering } else { ordering.reverse() }
            }
        }
    });
    sorted
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    // Integer pairs compare exactly. Adjacent u64 ids above 2^53 collapse
    // to the same double through `as_f64`, so that arm comes last.
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l.cmp(&r);
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l.cmp(&r);
    }
    if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
        return l.partial_cmp(&r).unwrap_or(Ordering::Equal);
    }
    if let (Some(l), Some(r)) = (left.as_str(), right.as_str()) {
        return l.cmp(r);
    }
    left.to_string().cmp(&right.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
