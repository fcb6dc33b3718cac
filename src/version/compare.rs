//! Numeric ordering of normalized versions

use std::cmp::Ordering;

/// Compare two normalized versions segment by segment.
///
/// Segments are compared as unbounded non-negative integers, so `"10"` is
/// greater than `"9"` and very long digit runs never overflow. A missing
/// trailing segment counts as zero (`"1.0" == "1"`). The empty version sorts
/// below every non-empty version.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(l), None) => compare_segment(l, "0"),
            (None, Some(r)) => compare_segment("0", r),
            (Some(l), Some(r)) => compare_segment(l, r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

/// Check whether `actual` equals `requested` up to the precision of `requested`.
///
/// `"1.0"` matches `"1.0.3"` but `"1.0.3"` does not match `"1.0"`.
/// Release selection does not use this; it requires exact string equality.
pub fn equal_at_precision(requested: &str, actual: &str) -> bool {
    if requested.is_empty() {
        return actual.is_empty();
    }

    let mut actual_segments = actual.split('.');
    requested.split('.').all(|segment| {
        actual_segments
            .next()
            .is_some_and(|other| compare_segment(segment, other) == Ordering::Equal)
    })
}

/// Sort releases (or anything carrying a version) newest first.
///
/// The sort is stable: items with equal versions keep their relative order.
pub fn sort_descending_by<T, F>(items: &mut [T], version_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare(version_of(b), version_of(a)));
}

fn compare_segment(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
