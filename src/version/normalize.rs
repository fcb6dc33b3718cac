//! Version extraction from index anchor labels

/// Extract the version embedded in an index label and canonicalize it.
///
/// Scanning starts right after `package_name` plus one separator byte
/// (`requests-2.31.0.tar.gz` is read from `2`). Digits and dots are collected
/// until the first other byte, so archive suffixes and pre-release tags
/// (`2.0a1`) are cut off.
///
/// Examples:
/// - ("requests", "requests-2.31.0.tar.gz") -> "2.31.0"
/// - ("requests", "requests-2") -> "2"
/// - ("django", "django-5.0a1.tar.gz") -> "5.0"
/// - ("requests", "requests-latest") -> ""
///
/// An empty result means the label carried no version at all.
pub fn normalize(package_name: &str, label: &str) -> String {
    let offset = package_name.len() + 1;
    let Some(rest) = label.as_bytes().get(offset..) else {
        return String::new();
    };

    let end = rest
        .iter()
        .position(|b| !(b.is_ascii_digit() || *b == b'.'))
        .unwrap_or(rest.len());

    // The scanned prefix is pure ASCII, so this never fails.
    let scanned = std::str::from_utf8(&rest[..end]).unwrap_or_default();
    canonicalize(scanned.strip_suffix('.').unwrap_or(scanned))
}

/// Collapse a dotted digit string into dotted unsigned integers.
///
/// Empty segments are dropped and redundant leading zeros are removed,
/// so `"01..2"` becomes `"1.2"`. Segments are never padded.
pub fn canonicalize(raw: &str) -> String {
    raw.split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        })
        .collect::<Vec<_>>()
        .join(".")
}
