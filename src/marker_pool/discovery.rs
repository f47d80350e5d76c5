//! One-time adapter from scene naming conventions to an ordered marker list.

/// Keeps names of the form `<prefix><ordinal>` (an optional `_`, `-` or space
/// may separate the two) and returns them sorted by numeric ordinal. Ties on
/// the ordinal (e.g. `Marker_01` and `Marker_1`) fall back to lexical order.
pub fn discover_marker_names<I, S>(names: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found: Vec<(u64, String)> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let ordinal = parse_ordinal(name, prefix)?;
            Some((ordinal, name.to_string()))
        })
        .collect();
    found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    found.into_iter().map(|(_, name)| name).collect()
}

fn parse_ordinal(name: &str, prefix: &str) -> Option<u64> {
    let suffix = name.strip_prefix(prefix)?;
    let digits = suffix.trim_start_matches(['_', '-', ' ']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
