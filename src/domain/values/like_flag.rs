/// Parses the `like` query value.
///
/// Only `true`, `1`, `yes` and `on` (any case, surrounding whitespace ignored)
/// count as a like; every other value is false.
pub fn parse_like_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        None => false,
    }
}
