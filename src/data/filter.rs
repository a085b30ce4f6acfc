//! Marker-based line selection.

/// Lines of `text` that start with `marker`, with the marker removed.
///
/// The match is a literal, case-sensitive prefix test against the raw line:
/// leading whitespace is not skipped, so an indented line never matches.
/// Lines are split on `\n` and a trailing `\r` is dropped. `marker` must be
/// non-empty; registries reject empty markers when built.
pub fn filter<'a>(text: &'a str, marker: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    debug_assert!(!marker.is_empty(), "metric marker must not be empty");
    text.lines().filter_map(move |line| line.strip_prefix(marker))
}
