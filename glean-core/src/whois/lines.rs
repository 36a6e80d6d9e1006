/// A run of trimmed, non-empty lines delimited by blank lines.
pub type LineGroup = Vec<String>;

/// Splits raw text into blank-line-delimited groups of trimmed lines.
///
/// Lines starting with `comment_marker` are dropped before grouping. Lines
/// left open at the end of the text form a final group. Empty groups produced
/// by consecutive blank lines are discarded.
pub fn group_lines(raw: &str, comment_marker: &str) -> Vec<LineGroup> {
    let mut groups = Vec::new();
    let mut current = LineGroup::new();

    for line in raw.split('\n').map(str::trim) {
        if line.starts_with(comment_marker) {
            continue;
        }

        if line.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(line.to_string());
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}
