//! Fitting selection entries into a terminal line.

/// Below this many columns labels are cut hardest.
pub const NARROW_COLUMNS: usize = 60;

/// Below this many columns labels are cut moderately.
pub const MEDIUM_COLUMNS: usize = 80;

/// Columns taken by the list numbering and margins (`"  12. "` plus slack).
const LIST_OVERHEAD: usize = 8;

/// Shortest label budget on wide terminals.
const MIN_WIDE_CHARS: usize = 12;

/// Full label for an entry, e.g. `report.pdf (3 pages)`.
pub fn full_label(display_name: &str, page_count: usize) -> String {
    if page_count == 0 {
        display_name.to_string()
    } else {
        format!("{display_name} {}", page_suffix(page_count))
    }
}

fn page_suffix(page_count: usize) -> String {
    if page_count == 1 {
        "(1 page)".to_string()
    } else {
        format!("({page_count} pages)")
    }
}

/// Label for an entry shortened to suit a terminal `columns` wide.
///
/// Narrow terminals get `name...(Np)` with an 8 character name, medium ones
/// the same with 15 characters. Names short enough to keep whole read
/// `name (Np)`. Wide terminals show the full label when it fits and
/// otherwise shorten only the name, keeping the page count. A zero page
/// count drops the page part. Cuts never split a character.
pub fn fit_label(display_name: &str, page_count: usize, columns: usize) -> String {
    let (name_chars, bare_chars) = if columns < NARROW_COLUMNS {
        (8, 12)
    } else if columns < MEDIUM_COLUMNS {
        (15, 18)
    } else {
        return fit_wide(display_name, page_count, columns);
    };

    if page_count == 0 {
        truncate(display_name, bare_chars)
    } else if display_name.chars().count() > name_chars {
        format!("{}({page_count}p)", truncate(display_name, name_chars))
    } else {
        format!("{display_name} ({page_count}p)")
    }
}

fn fit_wide(display_name: &str, page_count: usize, columns: usize) -> String {
    let max_chars = columns.saturating_sub(LIST_OVERHEAD).max(MIN_WIDE_CHARS);
    let full = full_label(display_name, page_count);
    if full.chars().count() <= max_chars {
        return full;
    }

    if page_count == 0 {
        return truncate(display_name, max_chars.saturating_sub(3));
    }

    let suffix = page_suffix(page_count);
    let name_chars = max_chars
        .saturating_sub(suffix.chars().count() + 4)
        .max(1);
    format!("{} {suffix}", truncate(display_name, name_chars))
}

/// First `max_chars` characters of `text` followed by `...`, or `text`
/// unchanged when it is short enough.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}
