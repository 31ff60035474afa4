//! Book title to filename mapping.

/// Characters removed outright; `:` is handled separately.
const INVALID_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|'];

/// Used when a title sanitizes down to nothing.
pub const FALLBACK_NAME: &str = "Untitled";

/// Longest stem kept, counted in characters.
const MAX_STEM_CHARS: usize = 150;

/// Maps a raw title to a filename stem (no extension). Idempotent.
///
/// Colons become ` -`, characters invalid on common filesystems are dropped
/// and surrounding whitespace is trimmed. Inner spacing is left alone.
/// Over-long titles are cut at the last space before the limit.
pub fn sanitize_stem(title: &str) -> String {
    let replaced = title.replace(':', " -");
    let cleaned: String = replaced.chars().filter(|c| !INVALID_CHARS.contains(c)).collect();
    let stem = truncate(cleaned.trim()).trim();

    if stem.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        stem.to_string()
    }
}

/// Maps a raw title to a `.md` filename.
///
/// Only the stem is stable under re-sanitizing; feeding the result back in
/// keeps the `.md` and appends another.
pub fn sanitize(title: &str) -> String {
    format!("{}.md", sanitize_stem(title))
}

/// Filename for the `n`th book whose title sanitizes to the same name.
pub fn numbered(title: &str, n: usize) -> String {
    format!("{} ({}).md", sanitize_stem(title), n)
}

fn truncate(s: &str) -> &str {
    let Some((limit, _)) = s.char_indices().nth(MAX_STEM_CHARS) else {
        return s;
    };

    match s[..limit].rfind(' ') {
        Some(cut) if cut > 0 => &s[..cut],
        _ => &s[..limit],
    }
}
