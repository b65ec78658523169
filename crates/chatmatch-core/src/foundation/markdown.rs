//! Escaping for the legacy Markdown parse mode.

/// Characters with special meaning in legacy Markdown.
const SPECIAL: [char; 4] = ['_', '*', '`', '['];

/// Escapes `text` so it renders literally inside a Markdown message.
///
/// Every `_`, `*`, `` ` `` and `[` is prefixed with a backslash.
///
/// ```
/// use chatmatch_core::escape_markdown;
///
/// assert_eq!(escape_markdown("snake_case *bold*"), r"snake\_case \*bold\*");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
