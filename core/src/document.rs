//! Idempotent markdown section merging.
//!
//! Replaces or appends one named section of a free-form document, leaving
//! every byte outside the section untouched. Span recognition is an
//! explicit two-marker scan keyed off the literal next top-level header
//! marker, so `---` rules and `###` sub-headers inside the section body can
//! never terminate the span early.

/// Line prefix that starts a new top-level section and therefore ends the
/// current span. The leading newline anchors it to a line start.
const NEXT_HEADER: &str = "\n## ";

/// Merge `body` into `document` under `header`.
///
/// The section span runs from the first occurrence of `header` to just
/// before the next top-level header, or to end of text. If found, the span
/// is replaced with `header` + blank line + trimmed body + newline; if not,
/// that section is appended after a blank-line separator. Whenever the
/// section ends the document, the output carries one trailing blank line so
/// that merging the same body again reproduces the output byte for byte.
///
/// Returns a new string; the input is never mutated.
pub fn merge_section(document: &str, header: &str, body: &str) -> String {
    let doc = document.trim();
    let section = format!("{header}\n\n{}\n", body.trim());

    match doc.find(header) {
        Some(start) => {
            let after = start + header.len();
            match doc[after..].find(NEXT_HEADER) {
                // Splice the rebuilt section in; the tail keeps its leading
                // newline so the following header stays on its own line.
                Some(offset) => {
                    let tail = after + offset;
                    format!("{}{}{}", &doc[..start], section, &doc[tail..])
                }
                None => format!("{}{}\n", &doc[..start], section),
            }
        }
        None if doc.is_empty() => format!("{section}\n"),
        None => format!("{doc}\n\n{section}\n"),
    }
}
