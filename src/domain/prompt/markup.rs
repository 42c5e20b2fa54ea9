//! Minimal XML-ish markup helpers shared by the prompt formatters.

/// Escapes the five reserved markup characters.
///
/// `&` is replaced first so already-produced entities are not re-escaped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// `<tag>escaped text</tag>` on one line, with leading tabs.
pub(crate) fn leaf(depth: usize, tag: &str, text: &str) -> String {
    format!("{}<{tag}>{}</{tag}>", indent(depth), escape_xml(text))
}

/// `<tag>value</tag>` for values that are already markup-safe (numbers,
/// enum tags).
pub(crate) fn leaf_raw(depth: usize, tag: &str, value: impl std::fmt::Display) -> String {
    format!("{}<{tag}>{value}</{tag}>", indent(depth))
}

/// Wraps pre-rendered child lines in an element.
pub(crate) fn element(depth: usize, open: &str, tag: &str, children: &[String]) -> String {
    let pad = indent(depth);
    format!("{pad}<{open}>\n{}\n{pad}</{tag}>", children.join("\n"))
}

/// A top-level block followed by a blank line.
pub(crate) fn block(tag: &str, children: &[String]) -> String {
    format!("{}\n\n", element(0, tag, tag, children))
}

/// A top-level block holding one indented line of escaped text.
pub(crate) fn text_block(tag: &str, text: &str) -> String {
    format!("<{tag}>\n\t{}\n</{tag}>\n\n", escape_xml(text))
}

pub(crate) fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}
