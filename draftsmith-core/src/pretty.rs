//! Cosmetic reformatting of generated markup: one token per line, indented
//! by tag nesting. Token content is never altered, only surrounding
//! whitespace, so the formatted document stays semantically identical.

const INDENT: usize = 4;

/// Tags that never take a closing counterpart and so never indent.
const VOID_ELEMENTS: &[&str] = &[
    "br", "img", "input", "meta", "link", "hr", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

/// Reindent an HTML string by tracking open/close tags across a token
/// stream split on tag boundaries.
pub fn format_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 4);
    let mut indent: isize = 0;

    for token in tokens(html) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if token.starts_with("</") {
            indent -= INDENT as isize;
            push_line(&mut out, indent, token);
        } else if token.starts_with('<') && !token.ends_with("/>") && !token.contains("</") {
            push_line(&mut out, indent, token);
            if !tag_name(token).map(is_void).unwrap_or(false) {
                indent += INDENT as isize;
            }
        } else if token.starts_with('<') {
            // Self-closing.
            push_line(&mut out, indent, token);
        } else {
            push_line(&mut out, indent, token);
        }
    }

    out
}

fn push_line(out: &mut String, indent: isize, token: &str) {
    for _ in 0..indent.max(0) {
        out.push(' ');
    }
    out.push_str(token);
    out.push('\n');
}

/// Split into alternating text and `<...>` tag tokens, tags kept whole.
fn tokens(html: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        if open > 0 {
            parts.push(&rest[..open]);
        }
        match rest[open..].find('>') {
            Some(close) => {
                parts.push(&rest[open..open + close + 1]);
                rest = &rest[open + close + 1..];
            }
            None => {
                // Unterminated tag; keep the remainder as text.
                parts.push(&rest[open..]);
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}

/// The alphanumeric run immediately after `<`, if any. `<!DOCTYPE ...>` and
/// comments have none and are treated as indenting tags, matching the
/// formatter this replaces.
fn tag_name(token: &str) -> Option<&str> {
    let body = token.strip_prefix('<')?;
    let end = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    if end == 0 { None } else { Some(&body[..end]) }
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_children_one_level_deeper() {
        let formatted = format_html("<div><p>hi</p></div>");
        assert_eq!(formatted, "<div>\n    <p>\n        hi\n    </p>\n</div>\n");
    }

    #[test]
    fn void_elements_do_not_indent() {
        let formatted = format_html("<head><meta charset=\"UTF-8\"><title>t</title></head>");
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[1], "    <meta charset=\"UTF-8\">");
        // <title> sits at the same depth as <meta>: the void tag did not
        // push a level.
        assert_eq!(lines[2], "    <title>");
    }

    #[test]
    fn self_closing_tags_do_not_indent() {
        let formatted = format_html("<ul><li>a</li><hr /><li>b</li></ul>");
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[4], "    <hr />");
        assert_eq!(lines[5], "    <li>");
    }

    #[test]
    fn content_survives_reformatting() {
        let input = "<section class=\"content-section\"><h2>Grover &amp; friends</h2></section>";
        let formatted = format_html(input);
        let squashed: String = formatted
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .concat();
        assert_eq!(squashed, input);
    }

    #[test]
    fn indent_never_goes_negative() {
        // Pathological input with an extra closing tag.
        let formatted = format_html("</div><p>ok</p>");
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "</div>");
        // The following tag is flush left, not pushed off-screen.
        assert_eq!(lines[1], "<p>");
    }
}
