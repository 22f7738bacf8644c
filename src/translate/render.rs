//! Restricted markdown to markup conversion for translated article bodies.
//!
//! A best-effort renderer, not a markdown engine: each transformation is a
//! single non-recursive pass, and unsupported constructs pass through as
//! literal text. It is applied only to externally supplied translated
//! content, never to dictionary strings.

/// Converts the restricted markdown subset to markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer;

impl ContentRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders `raw` to markup.
    ///
    /// Transformations run in fixed precedence: ATX headings, list-item
    /// lines, inline links, bold before italic, inline code, then paragraph
    /// boundaries. Output not starting with a block element is wrapped in a
    /// single paragraph.
    #[must_use]
    pub fn render(&self, raw: &str) -> String {
        let lines: Vec<String> = raw.lines().map(render_line).collect();
        let html = lines.join("\n");
        let html = replace_links(&html);
        let html = replace_delimited(&html, "**", "strong");
        let html = replace_delimited(&html, "*", "em");
        let html = replace_delimited(&html, "`", "code");
        let html = html.replace("\n\n", "</p><p>").replace('\n', "<br>");
        if starts_with_block(&html) { html } else { format!("<p>{html}</p>") }
    }
}

/// Block-level transforms applied per line: headings and list items.
fn render_line(line: &str) -> String {
    // Longest heading marker first, so `#` does not shadow `###`
    for (marker, tag) in [("### ", "h3"), ("## ", "h2"), ("# ", "h1")] {
        if let Some(rest) = line.strip_prefix(marker) {
            let anchor = heading_anchor(rest);
            return format!("<{tag} id=\"{anchor}\">{rest}</{tag}>");
        }
    }

    if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        return format!("<li>{rest}</li>");
    }
    if let Some(rest) = strip_ordered_prefix(line) {
        return format!("<li>{rest}</li>");
    }

    line.to_string()
}

/// Derives a URL anchor from heading text: lowercase, alphanumerics kept,
/// whitespace runs collapsed to single hyphens.
fn heading_anchor(text: &str) -> String {
    let mut anchor = String::new();
    for ch in text.trim().to_lowercase().chars() {
        if ch.is_alphanumeric() {
            anchor.push(ch);
        } else if (ch.is_whitespace() || ch == '-') && !anchor.ends_with('-') && !anchor.is_empty()
        {
            anchor.push('-');
        }
    }
    anchor.trim_end_matches('-').to_string()
}

/// Strips an `N. ` ordered-list prefix.
fn strip_ordered_prefix(line: &str) -> Option<&str> {
    let dot = line.find(". ")?;
    if dot == 0 {
        return None;
    }
    let digits = line.get(..dot)?;
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    line.get(dot + 2..)
}

/// Rewrites `[text](url)` spans to anchors opening in a new context with
/// no-referrer/no-opener semantics. Incomplete spans pass through literally.
fn replace_links(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('[') {
        let head = &rest[..open];
        let tail = &rest[open..];
        let Some(mid) = tail.find("](") else {
            break;
        };
        let Some(close) = tail[mid + 2..].find(')').map(|offset| mid + 2 + offset) else {
            break;
        };
        let text = &tail[1..mid];
        if text.contains('[') {
            // A later opener starts the real span; emit this one literally
            out.push_str(head);
            out.push('[');
            rest = &tail[1..];
            continue;
        }
        let url = &tail[mid + 2..close];
        out.push_str(head);
        out.push_str("<a href=\"");
        out.push_str(url);
        out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        out.push_str(text);
        out.push_str("</a>");
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Rewrites `<delimiter>span<delimiter>` to `<tag>span</tag>`.
///
/// Empty spans and unpaired delimiters are left literal. Bold must run
/// before italic so the single-asterisk pass never sees `**`.
fn replace_delimited(input: &str, delimiter: &str, tag: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find(delimiter) {
        let after = &rest[open + delimiter.len()..];
        let Some(close) = after.find(delimiter) else {
            break;
        };
        if close == 0 {
            out.push_str(&rest[..open + delimiter.len()]);
            rest = after;
            continue;
        }
        out.push_str(&rest[..open]);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&after[..close]);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        rest = &after[close + delimiter.len()..];
    }
    out.push_str(rest);
    out
}

/// Whether rendered markup already starts with a block element.
fn starts_with_block(html: &str) -> bool {
    ["<h1", "<h2", "<h3", "<li", "<p"].iter().any(|prefix| html.starts_with(prefix))
}
