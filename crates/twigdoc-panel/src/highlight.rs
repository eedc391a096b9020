//! HTML syntax highlighting for the block panel.
//!
//! Output is escaped HTML with `token` spans in the class scheme common
//! code highlighters use (`tag`, `attr-name`, `attr-value`, `comment`).

use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/>]+)(?:(\s*=\s*)("[^"]*"|'[^']*'|[^\s"'>]+))?"#)
        .expect("attribute pattern is valid")
});

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Highlight an HTML snippet.
pub fn highlight_html(code: &str) -> String {
    let mut out = String::with_capacity(code.len() * 2);
    let mut rest = code;

    while let Some(at) = rest.find('<') {
        out.push_str(&escape_html(&rest[..at]));
        let tail = &rest[at..];

        if tail.starts_with("<!--") {
            let end = tail.find("-->").map(|i| i + 3).unwrap_or(tail.len());
            push_span(&mut out, "comment", &escape_html(&tail[..end]));
            rest = &tail[end..];
            continue;
        }

        match tag_end(tail) {
            Some(end) if starts_tag(tail) => {
                highlight_tag(&mut out, &tail[..end]);
                rest = &tail[end..];
            }
            _ => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
        }
    }

    out.push_str(&escape_html(rest));
    out
}

fn push_span(out: &mut String, class: &str, escaped: &str) {
    out.push_str(&format!(r#"<span class="token {class}">{escaped}</span>"#));
}

fn starts_tag(tail: &str) -> bool {
    let name = tail
        .strip_prefix("</")
        .or_else(|| tail.strip_prefix('<'))
        .unwrap_or_default();
    name.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

/// Offset just past the first unquoted `>`.
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tail.char_indices().skip(1) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

fn highlight_tag(out: &mut String, tag: &str) {
    let (open, body) = match tag.strip_prefix("</") {
        Some(body) => ("&lt;/", body),
        None => ("&lt;", &tag[1..]),
    };
    let body = body.strip_suffix('>').unwrap_or(body);
    let (body, close) = match body.strip_suffix('/') {
        Some(body) => (body, "/&gt;"),
        None => (body, "&gt;"),
    };
    let name_len = body.find(char::is_whitespace).unwrap_or(body.len());
    let (name, attributes) = body.split_at(name_len);

    push_span(out, "tag", &format!("{open}{}", escape_html(name)));

    let mut last = 0;
    for caps in ATTRIBUTE.captures_iter(attributes) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&escape_html(&attributes[last..whole.start()]));
        push_span(out, "attr-name", &escape_html(&caps[1]));
        if let (Some(eq), Some(value)) = (caps.get(2), caps.get(3)) {
            out.push_str(&escape_html(eq.as_str()));
            push_span(out, "attr-value", &escape_html(value.as_str()));
        }
        last = whole.end();
    }
    out.push_str(&escape_html(&attributes[last..]));

    push_span(out, "tag", close);
}
