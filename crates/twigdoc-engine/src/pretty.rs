//! HTML pretty printer for rendered block bodies.
//!
//! The printer does not build a DOM. It splits markup into tags, text and
//! verbatim chunks, puts block-level tags on their own lines and keeps
//! inline content together. Printing its own output again yields the same
//! text.

const INDENT: &str = "  ";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements laid out in the flow of the surrounding text.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "br", "button", "cite", "code", "data",
    "del", "dfn", "em", "i", "img", "input", "ins", "kbd", "label", "mark", "q", "s", "samp",
    "select", "small", "span", "strike", "strong", "sub", "sup", "time", "tt", "u", "var", "wbr",
];

/// Elements whose content is kept byte for byte.
const RAW_TEXT_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Markup {
    Open {
        name: String,
        tag: String,
        self_closing: bool,
    },
    Close {
        name: String,
        tag: String,
    },
    /// Comments and `<!...>` declarations.
    Verbatim(String),
    /// Content of a raw text element.
    RawText(String),
    Text(String),
}

impl Markup {
    fn is_inline(&self) -> bool {
        match self {
            Markup::Text(_) => true,
            Markup::Open { name, .. } | Markup::Close { name, .. } => {
                INLINE_ELEMENTS.contains(&name.as_str())
            }
            Markup::Verbatim(_) | Markup::RawText(_) => false,
        }
    }
}

/// Pretty print an HTML fragment.
///
/// Block-level tags go on their own line with two-space indentation. Text,
/// inline elements and `{{ }}` expressions form runs that stay on one line,
/// and a block element holding only such a run stays on one line too.
/// Whitespace runs in text collapse to a single space, except inside
/// `{{ }}`, and whitespace-only runs are dropped.
pub fn pretty_html(input: &str) -> String {
    let tokens = tokenize(input);
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let indent = INDENT.repeat(depth);

        if tokens[i].is_inline() {
            let end = run_end(&tokens, i);
            let run = render_run(&tokens[i..end]);
            if !run.is_empty() {
                lines.push(format!("{indent}{run}"));
            }
            i = end;
            continue;
        }

        match &tokens[i] {
            Markup::Open {
                name,
                tag,
                self_closing,
            } => {
                if *self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
                    lines.push(format!("{indent}{tag}"));
                    i += 1;
                    continue;
                }

                if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                    let mut line = format!("{indent}{tag}");
                    i += 1;
                    if let Some(Markup::RawText(raw)) = tokens.get(i) {
                        line.push_str(raw);
                        i += 1;
                    }
                    if let Some(Markup::Close { name: close, tag }) = tokens.get(i) {
                        if close == name {
                            line.push_str(tag);
                            i += 1;
                        }
                    }
                    lines.push(line);
                    continue;
                }

                let end = run_end(&tokens, i + 1);
                match tokens.get(end) {
                    Some(Markup::Close {
                        name: close,
                        tag: end_tag,
                    }) if close == name => {
                        let run = render_run(&tokens[i + 1..end]);
                        lines.push(format!("{indent}{tag}{run}{end_tag}"));
                        i = end + 1;
                    }
                    _ => {
                        lines.push(format!("{indent}{tag}"));
                        depth += 1;
                        i += 1;
                    }
                }
            }
            Markup::Close { tag, .. } => {
                depth = depth.saturating_sub(1);
                lines.push(format!("{}{tag}", INDENT.repeat(depth)));
                i += 1;
            }
            Markup::Verbatim(text) | Markup::RawText(text) | Markup::Text(text) => {
                lines.push(format!("{indent}{text}"));
                i += 1;
            }
        }
    }

    lines.join("\n")
}

/// Index of the first token at or after `from` that is not inline.
fn run_end(tokens: &[Markup], from: usize) -> usize {
    tokens[from..]
        .iter()
        .position(|token| !token.is_inline())
        .map_or(tokens.len(), |offset| from + offset)
}

fn render_run(tokens: &[Markup]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Markup::Text(text) => push_text(&mut out, text),
            Markup::Open { tag, .. } | Markup::Close { tag, .. } => out.push_str(tag),
            Markup::Verbatim(text) | Markup::RawText(text) => out.push_str(text),
        }
    }
    out.trim().to_string()
}

fn tokenize(input: &str) -> Vec<Markup> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(offset) = input[pos..].find('<') {
        let at = pos + offset;
        let Some((markup, end)) = construct(input, at) else {
            // a stray '<' is text
            pos = at + 1;
            continue;
        };

        push_raw_text(&mut tokens, &input[text_start..at]);
        let raw_element = match &markup {
            Markup::Open {
                name,
                self_closing: false,
                ..
            } if RAW_TEXT_ELEMENTS.contains(&name.as_str()) => Some(name.clone()),
            _ => None,
        };
        tokens.push(markup);
        pos = end;

        if let Some(name) = raw_element {
            let (content_end, close) = find_raw_close(input, end, &name);
            tokens.push(Markup::RawText(input[end..content_end].to_string()));
            match close {
                Some((close, close_end)) => {
                    tokens.push(close);
                    pos = close_end;
                }
                None => pos = input.len(),
            }
        }
        text_start = pos;
    }

    push_raw_text(&mut tokens, &input[text_start..]);
    tokens
}

/// Parse the markup construct starting at `at`, returning it and its end offset.
fn construct(input: &str, at: usize) -> Option<(Markup, usize)> {
    let rest = &input[at..];

    if let Some(body) = rest.strip_prefix("<!--") {
        let end = body.find("-->")? + "<!--".len() + "-->".len();
        return Some((Markup::Verbatim(rest[..end].to_string()), at + end));
    }
    if rest.starts_with("<!") {
        let end = tag_end(rest)?;
        return Some((Markup::Verbatim(normalize_tag(&rest[..end])), at + end));
    }

    let (closing, name_start) = if rest.starts_with("</") {
        (true, 2)
    } else {
        (false, 1)
    };
    let first = rest[name_start..].chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }

    let end = tag_end(rest)?;
    let tag = normalize_tag(&rest[..end]);
    let name = rest[name_start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_' | '.'))
        .collect::<String>()
        .to_ascii_lowercase();

    let markup = if closing {
        Markup::Close { name, tag }
    } else {
        let self_closing = tag.ends_with("/>");
        Markup::Open {
            name,
            tag,
            self_closing,
        }
    };
    Some((markup, at + end))
}

/// Offset just past the first unquoted `>`.
fn tag_end(markup: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in markup.char_indices().skip(1) {
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

/// Collapse whitespace outside attribute quotes and drop it before the final `>`.
fn normalize_tag(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut quote = None;
    let mut pending_space = false;

    for c in markup.chars() {
        if quote.is_none() && c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        match quote {
            Some(q) if c == q => quote = None,
            None if c == '"' || c == '\'' => quote = Some(c),
            _ => {}
        }
        out.push(c);
    }

    if out.ends_with(" >") {
        out.remove(out.len() - 2);
    }
    out
}

/// Find the closing tag of a raw text element, case-insensitively.
fn find_raw_close(input: &str, from: usize, name: &str) -> (usize, Option<(Markup, usize)>) {
    let lower = input[from..].to_ascii_lowercase();
    let needle = format!("</{name}");
    let mut search = 0;

    while let Some(offset) = lower[search..].find(&needle) {
        let at = from + search + offset;
        let boundary = input[at + needle.len()..]
            .chars()
            .next()
            .map_or(false, |c| c == '>' || c == '/' || c.is_whitespace());
        if boundary {
            if let Some(close) = construct(input, at) {
                return (at, Some(close));
            }
        }
        search += offset + needle.len();
    }

    (input.len(), None)
}

fn push_raw_text(tokens: &mut Vec<Markup>, text: &str) {
    if !text.is_empty() {
        tokens.push(Markup::Text(text.to_string()));
    }
}

/// Append `text` with whitespace runs collapsed. `{{ }}` expressions are
/// copied unchanged, an unterminated one up to the end of `text`.
fn push_text(out: &mut String, text: &str) {
    let mut rest = text;
    while !rest.is_empty() {
        let (plain, expression) = match rest.find("{{") {
            Some(at) => {
                let end = rest[at..].find("}}").map_or(rest.len(), |close| at + close + 2);
                (&rest[..at], &rest[at..end])
            }
            None => (rest, ""),
        };
        push_collapsed(out, plain);
        out.push_str(expression);
        rest = &rest[plain.len() + expression.len()..];
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(c);
    }
    if pending_space {
        out.push(' ');
    }
}
