//! Cleaning of untrusted markup before it reaches an editing surface.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tag body: anything up to `>`, with quoted attribute values taken whole.
const TAG_BODY: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*"#;

const BLOCKED_ELEMENTS: [&str; 3] = ["script", "iframe", "object"];

static BLOCKED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BLOCKED_ELEMENTS
        .iter()
        .map(|tag| {
            Regex::new(&format!(
                r"(?is)<{tag}\b{TAG_BODY}>.*?(?:</{tag}\s*>|\z)"
            ))
            .expect("invalid blocked element regex")
        })
        .collect()
});

static EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)<embed\b{TAG_BODY}>")).expect("invalid embed regex")
});

static STRAY_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:script|iframe|object|embed)\s*>").expect("invalid closing tag regex")
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)<link\b{TAG_BODY}>")).expect("invalid link regex")
});

static REL_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\brel\s*=\s*["']?\s*import\b"#).expect("invalid rel regex")
});

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<([a-zA-Z][a-zA-Z0-9:-]*)({TAG_BODY})>"))
        .expect("invalid tag regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\s*([^\s"'<>/=]+)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?"#)
        .expect("invalid attribute regex")
});

static HIDDEN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is)<(?:style|head|title)\b{TAG_BODY}>.*?(?:</(?:style|head|title)\s*>|\z)"
    ))
    .expect("invalid hidden content regex")
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)<br\b{TAG_BODY}>")).expect("invalid line break regex")
});

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)</?(?:p|div|li|ul|ol|h[1-6]|blockquote|pre|tr|table|section|article)\b{TAG_BODY}>"
    ))
    .expect("invalid block tag regex")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?s)<!--.*?-->|<{TAG_BODY}>")).expect("invalid markup regex")
});

/// Removes executable elements and handler attributes from `html`.
///
/// `script`, `iframe` and `object` are dropped with their content, `embed`
/// and `<link rel="import">` are dropped, and every attribute named `on*` or
/// `srcdoc` is stripped. Passes repeat until nothing changes, so fragments
/// joined by a removal are cleaned as well. Everything else is passed through
/// byte for byte.
pub fn sanitize_html(html: &str) -> String {
    let mut out = html.to_string();
    loop {
        let next = sanitize_pass(&out);
        if next == out {
            return out;
        }
        out = next;
    }
}

fn sanitize_pass(html: &str) -> String {
    let mut out = remove_blocked(html);
    out = EMBED.replace_all(&out, "").into_owned();
    out = STRAY_CLOSE.replace_all(&out, "").into_owned();
    out = LINK
        .replace_all(&out, |caps: &Captures| {
            if REL_IMPORT.is_match(&caps[0]) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned();

    OPEN_TAG
        .replace_all(&out, |caps: &Captures| match strip_handler_attrs(&caps[2]) {
            Some(attrs) => format!("<{}{}>", &caps[1], attrs),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Drops blocked elements until none are left, so a closing tag is never
/// stripped before the element it closes has been reassembled.
fn remove_blocked(html: &str) -> String {
    let mut out = html.to_string();
    loop {
        let mut next = out.clone();
        for element in BLOCKED.iter() {
            next = element.replace_all(&next, "").into_owned();
        }
        if next == out {
            return out;
        }
        out = next;
    }
}

/// Returns the attribute list without handler attributes, or `None` when
/// nothing had to be removed.
fn strip_handler_attrs(attrs: &str) -> Option<String> {
    let mut cleaned = String::with_capacity(attrs.len());
    let mut removed = false;
    let mut last = 0;

    for caps in ATTRIBUTE.captures_iter(attrs) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        cleaned.push_str(&attrs[last..whole.start()]);
        let name = caps[1].to_ascii_lowercase();
        if name.starts_with("on") || name == "srcdoc" {
            removed = true;
        } else {
            cleaned.push_str(whole.as_str());
        }
        last = whole.end();
    }
    cleaned.push_str(&attrs[last..]);

    removed.then_some(cleaned)
}

/// Reduces markup to paragraph texts: block tags and `<br>` break lines,
/// other tags are dropped, whitespace collapses and common entities decode.
pub fn html_to_paragraphs(html: &str) -> Vec<String> {
    let text = HIDDEN_CONTENT.replace_all(html, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");

    text.split('\n')
        .map(|line| decode_entities(&line.split_whitespace().collect::<Vec<_>>().join(" ")))
        .filter(|line| !line.is_empty())
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_hide_handler_lookalikes() {
        assert_eq!(
            strip_handler_attrs(r#" title="x onclick=y" class="a""#),
            None
        );
        assert_eq!(
            strip_handler_attrs(r#" ONCLICK='go()' class="a""#).as_deref(),
            Some(r#" class="a""#)
        );
    }
}
