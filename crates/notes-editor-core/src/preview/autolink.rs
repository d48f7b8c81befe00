//! Literal URL autolinking (`https://…`, `www.…`) over parsed text.
//!
//! CommonMark only links `<url>` forms; GFM also links bare literals. The
//! parser leaves those as plain text, so they are split out here.

use std::sync::LazyLock;

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
use regex::Regex;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use regex_lite::Regex;

use super::tree::{ElementKind, Node};

static BARE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Scheme, at least one domain label, then an optional path that does
    // not end on trailing punctuation
    Regex::new(
        r#"(?:https?://|www\.)[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*(?:[^\s<>]*[^\s<>.,:;!?"')\]*_~])?"#,
    )
    .inspect_err(|e| tracing::warn!(target: "notes::preview", "autolink pattern: {e}"))
    .ok()
});

/// Split bare URL literals out of `text` into link elements.
///
/// Returns `None` when the text holds no URL, so callers can keep the
/// node untouched.
pub fn linkify(text: &str) -> Option<Vec<Node>> {
    let re = BARE_URL.as_ref()?;
    let mut nodes = Vec::new();
    let mut last = 0;

    for m in re.find_iter(text) {
        // A literal must start a word, not sit inside one
        if text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric())
        {
            continue;
        }
        if m.start() > last {
            nodes.push(Node::text(&text[last..m.start()]));
        }
        let literal = m.as_str();
        let dest = if literal.starts_with("www.") {
            format!("http://{literal}")
        } else {
            literal.to_string()
        };
        nodes.push(Node::element(
            ElementKind::Link {
                dest,
                title: String::new(),
            },
            vec![Node::text(literal)],
        ));
        last = m.end();
    }

    if nodes.is_empty() {
        return None;
    }
    if last < text.len() {
        nodes.push(Node::text(&text[last..]));
    }
    Some(nodes)
}

/// Linkify every text node in `nodes` that is not already inside a link.
pub fn linkify_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => match linkify(&text) {
                Some(parts) => out.extend(parts),
                None => out.push(Node::Text(text)),
            },
            Node::Element { kind, children } => {
                let children = match kind {
                    ElementKind::Link { .. } | ElementKind::Image { .. } => children,
                    _ => linkify_nodes(children),
                };
                out.push(Node::Element { kind, children });
            }
            other => out.push(other),
        }
    }
    out
}
