//! Live preview: markdown source to a rendered document tree.
//!
//! Parsing produces a plain tree (`builder`), bare URLs are linkified
//! (`autolink`), then every node passes through the `RendererRegistry`,
//! where fenced code is swapped for highlighted tokens.

mod autolink;
mod builder;
mod html;
mod registry;
mod tree;

pub use autolink::linkify;
pub use builder::parser_options;
pub use html::{HtmlRenderer, HtmlWriter};
pub use registry::{HighlightedCodeRenderer, NodeRenderer, PassThrough, RendererRegistry};
pub use tree::{Align, DocumentView, ElementKind, Node, NodeKind};

/// Message shown in place of an empty document.
pub const PLACEHOLDER_TEXT: &str = "Preview will appear here as you type...";

/// What the preview pane shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// Text is empty or whitespace-only.
    Placeholder,
    Document(DocumentView),
}

impl PreviewView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PreviewView::Placeholder)
    }

    pub fn document(&self) -> Option<&DocumentView> {
        match self {
            PreviewView::Document(doc) => Some(doc),
            PreviewView::Placeholder => None,
        }
    }

    /// HTML for the pane: the document, or the placeholder message.
    pub fn to_html(&self) -> String {
        match self {
            PreviewView::Document(doc) => doc.to_html(),
            PreviewView::Placeholder => format!("<p class=\"preview-placeholder\">{PLACEHOLDER_TEXT}</p>\n"),
        }
    }
}

/// Markdown to `PreviewView`, with a configurable renderer registry.
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    registry: RendererRegistry,
}

impl PreviewRenderer {
    pub fn new(registry: RendererRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RendererRegistry {
        &mut self.registry
    }

    /// Render `text`. Deterministic: equal input gives an equal tree.
    pub fn render(&self, text: &str) -> PreviewView {
        if text.trim().is_empty() {
            return PreviewView::Placeholder;
        }
        let blocks = builder::build(text);
        let blocks = self.registry.render_nodes(blocks);
        tracing::trace!(target: "notes::preview", blocks = blocks.len(), "rendered preview");
        PreviewView::Document(DocumentView::new(blocks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> DocumentView {
        match PreviewRenderer::default().render(text) {
            PreviewView::Document(doc) => doc,
            PreviewView::Placeholder => panic!("unexpected placeholder for {text:?}"),
        }
    }

    #[test]
    fn test_empty_and_blank_are_placeholder() {
        let renderer = PreviewRenderer::default();
        assert_eq!(renderer.render(""), PreviewView::Placeholder);
        assert_eq!(renderer.render("  \n\t "), PreviewView::Placeholder);
        assert!(renderer.render("x").document().is_some());
        assert_eq!(
            PreviewView::Placeholder.to_html(),
            "<p class=\"preview-placeholder\">Preview will appear here as you type...</p>\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let text = "# Notes\n\n- [ ] a\n- b\n\n```rust\nfn x() {}\n```\n\n| h |\n|---|\n| c |\n\nsee https://x.io[^1]\n\n[^1]: foot";
        let renderer = PreviewRenderer::default();
        assert_eq!(renderer.render(text), renderer.render(text));
    }

    #[test]
    fn test_tagged_fence_is_highlighted_untagged_is_plain() {
        let d = doc("```rust\nfn main() {}\n```\n\n```\nplain\n```\n\n`inline`");
        assert_eq!(d.count(NodeKind::HighlightedCode), 1);
        assert_eq!(d.count(NodeKind::CodeBlock), 1);
        assert_eq!(d.count(NodeKind::InlineCode), 1);
        let Node::HighlightedCode { lines, .. } = &d.blocks[0] else {
            panic!("expected highlighted block first");
        };
        // trailing newline stripped, so exactly one line
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "fn main() {}");
    }

    #[test]
    fn test_unknown_fence_language_is_plain() {
        let d = doc("```klingon\nqapla'\n```");
        assert_eq!(
            d.blocks,
            vec![Node::CodeBlock {
                language: Some("klingon".into()),
                code: "qapla'".into(),
            }]
        );
    }

    #[test]
    fn test_extended_syntax() {
        let d = doc("~~gone~~\n\n| a |\n|---|\n| b |\n\n- [x] task\n\nref[^n]\n\n[^n]: note\n\nhttps://example.org");
        assert_eq!(d.count(NodeKind::Strikethrough), 1);
        assert_eq!(d.count(NodeKind::Table), 1);
        assert_eq!(d.count(NodeKind::TaskMarker), 1);
        assert_eq!(d.count(NodeKind::FootnoteReference), 1);
        assert_eq!(d.count(NodeKind::FootnoteDefinition), 1);
        assert_eq!(d.count(NodeKind::Link), 1);
    }

    #[test]
    fn test_tree_snapshot() {
        insta::assert_debug_snapshot!(doc("## Hi\n\n> *quoted*").blocks, @r#"
        [
            Element {
                kind: Heading(
                    2,
                ),
                children: [
                    Text(
                        "Hi",
                    ),
                ],
            },
            Element {
                kind: BlockQuote,
                children: [
                    Element {
                        kind: Paragraph,
                        children: [
                            Element {
                                kind: Emphasis,
                                children: [
                                    Text(
                                        "quoted",
                                    ),
                                ],
                            },
                        ],
                    },
                ],
            },
        ]
        "#);
    }

    #[test]
    fn test_plain_text() {
        let d = doc("# Title\n\nOne *two*\nthree\n\n- a\n- b");
        assert_eq!(d.plain_text(), "Title\nOne two three\na\nb");
    }
}
