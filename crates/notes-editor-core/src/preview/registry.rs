//! Per-node-kind renderer overrides.

use std::collections::BTreeMap;
use std::fmt;

use super::tree::{Node, NodeKind};
use crate::highlight::{Highlighter, strip_trailing_newline};

/// Transforms one node of the document tree.
///
/// Children have already been rendered when a renderer sees an element.
pub trait NodeRenderer {
    fn render(&self, node: Node) -> Node;
}

/// Leaves nodes as they are. The default for every kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl NodeRenderer for PassThrough {
    fn render(&self, node: Node) -> Node {
        node
    }
}

static PASS_THROUGH: PassThrough = PassThrough;

/// Renders fenced code with a recognized language as highlighted tokens.
///
/// Untagged blocks stay plain. Tagged blocks lose one trailing newline and
/// fall back to plain code when the language is unknown or highlighting fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighlightedCodeRenderer {
    highlighter: Highlighter,
}

impl HighlightedCodeRenderer {
    pub fn new(highlighter: Highlighter) -> Self {
        Self { highlighter }
    }
}

impl NodeRenderer for HighlightedCodeRenderer {
    fn render(&self, node: Node) -> Node {
        let (language, code) = match node {
            Node::CodeBlock {
                language: Some(language),
                code,
            } => (language, code),
            other => return other,
        };

        let code = strip_trailing_newline(&code);
        match self.highlighter.highlight(&language, code) {
            Ok(Some(lines)) => Node::HighlightedCode { language, lines },
            Ok(None) => Node::CodeBlock {
                language: Some(language),
                code: code.to_string(),
            },
            Err(e) => {
                tracing::warn!(
                    target: "notes::preview",
                    language = %language,
                    "highlighting failed, rendering plain: {e}"
                );
                Node::CodeBlock {
                    language: Some(language),
                    code: code.to_string(),
                }
            }
        }
    }
}

/// Maps node kinds to renderers. Unregistered kinds pass through unchanged.
pub struct RendererRegistry {
    overrides: BTreeMap<NodeKind, Box<dyn NodeRenderer>>,
}

impl Default for RendererRegistry {
    /// Pass-through everywhere except fenced code, which is highlighted.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(NodeKind::CodeBlock, HighlightedCodeRenderer::default());
        registry
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RendererRegistry {
    /// A registry with no overrides at all.
    pub fn empty() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }

    /// Install `renderer` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: NodeKind,
        renderer: impl NodeRenderer + 'static,
    ) -> Option<Box<dyn NodeRenderer>> {
        self.overrides.insert(kind, Box::new(renderer))
    }

    pub fn is_overridden(&self, kind: NodeKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    pub fn renderer_for(&self, kind: NodeKind) -> &dyn NodeRenderer {
        match self.overrides.get(&kind) {
            Some(renderer) => renderer.as_ref(),
            None => &PASS_THROUGH,
        }
    }

    /// Render a forest bottom-up.
    pub fn render_nodes(&self, nodes: Vec<Node>) -> Vec<Node> {
        nodes.into_iter().map(|node| self.render_node(node)).collect()
    }

    fn render_node(&self, node: Node) -> Node {
        let node = match node {
            Node::Element { kind, children } => Node::Element {
                kind,
                children: self.render_nodes(children),
            },
            leaf => leaf,
        };
        self.renderer_for(node.kind()).render(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::tree::ElementKind;

    struct Shout;

    impl NodeRenderer for Shout {
        fn render(&self, node: Node) -> Node {
            match node {
                Node::Text(t) => Node::text(t.to_uppercase()),
                other => other,
            }
        }
    }

    fn code(language: Option<&str>, code: &str) -> Node {
        Node::CodeBlock {
            language: language.map(Into::into),
            code: code.into(),
        }
    }

    #[test]
    fn test_default_only_overrides_code_blocks() {
        let registry = RendererRegistry::default();
        assert!(registry.is_overridden(NodeKind::CodeBlock));
        assert!(!registry.is_overridden(NodeKind::InlineCode));
        assert!(!registry.is_overridden(NodeKind::Paragraph));
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let out = RendererRegistry::default().render_nodes(vec![code(Some("rust"), "let x = 1;\n")]);
        let Node::HighlightedCode { language, lines } = &out[0] else {
            panic!("expected highlighted code, got {:?}", out[0]);
        };
        assert_eq!(language, "rust");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "let x = 1;");
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let out = RendererRegistry::default().render_nodes(vec![code(Some("nosuchlang"), "x\n")]);
        assert_eq!(out, vec![code(Some("nosuchlang"), "x")]);
    }

    #[test]
    fn test_untagged_code_is_untouched() {
        let out = RendererRegistry::default().render_nodes(vec![code(None, "x\n")]);
        assert_eq!(out, vec![code(None, "x\n")]);
    }

    #[test]
    fn test_custom_override_applies_to_nested_nodes() {
        let mut registry = RendererRegistry::empty();
        assert!(registry.register(NodeKind::Text, Shout).is_none());
        let out = registry.render_nodes(vec![Node::element(
            ElementKind::Paragraph,
            vec![Node::element(ElementKind::Strong, vec![Node::text("hi")])],
        )]);
        assert_eq!(
            out,
            vec![Node::element(
                ElementKind::Paragraph,
                vec![Node::element(ElementKind::Strong, vec![Node::text("HI")])],
            )]
        );
    }

    #[test]
    fn test_register_replaces_previous() {
        let mut registry = RendererRegistry::default();
        assert!(registry.register(NodeKind::CodeBlock, PassThrough).is_some());
        let out = registry.render_nodes(vec![code(Some("rust"), "x\n")]);
        assert_eq!(out, vec![code(Some("rust"), "x\n")]);
    }
}
