//! Rendered document tree.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::highlight::HighlightedLine;

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    None,
    Left,
    Center,
    Right,
}

/// Container node kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Paragraph,
    Heading(u8),
    BlockQuote,
    /// Ordered lists carry their start number.
    List(Option<u64>),
    Item,
    Table(Vec<Align>),
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { dest: String, title: String },
    Image { dest: String, title: String },
    FootnoteDefinition(SmolStr),
}

/// A node of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Element {
        kind: ElementKind,
        children: Vec<Node>,
    },
    Text(SmolStr),
    InlineCode(SmolStr),
    /// Fenced or indented code rendered as plain monospace.
    CodeBlock {
        language: Option<SmolStr>,
        code: String,
    },
    /// Fenced code run through the highlighter.
    HighlightedCode {
        language: SmolStr,
        lines: Vec<HighlightedLine>,
    },
    SoftBreak,
    HardBreak,
    Rule,
    TaskMarker(bool),
    Html(String),
    FootnoteReference(SmolStr),
}

/// Discriminant of `Node` (and of `ElementKind` for elements), used as the
/// key of the renderer registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Paragraph,
    Heading,
    BlockQuote,
    List,
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    Image,
    FootnoteDefinition,
    Text,
    InlineCode,
    CodeBlock,
    HighlightedCode,
    SoftBreak,
    HardBreak,
    Rule,
    TaskMarker,
    Html,
    FootnoteReference,
}

impl ElementKind {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            ElementKind::Paragraph => NodeKind::Paragraph,
            ElementKind::Heading(_) => NodeKind::Heading,
            ElementKind::BlockQuote => NodeKind::BlockQuote,
            ElementKind::List(_) => NodeKind::List,
            ElementKind::Item => NodeKind::Item,
            ElementKind::Table(_) => NodeKind::Table,
            ElementKind::TableHead => NodeKind::TableHead,
            ElementKind::TableRow => NodeKind::TableRow,
            ElementKind::TableCell => NodeKind::TableCell,
            ElementKind::Emphasis => NodeKind::Emphasis,
            ElementKind::Strong => NodeKind::Strong,
            ElementKind::Strikethrough => NodeKind::Strikethrough,
            ElementKind::Link { .. } => NodeKind::Link,
            ElementKind::Image { .. } => NodeKind::Image,
            ElementKind::FootnoteDefinition(_) => NodeKind::FootnoteDefinition,
        }
    }
}

impl Node {
    pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
        Node::Element { kind, children }
    }

    pub fn text(text: impl Into<SmolStr>) -> Self {
        Node::Text(text.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element { kind, .. } => kind.node_kind(),
            Node::Text(_) => NodeKind::Text,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::HighlightedCode { .. } => NodeKind::HighlightedCode,
            Node::SoftBreak => NodeKind::SoftBreak,
            Node::HardBreak => NodeKind::HardBreak,
            Node::Rule => NodeKind::Rule,
            Node::TaskMarker(_) => NodeKind::TaskMarker,
            Node::Html(_) => NodeKind::Html,
            Node::FootnoteReference(_) => NodeKind::FootnoteReference,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first visit of this node and all descendants.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Element { kind, children } => {
                for child in children {
                    child.push_plain_text(out);
                }
                if matches!(
                    kind,
                    ElementKind::Paragraph
                        | ElementKind::Heading(_)
                        | ElementKind::Item
                        | ElementKind::TableRow
                        | ElementKind::TableHead
                ) && !out.ends_with('\n')
                {
                    out.push('\n');
                } else if matches!(kind, ElementKind::TableCell) {
                    out.push('\t');
                }
            }
            Node::Text(t) | Node::InlineCode(t) => out.push_str(t),
            Node::CodeBlock { code, .. } => {
                out.push_str(code);
                out.push('\n');
            }
            Node::HighlightedCode { lines, .. } => {
                for line in lines {
                    out.push_str(&line.text());
                    out.push('\n');
                }
            }
            Node::SoftBreak => out.push(' '),
            Node::HardBreak => out.push('\n'),
            Node::Rule | Node::Html(_) | Node::TaskMarker(_) => {}
            Node::FootnoteReference(label) => {
                out.push('[');
                out.push_str(label);
                out.push(']');
            }
        }
    }
}

/// A rendered markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentView {
    pub blocks: Vec<Node>,
}

impl DocumentView {
    pub fn new(blocks: Vec<Node>) -> Self {
        Self { blocks }
    }

    /// Depth-first visit of every node.
    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a Node)) {
        for block in &self.blocks {
            block.walk(&mut f);
        }
    }

    /// Count nodes of one kind anywhere in the tree.
    pub fn count(&self, kind: NodeKind) -> usize {
        let mut n = 0;
        self.walk(|node| {
            if node.kind() == kind {
                n += 1;
            }
        });
        n
    }

    /// The document's text with all markup removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.push_plain_text(&mut out);
        }
        while out.ends_with('\n') {
            out.pop();
        }
        out
    }
}
