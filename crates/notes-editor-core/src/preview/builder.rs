//! Markdown events to document tree.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use smol_str::SmolStr;

use super::tree::{Align, ElementKind, Node};
use crate::highlight::language_key;

/// Extended syntax enabled for previews.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

enum Frame {
    Element(ElementKind, Vec<Node>),
    Code {
        language: Option<SmolStr>,
        buffer: String,
    },
    /// Tags with no tree counterpart; children are spliced into the parent.
    Transparent(Vec<Node>),
}

impl Frame {
    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Frame::Element(_, children) | Frame::Transparent(children) => Some(children),
            Frame::Code { .. } => None,
        }
    }
}

/// Builds a `Node` tree from a stream of markdown events.
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut().and_then(Frame::children_mut) {
            Some(children) => children.push(node),
            None => self.root.push(node),
        }
    }

    fn push_nodes(&mut self, nodes: Vec<Node>) {
        for node in nodes {
            self.push_node(node);
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Element(ElementKind::Paragraph, Vec::new()),
            Tag::Heading { level, .. } => {
                Frame::Element(ElementKind::Heading(heading_level(level)), Vec::new())
            }
            Tag::BlockQuote(..) => Frame::Element(ElementKind::BlockQuote, Vec::new()),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => language_key(&info),
                    CodeBlockKind::Indented => None,
                };
                Frame::Code {
                    language,
                    buffer: String::new(),
                }
            }
            Tag::List(start) => Frame::Element(ElementKind::List(start), Vec::new()),
            Tag::Item => Frame::Element(ElementKind::Item, Vec::new()),
            Tag::FootnoteDefinition(label) => Frame::Element(
                ElementKind::FootnoteDefinition(SmolStr::new(&*label)),
                Vec::new(),
            ),
            Tag::Table(alignments) => Frame::Element(
                ElementKind::Table(alignments.into_iter().map(align).collect()),
                Vec::new(),
            ),
            Tag::TableHead => Frame::Element(ElementKind::TableHead, Vec::new()),
            Tag::TableRow => Frame::Element(ElementKind::TableRow, Vec::new()),
            Tag::TableCell => Frame::Element(ElementKind::TableCell, Vec::new()),
            Tag::Emphasis => Frame::Element(ElementKind::Emphasis, Vec::new()),
            Tag::Strong => Frame::Element(ElementKind::Strong, Vec::new()),
            Tag::Strikethrough => Frame::Element(ElementKind::Strikethrough, Vec::new()),
            Tag::Link {
                dest_url, title, ..
            } => Frame::Element(
                ElementKind::Link {
                    dest: dest_url.to_string(),
                    title: title.to_string(),
                },
                Vec::new(),
            ),
            Tag::Image {
                dest_url, title, ..
            } => Frame::Element(
                ElementKind::Image {
                    dest: dest_url.to_string(),
                    title: title.to_string(),
                },
                Vec::new(),
            ),
            _ => Frame::Transparent(Vec::new()),
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            tracing::warn!(target: "notes::preview", "unbalanced end event");
            return;
        };
        match frame {
            Frame::Element(kind, children) => self.push_node(Node::Element { kind, children }),
            Frame::Code { language, buffer } => {
                self.push_node(Node::CodeBlock {
                    language,
                    code: buffer,
                })
            }
            Frame::Transparent(children) => self.push_nodes(children),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(Frame::Code { buffer, .. }) = self.stack.last_mut() {
            buffer.push_str(text);
            return;
        }
        // merge adjacent text, the parser splits on entities and brackets
        let target = match self.stack.last_mut().and_then(Frame::children_mut) {
            Some(children) => children,
            None => &mut self.root,
        };
        if let Some(Node::Text(prev)) = target.last_mut() {
            let mut joined = String::with_capacity(prev.len() + text.len());
            joined.push_str(prev);
            joined.push_str(text);
            *prev = SmolStr::new(joined);
        } else {
            target.push(Node::text(text));
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_node(Node::InlineCode(SmolStr::new(&*code))),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_node(Node::Html(html.to_string()))
            }
            Event::FootnoteReference(label) => {
                self.push_node(Node::FootnoteReference(SmolStr::new(&*label)))
            }
            Event::SoftBreak => self.push_node(Node::SoftBreak),
            Event::HardBreak => self.push_node(Node::HardBreak),
            Event::Rule => self.push_node(Node::Rule),
            Event::TaskListMarker(checked) => self.push_node(Node::TaskMarker(checked)),
            // math and metadata blocks are not enabled
            other => {
                tracing::trace!(target: "notes::preview", ?other, "unhandled markdown event");
            }
        }
    }

    fn finish(mut self) -> Vec<Node> {
        while !self.stack.is_empty() {
            self.end();
        }
        self.root
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn align(alignment: Alignment) -> Align {
    match alignment {
        Alignment::None => Align::None,
        Alignment::Left => Align::Left,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Right,
    }
}

/// Parse `text` into block nodes with bare URLs linkified.
///
/// Code blocks come out as plain `Node::CodeBlock`; highlighting is the
/// renderer registry's job.
pub fn build(text: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(text, parser_options()) {
        builder.event(event);
    }
    super::autolink::linkify_nodes(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let nodes = build("# Title\n\nSome *em* text");
        assert_eq!(
            nodes,
            vec![
                Node::element(ElementKind::Heading(1), vec![Node::text("Title")]),
                Node::element(
                    ElementKind::Paragraph,
                    vec![
                        Node::text("Some "),
                        Node::element(ElementKind::Emphasis, vec![Node::text("em")]),
                        Node::text(" text"),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_fenced_code_keeps_language_and_content() {
        let nodes = build("```rust\nfn main() {}\n```");
        assert_eq!(
            nodes,
            vec![Node::CodeBlock {
                language: Some("rust".into()),
                code: "fn main() {}\n".into(),
            }]
        );
    }

    #[test]
    fn test_task_list() {
        let nodes = build("- [x] done\n- [ ] todo");
        let Node::Element { kind, children } = &nodes[0] else {
            panic!("expected list");
        };
        assert_eq!(*kind, ElementKind::List(None));
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].children()[0], Node::TaskMarker(true));
        assert_eq!(children[1].children()[0], Node::TaskMarker(false));
    }

    #[test]
    fn test_ordered_list_start() {
        let nodes = build("3. three\n4. four");
        assert!(matches!(
            &nodes[0],
            Node::Element {
                kind: ElementKind::List(Some(3)),
                ..
            }
        ));
    }

    #[test]
    fn test_strikethrough_and_angle_autolink() {
        let nodes = build("~~old~~ <https://a.io>");
        let para = nodes[0].children();
        assert_eq!(
            para[0],
            Node::element(ElementKind::Strikethrough, vec![Node::text("old")])
        );
        assert!(matches!(
            &para[2],
            Node::Element { kind: ElementKind::Link { dest, .. }, .. } if dest == "https://a.io"
        ));
    }

    #[test]
    fn test_text_is_merged() {
        let nodes = build("a &amp; b");
        assert_eq!(
            nodes,
            vec![Node::element(ElementKind::Paragraph, vec![Node::text("a & b")])]
        );
    }
}
