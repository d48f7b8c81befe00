//! HTML serialization of the document tree for web hosts.

use std::fmt::{self, Write as FmtWrite};

use pulldown_cmark_escape::{escape_href, escape_html, escape_html_body_text};

use super::tree::{Align, DocumentView, ElementKind, Node};

/// Plain string sink for HTML output.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl FmtWrite for HtmlWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}

impl pulldown_cmark_escape::StrWrite for HtmlWriter {
    type Error = fmt::Error;

    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        FmtWrite::write_fmt(&mut self.out, args)
    }
}

/// URL schemes allowed through to `href`/`src`.
const SAFE_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// `dest` unchanged when it is relative or uses a safe scheme, otherwise
/// empty.
pub fn safe_url(dest: &str) -> &str {
    match dest.find([':', '/', '?', '#']) {
        Some(i) if dest[i..].starts_with(':') => {
            let scheme = &dest[..i];
            if SAFE_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) {
                dest
            } else {
                tracing::debug!(target: "notes::preview", scheme, "dropped link target");
                ""
            }
        }
        _ => dest,
    }
}

#[derive(Default)]
struct TableState {
    alignments: Vec<Align>,
    in_head: bool,
    body_open: bool,
    cell: usize,
}

/// Walks a `DocumentView` and writes HTML.
pub struct HtmlRenderer<'w> {
    writer: &'w mut HtmlWriter,
    table: TableState,
}

impl<'w> HtmlRenderer<'w> {
    pub fn new(writer: &'w mut HtmlWriter) -> Self {
        Self {
            writer,
            table: TableState::default(),
        }
    }

    fn write(&mut self, s: &str) -> fmt::Result {
        FmtWrite::write_str(&mut *self.writer, s)
    }

    pub fn render(&mut self, doc: &DocumentView) -> fmt::Result {
        for block in &doc.blocks {
            self.node(block)?;
        }
        Ok(())
    }

    fn nodes(&mut self, nodes: &[Node]) -> fmt::Result {
        for node in nodes {
            self.node(node)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Element { kind, children } => self.element(kind, children),
            Node::Text(text) => escape_html_body_text(&mut *self.writer, text),
            Node::InlineCode(code) => {
                self.write("<code>")?;
                escape_html_body_text(&mut *self.writer, code)?;
                self.write("</code>")
            }
            Node::CodeBlock { language, code } => {
                match language {
                    Some(lang) => {
                        self.write("<pre><code class=\"language-")?;
                        escape_html(&mut *self.writer, lang)?;
                        self.write("\">")?;
                    }
                    None => self.write("<pre><code>")?,
                }
                escape_html_body_text(&mut *self.writer, code)?;
                self.write("</code></pre>\n")
            }
            Node::HighlightedCode { language, lines } => {
                self.write("<pre class=\"code\"><code class=\"language-")?;
                escape_html(&mut *self.writer, language)?;
                self.write("\">")?;
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        self.write("\n")?;
                    }
                    for token in &line.tokens {
                        self.write("<span class=\"")?;
                        escape_html(&mut *self.writer, &token.classes)?;
                        self.write("\">")?;
                        escape_html_body_text(&mut *self.writer, &token.text)?;
                        self.write("</span>")?;
                    }
                }
                self.write("</code></pre>\n")
            }
            Node::SoftBreak => self.write("\n"),
            Node::HardBreak => self.write("<br />\n"),
            Node::Rule => self.write("<hr />\n"),
            Node::TaskMarker(true) => {
                self.write("<input disabled=\"\" type=\"checkbox\" checked=\"\"/>\n")
            }
            Node::TaskMarker(false) => self.write("<input disabled=\"\" type=\"checkbox\"/>\n"),
            // Raw HTML in a note is shown as text, never injected
            Node::Html(html) => escape_html_body_text(&mut *self.writer, html),
            Node::FootnoteReference(label) => {
                self.write("<sup class=\"footnote-reference\"><a href=\"#")?;
                escape_html(&mut *self.writer, label)?;
                self.write("\">")?;
                escape_html_body_text(&mut *self.writer, label)?;
                self.write("</a></sup>")
            }
        }
    }

    fn element(&mut self, kind: &ElementKind, children: &[Node]) -> fmt::Result {
        match kind {
            ElementKind::Paragraph => {
                self.write("<p>")?;
                self.nodes(children)?;
                self.write("</p>\n")
            }
            ElementKind::Heading(level) => {
                write!(self.writer, "<h{level}>")?;
                self.nodes(children)?;
                write!(self.writer, "</h{level}>\n")
            }
            ElementKind::BlockQuote => {
                self.write("<blockquote>\n")?;
                self.nodes(children)?;
                self.write("</blockquote>\n")
            }
            ElementKind::List(Some(1)) => {
                self.write("<ol>\n")?;
                self.nodes(children)?;
                self.write("</ol>\n")
            }
            ElementKind::List(Some(start)) => {
                write!(self.writer, "<ol start=\"{start}\">\n")?;
                self.nodes(children)?;
                self.write("</ol>\n")
            }
            ElementKind::List(None) => {
                self.write("<ul>\n")?;
                self.nodes(children)?;
                self.write("</ul>\n")
            }
            ElementKind::Item => {
                self.write("<li>")?;
                self.nodes(children)?;
                self.write("</li>\n")
            }
            ElementKind::Table(alignments) => {
                let outer = std::mem::replace(
                    &mut self.table,
                    TableState {
                        alignments: alignments.clone(),
                        ..TableState::default()
                    },
                );
                self.write("<table>")?;
                self.nodes(children)?;
                if self.table.body_open {
                    self.write("</tbody>")?;
                }
                self.write("</table>\n")?;
                self.table = outer;
                Ok(())
            }
            ElementKind::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.write("<thead><tr>")?;
                self.nodes(children)?;
                self.table.in_head = false;
                self.write("</tr></thead>\n")
            }
            ElementKind::TableRow => {
                if !self.table.body_open {
                    self.write("<tbody>\n")?;
                    self.table.body_open = true;
                }
                self.table.cell = 0;
                self.write("<tr>")?;
                self.nodes(children)?;
                self.write("</tr>\n")
            }
            ElementKind::TableCell => {
                let tag = if self.table.in_head { "th" } else { "td" };
                let style = match self.table.alignments.get(self.table.cell) {
                    Some(Align::Left) => " style=\"text-align: left\"",
                    Some(Align::Center) => " style=\"text-align: center\"",
                    Some(Align::Right) => " style=\"text-align: right\"",
                    _ => "",
                };
                write!(self.writer, "<{tag}{style}>")?;
                self.nodes(children)?;
                self.table.cell += 1;
                write!(self.writer, "</{tag}>")
            }
            ElementKind::Emphasis => {
                self.write("<em>")?;
                self.nodes(children)?;
                self.write("</em>")
            }
            ElementKind::Strong => {
                self.write("<strong>")?;
                self.nodes(children)?;
                self.write("</strong>")
            }
            ElementKind::Strikethrough => {
                self.write("<del>")?;
                self.nodes(children)?;
                self.write("</del>")
            }
            ElementKind::Link { dest, title } => {
                self.write("<a href=\"")?;
                escape_href(&mut *self.writer, safe_url(dest))?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut *self.writer, title)?;
                }
                self.write("\">")?;
                self.nodes(children)?;
                self.write("</a>")
            }
            ElementKind::Image { dest, title } => {
                self.write("<img src=\"")?;
                escape_href(&mut *self.writer, safe_url(dest))?;
                self.write("\" alt=\"")?;
                let alt = DocumentView::new(children.to_vec()).plain_text();
                escape_html(&mut *self.writer, &alt)?;
                if !title.is_empty() {
                    self.write("\" title=\"")?;
                    escape_html(&mut *self.writer, title)?;
                }
                self.write("\" />")
            }
            ElementKind::FootnoteDefinition(label) => {
                self.write("<div class=\"footnote-definition\" id=\"")?;
                escape_html(&mut *self.writer, label)?;
                self.write("\"><sup class=\"footnote-definition-label\">")?;
                escape_html_body_text(&mut *self.writer, label)?;
                self.write("</sup>\n")?;
                self.nodes(children)?;
                self.write("</div>\n")
            }
        }
    }
}

impl DocumentView {
    /// Serialize to HTML. Highlighted code becomes `<span class="...">` runs.
    pub fn to_html(&self) -> String {
        let mut writer = HtmlWriter::new();
        if let Err(e) = HtmlRenderer::new(&mut writer).render(self) {
            tracing::error!(target: "notes::preview", "html serialization failed: {e}");
        }
        writer.into_string()
    }
}
