//! Language-keyed syntax highlighting for fenced code.
//!
//! Output is scope classes only. Hosts generate matching CSS from a syntect
//! theme with `css_for_theme_with_class_style(theme, ClassStyle::Spaced)`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::Result;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A run of text sharing one scope stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Space-separated scope atoms, outermost first (`source rust storage type`).
    pub classes: String,
}

/// One source line of highlighted code, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighlightedLine {
    pub tokens: Vec<Token>,
}

impl HighlightedLine {
    /// The line's text with highlighting removed.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

/// Extract the language key from a fence info string.
///
/// The key is the leading run of word characters of the first word, so
/// `rust,ignore` and `rust title="x"` both give `rust`. Empty means no language.
pub fn language_key(info: &str) -> Option<SmolStr> {
    let first = info.split_whitespace().next()?;
    let key: String = first
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!key.is_empty()).then(|| SmolStr::new(key))
}

/// Drop a single trailing line terminator from fenced code content.
pub fn strip_trailing_newline(code: &str) -> &str {
    code.strip_suffix("\r\n")
        .or_else(|| code.strip_suffix('\n'))
        .unwrap_or(code)
}

/// Syntect-backed highlighter over the default syntax set.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    syntaxes: &'static SyntaxSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: &SYNTAX_SET,
        }
    }

    fn syntax_for(&self, language: &str) -> Option<&'static SyntaxReference> {
        self.syntaxes.find_syntax_by_token(language)
    }

    /// Whether `language` resolves to a known syntax.
    pub fn supports(&self, language: &str) -> bool {
        self.syntax_for(language).is_some()
    }

    /// Highlight `code` as `language`.
    ///
    /// Returns `Ok(None)` for an unknown language; the caller renders plain code.
    pub fn highlight(&self, language: &str, code: &str) -> Result<Option<Vec<HighlightedLine>>> {
        let Some(syntax) = self.syntax_for(language) else {
            tracing::trace!(target: "notes::highlight", language, "no syntax for language");
            return Ok(None);
        };

        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = state.parse_line(line, self.syntaxes)?;
            let mut tokens = Vec::new();
            let mut cursor = 0;
            for (index, op) in ops {
                if index > cursor {
                    push_token(&mut tokens, &line[cursor..index], &stack);
                    cursor = index;
                }
                stack.apply(&op)?;
            }
            push_token(&mut tokens, &line[cursor..], &stack);
            lines.push(HighlightedLine { tokens });
        }

        Ok(Some(lines))
    }
}

fn push_token(tokens: &mut Vec<Token>, text: &str, stack: &ScopeStack) {
    let text = text.trim_end_matches(['\n', '\r']);
    if text.is_empty() {
        return;
    }
    let classes = scope_classes(stack);
    // merge neighbours that ended up with identical scopes
    if let Some(last) = tokens.last_mut() {
        if last.classes == classes {
            last.text.push_str(text);
            return;
        }
    }
    tokens.push(Token {
        text: text.to_string(),
        classes,
    });
}

fn scope_classes(stack: &ScopeStack) -> String {
    let mut classes = String::new();
    for scope in stack.as_slice() {
        for atom in scope.build_string().split('.') {
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(atom);
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_key() {
        assert_eq!(language_key("rust").as_deref(), Some("rust"));
        assert_eq!(language_key("rust,ignore").as_deref(), Some("rust"));
        assert_eq!(language_key("  python title=\"a.py\"").as_deref(), Some("python"));
        assert_eq!(language_key(""), None);
        assert_eq!(language_key("   "), None);
        assert_eq!(language_key("{.rust}"), None);
    }

    #[test]
    fn test_strip_single_trailing_newline() {
        assert_eq!(strip_trailing_newline("a\n"), "a");
        assert_eq!(strip_trailing_newline("a\n\n"), "a\n");
        assert_eq!(strip_trailing_newline("a\r\n"), "a");
        assert_eq!(strip_trailing_newline("a"), "a");
    }

    #[test]
    fn test_highlight_rust_preserves_text() {
        let hl = Highlighter::new();
        let code = "fn main() {\n    let x = 1;\n}";
        let lines = hl.highlight("rust", code).unwrap().unwrap();
        assert_eq!(lines.len(), 3);
        let text: Vec<String> = lines.iter().map(HighlightedLine::text).collect();
        assert_eq!(text.join("\n"), code);
        let first = &lines[0].tokens[0];
        assert!(first.text.starts_with("fn"));
        assert!(first.classes.starts_with("source rust"), "{}", first.classes);
        assert!(lines[0].tokens.len() > 1);
    }

    #[test]
    fn test_extension_token_resolves() {
        let hl = Highlighter::new();
        assert!(hl.supports("rs"));
        assert!(hl.supports("python"));
        assert!(hl.supports("py"));
    }

    #[test]
    fn test_unknown_language_is_none() {
        let hl = Highlighter::new();
        assert!(!hl.supports("definitely-not-a-language"));
        assert_eq!(hl.highlight("definitely-not-a-language", "x").unwrap(), None);
    }

    #[test]
    fn test_empty_code_has_no_lines() {
        let hl = Highlighter::new();
        assert_eq!(hl.highlight("rust", "").unwrap(), Some(vec![]));
    }
}
