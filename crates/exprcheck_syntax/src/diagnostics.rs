//! Source-located errors and their binding into source text.
//!
//! A [`SourceError`] is what the checker records while walking the tree: a message and a span. Once the walk is
//! over it is bound to the tree's source text, producing a [`BoundError`] with a 1-based line/column and a snippet
//! pointing at the offending column:
//!
//! ```text
//! invalid operation: + (mismatched types int and string) (1:3)
//!  | 1 + "a"
//!  | ..^
//! ```

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// An error message attached to a source span, not yet bound to source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    pub message: String,
    pub span: Span,
}

impl SourceError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Resolve the span against `source`, producing line/column information and a caret snippet.
    pub fn bind(&self, source: &str) -> BoundError {
        let (line, column, line_text) = get_line_info(source, self.span.start);
        let snippet = if source.is_empty() {
            String::new()
        } else {
            let text = line_text.replace('\t', " ");
            format!("\n | {}\n | {}^", text, ".".repeat(column - 1))
        };
        tracing::trace!(line, column, "bound diagnostic to source");

        let start = self.span.start.min(source.len());
        let len = self.span.end.saturating_sub(self.span.start).min(source.len() - start);
        BoundError {
            message: self.message.clone(),
            line,
            column,
            snippet,
            source_code: source.to_string(),
            span: SourceSpan::new(start.into(), len),
        }
    }
}

/// An error bound to the source it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message} ({line}:{column}){snippet}")]
#[diagnostic(code(exprcheck::type_error))]
pub struct BoundError {
    pub message: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Source line and caret line, each prefixed with `\n | `. Empty when there is no source.
    pub snippet: String,
    #[source_code]
    pub source_code: String,
    #[label("here")]
    pub span: SourceSpan,
}

/// Get line number, column number (both 1-based), and line text for a byte offset.
///
/// Columns count characters, so multi-byte text before the offset shifts the column by one per character.
fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = &source[line_start..line_end];
    let col_num = source[line_start..]
        .char_indices()
        .take_while(|(i, _)| line_start + i < offset)
        .count()
        + 1;

    (line_num, col_num, line_text)
}
