//! Positional parse errors and their human-readable rendering.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::grammar::RuleId;
use crate::lexer::LexError;
use crate::token::TokenKind;

/// Something that would have let the parser make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expected {
    Token(TokenKind),
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// The furthest point the parser reached before every alternative failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ParseError {
    /// Rules open at the failure point, outermost first.
    pub rule_stack: Vec<RuleId>,
    /// Byte offset of the offending token, or the line length at end of input.
    pub position: usize,
    pub expected: BTreeSet<Expected>,
    /// The offending lexeme; `None` at end of input.
    pub found: Option<String>,
}

impl ParseError {
    /// Whether `kind` is one of the tokens that would have been accepted.
    pub fn expects(&self, kind: TokenKind) -> bool {
        self.expected.contains(&Expected::Token(kind))
    }

    /// The innermost rule open at the failure point.
    pub fn rule(&self) -> Option<RuleId> {
        self.rule_stack.last().copied()
    }

    fn span(&self) -> Range<usize> {
        let width = self.found.as_ref().map_or(0, String::len);
        self.position..self.position + width
    }

    /// Renders a report against the line the tokens came from.
    pub fn report(&self, source_name: &str, source: &str) -> String {
        let label = match &self.found {
            Some(found) => format!("unexpected `{found}`"),
            None => "unexpected end of input".to_string(),
        };
        let note = match self.rule() {
            Some(rule) => format!("while parsing {rule}"),
            None => String::new(),
        };
        render(source_name, source, self.span(), &self.to_string(), &label, &note)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected ")?;
        let count = self.expected.len();
        for (index, expected) in self.expected.iter().enumerate() {
            match index {
                0 => {}
                i if i + 1 == count && count == 2 => f.write_str(" or ")?,
                i if i + 1 == count => f.write_str(", or ")?,
                _ => f.write_str(", ")?,
            }
            write!(f, "{expected}")?;
        }
        if count == 0 {
            f.write_str("nothing")?;
        }
        write!(f, " at position {}", self.position)?;
        if let Some(found) = &self.found {
            write!(f, ", found `{found}`")?;
        }
        Ok(())
    }
}

impl LexError {
    /// Renders a report against the line that failed to lex.
    pub fn report(&self, source_name: &str, source: &str) -> String {
        let span = self.position..self.position + self.fragment.len();
        render(source_name, source, span, &self.to_string(), "unrecognized input", "")
    }
}

fn render(
    source_name: &str,
    source: &str,
    span: Range<usize>,
    message: &str,
    label: &str,
    note: &str,
) -> String {
    let span = span.start.min(source.len())..span.end.min(source.len());
    let mut builder = Report::build(ReportKind::Error, (source_name, span.clone()))
        .with_config(
            Config::default()
                .with_color(false)
                .with_index_type(IndexType::Byte),
        )
        .with_message(message)
        .with_label(
            Label::new((source_name, span))
                .with_message(label)
                .with_color(Color::Red),
        );
    if !note.is_empty() {
        builder = builder.with_note(note);
    }

    let mut out = Vec::new();
    match builder.finish().write((source_name, Source::from(source)), &mut out) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => message.to_string(),
    }
}
