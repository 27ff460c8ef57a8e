use thiserror::Error;

use crate::ast::RangeError;
use crate::diagnostics::ParseError;
use crate::grammar::RuleId;
use crate::keyword::Keyword;
use crate::lexer::LexError;
use crate::token::TokenKind;

/// Any failure turning a line into an [`Interaction`](crate::ast::Interaction).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl Error {
    /// Byte offset the error points at, when it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lex(error) => Some(error.position),
            Error::Parse(error) => Some(error.position),
            Error::Build(_) => None,
        }
    }

    /// Renders a report against `source`. Build errors have no span and render as text.
    pub fn report(&self, source_name: &str, source: &str) -> String {
        match self {
            Error::Lex(error) => error.report(source_name, source),
            Error::Parse(error) => error.report(source_name, source),
            Error::Build(error) => error.to_string(),
        }
    }
}

/// The syntax tree did not have the shape the AST builder expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("`{0}` is missing its `{1}` child")]
    MissingRule(RuleId, RuleId),
    #[error("`{rule}` is missing a {kind} token")]
    MissingToken { rule: RuleId, kind: TokenKind },
    #[error("`{0}` does not start with a keyword")]
    MissingKeyword(RuleId),
    #[error("`{0}` has no placeholder child")]
    MissingPlaceholder(RuleId),
    #[error("`{keyword}` is not in the `{rule}` family")]
    UnknownKeyword { rule: RuleId, keyword: Keyword },
    #[error("`{0}` cannot appear inside a tool path")]
    MisplacedRule(RuleId),
    #[error("`{0}` produced an empty path")]
    EmptyPath(RuleId),
    #[error("malformed {kind} `{lexeme}`")]
    Literal { kind: TokenKind, lexeme: String },
    #[error(transparent)]
    Range(#[from] RangeError),
}
