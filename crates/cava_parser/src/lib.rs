//! Parser for CAVA interaction log lines.
//!
//! A line such as
//!
//! ```text
//! Mouse:Left Click>Ghidra:Menu:File:Open>Ghidra:ExecuteMenuAction:File:Open
//! ```
//!
//! is an input event, the tool context it happened in and, optionally, the tool action it
//! triggered. [`parse`] turns it into an [`Interaction`]; `Display` prints it back.

pub mod ast;
mod ast_build;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod vocab;

pub use ast::Interaction;
pub use diagnostics::ParseError;
pub use error::{BuildError, Error};
pub use lexer::{LexError, Lexer};
pub use parser::{InteractionParser, ParseOptions, PlaceholderSpan};
pub use token::{Token, TokenKind};

/// Parses one line with the default options.
pub fn parse(line: &str) -> Result<Interaction, Error> {
    InteractionParser::default().parse(line)
}

/// Splits one line into tokens.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, LexError> {
    lexer::tokenize(line)
}
