use std::iter::FusedIterator;

use chumsky::prelude::*;
use thiserror::Error;
use tracing::trace;

use crate::keyword::Keyword;
use crate::token::{Span, Token, TokenKind};

type LexExtra<'src> = extra::Err<Rich<'src, char, SimpleSpan>>;

/// One lexed item: a token, or the byte offset of the first unrecognized character.
type Lexed<'src> = Result<(TokenKind, &'src str, SimpleSpan), usize>;

/// The lexer could not recognize any token at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input `{fragment}` at position {position}")]
pub struct LexError {
    /// Byte offset of the first unrecognized character.
    pub position: usize,
    /// Source text from `position` up to the next whitespace.
    pub fragment: String,
}

impl LexError {
    fn at(source: &str, position: usize) -> Self {
        let fragment = source[position..]
            .split(is_whitespace)
            .next()
            .unwrap_or_default()
            .to_string();
        Self { position, fragment }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.')
}

fn is_program_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ')
}

/// Classifies a maximal run of word characters.
///
/// Keywords win over every generic category, then addresses, line numbers and key codes.
/// What is left is a symbol when it starts like an identifier and text otherwise.
pub fn classify(word: &str) -> TokenKind {
    if let Some(keyword) = Keyword::from_lexeme(word) {
        return TokenKind::Keyword(keyword);
    }
    if let Some(hex) = word.strip_prefix("0x") {
        if !hex.is_empty()
            && hex.chars().all(|c| c.is_ascii_hexdigit())
            && u64::from_str_radix(hex, 16).is_ok()
        {
            return TokenKind::ProgramAddress;
        }
    }
    if word.chars().all(|c| c.is_ascii_digit())
        && (word == "0" || !word.starts_with('0'))
        && word.parse::<u64>().is_ok()
    {
        return TokenKind::LineNumber;
    }
    if let Some(code) = word.strip_prefix("KEY_") {
        if !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return TokenKind::KeyCode;
        }
    }
    match word.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => TokenKind::GenericSymbol,
        _ => TokenKind::GenericText,
    }
}

fn punctuation<'src>(
    symbol: char,
    kind: TokenKind,
    lexeme: &'src str,
) -> impl Parser<'src, &'src str, (TokenKind, &'src str), LexExtra<'src>> {
    just(symbol).to((kind, lexeme))
}

/// Constructs the parser for exactly one token at the start of its input.
///
/// This handles:
/// - Program names in braces: `{crackme.exe}`
/// - Plugin elements in parentheses: `(File Name)`
/// - Punctuation: `:`, `>`, `[`, `]`, `-`
/// - Word runs of `[A-Za-z0-9_.]`, classified by [`classify`]
///
pub fn token<'src>()
-> impl Parser<'src, &'src str, (TokenKind, &'src str, SimpleSpan), LexExtra<'src>> {
    let program_name = just('{')
        .then(
            any()
                .filter(|c: &char| is_program_name_char(*c))
                .repeated()
                .at_least(1),
        )
        .then(just('}'))
        .to_slice()
        .map(|lexeme| (TokenKind::ProgramName, lexeme));

    let plugin_element = just('(')
        .then(none_of("()\r\n").repeated().at_least(1))
        .then(just(')'))
        .to_slice()
        .map(|lexeme| (TokenKind::PluginElement, lexeme));

    // Maximal munch: `SaveToolAs` is one word, never `Save` followed by `ToolAs`
    let word = any()
        .filter(|c: &char| is_word_char(*c))
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|lexeme: &'src str| (classify(lexeme), lexeme));

    let symbol = choice((
        punctuation(':', TokenKind::Colon, ":"),
        punctuation('>', TokenKind::RAngle, ">"),
        punctuation('[', TokenKind::LBracket, "["),
        punctuation(']', TokenKind::RBracket, "]"),
        punctuation('-', TokenKind::Dash, "-"),
    ));

    choice((program_name, plugin_element, symbol, word))
        .map_with(|(kind, lexeme), e| (kind, lexeme, e.span()))
}

/// The whole line as lexed items, in one pass.
///
/// Whitespace between tokens is skipped. At the first character no token accepts, the
/// rest of the line becomes a single error item.
fn line<'src>() -> impl Parser<'src, &'src str, Vec<Lexed<'src>>, LexExtra<'src>> {
    let whitespace = any().filter(|c: &char| is_whitespace(*c)).repeated();

    let unrecognized = any()
        .then_ignore(any().repeated())
        .map_with(|_, e| -> Lexed<'src> {
            let span: SimpleSpan = e.span();
            Err(span.start)
        });

    whitespace.clone().ignore_then(
        token()
            .map(Ok)
            .or(unrecognized)
            .then_ignore(whitespace)
            .repeated()
            .collect(),
    )
}

fn lex_line(source: &str) -> Vec<Result<Token<'_>, LexError>> {
    match line().parse(source).into_result() {
        Ok(items) => items
            .into_iter()
            .map(|item| match item {
                Ok((kind, lexeme, span)) => {
                    Ok(Token::new(kind, lexeme, Span::new(span.start, span.end)))
                }
                Err(position) => Err(LexError::at(source, position)),
            })
            .collect(),
        Err(errors) => {
            let position = errors.first().map_or(0, |error| error.span().start);
            vec![Err(LexError::at(source, position))]
        }
    }
}

/// Iterator over the tokens of one line.
///
/// The line is lexed on the first call to `next`. The iterator yields at most one error
/// and is exhausted afterwards; clone it (or build a new one) to restart.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    items: Option<std::vec::IntoIter<Result<Token<'src>, LexError>>>,
    offset: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            items: None,
            offset: 0,
            done: false,
        }
    }

    /// Byte offset just past the last token yielded.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let source = self.source;
        let item = self
            .items
            .get_or_insert_with(|| lex_line(source).into_iter())
            .next();
        match &item {
            Some(Ok(token)) => {
                self.offset = token.span.end;
                trace!(kind = ?token.kind, lexeme = token.lexeme, start = token.span.start, "lexed token");
            }
            Some(Err(_)) | None => self.done = true,
        }
        item
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes a whole line, failing on the first unrecognized character.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(line).collect()
}
