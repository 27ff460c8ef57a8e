#![allow(dead_code)]

use cava_parser::ast::Interaction;
use cava_parser::lexer::tokenize;
use cava_parser::token::{Token, TokenKind};
use cava_parser::{InteractionParser, ParseOptions};
use tracing_subscriber::EnvFilter;

/// Lex `src` and return the tokens (panicking on lexer errors).
pub fn lex_tokens(src: &str) -> Vec<Token<'_>> {
    match tokenize(src) {
        Ok(tokens) => tokens,
        Err(error) => panic!("lexer error for {:?}: {:#?}", src, error),
    }
}

/// Lex `src` and keep only the token kinds.
pub fn lex_kinds(src: &str) -> Vec<TokenKind> {
    lex_tokens(src).into_iter().map(|token| token.kind).collect()
}

/// Installs a `RUST_LOG`-filtered subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse `src` with `options`, panicking with the rendered report on failure.
pub fn parse_with(src: &str, options: ParseOptions) -> Interaction {
    init_tracing();
    match InteractionParser::new(options).parse(src) {
        Ok(interaction) => interaction,
        Err(error) => panic!(
            "expected success on {:?}, got error:\n{}",
            src,
            error.report("line", src)
        ),
    }
}

/// Parse `src` with default options.
pub fn parse_ok(src: &str) -> Interaction {
    parse_with(src, ParseOptions::default())
}
