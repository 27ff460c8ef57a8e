//! A generic backtracking engine over [`GRAMMAR`].
//!
//! Every rule tries its alternatives in order against a saved cursor; a failing
//! alternative rewinds the cursor and the children it pushed, so nothing a failed branch
//! consumed leaks into the next one. Optional groups and repetitions checkpoint the same
//! way. The furthest failure is remembered for error reporting.

use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::ast::Interaction;
use crate::ast_build;
use crate::diagnostics::{Expected, ParseError};
use crate::error::Error;
use crate::grammar::{GRAMMAR, Grammar, RuleId, Term};
use crate::keyword::Keyword;
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// How many tokens a placeholder consumes.
///
/// Inside a tool path a placeholder never takes the segment's last token when that token
/// is a `{program}`; it is left for the path's program suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderSpan {
    /// Nothing.
    Empty,
    /// The next token, unless it is `>` or there is none.
    OneToken,
    /// Everything up to the next `>` or the end of the line.
    #[default]
    ToSegmentEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown placeholder span `{0}`, expected one of: empty, one-token, segment")]
pub struct PlaceholderSpanError(String);

impl FromStr for PlaceholderSpan {
    type Err = PlaceholderSpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(PlaceholderSpan::Empty),
            "one-token" => Ok(PlaceholderSpan::OneToken),
            "segment" => Ok(PlaceholderSpan::ToSegmentEnd),
            other => Err(PlaceholderSpanError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub placeholder: PlaceholderSpan,
}

impl ParseOptions {
    pub fn with_placeholder(mut self, placeholder: PlaceholderSpan) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Concrete syntax tree produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'src> {
    Rule {
        rule: RuleId,
        children: Vec<Node<'src>>,
    },
    Token(Token<'src>),
    /// Tokens swallowed by a placeholder, starting at byte `offset`.
    Unsupported {
        tokens: Vec<Token<'src>>,
        offset: usize,
    },
}

impl<'src> Node<'src> {
    pub fn rule(&self) -> Option<RuleId> {
        match self {
            Node::Rule { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node<'src>] {
        match self {
            Node::Rule { children, .. } => children,
            _ => &[],
        }
    }

    pub fn token(&self) -> Option<&Token<'src>> {
        match self {
            Node::Token(token) => Some(token),
            _ => None,
        }
    }

    /// First direct child built by `rule`.
    pub fn child(&self, rule: RuleId) -> Option<&Node<'src>> {
        self.children().iter().find(|child| child.rule() == Some(rule))
    }

    /// First keyword among the direct children.
    pub fn head(&self) -> Option<Keyword> {
        self.children()
            .iter()
            .filter_map(Node::token)
            .find_map(Token::keyword)
    }

    /// Direct child tokens of `kind`.
    pub fn tokens(&self, kind: TokenKind) -> impl Iterator<Item = &Token<'src>> {
        self.children()
            .iter()
            .filter_map(Node::token)
            .filter(move |token| token.kind == kind)
    }

    /// First direct placeholder child.
    pub fn placeholder(&self) -> Option<&Node<'src>> {
        self.children()
            .iter()
            .find(|child| matches!(child, Node::Unsupported { .. }))
    }
}

#[derive(Debug, Default)]
struct Furthest {
    index: usize,
    expected: BTreeSet<Expected>,
    rule_stack: Vec<RuleId>,
}

struct Engine<'a, 'src> {
    grammar: &'static Grammar,
    tokens: &'a [Token<'src>],
    eof: usize,
    options: ParseOptions,
    cursor: usize,
    stack: Vec<RuleId>,
    furthest: Option<Furthest>,
}

impl<'a, 'src> Engine<'a, 'src> {
    fn new(tokens: &'a [Token<'src>], eof: usize, options: ParseOptions) -> Self {
        Self {
            grammar: &GRAMMAR,
            tokens,
            eof,
            options,
            cursor: 0,
            stack: Vec::new(),
            furthest: None,
        }
    }

    fn run(mut self) -> Result<Node<'src>, ParseError> {
        let start = self.grammar.start();
        if let Some(tree) = self.rule(start) {
            if self.cursor == self.tokens.len() {
                return Ok(tree);
            }
            // The whole line must be consumed
            self.expect(Expected::EndOfInput);
        }
        Err(self.into_error())
    }

    fn rule(&mut self, id: RuleId) -> Option<Node<'src>> {
        let def = self.grammar.rule(id);
        let start = self.cursor;
        self.stack.push(id);

        let mut matched = None;
        for (index, alternative) in def.alternatives.iter().enumerate() {
            let mut children = Vec::new();
            if self.sequence(alternative, &mut children) {
                trace!(rule = def.name, alternative = index, start, end = self.cursor, "matched");
                matched = Some(Node::Rule { rule: id, children });
                break;
            }
            trace!(rule = def.name, alternative = index, start, "backtrack");
            self.cursor = start;
        }

        self.stack.pop();
        matched
    }

    fn sequence(&mut self, terms: &[Term], out: &mut Vec<Node<'src>>) -> bool {
        terms.iter().all(|term| self.term(term, out))
    }

    /// Matches `terms` as a unit: on failure the cursor and `out` are restored.
    fn group(&mut self, terms: &[Term], out: &mut Vec<Node<'src>>) -> bool {
        let (cursor, len) = (self.cursor, out.len());
        if self.sequence(terms, out) {
            return true;
        }
        self.cursor = cursor;
        out.truncate(len);
        false
    }

    fn term(&mut self, term: &Term, out: &mut Vec<Node<'src>>) -> bool {
        match *term {
            Term::Token(kind) => match self.tokens.get(self.cursor) {
                Some(token) if token.kind == kind => {
                    out.push(Node::Token(*token));
                    self.cursor += 1;
                    true
                }
                _ => {
                    self.expect(Expected::Token(kind));
                    false
                }
            },
            Term::Rule(id) => match self.rule(id) {
                Some(node) => {
                    out.push(node);
                    true
                }
                None => false,
            },
            Term::Optional(terms) => {
                self.group(terms, out);
                true
            }
            Term::Repeat(terms) => {
                if !self.group(terms, out) {
                    return false;
                }
                loop {
                    let before = self.cursor;
                    if !self.group(terms, out) || self.cursor == before {
                        break;
                    }
                }
                true
            }
            Term::Unsupported => {
                let node = self.placeholder();
                out.push(node);
                true
            }
        }
    }

    fn placeholder(&mut self) -> Node<'src> {
        let start = self.cursor;
        let rest = &self.tokens[start..];
        let mut segment_end = rest
            .iter()
            .position(|token| token.kind == TokenKind::RAngle)
            .unwrap_or(rest.len());
        // A trailing `{program}` in a tool path is the path's suffix, never placeholder text
        if self.in_tool_path()
            && segment_end > 0
            && rest[segment_end - 1].kind == TokenKind::ProgramName
        {
            segment_end -= 1;
        }
        let taken = match self.options.placeholder {
            PlaceholderSpan::Empty => 0,
            PlaceholderSpan::OneToken => segment_end.min(1),
            PlaceholderSpan::ToSegmentEnd => segment_end,
        };
        self.cursor += taken;
        Node::Unsupported {
            tokens: rest[..taken].to_vec(),
            offset: self.offset(start),
        }
    }

    fn in_tool_path(&self) -> bool {
        self.stack
            .iter()
            .any(|rule| matches!(rule, RuleId::ToolContext | RuleId::ToolAction))
    }

    fn offset(&self, index: usize) -> usize {
        self.tokens.get(index).map_or(self.eof, |token| token.span.start)
    }

    fn expect(&mut self, expected: Expected) {
        let at = self.cursor;
        if let Some(furthest) = self.furthest.as_mut() {
            if furthest.index > at {
                return;
            }
            if furthest.index == at {
                furthest.expected.insert(expected);
                if self.stack.len() > furthest.rule_stack.len() {
                    furthest.rule_stack = self.stack.clone();
                }
                return;
            }
        }
        self.furthest = Some(Furthest {
            index: at,
            expected: BTreeSet::from([expected]),
            rule_stack: self.stack.clone(),
        });
    }

    fn into_error(self) -> ParseError {
        let furthest = self.furthest.unwrap_or_else(|| Furthest {
            index: self.cursor,
            ..Furthest::default()
        });
        ParseError {
            position: self
                .tokens
                .get(furthest.index)
                .map_or(self.eof, |token| token.span.start),
            found: self
                .tokens
                .get(furthest.index)
                .map(|token| token.lexeme.to_string()),
            rule_stack: furthest.rule_stack,
            expected: furthest.expected,
        }
    }
}

/// Parses interaction lines with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionParser {
    options: ParseOptions,
}

impl InteractionParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Lexes and parses one line.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, line: &str) -> Result<Interaction, Error> {
        let tokens = tokenize(line)?;
        let tree = Engine::new(&tokens, line.len(), self.options).run()?;
        let interaction = ast_build::interaction(&tree)?;
        debug!(tokens = tokens.len(), "parsed interaction");
        Ok(interaction)
    }

    /// Parses an already lexed line.
    pub fn parse_tokens(&self, tokens: &[Token<'_>]) -> Result<Interaction, Error> {
        let tree = self.syntax_tree(tokens)?;
        Ok(ast_build::interaction(&tree)?)
    }

    /// Runs the engine only, returning the concrete syntax tree.
    pub fn syntax_tree<'src>(&self, tokens: &[Token<'src>]) -> Result<Node<'src>, ParseError> {
        let eof = tokens.last().map_or(0, |token| token.span.end);
        let result = Engine::new(tokens, eof, self.options).run();
        if let Err(error) = &result {
            debug!(%error, "parse failed");
        }
        result
    }
}
