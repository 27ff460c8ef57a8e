//! Turns the engine's syntax tree into the typed AST.
//!
//! Structural rules (the device segment, the optional program suffix) are walked by hand.
//! Tool paths are walked generically: every `Segment` rule adds one [`PathSegment`] named
//! by its head keyword, `Argument` rules and open-category tokens attach to that segment,
//! and placeholders become [`Item::Unsupported`] segments.

use crate::ast::{
    Argument, CommandOption, InputEvent, Interaction, KeyCode, KeyboardAction, LineNumber,
    PathSegment, PluginElement, ProgramAddress, ProgramName, ProgramRange, RangeBound,
    ToolActionPath, ToolContextPath, Unsupported,
};
use crate::error::BuildError;
use crate::grammar::{RuleId, RuleKind};
use crate::keyword::Keyword;
use crate::parser::Node;
use crate::token::{Token, TokenKind};
use crate::vocab::{
    ButtonInteraction, CommentKind, Family, Item, MouseButton, PointerCrossing, ScrollDirection,
};

pub(crate) fn interaction(tree: &Node<'_>) -> Result<Interaction, BuildError> {
    let input = input_event(required(tree, RuleId::Interaction, RuleId::InputEvent)?)?;
    let context = tool_context(required(tree, RuleId::Interaction, RuleId::ToolContext)?)?;
    let action = tree
        .child(RuleId::ToolAction)
        .map(tool_action)
        .transpose()?;
    Ok(Interaction {
        input,
        context,
        action,
    })
}

fn required<'n, 'src>(
    node: &'n Node<'src>,
    parent: RuleId,
    rule: RuleId,
) -> Result<&'n Node<'src>, BuildError> {
    node.child(rule).ok_or(BuildError::MissingRule(parent, rule))
}

fn head(node: &Node<'_>, rule: RuleId) -> Result<Keyword, BuildError> {
    node.head().ok_or(BuildError::MissingKeyword(rule))
}

/// The family member a single-keyword rule matched.
fn member<F: Family>(node: &Node<'_>, rule: RuleId) -> Result<F, BuildError> {
    let keyword = head(node, rule)?;
    F::from_keyword(keyword).ok_or(BuildError::UnknownKeyword { rule, keyword })
}

fn input_event(node: &Node<'_>) -> Result<InputEvent, BuildError> {
    let rule = RuleId::InputEvent;
    match head(node, rule)? {
        Keyword::Mouse => mouse_action(required(node, rule, RuleId::MouseAction)?),
        Keyword::Keyboard => keyboard_action(required(node, rule, RuleId::KeyboardAction)?)
            .map(InputEvent::Keyboard),
        Keyword::Eye => {
            let eye = required(node, rule, RuleId::EyeAction)?;
            unsupported(eye)
                .ok_or(BuildError::MissingPlaceholder(RuleId::EyeAction))
                .map(InputEvent::Eye)
        }
        keyword => Err(BuildError::UnknownKeyword { rule, keyword }),
    }
}

fn mouse_action(node: &Node<'_>) -> Result<InputEvent, BuildError> {
    let rule = RuleId::MouseAction;
    if let Some(button) = node.child(RuleId::MouseButton) {
        let interaction = required(node, rule, RuleId::ButtonInteraction)?;
        return Ok(InputEvent::Mouse(
            member::<MouseButton>(button, RuleId::MouseButton)?,
            member::<ButtonInteraction>(interaction, RuleId::ButtonInteraction)?,
        ));
    }
    match head(node, rule)? {
        Keyword::MouseWheel => {
            let direction = required(node, rule, RuleId::ScrollDirection)?;
            Ok(InputEvent::MouseScroll(member::<ScrollDirection>(
                direction,
                RuleId::ScrollDirection,
            )?))
        }
        Keyword::Move => {
            let crossing = required(node, rule, RuleId::PointerCrossing)?;
            Ok(InputEvent::MouseMove(member::<PointerCrossing>(
                crossing,
                RuleId::PointerCrossing,
            )?))
        }
        keyword => Err(BuildError::UnknownKeyword { rule, keyword }),
    }
}

fn keyboard_action(node: &Node<'_>) -> Result<KeyboardAction, BuildError> {
    if node.head() == Some(Keyword::Hotkey) {
        return Ok(KeyboardAction::Hotkey(unsupported(node)));
    }
    let mut codes: Vec<KeyCode> = node
        .tokens(TokenKind::KeyCode)
        .map(|token| KeyCode::new(token.lexeme))
        .collect();
    match codes.len() {
        0 => Err(BuildError::MissingToken {
            rule: RuleId::KeyboardAction,
            kind: TokenKind::KeyCode,
        }),
        1 => Ok(KeyboardAction::KeyTyped(codes.swap_remove(0))),
        _ => Ok(KeyboardAction::TextEntry(codes)),
    }
}

/// The placeholder among `node`'s children.
fn unsupported(node: &Node<'_>) -> Option<Unsupported> {
    node.placeholder().and_then(raw)
}

fn raw(node: &Node<'_>) -> Option<Unsupported> {
    match node {
        Node::Unsupported { tokens, offset } => Some(Unsupported {
            lexemes: tokens.iter().map(|token| token.lexeme.to_string()).collect(),
            offset: *offset,
        }),
        _ => None,
    }
}

fn tool_context(node: &Node<'_>) -> Result<ToolContextPath, BuildError> {
    let (segments, view, program) = path(node, RuleId::ToolContext, RuleId::ToolContextPath)?;
    Ok(ToolContextPath {
        segments,
        view,
        program,
    })
}

fn tool_action(node: &Node<'_>) -> Result<ToolActionPath, BuildError> {
    let (segments, command, program) = path(node, RuleId::ToolAction, RuleId::ToolActionPath)?;
    Ok(ToolActionPath {
        segments,
        command,
        program,
    })
}

type Path = (Vec<PathSegment>, PathSegment, Option<ProgramName>);

fn path(node: &Node<'_>, rule: RuleId, inner: RuleId) -> Result<Path, BuildError> {
    let mut segments = Vec::new();
    collect_segments(required(node, rule, inner)?, &mut segments)?;
    let leaf = segments.pop().ok_or(BuildError::EmptyPath(inner))?;
    let program = node
        .tokens(TokenKind::ProgramName)
        .next()
        .map(program_name)
        .transpose()?;
    Ok((segments, leaf, program))
}

fn collect_segments(node: &Node<'_>, out: &mut Vec<PathSegment>) -> Result<(), BuildError> {
    let Some(rule) = node.rule() else {
        return Ok(());
    };
    if rule.kind() != RuleKind::Segment {
        return Err(BuildError::MisplacedRule(rule));
    }

    let keyword = head(node, rule)?;
    let item =
        Item::from_rule(rule, keyword).ok_or(BuildError::UnknownKeyword { rule, keyword })?;
    let index = out.len();
    out.push(PathSegment::new(item));

    // Every segment alternative starts with its head keyword
    for child in node.children().iter().skip(1) {
        match child {
            Node::Token(token) => match token.kind {
                TokenKind::Colon => {}
                _ => {
                    let arg = token_argument(token)?;
                    out[index].args.push(arg);
                }
            },
            Node::Rule { rule: child_rule, .. } => match child_rule.kind() {
                RuleKind::Segment => collect_segments(child, out)?,
                RuleKind::Argument => {
                    let arg = rule_argument(child, *child_rule)?;
                    out[index].args.push(arg);
                }
                RuleKind::Structural => return Err(BuildError::MisplacedRule(*child_rule)),
            },
            Node::Unsupported { .. } => {
                let placeholder = raw(child).unwrap_or_default();
                out.push(PathSegment::new(Item::Unsupported(placeholder)));
            }
        }
    }
    Ok(())
}

fn token_argument(token: &Token<'_>) -> Result<Argument, BuildError> {
    match token.kind {
        TokenKind::ProgramAddress => address(token).map(Argument::Address),
        TokenKind::LineNumber => line(token).map(Argument::Line),
        TokenKind::ProgramName => program_name(token).map(Argument::Program),
        TokenKind::PluginElement => plugin_element(token).map(Argument::Element),
        TokenKind::GenericSymbol => Ok(Argument::Symbol(token.lexeme.to_string())),
        TokenKind::GenericText => Ok(Argument::Text(token.lexeme.to_string())),
        kind => Err(BuildError::Literal {
            kind,
            lexeme: token.lexeme.to_string(),
        }),
    }
}

fn rule_argument(node: &Node<'_>, rule: RuleId) -> Result<Argument, BuildError> {
    match rule {
        RuleId::Range => range(node).map(Argument::Range),
        RuleId::Location => {
            let token = node
                .tokens(TokenKind::LineNumber)
                .next()
                .ok_or(BuildError::MissingToken {
                    rule,
                    kind: TokenKind::LineNumber,
                })?;
            line(token).map(Argument::Location)
        }
        RuleId::CommentKind => member::<CommentKind>(node, rule)
            .map(|kind| Argument::Option(CommandOption::Comment(kind))),
        other => Err(BuildError::MisplacedRule(other)),
    }
}

fn range(node: &Node<'_>) -> Result<ProgramRange, BuildError> {
    let mut bounds = node
        .children()
        .iter()
        .filter_map(Node::token)
        .filter_map(|token| match token.kind {
            TokenKind::LineNumber => Some(line(token).map(RangeBound::Line)),
            TokenKind::ProgramAddress => Some(address(token).map(RangeBound::Address)),
            _ => None,
        });
    let missing = || BuildError::MissingToken {
        rule: RuleId::Range,
        kind: TokenKind::LineNumber,
    };
    let start = bounds.next().ok_or_else(missing)??;
    let end = bounds.next().ok_or_else(missing)??;
    Ok(ProgramRange::from_bounds(start, end)?)
}

fn malformed(token: &Token<'_>) -> BuildError {
    BuildError::Literal {
        kind: token.kind,
        lexeme: token.lexeme.to_string(),
    }
}

fn address(token: &Token<'_>) -> Result<ProgramAddress, BuildError> {
    token
        .lexeme
        .strip_prefix("0x")
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .map(ProgramAddress)
        .ok_or_else(|| malformed(token))
}

fn line(token: &Token<'_>) -> Result<LineNumber, BuildError> {
    token
        .lexeme
        .parse()
        .map(LineNumber)
        .map_err(|_| malformed(token))
}

fn program_name(token: &Token<'_>) -> Result<ProgramName, BuildError> {
    token
        .lexeme
        .strip_prefix('{')
        .and_then(|name| name.strip_suffix('}'))
        .map(|name| ProgramName(name.to_string()))
        .ok_or_else(|| malformed(token))
}

fn plugin_element(token: &Token<'_>) -> Result<PluginElement, BuildError> {
    token
        .lexeme
        .strip_prefix('(')
        .and_then(|text| text.strip_suffix(')'))
        .map(|text| PluginElement(text.to_string()))
        .ok_or_else(|| malformed(token))
}
