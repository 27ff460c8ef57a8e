use std::fmt;

use thiserror::Error;

use crate::vocab::{
    ButtonInteraction, CommentKind, Family, Item, MouseButton, PointerCrossing,
    ScrollDirection, Tool,
};

/// One logged interaction: what the user did, where, and optionally what it triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub input: InputEvent,
    pub context: ToolContextPath,
    pub action: Option<ToolActionPath>,
}

/// The device-level event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `Mouse:Left Click`
    Mouse(MouseButton, ButtonInteraction),
    /// `Mouse:MouseWheel Up`
    MouseScroll(ScrollDirection),
    /// `Mouse:Move:Enter`
    MouseMove(PointerCrossing),
    Keyboard(KeyboardAction),
    /// Eye tracking is recorded but not modelled.
    Eye(Unsupported),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardAction {
    /// A single key.
    KeyTyped(KeyCode),
    /// Two or more keys typed in sequence.
    TextEntry(Vec<KeyCode>),
    /// A tool hotkey; the optional placeholder holds whatever followed `Hotkey:`.
    Hotkey(Option<Unsupported>),
}

/// A key name such as `KEY_A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCode(String);

impl KeyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Raw tokens consumed by a placeholder.
///
/// Equality ignores `offset` so that trees parsed from differently spaced lines compare equal.
#[derive(Debug, Clone, Default)]
pub struct Unsupported {
    pub lexemes: Vec<String>,
    /// Byte offset where the placeholder started.
    pub offset: usize,
}

impl Unsupported {
    pub fn new<I, S>(lexemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lexemes: lexemes.into_iter().map(Into::into).collect(),
            offset: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}

impl PartialEq for Unsupported {
    fn eq(&self, other: &Self) -> bool {
        self.lexemes == other.lexemes
    }
}

impl Eq for Unsupported {}

/// Where the interaction happened: a path ending in a view, plus the loaded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContextPath {
    pub segments: Vec<PathSegment>,
    pub view: PathSegment,
    pub program: Option<ProgramName>,
}

/// What the interaction triggered: a path ending in a command, plus the loaded program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolActionPath {
    pub segments: Vec<PathSegment>,
    pub command: Command,
    pub program: Option<ProgramName>,
}

impl ToolContextPath {
    /// Every segment from the tool down to the view.
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().chain(std::iter::once(&self.view))
    }

    pub fn tool(&self) -> Option<Tool> {
        tool_of(self.iter().next())
    }
}

impl ToolActionPath {
    /// Every segment from the tool down to the command.
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().chain(std::iter::once(&self.command))
    }

    pub fn tool(&self) -> Option<Tool> {
        tool_of(self.iter().next())
    }
}

fn tool_of(segment: Option<&PathSegment>) -> Option<Tool> {
    match segment.map(|segment| &segment.item) {
        Some(Item::Tool(tool)) => Some(*tool),
        _ => None,
    }
}

/// One `:`-separated step of a tool path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub item: Item,
    pub args: Vec<Argument>,
}

/// The leaf of an action path.
pub type Command = PathSegment;

impl PathSegment {
    pub fn new(item: impl Into<Item>) -> Self {
        Self {
            item: item.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// A segment that is exactly one keyword of family `F`.
    pub fn is<F: Family + Into<Item>>(&self, member: F) -> bool {
        self.item == member.into()
    }
}

impl From<Item> for PathSegment {
    fn from(item: Item) -> Self {
        Self::new(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Address(ProgramAddress),
    Line(LineNumber),
    /// `[n]`, attached to its keyword.
    Location(LineNumber),
    Range(ProgramRange),
    Program(ProgramName),
    Element(PluginElement),
    Symbol(String),
    Text(String),
    Option(CommandOption),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOption {
    Comment(CommentKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProgramAddress(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineNumber(pub u64);

/// Loaded program name, without the braces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramName(pub String);

/// UI element text, without the parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginElement(pub String);

/// A closed interval over one kind of location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramRange {
    Lines { start: LineNumber, end: LineNumber },
    Addresses { start: ProgramAddress, end: ProgramAddress },
}

/// One end of a [`ProgramRange`] before the kinds are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Line(LineNumber),
    Address(ProgramAddress),
}

impl RangeBound {
    fn kind(&self) -> &'static str {
        match self {
            RangeBound::Line(_) => "line number",
            RangeBound::Address(_) => "program address",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("range bounds must share a kind, found {start} and {end}")]
    MixedKinds {
        start: &'static str,
        end: &'static str,
    },
}

impl ProgramRange {
    pub fn from_bounds(start: RangeBound, end: RangeBound) -> Result<Self, RangeError> {
        match (start, end) {
            (RangeBound::Line(start), RangeBound::Line(end)) => Ok(ProgramRange::Lines { start, end }),
            (RangeBound::Address(start), RangeBound::Address(end)) => {
                Ok(ProgramRange::Addresses { start, end })
            }
            (start, end) => Err(RangeError::MixedKinds {
                start: start.kind(),
                end: end.kind(),
            }),
        }
    }
}

// Canonical printing. The output of `Display` parses back to an equal value.

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.input, self.context)?;
        if let Some(action) = &self.action {
            write!(f, ">{action}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Mouse(button, interaction) => write!(f, "Mouse:{button} {interaction}"),
            InputEvent::MouseScroll(direction) => write!(f, "Mouse:MouseWheel {direction}"),
            InputEvent::MouseMove(crossing) => write!(f, "Mouse:Move:{crossing}"),
            InputEvent::Keyboard(action) => write!(f, "Keyboard:{action}"),
            InputEvent::Eye(raw) => write!(f, "Eye:{raw}"),
        }
    }
}

impl fmt::Display for KeyboardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyboardAction::KeyTyped(code) => write!(f, "{code}"),
            KeyboardAction::TextEntry(codes) => {
                for (index, code) in codes.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{code}")?;
                }
                Ok(())
            }
            KeyboardAction::Hotkey(None) => f.write_str("Hotkey"),
            KeyboardAction::Hotkey(Some(raw)) => write!(f, "Hotkey:{raw}"),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexemes.join(" "))
    }
}

fn write_path<'a>(
    f: &mut fmt::Formatter<'_>,
    segments: impl Iterator<Item = &'a PathSegment>,
    program: Option<&ProgramName>,
) -> fmt::Result {
    for (index, segment) in segments.enumerate() {
        if index > 0 {
            f.write_str(":")?;
        }
        write!(f, "{segment}")?;
    }
    if let Some(program) = program {
        write!(f, " {program}")?;
    }
    Ok(())
}

impl fmt::Display for ToolContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_path(f, self.iter(), self.program.as_ref())
    }
}

impl fmt::Display for ToolActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_path(f, self.iter(), self.program.as_ref())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)?;
        for arg in &self.args {
            match arg {
                Argument::Element(_) | Argument::Location(_) => write!(f, "{arg}")?,
                _ => write!(f, " {arg}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Address(address) => write!(f, "{address}"),
            Argument::Line(line) => write!(f, "{line}"),
            Argument::Location(line) => write!(f, "[{line}]"),
            Argument::Range(range) => write!(f, "{range}"),
            Argument::Program(program) => write!(f, "{program}"),
            Argument::Element(element) => write!(f, "{element}"),
            Argument::Symbol(text) | Argument::Text(text) => f.write_str(text),
            Argument::Option(CommandOption::Comment(kind)) => write!(f, "{kind}"),
        }
    }
}

impl fmt::Display for ProgramAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

impl fmt::Display for PluginElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

impl fmt::Display for ProgramRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramRange::Lines { start, end } => write!(f, "[{start}-{end}]"),
            ProgramRange::Addresses { start, end } => write!(f, "[{start}-{end}]"),
        }
    }
}
