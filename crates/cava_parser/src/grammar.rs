//! The interaction grammar as data.
//!
//! Each rule is an ordered list of alternatives; each alternative is a sequence of
//! [`Term`]s. The engine in [`crate::parser`] tries alternatives in order and takes the
//! first one that matches, so order is precedence: longer forms sharing a prefix with a
//! shorter one come first.

use std::fmt;

use crate::keyword::Keyword as K;
use crate::token::TokenKind;
use crate::vocab::{
    AnalysisMenu, ButtonInteraction, ColorsMenu, CommentKind, CommentsMenu, DataMenu,
    DecompilerToolbar, EditMenu, FileMenu, GhidraToolbar, HelpMenu, ListingToolbar,
    MouseButton, NavigationMenu, PointerCrossing, ReferencesMenu, ScrollDirection, SearchMenu,
    SelectMenu, TaskCommand, WindowMenu,
};

use self::RuleId as R;

/// One element of an alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Exactly one token of this kind.
    Token(TokenKind),
    /// A nested rule.
    Rule(RuleId),
    /// The group, or nothing.
    Optional(&'static [Term]),
    /// The group one or more times.
    Repeat(&'static [Term]),
    /// A placeholder for vocabulary the grammar does not model. Never fails.
    Unsupported,
}

/// How the AST builder treats a rule's subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Built by dedicated code.
    Structural,
    /// Contributes one path segment, headed by its first keyword.
    Segment,
    /// Contributes one argument to the enclosing segment.
    Argument,
}

#[derive(Debug)]
pub struct RuleDef {
    pub id: RuleId,
    pub name: &'static str,
    pub kind: RuleKind,
    pub alternatives: &'static [&'static [Term]],
}

#[derive(Debug)]
pub struct Grammar {
    rules: &'static [RuleDef],
    start: RuleId,
}

impl Grammar {
    pub fn rule(&self, id: RuleId) -> &RuleDef {
        // `RULES` is generated in `RuleId` declaration order
        &self.rules[id as usize]
    }

    pub fn rules(&self) -> &[RuleDef] {
        self.rules
    }

    pub fn start(&self) -> RuleId {
        self.start
    }
}

macro_rules! grammar {
    ($($id:ident $name:literal $kind:ident => $alternatives:expr;)+) => {
        /// Identifies one rule of [`GRAMMAR`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum RuleId {
            $($id),+
        }

        const RULES: &[RuleDef] = &[
            $(RuleDef {
                id: RuleId::$id,
                name: $name,
                kind: RuleKind::$kind,
                alternatives: $alternatives,
            }),+
        ];
    };
}

const COLON: Term = Term::Token(TokenKind::Colon);
const RANGLE: Term = Term::Token(TokenKind::RAngle);
const LBRACKET: Term = Term::Token(TokenKind::LBracket);
const RBRACKET: Term = Term::Token(TokenKind::RBracket);
const DASH: Term = Term::Token(TokenKind::Dash);
const PROGRAM: Term = Term::Token(TokenKind::ProgramName);
const ELEMENT: Term = Term::Token(TokenKind::PluginElement);
const ADDRESS: Term = Term::Token(TokenKind::ProgramAddress);
const LINE: Term = Term::Token(TokenKind::LineNumber);
const KEY: Term = Term::Token(TokenKind::KeyCode);
const SYMBOL: Term = Term::Token(TokenKind::GenericSymbol);
const UNSUPPORTED: Term = Term::Unsupported;

macro_rules! kw {
    ($keyword:ident) => {
        Term::Token(TokenKind::Keyword(K::$keyword))
    };
}

macro_rules! rule {
    ($id:ident) => {
        Term::Rule(R::$id)
    };
}

grammar! {
    Interaction "interaction" Structural => &[
        &[rule!(InputEvent), RANGLE, rule!(ToolContext), Term::Optional(&[RANGLE, rule!(ToolAction)])],
    ];

    // Input devices

    InputEvent "input_event" Structural => &[
        &[kw!(Mouse), COLON, rule!(MouseAction)],
        &[kw!(Keyboard), COLON, rule!(KeyboardAction)],
        &[kw!(Eye), COLON, rule!(EyeAction)],
    ];
    MouseAction "mouse_action" Structural => &[
        &[rule!(MouseButton), rule!(ButtonInteraction)],
        &[kw!(MouseWheel), rule!(ScrollDirection)],
        &[kw!(Move), COLON, rule!(PointerCrossing)],
    ];
    MouseButton "mouse_button" Structural => MouseButton::ALTERNATIVES;
    ButtonInteraction "button_interaction" Structural => ButtonInteraction::ALTERNATIVES;
    ScrollDirection "scroll_direction" Structural => ScrollDirection::ALTERNATIVES;
    PointerCrossing "pointer_crossing" Structural => PointerCrossing::ALTERNATIVES;
    KeyboardAction "keyboard_action" Structural => &[
        &[kw!(Hotkey), Term::Optional(&[COLON, UNSUPPORTED])],
        &[KEY, Term::Repeat(&[KEY])],
        &[KEY],
    ];
    EyeAction "eye_action" Structural => &[
        &[UNSUPPORTED],
    ];

    // Tool contexts

    ToolContext "tool_context" Structural => &[
        &[rule!(ToolContextPath), Term::Optional(&[PROGRAM])],
    ];
    ToolContextPath "tool_context_path" Segment => &[
        &[kw!(Ghidra), COLON, rule!(GhidraView)],
        &[kw!(CodeBrowserPlugin), COLON, rule!(CodeBrowserView)],
        &[kw!(DecompilerPlugin), COLON, rule!(DecompilerView)],
        &[kw!(FunctionGraphPlugin), COLON, rule!(FunctionGraphView)],
        &[kw!(SymbolTreePlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(DataTypeManagerPlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(ProgramTreePlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(TaskInstructions), Term::Optional(&[COLON, rule!(TaskView)])],
        &[kw!(TaskSurvey), COLON, rule!(SurveyView)],
    ];
    GhidraView "ghidra_view" Segment => &[
        &[kw!(Menu), Term::Optional(&[COLON, rule!(GhidraMenu)])],
        &[kw!(Toolbar), Term::Optional(&[COLON, rule!(GhidraToolbar)])],
        &[kw!(ProjectWindow)],
        &[kw!(Console)],
    ];
    GhidraMenu "ghidra_menu" Segment => &[
        &[kw!(File), Term::Optional(&[COLON, rule!(FileMenu)])],
        &[kw!(Edit), Term::Optional(&[COLON, rule!(EditMenu)])],
        &[kw!(Analysis), Term::Optional(&[COLON, rule!(AnalysisMenu)])],
        &[kw!(Navigation), Term::Optional(&[COLON, rule!(NavigationMenu)])],
        &[kw!(Search), Term::Optional(&[COLON, rule!(SearchMenu)])],
        &[kw!(Select), Term::Optional(&[COLON, rule!(SelectMenu)])],
        &[kw!(Tools), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(Window), Term::Optional(&[COLON, rule!(WindowMenu)])],
        &[kw!(Help), Term::Optional(&[COLON, rule!(HelpMenu)])],
    ];
    FileMenu "file_menu" Segment => FileMenu::ALTERNATIVES;
    EditMenu "edit_menu" Segment => EditMenu::ALTERNATIVES;
    AnalysisMenu "analysis_menu" Segment => AnalysisMenu::ALTERNATIVES;
    NavigationMenu "navigation_menu" Segment => NavigationMenu::ALTERNATIVES;
    SearchMenu "search_menu" Segment => SearchMenu::ALTERNATIVES;
    SelectMenu "select_menu" Segment => SelectMenu::ALTERNATIVES;
    WindowMenu "window_menu" Segment => WindowMenu::ALTERNATIVES;
    HelpMenu "help_menu" Segment => HelpMenu::ALTERNATIVES;
    GhidraToolbar "ghidra_toolbar" Segment => GhidraToolbar::ALTERNATIVES;
    CodeBrowserView "code_browser_view" Segment => &[
        &[kw!(ListingView), Term::Optional(&[COLON, rule!(ListingElement)])],
        &[kw!(Toolbar), Term::Optional(&[COLON, rule!(ListingToolbar)])],
        &[kw!(FieldHeader), Term::Optional(&[COLON, UNSUPPORTED])],
    ];
    ListingElement "listing_element" Segment => &[
        &[kw!(ContextMenu), Term::Optional(&[COLON, rule!(ListingContextMenu)])],
        &[kw!(Field), ELEMENT],
        &[kw!(ScrollbarLocation), rule!(Location)],
        &[kw!(Selection), rule!(Range)],
    ];
    ListingContextMenu "listing_context_menu" Segment => &[
        &[kw!(Colors), COLON, rule!(ColorsMenu)],
        &[kw!(Comments), COLON, rule!(CommentsMenu)],
        &[kw!(Comments)],
        &[kw!(Data), COLON, rule!(DataMenu)],
        &[kw!(Data)],
        &[kw!(References), COLON, rule!(ReferencesMenu)],
        &[kw!(Bookmark)],
        &[kw!(Copy)],
        &[kw!(CopySpecial)],
        &[kw!(Paste)],
        &[kw!(Disassemble)],
        &[kw!(ClearCodeBytes)],
        &[kw!(EditLabel)],
        &[kw!(AddLabel)],
        &[kw!(RemoveLabel)],
        &[kw!(CreateFunction)],
        &[kw!(EditFunction)],
        &[kw!(DeleteFunction)],
        &[kw!(PatchInstruction)],
        &[kw!(SetRegisterValues)],
        &[kw!(ProcessorManual)],
    ];
    ColorsMenu "colors_menu" Segment => ColorsMenu::ALTERNATIVES;
    CommentsMenu "comments_menu" Segment => CommentsMenu::ALTERNATIVES;
    DataMenu "data_menu" Segment => DataMenu::ALTERNATIVES;
    ReferencesMenu "references_menu" Segment => ReferencesMenu::ALTERNATIVES;
    ListingToolbar "listing_toolbar" Segment => ListingToolbar::ALTERNATIVES;
    DecompilerView "decompiler_view" Segment => &[
        &[kw!(CodeView), Term::Optional(&[COLON, rule!(DecompilerElement)])],
        &[kw!(Toolbar), Term::Optional(&[COLON, rule!(DecompilerToolbar)])],
    ];
    DecompilerElement "decompiler_element" Segment => &[
        &[kw!(ContextMenu), Term::Optional(&[COLON, rule!(DecompilerContextMenu)])],
        &[kw!(Field), ELEMENT],
        &[kw!(Line), LINE],
        &[kw!(ScrollbarLocation), rule!(Location)],
    ];
    DecompilerContextMenu "decompiler_context_menu" Segment => &[
        &[kw!(Comments), COLON, rule!(CommentsMenu)],
        &[kw!(Comments)],
        &[kw!(RenameVariable)],
        &[kw!(RetypeVariable)],
        &[kw!(RenameFunction)],
        &[kw!(EditFunctionSignature)],
        &[kw!(CommitParams)],
        &[kw!(CommitLocals)],
        &[kw!(FindReferencesTo)],
        &[kw!(SecondaryHighlight), Term::Optional(&[COLON, UNSUPPORTED])],
    ];
    DecompilerToolbar "decompiler_toolbar" Segment => DecompilerToolbar::ALTERNATIVES;
    FunctionGraphView "function_graph_view" Segment => &[
        &[kw!(GraphView), Term::Optional(&[COLON, rule!(FunctionGraphElement)])],
        &[kw!(SatelliteView)],
        &[kw!(Toolbar), Term::Optional(&[COLON, UNSUPPORTED])],
    ];
    FunctionGraphElement "function_graph_element" Segment => &[
        &[kw!(Vertex), ELEMENT],
        &[kw!(Edge), ELEMENT],
    ];
    TaskView "task_view" Segment => &[
        &[kw!(Button), ELEMENT],
        &[kw!(InstructionsPane)],
        &[kw!(ResultPane)],
    ];
    SurveyView "survey_view" Segment => &[
        &[kw!(RadioButton), ELEMENT],
        &[kw!(CommentWindow)],
        &[kw!(SubmitButton)],
    ];

    // Tool actions

    ToolAction "tool_action" Structural => &[
        &[rule!(ToolActionPath), Term::Optional(&[PROGRAM])],
    ];
    ToolActionPath "tool_action_path" Segment => &[
        &[kw!(Ghidra), COLON, rule!(GhidraCommand)],
        &[kw!(CodeBrowserPlugin), COLON, rule!(CodeBrowserCommand)],
        &[kw!(DecompilerPlugin), COLON, rule!(DecompilerCommand)],
        &[kw!(FunctionGraphPlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(SymbolTreePlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(DataTypeManagerPlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(ProgramTreePlugin), Term::Optional(&[COLON, UNSUPPORTED])],
        &[kw!(TaskInstructions), COLON, rule!(TaskCommand)],
    ];
    GhidraCommand "ghidra_command" Segment => &[
        &[kw!(ExecuteMenuAction), COLON, rule!(GhidraMenu)],
        &[kw!(ExecuteToolbarAction), COLON, rule!(GhidraToolbar)],
        &[kw!(Load), PROGRAM],
        &[kw!(Open), ELEMENT],
        &[kw!(Close), ELEMENT],
    ];
    CodeBrowserCommand "code_browser_command" Segment => &[
        &[kw!(ListingView), COLON, rule!(ListingCommand)],
        &[kw!(ExecuteToolbarAction), COLON, rule!(ListingToolbar)],
    ];
    ListingCommand "listing_command" Segment => &[
        &[kw!(SelectionChanged), COLON, rule!(SelectionTarget)],
        &[kw!(GoTo), ADDRESS],
        &[kw!(GoTo), SYMBOL],
        &[kw!(ShowReferencesTo), SYMBOL],
        &[kw!(ShowReferencesTo), ADDRESS],
        &[kw!(SetColor), rule!(Range)],
        &[kw!(ClearColor), rule!(Range)],
        &[kw!(SetComment), rule!(CommentKind), ADDRESS],
        &[kw!(ScrollbarLocation), rule!(Location)],
        &[kw!(Highlight), SYMBOL],
        &[kw!(ExecuteContextMenuAction), COLON, rule!(ListingContextMenu)],
    ];
    SelectionTarget "selection_target" Segment => &[
        &[kw!(Field), ELEMENT],
        &[kw!(Vertex), ELEMENT],
        &[kw!(Edge), ELEMENT],
    ];
    DecompilerCommand "decompiler_command" Segment => &[
        &[kw!(CodeView), COLON, rule!(DecompilerCodeCommand)],
        &[kw!(ExecuteToolbarAction), COLON, rule!(DecompilerToolbar)],
    ];
    DecompilerCodeCommand "decompiler_code_command" Segment => &[
        &[kw!(SelectionChanged), COLON, rule!(SelectionTarget)],
        &[kw!(GoTo), LINE],
        &[kw!(RenameVariable), SYMBOL, SYMBOL],
        &[kw!(RetypeVariable), SYMBOL, SYMBOL],
        &[kw!(Highlight), SYMBOL],
        &[kw!(ExecuteContextMenuAction), COLON, rule!(DecompilerContextMenu)],
        &[kw!(ScrollbarLocation), rule!(Location)],
    ];
    TaskCommand "task_command" Segment => TaskCommand::ALTERNATIVES;

    // Arguments

    CommentKind "comment_kind" Argument => CommentKind::ALTERNATIVES;
    Range "range" Argument => &[
        &[LBRACKET, LINE, DASH, LINE, RBRACKET],
        &[LBRACKET, ADDRESS, DASH, ADDRESS, RBRACKET],
    ];
    Location "location" Argument => &[
        &[LBRACKET, LINE, RBRACKET],
    ];
}

/// The complete interaction grammar, starting at [`RuleId::Interaction`].
pub static GRAMMAR: Grammar = Grammar {
    rules: RULES,
    start: RuleId::Interaction,
};

impl RuleId {
    pub fn name(self) -> &'static str {
        GRAMMAR.rule(self).name
    }

    pub fn kind(self) -> RuleKind {
        GRAMMAR.rule(self).kind
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
