//! Keyword families of the interaction grammar.
//!
//! Every grammar rule whose alternatives start with a keyword owns a family enum listing
//! exactly those keywords. The same keyword text may belong to several families
//! (`Save` is both a [`FileMenu`] entry and a [`GhidraToolbar`] button); the family is
//! what tells them apart in the AST.

use std::fmt;

use crate::ast::Unsupported;
use crate::grammar::{RuleId, Term};
use crate::keyword::Keyword;
use crate::token::TokenKind;

/// A closed set of keywords heading the alternatives of one grammar rule.
pub trait Family: Copy + Sized + 'static {
    /// Every member, in grammar order.
    const ALL: &'static [Self];

    fn from_keyword(keyword: Keyword) -> Option<Self>;

    fn keyword(self) -> Keyword;
}

macro_rules! family {
    (leaf $(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        family!($(#[$meta])* $name { $($variant),+ });

        impl $name {
            /// One single-keyword alternative per member, in declaration order.
            pub const ALTERNATIVES: &'static [&'static [Term]] =
                &[$(&[Term::Token(TokenKind::Keyword(Keyword::$variant))]),+];
        }
    };
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Family for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn from_keyword(keyword: Keyword) -> Option<Self> {
                match keyword {
                    $(Keyword::$variant => Some($name::$variant),)+
                    _ => None,
                }
            }

            fn keyword(self) -> Keyword {
                match self {
                    $($name::$variant => Keyword::$variant),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword().as_str())
            }
        }
    };
}

// Input devices

family!(leaf
    /// Physical mouse button.
    MouseButton { Left, Right, Middle });

family!(leaf
    /// What was done with a mouse button.
    ButtonInteraction { Click, DoubleClick, MultipleClicks, PressDown, Release, Drag });

family!(leaf ScrollDirection { Up, Down });

family!(leaf
    /// Pointer entering or leaving a component.
    PointerCrossing { Enter, Exit });

// Tool contexts

family!(
    /// Top-level application or plugin an interaction happened in.
    Tool {
        Ghidra,
        CodeBrowserPlugin,
        DecompilerPlugin,
        FunctionGraphPlugin,
        SymbolTreePlugin,
        DataTypeManagerPlugin,
        ProgramTreePlugin,
        TaskInstructions,
        TaskSurvey,
    }
);

family!(GhidraView { Menu, Toolbar, ProjectWindow, Console });

family!(
    /// Entries of the main menu bar.
    GhidraMenu { File, Edit, Analysis, Navigation, Search, Select, Tools, Window, Help }
);

family!(leaf FileMenu {
    Open,
    Close,
    CloseOthers,
    CloseAll,
    Save,
    SaveAs,
    SaveAll,
    AddToProgram,
    ExportProgram,
    Print,
    PageSetup,
    SaveTool,
    SaveToolAs,
    ExportTool,
    Exit,
});

family!(leaf EditMenu {
    Undo,
    Redo,
    Copy,
    CopySpecial,
    Paste,
    ClearCodeBytes,
    ClearWithOptions,
    ClearFlowAndRepair,
    ToolOptions,
});

family!(leaf AnalysisMenu { AutoAnalyze, AnalyzeAllOpen });

family!(leaf NavigationMenu {
    GoTo,
    Back,
    Forward,
    NextFunction,
    PreviousFunction,
    NextInstruction,
    NextData,
    NextUndefined,
    NextLabel,
    NextBookmark,
});

family!(leaf SearchMenu {
    ProgramText,
    Memory,
    ForStrings,
    ForScalars,
    ForDirectReferences,
    ForInstructionPatterns,
    ForAddressTables,
    LabelHistory,
    RepeatTextSearch,
    RepeatMemorySearch,
});

family!(leaf SelectMenu {
    AllFlowsFrom,
    AllFlowsTo,
    Subroutine,
    Function,
    DeadSubroutines,
    AllInView,
    ClearSelection,
    Complement,
    Data,
    Instructions,
    Undefined,
    Bytes,
});

family!(leaf WindowMenu {
    Bookmarks,
    Bytes,
    Console,
    DataTypeManager,
    Decompiler,
    DefinedStrings,
    FunctionGraph,
    Functions,
    Listing,
    MemoryMap,
    ProgramTrees,
    RegisterManager,
    ScriptManager,
    SymbolReferences,
    SymbolTable,
    SymbolTree,
});

family!(leaf HelpMenu {
    Contents,
    ProcessorManual,
    AboutGhidra,
    AboutProgram,
    InstalledProcessors,
    UserAgreement,
});

family!(leaf
    /// Buttons of the main tool bar.
    GhidraToolbar {
        Save,
        Undo,
        Redo,
        Back,
        Forward,
        NextInstruction,
        NextData,
        NextUndefined,
        NextLabel,
        NextFunction,
        NextBookmark,
    }
);

family!(CodeBrowserView { ListingView, Toolbar, FieldHeader });

family!(ListingElement { ContextMenu, Field, ScrollbarLocation, Selection });

family!(
    /// Right-click menu of the listing view.
    ListingContextMenu {
        Colors,
        Comments,
        Data,
        References,
        Bookmark,
        Copy,
        CopySpecial,
        Paste,
        Disassemble,
        ClearCodeBytes,
        EditLabel,
        AddLabel,
        RemoveLabel,
        CreateFunction,
        EditFunction,
        DeleteFunction,
        PatchInstruction,
        SetRegisterValues,
        ProcessorManual,
    }
);

family!(leaf ColorsMenu { SetColor, ClearColor, ClearAllColors });

family!(leaf CommentsMenu {
    SetComment,
    SetPreComment,
    SetPostComment,
    SetPlateComment,
    SetEolComment,
    SetRepeatableComment,
    ShowHistory,
    DeleteComments,
});

family!(leaf DataMenu {
    Byte,
    Word,
    Dword,
    Qword,
    Float,
    Double,
    Char,
    TerminatedCString,
    Unicode,
    Pointer,
    ChooseDataType,
});

family!(leaf ReferencesMenu { AddReference, DeleteReferences, ShowReferencesTo, ShowReferencesFrom });

family!(leaf ListingToolbar { Snapshot, ToggleFieldHeader, HighlightCursorText });

family!(DecompilerView { CodeView, Toolbar });

family!(DecompilerElement { ContextMenu, Field, Line, ScrollbarLocation });

family!(DecompilerContextMenu {
    Comments,
    RenameVariable,
    RetypeVariable,
    RenameFunction,
    EditFunctionSignature,
    CommitParams,
    CommitLocals,
    FindReferencesTo,
    SecondaryHighlight,
});

family!(leaf DecompilerToolbar { ExportToC, Snapshot, Refresh });

family!(FunctionGraphView { GraphView, SatelliteView, Toolbar });

family!(FunctionGraphElement { Vertex, Edge });

family!(TaskView { Button, InstructionsPane, ResultPane });

family!(SurveyView { RadioButton, CommentWindow, SubmitButton });

// Tool actions

family!(GhidraCommand { ExecuteMenuAction, ExecuteToolbarAction, Load, Open, Close });

family!(CodeBrowserCommand { ListingView, ExecuteToolbarAction });

family!(ListingCommand {
    SelectionChanged,
    GoTo,
    ShowReferencesTo,
    SetColor,
    ClearColor,
    SetComment,
    ScrollbarLocation,
    Highlight,
    ExecuteContextMenuAction,
});

family!(SelectionTarget { Field, Vertex, Edge });

family!(leaf
    /// Comment slot addressed by `SetComment`.
    CommentKind { EolComment, PreComment, PostComment, PlateComment, RepeatableComment }
);

family!(DecompilerCommand { CodeView, ExecuteToolbarAction });

family!(DecompilerCodeCommand {
    SelectionChanged,
    GoTo,
    RenameVariable,
    RetypeVariable,
    Highlight,
    ExecuteContextMenuAction,
    ScrollbarLocation,
});

family!(leaf TaskCommand { NextTask, SubmitResponses });

macro_rules! items {
    ($($family:ident: $($rule:ident)|+;)+) => {
        /// Vocabulary entry of a path segment, tagged by the family it was matched in.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Item {
            $($family($family),)+
            /// A placeholder segment.
            Unsupported(Unsupported),
        }

        impl Item {
            /// Looks `keyword` up in the family owned by `rule`.
            pub fn from_rule(rule: RuleId, keyword: Keyword) -> Option<Self> {
                match rule {
                    $($(RuleId::$rule)|+ => $family::from_keyword(keyword).map(Item::$family),)+
                    _ => None,
                }
            }

            /// The keyword this item was spelled with; `None` for placeholders.
            pub fn keyword(&self) -> Option<Keyword> {
                match self {
                    $(Item::$family(item) => Some(item.keyword()),)+
                    Item::Unsupported(_) => None,
                }
            }
        }

        $(
            impl From<$family> for Item {
                fn from(item: $family) -> Self {
                    Item::$family(item)
                }
            }
        )+
    };
}

items! {
    Tool: ToolContextPath | ToolActionPath;
    GhidraView: GhidraView;
    GhidraMenu: GhidraMenu;
    FileMenu: FileMenu;
    EditMenu: EditMenu;
    AnalysisMenu: AnalysisMenu;
    NavigationMenu: NavigationMenu;
    SearchMenu: SearchMenu;
    SelectMenu: SelectMenu;
    WindowMenu: WindowMenu;
    HelpMenu: HelpMenu;
    GhidraToolbar: GhidraToolbar;
    CodeBrowserView: CodeBrowserView;
    ListingElement: ListingElement;
    ListingContextMenu: ListingContextMenu;
    ColorsMenu: ColorsMenu;
    CommentsMenu: CommentsMenu;
    DataMenu: DataMenu;
    ReferencesMenu: ReferencesMenu;
    ListingToolbar: ListingToolbar;
    DecompilerView: DecompilerView;
    DecompilerElement: DecompilerElement;
    DecompilerContextMenu: DecompilerContextMenu;
    DecompilerToolbar: DecompilerToolbar;
    FunctionGraphView: FunctionGraphView;
    FunctionGraphElement: FunctionGraphElement;
    TaskView: TaskView;
    SurveyView: SurveyView;
    GhidraCommand: GhidraCommand;
    CodeBrowserCommand: CodeBrowserCommand;
    ListingCommand: ListingCommand;
    SelectionTarget: SelectionTarget;
    DecompilerCommand: DecompilerCommand;
    DecompilerCodeCommand: DecompilerCodeCommand;
    TaskCommand: TaskCommand;
}

impl Item {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Item::Unsupported(_))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.keyword()) {
            (Item::Unsupported(raw), _) => write!(f, "{raw}"),
            (_, Some(keyword)) => f.write_str(keyword.as_str()),
            (_, None) => Ok(()),
        }
    }
}
