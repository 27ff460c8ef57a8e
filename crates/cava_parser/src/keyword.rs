//! Reserved words of the interaction grammar.

macro_rules! keywords {
    ($($keyword:ident),+ $(,)?) => {
        /// A fixed vocabulary word. The lexer emits these ahead of every generic category,
        /// so a lexeme spelled like a keyword is never a symbol or text token.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Keyword {
            $($keyword),+
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$keyword),+];

            /// The exact source spelling.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$keyword => stringify!($keyword)),+
                }
            }

            /// Case-sensitive lookup of a whole word.
            pub fn from_lexeme(lexeme: &str) -> Option<Self> {
                match lexeme {
                    $(stringify!($keyword) => Some(Keyword::$keyword),)+
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Mouse, Keyboard, Eye, MouseWheel, Move, Hotkey, Left, Right, Middle, Click, DoubleClick,
    MultipleClicks, PressDown, Release, Drag, Up, Down, Enter, Exit, Ghidra,
    CodeBrowserPlugin, DecompilerPlugin, FunctionGraphPlugin, SymbolTreePlugin,
    DataTypeManagerPlugin, ProgramTreePlugin, TaskInstructions, TaskSurvey, Menu, Toolbar,
    ProjectWindow, Console, File, Edit, Analysis, Navigation, Search, Select, Tools, Window,
    Help, Open, Close, CloseOthers, CloseAll, Save, SaveAs, SaveAll, AddToProgram,
    ExportProgram, Print, PageSetup, SaveTool, SaveToolAs, ExportTool, Undo, Redo, Copy,
    CopySpecial, Paste, ClearCodeBytes, ClearWithOptions, ClearFlowAndRepair, ToolOptions,
    AutoAnalyze, AnalyzeAllOpen, GoTo, Back, Forward, NextFunction, PreviousFunction,
    NextInstruction, NextData, NextUndefined, NextLabel, NextBookmark, ProgramText, Memory,
    ForStrings, ForScalars, ForDirectReferences, ForInstructionPatterns, ForAddressTables,
    LabelHistory, RepeatTextSearch, RepeatMemorySearch, AllFlowsFrom, AllFlowsTo,
    Subroutine, Function, DeadSubroutines, AllInView, ClearSelection, Complement, Data,
    Instructions, Undefined, Bytes, Bookmarks, DataTypeManager, Decompiler, DefinedStrings,
    FunctionGraph, Functions, Listing, MemoryMap, ProgramTrees, RegisterManager,
    ScriptManager, SymbolReferences, SymbolTable, SymbolTree, Contents, ProcessorManual,
    AboutGhidra, AboutProgram, InstalledProcessors, UserAgreement, ListingView, FieldHeader,
    ContextMenu, Field, ScrollbarLocation, Selection, Colors, Comments, References,
    Bookmark, Disassemble, EditLabel, AddLabel, RemoveLabel, CreateFunction, EditFunction,
    DeleteFunction, PatchInstruction, SetRegisterValues, SetColor, ClearColor,
    ClearAllColors, SetComment, SetPreComment, SetPostComment, SetPlateComment,
    SetEolComment, SetRepeatableComment, ShowHistory, DeleteComments, Byte, Word, Dword,
    Qword, Float, Double, Char, TerminatedCString, Unicode, Pointer, ChooseDataType,
    AddReference, DeleteReferences, ShowReferencesTo, ShowReferencesFrom, Snapshot,
    ToggleFieldHeader, HighlightCursorText, CodeView, Line, RenameVariable, RetypeVariable,
    RenameFunction, EditFunctionSignature, CommitParams, CommitLocals, FindReferencesTo,
    SecondaryHighlight, ExportToC, Refresh, GraphView, SatelliteView, Vertex, Edge, Button,
    InstructionsPane, ResultPane, RadioButton, CommentWindow, SubmitButton,
    ExecuteMenuAction, ExecuteToolbarAction, Load, SelectionChanged, Highlight,
    ExecuteContextMenuAction, EolComment, PreComment, PostComment, PlateComment,
    RepeatableComment, NextTask, SubmitResponses,
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
