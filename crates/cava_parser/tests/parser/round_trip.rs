use crate::utils::parse_ok;
use cava_parser::vocab::{
    ButtonInteraction, ColorsMenu, DataMenu, EditMenu, Family, FileMenu, GhidraToolbar,
    MouseButton,
};
use proptest::prelude::*;
use proptest::sample::select;

const LINES: &[&str] = &[
    "Mouse:Left Click>Ghidra:Menu:File:Open>Ghidra:ExecuteMenuAction:File:Open",
    "Mouse:Left DoubleClick>Ghidra:ProjectWindow>Ghidra:Load {crackme.exe}",
    "Mouse:Left Click>Ghidra:Menu:Window>Ghidra:Open(CommentPlugin)",
    "Mouse:MouseWheel Down>CodeBrowserPlugin:ListingView {crackme v2.exe}",
    "Mouse:Move:Enter>TaskInstructions",
    "Mouse:Left Drag>CodeBrowserPlugin:ListingView:ScrollbarLocation[120]",
    "Mouse:Left Drag>CodeBrowserPlugin:ListingView:Selection [0x401000-0x401020]",
    "Mouse:Left Click>CodeBrowserPlugin:ListingView>CodeBrowserPlugin:ListingView:SetColor [10-20]",
    "Mouse:Left Click>CodeBrowserPlugin:ListingView>CodeBrowserPlugin:ListingView:SetComment EolComment 0x401000",
    "Mouse:Left Click>CodeBrowserPlugin:ListingView>CodeBrowserPlugin:ListingView:SelectionChanged:Field(Label)",
    "Mouse:Right Click>CodeBrowserPlugin:ListingView:ContextMenu:Data:Dword>CodeBrowserPlugin:ListingView:ExecuteContextMenuAction:Data:Dword",
    "Keyboard:KEY_A>Ghidra:Menu",
    "Keyboard:KEY_H KEY_I KEY_ENTER>CodeBrowserPlugin:ListingView",
    "Keyboard:Hotkey>Ghidra:Menu",
    "Keyboard:Hotkey:Ctrl S>Ghidra:Menu",
    "Keyboard:KEY_L>DecompilerPlugin:CodeView:Line 12>DecompilerPlugin:CodeView:RenameVariable local_10 counter",
    "Eye:Fixation 120>Ghidra:Menu",
    "Mouse:Left Click>SymbolTreePlugin:Functions main>SymbolTreePlugin:Rename FUN_00401000",
    "Mouse:Left Click>TaskInstructions:Button(Next)>TaskInstructions:NextTask",
];

#[test]
fn printed_lines_parse_back_to_the_same_interaction() {
    for line in LINES {
        let first = parse_ok(line);
        let printed = first.to_string();
        let second = parse_ok(&printed);
        assert_eq!(first, second, "{line:?} printed as {printed:?}");
    }
}

#[test]
fn canonical_lines_print_unchanged() {
    for line in LINES {
        assert_eq!(&parse_ok(line).to_string(), line);
    }
}

#[test]
fn printer_normalizes_spacing() {
    let got = parse_ok("Mouse : Left  Click > Ghidra : Menu");
    assert_eq!(got.to_string(), "Mouse:Left Click>Ghidra:Menu");

    let got = parse_ok("Mouse:Left Drag>CodeBrowserPlugin:ListingView:ScrollbarLocation [ 7 ]");
    assert_eq!(
        got.to_string(),
        "Mouse:Left Drag>CodeBrowserPlugin:ListingView:ScrollbarLocation[7]"
    );
}

#[test]
fn addresses_print_in_lowercase_hex() {
    let got = parse_ok(
        "Keyboard:KEY_G>CodeBrowserPlugin:ListingView>CodeBrowserPlugin:ListingView:GoTo 0x00DEADbeef",
    );
    assert!(got.to_string().ends_with("GoTo 0xdeadbeef"));
}

proptest! {
    #[test]
    fn every_file_menu_entry_round_trips(
        button in select(MouseButton::ALL),
        interaction in select(ButtonInteraction::ALL),
        entry in select(FileMenu::ALL),
    ) {
        let line = format!("Mouse:{button} {interaction}>Ghidra:Menu:File:{entry}>Ghidra:ExecuteMenuAction:File:{entry}");
        let parsed = parse_ok(&line);
        prop_assert_eq!(parsed.to_string(), line);
    }

    #[test]
    fn menu_and_toolbar_entries_round_trip(
        edit in select(EditMenu::ALL),
        toolbar in select(GhidraToolbar::ALL),
    ) {
        for line in [
            format!("Mouse:Left Click>Ghidra:Menu:Edit:{edit}"),
            format!("Mouse:Left Click>Ghidra:Toolbar:{toolbar}>Ghidra:ExecuteToolbarAction:{toolbar}"),
        ] {
            let parsed = parse_ok(&line);
            prop_assert_eq!(parse_ok(&parsed.to_string()), parsed);
        }
    }

    #[test]
    fn listing_context_menu_entries_round_trip(
        color in select(ColorsMenu::ALL),
        data in select(DataMenu::ALL),
    ) {
        for line in [
            format!("Mouse:Right Click>CodeBrowserPlugin:ListingView:ContextMenu:Colors:{color}"),
            format!("Mouse:Right Click>CodeBrowserPlugin:ListingView:ContextMenu:Data:{data}"),
        ] {
            prop_assert_eq!(parse_ok(&line).to_string(), line);
        }
    }
}
