use crate::utils::parse_ok;
use cava_parser::ast::{InputEvent, KeyCode, KeyboardAction, Unsupported};
use cava_parser::parse;
use cava_parser::vocab::{ButtonInteraction, Family, MouseButton, PointerCrossing, ScrollDirection};

/// Assert that `src` parses and its input event is exactly `want`.
fn assert_parses_to(src: &str, want: InputEvent) {
    let got = parse_ok(src);
    assert_eq!(got.input, want, "wrong input event for {:?}", src);
}

/// Assert that `src` is rejected.
fn assert_fails(src: &str) {
    let parsed = parse(src);
    assert!(
        parsed.is_err(),
        "expected parse to fail on {:?}, but it succeeded with value {:?}",
        src,
        parsed
    );
}

#[test]
fn mouse_click() {
    assert_parses_to(
        "Mouse:Left Click>Ghidra:Menu",
        InputEvent::Mouse(MouseButton::Left, ButtonInteraction::Click),
    );
}

#[test]
fn every_button_and_interaction() {
    for button in MouseButton::ALL {
        for interaction in ButtonInteraction::ALL {
            assert_parses_to(
                &format!("Mouse:{button} {interaction}>Ghidra:Menu"),
                InputEvent::Mouse(*button, *interaction),
            );
        }
    }
}

#[test]
fn mouse_wheel() {
    assert_parses_to(
        "Mouse:MouseWheel Down>CodeBrowserPlugin:ListingView",
        InputEvent::MouseScroll(ScrollDirection::Down),
    );
}

#[test]
fn pointer_crossing() {
    assert_parses_to(
        "Mouse:Move:Enter>Ghidra:Toolbar",
        InputEvent::MouseMove(PointerCrossing::Enter),
    );
    assert_parses_to(
        "Mouse:Move:Exit>DecompilerPlugin:CodeView",
        InputEvent::MouseMove(PointerCrossing::Exit),
    );
}

#[test]
fn single_key() {
    assert_parses_to(
        "Keyboard:KEY_A>Ghidra:Menu",
        InputEvent::Keyboard(KeyboardAction::KeyTyped(KeyCode::from("KEY_A"))),
    );
}

#[test]
fn text_entry() {
    assert_parses_to(
        "Keyboard:KEY_A KEY_B>Ghidra:Menu",
        InputEvent::Keyboard(KeyboardAction::TextEntry(vec![
            KeyCode::from("KEY_A"),
            KeyCode::from("KEY_B"),
        ])),
    );
    assert_parses_to(
        "Keyboard:KEY_H KEY_I KEY_ENTER>CodeBrowserPlugin:ListingView",
        InputEvent::Keyboard(KeyboardAction::TextEntry(vec![
            KeyCode::from("KEY_H"),
            KeyCode::from("KEY_I"),
            KeyCode::from("KEY_ENTER"),
        ])),
    );
}

#[test]
fn hotkey_is_unsupported() {
    assert_parses_to(
        "Keyboard:Hotkey>Ghidra:Menu",
        InputEvent::Keyboard(KeyboardAction::Hotkey(None)),
    );
    assert_parses_to(
        "Keyboard:Hotkey:Ctrl S>Ghidra:Menu",
        InputEvent::Keyboard(KeyboardAction::Hotkey(Some(Unsupported::new(["Ctrl", "S"])))),
    );
}

#[test]
fn eye_is_unsupported() {
    assert_parses_to(
        "Eye:Fixation 120>Ghidra:Menu",
        InputEvent::Eye(Unsupported::new(["Fixation", "120"])),
    );
}

#[test]
fn placeholder_records_its_offset() {
    let got = parse_ok("Eye: Saccade>Ghidra:Menu");
    match got.input {
        InputEvent::Eye(raw) => assert_eq!(raw.offset, 5),
        other => panic!("expected an eye event, got {other:?}"),
    }
}

#[test]
fn button_without_interaction_fails() {
    assert_fails("Mouse:Left>Ghidra:Menu");
}

#[test]
fn interaction_before_button_fails() {
    assert_fails("Mouse:Click Left>Ghidra:Menu");
}

#[test]
fn keyboard_without_keys_fails() {
    assert_fails("Keyboard:>Ghidra:Menu");
}

#[test]
fn unknown_device_fails() {
    assert_fails("Touch:Tap>Ghidra:Menu");
}

#[test]
fn context_is_required() {
    assert_fails("Mouse:Left Click");
    assert_fails("Mouse:Left Click>");
}
