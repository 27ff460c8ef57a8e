use crate::utils::parse_with;
use cava_parser::ast::{InputEvent, KeyboardAction, PathSegment, ProgramName, Unsupported};
use cava_parser::token::TokenKind;
use cava_parser::vocab::{Item, Tool};
use cava_parser::{Error, InteractionParser, ParseOptions, PlaceholderSpan};

fn options(placeholder: PlaceholderSpan) -> ParseOptions {
    ParseOptions::default().with_placeholder(placeholder)
}

fn unsupported(lexemes: &[&str]) -> PathSegment {
    PathSegment::new(Item::Unsupported(Unsupported::new(lexemes.iter().copied())))
}

#[test]
fn span_names() {
    assert_eq!("empty".parse(), Ok(PlaceholderSpan::Empty));
    assert_eq!("one-token".parse(), Ok(PlaceholderSpan::OneToken));
    assert_eq!("segment".parse(), Ok(PlaceholderSpan::ToSegmentEnd));

    let error = "all".parse::<PlaceholderSpan>().unwrap_err();
    assert!(error.to_string().contains("`all`"));
}

#[test]
fn default_runs_to_segment_end() {
    assert_eq!(PlaceholderSpan::default(), PlaceholderSpan::ToSegmentEnd);
    assert_eq!(
        InteractionParser::default().options().placeholder,
        PlaceholderSpan::ToSegmentEnd
    );

    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:Functions main>Ghidra:Menu",
        ParseOptions::default(),
    );
    assert_eq!(got.context.view, unsupported(&["Functions", "main"]));
}

#[test]
fn program_suffix_is_not_placeholder_text() {
    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:Rename {a.exe}",
        ParseOptions::default(),
    );
    assert_eq!(got.context.view, unsupported(&["Rename"]));
    assert_eq!(got.context.program, Some(ProgramName("a.exe".to_string())));

    let got = parse_with(
        "Mouse:Left Click>Ghidra:Menu:Tools:Foo {a.exe}",
        ParseOptions::default(),
    );
    assert_eq!(got.context.view, unsupported(&["Foo"]));
    assert_eq!(got.context.program, Some(ProgramName("a.exe".to_string())));

    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin>SymbolTreePlugin:Rename main {b.exe}",
        ParseOptions::default(),
    );
    let action = got.action.expect("action");
    assert_eq!(action.command, unsupported(&["Rename", "main"]));
    assert_eq!(action.program, Some(ProgramName("b.exe".to_string())));
}

#[test]
fn program_inside_placeholder_text_stays() {
    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:Open {a.exe} main",
        ParseOptions::default(),
    );
    assert_eq!(got.context.view, unsupported(&["Open", "{a.exe}", "main"]));
    assert_eq!(got.context.program, None);

    let got = parse_with("Eye:Look {a.exe}>Ghidra:Menu", ParseOptions::default());
    assert_eq!(got.input, InputEvent::Eye(Unsupported::new(["Look", "{a.exe}"])));
}

#[test]
fn suffixed_placeholder_paths_print_back() {
    let src = "Mouse:Left Click>SymbolTreePlugin:Rename {a.exe}";
    let got = parse_with(src, ParseOptions::default());
    assert_eq!(got.to_string(), src);
}

#[test]
fn one_token_leaves_the_program_suffix() {
    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:Rename {a.exe}",
        options(PlaceholderSpan::OneToken),
    );
    assert_eq!(got.context.segments, vec![PathSegment::new(Tool::SymbolTreePlugin)]);
    assert_eq!(got.context.view, unsupported(&["Rename"]));
    assert_eq!(got.context.program, Some(ProgramName("a.exe".to_string())));

    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:{a.exe}",
        options(PlaceholderSpan::OneToken),
    );
    assert_eq!(got.context.view, unsupported(&[]));
    assert_eq!(got.context.program, Some(ProgramName("a.exe".to_string())));
}

#[test]
fn one_token_rejects_longer_payloads() {
    let result = InteractionParser::new(options(PlaceholderSpan::OneToken))
        .parse("Eye:Fixation 120>Ghidra:Menu");
    match result {
        Err(Error::Parse(error)) => {
            assert!(error.expects(TokenKind::RAngle));
            assert_eq!(error.found.as_deref(), Some("120"));
            assert_eq!(error.position, 13);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn one_token_never_crosses_a_separator() {
    let got = parse_with("Eye:>Ghidra:Menu", options(PlaceholderSpan::OneToken));
    assert_eq!(got.input, InputEvent::Eye(Unsupported::new(Vec::<String>::new())));
}

#[test]
fn empty_consumes_nothing() {
    let empty = options(PlaceholderSpan::Empty);

    let got = parse_with("Eye:>Ghidra:Menu", empty);
    match got.input {
        InputEvent::Eye(raw) => {
            assert!(raw.is_empty());
            assert_eq!(raw.offset, 4);
        }
        other => panic!("expected an eye event, got {other:?}"),
    }

    let got = parse_with("Keyboard:Hotkey:>Ghidra:Menu", empty);
    assert_eq!(
        got.input,
        InputEvent::Keyboard(KeyboardAction::Hotkey(Some(Unsupported::new(Vec::<String>::new()))))
    );

    assert!(InteractionParser::new(empty)
        .parse("Mouse:Left Click>SymbolTreePlugin:Functions")
        .is_err());
}

#[test]
fn segment_end_stops_before_the_action() {
    let got = parse_with(
        "Mouse:Left Click>SymbolTreePlugin:Functions main>SymbolTreePlugin:Rename main",
        ParseOptions::default(),
    );
    assert_eq!(got.context.view, unsupported(&["Functions", "main"]));
    let action = got.action.expect("action");
    assert_eq!(action.command, unsupported(&["Rename", "main"]));
}

#[test]
fn configured_parser_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InteractionParser>();

    let parser = InteractionParser::new(options(PlaceholderSpan::OneToken));
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || parser.parse("Eye:Blink>Ghidra:Menu")))
        .collect();
    for handle in handles {
        let got = handle.join().expect("parser thread panicked").expect("parse failed");
        assert_eq!(got.input, InputEvent::Eye(Unsupported::new(["Blink"])));
    }
}
