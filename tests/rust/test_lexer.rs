//! Lexer tests: statement sequence, loop-body capture, classification

use mcscript_lang::error::ScriptError;
use mcscript_lang::lexer::tokens::{classify, StatementKind};
use mcscript_lang::lexer::{is_blank_or_comment, Script};

fn body_texts(source: &str, header: usize) -> Vec<String> {
    Script::new(source)
        .capture_body(header)
        .unwrap()
        .statements
        .into_iter()
        .map(|s| s.text)
        .collect()
}

// ── Statement sequence ──────────────────────────────────────

#[test]
fn keeps_blank_and_comment_lines() {
    let script = Script::new("Let x = 1\n\n// note\nprint(x)");
    assert_eq!(script.len(), 4);
    assert_eq!(script.line(1), Some(""));
    assert_eq!(script.line(2), Some("// note"));
}

#[test]
fn lines_are_trimmed() {
    let script = Script::new("   print(x)   \r\n\tLet y = 2");
    assert_eq!(script.line(0), Some("print(x)"));
    assert_eq!(script.line(1), Some("Let y = 2"));
}

#[test]
fn empty_source_has_no_lines() {
    assert!(Script::new("").is_empty());
}

#[test]
fn next_statement_skips_blank_and_comments() {
    let script = Script::new("If(x == 1)\n\n   // why\nprint(x)");
    assert_eq!(script.next_statement(1), Some((3, "print(x)")));
    assert_eq!(script.next_statement(4), None);
}

#[test]
fn blank_or_comment() {
    assert!(is_blank_or_comment(""));
    assert!(is_blank_or_comment("   "));
    assert!(is_blank_or_comment("  // hi"));
    assert!(!is_blank_or_comment("print(\"// not a comment\")"));
    assert!(!is_blank_or_comment("/ x"));
}

// ── Loop bodies ─────────────────────────────────────────────

#[test]
fn brace_on_header_line() {
    let src = "While(i<3) {\nprint(i)\ni=i+1\n}\nprint(\"after\")";
    let body = Script::new(src).capture_body(0).unwrap();
    assert_eq!(body.end, 3);
    assert!(body.closed);
    assert_eq!(body_texts(src, 0), vec!["print(i)", "i=i+1"]);
}

#[test]
fn brace_on_next_line() {
    let src = "While(i<3)\n{\nprint(i)\n}";
    let body = Script::new(src).capture_body(0).unwrap();
    assert_eq!(body.end, 3);
    assert_eq!(body.statements.len(), 1);
    assert_eq!(body.statements[0].index, 2);
}

#[test]
fn missing_opening_brace_is_malformed() {
    let err = Script::new("While(i<3)\nprint(i)\n}").capture_body(0).unwrap_err();
    assert!(matches!(err, ScriptError::MalformedStatement(_)));
}

#[test]
fn blank_line_before_brace_is_malformed() {
    let err = Script::new("While(i<3)\n\n{\n}").capture_body(0).unwrap_err();
    assert!(matches!(err, ScriptError::MalformedStatement(_)));
}

#[test]
fn comments_and_blanks_do_not_end_the_body() {
    let src = "While(i<3) {\n// step\n\nprint(i)\n}";
    assert_eq!(body_texts(src, 0), vec!["print(i)"]);
}

#[test]
fn nested_braces_are_counted() {
    let src = "While(i<3) {\nWhile(j<3) {\nprint(j)\n}\nprint(i)\n}\nprint(\"out\")";
    let body = Script::new(src).capture_body(0).unwrap();
    assert_eq!(body.end, 5);
    assert_eq!(
        body_texts(src, 0),
        vec!["While(j<3) {", "print(j)", "print(i)"]
    );
}

#[test]
fn unterminated_body_runs_to_end() {
    let src = "While(i<3) {\nprint(i)";
    let body = Script::new(src).capture_body(0).unwrap();
    assert!(!body.closed);
    assert_eq!(body.end, 2);
    assert_eq!(body.statements.len(), 1);
}

// ── Classification ──────────────────────────────────────────

#[test]
fn classify_keywords() {
    assert_eq!(classify("Let x = 1"), StatementKind::Let);
    assert_eq!(classify("For(i upto n)"), StatementKind::For);
    assert_eq!(classify("While(i<3) {"), StatementKind::While);
    assert_eq!(classify("placeBlock(0,0,0,stone)"), StatementKind::PlaceBlock);
    assert_eq!(classify("placeWall(stone,up,1,1)"), StatementKind::PlaceWall);
    assert_eq!(classify("print(x)"), StatementKind::Print);
    assert_eq!(classify("spawn(cow,0,0,0)"), StatementKind::Spawn);
    assert_eq!(classify("If(x == 1)"), StatementKind::If);
    assert_eq!(classify("Elif(x == 2)"), StatementKind::Elif);
    assert_eq!(classify("Else"), StatementKind::Else);
}

#[test]
fn classify_structure_and_fallbacks() {
    assert_eq!(classify(""), StatementKind::Blank);
    assert_eq!(classify("// Let x = 1"), StatementKind::Comment);
    assert_eq!(classify("i = i + 1"), StatementKind::Assignment);
    assert_eq!(classify("jump(3)"), StatementKind::Unrecognized);
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(classify("let x = 1"), StatementKind::Assignment);
    assert_eq!(classify("Print(x)"), StatementKind::Unrecognized);
    assert_eq!(classify("if(x == 1)"), StatementKind::Assignment);
}

#[test]
fn top_level_kinds() {
    assert!(StatementKind::Let.is_top_level());
    assert!(StatementKind::Spawn.is_top_level());
    assert!(!StatementKind::If.is_top_level());
    assert!(!StatementKind::Assignment.is_top_level());
    assert!(StatementKind::Elif.is_conditional());
    assert!(!StatementKind::Print.is_conditional());
}
