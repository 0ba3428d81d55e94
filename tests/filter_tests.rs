//! Rule file tests: parsing, substitution semantics, and error messages.

use ocrpdf::OcrError;
use ocrpdf::engine::{Filters, unquote};

fn filters(src: &str) -> Filters {
    let mut f = Filters::new();
    f.add(src, "rules").unwrap();
    f
}

fn rule_error(src: &str) -> (usize, String) {
    match Filters::new().add(src, "rules") {
        Err(OcrError::Rule { line, message, .. }) => (line, message),
        other => panic!("expected rule error, got {:?}", other.map(|_| ())),
    }
}

// --- identity ---

#[test]
fn test_no_rules_is_identity() {
    let f = Filters::new();
    assert_eq!(f.apply_line(b"abc  "), b"abc  ");
    assert_eq!(f.apply_text(b"x\ny\n"), b"x\ny\n");
}

#[test]
fn test_empty_source_and_comments_only() {
    let f = filters("\n\n// nothing here\n/* still\nnothing */\n");
    assert_eq!(f.line_rule_count(), 0);
    assert_eq!(f.text_rule_count(), 0);
}

// --- substitution ---

#[test]
fn test_word_rule_replaces_all() {
    let f = filters("line word \"0\" \"O\"\n");
    assert_eq!(f.apply_line(b"B00K 0F"), b"BOOK OF");
}

#[test]
fn test_word_rule_is_literal() {
    let f = filters("line word \"a.c\" \"X\"\n");
    assert_eq!(f.apply_line(b"abc a.c"), b"abc X");
}

#[test]
fn test_word_rule_does_not_expand_dollar() {
    let f = filters("line word \"x\" \"$1\"\n");
    assert_eq!(f.apply_line(b"x"), b"$1");
}

#[test]
fn test_regex_rule_with_groups() {
    let f = filters(r#"line regex `(\w+)@(\w+)` "$2 at $1""#);
    assert_eq!(f.apply_line(b"me@home"), b"home at me");
}

#[test]
fn test_rules_apply_in_order() {
    let f = filters("line word \"a\" \"b\"\nline word \"b\" \"c\"\n");
    assert_eq!(f.apply_line(b"a"), b"c");
}

#[test]
fn test_scopes_are_separate() {
    let f = filters("line word \"x\" \"y\"\ntext regex `-\\n` \"\"\n");
    assert_eq!(f.line_rule_count(), 1);
    assert_eq!(f.text_rule_count(), 1);
    assert_eq!(f.apply_line(b"x-"), b"y-");
    assert_eq!(f.apply_text(b"hyph-\nen\n"), b"hyphen\n");
}

#[test]
fn test_rule_can_empty_a_line() {
    let f = filters("line regex `^\\s*\\d+\\s*$` \"\"");
    assert_eq!(f.apply_line(b" 12 "), b"");
    assert_eq!(f.apply_line(b"p 12"), b"p 12");
}

#[test]
fn test_multiple_sources_accumulate() {
    let mut f = Filters::new();
    f.add("line word \"a\" \"b\"", "one").unwrap();
    f.add("line word \"b\" \"c\"", "two").unwrap();
    assert_eq!(f.line_rule_count(), 2);
    assert_eq!(f.apply_line(b"a"), b"c");
}

#[test]
fn test_trailing_comment_and_crlf() {
    let f = filters("line word \"a\" \"b\" // swap\r\n\r\ntext word \"c\" \"d\"\r\n");
    assert_eq!(f.line_rule_count(), 1);
    assert_eq!(f.text_rule_count(), 1);
}

#[test]
fn test_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.rules");
    let b = dir.path().join("b.rules");
    std::fs::write(&a, "line word \"1\" \"l\"\n").unwrap();
    std::fs::write(&b, "text word \"\\n\\n\" \"\\n\"\n").unwrap();
    let f = Filters::load(&[a, b]).unwrap();
    assert_eq!(f.apply_line(b"he11o"), b"hello");
    assert_eq!(f.apply_text(b"a\n\nb\n"), b"a\nb\n");
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Filters::load(&[dir.path().join("missing.rules")]).is_err());
}

// --- errors ---

#[test]
fn test_error_message_format() {
    let err = Filters::new()
        .add("line word \"\" \"x\"\n", "my.rules")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rule definition in \"my.rules\", line 1: Regular expression or word cannot be empty."
    );
}

#[test]
fn test_error_unknown_scope() {
    let (line, msg) = rule_error("\npage word \"a\" \"b\"\n");
    assert_eq!(line, 2);
    assert_eq!(msg, "Unknown rule scope: page");
}

#[test]
fn test_error_unknown_type() {
    let (_, msg) = rule_error("line glob \"a\" \"b\"\n");
    assert_eq!(msg, "Unknown rule type: glob");
}

#[test]
fn test_error_expected_scope() {
    let (_, msg) = rule_error("\"a\" \"b\"\n");
    assert_eq!(msg, "Expected rule scope, but found \"\\\"a\\\"\"");
}

#[test]
fn test_error_missing_substitution() {
    let (line, msg) = rule_error("line word \"a\"\n");
    assert_eq!(line, 1);
    assert_eq!(msg, "Expected substitution string, but found \"\\n\"");
}

#[test]
fn test_error_two_rules_on_one_line() {
    let (_, msg) = rule_error("line word \"a\" \"b\" line\n");
    assert_eq!(msg, "Expected newline, but found \"line\"");
}

#[test]
fn test_error_bad_regex() {
    let (line, _) = rule_error("line word \"a\" \"b\"\n\nline regex \"(\" \"\"\n");
    assert_eq!(line, 3);
}

#[test]
fn test_error_unterminated_string() {
    let (_, msg) = rule_error("line word \"abc\n");
    assert_eq!(msg, "literal not terminated");
}

#[test]
fn test_error_bad_escape() {
    let (_, msg) = rule_error("line word \"\\q\" \"b\"\n");
    assert_eq!(msg, "Regular expression or word string: invalid syntax");
}

#[test]
fn test_byte_escapes_above_ascii_in_rules() {
    let hex = filters("line word \"\\xe9\" \"e\"\n");
    assert_eq!(hex.apply_line(b"caf\xe9"), b"cafe");
    let octal = filters("line word \"\\351\\351\" \"\\xff\"\n");
    assert_eq!(octal.apply_line(b"a\xe9\xe9b"), b"a\xffb");
}

#[test]
fn test_raw_byte_does_not_match_utf8_char() {
    // U+00E9 is encoded as C3 A9; a rule for the single byte E9 must not touch it.
    let f = filters("line word \"\\xe9\" \"e\"\n");
    assert_eq!(f.apply_line("caf\u{e9}".as_bytes()), "caf\u{e9}".as_bytes());
}

#[test]
fn test_regex_rule_with_raw_byte() {
    let f = filters("text regex \"a\\x80+b\" \"-\"\n");
    assert_eq!(f.apply_text(b"xa\x80\x80by"), b"x-y");
}

// --- unquote ---

#[test]
fn test_unquote_escapes() {
    assert_eq!(unquote(r#""a\tb\n\"q\"\\""#).unwrap(), b"a\tb\n\"q\"\\");
    assert_eq!(unquote(r#""\x41\101\u00e9""#).unwrap(), "AA\u{e9}".as_bytes());
}

#[test]
fn test_unquote_raw() {
    assert_eq!(unquote("`\\d+\r`").unwrap(), b"\\d+");
}

#[test]
fn test_unquote_byte_escapes_above_ascii() {
    assert_eq!(unquote(r#""\xff\377\200""#).unwrap(), vec![0xff, 0xff, 0x80]);
}

#[test]
fn test_unquote_rejects_bad_escapes() {
    assert!(unquote(r#""\400""#).is_err());
    assert!(unquote(r#""\x4""#).is_err());
    assert!(unquote(r#""\q""#).is_err());
    assert!(unquote(r#""\ud800""#).is_err());
}
