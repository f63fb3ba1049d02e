use super::*;

#[test]
fn peek_and_advance_walk_the_input() {
    let mut c = Cursor::new("ab");
    assert_eq!(c.peek(), Some('a'));
    assert_eq!(c.advance(), Ok('a'));
    assert_eq!(c.advance(), Ok('b'));
    assert!(c.eof());
    assert_eq!(c.peek(), None);
    assert_eq!(c.advance(), Err(ParseError::UnexpectedEnd(2)));
}

#[test]
fn consume_while_accumulates_in_order() {
    let mut c = Cursor::new("name, path");
    assert_eq!(c.consume_while(|ch| ch.is_ascii_alphabetic()), "name");
    assert_eq!(c.peek(), Some(','));
    // predicate that never matches consumes nothing
    assert_eq!(c.consume_while(|_| false), "");
    assert_eq!(c.pos(), 4);
}

#[test]
fn consume_while_stops_at_eof() {
    let mut c = Cursor::new("tail");
    assert_eq!(c.consume_while(|_| true), "tail");
    assert!(c.eof());
}

#[test]
fn consume_while_keeps_multibyte_chars_whole() {
    let mut c = Cursor::new("/tmp/café x");
    assert_eq!(c.consume_while(|ch| ch != ' '), "/tmp/café");
    assert_eq!(c.rest(), " x");
}

#[test]
fn consume_whitespace_skips_blank_runs() {
    let mut c = Cursor::new(" \n\t \r SELECT");
    c.consume_whitespace();
    assert_eq!(c.rest(), "SELECT");

    let mut only_ws = Cursor::new("   ");
    only_ws.consume_whitespace();
    assert!(only_ws.eof());
}

#[test]
fn starts_with_is_exact_and_safe_near_eof() {
    let c = Cursor::new("FROM /tmp");
    assert!(c.starts_with("FROM"));
    assert!(!c.starts_with("from"));
    assert!(!c.starts_with("FROM /tmp/longer"));
    assert!(!c.starts_with(""));

    let mut end = Cursor::new("WHERE");
    assert!(end.consume_literal("WHERE"));
    assert!(end.eof());
    assert!(!end.starts_with("W"));
    assert!(!end.consume_literal("W"));
}

#[test]
fn missing_char_counts_as_whitespace() {
    assert!(is_whitespace(None));
    assert!(is_whitespace(Some(' ')));
    assert!(is_whitespace(Some('\n')));
    assert!(!is_whitespace(Some('x')));
    assert!(!is_whitespace(Some(',')));
}
