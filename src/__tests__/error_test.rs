//! Error reporting tests: the `at line N` echo of the offending physical
//! line, deepest-position localization and reader restoration.

use super::f2003;
use crate::rules::{b, BaseRule::*};
use crate::{FortranReader, SourceItem};

#[test]
fn error_points_at_the_first_bad_line() {
    let err = f2003()
        .parse("      subroutin test()\n      end subroutine\n")
        .unwrap_err();
    assert_eq!(err.line, 1);
    // the column is where the statement starts, past the indentation
    assert_eq!(err.column, 7);
    let text = err.to_string();
    assert!(text.contains("at line 1\n>>>      subroutin test()\n"), "{}", text);
}

#[test]
fn error_points_at_the_deepest_line() {
    let err = f2003()
        .parse("subroutine test()\n\nend subroutin\n\n\n")
        .unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 1);
    assert_eq!(err.position(), crate::Position::new(3, 1));
    assert!(err.to_string().contains("at line 3\n>>>end subroutin\n"));
}

#[test]
fn error_after_a_good_unit() {
    let err = f2003()
        .parse(
            "subroutine test()\nend subroutine\nsubroutine test2()\nend subroutin\n",
        )
        .unwrap_err();
    assert_eq!(err.line, 4);
}

#[test]
fn bad_unit_start_is_reported() {
    let err = f2003()
        .parse("subroutine 1test()\nend subroutine\n")
        .unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn failed_match_restores_the_reader() {
    let parser = f2003();
    let mut reader = FortranReader::free_form("x = 1\ny = 2\n", false);
    let before = reader.peek().cloned();
    // a module cannot start here; the attempt must not consume anything
    assert!(parser.match_reader(b(Module), &mut reader).is_err());
    assert_eq!(reader.peek().cloned(), before);
    // the statement is still matchable afterwards
    assert!(parser.match_reader(b(ActionStmt), &mut reader).is_ok());
}

#[test]
fn no_match_never_escapes_a_successful_parse() {
    // plenty of backtracking inside, but the parse succeeds
    let tree = f2003()
        .parse("program p\nif (a(i) > b(i, j)) x = a(i)\nend program\n")
        .unwrap();
    assert!(tree.contains(b(IfStmt)));
}

#[test]
fn comment_items_do_not_satisfy_statement_rules() {
    let parser = f2003();
    let mut reader = FortranReader::free_form("! just a comment\nx = 1\n", true);
    assert!(parser.match_reader(b(AssignmentStmt), &mut reader).is_err());
    match reader.peek() {
        Some(SourceItem::Comment(comment)) => assert!(comment.text.contains("just a comment")),
        other => panic!("expected the comment back at the front, found {:?}", other),
    }
}

#[test]
fn syntax_error_inside_construct_aborts() {
    // name mismatch on the end statement is an error, not a silent no-match
    let err = f2003()
        .parse("program p\nouter: do i = 1, 3\nx = 1\nend do wrong\nend program\n")
        .unwrap_err();
    assert!(err.message.contains("wrong"), "{}", err.message);
}
