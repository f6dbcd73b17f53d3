//! Expression-level tests driven through the matcher kernel directly:
//! operator precedence, literals, kind selectors and designators.

use super::f2003;
use crate::rules::{b, BaseRule::*};
use crate::{Item, Rule};

fn expr(text: &str) -> crate::CstNode {
    f2003().match_str(b(Expr), text).unwrap()
}

#[test]
fn power_binds_tighter_than_mult_and_add() {
    let tree = expr("b + c * d**e");
    // b + (c * (d ** e))
    assert_eq!(tree.rule, b(Level2Expr));
    assert_eq!(tree.items[1].as_word(), Some("+"));
    let rhs = tree.items[2].as_tree().unwrap();
    assert_eq!(rhs.rule, b(AddOperand));
    assert_eq!(rhs.items[1].as_word(), Some("*"));
    let power = rhs.items[2].as_tree().unwrap();
    assert_eq!(power.rule, b(MultOperand));
    assert_eq!(power.items[1].as_word(), Some("**"));
    assert_eq!(tree.to_string(), "b + c * d ** e");
}

#[test]
fn power_is_right_associative() {
    let tree = expr("a ** b ** c");
    let rhs = tree.items[2].as_tree().unwrap();
    assert_eq!(rhs.rule, b(MultOperand));
    assert_eq!(rhs.to_string(), "b ** c");
}

#[test]
fn add_is_left_associative() {
    let tree = expr("a - b + c");
    assert_eq!(tree.items[1].as_word(), Some("+"));
    assert_eq!(tree.items[0].as_tree().unwrap().to_string(), "a - b");
}

#[test]
fn parenthesis_overrides_precedence() {
    let tree = expr("(a + b) * c");
    assert_eq!(tree.rule, b(AddOperand));
    assert_eq!(tree.items[0].as_tree().unwrap().rule, b(Parenthesis));
    assert_eq!(tree.to_string(), "(a + b) * c");
}

#[test]
fn relational_and_logical_operators() {
    let tree = expr("a .lt. b .and. x > y");
    assert_eq!(tree.rule, b(OrOperand));
    assert_eq!(tree.items[1].as_word(), Some(".AND."));
    assert_eq!(tree.to_string(), "a .LT. b .AND. x > y");
}

#[test]
fn defined_operators() {
    let tree = expr("a .myop. b");
    assert_eq!(tree.rule, b(Expr));
    assert_eq!(tree.items[1].as_word(), Some(".MYOP."));
    let unary = f2003().match_str(b(Level1Expr), ".inv. x").unwrap();
    assert_eq!(unary.items[0].as_word(), Some(".INV."));
}

#[test]
fn exponent_sign_is_not_an_operator() {
    let tree = expr("1.0e+3 + x");
    assert_eq!(tree.items[0].as_tree().unwrap().to_string(), "1.0e+3");
    assert_eq!(tree.items[2].as_tree().unwrap().to_string(), "x");
}

#[test]
fn concat_inside_string_is_protected() {
    let tree = expr("'a // b' // c");
    assert_eq!(tree.rule, b(Level3Expr));
    assert_eq!(tree.items[0].as_tree().unwrap().to_string(), "'a // b'");
}

#[test]
fn literal_constants() {
    assert_eq!(expr("42").rule, b(IntLiteralConstant));
    assert_eq!(expr("42_8").to_string(), "42_8");
    assert_eq!(expr("1.5d0").rule, b(RealLiteralConstant));
    assert_eq!(expr(".true.").to_string(), ".TRUE.");
    assert_eq!(expr("b'0101'").to_string(), "B'0101'");
    assert_eq!(expr("(1.0, 2.0)").rule, b(ComplexLiteralConstant));
}

#[test]
fn char_literal_keeps_case_and_kind() {
    let tree = expr("nondefaultchar_\"hello\"");
    assert_eq!(tree.rule, b(CharLiteralConstant));
    assert_eq!(tree.items[0].as_word(), Some("\"hello\""));
    assert_eq!(tree.items[1].as_word(), Some("nondefaultchar"));
    assert_eq!(tree.to_string(), "nondefaultchar_\"hello\"");
}

#[test]
fn doubled_quote_stays_one_literal() {
    assert_eq!(expr("'don''t'").to_string(), "'don''t'");
}

#[test]
fn function_reference_and_array_section() {
    let call = expr("f()");
    assert_eq!(call.rule, b(FunctionReference));
    let part = expr("a(i, 1:n)");
    assert_eq!(part.rule, b(PartRef));
    assert_eq!(part.to_string(), "a(i, 1 : n)");
}

#[test]
fn data_ref_uses_percent() {
    let tree = expr("a%b%c");
    assert_eq!(tree.rule, Rule::Base(DataRef));
    assert_eq!(tree.items.len(), 3);
    assert_eq!(tree.to_string(), "a % b % c");
}

#[test]
fn kind_selector_spellings_are_equivalent() {
    let parser = f2003();
    let with_kw = parser.match_str(b(IntrinsicTypeSpec), "INTEGER(KIND=8)").unwrap();
    let bare = parser.match_str(b(IntrinsicTypeSpec), "INTEGER(8)").unwrap();
    assert_eq!(with_kw, bare);
    assert_eq!(with_kw.to_string(), "INTEGER(KIND = 8)");
    let star = parser.match_str(b(IntrinsicTypeSpec), "INTEGER*8").unwrap();
    assert_eq!(star.to_string(), "INTEGER*8");
    let selector = star.items[1].as_tree().unwrap();
    assert_eq!(selector.items.len(), 2);
}

#[test]
fn char_selector_len_and_kind() {
    let parser = f2003();
    let tree = parser
        .match_str(b(IntrinsicTypeSpec), "CHARACTER(LEN=10, KIND=1)")
        .unwrap();
    assert_eq!(tree.to_string(), "CHARACTER(LEN = 10, KIND = 1)");
}

#[test]
fn unary_minus_via_level_2() {
    let tree = expr("-a + b");
    let lhs = tree.items[0].as_tree().unwrap();
    assert_eq!(lhs.rule, b(Level2UnaryExpr));
    assert_eq!(tree.to_string(), "- a + b");
}

#[test]
fn array_constructor_brackets() {
    assert_eq!(expr("(/ 1, 2 /)").to_string(), "(/1, 2/)");
    assert_eq!(expr("[1, 2]").to_string(), "[1, 2]");
}

#[test]
fn failed_match_leaves_no_node() {
    assert!(f2003().match_str(b(Expr), "a +").is_err());
    assert!(f2003().match_str(b(Expr), "* b").is_err());
}

#[test]
fn assignment_statement() {
    let tree = f2003().match_str(b(AssignmentStmt), "a = b + c * d**e").unwrap();
    assert_eq!(tree.to_string(), "a = b + c * d ** e");
    let rhs = tree.items[2].as_tree().unwrap();
    assert_eq!(rhs.rule, b(Level2Expr));
}

#[test]
fn pointer_assignment() {
    let tree = f2003()
        .match_str(b(PointerAssignmentStmt), "p => target")
        .unwrap();
    assert_eq!(tree.to_string(), "p => target");
    assert!(matches!(tree.items[1], Item::Absent));
}
