//! Block construct tests: IF / CASE / DO (including label-DO termination),
//! WHERE, ASSOCIATE, derived types and interfaces.

use super::f2003;
use crate::rules::{b, BaseRule::*};

fn in_subroutine(body: &str) -> crate::CstNode {
    let source = format!("subroutine s\n{}\nend subroutine\n", body);
    f2003().parse(&source).unwrap()
}

#[test]
fn if_construct_with_else_branches() {
    let tree = in_subroutine(
        "if (a > 0) then\nx = 1\nelse if (a < 0) then\nx = 2\nelse\nx = 3\nend if",
    );
    let if_node = tree.find_rule(b(IfConstruct)).unwrap();
    assert!(if_node.contains(b(ElseIfStmt)));
    assert!(if_node.contains(b(ElseStmt)));
    let rendered = if_node.to_string();
    assert!(rendered.starts_with("IF (a > 0) THEN"));
    assert!(rendered.contains("\nELSE IF (a < 0) THEN"));
    assert!(rendered.contains("\n  x = 3"));
    assert!(rendered.ends_with("END IF"));
}

#[test]
fn repeated_else_if_sections() {
    let tree = in_subroutine(
        "if (a) then\nx = 1\nelse if (c) then\nx = 2\nelse if (d) then\nx = 3\nend if",
    );
    let if_node = tree.find_rule(b(IfConstruct)).unwrap();
    assert_eq!(if_node.list_rule(b(ElseIfStmt)).len(), 2);
}

#[test]
fn named_if_construct_checks_divider_names() {
    assert!(f2003()
        .parse("subroutine s\nouter: if (a) then\nx = 1\nelse wrong\nend if outer\nend subroutine\n")
        .is_err());
    let tree = f2003()
        .parse("subroutine s\nouter: if (a) then\nx = 1\nelse outer\nend if outer\nend subroutine\n")
        .unwrap();
    assert!(tree.to_string().contains("outer:IF (a) THEN"));
}

#[test]
fn nonlabel_do_construct() {
    let tree = in_subroutine("do i = 1, n\nx = x + 1\nend do");
    let do_node = tree.find_rule(b(BlockNonlabelDoConstruct)).unwrap();
    assert_eq!(
        do_node.to_string(),
        "DO i = 1, n\n  x = x + 1\nEND DO"
    );
}

#[test]
fn do_while_construct() {
    let tree = in_subroutine("do while (x < 10)\nx = x + 1\nend do");
    assert!(tree.to_string().contains("DO WHILE (x < 10)"));
}

#[test]
fn label_do_terminated_by_continue() {
    let tree = in_subroutine("DO 10 I = 1, N\n  X = X + 1\n 10 CONTINUE");
    let do_node = tree.find_rule(b(BlockLabelDoConstruct)).unwrap();
    let label = do_node.find_rule(b(Label)).unwrap();
    assert_eq!(label.items[0].as_word(), Some("10"));
    let terminator = do_node.items.last().and_then(crate::Item::as_tree).unwrap();
    assert_eq!(terminator.rule, b(ContinueStmt));
    assert_eq!(
        do_node.to_string(),
        "DO 10 I = 1, N\n  X = X + 1\n10 CONTINUE"
    );
}

#[test]
fn label_do_with_wrong_terminator_label_fails() {
    assert!(f2003()
        .parse("subroutine s\ndo 10 i = 1, n\nx = 1\n20 continue\nend subroutine\n")
        .is_err());
}

#[test]
fn nested_label_dos_share_a_terminator() {
    let tree = in_subroutine("do 10 i = 1, n\ndo 10 j = 1, n\nx = x + 1\n10 continue");
    let outer = tree.find_rule(b(BlockLabelDoConstruct)).unwrap();
    // the inner construct consumed the shared terminator and closed both
    let inner = outer.items[1].as_tree().unwrap();
    assert_eq!(inner.rule, b(BlockLabelDoConstruct));
    assert!(inner.contains(b(ContinueStmt)));
}

#[test]
fn case_construct() {
    let tree = in_subroutine(
        "select case (i)\ncase (1)\nx = 1\ncase (2:3)\nx = 2\ncase default\nx = 3\nend select",
    );
    let case_node = tree.find_rule(b(CaseConstruct)).unwrap();
    assert_eq!(case_node.list_rule(b(CaseStmt)).len(), 3);
    let rendered = case_node.to_string();
    assert!(rendered.contains("\nCASE (1)\n  x = 1"));
    assert!(rendered.contains("CASE (2 : 3)"));
    assert!(rendered.contains("CASE DEFAULT"));
}

#[test]
fn where_construct_with_elsewhere() {
    let tree = in_subroutine("where (a > 0)\nb = 1\nelsewhere\nb = 0\nend where");
    let where_node = tree.find_rule(b(WhereConstruct)).unwrap();
    assert!(where_node.contains(b(ElsewhereStmt)));
    assert!(where_node.to_string().starts_with("WHERE (a > 0)"));
}

#[test]
fn associate_construct() {
    let tree = in_subroutine("associate (z => a + b)\nx = z\nend associate");
    let assoc = tree.find_rule(b(AssociateConstruct)).unwrap();
    assert!(assoc.to_string().starts_with("ASSOCIATE(z => a + b)"));
}

#[test]
fn select_type_construct() {
    let tree = in_subroutine(
        "select type (p)\ntype is (integer)\nx = 1\nclass default\nx = 2\nend select",
    );
    let node = tree.find_rule(b(SelectTypeConstruct)).unwrap();
    assert!(node.contains(b(TypeGuardStmt)));
    assert!(node.to_string().contains("TYPE IS (INTEGER)"));
    assert!(node.to_string().contains("CLASS DEFAULT"));
}

#[test]
fn derived_type_definition() {
    let tree = f2003()
        .parse(
            "module m\ntype, public :: point\ninteger :: x\ninteger :: y\nend type point\nend module\n",
        )
        .unwrap();
    let type_def = tree.find_rule(b(DerivedTypeDef)).unwrap();
    assert!(type_def
        .to_string()
        .starts_with("TYPE, PUBLIC :: point"));
    assert!(type_def.to_string().ends_with("END TYPE point"));
}

#[test]
fn derived_type_end_name_mismatch_fails() {
    assert!(f2003()
        .parse("module m\ntype :: point\ninteger :: x\nend type other\nend module\n")
        .is_err());
}

#[test]
fn interface_block() {
    let tree = f2003()
        .parse(
            "module m\ninterface swap\nmodule procedure swap_int\nend interface\nend module\n",
        )
        .unwrap();
    let block = tree.find_rule(b(InterfaceBlock)).unwrap();
    assert!(block.to_string().starts_with("INTERFACE swap"));
    assert!(block.to_string().contains("MODULE PROCEDURE swap_int"));
}

#[test]
fn type_bound_procedures() {
    let tree = f2003()
        .parse(
            "module m\ntype :: t\ninteger :: v\ncontains\nprocedure :: get => get_v\nend type\nend module\n",
        )
        .unwrap();
    let binding = tree.find_rule(b(SpecificBinding)).unwrap();
    assert_eq!(binding.to_string(), "PROCEDURE :: get => get_v");
}

#[test]
fn forall_construct_and_stmt() {
    let tree = in_subroutine("forall (i = 1:n)\na(i) = 0\nend forall");
    assert!(tree.contains(b(ForallConstruct)));
    let stmt = f2003()
        .match_str(b(ForallStmt), "forall (i = 1:n) a(i) = 0")
        .unwrap();
    assert_eq!(stmt.to_string(), "FORALL (i = 1 : n) a(i) = 0");
}

#[test]
fn function_with_result_suffix() {
    let tree = f2003()
        .parse("pure function f(x) result(y)\nreal :: x, y\ny = x\nend function f\n")
        .unwrap();
    let stmt = tree.find_rule(b(FunctionStmt)).unwrap();
    assert_eq!(stmt.to_string(), "PURE FUNCTION f(x) RESULT(y)");
}

#[test]
fn goto_and_arithmetic_if() {
    let goto = f2003().match_str(b(GotoStmt), "go to 100").unwrap();
    assert_eq!(goto.to_string(), "GO TO 100");
    let aif = f2003()
        .match_str(b(ArithmeticIfStmt), "if (x - 1) 10, 20, 30")
        .unwrap();
    assert_eq!(aif.to_string(), "IF (x - 1) 10, 20, 30");
}
