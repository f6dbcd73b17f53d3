//! End-to-end tests of R201: single and multiple program units, the
//! headerless main program, submodules and comment preservation.

use super::{f2003, f2008};
use crate::{BaseRule, Rule};

#[test]
fn single_subroutine() {
    let tree = f2003().parse("subroutine test()\nend subroutine\n").unwrap();
    assert!(tree.contains(Rule::Base(BaseRule::SubroutineSubprogram)));
    assert!(tree
        .to_string()
        .contains("SUBROUTINE test\nEND SUBROUTINE"));
}

#[test]
fn multiple_units() {
    let tree = f2003()
        .parse(
            "subroutine test()\nend subroutine\n\
             subroutine test2()\nend subroutine test2\n",
        )
        .unwrap();
    let subs = tree.list_rule(Rule::Base(BaseRule::SubroutineSubprogram));
    assert_eq!(subs.len(), 2);
    assert!(tree.to_string().contains("SUBROUTINE test2"));
}

#[test]
fn empty_input_is_an_empty_program() {
    let tree = f2003().parse("").unwrap();
    assert_eq!(tree.rule, Rule::Base(BaseRule::Program));
    assert!(tree.items.is_empty());
}

#[test]
fn bare_end_is_a_main_program() {
    let tree = f2003().parse("end\n").unwrap();
    assert!(tree.contains(Rule::Base(BaseRule::MainProgram0)));
    assert!(tree.to_string().contains("END PROGRAM"));
}

#[test]
fn named_program_round_trips() {
    let source = "program demo\ninteger :: i\ni = 1\nend program demo\n";
    let tree = f2003().parse(source).unwrap();
    assert_eq!(
        tree.to_string(),
        "PROGRAM demo\n  INTEGER :: i\n  i = 1\nEND PROGRAM demo"
    );
}

#[test]
fn module_with_contained_subroutine() {
    let tree = f2003()
        .parse("module example\ncontains\nsubroutine info()\nend subroutine info\nend module\n")
        .unwrap();
    assert_eq!(
        tree.to_string(),
        "MODULE example\n  CONTAINS\n  SUBROUTINE info\n  END SUBROUTINE info\nEND MODULE example"
    );
}

#[test]
fn submodule_needs_f2008() {
    let source = "submodule (foobar) bar\nend\n";
    assert!(f2003().parse(source).is_err());
    let tree = f2008().parse(source).unwrap();
    assert_eq!(tree.to_string(), "SUBMODULE (foobar) bar\nEND SUBMODULE bar");
}

#[test]
fn submodule_with_specification_part() {
    let tree = f2008()
        .parse("submodule (foobar) bar\n  use empty\nend\n")
        .unwrap();
    assert_eq!(
        tree.to_string(),
        "SUBMODULE (foobar) bar\n  USE empty\nEND SUBMODULE bar"
    );
}

#[test]
fn submodule_with_subprogram_part() {
    let tree = f2008()
        .parse(
            "submodule (foobar) bar\ncontains\n  subroutine info()\n  end subroutine info\nend\n",
        )
        .unwrap();
    assert_eq!(
        tree.to_string(),
        "SUBMODULE (foobar) bar\n  CONTAINS\n  SUBROUTINE info\n  END SUBROUTINE info\n\
         END SUBMODULE bar"
    );
}

#[test]
fn submodule_end_name_mismatch_is_rejected() {
    let err = f2008()
        .parse("submodule (foobar) bar\nend submodule error\n")
        .unwrap_err();
    assert!(err.message.contains("error"));
}

#[test]
fn subroutine_end_name_mismatch_is_rejected() {
    assert!(f2003()
        .parse("subroutine a\nend subroutine b\n")
        .is_err());
}

#[test]
fn comments_are_dropped_by_default() {
    let tree = f2003()
        .parse("! c1\nsubroutine test()\nend subroutine\n! c2\n")
        .unwrap();
    assert!(!tree.to_string().contains("! c"));
}

#[test]
fn comments_flank_the_unit_when_preserved() {
    let mut parser = f2003();
    parser.preserve_comments(true);
    let tree = parser
        .parse("  ! c1\nsubroutine s\nend subroutine\n  ! c2\n")
        .unwrap();
    let rendered = tree.to_string();
    assert!(rendered.contains("! c1"));
    assert!(rendered.contains("! c2"));
    // the comments are siblings of the subprogram, not children
    let first = tree.items.first().and_then(crate::Item::as_tree).unwrap();
    assert_eq!(first.rule, Rule::Base(BaseRule::Comment));
    let last = tree.items.last().and_then(crate::Item::as_tree).unwrap();
    assert_eq!(last.rule, Rule::Base(BaseRule::Comment));
}

#[test]
fn reparse_equals_original_tree() {
    let parser = f2003();
    let tree = parser
        .parse("program p\ninteger :: i\ndo i = 1, 3\nprint *, i\nend do\nend program\n")
        .unwrap();
    let again = parser.parse(&tree.to_string()).unwrap();
    assert_eq!(tree, again);
}

#[test]
fn determinism() {
    let parser = f2003();
    let source = "subroutine s(a, b)\nreal :: a, b\na = a + b\nend subroutine\n";
    assert_eq!(parser.parse(source).unwrap(), parser.parse(source).unwrap());
}

#[test]
fn fixed_form_source() {
    let mut parser = f2003();
    parser.set_form(crate::SourceForm::Fixed);
    let source = "C a comment\n      program p\n      x = 1 +\n     &    2\n      end\n";
    let tree = parser.parse(source).unwrap();
    assert!(tree.to_string().contains("x = 1 + 2"));
}
