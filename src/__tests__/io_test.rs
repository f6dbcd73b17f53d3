//! I/O statement tests: positional unit handling, the FMT promotion rule,
//! keyword tables, format items and the extension toggles.

use super::f2003;
use crate::rules::{b, BaseRule::*};
use crate::{Dialect, Extensions, FortranParser};

#[test]
fn write_with_positional_unit_and_format() {
    let tree = f2003()
        .match_str(b(WriteStmt), "write(6, '(a)') msg")
        .unwrap();
    // the second positional argument is a character constant, so it is
    // promoted to an FMT spec
    assert_eq!(tree.to_string(), "WRITE(6, FMT = '(a)') msg");
}

#[test]
fn write_with_star_format() {
    let tree = f2003().match_str(b(WriteStmt), "write(*, *) x").unwrap();
    assert_eq!(tree.to_string(), "WRITE(*, FMT = *) x");
}

#[test]
fn read_with_control_list() {
    let tree = f2003()
        .match_str(b(ReadStmt), "read(5, iostat=ios) a, b")
        .unwrap();
    assert_eq!(tree.to_string(), "READ(5, IOSTAT = ios) a, b");
}

#[test]
fn read_with_bare_format() {
    let tree = f2003().match_str(b(ReadStmt), "read 100, x").unwrap();
    assert_eq!(tree.to_string(), "READ 100, x");
}

#[test]
fn print_statement() {
    let tree = f2003().match_str(b(PrintStmt), "print *, 'hi', x").unwrap();
    assert_eq!(tree.to_string(), "PRINT *, 'hi', x");
}

#[test]
fn positional_after_named_is_rejected() {
    assert!(f2003()
        .match_str(b(IoControlSpecList), "iostat=ios, 6")
        .is_err());
}

#[test]
fn open_and_close_specs() {
    // a positional unit in a connect-spec list is materialized as UNIT =
    let open = f2003()
        .match_str(b(OpenStmt), "open(10, file='x.dat', status='old')")
        .unwrap();
    assert_eq!(
        open.to_string(),
        "OPEN(UNIT = 10, FILE = 'x.dat', STATUS = 'old')"
    );
    let close = f2003().match_str(b(CloseStmt), "close(10)").unwrap();
    assert_eq!(close.to_string(), "CLOSE(UNIT = 10)");
}

#[test]
fn unknown_keyword_is_a_no_match() {
    assert!(f2003()
        .match_str(b(OpenStmt), "open(10, bogus='x')")
        .is_err());
}

#[test]
fn inquire_iolength_form() {
    let tree = f2003()
        .match_str(b(InquireStmt), "inquire(iolength=n) a, b")
        .unwrap();
    assert_eq!(tree.to_string(), "INQUIRE(IOLENGTH=n) a, b");
}

#[test]
fn io_implied_do() {
    let tree = f2003()
        .match_str(b(WriteStmt), "write(6, *) (a(i), i = 1, n)")
        .unwrap();
    assert!(tree.contains(b(IoImpliedDo)));
    assert_eq!(tree.to_string(), "WRITE(6, FMT = *) (a(i), i = 1, n)");
}

#[test]
fn flush_and_rewind_forms() {
    assert_eq!(
        f2003().match_str(b(FlushStmt), "flush 6").unwrap().to_string(),
        "FLUSH 6"
    );
    assert_eq!(
        f2003()
            .match_str(b(RewindStmt), "rewind(unit=10, err=99)")
            .unwrap()
            .to_string(),
        "REWIND(UNIT = 10, ERR = 99)"
    );
}

#[test]
fn format_statement_items() {
    let tree = f2003()
        .match_str(b(FormatStmt), "format(i3, 2f8.3, 'x', 3(e12.4))")
        .unwrap();
    assert_eq!(
        tree.to_string(),
        "FORMAT(I3, 2F8.3, 'x', 3(E12.4))"
    );
}

#[test]
fn format_slash_and_scale() {
    let tree = f2003().match_str(b(FormatStmt), "format(2p, f8.3/)").unwrap();
    assert!(tree.to_string().contains("2P"));
    assert!(tree.to_string().contains('/'));
}

#[test]
fn bare_x_descriptor_needs_extension() {
    assert!(f2003().match_str(b(FormatStmt), "format(x)").is_err());
    let mut parser = FortranParser::new(Dialect::F2003);
    parser.set_extensions(Extensions {
        x_format: true,
        ..Extensions::default()
    });
    let tree = parser.match_str(b(FormatStmt), "format(x)").unwrap();
    assert_eq!(tree.to_string(), "FORMAT(X)");
}

#[test]
fn dollar_descriptor_needs_extension() {
    assert!(f2003().match_str(b(FormatStmt), "format(a, $)").is_err());
    let mut parser = FortranParser::new(Dialect::F2003);
    parser.set_extensions(Extensions {
        dollar_edit: true,
        ..Extensions::default()
    });
    assert!(parser.match_str(b(FormatStmt), "format(a, $)").is_ok());
}

#[test]
fn byte_type_needs_extension() {
    assert!(f2003().match_str(b(IntrinsicTypeSpec), "byte").is_err());
    let mut parser = FortranParser::new(Dialect::F2003);
    parser.set_extensions(Extensions {
        byte_type: true,
        ..Extensions::default()
    });
    assert_eq!(
        parser.match_str(b(IntrinsicTypeSpec), "byte").unwrap().to_string(),
        "BYTE"
    );
}

#[test]
fn double_complex_needs_extension() {
    assert!(f2003()
        .match_str(b(IntrinsicTypeSpec), "double complex")
        .is_err());
    let mut parser = FortranParser::new(Dialect::F2003);
    parser.set_extensions(Extensions {
        double_complex: true,
        ..Extensions::default()
    });
    assert_eq!(
        parser
            .match_str(b(IntrinsicTypeSpec), "double complex")
            .unwrap()
            .to_string(),
        "DOUBLE COMPLEX"
    );
}

#[test]
fn data_statement() {
    let tree = f2003()
        .match_str(b(DataStmt), "data a, b / 1, 2 /, c / 3 /")
        .unwrap();
    assert_eq!(tree.to_string(), "DATA a, b / 1, 2 /, c / 3 /");
}

#[test]
fn namelist_statement() {
    let tree = f2003()
        .match_str(b(NamelistStmt), "namelist /grp/ a, b")
        .unwrap();
    assert_eq!(tree.to_string(), "NAMELIST /grp/ a, b");
}

#[test]
fn common_statement() {
    let tree = f2003()
        .match_str(b(CommonStmt), "common /blk/ a, b // c")
        .unwrap();
    assert_eq!(tree.to_string(), "COMMON /blk/ a, b // c");
}

#[test]
fn allocate_and_deallocate() {
    let alloc = f2003()
        .match_str(b(AllocateStmt), "allocate(a(n), stat=ierr)")
        .unwrap();
    assert_eq!(alloc.to_string(), "ALLOCATE(a(n), STAT = ierr)");
    let dealloc = f2003().match_str(b(DeallocateStmt), "deallocate(a)").unwrap();
    assert_eq!(dealloc.to_string(), "DEALLOCATE(a)");
}

#[test]
fn use_statement_forms() {
    let plain = f2003().match_str(b(UseStmt), "use mymod").unwrap();
    assert_eq!(plain.to_string(), "USE mymod");
    let only = f2003()
        .match_str(b(UseStmt), "use mymod, only: a, b => c")
        .unwrap();
    assert_eq!(only.to_string(), "USE mymod, ONLY: a, b => c");
    let nature = f2003()
        .match_str(b(UseStmt), "use, intrinsic :: iso_c_binding")
        .unwrap();
    assert_eq!(nature.to_string(), "USE, INTRINSIC :: iso_c_binding");
}
