mod construct_test;
mod error_test;
mod expr_test;
mod io_test;
mod program_test;

use crate::{Dialect, FortranParser};

pub(crate) fn f2003() -> FortranParser {
    FortranParser::new(Dialect::F2003)
}

pub(crate) fn f2008() -> FortranParser {
    FortranParser::new(Dialect::F2008)
}
