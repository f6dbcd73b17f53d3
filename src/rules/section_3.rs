//! Section 3 of the standard: names, constants and labels (R304-R313).

use super::BaseRule::{self, *};
use super::{alts, rlist, b, shaped, RuleSpec, Shape};
use crate::pattern;

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        // R304: a simple string match; identifiers keep their case
        Name => shaped(Shape::Text(&pattern::ABS_NAME)),
        // R305
        Constant => alts(rlist![b(LiteralConstant), b(NamedConstant)]),
        // R306
        LiteralConstant => alts(rlist![
            b(IntLiteralConstant),
            b(RealLiteralConstant),
            b(ComplexLiteralConstant),
            b(LogicalLiteralConstant),
            b(CharLiteralConstant),
            b(BozLiteralConstant),
        ]),
        // R307
        NamedConstant => alts(rlist![b(Name)]),
        // R308
        IntConstant => alts(rlist![b(Constant)]),
        // R309
        CharConstant => alts(rlist![b(Constant)]),
        // R313
        Label => shaped(Shape::Text(&pattern::ABS_LABEL)),
        _ => return None,
    })
}
