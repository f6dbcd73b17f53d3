//! Section 2 of the standard: program structure (R201-R215) and the
//! comment pseudo-rule.

use super::BaseRule::{self, *};
use super::{alts, rlist, b, shaped, BlockSpec, Hook, RuleSpec, Shape};
use crate::reader::{FortranReader, SourceItem};
use crate::{FortranParser, Item, MatchErr, MatchResult};

pub(super) fn spec(rule: BaseRule) -> Option<RuleSpec> {
    Some(match rule {
        Comment => shaped(Shape::CustomReader(m_comment)),
        Program => shaped(Shape::CustomReader(m_program)),
        // R202
        ProgramUnit => alts(rlist![
            b(Comment),
            b(MainProgram),
            b(ExternalSubprogram),
            b(Module),
            b(BlockData),
        ]),
        // R203
        ExternalSubprogram => alts(rlist![
            b(Comment),
            b(FunctionSubprogram),
            b(SubroutineSubprogram),
        ]),
        // R204
        SpecificationPart => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![
                b(UseStmt),
                b(ImportStmt),
                b(ImplicitPart),
                b(DeclarationConstruct),
            ],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R205
        ImplicitPart => shaped(Shape::Blocked(BlockSpec {
            start: None,
            mids: rlist![b(ImplicitPartStmt)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R206
        ImplicitPartStmt => alts(rlist![
            b(Comment),
            b(ImplicitStmt),
            b(ParameterStmt),
            b(FormatStmt),
            b(EntryStmt),
        ]),
        // R207
        DeclarationConstruct => alts(rlist![
            b(Comment),
            b(DerivedTypeDef),
            b(EntryStmt),
            b(EnumDef),
            b(FormatStmt),
            b(InterfaceBlock),
            b(ParameterStmt),
            b(ProcedureDeclarationStmt),
            b(SpecificationStmt),
            b(TypeDeclarationStmt),
            b(StmtFunctionStmt),
        ]),
        // R208: the first construct decides whether an execution part is
        // present at all
        ExecutionPart => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ExecutableConstructC201)),
            mids: rlist![b(ExecutionPartConstructC201)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R209
        ExecutionPartConstruct => alts(rlist![
            b(Comment),
            b(ExecutableConstruct),
            b(FormatStmt),
            b(EntryStmt),
            b(DataStmt),
        ]),
        ExecutionPartConstructC201 => alts(rlist![
            b(Comment),
            b(ExecutableConstructC201),
            b(FormatStmt),
            b(EntryStmt),
            b(DataStmt),
        ]),
        // R210
        InternalSubprogramPart => shaped(Shape::Blocked(BlockSpec {
            start: Some(b(ContainsStmt)),
            mids: rlist![b(InternalSubprogram)],
            end: None,
            match_labels: false,
            hook: Hook::None,
        })),
        // R211
        InternalSubprogram => alts(rlist![b(FunctionSubprogram), b(SubroutineSubprogram)]),
        // R212
        SpecificationStmt => alts(rlist![
            b(AccessStmt),
            b(AllocatableStmt),
            b(AsynchronousStmt),
            b(BindStmt),
            b(Comment),
            b(CommonStmt),
            b(DataStmt),
            b(DimensionStmt),
            b(EquivalenceStmt),
            b(ExternalStmt),
            b(IntentStmt),
            b(IntrinsicStmt),
            b(NamelistStmt),
            b(OptionalStmt),
            b(PointerStmt),
            b(ProtectedStmt),
            b(SaveStmt),
            b(TargetStmt),
            b(VolatileStmt),
            b(ValueStmt),
        ]),
        // R213
        ExecutableConstruct => alts(rlist![
            b(ActionStmt),
            b(AssociateConstruct),
            b(CaseConstruct),
            b(DoConstruct),
            b(ForallConstruct),
            b(IfConstruct),
            b(SelectTypeConstruct),
            b(WhereConstruct),
        ]),
        ExecutableConstructC201 => alts(rlist![
            b(ActionStmtC201),
            b(AssociateConstruct),
            b(CaseConstruct),
            b(DoConstruct),
            b(ForallConstruct),
            b(IfConstruct),
            b(SelectTypeConstruct),
            b(WhereConstruct),
        ]),
        // R214
        ActionStmt => alts(ACTION_STMT_ALTS),
        // C201 forbids end-function-stmt and end-subroutine-stmt inside an
        // execution part
        ActionStmtC201 => alts(rlist![
            b(AllocateStmt),
            b(AssignmentStmt),
            b(BackspaceStmt),
            b(CallStmt),
            b(CloseStmt),
            b(Comment),
            b(ContinueStmt),
            b(CycleStmt),
            b(DeallocateStmt),
            b(EndfileStmt),
            b(ExitStmt),
            b(FlushStmt),
            b(ForallStmt),
            b(GotoStmt),
            b(IfStmt),
            b(InquireStmt),
            b(NullifyStmt),
            b(OpenStmt),
            b(PointerAssignmentStmt),
            b(PrintStmt),
            b(ReadStmt),
            b(ReturnStmt),
            b(RewindStmt),
            b(StopStmt),
            b(WaitStmt),
            b(WhereStmt),
            b(WriteStmt),
            b(ArithmeticIfStmt),
            b(ComputedGotoStmt),
        ]),
        // C802 additionally forbids a nested if-stmt
        ActionStmtC802 => alts(rlist![
            b(AllocateStmt),
            b(AssignmentStmt),
            b(BackspaceStmt),
            b(CallStmt),
            b(CloseStmt),
            b(Comment),
            b(ContinueStmt),
            b(CycleStmt),
            b(DeallocateStmt),
            b(EndfileStmt),
            b(ExitStmt),
            b(FlushStmt),
            b(ForallStmt),
            b(GotoStmt),
            b(InquireStmt),
            b(NullifyStmt),
            b(OpenStmt),
            b(PointerAssignmentStmt),
            b(PrintStmt),
            b(ReadStmt),
            b(ReturnStmt),
            b(RewindStmt),
            b(StopStmt),
            b(WaitStmt),
            b(WhereStmt),
            b(WriteStmt),
            b(ArithmeticIfStmt),
            b(ComputedGotoStmt),
        ]),
        // C824: statements that may not terminate a label-DO
        ActionStmtC824 => alts(ACTION_STMT_C824_ALTS),
        // R215
        Keyword => alts(rlist![b(Name)]),
        _ => return None,
    })
}

pub(super) const ACTION_STMT_ALTS: &[super::Rule] = &[
    b(AllocateStmt),
    b(AssignmentStmt),
    b(BackspaceStmt),
    b(CallStmt),
    b(CloseStmt),
    b(Comment),
    b(ContinueStmt),
    b(CycleStmt),
    b(DeallocateStmt),
    b(EndfileStmt),
    b(EndFunctionStmt),
    b(EndSubroutineStmt),
    b(ExitStmt),
    b(FlushStmt),
    b(ForallStmt),
    b(GotoStmt),
    b(IfStmt),
    b(InquireStmt),
    b(NullifyStmt),
    b(OpenStmt),
    b(PointerAssignmentStmt),
    b(PrintStmt),
    b(ReadStmt),
    b(ReturnStmt),
    b(RewindStmt),
    b(StopStmt),
    b(WaitStmt),
    b(WhereStmt),
    b(WriteStmt),
    b(ArithmeticIfStmt),
    b(ComputedGotoStmt),
];

pub(super) const ACTION_STMT_C824_ALTS: &[super::Rule] = &[
    b(AllocateStmt),
    b(AssignmentStmt),
    b(BackspaceStmt),
    b(CallStmt),
    b(CloseStmt),
    b(Comment),
    b(DeallocateStmt),
    b(EndfileStmt),
    b(FlushStmt),
    b(ForallStmt),
    b(IfStmt),
    b(InquireStmt),
    b(NullifyStmt),
    b(OpenStmt),
    b(PointerAssignmentStmt),
    b(PrintStmt),
    b(ReadStmt),
    b(RewindStmt),
    b(WaitStmt),
    b(WhereStmt),
    b(WriteStmt),
    b(ComputedGotoStmt),
];

/// A comment is its own reader item; anything else is put back.
fn m_comment(_parser: &FortranParser, reader: &mut FortranReader) -> MatchResult<Vec<Item>> {
    match reader.next_item() {
        Some(SourceItem::Comment(comment)) => Ok(vec![Item::word(comment.text)]),
        _ => Err(MatchErr::NoMatch),
    }
}

/// R201: program is program-unit [program-unit]... The top-level loop pulls
/// units until the reader runs dry; when no unit matches, a main program
/// without a program-stmt is tried before giving up.
fn m_program(parser: &FortranParser, reader: &mut FortranReader) -> MatchResult<Vec<Item>> {
    let mut content = Vec::new();
    parser.eat_comments(reader, &mut content);
    loop {
        if reader.at_eof() {
            break;
        }
        match parser.match_reader(b(ProgramUnit), reader) {
            Ok(unit) => {
                content.push(unit);
                parser.eat_comments(reader, &mut content);
            }
            Err(MatchErr::NoMatch) => {
                let main0 = parser.match_reader(b(MainProgram0), reader)?;
                return Ok(vec![Item::tree(main0)]);
            }
            Err(fatal) => return Err(fatal),
        }
    }
    Ok(content.into_iter().map(Item::tree).collect())
}
