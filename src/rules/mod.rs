//! The rule registry: a closed universe of grammar-rule tags together with,
//! for each tag, its ordered alternative list and optional structural shape.
//!
//! Hand-written productions live in one module per section of the standard
//! (`section_2` .. `section_12`); `f2008` holds the delta rules that replace
//! or extend their F2003 counterparts. The `X_List`, `X_Name` and
//! `Scalar_X` wrapper rules referenced throughout the standard are not
//! written out by hand: they are synthesized in [spec] from the wrapper
//! variants of [Rule] at lookup time.

pub(crate) mod f2008;
mod section_10;
mod section_11;
mod section_12;
mod section_2;
mod section_3;
mod section_4;
mod section_5;
mod section_6;
mod section_7;
mod section_8;
mod section_9;

use crate::pattern::OpClass;
use crate::reader::FortranReader;
use crate::{FortranParser, Item, MatchResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// One hand-written production of the Fortran 2003/2008 grammar. Variant
/// names mirror the names used by the standard (`Level_2_Expr`,
/// `Action_Stmt_C824`, ...); [Rule::grammar_name] recovers that spelling.
#[allow(clippy::upper_case_acronyms)]
pub enum BaseRule {
    // section 2: program structure
    Comment,
    Program,
    ProgramUnit,
    ExternalSubprogram,
    SpecificationPart,
    ImplicitPart,
    ImplicitPartStmt,
    DeclarationConstruct,
    ExecutionPart,
    ExecutionPartConstruct,
    ExecutionPartConstructC201,
    InternalSubprogramPart,
    InternalSubprogram,
    SpecificationStmt,
    ExecutableConstruct,
    ExecutableConstructC201,
    ActionStmt,
    ActionStmtC201,
    ActionStmtC802,
    ActionStmtC824,
    Keyword,
    // section 3: lexical tokens
    Name,
    Constant,
    LiteralConstant,
    NamedConstant,
    IntConstant,
    CharConstant,
    Label,
    // section 4: types
    TypeSpec,
    TypeParamValue,
    IntrinsicTypeSpec,
    KindSelector,
    SignedIntLiteralConstant,
    IntLiteralConstant,
    DigitString,
    BozLiteralConstant,
    BinaryConstant,
    OctalConstant,
    HexConstant,
    SignedRealLiteralConstant,
    RealLiteralConstant,
    ComplexLiteralConstant,
    RealPart,
    ImagPart,
    CharSelector,
    LengthSelector,
    CharLength,
    CharLiteralConstant,
    LogicalLiteralConstant,
    DerivedTypeDef,
    DerivedTypeStmt,
    TypeName,
    TypeAttrSpec,
    PrivateOrSequence,
    EndTypeStmt,
    SequenceStmt,
    TypeParamDefStmt,
    TypeParamDecl,
    TypeParamAttrSpec,
    ComponentPart,
    ComponentDefStmt,
    DataComponentDefStmt,
    DimensionComponentAttrSpec,
    ComponentAttrSpec,
    ComponentDecl,
    ComponentArraySpec,
    ComponentInitialization,
    ProcComponentDefStmt,
    ProcComponentPASSArgName,
    ProcComponentAttrSpec,
    PrivateComponentsStmt,
    TypeBoundProcedurePart,
    BindingPrivateStmt,
    ProcBindingStmt,
    SpecificBinding,
    BindingPASSArgName,
    GenericBinding,
    BindingAttr,
    FinalBinding,
    DerivedTypeSpec,
    TypeParamSpec,
    StructureConstructor2,
    StructureConstructor,
    ComponentSpec,
    ComponentDataSource,
    EnumDef,
    EnumDefStmt,
    EnumeratorDefStmt,
    Enumerator,
    EndEnumStmt,
    ArrayConstructor,
    AcSpec,
    AcValue,
    AcImpliedDo,
    AcImpliedDoControl,
    AcDoVariable,
    // section 5: declarations
    TypeDeclarationStmt,
    DeclarationTypeSpec,
    DimensionAttrSpec,
    IntentAttrSpec,
    AttrSpec,
    EntityDecl,
    ObjectName,
    Initialization,
    NullInit,
    AccessSpec,
    LanguageBindingSpec,
    ArraySpec,
    ExplicitShapeSpec,
    LowerBound,
    UpperBound,
    AssumedShapeSpec,
    DeferredShapeSpec,
    AssumedSizeSpec,
    IntentSpec,
    AccessStmt,
    AccessId,
    ObjectNameDeferredShapeSpecListItem,
    AllocatableStmt,
    AsynchronousStmt,
    BindStmt,
    BindEntity,
    DataStmt,
    DataStmtSet,
    DataStmtObject,
    DataImpliedDo,
    DataIDoObject,
    DataIDoVariable,
    DataStmtValue,
    DataStmtRepeat,
    DataStmtConstant,
    IntConstantSubobject,
    ConstantSubobject,
    DimensionStmt,
    IntentStmt,
    OptionalStmt,
    ParameterStmt,
    NamedConstantDef,
    PointerStmt,
    PointerDecl,
    ProtectedStmt,
    SaveStmt,
    SavedEntity,
    ProcPointerName,
    TargetEntityDecl,
    TargetStmt,
    ValueStmt,
    VolatileStmt,
    ImplicitStmt,
    ImplicitSpec,
    LetterSpec,
    NamelistStmt,
    NamelistGroupObject,
    EquivalenceStmt,
    EquivalenceSet,
    EquivalenceObject,
    CommonStmt,
    CommonBlockObject,
    // section 6: use of data objects
    Variable,
    VariableName,
    Designator,
    LogicalVariable,
    DefaultLogicalVariable,
    CharVariable,
    DefaultCharVariable,
    IntVariable,
    Substring,
    ParentString,
    SubstringRange,
    DataRef,
    PartRef,
    StructureComponent,
    TypeParamInquiry,
    ArrayElement,
    ArraySection,
    Subscript,
    SectionSubscript,
    SubscriptTriplet,
    Stride,
    VectorSubscript,
    AllocateStmt,
    AllocOpt,
    StatVariable,
    ErrmsgVariable,
    SourceExpr,
    Allocation,
    AllocateObject,
    AllocateShapeSpec,
    LowerBoundExpr,
    UpperBoundExpr,
    NullifyStmt,
    PointerObject,
    DeallocateStmt,
    DeallocOpt,
    // section 7: expressions and assignment
    Primary,
    Parenthesis,
    Level1Expr,
    DefinedUnaryOp,
    DefinedBinaryOp,
    DefinedOp,
    DefinedOperator,
    ExtendedIntrinsicOp,
    MultOperand,
    AddOperand,
    Level2Expr,
    Level2UnaryExpr,
    Level3Expr,
    Level4Expr,
    AndOperand,
    OrOperand,
    EquivOperand,
    Level5Expr,
    Expr,
    LogicalExpr,
    CharExpr,
    DefaultCharExpr,
    IntExpr,
    NumericExpr,
    SpecificationExpr,
    InitializationExpr,
    CharInitializationExpr,
    IntInitializationExpr,
    LogicalInitializationExpr,
    AssignmentStmt,
    PointerAssignmentStmt,
    DataPointerObject,
    BoundsSpec,
    BoundsRemapping,
    DataTarget,
    ProcPointerObject,
    ProcComponentRef,
    ProcTarget,
    WhereStmt,
    WhereConstruct,
    WhereConstructStmt,
    WhereBodyConstruct,
    WhereAssignmentStmt,
    MaskExpr,
    MaskedElsewhereStmt,
    ElsewhereStmt,
    EndWhereStmt,
    ForallConstruct,
    ForallConstructStmt,
    ForallHeader,
    ForallTripletSpec,
    ForallBodyConstruct,
    ForallAssignmentStmt,
    EndForallStmt,
    ForallStmt,
    // section 8: execution control
    Block,
    IfConstruct,
    IfThenStmt,
    ElseIfStmt,
    ElseStmt,
    EndIfStmt,
    IfStmt,
    CaseConstruct,
    SelectCaseStmt,
    CaseStmt,
    EndSelectStmt,
    CaseExpr,
    CaseSelector,
    CaseValueRange,
    CaseValue,
    AssociateConstruct,
    AssociateStmt,
    Association,
    Selector,
    EndAssociateStmt,
    SelectTypeConstruct,
    SelectTypeStmt,
    TypeGuardStmt,
    EndSelectTypeStmt,
    DoConstruct,
    BlockDoConstruct,
    BlockLabelDoConstruct,
    BlockNonlabelDoConstruct,
    DoStmt,
    LabelDoStmt,
    NonlabelDoStmt,
    LoopControl,
    DoVariable,
    DoBlock,
    EndDo,
    EndDoStmt,
    NonblockDoConstruct,
    ActionTermDoConstruct,
    DoBody,
    DoTermActionStmt,
    OuterSharedDoConstruct,
    SharedTermDoConstruct,
    InnerSharedDoConstruct,
    DoTermSharedStmt,
    CycleStmt,
    ExitStmt,
    GotoStmt,
    ComputedGotoStmt,
    ArithmeticIfStmt,
    ContinueStmt,
    StopStmt,
    StopCode,
    // section 9: input/output
    IoUnit,
    FileUnitNumber,
    InternalFileVariable,
    OpenStmt,
    ConnectSpec,
    FileNameExpr,
    IomsgVariable,
    CloseStmt,
    CloseSpec,
    ReadStmt,
    WriteStmt,
    PrintStmt,
    IoControlSpecList,
    IoControlSpec,
    Format,
    InputItem,
    OutputItem,
    IoImpliedDo,
    IoImpliedDoObject,
    IoImpliedDoControl,
    DtvTypeSpec,
    WaitStmt,
    WaitSpec,
    BackspaceStmt,
    EndfileStmt,
    RewindStmt,
    PositionSpec,
    FlushStmt,
    FlushSpec,
    InquireStmt,
    InquireSpec,
    // section 10: format
    FormatStmt,
    FormatSpecification,
    FormatItemC1002,
    FormatItem,
    R,
    DataEditDescC1002,
    DataEditDesc,
    W,
    M,
    D,
    E,
    V,
    ControlEditDesc,
    K,
    PositionEditDesc,
    N,
    SignEditDesc,
    BlankInterpEditDesc,
    RoundEditDesc,
    DecimalEditDesc,
    CharStringEditDesc,
    // section 11: program units
    MainProgram,
    MainProgram0,
    ProgramStmt,
    EndProgramStmt,
    Module,
    ModuleStmt,
    EndModuleStmt,
    ModuleSubprogramPart,
    ModuleSubprogram,
    UseStmt,
    ModuleNature,
    Rename,
    Only,
    OnlyUseName,
    LocalDefinedOperator,
    UseDefinedOperator,
    BlockData,
    BlockDataStmt,
    EndBlockDataStmt,
    // section 12: procedures
    InterfaceBlock,
    InterfaceSpecification,
    InterfaceStmt,
    EndInterfaceStmt,
    FunctionBody,
    SubroutineBody,
    InterfaceBody,
    ProcedureStmt,
    GenericSpec,
    DtioGenericSpec,
    ImportStmt,
    ExternalStmt,
    ProcedureDeclarationStmt,
    ProcInterface,
    ProcAttrSpec,
    ProcDecl,
    InterfaceName,
    IntrinsicStmt,
    FunctionReference,
    CallStmt,
    ProcedureDesignator,
    ActualArgSpec,
    ActualArg,
    AltReturnSpec,
    FunctionSubprogram,
    FunctionStmt,
    ProcLanguageBindingSpec,
    DummyArgName,
    Prefix,
    PrefixSpec,
    Suffix,
    EndFunctionStmt,
    SubroutineSubprogram,
    SubroutineStmt,
    DummyArg,
    EndSubroutineStmt,
    EntryStmt,
    ReturnStmt,
    ContainsStmt,
    StmtFunctionStmt,
    // F2008 delta
    Submodule,
    SubmoduleStmt,
    EndSubmoduleStmt,
    ParentIdentifier,
    ActionStmtC816,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// The entity an auto-generated `X_Name` wrapper names. Wrappers that the
/// standard writes out as real rules with extra constraints (`Object_Name`,
/// `Type_Name`, ...) are [BaseRule] variants instead.
pub enum NameKind {
    Arg,
    Array,
    Associate,
    AssociateConstruct,
    Binding,
    BlockData,
    CaseConstruct,
    CommonBlock,
    Component,
    DataPointerComponent,
    DoConstruct,
    Entity,
    Entry,
    External,
    FinalSubroutine,
    ForallConstruct,
    Function,
    Generic,
    IfConstruct,
    Import,
    Index,
    IntrinsicProcedure,
    Local,
    Module,
    NamelistGroup,
    ParentType,
    Part,
    ProcEntity,
    Procedure,
    ProcedureComponent,
    ProcedureEntity,
    Program,
    Result,
    SelectConstruct,
    Submodule,
    Subroutine,
    TypeParam,
    Use,
    WhereConstruct,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A reference into the closed rule universe. Wrapper variants synthesize
/// the `X_List`, `X_Name`, `X_Name_List` and `Scalar_X` companion rules the
/// grammar refers to, so the registry never has to write them out.
pub enum Rule {
    Base(BaseRule),
    List(BaseRule),
    NameOf(NameKind),
    NameListOf(NameKind),
    Scalar(BaseRule),
}

impl Rule {
    /// The spelling the Fortran standard uses for this production, e.g.
    /// `Level_2_Expr` or `Entity_Decl_List`.
    pub fn grammar_name(&self) -> String {
        match self {
            Rule::Base(BaseRule::MainProgram0) => "Main_Program0".to_string(),
            Rule::Base(base) => underscored(&format!("{:?}", base)),
            Rule::List(base) => format!("{}_List", Rule::Base(*base).grammar_name()),
            Rule::NameOf(kind) => format!("{}_Name", underscored(&format!("{:?}", kind))),
            Rule::NameListOf(kind) => {
                format!("{}_Name_List", underscored(&format!("{:?}", kind)))
            }
            Rule::Scalar(base) => format!("Scalar_{}", Rule::Base(*base).grammar_name()),
        }
    }
}

/// `LevelTwoExpr` style camel case to the `Level_Two_Expr` style spelling.
/// A digit run gets its own segment when it follows a lowercase letter
/// (`Level2Expr` -> `Level_2_Expr`) but stays attached to an uppercase
/// prefix (`ActionStmtC824` -> `Action_Stmt_C824`).
fn underscored(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 8);
    let chars: Vec<char> = camel.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
            let boundary = (c.is_ascii_uppercase() && prev != '_' && !prev.is_ascii_uppercase())
                || (c.is_ascii_uppercase() && prev.is_ascii_uppercase() && next_is_lower)
                || (c.is_ascii_digit() && prev.is_ascii_lowercase());
            if boundary {
                out.push('_');
            }
        }
        out.push(c);
    }
    out
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grammar_name())
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.grammar_name())
    }
}

#[derive(Clone, Copy)]
/// A keyword pattern: one spelling, a set of spellings, or a regex (used
/// for multi-word spellings like `DOUBLE PRECISION`).
pub(crate) enum KwPat {
    W(&'static str),
    Set(&'static [&'static str]),
    Re(&'static Lazy<Regex>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    None,
    If,
    Where,
    Case,
    SelectType,
    DoLabel,
}

#[derive(Clone, Copy)]
/// Description of a block construct: one start statement, middle rules that
/// repeat in declared order, one end statement. Construct names on the end
/// statement are always checked against the start statement and echoed when
/// the end statement leaves them out; `match_labels` additionally ties a
/// labeled DO statement to its terminating labeled statement.
pub(crate) struct BlockSpec {
    pub start: Option<Rule>,
    pub mids: &'static [Rule],
    pub end: Option<Rule>,
    pub match_labels: bool,
    pub hook: Hook,
}

#[derive(Clone, Copy)]
/// Structural shape of a rule, executed by the generic matcher. One kind
/// per matching strategy of the grammar engine.
pub(crate) enum Shape {
    /// Keyword set; the matched spelling is normalized to uppercase.
    Keyword(KwPat),
    /// Full regex match kept verbatim (identifiers keep their case).
    Text(&'static Lazy<Regex>),
    /// One of a set of exact strings, kept verbatim.
    Literal(&'static [&'static str]),
    /// Numeric literal with optional kind parameter: 2 items.
    Number(&'static Lazy<Regex>),
    /// `L payload R` with configurable delimiters: 3 items.
    Bracket {
        left: &'static str,
        right: &'static str,
        inner: Rule,
        require_inner: bool,
    },
    /// `KEYWORD [::] payload`: 2 items.
    WordCls {
        word: KwPat,
        cls: Option<Rule>,
        check_colons: bool,
        require_cls: bool,
        colons_in_render: bool,
    },
    /// `KEYWORD ( args )`: 2 items.
    Call {
        word: KwPat,
        args: Rule,
        require_args: bool,
    },
    /// `head ( args )`: 2 items.
    CallOf {
        head: Rule,
        args: Rule,
        require_args: bool,
    },
    /// `lhs op rhs` with an operator class: 3 items. Left-recursive rules
    /// split at the rightmost occurrence and recurse into `lhs`.
    Binary { lhs: Rule, op: OpClass, rhs: Rule },
    /// `lhs op rhs` with a fixed operator token (`=`, `=>`, `%`): 3 items.
    BinaryStr {
        lhs: Rule,
        op: &'static str,
        rhs: Rule,
        first: bool,
    },
    /// `op operand`: 2 items.
    Unary { op: OpClass, operand: Rule },
    /// `[lhs] : [rhs]`: 2 items.
    Separated {
        lhs: Option<Rule>,
        rhs: Option<Rule>,
        require_lhs: bool,
        require_rhs: bool,
    },
    /// `x sep x sep x ...`: one item per element.
    Sequence { item: Rule, sep: &'static str },
    /// `KEY = value` with an allow-list of keys: 2 items. `unit_fallback`
    /// accepts a bare positional value as the IO unit number.
    KeywordValue {
        pairs: &'static [(&'static [&'static str], Rule)],
        unit_fallback: Option<Rule>,
    },
    /// `key = value` where the key is itself a rule (a keyword or named
    /// constant rather than a fixed spelling): 2 items.
    KeyedValue { key: Rule, value: Rule },
    /// `END [KIND [name]]`: 2 items, the kind always materialized.
    EndStmt {
        kind: &'static str,
        name: Option<Rule>,
        require_kind: bool,
    },
    /// Multi-statement construct driven by the block matcher.
    Blocked(BlockSpec),
    /// Bespoke match against one statement's text.
    CustomStr(fn(&FortranParser, &str) -> MatchResult<Vec<Item>>),
    /// Bespoke match that pulls items from the reader itself.
    CustomReader(fn(&FortranParser, &mut FortranReader) -> MatchResult<Vec<Item>>),
}

#[derive(Clone, Copy)]
pub(crate) enum Alts {
    None,
    One(Rule),
    Many(&'static [Rule]),
}

impl Alts {
    pub(crate) fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        let slice: &[Rule] = match self {
            Alts::None => &[],
            Alts::One(rule) => std::slice::from_ref(rule),
            Alts::Many(rules) => rules,
        };
        slice.iter().copied()
    }
}

#[derive(Clone, Copy)]
/// Everything the matcher needs to know about one rule: the subclass
/// alternatives tried first (in declared order) and the rule's own shape
/// tried after them.
pub(crate) struct RuleSpec {
    pub alternatives: Alts,
    pub shape: Option<Shape>,
}

pub(crate) fn alts(list: &'static [Rule]) -> RuleSpec {
    RuleSpec {
        alternatives: Alts::Many(list),
        shape: None,
    }
}

pub(crate) fn shaped(shape: Shape) -> RuleSpec {
    RuleSpec {
        alternatives: Alts::None,
        shape: Some(shape),
    }
}

pub(crate) fn alts_shaped(list: &'static [Rule], shape: Shape) -> RuleSpec {
    RuleSpec {
        alternatives: Alts::Many(list),
        shape: Some(shape),
    }
}

/// A `'static` rule list for alternative lists and block middles. The
/// const item makes the list a compile-time table entry rather than a
/// borrowed temporary.
macro_rules! rlist {
    ($($rule:expr),* $(,)?) => {{
        const LIST: &[$crate::rules::Rule] = &[$($rule),*];
        LIST
    }};
}
pub(crate) use rlist;

/// A `'static` keyword table for keyword=value rules.
macro_rules! kvlist {
    ($($pair:expr),* $(,)?) => {{
        const PAIRS: &[(&'static [&'static str], $crate::rules::Rule)] = &[$($pair),*];
        PAIRS
    }};
}
pub(crate) use kvlist;

/// Shorthands used throughout the section tables.
pub(crate) const fn b(rule: BaseRule) -> Rule {
    Rule::Base(rule)
}

pub(crate) const fn l(rule: BaseRule) -> Rule {
    Rule::List(rule)
}

pub(crate) const fn n(kind: NameKind) -> Rule {
    Rule::NameOf(kind)
}

pub(crate) const fn nl(kind: NameKind) -> Rule {
    Rule::NameListOf(kind)
}

pub(crate) const fn sc(rule: BaseRule) -> Rule {
    Rule::Scalar(rule)
}

/// Resolve a rule reference to its spec. Wrapper rules are synthesized
/// here; hand-written rules are looked up in their section table.
pub(crate) fn spec(rule: Rule) -> RuleSpec {
    match rule {
        Rule::Base(base) => base_spec(base),
        Rule::List(base) => RuleSpec {
            alternatives: Alts::One(Rule::Base(base)),
            shape: Some(Shape::Sequence {
                item: Rule::Base(base),
                sep: ",",
            }),
        },
        Rule::NameOf(_) => RuleSpec {
            alternatives: Alts::One(Rule::Base(BaseRule::Name)),
            shape: None,
        },
        Rule::NameListOf(kind) => RuleSpec {
            alternatives: Alts::One(Rule::NameOf(kind)),
            shape: Some(Shape::Sequence {
                item: Rule::NameOf(kind),
                sep: ",",
            }),
        },
        Rule::Scalar(base) => RuleSpec {
            alternatives: Alts::One(Rule::Base(base)),
            shape: None,
        },
    }
}

fn base_spec(rule: BaseRule) -> RuleSpec {
    section_2::spec(rule)
        .or_else(|| section_3::spec(rule))
        .or_else(|| section_4::spec(rule))
        .or_else(|| section_5::spec(rule))
        .or_else(|| section_6::spec(rule))
        .or_else(|| section_7::spec(rule))
        .or_else(|| section_8::spec(rule))
        .or_else(|| section_9::spec(rule))
        .or_else(|| section_10::spec(rule))
        .or_else(|| section_11::spec(rule))
        .or_else(|| section_12::spec(rule))
        .or_else(|| f2008::spec(rule))
        .unwrap_or_else(|| {
            panic!("rule {:?} has no entry in the registry", rule);
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_names_match_the_standard_spelling() {
        assert_eq!(b(BaseRule::Level2Expr).grammar_name(), "Level_2_Expr");
        assert_eq!(
            b(BaseRule::ActionStmtC824).grammar_name(),
            "Action_Stmt_C824"
        );
        assert_eq!(b(BaseRule::MainProgram0).grammar_name(), "Main_Program0");
        assert_eq!(
            Rule::List(BaseRule::EntityDecl).grammar_name(),
            "Entity_Decl_List"
        );
        assert_eq!(
            Rule::NameOf(NameKind::Program).grammar_name(),
            "Program_Name"
        );
        assert_eq!(
            Rule::NameListOf(NameKind::TypeParam).grammar_name(),
            "Type_Param_Name_List"
        );
        assert_eq!(
            Rule::Scalar(BaseRule::IntExpr).grammar_name(),
            "Scalar_Int_Expr"
        );
    }

    #[test]
    fn every_base_rule_has_a_spec() {
        // the registry panics on a missing entry; touching a spread of
        // rules from every section keeps the tables honest
        for rule in [
            BaseRule::Program,
            BaseRule::Name,
            BaseRule::KindSelector,
            BaseRule::EntityDecl,
            BaseRule::DataRef,
            BaseRule::Expr,
            BaseRule::IfConstruct,
            BaseRule::ReadStmt,
            BaseRule::FormatItem,
            BaseRule::UseStmt,
            BaseRule::SubroutineStmt,
            BaseRule::Submodule,
        ] {
            let _ = spec(b(rule));
        }
    }
}
