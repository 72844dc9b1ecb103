//! Simplified statement trees.
//!
//! The front end lowers real syntax into this reduced shape before usage
//! extraction: expressions that cannot contain tracked values are already
//! folded away, so every remaining node is either scope structure or one of
//! the few expression kinds the extractor reacts to.

use serde::{Deserialize, Serialize};

use super::naming::{FieldName, MethodName, PropertyName, TypeName};

/// A local variable declaration, `T id;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub name: String,
    pub declared_type: TypeName,
}

/// A declared parameter of a method or lambda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    pub name: String,
    pub param_type: TypeName,
}

/// A literal. The textual value is kept only for diagnostics; extraction
/// cares about the fact of the constant, not its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// A readable location: a plain variable, or a member access.
///
/// A member access without a receiver reads the enclosing instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ref", rename_all = "snake_case")]
pub enum Reference {
    Variable {
        name: String,
    },
    Field {
        #[serde(default)]
        receiver: Option<String>,
        field: FieldName,
    },
    Property {
        #[serde(default)]
        receiver: Option<String>,
        property: PropertyName,
    },
}

/// A method or constructor call. `receiver` is the identifier the call is
/// made on; constructor calls and static calls have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub receiver: Option<String>,
    pub method: MethodName,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// An anonymous function with its own parameters and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// The completion marker: the cursor position the tree was captured at.
///
/// `reference` is the identifier left of the cursor; `None` means the
/// completion is on the enclosing instance. `type_hint` is the static type
/// the front end attributed to that position, when it could.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionExpression {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub type_hint: Option<TypeName>,
}

/// The expression kinds that survive simplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expression {
    Constant(ConstantValue),
    Reference(Reference),
    Invocation(Invocation),
    Lambda(Lambda),
    Completion(CompletionExpression),
}

/// `target = value;` where the target is always a plain identifier after
/// simplification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: String,
    pub value: Expression,
}

/// A statement labelled for `goto`-style jumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledStatement {
    pub label: String,
    pub statement: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GotoStatement {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    #[serde(default)]
    pub exception: Option<String>,
}

/// A loop condition: either a simple expression or a lowered block of
/// statements computing the condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "header", rename_all = "snake_case")]
pub enum LoopHeader {
    Simple(Expression),
    Block {
        #[serde(default)]
        body: Vec<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoLoop {
    pub condition: LoopHeader,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileLoop {
    pub condition: LoopHeader,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForLoop {
    #[serde(default)]
    pub init: Vec<Statement>,
    #[serde(default)]
    pub condition: Option<LoopHeader>,
    #[serde(default)]
    pub step: Vec<Statement>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachLoop {
    pub declaration: VariableDeclaration,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// Conditional. The condition is a simple expression after lowering and is
/// not traversed by extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfElseBlock {
    #[serde(default)]
    pub condition: Option<Expression>,
    #[serde(default)]
    pub then_branch: Vec<Statement>,
    #[serde(default)]
    pub else_branch: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockBlock {
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBlock {
    #[serde(default)]
    pub label: Option<ConstantValue>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchBlock {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub sections: Vec<CaseBlock>,
    #[serde(default)]
    pub default_section: Vec<Statement>,
}

/// A catch arm. An unnamed catch-all has no parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchBlock {
    #[serde(default)]
    pub parameter: Option<ParameterDeclaration>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryBlock {
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub catch_blocks: Vec<CatchBlock>,
    #[serde(default)]
    pub finally_block: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncheckedBlock {
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingBlock {
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// Every statement kind the simplified tree can contain. The set is closed:
/// extraction matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    Assignment(Assignment),
    ExpressionStatement(Expression),
    Labelled(LabelledStatement),
    Return(ReturnStatement),
    Goto(GotoStatement),
    Throw(ThrowStatement),
    Do(DoLoop),
    While(WhileLoop),
    For(ForLoop),
    ForEach(ForEachLoop),
    IfElse(IfElseBlock),
    Lock(LockBlock),
    Switch(SwitchBlock),
    Try(TryBlock),
    Unchecked(UncheckedBlock),
    Using(UsingBlock),
    /// Opaque low-level region; nothing inside is visible to extraction.
    Unsafe,
}

/// One method of the tree: its identifier, declared parameters and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: MethodName,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// The simplified tree of one type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sst {
    pub enclosing_type: TypeName,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}
