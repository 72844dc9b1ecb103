//! Recursive traversal of simplified method bodies.
//!
//! The walker drives a [`UsageAccumulator`] over every statement kind and
//! captures the completion marker. Nested blocks do not open scopes of
//! their own; only lambda bodies do.

use usagescope_api::{
    Assignment, CompletionExpression, DefinitionSite, Expression, Invocation, Lambda, LoopHeader,
    Reference, SELF_REFERENCE, Statement,
};

use crate::accumulator::{QueryId, UsageAccumulator};
use crate::error::Result;

/// The completion marker found during a walk, together with the record its
/// reference resolved to at the point of visit, when it was bound there.
#[derive(Debug, Clone)]
pub struct CompletionCapture {
    pub expression: CompletionExpression,
    pub resolved: Option<QueryId>,
}

impl CompletionCapture {
    /// Whether the marker designates the enclosing instance: an explicit
    /// `this`, or no reference at all.
    pub fn is_self_reference(&self) -> bool {
        match self.expression.reference.as_deref() {
            None => true,
            Some(id) => id == SELF_REFERENCE,
        }
    }

    /// The identifier the marker asks about.
    pub fn reference(&self) -> &str {
        self.expression.reference.as_deref().unwrap_or(SELF_REFERENCE)
    }
}

/// Walks one method body.
pub struct StatementWalker<'a> {
    accumulator: &'a mut UsageAccumulator,
    completion: Option<CompletionCapture>,
}

impl<'a> StatementWalker<'a> {
    pub fn new(accumulator: &'a mut UsageAccumulator) -> Self {
        Self {
            accumulator,
            completion: None,
        }
    }

    /// The captured completion marker, if any was encountered.
    pub fn into_completion(self) -> Option<CompletionCapture> {
        self.completion
    }

    pub fn walk_body(&mut self, body: &[Statement]) -> Result<()> {
        for statement in body {
            self.walk_statement(statement)?;
        }
        Ok(())
    }

    fn walk_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::VariableDeclaration(declaration) => {
                self.accumulator.define_variable(
                    &declaration.name,
                    &declaration.declared_type,
                    DefinitionSite::Unknown,
                )?;
            }
            Statement::Assignment(assignment) => self.walk_assignment(assignment)?,
            Statement::ExpressionStatement(expression) => self.walk_expression(expression)?,
            Statement::Labelled(labelled) => self.walk_statement(&labelled.statement)?,
            Statement::Do(do_loop) => {
                self.walk_header(&do_loop.condition)?;
                self.walk_body(&do_loop.body)?;
            }
            Statement::While(while_loop) => {
                self.walk_header(&while_loop.condition)?;
                self.walk_body(&while_loop.body)?;
            }
            Statement::For(for_loop) => {
                self.walk_body(&for_loop.init)?;
                if let Some(condition) = &for_loop.condition {
                    self.walk_header(condition)?;
                }
                self.walk_body(&for_loop.step)?;
                self.walk_body(&for_loop.body)?;
            }
            Statement::ForEach(for_each) => {
                self.accumulator.define_variable(
                    &for_each.declaration.name,
                    &for_each.declaration.declared_type,
                    DefinitionSite::Unknown,
                )?;
                self.walk_body(&for_each.body)?;
            }
            Statement::IfElse(if_else) => {
                self.walk_body(&if_else.then_branch)?;
                self.walk_body(&if_else.else_branch)?;
            }
            Statement::Lock(lock) => self.walk_body(&lock.body)?,
            Statement::Switch(switch) => {
                for section in &switch.sections {
                    self.walk_body(&section.body)?;
                }
                self.walk_body(&switch.default_section)?;
            }
            Statement::Try(try_block) => {
                self.walk_body(&try_block.body)?;
                self.walk_body(&try_block.finally_block)?;
                for catch in &try_block.catch_blocks {
                    if let Some(parameter) = &catch.parameter {
                        self.accumulator.define_variable(
                            &parameter.name,
                            &parameter.param_type,
                            DefinitionSite::Unknown,
                        )?;
                    }
                    self.walk_body(&catch.body)?;
                }
            }
            Statement::Unchecked(unchecked) => self.walk_body(&unchecked.body)?,
            Statement::Using(using) => self.walk_body(&using.body)?,
            // Jumps, returns, throws and opaque unsafe regions carry no
            // tracked values.
            Statement::Goto(_) | Statement::Return(_) | Statement::Throw(_) | Statement::Unsafe => {
            }
        }
        Ok(())
    }

    /// Assignment sources decide the target's definition site.
    fn walk_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        match &assignment.value {
            Expression::Constant(_) => {
                self.accumulator
                    .register_definition(&assignment.target, DefinitionSite::Constant)?;
            }
            Expression::Invocation(invocation) => {
                self.walk_lambda_arguments(invocation)?;
                match (&invocation.receiver, invocation.method.is_constructor()) {
                    (None, true) => {
                        let definition = DefinitionSite::Constructor {
                            method: invocation.method.clone(),
                        };
                        self.accumulator
                            .register_definition(&assignment.target, definition.clone())?;
                        // The constructed type's own record carries the same
                        // definition, whichever id it ends up bound to.
                        self.accumulator.register_type_definition(
                            &invocation.method.declaring_type,
                            definition,
                        )?;
                    }
                    (Some(receiver), _) => {
                        self.accumulator.register_definition(
                            &assignment.target,
                            DefinitionSite::Return {
                                method: invocation.method.clone(),
                            },
                        )?;
                        self.accumulator.register_callsite(receiver, &invocation.method)?;
                    }
                    (None, false) => {
                        // Static call: a result but no receiver to track.
                        self.accumulator.register_definition(
                            &assignment.target,
                            DefinitionSite::Return {
                                method: invocation.method.clone(),
                            },
                        )?;
                    }
                }
            }
            Expression::Reference(reference) => {
                self.accumulator
                    .register_definition(&assignment.target, DefinitionSite::Unknown)?;
                self.register_member_source(reference)?;
            }
            Expression::Lambda(lambda) => {
                self.walk_lambda(lambda)?;
                self.accumulator
                    .register_definition(&assignment.target, DefinitionSite::Unknown)?;
            }
            Expression::Completion(completion) => self.record_completion(completion),
        }
        Ok(())
    }

    /// Reading a member of the enclosing instance marks the member's value
    /// type as field-defined. Reads through any other receiver carry no
    /// definition information.
    fn register_member_source(&mut self, reference: &Reference) -> Result<()> {
        match reference {
            Reference::Variable { .. } => Ok(()),
            Reference::Field { receiver, field } => {
                if is_self_receiver(receiver) {
                    self.accumulator.register_type_definition(
                        &field.value_type,
                        DefinitionSite::Field {
                            field: field.clone(),
                        },
                    )?;
                }
                Ok(())
            }
            Reference::Property { receiver, property } => {
                if is_self_receiver(receiver) {
                    let field = property.backing_field();
                    let value_type = field.value_type.clone();
                    self.accumulator
                        .register_type_definition(&value_type, DefinitionSite::Field { field })?;
                }
                Ok(())
            }
        }
    }

    fn walk_expression(&mut self, expression: &Expression) -> Result<()> {
        match expression {
            Expression::Invocation(invocation) => {
                self.walk_lambda_arguments(invocation)?;
                if let Some(receiver) = &invocation.receiver {
                    self.accumulator.register_callsite(receiver, &invocation.method)?;
                }
            }
            Expression::Lambda(lambda) => self.walk_lambda(lambda)?,
            Expression::Completion(completion) => self.record_completion(completion),
            Expression::Constant(_) | Expression::Reference(_) => {}
        }
        Ok(())
    }

    fn walk_header(&mut self, header: &LoopHeader) -> Result<()> {
        match header {
            LoopHeader::Simple(expression) => self.walk_expression(expression),
            LoopHeader::Block { body } => self.walk_body(body),
        }
    }

    /// Closure bodies run in a cloned scope under the renamed context; the
    /// lambda's parameters are defined against the renamed method.
    fn walk_lambda(&mut self, lambda: &Lambda) -> Result<()> {
        self.accumulator.enter_lambda_scope()?;
        let lambda_method = self.accumulator.method_context().clone();
        for (index, parameter) in lambda.parameters.iter().enumerate() {
            self.accumulator.define_variable(
                &parameter.name,
                &parameter.param_type,
                DefinitionSite::Param {
                    method: lambda_method.clone(),
                    index,
                },
            )?;
        }
        self.walk_body(&lambda.body)?;
        self.accumulator.leave_scope()
    }

    fn walk_lambda_arguments(&mut self, invocation: &Invocation) -> Result<()> {
        for argument in &invocation.arguments {
            if let Expression::Lambda(lambda) = argument {
                self.walk_lambda(lambda)?;
            }
        }
        Ok(())
    }

    /// First marker wins. The reference is resolved here, by pure lookup, so
    /// the capture reflects the scope at the marker rather than the scope
    /// left standing after the walk.
    fn record_completion(&mut self, completion: &CompletionExpression) {
        if self.completion.is_some() {
            return;
        }
        let reference = completion.reference.as_deref().unwrap_or(SELF_REFERENCE);
        let resolved = self.accumulator.resolve_id(reference);
        self.completion = Some(CompletionCapture {
            expression: completion.clone(),
            resolved,
        });
    }
}

/// An absent receiver is an implicit read off the enclosing instance.
fn is_self_receiver(receiver: &Option<String>) -> bool {
    match receiver.as_deref() {
        None => true,
        Some(id) => id == SELF_REFERENCE,
    }
}
