use usagescope_api::{
    CompletionExpression, Context, Expression, Invocation, MethodDeclaration, MethodHierarchy,
    MethodName, ParameterDeclaration, Sst, Statement, TypeHierarchy, TypeName, TypeShape,
    VariableDeclaration,
};

#[allow(dead_code)]
pub fn ty(name: &str) -> TypeName {
    TypeName::new(name)
}

#[allow(dead_code)]
pub fn void_method(declaring: &str, name: &str) -> MethodName {
    MethodName::new(ty(declaring), ty("void"), name, vec![])
}

#[allow(dead_code)]
pub fn declare(name: &str, declared_type: &str) -> Statement {
    Statement::VariableDeclaration(VariableDeclaration {
        name: name.to_string(),
        declared_type: ty(declared_type),
    })
}

#[allow(dead_code)]
pub fn call(receiver: &str, on_type: &str, name: &str) -> Statement {
    Statement::ExpressionStatement(Expression::Invocation(Invocation {
        receiver: Some(receiver.to_string()),
        method: void_method(on_type, name),
        arguments: vec![],
    }))
}

#[allow(dead_code)]
pub fn completion_on(reference: &str) -> Statement {
    Statement::ExpressionStatement(Expression::Completion(CompletionExpression {
        reference: Some(reference.to_string()),
        type_hint: None,
    }))
}

#[allow(dead_code)]
pub fn self_completion() -> Statement {
    Statement::ExpressionStatement(Expression::Completion(CompletionExpression {
        reference: None,
        type_hint: None,
    }))
}

/// Fluent builder for one method of a fixture tree.
pub struct MethodBuilder {
    name: MethodName,
    parameters: Vec<ParameterDeclaration>,
    body: Vec<Statement>,
}

#[allow(dead_code)]
impl MethodBuilder {
    pub fn new(declaring: &str, name: &str) -> Self {
        Self {
            name: void_method(declaring, name),
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn parameter(mut self, name: &str, param_type: &str) -> Self {
        self.parameters.push(ParameterDeclaration {
            name: name.to_string(),
            param_type: ty(param_type),
        });
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    pub fn statements(mut self, statements: Vec<Statement>) -> Self {
        self.body.extend(statements);
        self
    }

    pub fn build(self) -> MethodDeclaration {
        MethodDeclaration {
            name: self.name,
            parameters: self.parameters,
            body: self.body,
        }
    }
}

/// Fluent builder for one extraction unit.
pub struct ContextBuilder {
    class: String,
    extends: Option<String>,
    method_hierarchies: Vec<MethodHierarchy>,
    methods: Vec<MethodDeclaration>,
}

#[allow(dead_code)]
impl ContextBuilder {
    pub fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            extends: None,
            method_hierarchies: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        self.extends = Some(superclass.to_string());
        self
    }

    pub fn method_hierarchy(mut self, entry: MethodHierarchy) -> Self {
        self.method_hierarchies.push(entry);
        self
    }

    pub fn method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }

    pub fn build(self) -> Context {
        let mut hierarchy = TypeHierarchy::new(self.class.as_str());
        if let Some(superclass) = &self.extends {
            hierarchy = hierarchy.with_extends(TypeHierarchy::new(superclass.as_str()));
        }
        let mut type_shape = TypeShape::new(hierarchy);
        for entry in self.method_hierarchies {
            type_shape = type_shape.with_method_hierarchy(entry);
        }
        Context::new(
            type_shape,
            Sst {
                enclosing_type: ty(&self.class),
                methods: self.methods,
            },
        )
    }
}
