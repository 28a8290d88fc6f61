//! Method and constructor bodies, reduced to the facts pattern checks ask about:
//! local declarations, conditionals, object creations, and invocations.
//! Everything else is kept as an opaque compound so nested facts stay reachable.

use serde::{Deserialize, Serialize};

use super::types::TypeRef;
use crate::parsers::types::Location;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    LocalDeclaration(LocalDeclaration),
    Conditional(Conditional),
    Compound(CompoundStatement),
}

/// `Product product = creator.FactoryMethod();`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalDeclaration {
    /// `None` when written with `var`.
    pub declared_type: Option<TypeRef>,
    pub variables: Vec<VariableDeclarator>,
    pub location: Location,
}

impl LocalDeclaration {
    pub fn initializers(&self) -> impl Iterator<Item = &Expression> {
        self.variables
            .iter()
            .filter_map(|variable| variable.initializer.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub identifier: String,
    pub initializer: Option<Expression>,
}

/// An `if` statement with both branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: Option<Expression>,
    pub consequence: Vec<Statement>,
    pub alternative: Vec<Statement>,
    pub location: Location,
}

impl Conditional {
    /// Object creations anywhere in the condition or either branch.
    pub fn object_creations(&self) -> Vec<&ObjectCreation> {
        let mut found = Vec::new();
        if let Some(condition) = &self.condition {
            walk_expression(condition, &mut |node| push_creation(node, &mut found));
        }
        walk_statements(&self.consequence, &mut |node| push_creation(node, &mut found));
        walk_statements(&self.alternative, &mut |node| push_creation(node, &mut found));
        found
    }
}

/// Any other statement: loops, `return`, `try`, expression statements, blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundStatement {
    pub kind: String,
    pub expressions: Vec<Expression>,
    pub statements: Vec<Statement>,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expression {
    ObjectCreation(ObjectCreation),
    Invocation(Invocation),
    Literal(String),
    Identifier(String),
    /// Lambda or anonymous method body.
    Lambda(Vec<Statement>),
    Other(Vec<Expression>),
}

impl Expression {
    pub fn as_object_creation(&self) -> Option<&ObjectCreation> {
        match self {
            Expression::ObjectCreation(creation) => Some(creation),
            _ => None,
        }
    }

    pub fn as_invocation(&self) -> Option<&Invocation> {
        match self {
            Expression::Invocation(invocation) => Some(invocation),
            _ => None,
        }
    }
}

/// `new Milk(new Espresso())`. `created_type` is `None` for target-typed `new()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectCreation {
    pub created_type: Option<TypeRef>,
    pub arguments: Vec<Expression>,
    pub initializer: Vec<Expression>,
    pub location: Location,
}

/// `creator.FactoryMethod(args)`. `target` is the invoked simple name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invocation {
    pub target: Option<String>,
    pub receiver: Option<Box<Expression>>,
    pub arguments: Vec<Expression>,
    pub location: Location,
}

/// A node visited by the body walkers.
#[derive(Debug, Clone, Copy)]
pub enum BodyNode<'a> {
    Statement(&'a Statement),
    Expression(&'a Expression),
}

/// Pre-order walk over statements and every expression nested in them.
/// Recursion depth is bounded by `MAX_LOWERING_DEPTH`, since lowering
/// truncates anything nested deeper.
pub fn walk_statements<'a>(statements: &'a [Statement], visit: &mut dyn FnMut(BodyNode<'a>)) {
    for statement in statements {
        walk_statement(statement, visit);
    }
}

pub fn walk_statement<'a>(statement: &'a Statement, visit: &mut dyn FnMut(BodyNode<'a>)) {
    visit(BodyNode::Statement(statement));
    match statement {
        Statement::LocalDeclaration(local) => {
            for initializer in local.initializers() {
                walk_expression(initializer, visit);
            }
        }
        Statement::Conditional(conditional) => {
            if let Some(condition) = &conditional.condition {
                walk_expression(condition, visit);
            }
            walk_statements(&conditional.consequence, visit);
            walk_statements(&conditional.alternative, visit);
        }
        Statement::Compound(compound) => {
            for expression in &compound.expressions {
                walk_expression(expression, visit);
            }
            walk_statements(&compound.statements, visit);
        }
    }
}

pub fn walk_expression<'a>(expression: &'a Expression, visit: &mut dyn FnMut(BodyNode<'a>)) {
    visit(BodyNode::Expression(expression));
    match expression {
        Expression::ObjectCreation(creation) => {
            for argument in creation.arguments.iter().chain(&creation.initializer) {
                walk_expression(argument, visit);
            }
        }
        Expression::Invocation(invocation) => {
            if let Some(receiver) = &invocation.receiver {
                walk_expression(receiver, visit);
            }
            for argument in &invocation.arguments {
                walk_expression(argument, visit);
            }
        }
        Expression::Lambda(statements) => walk_statements(statements, visit),
        Expression::Other(children) => {
            for child in children {
                walk_expression(child, visit);
            }
        }
        Expression::Literal(_) | Expression::Identifier(_) => {}
    }
}

impl Block {
    pub fn object_creations(&self) -> Vec<&ObjectCreation> {
        let mut found = Vec::new();
        walk_statements(&self.statements, &mut |node| push_creation(node, &mut found));
        found
    }

    pub fn conditionals(&self) -> Vec<&Conditional> {
        let mut found = Vec::new();
        walk_statements(&self.statements, &mut |node| {
            if let BodyNode::Statement(Statement::Conditional(conditional)) = node {
                found.push(conditional);
            }
        });
        found
    }

    pub fn local_declarations(&self) -> Vec<&LocalDeclaration> {
        let mut found = Vec::new();
        walk_statements(&self.statements, &mut |node| {
            if let BodyNode::Statement(Statement::LocalDeclaration(local)) = node {
                found.push(local);
            }
        });
        found
    }

    pub fn invocations(&self) -> Vec<&Invocation> {
        let mut found = Vec::new();
        walk_statements(&self.statements, &mut |node| {
            if let BodyNode::Expression(Expression::Invocation(invocation)) = node {
                found.push(invocation);
            }
        });
        found
    }
}

fn push_creation<'a>(node: BodyNode<'a>, found: &mut Vec<&'a ObjectCreation>) {
    if let BodyNode::Expression(Expression::ObjectCreation(creation)) = node {
        found.push(creation);
    }
}
