//! Lowers a tree-sitter-c-sharp concrete tree into the declaration model.
//!
//! Field names are tried first and positional children second, so minor
//! grammar revisions still lower to the same shapes.

use tree_sitter::Node;

use super::declarations::{
    ConstructorDeclaration, FieldDeclaration, MemberDeclaration, MethodDeclaration, Parameter,
    PropertyDeclaration, TypeDeclaration, TypeKind,
};
use super::statements::{
    Block, CompoundStatement, Conditional, Expression, Invocation, LocalDeclaration,
    ObjectCreation, Statement, VariableDeclarator,
};
use super::types::{Modifier, Modifiers, TypeRef};
use crate::parsers::types::{Location, Range};

const TYPE_DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "struct_declaration",
    "record_declaration",
    "record_struct_declaration",
];

const MODIFIER_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "abstract", "sealed", "override",
    "virtual", "readonly", "const", "partial", "async", "extern",
];

/// Deepest statement/expression nesting lowered into the model. Bodies are
/// walked recursively, so the cap bounds stack use for every later pass.
pub const MAX_LOWERING_DEPTH: usize = 128;

const LITERAL_KINDS: &[&str] = &[
    "string_literal",
    "verbatim_string_literal",
    "raw_string_literal",
    "interpolated_string_expression",
    "character_literal",
    "integer_literal",
    "real_literal",
    "boolean_literal",
    "null_literal",
];

pub struct CSharpLowering<'s> {
    source: &'s [u8],
    file: &'s str,
}

impl<'s> CSharpLowering<'s> {
    pub fn new(source: &'s [u8], file: &'s str) -> Self {
        Self { source, file }
    }

    /// Lowers every type declaration under `root`, nested ones included.
    pub fn lower_compilation_unit(&self, root: Node) -> Vec<TypeDeclaration> {
        let mut types = Vec::new();
        self.collect_types(root, None, None, &mut types);
        types
    }

    fn collect_types(
        &self,
        container: Node,
        namespace: Option<&str>,
        containing_type: Option<&str>,
        out: &mut Vec<TypeDeclaration>,
    ) {
        // A file-scoped namespace applies to the declarations that follow it.
        let mut current_namespace = namespace.map(str::to_string);
        for child in named_children(container) {
            match child.kind() {
                "namespace_declaration" => {
                    let name = self.field_text(child, "name");
                    let nested = join_namespace(current_namespace.as_deref(), name);
                    let body = child.child_by_field_name("body").unwrap_or(child);
                    self.collect_types(body, Some(&nested), containing_type, out);
                }
                "file_scoped_namespace_declaration" => {
                    let name = self.field_text(child, "name");
                    let nested = join_namespace(namespace, name);
                    self.collect_types(child, Some(&nested), containing_type, out);
                    current_namespace = Some(nested);
                }
                "declaration_list" | "ERROR" => {
                    self.collect_types(child, current_namespace.as_deref(), containing_type, out)
                }
                kind if TYPE_DECLARATION_KINDS.contains(&kind) => {
                    self.lower_type(child, current_namespace.as_deref(), containing_type, out)
                }
                _ => {}
            }
        }
    }

    fn lower_type(
        &self,
        node: Node,
        namespace: Option<&str>,
        containing_type: Option<&str>,
        out: &mut Vec<TypeDeclaration>,
    ) {
        let kind = match node.kind() {
            "interface_declaration" => TypeKind::Interface,
            "struct_declaration" | "record_struct_declaration" => TypeKind::Struct,
            "record_declaration" => TypeKind::Record,
            _ => TypeKind::Class,
        };
        let name_node = node.child_by_field_name("name");
        let identifier = name_node.map(|n| self.text(n)).unwrap_or("").to_string();

        let base_types = find_child(node, "base_list")
            .map(|list| self.lower_base_list(list))
            .unwrap_or_default();

        let mut members = Vec::new();
        let mut nested = Vec::new();
        let body = node
            .child_by_field_name("body")
            .or_else(|| find_child(node, "declaration_list"));
        if let Some(body) = body {
            for member in named_children(body) {
                match member.kind() {
                    "field_declaration" => {
                        members.push(MemberDeclaration::Field(self.lower_field(member)))
                    }
                    "constructor_declaration" => {
                        members.push(MemberDeclaration::Constructor(self.lower_constructor(member)))
                    }
                    "method_declaration" => {
                        members.push(MemberDeclaration::Method(self.lower_method(member)))
                    }
                    "property_declaration" => {
                        members.push(MemberDeclaration::Property(self.lower_property(member)))
                    }
                    kind if TYPE_DECLARATION_KINDS.contains(&kind) => nested.push(member),
                    _ => {}
                }
            }
        }

        out.push(TypeDeclaration {
            kind,
            modifiers: self.lower_modifiers(node),
            identifier: identifier.clone(),
            identifier_location: self.location(name_node.unwrap_or(node)),
            location: self.location(node),
            namespace: namespace.map(str::to_string),
            containing_type: containing_type.map(str::to_string),
            base_types,
            members,
        });

        for child in nested {
            self.lower_type(child, namespace, Some(&identifier), out);
        }
    }

    fn lower_modifiers(&self, node: Node) -> Modifiers {
        let mut modifiers = Modifiers::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifier" {
                modifiers.push(Modifier::from_keyword(self.text(child)));
            } else if !child.is_named() && MODIFIER_KEYWORDS.contains(&child.kind()) {
                modifiers.push(Modifier::from_keyword(child.kind()));
            }
        }
        modifiers
    }

    fn lower_base_list(&self, node: Node) -> Vec<TypeRef> {
        named_children(node)
            .into_iter()
            .filter_map(|child| match child.kind() {
                "argument_list" | "comment" => None,
                "primary_constructor_base_type" => {
                    let inner = child
                        .child_by_field_name("type")
                        .or_else(|| named_children(child).into_iter().next())?;
                    Some(self.lower_type_ref(inner))
                }
                _ => Some(self.lower_type_ref(child)),
            })
            .collect()
    }

    pub(crate) fn lower_type_ref(&self, node: Node) -> TypeRef {
        match node.kind() {
            "predefined_type" | "void_keyword" => TypeRef::Predefined(self.text(node).to_string()),
            "identifier" => TypeRef::from_simple_name(self.text(node)),
            "implicit_type" => TypeRef::Other("var".to_string()),
            "generic_name" => {
                let name = node
                    .child_by_field_name("name")
                    .or_else(|| find_child(node, "identifier"))
                    .map(|n| self.text(n))
                    .unwrap_or("");
                let arguments = find_child(node, "type_argument_list")
                    .map(|list| {
                        named_children(list)
                            .into_iter()
                            .map(|argument| self.lower_type_ref(argument))
                            .collect()
                    })
                    .unwrap_or_default();
                TypeRef::Named {
                    name: name.to_string(),
                    qualifier: None,
                    arguments,
                }
            }
            "qualified_name" | "alias_qualified_name" => {
                let name_node = node
                    .child_by_field_name("name")
                    .or_else(|| named_children(node).into_iter().last());
                let qualifier = node
                    .child_by_field_name("qualifier")
                    .or_else(|| node.child_by_field_name("alias"))
                    .map(|q| self.text(q).to_string());
                match name_node.map(|n| self.lower_type_ref(n)) {
                    Some(TypeRef::Named {
                        name, arguments, ..
                    }) => TypeRef::Named {
                        name,
                        qualifier,
                        arguments,
                    },
                    Some(other) => other,
                    None => TypeRef::Other(self.text(node).to_string()),
                }
            }
            "array_type" => TypeRef::Array(Box::new(self.lower_inner_type(node))),
            "nullable_type" => TypeRef::Nullable(Box::new(self.lower_inner_type(node))),
            "ref_type" | "scoped_type" => self.lower_inner_type(node),
            _ => TypeRef::Other(self.text(node).to_string()),
        }
    }

    fn lower_inner_type(&self, node: Node) -> TypeRef {
        node.child_by_field_name("type")
            .or_else(|| named_children(node).into_iter().next())
            .map(|inner| self.lower_type_ref(inner))
            .unwrap_or_else(|| TypeRef::Other(self.text(node).to_string()))
    }

    fn lower_field(&self, node: Node) -> FieldDeclaration {
        let (declared_type, variables) = find_child(node, "variable_declaration")
            .map(|declaration| self.lower_variable_declaration(declaration, 0))
            .unwrap_or_else(|| (TypeRef::Other(String::new()), Vec::new()));
        FieldDeclaration {
            modifiers: self.lower_modifiers(node),
            declared_type,
            variables,
            location: self.location(node),
        }
    }

    fn lower_variable_declaration(&self, node: Node, depth: usize) -> (TypeRef, Vec<VariableDeclarator>) {
        let declared_type = node
            .child_by_field_name("type")
            .or_else(|| {
                named_children(node)
                    .into_iter()
                    .find(|child| child.kind() != "variable_declarator")
            })
            .map(|ty| self.lower_type_ref(ty))
            .unwrap_or_else(|| TypeRef::Other(String::new()));
        let variables = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator")
            .map(|declarator| self.lower_declarator(declarator, depth))
            .collect();
        (declared_type, variables)
    }

    fn lower_declarator(&self, node: Node, depth: usize) -> VariableDeclarator {
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| find_child(node, "identifier"));
        let mut initializer = None;
        for child in named_children(node) {
            if name_node.map(|n| n.id()) == Some(child.id()) {
                continue;
            }
            match child.kind() {
                "equals_value_clause" => {
                    initializer = named_children(child)
                        .into_iter()
                        .next()
                        .map(|value| self.lower_expression(value, depth + 1));
                }
                "bracketed_argument_list" | "tuple_pattern" | "comment" => {}
                _ => initializer = Some(self.lower_expression(child, depth + 1)),
            }
        }
        VariableDeclarator {
            identifier: name_node.map(|n| self.text(n)).unwrap_or("").to_string(),
            initializer,
        }
    }

    fn lower_parameters(&self, node: Node) -> Vec<Parameter> {
        let Some(list) = node
            .child_by_field_name("parameters")
            .or_else(|| find_child(node, "parameter_list"))
        else {
            return Vec::new();
        };
        named_children(list)
            .into_iter()
            .filter(|child| child.kind() == "parameter")
            .map(|parameter| {
                let name = parameter
                    .child_by_field_name("name")
                    .or_else(|| {
                        named_children(parameter)
                            .into_iter()
                            .filter(|c| c.kind() == "identifier")
                            .last()
                    })
                    .map(|n| self.text(n))
                    .unwrap_or("");
                Parameter {
                    identifier: name.to_string(),
                    declared_type: parameter
                        .child_by_field_name("type")
                        .map(|ty| self.lower_type_ref(ty)),
                }
            })
            .collect()
    }

    fn lower_constructor(&self, node: Node) -> ConstructorDeclaration {
        ConstructorDeclaration {
            modifiers: self.lower_modifiers(node),
            identifier: self.field_text(node, "name").to_string(),
            parameters: self.lower_parameters(node),
            body: self.lower_body(node),
            location: self.location(node),
        }
    }

    fn lower_method(&self, node: Node) -> MethodDeclaration {
        let name_node = node.child_by_field_name("name");
        let return_type = node
            .child_by_field_name("returns")
            .or_else(|| node.child_by_field_name("type"))
            .map(|ty| self.lower_type_ref(ty))
            .unwrap_or_else(|| TypeRef::Other(String::new()));
        MethodDeclaration {
            modifiers: self.lower_modifiers(node),
            identifier: name_node.map(|n| self.text(n)).unwrap_or("").to_string(),
            identifier_location: self.location(name_node.unwrap_or(node)),
            return_type,
            parameters: self.lower_parameters(node),
            body: self.lower_body(node),
            location: self.location(node),
        }
    }

    fn lower_property(&self, node: Node) -> PropertyDeclaration {
        PropertyDeclaration {
            modifiers: self.lower_modifiers(node),
            identifier: self.field_text(node, "name").to_string(),
            declared_type: node
                .child_by_field_name("type")
                .map(|ty| self.lower_type_ref(ty))
                .unwrap_or_else(|| TypeRef::Other(String::new())),
            body: self.lower_property_body(node),
            location: self.location(node),
        }
    }

    /// `=> expr` or the accessors of `{ get { ... } set { ... } }`, merged.
    fn lower_property_body(&self, node: Node) -> Option<Block> {
        if let Some(arrow) = find_child(node, "arrow_expression_clause") {
            return self.lower_body_node(arrow);
        }
        let accessors = node
            .child_by_field_name("accessors")
            .or_else(|| find_child(node, "accessor_list"))?;
        let statements: Vec<Statement> = named_children(accessors)
            .into_iter()
            .filter(|accessor| accessor.kind() == "accessor_declaration")
            .filter_map(|accessor| self.lower_body(accessor))
            .flat_map(|block| block.statements)
            .collect();
        (!statements.is_empty()).then_some(Block { statements })
    }

    fn lower_body(&self, node: Node) -> Option<Block> {
        let body = node
            .child_by_field_name("body")
            .or_else(|| find_child(node, "block"))
            .or_else(|| find_child(node, "arrow_expression_clause"))?;
        self.lower_body_node(body)
    }

    fn lower_body_node(&self, body: Node) -> Option<Block> {
        match body.kind() {
            "block" => Some(Block {
                statements: self.lower_statements(body, 0),
            }),
            "arrow_expression_clause" => Some(Block {
                statements: vec![Statement::Compound(CompoundStatement {
                    kind: body.kind().to_string(),
                    expressions: self.lower_expressions(body, 0),
                    statements: Vec::new(),
                    location: self.location(body),
                })],
            }),
            _ => None,
        }
    }

    fn lower_statements(&self, block: Node, depth: usize) -> Vec<Statement> {
        let mut statements = Vec::new();
        for child in named_children(block) {
            if child.kind() != "comment" {
                statements.push(self.lower_statement(child, depth + 1));
            }
        }
        statements
    }

    fn lower_statement(&self, node: Node, depth: usize) -> Statement {
        if depth >= MAX_LOWERING_DEPTH {
            tracing::debug!(file = self.file, kind = node.kind(), "statement nesting too deep, truncating");
            return Statement::Compound(CompoundStatement {
                kind: node.kind().to_string(),
                expressions: Vec::new(),
                statements: Vec::new(),
                location: self.location(node),
            });
        }
        match node.kind() {
            "local_declaration_statement" => {
                let (declared_type, variables) = find_child(node, "variable_declaration")
                    .map(|declaration| self.lower_variable_declaration(declaration, depth))
                    .unwrap_or_else(|| (TypeRef::Other(String::new()), Vec::new()));
                let declared_type = match declared_type {
                    TypeRef::Other(text) if text == "var" || text.is_empty() => None,
                    TypeRef::Named { ref name, .. } if name == "var" => None,
                    other => Some(other),
                };
                Statement::LocalDeclaration(LocalDeclaration {
                    declared_type,
                    variables,
                    location: self.location(node),
                })
            }
            "if_statement" => Statement::Conditional(self.lower_conditional(node, depth)),
            _ => Statement::Compound(self.lower_compound(node, depth)),
        }
    }

    fn lower_conditional(&self, node: Node, depth: usize) -> Conditional {
        let consequence = node.child_by_field_name("consequence");
        if consequence.is_none() {
            // Positional shape: condition expression followed by one or two statements.
            let mut condition = None;
            let mut branches = Vec::new();
            for child in named_children(node) {
                if is_statement_kind(child.kind()) {
                    branches.push(vec![self.lower_statement(child, depth + 1)]);
                } else if child.kind() != "comment" && condition.is_none() {
                    condition = Some(self.lower_expression(child, depth + 1));
                }
            }
            let mut branches = branches.into_iter();
            return Conditional {
                condition,
                consequence: branches.next().unwrap_or_default(),
                alternative: branches.next().unwrap_or_default(),
                location: self.location(node),
            };
        }

        Conditional {
            condition: node
                .child_by_field_name("condition")
                .map(|condition| self.lower_expression(condition, depth + 1)),
            consequence: consequence
                .map(|branch| vec![self.lower_statement(branch, depth + 1)])
                .unwrap_or_default(),
            alternative: node
                .child_by_field_name("alternative")
                .map(|branch| vec![self.lower_statement(branch, depth + 1)])
                .unwrap_or_default(),
            location: self.location(node),
        }
    }

    fn lower_compound(&self, node: Node, depth: usize) -> CompoundStatement {
        let mut expressions = Vec::new();
        let mut statements = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "comment" => {}
                kind if is_statement_kind(kind) => statements.push(self.lower_statement(child, depth + 1)),
                _ => expressions.push(self.lower_expression(child, depth + 1)),
            }
        }
        CompoundStatement {
            kind: node.kind().to_string(),
            expressions,
            statements,
            location: self.location(node),
        }
    }

    fn lower_expressions(&self, node: Node, depth: usize) -> Vec<Expression> {
        let mut expressions = Vec::new();
        for child in named_children(node) {
            if child.kind() != "comment" {
                expressions.push(self.lower_expression(child, depth + 1));
            }
        }
        expressions
    }

    /// Past `MAX_LOWERING_DEPTH` the subtree becomes an empty `Other`, which
    /// keeps generated code like a 20 000-term concatenation off the stack.
    fn lower_expression(&self, node: Node, depth: usize) -> Expression {
        if depth >= MAX_LOWERING_DEPTH {
            tracing::debug!(file = self.file, kind = node.kind(), "expression nesting too deep, truncating");
            return Expression::Other(Vec::new());
        }
        match node.kind() {
            "object_creation_expression" => {
                Expression::ObjectCreation(self.lower_object_creation(node, true, depth))
            }
            "implicit_object_creation_expression" => {
                Expression::ObjectCreation(self.lower_object_creation(node, false, depth))
            }
            "invocation_expression" => Expression::Invocation(self.lower_invocation(node, depth)),
            "parenthesized_expression" => {
                let mut inner = self.lower_expressions(node, depth);
                if inner.len() == 1 {
                    inner.remove(0)
                } else {
                    Expression::Other(inner)
                }
            }
            "argument" => named_children(node)
                .into_iter()
                .last()
                .map(|value| self.lower_expression(value, depth + 1))
                .unwrap_or_else(|| Expression::Other(Vec::new())),
            "identifier" => Expression::Identifier(self.text(node).to_string()),
            kind if LITERAL_KINDS.contains(&kind) => Expression::Literal(self.text(node).to_string()),
            "lambda_expression" | "anonymous_method_expression" => {
                let body = node
                    .child_by_field_name("body")
                    .or_else(|| find_child(node, "block"))
                    .or_else(|| named_children(node).into_iter().last());
                let statements = match body {
                    Some(block) if block.kind() == "block" => self.lower_statements(block, depth),
                    Some(expression) => vec![Statement::Compound(CompoundStatement {
                        kind: "expression_statement".to_string(),
                        expressions: vec![self.lower_expression(expression, depth + 1)],
                        statements: Vec::new(),
                        location: self.location(expression),
                    })],
                    None => Vec::new(),
                };
                Expression::Lambda(statements)
            }
            "block" => Expression::Lambda(self.lower_statements(node, depth)),
            _ => Expression::Other(self.lower_expressions(node, depth)),
        }
    }

    fn lower_object_creation(&self, node: Node, explicit_type: bool, depth: usize) -> ObjectCreation {
        let created_type = if explicit_type {
            node.child_by_field_name("type")
                .or_else(|| {
                    named_children(node).into_iter().find(|child| {
                        !matches!(child.kind(), "argument_list" | "initializer_expression")
                    })
                })
                .map(|ty| self.lower_type_ref(ty))
        } else {
            None
        };
        let arguments = node
            .child_by_field_name("arguments")
            .or_else(|| find_child(node, "argument_list"))
            .map(|list| self.lower_expressions(list, depth))
            .unwrap_or_default();
        let initializer = node
            .child_by_field_name("initializer")
            .or_else(|| find_child(node, "initializer_expression"))
            .map(|init| self.lower_expressions(init, depth))
            .unwrap_or_default();
        ObjectCreation {
            created_type,
            arguments,
            initializer,
            location: self.location(node),
        }
    }

    fn lower_invocation(&self, node: Node, depth: usize) -> Invocation {
        let function = node
            .child_by_field_name("function")
            .or_else(|| named_children(node).into_iter().next());
        let receiver = function
            .filter(|f| f.kind() == "member_access_expression")
            .and_then(|f| f.child_by_field_name("expression"))
            .map(|expression| Box::new(self.lower_expression(expression, depth + 1)));
        let arguments = node
            .child_by_field_name("arguments")
            .or_else(|| find_child(node, "argument_list"))
            .map(|list| self.lower_expressions(list, depth))
            .unwrap_or_default();
        Invocation {
            target: function.and_then(|f| self.invoked_name(f)),
            receiver,
            arguments,
            location: self.location(node),
        }
    }

    /// The simple name an invocation calls: `Create` for `Create()`,
    /// `factory.Create()`, and `Create<T>()`.
    fn invoked_name(&self, node: Node) -> Option<String> {
        match node.kind() {
            "identifier" => Some(self.text(node).to_string()),
            "generic_name" => node
                .child_by_field_name("name")
                .or_else(|| find_child(node, "identifier"))
                .map(|n| self.text(n).to_string()),
            "member_access_expression" | "qualified_name" => node
                .child_by_field_name("name")
                .and_then(|name| self.invoked_name(name)),
            _ => None,
        }
    }

    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn field_text(&self, node: Node, field: &str) -> &'s str {
        node.child_by_field_name(field)
            .map(|n| self.text(n))
            .unwrap_or("")
    }

    fn location(&self, node: Node) -> Location {
        Location::new(self.file, Range::from_ts_node(&node))
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn find_child<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    named_children(node)
        .into_iter()
        .find(|child| child.kind() == kind)
}

fn is_statement_kind(kind: &str) -> bool {
    kind.ends_with("_statement")
        || matches!(
            kind,
            "block" | "catch_clause" | "finally_clause" | "switch_section" | "switch_body" | "else_clause"
        )
}

fn join_namespace(outer: Option<&str>, inner: &str) -> String {
    match outer {
        Some(outer) if !outer.is_empty() => format!("{outer}.{inner}"),
        _ => inner.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::parsers::CSharpParser;
    use crate::syntax::{Expression, Statement, TypeDeclaration, TypeKind, TypeRef};

    fn lower(source: &str) -> Vec<TypeDeclaration> {
        CSharpParser::new()
            .parse_str(source, "Test.cs")
            .unwrap()
            .types
    }

    #[test]
    fn lowers_class_members_and_modifiers() {
        let types = lower(
            r#"
namespace Emulator
{
    public class Singleton
    {
        private static Singleton _instance;
        private Singleton() { }
        public static Singleton GetInstance() { return _instance; }
        public string Name { get; set; }
    }
}
"#,
        );
        assert_eq!(types.len(), 1);
        let singleton = &types[0];
        assert_eq!(singleton.kind, TypeKind::Class);
        assert_eq!(singleton.identifier, "Singleton");
        assert_eq!(singleton.namespace.as_deref(), Some("Emulator"));
        assert!(singleton.modifiers.is_public());

        let field = singleton.fields().next().unwrap();
        assert!(field.modifiers.is_private());
        assert!(field.modifiers.is_static());
        assert!(field.declared_type.has_identifier("Singleton"));
        assert_eq!(field.first_name(), "_instance");

        let constructor = singleton.constructors().next().unwrap();
        assert!(constructor.modifiers.is_private());

        let method = singleton.methods().next().unwrap();
        assert_eq!(method.identifier, "GetInstance");
        assert!(method.return_type.has_identifier("Singleton"));

        let property = singleton.properties().next().unwrap();
        assert_eq!(property.identifier, "Name");
        assert!(property.declared_type.is_predefined());
    }

    #[test]
    fn lowers_base_list_and_abstract_methods() {
        let types = lower(
            r#"
abstract class Creator
{
    public abstract IProduct FactoryMethod();
    public abstract string Describe();
}
class ConcreteProduct : Base, IProduct { }
interface IProduct { string Operation(); }
"#,
        );
        let creator = &types[0];
        assert!(creator.is_abstraction());
        let methods: Vec<_> = creator.methods().collect();
        assert!(methods[0].modifiers.is_abstract());
        assert!(methods[0].return_type.has_identifier("IProduct"));
        assert!(methods[0].body.is_none());
        assert!(methods[1].return_type.is_predefined());

        let product = &types[1];
        assert_eq!(product.base_identifiers().collect::<Vec<_>>(), vec!["Base", "IProduct"]);
        assert!(types[2].is_interface());
    }

    #[test]
    fn lowers_generic_field_types() {
        let types = lower(
            r#"
class FlyweightFactory
{
    private List<Flyweight> flyweights = new List<Flyweight>();
    private Dictionary<string, Car> cars;
    private Car[] garage;
}
"#,
        );
        let fields: Vec<_> = types[0].fields().collect();
        assert_eq!(
            fields[0].declared_type,
            TypeRef::generic("List", vec![TypeRef::named("Flyweight")])
        );
        assert_eq!(fields[1].declared_type.type_arguments().len(), 2);
        assert!(matches!(fields[2].declared_type, TypeRef::Array(_)));
        assert!(fields[0].variables[0].initializer.is_some());
    }

    #[test]
    fn lowers_nested_object_creations_in_locals() {
        let types = lower(
            r#"
class Test
{
    public void Run()
    {
        Beverage beverage = new Milk(new Soy(new Espresso()));
        var product = creator.FactoryMethod();
    }
}
"#,
        );
        let method = types[0].methods().next().unwrap();
        let locals = method.body.as_ref().unwrap().local_declarations();
        assert_eq!(locals.len(), 2);

        let Some(Expression::ObjectCreation(milk)) = locals[0].initializers().next() else {
            panic!("expected object creation");
        };
        assert!(milk.created_type.as_ref().unwrap().has_identifier("Milk"));
        let Some(Expression::ObjectCreation(soy)) = milk.arguments.first() else {
            panic!("expected nested creation");
        };
        assert!(soy.created_type.as_ref().unwrap().has_identifier("Soy"));

        assert!(locals[1].declared_type.is_none());
        let Some(Expression::Invocation(call)) = locals[1].initializers().next() else {
            panic!("expected invocation");
        };
        assert_eq!(call.target.as_deref(), Some("FactoryMethod"));
    }

    #[test]
    fn lowers_conditionals_with_creations() {
        let types = lower(
            r#"
public class FlyweightFactory
{
    public Flyweight GetFlyweight(Car sharedState)
    {
        string key = this.getKey(sharedState);
        if (this.flyweights.Where(t => t.Item2 == key).Count() == 0)
        {
            this.flyweights.Add(new Flyweight(sharedState));
        }
        return this.flyweights.Where(t => t.Item2 == key).FirstOrDefault().Item1;
    }
}
"#,
        );
        let method = types[0].methods().next().unwrap();
        let body = method.body.as_ref().unwrap();
        let conditionals = body.conditionals();
        assert_eq!(conditionals.len(), 1);
        let creations = conditionals[0].object_creations();
        assert_eq!(creations.len(), 1);
        assert!(creations[0]
            .created_type
            .as_ref()
            .unwrap()
            .has_identifier("Flyweight"));
        assert!(body
            .statements
            .iter()
            .any(|statement| matches!(statement, Statement::Compound(c) if c.kind == "return_statement")));
    }

    #[test]
    fn nested_types_are_flattened() {
        let types = lower(
            r#"
class Outer
{
    private int count;
    class Inner
    {
        private Inner() { }
    }
}
"#,
        );
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].constructors().count(), 0);
        assert_eq!(types[1].identifier, "Inner");
        assert_eq!(types[1].containing_type.as_deref(), Some("Outer"));
        assert_eq!(types[1].qualified_name(), "Outer.Inner");
    }

    #[test]
    fn file_scoped_namespace_applies() {
        let types = lower(
            r#"
namespace Shop.Model;

public interface IProduct { }
"#,
        );
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].namespace.as_deref(), Some("Shop.Model"));
    }

    #[test]
    fn broken_source_still_lowers() {
        let tree = CSharpParser::new()
            .parse_str("class Broken { void Run() { int x = ; } }", "Broken.cs")
            .unwrap();
        assert!(tree.has_errors());
        assert!(tree.types.iter().any(|t| t.identifier == "Broken"));
    }

    #[test]
    fn property_accessor_bodies_are_lowered() {
        let types = lower(
            r#"
class Client
{
    public Beverage Drink { get { var b = new Milk(new Soy()); return b; } set { } }
    public Beverage Quick => new Milk(new Soy());
    public string Name { get; set; }
}
"#,
        );
        let properties: Vec<_> = types[0].properties().collect();
        let getter = properties[0].body.as_ref().unwrap();
        assert_eq!(getter.local_declarations().len(), 1);
        assert_eq!(getter.object_creations().len(), 2);

        let arrow = properties[1].body.as_ref().unwrap();
        assert_eq!(arrow.object_creations().len(), 2);

        assert!(properties[2].body.is_none());
    }

    #[test]
    fn deeply_nested_expressions_are_truncated() {
        let terms = vec!["x"; 20_000].join(" + ");
        let source = format!("class Deep {{ int Sum(int x) {{ var s = {terms}; return s; }} }}");
        let handle = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || {
                let tree = CSharpParser::new().parse_str(&source, "Deep.cs").unwrap();
                let method = tree.types[0].methods().next().unwrap();
                method.body.as_ref().unwrap().local_declarations().len()
            })
            .unwrap();
        assert_eq!(handle.join().unwrap(), 1);
    }
}
