//! Declaration model: an owned, read-only view of C# type declarations,
//! their members, and the body facts pattern checks need.

pub mod declarations;
pub mod lowering;
pub mod statements;
pub mod tree;
pub mod types;

pub use declarations::{
    ConstructorDeclaration, FieldDeclaration, MemberDeclaration, MethodDeclaration, Parameter,
    PropertyDeclaration, TypeDeclaration, TypeKind,
};
pub use statements::{
    Block, BodyNode, CompoundStatement, Conditional, Expression, Invocation, LocalDeclaration,
    ObjectCreation, Statement, VariableDeclarator,
};
pub use tree::SourceTree;
pub use types::{Modifier, Modifiers, TypeRef};
