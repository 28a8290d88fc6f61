//! The compilation: every source tree of one analysis unit, indexed for
//! cross-file correlation, plus optional semantic information.

pub mod index;
pub mod semantics;
pub mod view;

pub use index::{DeclarationIndex, MethodId, TypeId};
pub use semantics::{DeclaredTypeSemantics, SemanticModel};
pub use view::CompilationView;
