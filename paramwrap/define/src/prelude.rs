//! Common re-exports for building param declarations.

pub use crate::error::TypeParseError;
pub use crate::member::{MemberDescriptor, MemberKind, Parameter, Visibility};
pub use crate::param::{BuiltinFamily, ParamDeclaration, SuperKind};
pub use crate::types::{ClassPath, TypeRef, Variance};
