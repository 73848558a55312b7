//! Paramwrap Definition Library
//!
//! This crate provides the vocabulary for describing annotated param classes
//! to the `paramwrap-gen` code generator. A discovery step (a build plugin,
//! an annotation scanner, or a hand-written schema file) resolves each
//! annotated class into a [`ParamDeclaration`]; the generator never inspects
//! live types itself.
//!
//! ## Core Types
//!
//! - [`ParamDeclaration`] - One annotated param class: key, wrapped type, superclass kind, members
//! - [`MemberDescriptor`] - A member of the wrapped class (method, constructor or field)
//! - [`Parameter`] - One method parameter, optionally variadic
//! - [`SuperKind`] - Which builtin family (if any) the wrapped class extends
//! - [`BuiltinFamily`] - The four predefined param families
//! - [`TypeRef`] / [`ClassPath`] - Kotlin type references, parsed from text
//!
//! ## Examples
//!
//! ```
//! use paramwrap_define::{MemberDescriptor, ParamDeclaration, Parameter, SuperKind, TypeRef};
//!
//! let upload = TypeRef::class("com.example", "UploadParam");
//! let decl = ParamDeclaration::new("upload", upload.clone(), SuperKind::Form)
//!     .with_member(
//!         MemberDescriptor::method("addFile")
//!             .with_param(Parameter::new("file", "java.io.File".parse().unwrap()))
//!             .returning(upload),
//!     );
//!
//! assert_eq!(decl.key, "upload");
//! assert_eq!(decl.members.len(), 1);
//! ```

pub mod error;
pub mod member;
pub mod param;
pub mod prelude;
pub mod types;

// Re-export main types at crate root
pub use error::TypeParseError;
pub use member::{MemberDescriptor, MemberKind, Parameter, Visibility};
pub use param::{BuiltinFamily, ParamDeclaration, SuperKind};
pub use types::{ClassPath, TypeRef, Variance};
