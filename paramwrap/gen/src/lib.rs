//! Paramwrap code generator library.
//!
//! This crate turns a schema of annotated param classes (see
//! `paramwrap-define`) into fluent Kotlin wrapper classes. The generated code
//! includes:
//!
//! - A generic, self-bounded ancestor carrying the shared chain API
//! - One wrapper per builtin param family
//! - One forwarding wrapper per registered param class
//! - Static factories: one per HTTP verb, one per param key, and `with(...)`
//!
//! ## Modules
//!
//! - [`registry`] - Ordered registry of param descriptors
//! - [`verbs`] - The fixed verb table
//! - [`introspect`] - Selection of forwardable methods
//! - [`codegen`] - Forwarding, chain API and factory generation
//! - [`ir`] - The generated declaration tree
//! - [`render`] - Kotlin rendering with import management
//! - [`output`] - Emitters and atomic file writing
//! - [`schema`] - Schema file loading
//! - [`config`] - Generator configuration
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use paramwrap_define::{MemberDescriptor, ParamDeclaration, SuperKind, TypeRef};
//! use paramwrap_gen::config::GeneratorConfig;
//! use paramwrap_gen::output::{MemoryEmitter, generate_and_emit};
//! use paramwrap_gen::registry::SchemaRegistry;
//!
//! let upload = TypeRef::class("com.example", "UploadParam");
//! let decl = ParamDeclaration::new("upload", upload.clone(), SuperKind::Form)
//!     .with_member(MemberDescriptor::method("compress").returning(upload));
//!
//! let registry = SchemaRegistry::from_declarations([decl]).unwrap();
//! let mut emitter = MemoryEmitter::new();
//! generate_and_emit(&registry, &GeneratorConfig::default(), &mut emitter).unwrap();
//!
//! let wrapper = emitter.get("RxHttp_UploadParam").unwrap();
//! assert!(wrapper.source.contains("fun compress(): RxHttp_UploadParam {"));
//! ```

pub mod codegen;
pub mod config;
pub mod errors;
pub mod introspect;
pub mod ir;
pub mod output;
pub mod registry;
pub mod render;
pub mod schema;
pub mod verbs;

#[cfg(test)]
mod test_utils;
