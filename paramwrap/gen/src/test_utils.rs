//! Shared test utilities for paramwrap-gen tests.

use paramwrap_define::{MemberDescriptor, ParamDeclaration, Parameter, SuperKind, TypeRef};

use crate::config::GeneratorConfig;
use crate::introspect::ParamDescriptor;

pub fn string_type() -> TypeRef {
    TypeRef::kotlin("String")
}

pub fn file_type() -> TypeRef {
    TypeRef::class("java.io", "File")
}

/// A form-family descriptor wrapping `com.example.<simple>`, with no methods.
pub fn descriptor(key: &str, simple: &str) -> ParamDescriptor {
    ParamDescriptor::from_declaration(ParamDeclaration::new(
        key,
        TypeRef::class("com.example", simple),
        SuperKind::Form,
    ))
}

/// Like [`descriptor`] but not extending a builtin family.
pub fn other_descriptor(key: &str, simple: &str) -> ParamDescriptor {
    ParamDescriptor::from_declaration(ParamDeclaration::new(
        key,
        TypeRef::class("com.example", simple),
        SuperKind::Other,
    ))
}

/// `UploadParam : FormParam` with `addFile(file: File): UploadParam` and
/// `setTag(tag: String)`.
pub fn upload_declaration() -> ParamDeclaration {
    let upload = TypeRef::class("com.example", "UploadParam");
    ParamDeclaration::new("upload", upload.clone(), SuperKind::Form)
        .with_member(
            MemberDescriptor::method("addFile")
                .with_param(Parameter::new("file", file_type()))
                .returning(upload),
        )
        .with_member(MemberDescriptor::method("setTag").with_param(Parameter::new("tag", string_type())))
}

/// Default packages with the `Wrapper` ancestor and `Wrapper_` prefix.
pub fn wrapper_config() -> GeneratorConfig {
    GeneratorConfig {
        ancestor: "Wrapper".to_string(),
        class_prefix: "Wrapper_".to_string(),
        ..Default::default()
    }
}
