//! Members of a wrapped param class.
//!
//! A discovery collaborator describes every member it sees on an annotated
//! type, eligible or not; the generator decides which ones to forward.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::TypeRef;

/// What kind of member a [`MemberDescriptor`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Method,
    Constructor,
    Field,
}

/// Declared visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

/// One parameter of a method signature.
///
/// For a variadic parameter `type_ref` is the element type, so Java's
/// `String... names` is `Parameter::vararg("names", TypeRef::kotlin("String"))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub vararg: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            vararg: false,
        }
    }

    pub fn vararg(name: impl Into<String>, element_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: element_type,
            vararg: true,
        }
    }
}

/// A member declared on a wrapped param class.
///
/// ## Examples
///
/// ```
/// use paramwrap_define::{MemberDescriptor, Parameter, TypeRef, Visibility};
///
/// let add_file = MemberDescriptor::method("addFile")
///     .with_param(Parameter::new("file", TypeRef::class("java.io", "File")))
///     .returning(TypeRef::class("com.example", "UploadParam"));
///
/// assert_eq!(add_file.visibility, Visibility::Public);
/// assert!(!add_file.is_override);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// True when the member overrides an inherited declaration.
    #[serde(default, rename = "override")]
    pub is_override: bool,
    /// Method type parameter names, e.g. `["T"]` for `fun <T> tag(...)`.
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type for methods, declared type for fields.
    #[serde(default)]
    pub returns: TypeRef,
}

impl MemberDescriptor {
    /// A public, non-override method returning `Unit` with no parameters.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            visibility: Visibility::Public,
            is_override: false,
            type_params: Vec::new(),
            parameters: Vec::new(),
            returns: TypeRef::Unit,
        }
    }

    /// A public constructor.
    pub fn constructor(parameters: Vec<Parameter>) -> Self {
        Self {
            kind: MemberKind::Constructor,
            parameters,
            ..Self::method("<init>")
        }
    }

    /// A public field of the given type.
    pub fn field(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            kind: MemberKind::Field,
            returns: type_ref,
            ..Self::method(name)
        }
    }

    pub fn with_param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returning(mut self, returns: TypeRef) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Marks the member as overriding an inherited declaration.
    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }
}
