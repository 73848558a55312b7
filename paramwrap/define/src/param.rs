//! Param declarations: the input tuples of a generation run.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::member::MemberDescriptor;
use crate::types::TypeRef;

/// One of the four predefined param families with a generated base wrapper.
///
/// ## Examples
///
/// ```
/// use paramwrap_define::BuiltinFamily;
/// use strum::IntoEnumIterator;
///
/// let classes: Vec<_> = BuiltinFamily::iter().map(BuiltinFamily::param_class).collect();
/// assert_eq!(classes, ["NoBodyParam", "FormParam", "JsonParam", "JsonArrayParam"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinFamily {
    NoBody,
    Form,
    Json,
    JsonArray,
}

impl BuiltinFamily {
    /// Simple name of the family's param class.
    pub fn param_class(self) -> &'static str {
        match self {
            Self::NoBody => "NoBodyParam",
            Self::Form => "FormParam",
            Self::Json => "JsonParam",
            Self::JsonArray => "JsonArrayParam",
        }
    }

    /// Parameter name used when an instance of the family is passed around.
    pub fn argument_name(self) -> &'static str {
        match self {
            Self::NoBody => "noBodyParam",
            Self::Form => "formParam",
            Self::Json => "jsonParam",
            Self::JsonArray => "jsonArrayParam",
        }
    }
}

/// The superclass a wrapped param type declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SuperKind {
    NoBody,
    Form,
    Json,
    JsonArray,
    #[default]
    Other,
}

impl SuperKind {
    /// The builtin family, or `None` for [`SuperKind::Other`].
    pub fn family(self) -> Option<BuiltinFamily> {
        match self {
            Self::NoBody => Some(BuiltinFamily::NoBody),
            Self::Form => Some(BuiltinFamily::Form),
            Self::Json => Some(BuiltinFamily::Json),
            Self::JsonArray => Some(BuiltinFamily::JsonArray),
            Self::Other => None,
        }
    }

    /// Classifies a declared superclass.
    ///
    /// Only the exact family classes in `param_package` count as builtin;
    /// parameterized or nullable references and classes elsewhere are `Other`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use paramwrap_define::{SuperKind, TypeRef};
    ///
    /// let form = TypeRef::class("rxhttp.wrapper.param", "FormParam");
    /// assert_eq!(SuperKind::from_superclass(&form, "rxhttp.wrapper.param"), SuperKind::Form);
    ///
    /// let other = TypeRef::class("com.example", "FormParam");
    /// assert_eq!(SuperKind::from_superclass(&other, "rxhttp.wrapper.param"), SuperKind::Other);
    /// ```
    pub fn from_superclass(superclass: &TypeRef, param_package: &str) -> Self {
        let TypeRef::Class {
            path,
            args,
            nullable: false,
        } = superclass
        else {
            return Self::Other;
        };
        if !args.is_empty() || path.package != param_package || path.names.len() != 1 {
            return Self::Other;
        }
        match path.simple_name() {
            "NoBodyParam" => Self::NoBody,
            "FormParam" => Self::Form,
            "JsonParam" => Self::Json,
            "JsonArrayParam" => Self::JsonArray,
            _ => Self::Other,
        }
    }
}

impl From<BuiltinFamily> for SuperKind {
    fn from(family: BuiltinFamily) -> Self {
        match family {
            BuiltinFamily::NoBody => Self::NoBody,
            BuiltinFamily::Form => Self::Form,
            BuiltinFamily::Json => Self::Json,
            BuiltinFamily::JsonArray => Self::JsonArray,
        }
    }
}

/// An annotated param type as reported by discovery.
///
/// `key` is the verb-like name chosen by the user; it names the companion
/// factory of the generated wrapper and must be a non-empty identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDeclaration {
    pub key: String,
    /// The wrapped type.
    pub type_ref: TypeRef,
    pub super_kind: SuperKind,
    /// Every member discovered on the type, eligible or not.
    pub members: Vec<MemberDescriptor>,
}

impl ParamDeclaration {
    pub fn new(key: impl Into<String>, type_ref: TypeRef, super_kind: SuperKind) -> Self {
        Self {
            key: key.into(),
            type_ref,
            super_kind,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}
