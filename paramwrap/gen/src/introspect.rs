//! Method selection for wrapped param types.
//!
//! The introspector decides which members of a wrapped type get a forwarding
//! method. A member is selected iff it is a method (not a constructor or a
//! field), it is public, and it does not override an inherited declaration.
//! Everything else is skipped without error.
//!
//! A method whose variadic flag sits on a parameter other than the last one
//! cannot be expressed in a Kotlin signature and is skipped the same way.

use paramwrap_define::{
    MemberDescriptor, MemberKind, ParamDeclaration, Parameter, SuperKind, TypeRef, Visibility,
};
use tracing::debug;

/// A generator-eligible method of a wrapped type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub type_params: Vec<String>,
    /// Declared parameters in order; only the last may be variadic.
    pub parameters: Vec<Parameter>,
    pub returns: TypeRef,
}

impl MethodDescriptor {
    pub fn is_void(&self) -> bool {
        self.returns.is_unit()
    }

    pub fn is_var_args(&self) -> bool {
        self.parameters.last().is_some_and(|p| p.vararg)
    }
}

/// A registered param type with its eligible methods resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    pub key: String,
    pub type_ref: TypeRef,
    pub declared_super_kind: SuperKind,
    pub eligible_methods: Vec<MethodDescriptor>,
}

impl ParamDescriptor {
    /// Runs method selection over a discovered declaration.
    pub fn from_declaration(declaration: ParamDeclaration) -> Self {
        let eligible_methods = eligible_methods(&declaration.type_ref, &declaration.members);
        Self {
            key: declaration.key,
            type_ref: declaration.type_ref,
            declared_super_kind: declaration.super_kind,
            eligible_methods,
        }
    }

    /// Fully qualified name of the wrapped type, for diagnostics.
    pub fn type_name(&self) -> String {
        self.type_ref.to_string()
    }
}

/// Why a member was left out of generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAMethod(MemberKind),
    NotPublic(Visibility),
    Override,
    MisplacedVararg,
}

/// Classifies one member; `None` means it is eligible.
pub fn skip_reason(member: &MemberDescriptor) -> Option<SkipReason> {
    if member.kind != MemberKind::Method {
        return Some(SkipReason::NotAMethod(member.kind));
    }
    if member.visibility != Visibility::Public {
        return Some(SkipReason::NotPublic(member.visibility));
    }
    if member.is_override {
        return Some(SkipReason::Override);
    }
    let last = member.parameters.len().saturating_sub(1);
    if member
        .parameters
        .iter()
        .enumerate()
        .any(|(i, p)| p.vararg && i != last)
    {
        return Some(SkipReason::MisplacedVararg);
    }
    None
}

/// Selects the eligible methods of a wrapped type, in declaration order.
///
/// Bare type names matching a method's own type parameters are resolved to
/// type variables in the returned signatures.
pub fn eligible_methods(wrapped: &TypeRef, members: &[MemberDescriptor]) -> Vec<MethodDescriptor> {
    members
        .iter()
        .filter_map(|member| {
            if let Some(reason) = skip_reason(member) {
                debug!(param = %wrapped, member = %member.name, ?reason, "Skipping member");
                return None;
            }
            Some(describe_method(member))
        })
        .collect()
}

fn describe_method(member: &MemberDescriptor) -> MethodDescriptor {
    let vars = &member.type_params;
    MethodDescriptor {
        name: member.name.clone(),
        type_params: vars.clone(),
        parameters: member
            .parameters
            .iter()
            .map(|p| Parameter {
                name: p.name.clone(),
                type_ref: p.type_ref.clone().resolve_variables(vars),
                vararg: p.vararg,
            })
            .collect(),
        returns: member.returns.clone().resolve_variables(vars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload() -> TypeRef {
        TypeRef::class("com.example", "UploadParam")
    }

    fn string() -> TypeRef {
        TypeRef::kotlin("String")
    }

    #[test]
    fn keeps_public_non_override_methods_in_order() {
        let members = vec![
            MemberDescriptor::method("b").returning(upload()),
            MemberDescriptor::method("a"),
        ];
        let methods = eligible_methods(&upload(), &members);

        let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn skips_constructors_fields_non_public_and_overrides() {
        let members = vec![
            MemberDescriptor::constructor(vec![Parameter::new("url", string())]),
            MemberDescriptor::field("files", string()),
            MemberDescriptor::method("hidden").with_visibility(Visibility::Private),
            MemberDescriptor::method("guarded").with_visibility(Visibility::Protected),
            MemberDescriptor::method("internalOnly").with_visibility(Visibility::Internal),
            MemberDescriptor::method("getUrl").returning(string()).overriding(),
            MemberDescriptor::method("setTag").with_param(Parameter::new("tag", string())),
        ];
        let methods = eligible_methods(&upload(), &members);

        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "setTag");
    }

    #[test]
    fn skip_reasons_are_reported() {
        assert_eq!(
            skip_reason(&MemberDescriptor::field("f", string())),
            Some(SkipReason::NotAMethod(MemberKind::Field))
        );
        assert_eq!(
            skip_reason(&MemberDescriptor::method("m").with_visibility(Visibility::Private)),
            Some(SkipReason::NotPublic(Visibility::Private))
        );
        assert_eq!(
            skip_reason(&MemberDescriptor::method("m").overriding()),
            Some(SkipReason::Override)
        );
        assert_eq!(skip_reason(&MemberDescriptor::method("m")), None);
    }

    #[test]
    fn vararg_must_be_last() {
        let misplaced = MemberDescriptor::method("add")
            .with_param(Parameter::vararg("values", string()))
            .with_param(Parameter::new("key", string()));
        let trailing = MemberDescriptor::method("add")
            .with_param(Parameter::new("key", string()))
            .with_param(Parameter::vararg("values", string()));

        assert_eq!(skip_reason(&misplaced), Some(SkipReason::MisplacedVararg));
        assert_eq!(skip_reason(&trailing), None);

        let methods = eligible_methods(&upload(), &[misplaced, trailing]);
        assert_eq!(methods.len(), 1);
        assert!(methods[0].is_var_args());
    }

    #[test]
    fn signatures_are_copied_exactly() {
        let member = MemberDescriptor::method("addPart")
            .with_param(Parameter::new("name", string()))
            .with_param(Parameter::new("body", TypeRef::class("okhttp3", "RequestBody").nullable()))
            .returning(upload());
        let methods = eligible_methods(&upload(), std::slice::from_ref(&member));

        assert_eq!(methods[0].parameters, member.parameters);
        assert_eq!(methods[0].returns, upload());
        assert!(!methods[0].is_void());
        assert!(!methods[0].is_var_args());
    }

    #[test]
    fn method_type_params_become_variables() {
        let member = MemberDescriptor::method("put")
            .with_type_param("T")
            .with_param(Parameter::new("key", string()))
            .with_param(Parameter::new("value", TypeRef::class("", "T").nullable()));
        let methods = eligible_methods(&upload(), &[member]);

        assert_eq!(methods[0].type_params, ["T"]);
        assert_eq!(methods[0].parameters[1].type_ref, TypeRef::variable("T").nullable());
        assert!(methods[0].is_void());
    }

    #[test]
    fn descriptor_from_declaration_keeps_identity() {
        let decl = ParamDeclaration::new("upload", upload(), SuperKind::Form)
            .with_member(MemberDescriptor::method("setTag"))
            .with_member(MemberDescriptor::method("secret").with_visibility(Visibility::Private));
        let descriptor = ParamDescriptor::from_declaration(decl);

        assert_eq!(descriptor.key, "upload");
        assert_eq!(descriptor.declared_super_kind, SuperKind::Form);
        assert_eq!(descriptor.type_name(), "com.example.UploadParam");
        assert_eq!(descriptor.eligible_methods.len(), 1);
    }
}
