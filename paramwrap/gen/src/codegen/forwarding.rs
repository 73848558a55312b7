//! Forwarding wrapper generation.
//!
//! Turns one [`ParamDescriptor`] into the wrapper class that forwards every
//! eligible method to the held param instance.
//!
//! ## Base selection
//!
//! | declared super kind | base                       | forward target          |
//! |---------------------|----------------------------|-------------------------|
//! | builtin family      | `<prefix><Family>Param`    | `(param as Wrapped).m()`|
//! | other               | `<Ancestor><Wrapped, Self>`| `param.m()`             |
//!
//! The downcast is needed for builtin families because the family wrapper
//! only exposes `param` as the family's param type.
//!
//! ## Return rewriting
//!
//! A method returning exactly the wrapped type is rewritten to return the
//! wrapper itself, so chains keep the wrapper type:
//!
//! ```text
//! fun addFile(file: File): RxHttp_UploadParam {
//!     (param as UploadParam).addFile(file)
//!     return this
//! }
//! ```

use paramwrap_define::{Parameter, SuperKind, TypeRef};

use super::PARAM_FIELD;
use crate::config::GeneratorConfig;
use crate::introspect::{MethodDescriptor, ParamDescriptor};
use crate::ir::{
    Argument, BodyKind, ClassModifier, ConstructorDescriptor, ForwardCall, ForwardTarget,
    GeneratedClassDescriptor, GeneratedMethodDescriptor, SelfBinding, TypeParam,
};

/// Base class, forward target and self binding of one wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperLayout {
    pub base: TypeRef,
    pub target: ForwardTarget,
    pub self_binding: SelfBinding,
}

impl WrapperLayout {
    pub fn new(
        kind: SuperKind,
        wrapped: &TypeRef,
        wrapper: &TypeRef,
        config: &GeneratorConfig,
    ) -> Self {
        match kind.family() {
            Some(family) => Self {
                base: config.family_wrapper_type(family),
                target: ForwardTarget::Downcast {
                    field: PARAM_FIELD.to_string(),
                    to: wrapped.clone(),
                },
                self_binding: SelfBinding::Inherited,
            },
            None => Self {
                base: config.ancestor_type(wrapped.clone(), wrapper.clone()),
                target: ForwardTarget::Field(PARAM_FIELD.to_string()),
                self_binding: SelfBinding::Override(wrapper.clone()),
            },
        }
    }
}

/// Name of the class generated for a descriptor.
///
/// Falls back to the key when the wrapped type is not a class reference.
pub fn wrapper_name(descriptor: &ParamDescriptor, config: &GeneratorConfig) -> String {
    let simple = descriptor
        .type_ref
        .simple_name()
        .unwrap_or(descriptor.key.as_str());
    config.wrapper_name(simple)
}

/// Generates the wrapper class for one descriptor.
pub fn generate_wrapper(
    descriptor: &ParamDescriptor,
    config: &GeneratorConfig,
) -> GeneratedClassDescriptor {
    let wrapped = &descriptor.type_ref;
    let name = wrapper_name(descriptor, config);
    let wrapper = config.generated_type(&name);
    let layout = WrapperLayout::new(descriptor.declared_super_kind, wrapped, &wrapper, config);

    let methods = descriptor
        .eligible_methods
        .iter()
        .map(|method| forward_method(method, wrapped, &wrapper, &layout.target))
        .collect();

    let docs = format!(
        "Fluent wrapper for [{}], created by the `{}` factory.",
        wrapped.simple_name().unwrap_or(&name),
        descriptor.key
    );

    GeneratedClassDescriptor {
        name,
        docs: Some(docs),
        modifier: ClassModifier::Open,
        type_params: Vec::new(),
        base: Some(layout.base),
        constructor: ConstructorDescriptor {
            parameter: Parameter::new(PARAM_FIELD, wrapped.clone()),
            is_property: false,
            calls_super: true,
        },
        self_binding: layout.self_binding,
        methods,
        companion: Vec::new(),
    }
}

/// Decides the body shape and the generated return type of a method.
pub fn classify(method: &MethodDescriptor, wrapped: &TypeRef, wrapper: &TypeRef) -> (BodyKind, TypeRef) {
    if &method.returns == wrapped {
        (BodyKind::ForwardAndReturnSelf, wrapper.clone())
    } else if method.is_void() {
        (BodyKind::ForwardOnly, TypeRef::Unit)
    } else {
        (BodyKind::ForwardAndReturnValue, method.returns.clone())
    }
}

/// Builds the forwarding method for one eligible method.
pub fn forward_method(
    method: &MethodDescriptor,
    wrapped: &TypeRef,
    wrapper: &TypeRef,
    target: &ForwardTarget,
) -> GeneratedMethodDescriptor {
    let (body_kind, returns) = classify(method, wrapped, wrapper);

    GeneratedMethodDescriptor {
        name: method.name.clone(),
        docs: None,
        deprecation: None,
        type_params: method.type_params.iter().map(TypeParam::new).collect(),
        parameters: method.parameters.clone(),
        returns,
        body_kind,
        call: ForwardCall {
            target: target.clone(),
            method: method.name.clone(),
            args: forward_arguments(&method.parameters),
        },
        guard: None,
    }
}

/// Passes every parameter through by name, spreading a trailing vararg.
pub fn forward_arguments(parameters: &[Parameter]) -> Vec<Argument> {
    let last = parameters.len().saturating_sub(1);
    parameters
        .iter()
        .enumerate()
        .map(|(i, p)| Argument::Forward {
            name: p.name.clone(),
            spread: p.vararg && i == last,
        })
        .collect()
}
