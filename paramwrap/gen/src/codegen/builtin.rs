//! Wrappers of the four builtin param families.
//!
//! Each one closes the ancestor's generic over its family param type and
//! itself, so descriptor wrappers of that family have a concrete base.

use paramwrap_define::{BuiltinFamily, Parameter};
use strum::IntoEnumIterator;

use super::PARAM_FIELD;
use crate::config::GeneratorConfig;
use crate::ir::{ClassModifier, ConstructorDescriptor, GeneratedClassDescriptor, SelfBinding};

/// Generates the wrapper of one builtin family.
pub fn generate_family_wrapper(
    family: BuiltinFamily,
    config: &GeneratorConfig,
) -> GeneratedClassDescriptor {
    let param_type = config.family_param_type(family);
    let own = config.family_wrapper_type(family);

    GeneratedClassDescriptor {
        name: config.wrapper_name(family.param_class()),
        docs: Some(format!(
            "Base wrapper of every param extending [{}].",
            family.param_class()
        )),
        modifier: ClassModifier::Open,
        type_params: Vec::new(),
        base: Some(config.ancestor_type(param_type.clone(), own.clone())),
        constructor: ConstructorDescriptor {
            parameter: Parameter::new(PARAM_FIELD, param_type),
            is_property: false,
            calls_super: true,
        },
        self_binding: SelfBinding::Override(own),
        methods: Vec::new(),
        companion: Vec::new(),
    }
}

/// All four family wrappers, in family order.
pub fn generate_builtin_wrappers(config: &GeneratorConfig) -> Vec<GeneratedClassDescriptor> {
    BuiltinFamily::iter()
        .map(|family| generate_family_wrapper(family, config))
        .collect()
}
