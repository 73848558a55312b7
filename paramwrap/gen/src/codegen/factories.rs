//! Companion factory assembly.
//!
//! The companion list is a contract with a fixed order:
//!
//! 1. the 14 verb factories, in verb table order
//! 2. one custom factory per registry entry, in registry order
//! 3. four `with(...)` overloads, one per builtin family

use paramwrap_define::{BuiltinFamily, Parameter, TypeRef};
use strum::IntoEnumIterator;

use super::forwarding::wrapper_name;
use crate::config::GeneratorConfig;
use crate::ir::{FactoryBody, FactoryDescriptor};
use crate::registry::SchemaRegistry;
use crate::verbs::VERB_TABLE;

/// `(url: String, vararg formatArgs: Any)`
pub fn url_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("url", TypeRef::kotlin("String")),
        Parameter::vararg("formatArgs", TypeRef::kotlin("Any")),
    ]
}

pub fn verb_factories(config: &GeneratorConfig) -> Vec<FactoryDescriptor> {
    VERB_TABLE
        .iter()
        .map(|verb| {
            let wrapper = config.family_wrapper_type(verb.family);
            FactoryDescriptor {
                name: verb.name.to_string(),
                parameters: url_parameters(),
                returns: wrapper.clone(),
                body: FactoryBody::Verb {
                    family: verb.family,
                    param_class: config.family_param_type(verb.family),
                    verb: verb.name.to_string(),
                    wrapper,
                },
            }
        })
        .collect()
}

/// One factory per registry entry, named by its key.
pub fn custom_factories(registry: &SchemaRegistry, config: &GeneratorConfig) -> Vec<FactoryDescriptor> {
    registry
        .entries()
        .map(|descriptor| {
            let wrapper = config.generated_type(&wrapper_name(descriptor, config));
            FactoryDescriptor {
                name: descriptor.key.clone(),
                parameters: url_parameters(),
                returns: wrapper.clone(),
                body: FactoryBody::Custom {
                    wrapped: descriptor.type_ref.clone(),
                    wrapper,
                },
            }
        })
        .collect()
}

pub fn with_factories(config: &GeneratorConfig) -> Vec<FactoryDescriptor> {
    BuiltinFamily::iter()
        .map(|family| {
            let wrapper = config.family_wrapper_type(family);
            FactoryDescriptor {
                name: "with".to_string(),
                parameters: vec![Parameter::new(
                    family.argument_name(),
                    config.family_param_type(family),
                )],
                returns: wrapper.clone(),
                body: FactoryBody::With {
                    family,
                    parameter: family.argument_name().to_string(),
                    wrapper,
                },
            }
        })
        .collect()
}

/// The full companion list in contract order.
pub fn companion_factories(
    registry: &SchemaRegistry,
    config: &GeneratorConfig,
) -> Vec<FactoryDescriptor> {
    let mut factories = verb_factories(config);
    factories.extend(custom_factories(registry, config));
    factories.extend(with_factories(config));
    factories
}
