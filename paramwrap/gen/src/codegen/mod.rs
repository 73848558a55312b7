//! Code generation from a populated registry.
//!
//! Generation produces declaration descriptors only (see [`crate::ir`]);
//! turning them into Kotlin source is the job of [`crate::render`].
//!
//! ## Submodules
//!
//! - [`forwarding`] - One forwarding wrapper per registry entry
//! - [`chain_api`] - The generic ancestor and its fixed fluent catalog
//! - [`builtin`] - The four builtin family wrappers
//! - [`factories`] - Companion factories, in contract order
//!
//! ## Generation Flow
//!
//! 1. Wrappers are generated per descriptor on the rayon pool; `collect`
//!    keeps registry order regardless of completion order.
//! 2. The ancestor is built with the chain-API catalog.
//! 3. The companion list is assembled in its fixed order and attached to
//!    the ancestor.
//! 4. Class names are checked for uniqueness; each class becomes one file,
//!    so a shared name would silently replace a unit.

pub mod builtin;
pub mod chain_api;
pub mod factories;
pub mod forwarding;

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::introspect::ParamDescriptor;
use crate::ir::{GeneratedClassDescriptor, GeneratedOutput};
use crate::registry::SchemaRegistry;

pub use builtin::{generate_builtin_wrappers, generate_family_wrapper};
pub use chain_api::generate_ancestor;
pub use factories::companion_factories;
pub use forwarding::generate_wrapper;

/// Name of the field holding the wrapped param instance.
pub const PARAM_FIELD: &str = "param";

/// Generates every declaration for a registry.
///
/// ## Errors
///
/// Returns `GeneratorError::ClassNameCollision` when two classes would be
/// generated under the same name.
pub fn generate(
    registry: &SchemaRegistry,
    config: &GeneratorConfig,
) -> Result<GeneratedOutput, GeneratorError> {
    let descriptors: Vec<&ParamDescriptor> = registry.entries().collect();
    let wrappers: Vec<_> = descriptors
        .par_iter()
        .map(|descriptor| generate_wrapper(descriptor, config))
        .collect();

    let mut ancestor = generate_ancestor(config);
    ancestor.companion = companion_factories(registry, config);

    info!(
        wrappers = wrappers.len(),
        factories = ancestor.companion.len(),
        "Generated declarations"
    );

    let output = GeneratedOutput {
        ancestor,
        builtin_wrappers: generate_builtin_wrappers(config),
        wrappers,
    };
    check_class_names(&output)?;
    Ok(output)
}

fn check_class_names(output: &GeneratedOutput) -> Result<(), GeneratorError> {
    let mut seen: HashMap<&str, &GeneratedClassDescriptor> = HashMap::new();
    for class in output.classes() {
        if let Some(first) = seen.insert(class.name.as_str(), class) {
            return Err(GeneratorError::ClassNameCollision {
                name: class.name.clone(),
                first: first.constructor.parameter.type_ref.to_string(),
                second: class.constructor.parameter.type_ref.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{descriptor, other_descriptor};
    use paramwrap_define::{ParamDeclaration, SuperKind, TypeRef};

    #[test]
    fn wrappers_follow_registry_order() {
        let mut registry = SchemaRegistry::new();
        for (key, ty) in [("z", "ZParam"), ("a", "AParam"), ("m", "MParam"), ("z", "Z2Param")] {
            registry.register(descriptor(key, ty)).unwrap();
        }

        let output = generate(&registry, &GeneratorConfig::default()).unwrap();
        let names: Vec<_> = output.wrappers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["RxHttp_Z2Param", "RxHttp_AParam", "RxHttp_MParam"]);
    }

    #[test]
    fn classes_come_in_emission_order() {
        let mut registry = SchemaRegistry::new();
        registry.register(descriptor("upload", "UploadParam")).unwrap();

        let output = generate(&registry, &GeneratorConfig::default()).unwrap();
        let names: Vec<_> = output.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "RxHttp",
                "RxHttp_NoBodyParam",
                "RxHttp_FormParam",
                "RxHttp_JsonParam",
                "RxHttp_JsonArrayParam",
                "RxHttp_UploadParam",
            ]
        );
        assert_eq!(output.ancestor.companion.len(), 19);
        assert!(output.wrapper("RxHttp_UploadParam").is_some());
    }

    #[test]
    fn same_simple_name_in_two_packages_collides() {
        let mut registry = SchemaRegistry::new();
        for (key, package) in [("a", "com.a"), ("b", "com.b")] {
            let decl = ParamDeclaration::new(key, TypeRef::class(package, "UploadParam"), SuperKind::Other);
            registry.register(ParamDescriptor::from_declaration(decl)).unwrap();
        }

        match generate(&registry, &GeneratorConfig::default()) {
            Err(GeneratorError::ClassNameCollision { name, first, second }) => {
                assert_eq!(name, "RxHttp_UploadParam");
                assert_eq!(first, "com.a.UploadParam");
                assert_eq!(second, "com.b.UploadParam");
            }
            other => panic!("unexpected result: {:?}", other.map(|o| o.wrappers.len())),
        }
    }

    #[test]
    fn wrapper_named_like_builtin_family_collides() {
        let mut registry = SchemaRegistry::new();
        registry.register(other_descriptor("custom", "FormParam")).unwrap();

        let err = generate(&registry, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(
            &err,
            GeneratorError::ClassNameCollision { name, first, second }
                if name == "RxHttp_FormParam"
                    && first == "rxhttp.wrapper.param.FormParam"
                    && second == "com.example.FormParam"
        ));
        assert!(err.to_string().contains("com.example.FormParam"));
    }
}
