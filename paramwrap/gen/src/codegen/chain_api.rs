//! The generic ancestor and its shared chain API.
//!
//! Every generated wrapper inherits from
//!
//! ```text
//! abstract class RxHttp<P : Param<P>, R : RxHttp<P, R>>(val param: P)
//! ```
//!
//! which carries a fixed catalog of fluent methods. Mutators act on `param`
//! and return `self`, the receiver typed as `R`; accessors return the
//! param's result unchanged. The catalog is emitted once, here, and never
//! per descriptor.

use paramwrap_define::{Parameter, TypeRef};

use super::PARAM_FIELD;
use super::forwarding::forward_arguments;
use crate::config::GeneratorConfig;
use crate::ir::{
    Argument, BodyKind, ClassModifier, ConstructorDescriptor, Deprecation, ForwardCall,
    ForwardTarget, GeneratedClassDescriptor, GeneratedMethodDescriptor, SelfBinding, TypeParam,
};

const WRAPPED_VAR: &str = "P";
const SELF_VAR: &str = "R";

fn string() -> TypeRef {
    TypeRef::kotlin("String")
}

fn boolean() -> TypeRef {
    TypeRef::kotlin("Boolean")
}

fn long() -> TypeRef {
    TypeRef::kotlin("Long")
}

fn param(name: &str, type_ref: TypeRef) -> Parameter {
    Parameter::new(name, type_ref)
}

/// A method that mutates `param` and returns the receiver.
fn mutator(name: &str, parameters: Vec<Parameter>, self_type: &TypeRef) -> GeneratedMethodDescriptor {
    let args = forward_arguments(&parameters);
    GeneratedMethodDescriptor {
        name: name.to_string(),
        docs: None,
        deprecation: None,
        type_params: Vec::new(),
        parameters,
        returns: self_type.clone(),
        body_kind: BodyKind::ForwardAndReturnSelf,
        call: ForwardCall {
            target: ForwardTarget::Field(PARAM_FIELD.to_string()),
            method: name.to_string(),
            args,
        },
        guard: None,
    }
}

/// A mutator that only runs when the boolean parameter `flag` is true.
fn conditional(
    name: &str,
    parameters: Vec<Parameter>,
    flag: &str,
    self_type: &TypeRef,
) -> GeneratedMethodDescriptor {
    let mut method = mutator(name, parameters, self_type);
    method
        .call
        .args
        .retain(|arg| !matches!(arg, Argument::Forward { name, .. } if name == flag));
    method.guard = Some(flag.to_string());
    method
}

/// A method returning the param's result unchanged.
fn accessor(name: &str, parameters: Vec<Parameter>, returns: TypeRef) -> GeneratedMethodDescriptor {
    let args = forward_arguments(&parameters);
    GeneratedMethodDescriptor {
        name: name.to_string(),
        docs: None,
        deprecation: None,
        type_params: Vec::new(),
        parameters,
        returns,
        body_kind: BodyKind::ForwardAndReturnValue,
        call: ForwardCall {
            target: ForwardTarget::Field(PARAM_FIELD.to_string()),
            method: name.to_string(),
            args,
        },
        guard: None,
    }
}

/// The chain-API catalog in declaration order.
pub fn catalog(config: &GeneratorConfig) -> Vec<GeneratedMethodDescriptor> {
    let r = TypeRef::variable(SELF_VAR);
    let headers_builder = TypeRef::nested("okhttp3", &["Headers", "Builder"]);

    let mut assembly = mutator("setAssemblyEnabled", vec![param("enabled", boolean())], &r);
    assembly.docs = Some(
        "Sets whether this request runs the common parameter assembly\n\
         registered through [setOnParamAssembly]. Enabled by default."
            .to_string(),
    );

    let mut converter = GeneratedMethodDescriptor {
        body_kind: BodyKind::ForwardAndReturnValue,
        call: ForwardCall {
            target: ForwardTarget::Receiver,
            method: "setDecoderEnabled".to_string(),
            args: vec![Argument::forward("enabled")],
        },
        ..mutator("setConverterEnabled", vec![param("enabled", boolean())], &r)
    };
    converter.docs = Some("@deprecated please use [setDecoderEnabled] instead".to_string());
    converter.deprecation = Some(Deprecation {
        message: "please use [setDecoderEnabled] instead".to_string(),
        replace_with: "setDecoderEnabled(enabled)".to_string(),
        imports: vec![format!("{}.setDecoderEnabled", config.ancestor)],
    });

    let mut decoder = mutator("setDecoderEnabled", vec![param("enabled", boolean())], &r);
    decoder.call.method = "addHeader".to_string();
    decoder.call.args = vec![
        Argument::Constant {
            owner: config.param_type(),
            name: "DATA_DECRYPT".to_string(),
        },
        Argument::Expr("enabled.toString()".to_string()),
    ];
    decoder.docs = Some(
        "Sets whether the response of this request is passed through the\n\
         result decoder registered through [setResultDecoder]. Enabled by default."
            .to_string(),
    );

    let t = TypeRef::variable("T");
    let mut typed_tag = mutator(
        "tag",
        vec![
            param(
                "type",
                TypeRef::class("java.lang", "Class").with_args(vec![TypeRef::consumer_of(t.clone())]),
            ),
            param("tag", t.nullable()),
        ],
        &r,
    );
    typed_tag.type_params = vec![TypeParam::new("T")];

    vec![
        mutator("setUrl", vec![param("url", string())], &r),
        mutator("addHeader", vec![param("line", string())], &r),
        conditional(
            "addHeader",
            vec![param("line", string()), param("isAdd", boolean())],
            "isAdd",
            &r,
        ),
        mutator("addHeader", vec![param("key", string()), param("value", string())], &r),
        conditional(
            "addHeader",
            vec![
                param("key", string()),
                param("value", string()),
                param("isAdd", boolean()),
            ],
            "isAdd",
            &r,
        ),
        mutator("setHeader", vec![param("key", string()), param("value", string())], &r),
        mutator("setRangeHeader", vec![param("startIndex", long())], &r),
        mutator(
            "setRangeHeader",
            vec![param("startIndex", long()), param("endIndex", long())],
            &r,
        ),
        mutator("removeAllHeader", vec![param("key", string())], &r),
        mutator("setHeadersBuilder", vec![param("builder", headers_builder.clone())], &r),
        assembly,
        converter,
        decoder,
        accessor("isAssemblyEnabled", vec![], boolean()),
        accessor("getUrl", vec![], string()),
        accessor("getSimpleUrl", vec![], string()),
        accessor("getHeader", vec![param("key", string())], string().nullable()),
        accessor("getHeaders", vec![], TypeRef::class("okhttp3", "Headers")),
        accessor("getHeadersBuilder", vec![], headers_builder),
        accessor("buildRequest", vec![], TypeRef::class("okhttp3", "Request")),
        mutator("tag", vec![param("tag", TypeRef::kotlin("Any").nullable())], &r),
        typed_tag,
        mutator(
            "cacheControl",
            vec![param("cacheControl", TypeRef::class("okhttp3", "CacheControl"))],
            &r,
        ),
        mutator("setCacheKey", vec![param("cacheKey", string())], &r),
        mutator("setCacheValidTime", vec![param("cacheValidTime", long())], &r),
        mutator(
            "setCacheMode",
            vec![param(
                "cacheMode",
                TypeRef::class("rxhttp.wrapper.cahce", "CacheMode"),
            )],
            &r,
        ),
    ]
}

/// Builds the abstract generic ancestor with the catalog attached.
///
/// The companion is left empty; [`super::generate`] fills it once the
/// registry is known.
pub fn generate_ancestor(config: &GeneratorConfig) -> GeneratedClassDescriptor {
    let p = TypeRef::variable(WRAPPED_VAR);
    let r = TypeRef::variable(SELF_VAR);

    GeneratedClassDescriptor {
        name: config.ancestor.clone(),
        docs: Some(format!(
            "Shared fluent API of every generated wrapper; `{}` is the wrapped param type and `{}` the concrete wrapper.",
            WRAPPED_VAR, SELF_VAR
        )),
        modifier: ClassModifier::Abstract,
        type_params: vec![
            TypeParam::bounded(WRAPPED_VAR, config.param_type().with_args(vec![p.clone()])),
            TypeParam::bounded(SELF_VAR, config.ancestor_type(p.clone(), r.clone())),
        ],
        base: None,
        constructor: ConstructorDescriptor {
            parameter: Parameter::new(PARAM_FIELD, p),
            is_property: true,
            calls_super: false,
        },
        self_binding: SelfBinding::Declare(r),
        methods: catalog(config),
        companion: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(methods: &[GeneratedMethodDescriptor]) -> Vec<&str> {
        methods.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn catalog_order_is_fixed() {
        let methods = catalog(&GeneratorConfig::default());
        assert_eq!(
            names(&methods),
            [
                "setUrl",
                "addHeader",
                "addHeader",
                "addHeader",
                "addHeader",
                "setHeader",
                "setRangeHeader",
                "setRangeHeader",
                "removeAllHeader",
                "setHeadersBuilder",
                "setAssemblyEnabled",
                "setConverterEnabled",
                "setDecoderEnabled",
                "isAssemblyEnabled",
                "getUrl",
                "getSimpleUrl",
                "getHeader",
                "getHeaders",
                "getHeadersBuilder",
                "buildRequest",
                "tag",
                "tag",
                "cacheControl",
                "setCacheKey",
                "setCacheValidTime",
                "setCacheMode",
            ]
        );
    }

    #[test]
    fn mutators_return_self_type_and_accessors_pass_through() {
        let methods = catalog(&GeneratorConfig::default());
        for method in &methods {
            match method.body_kind {
                BodyKind::ForwardAndReturnSelf => {
                    assert_eq!(method.returns, TypeRef::variable("R"), "{}", method.name)
                }
                BodyKind::ForwardAndReturnValue if method.name == "setConverterEnabled" => {
                    assert_eq!(method.returns, TypeRef::variable("R"))
                }
                BodyKind::ForwardAndReturnValue => {
                    assert_ne!(method.returns, TypeRef::variable("R"), "{}", method.name)
                }
                BodyKind::ForwardOnly => panic!("catalog has no void methods: {}", method.name),
            }
        }
    }

    #[test]
    fn conditional_add_header_guards_on_flag() {
        let ancestor = generate_ancestor(&GeneratorConfig::default());
        let overloads: Vec<_> = ancestor.methods_named("addHeader").collect();
        assert_eq!(overloads.len(), 4);

        let guarded: Vec<_> = overloads.iter().map(|m| m.guard.as_deref()).collect();
        assert_eq!(guarded, [None, Some("isAdd"), None, Some("isAdd")]);

        let conditional = overloads[3];
        assert_eq!(conditional.parameters.len(), 3);
        assert_eq!(
            conditional.call.args,
            vec![Argument::forward("key"), Argument::forward("value")]
        );
        assert_eq!(conditional.body_kind, BodyKind::ForwardAndReturnSelf);
    }

    #[test]
    fn converter_alias_delegates_to_decoder() {
        let ancestor = generate_ancestor(&GeneratorConfig::default());
        let converter = ancestor.method("setConverterEnabled").unwrap();

        assert_eq!(converter.call.target, ForwardTarget::Receiver);
        assert_eq!(converter.call.method, "setDecoderEnabled");
        let deprecation = converter.deprecation.as_ref().unwrap();
        assert_eq!(deprecation.replace_with, "setDecoderEnabled(enabled)");
        assert_eq!(deprecation.imports, ["RxHttp.setDecoderEnabled"]);
    }

    #[test]
    fn decoder_sets_decrypt_header() {
        let ancestor = generate_ancestor(&GeneratorConfig::default());
        let decoder = ancestor.method("setDecoderEnabled").unwrap();

        assert_eq!(decoder.call.method, "addHeader");
        assert_eq!(
            decoder.call.args,
            vec![
                Argument::Constant {
                    owner: TypeRef::class("rxhttp.wrapper.param", "Param"),
                    name: "DATA_DECRYPT".to_string(),
                },
                Argument::Expr("enabled.toString()".to_string()),
            ]
        );
        assert!(decoder.docs.is_some());
    }

    #[test]
    fn typed_tag_declares_type_variable() {
        let ancestor = generate_ancestor(&GeneratorConfig::default());
        let typed = ancestor.methods_named("tag").nth(1).unwrap();

        assert_eq!(typed.type_params, vec![TypeParam::new("T")]);
        assert_eq!(typed.parameters[0].type_ref.to_string(), "java.lang.Class<in T>");
        assert_eq!(typed.parameters[1].type_ref.to_string(), "T?");
    }

    #[test]
    fn ancestor_is_self_bounded_generic() {
        let config = GeneratorConfig {
            ancestor: "Wrapper".to_string(),
            ..Default::default()
        };
        let ancestor = generate_ancestor(&config);

        assert_eq!(ancestor.name, "Wrapper");
        assert_eq!(ancestor.modifier, ClassModifier::Abstract);
        assert!(ancestor.base.is_none());
        assert_eq!(ancestor.self_binding, SelfBinding::Declare(TypeRef::variable("R")));
        let bounds: Vec<_> = ancestor
            .type_params
            .iter()
            .map(|p| p.bound.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect();
        assert_eq!(
            bounds,
            [
                "rxhttp.wrapper.param.Param<P>",
                "rxhttp.wrapper.param.Wrapper<P, R>"
            ]
        );
        assert!(ancestor.constructor.is_property);
        assert!(!ancestor.constructor.calls_super);
    }
}
