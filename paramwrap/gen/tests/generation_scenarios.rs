//! Generation scenarios driven through the public API.
//!
//! Each test builds a registry from declarations, runs generation and checks
//! both the declaration tree and the rendered Kotlin.

use paramwrap_define::{MemberDescriptor, ParamDeclaration, Parameter, SuperKind, TypeRef};
use paramwrap_gen::codegen::generate;
use paramwrap_gen::config::GeneratorConfig;
use paramwrap_gen::errors::GeneratorError;
use paramwrap_gen::ir::{Argument, BodyKind, FactoryBody, ForwardTarget};
use paramwrap_gen::output::{MemoryEmitter, generate_and_emit};
use paramwrap_gen::registry::SchemaRegistry;
use paramwrap_gen::render::render_class;

fn wrapper_config() -> GeneratorConfig {
    GeneratorConfig {
        ancestor: "Wrapper".to_string(),
        class_prefix: "Wrapper_".to_string(),
        ..Default::default()
    }
}

fn upload() -> TypeRef {
    TypeRef::class("com.example", "UploadParam")
}

fn file() -> TypeRef {
    TypeRef::class("java.io", "File")
}

fn upload_declaration() -> ParamDeclaration {
    ParamDeclaration::new("upload", upload(), SuperKind::Form)
        .with_member(
            MemberDescriptor::method("addFile")
                .with_param(Parameter::new("file", file()))
                .returning(upload()),
        )
        .with_member(
            MemberDescriptor::method("setTag")
                .with_param(Parameter::new("tag", TypeRef::kotlin("String"))),
        )
}

fn plain(key: &str, simple: &str) -> ParamDeclaration {
    ParamDeclaration::new(key, TypeRef::class("com.example", simple), SuperKind::Other)
}

#[test]
fn upload_param_extends_form_wrapper() {
    let config = wrapper_config();
    let registry = SchemaRegistry::from_declarations([upload_declaration()]).unwrap();
    let output = generate(&registry, &config).unwrap();

    let class = output.wrapper("Wrapper_UploadParam").unwrap();
    assert_eq!(
        class.base.as_ref().and_then(TypeRef::simple_name),
        Some("Wrapper_FormParam")
    );

    let add_file = class.method("addFile").unwrap();
    assert_eq!(add_file.body_kind, BodyKind::ForwardAndReturnSelf);
    assert_eq!(add_file.returns.simple_name(), Some("Wrapper_UploadParam"));
    assert!(matches!(
        &add_file.call.target,
        ForwardTarget::Downcast { field, to } if field == "param" && *to == upload()
    ));

    let set_tag = class.method("setTag").unwrap();
    assert_eq!(set_tag.body_kind, BodyKind::ForwardOnly);

    let source = render_class(class, &config.package);
    assert!(source.contains("open class Wrapper_UploadParam(param: UploadParam) : Wrapper_FormParam(param) {"));
    assert!(source.contains(
        "    fun addFile(file: File): Wrapper_UploadParam {\n        (param as UploadParam).addFile(file)\n        return this\n    }"
    ));
    assert!(source.contains(
        "    fun setTag(tag: String) {\n        (param as UploadParam).setTag(tag)\n    }"
    ));
}

#[test]
fn chain_method_can_be_called_twice() {
    let config = wrapper_config();
    let registry = SchemaRegistry::from_declarations([upload_declaration()]).unwrap();
    let output = generate(&registry, &config).unwrap();
    let add_file = output.wrapper("Wrapper_UploadParam").unwrap().method("addFile").unwrap();

    // the return type is the wrapper, so addFile(a).addFile(b) stays on the wrapper
    let wrapper = config.generated_type("Wrapper_UploadParam");
    assert_eq!(add_file.returns, wrapper);
    assert_eq!(add_file.call.args, vec![Argument::forward("file")]);
}

#[test]
fn void_method_has_one_call_and_no_return() {
    let config = wrapper_config();
    let registry = SchemaRegistry::from_declarations([upload_declaration()]).unwrap();
    let output = generate(&registry, &config).unwrap();
    let source = render_class(output.wrapper("Wrapper_UploadParam").unwrap(), &config.package);

    let body_start = source.find("fun setTag").unwrap();
    let body = &source[body_start..];
    let body = &body[..body.find("\n    }").unwrap()];
    assert_eq!(body.matches("setTag(tag)").count(), 1);
    assert!(!body.contains("return"));
}

#[test]
fn single_vararg_is_spread_in_call() {
    let sign = TypeRef::class("com.example", "SignParam");
    let decl = ParamDeclaration::new("sign", sign.clone(), SuperKind::Other).with_member(
        MemberDescriptor::method("sign")
            .with_param(Parameter::vararg("secrets", TypeRef::kotlin("String")))
            .returning(sign),
    );
    let config = GeneratorConfig::default();
    let registry = SchemaRegistry::from_declarations([decl]).unwrap();
    let output = generate(&registry, &config).unwrap();
    let source = render_class(&output.wrappers[0], &config.package);

    assert!(source.contains(
        "    fun sign(vararg secrets: String): RxHttp_SignParam {\n        param.sign(*secrets)\n        return this\n    }"
    ));
}

#[test]
fn only_trailing_vararg_position_is_spread() {
    let decl = upload_declaration().with_member(
        MemberDescriptor::method("addFiles")
            .with_param(Parameter::new("key", TypeRef::kotlin("String")))
            .with_param(Parameter::vararg("files", file()))
            .returning(upload()),
    );
    let config = wrapper_config();
    let registry = SchemaRegistry::from_declarations([decl]).unwrap();
    let output = generate(&registry, &config).unwrap();
    let source = render_class(&output.wrappers[0], &config.package);

    assert!(source.contains("    fun addFiles(key: String, vararg files: File): Wrapper_UploadParam {"));
    assert!(source.contains("        (param as UploadParam).addFiles(key, *files)\n"));
}

#[test]
fn post_json_factory_ignores_registry_contents() {
    let config = GeneratorConfig::default();
    let empty = generate(&SchemaRegistry::new(), &config).unwrap();
    let populated = generate(
        &SchemaRegistry::from_declarations([plain("postJson", "ShadowParam"), upload_declaration()]).unwrap(),
        &config,
    )
    .unwrap();

    for output in [&empty, &populated] {
        let post_json = output
            .ancestor
            .companion
            .iter()
            .find(|f| matches!(f.body, FactoryBody::Verb { .. }) && f.name == "postJson")
            .unwrap();
        match &post_json.body {
            FactoryBody::Verb {
                param_class, verb, ..
            } => {
                assert_eq!(param_class.simple_name(), Some("JsonParam"));
                assert_eq!(verb, "postJson");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    let source = render_class(&populated.ancestor, &config.package);
    assert!(source.contains("RxHttp_JsonParam(JsonParam.postJson(format(url, *formatArgs)))"));
}

#[test]
fn companion_order_is_verbs_then_registry_then_with() {
    let config = GeneratorConfig::default();
    let registry = SchemaRegistry::from_declarations([plain("a", "AParam"), plain("b", "BParam")]).unwrap();
    let output = generate(&registry, &config).unwrap();

    let names: Vec<_> = output.ancestor.companion.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "get",
            "head",
            "postForm",
            "putForm",
            "patchForm",
            "deleteForm",
            "postJson",
            "putJson",
            "patchJson",
            "deleteJson",
            "postJsonArray",
            "putJsonArray",
            "patchJsonArray",
            "deleteJsonArray",
            "a",
            "b",
            "with",
            "with",
            "with",
            "with",
        ]
    );

    let source = render_class(&output.ancestor, &config.package);
    let a = source.find("fun a(").unwrap();
    let b = source.find("fun b(").unwrap();
    let last_verb = source.find("fun deleteJsonArray(").unwrap();
    let first_with = source.find("fun with(").unwrap();
    assert!(last_verb < a && a < b && b < first_with);
}

#[test]
fn duplicate_key_keeps_first_position_with_last_class() {
    let registry = SchemaRegistry::from_declarations([
        plain("a", "FirstParam"),
        plain("b", "MiddleParam"),
        plain("a", "LastParam"),
    ])
    .unwrap();
    let output = generate(&registry, &GeneratorConfig::default()).unwrap();

    let wrappers: Vec<_> = output.wrappers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(wrappers, ["RxHttp_LastParam", "RxHttp_MiddleParam"]);
    let customs: Vec<_> = output.ancestor.companion[14..16]
        .iter()
        .map(|f| (f.name.as_str(), f.returns.simple_name()))
        .collect();
    assert_eq!(
        customs,
        [("a", Some("RxHttp_LastParam")), ("b", Some("RxHttp_MiddleParam"))]
    );
}

#[test]
fn empty_key_aborts_the_run() {
    let result = SchemaRegistry::from_declarations([upload_declaration(), plain("", "BrokenParam")]);

    match result {
        Err(err @ GeneratorError::InvalidSchema { .. }) => {
            assert!(err.to_string().contains("com.example.BrokenParam"))
        }
        other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn colliding_wrapper_names_emit_nothing() {
    let registry = SchemaRegistry::from_declarations([
        ParamDeclaration::new("a", TypeRef::class("com.a", "UploadParam"), SuperKind::Other),
        ParamDeclaration::new("b", TypeRef::class("com.b", "UploadParam"), SuperKind::Other),
    ])
    .unwrap();
    let mut emitter = MemoryEmitter::new();

    let result = generate_and_emit(&registry, &GeneratorConfig::default(), &mut emitter);

    assert!(matches!(result, Err(GeneratorError::ClassNameCollision { .. })));
    assert!(emitter.units.is_empty());
}

#[test]
fn wrapped_class_shadowing_builtin_family_is_rejected() {
    let registry = SchemaRegistry::from_declarations([plain("custom", "FormParam")]).unwrap();
    let mut emitter = MemoryEmitter::new();

    match generate_and_emit(&registry, &GeneratorConfig::default(), &mut emitter) {
        Err(err @ GeneratorError::ClassNameCollision { .. }) => {
            let message = err.to_string();
            assert!(message.contains("RxHttp_FormParam"));
            assert!(message.contains("rxhttp.wrapper.param.FormParam"));
            assert!(message.contains("com.example.FormParam"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(emitter.units.is_empty());
}

#[test]
fn key_that_is_not_an_identifier_aborts_the_run() {
    for key in ["my key", "a-b"] {
        let result = SchemaRegistry::from_declarations([plain(key, "SpacedParam")]);
        assert!(matches!(
            result,
            Err(GeneratorError::InvalidSchema { key: ref rejected, .. }) if rejected == key
        ));
    }
}

#[test]
fn every_unit_is_emitted_once() {
    let registry = SchemaRegistry::from_declarations([upload_declaration(), plain("sign", "SignParam")]).unwrap();
    let mut emitter = MemoryEmitter::new();
    generate_and_emit(&registry, &wrapper_config(), &mut emitter).unwrap();

    let names: Vec<_> = emitter.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Wrapper",
            "Wrapper_NoBodyParam",
            "Wrapper_FormParam",
            "Wrapper_JsonParam",
            "Wrapper_JsonArrayParam",
            "Wrapper_UploadParam",
            "Wrapper_SignParam",
        ]
    );
    let sign = emitter.get("Wrapper_SignParam").unwrap();
    assert!(sign.source.contains(
        "open class Wrapper_SignParam(param: SignParam) : Wrapper<SignParam, Wrapper_SignParam>(param) {"
    ));
}
