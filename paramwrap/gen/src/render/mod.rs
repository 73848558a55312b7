//! Kotlin rendering of generated declarations.
//!
//! Each [`GeneratedClassDescriptor`] becomes one self-contained Kotlin file:
//!
//! ```text
//! // This code was automatically generated by paramwrap-gen. Do not edit manually.
//! package rxhttp.wrapper.param
//!
//! import com.example.UploadParam
//! import java.io.File
//!
//! /**
//!  * Fluent wrapper for [UploadParam], created by the `upload` factory.
//!  */
//! open class RxHttp_UploadParam(param: UploadParam) : RxHttp_FormParam(param) {
//!
//!     fun addFile(file: File): RxHttp_UploadParam {
//!         (param as UploadParam).addFile(file)
//!         return this
//!     }
//! }
//! ```

pub mod imports;
pub mod writer;

use std::borrow::Cow;

use paramwrap_define::{Parameter, TypeRef};

use crate::ir::{
    Argument, BodyKind, ClassModifier, FactoryBody, FactoryDescriptor, ForwardCall, ForwardTarget,
    GeneratedClassDescriptor, GeneratedMethodDescriptor, SelfBinding, TypeParam,
};
pub use imports::ImportScope;
pub use writer::CodeWriter;

/// First line of every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by paramwrap-gen. Do not edit manually.";

/// Argument list every URL factory passes to the private `format` helper.
const FORMAT_CALL: &str = "format(url, *formatArgs)";

const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Back-quotes an identifier that is a Kotlin hard keyword.
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if HARD_KEYWORDS.contains(&name) {
        Cow::Owned(format!("`{}`", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Escapes every segment of a dotted name.
pub fn escape_path(path: &str) -> String {
    path.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// Renders one class as a complete Kotlin file in `package`.
pub fn render_class(class: &GeneratedClassDescriptor, package: &str) -> String {
    let mut scope = ImportScope::new(package);
    collect_class(&mut scope, class, package);

    let mut w = CodeWriter::new();
    w.line(GENERATED_NOTICE);
    if !package.is_empty() {
        w.line(format!("package {}", escape_path(package)));
    }
    w.blank();

    let imports = scope.imports();
    if !imports.is_empty() {
        for import in &imports {
            w.line(format!("import {}", import));
        }
        w.blank();
    }

    ClassRenderer {
        scope: &scope,
        class,
    }
    .render(&mut w);
    w.finish()
}

fn collect_class(scope: &mut ImportScope, class: &GeneratedClassDescriptor, package: &str) {
    scope.collect(&TypeRef::class(package, class.name.as_str()));

    for param in &class.type_params {
        collect_type_param(scope, param);
    }
    if let Some(base) = &class.base {
        scope.collect(base);
    }
    scope.collect(&class.constructor.parameter.type_ref);
    match &class.self_binding {
        SelfBinding::Declare(ty) | SelfBinding::Override(ty) => scope.collect(ty),
        SelfBinding::Inherited => {}
    }

    for method in &class.methods {
        for param in &method.type_params {
            collect_type_param(scope, param);
        }
        collect_parameters(scope, &method.parameters);
        scope.collect(&method.returns);
        match &method.call.target {
            ForwardTarget::Downcast { to, .. } => scope.collect(to),
            ForwardTarget::Field(_) | ForwardTarget::Receiver => {}
        }
        for arg in &method.call.args {
            if let Argument::Constant { owner, .. } = arg {
                scope.collect(owner);
            }
        }
    }

    if !class.companion.is_empty() {
        scope.collect(&TypeRef::kotlin("String"));
        scope.collect(&TypeRef::kotlin("Any"));
    }
    for factory in &class.companion {
        collect_parameters(scope, &factory.parameters);
        scope.collect(&factory.returns);
        match &factory.body {
            FactoryBody::Verb {
                param_class,
                wrapper,
                ..
            } => {
                scope.collect(param_class);
                scope.collect(wrapper);
            }
            FactoryBody::Custom { wrapped, wrapper } => {
                scope.collect(wrapped);
                scope.collect(wrapper);
            }
            FactoryBody::With { wrapper, .. } => scope.collect(wrapper),
        }
    }
}

fn collect_type_param(scope: &mut ImportScope, param: &TypeParam) {
    scope.reserve(param.name.clone());
    if let Some(bound) = &param.bound {
        scope.collect(bound);
    }
}

fn collect_parameters(scope: &mut ImportScope, parameters: &[Parameter]) {
    for param in parameters {
        scope.collect(&param.type_ref);
    }
}

struct ClassRenderer<'a> {
    scope: &'a ImportScope,
    class: &'a GeneratedClassDescriptor,
}

impl ClassRenderer<'_> {
    /// Expression a chain method returns.
    fn receiver(&self) -> &'static str {
        match self.class.self_binding {
            SelfBinding::Declare(_) => "self",
            SelfBinding::Override(_) | SelfBinding::Inherited => "this",
        }
    }

    fn render(&self, w: &mut CodeWriter) {
        if let Some(docs) = &self.class.docs {
            w.kdoc(docs);
        }
        w.block(self.header(), |w| {
            match &self.class.self_binding {
                SelfBinding::Declare(ty) => {
                    w.blank();
                    w.line(format!("protected abstract val self: {}", self.scope.render(ty)));
                }
                SelfBinding::Override(ty) => {
                    w.blank();
                    w.line(format!("override val self: {}", self.scope.render(ty)));
                    w.indent();
                    w.line("get() = this");
                    w.dedent();
                }
                SelfBinding::Inherited => {}
            }

            for method in &self.class.methods {
                w.blank();
                self.render_method(w, method);
            }

            if !self.class.companion.is_empty() {
                w.blank();
                w.block("companion object", |w| self.render_companion(w));
            }
        });
    }

    fn header(&self) -> String {
        let class = self.class;
        let keyword = match class.modifier {
            ClassModifier::Open => "open class",
            ClassModifier::Abstract => "abstract class",
        };

        let ctor = &class.constructor;
        let ctor_param = format!(
            "{}{}: {}",
            if ctor.is_property { "val " } else { "" },
            escape_identifier(&ctor.parameter.name),
            self.scope.render(&ctor.parameter.type_ref)
        );

        let mut header = format!(
            "{} {}{}({})",
            keyword,
            escape_identifier(&class.name),
            self.type_params(&class.type_params),
            ctor_param
        );
        if let Some(base) = &class.base {
            let super_arg = if ctor.calls_super {
                escape_identifier(&ctor.parameter.name).into_owned()
            } else {
                String::new()
            };
            header.push_str(&format!(" : {}({})", self.scope.render(base), super_arg));
        }
        header
    }

    fn type_params(&self, params: &[TypeParam]) -> String {
        if params.is_empty() {
            return String::new();
        }
        let rendered: Vec<_> = params
            .iter()
            .map(|p| match &p.bound {
                Some(bound) => format!("{} : {}", escape_identifier(&p.name), self.scope.render(bound)),
                None => escape_identifier(&p.name).into_owned(),
            })
            .collect();
        format!("<{}>", rendered.join(", "))
    }

    fn parameters(&self, parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(|p| {
                format!(
                    "{}{}: {}",
                    if p.vararg { "vararg " } else { "" },
                    escape_identifier(&p.name),
                    self.scope.render(&p.type_ref)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn call(&self, call: &ForwardCall) -> String {
        let target = match &call.target {
            ForwardTarget::Field(field) => format!("{}.", escape_identifier(field)),
            ForwardTarget::Downcast { field, to } => {
                format!("({} as {}).", escape_identifier(field), self.scope.render(to))
            }
            ForwardTarget::Receiver => String::new(),
        };
        let args: Vec<_> = call
            .args
            .iter()
            .map(|arg| match arg {
                Argument::Forward { name, spread: true } => format!("*{}", escape_identifier(name)),
                Argument::Forward { name, spread: false } => escape_identifier(name).into_owned(),
                Argument::Constant { owner, name } => {
                    format!("{}.{}", self.scope.render(owner), escape_identifier(name))
                }
                Argument::Expr(expr) => expr.clone(),
            })
            .collect();
        format!("{}{}({})", target, escape_identifier(&call.method), args.join(", "))
    }

    fn render_method(&self, w: &mut CodeWriter, method: &GeneratedMethodDescriptor) {
        if let Some(docs) = &method.docs {
            w.kdoc(docs);
        }
        if let Some(deprecation) = &method.deprecation {
            let mut replace_with = vec![quote(&deprecation.replace_with)];
            replace_with.extend(deprecation.imports.iter().map(String::as_str).map(quote));
            w.line("@Deprecated(");
            w.indent();
            w.line(format!("{},", quote(&deprecation.message)));
            w.line(format!("ReplaceWith({}),", replace_with.join(", ")));
            w.dedent();
            w.line(")");
        }

        let type_params = self.type_params(&method.type_params);
        let returns = if method.returns.is_unit() {
            String::new()
        } else {
            format!(": {}", self.scope.render(&method.returns))
        };
        let signature = format!(
            "fun {}{}{}({}){}",
            type_params,
            if type_params.is_empty() { "" } else { " " },
            escape_identifier(&method.name),
            self.parameters(&method.parameters),
            returns
        );

        let call = self.call(&method.call);
        let statement = match &method.guard {
            Some(flag) => format!("if ({}) {}", escape_identifier(flag), call),
            None => call.clone(),
        };

        w.block(signature, |w| match method.body_kind {
            BodyKind::ForwardAndReturnSelf => {
                w.line(statement);
                w.line(format!("return {}", self.receiver()));
            }
            BodyKind::ForwardOnly => w.line(statement),
            // a guard cannot apply to an expression whose value is returned
            BodyKind::ForwardAndReturnValue => w.line(format!("return {}", call)),
        });
    }

    fn factory_expr(&self, body: &FactoryBody) -> String {
        match body {
            FactoryBody::Verb {
                param_class,
                verb,
                wrapper,
                ..
            } => format!(
                "{}({}.{}({}))",
                self.scope.render(wrapper),
                self.scope.render(param_class),
                escape_identifier(verb),
                FORMAT_CALL
            ),
            FactoryBody::Custom { wrapped, wrapper } => format!(
                "{}({}({}))",
                self.scope.render(wrapper),
                self.scope.render(wrapped),
                FORMAT_CALL
            ),
            FactoryBody::With {
                parameter, wrapper, ..
            } => format!(
                "{}({})",
                self.scope.render(wrapper),
                escape_identifier(parameter)
            ),
        }
    }

    fn render_factory(&self, w: &mut CodeWriter, factory: &FactoryDescriptor) {
        w.line("@JvmStatic");
        w.line(format!(
            "fun {}({}): {} =",
            escape_identifier(&factory.name),
            self.parameters(&factory.parameters),
            self.scope.render(&factory.returns)
        ));
        w.indent();
        w.line(self.factory_expr(&factory.body));
        w.dedent();
    }

    fn render_companion(&self, w: &mut CodeWriter) {
        for (i, factory) in self.class.companion.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            self.render_factory(w, factory);
        }

        let string = self.scope.render(&TypeRef::kotlin("String"));
        let any = self.scope.render(&TypeRef::kotlin("Any"));
        w.blank();
        w.line(format!(
            "private fun format(url: {}, vararg formatArgs: {}): {} =",
            string, any, string
        ));
        w.indent();
        w.line("if (formatArgs.isEmpty()) url else url.format(*formatArgs)");
        w.dedent();
    }
}

/// A Kotlin string literal.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
