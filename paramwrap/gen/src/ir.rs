//! Intermediate declaration tree.
//!
//! Code generation builds these descriptors first and renders them in a
//! separate step (see [`crate::render`]), so the forwarding decisions can be
//! inspected and tested without looking at output syntax.

use paramwrap_define::{BuiltinFamily, Parameter, TypeRef};

/// Whether a class may be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassModifier {
    Open,
    Abstract,
}

/// A type parameter with an optional upper bound, e.g. `R : RxHttp<P, R>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub bound: Option<TypeRef>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }

    pub fn bounded(name: impl Into<String>, bound: TypeRef) -> Self {
        Self {
            name: name.into(),
            bound: Some(bound),
        }
    }
}

/// The single constructor every generated class carries.
///
/// It takes the wrapped instance and, unless the class is the root of the
/// hierarchy, hands it to the superclass constructor unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDescriptor {
    pub parameter: Parameter,
    /// Declares the parameter as a `val` property (root class only).
    pub is_property: bool,
    /// Forwards the parameter to the superclass constructor.
    pub calls_super: bool,
}

/// How a class relates to the ancestor's `self` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfBinding {
    /// Declares `protected abstract val self: <type>` (the ancestor).
    Declare(TypeRef),
    /// Closes the generic with `override val self: <type> get() = this`.
    Override(TypeRef),
    /// Keeps the binding of a generated superclass.
    Inherited,
}

/// Shape of a forwarding method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Issue the forward call, discard its result, return the receiver.
    ForwardAndReturnSelf,
    /// Issue the forward call as a statement, return nothing.
    ForwardOnly,
    /// Return the forward call's result unchanged.
    ForwardAndReturnValue,
}

/// Expression the forward call is issued on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardTarget {
    /// The held field, used as declared: `param.m(...)`.
    Field(String),
    /// The held field downcast to the wrapped type: `(param as T).m(...)`.
    Downcast { field: String, to: TypeRef },
    /// The receiver itself: `m(...)`.
    Receiver,
}

/// One argument of a forward call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A parameter passed through by name, spread when `spread` is set.
    Forward { name: String, spread: bool },
    /// A constant on a class, e.g. `Param.DATA_DECRYPT`.
    Constant { owner: TypeRef, name: String },
    /// An expression written out verbatim.
    Expr(String),
}

impl Argument {
    pub fn forward(name: impl Into<String>) -> Self {
        Self::Forward {
            name: name.into(),
            spread: false,
        }
    }
}

/// A call on the forward target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardCall {
    pub target: ForwardTarget,
    pub method: String,
    pub args: Vec<Argument>,
}

/// `@Deprecated` metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub message: String,
    pub replace_with: String,
    pub imports: Vec<String>,
}

/// A generated method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMethodDescriptor {
    pub name: String,
    pub docs: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub type_params: Vec<TypeParam>,
    /// Structural copy of the forwarded signature.
    pub parameters: Vec<Parameter>,
    pub returns: TypeRef,
    pub body_kind: BodyKind,
    pub call: ForwardCall,
    /// Boolean parameter that must be true for the call to run.
    pub guard: Option<String>,
}

/// Expression a companion factory returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryBody {
    /// `Wrapper(FamilyParam.verb(format(url, *formatArgs)))`
    Verb {
        family: BuiltinFamily,
        param_class: TypeRef,
        verb: String,
        wrapper: TypeRef,
    },
    /// `Wrapper(Wrapped(format(url, *formatArgs)))`
    Custom { wrapped: TypeRef, wrapper: TypeRef },
    /// `Wrapper(instance)`
    With {
        family: BuiltinFamily,
        parameter: String,
        wrapper: TypeRef,
    },
}

/// A static factory on the ancestor's companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDescriptor {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub returns: TypeRef,
    pub body: FactoryBody,
}

/// A generated class, destined for one output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClassDescriptor {
    pub name: String,
    pub docs: Option<String>,
    pub modifier: ClassModifier,
    pub type_params: Vec<TypeParam>,
    /// Superclass; `None` for the root of the hierarchy.
    pub base: Option<TypeRef>,
    pub constructor: ConstructorDescriptor,
    pub self_binding: SelfBinding,
    pub methods: Vec<GeneratedMethodDescriptor>,
    /// Companion factories, in declaration order.
    pub companion: Vec<FactoryDescriptor>,
}

impl GeneratedClassDescriptor {
    /// Looks up methods by name; overloads come back in declaration order.
    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a GeneratedMethodDescriptor> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// The first method with the given name.
    pub fn method(&self, name: &str) -> Option<&GeneratedMethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Everything one generation run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// The generic ancestor with the chain API and the companion factories.
    pub ancestor: GeneratedClassDescriptor,
    /// One wrapper per builtin family.
    pub builtin_wrappers: Vec<GeneratedClassDescriptor>,
    /// One wrapper per registry entry, in registry order.
    pub wrappers: Vec<GeneratedClassDescriptor>,
}

impl GeneratedOutput {
    /// All classes in emission order: ancestor, builtin wrappers, wrappers.
    pub fn classes(&self) -> impl Iterator<Item = &GeneratedClassDescriptor> + '_ {
        std::iter::once(&self.ancestor)
            .chain(self.builtin_wrappers.iter())
            .chain(self.wrappers.iter())
    }

    pub fn wrapper(&self, name: &str) -> Option<&GeneratedClassDescriptor> {
        self.wrappers.iter().find(|c| c.name == name)
    }
}
