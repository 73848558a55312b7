//! Kotlin type references.
//!
//! A [`TypeRef`] is the structural description of a type as it appears in a
//! member signature of a wrapped param class. Type references are usually
//! written as text in a schema file and parsed with [`str::parse`]:
//!
//! ```
//! use paramwrap_define::TypeRef;
//!
//! let ty: TypeRef = "kotlin.collections.List<java.io.File>?".parse().unwrap();
//! assert_eq!(ty.to_string(), "kotlin.collections.List<java.io.File>?");
//!
//! let unit: TypeRef = "void".parse().unwrap();
//! assert!(unit.is_unit());
//! ```
//!
//! ## Name resolution
//!
//! Qualified names are split into a package (the leading lowercase segments)
//! and one or more class names, so `okhttp3.Headers.Builder` is the nested
//! class `Headers.Builder` in package `okhttp3`. Bare names of Kotlin
//! builtins (`String`, `Long`, `List`, ...) and Java primitives (`int`,
//! `boolean`, ...) resolve into the `kotlin` packages. Any other bare name is
//! kept with an empty package; method type variables are recovered from such
//! names with [`TypeRef::resolve_variables`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeParseError;

const KOTLIN_BUILTINS: &[&str] = &[
    "Any",
    "Array",
    "Boolean",
    "Byte",
    "Char",
    "CharSequence",
    "Comparable",
    "Double",
    "Enum",
    "Float",
    "Int",
    "Long",
    "Nothing",
    "Number",
    "Short",
    "String",
    "Throwable",
];

const KOTLIN_COLLECTIONS: &[&str] = &[
    "Collection",
    "Iterable",
    "List",
    "Map",
    "MutableCollection",
    "MutableIterable",
    "MutableList",
    "MutableMap",
    "MutableSet",
    "Set",
];

const JAVA_PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "Boolean"),
    ("byte", "Byte"),
    ("char", "Char"),
    ("double", "Double"),
    ("float", "Float"),
    ("int", "Int"),
    ("long", "Long"),
    ("short", "Short"),
];

/// Fully qualified name of a (possibly nested) class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassPath {
    /// Dotted package, empty when the name could not be qualified.
    pub package: String,
    /// Outermost class first; never empty.
    pub names: Vec<String>,
}

impl ClassPath {
    /// Creates a top-level class path.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![name.into()],
        }
    }

    /// Creates a path to a nested class, outermost name first.
    pub fn nested(package: impl Into<String>, names: &[&str]) -> Self {
        Self {
            package: package.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Splits a dotted name into package and class names.
    ///
    /// ## Examples
    ///
    /// ```
    /// use paramwrap_define::ClassPath;
    ///
    /// let path = ClassPath::parse("okhttp3.Headers.Builder");
    /// assert_eq!(path.package, "okhttp3");
    /// assert_eq!(path.names, vec!["Headers", "Builder"]);
    ///
    /// assert_eq!(ClassPath::parse("String").package, "kotlin");
    /// assert_eq!(ClassPath::parse("UploadParam").package, "");
    /// ```
    pub fn parse(qualified: &str) -> Self {
        let segments: Vec<&str> = qualified.split('.').collect();

        if let [single] = segments.as_slice() {
            return Self::resolve_bare(single);
        }

        let first_class = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_uppercase()));

        let split = match first_class {
            Some(idx) => idx,
            // all lowercase, treat the last segment as the class
            None => segments.len() - 1,
        };

        Self {
            package: segments[..split].join("."),
            names: segments[split..].iter().map(|s| s.to_string()).collect(),
        }
    }

    fn resolve_bare(name: &str) -> Self {
        if let Some((_, kotlin)) = JAVA_PRIMITIVES.iter().find(|(java, _)| *java == name) {
            return Self::new("kotlin", *kotlin);
        }
        if KOTLIN_BUILTINS.contains(&name) {
            return Self::new("kotlin", name);
        }
        if KOTLIN_COLLECTIONS.contains(&name) {
            return Self::new("kotlin.collections", name);
        }
        Self::new("", name)
    }

    /// Innermost class name (`Builder` for `okhttp3.Headers.Builder`).
    pub fn simple_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    /// Outermost class name, the one an import statement brings into scope.
    pub fn top_level_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    /// Class names joined with dots, without the package.
    pub fn relative_name(&self) -> String {
        self.names.join(".")
    }

    /// Fully qualified dotted name.
    pub fn canonical(&self) -> String {
        if self.package.is_empty() {
            self.relative_name()
        } else {
            format!("{}.{}", self.package, self.relative_name())
        }
    }

    /// Path of the top-level class that must be imported to use this one.
    pub fn top_level(&self) -> ClassPath {
        ClassPath::new(self.package.clone(), self.top_level_name())
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Use-site variance of a projected type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    In,
    Out,
}

/// A reference to a type in a Kotlin signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// `Unit` (Java `void`).
    #[default]
    Unit,
    /// A class, with type arguments and nullability.
    Class {
        path: ClassPath,
        args: Vec<TypeRef>,
        nullable: bool,
    },
    /// A type variable such as `T`.
    Variable { name: String, nullable: bool },
    /// A projected type argument: `in T` or `out T`.
    Projection {
        variance: Variance,
        inner: Box<TypeRef>,
    },
    /// The star projection `*`.
    Star,
}

impl TypeRef {
    /// A non-null top-level class without type arguments.
    pub fn class(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_path(ClassPath::new(package, name))
    }

    /// A non-null nested class without type arguments.
    pub fn nested(package: impl Into<String>, names: &[&str]) -> Self {
        Self::from_path(ClassPath::nested(package, names))
    }

    /// A class from the `kotlin` package, e.g. `TypeRef::kotlin("String")`.
    pub fn kotlin(name: &str) -> Self {
        Self::class("kotlin", name)
    }

    /// A non-null class reference for the given path.
    pub fn from_path(path: ClassPath) -> Self {
        Self::Class {
            path,
            args: Vec::new(),
            nullable: false,
        }
    }

    /// A non-null type variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            nullable: false,
        }
    }

    /// Contravariant projection, `in T`.
    pub fn consumer_of(inner: TypeRef) -> Self {
        Self::Projection {
            variance: Variance::In,
            inner: Box::new(inner),
        }
    }

    /// Covariant projection, `out T`.
    pub fn producer_of(inner: TypeRef) -> Self {
        Self::Projection {
            variance: Variance::Out,
            inner: Box::new(inner),
        }
    }

    /// Returns this type with the given type arguments.
    ///
    /// Only classes carry arguments; other variants are returned unchanged.
    pub fn with_args(self, new_args: Vec<TypeRef>) -> Self {
        match self {
            Self::Class { path, nullable, .. } => Self::Class {
                path,
                args: new_args,
                nullable,
            },
            other => other,
        }
    }

    /// Returns the nullable form of this type.
    pub fn nullable(self) -> Self {
        match self {
            Self::Class { path, args, .. } => Self::Class {
                path,
                args,
                nullable: true,
            },
            Self::Variable { name, .. } => Self::Variable {
                name,
                nullable: true,
            },
            other => other,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// The class path, when this is a class reference.
    pub fn class_path(&self) -> Option<&ClassPath> {
        match self {
            Self::Class { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The innermost class name, when this is a class reference.
    pub fn simple_name(&self) -> Option<&str> {
        self.class_path().map(ClassPath::simple_name)
    }

    /// Turns unqualified single-name classes that match one of `variables`
    /// into type variables, recursively.
    ///
    /// ## Examples
    ///
    /// ```
    /// use paramwrap_define::TypeRef;
    ///
    /// let ty: TypeRef = "kotlin.collections.List<T>".parse().unwrap();
    /// let resolved = ty.resolve_variables(&["T".to_string()]);
    /// assert_eq!(resolved, TypeRef::class("kotlin.collections", "List").with_args(vec![TypeRef::variable("T")]));
    /// ```
    pub fn resolve_variables(self, variables: &[String]) -> Self {
        if variables.is_empty() {
            return self;
        }
        match self {
            Self::Class {
                path,
                args,
                nullable,
            } => {
                if path.package.is_empty()
                    && path.names.len() == 1
                    && args.is_empty()
                    && variables.iter().any(|v| v == path.simple_name())
                {
                    return Self::Variable {
                        name: path.simple_name().to_string(),
                        nullable,
                    };
                }
                Self::Class {
                    path,
                    args: args
                        .into_iter()
                        .map(|a| a.resolve_variables(variables))
                        .collect(),
                    nullable,
                }
            }
            Self::Projection { variance, inner } => Self::Projection {
                variance,
                inner: Box::new(inner.resolve_variables(variables)),
            },
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("Unit"),
            Self::Class {
                path,
                args,
                nullable,
            } => {
                write!(f, "{}", path)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    f.write_str(">")?;
                }
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Self::Variable { name, nullable } => {
                f.write_str(name)?;
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Self::Projection { variance, inner } => match variance {
                Variance::In => write!(f, "in {}", inner),
                Variance::Out => write!(f, "out {}", inner),
            },
            Self::Star => f.write_str("*"),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeParser::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// Recursive-descent parser for the textual type syntax.
struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn parse(input: &'a str) -> Result<TypeRef, TypeParseError> {
        let mut parser = Self { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn error(&self, reason: &str) -> TypeParseError {
        TypeParseError {
            input: self.input.to_string(),
            position: self.pos,
            reason: reason.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_variance(&mut self) -> Option<Variance> {
        self.skip_whitespace();
        for (keyword, variance) in [("in", Variance::In), ("out", Variance::Out)] {
            if let Some(after) = self.rest().strip_prefix(keyword)
                && after.starts_with(char::is_whitespace)
            {
                self.pos += keyword.len();
                return Some(variance);
            }
        }
        None
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeParseError> {
        if self.eat('*') {
            return Ok(TypeRef::Star);
        }
        if let Some(variance) = self.eat_variance() {
            let inner = self.parse_type()?;
            return Ok(TypeRef::Projection {
                variance,
                inner: Box::new(inner),
            });
        }

        let name = self.parse_qualified_name()?;

        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in type arguments"));
            }
        }
        let nullable = self.eat('?');

        if matches!(name, "void" | "Unit" | "kotlin.Unit") {
            if !args.is_empty() || nullable {
                return Err(self.error("Unit cannot be parameterized or nullable"));
            }
            return Ok(TypeRef::Unit);
        }

        Ok(TypeRef::Class {
            path: ClassPath::parse(name),
            args,
            nullable,
        })
    }

    fn parse_qualified_name(&mut self) -> Result<&'a str, TypeParseError> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(rest.len());
        let name = &rest[..len];

        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("malformed qualified name"));
        }

        self.pos += len;
        Ok(name)
    }
}
