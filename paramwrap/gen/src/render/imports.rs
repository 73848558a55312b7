//! Import resolution for one output file.
//!
//! Every class referenced in a file is collected first. A class is then
//! written by its short name when no other referenced class or type
//! variable claims the same name, and by its qualified name otherwise.
//! Short names outside the file's package and outside the default-imported
//! packages get an import.

use std::collections::{BTreeMap, BTreeSet};

use paramwrap_define::{ClassPath, TypeRef, Variance};

use super::{escape_identifier, escape_path};

/// Packages Kotlin/JVM imports implicitly.
const DEFAULT_PACKAGES: &[&str] = &["kotlin", "kotlin.collections", "java.lang"];

#[derive(Debug, Default)]
pub struct ImportScope {
    package: String,
    /// Type variable names; a class with one of these names is always qualified.
    reserved: BTreeSet<String>,
    /// Top-level simple name to every top-level class claiming it.
    claims: BTreeMap<String, BTreeSet<ClassPath>>,
}

impl ImportScope {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    /// Records every class referenced by `ty`, including type arguments.
    pub fn collect(&mut self, ty: &TypeRef) {
        match ty {
            TypeRef::Class { path, args, .. } => {
                self.collect_path(path);
                for arg in args {
                    self.collect(arg);
                }
            }
            TypeRef::Projection { inner, .. } => self.collect(inner),
            TypeRef::Unit | TypeRef::Variable { .. } | TypeRef::Star => {}
        }
    }

    pub fn collect_path(&mut self, path: &ClassPath) {
        let top = path.top_level();
        self.claims
            .entry(top.top_level_name().to_string())
            .or_default()
            .insert(top);
    }

    fn is_short(&self, path: &ClassPath) -> bool {
        if path.package.is_empty() {
            return true;
        }
        let name = path.top_level_name();
        if self.reserved.contains(name) {
            return false;
        }
        self.claims.get(name).is_some_and(|claims| claims.len() == 1)
    }

    fn needs_import(&self, top: &ClassPath) -> bool {
        !top.package.is_empty()
            && top.package != self.package
            && !DEFAULT_PACKAGES.contains(&top.package.as_str())
            && self.is_short(top)
    }

    /// Import lines in sorted order, without the `import` keyword.
    pub fn imports(&self) -> Vec<String> {
        self.claims
            .values()
            .flatten()
            .filter(|top| self.needs_import(top))
            .map(|top| escape_path(&top.canonical()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// How a class is written in this file.
    pub fn class_name(&self, path: &ClassPath) -> String {
        if self.is_short(path) {
            escape_path(&path.relative_name())
        } else {
            escape_path(&path.canonical())
        }
    }

    /// Writes a type reference using the resolved names.
    pub fn render(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Unit => "Unit".to_string(),
            TypeRef::Class {
                path,
                args,
                nullable,
            } => {
                let mut out = self.class_name(path);
                if !args.is_empty() {
                    let args: Vec<_> = args.iter().map(|a| self.render(a)).collect();
                    out.push('<');
                    out.push_str(&args.join(", "));
                    out.push('>');
                }
                if *nullable {
                    out.push('?');
                }
                out
            }
            TypeRef::Variable { name, nullable } => {
                let mut out = escape_identifier(name).into_owned();
                if *nullable {
                    out.push('?');
                }
                out
            }
            TypeRef::Projection { variance, inner } => match variance {
                Variance::In => format!("in {}", self.render(inner)),
                Variance::Out => format!("out {}", self.render(inner)),
            },
            TypeRef::Star => "*".to_string(),
        }
    }
}
