//! Generator configuration.
//!
//! Configuration is read from an optional TOML file with flat keys; any key
//! left out keeps its default. The CLI applies its own overrides on top.
//!
//! ```toml
//! package = "rxhttp.wrapper.param"
//! param_package = "rxhttp.wrapper.param"
//! ancestor = "RxHttp"
//! class_prefix = "RxHttp_"
//! ```

use std::fs;
use std::path::Path;

use paramwrap_define::{BuiltinFamily, TypeRef};
use serde::Deserialize;

use crate::errors::GeneratorError;

/// Naming and packaging of the generated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Package every generated declaration is placed in.
    pub package: String,
    /// Package holding `Param` and the four builtin family param classes.
    pub param_package: String,
    /// Name of the generic ancestor carrying the shared chain API.
    pub ancestor: String,
    /// Prefix that turns a param class name into its wrapper name.
    pub class_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: "rxhttp.wrapper.param".to_string(),
            param_package: "rxhttp.wrapper.param".to_string(),
            ancestor: "RxHttp".to_string(),
            class_prefix: "RxHttp_".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, GeneratorError> {
        toml::from_str(text).map_err(|e| GeneratorError::ConfigError(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let text = fs::read_to_string(path).map_err(|e| {
            GeneratorError::ConfigError(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that every configured name can appear in Kotlin source.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` when a package is not a dotted
    /// list of identifiers, or when the ancestor name or class prefix is not
    /// a valid identifier.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        for (field, value) in [("package", &self.package), ("param_package", &self.param_package)] {
            if !value.split('.').all(is_identifier) {
                return Err(GeneratorError::ConfigError(format!(
                    "{} '{}' must be a dotted list of identifiers",
                    field, value
                )));
            }
        }

        if !is_identifier(&self.ancestor) {
            return Err(GeneratorError::ConfigError(format!(
                "ancestor '{}' is not a valid class name",
                self.ancestor
            )));
        }

        if !is_identifier(&self.class_prefix) {
            return Err(GeneratorError::ConfigError(format!(
                "class_prefix '{}' must be a non-empty identifier",
                self.class_prefix
            )));
        }

        Ok(())
    }

    /// Name of the wrapper generated for a param class.
    ///
    /// ## Examples
    ///
    /// ```
    /// use paramwrap_gen::config::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// assert_eq!(config.wrapper_name("UploadParam"), "RxHttp_UploadParam");
    /// ```
    pub fn wrapper_name(&self, simple_name: &str) -> String {
        format!("{}{}", self.class_prefix, simple_name)
    }

    /// A class declared in the generated package.
    pub fn generated_type(&self, name: &str) -> TypeRef {
        TypeRef::class(self.package.clone(), name)
    }

    /// The `Param` base class every wrapped type ultimately extends.
    pub fn param_type(&self) -> TypeRef {
        TypeRef::class(self.param_package.clone(), "Param")
    }

    /// The param class of a builtin family, e.g. `FormParam`.
    pub fn family_param_type(&self, family: BuiltinFamily) -> TypeRef {
        TypeRef::class(self.param_package.clone(), family.param_class())
    }

    /// The generated wrapper of a builtin family, e.g. `RxHttp_FormParam`.
    pub fn family_wrapper_type(&self, family: BuiltinFamily) -> TypeRef {
        self.generated_type(&self.wrapper_name(family.param_class()))
    }

    /// The generic ancestor closed over a wrapped type and a self type.
    pub fn ancestor_type(&self, wrapped: TypeRef, self_type: TypeRef) -> TypeRef {
        self.generated_type(&self.ancestor)
            .with_args(vec![wrapped, self_type])
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
