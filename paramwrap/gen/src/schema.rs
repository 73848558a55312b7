//! Schema file loading.
//!
//! A schema file is the hand-over format of a discovery collaborator: the
//! ordered list of annotated param classes with every member it found. JSON
//! and TOML are accepted, picked by file extension.
//!
//! ```toml
//! [[params]]
//! key = "upload"
//! type = "com.example.UploadParam"
//! superclass = "rxhttp.wrapper.param.FormParam"
//!
//! [[params.members]]
//! name = "addFile"
//! parameters = [{ name = "file", type = "java.io.File" }]
//! returns = "com.example.UploadParam"
//! ```
//!
//! An entry may name its family with `super_kind` or give the declared
//! `superclass`; an explicit `super_kind` wins. A missing `key` is read as
//! empty and rejected by the registry like any other empty key.

use std::fs;
use std::path::Path;

use paramwrap_define::{MemberDescriptor, ParamDeclaration, SuperKind, TypeRef};
use serde::Deserialize;
use tracing::debug;

use crate::errors::GeneratorError;

/// Accepted schema encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Picks the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default)]
    pub params: Vec<ParamEntry>,
}

/// One annotated param class as written in a schema file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    #[serde(default)]
    pub key: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub super_kind: Option<SuperKind>,
    #[serde(default)]
    pub superclass: Option<TypeRef>,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

impl ParamEntry {
    /// Resolves the super kind and turns the entry into a declaration.
    pub fn into_declaration(self, param_package: &str) -> ParamDeclaration {
        let super_kind = match (self.super_kind, &self.superclass) {
            (Some(kind), _) => kind,
            (None, Some(superclass)) => SuperKind::from_superclass(superclass, param_package),
            (None, None) => SuperKind::Other,
        };
        ParamDeclaration {
            key: self.key,
            type_ref: self.type_ref,
            super_kind,
            members: self.members,
        }
    }
}

impl SchemaFile {
    pub fn parse(text: &str, format: SchemaFormat) -> Result<Self, String> {
        match format {
            SchemaFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            SchemaFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }

    pub fn into_declarations(self, param_package: &str) -> Vec<ParamDeclaration> {
        self.params
            .into_iter()
            .map(|entry| entry.into_declaration(param_package))
            .collect()
    }
}

/// Reads a schema file into declarations, in file order.
///
/// ## Errors
///
/// Returns `GeneratorError::SchemaLoad` when the file cannot be read, has an
/// unknown extension, or does not parse.
pub fn load_schema(path: &Path, param_package: &str) -> Result<Vec<ParamDeclaration>, GeneratorError> {
    let load_error = |reason: String| GeneratorError::SchemaLoad {
        path: path.display().to_string(),
        reason,
    };

    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| load_error("expected a .json or .toml file".to_string()))?;
    let text = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let schema = SchemaFile::parse(&text, format).map_err(load_error)?;

    debug!(path = %path.display(), params = schema.params.len(), "Loaded schema");
    Ok(schema.into_declarations(param_package))
}
