//! Error types for the paramwrap generator.

use thiserror::Error;

/// Errors that can occur during a generation run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A param declaration was registered with an empty key, or with a key
    /// that cannot name a Kotlin function.
    ///
    /// This aborts the whole run; the wrapped type is named so the offending
    /// annotation can be found.
    #[error("key '{key}' for param class {type_name} is invalid, every @Param needs a non-empty identifier as method name")]
    InvalidSchema {
        /// The key that was supplied.
        key: String,
        /// Fully qualified name of the wrapped type.
        type_name: String,
    },

    /// Two generated classes would be emitted under the same name.
    #[error("generated class {name} would wrap both {first} and {second}")]
    ClassNameCollision {
        name: String,
        first: String,
        second: String,
    },

    /// Failed to read or parse a schema file
    #[error("Failed to load schema '{path}': {reason}")]
    SchemaLoad { path: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
