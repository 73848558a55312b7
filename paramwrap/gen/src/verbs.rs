//! Built-in verb table.
//!
//! Maps every canonical HTTP verb factory to the builtin family whose
//! wrapper it returns. The table is fixed and does not depend on the
//! registry; it always yields the same 14 factories in the same order.

use paramwrap_define::BuiltinFamily;

/// One row of the verb table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verb {
    pub name: &'static str,
    pub family: BuiltinFamily,
}

const fn verb(name: &'static str, family: BuiltinFamily) -> Verb {
    Verb { name, family }
}

/// The verb table, in factory order.
pub const VERB_TABLE: [Verb; 14] = [
    verb("get", BuiltinFamily::NoBody),
    verb("head", BuiltinFamily::NoBody),
    verb("postForm", BuiltinFamily::Form),
    verb("putForm", BuiltinFamily::Form),
    verb("patchForm", BuiltinFamily::Form),
    verb("deleteForm", BuiltinFamily::Form),
    verb("postJson", BuiltinFamily::Json),
    verb("putJson", BuiltinFamily::Json),
    verb("patchJson", BuiltinFamily::Json),
    verb("deleteJson", BuiltinFamily::Json),
    verb("postJsonArray", BuiltinFamily::JsonArray),
    verb("putJsonArray", BuiltinFamily::JsonArray),
    verb("patchJsonArray", BuiltinFamily::JsonArray),
    verb("deleteJsonArray", BuiltinFamily::JsonArray),
];
