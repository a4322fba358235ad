//! Identifier helpers for generated C# source.
//!
//! Both functions are total: the worst case is returning the input untouched.
use std::collections::HashSet;
use once_cell::sync::Lazy;

/// Prefix that turns any keyword into a plain identifier (`@class`).
pub const ESCAPE_MARKER: char = '@';

const RESERVED: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char",
    "checked", "class", "const", "continue", "decimal", "default", "delegate",
    "do", "double", "else", "enum", "event", "explicit", "extern", "false",
    "finally", "fixed", "float", "for", "foreach", "goto", "if", "implicit",
    "in", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params", "private",
    "protected", "public", "readonly", "ref", "return", "sbyte", "sealed",
    "short", "sizeof", "stackalloc", "static", "string", "struct", "switch",
    "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked",
    "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

const CONTEXTUAL: &[&str] = &[
    "add", "alias", "and", "ascending", "args", "async", "await", "by",
    "descending", "dynamic", "equals", "file", "from", "get", "global", "group",
    "init", "into", "join", "let", "managed", "nameof", "nint", "not",
    "notnull", "nuint", "on", "or", "orderby", "partial", "record", "remove",
    "required", "scoped", "select", "set", "unmanaged", "value", "var", "when",
    "where", "with", "yield",
];

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    RESERVED.iter().chain(CONTEXTUAL.iter()).copied().collect()
});

/// Reserved or contextual keyword of the target syntax.
pub fn is_keyword(identifier: &str) -> bool {
    KEYWORDS.contains(identifier)
}

/// Lower-cases the first character only, and only when it maps to a single
/// character (`İ` stays `İ`). Empty and all-whitespace input is returned as-is.
pub fn to_lower_camel(name: &str) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut lower = first.to_lowercase();
            let first = match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => first,
            };
            std::iter::once(first).chain(chars).collect()
        }
    }
}

/// Prefixes `@` when `identifier` collides with a keyword.
pub fn escape_if_reserved(identifier: &str) -> String {
    if is_keyword(identifier) {
        format!("{ESCAPE_MARKER}{identifier}")
    } else {
        identifier.to_string()
    }
}

/// `escape_if_reserved(to_lower_camel(name))`, the shape used for parameters.
pub fn parameter_name(type_name: &str) -> String {
    escape_if_reserved(&to_lower_camel(type_name))
}
