//! Predicate emitter.
//!
//! Turns a validated `EnumDescriptor` plus its `ResolvedSignature` into the
//! lines of the generated extension methods. The enclosing class, namespace,
//! and file header belong to `generator`.
//!
//! Block order is fixed: `Is`, one `Is<Member>` per member, then (flags enums
//! only) `Has` and one `Has<Member>` per member. Blocks are separated by one
//! blank line; the first block has none before it.
use crate::ident;
use crate::ir::{EnumDescriptor, ResolvedSignature};

pub const DEFAULT_INDENT: &str = "    ";

/// Append-only line builder. Public results are finished `Vec<String>`s.
#[derive(Debug, Clone)]
pub struct Codegen {
    indent: String,
    lines: Vec<String>,
    blocks: usize,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self { indent: indent.into(), lines: Vec::new(), blocks: 0 }
    }

    pub fn emit(&mut self, descriptor: &EnumDescriptor, signature: &ResolvedSignature) {
        let ty = signature.type_reference.as_str();
        let recv = ident::parameter_name(descriptor.name());
        // `@value` and `value` are the same identifier
        let arg = if recv.trim_start_matches(ident::ESCAPE_MARKER) == "value" { "other" } else { "value" };

        self.predicate(
            "Is",
            signature,
            &format!("this {ty} {recv}, {ty} {arg}"),
            &format!("{recv} == {arg}"),
        );
        for member in &descriptor.members {
            let constant = format!("{ty}.{}", ident::escape_if_reserved(member));
            self.predicate(
                &format!("Is{member}"),
                signature,
                &format!("this {ty} {recv}"),
                &format!("{recv} == {constant}"),
            );
        }

        if !descriptor.is_flags {
            return;
        }

        self.predicate(
            "Has",
            signature,
            &format!("this {ty} {recv}, {ty} {arg}"),
            &format!("({recv} & {arg}) != 0"),
        );
        for member in &descriptor.members {
            let constant = format!("{ty}.{}", ident::escape_if_reserved(member));
            self.predicate(
                &format!("Has{member}"),
                signature,
                &format!("this {ty} {recv}"),
                &format!("({recv} & {constant}) != 0"),
            );
        }
    }

    fn predicate(&mut self, name: &str, signature: &ResolvedSignature, params: &str, expr: &str) {
        if self.blocks > 0 {
            self.lines.push(String::new());
        }
        self.blocks += 1;

        self.lines.push(format!("public static bool {name}{}({params})", signature.generic_params));
        for clause in &signature.constraint_clauses {
            self.lines.push(format!("{}{clause}", self.indent));
        }
        self.lines.push("{".to_string());
        self.lines.push(format!("{}return {expr};", self.indent));
        self.lines.push("}".to_string());
    }

    /// Number of function blocks emitted so far.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn into_string(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// One-shot form of `Codegen::emit`.
pub fn emit_predicates(descriptor: &EnumDescriptor, signature: &ResolvedSignature, indent: &str) -> Vec<String> {
    let mut cg = Codegen::with_indent(indent);
    cg.emit(descriptor, signature);
    cg.into_lines()
}
