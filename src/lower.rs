//! Lower a container chain into a `ResolvedSignature`.
//!
//! The generated functions live in a single non-generic static class, so every
//! type parameter of the enclosing chain is lifted onto the function itself.
//! A flattened list cannot hold the same name twice: when two levels share a
//! parameter name, every parameter in the chain is renamed to `T<k>` (running
//! index, outer → inner) and constraint clauses follow the renaming.
use std::borrow::Borrow;
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{ContainerType, ResolvedSignature, TypeParam};

const GLOBAL_PREFIX: &str = "global::";
const SYNTHETIC_PREFIX: &str = "T";

static IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@?[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Mn}\p{Mc}\p{Nd}\p{Pc}\p{Cf}]*")
        .expect("identifier pattern compiles")
});

/// A type parameter together with its place in the flattened chain.
#[derive(Debug, Clone, Copy)]
pub struct ParamSlot<'a> {
    pub level: usize,
    pub index: usize, // zero-based across the whole chain
    pub param: &'a TypeParam,
}

// ------------------------------- Entry ----------------------------------- //

/// Resolve `chain` (outermost first, enum last), renaming on collision.
pub fn lower_to_signature<C: Borrow<ContainerType>>(chain: &[C]) -> ResolvedSignature {
    let slots = flatten(chain);
    if has_collision(&slots) {
        let prefix = synthetic_prefix(&slots);
        tracing::debug!(%prefix, params = slots.len(), "type parameter names collide; renaming");
        resolve_with(chain, |slot| format!("{prefix}{}", slot.index))
    } else {
        resolve_with(chain, |slot| slot.param.name.clone())
    }
}

/// Resolve `chain` with an explicit name selector. The selected name is used
/// in the type reference, the generic parameter list, and every constraint
/// clause (including references from constraint types).
pub fn resolve_with<C, F>(chain: &[C], select: F) -> ResolvedSignature
where
    C: Borrow<ContainerType>,
    F: Fn(ParamSlot<'_>) -> String,
{
    let slots = flatten(chain);
    let names: Vec<String> = slots.iter().map(|slot| select(*slot)).collect();

    let generic_params = if names.is_empty() {
        String::new()
    } else {
        format!("<{}>", names.join(", "))
    };

    let constraint_clauses = slots
        .iter()
        .zip(&names)
        .filter(|(slot, _)| slot.param.has_constraints())
        .map(|(slot, name)| {
            let terms = constraint_terms(slot.param, |ty| rewrite_type(ty, slot.level, &slots, &names));
            format!("where {name} : {}", terms.join(", "))
        })
        .collect();

    ResolvedSignature {
        type_reference: type_reference(chain, &names),
        generic_params,
        constraint_clauses,
    }
}

// ------------------------------ Helpers ---------------------------------- //

fn level_of<C: Borrow<ContainerType>>(c: &C) -> &ContainerType {
    c.borrow()
}

fn flatten<C: Borrow<ContainerType>>(chain: &[C]) -> Vec<ParamSlot<'_>> {
    let mut out = Vec::new();
    for (level, container) in chain.iter().enumerate() {
        for param in &level_of(container).type_params {
            out.push(ParamSlot { level, index: out.len(), param });
        }
    }
    out
}

fn has_collision(slots: &[ParamSlot<'_>]) -> bool {
    let mut seen = HashSet::new();
    slots.iter().any(|slot| !seen.insert(slot.param.name.as_str()))
}

fn type_reference<C: Borrow<ContainerType>>(chain: &[C], names: &[String]) -> String {
    let namespace = chain
        .first()
        .map(|c| level_of(c).namespace.as_str())
        .unwrap_or_default();

    let mut cursor = 0;
    let segments: Vec<String> = chain
        .iter()
        .map(|c| {
            let c = level_of(c);
            let arity = c.arity();
            let segment = if arity == 0 {
                c.name.clone()
            } else {
                format!("{}<{}>", c.name, names[cursor..cursor + arity].join(", "))
            };
            cursor += arity;
            segment
        })
        .collect();

    let mut out = String::from(GLOBAL_PREFIX);
    if !namespace.is_empty() {
        out.push_str(namespace);
        out.push('.');
    }
    out.push_str(&segments.join("."));
    out
}

/// Terms in emission order: kind marker, constraint types, `new()`, `notnull`.
fn constraint_terms(param: &TypeParam, rewrite: impl Fn(&str) -> String) -> Vec<String> {
    let mut terms = Vec::new();
    // the host reports `unmanaged` together with the value-type flag
    if param.reference_type {
        terms.push("class".to_string());
    } else if param.unmanaged {
        terms.push("unmanaged".to_string());
    } else if param.value_type {
        terms.push("struct".to_string());
    }
    terms.extend(param.constraint_types.iter().map(|ty| rewrite(ty.as_str())));
    if param.constructor {
        terms.push("new()".to_string());
    }
    if param.not_null {
        terms.push("notnull".to_string());
    }
    terms
}

/// Selected name of the parameter `token` refers to from `level`, innermost
/// declaration first.
fn visible<'n>(
    token: &str,
    level: usize,
    slots: &[ParamSlot<'_>],
    names: &'n [String],
) -> Option<&'n str> {
    slots
        .iter()
        .zip(names)
        .rev()
        .find(|(slot, _)| slot.level <= level && slot.param.name == token)
        .map(|(_, name)| name.as_str())
}

/// Unqualified identifier tokens of a type name (skips `ns.Name`, `global::Name`).
fn free_tokens(ty: &str) -> impl Iterator<Item = regex::Match<'_>> {
    IDENT.find_iter(ty).filter(move |m| {
        !matches!(ty[..m.start()].chars().next_back(), Some('.' | ':'))
    })
}

fn rewrite_type(ty: &str, level: usize, slots: &[ParamSlot<'_>], names: &[String]) -> String {
    let mut out = String::with_capacity(ty.len());
    let mut last = 0;
    for m in free_tokens(ty) {
        if let Some(name) = visible(m.as_str(), level, slots, names) {
            out.push_str(&ty[last..m.start()]);
            out.push_str(name);
            last = m.end();
        }
    }
    out.push_str(&ty[last..]);
    out
}

/// `T`, unless a free identifier in some constraint type already looks like
/// `T<digits>`; then `T_`, `T__`, ... until nothing would be shadowed.
fn synthetic_prefix(slots: &[ParamSlot<'_>]) -> String {
    let free: HashSet<&str> = slots
        .iter()
        .flat_map(|slot| slot.param.constraint_types.iter())
        .flat_map(|ty| free_tokens(ty).map(|m| m.as_str()))
        .filter(|token| !slots.iter().any(|slot| slot.param.name == *token))
        .collect();

    let mut prefix = SYNTHETIC_PREFIX.to_string();
    while free.iter().any(|token| is_synthetic_like(token, &prefix)) {
        prefix.push('_');
    }
    prefix
}

fn is_synthetic_like(token: &str, prefix: &str) -> bool {
    token
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
