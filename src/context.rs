//! Candidate eligibility: host metadata → `EnumDescriptor`.
//!
//! Three outcomes only:
//! - skipped silently (not opted in, or nothing to generate for),
//! - rejected with exactly one diagnostic (opted in, but not reachable),
//! - accepted with a fully populated descriptor.
use indexmap::IndexSet;

use crate::diagnostics::{Diagnostic, INVALID_ENUM_ACCESSIBILITY};
use crate::ir::{AccessModifier, Accessibility, EnumDescriptor};
use crate::metadata::{EnumSymbol, TypeSymbol};

/// Attributes the generator recognizes, matched by exact display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    GeneratePredicates,
    Flags,
}

impl Marker {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::GeneratePredicates => "EnumPredicates.GeneratePredicatesAttribute",
            Self::Flags => "System.FlagsAttribute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotMarked,
    NoConstantMembers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(EnumDescriptor),
    Skipped(SkipReason),
    Rejected(Diagnostic),
}

impl Outcome {
    pub fn descriptor(&self) -> Option<&EnumDescriptor> {
        match self {
            Self::Accepted(d) => Some(d),
            _ => None,
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Rejected(d) => Some(d),
            _ => None,
        }
    }
}

/// Narrowest access across `levels`; `None` if any level is neither public
/// nor internal.
pub fn narrowest_access(levels: impl IntoIterator<Item = Accessibility>) -> Option<AccessModifier> {
    let mut access = AccessModifier::Public;
    for level in levels {
        match level {
            Accessibility::Public => {}
            Accessibility::Internal => access = AccessModifier::Internal,
            Accessibility::Other => return None,
        }
    }
    Some(access)
}

pub fn build_context(symbol: &EnumSymbol) -> Outcome {
    let Some(marker) = symbol.find_attribute(Marker::GeneratePredicates.display_name()) else {
        return Outcome::Skipped(SkipReason::NotMarked);
    };
    let is_flags = symbol.find_attribute(Marker::Flags.display_name()).is_some();

    // every level counts, the enum itself included
    let chain = symbol.ty.chain();
    let Some(access) = narrowest_access(chain.iter().map(|t| t.accessibility.class())) else {
        tracing::debug!(name = symbol.name(), "rejected: inaccessible declaration chain");
        return Outcome::Rejected(Diagnostic::new(
            INVALID_ENUM_ACCESSIBILITY,
            marker.location.clone().or_else(|| symbol.location.clone()),
            vec![symbol.name().to_string()],
        ));
    };

    let members: IndexSet<String> = symbol
        .members
        .iter()
        .filter(|m| m.is_static && m.is_const)
        .map(|m| m.name.clone())
        .collect();
    if members.is_empty() {
        return Outcome::Skipped(SkipReason::NoConstantMembers);
    }

    let containers = symbol
        .ty
        .containing_type
        .as_deref()
        .map(TypeSymbol::chain)
        .unwrap_or_default()
        .into_iter()
        .map(|t| t.to_container(&symbol.namespace))
        .collect();

    Outcome::Accepted(EnumDescriptor {
        containers,
        innermost: symbol.ty.to_container(&symbol.namespace),
        access,
        members,
        is_flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Location;
    use serde_json::{json, Value};

    fn symbol(v: Value) -> EnumSymbol {
        serde_json::from_value(v).unwrap()
    }

    fn marked(extra: Value) -> EnumSymbol {
        let mut base = json!({
            "name": "Color",
            "namespace": "My.App",
            "accessibility": "public",
            "attributes": [{
                "name": "EnumPredicates.GeneratePredicatesAttribute",
                "location": { "path": "Color.cs", "line": 3, "column": 2 }
            }],
            "members": [{ "name": "Red" }, { "name": "Green" }, { "name": "Blue" }]
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
            base.extend(extra);
        }
        symbol(base)
    }

    #[test]
    fn unmarked_enum_is_skipped_silently() {
        let s = symbol(json!({
            "name": "Color",
            "accessibility": "private",
            "attributes": [{ "name": "System.FlagsAttribute" }],
            "members": [{ "name": "Red" }]
        }));
        assert_eq!(build_context(&s), Outcome::Skipped(SkipReason::NotMarked));
    }

    #[test]
    fn accepts_public_enum() {
        let outcome = build_context(&marked(json!({})));
        let d = outcome.descriptor().unwrap();
        assert_eq!(d.access, AccessModifier::Public);
        assert!(!d.is_flags);
        assert!(d.containers.is_empty());
        assert_eq!(d.name(), "Color");
        assert_eq!(d.members.iter().collect::<Vec<_>>(), ["Red", "Green", "Blue"]);
    }

    #[test]
    fn flags_marker_is_detected() {
        let s = marked(json!({
            "attributes": [
                { "name": "global::System.FlagsAttribute" },
                { "name": "global::EnumPredicates.GeneratePredicatesAttribute" }
            ]
        }));
        assert!(build_context(&s).descriptor().unwrap().is_flags);
    }

    #[test]
    fn internal_container_downgrades_access() {
        let s = marked(json!({
            "containingType": {
                "name": "Outer",
                "accessibility": "internal",
                "containingType": { "name": "Root", "accessibility": "public" }
            }
        }));
        let outcome = build_context(&s);
        let d = outcome.descriptor().unwrap();
        assert_eq!(d.access, AccessModifier::Internal);
        let names: Vec<_> = d.chain().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Root", "Outer", "Color"]);
        assert!(d.chain().iter().all(|c| c.namespace == "My.App"));
    }

    #[test]
    fn protected_container_rejects_public_enum() {
        let s = marked(json!({
            "containingType": {
                "name": "Outer",
                "accessibility": "public",
                "containingType": { "name": "Root", "accessibility": "protected" }
            }
        }));
        let outcome = build_context(&s);
        let diag = outcome.diagnostic().unwrap();
        assert_eq!(diag.code(), "EPG0001");
        assert_eq!(diag.args, vec!["Color".to_string()]);
        assert_eq!(
            diag.location,
            Some(Location { path: "Color.cs".into(), line: 3, column: 2 })
        );
    }

    #[test]
    fn rejection_falls_back_to_enum_location() {
        let s = marked(json!({
            "accessibility": "private",
            "attributes": [{ "name": "EnumPredicates.GeneratePredicatesAttribute" }],
            "location": { "path": "Color.cs", "line": 9, "column": 5 }
        }));
        let outcome = build_context(&s);
        assert_eq!(
            outcome.diagnostic().unwrap().location,
            Some(Location { path: "Color.cs".into(), line: 9, column: 5 })
        );
    }

    #[test]
    fn private_enum_is_rejected_before_member_check() {
        let s = marked(json!({ "accessibility": "private", "members": [] }));
        assert!(matches!(build_context(&s), Outcome::Rejected(_)));
    }

    #[test]
    fn enum_without_constants_is_skipped() {
        let s = marked(json!({
            "members": [{ "name": "value__", "isStatic": false, "isConst": false }]
        }));
        assert_eq!(build_context(&s), Outcome::Skipped(SkipReason::NoConstantMembers));
    }

    #[test]
    fn duplicate_members_keep_first_position() {
        let s = marked(json!({
            "members": [{ "name": "B" }, { "name": "A" }, { "name": "B" }]
        }));
        let outcome = build_context(&s);
        let d = outcome.descriptor().unwrap();
        assert_eq!(d.members.iter().collect::<Vec<_>>(), ["B", "A"]);
    }

    #[test]
    fn narrowest_access_walks_every_level() {
        use Accessibility::*;
        assert_eq!(narrowest_access([Public, Public]), Some(AccessModifier::Public));
        assert_eq!(narrowest_access([Internal, Public]), Some(AccessModifier::Internal));
        assert_eq!(narrowest_access([Public, Internal, Other]), None);
        assert_eq!(narrowest_access([]), Some(AccessModifier::Public));
    }
}
