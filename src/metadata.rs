//! Host symbol view, as fed to the generator.
//!
//! This is the read-only shape a host hands over per candidate: attributes by
//! fully-qualified display name, the containing-type chain as parent links,
//! and the declared members. It is deliberately close to what a compiler's
//! semantic model exposes; `context` turns it into descriptors.
use serde::{Deserialize, Serialize};

use crate::ir::{Accessibility, ContainerType, TypeParam};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredAccessibility {
    #[serde(rename = "public")]
    Public,
    #[serde(rename = "internal")]
    Internal,
    #[serde(rename = "protected")]
    Protected,
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "protected internal")]
    ProtectedInternal,
    #[serde(rename = "private protected")]
    PrivateProtected,
}

impl DeclaredAccessibility {
    pub fn class(self) -> Accessibility {
        match self {
            Self::Public => Accessibility::Public,
            Self::Internal => Accessibility::Internal,
            _ => Accessibility::Other,
        }
    }
}

/// Source position forwarded untouched into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterSymbol {
    pub name: String,
    #[serde(default)]
    pub reference_type: bool,
    #[serde(default)]
    pub value_type: bool,
    #[serde(default)]
    pub unmanaged: bool,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub constraint_types: Vec<String>,
}

impl From<&TypeParameterSymbol> for TypeParam {
    fn from(p: &TypeParameterSymbol) -> Self {
        TypeParam {
            name: p.name.clone(),
            reference_type: p.reference_type,
            value_type: p.value_type,
            unmanaged: p.unmanaged,
            constructor: p.constructor,
            not_null: p.not_null,
            constraint_types: p.constraint_types.clone(),
        }
    }
}

/// A named type with a link to the type declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSymbol {
    pub name: String,
    pub accessibility: DeclaredAccessibility,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSymbol>,
    #[serde(default)]
    pub containing_type: Option<Box<TypeSymbol>>,
}

impl TypeSymbol {
    /// Walk the parent links outward, then reverse: outermost first, `self` last.
    pub fn chain(&self) -> Vec<&TypeSymbol> {
        let mut out = Vec::new();
        let mut cursor = Some(self);
        while let Some(ty) = cursor {
            out.push(ty);
            cursor = ty.containing_type.as_deref();
        }
        out.reverse();
        out
    }

    pub fn to_container(&self, namespace: &str) -> ContainerType {
        ContainerType {
            name: self.name.clone(),
            type_params: self.type_parameters.iter().map(TypeParam::from).collect(),
            accessibility: self.accessibility.class(),
            namespace: namespace.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    pub name: String, // fully-qualified display name
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSymbol {
    pub name: String,
    #[serde(default = "yes")]
    pub is_static: bool,
    #[serde(default = "yes")]
    pub is_const: bool,
}

fn yes() -> bool { true }

/// One candidate enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumSymbol {
    #[serde(flatten)]
    pub ty: TypeSymbol,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
    #[serde(default)]
    pub location: Option<Location>, // diagnostic fallback when the marker has none
}

impl EnumSymbol {
    pub fn name(&self) -> &str {
        &self.ty.name
    }

    pub fn find_attribute(&self, display_name: &str) -> Option<&AttributeData> {
        self.attributes
            .iter()
            .find(|a| a.name.strip_prefix("global::").unwrap_or(&a.name) == display_name)
    }
}
