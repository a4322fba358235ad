// Strongly-typed descriptors for resolution and codegen. No serde here; the
// host-facing shapes live in `metadata`.
use indexmap::IndexSet;

/// Coarse accessibility class used by the eligibility walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    Other,                   // protected, private, and their combinations
}

/// Access modifier carried by a generated extension class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Internal,
}

impl AccessModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub reference_type: bool,
    pub value_type: bool,
    pub unmanaged: bool,
    pub constructor: bool,
    pub not_null: bool,
    pub constraint_types: Vec<String>, // fully-qualified, declaration order
}

impl TypeParam {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn has_constraints(&self) -> bool {
        self.reference_type
            || self.value_type
            || self.unmanaged
            || self.constructor
            || self.not_null
            || !self.constraint_types.is_empty()
    }
}

/// One level of a (possibly nested) generic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerType {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub accessibility: Accessibility,
    pub namespace: String,   // may be empty (global namespace)
}

impl ContainerType {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

/// The validated subject of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub containers: Vec<ContainerType>, // outermost → innermost, enum excluded
    pub innermost: ContainerType,       // the enum itself
    pub access: AccessModifier,
    pub members: IndexSet<String>,      // declaration order
    pub is_flags: bool,
}

impl EnumDescriptor {
    pub fn name(&self) -> &str {
        &self.innermost.name
    }

    pub fn namespace(&self) -> &str {
        &self.innermost.namespace
    }

    /// `Ns.Outer.Inner.Name`, generic levels suffixed with `_<arity>`.
    pub fn qualified_name(&self) -> String {
        let mut parts = self.level_segments();
        if !self.namespace().is_empty() {
            parts.insert(0, self.namespace().to_string());
        }
        parts.join(".")
    }

    /// `Outer_1_Inner_Name`: the nesting path flattened into one identifier,
    /// unique per enum within its namespace.
    pub fn flat_name(&self) -> String {
        self.level_segments().join("_")
    }

    fn level_segments(&self) -> Vec<String> {
        self.chain()
            .into_iter()
            .map(|level| match level.arity() {
                0 => level.name.clone(),
                n => format!("{}_{n}", level.name),
            })
            .collect()
    }

    /// Full chain, outermost first, ending with the enum.
    pub fn chain(&self) -> Vec<&ContainerType> {
        self.containers.iter().chain(std::iter::once(&self.innermost)).collect()
    }
}

/// Output of the resolver: everything a generated function signature needs
/// to compile against the enclosing type chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSignature {
    pub type_reference: String,
    pub generic_params: String,          // "" or "<T0, T1>"
    pub constraint_clauses: Vec<String>, // "where T0 : class", ...
}
