//! Boolean predicate generation for enums (`IsRed()`, `HasRead()`, ...),
//! driven by symbol metadata.
//!
//! Pipeline per candidate:
//! 1. `context`: eligibility, descriptor or diagnostic
//! 2. `lower`: container chain → generic signature
//! 3. `codegen`: predicate lines
//! 4. `generator`: wrapping, hint names, parallel fan-out
pub mod ident;
pub mod ir;
pub mod lower;
pub mod context;
pub mod codegen;
pub mod metadata;
pub mod diagnostics;
pub mod generator;
pub mod config;
pub mod error;
pub mod path_de;
pub mod cli;

pub use codegen::Codegen;
pub use config::GeneratorOptions;
pub use context::{build_context, Outcome, SkipReason};
pub use generator::{generate, generate_candidate, CandidateResult, GeneratedSource, GenerationReport};
pub use ir::{EnumDescriptor, ResolvedSignature};
pub use lower::lower_to_signature;
pub use metadata::EnumSymbol;
