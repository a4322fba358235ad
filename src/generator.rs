//! Host-side orchestration.
//!
//! Per candidate: context → signature → predicates → wrapped source file.
//! Candidates are independent; they fan out over rayon and the report keeps
//! input order. A rejected or skipped candidate never affects the others.
use rayon::prelude::*;

use crate::codegen::emit_predicates;
use crate::config::GeneratorOptions;
use crate::context::{build_context, Outcome, SkipReason};
use crate::diagnostics::{Diagnostic, Severity};
use crate::ir::EnumDescriptor;
use crate::lower::lower_to_signature;
use crate::metadata::EnumSymbol;

pub const AUTO_GENERATED_HEADER: &str = "// <auto-generated/>";

pub const MARKER_ATTRIBUTE_HINT: &str = "GeneratePredicatesAttribute.g.cs";

/// Declaration of the opt-in attribute, registered once per run.
pub const MARKER_ATTRIBUTE_SOURCE: &str = r#"// <auto-generated/>
namespace EnumPredicates
{
    [global::System.AttributeUsage(global::System.AttributeTargets.Enum, AllowMultiple = false, Inherited = false)]
    internal sealed class GeneratePredicatesAttribute : global::System.Attribute
    {
    }
}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub hint_name: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateResult {
    Generated(GeneratedSource),
    Skipped(SkipReason),
    Rejected(Diagnostic),
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
    pub skipped: usize,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }
}

pub fn marker_attribute_source() -> GeneratedSource {
    GeneratedSource {
        hint_name: MARKER_ATTRIBUTE_HINT.to_string(),
        text: MARKER_ATTRIBUTE_SOURCE.to_string(),
    }
}

pub fn generate_candidate(symbol: &EnumSymbol, options: &GeneratorOptions) -> CandidateResult {
    match build_context(symbol) {
        Outcome::Skipped(reason) => {
            tracing::debug!(name = symbol.name(), ?reason, "skipped");
            CandidateResult::Skipped(reason)
        }
        Outcome::Rejected(diagnostic) => {
            tracing::warn!(name = symbol.name(), code = diagnostic.code(), "rejected");
            CandidateResult::Rejected(diagnostic)
        }
        Outcome::Accepted(descriptor) => {
            let signature = lower_to_signature(&descriptor.chain());
            let lines = emit_predicates(&descriptor, &signature, &options.indent);
            let source = GeneratedSource {
                hint_name: hint_name(&descriptor, options),
                text: wrap_source(&descriptor, &lines, options),
            };
            tracing::debug!(hint = %source.hint_name, lines = lines.len(), "generated");
            CandidateResult::Generated(source)
        }
    }
}

pub fn generate(candidates: &[EnumSymbol], options: &GeneratorOptions) -> GenerationReport {
    let results: Vec<CandidateResult> = candidates
        .par_iter()
        .map(|symbol| generate_candidate(symbol, options))
        .collect();

    let mut report = GenerationReport::default();
    if options.emit_marker_attribute {
        report.sources.push(marker_attribute_source());
    }
    for result in results {
        match result {
            CandidateResult::Generated(source) => report.sources.push(source),
            CandidateResult::Skipped(_) => report.skipped += 1,
            CandidateResult::Rejected(diagnostic) => report.diagnostics.push(diagnostic),
        }
    }
    tracing::info!(
        candidates = candidates.len(),
        sources = report.sources.len(),
        diagnostics = report.diagnostics.len(),
        skipped = report.skipped,
        "generation finished"
    );
    report
}

/// `My.App.Outer_1.ColorPredicates.g.cs`
pub fn hint_name(descriptor: &EnumDescriptor, options: &GeneratorOptions) -> String {
    format!("{}{}.g.cs", descriptor.qualified_name(), options.class_suffix)
}

/// `ColorPredicates`, or `Outer_1_ColorPredicates` when nested, so that
/// same-named enums under different containers never share a partial class.
pub fn class_name(descriptor: &EnumDescriptor, options: &GeneratorOptions) -> String {
    format!("{}{}", descriptor.flat_name(), options.class_suffix)
}

/// Header, optional namespace block, and the static partial class around
/// the emitted predicate lines.
pub fn wrap_source(descriptor: &EnumDescriptor, lines: &[String], options: &GeneratorOptions) -> String {
    let mut out = String::new();
    let push = |out: &mut String, depth: usize, line: &str| {
        if !line.is_empty() {
            out.push_str(&options.indent.repeat(depth));
            out.push_str(line);
        }
        out.push('\n');
    };

    push(&mut out, 0, AUTO_GENERATED_HEADER);
    if options.nullable_enable {
        push(&mut out, 0, "#nullable enable");
    }
    push(&mut out, 0, "");

    let namespace = descriptor.namespace();
    let mut depth = 0;
    if !namespace.is_empty() {
        push(&mut out, depth, &format!("namespace {namespace}"));
        push(&mut out, depth, "{");
        depth += 1;
    }

    push(&mut out, depth, &format!(
        "{} static partial class {}",
        descriptor.access,
        class_name(descriptor, options),
    ));
    push(&mut out, depth, "{");
    for line in lines {
        push(&mut out, depth + 1, line);
    }
    push(&mut out, depth, "}");

    if !namespace.is_empty() {
        push(&mut out, 0, "}");
    }
    out
}
