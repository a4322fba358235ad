use enum_predicates::context::build_context;
use enum_predicates::diagnostics::INVALID_ENUM_ACCESSIBILITY;
use enum_predicates::ir::AccessModifier;
use enum_predicates::{
    generate, generate_candidate, lower_to_signature, CandidateResult, Codegen, EnumSymbol,
    GeneratorOptions, Outcome,
};
use serde_json::{json, Value};

fn symbol(v: Value) -> EnumSymbol {
    enum_predicates::path_de::from_value_with_path(v).unwrap()
}

fn function_names(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("public static bool "))
        .map(|l| l.split(['(', '<']).next().unwrap_or_default().to_string())
        .collect()
}

fn emit(s: &EnumSymbol) -> (Outcome, Vec<String>) {
    let outcome = build_context(s);
    let descriptor = outcome.descriptor().expect("eligible candidate").clone();
    let signature = lower_to_signature(&descriptor.chain());
    let mut cg = Codegen::new();
    cg.emit(&descriptor, &signature);
    (outcome, cg.into_lines())
}

#[test]
fn plain_public_enum_gets_is_predicates_only() {
    let color = symbol(json!({
        "name": "Color",
        "namespace": "Palette",
        "accessibility": "public",
        "attributes": [{ "name": "EnumPredicates.GeneratePredicatesAttribute" }],
        "members": [{ "name": "Red" }, { "name": "Green" }, { "name": "Blue" }]
    }));

    let (_, lines) = emit(&color);
    assert_eq!(function_names(&lines), ["Is", "IsRed", "IsGreen", "IsBlue"]);
    assert_eq!(
        lines[0],
        "public static bool Is(this global::Palette.Color color, global::Palette.Color value)"
    );
    assert!(lines.iter().all(|l| !l.contains("Has")));
}

#[test]
fn internal_flags_enum_gets_has_predicates() {
    let perm = symbol(json!({
        "name": "Perm",
        "namespace": "Security",
        "accessibility": "internal",
        "attributes": [
            { "name": "System.FlagsAttribute" },
            { "name": "EnumPredicates.GeneratePredicatesAttribute" }
        ],
        "members": [{ "name": "Read" }, { "name": "Write" }]
    }));

    let (outcome, lines) = emit(&perm);
    assert_eq!(outcome.descriptor().unwrap().access, AccessModifier::Internal);
    assert_eq!(
        function_names(&lines),
        ["Is", "IsRead", "IsWrite", "Has", "HasRead", "HasWrite"]
    );
    assert!(lines.contains(&"    return (perm & global::Security.Perm.Write) != 0;".to_string()));

    let CandidateResult::Generated(source) = generate_candidate(&perm, &GeneratorOptions::default())
    else {
        panic!("expected generated source");
    };
    assert!(source.text.contains("internal static partial class PermPredicates"));
}

#[test]
fn colliding_generic_containers_are_renamed() {
    let nested = symbol(json!({
        "name": "State",
        "namespace": "Machines",
        "accessibility": "public",
        "attributes": [{ "name": "EnumPredicates.GeneratePredicatesAttribute" }],
        "members": [{ "name": "Idle" }],
        "containingType": {
            "name": "Inner",
            "accessibility": "public",
            "typeParameters": [{
                "name": "T",
                "constraintTypes": ["global::System.IComparable<T>"]
            }],
            "containingType": {
                "name": "Outer",
                "accessibility": "public",
                "typeParameters": [{ "name": "T", "referenceType": true }]
            }
        }
    }));

    let (_, lines) = emit(&nested);
    let ty = "global::Machines.Outer<T0>.Inner<T1>.State";
    assert_eq!(
        lines[..6],
        [
            format!("public static bool Is<T0, T1>(this {ty} state, {ty} value)"),
            "    where T0 : class".to_string(),
            "    where T1 : global::System.IComparable<T1>".to_string(),
            "{".to_string(),
            "    return state == value;".to_string(),
            "}".to_string(),
        ]
    );
    assert!(lines.contains(&format!("public static bool IsIdle<T0, T1>(this {ty} state)")));
}

#[test]
fn protected_container_is_reported_not_generated() {
    let hidden = symbol(json!({
        "name": "Mode",
        "accessibility": "public",
        "attributes": [{
            "name": "EnumPredicates.GeneratePredicatesAttribute",
            "location": { "path": "Host.cs", "line": 12, "column": 6 }
        }],
        "members": [{ "name": "On" }],
        "containingType": { "name": "Host", "accessibility": "protected" }
    }));
    let visible = symbol(json!({
        "name": "Other",
        "accessibility": "public",
        "attributes": [{ "name": "EnumPredicates.GeneratePredicatesAttribute" }],
        "members": [{ "name": "On" }]
    }));

    let report = generate(&[hidden, visible], &GeneratorOptions::default());
    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.descriptor, INVALID_ENUM_ACCESSIBILITY);
    assert_eq!(diagnostic.args, ["Mode"]);
    assert_eq!(diagnostic.to_string().split(": ").next(), Some("Host.cs:12:6"));
    assert!(report.sources.iter().any(|s| s.hint_name == "OtherPredicates.g.cs"));
    assert!(report.sources.iter().all(|s| !s.hint_name.contains("Mode")));
}

#[test]
fn generation_is_repeatable() {
    let candidates: Vec<EnumSymbol> = (0..16)
        .map(|i| {
            let access = if i % 2 == 0 { "public" } else { "internal" };
            symbol(json!({
                "name": format!("E{i}"),
                "namespace": "Bulk",
                "accessibility": access,
                "attributes": [
                    { "name": "EnumPredicates.GeneratePredicatesAttribute" },
                    { "name": "System.FlagsAttribute" }
                ],
                "members": [{ "name": "A" }, { "name": "B" }]
            }))
        })
        .collect();

    let options = GeneratorOptions::default();
    let first = generate(&candidates, &options);
    let second = generate(&candidates, &options);
    assert_eq!(first.sources, second.sources);
    assert_eq!(first.sources.len(), 1 + 16);
    assert_eq!(first.sources[1].hint_name, "Bulk.E0Predicates.g.cs");
    assert_eq!(first.sources[16].hint_name, "Bulk.E15Predicates.g.cs");
}
