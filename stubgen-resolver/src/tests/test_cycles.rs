use crate::{
    resolve, resolve_with_options, ContractSpec, EntityKind, MethodSet, MethodSignature,
    RecordSpec, ResolutionDiagnostic, ResolverOptions,
};
use pretty_assertions::assert_eq;

fn names(set: &MethodSet) -> Vec<&str> {
    set.names().collect()
}

fn contract(name: &str, method: &str, composes: &[&str]) -> ContractSpec {
    ContractSpec::new(name)
        .with_method(MethodSignature::new(method))
        .composing(composes.iter().copied())
}

#[test]
fn test_self_composition_is_silent_by_default() {
    let resolution = resolve(&[contract("Loop", "Spin", &["Loop"])], &[]);

    assert_eq!(names(&resolution.contract_full["Loop"]), vec!["Spin"]);
    assert_eq!(names(&resolution.contract_inherited["Loop"]), vec!["Spin"]);
    assert!(resolution.contract_unique["Loop"].is_empty());
    assert!(resolution.diagnostics.is_empty());
}

#[test]
fn test_two_cycle_cut_at_closing_edge() {
    // A is resolved first; B sees A in progress and its full set gets
    // nothing from it. Inherited sets are taken from the final full sets.
    let resolution = resolve(
        &[contract("A", "FromA", &["B"]), contract("B", "FromB", &["A"])],
        &[],
    );

    assert_eq!(names(&resolution.contract_full["A"]), vec!["FromA", "FromB"]);
    assert_eq!(names(&resolution.contract_inherited["A"]), vec!["FromB"]);
    assert_eq!(names(&resolution.contract_unique["A"]), vec!["FromA"]);
    assert_eq!(names(&resolution.contract_full["B"]), vec!["FromB"]);
    assert_eq!(names(&resolution.contract_inherited["B"]), vec!["FromB"]);
    assert!(resolution.contract_unique["B"].is_empty());
}

#[test]
fn test_three_cycle_partial_results() {
    let resolution = resolve(
        &[
            contract("A", "MA", &["B"]),
            contract("B", "MB", &["C"]),
            contract("C", "MC", &["A"]),
        ],
        &[],
    );

    assert_eq!(names(&resolution.contract_full["A"]), vec!["MA", "MB", "MC"]);
    assert_eq!(names(&resolution.contract_full["B"]), vec!["MB", "MC"]);
    assert_eq!(names(&resolution.contract_full["C"]), vec!["MC"]);
    assert_eq!(names(&resolution.contract_unique["A"]), vec!["MA"]);
    assert_eq!(names(&resolution.contract_unique["B"]), vec!["MB"]);
    assert_eq!(names(&resolution.contract_inherited["C"]), vec!["MC"]);
    assert!(resolution.contract_unique["C"].is_empty());
    for name in ["A", "B", "C"] {
        let view = resolution.contract_view(name).unwrap();
        assert_eq!(view.full.len(), view.unique.len() + view.inherited.len());
    }
}

#[test]
fn test_record_cycle_terminates() {
    let resolution = resolve(
        &[contract("Reader", "Read", &[])],
        &[
            RecordSpec::new("Left")
                .conforming_to(["Reader"])
                .composing(["Right"]),
            RecordSpec::new("Right").composing(["Left"]),
        ],
    );

    assert_eq!(names(&resolution.record_full["Left"]), vec!["Read"]);
    assert_eq!(names(&resolution.record_unique["Left"]), vec!["Read"]);
    assert!(resolution.record_inherited["Left"].is_empty());
    assert!(resolution.record_full["Right"].is_empty());
    assert!(resolution.record_inherited["Right"].is_empty());
}

#[test]
fn test_cycles_reported_when_enabled() {
    let options = ResolverOptions::new().with_report_cycles(true);
    let resolution = resolve_with_options(
        &[
            contract("A", "MA", &["B"]),
            contract("B", "MB", &["A"]),
            contract("Solo", "Spin", &["Solo"]),
            contract("Leaf", "Stop", &[]),
        ],
        &[
            RecordSpec::new("Left").composing(["Right"]),
            RecordSpec::new("Right").composing(["Left"]),
        ],
        &options,
    );

    assert_eq!(
        resolution.diagnostics,
        vec![
            ResolutionDiagnostic::CompositionCycle {
                kind: EntityKind::Contract,
                members: vec!["A".to_string(), "B".to_string()],
            },
            ResolutionDiagnostic::CompositionCycle {
                kind: EntityKind::Contract,
                members: vec!["Solo".to_string()],
            },
            ResolutionDiagnostic::CompositionCycle {
                kind: EntityKind::Record,
                members: vec!["Left".to_string(), "Right".to_string()],
            },
        ]
    );
    assert_eq!(resolution.summary().composition_cycles, 3);
}

#[test]
fn test_reporting_cycles_does_not_change_results() {
    let contracts = [contract("A", "MA", &["B"]), contract("B", "MB", &["A"])];

    let silent = resolve(&contracts, &[]);
    let reported = resolve_with_options(
        &contracts,
        &[],
        &ResolverOptions::new().with_report_cycles(true),
    );

    assert_eq!(silent.contract_full, reported.contract_full);
    assert_eq!(silent.contract_inherited, reported.contract_inherited);
    assert_eq!(silent.contract_unique, reported.contract_unique);
}
