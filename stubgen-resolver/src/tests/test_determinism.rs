use crate::{resolve, ContractSpec, MethodSet, MethodSignature, RecordSpec, Resolution};
use pretty_assertions::assert_eq;

fn names(set: &MethodSet) -> Vec<&str> {
    set.names().collect()
}

fn wide_fixture() -> (Vec<ContractSpec>, Vec<RecordSpec>) {
    let mut contracts = Vec::new();
    for index in 0..40 {
        let mut contract = ContractSpec::new(format!("C{index:02}"))
            .with_method(MethodSignature::new(format!("M{index:02}")))
            .with_method(MethodSignature::new(format!("Shared{}", index % 5)));
        if index > 0 {
            contract = contract.composing([format!("C{:02}", index - 1), format!("C{:02}", index / 2)]);
        }
        contracts.push(contract);
    }

    let records = (0..20)
        .map(|index| {
            RecordSpec::new(format!("R{index:02}"))
                .conforming_to([format!("C{:02}", 39 - index), format!("C{:02}", index)])
                .composing(if index > 0 {
                    vec![format!("R{:02}", index - 1)]
                } else {
                    Vec::new()
                })
        })
        .collect();

    (contracts, records)
}

fn ordered(resolution: &Resolution) -> Vec<(String, Vec<String>)> {
    resolution
        .contract_full
        .iter()
        .chain(resolution.contract_inherited.iter())
        .chain(resolution.contract_unique.iter())
        .chain(resolution.record_full.iter())
        .chain(resolution.record_inherited.iter())
        .chain(resolution.record_unique.iter())
        .map(|(name, set)| (name.clone(), set.names().map(str::to_string).collect()))
        .collect()
}

#[test]
fn test_repeated_runs_are_identical() {
    let (contracts, records) = wide_fixture();

    let first = resolve(&contracts, &records);
    let second = resolve(&contracts, &records);

    assert_eq!(ordered(&first), ordered(&second));
    assert_eq!(first, second);
}

#[test]
fn test_output_follows_declaration_order() {
    let resolution = resolve(
        &[
            ContractSpec::new("Zeta").with_method(MethodSignature::new("Z")),
            ContractSpec::new("Alpha").with_method(MethodSignature::new("A")),
            ContractSpec::new("Mid").composing(["Zeta", "Alpha"]),
        ],
        &[],
    );

    assert_eq!(
        resolution.contract_names().collect::<Vec<_>>(),
        vec!["Zeta", "Alpha", "Mid"]
    );
    assert_eq!(names(&resolution.contract_full["Mid"]), vec!["Z", "A"]);
}

#[test]
fn test_composition_order_decides_position() {
    let resolution = resolve(
        &[
            ContractSpec::new("First").with_method(MethodSignature::new("B")),
            ContractSpec::new("Second")
                .with_method(MethodSignature::new("A"))
                .with_method(MethodSignature::new("B")),
            ContractSpec::new("Both").composing(["First", "Second"]),
        ],
        &[],
    );

    assert_eq!(names(&resolution.contract_full["Both"]), vec!["B", "A"]);
}
