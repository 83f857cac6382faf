//! Name lookup for contract and record declarations
//!
//! The registry is built once per resolution run and never changes after.
//! A name declared more than once resolves to its last declaration; the
//! position of the name in iteration order is that of its first declaration.

use crate::diagnostics::{DiagnosticSink, ResolutionDiagnostic};
use crate::specs::{ContractSpec, EntityKind, RecordSpec};
use indexmap::IndexMap;

/// Build a name → item mapping; the last item with a given name wins
pub fn index<'a, T, F>(items: &'a [T], name_of: F) -> IndexMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut mapping = IndexMap::with_capacity(items.len());
    for item in items {
        mapping.insert(name_of(item), item);
    }
    mapping
}

/// Names that occur more than once in `items`, with their counts, in first-seen order
pub fn duplicate_names<'a, T, F>(items: &'a [T], name_of: F) -> IndexMap<&'a str, usize>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut counts: IndexMap<&'a str, usize> = IndexMap::new();
    for item in items {
        *counts.entry(name_of(item)).or_insert(0) += 1;
    }
    counts.retain(|_, count| *count > 1);
    counts
}

/// Lookup tables for every declared contract and record
#[derive(Debug, Clone)]
pub struct SpecRegistry<'a> {
    contracts: IndexMap<&'a str, &'a ContractSpec>,
    records: IndexMap<&'a str, &'a RecordSpec>,
    contract_duplicates: IndexMap<&'a str, usize>,
    record_duplicates: IndexMap<&'a str, usize>,
}

impl<'a> SpecRegistry<'a> {
    pub fn new(contracts: &'a [ContractSpec], records: &'a [RecordSpec]) -> Self {
        Self {
            contracts: index(contracts, |contract| contract.name.as_str()),
            records: index(records, |record| record.name.as_str()),
            contract_duplicates: duplicate_names(contracts, |contract| contract.name.as_str()),
            record_duplicates: duplicate_names(records, |record| record.name.as_str()),
        }
    }

    pub fn contract(&self, name: &str) -> Option<&'a ContractSpec> {
        self.contracts.get(name).copied()
    }

    pub fn record(&self, name: &str) -> Option<&'a RecordSpec> {
        self.records.get(name).copied()
    }

    pub fn has_contract(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    pub fn has_record(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn contracts(&self) -> &IndexMap<&'a str, &'a ContractSpec> {
        &self.contracts
    }

    pub fn records(&self) -> &IndexMap<&'a str, &'a RecordSpec> {
        &self.records
    }

    /// Contract names in declaration order, without duplicates
    pub fn contract_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.contracts.keys().copied()
    }

    /// Record names in declaration order, without duplicates
    pub fn record_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.records.keys().copied()
    }

    /// Report every name declared more than once
    pub fn report_duplicates(&self, sink: &mut DiagnosticSink) {
        let duplicates = self
            .contract_duplicates
            .iter()
            .map(|(name, count)| (EntityKind::Contract, name, count))
            .chain(
                self.record_duplicates
                    .iter()
                    .map(|(name, count)| (EntityKind::Record, name, count)),
            );

        for (kind, name, count) in duplicates {
            sink.push(ResolutionDiagnostic::DuplicateDeclaration {
                kind,
                name: name.to_string(),
                count: *count,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::MethodSignature;

    #[test]
    fn test_index_last_declaration_wins() {
        let contracts = vec![
            ContractSpec::new("Reader").with_method(MethodSignature::new("Read")),
            ContractSpec::new("Writer"),
            ContractSpec::new("Reader").with_method(MethodSignature::new("ReadAll")),
        ];

        let mapping = index(&contracts, |contract| contract.name.as_str());

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping["Reader"].methods[0].name, "ReadAll");
        let order: Vec<&str> = mapping.keys().copied().collect();
        assert_eq!(order, vec!["Reader", "Writer"]);
    }

    #[test]
    fn test_registry_lookup() {
        let contracts = vec![ContractSpec::new("Reader")];
        let records = vec![RecordSpec::new("File").conforming_to(["Reader"])];
        let registry = SpecRegistry::new(&contracts, &records);

        assert!(registry.has_contract("Reader"));
        assert!(!registry.has_contract("File"));
        assert!(registry.has_record("File"));
        assert_eq!(registry.record("File").unwrap().conforms_to, vec!["Reader"]);
        assert!(registry.contract("Missing").is_none());
    }

    #[test]
    fn test_duplicate_reporting() {
        let contracts = vec![
            ContractSpec::new("A"),
            ContractSpec::new("B"),
            ContractSpec::new("A"),
            ContractSpec::new("A"),
        ];
        let records = vec![RecordSpec::new("R"), RecordSpec::new("R")];
        let registry = SpecRegistry::new(&contracts, &records);

        let mut sink = DiagnosticSink::new();
        registry.report_duplicates(&mut sink);

        assert_eq!(
            sink.into_diagnostics(),
            vec![
                ResolutionDiagnostic::DuplicateDeclaration {
                    kind: EntityKind::Contract,
                    name: "A".to_string(),
                    count: 3,
                },
                ResolutionDiagnostic::DuplicateDeclaration {
                    kind: EntityKind::Record,
                    name: "R".to_string(),
                    count: 2,
                },
            ]
        );
    }
}
