//! Record resolution
//!
//! Records declare no methods of their own. Their full set is the combined
//! full sets of the contracts they implement, followed by the full sets of
//! the records they embed. Only the embedded records count as inherited;
//! what a record gets through conformance is still its own obligation.

use crate::composition::{Composite, CompositionResolver};
use crate::diagnostics::DiagnosticSink;
use crate::method_set::{combine_by_names, MethodSet};
use crate::specs::{EntityKind, RecordSpec};
use indexmap::IndexMap;

impl Composite for RecordSpec {
    const KIND: EntityKind = EntityKind::Record;

    /// Resolved contract full sets, keyed by contract name
    type Context = IndexMap<String, MethodSet>;

    fn name(&self) -> &str {
        &self.name
    }

    fn composes(&self) -> &[String] {
        &self.composes
    }

    fn own_methods(
        &self,
        contract_full: &IndexMap<String, MethodSet>,
        sink: &mut DiagnosticSink,
    ) -> MethodSet {
        combine_by_names(
            contract_full,
            &self.conforms_to,
            EntityKind::Contract,
            &self.name,
            sink,
        )
    }
}

pub type RecordResolver<'a> = CompositionResolver<'a, RecordSpec>;

impl<'a> RecordResolver<'a> {
    /// `contract_full` must hold the full set of every declared contract
    pub fn new(
        records: &'a IndexMap<&'a str, &'a RecordSpec>,
        contract_full: &'a IndexMap<String, MethodSet>,
    ) -> Self {
        Self::with_context(records, contract_full)
    }

    /// Full method set of the record `name`, memoized
    pub fn resolve_record(&mut self, name: &str, sink: &mut DiagnosticSink) -> MethodSet {
        self.resolve(name, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ResolutionDiagnostic;
    use crate::method_set::MergePolicy;
    use crate::registry::index;
    use crate::signature::MethodSignature;
    use pretty_assertions::assert_eq;

    fn set(names: &[&str]) -> MethodSet {
        MethodSet::from_methods(
            names.iter().map(|name| MethodSignature::new(*name)),
            MergePolicy::FirstWins,
        )
    }

    fn names(set: &MethodSet) -> Vec<&str> {
        set.names().collect()
    }

    fn contract_sets() -> IndexMap<String, MethodSet> {
        let mut sets = IndexMap::new();
        sets.insert("Reader".to_string(), set(&["Read"]));
        sets.insert("Closer".to_string(), set(&["Close"]));
        sets.insert("ReadCloser".to_string(), set(&["Close", "Read"]));
        sets
    }

    #[test]
    fn test_conformance_is_not_inherited() {
        let contracts = contract_sets();
        let records = vec![RecordSpec::new("File").conforming_to(["Reader", "Closer"])];
        let registry = index(&records, |record| record.name.as_str());
        let mut resolver = RecordResolver::new(&registry, &contracts);
        let mut sink = DiagnosticSink::new();

        let full = resolver.resolve_record("File", &mut sink);

        assert_eq!(names(&full), vec!["Read", "Close"]);
        let view = resolver.view("File").unwrap();
        assert!(view.inherited.is_empty());
        assert_eq!(view.unique, full);
    }

    #[test]
    fn test_embedded_record_methods_are_inherited() {
        let contracts = contract_sets();
        let records = vec![
            RecordSpec::new("Buffered")
                .composing(["File"])
                .conforming_to(["ReadCloser"]),
            RecordSpec::new("File").conforming_to(["Reader"]),
        ];
        let registry = index(&records, |record| record.name.as_str());
        let mut resolver = RecordResolver::new(&registry, &contracts);
        let mut sink = DiagnosticSink::new();

        let full = resolver.resolve_record("Buffered", &mut sink);

        assert_eq!(names(&full), vec!["Close", "Read"]);
        let view = resolver.view("Buffered").unwrap();
        assert_eq!(names(&view.inherited), vec!["Read"]);
        assert_eq!(names(&view.unique), vec!["Close"]);
    }

    #[test]
    fn test_dangling_conformance_and_composition() {
        let contracts = contract_sets();
        let records = vec![RecordSpec::new("Socket")
            .conforming_to(["Writer", "Reader"])
            .composing(["Conn"])];
        let registry = index(&records, |record| record.name.as_str());
        let mut resolver = RecordResolver::new(&registry, &contracts);
        let mut sink = DiagnosticSink::new();

        let full = resolver.resolve_record("Socket", &mut sink);

        assert_eq!(names(&full), vec!["Read"]);
        assert_eq!(
            sink.into_diagnostics(),
            vec![
                ResolutionDiagnostic::unresolved_reference(EntityKind::Contract, "Writer", "Socket"),
                ResolutionDiagnostic::unresolved_reference(EntityKind::Record, "Conn", "Socket"),
            ]
        );
    }
}
