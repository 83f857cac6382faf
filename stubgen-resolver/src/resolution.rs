//! Resolution driver
//!
//! Builds the registry, resolves every contract and then every record, and
//! hands back all six name-keyed mappings together with the diagnostics.
//! A run never fails: every declared entity gets a result.

use crate::composition::ResolvedSets;
use crate::contracts::ContractResolver;
use crate::dependency_graph::report_cycles;
use crate::diagnostics::{DiagnosticSink, DiagnosticSummary, ResolutionDiagnostic};
use crate::method_set::{MethodSet, MethodSetView};
use crate::options::ResolverOptions;
use crate::records::RecordResolver;
use crate::registry::SpecRegistry;
use crate::specs::{ContractSpec, EntityKind, RecordSpec, SpecSet};
use indexmap::IndexMap;

/// Output of a resolution run. Every mapping is keyed by entity name and
/// iterates in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub contract_full: IndexMap<String, MethodSet>,
    pub contract_unique: IndexMap<String, MethodSet>,
    pub contract_inherited: IndexMap<String, MethodSet>,
    pub record_full: IndexMap<String, MethodSet>,
    pub record_unique: IndexMap<String, MethodSet>,
    pub record_inherited: IndexMap<String, MethodSet>,
    pub diagnostics: Vec<ResolutionDiagnostic>,
    /// Diagnostics discarded after `max_diagnostics` was reached
    pub dropped_diagnostics: usize,
}

impl Resolution {
    fn assemble(contracts: ResolvedSets, records: ResolvedSets, sink: DiagnosticSink) -> Self {
        let dropped_diagnostics = sink.dropped();
        Self {
            contract_full: contracts.full,
            contract_unique: contracts.unique,
            contract_inherited: contracts.inherited,
            record_full: records.full,
            record_unique: records.unique,
            record_inherited: records.inherited,
            diagnostics: sink.into_diagnostics(),
            dropped_diagnostics,
        }
    }

    pub fn contract_view(&self, name: &str) -> Option<MethodSetView> {
        Some(MethodSetView {
            full: self.contract_full.get(name)?.clone(),
            inherited: self.contract_inherited.get(name)?.clone(),
            unique: self.contract_unique.get(name)?.clone(),
        })
    }

    pub fn record_view(&self, name: &str) -> Option<MethodSetView> {
        Some(MethodSetView {
            full: self.record_full.get(name)?.clone(),
            inherited: self.record_inherited.get(name)?.clone(),
            unique: self.record_unique.get(name)?.clone(),
        })
    }

    /// Look a name up among contracts first, then records
    pub fn view(&self, name: &str) -> Option<(EntityKind, MethodSetView)> {
        self.contract_view(name)
            .map(|view| (EntityKind::Contract, view))
            .or_else(|| self.record_view(name).map(|view| (EntityKind::Record, view)))
    }

    pub fn contract_names(&self) -> impl Iterator<Item = &str> {
        self.contract_full.keys().map(String::as_str)
    }

    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.record_full.keys().map(String::as_str)
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty() || self.dropped_diagnostics > 0
    }

    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_diagnostics(&self.diagnostics)
    }
}

/// Resolve with default options
pub fn resolve(contracts: &[ContractSpec], records: &[RecordSpec]) -> Resolution {
    resolve_with_options(contracts, records, &ResolverOptions::default())
}

pub fn resolve_spec_set(specs: &SpecSet, options: &ResolverOptions) -> Resolution {
    resolve_with_options(&specs.contracts, &specs.records, options)
}

pub fn resolve_with_options(
    contracts: &[ContractSpec],
    records: &[RecordSpec],
    options: &ResolverOptions,
) -> Resolution {
    let span = tracing::info_span!(
        "resolve",
        contracts = contracts.len(),
        records = records.len()
    );
    let _enter = span.enter();

    let registry = SpecRegistry::new(contracts, records);
    let mut sink = match options.max_diagnostics {
        Some(max) => DiagnosticSink::with_limit(max),
        None => DiagnosticSink::new(),
    };

    if options.report_duplicates {
        registry.report_duplicates(&mut sink);
    }
    if options.report_cycles {
        report_cycles(registry.contracts(), &mut sink);
        report_cycles(registry.records(), &mut sink);
    }

    // Records read contract full sets, so every contract is resolved first
    let contract_sets = ContractResolver::new(registry.contracts()).resolve_all(&mut sink);
    let record_sets =
        RecordResolver::new(registry.records(), &contract_sets.full).resolve_all(&mut sink);

    let resolution = Resolution::assemble(contract_sets, record_sets, sink);
    tracing::info!(
        contracts = resolution.contract_full.len(),
        records = resolution.record_full.len(),
        diagnostics = resolution.diagnostics.len(),
        "resolution finished"
    );
    resolution
}
