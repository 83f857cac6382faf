//! Contract resolution
//!
//! A contract's full set is its own methods (a later declaration of a name
//! replaces an earlier one within the same contract) followed by the full
//! sets of the contracts it embeds, in order, without overriding names that
//! are already present.

use crate::composition::{Composite, CompositionResolver};
use crate::diagnostics::DiagnosticSink;
use crate::method_set::{MergePolicy, MethodSet};
use crate::specs::{ContractSpec, EntityKind};
use indexmap::IndexMap;

impl Composite for ContractSpec {
    const KIND: EntityKind = EntityKind::Contract;

    type Context = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn composes(&self) -> &[String] {
        &self.composes
    }

    fn own_methods(&self, _context: &(), _sink: &mut DiagnosticSink) -> MethodSet {
        MethodSet::from_methods(self.methods.iter().cloned(), MergePolicy::LastWins)
    }
}

pub type ContractResolver<'a> = CompositionResolver<'a, ContractSpec>;

impl<'a> ContractResolver<'a> {
    pub fn new(contracts: &'a IndexMap<&'a str, &'a ContractSpec>) -> Self {
        Self::with_context(contracts, &())
    }

    /// Full method set of the contract `name`, memoized
    pub fn resolve_contract(&mut self, name: &str, sink: &mut DiagnosticSink) -> MethodSet {
        self.resolve(name, sink)
    }
}
