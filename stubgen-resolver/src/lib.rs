//! stubgen resolver
//!
//! Computes, for every contract and record in a specification, the methods
//! it must expose (`full`), the methods it receives through composition
//! (`inherited`) and the methods it must declare itself (`unique`).
//!
//! ## Model
//!
//! - **Contracts** declare methods and may embed other contracts.
//! - **Records** declare no methods. They implement contracts, which adds
//!   those contracts' methods to their obligations, and may embed other
//!   records, whose methods they inherit.
//!
//! Methods are identified by name alone. Whenever two sources provide the
//! same name the earlier one wins, except within a single contract's own
//! method list where a later declaration replaces an earlier one.
//!
//! ## Failure model
//!
//! Nothing here is fatal. Dangling references contribute nothing and are
//! reported as [`ResolutionDiagnostic`]s. A composition cycle is cut at the
//! edge that closes it: the entity closing the cycle gets nothing through
//! that edge. Cycles and duplicate declarations are only reported when
//! [`ResolverOptions`] asks for it.
//!
//! ## Determinism
//!
//! All mappings and method sets are insertion ordered; identical input
//! always produces identical output.

pub mod composition;
pub mod contracts;
pub mod dependency_graph;
pub mod diagnostics;
pub mod lowering;
pub mod method_set;
pub mod options;
pub mod records;
pub mod registry;
pub mod resolution;
pub mod signature;
pub mod specs;

#[cfg(test)]
mod tests;

// Re-export public API
pub use composition::{Composite, CompositionResolver, ResolvedSets};
pub use contracts::ContractResolver;
pub use dependency_graph::CompositionGraph;
pub use diagnostics::{DiagnosticSink, DiagnosticSummary, ResolutionDiagnostic};
pub use lowering::{lower_program, lower_programs};
pub use method_set::{combine_by_names, merge, subtract, MergePolicy, MethodSet, MethodSetView};
pub use options::ResolverOptions;
pub use records::RecordResolver;
pub use registry::{index, SpecRegistry};
pub use resolution::{resolve, resolve_spec_set, resolve_with_options, Resolution};
pub use signature::{MethodSignature, Parameter};
pub use specs::{ContractSpec, EntityKind, Field, RecordSpec, SpecSet};

/// Lower and resolve a single parsed document
pub fn resolve_program(
    program: &stubgen_parser::Program,
    options: &ResolverOptions,
) -> Resolution {
    resolve_spec_set(&lower_program(program), options)
}
