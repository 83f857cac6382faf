//! Ordered, name-deduplicated method sets and the algebra over them
//!
//! Every set keeps insertion order and identifies methods by name only. No
//! operation here iterates a hash map for output, so results are identical
//! across runs for identical inputs.

use crate::diagnostics::{DiagnosticSink, ResolutionDiagnostic};
use crate::signature::MethodSignature;
use crate::specs::EntityKind;
use indexmap::IndexMap;

/// Which signature survives when two sets provide the same method name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// The signature seen first is kept
    FirstWins,
    /// The signature seen last replaces earlier ones in place; the name keeps
    /// the position of its first occurrence
    LastWins,
}

/// An ordered set of method signatures keyed by method name
#[derive(Debug, Clone, Default)]
pub struct MethodSet {
    methods: IndexMap<String, MethodSignature>,
}

impl MethodSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from signatures in order, resolving repeated names with `policy`
    pub fn from_methods<I>(methods: I, policy: MergePolicy) -> Self
    where
        I: IntoIterator<Item = MethodSignature>,
    {
        let mut set = Self::new();
        for method in methods {
            set.insert(method, policy);
        }
        set
    }

    /// Insert a signature; returns `true` if the name was not present before
    pub fn insert(&mut self, method: MethodSignature, policy: MergePolicy) -> bool {
        match policy {
            MergePolicy::FirstWins => {
                if self.methods.contains_key(&method.name) {
                    return false;
                }
                self.methods.insert(method.name.clone(), method);
                true
            }
            MergePolicy::LastWins => self.methods.insert(method.name.clone(), method).is_none(),
        }
    }

    /// Merge `other` into this set in `other`'s order
    pub fn merge(&mut self, other: &MethodSet, policy: MergePolicy) {
        for method in other.iter() {
            self.insert(method.clone(), policy);
        }
    }

    /// Methods of this set whose names are absent from `remove`, in this set's order
    pub fn subtract(&self, remove: &MethodSet) -> MethodSet {
        MethodSet {
            methods: self
                .methods
                .iter()
                .filter(|(name, _)| !remove.contains(name))
                .map(|(name, method)| (name.clone(), method.clone()))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodSignature> {
        self.methods.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<MethodSignature> {
        self.methods.values().cloned().collect()
    }
}

// IndexMap equality ignores order; sets are only equal when they list the
// same signatures in the same order.
impl PartialEq for MethodSet {
    fn eq(&self, other: &Self) -> bool {
        self.methods.len() == other.methods.len() && self.methods.iter().eq(other.methods.iter())
    }
}

impl Eq for MethodSet {}

impl<'a> IntoIterator for &'a MethodSet {
    type Item = &'a MethodSignature;
    type IntoIter = indexmap::map::Values<'a, String, MethodSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.values()
    }
}

impl IntoIterator for MethodSet {
    type Item = MethodSignature;
    type IntoIter = indexmap::map::IntoValues<String, MethodSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.into_values()
    }
}

/// The three derived sets of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSetView {
    /// Everything the entity must expose
    pub full: MethodSet,
    /// Methods received through composition
    pub inherited: MethodSet,
    /// `full` minus `inherited`: what the entity itself must declare
    pub unique: MethodSet,
}

impl MethodSetView {
    /// Derive `unique` from `full` and `inherited`
    pub fn new(full: MethodSet, inherited: MethodSet) -> Self {
        let unique = full.subtract(&inherited);
        Self {
            full,
            inherited,
            unique,
        }
    }
}

/// Merge several sets in order into a new set
pub fn merge<'a, I>(sets: I, policy: MergePolicy) -> MethodSet
where
    I: IntoIterator<Item = &'a MethodSet>,
{
    let mut merged = MethodSet::new();
    for set in sets {
        merged.merge(set, policy);
    }
    merged
}

/// Name-based difference preserving `base`'s order
pub fn subtract(base: &MethodSet, remove: &MethodSet) -> MethodSet {
    base.subtract(remove)
}

/// Merge the sets of the entities named in `names`, in list order, first
/// occurrence winning. A name with no entry in `sets` is reported as an
/// unresolved `kind` reference from `referencing_entity` and contributes nothing.
pub fn combine_by_names(
    sets: &IndexMap<String, MethodSet>,
    names: &[String],
    kind: EntityKind,
    referencing_entity: &str,
    sink: &mut DiagnosticSink,
) -> MethodSet {
    let mut combined = MethodSet::new();

    for name in names {
        match sets.get(name) {
            Some(set) => combined.merge(set, MergePolicy::FirstWins),
            None => sink.push(ResolutionDiagnostic::unresolved_reference(
                kind,
                name.as_str(),
                referencing_entity,
            )),
        }
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Parameter;
    use pretty_assertions::assert_eq;

    fn method(name: &str) -> MethodSignature {
        MethodSignature::new(name)
    }

    fn set(names: &[&str]) -> MethodSet {
        MethodSet::from_methods(names.iter().map(|name| method(name)), MergePolicy::FirstWins)
    }

    fn names(set: &MethodSet) -> Vec<&str> {
        set.names().collect()
    }

    #[test]
    fn test_merge_first_wins_keeps_earliest_signature() {
        let first = MethodSet::from_methods(
            [method("Log").with_input(Parameter::named("message", "string"))],
            MergePolicy::FirstWins,
        );
        let second = MethodSet::from_methods(
            [method("Log").with_input(Parameter::named("entry", "Entry")), method("Flush")],
            MergePolicy::FirstWins,
        );

        let merged = merge([&first, &second], MergePolicy::FirstWins);

        assert_eq!(names(&merged), vec!["Log", "Flush"]);
        assert_eq!(merged.get("Log").unwrap().inputs[0].type_name, "string");
    }

    #[test]
    fn test_merge_last_wins_replaces_in_place() {
        let first = set(&["A", "B", "C"]);
        let second = MethodSet::from_methods(
            [method("B").with_output(Parameter::unnamed("int")), method("D")],
            MergePolicy::FirstWins,
        );

        let merged = merge([&first, &second], MergePolicy::LastWins);

        assert_eq!(names(&merged), vec!["A", "B", "C", "D"]);
        assert_eq!(merged.get("B").unwrap().outputs.len(), 1);
    }

    #[test]
    fn test_from_methods_last_wins_within_one_list() {
        let methods = [
            method("Read"),
            method("Close"),
            method("Read").with_output(Parameter::unnamed("error")),
        ];
        let set = MethodSet::from_methods(methods, MergePolicy::LastWins);

        assert_eq!(names(&set), vec!["Read", "Close"]);
        assert_eq!(set.get("Read").unwrap().outputs.len(), 1);
    }

    #[test]
    fn test_subtract_preserves_base_order() {
        let base = set(&["D", "A", "C", "B"]);
        let remove = set(&["B", "D", "Z"]);

        assert_eq!(names(&subtract(&base, &remove)), vec!["A", "C"]);
        assert!(subtract(&base, &base).is_empty());
        assert_eq!(subtract(&base, &MethodSet::new()), base);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        assert_eq!(set(&["A", "B"]), set(&["A", "B"]));
        assert_ne!(set(&["A", "B"]), set(&["B", "A"]));
    }

    #[test]
    fn test_combine_by_names_reports_missing() {
        let mut sets = IndexMap::new();
        sets.insert("Reader".to_string(), set(&["Read"]));
        sets.insert("Writer".to_string(), set(&["Write", "Read"]));

        let mut sink = DiagnosticSink::new();
        let combined = combine_by_names(
            &sets,
            &["Writer".to_string(), "Closer".to_string(), "Reader".to_string()],
            EntityKind::Contract,
            "File",
            &mut sink,
        );

        assert_eq!(names(&combined), vec!["Write", "Read"]);
        assert_eq!(
            sink.diagnostics(),
            &[ResolutionDiagnostic::unresolved_reference(
                EntityKind::Contract,
                "Closer",
                "File"
            )]
        );
    }

    #[test]
    fn test_view_partitions_full() {
        let view = MethodSetView::new(set(&["Close", "Read"]), set(&["Read"]));

        assert_eq!(names(&view.unique), vec!["Close"]);
        assert_eq!(names(&view.inherited), vec!["Read"]);
    }
}
