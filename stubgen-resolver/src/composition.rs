//! Memoized resolution over a composition graph
//!
//! Contracts and records resolve the same way: an entity's full set is its
//! own contribution followed by the full sets of everything it composes, in
//! declared order, earlier names winning. The only difference is where the
//! own contribution comes from, which [`Composite`] abstracts.
//!
//! `inherited` is derived once full sets are known: the merge of the full
//! sets of every composed entity, restricted to names in the entity's own
//! full set. `unique` is `full` minus `inherited`.
//!
//! ## Cycles
//!
//! Before visiting composed entities, the entity is marked in progress. A
//! composed name that is still in progress is part of a cycle; that edge
//! contributes the empty set to the `full` set of the entity that closes the
//! cycle. Resolution always terminates and always produces a result for
//! every declared entity. Which edge closes a cycle depends on the order
//! entities are resolved in, which is declaration order. A self-composing
//! entity inherits its own methods and so has an empty `unique` set.

use crate::diagnostics::{DiagnosticSink, ResolutionDiagnostic};
use crate::method_set::{MergePolicy, MethodSet, MethodSetView};
use crate::specs::EntityKind;
use indexmap::IndexMap;

/// An entity that composes other entities of the same kind
pub trait Composite {
    /// Kind reported for dangling `composes` entries
    const KIND: EntityKind;

    /// Whatever the entity needs to compute its own contribution
    type Context;

    fn name(&self) -> &str;

    fn composes(&self) -> &[String];

    /// Methods the entity contributes before anything it composes
    fn own_methods(&self, context: &Self::Context, sink: &mut DiagnosticSink) -> MethodSet;
}

/// Per-entity memo state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoEntry {
    /// Placeholder written before composed entities are visited
    InProgress,
    /// The entity's full set
    Resolved(MethodSet),
}

/// Resolved sets for every entity of one kind, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSets {
    pub full: IndexMap<String, MethodSet>,
    pub inherited: IndexMap<String, MethodSet>,
    pub unique: IndexMap<String, MethodSet>,
}

/// Memoizing resolver for one kind of entity
pub struct CompositionResolver<'a, S: Composite> {
    entities: &'a IndexMap<&'a str, &'a S>,
    context: &'a S::Context,
    memo: IndexMap<String, MemoEntry>,
}

impl<'a, S: Composite> CompositionResolver<'a, S> {
    pub fn with_context(entities: &'a IndexMap<&'a str, &'a S>, context: &'a S::Context) -> Self {
        Self {
            entities,
            context,
            memo: IndexMap::with_capacity(entities.len()),
        }
    }

    /// Resolve the full set of `name`, reusing earlier results.
    ///
    /// Returns the empty set for a name that is in progress (a cycle) or not
    /// declared; reporting undeclared names is the caller's job.
    pub fn resolve(&mut self, name: &str, sink: &mut DiagnosticSink) -> MethodSet {
        match self.memo.get(name) {
            Some(MemoEntry::Resolved(full)) => return full.clone(),
            Some(MemoEntry::InProgress) => {
                tracing::trace!(kind = %S::KIND, entity = name, "cycle edge contributes nothing");
                return MethodSet::new();
            }
            None => {}
        }

        let Some(&entity) = self.entities.get(name) else {
            return MethodSet::new();
        };

        self.memo.insert(name.to_string(), MemoEntry::InProgress);

        let mut full = entity.own_methods(self.context, sink);

        for composed in entity.composes() {
            if !self.entities.contains_key(composed.as_str()) {
                sink.push(ResolutionDiagnostic::unresolved_reference(
                    S::KIND,
                    composed.as_str(),
                    name,
                ));
                continue;
            }

            let contribution = self.resolve(composed, sink);
            tracing::trace!(
                kind = %S::KIND,
                entity = name,
                composed = composed.as_str(),
                methods = contribution.len(),
                "merging composed methods"
            );
            full.merge(&contribution, MergePolicy::FirstWins);
        }

        tracing::debug!(kind = %S::KIND, entity = name, full = full.len(), "resolved");
        self.memo
            .insert(name.to_string(), MemoEntry::Resolved(full.clone()));
        full
    }

    /// Methods `entity` receives through composition: the full sets of the
    /// entities it composes, first occurrence winning, restricted to `full`
    fn inherited(&self, entity: &S, full: &MethodSet) -> MethodSet {
        let mut inherited = MethodSet::new();
        for composed in entity.composes() {
            let Some(MemoEntry::Resolved(composed_full)) = self.memo.get(composed.as_str()) else {
                continue;
            };
            for method in composed_full {
                if full.contains(&method.name) {
                    inherited.insert(method.clone(), MergePolicy::FirstWins);
                }
            }
        }
        inherited
    }

    /// The full, inherited and unique sets of `name`, once it has been resolved
    pub fn view(&self, name: &str) -> Option<MethodSetView> {
        let Some(MemoEntry::Resolved(full)) = self.memo.get(name) else {
            return None;
        };
        let &entity = self.entities.get(name)?;
        Some(MethodSetView::new(full.clone(), self.inherited(entity, full)))
    }

    /// Resolve every declared entity and collect the results in declaration order
    pub fn resolve_all(mut self, sink: &mut DiagnosticSink) -> ResolvedSets {
        let entities = self.entities;
        for name in entities.keys() {
            self.resolve(name, sink);
        }

        let mut sets = ResolvedSets::default();
        for name in entities.keys() {
            let Some(view) = self.view(name) else {
                continue;
            };
            tracing::trace!(
                kind = %S::KIND,
                entity = *name,
                inherited = view.inherited.len(),
                unique = view.unique.len(),
                "derived inherited and unique sets"
            );
            sets.full.insert(name.to_string(), view.full);
            sets.inherited.insert(name.to_string(), view.inherited);
            sets.unique.insert(name.to_string(), view.unique);
        }
        sets
    }
}
