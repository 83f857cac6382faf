//! Composition graph analysis using petgraph
//!
//! Resolution itself never needs the graph: the memo placeholder already
//! keeps cyclic composition from recursing forever. The graph is only built
//! when cycles should be reported instead of silently cut.

use crate::composition::Composite;
use crate::diagnostics::{DiagnosticSink, ResolutionDiagnostic};
use indexmap::IndexMap;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};

/// Directed `entity -> composed entity` graph for one kind of entity
#[derive(Debug, Clone)]
pub struct CompositionGraph {
    /// Nodes are added in declaration order, so node indices follow it too
    graph: DiGraph<String, ()>,
    /// Map from entity name to graph node index
    name_to_node: IndexMap<String, NodeIndex>,
}

impl CompositionGraph {
    /// Build the graph for every registered entity. Composed names that are
    /// not registered are skipped; they are reported during resolution.
    pub fn build<S: Composite>(entities: &IndexMap<&str, &S>) -> Self {
        let mut graph = DiGraph::with_capacity(entities.len(), entities.len());
        let mut name_to_node = IndexMap::with_capacity(entities.len());

        for name in entities.keys() {
            let node = graph.add_node(name.to_string());
            name_to_node.insert(name.to_string(), node);
        }

        for entity in entities.values() {
            let Some(&from) = name_to_node.get(entity.name()) else {
                continue;
            };
            for composed in entity.composes() {
                if let Some(&to) = name_to_node.get(composed.as_str()) {
                    graph.update_edge(from, to, ());
                }
            }
        }

        Self {
            graph,
            name_to_node,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `from` composes `to` directly
    pub fn composes(&self, from: &str, to: &str) -> bool {
        match (self.name_to_node.get(from), self.name_to_node.get(to)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Every composition cycle, one entry per strongly connected component.
    ///
    /// Members are listed in declaration order and cycles are ordered by
    /// their earliest declared member, so the result is stable.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut components: Vec<Vec<NodeIndex>> = algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .collect();

        for component in &mut components {
            component.sort();
        }
        components.sort_by_key(|component| component.first().copied());

        components
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|node| self.graph[node].clone())
                    .collect()
            })
            .collect()
    }

    pub fn is_cyclic(&self) -> bool {
        algo::is_cyclic_directed(&self.graph)
    }
}

/// Report each composition cycle among `entities` once
pub fn report_cycles<S: Composite>(entities: &IndexMap<&str, &S>, sink: &mut DiagnosticSink) {
    let graph = CompositionGraph::build(entities);
    for members in graph.cycles() {
        sink.push(ResolutionDiagnostic::CompositionCycle {
            kind: S::KIND,
            members,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::index;
    use crate::specs::{ContractSpec, EntityKind, RecordSpec};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let contracts = vec![
            ContractSpec::new("ReadWriter").composing(["Reader", "Writer"]),
            ContractSpec::new("Reader"),
            ContractSpec::new("Writer").composing(["Missing"]),
        ];
        let registry = index(&contracts, |contract| contract.name.as_str());
        let graph = CompositionGraph::build(&registry);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.composes("ReadWriter", "Writer"));
        assert!(!graph.composes("Writer", "Missing"));
        assert!(!graph.is_cyclic());
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_cycles_in_declaration_order() {
        let contracts = vec![
            ContractSpec::new("Solo").composing(["Solo"]),
            ContractSpec::new("C").composing(["A"]),
            ContractSpec::new("A").composing(["B"]),
            ContractSpec::new("B").composing(["C"]),
            ContractSpec::new("Leaf"),
        ];
        let registry = index(&contracts, |contract| contract.name.as_str());
        let graph = CompositionGraph::build(&registry);

        assert!(graph.is_cyclic());
        assert_eq!(
            graph.cycles(),
            vec![
                vec!["Solo".to_string()],
                vec!["C".to_string(), "A".to_string(), "B".to_string()],
            ]
        );
    }

    #[test]
    fn test_report_cycles_uses_entity_kind() {
        let records = vec![
            RecordSpec::new("Left").composing(["Right"]),
            RecordSpec::new("Right").composing(["Left"]),
        ];
        let registry = index(&records, |record| record.name.as_str());
        let mut sink = DiagnosticSink::new();

        report_cycles(&registry, &mut sink);

        assert_eq!(
            sink.into_diagnostics(),
            vec![ResolutionDiagnostic::CompositionCycle {
                kind: EntityKind::Record,
                members: vec!["Left".to_string(), "Right".to_string()],
            }]
        );
    }
}
