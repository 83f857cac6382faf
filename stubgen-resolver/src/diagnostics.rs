//! Resolution diagnostics
//!
//! Nothing the resolver encounters is fatal. Dangling references (and, when
//! enabled, composition cycles and duplicate declarations) are recorded here
//! and handed back to the caller, which decides whether to log them, fail a
//! build, or ignore them.

use crate::specs::EntityKind;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// A non-fatal finding from a resolution run
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionDiagnostic {
    #[error("{referencing_entity} refers to unknown {kind} {referenced_name}")]
    #[diagnostic(
        code(stubgen::resolve::unresolved_reference),
        severity(Warning),
        help("Declare {kind} {referenced_name} or remove the reference; it contributes no methods")
    )]
    UnresolvedReference {
        kind: EntityKind,
        referenced_name: String,
        referencing_entity: String,
    },

    #[error("{kind} composition cycle: {}", .members.join(" -> "))]
    #[diagnostic(
        code(stubgen::resolve::composition_cycle),
        severity(Warning),
        help("The entity that closes the cycle receives no methods through that edge")
    )]
    CompositionCycle { kind: EntityKind, members: Vec<String> },

    #[error("{kind} {name} is declared {count} times")]
    #[diagnostic(
        code(stubgen::resolve::duplicate_declaration),
        severity(Warning),
        help("Only the last declaration of {name} is used")
    )]
    DuplicateDeclaration {
        kind: EntityKind,
        name: String,
        count: usize,
    },
}

impl ResolutionDiagnostic {
    pub fn unresolved_reference(
        kind: EntityKind,
        referenced_name: impl Into<String>,
        referencing_entity: impl Into<String>,
    ) -> Self {
        ResolutionDiagnostic::UnresolvedReference {
            kind,
            referenced_name: referenced_name.into(),
            referencing_entity: referencing_entity.into(),
        }
    }

    /// The kind of entity the diagnostic is about
    pub fn kind(&self) -> EntityKind {
        match self {
            ResolutionDiagnostic::UnresolvedReference { kind, .. }
            | ResolutionDiagnostic::CompositionCycle { kind, .. }
            | ResolutionDiagnostic::DuplicateDeclaration { kind, .. } => *kind,
        }
    }

    /// The dangling name, for unresolved references
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            ResolutionDiagnostic::UnresolvedReference {
                referenced_name, ..
            } => Some(referenced_name),
            _ => None,
        }
    }

    /// The declaration the diagnostic should be reported against
    pub fn referencing_entity(&self) -> Option<&str> {
        match self {
            ResolutionDiagnostic::UnresolvedReference {
                referencing_entity, ..
            } => Some(referencing_entity),
            ResolutionDiagnostic::CompositionCycle { members, .. } => {
                members.first().map(String::as_str)
            }
            ResolutionDiagnostic::DuplicateDeclaration { name, .. } => Some(name),
        }
    }
}

/// Append-only collector for diagnostics produced during one resolution run
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<ResolutionDiagnostic>,
    /// Maximum number of diagnostics to keep; `None` keeps everything
    max_diagnostics: Option<usize>,
    /// Diagnostics discarded after the limit was reached
    dropped: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_diagnostics: usize) -> Self {
        Self {
            max_diagnostics: Some(max_diagnostics),
            ..Self::default()
        }
    }

    /// Add a diagnostic to the collection
    pub fn push(&mut self, diagnostic: ResolutionDiagnostic) {
        tracing::debug!(%diagnostic, "resolution diagnostic");

        match self.max_diagnostics {
            Some(max) if self.diagnostics.len() >= max => self.dropped += 1,
            _ => self.diagnostics.push(diagnostic),
        }
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = ResolutionDiagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn diagnostics(&self) -> &[ResolutionDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<ResolutionDiagnostic> {
        self.diagnostics
    }

    pub fn summary(&self) -> DiagnosticSummary {
        DiagnosticSummary::from_diagnostics(&self.diagnostics)
    }
}

/// Summary of diagnostic counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub total: usize,
    pub unresolved_references: usize,
    pub composition_cycles: usize,
    pub duplicate_declarations: usize,
}

impl DiagnosticSummary {
    pub fn from_diagnostics(diagnostics: &[ResolutionDiagnostic]) -> Self {
        let mut summary = Self::default();

        for diagnostic in diagnostics {
            summary.total += 1;
            match diagnostic {
                ResolutionDiagnostic::UnresolvedReference { .. } => {
                    summary.unresolved_references += 1
                }
                ResolutionDiagnostic::CompositionCycle { .. } => summary.composition_cycles += 1,
                ResolutionDiagnostic::DuplicateDeclaration { .. } => {
                    summary.duplicate_declarations += 1
                }
            }
        }

        summary
    }
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            write!(f, "No diagnostics")
        } else {
            write!(
                f,
                "{} total ({} unresolved references, {} cycles, {} duplicates)",
                self.total,
                self.unresolved_references,
                self.composition_cycles,
                self.duplicate_declarations
            )
        }
    }
}
