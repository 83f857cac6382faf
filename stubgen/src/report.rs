// Diagnostic rendering for the stubgen CLI
// Attaches resolver diagnostics to the declaration that caused them

use crate::source::LoadedSource;
use miette::{Diagnostic, LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use std::fmt;
use stubgen_parser::Identifier;
use stubgen_resolver::{Resolution, ResolutionDiagnostic};
use thiserror::Error;

/// A resolver diagnostic pointed at its location in a loaded source
#[derive(Error, Debug)]
#[error("{diagnostic}")]
pub struct LocatedWarning {
    diagnostic: ResolutionDiagnostic,
    source_code: Option<NamedSource<String>>,
    label: Option<(SourceSpan, String)>,
}

impl LocatedWarning {
    /// Locate `diagnostic` in `sources`. Later sources win, like later declarations do.
    pub fn locate(diagnostic: ResolutionDiagnostic, sources: &[LoadedSource]) -> Self {
        let located = sources.iter().rev().find_map(|loaded| {
            let (identifier, label) = find_identifier(&diagnostic, loaded)?;
            Some((loaded, identifier, label))
        });

        match located {
            Some((loaded, identifier, label)) => Self {
                source_code: Some(NamedSource::new(&loaded.name, loaded.source.clone())),
                label: Some((SourceSpan::from(&identifier.span), label)),
                diagnostic,
            },
            None => Self {
                diagnostic,
                source_code: None,
                label: None,
            },
        }
    }

    pub fn diagnostic(&self) -> &ResolutionDiagnostic {
        &self.diagnostic
    }
}

fn find_identifier<'a>(
    diagnostic: &ResolutionDiagnostic,
    loaded: &'a LoadedSource,
) -> Option<(&'a Identifier, String)> {
    let program = &loaded.program;
    match diagnostic {
        ResolutionDiagnostic::UnresolvedReference {
            referenced_name,
            referencing_entity,
            ..
        } => program
            .find_reference(referencing_entity, referenced_name)
            .map(|identifier| (identifier, "not declared".to_string())),
        ResolutionDiagnostic::CompositionCycle { members, .. } => {
            let first = members.first()?;
            let label = if members.len() == 1 {
                "embeds itself".to_string()
            } else {
                "cycle starts here".to_string()
            };
            program
                .find_declaration(first)
                .map(|declaration| (declaration.name(), label))
        }
        ResolutionDiagnostic::DuplicateDeclaration { name, .. } => program
            .find_declaration(name)
            .map(|declaration| (declaration.name(), "this declaration is used".to_string())),
    }
}

impl Diagnostic for LocatedWarning {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic.code()
    }

    fn severity(&self) -> Option<Severity> {
        self.diagnostic.severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic.help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code
            .as_ref()
            .map(|source| source as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let (span, label) = self.label.as_ref()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label.clone()),
            *span,
        ))))
    }
}

/// Print every kept diagnostic to stderr through the installed miette
/// handler, followed by a count of those dropped by `max_diagnostics`
pub fn print_diagnostics(resolution: &Resolution, sources: &[LoadedSource]) {
    for diagnostic in &resolution.diagnostics {
        let warning = LocatedWarning::locate(diagnostic.clone(), sources);
        eprintln!("{:?}", miette::Report::new(warning));
    }
    if let Some(notice) = dropped_notice(resolution) {
        eprintln!("{}", notice);
    }
}

fn dropped_notice(resolution: &Resolution) -> Option<String> {
    match resolution.dropped_diagnostics {
        0 => None,
        dropped => Some(format!("{} further diagnostics not shown", dropped)),
    }
}
