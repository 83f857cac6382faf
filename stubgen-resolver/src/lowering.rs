//! Lowering parsed documents into resolver inputs
//!
//! Spans are dropped here: everything after lowering works on names. Callers
//! that want to point diagnostics at source keep the `Program` around and
//! look names up with `Program::find_reference`.

use crate::signature::{MethodSignature, Parameter};
use crate::specs::{ContractSpec, Field, RecordSpec, SpecSet};
use stubgen_parser::ast;

/// Lower one parsed document, keeping declaration order
pub fn lower_program(program: &ast::Program) -> SpecSet {
    let mut specs = SpecSet::new();

    for declaration in &program.declarations {
        match declaration {
            ast::Declaration::Contract(contract) => {
                specs.contracts.push(lower_contract(contract));
            }
            ast::Declaration::Record(record) => {
                specs.records.push(lower_record(record));
            }
        }
    }

    tracing::debug!(
        source_file = program.source_file.as_deref().unwrap_or("<input>"),
        contracts = specs.contracts.len(),
        records = specs.records.len(),
        "lowered program"
    );

    specs
}

/// Lower several documents as if they were concatenated in the given order
pub fn lower_programs<'a, I>(programs: I) -> SpecSet
where
    I: IntoIterator<Item = &'a ast::Program>,
{
    let mut specs = SpecSet::new();
    for program in programs {
        specs.extend(lower_program(program));
    }
    specs
}

pub fn lower_contract(contract: &ast::ContractDefinition) -> ContractSpec {
    ContractSpec {
        name: contract.name.name.clone(),
        methods: contract.methods.iter().map(lower_method).collect(),
        composes: names(&contract.embeds),
    }
}

pub fn lower_record(record: &ast::RecordDefinition) -> RecordSpec {
    RecordSpec {
        name: record.name.name.clone(),
        fields: record
            .fields
            .iter()
            .map(|field| Field {
                name: field.name.name.clone(),
                type_name: field.type_reference.text.clone(),
            })
            .collect(),
        conforms_to: names(&record.implements),
        composes: names(&record.embeds),
    }
}

pub fn lower_method(method: &ast::MethodSignature) -> MethodSignature {
    MethodSignature {
        name: method.name.name.clone(),
        inputs: method.parameters.iter().map(lower_parameter).collect(),
        outputs: method.returns.iter().map(lower_parameter).collect(),
    }
}

fn lower_parameter(parameter: &ast::Parameter) -> Parameter {
    Parameter {
        name: parameter.name.as_ref().map(|name| name.name.clone()),
        type_name: parameter.type_reference.text.clone(),
    }
}

fn names(identifiers: &[ast::Identifier]) -> Vec<String> {
    identifiers
        .iter()
        .map(|identifier| identifier.name.clone())
        .collect()
}
