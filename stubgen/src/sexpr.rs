// S-expression formatter for stubgen
// Renders parsed documents and resolved method sets as Lisp-like text

use stubgen_parser::{
    ContractDefinition, Declaration, FieldDefinition, Identifier, MethodSignature, Parameter,
    Program, RecordDefinition,
};
use stubgen_resolver::{EntityKind, MethodSet, MethodSetView};

pub fn format_program_as_sexpr(program: &Program) -> String {
    format_program_with_indent(program, 0)
}

fn format_program_with_indent(program: &Program, indent: usize) -> String {
    let declarations: Vec<String> = program
        .declarations
        .iter()
        .map(|declaration| format_declaration_with_indent(declaration, indent + 2))
        .collect();

    wrap_list("program", &declarations, indent)
}

fn format_declaration_with_indent(declaration: &Declaration, indent: usize) -> String {
    match declaration {
        Declaration::Contract(contract) => format_contract_with_indent(contract, indent),
        Declaration::Record(record) => format_record_with_indent(record, indent),
    }
}

fn format_contract_with_indent(contract: &ContractDefinition, indent: usize) -> String {
    let mut parts = Vec::new();
    if !contract.embeds.is_empty() {
        parts.push(format_name_list("embeds", &contract.embeds));
    }
    parts.extend(contract.methods.iter().map(format_method));

    wrap_list(&format!("contract {}", contract.name), &parts, indent)
}

fn format_record_with_indent(record: &RecordDefinition, indent: usize) -> String {
    let mut parts = Vec::new();
    if !record.embeds.is_empty() {
        parts.push(format_name_list("embeds", &record.embeds));
    }
    if !record.implements.is_empty() {
        parts.push(format_name_list("implements", &record.implements));
    }
    parts.extend(record.fields.iter().map(format_field));

    wrap_list(&format!("record {}", record.name), &parts, indent)
}

fn format_name_list(head: &str, names: &[Identifier]) -> String {
    let names: Vec<&str> = names.iter().map(|name| name.name.as_str()).collect();
    format!("({} {})", head, names.join(" "))
}

fn format_method(method: &MethodSignature) -> String {
    let inputs: Vec<String> = method.parameters.iter().map(format_parameter).collect();
    let outputs: Vec<String> = method.returns.iter().map(format_parameter).collect();
    format_signature(&method.name.name, &inputs, &outputs)
}

fn format_parameter(parameter: &Parameter) -> String {
    format_parameter_parts(
        parameter.name.as_ref().map(|name| name.name.as_str()),
        &parameter.type_reference.text,
    )
}

fn format_field(field: &FieldDefinition) -> String {
    format!("(field {} {})", field.name, field.type_reference)
}

fn format_parameter_parts(name: Option<&str>, type_name: &str) -> String {
    match name {
        Some(name) => format!("({} {})", name, type_name),
        None => type_name.to_string(),
    }
}

fn format_signature(name: &str, inputs: &[String], outputs: &[String]) -> String {
    let mut signature = format!("(fn {}", name);
    if !inputs.is_empty() {
        signature.push_str(&format!(" (params {})", inputs.join(" ")));
    }
    if !outputs.is_empty() {
        signature.push_str(&format!(" (returns {})", outputs.join(" ")));
    }
    signature.push(')');
    signature
}

/// One resolved entity: `(contract Name (full ...) (inherited ...) (unique ...))`
pub fn format_view_as_sexpr(kind: EntityKind, name: &str, view: &MethodSetView) -> String {
    format_view_with_indent(kind, name, view, 0)
}

fn format_view_with_indent(
    kind: EntityKind,
    name: &str,
    view: &MethodSetView,
    indent: usize,
) -> String {
    let sets = [
        format_method_set_with_indent("full", &view.full, indent + 2),
        format_method_set_with_indent("inherited", &view.inherited, indent + 2),
        format_method_set_with_indent("unique", &view.unique, indent + 2),
    ];

    wrap_list(&format!("{} {}", kind, name), &sets, indent)
}

fn format_method_set_with_indent(head: &str, set: &MethodSet, indent: usize) -> String {
    let methods: Vec<String> = set
        .iter()
        .map(|method| {
            let inputs: Vec<String> = method
                .inputs
                .iter()
                .map(|input| format_parameter_parts(input.name.as_deref(), &input.type_name))
                .collect();
            let outputs: Vec<String> = method
                .outputs
                .iter()
                .map(|output| format_parameter_parts(output.name.as_deref(), &output.type_name))
                .collect();
            format_signature(&method.name, &inputs, &outputs)
        })
        .collect();

    wrap_list(head, &methods, indent)
}

/// Several resolved entities under a single `(resolution ...)` form
pub fn format_views_as_sexpr(views: &[(EntityKind, &str, MethodSetView)]) -> String {
    let entries: Vec<String> = views
        .iter()
        .map(|(kind, name, view)| format_view_with_indent(*kind, name, view, 2))
        .collect();

    wrap_list("resolution", &entries, 0)
}

fn wrap_list(head: &str, items: &[String], indent: usize) -> String {
    if items.is_empty() {
        format!("({})", head)
    } else if items.len() == 1 && !items[0].contains('\n') {
        format!("({} {})", head, items[0])
    } else {
        format!(
            "({}\n{}{})",
            head,
            " ".repeat(indent + 2),
            items.join(&format!("\n{}", " ".repeat(indent + 2)))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stubgen_parser::parse_program;
    use stubgen_resolver::{MergePolicy, MethodSignature as ResolvedMethod, Parameter as ResolvedParameter};

    #[test]
    fn test_format_empty_program() {
        let program = parse_program("").unwrap();
        assert_eq!(format_program_as_sexpr(&program), "(program)");
    }

    #[test]
    fn test_format_contract() {
        let program =
            parse_program("contract Reader { fn Read(p: []byte) -> (n: int, err: error) }")
                .unwrap();

        assert_eq!(
            format_program_as_sexpr(&program),
            "(program (contract Reader (fn Read (params (p []byte)) (returns (n int) (err error)))))"
        );
    }

    #[test]
    fn test_format_multiple_declarations() {
        let program = parse_program(
            "contract Closer { fn Close() -> error }\nrecord File embeds Base implements Closer { fd: int }",
        )
        .unwrap();

        assert_eq!(
            format_program_as_sexpr(&program),
            "(program\n  (contract Closer (fn Close (returns error)))\n  (record File\n    (embeds Base)\n    (implements Closer)\n    (field fd int)))"
        );
    }

    #[test]
    fn test_format_view() {
        let full = MethodSet::from_methods(
            [
                ResolvedMethod::new("Close").with_output(ResolvedParameter::unnamed("error")),
                ResolvedMethod::new("Read"),
            ],
            MergePolicy::FirstWins,
        );
        let inherited = MethodSet::from_methods([ResolvedMethod::new("Read")], MergePolicy::FirstWins);
        let view = MethodSetView::new(full, inherited);

        assert_eq!(
            format_view_as_sexpr(EntityKind::Contract, "ReadCloser", &view),
            "(contract ReadCloser\n  (full\n    (fn Close (returns error))\n    (fn Read))\n  (inherited (fn Read))\n  (unique (fn Close (returns error))))"
        );
    }
}
