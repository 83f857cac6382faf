// stubgen AST Definitions
// Declaration tree with source spans preserved for diagnostics

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_line_col: Option<(usize, usize)>,
    pub end_line_col: Option<(usize, usize)>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_line_col: None,
            end_line_col: None,
        }
    }

    pub fn with_line_col(
        start: usize,
        end: usize,
        start_line_col: (usize, usize),
        end_line_col: (usize, usize),
    ) -> Self {
        Self {
            start,
            end,
            start_line_col: Some(start_line_col),
            end_line_col: Some(end_line_col),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed specification document
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub source_file: Option<String>,
    pub span: Span,
}

impl Program {
    /// Contract definitions in declaration order
    pub fn contracts(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Contract(contract) => Some(contract),
            Declaration::Record(_) => None,
        })
    }

    /// Record definitions in declaration order
    pub fn records(&self) -> impl Iterator<Item = &RecordDefinition> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Record(record) => Some(record),
            Declaration::Contract(_) => None,
        })
    }

    /// Find the declaration that owns `name`.
    ///
    /// When a name is declared more than once the last declaration is
    /// returned, matching the registry's last-write-wins lookup.
    pub fn find_declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .rev()
            .find(|declaration| declaration.name().name == name)
    }

    /// Find the identifier through which `entity` refers to `referenced`
    /// in its `embeds` or `implements` clause.
    pub fn find_reference(&self, entity: &str, referenced: &str) -> Option<&Identifier> {
        self.find_declaration(entity)?
            .references()
            .find(|identifier| identifier.name == referenced)
    }
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Contract(ContractDefinition),
    Record(RecordDefinition),
}

impl Declaration {
    pub fn name(&self) -> &Identifier {
        match self {
            Declaration::Contract(contract) => &contract.name,
            Declaration::Record(record) => &record.name,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Declaration::Contract(contract) => &contract.span,
            Declaration::Record(record) => &record.span,
        }
    }

    /// Every name this declaration refers to, embeds first
    pub fn references(&self) -> Box<dyn Iterator<Item = &Identifier> + '_> {
        match self {
            Declaration::Contract(contract) => Box::new(contract.embeds.iter()),
            Declaration::Record(record) => {
                Box::new(record.embeds.iter().chain(record.implements.iter()))
            }
        }
    }
}

/// Contract definition: a named set of method signatures
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDefinition {
    pub name: Identifier,
    /// Contracts whose methods this contract incorporates
    pub embeds: Vec<Identifier>,
    pub methods: Vec<MethodSignature>,
    pub span: Span,
}

/// Record definition: a data shape with fields
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDefinition {
    pub name: Identifier,
    /// Records composed into this one
    pub embeds: Vec<Identifier>,
    /// Contracts this record commits to provide
    pub implements: Vec<Identifier>,
    pub fields: Vec<FieldDefinition>,
    pub span: Span,
}

/// Method signature inside a contract
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub returns: Vec<Parameter>,
    pub span: Span,
}

/// Parameter or return value; the name is optional
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Option<Identifier>,
    pub type_reference: TypeReference,
    pub span: Span,
}

/// Record field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: Identifier,
    pub type_reference: TypeReference,
    pub span: Span,
}

/// Opaque type text, e.g. `[]byte` or `HashMap<K, V>`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
    pub text: String,
    pub span: Span,
}

/// Identifiers (entity, method, parameter and field names)
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.type_reference),
            None => write!(f, "{}", self.type_reference),
        }
    }
}
