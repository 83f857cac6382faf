//! Contract and record declarations
//!
//! These are the plain in-memory inputs of a resolution run. They are built
//! once (usually by [`crate::lowering`]) and never mutated afterwards.

use crate::signature::MethodSignature;
use std::fmt;

/// Which declaration list an entity or reference belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Contract,
    Record,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Contract => write!(f, "contract"),
            EntityKind::Record => write!(f, "record"),
        }
    }
}

/// A named capability set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub name: String,
    /// Methods declared directly on this contract, in declaration order
    pub methods: Vec<MethodSignature>,
    /// Contracts embedded into this one, in declaration order
    pub composes: Vec<String>,
}

impl ContractSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            composes: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self
    }

    pub fn composing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composes.extend(names.into_iter().map(Into::into));
        self
    }
}

/// A record field. Fields never take part in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
}

/// A named composite data shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpec {
    pub name: String,
    pub fields: Vec<Field>,
    /// Contracts this record commits to provide
    pub conforms_to: Vec<String>,
    /// Records embedded into this one
    pub composes: Vec<String>,
}

impl RecordSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            conforms_to: Vec::new(),
            composes: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn conforming_to<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conforms_to.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn composing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composes.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Every declaration of a resolution run, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecSet {
    pub contracts: Vec<ContractSpec>,
    pub records: Vec<RecordSpec>,
}

impl SpecSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty() && self.records.is_empty()
    }

    /// Append another set's declarations after this one's
    pub fn extend(&mut self, other: SpecSet) {
        self.contracts.extend(other.contracts);
        self.records.extend(other.records);
    }
}
