//! Method signatures
//!
//! A signature is a name plus ordered input and output parameter lists. Every
//! set operation in this crate identifies methods by name alone; the
//! parameter lists are carried through untouched for the code emitter.

use std::fmt;

/// A single input or output parameter. The type is opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: Option<String>,
    pub type_name: String,
}

impl Parameter {
    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            type_name: type_name.into(),
        }
    }

    pub fn unnamed(type_name: impl Into<String>) -> Self {
        Self {
            name: None,
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: {}", name, self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// A method a contract requires or a record must expose
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
}

impl MethodSignature {
    /// Create a signature with no parameters and no results
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, parameter: Parameter) -> Self {
        self.inputs.push(parameter);
        self
    }

    pub fn with_output(mut self, parameter: Parameter) -> Self {
        self.outputs.push(parameter);
        self
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_parameters(f, &self.inputs)?;
        write!(f, ")")?;

        match self.outputs.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_none() => write!(f, " -> {}", single),
            outputs => {
                write!(f, " -> (")?;
                write_parameters(f, outputs)?;
                write!(f, ")")
            }
        }
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[Parameter]) -> fmt::Result {
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", parameter)?;
    }
    Ok(())
}
