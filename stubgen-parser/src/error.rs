// stubgen Parser Error Handling
// Error reporting with miette integration

use crate::ast::Span;
use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error")]
    #[diagnostic(
        code(stubgen::parse::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(stubgen::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: Option<Rule>,
        span: Span,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 0),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<String> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("expected {}", join_alternatives(&expected))
            }
            pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError { src, span, message }
    }

    /// Create an unexpected rule error
    pub fn unexpected_rule(expected: impl Into<String>, found: Option<Rule>, span: Span) -> Self {
        ParseError::UnexpectedRule {
            expected: expected.into(),
            found,
            span,
        }
    }

    /// Human readable summary of what went wrong
    pub fn message(&self) -> String {
        match self {
            ParseError::PestError { message, .. } => message.clone(),
            ParseError::UnexpectedRule {
                expected, found, ..
            } => match found {
                Some(rule) => format!("expected {expected}, found {rule:?}"),
                None => format!("expected {expected}, found end of declaration"),
            },
        }
    }
}

impl From<&Span> for SourceSpan {
    fn from(span: &Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        Rule::program => "a specification".to_string(),
        Rule::contract_definition => {
            "a contract definition (contract Name { fn method() })".to_string()
        }
        Rule::record_definition => "a record definition (record Name { field: Type })".to_string(),
        Rule::embeds_clause => "an embeds clause (embeds A, B)".to_string(),
        Rule::implements_clause => "an implements clause (implements A, B)".to_string(),
        Rule::method_signature => "a method signature (fn Name(param: Type) -> Type)".to_string(),
        Rule::return_clause => "a return clause (-> Type or -> (a: A, b: B))".to_string(),
        Rule::parameter_list => "a parameter list".to_string(),
        Rule::parameter => "a parameter (name: Type or Type)".to_string(),
        Rule::field_definition => "a field (name: Type)".to_string(),
        Rule::type_reference => "a type (like int, []byte, Map<K, V> or chan int)".to_string(),
        Rule::identifier => "an identifier".to_string(),
        Rule::keyword_contract => "the 'contract' keyword".to_string(),
        Rule::keyword_record => "the 'record' keyword".to_string(),
        Rule::keyword_embeds => "the 'embeds' keyword".to_string(),
        Rule::keyword_implements => "the 'implements' keyword".to_string(),
        Rule::keyword_fn => "the 'fn' keyword".to_string(),
        Rule::keyword => "a keyword".to_string(),
        Rule::EOI => "end of input".to_string(),
        _ => format!("a {:?}", rule).replace('_', " "),
    }
}

fn join_alternatives(descriptions: &[String]) -> String {
    match descriptions {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_alternatives() {
        assert_eq!(join_alternatives(&[]), "");
        assert_eq!(join_alternatives(&["a".to_string()]), "a");
        assert_eq!(
            join_alternatives(&["a".to_string(), "b".to_string(), "c".to_string()]),
            "a, b or c"
        );
    }

    #[test]
    fn test_span_conversion() {
        let span = Span::new(4, 10);
        let source_span = SourceSpan::from(&span);
        assert_eq!(source_span.offset(), 4);
        assert_eq!(source_span.len(), 6);
    }
}
