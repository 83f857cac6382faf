// Signature parsing module
// Handles method signatures, parameter lists, return clauses and type references

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, StubParser};
use pest::iterators::Pair;

impl StubParser {
    /// Parse a method signature: `fn Name(params) -> returns`
    pub(crate) fn parse_method_signature(pair: Pair<Rule>) -> ParseResult<MethodSignature> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        Self::next_pair(&mut inner_pairs, Rule::keyword_fn, &span)?;
        let name = Self::parse_identifier(Self::next_pair(
            &mut inner_pairs,
            Rule::identifier,
            &span,
        )?);

        let mut parameters = Vec::new();
        let mut returns = Vec::new();

        for inner_pair in inner_pairs {
            match inner_pair.as_rule() {
                Rule::parameter_list => {
                    parameters = Self::parse_parameter_list(inner_pair)?;
                }
                Rule::return_clause => {
                    returns = Self::parse_return_clause(inner_pair)?;
                }
                _ => {
                    return Err(Self::unexpected_rule(
                        &inner_pair,
                        "a parameter list or return clause",
                    ))
                }
            }
        }

        Ok(MethodSignature {
            name,
            parameters,
            returns,
            span,
        })
    }

    /// Parse a return clause; `-> T` and `-> (a: A, b: B)` both produce a list
    fn parse_return_clause(pair: Pair<Rule>) -> ParseResult<Vec<Parameter>> {
        let mut returns = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::parameter_list => {
                    returns.extend(Self::parse_parameter_list(inner_pair)?);
                }
                Rule::parameter => {
                    returns.push(Self::parse_parameter(inner_pair)?);
                }
                _ => return Err(Self::unexpected_rule(&inner_pair, "a return type")),
            }
        }

        Ok(returns)
    }

    fn parse_parameter_list(pair: Pair<Rule>) -> ParseResult<Vec<Parameter>> {
        pair.into_inner()
            .filter(|inner_pair| inner_pair.as_rule() == Rule::parameter)
            .map(Self::parse_parameter)
            .collect()
    }

    /// Parse a parameter, named (`p: []byte`) or bare (`error`)
    fn parse_parameter(pair: Pair<Rule>) -> ParseResult<Parameter> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let first = match inner_pairs.next() {
            Some(first) => first,
            None => return Err(ParseError::unexpected_rule("a parameter", None, span)),
        };

        match first.as_rule() {
            Rule::identifier => {
                let name = Self::parse_identifier(first);
                let type_reference = Self::parse_type_reference(Self::next_pair(
                    &mut inner_pairs,
                    Rule::type_reference,
                    &span,
                )?);
                Ok(Parameter {
                    name: Some(name),
                    type_reference,
                    span,
                })
            }
            Rule::type_reference => Ok(Parameter {
                name: None,
                type_reference: Self::parse_type_reference(first),
                span,
            }),
            _ => Err(Self::unexpected_rule(&first, "a parameter name or type")),
        }
    }

    pub(crate) fn parse_type_reference(pair: Pair<Rule>) -> TypeReference {
        TypeReference {
            text: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        }
    }
}
