// Declaration parsing module
// Handles contract and record definitions, relation clauses and fields

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, StubParser};
use pest::iterators::Pair;

impl StubParser {
    /// Parse a contract definition
    pub(crate) fn parse_contract_definition(pair: Pair<Rule>) -> ParseResult<ContractDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        Self::next_pair(&mut inner_pairs, Rule::keyword_contract, &span)?;
        let name = Self::parse_identifier(Self::next_pair(
            &mut inner_pairs,
            Rule::identifier,
            &span,
        )?);

        let mut embeds = Vec::new();
        let mut methods = Vec::new();

        for inner_pair in inner_pairs {
            match inner_pair.as_rule() {
                Rule::embeds_clause => {
                    embeds = Self::parse_relation_clause(inner_pair);
                }
                Rule::method_signature => {
                    methods.push(Self::parse_method_signature(inner_pair)?);
                }
                _ => {
                    return Err(Self::unexpected_rule(
                        &inner_pair,
                        "an embeds clause or method signature",
                    ))
                }
            }
        }

        Ok(ContractDefinition {
            name,
            embeds,
            methods,
            span,
        })
    }

    /// Parse a record definition
    pub(crate) fn parse_record_definition(pair: Pair<Rule>) -> ParseResult<RecordDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        Self::next_pair(&mut inner_pairs, Rule::keyword_record, &span)?;
        let name = Self::parse_identifier(Self::next_pair(
            &mut inner_pairs,
            Rule::identifier,
            &span,
        )?);

        let mut embeds = Vec::new();
        let mut implements = Vec::new();
        let mut fields = Vec::new();

        for inner_pair in inner_pairs {
            match inner_pair.as_rule() {
                Rule::embeds_clause => {
                    embeds = Self::parse_relation_clause(inner_pair);
                }
                Rule::implements_clause => {
                    implements = Self::parse_relation_clause(inner_pair);
                }
                Rule::field_definition => {
                    fields.push(Self::parse_field_definition(inner_pair)?);
                }
                _ => {
                    return Err(Self::unexpected_rule(
                        &inner_pair,
                        "an embeds clause, implements clause or field",
                    ))
                }
            }
        }

        Ok(RecordDefinition {
            name,
            embeds,
            implements,
            fields,
            span,
        })
    }

    /// Parse the names listed after `embeds` or `implements`
    fn parse_relation_clause(pair: Pair<Rule>) -> Vec<Identifier> {
        pair.into_inner()
            .filter(|inner_pair| inner_pair.as_rule() == Rule::identifier)
            .map(Self::parse_identifier)
            .collect()
    }

    /// Parse a record field
    fn parse_field_definition(pair: Pair<Rule>) -> ParseResult<FieldDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(
            &mut inner_pairs,
            Rule::identifier,
            &span,
        )?);
        let type_reference = Self::parse_type_reference(Self::next_pair(
            &mut inner_pairs,
            Rule::type_reference,
            &span,
        )?);

        Ok(FieldDefinition {
            name,
            type_reference,
            span,
        })
    }

    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> Identifier {
        Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        }
    }
}
