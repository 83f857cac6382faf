// stubgen Parser
// Pest-based parser producing the declaration AST

use crate::ast::*;
use crate::error::*;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

mod declarations;
mod types;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct StubParser;

impl StubParser {
    /// Parse a complete specification document
    pub fn parse_program(input: &str) -> ParseResult<Program> {
        Self::parse_program_with_source(input, None)
    }

    /// Parse a specification document, remembering which file it came from
    pub fn parse_program_with_source(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<Program> {
        let mut pairs = Self::parse(Rule::program, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?;

        let whole_input = Span::new(0, input.len());
        let program_pair = Self::next_pair(&mut pairs, Rule::program, &whole_input)?;
        let span = Self::span_from_pair(&program_pair);

        let mut declarations = Vec::new();
        for pair in program_pair.into_inner() {
            match pair.as_rule() {
                Rule::contract_definition => {
                    declarations.push(Declaration::Contract(Self::parse_contract_definition(
                        pair,
                    )?));
                }
                Rule::record_definition => {
                    declarations.push(Declaration::Record(Self::parse_record_definition(pair)?));
                }
                Rule::EOI => {}
                _ => return Err(Self::unexpected_rule(&pair, "a contract or record definition")),
            }
        }

        Ok(Program {
            declarations,
            source_file,
            span,
        })
    }

    /// Extract a span, including line and column, from a pest pair
    pub(crate) fn span_from_pair(pair: &Pair<Rule>) -> Span {
        let pest_span = pair.as_span();
        Span::with_line_col(
            pest_span.start(),
            pest_span.end(),
            pest_span.start_pos().line_col(),
            pest_span.end_pos().line_col(),
        )
    }

    /// Take the next pair and check that the grammar produced the rule we expect
    pub(crate) fn next_pair<'i>(
        pairs: &mut Pairs<'i, Rule>,
        expected: Rule,
        parent_span: &Span,
    ) -> ParseResult<Pair<'i, Rule>> {
        match pairs.next() {
            Some(pair) if pair.as_rule() == expected => Ok(pair),
            Some(pair) => Err(Self::unexpected_rule(&pair, format!("{expected:?}"))),
            None => Err(ParseError::unexpected_rule(
                format!("{expected:?}"),
                None,
                parent_span.clone(),
            )),
        }
    }

    pub(crate) fn unexpected_rule(pair: &Pair<Rule>, expected: impl Into<String>) -> ParseError {
        ParseError::unexpected_rule(expected, Some(pair.as_rule()), Self::span_from_pair(pair))
    }
}
