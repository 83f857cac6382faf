// stubgen Parser Library
// Pest-based parser for contract and record specifications

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Main parsing functions
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    parser::StubParser::parse_program(input)
}

pub fn parse_program_with_source(
    input: &str,
    source_file: Option<String>,
) -> Result<Program, ParseError> {
    parser::StubParser::parse_program_with_source(input, source_file)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
