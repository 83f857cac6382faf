// Source loading for the stubgen CLI
// Files are read and parsed up front; the text is kept for diagnostics

use miette::{IntoDiagnostic, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use stubgen_parser::{parse_program_with_source, Program};

/// Name used for input read from stdin
pub const STDIN_NAME: &str = "<stdin>";

/// A parsed document together with the text it was parsed from
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub name: String,
    pub source: String,
    pub program: Program,
}

pub fn display_name(file_path: &Path) -> String {
    if is_stdin(file_path) {
        STDIN_NAME.to_string()
    } else {
        file_path.display().to_string()
    }
}

fn is_stdin(file_path: &Path) -> bool {
    file_path.to_str() == Some("-")
}

/// Read a `.stub` file (or stdin for `-`)
pub fn read_source(file_path: &Path) -> Result<(String, String)> {
    if is_stdin(file_path) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok((buffer, STDIN_NAME.to_string()));
    }

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    if file_path.extension().and_then(|s| s.to_str()) != Some("stub") {
        return Err(miette::miette!(
            "Expected .stub file, got: {}",
            file_path.display()
        ));
    }

    let source = fs::read_to_string(file_path).into_diagnostic()?;
    Ok((source, file_path.display().to_string()))
}

/// Read and parse one input
pub fn load_source(file_path: &Path) -> Result<LoadedSource> {
    let (source, name) = read_source(file_path)?;
    let program = parse_program_with_source(&source, Some(name.clone()))?;
    tracing::debug!(
        file = name.as_str(),
        declarations = program.declarations.len(),
        "parsed"
    );

    Ok(LoadedSource {
        name,
        source,
        program,
    })
}

/// Load every input, reporting each failure; `None` if any input failed
pub fn load_sources<P: AsRef<Path>>(files: &[P]) -> Option<Vec<LoadedSource>> {
    let mut loaded = Vec::with_capacity(files.len());
    let mut success = true;

    for file_path in files {
        match load_source(file_path.as_ref()) {
            Ok(source) => loaded.push(source),
            Err(e) => {
                eprintln!("{:?}", e);
                success = false;
            }
        }
    }

    success.then_some(loaded)
}
