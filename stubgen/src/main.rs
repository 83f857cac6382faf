use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{MietteHandlerOpts, Result};
use std::path::PathBuf;
use std::process;
use stubgen_resolver::{
    lower_programs, resolve_spec_set, EntityKind, MethodSetView, Resolution, ResolverOptions,
};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

mod report;
mod sexpr;
mod source;
mod text;

use source::{display_name, load_source, load_sources, LoadedSource};

#[derive(Parser)]
#[command(
    name = "stubgen",
    version,
    about = "Resolve the method sets of stubgen contracts and records",
    long_about = "Reads .stub specifications and computes, for every contract and record, \
                  the methods it must expose, the methods it inherits through composition \
                  and the methods it must declare itself."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse .stub files and display their syntax tree
    Parse {
        /// Specification files to parse (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Show detailed span information in output
        #[arg(short, long)]
        spans: bool,
    },

    /// Resolve full, inherited and unique method sets
    Resolve {
        /// Specification files, resolved together in the order given
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Sexpr)]
        format: OutputFormat,

        /// Only print these entities (contracts are searched before records)
        #[arg(short, long = "entity", value_name = "NAME")]
        entities: Vec<String>,

        /// Exit with status 1 if any diagnostic is reported
        #[arg(long)]
        deny_warnings: bool,

        #[command(flatten)]
        resolver: ResolverFlags,
    },

    /// Report diagnostics only; exit with status 1 if there are any
    Check {
        /// Specification files, resolved together in the order given
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        resolver: ResolverFlags,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct ResolverFlags {
    /// Report composition cycles
    #[arg(long)]
    report_cycles: bool,

    /// Report names declared more than once
    #[arg(long)]
    report_duplicates: bool,

    /// Stop reporting after this many diagnostics
    #[arg(long, value_name = "COUNT")]
    max_diagnostics: Option<usize>,
}

impl ResolverFlags {
    fn options(&self) -> ResolverOptions {
        let options = ResolverOptions::new()
            .with_report_cycles(self.report_cycles)
            .with_report_duplicates(self.report_duplicates);
        match self.max_diagnostics {
            Some(max) => options.with_max_diagnostics(max),
            None => options,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Lisp-like nested lists
    Sexpr,
    /// Indented signatures
    Text,
}

fn main() {
    setup_miette_handler();
    setup_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Parse { files, spans }) => {
            handle_parse_command(files, spans);
        }
        Some(Commands::Resolve {
            files,
            format,
            entities,
            deny_warnings,
            resolver,
        }) => {
            handle_resolve_command(files, format, entities, deny_warnings, resolver.options());
        }
        Some(Commands::Check { files, resolver }) => {
            handle_check_command(files, resolver.options());
        }
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["stubgen", "--help"]);
        }
    }
}

/// Configure miette for graphical error reporting with syntax highlighting
fn setup_miette_handler() {
    use miette::highlighters::SyntectHighlighter;
    use syntect::highlighting::ThemeSet;

    let syntax_set = syntect::parsing::SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();

    let Some(theme) = theme_set.themes.get("base16-ocean.dark") else {
        return;
    };
    let highlighter = SyntectHighlighter::new(syntax_set, theme.clone(), true);

    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .color(true)
                .tab_width(4)
                .with_cause_chain()
                .with_syntax_highlighting(highlighter.clone())
                .build(),
        )
    }))
    .ok();
}

/// A timer that prints nothing, keeping compact log lines short
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(&self, _w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        Ok(())
    }
}

/// Install a subscriber when STUBGEN_LOG is set.
/// STUBGEN_LOG_STYLE: "compact" (default) or "full" (timestamps and span events)
fn setup_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("STUBGEN_LOG") else {
        return;
    };

    let style = std::env::var("STUBGEN_LOG_STYLE").unwrap_or_default();
    if style == "full" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_level(true)
            .with_timer(NoTimestamp)
            .with_writer(std::io::stderr)
            .init();
    }
    tracing::debug!("tracing initialized");
}

fn handle_parse_command(files: Vec<PathBuf>, spans: bool) {
    let mut success = true;
    let multiple_files = files.len() > 1;

    for file_path in files {
        let name = display_name(&file_path);

        match load_source(&file_path) {
            Ok(loaded) => {
                if multiple_files {
                    println!(";; {}", name);
                }
                print_ast(&loaded.program, spans);
            }
            Err(e) => {
                eprintln!("{:?}", e);
                success = false;
            }
        }
    }

    if !success {
        process::exit(1);
    }
}

fn print_ast(ast: &stubgen_parser::Program, spans: bool) {
    if spans {
        println!("{:#?}", ast);
    } else {
        println!("{}", sexpr::format_program_as_sexpr(ast));
    }
}

/// Parse, lower and resolve every input; exits with status 1 if any input fails to parse
fn resolve_files(files: &[PathBuf], options: &ResolverOptions) -> (Vec<LoadedSource>, Resolution) {
    let Some(sources) = load_sources(files) else {
        process::exit(1);
    };

    let specs = lower_programs(sources.iter().map(|loaded| &loaded.program));
    let resolution = resolve_spec_set(&specs, options);
    (sources, resolution)
}

fn handle_resolve_command(
    files: Vec<PathBuf>,
    format: OutputFormat,
    entities: Vec<String>,
    deny_warnings: bool,
    options: ResolverOptions,
) {
    let (sources, resolution) = resolve_files(&files, &options);
    report::print_diagnostics(&resolution, &sources);

    let views = match select_views(&resolution, &entities) {
        Ok(views) => views,
        Err(e) => {
            eprintln!("{:?}", e);
            process::exit(1);
        }
    };

    let rendered = match format {
        OutputFormat::Sexpr => sexpr::format_views_as_sexpr(&views),
        OutputFormat::Text => text::format_views_as_text(&views),
    };
    println!("{}", rendered.trim_end());

    if deny_warnings && resolution.has_diagnostics() {
        eprintln!("Diagnostics: {}", resolution.summary());
        process::exit(1);
    }
}

/// Every entity in declaration order (contracts first), or just the requested ones
fn select_views<'a>(
    resolution: &'a Resolution,
    entities: &'a [String],
) -> Result<Vec<(EntityKind, &'a str, MethodSetView)>> {
    if entities.is_empty() {
        let contracts = resolution.contract_names().filter_map(|name| {
            resolution
                .contract_view(name)
                .map(|view| (EntityKind::Contract, name, view))
        });
        let records = resolution.record_names().filter_map(|name| {
            resolution
                .record_view(name)
                .map(|view| (EntityKind::Record, name, view))
        });
        return Ok(contracts.chain(records).collect());
    }

    entities
        .iter()
        .map(|name| {
            let (kind, view) = resolution
                .view(name)
                .ok_or_else(|| miette::miette!("Unknown contract or record: {}", name))?;
            Ok((kind, name.as_str(), view))
        })
        .collect()
}

fn handle_check_command(files: Vec<PathBuf>, options: ResolverOptions) {
    let (sources, resolution) = resolve_files(&files, &options);
    report::print_diagnostics(&resolution, &sources);

    println!(
        "Checked {} contracts and {} records: {}",
        resolution.contract_full.len(),
        resolution.record_full.len(),
        resolution.summary()
    );
    if resolution.has_diagnostics() {
        process::exit(1);
    }
}
