//! goconst: TypeScript string unions from Go constant groups.
//!
//! # Usage
//!
//! ```text
//! goconst --type <name>[,<name>...] [--out stdout|<path>] [--template <file>]
//!         [--require-docs] [--ignore-values] [-v...] <pattern>...
//! ```
//!
//! Typically wired up through a directive next to the type:
//!
//! ```text
//! //go:generate goconst --type eventType --out data/eventType.gen.ts .
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use goconst_core::TypeName;
use goconst_extract::{DocPolicy, ValuePolicy};
use goconst_gen::{generate, GenerateRequest, OutputTarget, UnitResult, WriteResult};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "goconst",
    version,
    about = "Generate TypeScript union types from Go constants",
    long_about = None,
)]
struct Cli {
    /// Comma separated list of type names.
    #[arg(long = "type", value_name = "NAME", required = true, value_delimiter = ',')]
    types: Vec<TypeName>,

    /// Output target: a file path or `stdout`. `{type}` and `{package}`
    /// expand per generated unit.
    #[arg(long, value_name = "TARGET", default_value = "stdout")]
    out: OutputTarget,

    /// Render with this Tera template instead of the built-in union template.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Fail when a matching constant has no doc comment.
    #[arg(long)]
    require_docs: bool,

    /// Do not require constant values to be literals.
    #[arg(long)]
    ignore_values: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Package patterns: directories, `dir/...`, or `.go` files.
    #[arg(required = true, value_name = "PATTERN")]
    patterns: Vec<String>,
}

impl Cli {
    fn request(self) -> GenerateRequest {
        let mut req = GenerateRequest::new(self.patterns, self.types);
        req.out = self.out;
        req.template = self.template;
        if self.require_docs {
            req.docs = DocPolicy::Required;
        }
        if self.ignore_values {
            req.values = ValuePolicy::Ignore;
        }
        req
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let req = cli.request();
    let results = generate(&req).context("generation failed")?;
    for unit in &results {
        report(unit);
    }
    Ok(())
}

/// Logs go to stderr so stdout carries only generated output.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(unit: &UnitResult) {
    let status = match &unit.write {
        WriteResult::Stdout => return,
        WriteResult::Written { path } => format!("wrote {}", path.display()),
        WriteResult::Unchanged { path } => format!("{} unchanged", path.display()),
    };
    tracing::info!(
        "{}.{}: {} constant(s), {status}",
        unit.package,
        unit.type_name,
        unit.symbols
    );
}
