//! Paramwrap Code Generator
//!
//! Generates fluent Kotlin wrapper classes from a param schema file.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use paramwrap_gen::config::GeneratorConfig;
use paramwrap_gen::errors::GeneratorError;
use paramwrap_gen::output::{DryRunEmitter, FileEmitter, generate_and_emit};
use paramwrap_gen::registry::SchemaRegistry;
use paramwrap_gen::schema::load_schema;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Paramwrap code generator - turns param schemas into fluent Kotlin wrappers
#[derive(Parser, Debug)]
#[command(name = "paramwrap-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema file describing the annotated param classes (.json or .toml)
    #[arg(short, long)]
    schema: PathBuf,

    /// Generator configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output root; files land under the package directory
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// Package of the generated declarations
    #[arg(long)]
    package: Option<String>,

    /// Prefix of every generated wrapper class
    #[arg(long)]
    prefix: Option<String>,

    /// Name of the generic ancestor class
    #[arg(long)]
    ancestor: Option<String>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generator_config(&self) -> Result<GeneratorConfig, GeneratorError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.class_prefix = prefix.clone();
        }
        if let Some(ancestor) = &self.ancestor {
            config.ancestor = ancestor.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,paramwrap_gen=info".to_string(),
            2 => "info,paramwrap_gen=debug".to_string(),
            _ => "debug,paramwrap_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.generator_config()?;
    debug!(?config, "Resolved configuration");

    let declarations = load_schema(&cli.schema, &config.param_package)?;
    let registry = SchemaRegistry::from_declarations(declarations)?;

    let summary = if cli.dry_run {
        let stdout = std::io::stdout();
        let mut emitter = DryRunEmitter::new(stdout.lock());
        generate_and_emit(&registry, &config, &mut emitter)?
    } else {
        let mut emitter = FileEmitter::new(&cli.output);
        generate_and_emit(&registry, &config, &mut emitter)?
    };

    let target = if cli.dry_run {
        "dry run, nothing written".yellow().to_string()
    } else {
        cli.output.display().to_string().green().to_string()
    };
    eprintln!(
        "{} {} files ({} wrappers, {} builtin wrappers, {} factories) -> {}",
        "✓".green(),
        summary.files.to_string().bold(),
        summary.wrappers,
        summary.builtin_wrappers,
        summary.factories,
        target
    );

    Ok(())
}
