//! api-forge CLI
//!
//! Command-line interface for generating API lists, gateway/ACL seed SQL, and
//! test fixtures from OpenAPI specifications.

use anyhow::{Context, Result};
use api_forge_common::{Catalog, ForgeConfig};
use api_forge_generator::ArtifactGenerator;
use api_forge_parser::OpenApiParser;
use api_forge_reconciler::Reconciler;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "api-forge")]
#[command(version, about = "Generate services from OpenAPI specifications", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Manifest (setting file) path [default: ./api-setup.yaml]
    #[arg(short = 'I', long = "in", global = true)]
    input: Option<PathBuf>,

    /// Output directory path [default: ./dist]
    #[arg(short = 'O', long = "out", global = true)]
    output: Option<PathBuf>,

    /// Config file with `in` and `out` keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the API list (api-list.md, api-list.tsv)
    #[command(after_help = "EXAMPLES:\n  \
        api-forge list --in ./api-setup.yaml --out ./dist")]
    List,

    /// Create test fixture templates, one per operation
    #[command(after_help = "EXAMPLES:\n  \
        api-forge fixture -I ./api-setup.yaml -O ./fixtures")]
    Fixture,

    /// Create Kong and ACL insert data (kongData.sql, aclData.sql)
    #[command(after_help = "EXAMPLES:\n  \
        api-forge sql --out ./db/seed")]
    Sql,

    /// Reconcile the manifest without generating artifacts
    Sync,

    /// Reconcile once and create every artifact
    All,

    /// Parse one OpenAPI document and display the extracted operations
    Parse {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,

        /// Print the extracted document as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match &cli.command {
        Commands::Parse { spec, json } => parse_command(spec, *json, cli.verbose),
        Commands::Sync => {
            let config = load_config(&cli)?;
            reconcile(&config)?;
            report("sync", &[config.manifest_path]);
            Ok(())
        }
        Commands::List => generate_command(&cli, "list", |generator, dir| {
            generator.generate_list(dir)
        }),
        Commands::Fixture => generate_command(&cli, "fixture", |generator, dir| {
            generator.generate_fixtures(dir)
        }),
        Commands::Sql => generate_command(&cli, "sql", |generator, dir| {
            generator.generate_sql(dir)
        }),
        Commands::All => generate_command(&cli, "all", |generator, dir| {
            generator.generate_all(dir)
        }),
    }
}

fn load_config(cli: &Cli) -> Result<ForgeConfig> {
    let config = ForgeConfig::resolve(cli.config.as_deref(), cli.input.clone(), cli.output.clone())
        .context("Failed to load configuration")?;

    if cli.verbose {
        println!("  Manifest: {}", config.manifest_path.display());
        println!("  Output: {}", config.output_dir.display());
    }

    Ok(config)
}

/// Reconcile, then run one generator step against the output directory
fn generate_command<F>(cli: &Cli, name: &str, generate: F) -> Result<()>
where
    F: FnOnce(&ArtifactGenerator<'_>, &Path) -> api_forge_common::Result<Vec<PathBuf>>,
{
    let config = load_config(cli)?;
    let catalog = reconcile(&config)?;

    println!("{} Generating {} artifacts...", "→".cyan(), name);
    let generator = ArtifactGenerator::new(&catalog).context("Failed to create generator")?;
    let written = generate(&generator, &config.output_dir)
        .with_context(|| format!("Failed to generate {} artifacts", name))?;

    report(name, &written);
    Ok(())
}

/// Initialize tracing on stderr; `RUST_LOG` overrides the defaults
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "api_forge=debug,api_forge_common=debug,api_forge_parser=debug,api_forge_reconciler=debug,api_forge_generator=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load, reconcile, and persist the manifest
fn reconcile(config: &ForgeConfig) -> Result<Catalog> {
    println!(
        "{} Reconciling manifest: {}",
        "→".cyan(),
        config.manifest_path.display()
    );

    let reconciled = Reconciler::new().run(config).with_context(|| {
        format!(
            "Failed to reconcile manifest {}",
            config.manifest_path.display()
        )
    })?;

    let summary = reconciled.summary;
    println!(
        "{} {} services, {} operations ({} new, {} server ids assigned)",
        "✓".green(),
        summary.services,
        summary.operations,
        summary.added.to_string().yellow(),
        summary.server_ids_assigned
    );

    Ok(reconciled.catalog)
}

fn report(command: &str, written: &[PathBuf]) {
    println!("\n{}", format!("✓ command[{}] completed.", command).green().bold());
    println!("\n{}", "Written files:".bold());
    for path in written {
        println!("  📄 {}", path.display());
    }
}

fn parse_command(spec_path: &Path, json: bool, verbose: bool) -> Result<()> {
    let parser = OpenApiParser::from_file(spec_path)
        .with_context(|| format!("Failed to load OpenAPI document {}", spec_path.display()))?;
    let document = parser.parse();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&document).context("Failed to serialize document")?
        );
        return Ok(());
    }

    println!("{} Parsing OpenAPI document: {}", "→".cyan(), spec_path.display());
    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Document:".bold());
    println!("  OpenAPI: {}", document.format_version.yellow());
    println!("  Title: {}", document.title.yellow());
    println!("  Description: {}", document.description);
    println!("  Version: {}", document.version.yellow());
    println!("  Operations: {}", document.operations.len());

    if verbose {
        println!("\n{}", "Operations:".bold());
        for op in &document.operations {
            println!(
                "  • {} {} {}",
                op.method_upper().cyan(),
                op.path,
                op.operation_id.yellow()
            );
            println!("    Params: {}", op.request.param_count);
            println!("    Body: {}", op.request.body_name());
            println!("    Responses: {}", op.response_names());
        }
    }

    Ok(())
}
