//! column-lineage CLI - Column-level lineage for SQL projections
//!
//! Usage:
//!   column-lineage analyze <projection.toml> [--source <table>] [--target <table>] [--output <format>]
//!   column-lineage extract <expression> [--table <table>]
//!   column-lineage demo [--output <format>]
//!
//! Examples:
//!   column-lineage analyze demos/orders.toml --output text
//!   column-lineage extract "t1.a + sum(b)" --table orders
//!   column-lineage -v demo

use clap::{Parser, Subcommand, ValueEnum};
use column_lineage::config::{OutputFormat, ProjectionFile, Settings};
use column_lineage::lineage::{build_projection_lineage, extract_column_refs, Projection};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "column-lineage")]
#[command(about = "Column-level lineage for SQL projections")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (overrides the default search)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute lineage for a projection file (TOML or JSON)
    Analyze {
        /// Path to the projection file
        file: PathBuf,

        /// Source table for unqualified columns
        #[arg(short, long)]
        source: Option<String>,

        /// Target table of the projected columns
        #[arg(short, long)]
        target: Option<String>,

        /// Output format (defaults to the configured format)
        #[arg(short, long)]
        output: Option<OutputArg>,
    },

    /// List the column references an expression reads
    Extract {
        /// Expression text
        expression: String,

        /// Table for unqualified columns
        #[arg(short, long)]
        table: Option<String>,
    },

    /// Run the built-in sample projection
    Demo {
        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputArg {
    Json,
    Pretty,
    Text,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Pretty => OutputFormat::Pretty,
            OutputArg::Text => OutputFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Analyze {
            file,
            source,
            target,
            output,
        } => cmd_analyze(&settings, file, source, target, output),
        Commands::Extract { expression, table } => cmd_extract(&settings, &expression, table),
        Commands::Demo { output } => cmd_demo(output),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_analyze(
    settings: &Settings,
    file: PathBuf,
    source: Option<String>,
    target: Option<String>,
    output: Option<OutputArg>,
) -> ExitCode {
    let projection_file = match ProjectionFile::from_file(&file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error loading '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        file = %file.display(),
        columns = projection_file.columns.len(),
        "loaded projection file"
    );

    let graph = projection_file.build_lineage(
        source.as_deref(),
        target.as_deref(),
        &settings.defaults,
    );
    let format = output.map(OutputFormat::from).unwrap_or(settings.output.format);
    print_rendered(format.render(&graph))
}

fn cmd_extract(settings: &Settings, expression: &str, table: Option<String>) -> ExitCode {
    let table = table.unwrap_or_else(|| settings.defaults.source_table.clone());
    for column in extract_column_refs(expression, &table) {
        println!("{}", column);
    }
    ExitCode::SUCCESS
}

fn cmd_demo(output: OutputArg) -> ExitCode {
    let projection = Projection::new()
        .with("user_id", "user_id")
        .with("total_amt", "sum(amount)")
        .with("max_ts", "max(toUInt64(ts))")
        .with("dim_name", "dictGet('dim_user', 'name', user_id)")
        .with("pair_metric", "t1.a + t2.b")
        .with("item", "arrayJoin(items)")
        .with("const_one", "1");

    let graph = build_projection_lineage("ods_orders", "result", &projection);
    print_rendered(OutputFormat::from(output).render(&graph))
}

fn print_rendered(rendered: serde_json::Result<String>) -> ExitCode {
    match rendered {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}
