//! univer-bridge CLI - moves sheets between Univer snapshots and workbook models

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use univer_bridge::prelude::*;

#[derive(Parser)]
#[command(name = "univer-bridge")]
#[command(
    author,
    version,
    about = "Transfer sheet content between Univer documents and workbooks"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cells per agent round trip (overrides the configuration file)
    #[arg(long, global = true)]
    max_cells: Option<usize>,

    /// Run only these stages (comma separated, e.g. data,styles,merges)
    #[arg(long, global = true, value_delimiter = ',')]
    only: Vec<Stage>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a Univer snapshot to a workbook model
    Export {
        /// Univer snapshot (JSON)
        input: PathBuf,

        /// Output workbook file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a workbook model into a new Univer snapshot
    Import {
        /// Workbook model (JSON)
        input: PathBuf,

        /// Output snapshot file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how a sheet of the given size is split into chunks
    Plan {
        /// Number of rows in the used range
        #[arg(long)]
        rows: i32,

        /// Number of columns in the used range
        #[arg(long)]
        cols: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let bridge = build_bridge(&cli.global)?;
    match cli.command {
        Commands::Export { input, output } => export(&bridge, &input, output.as_deref()).await,
        Commands::Import { input, output } => import(&bridge, &input, output.as_deref()).await,
        Commands::Plan { rows, cols } => plan(bridge.config(), rows, cols),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_bridge(args: &GlobalArgs) -> Result<Bridge> {
    let mut config = match &args.config {
        Some(path) => BridgeConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => BridgeConfig::default(),
    };
    if let Some(max_cells) = args.max_cells {
        config = config.with_max_cells_per_batch(max_cells);
    }
    config.validate().context("Invalid configuration")?;

    let options = if args.only.is_empty() {
        TransferOptions::all(true)
    } else {
        TransferOptions::only(args.only.iter().copied())
    };
    Ok(Bridge::new(config).with_options(options))
}

async fn export(bridge: &Bridge, input: &Path, output: Option<&Path>) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let snapshot: UniverSnapshot = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a Univer snapshot", input.display()))?;
    tracing::debug!(
        "Loaded {} sheets and {} users from '{}'",
        snapshot.sheets.len(),
        snapshot.users.len(),
        input.display()
    );

    let agent = MemoryAgent::from_snapshot(&snapshot);
    let users = MemoryUsers::from_snapshot(&snapshot);
    let (workbook, stats) = bridge
        .export_workbook(&agent, &users)
        .await
        .context("Export failed")?;

    match output {
        Some(path) => {
            workbook
                .save_json(path)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote {} worksheets to '{}'", workbook.sheet_count(), path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&workbook)?;
            write_stdout(&json)?;
        }
    }
    eprintln!("{stats}");
    Ok(())
}

async fn import(bridge: &Bridge, input: &Path, output: Option<&Path>) -> Result<()> {
    let workbook = Workbook::open_json(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    let agent = MemoryAgent::new();
    let users = MemoryUsers::default();
    let stats = bridge
        .import_workbook(&workbook, &agent, &users)
        .await
        .context("Import failed")?;

    let snapshot = UniverSnapshot {
        sheets: agent.sheets().await,
        users: users.users(),
        current_user: Some(users.current_user_id().to_string()),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote {} sheets to '{}'", snapshot.sheets.len(), path.display());
        }
        None => write_stdout(&json)?,
    }
    eprintln!("{stats}");
    Ok(())
}

fn plan(config: &BridgeConfig, rows: i32, cols: i32) -> Result<()> {
    anyhow::ensure!(rows > 0 && cols > 0, "rows and cols must be positive");

    let used = RangeSpec::new(0, rows - 1, 0, cols - 1);
    let chunks = ChunkPlan::for_sheet(used, config.max_cells_per_batch)?;
    println!(
        "{} rows x {} columns, {} cells per batch, {} rows per chunk",
        rows,
        cols,
        config.max_cells_per_batch,
        chunks.rows_per_chunk()
    );
    for (i, chunk) in chunks.enumerate() {
        println!(
            "  chunk {}: rows {}..={}, columns {}..={}",
            i + 1,
            chunk.start_row,
            chunk.end_row,
            chunk.start_column,
            chunk.end_column
        );
    }
    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .context("Failed to write to stdout")
}
