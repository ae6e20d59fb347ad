//! sortd CLI — run the sort server, or sort sequences locally.
//!
//! # Commands
//! ```text
//! sortd serve  [--config <path.yaml>] [--host <h>] [--port <p>] [--workers <n>]
//! sortd sort   <ints...> [--json]
//! sortd batch  --file <batch.json> [--order completion|input] [--workers <n>]
//! sortd info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use sortd_batch::ResultOrder;

mod cmd_batch;
mod cmd_serve;

#[derive(Parser)]
#[command(
    name = "sortd",
    about = "Integer sort server — single and concurrent batch sorts over HTTP",
    long_about = "
sortd: sorts integer sequences over HTTP.

ROUTES:
  /sort/single       {\"numbers\": [..]}            -> {\"sortedNumbers\": [..]}
  /sort/concurrent   [{\"numbers\": [..]}, ..]      -> {\"sortedArrays\": [..]}

ENVIRONMENT VARIABLES:
  SORTD_HOST             Listen host (default 0.0.0.0)
  SORTD_PORT             Listen port (default 8080)
  SORTD_BATCH_WORKERS    Worker threads for batch sorts (0 = all CPUs)
  SORTD_BATCH_ORDER      completion | input
  SORTD_LOG_LEVEL        trace | debug | info | warn | error
  SORTD_LOG_JSON         true to emit JSON logs
",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Path to a YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
        /// Listen host (overrides config and env)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config and env)
        #[arg(short, long)]
        port: Option<u16>,
        /// Worker threads for batch sorts, 0 = all CPUs (overrides config and env)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Sort one sequence locally and print it
    Sort {
        /// The integers to sort
        #[arg(allow_negative_numbers = true)]
        numbers: Vec<i64>,
        /// Print the `{"sortedNumbers": [..]}` response body
        #[arg(long)]
        json: bool,
    },

    /// Sort a batch JSON file through the concurrent engine and print the response body
    Batch {
        /// File holding `[{"numbers": [..]}, ..]`
        #[arg(short, long)]
        file: String,
        /// Result order: completion | input
        #[arg(long, default_value_t = ResultOrder::Completion)]
        order: ResultOrder,
        /// Worker threads (0 = all CPUs)
        #[arg(long, default_value_t = 0)]
        workers: usize,
    },

    /// Show sortd build and capability info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, host, port, workers } => {
            cmd_serve::run(config.as_deref(), cmd_serve::Overrides { host, port, workers }).await
        }

        Commands::Sort { numbers, json } => cmd_sort(numbers, json),

        Commands::Batch { file, order, workers } => cmd_batch::run(&file, order, workers),

        Commands::Info => cmd_info(),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_sort(numbers: Vec<i64>, as_json: bool) -> Result<()> {
    use sortd_core::SortRequest;

    let sorted = SortRequest::new(numbers).into_sorted();

    if as_json {
        println!("{}", serde_json::to_string(&sorted)?);
    } else {
        let line: Vec<String> = sorted.sorted_numbers.iter().map(i64::to_string).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("sortd v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Routes (any method):");
    println!("  /sort/single       sort one sequence inline");
    println!("  /sort/concurrent   sort a batch, one task per sequence");
    println!();
    println!("Capabilities:");
    println!("  ✓ Parallel batch sort      (Rayon worker pool, scope join barrier)");
    println!("  ✓ Result order             completion (default) or input");
    println!("  ✓ HTTP transport           (axum, graceful shutdown)");
    println!("  ✓ Structured logging       (tracing, text or JSON)");
    println!("  ✓ Metrics                  (OpenTelemetry instruments)");
    println!();
    println!("Default listen address:      0.0.0.0:8080");
    Ok(())
}
