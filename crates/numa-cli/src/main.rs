use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "numa-merge",
    about = "Merge NUMA topology hints from resource providers",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge provider hints and print the admission verdict.
    ///
    /// The hints file is a JSON array of provider groups, each mapping a
    /// provider name to its hint list:
    /// [{"cpu": [{"affinity": [0], "preferred": true}]}]
    ///
    /// Exits 0 when admitted and 1 when no NUMA node satisfies every
    /// provider.
    Merge {
        /// Path to the JSON hints file
        #[arg(long)]
        hints: PathBuf,
        /// Policy config (TOML) providing the policy and NUMA nodes
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated NUMA node IDs; overrides the config file
        #[arg(long, value_delimiter = ',')]
        numa_nodes: Option<Vec<usize>>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print a policy config scaffold for a node with N NUMA nodes
    Config {
        #[arg(long, default_value = "2")]
        numa_nodes: usize,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("numa_merge=info,numa_policy=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            hints,
            config,
            numa_nodes,
            format,
        } => commands::merge::merge(&hints, config.as_deref(), numa_nodes, &format),
        Commands::Config { numa_nodes } => {
            commands::config::scaffold(numa_nodes)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
