//! `pos` entry point.
//!
//! This file is intentionally thin: it loads the dev env file, sets up
//! tracing, and dispatches to `commands`. All command bodies live there.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pos")]
#[command(about = "Self-order POS operator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog utilities
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },

    /// Price one customized item headlessly and print key/price/note
    Quote {
        /// Catalog documents in merge order (base first, overrides after)
        #[arg(long = "path", required = true)]
        paths: Vec<String>,

        /// Menu item id
        #[arg(long)]
        item: u64,

        /// Single-group choice as GROUP=OPTION (repeatable)
        #[arg(long = "choose")]
        choose: Vec<String>,

        /// Multiple-group toggle as GROUP=OPTION (repeatable)
        #[arg(long = "add")]
        add: Vec<String>,

        /// Toggle the special add-on
        #[arg(long, default_value_t = false)]
        special: bool,

        /// Line quantity
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// Order commands
    Order {
        #[command(subcommand)]
        cmd: OrderCmd,
    },
}

#[derive(Subcommand)]
enum CatalogCmd {
    /// Load layered catalog documents and print a summary plus the
    /// catalog hash (the menu version marker)
    Check {
        /// Catalog documents in merge order (base first, overrides after)
        #[arg(long = "path", required = true)]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum OrderCmd {
    /// Build a cart from a line script and submit it
    Submit {
        /// Catalog documents in merge order
        #[arg(long = "path", required = true)]
        paths: Vec<String>,

        /// Table code (e.g. T01)
        #[arg(long)]
        table: String,

        /// Table access token; defaults to POS_TABLE_TOKEN
        #[arg(long)]
        token: Option<String>,

        /// JSON line script (array of {item, quantity, choose, add, special})
        #[arg(long)]
        script: String,

        /// Server root URL; defaults to POS_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,

        /// Submit to the deterministic in-memory counter instead of HTTP
        #[arg(long, default_value_t = false)]
        paper: bool,

        /// Order-level free-text note
        #[arg(long)]
        note: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if the file
    // does not exist.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Catalog {
            cmd: CatalogCmd::Check { paths },
        } => commands::catalog::check(&paths),

        Commands::Quote {
            paths,
            item,
            choose,
            add,
            special,
            qty,
        } => commands::quote::run(&paths, item, &choose, &add, special, qty),

        Commands::Order {
            cmd:
                OrderCmd::Submit {
                    paths,
                    table,
                    token,
                    script,
                    endpoint,
                    paper,
                    note,
                },
        } => commands::order::submit(&paths, &table, token, &script, endpoint, paper, note),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
