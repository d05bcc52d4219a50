use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stockcheck", about = "Stock price checker with anonymous likes")]
pub struct Cli {
    /// SQLite database path (overrides STOCK_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Look up one or two stocks and print the API response
    Lookup {
        /// Ticker symbols (one, or two to compare likes)
        #[arg(required = true, num_args = 1..)]
        symbols: Vec<String>,
        /// Like each symbol
        #[arg(long)]
        like: bool,
        /// Caller address used for like deduplication
        #[arg(long, default_value = "127.0.0.1")]
        ip: String,
    },
    /// Show the stored like record for a symbol
    Show {
        symbol: String,
    },
}
