use clap::Parser;
use dotenv::dotenv;
use stockcheck::application::lookup_stock::LookupRequest;
use stockcheck::cli::commands::{Cli, Commands};
use stockcheck::config::Config;
use stockcheck::infrastructure::http::{start_server, state::AppState};
use stockcheck::StockChecker;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Err(e) = run_command(config, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(mut config: Config, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let checker = StockChecker::new(&config)?;
            let state = AppState::new(checker, config.trust_proxy);
            start_server(state, &config.bind_address()).await?;
        }
        Commands::Lookup { symbols, like, ip } => {
            let checker = StockChecker::new(&config)?;
            let response = checker
                .lookup(LookupRequest {
                    symbols,
                    like,
                    caller_address: ip,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Show { symbol } => {
            let checker = StockChecker::new(&config)?;
            match checker.show(&symbol)? {
                Some(record) => println!(
                    "{}",
                    serde_json::json!({
                        "stock": record.symbol,
                        "likes": record.likes,
                        "created_at": record.created_at,
                        "updated_at": record.updated_at,
                    })
                ),
                None => println!("No record for {}", symbol.trim().to_uppercase()),
            }
        }
    }
    Ok(())
}
