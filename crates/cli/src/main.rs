use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use catalog::{RecipeStore, SqliteRecipeStore, StoreConfig};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ingest::{IngestReport, IngestionPipeline, LineSource};
use server::{BrewRequest, RecipeService};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Cauldron - Recipe catalog and brew service
#[derive(Parser)]
#[command(name = "cauldron")]
#[command(about = "Ingest recipes from a stream and check what can be brewed", long_about = None)]
struct Cli {
    /// SQLite database URL
    #[arg(
        long,
        env = "CAULDRON_DATABASE_URL",
        default_value = "sqlite://cauldron.db",
        global = true
    )]
    database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "CAULDRON_MAX_CONNECTIONS", default_value = "5", global = true)]
    max_connections: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service and ingest recipes until ctrl-c
    Serve {
        /// Address to listen on
        #[arg(long, env = "CAULDRON_BIND", default_value = "0.0.0.0:8080")]
        bind: SocketAddr,

        /// Newline-delimited recipe stream to ingest (repeatable; stdin when omitted)
        #[arg(long = "input")]
        inputs: Vec<PathBuf>,
    },

    /// Load a newline-delimited recipe file and exit
    Ingest {
        /// File with one JSON recipe per line
        path: PathBuf,
    },

    /// Print every stored recipe
    Recipes,

    /// Check whether the given ingredients can brew a stored recipe
    Brew {
        /// Offered ingredient as name=quantity (repeatable)
        #[arg(long = "ingredient", value_parser = parse_ingredient)]
        ingredients: Vec<(String, u32)>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let result = runtime.block_on(run(cli));
    // A stdin reader may still be parked in a blocking read.
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}

async fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig {
        database_url: cli.database_url,
        max_connections: cli.max_connections,
    };

    let store = SqliteRecipeStore::connect(&config)
        .await
        .with_context(|| format!("Failed to open recipe store at {}", config.database_url))?;

    // Dispatch to appropriate command handler
    let result = match cli.command {
        Commands::Serve { bind, inputs } => handle_serve(store.clone(), bind, inputs).await,
        Commands::Ingest { path } => handle_ingest(store.clone(), path).await,
        Commands::Recipes => handle_recipes(store.clone()).await,
        Commands::Brew { ingredients } => handle_brew(store.clone(), ingredients).await,
    };

    store.close().await;
    result
}

/// Handle the 'serve' command
async fn handle_serve(
    store: SqliteRecipeStore,
    bind: SocketAddr,
    inputs: Vec<PathBuf>,
) -> Result<()> {
    let store: Arc<dyn RecipeStore> = Arc::new(store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // One pipeline task per stream
    let pipeline = IngestionPipeline::new(store.clone());
    let mut pipelines: Vec<JoinHandle<_>> = Vec::new();
    if inputs.is_empty() {
        pipelines.push(pipeline.spawn(LineSource::stdin(), shutdown_rx.clone()));
    } else {
        for path in &inputs {
            let source = LineSource::open(path)
                .await
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            pipelines.push(pipeline.spawn(source, shutdown_rx.clone()));
        }
    }

    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    let mut server_rx = shutdown_rx.clone();
    let server_shutdown = async move {
        let _ = server_rx.wait_for(|stop| *stop).await;
    };
    let mut server_task = tokio::spawn(server::serve(
        listener,
        RecipeService::new(store.clone()),
        server_shutdown,
    ));

    println!("{} Cauldron listening on {}", "✓".green(), bind);

    let server_result = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for ctrl-c")?;
            info!("Shutdown requested");
            None
        }
        finished = &mut server_task => Some(finished),
    };

    let _ = shutdown_tx.send(true);

    for handle in pipelines {
        match handle.await {
            Ok(Ok(report)) => print_report(&report),
            Ok(Err(e)) => error!("Ingestion stopped with an error: {}", e),
            Err(e) => error!("Ingestion task panicked: {}", e),
        }
    }

    let server_result = match server_result {
        Some(finished) => finished,
        None => server_task.await,
    };
    server_result
        .context("HTTP server task panicked")?
        .context("HTTP server failed")?;

    println!("{} Cauldron stopped", "✓".green());
    Ok(())
}

/// Handle the 'ingest' command
async fn handle_ingest(store: SqliteRecipeStore, path: PathBuf) -> Result<()> {
    let source = LineSource::open(&path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    // Sender is held for the whole run so only exhaustion ends it.
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let start = Instant::now();
    let report = IngestionPipeline::new(Arc::new(store))
        .run(source, shutdown_rx)
        .await
        .with_context(|| format!("Failed to ingest {}", path.display()))?;

    println!("{} Ingested {} in {:?}", "✓".green(), path.display(), start.elapsed());
    print_report(&report);
    Ok(())
}

/// Handle the 'recipes' command
async fn handle_recipes(store: SqliteRecipeStore) -> Result<()> {
    let service = RecipeService::new(Arc::new(store));
    let response = service.list_recipes().await.context("Failed to list recipes")?;

    if response.recipes.is_empty() {
        println!("{}", "No recipes stored".yellow());
        return Ok(());
    }

    println!("{}", format!("{} recipes:", response.recipes.len()).bold().blue());
    for recipe in &response.recipes {
        println!("{}. {}", recipe.id, recipe.name.bold());
        for ingredient in &recipe.ingredients {
            println!("  {}{} x {}", "• ".green(), ingredient.name, ingredient.quantity);
        }
    }
    Ok(())
}

/// Handle the 'brew' command
async fn handle_brew(store: SqliteRecipeStore, ingredients: Vec<(String, u32)>) -> Result<()> {
    let request = ingredients
        .into_iter()
        .fold(BrewRequest::default(), |request, (name, quantity)| request.with(name, quantity));

    let service = RecipeService::new(Arc::new(store));
    let response = service.brew(&request).await;

    if let Some(error) = response.error {
        return Err(anyhow!("Brew failed ({}): {}", error.code, error.message));
    }

    if response.started {
        println!("{} Something is brewing", "✓".green());
    } else {
        println!("{} Nothing can be brewed with those ingredients", "✗".red());
    }
    Ok(())
}

fn print_report(report: &IngestReport) {
    println!("  {}", report_summary(report));
}

fn report_summary(report: &IngestReport) -> String {
    format!(
        "received {}, saved {}, {} undecodable, {} failed to save, {} receive errors",
        report.received,
        report.saved.to_string().green(),
        report.decode_failures.to_string().yellow(),
        report.save_failures.to_string().red(),
        report.receive_failures.to_string().red(),
    )
}

/// Parse `name=quantity` into an ingredient pair.
fn parse_ingredient(raw: &str) -> std::result::Result<(String, u32), String> {
    let (name, quantity) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected name=quantity, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing ingredient name in '{raw}'"));
    }
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?;
    Ok((name.to_string(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingredient() {
        assert_eq!(parse_ingredient("flour=100"), Ok(("flour".to_string(), 100)));
        assert_eq!(parse_ingredient("a=b=3"), Ok(("a=b".to_string(), 3)));
        assert!(parse_ingredient("flour").is_err());
        assert!(parse_ingredient("=5").is_err());
        assert!(parse_ingredient("flour=-1").is_err());
    }

    #[test]
    fn test_report_summary_lists_every_counter() {
        colored::control::set_override(false);
        let report = IngestReport {
            received: 7,
            saved: 3,
            decode_failures: 2,
            save_failures: 1,
            receive_failures: 4,
        };

        assert_eq!(
            report_summary(&report),
            "received 7, saved 3, 2 undecodable, 1 failed to save, 4 receive errors"
        );
    }

    #[test]
    fn test_brew_command_collects_ingredients() {
        let cli = Cli::try_parse_from([
            "cauldron",
            "brew",
            "--ingredient",
            "flour=100",
            "--ingredient",
            "sugar=50",
        ])
        .unwrap();

        match cli.command {
            Commands::Brew { ingredients } => assert_eq!(
                ingredients,
                vec![("flour".to_string(), 100), ("sugar".to_string(), 50)]
            ),
            _ => panic!("expected brew command"),
        }
    }
}
