use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use contactgraph::config::{load_config, ContactGraphConfig, DEFAULT_CONFIG_PATH};
use contactgraph::errors::{ContactGraphError, Result};
use contactgraph::graph::{GraphStore, PathSearchEngine, TracingReporter};
use contactgraph::ingest::load_file;
use contactgraph::logging::init_tracing;
use contactgraph::mcp::McpServer;
use contactgraph::types::{render_path, ContactPath, SearchConditions, SearchType};

/// Path search over a directed social-contact graph.
#[derive(Parser)]
#[command(name = "contactgraph", about = "Path search over a social-contact graph")]
struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Edge list file, overrides the configured data file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,
    /// Maximum reveal depth, overrides the configured value
    #[arg(long, global = true)]
    max_depth: Option<usize>,
    /// Log level or filter directive, overrides the configured value
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find paths between two nodes
    Paths {
        source: String,
        destination: String,
        /// Only return the shortest paths
        #[arg(short, long)]
        shortest: bool,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Reveal the network reachable from a node
    Reveal {
        node: String,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show graph statistics
    Stats,
    /// Serve queries as JSON-RPC over stdio
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if let Err(e) = init_tracing(&config.log.log_level) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let graph = load_graph(&config).await?;
    let reporter = Arc::new(TracingReporter);

    match cli.command {
        Commands::Paths {
            source,
            destination,
            shortest,
            json,
        } => {
            let engine = PathSearchEngine::with_config(&graph, config.search, reporter);
            let search_type = if shortest {
                SearchType::ShortestPath
            } else {
                SearchType::AllPaths
            };
            let paths = engine.get_paths(&SearchConditions::new(&source, &destination, search_type));
            print_paths(&paths, json)?;
        }
        Commands::Reveal { node, json } => {
            let engine = PathSearchEngine::with_config(&graph, config.search, reporter);
            let paths = engine.reveal_contacts(&node);
            print_paths(&paths, json)?;
        }
        Commands::Stats => {
            println!("Contact graph");
            println!("  Nodes: {}", graph.node_count());
            println!("  Edges: {}", graph.edge_count());
        }
        Commands::Serve => {
            let server = McpServer::new(graph, config, reporter);
            server.run().await?;
        }
    }
    Ok(())
}

/// Loads the config file and applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ContactGraphConfig> {
    let mut config = load_config(&cli.config)?;
    if let Some(data) = &cli.data {
        config.data.file = Some(data.clone());
    }
    if let Some(depth) = cli.max_depth {
        config.search.max_depth = depth;
    }
    if let Some(level) = &cli.log_level {
        config.log.log_level = level.clone();
    }
    Ok(config)
}

async fn load_graph(config: &ContactGraphConfig) -> Result<GraphStore> {
    let path = config.data.file.as_ref().ok_or_else(|| ContactGraphError::Config {
        message: "no data file configured; pass --data or set data.file".to_string(),
    })?;
    let mut graph = GraphStore::new();
    load_file(&mut graph, path).await?;
    Ok(graph)
}

fn print_paths(paths: &[ContactPath], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(paths)?);
    } else if paths.is_empty() {
        println!("No paths found");
    } else {
        for path in paths {
            println!("{}", render_path(path));
        }
    }
    Ok(())
}
