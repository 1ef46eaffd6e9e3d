use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use metro_router::graph::{GraphError, GraphStore, InMemoryGraphStore, Neo4jClient, Neo4jConfig};
use metro_router::loader::{
    DEFAULT_LINKS_URL, DEFAULT_STATIONS_URL, DEFAULT_WALK_THRESHOLD_M, DatasetSource, LoadError,
    LoaderConfig, load_dataset,
};
use metro_router::planner::{ConfigError, PlanError, PlannerConfig, RoutePlanner, RouteRequest};
use metro_router::report;

/// Metro route planner backed by a Neo4j graph
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Wipe the graph and load the network dataset into it
    Load {
        #[command(flatten)]
        neo4j: Neo4jArgs,
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Stops closer than this many meters get a walking link
        #[arg(long, default_value_t = DEFAULT_WALK_THRESHOLD_M)]
        walk_threshold: f64,
    },
    /// Compute the itinerary between two projected points
    Route(RouteArgs),
}

#[derive(Args)]
struct Neo4jArgs {
    /// Neo4j HTTP API base URL
    #[arg(long = "neo4j-url", env = "NEO4J_URL", default_value = "http://localhost:7474")]
    url: String,
    /// Neo4j database name
    #[arg(long = "neo4j-database", env = "NEO4J_DATABASE", default_value = "neo4j")]
    database: String,
    /// Neo4j user
    #[arg(long = "neo4j-user", env = "NEO4J_USER", default_value = "neo4j")]
    user: String,
    /// Neo4j password
    #[arg(
        long = "neo4j-password",
        env = "NEO4J_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    password: String,
}

impl Neo4jArgs {
    fn client(&self) -> Result<Neo4jClient, GraphError> {
        let config = Neo4jConfig::new(&self.user, &self.password)
            .with_base_url(&self.url)
            .with_database(&self.database);
        Neo4jClient::new(config)
    }
}

#[derive(Args)]
struct DatasetArgs {
    /// Station table, as an HTTP(S) URL or a local path
    #[arg(long, default_value = DEFAULT_STATIONS_URL)]
    stations: String,
    /// Link table, as an HTTP(S) URL or a local path
    #[arg(long, default_value = DEFAULT_LINKS_URL)]
    links: String,
}

impl DatasetArgs {
    fn source(&self) -> DatasetSource {
        DatasetSource::new(&self.stations, &self.links)
    }
}

#[derive(Args)]
struct RouteArgs {
    /// Departure x coordinate, in meters
    #[arg(allow_negative_numbers = true)]
    x_departure: f64,
    /// Departure y coordinate, in meters
    #[arg(allow_negative_numbers = true)]
    y_departure: f64,
    /// Arrival x coordinate, in meters
    #[arg(allow_negative_numbers = true)]
    x_arrival: f64,
    /// Arrival y coordinate, in meters
    #[arg(allow_negative_numbers = true)]
    y_arrival: f64,

    /// Let the path follow walking links between nearby stations
    #[arg(long)]
    include_walking: bool,
    /// Average transit speed, in meters per hour
    #[arg(long, default_value_t = 25_000.0)]
    transit_speed: f64,
    /// Walking speed, in meters per hour
    #[arg(long, default_value_t = 4_500.0)]
    walking_speed: f64,
    /// Minutes added for each line change
    #[arg(long, default_value_t = 4.0)]
    transfer_minutes: f64,

    /// Load the dataset into memory instead of querying Neo4j
    #[arg(long)]
    offline: bool,

    #[command(flatten)]
    neo4j: Neo4jArgs,
    #[command(flatten)]
    dataset: DatasetArgs,
}

impl RouteArgs {
    fn planner_config(&self) -> PlannerConfig {
        let config = PlannerConfig {
            transit_speed_m_per_h: self.transit_speed,
            walking_speed_m_per_h: self.walking_speed,
            transfer_delay_mins: self.transfer_minutes,
            ..PlannerConfig::default()
        };
        if self.include_walking {
            config.with_walking_links()
        } else {
            config
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("failed to render itinerary: {0}")]
    Render(#[from] askama::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Load {
            neo4j,
            dataset,
            walk_threshold,
        } => load(&neo4j, &dataset, walk_threshold).await,
        Command::Route(args) => route(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load(neo4j: &Neo4jArgs, dataset: &DatasetArgs, walk_threshold: f64) -> Result<(), CliError> {
    let client = neo4j.client()?;
    let dataset = dataset.source().fetch().await?;
    let config = LoaderConfig {
        walk_threshold_m: walk_threshold,
    };

    let summary = load_dataset(&client, &dataset, &config).await?;
    info!(
        stations = summary.stations,
        train_links = summary.train_links,
        transfer_links = summary.transfer_links,
        walking_links = summary.walking_links,
        skipped_links = summary.skipped_links,
        "dataset loaded"
    );
    Ok(())
}

async fn route(args: &RouteArgs) -> Result<(), CliError> {
    let request = RouteRequest::from_coordinates(
        args.x_departure,
        args.y_departure,
        args.x_arrival,
        args.y_arrival,
    )?;
    let config = args.planner_config();

    let text = if args.offline {
        let store = InMemoryGraphStore::new();
        let dataset = args.dataset.source().fetch().await?;
        load_dataset(&store, &dataset, &LoaderConfig::default()).await?;
        plan_and_render(&store, &config, &request).await?
    } else {
        let client = args.neo4j.client()?;
        plan_and_render(&client, &config, &request).await?
    };

    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

async fn plan_and_render<S: GraphStore>(
    store: &S,
    config: &PlannerConfig,
    request: &RouteRequest,
) -> Result<String, CliError> {
    let planner = RoutePlanner::new(store, config)?;
    let itinerary = planner.plan(request).await?;
    Ok(report::render(&itinerary)?)
}
