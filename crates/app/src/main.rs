//! Swapper CLI

use std::{fs, path::PathBuf, process, sync::Arc};

use clap::{Args, Parser, Subcommand, ValueEnum};
use swapper::{
    config::SwapperConfig,
    fixtures::{pages, quantity_maps},
    page::MemoryPage,
    quantities::{QuantityMap, SelectorId},
    selectors::Step,
};
use swapper_app::{
    cart::{CartService, HttpCartService, MemoryCartService},
    config::{CartArgs, LoggingArgs, SwapperArgs},
    synchronizer::{QuantitySwapper, StepOutcome},
};
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_QUANTITY_MAP: &str = include_str!("../../../fixtures/quantity_maps/default.yml");
const DEFAULT_PAGE: &str = include_str!("../../../fixtures/pages/default.yml");

#[derive(Debug, Parser)]
#[command(name = "swapper", about = "Quantity to package swapper", long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the package lines a selector quantity maps to
    Normalize(NormalizeArgs),

    /// Show the package id -> quantity reverse maps
    ReverseMap(MapArgs),

    /// Initialize a page, press buttons, and report the resulting state
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct MapArgs {
    /// Quantity map YAML file; the bundled map is used when omitted
    #[arg(long, env = "SWAPPER_QUANTITY_MAP")]
    map: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    #[command(flatten)]
    map: MapArgs,

    /// Selector id
    #[arg(long, default_value = "limos-card")]
    selector: String,

    /// Selected quantity
    #[arg(long)]
    quantity: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StepArg {
    /// Press the increase button
    #[value(alias = "+")]
    Increase,

    /// Press the decrease button
    #[value(alias = "-")]
    Decrease,
}

impl From<StepArg> for Step {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Increase => Step::Increase,
            StepArg::Decrease => Step::Decrease,
        }
    }
}

#[derive(Debug, Args)]
struct SimulateArgs {
    #[command(flatten)]
    map: MapArgs,

    /// Page YAML file; the bundled page is used when omitted
    #[arg(long, env = "SWAPPER_PAGE")]
    page: Option<PathBuf>,

    /// Selector the steps apply to
    #[arg(long, default_value = "limos-card")]
    selector: String,

    /// Comma-separated button presses (increase/+, decrease/-)
    #[arg(long, value_enum, value_delimiter = ',')]
    steps: Vec<StepArg>,

    #[command(flatten)]
    swapper: SwapperArgs,

    #[command(flatten)]
    cart: CartArgs,
}

#[derive(Debug, Tabled)]
struct LineRow {
    package_id: u64,
    quantity: u32,
}

#[derive(Debug, Tabled)]
struct ReverseRow {
    selector: String,
    package_id: u64,
    quantity: u32,
}

#[derive(Debug, Tabled)]
struct SelectorRow {
    selector: String,
    quantity: u32,
    display: String,
    next_package: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logging(&cli);

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let debug = matches!(&cli.command, Commands::Simulate(args) if args.swapper.debug);
    let level = if debug {
        "debug"
    } else {
        cli.logging.log_level.as_str()
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Normalize(args) => normalize(&args),
        Commands::ReverseMap(args) => reverse_map(&args),
        Commands::Simulate(args) => simulate(args).await,
    }
}

fn load_map(args: &MapArgs) -> Result<QuantityMap, String> {
    let contents = match &args.map {
        Some(path) => fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
        None => DEFAULT_QUANTITY_MAP.to_string(),
    };

    quantity_maps::parse(&contents).map_err(|error| format!("invalid quantity map: {error}"))
}

fn load_page(path: Option<&PathBuf>) -> Result<MemoryPage, String> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
        None => DEFAULT_PAGE.to_string(),
    };

    pages::parse(&contents).map_err(|error| format!("invalid page: {error}"))
}

fn normalize(args: &NormalizeArgs) -> Result<(), String> {
    let map = load_map(&args.map)?;
    let packages = map.package_set(&SelectorId::new(args.selector.as_str()), args.quantity);

    if packages.is_empty() {
        println!(
            "no packages for {} at quantity {}",
            args.selector, args.quantity
        );

        return Ok(());
    }

    let rows = packages.iter().map(|line| LineRow {
        package_id: line.package_id.0,
        quantity: line.quantity,
    });

    println!("{}", Table::new(rows));

    Ok(())
}

fn reverse_map(args: &MapArgs) -> Result<(), String> {
    let map = load_map(args)?;
    let reverse = map.reverse_maps();

    let rows = reverse.iter().flat_map(|(selector, reverse)| {
        reverse
            .entries()
            .into_iter()
            .map(move |(package_id, quantity)| ReverseRow {
                selector: selector.to_string(),
                package_id: package_id.0,
                quantity,
            })
    });

    println!("{}", Table::new(rows));

    Ok(())
}

async fn simulate(args: SimulateArgs) -> Result<(), String> {
    let map = load_map(&args.map)?;
    let page = load_page(args.page.as_ref())?;
    let config = SwapperConfig::from(&args.swapper);

    let memory_cart = Arc::new(MemoryCartService::new());
    let cart: Arc<dyn CartService> = match args.cart.http_config() {
        Some(http) => Arc::new(
            HttpCartService::new(http)
                .map_err(|error| format!("failed to build cart client: {error}"))?,
        ),
        None => memory_cart.clone(),
    };

    let mut swapper = QuantitySwapper::new(config, map, page, cart);
    swapper.run_when_ready(async {}).await;

    let selector = SelectorId::new(args.selector.as_str());

    for step in args.steps {
        match swapper.step(&selector, step.into()) {
            StepOutcome::Dispatched { quantity, packages } => {
                info!(%selector, quantity, lines = packages.len(), "swap dispatched");
            }
            outcome => info!(%selector, ?outcome, "no swap dispatched"),
        }
    }

    let settled = swapper.settle().await;

    let rows: Vec<SelectorRow> = swapper
        .wired_selectors()
        .filter_map(|selector| {
            let status = swapper.selector(selector)?;
            let snapshot = swapper.page().snapshot(selector)?;

            Some(SelectorRow {
                selector: selector.to_string(),
                quantity: status.quantity,
                display: snapshot.display.unwrap_or_default(),
                next_package: snapshot.next_package.unwrap_or_default(),
            })
        })
        .collect();

    println!("{}", Table::new(rows));

    if args.cart.cart_url.is_none() {
        let lines = memory_cart.lines().into_iter().map(|line| LineRow {
            package_id: line.package_id.0,
            quantity: line.quantity,
        });

        println!("{}", Table::new(lines));
    }

    println!(
        "cart swaps: {} succeeded, {} failed",
        settled.succeeded, settled.failed
    );

    Ok(())
}
