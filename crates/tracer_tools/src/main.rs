//! Market Tracer - command-line route planner

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracer_core::accessibility::Role;
use tracer_tools::render::{render, RenderConfig};
use tracer_tools::route::{plan_route, write_route, RouteRequest, RouteSummary};
use tracer_tools::validate::validate_floor_plan_file;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "market-tracer")]
#[command(about = "Shopping routes through store floor-plans")]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Customer,
    Staff,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Customer => Self::Customer,
            RoleArg::Staff => Self::Staff,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a route through a floor-plan
    Route {
        /// Floor-plan export (JSON)
        #[arg(long)]
        plan: PathBuf,
        /// Item to collect (repeatable)
        #[arg(short, long = "item")]
        items: Vec<String>,
        /// Shopping-list file, one item per line
        #[arg(long)]
        list: Option<PathBuf>,
        /// Who the route is for
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
        /// Planner config (RON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Real-world length of one cell
        #[arg(long)]
        cell_size: Option<f64>,
        /// Forbid squeezing diagonally past corners
        #[arg(long)]
        no_corner_cutting: bool,
        /// Write the route as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print an ASCII overview of the route
        #[arg(long)]
        ascii: bool,
    },
    /// Check a floor-plan for routing problems
    Validate {
        /// Floor-plan export (JSON)
        #[arg(long)]
        plan: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Route {
            plan,
            items,
            list,
            role,
            config,
            cell_size,
            no_corner_cutting,
            output,
            ascii,
        } => {
            let request = RouteRequest {
                plan,
                items,
                list,
                config,
                role: role.map(Role::from),
                cell_size,
                no_corner_cutting,
            };
            let (floor_plan, route) = match plan_route(&request) {
                Ok(planned) => planned,
                Err(e) => {
                    tracing::error!("Route planning failed: {e}");
                    std::process::exit(1);
                }
            };

            print!("{}", RouteSummary(&route));
            if ascii {
                print!(
                    "{}",
                    render(&floor_plan, Some(&route), &RenderConfig::default())
                );
            }
            if let Some(path) = output {
                if let Err(e) = write_route(&route, &path) {
                    tracing::error!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { plan, json } => {
            tracing::info!("Validating floor-plan: {}", plan.display());
            let report = match validate_floor_plan_file(&plan) {
                Ok(report) => report,
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            };

            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => println!("{text}"),
                    Err(e) => tracing::error!("Failed to encode report: {e}"),
                }
            } else {
                print!("{report}");
            }

            if report.is_ok() {
                tracing::info!("Validation passed");
            } else {
                tracing::error!("Validation found {} error(s)", report.errors.len());
                std::process::exit(1);
            }
        }
    }
}
