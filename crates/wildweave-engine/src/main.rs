//! Admin binary for Wildweave.
//!
//! Wires the description pipeline to a hint backend (PostgreSQL, or an
//! offline JSON fixture) and exposes its operator surfaces on the command
//! line: tile descriptions, resource surveys and maps, harvesting, cache
//! statistics and database migrations.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `wildweave.yaml`
//! 3. Initialize structured logging (tracing)
//! 4. Open the hint backend and restore persisted harvest state
//! 5. Set the game clock
//! 6. Run the command

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildweave_core::{
    DescriptionPipeline, DynHintSource, DynRegionIndex, EngineConfig, GameClock, LogFormat,
};
use wildweave_db::{PgRegionStore, PostgresConfig};
use wildweave_narrative::HintFixture;
use wildweave_types::ResourceKind;
use wildweave_world::CharacterView;

use crate::error::EngineError;

#[derive(Parser, Debug)]
#[command(name = "wildweave-engine")]
#[command(about = "Procedural wilderness descriptions: inspect, survey and administer")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "wildweave.yaml")]
    config: PathBuf,

    /// Read regions, profiles and hints from a JSON fixture instead of PostgreSQL
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Absolute in-game hour to evaluate at
    #[arg(long, default_value = "0")]
    hour: u64,

    /// Hours to advance the clock after setting it
    #[arg(long, default_value = "0")]
    advance: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the description of a wilderness tile
    Describe {
        /// X coordinate
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Y coordinate
        #[arg(allow_hyphen_values = true)]
        y: i32,
        /// Zone to look up regions in (defaults to the wilderness zone)
        #[arg(long)]
        zone: Option<i32>,
        /// Name of the looking character
        #[arg(long, default_value = "observer")]
        viewer: String,
        /// Print only the unified region description
        #[arg(long)]
        unified: bool,
    },
    /// Print a resource survey of a tile
    Survey {
        /// X coordinate
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Y coordinate
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },
    /// Print an ASCII abundance map around a tile
    Map {
        /// Resource name (vegetation, minerals, water, herbs, game, wood, stone, clay, salt)
        resource: String,
        /// X coordinate
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Y coordinate
        #[arg(allow_hyphen_values = true)]
        y: i32,
        /// Map radius (clamped to 3-15)
        #[arg(short, long, default_value = "7")]
        radius: i32,
    },
    /// Harvest a resource at a tile and persist the result
    Harvest {
        /// Resource name
        resource: String,
        /// X coordinate
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Y coordinate
        #[arg(allow_hyphen_values = true)]
        y: i32,
        /// Fraction of the current level to take
        #[arg(long, default_value = "0.1")]
        amount: f32,
    },
    /// Describe every tile in a square and print cache statistics as JSON
    Stats {
        /// Centre X coordinate
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: i32,
        /// Centre Y coordinate
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        y: i32,
        /// Half-width of the square
        #[arg(long, default_value = "2")]
        radius: i32,
    },
    /// Apply database migrations, then import the fixture if one is given
    Migrate,
}

/// Hint backend selected on the command line.
struct Backend {
    source: DynHintSource,
    regions: DynRegionIndex,
    store: Option<Arc<PgRegionStore>>,
}

/// Application entry point for the admin binary.
///
/// # Errors
///
/// Returns an error if configuration, the backend, or the command fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = EngineConfig::from_file(&cli.config).map_err(EngineError::from)?;
    init_logging(&config);
    info!(
        config = %cli.config.display(),
        seed = config.world.seed,
        zone = config.world.wilderness_zone,
        "wildweave-engine starting"
    );

    run(cli, config)?;
    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    match config.logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

fn run(cli: Cli, config: EngineConfig) -> Result<(), EngineError> {
    if matches!(cli.command, Command::Migrate) {
        return migrate(&config, cli.fixture.as_deref());
    }

    let backend = open_backend(&config, cli.fixture.as_deref())?;
    let zone = config.world.wilderness_zone;
    let mut pipeline = DescriptionPipeline::with_perlin(config, backend.source, backend.regions);

    if let Some(store) = &backend.store {
        let records = store.load_harvest()?;
        let restored = pipeline.restore_harvest(&records)?;
        info!(restored, "Harvest state restored");
    }

    pipeline.set_clock(GameClock::new(cli.hour));
    if cli.advance > 0 {
        let now = pipeline.advance_hours(cli.advance)?;
        info!(hour = now.hour, day = now.day, month = now.month, year = now.year, "Clock advanced");
    }

    match cli.command {
        Command::Describe {
            x,
            y,
            zone: zone_arg,
            viewer,
            unified,
        } => {
            let zone = zone_arg.unwrap_or(zone);
            let text = if unified {
                pipeline
                    .create_unified_wilderness_description(zone, x, y)
                    .unwrap_or_default()
            } else {
                pipeline.describe_wilderness(&CharacterView::named(viewer), zone, x, y)
            };
            print!("{text}");
        }
        Command::Survey { x, y } => {
            println!("{}", pipeline.survey(x, y).render());
        }
        Command::Map {
            resource,
            x,
            y,
            radius,
        } => {
            let kind = parse_resource(&resource)?;
            println!("{}", pipeline.resource_map(kind, x, y, radius));
        }
        Command::Harvest {
            resource,
            x,
            y,
            amount,
        } => {
            let kind = parse_resource(&resource)?;
            let outcome = pipeline.harvest(kind, x, y, amount)?;
            println!(
                "Harvested {kind} at ({x}, {y}): {:.2} -> {:.2}, {} quality",
                outcome.level_before,
                outcome.level_after,
                outcome.quality.as_str()
            );
            if let Some(store) = &backend.store {
                store.save_harvest(&pipeline.harvest_snapshot())?;
            }
        }
        Command::Stats { x, y, radius } => {
            let viewer = CharacterView::named("observer");
            let radius = radius.clamp(0, 32);
            for ty in y.saturating_sub(radius)..=y.saturating_add(radius) {
                for tx in x.saturating_sub(radius)..=x.saturating_add(radius) {
                    let _ = pipeline.describe_wilderness(&viewer, zone, tx, ty);
                }
            }
            println!("{}", serde_json::to_string_pretty(&pipeline.stats())?);
        }
        Command::Migrate => {}
    }

    if let Some(store) = &backend.store {
        store.close();
    }
    Ok(())
}

/// Resolve a resource name given on the command line.
fn parse_resource(name: &str) -> Result<ResourceKind, EngineError> {
    ResourceKind::parse(name).ok_or_else(|| EngineError::Usage {
        message: format!("unknown resource {name:?}"),
    })
}

fn postgres_config(config: &EngineConfig) -> PostgresConfig {
    PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections.max(1))
        .with_acquire_timeout(Duration::from_millis(config.database.acquire_timeout_ms))
        .with_statement_timeout(Duration::from_millis(config.database.statement_timeout_ms))
}

fn load_fixture(path: &Path) -> Result<HintFixture, EngineError> {
    let raw = std::fs::read_to_string(path)?;
    let fixture: HintFixture = serde_json::from_str(&raw)?;
    info!(
        path = %path.display(),
        regions = fixture.regions.len(),
        hints = fixture.hints.len(),
        profiles = fixture.profiles.len(),
        "Hint fixture loaded"
    );
    Ok(fixture)
}

fn open_backend(config: &EngineConfig, fixture: Option<&Path>) -> Result<Backend, EngineError> {
    if let Some(path) = fixture {
        let (source, regions) = load_fixture(path)?.into_parts();
        return Ok(Backend {
            source: Box::new(source),
            regions: Box::new(regions),
            store: None,
        });
    }

    let store = Arc::new(PgRegionStore::connect(&postgres_config(config))?);
    Ok(Backend {
        source: Box::new(Arc::clone(&store)),
        regions: Box::new(Arc::clone(&store)),
        store: Some(store),
    })
}

fn migrate(config: &EngineConfig, fixture: Option<&Path>) -> Result<(), EngineError> {
    let store = PgRegionStore::connect(&postgres_config(config))?;
    store.run_migrations()?;
    if let Some(path) = fixture {
        let summary = store.import_fixture(&load_fixture(path)?)?;
        println!(
            "Imported {} regions, {} profiles, {} hints",
            summary.regions, summary.profiles, summary.hints
        );
    }
    store.close();
    Ok(())
}
