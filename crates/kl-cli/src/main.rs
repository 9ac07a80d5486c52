use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use kl_core::{Discipline, Distance, Gender, RaceResultSet, distance_set};
use tracing_subscriber::EnvFilter;

use kl_cli::commands::{distance, head_to_head, klassement, qualification, util};
use kl_cli::{Cli, Commands, Config, SelectArgs};

/// The resolved selection for one invocation: flags override config, which
/// overrides the built-in defaults.
struct Selection {
    discipline: Discipline,
    gender: Gender,
    distances: Vec<Distance>,
    results: RaceResultSet,
}

fn resolve_selection(config_path: Option<&Path>, select: &SelectArgs) -> Result<Selection> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let discipline = select
        .discipline
        .map_or(config.discipline, Discipline::from);
    let gender = select.gender.map_or(config.gender, Gender::from);
    let results_path = select.results.clone().or(config.results_path);

    let results = util::load_results(results_path.as_deref(), discipline, gender)?;
    let distances = distance_set(discipline, gender);

    Ok(Selection {
        discipline,
        gender,
        distances,
        results,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Klassement { select, json }) => {
            let sel = resolve_selection(cli.config.as_deref(), select)?;
            klassement::run(sel.discipline, sel.gender, &sel.results, &sel.distances, *json)?;
        }
        Some(Commands::Distance {
            distance: query,
            select,
            json,
        }) => {
            let sel = resolve_selection(cli.config.as_deref(), select)?;
            distance::run(
                query,
                sel.discipline,
                sel.gender,
                &sel.results,
                &sel.distances,
                *json,
            )?;
        }
        Some(Commands::HeadToHead {
            athlete,
            target_rank,
            target,
            focus,
            select,
            json,
        }) => {
            let sel = resolve_selection(cli.config.as_deref(), select)?;
            head_to_head::run(
                athlete,
                *target_rank,
                target.as_deref(),
                focus.as_deref(),
                sel.discipline,
                sel.gender,
                &sel.results,
                &sel.distances,
                *json,
            )?;
        }
        Some(Commands::Qualification { select, json }) => {
            let sel = resolve_selection(cli.config.as_deref(), select)?;
            qualification::run(sel.discipline, sel.gender, &sel.results, &sel.distances, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
