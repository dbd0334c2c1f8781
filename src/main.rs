// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod api;
mod config;
mod error;
mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};
use route_core::{
    MapEvent, MapState, RouteTooltip, Scene, SceneOptions, SelectionEvent, StateEvent,
    TimetablePanel,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use api::{DataClient, DataSource};
use config::AppConfig;
use error::CliError;

/// Airport route map viewer.
#[derive(Debug, Parser)]
#[command(name = "routemap", version, about)]
struct Cli {
    /// Backend base URL serving /airports and /flights
    #[arg(long, global = true, env = "ROUTEMAP_API_BASE")]
    api_base: Option<String>,

    /// Read airports.json and flights.json from this directory (takes precedence over --api-base)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the per-user one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List airports; with --select, mark which ones stay highlighted
    Airports {
        #[arg(long)]
        select: Option<String>,
    },
    /// Show departures from an airport
    Timetable { airport: String },
    /// Show flights in both directions between two airports
    Pair { a: String, b: String },
    /// Print the full scene as JSON
    Scene {
        #[arg(long)]
        select: Option<String>,
    },
    /// Select airports interactively from stdin
    Explore,
    /// Show the resolved configuration
    Config {
        /// Write the resolved configuration to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let api_base = config.resolve_api_base(cli.api_base.as_deref());
    let options = config.scene_options();

    let source = match cli.data_dir {
        Some(dir) => DataSource::Files { dir },
        None => DataSource::Http {
            base: api_base.clone(),
        },
    };

    match cli.command {
        Command::Config { save } => show_config(&config, &api_base, save.as_deref())?,
        Command::Airports { select } => {
            let mut state = load_state(source, &config).await?;
            select_if_given(&mut state, select);
            let scene = Scene::build(&state, &options);
            print!("{}", render::airport_list(&scene));
            println!("{}", render::summary(&scene));
        }
        Command::Timetable { airport } => {
            let state = load_state(source, &config).await?;
            let panel = TimetablePanel::build(&state.index(), &airport);
            print!("{}", render::timetable(&panel));
        }
        Command::Pair { a, b } => {
            let state = load_state(source, &config).await?;
            let tooltip = RouteTooltip::build(&state.index(), &a, &b);
            print!("{}", render::route_tooltip(&tooltip));
        }
        Command::Scene { select } => {
            let mut state = load_state(source, &config).await?;
            select_if_given(&mut state, select);
            let scene = Scene::build(&state, &options);
            println!("{}", serde_json::to_string_pretty(&scene)?);
        }
        Command::Explore => {
            let mut state = load_state(source, &config).await?;
            explore(&mut state, &options).await?;
        }
    }

    Ok(())
}

/// Load both datasets into a fresh, unselected map state.
async fn load_state(source: DataSource, config: &AppConfig) -> Result<MapState, CliError> {
    let client = DataClient::new(source, config.request_timeout())?;
    let data = client.load().await;

    let mut state = MapState::default();
    state.update(MapEvent::AirportsLoaded(data.airports));
    state.update(MapEvent::FlightsLoaded(data.flights));

    let duplicates = state.store().duplicate_keys();
    if !duplicates.is_empty() {
        info!("{} airport names are ambiguous after normalization", duplicates.len());
    }

    Ok(state)
}

fn select_if_given(state: &mut MapState, airport: Option<String>) {
    if let Some(airport) = airport {
        state.update(SelectionEvent::AirportActivated(airport));
    }
}

fn show_config(
    config: &AppConfig,
    api_base: &str,
    save: Option<&Path>,
) -> Result<(), CliError> {
    match AppConfig::get_config_path() {
        Ok(path) => println!("config file:  {}", path.display()),
        Err(e) => println!("config file:  unavailable ({e})"),
    }
    println!("api base:     {api_base}");
    println!(
        "map center:   {}, {} (zoom {})",
        config.map_center_lat, config.map_center_lon, config.default_zoom
    );
    match config.request_timeout_secs {
        Some(secs) => println!("timeout:      {secs}s"),
        None => println!("timeout:      none"),
    }

    if let Some(path) = save {
        let resolved = AppConfig {
            api_base: api_base.to_string(),
            ..config.clone()
        };
        resolved.save_to(path)?;
        info!("Saved configuration to {}", path.display());
    }

    Ok(())
}

/// Feed stdin lines into the selection state machine.
///
/// A line naming a loaded airport activates its point; an empty line or
/// `clear` activates the background; `quit` ends the session.
async fn explore(state: &mut MapState, options: &SceneOptions) -> Result<(), CliError> {
    let mut events = state.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::summary(&Scene::build(state, options)));

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        let event = match input {
            "quit" | "exit" => break,
            "" | "clear" => SelectionEvent::BackgroundActivated,
            name => match state.store().airport_by_name(name) {
                Some(airport) => SelectionEvent::AirportActivated(airport.name.clone()),
                None => {
                    println!("unknown airport: {name}");
                    continue;
                }
            },
        };

        state.update(event);

        while let Ok(change) = events.try_recv() {
            debug!("State event: {:?}", change);
            if let StateEvent::SelectionChanged(selected) = change {
                match selected {
                    Some(name) => println!("selected: {name}"),
                    None => println!("selection cleared"),
                }
            }
        }

        let scene = Scene::build(state, options);
        println!("{}", render::summary(&scene));
        if let Some(panel) = &scene.panel {
            print!("{}", render::timetable(panel));
        }
    }

    Ok(())
}
