// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crystaldice::dice3d::{BoardSettings, CrystalDicePlugin};

#[derive(Parser, Debug)]
#[command(name = "crystaldice")]
#[command(
    author,
    version,
    about = "Crystal Dice - interactive 3D dice tiles you can hover and drag to reorder"
)]
struct Cli {
    /// Board file (JSON) listing the dice tiles and their textures
    #[arg(short, long)]
    board: Option<PathBuf>,

    /// Override the number of grid columns
    #[arg(short, long)]
    columns: Option<usize>,

    /// Override the tile edge length in logical pixels
    #[arg(short = 's', long)]
    tile_size: Option<f32>,

    /// Print the built-in board as JSON and exit
    #[arg(long)]
    print_default_board: bool,
}

/// Where the board came from, reported once logging is up.
#[derive(Resource, Debug, Clone)]
struct BoardSource {
    path: Option<PathBuf>,
    error: Option<String>,
}

fn report_board_source(source: Res<BoardSource>, settings: Res<BoardSettings>) {
    match (&source.path, &source.error) {
        (Some(path), Some(err)) => {
            warn!("{}; using the built-in board ({})", err, path.display());
        }
        (Some(path), None) => {
            info!("Loaded board {} ({} tiles)", path.display(), settings.tiles.len());
        }
        (None, _) => info!("Using the built-in board ({} tiles)", settings.tiles.len()),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.print_default_board {
        match BoardSettings::default().to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let (mut settings, error) = match &cli.board {
        Some(path) => match BoardSettings::load(path) {
            Ok(settings) => (settings, None),
            Err(e) => (BoardSettings::default(), Some(e)),
        },
        None => (BoardSettings::default(), None),
    };

    if let Some(columns) = cli.columns {
        settings.columns = columns;
    }
    if let Some(tile_size) = cli.tile_size {
        settings.tile_size = tile_size;
    }
    if let Err(e) = settings.validate() {
        eprintln!("Error: invalid board overrides: {}", e);
        std::process::exit(1);
    }

    let columns = settings.columns.max(1) as f32;
    let rows = settings.tiles.len().div_ceil(settings.columns.max(1)).max(1) as f32;
    let width = (columns * (settings.tile_size + 14.0) + 80.0).clamp(480.0, 1920.0);
    let height = (rows * (settings.tile_size + 14.0) + 140.0).clamp(360.0, 1200.0);

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Crystal Dice".to_string(),
                        resolution: (width as u32, height as u32).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "info,wgpu=error,naga=warn,crystaldice=info".to_string(),
                    ..default()
                }),
        )
        .add_plugins(CrystalDicePlugin::new(settings))
        .insert_resource(BoardSource {
            path: cli.board.clone(),
            error,
        })
        .add_systems(Startup, report_board_source)
        .run();
}
