use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use skywatch::catalog::{load_file, CatalogEntry, TleLoader};
use skywatch::config::Config;
use skywatch::propagation::{GmstClock, Sgp4Propagator};
use skywatch::registry::{ObjectView, Registry};
use skywatch::sky::compass_point;
use skywatch::tracker::Tracker;

#[derive(Parser)]
#[command(name = "skywatch")]
#[command(about = "Satellite visibility tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a TLE file or folder and list its objects
    CheckCatalog { path: PathBuf },
    /// Run a single tick and print what is visible
    Snapshot {
        #[arg(long)]
        config: PathBuf,
        /// Evaluation time (RFC3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Print status and visible objects as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the tracker loop and the HTTP API
    Serve {
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckCatalog { path } => check_catalog(&path),
        Commands::Snapshot { config, at, json } => {
            snapshot(&config, at.unwrap_or_else(Utc::now), json)
        }
        Commands::Serve { config } => serve(&config),
    }
}

fn check_catalog(path: &Path) -> ExitCode {
    let result = if path.is_dir() {
        TleLoader::new(path.to_path_buf()).load_all()
    } else {
        load_file(path)
    };

    match result {
        Ok(entries) => {
            println!("Catalog is valid ({} objects)", entries.len());
            for entry in &entries {
                print_entry(entry);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Catalog error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_entry(entry: &CatalogEntry) {
    println!(
        "  {:>6}  {}  (epoch {})",
        entry.catalog_number,
        entry.name,
        entry.elements.epoch().format("%Y-%m-%d %H:%M:%S")
    );
}

fn load_config(path: &Path) -> Option<Config> {
    match Config::from_file(path) {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Config error: {}", e);
            None
        }
    }
}

fn snapshot(config_path: &Path, at: DateTime<Utc>, json: bool) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    let observer = match config.observer.location() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracker = Tracker::new(observer, Registry::new(Sgp4Propagator, GmstClock));
    if let Err(e) = tracker.reload_catalog(&TleLoader::new(config.catalog.tle_folder.clone())) {
        eprintln!("Catalog error: {}", e);
        return ExitCode::FAILURE;
    }
    tracker.tick(at);

    let status = tracker.status();
    if json {
        let output = serde_json::json!({
            "status": status,
            "visible": tracker.visible(),
        });
        return match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    println!(
        "{} from {:.4}, {:.4}: {} of {} objects visible",
        at.to_rfc3339(),
        observer.latitude_deg(),
        observer.longitude_deg(),
        status.visible,
        status.tracked
    );
    for object in tracker.visible() {
        print_view(&object);
    }
    match status.best {
        Some(best) => println!("Best: {}", best.name),
        None => println!("Best: none"),
    }
    ExitCode::SUCCESS
}

fn print_view(object: &ObjectView) {
    let Some(fix) = object.topocentric else {
        return;
    };
    println!(
        "  {} {:<24} az {:>6.1} ({:<3}) el {:>5.1} range {:>7.0} km  signal {:>5.1} [{}] {}",
        if object.is_active { "*" } else { " " },
        object.name,
        fix.azimuth_deg,
        compass_point(fix.azimuth_deg),
        fix.elevation_deg,
        fix.range_km,
        object.signal_strength,
        object.bars_active,
        object.quality.label()
    );
}

fn serve(config_path: &Path) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(skywatch::web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
