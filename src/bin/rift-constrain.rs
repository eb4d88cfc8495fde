use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use rift_constraints::common::config::{Config, config_file};
use rift_constraints::common::log;
use rift_constraints::constraints::{ConstraintSolver, Priority};
use rift_constraints::geometry::Rect;
use rift_constraints::model::Scene;
use serde::Serialize;
use tracing::{info, warn};

/// Runs the window constraint solver on one scene and prints where the window
/// ends up.
#[derive(Parser)]
#[command(name = "rift-constrain")]
struct Cli {
    /// Scene file describing the screen, the window and the request.
    scene: PathBuf,

    /// Read settings from this file instead of ~/.rift-constraints.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check the settings for invalid values and exit without solving.
    #[arg(long)]
    validate: bool,
}

#[derive(Serialize)]
struct Output {
    rect: Rect,
    threshold: Priority,
    satisfied: bool,
    require_fully_onscreen: bool,
    require_on_single_monitor: bool,
    maximized: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::read(path).with_context(|| format!("reading config {}", path.display()));
    }
    let default_path = config_file();
    if default_path.exists() {
        Config::read(&default_path).with_context(|| format!("reading config {}", default_path.display()))
    } else {
        Ok(Config::default())
    }
}

fn main() -> anyhow::Result<()> {
    let opt: Cli = Parser::parse();
    log::init_logging();

    let mut config = load_config(opt.config.as_ref())?;

    let issues = config.validate();
    if opt.validate {
        for issue in &issues {
            println!("{issue}");
        }
        if !issues.is_empty() {
            process::exit(1);
        }
        return Ok(());
    }
    if !issues.is_empty() {
        for issue in &issues {
            warn!("{issue}");
        }
        let fixes = config.auto_fix_values();
        info!(fixes, "fixed invalid config values");
    }

    let Scene { screen, mut window, request } = Scene::read(&opt.scene)?;
    let mut placement = request.placement.placement();
    let solver = ConstraintSolver::new(&config.settings);

    let result = solver.constrain(&mut window, &screen, placement.as_mut(), &request.to_request())?;

    let output = Output {
        rect: result.rect,
        threshold: result.threshold,
        satisfied: result.satisfied,
        require_fully_onscreen: window.require_fully_onscreen,
        require_on_single_monitor: window.require_on_single_monitor,
        maximized: window.maximized,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
