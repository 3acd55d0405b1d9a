//! Headless planet demo.
//!
//! Generates a planet from `config.ron` plus CLI overrides, flies a viewer
//! from orbit down to the surface, and logs LOD changes, the full-detail
//! working set, and a proximity warning whenever a small probe around the
//! viewer touches full-detail terrain.
//!
//! Run with: `cargo run -p geode-demo -- --seed 7`

mod flight;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use geode_config::{CliArgs, Config};
use geode_lod::LodContainer;
use geode_planet::{Planet, PlanetError, PlanetSettings};
use glam::Mat4;
use tracing::{error, info, warn};

use crate::flight::{FlightPath, SceneStats, probe_octree};

/// Probe half-size as a fraction of the planet radius.
const PROBE_SCALE: f64 = 0.01;

fn run(config: &Config) -> Result<(), PlanetError> {
    let settings = PlanetSettings::from_config(config)?;
    let started = Instant::now();
    let mut planet = Planet::generate(settings)?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        sub_meshes = planet.tiles().sub_mesh_count(),
        "Generation finished"
    );

    let radius = f64::from(planet.settings().surface.planet_radius);
    let path = FlightPath::default();
    let probe = probe_octree((radius * PROBE_SCALE) as f32);
    let mut scene = SceneStats::default();
    let mut warnings = 0usize;

    for (tick, viewer) in path.positions(radius).enumerate() {
        let altitude = viewer.length() - radius;
        let update = planet.update_visible(viewer, &mut scene);
        if !update.is_empty() {
            info!(
                tick,
                altitude,
                cells_changed = update.cells_changed,
                attached = update.attached,
                detached = update.detached,
                near = scene.count(LodContainer::Near),
                far = scene.count(LodContainer::Far),
                "LOD changed"
            );
        }

        let hits = planet.collisions(&probe, &Mat4::from_translation(viewer.as_vec3()));
        if !hits.is_empty() {
            warnings += 1;
            warn!(
                tick,
                altitude,
                hits = hits.len(),
                first = ?hits[0],
                "Proximity warning: probe touches terrain"
            );
        }
    }

    let high_detail = planet.high_detail().count();
    let hidden = planet.hide(&mut scene);
    info!(
        ticks = path.ticks,
        attaches = scene.attaches,
        detaches = scene.detaches,
        peak_attached = scene.peak,
        final_high_detail = high_detail,
        hidden = hidden.detached,
        warnings,
        "Flight finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args
        .config
        .clone()
        .or_else(|| dirs::config_dir().map(|d| d.join("geode")))
    {
        Some(dir) => dir,
        None => {
            eprintln!("Could not resolve a config directory; pass --config <dir>");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    geode_log::init_logging(
        Some(&log_dir),
        cfg!(debug_assertions) && config.debug.log_to_file,
        Some(&config),
    );
    info!(config_dir = %config_dir.display(), seed = config.generation.seed, "Geode demo");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Planet generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
