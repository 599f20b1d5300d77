//! Run an all-AI tournament and print the champion as JSON
//!
//! Usage: arena_sim [config.toml]

use anyhow::{Context, Result};
use combat_core::CombatEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tournament_core::autoplay::run_tournament_with_rng;
use tournament_core::manager::create_tournament_with_rng;
use tournament_core::ArenaConfig;
use tracing::info;

fn load_config(path: Option<String>) -> Result<ArenaConfig> {
    match path {
        Some(path) => ArenaConfig::load_from_path(Path::new(&path))
            .with_context(|| format!("failed to load config from {}", path)),
        None => Ok(ArenaConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(std::env::args().nth(1))?;
    let sim = &config.simulation;
    let seed = sim.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, size = sim.tournament_size, "starting simulation");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let engine = CombatEngine::new(config.combat.clone());
    let mut bracket = create_tournament_with_rng(Vec::new(), sim.tournament_size, &mut rng)
        .context("failed to create tournament")?;
    let champion_id =
        run_tournament_with_rng(&mut bracket, &engine, sim.max_turns_per_match, &mut rng)
            .with_context(|| format!("tournament with seed {} did not finish", seed))?;

    for m in bracket.matches() {
        let name = |id| bracket.creature(id).map_or("?", |c| c.name.as_str());
        info!(
            round = m.bracket_round(),
            turns = m.turn_number(),
            "{} vs {} -> {}",
            name(m.creature1_id()),
            name(m.creature2_id()),
            m.winner_id().map_or("undecided", name),
        );
    }

    let champion = bracket
        .creature(champion_id)
        .context("champion missing from roster")?;
    info!(champion = %champion.name, "tournament complete");
    println!("{}", serde_json::to_string_pretty(champion)?);
    Ok(())
}
