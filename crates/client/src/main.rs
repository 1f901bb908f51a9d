//! Arena client binary.
//!
//! Loads the monster catalog, builds a battle session for the configured
//! team and auto-plays it to the end of the run.
//!
//! ```bash
//! cargo run -p arena-client -- --seed 7 --team fire_pup,ice_fox --encounters 5
//! RUST_LOG=battle_core=debug cargo run -p arena-client -- --json
//! ```

use anyhow::Result;
use arena_client::{ArenaConfig, Autopilot, logging};
use clap::Parser;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ArenaConfig::parse();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(seed = config.seed, team = ?config.team, "starting arena run");

    let summary = Autopilot::from_config(&config)?.run()?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let outcome = summary
            .outcome
            .map_or_else(|| "unfinished".to_owned(), |o| o.to_string());
        println!("outcome:          {outcome}");
        println!("turns played:     {}", summary.turns_played);
        println!("enemies defeated: {}", summary.run.defeated_enemies);
        println!("best win streak:  {}", summary.run.best_win_streak);
        for (id, hp) in &summary.survivors {
            println!("  {id} survives with {hp} hp");
        }
    }

    Ok(())
}
