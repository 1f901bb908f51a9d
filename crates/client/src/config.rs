//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

/// Plays an auto-piloted arena run and prints the result.
///
/// Every flag can also be set through the matching `ARENA_*` environment
/// variable (a `.env` file is honoured).
#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Auto-play a monster arena run", long_about = None)]
#[command(version)]
pub struct ArenaConfig {
    /// Battle seed; identical seeds replay identically
    #[arg(long, env = "ARENA_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Comma-separated monster template ids forming the team
    #[arg(
        long,
        env = "ARENA_TEAM",
        value_delimiter = ',',
        default_value = "fire_pup,water_cat,rock_turtle"
    )]
    pub team: Vec<String>,

    /// Data directory with skills.ron, monsters.ron and battle.toml.
    /// Uses the compiled-in catalog when omitted.
    #[arg(long, env = "ARENA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enemies to defeat before the run counts as won
    #[arg(long, env = "ARENA_ENCOUNTERS")]
    pub encounters: Option<u32>,

    /// Stop after this many turns even if the run is still going
    #[arg(long, env = "ARENA_MAX_TURNS", default_value_t = 500)]
    pub max_turns: u32,

    /// Print the summary as JSON on stdout
    #[arg(long, env = "ARENA_JSON")]
    pub json: bool,

    /// Also write logs to `<dir>/arena.log`
    #[arg(long, env = "ARENA_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}
