//! Auto-play loop.
//!
//! The player side is driven by [`WildMonsterPolicy`], the same policy the
//! enemy uses, drawing on the player's own seed slot.

use anyhow::{Context, Result};
use battle_content::{ContentFactory, MonsterCatalog};
use battle_core::{
    BattleConfig, BattleSession, MatchOutcome, RunStats, TurnReport, TurnTransition,
    WildMonsterPolicy,
};
use serde::Serialize;

use crate::config::ArenaConfig;

/// Final state of an auto-played run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub turns_played: u32,
    /// `None` when the turn cap stopped the run first.
    pub outcome: Option<MatchOutcome>,
    pub run: RunStats,
    /// Team members still standing, as `(id, hp)`.
    pub survivors: Vec<(String, u32)>,
}

pub struct Autopilot {
    session: BattleSession,
    policy: WildMonsterPolicy,
    max_turns: u32,
    seed: u64,
}

impl Autopilot {
    pub fn new(session: BattleSession, seed: u64, max_turns: u32) -> Self {
        Self {
            session,
            policy: WildMonsterPolicy,
            max_turns,
            seed,
        }
    }

    /// Loads content and builds the session described by `config`.
    pub fn from_config(config: &ArenaConfig) -> Result<Self> {
        let (catalog, mut battle) = match &config.data_dir {
            Some(dir) => {
                let factory = ContentFactory::new(dir);
                (factory.load_catalog()?, factory.load_config()?)
            }
            None => (MonsterCatalog::builtin()?, BattleConfig::default()),
        };
        if let Some(limit) = config.encounters {
            battle = battle.with_encounter_limit(limit);
            battle.validate()?;
        }

        let team = catalog.team(&config.team)?;
        let session = BattleSession::builder(team, config.seed)
            .config(battle)
            .build()
            .context("failed to set up battle")?;
        Ok(Self::new(session, config.seed, config.max_turns))
    }

    /// Plays one turn with the suggested player action.
    pub fn step(&mut self) -> Result<TurnReport> {
        let action = self.session.suggest_player_action(&self.policy);
        let report = self
            .session
            .submit(&action)
            .with_context(|| format!("turn {} failed", self.session.turn()))?;

        let enemy_hp = self.session.enemy().hp();
        tracing::info!(
            turn = report.turn,
            player = %report.player_action,
            enemy = %report.enemy_action,
            player_hp = self.session.player().hp(),
            enemy_hp,
            transition = report.transition.as_str(),
            "turn played"
        );
        Ok(report)
    }

    /// Plays until the run ends or the turn cap is reached.
    pub fn run(mut self) -> Result<RunSummary> {
        let mut turns_played = 0;
        while !self.session.is_finished() && turns_played < self.max_turns {
            let report = self.step()?;
            turns_played += 1;
            if let TurnTransition::EnemyReplaced { defeated, .. } = &report.transition {
                tracing::debug!(%defeated, streak = report.run.current_win_streak, "enemy down");
            }
        }
        if !self.session.is_finished() {
            tracing::warn!(max_turns = self.max_turns, "turn cap reached, run still going");
        }

        Ok(self.summary(turns_played))
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    fn summary(&self, turns_played: u32) -> RunSummary {
        RunSummary {
            seed: self.seed,
            turns_played,
            outcome: self.session.outcome(),
            run: self.session.run(),
            survivors: self
                .session
                .team()
                .iter()
                .filter(|member| !member.is_defeated())
                .map(|member| (member.id.to_string(), member.hp()))
                .collect(),
        }
    }
}
