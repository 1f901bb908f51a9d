//! Owned battle session: state plus the collaborators that drive it.

use crate::action::{Action, Side};
use crate::ai::{ActionPolicy, WildMonsterPolicy};
use crate::config::BattleConfig;
use crate::env::{BattleEnv, Dice, EnemyGenerator, PcgRng, RngOracle, WildEnemyGenerator};
use crate::state::{BattleState, Combatant, MatchOutcome, PendingTurn, RunStats, TurnPhase};

use super::{BattleEngine, Carryover, SetupError, TurnError, TurnReport};

/// A battle session the caller holds between turns.
///
/// Defaults to [`PcgRng`], [`WildMonsterPolicy`] for the enemy,
/// [`WildEnemyGenerator`] and [`BattleConfig::default`]. Use
/// [`BattleSession::builder`] to swap any of them.
pub struct BattleSession {
    state: BattleState,
    roster: Vec<Combatant>,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    policy: Box<dyn ActionPolicy>,
    generator: Box<dyn EnemyGenerator>,
}

impl BattleSession {
    pub fn new(team: Vec<Combatant>, seed: u64) -> Result<Self, SetupError> {
        Self::builder(team, seed).build()
    }

    pub fn builder(team: Vec<Combatant>, seed: u64) -> BattleSessionBuilder {
        BattleSessionBuilder {
            team,
            seed,
            config: BattleConfig::default(),
            rng: Box::new(PcgRng),
            policy: Box::new(WildMonsterPolicy),
            generator: Box::new(WildEnemyGenerator),
        }
    }

    fn parts(&mut self) -> (BattleEngine<'_>, BattleEnv<'_>) {
        let env = BattleEnv::new(
            self.rng.as_ref(),
            self.policy.as_ref(),
            self.generator.as_ref(),
            &self.config,
        );
        (BattleEngine::new(&mut self.state), env)
    }

    fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(
            self.rng.as_ref(),
            self.policy.as_ref(),
            self.generator.as_ref(),
            &self.config,
        )
    }

    pub fn select(&mut self, action: &Action) -> Result<PendingTurn, TurnError> {
        let (mut engine, env) = self.parts();
        engine.select(env, action)
    }

    pub fn resolve(&mut self) -> Result<TurnReport, TurnError> {
        let (mut engine, env) = self.parts();
        engine.resolve(env)
    }

    pub fn submit(&mut self, action: &Action) -> Result<TurnReport, TurnError> {
        let (mut engine, env) = self.parts();
        engine.submit(env, action)
    }

    /// Asks `policy` what the player's active combatant should do now.
    ///
    /// Read-only: draws from the current nonce on the player's seed slot and
    /// does not advance it.
    pub fn suggest_player_action(&self, policy: &dyn ActionPolicy) -> Action {
        let dice = Dice::new(
            self.rng.as_ref(),
            self.state.seed,
            self.state.nonce,
            Side::Player.actor_slot(),
        );
        policy.choose_action(self.state.player(), &self.state.enemy, &dice, &self.config)
    }

    /// Sets up a new battle with `team`, keeping progression counters.
    ///
    /// The new battle's seed is derived from the current seed and nonce.
    pub fn start_battle(&mut self, team: Vec<Combatant>) -> Result<(), SetupError> {
        let carryover = Carryover {
            run: self.state.run,
            enemies_spawned: self.state.enemies_spawned,
        };
        let seed = self.state.seed.wrapping_add(self.state.nonce);
        self.state = BattleEngine::setup(&team, seed, carryover, self.env())?;
        self.roster = team;
        Ok(())
    }

    /// Restarts with the current roster, resetting defeated enemies and the
    /// current streak. The best streak is kept.
    pub fn new_game(&mut self) -> Result<(), SetupError> {
        let mut run = self.state.run;
        run.reset();
        let carryover = Carryover {
            run,
            enemies_spawned: self.state.enemies_spawned,
        };
        let seed = self.state.seed.wrapping_add(self.state.nonce);
        self.state = BattleEngine::setup(&self.roster, seed, carryover, self.env())?;
        Ok(())
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn player(&self) -> &Combatant {
        self.state.player()
    }

    pub fn enemy(&self) -> &Combatant {
        &self.state.enemy
    }

    pub fn team(&self) -> &[Combatant] {
        &self.state.team
    }

    pub fn run(&self) -> RunStats {
        self.state.run
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

impl std::fmt::Debug for BattleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BattleSession`].
pub struct BattleSessionBuilder {
    team: Vec<Combatant>,
    seed: u64,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    policy: Box<dyn ActionPolicy>,
    generator: Box<dyn EnemyGenerator>,
}

impl BattleSessionBuilder {
    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Policy that picks the enemy's actions.
    #[must_use]
    pub fn enemy_policy(mut self, policy: impl ActionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn generator(mut self, generator: impl EnemyGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn build(self) -> Result<BattleSession, SetupError> {
        let env = BattleEnv::new(
            self.rng.as_ref(),
            self.policy.as_ref(),
            self.generator.as_ref(),
            &self.config,
        );
        let state = BattleEngine::setup(&self.team, self.seed, Carryover::default(), env)?;
        Ok(BattleSession {
            state,
            roster: self.team,
            config: self.config,
            rng: self.rng,
            policy: self.policy,
            generator: self.generator,
        })
    }
}
