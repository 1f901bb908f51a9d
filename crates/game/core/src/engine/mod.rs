//! Turn orchestration.
//!
//! [`BattleEngine`] is the single writer of [`BattleState`]. A turn runs in
//! two calls: `select` locks in the player's action and asks the policy for
//! the enemy's, `resolve` plays both in fixed order (player first) against
//! working copies and commits them only if every step succeeds.

mod errors;
mod report;
mod session;

pub use errors::{SetupError, TurnError};
pub use report::{GuardExpiry, TurnReport, TurnStep, TurnTransition};
pub use session::{BattleSession, BattleSessionBuilder};

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::action::{Action, Side};
use crate::combat::{self, ActionOutcome};
use crate::env::BattleEnv;
use crate::state::{
    BattleState, Combatant, CombatantId, MatchOutcome, PendingTurn, RunStats, TurnPhase,
};

/// Progression carried from one battle into the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Carryover {
    pub run: RunStats,
    pub enemies_spawned: u32,
}

/// Engine that advances a battle one turn at a time.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    /// Builds the state for a new battle.
    ///
    /// Team members are copied at full HP with zero cooldowns and no guard.
    /// The first enemy is generated against the first member.
    pub fn setup(
        team: &[Combatant],
        seed: u64,
        carryover: Carryover,
        env: BattleEnv<'_>,
    ) -> Result<BattleState, SetupError> {
        validate_team(team)?;
        let team: Vec<Combatant> = team.iter().map(Combatant::refreshed).collect();

        let mut state = BattleState {
            seed,
            nonce: 0,
            turn: 1,
            enemy: team[0].clone(),
            team,
            active: 0,
            phase: TurnPhase::Selection,
            pending: None,
            run: carryover.run,
            enemies_spawned: carryover.enemies_spawned,
            outcome: None,
        };
        state.enemy = spawn_enemy(&mut state, env);

        tracing::info!(
            team = state.team.len(),
            player = %state.player().id,
            enemy = %state.enemy.id,
            seed,
            "battle started"
        );
        Ok(state)
    }

    /// Locks in the player's action and draws the enemy's.
    ///
    /// The enemy chooses from the pre-turn state, without seeing the
    /// player's choice play out. The nonce it drew from is only consumed
    /// when the turn commits.
    pub fn select(&mut self, env: BattleEnv<'_>, action: &Action) -> Result<PendingTurn, TurnError> {
        match self.state.phase {
            TurnPhase::Selection => {}
            TurnPhase::Completed => return Err(TurnError::RunFinished),
            phase => return Err(TurnError::NotAwaitingAction { phase }),
        }
        self.validate_actor(action)?;
        combat::check_action(action, self.state.player())
            .map_err(|source| TurnError::invalid(Side::Player, source))?;

        let dice = env.dice(self.state.seed, self.state.nonce, Side::Enemy.actor_slot());
        let enemy_action =
            env.policy
                .choose_action(&self.state.enemy, self.state.player(), &dice, env.config);

        let pending = PendingTurn {
            player: action.clone(),
            enemy: enemy_action,
        };
        self.state.phase = TurnPhase::Resolution;
        self.state.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Resolves the pending turn.
    ///
    /// On failure nothing is committed: the session is left exactly as it
    /// was before `select`, back in selection with no pending turn.
    pub fn resolve(&mut self, env: BattleEnv<'_>) -> Result<TurnReport, TurnError> {
        match self.state.phase {
            TurnPhase::Resolution => {}
            TurnPhase::Completed => return Err(TurnError::RunFinished),
            phase => return Err(TurnError::NotAwaitingAction { phase }),
        }
        let Some(pending) = self.state.pending.clone() else {
            self.state.phase = TurnPhase::Selection;
            return Err(TurnError::NoPendingTurn);
        };

        self.resolve_pending(env, pending).inspect_err(|err| {
            tracing::warn!(turn = self.state.turn, error = %err, "turn aborted");
            self.state.phase = TurnPhase::Selection;
            self.state.pending = None;
        })
    }

    /// `select` followed by `resolve`.
    pub fn submit(&mut self, env: BattleEnv<'_>, action: &Action) -> Result<TurnReport, TurnError> {
        self.select(env, action)?;
        self.resolve(env)
    }

    fn validate_actor(&self, action: &Action) -> Result<(), TurnError> {
        let current = &self.state.player().id;
        if &action.monster_id != current {
            return Err(TurnError::ActorNotCurrent {
                actor: action.monster_id.clone(),
                current: current.clone(),
            });
        }
        Ok(())
    }

    fn resolve_pending(
        &mut self,
        env: BattleEnv<'_>,
        pending: PendingTurn,
    ) -> Result<TurnReport, TurnError> {
        let seed = self.state.seed;
        // skip the nonce the enemy's selection drew from
        let mut nonce = self.state.nonce + 1;
        let mut player = self.state.player().clone();
        let mut enemy = self.state.enemy.clone();
        let mut steps = ArrayVec::new();
        let mut expired_guards = ArrayVec::new();
        let mut skipped = None;

        let dice = env.dice(seed, nonce, Side::Player.actor_slot());
        let outcome = combat::resolve(&pending.player, &player, &enemy, &dice, env.config)
            .map_err(|source| TurnError::invalid(Side::Player, source))?;
        outcome.apply(&mut player, &mut enemy);
        nonce += 1;
        log_step(Side::Player, &pending.player, &outcome);
        if let Some(expiry) = expire_guard(Side::Enemy, &mut enemy) {
            expired_guards.push(expiry);
        }
        steps.push(TurnStep {
            side: Side::Player,
            action: pending.player.clone(),
            outcome,
        });

        if enemy.is_defeated() {
            tracing::debug!(enemy = %enemy.id, "enemy fell first, its action is skipped");
            skipped = Some(Side::Enemy);
        } else {
            let dice = env.dice(seed, nonce, Side::Enemy.actor_slot());
            let outcome = combat::resolve(&pending.enemy, &enemy, &player, &dice, env.config)
                .map_err(|source| TurnError::invalid(Side::Enemy, source))?;
            outcome.apply(&mut enemy, &mut player);
            nonce += 1;
            log_step(Side::Enemy, &pending.enemy, &outcome);
            if let Some(expiry) = expire_guard(Side::Player, &mut player) {
                expired_guards.push(expiry);
            }
            steps.push(TurnStep {
                side: Side::Enemy,
                action: pending.enemy.clone(),
                outcome,
            });
        }

        player.decay_cooldowns();
        enemy.decay_cooldowns();

        // commit
        let turn = self.state.turn;
        *self.state.player_mut() = player;
        self.state.enemy = enemy;
        self.state.nonce = nonce;
        self.state.turn += 1;
        self.state.pending = None;
        self.state.phase = TurnPhase::Selection;

        let transition = self.evaluate_transition(env);
        Ok(TurnReport {
            turn,
            player_action: pending.player,
            enemy_action: pending.enemy,
            steps,
            skipped,
            expired_guards,
            transition,
            run: self.state.run,
        })
    }

    /// Checks knockouts in priority order: player side first, then enemy.
    fn evaluate_transition(&mut self, env: BattleEnv<'_>) -> TurnTransition {
        let state = &mut *self.state;

        if state.player().is_defeated() {
            if let Some(next) = state.next_standing() {
                let from = state.player().id.clone();
                state.active = next;
                state.enemy.clear_guard();
                let to = state.player().id.clone();
                tracing::info!(%from, %to, "combatant switched");
                return TurnTransition::CombatantSwitched { from, to };
            }

            state.run.record_team_loss();
            state.phase = TurnPhase::Completed;
            state.outcome = Some(if state.enemy.is_defeated() {
                MatchOutcome::Draw
            } else {
                MatchOutcome::EnemyWon
            });
            tracing::info!(
                defeated = state.run.defeated_enemies,
                best_streak = state.run.best_win_streak,
                "run lost"
            );
            return TurnTransition::RunLost;
        }

        if state.enemy.is_defeated() {
            state.run.record_enemy_defeat();
            let defeated = state.enemy.id.clone();

            let limit_reached = env
                .config
                .encounter_limit
                .is_some_and(|limit| state.run.defeated_enemies >= limit);
            if limit_reached {
                state.phase = TurnPhase::Completed;
                state.outcome = Some(MatchOutcome::PlayerWon);
                tracing::info!(
                    defeated = state.run.defeated_enemies,
                    streak = state.run.current_win_streak,
                    "run won"
                );
                return TurnTransition::RunWon;
            }

            state.enemy = spawn_enemy(state, env);
            state.player_mut().clear_guard();
            let replacement = state.enemy.id.clone();
            tracing::info!(
                %defeated,
                %replacement,
                streak = state.run.current_win_streak,
                "enemy replaced"
            );
            return TurnTransition::EnemyReplaced {
                defeated,
                replacement,
            };
        }

        TurnTransition::Continue
    }
}

fn validate_team(team: &[Combatant]) -> Result<(), SetupError> {
    if team.is_empty() {
        return Err(SetupError::EmptyTeam);
    }

    let mut seen = HashSet::new();
    for member in team {
        let invalid = |reason| SetupError::InvalidCombatant {
            id: member.id.clone(),
            reason,
        };
        if !seen.insert(&member.id) {
            return Err(invalid("duplicate combatant id"));
        }
        if member.max_hp() == 0 {
            return Err(invalid("max hp is zero"));
        }
        let probabilities = member
            .skills
            .iter()
            .flat_map(|skill| [skill.dodge_chance, skill.block_reduction])
            .flatten();
        for value in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid("skill probability outside [0, 1]"));
            }
        }
    }
    Ok(())
}

/// Generates the next enemy against the active player combatant.
fn spawn_enemy(state: &mut BattleState, env: BattleEnv<'_>) -> Combatant {
    state.enemies_spawned += 1;
    let id = CombatantId(format!("enemy_{}", state.enemies_spawned));
    let dice = env.dice(state.seed, state.nonce, Side::Enemy.actor_slot());
    state.nonce += 1;
    env.generator
        .generate(state.player(), id, &dice, env.config)
}

fn expire_guard(side: Side, combatant: &mut Combatant) -> Option<GuardExpiry> {
    if combatant.guard.is_empty() {
        return None;
    }
    let expiry = GuardExpiry {
        side,
        combatant: combatant.id.clone(),
        guard: combatant.guard,
    };
    combatant.clear_guard();
    Some(expiry)
}

fn log_step(side: Side, action: &Action, outcome: &ActionOutcome) {
    let result = &outcome.result;
    tracing::debug!(
        %side,
        action = %action,
        target = %result.target,
        damage = result.damage,
        healed = result.healed,
        dodged = result.dodged,
        blocked = result.blocked,
        dodge_attempted = result.dodge_attempted,
        block_attempted = result.block_attempted,
        "step resolved"
    );
}
