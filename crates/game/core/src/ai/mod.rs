//! Action policies: who decides what a combatant does this turn.
//!
//! The engine asks an [`ActionPolicy`] for the enemy's action. The same seam
//! lets headless drivers play the player side with a heuristic or a script.

use std::collections::VecDeque;
use std::sync::Mutex;

use arrayvec::ArrayVec;

use crate::action::{Action, ActionKind};
use crate::config::BattleConfig;
use crate::env::{Dice, RollContext};
use crate::state::{Combatant, SkillKind};

/// Chooses an action for `actor` facing `opponent`.
///
/// Implementations must be deterministic given the dice.
pub trait ActionPolicy: Send + Sync {
    fn choose_action(
        &self,
        actor: &Combatant,
        opponent: &Combatant,
        dice: &Dice<'_>,
        config: &BattleConfig,
    ) -> Action;
}

/// Heuristic used by wild monsters.
///
/// 1. Below `low_hp_ratio` of max HP, a ready heal is always used.
/// 2. Otherwise, with `skill_use_chance`, a ready skill is picked uniformly.
/// 3. Otherwise, or with nothing ready, a basic attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct WildMonsterPolicy;

impl ActionPolicy for WildMonsterPolicy {
    fn choose_action(
        &self,
        actor: &Combatant,
        _opponent: &Combatant,
        dice: &Dice<'_>,
        config: &BattleConfig,
    ) -> Action {
        let ready: ArrayVec<(usize, SkillKind), { BattleConfig::LOADOUT_SIZE }> = actor
            .ready_skills()
            .map(|(slot, skill)| (slot, skill.kind))
            .collect();

        if is_low_hp(actor, config.enemy.low_hp_ratio) {
            if let Some((slot, _)) = ready.iter().find(|(_, kind)| *kind == SkillKind::Heal) {
                tracing::debug!(actor = %actor.id, slot, "low hp, healing");
                return Action::skill(actor.id.clone(), *slot);
            }
        }

        if !ready.is_empty() && dice.chance(RollContext::PolicySkillUse, config.enemy.skill_use_chance)
        {
            let (slot, kind) = ready[dice.pick(RollContext::PolicyPick, ready.len())];
            tracing::debug!(actor = %actor.id, slot, skill = %kind, "using skill");
            return Action::skill(actor.id.clone(), slot);
        }

        tracing::debug!(actor = %actor.id, "basic attack");
        Action::attack(actor.id.clone())
    }
}

/// Strictly below `max_hp * ratio`. The tolerance keeps `30 / 100` at a 0.3
/// ratio from counting as low because `100.0 * 0.3` rounds up.
fn is_low_hp(actor: &Combatant, ratio: f64) -> bool {
    f64::from(actor.hp()) + 1e-9 < f64::from(actor.max_hp()) * ratio
}

/// Replays a fixed list of action kinds, then attacks.
#[derive(Debug, Default)]
pub struct ScriptedPolicy {
    queue: Mutex<VecDeque<ActionKind>>,
}

impl ScriptedPolicy {
    pub fn new(actions: impl IntoIterator<Item = ActionKind>) -> Self {
        Self {
            queue: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

impl ActionPolicy for ScriptedPolicy {
    fn choose_action(
        &self,
        actor: &Combatant,
        _opponent: &Combatant,
        _dice: &Dice<'_>,
        _config: &BattleConfig,
    ) -> Action {
        let next = self
            .queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(ActionKind::Attack);
        Action::new(actor.id.clone(), next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRoll, ScriptedRolls};
    use crate::state::{Skill, SkillLoadout};

    fn wild_loadout() -> SkillLoadout {
        [
            Skill::new("strong", "Strong", SkillKind::StrongAttack)
                .with_damage(35)
                .with_cooldown(3),
            Skill::new("heal", "Heal", SkillKind::Heal)
                .with_heal_amount(40)
                .with_cooldown(4),
            Skill::new("wide", "Wide", SkillKind::WideAttack)
                .with_damage(30)
                .with_cooldown(3),
            Skill::new("block", "Block", SkillKind::Block).with_cooldown(3),
        ]
    }

    fn enemy(hp: u32) -> Combatant {
        Combatant::new("enemy_1", "Wild", 100, 20, wild_loadout()).with_hp(hp)
    }

    #[test]
    fn low_hp_always_heals_without_rolling() {
        let script = ScriptedRolls::new(vec![]);
        let dice = Dice::new(&script, 0, 0, 1);
        let actor = enemy(29);
        let action = WildMonsterPolicy.choose_action(&actor, &actor, &dice, &BattleConfig::default());
        assert_eq!(action, Action::skill("enemy_1", 1));
        assert_eq!(script.draws_taken(), 0);
    }

    #[test]
    fn exactly_thirty_percent_is_not_low_hp() {
        let oracle = FixedRoll(0.99);
        let dice = Dice::new(&oracle, 0, 0, 1);
        let actor = enemy(30);
        let action = WildMonsterPolicy.choose_action(&actor, &actor, &dice, &BattleConfig::default());
        assert_eq!(action, Action::attack("enemy_1"));
    }

    #[test]
    fn low_hp_with_heal_cooling_falls_through() {
        let oracle = FixedRoll(0.99);
        let dice = Dice::new(&oracle, 0, 0, 1);
        let actor = enemy(10).with_cooldowns([0, 2, 0, 0]);
        let action = WildMonsterPolicy.choose_action(&actor, &actor, &dice, &BattleConfig::default());
        assert_eq!(action, Action::attack("enemy_1"));
    }

    #[test]
    fn skill_roll_picks_among_ready_skills() {
        // skill-use draw 0.1 < 0.7, pick draw 0.6 over two ready skills -> index 1
        let script = ScriptedRolls::new(vec![0.1, 0.6]);
        let dice = Dice::new(&script, 0, 0, 1);
        let actor = enemy(100).with_cooldowns([1, 0, 2, 0]);
        let action = WildMonsterPolicy.choose_action(&actor, &actor, &dice, &BattleConfig::default());
        assert_eq!(action, Action::skill("enemy_1", 3));
    }

    #[test]
    fn nothing_ready_means_attack_without_rolling() {
        let script = ScriptedRolls::new(vec![]);
        let dice = Dice::new(&script, 0, 0, 1);
        let actor = enemy(100).with_cooldowns([1, 1, 1, 1]);
        let action = WildMonsterPolicy.choose_action(&actor, &actor, &dice, &BattleConfig::default());
        assert_eq!(action, Action::attack("enemy_1"));
        assert_eq!(script.draws_taken(), 0);
    }

    #[test]
    fn scripted_policy_replays_then_attacks() {
        let policy = ScriptedPolicy::new([ActionKind::Block, ActionKind::Skill { slot: 2 }]);
        let oracle = FixedRoll(0.5);
        let dice = Dice::new(&oracle, 0, 0, 1);
        let actor = enemy(100);
        let config = BattleConfig::default();
        assert_eq!(
            policy.choose_action(&actor, &actor, &dice, &config),
            Action::block("enemy_1")
        );
        assert_eq!(
            policy.choose_action(&actor, &actor, &dice, &config),
            Action::skill("enemy_1", 2)
        );
        assert_eq!(policy.remaining(), 0);
        assert_eq!(
            policy.choose_action(&actor, &actor, &dice, &config),
            Action::attack("enemy_1")
        );
    }
}
