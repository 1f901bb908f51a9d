//! Defense check applied to every incoming attack.
//!
//! The ladder is: queued dodge, else queued block, else the ambient layer.
//! Only the first rung that applies is used.

use crate::config::BattleConfig;
use crate::env::{Dice, RollContext};
use crate::state::Guard;

/// What the defender's guard did to an incoming attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenseOutcome {
    /// Damage that lands after the check.
    pub damage: u32,
    pub dodged: bool,
    pub blocked: bool,
    /// A dodge was queued and rolled, whatever the roll.
    pub dodge_attempted: bool,
    /// A block was queued and applied.
    pub block_attempted: bool,
    /// Defender's guard once the consumed flag is cleared.
    pub guard_after: Guard,
}

/// Scales damage by `factor` and floors the result.
///
/// A small tolerance absorbs binary rounding of factors such as `1 - 0.9`,
/// so `scale_damage(30, 1.0 - 0.9)` is 3 rather than 2.
pub fn scale_damage(damage: u32, factor: f64) -> u32 {
    let scaled = (f64::from(damage) * factor.clamp(0.0, 1.0) + 1e-9).floor();
    (scaled as u32).min(damage)
}

/// Runs the defense ladder for `incoming` damage against `guard`.
///
/// Draw order: a queued dodge draws once, a queued block draws nothing, the
/// ambient layer draws for dodge and then for block only if not dodged.
pub fn defense_check(
    incoming: u32,
    guard: Guard,
    from_skill: bool,
    dice: &Dice<'_>,
    config: &BattleConfig,
) -> DefenseOutcome {
    let mut outcome = DefenseOutcome {
        damage: incoming,
        dodged: false,
        blocked: false,
        dodge_attempted: false,
        block_attempted: false,
        guard_after: guard,
    };

    if let Some(chance) = guard.dodge {
        outcome.dodge_attempted = true;
        outcome.guard_after.dodge = None;
        if dice.chance(RollContext::QueuedDodge, chance) {
            outcome.dodged = true;
            outcome.damage = 0;
        }
        return outcome;
    }

    if let Some(reduction) = guard.block {
        outcome.block_attempted = true;
        outcome.blocked = true;
        outcome.guard_after.block = None;
        outcome.damage = scale_damage(incoming, 1.0 - reduction);
        return outcome;
    }

    let ambient = config.ambient(from_skill);
    if dice.chance(RollContext::AmbientDodge, ambient.dodge_chance) {
        outcome.dodged = true;
        outcome.damage = 0;
    } else if dice.chance(RollContext::AmbientBlock, ambient.block_chance) {
        outcome.blocked = true;
        outcome.damage = scale_damage(incoming, ambient.block_damage_ratio);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRoll, ScriptedRolls};

    #[test]
    fn queued_dodge_with_certain_chance_always_dodges() {
        let oracle = FixedRoll(0.999_999);
        let dice = Dice::new(&oracle, 1, 1, 0);
        let outcome = defense_check(40, Guard::dodging(1.0), false, &dice, &BattleConfig::default());
        assert!(outcome.dodged && outcome.dodge_attempted);
        assert_eq!(outcome.damage, 0);
        assert!(outcome.guard_after.is_empty());
    }

    #[test]
    fn failed_dodge_still_consumes_the_flag() {
        let oracle = FixedRoll(0.9);
        let dice = Dice::new(&oracle, 1, 1, 0);
        let outcome = defense_check(40, Guard::dodging(0.5), false, &dice, &BattleConfig::default());
        assert!(outcome.dodge_attempted);
        assert!(!outcome.dodged);
        assert_eq!(outcome.damage, 40);
        assert!(!outcome.guard_after.dodge_next_attack());
    }

    #[test]
    fn queued_block_never_fails_and_draws_nothing() {
        let script = ScriptedRolls::new(vec![]);
        let dice = Dice::new(&script, 1, 1, 0);
        let outcome = defense_check(30, Guard::blocking(0.9), true, &dice, &BattleConfig::default());
        assert!(outcome.blocked && outcome.block_attempted);
        assert_eq!(outcome.damage, 3);
        assert_eq!(script.draws_taken(), 0);
    }

    #[test]
    fn dodge_wins_when_both_flags_are_set() {
        let oracle = FixedRoll(0.0);
        let dice = Dice::new(&oracle, 1, 1, 0);
        let guard = Guard {
            dodge: Some(0.5),
            block: Some(0.5),
        };
        let outcome = defense_check(20, guard, false, &dice, &BattleConfig::default());
        assert!(outcome.dodged);
        assert!(!outcome.block_attempted);
        assert_eq!(outcome.guard_after.block, Some(0.5));
    }

    #[test]
    fn ambient_block_only_rolls_after_failed_ambient_dodge() {
        // dodge draw 0.5 fails (basic 0.15), block draw 0.05 succeeds (basic 0.10)
        let script = ScriptedRolls::new(vec![0.5, 0.05]);
        let dice = Dice::new(&script, 1, 1, 0);
        let outcome = defense_check(50, Guard::NONE, false, &dice, &BattleConfig::default());
        assert!(outcome.blocked && !outcome.block_attempted);
        assert_eq!(outcome.damage, 30);
        assert_eq!(script.draws_taken(), 2);

        let script = ScriptedRolls::new(vec![0.1]);
        let dice = Dice::new(&script, 1, 1, 0);
        let outcome = defense_check(50, Guard::NONE, false, &dice, &BattleConfig::default());
        assert!(outcome.dodged && !outcome.dodge_attempted);
        assert_eq!(outcome.damage, 0);
        assert_eq!(script.draws_taken(), 1);
    }

    #[test]
    fn skill_attacks_use_the_skill_ambient_rates() {
        // 0.17 misses the basic dodge rate (0.15) but hits the skill rate (0.20)
        let oracle = FixedRoll(0.17);
        let dice = Dice::new(&oracle, 1, 1, 0);
        let config = BattleConfig::default();
        assert!(!defense_check(40, Guard::NONE, false, &dice, &config).dodged);
        assert!(defense_check(40, Guard::NONE, true, &dice, &config).dodged);
    }

    #[test]
    fn scale_damage_floors() {
        assert_eq!(scale_damage(40, 0.5), 20);
        assert_eq!(scale_damage(45, 0.5), 22);
        assert_eq!(scale_damage(25, 0.6), 15);
        assert_eq!(scale_damage(7, 0.0), 0);
    }
}
