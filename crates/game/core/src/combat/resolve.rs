//! Action resolver.
//!
//! [`resolve`] is a pure function of its inputs plus the dice: it reads the
//! attacker and target, never writes them, and returns every effect as a
//! delta inside [`ActionOutcome`].

use crate::action::{Action, ActionKind, ResolveError};
use crate::config::BattleConfig;
use crate::env::Dice;
use crate::state::{Combatant, Guard, Skill, SkillKind};

use super::defense::defense_check;
use super::result::{ActionOutcome, BattleResult, CooldownUpdate, GuardChange, HpChange, Role};

/// Resolves `action` performed by `attacker` against `target`.
///
/// Fails without producing any delta when the attacker is defeated, when an
/// attack-shaped action aims at a defeated target, or when a skill slot is out
/// of range or still cooling down.
pub fn resolve(
    action: &Action,
    attacker: &Combatant,
    target: &Combatant,
    dice: &Dice<'_>,
    config: &BattleConfig,
) -> Result<ActionOutcome, ResolveError> {
    check_action(action, attacker)?;

    match action.kind {
        ActionKind::Attack => {
            ensure_target_standing(target)?;
            Ok(resolve_attack(
                attacker,
                target,
                attacker.attack,
                false,
                dice,
                config,
            ))
        }
        ActionKind::Dodge => Ok(queue_guard(
            attacker,
            Guard {
                dodge: Some(config.default_dodge_chance),
                ..attacker.guard
            },
        )),
        ActionKind::Block => Ok(queue_guard(
            attacker,
            Guard {
                block: Some(config.default_block_reduction),
                ..attacker.guard
            },
        )),
        ActionKind::Skill { slot } => {
            let skill = attacker
                .skill(slot)
                .ok_or(ResolveError::SkillSlotOutOfRange { slot })?;
            let mut outcome = resolve_skill(skill, attacker, target, dice, config)?;
            outcome.cooldown_updates.push(CooldownUpdate {
                combatant: attacker.id.clone(),
                slot,
                new_cooldown: skill.cooldown,
            });
            Ok(outcome)
        }
    }
}

/// Checks that `attacker` may perform `action` at all: it is standing and
/// any referenced skill exists and is ready.
pub fn check_action(action: &Action, attacker: &Combatant) -> Result<(), ResolveError> {
    if attacker.is_defeated() {
        return Err(ResolveError::AttackerDefeated);
    }
    if let ActionKind::Skill { slot } = action.kind {
        let remaining = attacker
            .cooldown(slot)
            .ok_or(ResolveError::SkillSlotOutOfRange { slot })?;
        if remaining > 0 {
            return Err(ResolveError::SkillOnCooldown { slot, remaining });
        }
    }
    Ok(())
}

fn ensure_target_standing(target: &Combatant) -> Result<(), ResolveError> {
    if target.is_defeated() {
        Err(ResolveError::TargetDefeated)
    } else {
        Ok(())
    }
}

fn resolve_skill(
    skill: &Skill,
    attacker: &Combatant,
    target: &Combatant,
    dice: &Dice<'_>,
    config: &BattleConfig,
) -> Result<ActionOutcome, ResolveError> {
    let outcome = match skill.kind {
        SkillKind::Heal => {
            let amount = skill.heal_amount.unwrap_or(config.default_heal_amount);
            resolve_heal(attacker, amount)
        }
        SkillKind::Dodge => queue_guard(
            attacker,
            Guard {
                dodge: Some(skill.dodge_chance.unwrap_or(config.default_dodge_chance)),
                ..attacker.guard
            },
        ),
        SkillKind::Block => queue_guard(
            attacker,
            Guard {
                block: Some(
                    skill
                        .block_reduction
                        .unwrap_or(config.default_block_reduction),
                ),
                ..attacker.guard
            },
        ),
        SkillKind::WideAttack | SkillKind::StrongAttack => {
            ensure_target_standing(target)?;
            let base = skill.damage.unwrap_or(attacker.attack);
            resolve_attack(attacker, target, base, true, dice, config)
        }
    };
    Ok(outcome)
}

fn self_result(attacker: &Combatant) -> BattleResult {
    BattleResult {
        attacker: attacker.id.clone(),
        target: attacker.id.clone(),
        damage: 0,
        healed: 0,
        dodged: false,
        blocked: false,
        dodge_attempted: false,
        block_attempted: false,
    }
}

fn resolve_attack(
    attacker: &Combatant,
    target: &Combatant,
    base_damage: u32,
    from_skill: bool,
    dice: &Dice<'_>,
    config: &BattleConfig,
) -> ActionOutcome {
    let defense = defense_check(base_damage, target.guard, from_skill, dice, config);
    let new_hp = target.hp().saturating_sub(defense.damage);

    let mut outcome = ActionOutcome::new(BattleResult {
        attacker: attacker.id.clone(),
        target: target.id.clone(),
        damage: target.hp() - new_hp,
        healed: 0,
        dodged: defense.dodged,
        blocked: defense.blocked,
        dodge_attempted: defense.dodge_attempted,
        block_attempted: defense.block_attempted,
    });
    outcome.hp_change = Some(HpChange {
        role: Role::Target,
        combatant: target.id.clone(),
        original_hp: target.hp(),
        new_hp,
    });
    if defense.guard_after != target.guard {
        outcome.guard_changes.push(GuardChange {
            role: Role::Target,
            combatant: target.id.clone(),
            guard: defense.guard_after,
        });
    }
    outcome
}

fn resolve_heal(attacker: &Combatant, amount: u32) -> ActionOutcome {
    let healed = amount.min(attacker.missing_hp());
    let mut outcome = ActionOutcome::new(BattleResult {
        healed,
        ..self_result(attacker)
    });
    outcome.hp_change = Some(HpChange {
        role: Role::Attacker,
        combatant: attacker.id.clone(),
        original_hp: attacker.hp(),
        new_hp: attacker.hp() + healed,
    });
    outcome
}

fn queue_guard(attacker: &Combatant, guard: Guard) -> ActionOutcome {
    let mut outcome = ActionOutcome::new(self_result(attacker));
    outcome.guard_changes.push(GuardChange {
        role: Role::Attacker,
        combatant: attacker.id.clone(),
        guard,
    });
    outcome
}
