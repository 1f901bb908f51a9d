//! Enemy supply for the continuous-run model.

use crate::config::BattleConfig;
use crate::env::{Dice, RollContext};
use crate::state::{Combatant, CombatantId, Rarity, Skill, SkillKind, SkillLoadout, SkillRange};

/// Produces a fresh enemy balanced against the player's current combatant.
pub trait EnemyGenerator: Send + Sync {
    fn generate(
        &self,
        opponent: &Combatant,
        id: CombatantId,
        dice: &Dice<'_>,
        config: &BattleConfig,
    ) -> Combatant;
}

/// Generator for wild monsters.
///
/// Max HP and attack are each scaled by an independent factor drawn from
/// `[stat_scale_min, stat_scale_min + stat_scale_span)`. The loadout is fixed
/// and its attack skills scale with the rolled attack.
#[derive(Clone, Copy, Debug, Default)]
pub struct WildEnemyGenerator;

impl WildEnemyGenerator {
    pub const STRONG_ATTACK_BONUS: u32 = 15;
    pub const WIDE_ATTACK_BONUS: u32 = 10;
    pub const HEAL_AMOUNT: u32 = 40;

    pub fn loadout(attack: u32) -> SkillLoadout {
        [
            Skill::new("enemy_skill_1", "Wild Strike", SkillKind::StrongAttack)
                .with_description("Lands a heavy wild blow.")
                .with_damage(attack + Self::STRONG_ATTACK_BONUS)
                .with_cooldown(3),
            Skill::new("enemy_skill_2", "Wild Mend", SkillKind::Heal)
                .with_description("Restores its own health.")
                .with_heal_amount(Self::HEAL_AMOUNT)
                .with_cooldown(4),
            Skill::new("enemy_skill_3", "Wild Rush", SkillKind::WideAttack)
                .with_description("Charges across a wide area.")
                .with_damage(attack + Self::WIDE_ATTACK_BONUS)
                .with_range(SkillRange::Line)
                .with_cooldown(3),
            Skill::new("enemy_skill_4", "Wild Guard", SkillKind::Block)
                .with_description("Braces against the next attack.")
                .with_cooldown(3),
        ]
    }

    fn scale(stat: u32, draw: f64, config: &BattleConfig) -> u32 {
        let factor = config.enemy.stat_scale_min + draw * config.enemy.stat_scale_span;
        (f64::from(stat) * factor).floor() as u32
    }
}

impl EnemyGenerator for WildEnemyGenerator {
    fn generate(
        &self,
        opponent: &Combatant,
        id: CombatantId,
        dice: &Dice<'_>,
        config: &BattleConfig,
    ) -> Combatant {
        let max_hp = Self::scale(
            opponent.max_hp(),
            dice.roll(RollContext::EnemyHpScale),
            config,
        )
        .max(1);
        let attack = Self::scale(
            opponent.attack,
            dice.roll(RollContext::EnemyAttackScale),
            config,
        );

        Combatant::new(id, "Wild Monster", max_hp, attack, Self::loadout(attack))
            .with_rarity(Rarity::Common)
            .with_kind("enemy")
    }
}
