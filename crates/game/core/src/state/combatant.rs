//! Monster instances taking part in a battle.

use std::fmt;

use crate::config::BattleConfig;
use crate::state::Skill;

/// Fixed-size skill loadout carried by every combatant.
pub type SkillLoadout = [Skill; BattleConfig::LOADOUT_SIZE];

/// Per-slot cooldown counters, aligned with [`SkillLoadout`].
pub type CooldownSlots = [u32; BattleConfig::LOADOUT_SIZE];

/// Stable identity of a combatant instance.
///
/// Distinct from the template id: two instances of the same monster template
/// carry different ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub String);

impl CombatantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CombatantId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CombatantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Collection tier of a monster.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Unique,
}

/// One-shot defensive state queued against the next incoming attack.
///
/// `dodge = Some(p)` means the next attack rolls against `p`; `block = Some(r)`
/// means the next attack's damage is scaled by `1 - r`. Both are consumed by
/// the first attack resolved against the holder, whatever the roll. When both
/// are somehow set, dodge is checked first.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guard {
    pub dodge: Option<f64>,
    pub block: Option<f64>,
}

impl Guard {
    pub const NONE: Self = Self {
        dodge: None,
        block: None,
    };

    pub const fn dodging(chance: f64) -> Self {
        Self {
            dodge: Some(chance),
            block: None,
        }
    }

    pub const fn blocking(reduction: f64) -> Self {
        Self {
            dodge: None,
            block: Some(reduction),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.dodge.is_none() && self.block.is_none()
    }

    pub const fn dodge_next_attack(&self) -> bool {
        self.dodge.is_some()
    }

    pub const fn block_next_attack(&self) -> bool {
        self.block.is_some()
    }
}

/// A monster instance with mutable battle state.
///
/// `hp` never exceeds `max_hp`; every mutator clamps, and so does
/// deserialization. Cooldowns are aligned slot-for-slot with `skills`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "CombatantRecord"))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Monster type label (fire, water, ...). Flavor only.
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: String,
    hp: u32,
    max_hp: u32,
    pub attack: u32,
    pub skills: SkillLoadout,
    skill_cooldowns: CooldownSlots,
    #[cfg_attr(feature = "serde", serde(default))]
    pub guard: Guard,
}

impl Combatant {
    /// Creates a battle-ready combatant: full HP, zero cooldowns, no guard.
    pub fn new(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        max_hp: u32,
        attack: u32,
        skills: SkillLoadout,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity: Rarity::Common,
            kind: String::new(),
            hp: max_hp,
            max_hp,
            attack,
            skills,
            skill_cooldowns: [0; BattleConfig::LOADOUT_SIZE],
            guard: Guard::NONE,
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.set_hp(hp);
        self
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    #[must_use]
    pub fn with_cooldowns(mut self, cooldowns: CooldownSlots) -> Self {
        self.skill_cooldowns = cooldowns;
        self
    }

    pub const fn hp(&self) -> u32 {
        self.hp
    }

    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Sets HP, clamped to `max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    pub const fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// HP still missing from the maximum.
    pub const fn missing_hp(&self) -> u32 {
        self.max_hp.saturating_sub(self.hp)
    }

    pub fn skill(&self, slot: usize) -> Option<&Skill> {
        self.skills.get(slot)
    }

    pub fn cooldown(&self, slot: usize) -> Option<u32> {
        self.skill_cooldowns.get(slot).copied()
    }

    pub const fn cooldowns(&self) -> &CooldownSlots {
        &self.skill_cooldowns
    }

    /// Overwrites a cooldown slot. Out-of-range slots are ignored.
    pub fn set_cooldown(&mut self, slot: usize, turns: u32) {
        if let Some(entry) = self.skill_cooldowns.get_mut(slot) {
            *entry = turns;
        }
    }

    pub fn is_skill_ready(&self, slot: usize) -> bool {
        self.cooldown(slot) == Some(0)
    }

    /// Skills whose cooldown is zero, with their slot index.
    pub fn ready_skills(&self) -> impl Iterator<Item = (usize, &Skill)> {
        self.skills
            .iter()
            .enumerate()
            .filter(|(slot, _)| self.skill_cooldowns[*slot] == 0)
    }

    /// Decrements every non-zero cooldown by one.
    pub fn decay_cooldowns(&mut self) {
        for turns in &mut self.skill_cooldowns {
            *turns = turns.saturating_sub(1);
        }
    }

    pub fn clear_guard(&mut self) {
        self.guard = Guard::NONE;
    }

    /// Returns a copy restored to battle-start condition.
    #[must_use]
    pub fn refreshed(&self) -> Self {
        let mut fresh = self.clone();
        fresh.hp = fresh.max_hp;
        fresh.skill_cooldowns = [0; BattleConfig::LOADOUT_SIZE];
        fresh.guard = Guard::NONE;
        fresh
    }
}

/// Wire shape of a [`Combatant`]; converted through the clamping builders.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CombatantRecord {
    id: CombatantId,
    name: String,
    #[serde(default)]
    rarity: Rarity,
    #[serde(rename = "type", default)]
    kind: String,
    hp: u32,
    max_hp: u32,
    attack: u32,
    skills: SkillLoadout,
    skill_cooldowns: CooldownSlots,
    #[serde(default)]
    guard: Guard,
}

#[cfg(feature = "serde")]
impl From<CombatantRecord> for Combatant {
    fn from(record: CombatantRecord) -> Self {
        Combatant::new(
            record.id,
            record.name,
            record.max_hp,
            record.attack,
            record.skills,
        )
        .with_rarity(record.rarity)
        .with_kind(record.kind)
        .with_hp(record.hp)
        .with_cooldowns(record.skill_cooldowns)
        .with_guard(record.guard)
    }
}
