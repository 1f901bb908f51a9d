/// Ambient dodge/block layer applied to attacks against an unguarded target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmbientDefense {
    /// Chance the attack misses outright.
    pub dodge_chance: f64,
    /// Chance an attack that was not dodged is partially blocked.
    pub block_chance: f64,
    /// Fraction of damage kept after an ambient block.
    pub block_damage_ratio: f64,
}

impl AmbientDefense {
    pub const BASIC: Self = Self {
        dodge_chance: 0.15,
        block_chance: 0.10,
        block_damage_ratio: 0.6,
    };

    pub const SKILL: Self = Self {
        dodge_chance: 0.20,
        block_chance: 0.15,
        block_damage_ratio: 0.5,
    };

    /// Never dodges, never blocks.
    pub const DISABLED: Self = Self {
        dodge_chance: 0.0,
        block_chance: 0.0,
        block_damage_ratio: 1.0,
    };
}

impl Default for AmbientDefense {
    fn default() -> Self {
        Self::BASIC
    }
}

/// Tunables of the wild-monster policy and enemy generator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyTuning {
    /// Below `max_hp * low_hp_ratio` an available heal is always chosen.
    pub low_hp_ratio: f64,
    /// Chance of using a ready skill instead of a basic attack.
    pub skill_use_chance: f64,
    /// Lower bound of the stat multiplier for generated enemies.
    pub stat_scale_min: f64,
    /// Width of the stat multiplier window above `stat_scale_min`.
    pub stat_scale_span: f64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            low_hp_ratio: 0.3,
            skill_use_chance: 0.7,
            stat_scale_min: 0.9,
            stat_scale_span: 0.2,
        }
    }
}

/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Dodge chance queued by a plain dodge or a dodge skill without override.
    pub default_dodge_chance: f64,
    /// Damage reduction queued by a plain block or a block skill without override.
    pub default_block_reduction: f64,
    /// Heal applied by a heal skill that declares no amount.
    pub default_heal_amount: u32,
    pub basic_ambient: AmbientDefense,
    pub skill_ambient: AmbientDefense,
    pub enemy: EnemyTuning,
    /// Enemies to defeat before the run is won. `None` runs until the team wipes.
    pub encounter_limit: Option<u32>,
}

impl BattleConfig {
    // ===== compile-time constants =====
    /// Number of skill slots on every combatant.
    pub const LOADOUT_SIZE: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DODGE_CHANCE: f64 = 0.5;
    pub const DEFAULT_BLOCK_REDUCTION: f64 = 0.5;
    pub const DEFAULT_HEAL_AMOUNT: u32 = 50;

    pub fn new() -> Self {
        Self {
            default_dodge_chance: Self::DEFAULT_DODGE_CHANCE,
            default_block_reduction: Self::DEFAULT_BLOCK_REDUCTION,
            default_heal_amount: Self::DEFAULT_HEAL_AMOUNT,
            basic_ambient: AmbientDefense::BASIC,
            skill_ambient: AmbientDefense::SKILL,
            enemy: EnemyTuning::default(),
            encounter_limit: None,
        }
    }

    /// Turns the ambient dodge/block layer off for both attack sources.
    #[must_use]
    pub fn without_ambient(mut self) -> Self {
        self.basic_ambient = AmbientDefense::DISABLED;
        self.skill_ambient = AmbientDefense::DISABLED;
        self
    }

    #[must_use]
    pub fn with_encounter_limit(mut self, limit: u32) -> Self {
        self.encounter_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_enemy_tuning(mut self, enemy: EnemyTuning) -> Self {
        self.enemy = enemy;
        self
    }

    /// Ambient layer for a basic attack or a skill-sourced attack.
    pub const fn ambient(&self, from_skill: bool) -> &AmbientDefense {
        if from_skill {
            &self.skill_ambient
        } else {
            &self.basic_ambient
        }
    }

    /// Checks that every probability lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("default_dodge_chance", self.default_dodge_chance),
            ("default_block_reduction", self.default_block_reduction),
            ("basic_ambient.dodge_chance", self.basic_ambient.dodge_chance),
            ("basic_ambient.block_chance", self.basic_ambient.block_chance),
            (
                "basic_ambient.block_damage_ratio",
                self.basic_ambient.block_damage_ratio,
            ),
            ("skill_ambient.dodge_chance", self.skill_ambient.dodge_chance),
            ("skill_ambient.block_chance", self.skill_ambient.block_chance),
            (
                "skill_ambient.block_damage_ratio",
                self.skill_ambient.block_damage_ratio,
            ),
            ("enemy.low_hp_ratio", self.enemy.low_hp_ratio),
            ("enemy.skill_use_chance", self.enemy.skill_use_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }
        if self.enemy.stat_scale_min < 0.0 || self.enemy.stat_scale_span < 0.0 {
            return Err(ConfigError::NegativeScale);
        }
        if self.encounter_limit == Some(0) {
            return Err(ConfigError::ZeroEncounterLimit);
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must lie in [0, 1] (got {value})")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    #[error("enemy stat scale must not be negative")]
    NegativeScale,

    #[error("encounter limit must be at least 1")]
    ZeroEncounterLimit,
}
