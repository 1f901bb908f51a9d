//! Static skill templates.
//!
//! Skills are immutable value objects shared by every combatant that carries
//! them. The resolver branches on [`SkillKind`]; the remaining fields are
//! either numeric parameters for that branch or presentation metadata.

/// Resolution branch of a skill.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum SkillKind {
    /// Restores the caster's HP.
    Heal,
    /// Area attack. Resolved single-target; see [`SkillRange`].
    WideAttack,
    /// Single-target heavy attack.
    StrongAttack,
    /// Queues a dodge roll against the next incoming attack.
    Dodge,
    /// Queues a damage reduction against the next incoming attack.
    Block,
}

impl SkillKind {
    /// Returns true for skills that deal damage to the target.
    pub const fn is_attack(self) -> bool {
        matches!(self, Self::WideAttack | Self::StrongAttack)
    }

    /// Returns true for skills whose effect lands on the caster.
    pub const fn targets_self(self) -> bool {
        !self.is_attack()
    }
}

/// Declared target footprint of a skill.
///
/// Carried as metadata only: every skill resolves against a single target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum SkillRange {
    #[default]
    Single,
    Line,
    All,
}

impl SkillRange {
    /// Number of grid cells the range covers (1, 3 or 9).
    pub const fn width(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Line => 3,
            Self::All => 9,
        }
    }
}

impl TryFrom<u8> for SkillRange {
    type Error = InvalidRange;

    fn try_from(width: u8) -> Result<Self, Self::Error> {
        match width {
            1 => Ok(Self::Single),
            3 => Ok(Self::Line),
            9 => Ok(Self::All),
            other => Err(InvalidRange(other)),
        }
    }
}

impl From<SkillRange> for u8 {
    fn from(range: SkillRange) -> Self {
        range.width()
    }
}

/// Range width that is not one of 1, 3 or 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("skill range must be 1, 3 or 9 (got {0})")]
pub struct InvalidRange(pub u8);

/// Elemental flavor of a skill.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum ElementType {
    Physical,
    Fire,
    Water,
    Grass,
    Ice,
    Light,
    Electric,
    Shadow,
    Wind,
    Earth,
}

/// Immutable skill template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: SkillKind,
    /// Base damage for attack skills. `None` falls back to the caster's attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_amount: Option<u32>,
    /// Overrides the default dodge chance queued by a dodge skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dodge_chance: Option<f64>,
    /// Overrides the default damage reduction queued by a block skill.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_reduction: Option<f64>,
    /// Turns before the skill can be used again after activation.
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: SkillRange,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<ElementType>,
}

impl Skill {
    /// Creates a single-target skill with no cooldown and no numeric parameters.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            damage: None,
            heal_amount: None,
            dodge_chance: None,
            block_reduction: None,
            cooldown: 0,
            range: SkillRange::Single,
            element: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_heal_amount(mut self, amount: u32) -> Self {
        self.heal_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_dodge_chance(mut self, chance: f64) -> Self {
        self.dodge_chance = Some(chance);
        self
    }

    #[must_use]
    pub fn with_block_reduction(mut self, reduction: f64) -> Self {
        self.block_reduction = Some(reduction);
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: SkillRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = Some(element);
        self
    }
}
