//! Monster catalog: templates cross-checked against the skill list.

use std::collections::{HashMap, HashSet};

use battle_core::{BattleConfig, Combatant, CombatantId, Rarity, Skill, SkillLoadout};

/// Static description of a monster species.
///
/// `skills` names four skill ids from the catalog, in slot order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    pub rarity: Rarity,
    pub max_hp: u32,
    pub attack: u32,
    pub skills: [String; BattleConfig::LOADOUT_SIZE],
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate skill id `{0}`")]
    DuplicateSkill(String),

    #[error("duplicate monster id `{0}`")]
    DuplicateMonster(String),

    #[error("skill `{skill}`: {field} must lie in [0, 1] (got {value})")]
    ProbabilityOutOfRange {
        skill: String,
        field: &'static str,
        value: f64,
    },

    #[error("monster `{0}` has zero max hp")]
    ZeroMaxHp(String),

    #[error("monster `{monster}` references unknown skill `{skill}`")]
    UnknownSkill { monster: String, skill: String },

    #[error("unknown monster template `{0}`")]
    UnknownTemplate(String),
}

/// Validated skills and monster templates.
#[derive(Clone, Debug)]
pub struct MonsterCatalog {
    skills: Vec<Skill>,
    skill_index: HashMap<String, usize>,
    templates: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    /// Builds a catalog, rejecting duplicate ids, out-of-range probabilities,
    /// zero-HP templates and dangling skill references.
    pub fn new(skills: Vec<Skill>, templates: Vec<MonsterTemplate>) -> Result<Self, CatalogError> {
        let mut skill_index = HashMap::with_capacity(skills.len());
        for (index, skill) in skills.iter().enumerate() {
            if skill_index.insert(skill.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSkill(skill.id.clone()));
            }
            let probabilities = [
                ("dodge_chance", skill.dodge_chance),
                ("block_reduction", skill.block_reduction),
            ];
            for (field, value) in probabilities {
                if let Some(value) = value.filter(|v| !(0.0..=1.0).contains(v)) {
                    return Err(CatalogError::ProbabilityOutOfRange {
                        skill: skill.id.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateMonster(template.id.clone()));
            }
            if template.max_hp == 0 {
                return Err(CatalogError::ZeroMaxHp(template.id.clone()));
            }
            if let Some(missing) = template
                .skills
                .iter()
                .find(|id| !skill_index.contains_key(id.as_str()))
            {
                return Err(CatalogError::UnknownSkill {
                    monster: template.id.clone(),
                    skill: missing.clone(),
                });
            }
        }

        Ok(Self {
            skills,
            skill_index,
            templates,
        })
    }

    /// The catalog shipped with the crate.
    #[cfg(feature = "loaders")]
    pub fn builtin() -> crate::LoadResult<Self> {
        let skills = crate::SkillLoader::parse(include_str!("../data/skills.ron"))?;
        let templates = crate::MonsterLoader::parse(include_str!("../data/monsters.ron"))?;
        Ok(Self::new(skills, templates)?)
    }

    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skill_index.get(id).map(|&index| &self.skills[index])
    }

    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn template(&self, id: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }

    pub fn by_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &MonsterTemplate> {
        self.templates
            .iter()
            .filter(move |template| template.rarity == rarity)
    }

    /// Creates a full-HP combatant from a template.
    pub fn instantiate(
        &self,
        template_id: &str,
        instance_id: impl Into<CombatantId>,
    ) -> Result<Combatant, CatalogError> {
        let template = self
            .template(template_id)
            .ok_or_else(|| CatalogError::UnknownTemplate(template_id.to_owned()))?;
        let loadout = self.loadout(template)?;

        Ok(Combatant::new(
            instance_id,
            template.name.clone(),
            template.max_hp,
            template.attack,
            loadout,
        )
        .with_rarity(template.rarity)
        .with_kind(template.kind.clone()))
    }

    /// Instantiates a team. Members get ids `<template>_<n>`, `n` counting
    /// from 1 in team order.
    pub fn team<S: AsRef<str>>(&self, template_ids: &[S]) -> Result<Vec<Combatant>, CatalogError> {
        template_ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let id = id.as_ref();
                self.instantiate(id, format!("{}_{}", id, index + 1))
            })
            .collect()
    }

    fn loadout(&self, template: &MonsterTemplate) -> Result<SkillLoadout, CatalogError> {
        let skill = |id: &String| {
            self.skill(id)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownSkill {
                    monster: template.id.clone(),
                    skill: id.clone(),
                })
        };
        let [a, b, c, d] = &template.skills;
        Ok([skill(a)?, skill(b)?, skill(c)?, skill(d)?])
    }
}

#[cfg(test)]
mod tests {
    use battle_core::SkillKind;

    use super::*;

    fn skill(id: &str, kind: SkillKind) -> Skill {
        Skill::new(id, id, kind).with_cooldown(1)
    }

    fn template(id: &str, skills: [&str; 4]) -> MonsterTemplate {
        MonsterTemplate {
            id: id.into(),
            name: id.into(),
            kind: "fire".into(),
            rarity: Rarity::Common,
            max_hp: 40,
            attack: 7,
            skills: skills.map(String::from),
        }
    }

    fn basic_skills() -> Vec<Skill> {
        vec![
            skill("a", SkillKind::StrongAttack),
            skill("b", SkillKind::Heal),
            skill("c", SkillKind::Dodge),
            skill("d", SkillKind::Block),
        ]
    }

    #[test]
    fn instantiate_resolves_loadout_in_slot_order() {
        let catalog =
            MonsterCatalog::new(basic_skills(), vec![template("pup", ["d", "c", "b", "a"])])
                .unwrap();
        let pup = catalog.instantiate("pup", "pup_1").unwrap();

        assert_eq!(pup.id.as_str(), "pup_1");
        assert_eq!(pup.hp(), 40);
        assert_eq!(pup.attack, 7);
        assert_eq!(pup.kind, "fire");
        assert_eq!(pup.skills[0].id, "d");
        assert_eq!(pup.skills[3].id, "a");
        assert_eq!(pup.cooldowns(), &[0; 4]);
    }

    #[test]
    fn team_numbers_members_in_order() {
        let catalog = MonsterCatalog::new(
            basic_skills(),
            vec![
                template("pup", ["a", "b", "c", "d"]),
                template("cat", ["a", "b", "c", "d"]),
            ],
        )
        .unwrap();
        let team = catalog.team(&["cat", "pup", "cat"]).unwrap();
        let ids: Vec<_> = team.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["cat_1", "pup_2", "cat_3"]);
    }

    #[test]
    fn rejects_dangling_skill_reference() {
        let err = MonsterCatalog::new(basic_skills(), vec![template("pup", ["a", "b", "c", "x"])])
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownSkill {
                monster: "pup".into(),
                skill: "x".into(),
            }
        );
    }

    #[test]
    fn rejects_duplicates_and_bad_probabilities() {
        let mut skills = basic_skills();
        skills.push(skill("a", SkillKind::Heal));
        assert_eq!(
            MonsterCatalog::new(skills, vec![]).unwrap_err(),
            CatalogError::DuplicateSkill("a".into())
        );

        let mut skills = basic_skills();
        skills[2] = skill("c", SkillKind::Dodge).with_dodge_chance(1.2);
        assert!(matches!(
            MonsterCatalog::new(skills, vec![]),
            Err(CatalogError::ProbabilityOutOfRange { field: "dodge_chance", .. })
        ));

        let pup = template("pup", ["a", "b", "c", "d"]);
        assert_eq!(
            MonsterCatalog::new(basic_skills(), vec![pup.clone(), pup]).unwrap_err(),
            CatalogError::DuplicateMonster("pup".into())
        );
    }

    #[test]
    fn unknown_template_is_an_error() {
        let catalog = MonsterCatalog::new(basic_skills(), vec![]).unwrap();
        assert_eq!(
            catalog.instantiate("ghost", "ghost_1").unwrap_err(),
            CatalogError::UnknownTemplate("ghost".into())
        );
    }

    #[cfg(feature = "loaders")]
    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = MonsterCatalog::builtin().unwrap();
        assert_eq!(catalog.skills().count(), 12);
        assert_eq!(catalog.templates().len(), 14);
        assert_eq!(catalog.by_rarity(Rarity::Common).count(), 7);
        assert_eq!(catalog.by_rarity(Rarity::Rare).count(), 4);
        assert_eq!(catalog.by_rarity(Rarity::Unique).count(), 3);

        let claw = catalog.skill("dragon_claw").unwrap();
        assert_eq!(claw.kind, SkillKind::StrongAttack);
        assert_eq!(claw.damage, Some(85));
        assert!(catalog.skills().all(|skill| skill.cooldown == 3));

        let dragon = catalog.instantiate("shadow_dragon", "boss").unwrap();
        assert_eq!(dragon.max_hp(), 250);
        assert_eq!(dragon.rarity, Rarity::Unique);
    }
}
