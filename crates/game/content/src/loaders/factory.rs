//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Skill};

use crate::catalog::{MonsterCatalog, MonsterTemplate};
use crate::loaders::{ConfigLoader, LoadResult, MonsterLoader, SkillLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml
/// ├── skills.ron
/// └── monsters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        ConfigLoader::load(&path)
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<Skill>> {
        let path = self.data_dir.join("skills.ron");
        SkillLoader::load(&path)
    }

    /// Load monster templates from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        let path = self.data_dir.join("monsters.ron");
        MonsterLoader::load(&path)
    }

    /// Load skills and monsters and cross-check them into a catalog.
    pub fn load_catalog(&self) -> LoadResult<MonsterCatalog> {
        let catalog = MonsterCatalog::new(self.load_skills()?, self.load_monsters()?)?;
        tracing::info!(
            dir = %self.data_dir.display(),
            skills = catalog.skills().count(),
            monsters = catalog.templates().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILLS: &str = r#"(skills: [
        (id: "a", name: "A", type: strong_attack, damage: Some(10), cooldown: 1),
        (id: "b", name: "B", type: heal, heal_amount: Some(5), cooldown: 2),
        (id: "c", name: "C", type: dodge, cooldown: 1),
        (id: "d", name: "D", type: block, cooldown: 1),
    ])"#;

    const MONSTERS: &str = r#"(monsters: [
        (id: "pup", name: "Pup", type: "fire", rarity: common, max_hp: 50, attack: 5,
         skills: ["a", "b", "c", "d"]),
    ])"#;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_catalog_and_config_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skills.ron"), SKILLS).unwrap();
        std::fs::write(dir.path().join("monsters.ron"), MONSTERS).unwrap();
        std::fs::write(dir.path().join("battle.toml"), "encounter_limit = 3\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let catalog = factory.load_catalog().unwrap();
        assert_eq!(catalog.templates().len(), 1);
        assert_eq!(catalog.instantiate("pup", "pup_1").unwrap().max_hp(), 50);
        assert_eq!(factory.load_config().unwrap().encounter_limit, Some(3));
    }

    #[test]
    fn unknown_skill_reference_fails_catalog_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("skills.ron"), SKILLS).unwrap();
        std::fs::write(
            dir.path().join("monsters.ron"),
            MONSTERS.replace("\"d\"]", "\"zz\"]"),
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("zz"));
    }
}
