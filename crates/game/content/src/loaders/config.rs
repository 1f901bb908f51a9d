//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. The result is validated before it
    /// is returned.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid battle config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::AmbientDefense;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BattleConfig::default());
    }

    #[test]
    fn partial_tables_override_only_given_keys() {
        let config = ConfigLoader::parse(
            r#"
            encounter_limit = 5

            [basic_ambient]
            dodge_chance = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.encounter_limit, Some(5));
        assert_eq!(config.basic_ambient.dodge_chance, 0.0);
        assert_eq!(
            config.basic_ambient.block_chance,
            AmbientDefense::BASIC.block_chance
        );
        assert_eq!(config.skill_ambient, AmbientDefense::SKILL);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let err = ConfigLoader::parse("default_dodge_chance = 1.5").unwrap_err();
        assert!(err.to_string().starts_with("Invalid battle config"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battle.toml");
        std::fs::write(&path, "default_heal_amount = 70\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.default_heal_amount, 70);
    }
}
