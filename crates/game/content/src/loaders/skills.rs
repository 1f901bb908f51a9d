//! Skill catalog loader.

use std::path::Path;

use battle_core::Skill;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<Skill>,
}

/// Loader for the skill catalog from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a [`SkillCatalog`]
    pub fn load(path: &Path) -> LoadResult<Vec<Skill>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Skill>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog.skills)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{ElementType, SkillKind, SkillRange};

    use super::*;

    #[test]
    fn parses_optional_fields_and_range() {
        let skills = SkillLoader::parse(
            r#"#![enable(implicit_some)]
            (
                skills: [
                    (
                        id: "flame_burst",
                        name: "Flame Burst",
                        type: wide_attack,
                        damage: 25,
                        cooldown: 3,
                        range: 3,
                        element: fire,
                    ),
                    (id: "guard", name: "Guard", type: block, cooldown: 2),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].kind, SkillKind::WideAttack);
        assert_eq!(skills[0].damage, Some(25));
        assert_eq!(skills[0].range, SkillRange::Line);
        assert_eq!(skills[0].element, Some(ElementType::Fire));
        assert_eq!(skills[1].block_reduction, None);
        assert_eq!(skills[1].range, SkillRange::Single);
        assert!(skills[1].description.is_empty());
    }

    #[test]
    fn rejects_unknown_range_width() {
        let err = SkillLoader::parse(
            r#"(skills: [(id: "x", name: "X", type: heal, cooldown: 1, range: 4)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("skill catalog"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SkillLoader::load(&dir.path().join("skills.ron")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
