//! Data-driven battle content and loaders.
//!
//! This crate houses the monster and skill catalogs and provides loaders for
//! RON/TOML data files:
//! - Skill catalog (data-driven via RON)
//! - Monster templates (data-driven via RON)
//! - Battle balance configuration (data-driven via TOML)
//!
//! [`MonsterCatalog`] turns templates into battle-ready
//! [`battle_core::Combatant`]s. The shipped catalog is compiled in and
//! available through [`MonsterCatalog::builtin`].

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CatalogError, MonsterCatalog, MonsterTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, MonsterLoader, MonsterRoster, SkillCatalog,
    SkillLoader,
};
