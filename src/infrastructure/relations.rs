//! Relation lists stored as TOML
//!
//! ```toml
//! [[relation]]
//! id = "1"
//!
//! [[relation]]
//! id = "2"
//! parent_id = "1"
//! ```
//!
//! A missing `parent_id` marks the root.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::Relation;
use crate::infrastructure::error_ext::IoResultExt;
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RelationFile {
    #[serde(default, rename = "relation")]
    relations: Vec<Relation>,
}

/// Parse a relation list from TOML text, keeping the listed order.
pub fn parse_relations(content: &str) -> Result<Vec<Relation>, toml::de::Error> {
    let file: RelationFile = toml::from_str(content)?;
    Ok(file.relations)
}

/// Render relations back to the TOML layout accepted by [`parse_relations`].
pub fn relations_to_toml(relations: &[Relation]) -> InfraResult<String> {
    let file = RelationFile {
        relations: relations.to_vec(),
    };
    toml::to_string_pretty(&file).map_err(|e| InfraError::Config {
        message: format!("serialize relations: {e}"),
    })
}

#[instrument(level = "debug")]
pub fn load_relations(path: &Path) -> InfraResult<Vec<Relation>> {
    let content = fs::read_to_string(path).with_path_context("read relations", path)?;
    let relations = parse_relations(&content).map_err(|e| InfraError::InvalidRelations {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("loaded {} relations", relations.len());
    Ok(relations)
}
