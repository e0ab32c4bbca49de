//! Static reference data - risk catalog and question bank
//!
//! The defaults ship embedded in the binary. A project can override either
//! file by dropping `risks.yaml` or `questions.yaml` into
//! `.foreman/catalog/`; fronts referencing risks a new catalog no longer
//! knows keep working (unknown ids contribute nothing downstream).

pub mod question;
pub mod risk;

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::core::project::Project;
use crate::yaml::{parse_yaml, YamlError};

pub use question::{Question, QuestionBank};
pub use risk::{RiskCatalog, RiskDefinition, RiskLevel};

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct EmbeddedCatalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded catalog asset missing: {0}")]
    MissingAsset(&'static str),

    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("question bank has no epp_check question")]
    NoEppCheckQuestion,

    #[error("question bank has more than one epp_check question (second: {0})")]
    DuplicateEppCheckQuestion(String),
}

#[derive(Debug, Deserialize)]
struct QuestionBankFile {
    questions: Vec<Question>,
}

/// The active reference data for a project
#[derive(Debug, Clone)]
pub struct Catalog {
    pub risks: RiskCatalog,
    pub questions: QuestionBank,
}

impl Catalog {
    /// Load the embedded defaults
    pub fn embedded() -> Result<Self, CatalogError> {
        let risks = parse_risks(&embedded_asset("risks.yaml")?, "embedded:risks.yaml")?;
        let questions = parse_questions(
            &embedded_asset("questions.yaml")?,
            "embedded:questions.yaml",
        )?;
        Ok(Self { risks, questions })
    }

    /// Load the project's catalog, preferring `.foreman/catalog/` overrides
    pub fn load(project: &Project) -> Result<Self, CatalogError> {
        let dir = project.catalog_dir();

        let risks_path = dir.join("risks.yaml");
        let risks = if risks_path.exists() {
            let content = std::fs::read_to_string(&risks_path).map_err(YamlError::from)?;
            parse_risks(&content, &risks_path.display().to_string())?
        } else {
            parse_risks(&embedded_asset("risks.yaml")?, "embedded:risks.yaml")?
        };

        let questions_path = dir.join("questions.yaml");
        let questions = if questions_path.exists() {
            let content = std::fs::read_to_string(&questions_path).map_err(YamlError::from)?;
            parse_questions(&content, &questions_path.display().to_string())?
        } else {
            parse_questions(
                &embedded_asset("questions.yaml")?,
                "embedded:questions.yaml",
            )?
        };

        Ok(Self { risks, questions })
    }
}

fn embedded_asset(name: &'static str) -> Result<String, CatalogError> {
    let file = EmbeddedCatalog::get(name).ok_or(CatalogError::MissingAsset(name))?;
    String::from_utf8(file.data.into_owned())
        .map_err(|_| CatalogError::MissingAsset(name))
}

fn parse_risks(content: &str, filename: &str) -> Result<RiskCatalog, CatalogError> {
    Ok(parse_yaml(content, filename)?)
}

fn parse_questions(content: &str, filename: &str) -> Result<QuestionBank, CatalogError> {
    let file: QuestionBankFile = parse_yaml(content, filename)?;
    QuestionBank::new(file.questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.risks.is_empty());
        assert!(catalog.questions.len() > 2);
        assert_eq!(catalog.questions.epp_check().id, "epp_check");
    }

    #[test]
    fn test_embedded_catalog_has_expected_risks() {
        let catalog = Catalog::embedded().unwrap();
        for id in ["electrical", "height", "fire", "chemical", "traffic"] {
            assert!(catalog.risks.get(id).is_some(), "missing risk {}", id);
        }
    }

    #[test]
    fn test_embedded_electrical_high_equipment() {
        let catalog = Catalog::embedded().unwrap();
        let electrical = catalog.risks.get("electrical").unwrap();
        let items = electrical.equipment_for(RiskLevel::High);
        assert!(items.iter().any(|i| i.contains("dielectric gloves")));
        assert!(items.iter().any(|i| i.contains("Arc-flash")));
        assert!(items.iter().any(|i| i.contains("Fire-resistant")));
    }

    #[test]
    fn test_every_risk_has_a_question() {
        let catalog = Catalog::embedded().unwrap();
        for risk in catalog.risks.iter() {
            let ids = [risk.id.as_str()];
            assert!(
                !catalog.questions.for_risks(&ids).is_empty(),
                "no question covers risk {}",
                risk.id
            );
        }
    }

    #[test]
    fn test_general_pool_is_nonempty() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.questions.general_pool().len() >= 2);
    }
}
