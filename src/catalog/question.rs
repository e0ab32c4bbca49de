//! Inspection question bank

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

fn is_false(b: &bool) -> bool {
    !*b
}

/// One question from the bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Stable identifier, snapshotted into deviations
    pub id: String,

    /// The question shown to the supervisor
    pub prompt: String,

    /// Supporting line shown under the prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    pub category: String,

    /// Risk this question applies to; general-purpose when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,

    /// Marks the designated equipment-check question that opens every routine
    #[serde(default, skip_serializing_if = "is_false")]
    pub epp_check: bool,
}

/// The validated question bank
///
/// Construction enforces the bank invariant: exactly one question carries
/// the `epp_check` marker.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    epp_index: usize,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut marked = questions.iter().enumerate().filter(|(_, q)| q.epp_check);
        let epp_index = match (marked.next(), marked.next()) {
            (Some((idx, _)), None) => idx,
            (None, _) => return Err(CatalogError::NoEppCheckQuestion),
            (Some(_), Some((_, dup))) => {
                return Err(CatalogError::DuplicateEppCheckQuestion(dup.id.clone()))
            }
        };
        Ok(Self {
            questions,
            epp_index,
        })
    }

    /// The question that opens every routine
    pub fn epp_check(&self) -> &Question {
        &self.questions[self.epp_index]
    }

    /// Questions tied to any of the given risk ids, in bank order
    pub fn for_risks<'a>(&'a self, risk_ids: &[&str]) -> Vec<&'a Question> {
        self.questions
            .iter()
            .filter(|q| {
                q.risk
                    .as_deref()
                    .is_some_and(|risk| risk_ids.contains(&risk))
            })
            .collect()
    }

    /// General-purpose questions eligible for the random pick
    pub fn general_pool(&self) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.risk.is_none() && !q.epp_check)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
