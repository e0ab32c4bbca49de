//! Routine engine - question selection and the inspection walk
//!
//! A routine is one guided pass over a front's applicable questions. The
//! question list is fixed when the session begins: the equipment check
//! opens, the front's risk-specific questions follow in bank order, and one
//! randomly drawn general question closes the list. The session then steps
//! through the list as an explicit state machine; dropping the session at
//! any point before commit persists nothing.

use chrono::Utc;
use rand::seq::IndexedRandom;
use rand::Rng;
use thiserror::Error;

use crate::catalog::{Question, QuestionBank};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::core::status::compute_status;
use crate::entities::deviation::{ActionTaken, Deviation, Severity};
use crate::entities::front::WorkFront;
use crate::entities::record::InspectionRecord;

/// Build the ordered question list for a front
///
/// The random source is injected so callers can seed it; only the general
/// question pick consumes randomness.
pub fn build_routine<R: Rng + ?Sized>(
    front: &WorkFront,
    bank: &QuestionBank,
    rng: &mut R,
) -> Vec<Question> {
    let mut questions = vec![bank.epp_check().clone()];

    let risk_ids = front.risk_ids();
    questions.extend(bank.for_risks(&risk_ids).into_iter().cloned());

    let pool = bank.general_pool();
    if let Some(general) = pool.choose(rng) {
        questions.push((*general).clone());
    }

    questions
}

/// Refused session operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no question is awaiting an answer")]
    NotAwaitingAnswer,

    #[error("no deviation capture is in progress")]
    NotCapturingDeviation,

    #[error("a deviation needs a non-empty description")]
    EmptyDescription,

    #[error("a deviation needs photo evidence")]
    MissingPhoto,

    #[error("the routine still has unanswered questions")]
    NotFinished,

    #[error("a supervisor signature is required to commit")]
    MissingSignature,
}

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The current question waits for pass / deviation
    AwaitingAnswer,
    /// A deviation is being captured for the current question
    CapturingDeviation,
    /// All questions answered; only commit remains
    Finished,
}

/// Outcome of answering or confirming on the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Advanced to the question at this step index
    Next(usize),
    /// That was the last question
    Finished,
}

/// Caller-supplied fields for a deviation under capture
///
/// Severity and action fall back to their defaults (`medium` / `pending`)
/// when left unset; description and photo are mandatory.
#[derive(Debug, Clone, Default)]
pub struct DeviationDraft {
    pub description: String,
    pub photo: String,
    pub severity: Option<Severity>,
    pub action_taken: Option<ActionTaken>,
}

/// One in-progress inspection walk
///
/// Holds everything the walk needs, snapshotted at `begin`, so a risk edit
/// elsewhere can never change the question set mid-routine.
#[derive(Debug, Clone)]
pub struct RoutineSession {
    front_name: String,
    site_name: String,
    questions: Vec<Question>,
    step: usize,
    state: SessionState,
    deviations: Vec<Deviation>,
}

impl RoutineSession {
    /// Start a session for a front
    pub fn begin<R: Rng + ?Sized>(front: &WorkFront, bank: &QuestionBank, rng: &mut R) -> Self {
        let questions = build_routine(front, bank, rng);
        Self {
            front_name: front.name.clone(),
            site_name: front.site.clone(),
            questions,
            step: 0,
            state: SessionState::AwaitingAnswer,
            deviations: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Zero-based index of the current question
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question under inspection; `None` once finished
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Finished => None,
            _ => self.questions.get(self.step),
        }
    }

    pub fn deviations(&self) -> &[Deviation] {
        &self.deviations
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Answer the current question with "no deviation"
    pub fn answer_ok(&mut self) -> Result<Progress, SessionError> {
        if self.state != SessionState::AwaitingAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        Ok(self.advance())
    }

    /// Answer the current question with "deviation found"
    pub fn flag_deviation(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::AwaitingAnswer {
            return Err(SessionError::NotAwaitingAnswer);
        }
        self.state = SessionState::CapturingDeviation;
        Ok(())
    }

    /// Back out of a deviation capture without recording anything
    pub fn cancel_capture(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::CapturingDeviation {
            return Err(SessionError::NotCapturingDeviation);
        }
        self.state = SessionState::AwaitingAnswer;
        Ok(())
    }

    /// Record the deviation under capture and move on
    ///
    /// Refused, with the session unchanged, when description or photo are
    /// missing.
    pub fn confirm_deviation(&mut self, draft: DeviationDraft) -> Result<Progress, SessionError> {
        if self.state != SessionState::CapturingDeviation {
            return Err(SessionError::NotCapturingDeviation);
        }
        if draft.description.trim().is_empty() {
            return Err(SessionError::EmptyDescription);
        }
        if draft.photo.is_empty() {
            return Err(SessionError::MissingPhoto);
        }

        // State is CapturingDeviation, so the step is in bounds
        let question = &self.questions[self.step];
        self.deviations.push(Deviation {
            question_id: question.id.clone(),
            question_text: question.prompt.clone(),
            description: draft.description,
            photo: draft.photo,
            recorded_at: Utc::now(),
            severity: draft.severity.unwrap_or_default(),
            action_taken: draft.action_taken.unwrap_or_default(),
        });
        Ok(self.advance())
    }

    /// Commit the finished walk into an inspection record
    ///
    /// The caller is responsible for persisting the record and applying
    /// `status_result` back to the front.
    pub fn commit(
        &self,
        signature: &str,
        supervisor: &str,
    ) -> Result<InspectionRecord, SessionError> {
        if self.state != SessionState::Finished {
            return Err(SessionError::NotFinished);
        }
        if signature.is_empty() {
            return Err(SessionError::MissingSignature);
        }

        Ok(InspectionRecord {
            id: EntityId::new(EntityPrefix::Insp),
            date: Utc::now(),
            front_name: self.front_name.clone(),
            site_name: self.site_name.clone(),
            supervisor_name: supervisor.to_string(),
            signature: signature.to_string(),
            deviations: self.deviations.clone(),
            questions_checked: self.questions.len() as u32,
            status_result: compute_status(&self.deviations),
        })
    }

    fn advance(&mut self) -> Progress {
        if self.step + 1 < self.questions.len() {
            self.step += 1;
            self.state = SessionState::AwaitingAnswer;
            Progress::Next(self.step)
        } else {
            self.state = SessionState::Finished;
            Progress::Finished
        }
    }
}
