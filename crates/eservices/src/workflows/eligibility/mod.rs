//! Residency-certificate eligibility questionnaire.
//!
//! The questionnaire is a static table of conditionally visible questions walked one answer
//! at a time. Pre-gating questions can end a run early; otherwise the completed answers are
//! handed to a ranked, first-match-wins rule chain.

pub mod domain;
mod messages;
pub mod outcome;
mod questions;
pub mod router;
mod rules;
mod self_check;

#[cfg(test)]
mod tests;

pub use domain::{answers, Answer, AnswerSet, ImmediateFail, Question, QuestionId};
pub use messages::{
    Language, LocalizedDocument, LocalizedOption, LocalizedOutcome, LocalizedQuestion,
    MessageCatalog,
};
pub use outcome::{EligibilityOutcome, FailReason, PathId, RequiredDocument};
pub use questions::QUESTIONS;
pub use router::eligibility_router;
pub use self_check::ConfigurationError;

use rules::{RankedRule, RANKED_RULES};
use tracing::debug;

/// Caller errors raised while feeding answers into the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EligibilityError {
    #[error("'{value}' is not a permitted answer for {question:?}")]
    UnknownOption { question: QuestionId, value: String },
    #[error("expected an answer for {expected:?}, received {found:?}")]
    UnexpectedQuestion {
        expected: Option<QuestionId>,
        found: QuestionId,
    },
    #[error("question {0:?} has not been answered")]
    Unanswered(QuestionId),
}

/// State returned after each accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next {
        answers: AnswerSet,
        question: &'static Question,
    },
    Finished {
        answers: AnswerSet,
        outcome: EligibilityOutcome,
    },
}

impl Step {
    pub fn answers(&self) -> &AnswerSet {
        match self {
            Step::Next { answers, .. } | Step::Finished { answers, .. } => answers,
        }
    }

    pub fn outcome(&self) -> Option<&EligibilityOutcome> {
        match self {
            Step::Next { .. } => None,
            Step::Finished { outcome, .. } => Some(outcome),
        }
    }
}

/// Stateless driver over a question table and its ranked rule chain.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEngine {
    questions: &'static [Question],
    rules: &'static [RankedRule],
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::with_tables(&QUESTIONS, &RANKED_RULES)
    }
}

impl EligibilityEngine {
    /// Engine over the shipped residency questionnaire.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_tables(
        questions: &'static [Question],
        rules: &'static [RankedRule],
    ) -> Self {
        Self { questions, rules }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// Questions whose visibility predicate holds for the answers collected so far.
    pub fn visible_questions(&self, answers: &AnswerSet) -> Vec<&'static Question> {
        self.questions
            .iter()
            .filter(|question| question.is_visible(answers))
            .collect()
    }

    pub fn next_question(&self, answers: &AnswerSet) -> Option<&'static Question> {
        self.questions
            .iter()
            .find(|question| question.is_visible(answers) && !answers.contains(question.id))
    }

    /// Start a fresh run.
    pub fn start(&self) -> Step {
        let answers = AnswerSet::new();
        match self.next_question(&answers) {
            Some(question) => Step::Next { answers, question },
            None => {
                let outcome = self.evaluate(&answers);
                Step::Finished { answers, outcome }
            }
        }
    }

    /// Record one answer and advance the questionnaire.
    pub fn submit_answer(
        &self,
        answers: AnswerSet,
        question_id: QuestionId,
        value: &str,
    ) -> Result<Step, EligibilityError> {
        let expected = self.next_question(&answers);
        let question = match expected {
            Some(question) if question.id == question_id => question,
            _ => {
                return Err(EligibilityError::UnexpectedQuestion {
                    expected: expected.map(|question| question.id),
                    found: question_id,
                })
            }
        };

        if !question.permits(value) {
            return Err(EligibilityError::UnknownOption {
                question: question_id,
                value: value.to_string(),
            });
        }

        Ok(self.advance(answers, question, value))
    }

    /// Append an already validated answer and move to the next step.
    pub(crate) fn advance(
        &self,
        answers: AnswerSet,
        question: &'static Question,
        value: &str,
    ) -> Step {
        let answers = answers.with(question.id, value);

        if let Some(reason) = question.fail_reason_for(value) {
            debug!(question = question.id.key(), ?reason, "questionnaire ended early");
            return Step::Finished {
                answers,
                outcome: EligibilityOutcome::NotApplicable { reason },
            };
        }

        match self.next_question(&answers) {
            Some(question) => Step::Next { answers, question },
            None => {
                let outcome = self.evaluate(&answers);
                debug!(outcome = %outcome.summary(), "questionnaire evaluated");
                Step::Finished { answers, outcome }
            }
        }
    }

    /// Feed an entire answer list through `submit_answer` from an empty set.
    ///
    /// Answers past an early termination are rejected as unexpected.
    pub fn replay<'a, I>(&self, answers: I) -> Result<Step, EligibilityError>
    where
        I: IntoIterator<Item = (QuestionId, &'a str)>,
    {
        let mut step = self.start();
        for (question_id, value) in answers {
            step = match step {
                Step::Next { answers, .. } => self.submit_answer(answers, question_id, value)?,
                Step::Finished { .. } => {
                    return Err(EligibilityError::UnexpectedQuestion {
                        expected: None,
                        found: question_id,
                    })
                }
            };
        }
        Ok(step)
    }

    /// Map a completed answer set to its outcome through the ranked rule chain.
    pub fn evaluate(&self, answers: &AnswerSet) -> EligibilityOutcome {
        rules::evaluate_rules(self.rules, answers)
    }

    /// Like [`evaluate`](Self::evaluate) but refuses answer sets with visible questions left.
    pub fn evaluate_complete(
        &self,
        answers: &AnswerSet,
    ) -> Result<EligibilityOutcome, EligibilityError> {
        match self.next_question(answers) {
            Some(question) => Err(EligibilityError::Unanswered(question.id)),
            None => Ok(self.evaluate(answers)),
        }
    }

    /// Startup integrity check over the question table and rule chain.
    pub fn self_check(&self) -> Result<(), ConfigurationError> {
        self_check::verify(self, &PathId::ordered())
    }
}
