use std::collections::HashSet;

use tracing::info;

use super::outcome::PathId;
use super::{EligibilityEngine, QuestionId, Step};

/// Static configuration drift detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("question {0:?} is never presented for any combination of earlier answers")]
    UnreachableQuestion(QuestionId),
    #[error("eligibility path {0:?} can never be reached")]
    UnreachablePath(PathId),
    #[error("question {question:?} ends the questionnaire on '{value}', which is not one of its options")]
    UnlistedFailValue {
        question: QuestionId,
        value: &'static str,
    },
}

#[derive(Default)]
struct Coverage {
    presented: HashSet<QuestionId>,
    paths: HashSet<PathId>,
    runs: usize,
}

/// Walk every answer combination the engine's table allows and confirm each question is
/// presented and each of `paths` is reached at least once.
pub(crate) fn verify(
    engine: &EligibilityEngine,
    paths: &[PathId],
) -> Result<(), ConfigurationError> {
    for question in engine.questions() {
        if let Some(arm) = question
            .immediate_fail
            .iter()
            .find(|arm| !question.permits(arm.value))
        {
            return Err(ConfigurationError::UnlistedFailValue {
                question: question.id,
                value: arm.value,
            });
        }
    }

    let mut coverage = Coverage::default();
    explore(engine, engine.start(), &mut coverage);

    if let Some(question) = engine
        .questions()
        .iter()
        .find(|question| !coverage.presented.contains(&question.id))
    {
        return Err(ConfigurationError::UnreachableQuestion(question.id));
    }

    if let Some(path) = paths.iter().find(|path| !coverage.paths.contains(*path)) {
        return Err(ConfigurationError::UnreachablePath(*path));
    }

    info!(
        runs = coverage.runs,
        questions = coverage.presented.len(),
        "eligibility question table verified"
    );
    Ok(())
}

fn explore(engine: &EligibilityEngine, step: Step, coverage: &mut Coverage) {
    match step {
        Step::Finished { outcome, .. } => {
            coverage.runs += 1;
            if let Some(path) = outcome.path() {
                coverage.paths.insert(path);
            }
        }
        Step::Next { answers, question } => {
            coverage.presented.insert(question.id);
            for option in question.options {
                let next = engine.advance(answers.clone(), question, option);
                explore(engine, next, coverage);
            }
        }
    }
}
