use axum::response::Response;
use serde_json::Value;

use crate::workflows::eligibility::answers::*;
use crate::workflows::eligibility::{
    AnswerSet, EligibilityEngine, EligibilityOutcome, QuestionId, Step,
};

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new()
}

/// Resident, living in the area, single: the prefix every ranked-rule scenario shares.
pub(super) fn single_resident() -> Vec<(QuestionId, &'static str)> {
    vec![
        (QuestionId::IsResident, YES),
        (QuestionId::LivesInHusniyya, YES),
        (QuestionId::MaritalStatus, SINGLE),
    ]
}

pub(super) fn with_answers(
    mut prefix: Vec<(QuestionId, &'static str)>,
    rest: &[(QuestionId, &'static str)],
) -> Vec<(QuestionId, &'static str)> {
    prefix.extend_from_slice(rest);
    prefix
}

pub(super) fn run(answers: &[(QuestionId, &'static str)]) -> Step {
    engine()
        .replay(answers.iter().copied())
        .expect("answers replay cleanly")
}

pub(super) fn finished(answers: &[(QuestionId, &'static str)]) -> (AnswerSet, EligibilityOutcome) {
    match run(answers) {
        Step::Finished { answers, outcome } => (answers, outcome),
        Step::Next { question, .. } => panic!("questionnaire still expects {:?}", question.id),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
