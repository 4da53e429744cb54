use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::domain::Answer;
use super::messages::{Language, LocalizedOutcome, LocalizedQuestion, MessageCatalog};
use super::{EligibilityEngine, Step};

/// Shared state behind the questionnaire endpoints.
#[derive(Debug, Clone)]
pub struct EligibilityRoutes {
    pub engine: EligibilityEngine,
    pub catalog: MessageCatalog,
    pub default_language: Language,
}

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub lang: Option<Language>,
}

/// Answers gathered so far by the portal, replayed from scratch on every call.
#[derive(Debug, Deserialize, Serialize)]
pub struct StepRequest {
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResponse {
    Question {
        answered: usize,
        question: LocalizedQuestion,
    },
    Outcome {
        result: LocalizedOutcome,
    },
}

/// Router builder exposing the questionnaire stepper over HTTP.
pub fn eligibility_router(engine: EligibilityEngine, default_language: Language) -> Router {
    let routes = Arc::new(EligibilityRoutes {
        engine,
        catalog: MessageCatalog,
        default_language,
    });

    Router::new()
        .route("/api/v1/eligibility/questions", get(first_question_handler))
        .route("/api/v1/eligibility/steps", post(step_handler))
        .with_state(routes)
}

fn render(routes: &EligibilityRoutes, step: Step, language: Language) -> StepResponse {
    match step {
        Step::Next { answers, question } => StepResponse::Question {
            answered: answers.len(),
            question: routes.catalog.question(question, language),
        },
        Step::Finished { outcome, .. } => StepResponse::Outcome {
            result: routes.catalog.outcome(&outcome, language),
        },
    }
}

pub(crate) async fn first_question_handler(
    State(routes): State<Arc<EligibilityRoutes>>,
    Query(query): Query<LanguageQuery>,
) -> Response {
    let language = query.lang.unwrap_or(routes.default_language);
    let step = routes.engine.start();
    (StatusCode::OK, axum::Json(render(&routes, step, language))).into_response()
}

pub(crate) async fn step_handler(
    State(routes): State<Arc<EligibilityRoutes>>,
    axum::Json(request): axum::Json<StepRequest>,
) -> Response {
    let language = request.language.unwrap_or(routes.default_language);
    let answers = request
        .answers
        .iter()
        .map(|answer| (answer.question, answer.value.as_str()));

    match routes.engine.replay(answers) {
        Ok(step) => {
            if let Some(outcome) = step.outcome() {
                info!(outcome = %outcome.summary(), "eligibility questionnaire completed");
            }
            (StatusCode::OK, axum::Json(render(&routes, step, language))).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
