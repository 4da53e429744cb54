use super::common::*;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::eligibility::{eligibility_router, Language};

fn router() -> axum::Router {
    eligibility_router(engine(), Language::Hebrew)
}

fn post_steps(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post("/api/v1/eligibility/steps")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize request"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn first_question_is_localized_by_query() {
    let response = router()
        .oneshot(
            axum::http::Request::get("/api/v1/eligibility/questions?lang=ar")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "question");
    assert_eq!(payload["question"]["id"], "isResident");
    assert_eq!(payload["question"]["options"][0]["label"], "نعم");
}

#[tokio::test]
async fn steps_return_next_question_until_complete() {
    let response = router()
        .oneshot(post_steps(json!({
            "answers": [
                { "question": "isResident", "value": "yes" },
                { "question": "livesInHusniyya", "value": "yes" },
            ]
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "question");
    assert_eq!(payload["answered"], 2);
    assert_eq!(payload["question"]["id"], "maritalStatus");
}

#[tokio::test]
async fn completed_answers_return_outcome_with_documents() {
    let response = router()
        .oneshot(post_steps(json!({
            "language": "he",
            "answers": [
                { "question": "isResident", "value": "yes" },
                { "question": "livesInHusniyya", "value": "yes" },
                { "question": "maritalStatus", "value": "single" },
                { "question": "livingArrangement", "value": "owned" },
                { "question": "hasUtilityPayments", "value": "no" },
                { "question": "employmentType", "value": "employee" },
                { "question": "workLocation", "value": "nearby" },
            ]
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "outcome");
    assert_eq!(payload["result"]["outcome"]["kind"], "eligible");
    assert_eq!(payload["result"]["outcome"]["path"], "employee_nearby");
    let documents = payload["result"]["documents"]
        .as_array()
        .expect("documents array");
    assert_eq!(documents.len(), 4);
    assert_eq!(documents[0]["document"], "identity_card");
}

#[tokio::test]
async fn invalid_answer_is_unprocessable() {
    let response = router()
        .oneshot(post_steps(json!({
            "answers": [{ "question": "isResident", "value": "perhaps" }]
        })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("perhaps"));
}
