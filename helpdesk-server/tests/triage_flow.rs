//! End-to-end triage scenarios over the HTTP surface

mod common;

use http::StatusCode;
use serde_json::json;

use common::{auth_token, send, test_app};

#[tokio::test]
async fn password_reset_request_is_auto_resolved() {
    let (app, _state) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "у меня не работает пароль, забыл его"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "closed_auto");
    assert_eq!(body["department"], "IT Support");
    assert!(body["answer"].is_string(), "auto-resolve must carry an answer");

    // the ticket exists in its terminal state and never passed through `new`
    let token = auth_token(&app).await;
    let (status, tickets) = send(&app, "GET", "/api/tickets", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tickets[0]["status"], "closed_auto");

    // terminal tickets reject every manual move
    let id = tickets[0]["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/tickets/{id}/status"),
        Some(&token),
        Some(json!({"status": "in_progress"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
}

#[tokio::test]
async fn critical_failure_is_escalated_to_l2() {
    let (app, state) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "авария на сервере, всё лежит", "subject": "Сбой"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "new");
    assert_eq!(body["department"], "L2 Support");
    assert_eq!(body["priority"], "critical");
    assert!(body["answer"].is_null());

    // a rule-driven escalation onto critical raises an alert
    let alerts = state.sla.alerts();
    assert!(alerts.iter().any(|a| a.title.contains("Эскалация")));
}

#[tokio::test]
async fn unmatched_request_falls_through_to_catch_all() {
    let (app, _state) = test_app();

    // no keywords of the higher-priority rules; the keywordless rule
    // routes by classified category
    let (status, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "подскажите пожалуйста график работы офиса"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "new");
    assert_eq!(body["category"], "Other");
    assert_eq!(body["department"], "General Support");
    assert!(body["suggested_reply"].is_string());
}

#[tokio::test]
async fn kazakh_text_is_detected() {
    let (app, _state) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "принтер жұмыс істемейді, көмектесіңіз"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "kz");
    assert_eq!(body["priority"], "critical");
}

#[tokio::test]
async fn ai_help_answers_without_creating_a_ticket() {
    let (app, state) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/ai-help",
        None,
        Some(json!({"text": "как сменить пароль?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["solution"].is_string());
    assert_eq!(state.tickets.metrics().total, 0);
}

#[tokio::test]
async fn manual_lifecycle_walks_new_in_progress_closed() {
    let (app, _state) = test_app();
    let token = auth_token(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "не открывается общая папка отдела"})),
    )
    .await;
    let id = body["ticket_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/tickets/{id}/status"),
        Some(&token),
        Some(json!({"status": "in_progress"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/tickets/{id}/status"),
        Some(&token),
        Some(json!({"status": "closed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "closed");

    // closing twice in a row fails the second time
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/tickets/{id}/status"),
        Some(&token),
        Some(json!({"status": "closed"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");
}

#[tokio::test]
async fn metrics_reflect_ingested_tickets() {
    let (app, _state) = test_app();
    let token = auth_token(&app).await;

    for text in [
        "забыл пароль от почты",
        "авария в системе учёта",
        "просто вопрос по графику",
    ] {
        let (status, _) = send(&app, "POST", "/api/ingest", None, Some(json!({"text": text}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "GET", "/api/metrics", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["auto_resolved"], 1);
    assert_eq!(body["manual"], 2);
    assert_eq!(body["by_status"]["closed_auto"], 1);
}

#[tokio::test]
async fn disabling_the_governing_rule_changes_the_outcome() {
    let (app, _state) = test_app();
    let token = auth_token(&app).await;

    // rule 2 is the password auto-reply rule
    let (status, body) = send(&app, "POST", "/api/rules/2/toggle", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/api/ingest",
        None,
        Some(json!({"text": "забыл пароль"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // without the auto-reply rule the request falls to the catch-all
    assert_eq!(body["status"], "new");
    assert!(body["answer"].is_null());
}
