//! Entry submission integration tests
//!
//! Posts forms to a `wiremock` meetings backend and checks what was sent,
//! which notices were raised, and what the form looks like afterwards.

use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meetlog::meeting::Selection;
use meetlog::notice::{Notice, NoticeKind};
use meetlog::SubmitOutcome;

mod common;

use common::{app_for, token_for};

#[tokio::test]
async fn test_submit_without_session_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _store) = app_for(&server.uri(), None);
    let flow = app.submission_flow();
    flow.edit(|form| form.customer_name = "Acme".to_string());

    assert_eq!(flow.submit().await, SubmitOutcome::Unauthenticated);
    assert_eq!(
        flow.notices().current(),
        Some(Notice::error("You must be logged in to submit an entry."))
    );
    assert_eq!(flow.form().customer_name, "Acme");
}

#[tokio::test]
async fn test_submit_blank_customer_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let token = token_for("ravi@example.com", "Ravi");
    let (app, _store) = app_for(&server.uri(), Some(&token));
    let flow = app.submission_flow();
    flow.edit(|form| form.customer_name = "   ".to_string());

    assert_eq!(flow.submit().await, SubmitOutcome::Invalid);
    assert_eq!(flow.notices().current().unwrap().kind, NoticeKind::Error);
}

#[tokio::test]
async fn test_submit_success_resets_form_and_reacquires_location() {
    let server = MockServer::start().await;
    let token = token_for("ravi@example.com", "Ravi");

    Mock::given(method("POST"))
        .and(path("/meetings"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .and(body_partial_json(serde_json::json!({
            "customerName": "Acme",
            "location": "12.971600, 77.594600 . Flat 4, MG Road",
            "address": "Flat 4, MG Road",
            "source": "Referral",
            "status": "Discussion",
            "product": "Home Loan",
            "photo": ""
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _store) = app_for(&server.uri(), Some(&token));
    let flow = app.submission_flow();
    flow.mount().await;
    assert_eq!(flow.form().location, "12.971600, 77.594600");

    flow.edit(|form| -> meetlog::Result<()> {
        form.customer_name = "Acme".to_string();
        form.customer_address = "Flat 4, MG Road".to_string();
        form.select_source("Other")?;
        form.set_source_name("Referral")?;
        form.select_status("Discussion")?;
        form.product = Some("Home Loan".parse().map_err(anyhow::Error::msg)?);
        Ok(())
    })
    .unwrap();

    assert_eq!(flow.submit().await, SubmitOutcome::Saved);

    let posted = flow.notices().posted();
    assert_eq!(posted.last(), Some(&Notice::success("Meeting saved!")));

    let form = flow.form();
    assert!(form.customer_name.is_empty());
    assert!(form.customer_address.is_empty());
    assert_eq!(form.source, Selection::Unset);
    assert!(form.photo.is_none());
    assert_eq!(form.location, "12.971600, 77.594600");
}

#[tokio::test]
async fn test_submit_server_error_keeps_form() {
    let server = MockServer::start().await;
    let token = token_for("ravi@example.com", "Ravi");

    Mock::given(method("POST"))
        .and(path("/meetings"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _store) = app_for(&server.uri(), Some(&token));
    let flow = app.submission_flow();
    flow.edit(|form| {
        form.customer_name = "Acme".to_string();
        form.phone_number = "9876543210".to_string();
    });

    assert_eq!(flow.submit().await, SubmitOutcome::Failed);

    let notice = flow.notices().current().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.starts_with("Failed to save meeting:"));

    let form = flow.form();
    assert_eq!(form.customer_name, "Acme");
    assert_eq!(form.phone_number, "9876543210");
    assert!(!flow.is_submitting());
}
