//! Workflow policy tests against a mock backend: query construction,
//! save idempotency, wholesale list refresh, rating gating, and the
//! delete confirmation gate.

mod common;

use common::{test_session, token_expiring_in};
use pcforge::api::ApiClient;
use pcforge::config::ApiConfig;
use pcforge::notify::MemoryNotifier;
use pcforge::workflow::{DeleteOutcome, PresetConfirm, SaveOutcome};
use pcforge::{BuildQuery, BuildWorkflow, SessionManager, UseCase};

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_body(id: &str) -> serde_json::Value {
    json!({
        "build_id": id,
        "cpu_name": "Ryzen 5 7600",
        "gpu_name": "RTX 4060",
        "motherboard_name": "B650M",
        "ram_name": "32GB DDR5",
        "storage_name": "1TB NVMe",
        "psu_name": "650W Gold",
        "case_name": "NR200",
    })
}

fn saved_body(id: &str, cost: f64) -> serde_json::Value {
    let mut body = build_body(id);
    body["total_cost"] = json!(cost);
    body
}

fn recommendation_body(id: &str, cost: f64) -> serde_json::Value {
    json!({ "recommended_build": build_body(id), "total_cost": cost })
}

/// Workflow against the mock server, optionally with a logged-in session
fn workflow_for(
    server: &MockServer,
    logged_in_as: Option<&str>,
) -> (BuildWorkflow, SessionManager, Arc<MemoryNotifier>) {
    let (session, _store, notifier) = test_session();
    if let Some(username) = logged_in_as {
        session
            .login(&token_expiring_in(username, 3600))
            .unwrap();
    }
    let api = ApiClient::new(&ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    })
    .unwrap();
    (
        BuildWorkflow::new(api, session.clone(), notifier.clone()),
        session,
        notifier,
    )
}

#[tokio::test]
async fn gaming_query_substitutes_the_game_title() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(body_json(json!({
            "budget": 800,
            "query": "Cyberpunk 2077",
            "user_id": "alice",
            "mode": "hybrid"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 785.5)))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    let query = BuildQuery {
        budget: 800,
        use_case: UseCase::Gaming,
        game: Some("Cyberpunk 2077".to_string()),
    };

    let recommendation = workflow.recommend(&query).await.unwrap();
    assert_eq!(recommendation.recommended_build.build_id, "b-1");
}

#[tokio::test]
async fn non_gaming_query_uses_the_use_case_label_and_guest_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(body_json(json!({
            "budget": 500,
            "query": "work",
            "user_id": "guest",
            "mode": "hybrid"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-2", 490.0)))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, None);
    let query = BuildQuery {
        budget: 500,
        use_case: UseCase::Work,
        game: None,
    };

    workflow.recommend(&query).await.unwrap();
}

#[tokio::test]
async fn repeated_recommendations_replace_the_display() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 700.0)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-2", 900.0)))
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, None);
    let query = BuildQuery {
        budget: 700,
        use_case: UseCase::General,
        game: None,
    };

    workflow.recommend(&query).await.unwrap();
    workflow.recommend(&query).await.unwrap();

    // The second result replaces the first; there is no history.
    assert_eq!(
        workflow.recommendation().unwrap().recommended_build.build_id,
        "b-2"
    );
}

#[tokio::test]
async fn saving_an_already_saved_build_issues_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"saved_builds": [saved_body("b-1", 785.5)]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 785.5)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/save_build"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "saved"})))
        .expect(0)
        .mount(&server)
        .await;

    let (mut workflow, _session, notifier) = workflow_for(&server, Some("alice"));
    workflow.refresh_saved().await.unwrap();

    let query = BuildQuery {
        budget: 800,
        use_case: UseCase::General,
        game: None,
    };
    workflow.recommend(&query).await.unwrap();

    let outcome = workflow.save_current().await.unwrap();
    assert_eq!(outcome, SaveOutcome::AlreadySaved);
    assert!(notifier.contains("already saved"));
}

#[tokio::test]
async fn successful_save_refetches_from_the_backend() {
    let server = MockServer::start().await;

    // Empty list before the save, one build after it.
    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved_builds": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"saved_builds": [saved_body("b-1", 785.5)]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 785.5)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/save_build"))
        .and(body_json(saved_body("b-1", 785.5)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Build saved."})))
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    workflow.refresh_saved().await.unwrap();
    assert!(workflow.saved().is_empty());

    let query = BuildQuery {
        budget: 800,
        use_case: UseCase::General,
        game: None,
    };
    workflow.recommend(&query).await.unwrap();

    let outcome = workflow.save_current().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved);

    // The list reflects backend state, not an optimistic append.
    assert_eq!(workflow.saved().len(), 1);
    assert_eq!(workflow.saved()[0].build.build_id, "b-1");
}

#[tokio::test]
async fn viewing_saved_builds_twice_yields_the_same_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"saved_builds": [saved_body("b-1", 785.5), saved_body("b-2", 900.0)]}),
        ))
        .expect(2)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));

    let first: Vec<String> = workflow
        .refresh_saved()
        .await
        .unwrap()
        .iter()
        .map(|b| b.build.build_id.clone())
        .collect();
    let second: Vec<String> = workflow
        .refresh_saved()
        .await
        .unwrap()
        .iter()
        .map(|b| b.build.build_id.clone())
        .collect();

    assert_eq!(first, second);
    assert_eq!(first, vec!["b-1".to_string(), "b-2".to_string()]);
}

#[tokio::test]
async fn declined_confirmation_blocks_the_delete_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"saved_builds": [saved_body("b-1", 785.5)]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/auth/delete_build/b-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(0)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    workflow.refresh_saved().await.unwrap();

    let outcome = workflow
        .delete("b-1", &PresetConfirm(false))
        .await
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    // The saved list is untouched.
    assert_eq!(workflow.saved().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_issues_the_call_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"saved_builds": [saved_body("b-1", 785.5)]})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved_builds": []})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/auth/delete_build/b-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Build deleted."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    workflow.refresh_saved().await.unwrap();
    assert_eq!(workflow.saved().len(), 1);

    let outcome = workflow.delete("b-1", &PresetConfirm(true)).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(workflow.saved().is_empty());
}

#[tokio::test]
async fn unselected_rating_is_rejected_without_a_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 785.5)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/rate-build"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "rated"})))
        .expect(0)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    let query = BuildQuery {
        budget: 800,
        use_case: UseCase::General,
        game: None,
    };
    workflow.recommend(&query).await.unwrap();

    workflow.select_rating(0).unwrap();
    assert!(workflow.submit_rating().await.is_err());
}

#[tokio::test]
async fn successful_rating_resets_the_pending_selection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(recommendation_body("b-1", 785.5)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/rate-build"))
        .and(body_json(json!({"build_id": "b-1", "rating": 4})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Rating submitted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, Some("alice"));
    let query = BuildQuery {
        budget: 800,
        use_case: UseCase::General,
        game: None,
    };
    workflow.recommend(&query).await.unwrap();

    workflow.select_rating(4).unwrap();
    workflow.submit_rating().await.unwrap();
    assert_eq!(workflow.pending_rating(), 0);
}

#[tokio::test]
async fn anonymous_users_cannot_view_saved_builds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/my_builds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"saved_builds": []})))
        .expect(0)
        .mount(&server)
        .await;

    let (mut workflow, _session, _notifier) = workflow_for(&server, None);
    assert!(workflow.refresh_saved().await.is_err());
}
