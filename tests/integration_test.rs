use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{body_json, create_test_app, get_request, json_request};

#[tokio::test]
async fn test_password_login_echoes_query() {
    let app = create_test_app().await;

    let response = app
        .router
        .oneshot(json_request("POST", "/passwordlogin?email=a@b.com&password=x", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Password login endpoint", "email": "a@b.com", "password": "x"})
    );
}

#[tokio::test]
async fn test_password_login_without_params() {
    let app = kalima_backend_rust::create_app_with_database(None);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/passwordlogin")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "Password login endpoint"}));
}

#[tokio::test]
async fn test_password_login_undecodable_query_is_500() {
    let app = kalima_backend_rust::create_app_with_database(None);

    let response = app
        .oneshot(json_request("POST", "/passwordlogin?email=%FF%FE", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_save_phrase_twice_conflicts() {
    let app = create_test_app().await;

    let first = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/phrases",
            json!({"userId": "u1", "phraseId": "p1", "dialect": "MSA"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = body_json(first).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["dialect"], json!("msa"));
    assert_eq!(body["data"]["gender"], json!("neutral"));
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);

    let second = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/phrases",
            json!({"userId": "u1", "phraseId": "p1", "dialect": "saudi", "gender": "female"}),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], json!("CONFLICT"));

    let listed = app
        .router
        .clone()
        .oneshot(get_request("/api/users/u1/phrases"))
        .await
        .unwrap();
    let body = body_json(listed).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let one = app
        .router
        .clone()
        .oneshot(get_request("/api/users/u1/phrases/p1"))
        .await
        .unwrap();
    assert_eq!(one.status(), StatusCode::OK);

    let missing = app
        .router
        .oneshot(get_request("/api/users/u1/phrases/p2"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_enum_names_field_and_persists_nothing() {
    let app = create_test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/phrases",
            json!({"userId": "u1", "phraseId": "p1", "dialect": "klingon"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["fields"][0]["field"], json!("dialect"));

    let listed = app
        .router
        .oneshot(get_request("/api/users/u1/phrases"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await["data"], json!([]));
}

#[tokio::test]
async fn test_wrong_json_type_names_field() {
    let app = create_test_app().await;

    let cases = [
        (
            "/api/blank-history",
            json!({"userId": "u1", "phraseId": "p1", "dialect": "msa", "gender": "male", "isCorrect": "yes"}),
            "isCorrect",
        ),
        (
            "/api/feedback",
            json!({"userId": "u1", "description": "great app", "rating": 4.5}),
            "rating",
        ),
        (
            "/api/phrases",
            json!({"userId": "u1", "phraseId": "p1", "dialect": 5}),
            "dialect",
        ),
    ];

    for (uri, body, field) in cases {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", uri, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["code"], json!("VALIDATION_ERROR"));
        assert_eq!(body["fields"][0]["field"], json!(field), "{uri}");
    }

    let listed = app
        .router
        .oneshot(get_request("/api/users/u1/phrases"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await["data"], json!([]));
}

#[tokio::test]
async fn test_wrong_types_collect_every_field() {
    let app = create_test_app().await;

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/fillin-history",
            json!({"userId": 7, "sentenceId": "s1", "isCorrect": "no", "isReview": null}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["fields"][0]["field"], json!("userId"));
    assert_eq!(body["fields"][1]["field"], json!("isCorrect"));
    assert_eq!(body["fields"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_padded_ids_are_found_on_read() {
    let app = create_test_app().await;

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/phrases",
            json!({"userId": " u1", "phraseId": "p1 "}),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(body_json(created).await["data"]["userId"], json!("u1"));

    let one = app
        .router
        .clone()
        .oneshot(get_request("/api/users/%20u1/phrases/p1%20"))
        .await
        .unwrap();
    assert_eq!(one.status(), StatusCode::OK);

    let listed = app
        .router
        .clone()
        .oneshot(get_request("/api/users/%20u1/phrases"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await["data"].as_array().map(Vec::len), Some(1));

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/fillin-history",
                json!({"userId": "u1 ", "sentenceId": " s1", "isCorrect": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let by_sentence = app
        .router
        .clone()
        .oneshot(get_request("/api/sentences/%20s1/fillin-history"))
        .await
        .unwrap();
    assert_eq!(body_json(by_sentence).await["data"].as_array().map(Vec::len), Some(2));

    let filtered = app
        .router
        .oneshot(get_request("/api/users/u1/fillin-history?sentenceId=s1%20"))
        .await
        .unwrap();
    assert_eq!(body_json(filtered).await["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_oversized_body_is_bad_request() {
    let app = create_test_app().await;

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({"userId": "u1", "description": "x".repeat(70 * 1024)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], json!("BODY_TOO_LARGE"));
}

#[tokio::test]
async fn test_content_notify_duplicate_level() {
    let app = create_test_app().await;
    let payload = json!({"userId": "u1", "level": "B2"});

    let first = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/content-notify", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/content-notify", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let other_level = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/content-notify",
            json!({"userId": "u1", "level": "C1"}),
        ))
        .await
        .unwrap();
    assert_eq!(other_level.status(), StatusCode::CREATED);

    let listed = app
        .router
        .oneshot(get_request("/api/users/u1/content-notify"))
        .await
        .unwrap();
    assert_eq!(body_json(listed).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_feedback_bounds_over_http() {
    let app = create_test_app().await;

    let too_long = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({"userId": "u1", "description": "x".repeat(1001), "rating": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);

    let bad_rating = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({"userId": "u1", "description": "great", "rating": 6}),
        ))
        .await
        .unwrap();
    assert_eq!(bad_rating.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_rating).await["fields"][0]["field"], json!("rating"));

    let ok = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/feedback",
            json!({"userId": "u1", "description": "x".repeat(1000), "rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::CREATED);

    let listed = app
        .router
        .oneshot(get_request("/api/users/u1/feedback"))
        .await
        .unwrap();
    let body = body_json(listed).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["rating"], json!(5));
}

#[tokio::test]
async fn test_exercise_history_accepts_repeats() {
    let app = create_test_app().await;
    let attempt = json!({
        "userId": "u1",
        "phraseId": "p1",
        "dialect": "egyptian",
        "gender": "male",
        "isCorrect": false
    });

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", "/api/blank-history", attempt.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let other_phrase = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/blank-history",
            json!({"userId": "u1", "phraseId": "p2", "dialect": "msa", "gender": "neutral", "isCorrect": true}),
        ))
        .await
        .unwrap();
    assert_eq!(other_phrase.status(), StatusCode::CREATED);

    let all = app
        .router
        .clone()
        .oneshot(get_request("/api/users/u1/blank-history"))
        .await
        .unwrap();
    assert_eq!(body_json(all).await["data"].as_array().unwrap().len(), 3);

    let filtered = app
        .router
        .clone()
        .oneshot(get_request("/api/users/u1/blank-history?phraseId=p1"))
        .await
        .unwrap();
    assert_eq!(body_json(filtered).await["data"].as_array().unwrap().len(), 2);

    for user in ["u1", "u2"] {
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/fillin-history",
                json!({"userId": user, "sentenceId": "s1", "isCorrect": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["data"]["isReview"], json!(false));
    }

    let by_sentence = app
        .router
        .oneshot(get_request("/api/sentences/s1/fillin-history"))
        .await
        .unwrap();
    assert_eq!(body_json(by_sentence).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_notify_me_allows_identical_registrations() {
    let app = create_test_app().await;
    let payload = json!({"userId": "u1", "level": "A2", "dialect": "Gulf", "game": "Crossword"});

    for _ in 0..3 {
        let response = app
            .router
            .clone()
            .oneshot(json_request("POST", "/api/notify-me", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed = app
        .router
        .oneshot(get_request("/api/users/u1/notify-me"))
        .await
        .unwrap();
    let body = body_json(listed).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["dialect"], json!("Gulf"));
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = create_test_app().await;

    let response = app
        .router
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/feedback")
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_without_store_records_are_unavailable() {
    let app = kalima_backend_rust::create_app_with_database(None);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/phrases",
            json!({"userId": "u1", "phraseId": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let health = app.clone().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);

    let live = app.oneshot(get_request("/health/live")).await.unwrap();
    assert_eq!(live.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_app_opens_store_from_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = kalima_backend_rust::db::config::DbConfig::for_path(dir.path().join("app.db"));
    let app = kalima_backend_rust::create_app(config).await;

    let ready = app.oneshot(get_request("/health/ready")).await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(body_json(ready).await["database"], json!("connected"));
}

#[tokio::test]
async fn test_404_not_found() {
    let app = kalima_backend_rust::create_app_with_database(None);

    let response = app
        .oneshot(get_request("/nonexistent/path"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], json!("NOT_FOUND"));
}
