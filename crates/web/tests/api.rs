mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{
    TEST_API_KEY, body_json, build_test_app, get, get_auth, post_json, post_json_with_key,
    runner_token, token_keys,
};

#[tokio::test]
async fn test_health_is_public() {
    let response = get(build_test_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = get(build_test_app(), "/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/registrations"].is_object());
    let result_path = &body["paths"]["/api/registrations/{registration_id}/result"];
    assert!(result_path["get"].is_object());
    assert!(result_path["post"].is_object());
    assert!(body["paths"]["/api/distances/{distance_category_id}"]["get"].is_object());
    assert!(body["components"]["securitySchemes"]["runner_token"].is_object());
}

#[tokio::test]
async fn test_runner_endpoints_require_a_token() {
    for uri in ["/api/registrations", "/api/results", "/api/profile"] {
        let response = get(build_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_token_is_unauthorized() {
    let response = get_auth(build_test_app(), "/api/profile", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_non_runner_role_is_forbidden() {
    let token = token_keys()
        .issue_with_role(Uuid::new_v4(), "organizer")
        .unwrap()
        .token;

    let response = get_auth(build_test_app(), "/api/registrations", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_without_token_is_unauthorized() {
    let response = post_json(
        build_test_app(),
        "/api/registrations",
        json!({ "distance_category_id": Uuid::new_v4() }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_require_api_key() {
    let race = json!({
        "name": "City Marathon",
        "location": "Zagreb",
        "race_date": "2030-10-12",
        "distances": []
    });

    let response = post_json(build_test_app(), "/api/races", race.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_with_key(build_test_app(), "/api/races", "wrong-key", race).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        build_test_app(),
        &format!("/api/runners/{}/token", Uuid::new_v4()),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_race_without_distances_fails_validation() {
    let response = post_json_with_key(
        build_test_app(),
        "/api/races",
        TEST_API_KEY,
        json!({
            "name": "City Marathon",
            "location": "Zagreb",
            "race_date": "2030-10-12",
            "distances": []
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
}

#[tokio::test]
async fn test_invalid_runner_fails_validation() {
    let response = post_json_with_key(
        build_test_app(),
        "/api/runners",
        TEST_API_KEY,
        json!({
            "first_name": "",
            "last_name": "Runner",
            "email": "not-an-email",
            "gender": "Q"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let details = body["details"].as_array().expect("details should be listed");
    assert_eq!(details.len(), 3);
}

#[tokio::test]
async fn test_zero_rank_fails_validation() {
    let response = post_json_with_key(
        build_test_app(),
        &format!("/api/registrations/{}/result", Uuid::new_v4()),
        TEST_API_KEY,
        json!({
            "finish_time": "3:29:45",
            "overall_rank": 0,
            "status": "finished"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_result_requires_api_key_not_runner_token() {
    let request = axum::http::Request::post(format!(
        "/api/registrations/{}/result",
        Uuid::new_v4()
    ))
    .header("content-type", "application/json")
    .header("authorization", format!("Bearer {}", runner_token()))
    .body(axum::body::Body::from(
        json!({ "status": "did_not_start" }).to_string(),
    ))
    .unwrap();

    let response = common::send(build_test_app(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pagination_bounds_are_checked() {
    let token = runner_token();

    let response = get_auth(build_test_app(), "/api/registrations?page=0", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(build_test_app(), "/api/results?pageSize=101", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(), "/api/races?page_size=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "page_size must be between 1 and 100");
}

#[tokio::test]
async fn test_reading_a_result_requires_a_runner_token() {
    let uri = format!("/api/registrations/{}/result", Uuid::new_v4());

    let response = get(build_test_app(), &uri).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = token_keys()
        .issue_with_role(Uuid::new_v4(), "organizer")
        .unwrap()
        .token;
    let response = get_auth(build_test_app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_oversized_finish_time_is_rejected() {
    for finish_time in ["600000:00:00", "40000000:00"] {
        let response = post_json_with_key(
            build_test_app(),
            &format!("/api/registrations/{}/result", Uuid::new_v4()),
            TEST_API_KEY,
            json!({
                "finish_time": finish_time,
                "overall_rank": 1,
                "status": "finished"
            }),
        )
        .await;

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "{finish_time}"
        );
    }
}

#[tokio::test]
async fn test_distance_lookup_rejects_malformed_id() {
    let response = get(build_test_app(), "/api/distances/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
